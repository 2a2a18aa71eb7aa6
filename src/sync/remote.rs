use std::fmt::Display;

use form_compiler::{Form, Messages};
use log::{debug, info};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::LOCATION;
use serde::{Deserialize, Serialize};
use snafu::{OptionExt, ResultExt};

use crate::sync::{config_reader::ServiceConfig, *};

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub field: String,
    #[serde(rename = "in", default)]
    pub location: String,
}

/// The error payload of the form service.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub details: Vec<ApiErrorDetail>,
}

impl ApiError {
    /// An error without code is no error.
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}. {}. Details: {:?}",
            self.code, self.description, self.details
        )
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FormSummary {
    pub id: String,
    pub title: String,
}

/// One page of the forms of a workspace.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormsResponse {
    #[serde(default)]
    pub total_items: usize,
    #[serde(default)]
    pub items: Vec<FormSummary>,
}

/// The operations of the form service used by the synchronization.
pub trait FormService {
    fn get_form(&self, id: &str) -> SyncResult<Form>;
    fn list_forms(&self, workspace: &str, page_size: usize) -> SyncResult<FormsResponse>;
    /// Creates a form and returns the location of the new form.
    fn create_form(&self, form: &Form) -> SyncResult<String>;
    /// Replaces the form with the id of `form`.
    fn replace_form(&self, form: &Form) -> SyncResult<()>;
    fn replace_messages(&self, form_id: &str, messages: &Messages) -> SyncResult<()>;
}

/// Parses the error payload of a response, if it carries one.
pub fn parse_api_error(body: &str) -> Option<ApiError> {
    serde_json::from_str::<ApiError>(body)
        .ok()
        .filter(|e| !e.is_empty())
}

/// The error for a failed response.
pub fn error_for_status(url: &str, status: u16, body: &str) -> SyncError {
    match parse_api_error(body) {
        Some(error) => SyncError::Api { error },
        None => SyncError::UnexpectedStatus {
            status,
            url: url.to_string(),
        },
    }
}

/// Interprets the response to a message update. Only an empty 204 is a success.
pub fn check_messages_response(form_id: &str, url: &str, status: u16, body: &str) -> SyncResult<()> {
    match status {
        204 => Ok(()),
        400 => MessagesTooLongSnafu {
            form_id,
            error: parse_api_error(body).unwrap_or_default(),
        }
        .fail(),
        _ => Err(error_for_status(url, status, body)),
    }
}

/// The form service over HTTP.
pub struct HttpFormService {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpFormService {
    pub fn new(config: &ServiceConfig) -> SyncResult<HttpFormService> {
        let client = Client::builder().build().context(HttpSnafu {
            url: config.base_url.clone(),
        })?;
        Ok(HttpFormService {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

/// The body of a successful response, or the error it carries.
pub fn expect_success(url: &str, status: u16, body: String) -> SyncResult<String> {
    if (200..300).contains(&status) {
        Ok(body)
    } else {
        Err(error_for_status(url, status, &body))
    }
}

fn read_body(response: Response, url: &str) -> SyncResult<(u16, String)> {
    let status = response.status().as_u16();
    let body = response.text().context(HttpSnafu { url })?;
    debug!("{} -> {}: {}", url, status, body);
    Ok((status, body))
}

impl HttpFormService {
    fn send(&self, request: RequestBuilder, url: &str) -> SyncResult<Response> {
        request
            .bearer_auth(&self.token)
            .send()
            .context(HttpSnafu { url })
    }

    /// Sends a request and returns the body of the successful response.
    fn fetch(&self, request: RequestBuilder, url: &str) -> SyncResult<String> {
        let (status, body) = read_body(self.send(request, url)?, url)?;
        expect_success(url, status, body)
    }
}

impl FormService for HttpFormService {
    fn get_form(&self, id: &str) -> SyncResult<Form> {
        let url = self.url(&format!("forms/{}", id));
        info!("Fetching form {}", id);
        let body = self.fetch(self.client.get(&url), &url)?;
        serde_json::from_str(&body).context(ParsingJsonSnafu { url })
    }

    fn list_forms(&self, workspace: &str, page_size: usize) -> SyncResult<FormsResponse> {
        let url = self.url("forms");
        info!("Listing forms of workspace {}", workspace);
        let request = self.client.get(&url).query(&[
            ("workspace_id", workspace.to_string()),
            ("page_size", page_size.to_string()),
        ]);
        let body = self.fetch(request, &url)?;
        serde_json::from_str(&body).context(ParsingJsonSnafu { url })
    }

    fn create_form(&self, form: &Form) -> SyncResult<String> {
        let url = self.url("forms");
        info!("Creating form {:?}", form.title);
        let response = self.send(self.client.post(&url).json(form), &url)?;
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        let (status, body) = read_body(response, &url)?;
        expect_success(&url, status, body)?;
        location.context(MissingLocationSnafu { url })
    }

    fn replace_form(&self, form: &Form) -> SyncResult<()> {
        let url = self.url(&format!("forms/{}", form.id));
        info!("Updating form {} ({:?})", form.id, form.title);
        self.fetch(self.client.put(&url).json(form), &url)?;
        Ok(())
    }

    fn replace_messages(&self, form_id: &str, messages: &Messages) -> SyncResult<()> {
        let url = self.url(&format!("forms/{}/messages", form_id));
        info!("Updating {} messages of form {}", messages.len(), form_id);
        let response = self.send(self.client.put(&url).json(messages), &url)?;
        let (status, body) = read_body(response, &url)?;
        check_messages_response(form_id, &url, status, &body)
    }
}
