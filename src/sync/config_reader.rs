use std::env;

use log::debug;
use snafu::ResultExt;

use crate::sync::*;

pub const BASE_URL_VAR: &str = "TYPEFORM_BASE_URL";
pub const TOKEN_VAR: &str = "TYPEFORM_TOKEN";

/// How to reach the form service.
#[derive(Eq, PartialEq, Clone)]
pub struct ServiceConfig {
    pub base_url: String,
    pub token: String,
}

// The token stays out of the logs.
impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ServiceConfig {
    /// Reads the configuration from the environment. Both variables are required.
    pub fn from_env() -> SyncResult<ServiceConfig> {
        let config = ServiceConfig {
            base_url: read_var(BASE_URL_VAR)?,
            token: read_var(TOKEN_VAR)?,
        };
        debug!("config: {:?}", config);
        Ok(config)
    }

    /// The href under which the service knows a workspace.
    pub fn workspace_href(&self, workspace: &str) -> String {
        format!(
            "{}/workspaces/{}",
            self.base_url.trim_end_matches('/'),
            workspace
        )
    }
}

fn read_var(name: &str) -> SyncResult<String> {
    let value = env::var(name).context(MissingEnvSnafu { name })?;
    if value.trim().is_empty() {
        return Err(SyncError::MissingEnv {
            source: env::VarError::NotPresent,
            name: name.to_string(),
        });
    }
    Ok(value)
}
