use log::{error, info};

use form_compiler::*;
use snafu::{prelude::*, Snafu};

use std::collections::BTreeMap;

pub mod config_reader;
pub mod directory;
pub mod engine;
pub mod export;
#[cfg(test)]
mod fake_service;
pub mod io_common;
pub mod io_csv;
pub mod io_xlsx;
pub mod remote;
pub mod survey_file;

use crate::sync::config_reader::ServiceConfig;
use crate::sync::directory::find_by_title;
use crate::sync::engine::sync_form;
use crate::sync::remote::{ApiError, FormService};
use crate::sync::survey_file::initial_forms;

#[derive(Debug, Snafu)]
pub enum SyncError {
    #[snafu(display("Missing required environment variable {name}"))]
    MissingEnv {
        source: std::env::VarError,
        name: String,
    },
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Cannot find worksheet {name} in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Unable to parse line {lineno} of CSV file {path}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Error reading directory {path}"))]
    ReadingDirectory {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("No workspace given: pass --workspace"))]
    MissingWorkspace {},
    #[snafu(display("Survey file {path} is neither an .xlsx workbook nor a directory"))]
    UnsupportedSurveyFile { path: String },
    #[snafu(display("Could not find translation for form {name}"))]
    MissingTranslationSheet { name: String },
    #[snafu(display("Cannot build form {name}: {source}"))]
    Compile { source: CompileError, name: String },

    #[snafu(display("Form with name {title} in workspace {workspace} already exists"))]
    FormExists { title: String, workspace: String },
    #[snafu(display("Could not find form with name {title} in workspace {workspace}"))]
    FormNotFound { title: String, workspace: String },
    #[snafu(display(
        "Cannot get all forms from workspace {workspace}. Page size is {returned} and the total items is {total}"
    ))]
    IncompletePage {
        workspace: String,
        returned: usize,
        total: usize,
    },

    #[snafu(display("Request to {url} failed"))]
    Http { source: reqwest::Error, url: String },
    #[snafu(display("{error}"))]
    Api { error: ApiError },
    #[snafu(display(
        "Error updating messages of form {form_id}. Got 400 response. Messages may be too long. Original error: {error}"
    ))]
    MessagesTooLong { form_id: String, error: ApiError },
    #[snafu(display("Unexpected response {status} from {url}"))]
    UnexpectedStatus { status: u16, url: String },
    #[snafu(display("No location returned when creating a form at {url}"))]
    MissingLocation { url: String },
    #[snafu(display("Cannot decode the response from {url}"))]
    ParsingJson {
        source: serde_json::Error,
        url: String,
    },

    #[snafu(display("Error writing Excel file {path}"))]
    WritingExcel {
        source: rust_xlsxwriter::XlsxError,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type SyncResult<T> = Result<T, SyncError>;

/// The outcome of synchronizing one form.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum SyncStatus {
    Success,
    AlreadyExists,
    NotFound,
    ValidationError,
    RemoteError,
    IncompletePage,
    TransportError,
    SetupError,
}

impl SyncError {
    pub fn status(&self) -> SyncStatus {
        match self {
            SyncError::FormExists { .. } => SyncStatus::AlreadyExists,
            SyncError::FormNotFound { .. } => SyncStatus::NotFound,
            SyncError::IncompletePage { .. } => SyncStatus::IncompletePage,
            SyncError::Compile { .. } | SyncError::MissingTranslationSheet { .. } => {
                SyncStatus::ValidationError
            }
            SyncError::Api { .. }
            | SyncError::MessagesTooLong { .. }
            | SyncError::UnexpectedStatus { .. }
            | SyncError::MissingLocation { .. }
            | SyncError::ParsingJson { .. } => SyncStatus::RemoteError,
            SyncError::Http { .. } => SyncStatus::TransportError,
            SyncError::MissingEnv { .. }
            | SyncError::OpeningExcel { .. }
            | SyncError::MissingWorksheet { .. }
            | SyncError::CsvOpen { .. }
            | SyncError::CsvLineParse { .. }
            | SyncError::ReadingDirectory { .. }
            | SyncError::MissingWorkspace { .. }
            | SyncError::UnsupportedSurveyFile { .. }
            | SyncError::WritingExcel { .. }
            | SyncError::Whatever { .. } => SyncStatus::SetupError,
        }
    }
}

/// A compiled form, with the raw message table that goes with it.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct FormConf {
    pub name: String,
    pub form: Form,
    /// The message table, header included.
    pub messages_data: Vec<Vec<String>>,
}

impl FormConf {
    /// Compiles a question table (header included) into a form of the given workspace.
    pub fn new(
        workspace_href: &str,
        name: &str,
        form_data: &[Vec<String>],
        messages_data: Vec<Vec<String>>,
    ) -> FormConf {
        let mut form = build_form(name, form_data.get(1..).unwrap_or(&[]));
        form.workspace = Workspace {
            href: workspace_href.to_string(),
        };
        FormConf {
            name: name.to_string(),
            form,
            messages_data,
        }
    }

    pub fn messages(&self) -> Messages {
        compile_message_table(&self.messages_data)
    }

    /// Replaces the form by the translation of a published source form.
    pub fn translate(&mut self, source: &Form) -> SyncResult<()> {
        self.form = translate_form(source, &self.form).context(CompileSnafu {
            name: self.name.clone(),
        })?;
        Ok(())
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Mode {
    Create,
    Update,
}

/// How to synchronize each form of a batch.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct SyncPlan {
    pub mode: Mode,
    /// On update, keep the logic and the choice references of the published form.
    pub preserve_logic: bool,
    /// Only print what would be sent.
    pub dry_run: bool,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct EntryReport {
    pub sheet: String,
    pub status: SyncStatus,
}

/// Synchronizes every form of a batch, or only the one of `sheet`.
///
/// A failing form does not stop the batch. Forms that already exist are
/// skipped when creating.
pub fn run_batch(
    service: &dyn FormService,
    confs: BTreeMap<String, FormConf>,
    sheet: Option<&str>,
    plan: &SyncPlan,
) -> Vec<EntryReport> {
    let mut reports: Vec<EntryReport> = Vec::new();
    for (s, mut conf) in confs {
        if sheet.map_or(false, |x| x != s) {
            continue;
        }
        let status = match sync_form(service, &mut conf, plan) {
            Ok(()) => {
                info!("{}: form {:?} synchronized", s, conf.form.id);
                SyncStatus::Success
            }
            Err(e @ SyncError::FormExists { .. }) => {
                info!("{}: skipping existing form: {}", s, e);
                e.status()
            }
            Err(e) => {
                error!("{}: {}", s, e);
                e.status()
            }
        };
        reports.push(EntryReport { sheet: s, status });
    }
    reports
}

/// Creates or updates the forms of a base survey file.
pub fn run_base(
    service: &dyn FormService,
    config: &ServiceConfig,
    workspace: &str,
    base_path: &str,
    sheet: Option<&str>,
    plan: &SyncPlan,
) -> SyncResult<Vec<EntryReport>> {
    ensure!(!workspace.trim().is_empty(), MissingWorkspaceSnafu);
    let confs = initial_forms(&config.workspace_href(workspace), base_path)?;
    Ok(run_batch(service, confs, sheet, plan))
}

/// Builds the translated forms from the published base forms.
///
/// Every base form must have a translation sheet, checked before anything
/// is fetched. Returns the translated forms, plus a report for each base
/// form that is not published or whose translation does not fit.
pub fn translate_confs(
    service: &dyn FormService,
    workspace: &str,
    bases: &BTreeMap<String, FormConf>,
    mut translations: BTreeMap<String, FormConf>,
    sheet: Option<&str>,
) -> SyncResult<(BTreeMap<String, FormConf>, Vec<EntryReport>)> {
    let selected: Vec<(&String, &FormConf)> = bases
        .iter()
        .filter(|(s, _)| sheet.map_or(true, |x| x == s.as_str()))
        .collect();
    for (s, base) in selected.iter() {
        ensure!(
            translations.contains_key(s.as_str()),
            MissingTranslationSheetSnafu {
                name: base.name.clone(),
            }
        );
    }

    let mut res: BTreeMap<String, FormConf> = BTreeMap::new();
    let mut failures: Vec<EntryReport> = Vec::new();
    for (s, base) in selected {
        let translated = find_by_title(service, workspace, &base.form.title).and_then(|published| {
            let mut conf = translations
                .remove(s)
                .context(MissingTranslationSheetSnafu {
                    name: base.name.clone(),
                })?;
            conf.translate(&published)?;
            Ok(conf)
        });
        match translated {
            Ok(conf) => {
                res.insert(s.clone(), conf);
            }
            Err(e) => {
                error!("{}: {}", s, e);
                failures.push(EntryReport {
                    sheet: s.clone(),
                    status: e.status(),
                });
            }
        }
    }
    Ok((res, failures))
}

/// Creates or updates the translated forms of a survey.
pub fn run_translations(
    service: &dyn FormService,
    config: &ServiceConfig,
    workspace: &str,
    base_path: &str,
    translation_path: &str,
    sheet: Option<&str>,
    plan: &SyncPlan,
) -> SyncResult<Vec<EntryReport>> {
    ensure!(!workspace.trim().is_empty(), MissingWorkspaceSnafu);
    let href = config.workspace_href(workspace);
    let bases = initial_forms(&href, base_path)?;
    let translations = initial_forms(&href, translation_path)?;

    let (confs, mut reports) = translate_confs(service, workspace, &bases, translations, sheet)?;
    reports.extend(run_batch(service, confs, sheet, plan));
    Ok(reports)
}
