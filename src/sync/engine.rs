use form_compiler::{copy_choice_refs, Form};
use log::{debug, info};
use snafu::ResultExt;
use text_diff::print_diff;

use crate::sync::directory::{assert_absent, find_by_title};
use crate::sync::io_common::last_path_segment;
use crate::sync::remote::FormService;
use crate::sync::*;

/// Synchronizes one form according to the plan.
pub fn sync_form(service: &dyn FormService, conf: &mut FormConf, plan: &SyncPlan) -> SyncResult<()> {
    match plan.mode {
        Mode::Create => create_form(service, conf, plan.dry_run),
        Mode::Update => update_form(service, conf, plan.preserve_logic, plan.dry_run),
    }
}

/// Creates a new form and its messages.
///
/// Fails with `FormExists` if the workspace already has a form with the same title.
pub fn create_form(service: &dyn FormService, conf: &mut FormConf, dry_run: bool) -> SyncResult<()> {
    let workspace = conf.form.workspace.id().to_string();
    assert_absent(service, &workspace, &conf.form.title)?;

    let messages = conf.messages();
    if dry_run {
        println!("{}", to_pretty_json(&conf.form)?);
        info!(
            "Dry run: would create form {:?} with {} questions and {} messages",
            conf.form.title,
            conf.form.fields.len(),
            messages.len()
        );
        return Ok(());
    }

    let location = service.create_form(&conf.form)?;
    conf.form.id = last_path_segment(&location).to_string();
    info!(
        "Success! Created form {} ({:?}) with {} questions",
        conf.form.id,
        conf.form.title,
        conf.form.fields.len()
    );

    service.replace_messages(&conf.form.id, &messages)
}

/// Replaces the questions of the published form with the same title, then its messages.
///
/// The published form must be read before anything is written: its id, and
/// with `preserve_logic` its logic and choice references, are carried over.
pub fn update_form(
    service: &dyn FormService,
    conf: &mut FormConf,
    preserve_logic: bool,
    dry_run: bool,
) -> SyncResult<()> {
    let workspace = conf.form.workspace.id().to_string();
    let published = find_by_title(service, &workspace, &conf.form.title)?;

    conf.form.id = published.id.clone();
    if preserve_logic {
        conf.form.logic = published.logic.clone();
        conf.form.fields = copy_choice_refs(&published, &conf.form);
    }
    debug!("update_form: {:?}", conf.form);

    let messages = conf.messages();
    if dry_run {
        print_diff(
            &to_pretty_json(&published)?,
            &to_pretty_json(&conf.form)?,
            "\n",
        );
        info!(
            "Dry run: would update form {} ({:?}) and {} messages",
            conf.form.id,
            conf.form.title,
            messages.len()
        );
        return Ok(());
    }

    service.replace_form(&conf.form)?;
    info!(
        "Success! Updated form {} ({:?}) with {} questions",
        conf.form.id,
        conf.form.title,
        conf.form.fields.len()
    );

    service.replace_messages(&conf.form.id, &messages)
}

fn to_pretty_json(form: &Form) -> SyncResult<String> {
    serde_json::to_string_pretty(form).context(ParsingJsonSnafu {
        url: form.id.clone(),
    })
}
