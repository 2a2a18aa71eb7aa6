use form_compiler::Form;
use log::debug;
use snafu::ensure;

use crate::sync::remote::{FormService, FormsResponse};
use crate::sync::*;

/// The number of forms requested when listing a workspace.
pub const PAGE_SIZE: usize = 100;

/// Lists the forms of a workspace.
///
/// Only one page is requested. A workspace with more forms than a page is
/// an error rather than a silently incomplete listing.
pub fn list_forms(service: &dyn FormService, workspace: &str) -> SyncResult<FormsResponse> {
    let forms = service.list_forms(workspace, PAGE_SIZE)?;
    ensure!(
        forms.total_items <= forms.items.len(),
        IncompletePageSnafu {
            workspace,
            returned: forms.items.len(),
            total: forms.total_items,
        }
    );
    debug!(
        "list_forms: {} forms in workspace {}",
        forms.items.len(),
        workspace
    );
    Ok(forms)
}

/// Fetches the first form of the workspace with exactly this title.
pub fn find_by_title(service: &dyn FormService, workspace: &str, title: &str) -> SyncResult<Form> {
    let forms = list_forms(service, workspace)?;
    match forms.items.iter().find(|f| f.title == title) {
        Some(f) => service.get_form(&f.id),
        None => FormNotFoundSnafu { title, workspace }.fail(),
    }
}

/// Fails if the workspace already has a form with this title.
pub fn assert_absent(service: &dyn FormService, workspace: &str, title: &str) -> SyncResult<()> {
    let forms = list_forms(service, workspace)?;
    ensure!(
        !forms.items.iter().any(|f| f.title == title),
        FormExistsSnafu { title, workspace }
    );
    Ok(())
}
