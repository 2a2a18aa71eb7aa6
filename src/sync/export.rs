use std::path::Path;

use form_compiler::Form;
use log::info;
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use snafu::ResultExt;

use crate::sync::remote::FormService;
use crate::sync::*;

/// The name of the worksheet written by the export.
pub const EXPORT_SHEET: &str = "Sheet1";

fn write_questions(sheet: &mut Worksheet, form: &Form) -> Result<(), XlsxError> {
    sheet.set_name(EXPORT_SHEET)?;
    for (row, q) in form.fields.iter().enumerate() {
        let row = row as u32;
        sheet.write_string(row, 0, &q.reference)?;
        sheet.write_string(row, 1, &q.field_type)?;
        sheet.write_string(row, 2, &q.title)?;
    }
    Ok(())
}

/// Writes the reference, type and title of every question of a form, one row per question.
pub fn write_form_export(form: &Form, path: &Path) -> SyncResult<()> {
    let path_str = path.display().to_string();
    let mut workbook = Workbook::new();
    write_questions(workbook.add_worksheet(), form).context(WritingExcelSnafu {
        path: path_str.clone(),
    })?;
    workbook
        .save(path)
        .context(WritingExcelSnafu { path: path_str })?;
    Ok(())
}

/// Downloads a published form and exports its questions.
pub fn run_reverse(service: &dyn FormService, form_id: &str, path: &str) -> SyncResult<()> {
    let form = service.get_form(form_id)?;
    write_form_export(&form, Path::new(path))?;
    info!(
        "Exported {} questions of form {} ({:?}) to {}",
        form.fields.len(),
        form_id,
        form.title,
        path
    );
    Ok(())
}
