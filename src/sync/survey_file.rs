use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use form_compiler::cell;
use log::{debug, warn};

use crate::sync::{io_common::*, io_csv::read_csv_directory, io_xlsx::read_workbook, *};

/// Suffix of the sheets holding the messages of a form.
pub const MESSAGES_SUFFIX: &str = "-messages";
/// Name of the optional sheet giving a title to each form.
pub const INDEX_SHEET: &str = "forms";

/// The tables describing one form of a survey file.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SheetTables {
    pub sheet: String,
    pub title: String,
    pub questions: Table,
    /// Header included. Only a header when the survey has no messages for this form.
    pub messages: Table,
}

/// Reads the tables of a survey file: an `.xlsx` workbook or a directory of CSV files.
pub fn read_survey_file(path: &str) -> SyncResult<Vec<SheetTables>> {
    let p = Path::new(path);
    let tables = if p.is_dir() {
        read_csv_directory(p)?
    } else if p
        .extension()
        .map_or(false, |e| e.eq_ignore_ascii_case("xlsx"))
    {
        read_workbook(path)?
    } else {
        return UnsupportedSurveyFileSnafu { path }.fail();
    };
    Ok(assemble_sheets(tables))
}

/// Groups named tables into forms: question tables, their `-messages`
/// companions and the optional `forms` index.
pub fn assemble_sheets(tables: Vec<(String, Table)>) -> Vec<SheetTables> {
    let mut messages: HashMap<String, Table> = HashMap::new();
    let mut titles: HashMap<String, String> = HashMap::new();
    let mut questions: Vec<(String, Table)> = Vec::new();

    for (name, table) in tables {
        if let Some(sheet) = name.strip_suffix(MESSAGES_SUFFIX) {
            messages.insert(sheet.to_string(), table);
        } else if name == INDEX_SHEET {
            for row in table.iter().skip(1) {
                let sheet = cell(row, 0).trim();
                let title = cell(row, 1).trim();
                if sheet.is_empty() || title.is_empty() {
                    continue;
                }
                titles.insert(sheet.to_string(), title.to_string());
            }
        } else {
            questions.push((name, table));
        }
    }

    let mut res: Vec<SheetTables> = Vec::new();
    for (sheet, table) in questions {
        let msgs = messages.remove(&sheet).unwrap_or_else(|| {
            debug!("assemble_sheets: no messages for sheet {:?}", sheet);
            vec![vec!["key".to_string(), "value".to_string()]]
        });
        res.push(SheetTables {
            title: titles.remove(&sheet).unwrap_or_else(|| sheet.clone()),
            sheet,
            questions: table,
            messages: msgs,
        });
    }

    for sheet in messages.keys() {
        warn!("Messages found for unknown sheet {:?}", sheet);
    }
    for sheet in titles.keys() {
        warn!("Title found for unknown sheet {:?}", sheet);
    }
    res
}

/// Compiles every form of a survey file, by sheet.
pub fn initial_forms(workspace_href: &str, path: &str) -> SyncResult<BTreeMap<String, FormConf>> {
    let sheets = read_survey_file(path)?;
    let mut res: BTreeMap<String, FormConf> = BTreeMap::new();
    for s in sheets {
        let conf = FormConf::new(workspace_href, &s.title, &s.questions, s.messages);
        res.insert(s.sheet, conf);
    }
    Ok(res)
}
