use calamine::{open_workbook, DataType, Reader, Xlsx};
use log::{debug, info};
use snafu::{OptionExt, ResultExt};

use crate::sync::{io_common::*, *};

/// Reads every worksheet of an Excel workbook, in workbook order.
pub fn read_workbook(path: &str) -> SyncResult<Vec<(String, Table)>> {
    info!("Attempting to read workbook {:?}", path);
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    let names: Vec<String> = workbook.sheet_names().to_vec();
    let mut res: Vec<(String, Table)> = Vec::new();
    for name in names {
        let wrange = workbook
            .worksheet_range(&name)
            .context(MissingWorksheetSnafu {
                name: name.clone(),
                path,
            })?
            .context(OpeningExcelSnafu { path })?;
        debug!(
            "read_workbook: worksheet {:?}: {:?} rows",
            name,
            wrange.height()
        );
        let table: Table = wrange
            .rows()
            .map(|row| row.iter().map(read_cell).collect())
            .collect();
        res.push((name, table));
    }
    Ok(res)
}

fn read_cell(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Float(f) => number_to_cell(*f),
        DataType::Int(i) => i.to_string(),
        DataType::Bool(b) => b.to_string(),
        DataType::Empty => String::new(),
        x => {
            debug!("read_cell: unexpected cell {:?}", x);
            x.to_string()
        }
    }
}
