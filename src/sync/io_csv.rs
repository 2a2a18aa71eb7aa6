// Primitives for reading CSV files.

use std::fs;
use std::path::Path;

use log::{debug, info};
use snafu::ResultExt;

use crate::sync::{io_common::*, *};

/// Reads a whole CSV file. Rows may have different lengths.
pub fn read_csv_table(path: &Path) -> SyncResult<Table> {
    let path_s = path.display().to_string();
    debug!("read_csv_table: {:?}", path_s);
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu {
            path: path_s.clone(),
        })?;

    let mut table: Table = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        let line = line_r.context(CsvLineParseSnafu {
            path: path_s.clone(),
            lineno: idx + 1,
        })?;
        table.push(line.iter().map(|s| s.to_string()).collect());
    }
    Ok(table)
}

/// Reads every `.csv` file of a directory, named after the file.
pub fn read_csv_directory(path: &Path) -> SyncResult<Vec<(String, Table)>> {
    let path_s = path.display().to_string();
    info!("Attempting to read CSV directory {:?}", path_s);
    let entries = fs::read_dir(path).context(ReadingDirectorySnafu {
        path: path_s.clone(),
    })?;

    let mut files: Vec<std::path::PathBuf> = Vec::new();
    for entry in entries {
        let p = entry
            .context(ReadingDirectorySnafu {
                path: path_s.clone(),
            })?
            .path();
        if p.is_file() && p.extension().map_or(false, |e| e.eq_ignore_ascii_case("csv")) {
            files.push(p);
        }
    }
    files.sort();

    let mut res: Vec<(String, Table)> = Vec::new();
    for p in files {
        res.push((simplify_file_name(&p), read_csv_table(&p)?));
    }
    Ok(res)
}
