use std::path::Path;

/// The cells of a sheet, row by row.
pub type Table = Vec<Vec<String>>;

/// The name of a file without its directory and extension.
pub fn simplify_file_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// The last segment of a URL path, as in the `Location` of a created form.
pub fn last_path_segment(url: &str) -> &str {
    url.trim_end_matches('/').rsplit('/').next().unwrap_or("")
}

/// Formats a number read from a spreadsheet the way it is displayed.
pub fn number_to_cell(x: f64) -> String {
    if x.fract() == 0.0 && x.abs() < 1e15 {
        format!("{}", x as i64)
    } else {
        x.to_string()
    }
}
