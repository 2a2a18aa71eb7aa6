use clap::Parser;

/// This program compiles survey spreadsheets into Typeform forms and keeps them in sync.
///
/// The connection to Typeform is configured with the environment variables
/// TYPEFORM_BASE_URL and TYPEFORM_TOKEN.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (string) The id of the Typeform workspace that contains the forms. Required unless --reverse is passed.
    #[clap(short, long, value_parser, default_value = "")]
    pub workspace: String,

    /// (file path) The survey file with the base forms: an Excel workbook or a directory of CSV files.
    #[clap(short, long, value_parser)]
    pub base: Option<String>,

    /// (file path, optional) A survey file with the translation of the base forms. If provided,
    /// the translated forms are built from the published base forms instead of the base file.
    #[clap(short, long, value_parser)]
    pub translation: Option<String>,

    /// If passed as an argument, existing forms are updated instead of created.
    #[clap(short, long, takes_value = false)]
    pub update: bool,

    /// (string, optional) Only process the form described by this sheet.
    #[clap(short, long, value_parser)]
    pub sheet: Option<String>,

    /// If passed as an argument, downloads the form given by --form-id into the Excel file given by --path.
    #[clap(long, takes_value = false)]
    pub reverse: bool,

    /// (string) The id of the form to download with --reverse.
    #[clap(long, value_parser)]
    pub form_id: Option<String>,

    /// (file path) The Excel file written by --reverse.
    #[clap(short, long, value_parser)]
    pub path: Option<String>,

    /// Reads the forms directly from a file. Not implemented yet.
    #[clap(long, takes_value = false)]
    pub direct: bool,

    /// If passed as an argument, nothing is written to Typeform. The forms that would be sent are
    /// printed instead, as a diff against the published version when updating.
    #[clap(long, takes_value = false)]
    pub dry_run: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
