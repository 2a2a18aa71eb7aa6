// ********* Form document structures ***********

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// The field type that triggers the choice heuristics.
pub const MULTIPLE_CHOICE: &str = "multiple_choice";
/// Rows of this type become thank-you screens instead of questions.
pub const THANKYOU_SCREEN: &str = "thankyou_screen";
/// Rows of this type only declare a hidden variable.
pub const HIDDEN: &str = "hidden";

/// One selectable option of a multiple choice question.
///
/// The `id` and `ref` are assigned by the remote service. They are empty
/// for freshly compiled choices and only get filled when copied forward
/// from a published form.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub label: String,
    #[serde(rename = "ref", default, skip_serializing_if = "String::is_empty")]
    pub reference: String,
}

impl Choice {
    pub fn with_label(label: &str) -> Choice {
        Choice {
            id: String::new(),
            label: label.to_string(),
            reference: String::new(),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionProperties {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// An answerable item of a form.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "type")]
    pub field_type: String,
    pub title: String,
    #[serde(rename = "ref", default)]
    pub reference: String,
    #[serde(default)]
    pub properties: QuestionProperties,
}

impl Question {
    pub fn choices(&self) -> &[Choice] {
        &self.properties.choices
    }

    pub fn description(&self) -> &str {
        &self.properties.description
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ThankYouScreen {
    #[serde(rename = "ref", default)]
    pub reference: String,
    pub title: String,
}

/// A variable passed to the form at answer time. Only its name is known.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HiddenVariable(pub String);

/// The result of compiling a single row.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Field {
    Question(Question),
    ThankYouScreen(ThankYouScreen),
    Hidden(HiddenVariable),
}

/// Branching logic of a form.
///
/// The payload is kept as the raw JSON text returned by the service so that
/// it is sent back byte for byte. It is never interpreted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Logic(Box<RawValue>);

impl Logic {
    pub fn from_json(raw: &str) -> Result<Logic, serde_json::Error> {
        RawValue::from_string(raw.to_string()).map(Logic)
    }

    pub fn as_str(&self) -> &str {
        self.0.get()
    }
}

impl PartialEq for Logic {
    fn eq(&self, other: &Logic) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Logic {}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub href: String,
}

impl Workspace {
    /// The workspace id is the last segment of the href.
    pub fn id(&self) -> &str {
        self.href.rsplit('/').next().unwrap_or("")
    }
}

/// A complete form document, in the shape expected by the remote service.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Form {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub workspace: Workspace,
    pub title: String,
    #[serde(default)]
    pub fields: Vec<Question>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub thankyou_screens: Vec<ThankYouScreen>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic: Option<Logic>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hidden: Vec<HiddenVariable>,
}

/// Localized messages of a form, by dotted key.
pub type Messages = BTreeMap<String, String>;

// ********* Errors ***********

/// Reasons for rejecting a single row, or for failing to merge a translation.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum CompileError {
    /// The row does not have the reference, type and prompt columns.
    ColumnCount(Vec<String>),
    /// The reference or the prompt is empty.
    EmptyColumns(Vec<String>),
    /// A multiple choice question without any option.
    MissingOptions(Vec<String>),
    /// The source form has a question that the translation does not have.
    MissingTranslation { reference: String },
    ChoiceCountMismatch {
        reference: String,
        expected: usize,
        found: usize,
    },
}

impl Error for CompileError {}

impl Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::ColumnCount(row) => write!(
                f,
                "This row doesn't have the right number of columns: {:?}",
                row
            ),
            CompileError::EmptyColumns(row) => write!(
                f,
                "This row has empty columns and will be skipped: {:?}",
                row
            ),
            CompileError::MissingOptions(row) => write!(
                f,
                "multiple_choice question without options, skipping row: {:?}",
                row
            ),
            CompileError::MissingTranslation { reference } => {
                write!(f, "No translation found for field {}", reference)
            }
            CompileError::ChoiceCountMismatch {
                reference,
                expected,
                found,
            } => write!(
                f,
                "Field {} has {} choices but its translation has {}",
                reference, expected, found
            ),
        }
    }
}
