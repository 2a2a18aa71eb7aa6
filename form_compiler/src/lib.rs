pub mod builder;
mod config;
pub mod labels;
pub mod manual;
mod translate;
use log::{debug, warn};

pub use crate::config::*;
pub use crate::translate::{copy_choice_refs, translate_form};

use crate::builder::FormBuilder;
use crate::labels::extract_labels;

// **** Rows ****

/// Returns the cell at the given column, or an empty string for short rows.
pub fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(|s| s.as_str()).unwrap_or("")
}

/// Splits a block of text into its trimmed, non-empty lines.
pub fn extract_paragraphs(text: &str) -> Vec<String> {
    text.lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(|l| l.to_string())
        .collect()
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|c| c.trim().is_empty())
}

// **** Fields ****

/// Compiles one row of a question table.
///
/// The columns are, in order: reference, type, prompt, options and
/// description. The last two are optional.
pub fn build_field(row: &[String]) -> Result<Field, CompileError> {
    if row.len() < 3 {
        return Err(CompileError::ColumnCount(row.to_vec()));
    }

    let reference = cell(row, 0);
    let question_type = cell(row, 1);
    let prompt = cell(row, 2);

    if prompt.is_empty() || reference.is_empty() {
        return Err(CompileError::EmptyColumns(row.to_vec()));
    }

    let options = cell(row, 3);
    let description = cell(row, 4);

    let mut title = prompt.to_string();
    let mut choices: Vec<Choice> = Vec::new();

    if question_type == MULTIPLE_CHOICE {
        if options.is_empty() {
            return Err(CompileError::MissingOptions(row.to_vec()));
        }

        let answers = extract_labels(options);
        if answers.is_empty() {
            choices = extract_paragraphs(options)
                .iter()
                .map(|label| Choice::with_label(label))
                .collect();
        } else {
            // The keyed options stay visible next to the prompt, the
            // respondent only picks the key.
            title = format!("{}\n\n{}", prompt.trim(), options.trim());
            choices = answers
                .iter()
                .map(|a| Choice::with_label(&a.response))
                .collect();
        }
        if choices.is_empty() {
            return Err(CompileError::MissingOptions(row.to_vec()));
        }
    }

    let field = match question_type {
        THANKYOU_SCREEN => Field::ThankYouScreen(ThankYouScreen {
            reference: reference.to_string(),
            title,
        }),
        HIDDEN => Field::Hidden(HiddenVariable(reference.to_string())),
        _ => Field::Question(Question {
            field_type: question_type.to_string(),
            title,
            reference: reference.to_string(),
            properties: QuestionProperties {
                choices,
                description: description.to_string(),
            },
        }),
    };
    debug!("build_field: {:?} -> {:?}", reference, field);
    Ok(field)
}

// **** Forms ****

/// A row that could not be compiled.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RowRejection {
    /// Position of the row in the input, header excluded.
    pub row_index: usize,
    pub error: CompileError,
}

/// Assembles a form from the data rows of a question table.
///
/// Rows that fail to compile are logged and skipped.
pub fn build_form(title: &str, rows: &[Vec<String>]) -> Form {
    build_form_with_report(title, rows).0
}

/// Same as [build_form], also returning the rejected rows.
///
/// Fully blank rows are spacing in the source table: they are dropped
/// without being reported.
pub fn build_form_with_report(title: &str, rows: &[Vec<String>]) -> (Form, Vec<RowRejection>) {
    let mut builder = FormBuilder::new(title);
    let mut rejected: Vec<RowRejection> = Vec::new();
    for (row_index, row) in rows.iter().enumerate() {
        if is_blank(row) {
            continue;
        }
        if let Err(error) = builder.add_row(row) {
            warn!("{}: row {}: {}", title, row_index + 1, error);
            rejected.push(RowRejection { row_index, error });
        }
    }
    (builder.build(), rejected)
}

// **** Messages ****

/// Compiles the data rows of a message table.
pub fn compile_messages(rows: &[Vec<String>]) -> Messages {
    let mut messages = Messages::new();
    for row in rows {
        let key = cell(row, 0);
        let value = cell(row, 1);
        if key.is_empty() || value.is_empty() {
            debug!("compile_messages: skipping row: {:?}", row);
            continue;
        }
        messages.insert(key.to_string(), value.trim().to_string());
    }
    messages
}

/// Compiles a complete message table. The first row is the header.
pub fn compile_message_table(table: &[Vec<String>]) -> Messages {
    compile_messages(table.get(1..).unwrap_or(&[]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn question(cells: &[&str]) -> Question {
        match build_field(&row(cells)) {
            Ok(Field::Question(q)) => q,
            x => panic!("expected a question, got {:?}", x),
        }
    }

    fn labels(q: &Question) -> Vec<Choice> {
        q.choices().to_vec()
    }

    fn plain(l: &[&str]) -> Vec<Choice> {
        l.iter().map(|s| Choice::with_label(s)).collect()
    }

    #[test]
    fn cell_is_bounds_safe() {
        let r = row(&["a", "b"]);
        assert_eq!(cell(&r, 1), "b");
        assert_eq!(cell(&r, 2), "");
        assert_eq!(cell(&[], 0), "");
    }

    #[test]
    fn paragraphs_are_trimmed_and_non_empty() {
        assert_eq!(extract_paragraphs("\n a \n\n  \nb c\n"), vec!["a", "b c"]);
        assert!(extract_paragraphs("   ").is_empty());
    }

    #[test]
    fn gets_ref_and_description() {
        let q = question(&["ref", "multiple_choice", "foo", "yes\nno", "description"]);
        assert_eq!(q.reference, "ref");
        assert_eq!(q.description(), "description");
    }

    #[test]
    fn short_rows_are_rejected() {
        for cells in [vec![], vec!["ref"], vec!["ref", "short_text"]] {
            let err = build_field(&row(&cells)).unwrap_err();
            assert!(matches!(err, CompileError::ColumnCount(_)));
        }
    }

    #[test]
    fn empty_ref_or_prompt_is_rejected() {
        for cells in [["", "short_text", "foo"], ["ref", "short_text", ""]] {
            let err = build_field(&row(&cells)).unwrap_err();
            assert!(matches!(err, CompileError::EmptyColumns(_)));
        }
    }

    #[test]
    fn multiple_choice_needs_options() {
        let err = build_field(&row(&["ref", "multiple_choice", "foo", "", "description"]));
        assert!(matches!(err, Err(CompileError::MissingOptions(_))));
        let err = build_field(&row(&["ref", "multiple_choice", "foo"]));
        assert!(matches!(err, Err(CompileError::MissingOptions(_))));
    }

    #[test]
    fn blank_options_are_missing_options() {
        for options in ["   ", "\n\n", " \n \t"] {
            let err = build_field(&row(&["ref", "multiple_choice", "foo", options]));
            assert!(
                matches!(err, Err(CompileError::MissingOptions(_))),
                "{:?}",
                options
            );
        }
    }

    #[test]
    fn open_question_title() {
        let q = question(&["ref", "short_text", "foo", "", ""]);
        assert_eq!(q.title, "foo");
        assert_eq!(q.field_type, "short_text");
        assert!(q.choices().is_empty());
    }

    #[test]
    fn thankyou_screen() {
        let f = build_field(&row(&["ref", "thankyou_screen", "foo", "A. yes\nB. no", "desc"]));
        assert_eq!(
            f,
            Ok(Field::ThankYouScreen(ThankYouScreen {
                reference: "ref".to_string(),
                title: "foo".to_string()
            }))
        );
    }

    #[test]
    fn hidden_variable() {
        let f = build_field(&row(&["ref", "hidden", "foo", "bar", "baz"]));
        assert_eq!(f, Ok(Field::Hidden(HiddenVariable("ref".to_string()))));
    }

    #[test]
    fn multiple_choice_title() {
        let q = question(&["ref", "multiple_choice", "foo", "A. yes\nB. no", ""]);
        assert_eq!(q.title, "foo\n\nA. yes\nB. no");

        let q = question(&["ref", "multiple_choice", "foo\n", "A. yes\nB. no", ""]);
        assert_eq!(q.title, "foo\n\nA. yes\nB. no");

        let q = question(&["ref", "multiple_choice", "foo", "yes\nno", ""]);
        assert_eq!(q.title, "foo");
    }

    #[test]
    fn multiple_choice_with_labels() {
        let q = question(&["ref", "multiple_choice", "foo", "A. yes\nB. no", ""]);
        assert_eq!(labels(&q), plain(&["A", "B"]));

        let q = question(&["ref", "multiple_choice", "foo", "A. yes\nC. no", ""]);
        assert_eq!(labels(&q), plain(&["A", "C"]));
    }

    #[test]
    fn multiple_choice_without_labels() {
        let q = question(&["ref", "multiple_choice", "foo", "yes\nno", ""]);
        assert_eq!(labels(&q), plain(&["yes", "no"]));

        let q = question(&["ref", "multiple_choice", "foo", "\nyes\nno", ""]);
        assert_eq!(labels(&q), plain(&["yes", "no"]));
    }

    #[test]
    fn word_prefixed_options_are_plain_choices() {
        let q = question(&["ref", "multiple_choice", "foo", "Yes. I agree\nNo. I do not"]);
        assert_eq!(q.title, "foo");
        assert_eq!(labels(&q), plain(&["Yes. I agree", "No. I do not"]));
    }

    #[test]
    fn trims_choices_without_labels() {
        for options in ["  yes\n  no", "yes  \nno  ", "  yes  \n  no  ", "yes\n   \nno"] {
            let q = question(&["ref", "multiple_choice", "foo", options, ""]);
            assert_eq!(labels(&q), plain(&["yes", "no"]), "options: {:?}", options);
        }

        let q = question(&[
            "ref",
            "multiple_choice",
            "foo",
            "  hello world  \n  foo bar  ",
            "",
        ]);
        assert_eq!(labels(&q), plain(&["hello world", "foo bar"]));
    }

    #[test]
    fn compiling_twice_gives_the_same_field() {
        let r = row(&["ref", "multiple_choice", "foo", "A. yes\nB. no", "d"]);
        assert_eq!(build_field(&r), build_field(&r));
    }

    #[test]
    fn form_ignores_blank_lines() {
        let records = vec![
            row(&["", "", "", ""]),
            row(&["", "", "", ""]),
            row(&["ref", "foo", "A. yes\nC. no", ""]),
        ];
        let (form, rejected) = build_form_with_report("foo", &records);
        assert_eq!(form.fields.len(), 1);
        assert!(rejected.is_empty());
    }

    #[test]
    fn form_partitions_fields() {
        let records = vec![
            row(&["q1", "short_text", "Name?"]),
            row(&["id", "hidden", "-"]),
            row(&["bad", "multiple_choice", "Pick", ""]),
            row(&["q2", "multiple_choice", "Pick", "red\nblue"]),
            row(&["end", "thankyou_screen", "Bye"]),
            row(&["source", "hidden", "-"]),
        ];
        let (form, rejected) = build_form_with_report("Survey", &records);
        assert_eq!(form.title, "Survey");
        assert_eq!(form.id, "");
        let refs: Vec<&str> = form.fields.iter().map(|q| q.reference.as_str()).collect();
        assert_eq!(refs, vec!["q1", "q2"]);
        assert_eq!(
            form.hidden,
            vec![
                HiddenVariable("id".to_string()),
                HiddenVariable("source".to_string())
            ]
        );
        assert_eq!(form.thankyou_screens.len(), 1);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].row_index, 2);
        assert_eq!(build_form("Survey", &records), form);
    }

    #[test]
    fn form_serializes_to_the_service_shape() {
        let records = vec![
            row(&["q", "multiple_choice", "Pick", "red\nblue", "help"]),
            row(&["id", "hidden", "-"]),
        ];
        let form = build_form("Survey", &records);
        let js = serde_json::to_value(&form).unwrap();
        assert_eq!(
            js,
            serde_json::json!({
                "workspace": {},
                "title": "Survey",
                "fields": [{
                    "type": "multiple_choice",
                    "title": "Pick",
                    "ref": "q",
                    "properties": {
                        "choices": [{"label": "red"}, {"label": "blue"}],
                        "description": "help"
                    }
                }],
                "hidden": ["id"]
            })
        );
    }

    #[test]
    fn messages_skip_empty() {
        let table = vec![
            row(&["variable", "message"]),
            row(&["", ""]),
            row(&["foo.bar", "baz"]),
        ];
        let m = compile_message_table(&table);
        assert_eq!(m.len(), 1);
        assert_eq!(m["foo.bar"], "baz");

        // Header already removed by the caller.
        let m = compile_messages(&table[1..]);
        assert_eq!(m.len(), 1);
        assert_eq!(m["foo.bar"], "baz");
    }

    #[test]
    fn messages_trim_and_last_write_wins() {
        let rows = vec![
            row(&["a", " first "]),
            row(&["b"]),
            row(&["a", "  second\n"]),
            row(&["c", "x"]),
        ];
        let m = compile_messages(&rows);
        assert_eq!(m.len(), 2);
        assert_eq!(m["a"], "second");
        assert!(compile_message_table(&[]).is_empty());
    }
}
