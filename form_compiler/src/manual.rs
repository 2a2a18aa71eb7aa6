/*!

This is the long-form manual for `form_compiler` and `formsync`.

## Survey files

A survey file is either an Excel workbook (`.xlsx`) or a directory of CSV
files. Each form of the survey is described by two tables:

* a question table, one row per question,
* a message table, with the localized texts of the form (button labels,
  error messages, etc.).

In a workbook, every worksheet is a question table, except:
* `<sheet>-messages`: the message table of the worksheet `<sheet>`,
* `forms`: an optional index that gives a title to each form.

In a directory, the same names are used with the `.csv` extension:
`baseline.csv`, `baseline-messages.csv`, `forms.csv`.

The first row of every table is a header and is ignored.

### Question tables

| ref   | type            | prompt                 | options          | description |
|-------|-----------------|------------------------|------------------|-------------|
| age   | number          | How old are you?       |                  |             |
| smoke | multiple_choice | Do you smoke?          | yes<br>no        | Be honest   |
| color | multiple_choice | Favorite color?        | A. red<br>B. blue|             |
| id    | hidden          | -                      |                  |             |
| bye   | thankyou_screen | Thank you!             |                  |             |

The `ref` and `prompt` columns are mandatory. Rows without them are skipped
with a warning, and fully blank rows are ignored.

#### `multiple_choice`

The options column must not be empty. Two styles are supported:

* one choice per line: every non-blank line becomes a choice, with the
  surrounding spaces removed.
* keyed answers: when every line looks like `A. text` or `1) text`, the
  respondent picks the key. The options are appended to the prompt and the
  choices are the keys (`A`, `B`, ...).

#### `thankyou_screen`

The prompt becomes the text of a thank-you screen. The other columns are
ignored.

#### `hidden`

Declares a hidden variable named after the `ref` column. The other columns
are ignored.

Any other type is passed as is to the form service (`short_text`,
`number`, `statement`, ...).

### Message tables

| key                 | value   |
|---------------------|---------|
| label.buttonHint.default | Press Enter |

Rows with an empty key or an empty value are skipped. Values are trimmed.

### Form index

| sheet    | title              |
|----------|--------------------|
| baseline | Baseline survey v2 |

Forms not listed in the index are titled after their sheet. The title is
how `formsync` finds a form again in the workspace, so it must be unique.

## Translations

A translation file has the same sheets as the base file, with translated
prompts, options and messages. The translated form is built from the
published base form: the questions, the choice identifiers and the logic
are kept, only the texts are replaced. Questions are matched by `ref` and
choices by position, so a translated question must have the same number of
choices as the base question.
*/
