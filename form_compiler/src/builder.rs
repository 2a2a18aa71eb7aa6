pub use crate::config::*;

/// A builder for assembling a form one row at a time.
///
/// Rows that fail to compile are returned to the caller as errors and leave
/// the builder untouched, so a bad row never spoils the rest of the form.
///
/// ```
/// use form_compiler::builder::FormBuilder;
/// # use form_compiler::CompileError;
///
/// let mut builder = FormBuilder::new("Baseline")
///     .workspace("https://api.typeform.com/workspaces/abc");
///
/// builder.add_row(&["age".to_string(), "number".to_string(), "How old are you?".to_string()])?;
/// builder.add_row(&["id".to_string(), "hidden".to_string(), "-".to_string()])?;
///
/// let form = builder.build();
/// assert_eq!(form.fields.len(), 1);
/// assert_eq!(form.hidden.len(), 1);
/// # Ok::<(), CompileError>(())
/// ```
pub struct FormBuilder {
    pub(crate) _title: String,
    pub(crate) _workspace: Workspace,
    pub(crate) _fields: Vec<Question>,
    pub(crate) _thankyou_screens: Vec<ThankYouScreen>,
    pub(crate) _hidden: Vec<HiddenVariable>,
}

impl FormBuilder {
    pub fn new(title: &str) -> FormBuilder {
        FormBuilder {
            _title: title.to_string(),
            _workspace: Workspace::default(),
            _fields: Vec::new(),
            _thankyou_screens: Vec::new(),
            _hidden: Vec::new(),
        }
    }

    pub fn workspace(self, href: &str) -> FormBuilder {
        FormBuilder {
            _workspace: Workspace {
                href: href.to_string(),
            },
            ..self
        }
    }

    /// Compiles a row and adds the result to the form.
    pub fn add_row(&mut self, row: &[String]) -> Result<(), CompileError> {
        let field = crate::build_field(row)?;
        self.add_field(field);
        Ok(())
    }

    pub fn add_field(&mut self, field: Field) {
        match field {
            Field::Question(q) => self._fields.push(q),
            Field::ThankYouScreen(ty) => self._thankyou_screens.push(ty),
            Field::Hidden(h) => self._hidden.push(h),
        }
    }

    pub fn build(self) -> Form {
        Form {
            id: String::new(),
            workspace: self._workspace,
            title: self._title,
            fields: self._fields,
            thankyou_screens: self._thankyou_screens,
            logic: None,
            hidden: self._hidden,
        }
    }
}
