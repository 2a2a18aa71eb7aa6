// An in-memory form service for the tests.

use std::cell::{Cell, RefCell};

use form_compiler::{Form, Messages};

use crate::sync::remote::*;
use crate::sync::*;

#[derive(Default)]
pub struct FakeService {
    pub forms: RefCell<Vec<Form>>,
    pub messages: RefCell<Vec<(String, Messages)>>,
    /// Every call, as `<operation> <argument>`.
    pub calls: RefCell<Vec<String>>,
    reported_total: Cell<Option<usize>>,
    messages_status: Cell<Option<u16>>,
}

impl FakeService {
    pub fn with_forms(forms: Vec<Form>) -> FakeService {
        let service = FakeService::default();
        for (idx, mut f) in forms.into_iter().enumerate() {
            if f.id.is_empty() {
                f.id = format!("existing{}", idx);
            }
            service.forms.borrow_mut().push(f);
        }
        service
    }

    /// Reports more forms than listed.
    pub fn report_total(&self, total: usize) {
        self.reported_total.set(Some(total));
    }

    pub fn fail_messages_with(&self, status: u16) {
        self.messages_status.set(Some(status));
    }

    pub fn form_titles(&self) -> Vec<String> {
        self.forms.borrow().iter().map(|f| f.title.clone()).collect()
    }

    pub fn form(&self, id: &str) -> Option<Form> {
        self.forms.borrow().iter().find(|f| f.id == id).cloned()
    }

    fn call(&self, s: String) {
        self.calls.borrow_mut().push(s);
    }

    fn not_found(id: &str) -> SyncError {
        SyncError::Api {
            error: ApiError {
                code: "FORM_NOT_FOUND".to_string(),
                description: format!("no form {}", id),
                details: vec![],
            },
        }
    }
}

impl FormService for FakeService {
    fn get_form(&self, id: &str) -> SyncResult<Form> {
        self.call(format!("get {}", id));
        self.form(id).ok_or_else(|| FakeService::not_found(id))
    }

    fn list_forms(&self, workspace: &str, page_size: usize) -> SyncResult<FormsResponse> {
        self.call(format!("list {}", workspace));
        let items: Vec<FormSummary> = self
            .forms
            .borrow()
            .iter()
            .take(page_size)
            .map(|f| FormSummary {
                id: f.id.clone(),
                title: f.title.clone(),
            })
            .collect();
        let total_items = self
            .reported_total
            .get()
            .unwrap_or_else(|| self.forms.borrow().len());
        Ok(FormsResponse { total_items, items })
    }

    fn create_form(&self, form: &Form) -> SyncResult<String> {
        self.call(format!("create {}", form.title));
        let id = format!("new{}", self.forms.borrow().len());
        let mut f = form.clone();
        f.id = id.clone();
        self.forms.borrow_mut().push(f);
        Ok(format!("https://api.typeform.com/forms/{}", id))
    }

    fn replace_form(&self, form: &Form) -> SyncResult<()> {
        self.call(format!("replace {}", form.id));
        let mut forms = self.forms.borrow_mut();
        match forms.iter_mut().find(|f| f.id == form.id) {
            Some(f) => {
                *f = form.clone();
                Ok(())
            }
            None => Err(FakeService::not_found(&form.id)),
        }
    }

    fn replace_messages(&self, form_id: &str, messages: &Messages) -> SyncResult<()> {
        self.call(format!("messages {}", form_id));
        let status = self.messages_status.get().unwrap_or(204);
        check_messages_response(form_id, "fake", status, "")?;
        self.messages
            .borrow_mut()
            .push((form_id.to_string(), messages.clone()));
        Ok(())
    }
}
