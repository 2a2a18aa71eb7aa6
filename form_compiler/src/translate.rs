use std::collections::HashMap;

use log::{debug, warn};

use crate::config::*;

/// Copies the choice identifiers of a published form onto a freshly compiled
/// one, so that the branching logic of the published form stays valid.
///
/// Questions are matched by reference and choices by trimmed label. A
/// published choice is handed out at most once. Choices without a match keep
/// empty identifiers and will get new ones from the service.
pub fn copy_choice_refs(published: &Form, local: &Form) -> Vec<Question> {
    let published_by_ref: HashMap<&str, &Question> = published
        .fields
        .iter()
        .map(|q| (q.reference.as_str(), q))
        .collect();

    local
        .fields
        .iter()
        .map(|q| match published_by_ref.get(q.reference.as_str()) {
            Some(old) => copy_question_choice_refs(old, q),
            None => {
                debug!("copy_choice_refs: new question {:?}", q.reference);
                q.clone()
            }
        })
        .collect()
}

fn copy_question_choice_refs(published: &Question, local: &Question) -> Question {
    let mut used = vec![false; published.choices().len()];
    let mut res = local.clone();
    for choice in res.properties.choices.iter_mut() {
        let found = published
            .choices()
            .iter()
            .enumerate()
            .find(|(idx, old)| !used[*idx] && old.label.trim() == choice.label.trim());
        match found {
            Some((idx, old)) => {
                used[idx] = true;
                choice.id = old.id.clone();
                choice.reference = old.reference.clone();
            }
            None => {
                debug!(
                    "copy_choice_refs: question {:?}: no published choice for label {:?}",
                    local.reference, choice.label
                );
            }
        }
    }
    res
}

/// Applies the text of a translated form onto the structure of a published
/// source form.
///
/// The result keeps the field order, types, references, choice identifiers,
/// hidden variables and logic of the source. Titles, descriptions and choice
/// labels come from the translation, matching questions by reference and
/// choices by position. The result carries the title and workspace of the
/// translation and no id, ready to be created as a new form.
pub fn translate_form(source: &Form, translation: &Form) -> Result<Form, CompileError> {
    let translated_by_ref: HashMap<&str, &Question> = translation
        .fields
        .iter()
        .map(|q| (q.reference.as_str(), q))
        .collect();

    let mut fields: Vec<Question> = Vec::new();
    for q in source.fields.iter() {
        let tq = translated_by_ref
            .get(q.reference.as_str())
            .ok_or_else(|| CompileError::MissingTranslation {
                reference: q.reference.clone(),
            })?;
        if tq.choices().len() != q.choices().len() {
            return Err(CompileError::ChoiceCountMismatch {
                reference: q.reference.clone(),
                expected: q.choices().len(),
                found: tq.choices().len(),
            });
        }

        let mut res = q.clone();
        res.title = tq.title.clone();
        res.properties.description = tq.description().to_string();
        for (choice, translated) in res.properties.choices.iter_mut().zip(tq.choices()) {
            choice.label = translated.label.clone();
        }
        fields.push(res);
    }

    let thankyou_screens: Vec<ThankYouScreen> = source
        .thankyou_screens
        .iter()
        .map(|ty| {
            match translation
                .thankyou_screens
                .iter()
                .find(|t| t.reference == ty.reference)
            {
                Some(t) => ThankYouScreen {
                    reference: ty.reference.clone(),
                    title: t.title.clone(),
                },
                None => {
                    warn!(
                        "translate_form: thank-you screen {:?} is not translated",
                        ty.reference
                    );
                    ty.clone()
                }
            }
        })
        .collect();

    Ok(Form {
        id: String::new(),
        workspace: translation.workspace.clone(),
        title: translation.title.clone(),
        fields,
        thankyou_screens,
        logic: source.logic.clone(),
        hidden: source.hidden.clone(),
    })
}
