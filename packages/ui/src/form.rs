//! # Modal form controller
//!
//! Every create/edit modal in the admin client works on a *draft*: a
//! client-local copy of an entity's editable fields. [`FormController`] owns
//! the draft for the lifetime of one open modal and enforces the same rules
//! for every form:
//!
//! - [`open`](FormController::open) always reseeds, from the entity being
//!   edited or from [`Default`], so nothing from a previous session survives.
//! - [`submit`](FormController::submit) checks required fields before anything
//!   reaches the network and hands back the cleaned output.
//! - A failed save keeps the modal open with the draft untouched.
//!
//! Per-entity drafts implement [`Draft`]; see [`crate::drafts`].

use thiserror::Error;

/// Why a submit was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("{0}")]
    Invalid(String),

    #[error("A save is already in progress")]
    Busy,
}

/// Editable copy of an entity.
pub trait Draft: Clone + Default + PartialEq {
    /// The record an edit session starts from.
    type Entity;
    /// What the save callback receives.
    type Output;

    fn from_entity(entity: &Self::Entity) -> Self;

    /// Labels of required fields that are still blank.
    fn missing_fields(&self) -> Vec<&'static str>;

    /// Checks beyond required fields.
    fn check(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Build the save payload. Only called on a validated draft.
    fn to_output(&self) -> Self::Output;
}

/// Collect the labels whose value is blank after trimming.
pub fn missing<'a>(fields: impl IntoIterator<Item = (&'static str, &'a str)>) -> Vec<&'static str> {
    fields
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| label)
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormController<D: Draft> {
    draft: D,
    open: bool,
    submitting: bool,
    error: Option<String>,
}

impl<D: Draft> Default for FormController<D> {
    fn default() -> Self {
        Self {
            draft: D::default(),
            open: false,
            submitting: false,
            error: None,
        }
    }
}

impl<D: Draft> FormController<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the form, seeded from `existing` or reset to defaults.
    pub fn open(&mut self, existing: Option<&D::Entity>) {
        self.draft = existing.map(D::from_entity).unwrap_or_default();
        self.open = true;
        self.submitting = false;
        self.error = None;
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut D {
        &mut self.draft
    }

    /// Validate and mark the form as submitting.
    ///
    /// On `Err` nothing changes except the inline error, and the caller must
    /// not issue a backend call.
    pub fn submit(&mut self) -> Result<D::Output, ValidationError> {
        if self.submitting {
            return Err(ValidationError::Busy);
        }
        let result = self.validate();
        match &result {
            Ok(_) => {
                self.submitting = true;
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
        result
    }

    fn validate(&self) -> Result<D::Output, ValidationError> {
        let missing = self.draft.missing_fields();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }
        self.draft.check()?;
        Ok(self.draft.to_output())
    }

    pub fn save_succeeded(&mut self) {
        self.close();
    }

    /// The save callback failed: stay open so the user can retry.
    pub fn save_failed(&mut self, message: impl Into<String>) {
        self.submitting = false;
        self.error = Some(message.into());
    }
}

/// An ordered list of text entries edited row by row, e.g. job requirements.
///
/// Always shows at least one row.
#[derive(Clone, Debug, PartialEq)]
pub struct RepeatableField {
    entries: Vec<String>,
}

impl Default for RepeatableField {
    fn default() -> Self {
        Self {
            entries: vec![String::new()],
        }
    }
}

impl RepeatableField {
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries: Vec<String> = values.into_iter().map(Into::into).collect();
        if entries.is_empty() {
            return Self::default();
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push_blank(&mut self) {
        self.entries.push(String::new());
    }

    pub fn set(&mut self, index: usize, value: impl Into<String>) {
        if let Some(entry) = self.entries.get_mut(index) {
            *entry = value.into();
        }
    }

    /// Whether the row at `index` may be removed.
    pub fn can_remove(&self) -> bool {
        self.entries.len() > 1
    }

    pub fn remove(&mut self, index: usize) {
        if self.can_remove() && index < self.entries.len() {
            self.entries.remove(index);
        }
    }

    /// Non-blank entries, trimmed, in order.
    pub fn compacted(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| e.trim())
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct ServiceDraft {
        title: String,
        tags: RepeatableField,
    }

    struct Service {
        title: String,
        tags: Vec<String>,
    }

    impl Draft for ServiceDraft {
        type Entity = Service;
        type Output = (String, Vec<String>);

        fn from_entity(service: &Service) -> Self {
            Self {
                title: service.title.clone(),
                tags: RepeatableField::from_values(service.tags.iter().cloned()),
            }
        }

        fn missing_fields(&self) -> Vec<&'static str> {
            missing([("Title", self.title.as_str())])
        }

        fn to_output(&self) -> Self::Output {
            (self.title.trim().to_string(), self.tags.compacted())
        }
    }

    fn service(title: &str) -> Service {
        Service {
            title: title.to_string(),
            tags: vec!["a".to_string()],
        }
    }

    #[test]
    fn test_open_seeds_from_entity_then_resets() {
        let mut form = FormController::<ServiceDraft>::new();
        form.open(Some(&service("First")));
        assert!(form.is_open());
        assert_eq!(form.draft().title, "First");

        form.open(None);
        assert_eq!(*form.draft(), ServiceDraft::default());
    }

    #[test]
    fn test_reopen_with_other_entity_drops_edits() {
        let mut form = FormController::<ServiceDraft>::new();
        form.open(Some(&service("First")));
        form.draft_mut().title = "edited".into();
        form.open(Some(&service("Second")));
        assert_eq!(form.draft().title, "Second");
    }

    #[test]
    fn test_blank_required_field_refuses_submit() {
        let mut form = FormController::<ServiceDraft>::new();
        form.open(None);
        form.draft_mut().title = "   ".into();
        assert_eq!(
            form.submit(),
            Err(ValidationError::MissingFields(vec!["Title"]))
        );
        assert!(!form.is_submitting());
        assert_eq!(form.error(), Some("Please fill in: Title"));
    }

    #[test]
    fn test_submit_twice_is_busy() {
        let mut form = FormController::<ServiceDraft>::new();
        form.open(Some(&service("Ok")));
        assert!(form.submit().is_ok());
        assert!(form.is_submitting());
        assert_eq!(form.submit(), Err(ValidationError::Busy));
    }

    #[test]
    fn test_failed_save_keeps_draft_and_stays_open() {
        let mut form = FormController::<ServiceDraft>::new();
        form.open(Some(&service("Keep me")));
        form.submit().unwrap();
        form.save_failed("Server exploded");

        assert!(form.is_open());
        assert!(!form.is_submitting());
        assert_eq!(form.draft().title, "Keep me");
        assert_eq!(form.error(), Some("Server exploded"));
        assert!(form.submit().is_ok(), "retry is allowed");
    }

    #[test]
    fn test_successful_save_closes_and_resets() {
        let mut form = FormController::<ServiceDraft>::new();
        form.open(Some(&service("Done")));
        form.submit().unwrap();
        form.save_succeeded();
        assert!(!form.is_open());
        assert_eq!(*form.draft(), ServiceDraft::default());
    }

    #[test]
    fn test_repeatable_field_keeps_one_row() {
        let mut field = RepeatableField::from_values(Vec::<String>::new());
        assert_eq!(field.entries(), [""]);
        field.remove(0);
        assert_eq!(field.len(), 1);

        field.set(0, "one");
        field.push_blank();
        field.set(1, "two");
        field.remove(0);
        assert_eq!(field.entries(), ["two"]);
        field.remove(5);
        assert_eq!(field.len(), 1);
    }

    #[test]
    fn test_compacted_drops_blanks() {
        let field = RepeatableField::from_values(["", " React ", "", "Rust"]);
        assert_eq!(field.compacted(), vec!["React", "Rust"]);
    }
}
