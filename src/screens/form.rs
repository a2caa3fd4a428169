//! Mutation form controller: the draft behind a create/edit dialog.

use validator::Validate;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// Editing the record with this identifier
    Edit(i64),
}

impl FormMode {
    pub fn is_edit(&self) -> bool {
        matches!(self, FormMode::Edit(_))
    }
}

/// Editable staging copy of an entity
pub trait Draft: Default + Clone + Validate + Send + Sync {
    type Entity;
    type Payload: Send + Sync;

    fn from_entity(entity: &Self::Entity) -> Self;

    /// Apply `value` to `field`. Fields fixed after creation are
    /// rejected in [`FormMode::Edit`].
    fn set_field(&mut self, field: &str, value: &str, mode: FormMode) -> AppResult<()>;

    fn payload(&self, mode: FormMode) -> Self::Payload;

    /// Label/value pairs in form order, for display
    fn fields(&self) -> Vec<(&'static str, String)>;
}

/// An open create/edit dialog
#[derive(Debug, Clone)]
pub struct FormController<D: Draft> {
    mode: FormMode,
    draft: D,
    error: Option<String>,
}

impl<D: Draft> FormController<D> {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            draft: D::default(),
            error: None,
        }
    }

    pub fn edit(id: i64, entity: &D::Entity) -> Self {
        Self {
            mode: FormMode::Edit(id),
            draft: D::from_entity(entity),
            error: None,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn set(&mut self, field: &str, value: &str) -> AppResult<()> {
        self.draft.set_field(field, value, self.mode)
    }

    /// Presence checks only; everything else is up to the backend
    pub fn validate(&self) -> AppResult<()> {
        self.draft.validate().map_err(AppError::from)
    }

    pub fn payload(&self) -> D::Payload {
        self.draft.payload(self.mode)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Keep the dialog open with `message` shown; the draft is untouched
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }
}

/// Reject unknown field names consistently
pub fn unknown_field(field: &str, known: &[&str]) -> AppError {
    AppError::Validation(format!(
        "Unknown field '{}' (expected one of: {})",
        field,
        known.join(", ")
    ))
}

/// Reject edits of a field that is fixed after creation
pub fn read_only(field: &str) -> AppError {
    AppError::Validation(format!("{} cannot be changed after creation", field))
}
