//! Shared controller for the book and member screens:
//! fetch → filter → draft → mutate → refetch.

use async_trait::async_trait;
use std::sync::Arc;

use super::{
    confirm::Confirmation,
    filter::Filterable,
    form::{Draft, FormController, FormMode},
    list_view::ListView,
};
use crate::{
    api::LibraryBackend,
    error::{AppError, AppResult},
    models::Resource,
};

/// An entity with a full create/edit/delete screen
#[async_trait]
pub trait Managed: Resource + Filterable + Clone {
    type Draft: Draft<Entity = Self>;

    /// Singular noun used in messages ("book")
    const NOUN: &'static str;

    async fn fetch_all(backend: &dyn LibraryBackend) -> AppResult<Vec<Self>>;

    async fn fetch_one(backend: &dyn LibraryBackend, id: i64) -> AppResult<Self>;

    async fn create(
        backend: &dyn LibraryBackend,
        payload: &<Self::Draft as Draft>::Payload,
    ) -> AppResult<()>;

    async fn update(
        backend: &dyn LibraryBackend,
        id: i64,
        payload: &<Self::Draft as Draft>::Payload,
    ) -> AppResult<()>;

    async fn remove(backend: &dyn LibraryBackend, id: i64) -> AppResult<()>;
}

pub struct CrudScreen<E: Managed> {
    backend: Arc<dyn LibraryBackend>,
    list: ListView<E>,
    form: Option<FormController<E::Draft>>,
    deletion: Confirmation,
}

impl<E: Managed> CrudScreen<E> {
    pub fn new(backend: Arc<dyn LibraryBackend>) -> Self {
        Self {
            backend,
            list: ListView::new(),
            form: None,
            deletion: Confirmation::default(),
        }
    }

    pub fn list(&self) -> &ListView<E> {
        &self.list
    }

    pub fn form(&self) -> Option<&FormController<E::Draft>> {
        self.form.as_ref()
    }

    pub fn pending_delete(&self) -> Option<i64> {
        self.deletion.pending()
    }

    /// Reset all screen state and load the collection
    pub async fn mount(&mut self) {
        self.list.reset();
        self.form = None;
        self.deletion.cancel();
        self.refresh().await;
    }

    /// Replace the collection with a fresh fetch
    pub async fn refresh(&mut self) {
        let ticket = self.list.begin_fetch();
        let result = E::fetch_all(self.backend.as_ref()).await.map_err(|e| {
            tracing::warn!("Failed to load {}s: {}", E::NOUN, e);
            format!("Error loading {}s", E::NOUN)
        });
        self.list.finish_fetch(ticket, result);
    }

    pub fn search(&mut self, query: &str) {
        self.list.set_query(query);
    }

    pub fn filter(&mut self, status: E::Status) {
        self.list.set_status(status);
    }

    /// Single record straight from the backend
    pub async fn inspect(&self, id: i64) -> AppResult<E> {
        E::fetch_one(self.backend.as_ref(), id).await
    }

    pub fn open_create(&mut self) {
        self.form = Some(FormController::create());
    }

    /// Open the edit dialog on a copy of the listed record
    pub fn open_edit(&mut self, id: i64) -> AppResult<()> {
        let entity = self
            .list
            .items()
            .iter()
            .find(|e| e.id() == id)
            .ok_or_else(|| AppError::InvalidReference(format!("No {} with id {}", E::NOUN, id)))?;
        self.form = Some(FormController::edit(id, entity));
        Ok(())
    }

    pub fn set_field(&mut self, field: &str, value: &str) -> AppResult<()> {
        let form = self
            .form
            .as_mut()
            .ok_or_else(|| AppError::Validation("No form is open".to_string()))?;
        form.set(field, value)
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
    }

    /// Submit the open dialog. On success the dialog closes and the list is
    /// refetched; on failure the draft stays open with the error attached.
    pub async fn submit(&mut self) -> AppResult<()> {
        let form = self
            .form
            .as_mut()
            .ok_or_else(|| AppError::Validation("No form is open".to_string()))?;

        if let Err(err) = form.validate() {
            form.fail(err.display_message("Please fill in all required fields"));
            return Err(err);
        }

        let payload = form.payload();
        let mode = form.mode();
        let result = match mode {
            FormMode::Create => E::create(self.backend.as_ref(), &payload).await,
            FormMode::Edit(id) => E::update(self.backend.as_ref(), id, &payload).await,
        };

        match result {
            Ok(()) => {
                tracing::info!("Saved {} ({:?})", E::NOUN, mode);
                self.form = None;
                self.refresh().await;
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Failed to save {}: {}", E::NOUN, err);
                if let Some(form) = self.form.as_mut() {
                    form.fail(err.display_message(&format!("Error saving the {}", E::NOUN)));
                }
                Err(err)
            }
        }
    }

    pub fn request_delete(&mut self, id: i64) {
        self.deletion.request(id);
    }

    pub fn cancel_delete(&mut self) {
        self.deletion.cancel();
    }

    /// Delete the pending target, then refetch. The prompt closes either way.
    pub async fn confirm_delete(&mut self) -> AppResult<()> {
        let id = self
            .deletion
            .take()
            .ok_or_else(|| AppError::Validation("Nothing to delete".to_string()))?;

        match E::remove(self.backend.as_ref(), id).await {
            Ok(()) => {
                tracing::info!("Deleted {} {}", E::NOUN, id);
                self.refresh().await;
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Failed to delete {} {}: {}", E::NOUN, id, err);
                self.list
                    .set_error(err.display_message(&format!("Error deleting the {}", E::NOUN)));
                Err(err)
            }
        }
    }
}
