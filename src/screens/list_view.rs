//! List-view controller: fetched collection, search/status state and the
//! error banner of one screen.

use super::filter::{filter_view, status_counts, Filterable, Needle};

/// Loading lifecycle of a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    /// Ready, but the last fetch failed and the collection is empty
    Failed,
}

/// Identifies one fetch so that an older response cannot overwrite a newer one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug)]
pub struct ListView<T: Filterable> {
    items: Vec<T>,
    needle: Needle,
    status: T::Status,
    state: LoadState,
    error: Option<String>,
    generation: u64,
}

impl<T: Filterable> Default for ListView<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            needle: Needle::default(),
            status: T::Status::default(),
            state: LoadState::Loading,
            error: None,
            generation: 0,
        }
    }
}

impl<T: Filterable> ListView<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the freshly mounted state, invalidating in-flight fetches
    pub fn reset(&mut self) {
        let generation = self.generation + 1;
        *self = Self {
            generation,
            ..Self::default()
        };
    }

    /// Start a fetch. Only the most recent ticket is honoured.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.state = LoadState::Loading;
        FetchTicket(self.generation)
    }

    /// Apply a fetch result; `Err` carries the banner text.
    ///
    /// Returns `false` when the ticket is stale and the result was dropped.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<T>, String>) -> bool {
        if ticket.0 != self.generation {
            tracing::debug!(
                "Dropping stale fetch result (ticket {}, current {})",
                ticket.0,
                self.generation
            );
            return false;
        }

        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
                self.state = LoadState::Ready;
            }
            Err(message) => {
                self.items.clear();
                self.error = Some(message);
                self.state = LoadState::Failed;
            }
        }
        true
    }

    pub fn set_query(&mut self, query: &str) {
        self.needle = Needle::new(query);
    }

    pub fn query(&self) -> &str {
        self.needle.as_str()
    }

    pub fn set_status(&mut self, status: T::Status) {
        self.status = status;
    }

    pub fn status(&self) -> T::Status {
        self.status
    }

    /// Filtered rows in display order
    pub fn visible(&self) -> Vec<&T> {
        filter_view(&self.items, &self.needle, self.status)
    }

    /// The whole fetched collection, in server order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn counts(&self) -> Vec<(T::Status, usize)> {
        status_counts(&self.items)
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Show a banner without touching the collection (failed delete, return, ...)
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
