//! Books screen

use async_trait::async_trait;
use std::fmt::Display;
use std::str::FromStr;
use validator::Validate;

use super::{
    crud::{CrudScreen, Managed},
    filter::{Filterable, Needle, StatusFilter},
    form::{read_only, unknown_field, Draft, FormMode},
};
use crate::{
    api::LibraryBackend,
    error::{AppError, AppResult},
    models::{Book, BookPayload},
};

pub type BooksScreen = CrudScreen<Book>;

/// Availability filter for the books list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookStatus {
    #[default]
    All,
    Available,
    Borrowed,
}

impl StatusFilter for BookStatus {
    const VARIANTS: &'static [Self] = &[BookStatus::All, BookStatus::Available, BookStatus::Borrowed];
}

impl Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            BookStatus::All => "all",
            BookStatus::Available => "available",
            BookStatus::Borrowed => "borrowed",
        })
    }
}

impl FromStr for BookStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(BookStatus::All),
            "available" => Ok(BookStatus::Available),
            "borrowed" => Ok(BookStatus::Borrowed),
            other => Err(AppError::Validation(format!(
                "Unknown book status '{}' (all, available, borrowed)",
                other
            ))),
        }
    }
}

impl Filterable for Book {
    type Status = BookStatus;

    fn matches_query(&self, needle: &Needle) -> bool {
        needle.in_text(&self.title) || needle.in_text(&self.author) || needle.in_identifier(&self.isbn)
    }

    fn matches_status(&self, status: BookStatus) -> bool {
        match status {
            BookStatus::All => true,
            BookStatus::Available => self.is_available,
            BookStatus::Borrowed => !self.is_available,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct BookDraft {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "ISBN is required"))]
    pub isbn: String,
    /// Carried through unchanged; the server owns availability
    pub is_available: bool,
}

impl Default for BookDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            isbn: String::new(),
            is_available: true,
        }
    }
}

const BOOK_FIELDS: &[&str] = &["title", "author", "isbn"];

impl Draft for BookDraft {
    type Entity = Book;
    type Payload = BookPayload;

    fn from_entity(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            isbn: book.isbn.clone(),
            is_available: book.is_available,
        }
    }

    fn set_field(&mut self, field: &str, value: &str, mode: FormMode) -> AppResult<()> {
        match field {
            "title" => self.title = value.to_string(),
            "author" => self.author = value.to_string(),
            "isbn" if mode.is_edit() => return Err(read_only("ISBN")),
            "isbn" => self.isbn = value.to_string(),
            other => return Err(unknown_field(other, BOOK_FIELDS)),
        }
        Ok(())
    }

    fn payload(&self, mode: FormMode) -> BookPayload {
        BookPayload {
            book_id: match mode {
                FormMode::Create => None,
                FormMode::Edit(id) => Some(id),
            },
            title: self.title.clone(),
            author: self.author.clone(),
            isbn: self.isbn.clone(),
            is_available: self.is_available,
        }
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("title", self.title.clone()),
            ("author", self.author.clone()),
            ("isbn", self.isbn.clone()),
        ]
    }
}

#[async_trait]
impl Managed for Book {
    type Draft = BookDraft;

    const NOUN: &'static str = "book";

    async fn fetch_all(backend: &dyn LibraryBackend) -> AppResult<Vec<Self>> {
        backend.list_books().await
    }

    async fn fetch_one(backend: &dyn LibraryBackend, id: i64) -> AppResult<Self> {
        backend.get_book(id).await
    }

    async fn create(backend: &dyn LibraryBackend, payload: &BookPayload) -> AppResult<()> {
        backend.create_book(payload).await
    }

    async fn update(backend: &dyn LibraryBackend, id: i64, payload: &BookPayload) -> AppResult<()> {
        backend.update_book(id, payload).await
    }

    async fn remove(backend: &dyn LibraryBackend, id: i64) -> AppResult<()> {
        backend.delete_book(id).await
    }
}
