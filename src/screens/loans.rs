//! Loans (transactions) screen: loan list, new-loan form with book picker,
//! and the return confirmation.

use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

use super::{
    confirm::Confirmation,
    filter::{Filterable, Needle, StatusFilter},
    list_view::ListView,
};
use crate::{
    api::LibraryBackend,
    error::{AppError, AppResult},
    models::{Book, Loan},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoanStatus {
    #[default]
    All,
    Loaned,
    Returned,
}

impl LoanStatus {
    /// Status word of a single loan, also matched by the search box
    pub fn of(loan: &Loan) -> Self {
        if loan.is_open() {
            LoanStatus::Loaned
        } else {
            LoanStatus::Returned
        }
    }
}

impl StatusFilter for LoanStatus {
    const VARIANTS: &'static [Self] = &[LoanStatus::All, LoanStatus::Loaned, LoanStatus::Returned];
}

impl Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            LoanStatus::All => "all",
            LoanStatus::Loaned => "loaned",
            LoanStatus::Returned => "returned",
        })
    }
}

impl FromStr for LoanStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(LoanStatus::All),
            "loaned" | "open" => Ok(LoanStatus::Loaned),
            "returned" | "closed" => Ok(LoanStatus::Returned),
            other => Err(AppError::Validation(format!(
                "Unknown loan status '{}' (all, loaned, returned)",
                other
            ))),
        }
    }
}

impl Filterable for Loan {
    type Status = LoanStatus;

    fn matches_query(&self, needle: &Needle) -> bool {
        needle.in_text(&self.book.title)
            || needle.in_text(&self.member.name)
            || needle.in_text(&LoanStatus::of(self).to_string())
    }

    fn matches_status(&self, status: LoanStatus) -> bool {
        status == LoanStatus::All || status == LoanStatus::of(self)
    }

    /// Open loans first; server order otherwise
    fn order(rows: &mut Vec<&Self>) {
        rows.sort_by_key(|loan| !loan.is_open());
    }
}

/// Incremental single-select book search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPicker {
    search: String,
    selected: Option<i64>,
}

impl BookPicker {
    /// Typing drops any previous selection
    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_string();
        self.selected = None;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Books whose title contains the search text; nothing while it is empty
    pub fn candidates<'a>(&self, books: &'a [Book]) -> Vec<&'a Book> {
        if self.search.is_empty() {
            return Vec::new();
        }
        let needle = Needle::new(&self.search);
        books.iter().filter(|b| needle.in_text(&b.title)).collect()
    }

    pub fn select(&mut self, book: &Book) {
        self.search = book.title.clone();
        self.selected = Some(book.id);
    }

    pub fn selected(&self) -> Option<i64> {
        self.selected
    }
}

/// The new-loan dialog
#[derive(Debug, Clone, Default)]
pub struct LoanForm {
    /// Raw operator input, sent as typed
    pub member_id: String,
    pub picker: BookPicker,
    error: Option<String>,
}

impl LoanForm {
    pub fn can_submit(&self) -> bool {
        !self.member_id.trim().is_empty() && self.picker.selected().is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

pub struct LoansScreen {
    backend: Arc<dyn LibraryBackend>,
    list: ListView<Loan>,
    /// Fetched once at mount for the picker
    books: Vec<Book>,
    form: Option<LoanForm>,
    returning: Confirmation,
}

impl LoansScreen {
    pub fn new(backend: Arc<dyn LibraryBackend>) -> Self {
        Self {
            backend,
            list: ListView::new(),
            books: Vec::new(),
            form: None,
            returning: Confirmation::default(),
        }
    }

    pub fn list(&self) -> &ListView<Loan> {
        &self.list
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn form(&self) -> Option<&LoanForm> {
        self.form.as_ref()
    }

    pub fn pending_return(&self) -> Option<i64> {
        self.returning.pending()
    }

    pub async fn mount(&mut self) {
        self.list.reset();
        self.form = None;
        self.returning.cancel();
        self.refresh().await;

        match self.backend.list_books().await {
            Ok(books) => self.books = books,
            Err(err) => {
                tracing::warn!("Failed to load books for the picker: {}", err);
                self.books.clear();
                self.list.set_error("Error loading books");
            }
        }
    }

    pub async fn refresh(&mut self) {
        let ticket = self.list.begin_fetch();
        let result = self.backend.list_loans().await.map_err(|e| {
            tracing::warn!("Failed to load loans: {}", e);
            "Error loading loans".to_string()
        });
        self.list.finish_fetch(ticket, result);
    }

    pub fn search(&mut self, query: &str) {
        self.list.set_query(query);
    }

    pub fn filter(&mut self, status: LoanStatus) {
        self.list.set_status(status);
    }

    pub fn open_form(&mut self) {
        self.form = Some(LoanForm::default());
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
    }

    fn form_mut(&mut self) -> AppResult<&mut LoanForm> {
        self.form
            .as_mut()
            .ok_or_else(|| AppError::Validation("No loan form is open".to_string()))
    }

    pub fn set_member(&mut self, raw: &str) -> AppResult<()> {
        self.form_mut()?.member_id = raw.to_string();
        Ok(())
    }

    pub fn search_book(&mut self, text: &str) -> AppResult<()> {
        self.form_mut()?.picker.set_search(text);
        Ok(())
    }

    /// Current picker candidates (empty when no form is open)
    pub fn book_candidates(&self) -> Vec<&Book> {
        match &self.form {
            Some(form) => form.picker.candidates(&self.books),
            None => Vec::new(),
        }
    }

    /// Pick one of the current candidates
    pub fn choose_book(&mut self, book_id: i64) -> AppResult<()> {
        let form = self
            .form
            .as_mut()
            .ok_or_else(|| AppError::Validation("No loan form is open".to_string()))?;
        let book = form
            .picker
            .candidates(&self.books)
            .into_iter()
            .find(|b| b.id == book_id)
            .cloned()
            .ok_or_else(|| {
                AppError::InvalidReference(format!("Book {} is not among the search results", book_id))
            })?;
        form.picker.select(&book);
        Ok(())
    }

    /// Submit the new-loan form; refused locally until both fields are set
    pub async fn submit(&mut self) -> AppResult<()> {
        let form = self.form_mut()?;
        let book_id = match form.picker.selected() {
            Some(id) if form.can_submit() => id,
            _ => {
                let err = AppError::Validation("Enter a member ID and choose a book".to_string());
                form.error = Some(err.display_message(""));
                return Err(err);
            }
        };
        let member_id = form.member_id.clone();

        match self.backend.create_loan(&member_id, book_id).await {
            Ok(()) => {
                tracing::info!("Loan created for member {} (book {})", member_id, book_id);
                self.form = None;
                self.refresh().await;
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Failed to create loan: {}", err);
                if let Some(form) = self.form.as_mut() {
                    form.error = Some(format!(
                        "Error creating loan: {}",
                        err.server_message().map(str::to_string).unwrap_or_else(|| err.to_string())
                    ));
                }
                Err(err)
            }
        }
    }

    /// Raise the return prompt for an open loan
    pub fn request_return(&mut self, loan_id: i64) -> AppResult<()> {
        let loan = self
            .list
            .items()
            .iter()
            .find(|l| l.id == loan_id)
            .ok_or_else(|| AppError::InvalidReference(format!("No loan with id {}", loan_id)))?;
        if !loan.is_open() {
            return Err(AppError::InvalidReference(format!("Loan {} is already returned", loan_id)));
        }
        self.returning.request(loan_id);
        Ok(())
    }

    pub fn cancel_return(&mut self) {
        self.returning.cancel();
    }

    /// Register the return, then refetch. The prompt closes either way.
    pub async fn confirm_return(&mut self) -> AppResult<()> {
        let loan_id = self
            .returning
            .take()
            .ok_or_else(|| AppError::Validation("No return is pending".to_string()))?;

        match self.backend.return_loan(loan_id).await {
            Ok(()) => {
                self.refresh().await;
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Failed to return loan {}: {}", loan_id, err);
                self.list
                    .set_error(err.display_message("Error registering the return"));
                Err(err)
            }
        }
    }
}
