//! Screen controllers of the console.
//!
//! Every screen follows the same cycle: fetch the collection, filter it
//! locally, edit a draft, send one mutation, then refetch from scratch.
//! A mutation's result is never patched into the local collection.

pub mod books;
pub mod confirm;
pub mod crud;
pub mod filter;
pub mod form;
pub mod list_view;
pub mod loans;
pub mod member_loans;
pub mod members;

pub use books::{BookDraft, BookStatus, BooksScreen};
pub use crud::{CrudScreen, Managed};
pub use filter::{AnyStatus, Filterable, Needle, StatusFilter};
pub use form::{Draft, FormController, FormMode};
pub use list_view::{FetchTicket, ListView, LoadState};
pub use loans::{BookPicker, LoanForm, LoanStatus, LoansScreen};
pub use member_loans::MemberLoansScreen;
pub use members::{MemberDraft, MembersScreen};
