//! Library Console
//!
//! Administrative console for a library management REST backend: lists of
//! books, members and loans, searched and filtered locally, with
//! create/edit/delete and lend/return actions sent to the backend.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod screens;
pub mod session;
pub mod shell;

pub use api::{ApiClient, LibraryBackend};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use session::Session;
pub use shell::{Console, Outcome};
