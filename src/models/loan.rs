//! Loan model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{timestamp, Book, Member};

/// A loan of one book to one member.
///
/// Loans are created and closed only through the dedicated
/// `/Loans/loan` and `/Loans/return` actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    #[serde(rename = "loanId", alias = "id")]
    pub id: i64,
    pub book: Book,
    pub member: Member,
    #[serde(with = "timestamp")]
    pub loan_date: DateTime<Utc>,
    #[serde(default, with = "timestamp::option")]
    pub return_date: Option<DateTime<Utc>>,
}

impl Loan {
    /// A loan is open until the book comes back
    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }
}
