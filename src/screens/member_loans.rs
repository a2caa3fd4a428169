//! Loans of a single member

use std::sync::Arc;

use super::{list_view::ListView, members::parse_member_id};
use crate::{api::LibraryBackend, error::AppResult, models::Loan};

pub struct MemberLoansScreen {
    backend: Arc<dyn LibraryBackend>,
    member_id: Option<i64>,
    list: ListView<Loan>,
}

impl MemberLoansScreen {
    pub fn new(backend: Arc<dyn LibraryBackend>) -> Self {
        Self {
            backend,
            member_id: None,
            list: ListView::new(),
        }
    }

    pub fn member_id(&self) -> Option<i64> {
        self.member_id
    }

    pub fn list(&self) -> &ListView<Loan> {
        &self.list
    }

    /// Loans in server order
    pub fn loans(&self) -> &[Loan] {
        self.list.items()
    }

    /// Show the loans of the member typed as `raw_id`.
    ///
    /// A malformed id is reported locally without any request.
    pub async fn open(&mut self, raw_id: &str) -> AppResult<()> {
        self.list.reset();
        let member_id = match parse_member_id(raw_id) {
            Ok(id) => id,
            Err(err) => {
                self.member_id = None;
                let ticket = self.list.begin_fetch();
                self.list.finish_fetch(ticket, Err(err.display_message("Invalid member ID")));
                return Err(err);
            }
        };

        self.member_id = Some(member_id);
        self.refresh().await;
        Ok(())
    }

    pub async fn refresh(&mut self) {
        let Some(member_id) = self.member_id else {
            return;
        };
        let ticket = self.list.begin_fetch();
        let result = self
            .backend
            .list_member_loans(member_id)
            .await
            .map_err(|e| {
                tracing::warn!("Failed to load loans of member {}: {}", member_id, e);
                e.display_message("Error fetching loans")
            });
        self.list.finish_fetch(ticket, result);
    }
}
