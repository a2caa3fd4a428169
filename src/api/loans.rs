//! Loan listing and the lend/return actions

use reqwest::Method;

use super::ApiClient;
use crate::{error::AppResult, models::Loan};

impl ApiClient {
    /// `GET /Loans`
    pub async fn all_loans(&self) -> AppResult<Vec<Loan>> {
        self.fetch_json("Loans").await
    }

    /// `GET /Loans/member/{id}`
    pub async fn loans_of_member(&self, member_id: i64) -> AppResult<Vec<Loan>> {
        self.fetch_json(&format!("Loans/member/{}", member_id)).await
    }

    /// `POST /Loans/loan?memberId=..&bookId=..`
    pub async fn lend(&self, member_id: &str, book_id: i64) -> AppResult<()> {
        let path = "Loans/loan";
        let request = self
            .request(Method::POST, path)
            .query(&[("memberId", member_id.to_string()), ("bookId", book_id.to_string())]);
        self.send(Method::POST, path, request).await?;
        tracing::info!("Book {} loaned to member {}", book_id, member_id);
        Ok(())
    }

    /// `POST /Loans/return?loanId=..`
    pub async fn close_loan(&self, loan_id: i64) -> AppResult<()> {
        let path = "Loans/return";
        let request = self
            .request(Method::POST, path)
            .query(&[("loanId", loan_id)]);
        self.send(Method::POST, path, request).await?;
        tracing::info!("Loan {} returned", loan_id);
        Ok(())
    }
}
