//! Remote data client for the library backend REST API
//!
//! Every operation is a single request: no caching, no retry and no
//! idempotency key. A non-2xx status becomes [`AppError::Api`] carrying the
//! backend's message when one can be extracted from the body.

pub mod auth;
pub mod loans;
pub mod resources;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use crate::{
    config::ApiConfig,
    error::{AppError, AppResult},
    models::{Book, BookPayload, Credentials, Loan, LoginResponse, Member, MemberPayload},
};

/// Operations the console screens need from the backend.
///
/// Implemented over HTTP by [`ApiClient`]; screens only see this trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LibraryBackend: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> AppResult<LoginResponse>;

    async fn list_books(&self) -> AppResult<Vec<Book>>;
    async fn get_book(&self, id: i64) -> AppResult<Book>;
    async fn create_book(&self, payload: &BookPayload) -> AppResult<()>;
    async fn update_book(&self, id: i64, payload: &BookPayload) -> AppResult<()>;
    async fn delete_book(&self, id: i64) -> AppResult<()>;

    async fn list_members(&self) -> AppResult<Vec<Member>>;
    async fn get_member(&self, id: i64) -> AppResult<Member>;
    async fn create_member(&self, payload: &MemberPayload) -> AppResult<()>;
    async fn update_member(&self, id: i64, payload: &MemberPayload) -> AppResult<()>;
    async fn delete_member(&self, id: i64) -> AppResult<()>;

    async fn list_loans(&self) -> AppResult<Vec<Loan>>;
    async fn list_member_loans(&self, member_id: i64) -> AppResult<Vec<Loan>>;
    /// `member_id` is passed through as typed by the operator
    async fn create_loan(&self, member_id: &str, book_id: i64) -> AppResult<()>;
    async fn return_loan(&self, loan_id: i64) -> AppResult<()>;
}

/// HTTP implementation of [`LibraryBackend`]
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}/{}", self.base_url, path))
    }

    /// Send a request and turn any non-2xx status into [`AppError::Api`]
    async fn send(&self, method: Method, path: &str, request: RequestBuilder) -> AppResult<Response> {
        tracing::debug!("{} /{}", method, path);

        let response = request.send().await.map_err(|e| {
            tracing::warn!("{} /{} failed: {}", method, path, e);
            AppError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_server_message(&body);
        tracing::warn!(
            "{} /{} rejected with {}: {}",
            method,
            path,
            status.as_u16(),
            message.as_deref().unwrap_or("<no message>")
        );

        Err(AppError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let request = self.request(Method::GET, path);
        let response = self.send(Method::GET, path, request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Decode(format!("GET /{}: {}", path, e)))
    }
}

/// Pull a human-readable message out of an error body.
///
/// Understands validation problem documents (`errors` map, flattened to
/// `field: message` lines), `message`/`title`/`detail` strings, bare JSON
/// strings and plain text.
pub fn extract_server_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => return Some(body.to_string()),
    };

    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text),
        Value::Object(map) => {
            if let Some(Value::Object(errors)) = map.get("errors") {
                let lines: Vec<String> = errors
                    .iter()
                    .map(|(field, detail)| format!("{}: {}", field, flatten_detail(detail)))
                    .collect();
                if !lines.is_empty() {
                    return Some(lines.join("\n"));
                }
            }

            ["message", "title", "detail", "error"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
                .filter(|text| !text.trim().is_empty())
                .map(str::to_string)
        }
        _ => None,
    }
}

fn flatten_detail(detail: &Value) -> String {
    match detail {
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(flatten_detail)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

#[async_trait]
impl LibraryBackend for ApiClient {
    async fn login(&self, credentials: &Credentials) -> AppResult<LoginResponse> {
        self.authenticate(credentials).await
    }

    async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.list::<Book>().await
    }

    async fn get_book(&self, id: i64) -> AppResult<Book> {
        self.get::<Book>(id).await
    }

    async fn create_book(&self, payload: &BookPayload) -> AppResult<()> {
        self.create::<Book>(payload).await
    }

    async fn update_book(&self, id: i64, payload: &BookPayload) -> AppResult<()> {
        self.update::<Book>(id, payload).await
    }

    async fn delete_book(&self, id: i64) -> AppResult<()> {
        self.delete::<Book>(id).await
    }

    async fn list_members(&self) -> AppResult<Vec<Member>> {
        self.list::<Member>().await
    }

    async fn get_member(&self, id: i64) -> AppResult<Member> {
        self.get::<Member>(id).await
    }

    async fn create_member(&self, payload: &MemberPayload) -> AppResult<()> {
        self.create::<Member>(payload).await
    }

    async fn update_member(&self, id: i64, payload: &MemberPayload) -> AppResult<()> {
        self.update::<Member>(id, payload).await
    }

    async fn delete_member(&self, id: i64) -> AppResult<()> {
        self.delete::<Member>(id).await
    }

    async fn list_loans(&self) -> AppResult<Vec<Loan>> {
        self.all_loans().await
    }

    async fn list_member_loans(&self, member_id: i64) -> AppResult<Vec<Loan>> {
        self.loans_of_member(member_id).await
    }

    async fn create_loan(&self, member_id: &str, book_id: i64) -> AppResult<()> {
        self.lend(member_id, book_id).await
    }

    async fn return_loan(&self, loan_id: i64) -> AppResult<()> {
        self.close_loan(loan_id).await
    }
}
