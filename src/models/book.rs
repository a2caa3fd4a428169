//! Book model and payloads

use serde::{Deserialize, Serialize};

use super::Resource;

/// Book as returned by the backend.
///
/// `is_available` is computed by the server from open loans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(rename = "bookId", alias = "id")]
    pub id: i64,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

/// Create/update body for `/Books`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    /// Absent on create
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_id: Option<i64>,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub is_available: bool,
}

impl Resource for Book {
    const COLLECTION: &'static str = "Books";
    type Payload = BookPayload;

    fn id(&self) -> i64 {
        self.id
    }
}
