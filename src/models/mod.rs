//! Data models consumed from the library backend

pub mod auth;
pub mod book;
pub mod loan;
pub mod member;
pub mod timestamp;

use serde::{de::DeserializeOwned, Serialize};

// Re-export commonly used types
pub use auth::{Credentials, LoginResponse};
pub use book::{Book, BookPayload};
pub use loan::Loan;
pub use member::{Member, MemberPayload};

/// An entity exposed by the backend as a REST collection
/// (`GET /{COLLECTION}`, `POST /{COLLECTION}`, `PUT|DELETE /{COLLECTION}/{id}`).
pub trait Resource: DeserializeOwned + Send + Sync + 'static {
    /// Collection segment under the API base path
    const COLLECTION: &'static str;

    /// Body sent on create and update
    type Payload: Serialize + Send + Sync;

    fn id(&self) -> i64;
}
