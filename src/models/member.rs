//! Member (borrower) model and payloads

use serde::{Deserialize, Serialize};

use super::Resource;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(rename = "memberId", alias = "id")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// National identity number, fixed once the member exists
    #[serde(default)]
    pub ci: String,
    #[serde(default)]
    pub phone_number: String,
}

/// Create/update body for `/Members`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPayload {
    pub name: String,
    pub email: String,
    pub ci: String,
    pub phone_number: String,
}

impl Resource for Member {
    const COLLECTION: &'static str = "Members";
    type Payload = MemberPayload;

    fn id(&self) -> i64 {
        self.id
    }
}
