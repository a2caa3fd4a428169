//! Members screen

use async_trait::async_trait;
use validator::Validate;

use super::{
    crud::{CrudScreen, Managed},
    filter::{AnyStatus, Filterable, Needle},
    form::{read_only, unknown_field, Draft, FormMode},
};
use crate::{
    api::LibraryBackend,
    error::{AppError, AppResult},
    models::{Member, MemberPayload},
};

pub type MembersScreen = CrudScreen<Member>;

impl Filterable for Member {
    type Status = AnyStatus;

    fn matches_query(&self, needle: &Needle) -> bool {
        needle.in_text(&self.name)
            || needle.in_text(&self.email)
            || needle.in_identifier(&self.ci)
            || needle.in_identifier(&self.phone_number)
    }

    fn matches_status(&self, _status: AnyStatus) -> bool {
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct MemberDraft {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Invalid email format")
    )]
    pub email: String,
    #[validate(length(min = 1, message = "National ID is required"))]
    pub ci: String,
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone_number: String,
}

const MEMBER_FIELDS: &[&str] = &["name", "email", "ci", "phone"];

impl Draft for MemberDraft {
    type Entity = Member;
    type Payload = MemberPayload;

    fn from_entity(member: &Member) -> Self {
        Self {
            name: member.name.clone(),
            email: member.email.clone(),
            ci: member.ci.clone(),
            phone_number: member.phone_number.clone(),
        }
    }

    fn set_field(&mut self, field: &str, value: &str, mode: FormMode) -> AppResult<()> {
        match field {
            "name" => self.name = value.to_string(),
            "email" => self.email = value.to_string(),
            "ci" if mode.is_edit() => return Err(read_only("National ID")),
            "ci" => self.ci = value.to_string(),
            "phone" | "phone_number" => self.phone_number = value.to_string(),
            other => return Err(unknown_field(other, MEMBER_FIELDS)),
        }
        Ok(())
    }

    fn payload(&self, _mode: FormMode) -> MemberPayload {
        MemberPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            ci: self.ci.clone(),
            phone_number: self.phone_number.clone(),
        }
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("email", self.email.clone()),
            ("ci", self.ci.clone()),
            ("phone", self.phone_number.clone()),
        ]
    }
}

#[async_trait]
impl Managed for Member {
    type Draft = MemberDraft;

    const NOUN: &'static str = "member";

    async fn fetch_all(backend: &dyn LibraryBackend) -> AppResult<Vec<Self>> {
        backend.list_members().await
    }

    async fn fetch_one(backend: &dyn LibraryBackend, id: i64) -> AppResult<Self> {
        backend.get_member(id).await
    }

    async fn create(backend: &dyn LibraryBackend, payload: &MemberPayload) -> AppResult<()> {
        backend.create_member(payload).await
    }

    async fn update(backend: &dyn LibraryBackend, id: i64, payload: &MemberPayload) -> AppResult<()> {
        backend.update_member(id, payload).await
    }

    async fn remove(backend: &dyn LibraryBackend, id: i64) -> AppResult<()> {
        backend.delete_member(id).await
    }
}

/// Parse a member identifier typed by the operator
pub fn parse_member_id(raw: &str) -> AppResult<i64> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::InvalidReference("Invalid member ID".to_string()))
}
