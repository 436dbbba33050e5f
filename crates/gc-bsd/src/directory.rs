//! The remote directory contract.

use async_trait::async_trait;

use crate::error::BsdResult;

/// A constituent as known to the CRM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstituentRecord {
    pub id: i64,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// A signup form, the CRM object behind a survey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRecord {
    pub id: i64,
    pub name: Option<String>,
    pub slug: String,
}

/// A constituent group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstituentGroupRecord {
    pub id: i64,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub member_count: Option<i64>,
}

/// Read access to the CRM's records.
///
/// Ids are passed through as the opaque strings the caller received.
#[async_trait]
pub trait RemoteDirectory: Send + Sync {
    /// Look a constituent up by email. An unknown email is `Ok(None)`.
    async fn get_constituent_by_email(&self, email: &str) -> BsdResult<Option<ConstituentRecord>>;

    /// Fetch a signup form. A missing form fails with a 409 status.
    async fn get_form(&self, form_id: &str) -> BsdResult<FormRecord>;

    /// Fetch a constituent group. An unknown group is `Ok(None)`.
    async fn get_constituent_group(&self, group_id: &str) -> BsdResult<Option<ConstituentGroupRecord>>;
}
