//! A remote directory served from a fixed set of records.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::directory::{ConstituentGroupRecord, ConstituentRecord, FormRecord, RemoteDirectory};
use crate::error::{BsdError, BsdResult, STATUS_CONFLICT};

/// In-process [`RemoteDirectory`] used when no BSD credentials are configured
/// and as a test double.
///
/// Unknown forms fail with a 409 status, like the real API.
#[derive(Default)]
pub struct StaticDirectory {
    constituents: Vec<ConstituentRecord>,
    forms: HashMap<String, FormRecord>,
    form_failures: HashMap<String, u16>,
    groups: HashMap<String, ConstituentGroupRecord>,
    form_requests: AtomicUsize,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_constituent(mut self, record: ConstituentRecord) -> Self {
        self.constituents.push(record);
        self
    }

    pub fn with_form(mut self, record: FormRecord) -> Self {
        self.forms.insert(record.id.to_string(), record);
        self
    }

    /// Make `get_form` for `form_id` fail with the given status.
    pub fn with_form_failure(mut self, form_id: &str, status: u16) -> Self {
        self.form_failures.insert(form_id.to_string(), status);
        self
    }

    pub fn with_group(mut self, record: ConstituentGroupRecord) -> Self {
        self.groups.insert(record.id.to_string(), record);
        self
    }

    /// Number of `get_form` calls served so far.
    pub fn form_requests(&self) -> usize {
        self.form_requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteDirectory for StaticDirectory {
    async fn get_constituent_by_email(&self, email: &str) -> BsdResult<Option<ConstituentRecord>> {
        Ok(self
            .constituents
            .iter()
            .find(|c| {
                c.email
                    .as_deref()
                    .is_some_and(|e| e.eq_ignore_ascii_case(email))
            })
            .cloned())
    }

    async fn get_form(&self, form_id: &str) -> BsdResult<FormRecord> {
        self.form_requests.fetch_add(1, Ordering::SeqCst);

        if let Some(status) = self.form_failures.get(form_id) {
            return Err(BsdError::Status {
                status: *status,
                body: format!("get_form failed for signup_form_id {}", form_id),
            });
        }

        self.forms.get(form_id).cloned().ok_or_else(|| BsdError::Status {
            status: STATUS_CONFLICT,
            body: format!("signup_form_id {} does not exist", form_id),
        })
    }

    async fn get_constituent_group(&self, group_id: &str) -> BsdResult<Option<ConstituentGroupRecord>> {
        Ok(self.groups.get(group_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_form_is_conflict() {
        let directory = StaticDirectory::new();
        let err = directory.get_form("77").await.unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(directory.form_requests(), 1);
    }

    #[tokio::test]
    async fn test_email_lookup_ignores_case() {
        let directory = StaticDirectory::new().with_constituent(ConstituentRecord {
            id: 9,
            first_name: Some("Jane".to_string()),
            middle_name: None,
            last_name: Some("Doe".to_string()),
            email: Some("Jane@Example.com".to_string()),
        });

        let found = directory.get_constituent_by_email("jane@example.com").await.unwrap();
        assert_eq!(found.map(|c| c.id), Some(9));
        assert!(directory
            .get_constituent_by_email("nobody@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_configured_failure_status() {
        let directory = StaticDirectory::new().with_form_failure("5", 500);
        let err = directory.get_form("5").await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(!err.is_conflict());
    }
}
