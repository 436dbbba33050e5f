//! People: local records materialized from CRM constituents.

pub mod model;

use tracing::{debug, info};

use crate::context::{AppContext, Session};
use crate::error::GcResult;
use model::Person;

/// Get a person by local id.
pub async fn get_person(ctx: &AppContext, id: i64) -> GcResult<Option<Person>> {
    let row = ctx.store().get_person(id).await?;
    Ok(row.map(Person::from_row))
}

/// The person behind the caller's session.
///
/// Anonymous sessions and sessions naming an unknown person both resolve to
/// `None`; neither is an error.
pub async fn current_user(ctx: &AppContext, session: &Session) -> GcResult<Option<Person>> {
    let Some(person_id) = session.person_id.as_deref() else {
        return Ok(None);
    };
    let Ok(id) = person_id.parse::<i64>() else {
        debug!(person_id = %person_id, "Session person id is not a local id");
        return Ok(None);
    };
    get_person(ctx, id).await
}

/// Find a person by email through the remote directory.
///
/// There is no local-only lookup: the CRM is asked every time, and a found
/// constituent is materialized (or refreshed) locally.
pub async fn find_by_email(ctx: &AppContext, email: Option<&str>) -> GcResult<Option<Person>> {
    let Some(email) = email.map(str::trim).filter(|e| !e.is_empty()) else {
        return Ok(None);
    };

    let Some(record) = ctx.directory().get_constituent_by_email(email).await? else {
        debug!(email = %email, "No constituent for email");
        return Ok(None);
    };

    let row = ctx.store().upsert_person(&model::from_constituent(&record)).await?;
    info!(person_id = row.id, bsd_id = record.id, "Materialized person from BSD");
    Ok(Some(Person::from_row(row)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gc_bsd::{ConstituentRecord, StaticDirectory};
    use gc_db::MemoryStore;
    use std::sync::Arc;

    fn context() -> AppContext {
        let directory = StaticDirectory::new().with_constituent(ConstituentRecord {
            id: 4382,
            first_name: Some("Bob".to_string()),
            middle_name: None,
            last_name: Some("Smith".to_string()),
            email: Some("bob@example.com".to_string()),
        });
        AppContext::new(Arc::new(MemoryStore::new()), Arc::new(directory), "demo.bsd.net")
    }

    #[tokio::test]
    async fn test_anonymous_current_user_is_none() {
        let ctx = context();
        assert!(current_user(&ctx, &Session::anonymous()).await.unwrap().is_none());
        assert!(current_user(&ctx, &Session::for_person("12")).await.unwrap().is_none());
        assert!(current_user(&ctx, &Session::for_person("bob")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_email_materializes_once() {
        let ctx = context();
        let first = find_by_email(&ctx, Some("bob@example.com")).await.unwrap().unwrap();
        let second = find_by_email(&ctx, Some("bob@example.com")).await.unwrap().unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.bsd_id, Some(4382));
        assert!(!first.has_password());

        let session = Session::for_person(first.id.to_string());
        let me = current_user(&ctx, &session).await.unwrap();
        assert_eq!(me, Some(first));
    }

    #[tokio::test]
    async fn test_find_by_email_without_match() {
        let ctx = context();
        assert!(find_by_email(&ctx, None).await.unwrap().is_none());
        assert!(find_by_email(&ctx, Some("  ")).await.unwrap().is_none());
        assert!(find_by_email(&ctx, Some("amy@example.com")).await.unwrap().is_none());
    }
}
