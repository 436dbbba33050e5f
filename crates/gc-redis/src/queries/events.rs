//! Event queries (Redis).

use crate::client::{all_ids, index_all, load_row, next_id, save_row, RedisPool, RedisResult};
use serde::{Deserialize, Serialize};

/// Scalar description of a scheduled event, as imported from the CRM.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventDetails {
    pub bsd_id: Option<i32>,
    pub event_id_obfuscated: Option<String>,
    pub flag_approval: Option<bool>,
    pub event_type_id: Option<i32>,
    pub creator_cons_id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub venue_name: Option<String>,
    pub venue_zip: Option<String>,
    pub venue_city: Option<String>,
    pub venue_state: Option<String>,
    pub venue_addr1: Option<String>,
    pub venue_addr2: Option<String>,
    pub venue_country: Option<String>,
    pub venue_directions: Option<String>,
    pub local_timezone: Option<String>,
    pub start_datetime: Option<String>,
    pub duration: Option<i32>,
    pub capacity: Option<i32>,
    pub attendee_volunteer_show: Option<bool>,
    pub attendee_volunteer_message: Option<String>,
    pub is_searchable: Option<i32>,
    pub public_phone: Option<bool>,
    pub contact_phone: Option<String>,
    pub host_receive_rsvp_emails: Option<bool>,
    pub rsvp_use_reminder_email: Option<bool>,
    pub rsvp_reminder_hours: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRow {
    pub id: i64,
    #[serde(flatten)]
    pub details: EventDetails,
    pub created_at: String,
}

fn event_key(id: i64) -> String {
    format!("gc:event:{}", id)
}

const ALL_KEY: &str = "gc:events:all";

pub async fn create_event(pool: &RedisPool, details: &EventDetails) -> RedisResult<EventRow> {
    let id = next_id(pool, "event").await?;
    let row = EventRow {
        id,
        details: details.clone(),
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    save_row(pool, &event_key(id), &row).await?;
    index_all(pool, ALL_KEY, id).await?;
    Ok(row)
}

pub async fn get_event(pool: &RedisPool, id: i64) -> RedisResult<Option<EventRow>> {
    load_row(pool, &event_key(id)).await
}

pub async fn list_events(pool: &RedisPool) -> RedisResult<Vec<EventRow>> {
    let mut events = Vec::new();
    for id in all_ids(pool, ALL_KEY).await? {
        if let Some(row) = get_event(pool, id).await? {
            events.push(row);
        }
    }
    Ok(events)
}
