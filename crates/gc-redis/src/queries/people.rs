//! Person queries (Redis).

use crate::client::{
    claim_index, drop_row, index_all, load_row, next_id, save_row, RedisError, RedisPool,
    RedisResult,
};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRow {
    pub id: i64,
    pub bsd_id: Option<i64>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields of a person as sourced from a CRM constituent record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPerson {
    pub bsd_id: Option<i64>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

fn person_key(id: i64) -> String {
    format!("gc:person:{}", id)
}

fn bsd_key(bsd_id: i64) -> String {
    format!("gc:person:bsd:{}", bsd_id)
}

const ALL_KEY: &str = "gc:people:all";

pub async fn get_person(pool: &RedisPool, id: i64) -> RedisResult<Option<PersonRow>> {
    load_row(pool, &person_key(id)).await
}

pub async fn get_person_by_bsd_id(pool: &RedisPool, bsd_id: i64) -> RedisResult<Option<PersonRow>> {
    let mut conn = pool.clone();
    let id: Option<i64> = conn.get(bsd_key(bsd_id)).await?;
    match id {
        Some(id) => get_person(pool, id).await,
        None => Ok(None),
    }
}

fn refresh(mut row: PersonRow, new: &NewPerson, now: String) -> PersonRow {
    row.first_name = new.first_name.clone();
    row.middle_name = new.middle_name.clone();
    row.last_name = new.last_name.clone();
    row.email = new.email.clone().or(row.email);
    row.updated_at = now;
    row
}

/// Create a person from a CRM record, or refresh the existing person that
/// was materialized from the same constituent earlier.
///
/// The CRM-id index is claimed with `SET NX` after the row is written. A
/// writer that loses the claim drops its row and refreshes the winner's.
pub async fn upsert_person(pool: &RedisPool, new: &NewPerson) -> RedisResult<PersonRow> {
    let now = chrono::Utc::now().to_rfc3339();

    if let Some(bsd_id) = new.bsd_id {
        if let Some(row) = get_person_by_bsd_id(pool, bsd_id).await? {
            let row = refresh(row, new, now);
            save_row(pool, &person_key(row.id), &row).await?;
            return Ok(row);
        }
    }

    let id = next_id(pool, "person").await?;
    let row = PersonRow {
        id,
        bsd_id: new.bsd_id,
        first_name: new.first_name.clone(),
        middle_name: new.middle_name.clone(),
        last_name: new.last_name.clone(),
        email: new.email.clone(),
        created_at: now.clone(),
        updated_at: now.clone(),
    };
    save_row(pool, &person_key(id), &row).await?;

    if let Some(bsd_id) = row.bsd_id {
        if let Some(winner) = claim_index(pool, &bsd_key(bsd_id), id).await? {
            drop_row(pool, &person_key(id)).await?;
            let existing = get_person(pool, winner)
                .await?
                .ok_or_else(|| RedisError::NotFound(format!("person {}", winner)))?;
            let existing = refresh(existing, new, now);
            save_row(pool, &person_key(existing.id), &existing).await?;
            tracing::debug!(person_id = existing.id, bsd_id, "Person already materialized");
            return Ok(existing);
        }
    }
    index_all(pool, ALL_KEY, id).await?;

    tracing::debug!(person_id = id, bsd_id = ?row.bsd_id, "Created person");
    Ok(row)
}

/// Load people by id, preserving the given order and skipping dangling ids.
pub async fn get_people(pool: &RedisPool, ids: &[i64]) -> RedisResult<Vec<PersonRow>> {
    let mut people = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(row) = get_person(pool, *id).await? {
            people.push(row);
        }
    }
    Ok(people)
}
