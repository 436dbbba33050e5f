//! Group queries (Redis).

use crate::client::{all_ids, index_all, load_row, next_id, save_row, RedisError, RedisPool, RedisResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRow {
    pub id: i64,
    pub name: Option<String>,
    pub bsd_id: Option<i64>,
    pub person_ids: Vec<i64>,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewGroup {
    pub name: Option<String>,
    pub bsd_id: Option<i64>,
    pub person_ids: Vec<i64>,
}

fn group_key(id: i64) -> String {
    format!("gc:group:{}", id)
}

const ALL_KEY: &str = "gc:groups:all";

pub async fn create_group(pool: &RedisPool, new: &NewGroup) -> RedisResult<GroupRow> {
    let id = next_id(pool, "group").await?;
    let row = GroupRow {
        id,
        name: new.name.clone(),
        bsd_id: new.bsd_id,
        person_ids: new.person_ids.clone(),
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    save_row(pool, &group_key(id), &row).await?;
    index_all(pool, ALL_KEY, id).await?;
    Ok(row)
}

pub async fn get_group(pool: &RedisPool, id: i64) -> RedisResult<Option<GroupRow>> {
    load_row(pool, &group_key(id)).await
}

pub async fn list_groups(pool: &RedisPool) -> RedisResult<Vec<GroupRow>> {
    let mut groups = Vec::new();
    for id in all_ids(pool, ALL_KEY).await? {
        if let Some(row) = get_group(pool, id).await? {
            groups.push(row);
        }
    }
    Ok(groups)
}

/// Append a person to a group's member list. Adding an existing member is a no-op.
pub async fn add_person(pool: &RedisPool, group_id: i64, person_id: i64) -> RedisResult<GroupRow> {
    let mut row = get_group(pool, group_id)
        .await?
        .ok_or_else(|| RedisError::NotFound(format!("Group not found: {}", group_id)))?;
    if !row.person_ids.contains(&person_id) {
        row.person_ids.push(person_id);
        save_row(pool, &group_key(group_id), &row).await?;
    }
    Ok(row)
}
