//! Call assignment queries (Redis).
//!
//! The scalar part of an assignment lives in the `data` field of its hash.
//! Each relation is kept in its own hash field so that concurrent link writes
//! never race on a shared JSON document.

use std::collections::HashMap;

use crate::client::{all_ids, index_all, next_id, RedisError, RedisPool, RedisResult};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallAssignmentRow {
    pub id: i64,
    pub name: String,
    pub caller_group_id: Option<i64>,
    pub target_group_id: Option<i64>,
    pub survey_id: Option<i64>,
    pub created_at: String,
}

#[derive(Serialize, Deserialize)]
struct CallAssignmentData {
    id: i64,
    name: String,
    created_at: String,
}

/// A relation of a call assignment that is set after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignmentLink {
    CallerGroup,
    TargetGroup,
    Survey,
}

impl AssignmentLink {
    /// Hash field holding the linked id.
    pub fn field(&self) -> &'static str {
        match self {
            Self::CallerGroup => "caller_group_id",
            Self::TargetGroup => "target_group_id",
            Self::Survey => "survey_id",
        }
    }
}

fn assignment_key(id: i64) -> String {
    format!("gc:call_assignment:{}", id)
}

const ALL_KEY: &str = "gc:call_assignments:all";

/// Create an unlinked, unpublished call assignment.
pub async fn create_call_assignment(pool: &RedisPool, name: &str) -> RedisResult<CallAssignmentRow> {
    let id = next_id(pool, "call_assignment").await?;
    let data = CallAssignmentData {
        id,
        name: name.to_string(),
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    let mut conn = pool.clone();
    conn.hset::<_, _, _, ()>(assignment_key(id), "data", serde_json::to_string(&data)?)
        .await?;

    Ok(CallAssignmentRow {
        id,
        name: data.name,
        caller_group_id: None,
        target_group_id: None,
        survey_id: None,
        created_at: data.created_at,
    })
}

/// Load a published assignment. Unpublished ones read as missing.
pub async fn get_call_assignment(pool: &RedisPool, id: i64) -> RedisResult<Option<CallAssignmentRow>> {
    let mut conn = pool.clone();
    let published: Option<f64> = conn.zscore(ALL_KEY, id).await?;
    if published.is_none() {
        return Ok(None);
    }
    load_call_assignment(pool, id).await
}

async fn load_call_assignment(pool: &RedisPool, id: i64) -> RedisResult<Option<CallAssignmentRow>> {
    let mut conn = pool.clone();
    let fields: HashMap<String, String> = conn.hgetall(assignment_key(id)).await?;
    let Some(json) = fields.get("data") else {
        return Ok(None);
    };
    let data: CallAssignmentData = serde_json::from_str(json)?;
    let link = |link: AssignmentLink| fields.get(link.field()).and_then(|v| v.parse::<i64>().ok());

    Ok(Some(CallAssignmentRow {
        id: data.id,
        name: data.name,
        caller_group_id: link(AssignmentLink::CallerGroup),
        target_group_id: link(AssignmentLink::TargetGroup),
        survey_id: link(AssignmentLink::Survey),
        created_at: data.created_at,
    }))
}

/// Set or clear one relation of an assignment.
pub async fn set_link(
    pool: &RedisPool,
    id: i64,
    link: AssignmentLink,
    target: Option<i64>,
) -> RedisResult<()> {
    let mut conn = pool.clone();
    let key = assignment_key(id);
    let exists: bool = conn.hexists(&key, "data").await?;
    if !exists {
        return Err(RedisError::NotFound(format!("call assignment {}", id)));
    }
    match target {
        Some(target) => conn.hset::<_, _, _, ()>(&key, link.field(), target).await?,
        None => conn.hdel::<_, _, ()>(&key, link.field()).await?,
    }
    Ok(())
}

/// Make an assignment visible to id lookups and the top-level list.
pub async fn publish_call_assignment(pool: &RedisPool, id: i64) -> RedisResult<()> {
    index_all(pool, ALL_KEY, id).await
}

pub async fn list_call_assignments(pool: &RedisPool) -> RedisResult<Vec<CallAssignmentRow>> {
    let mut assignments = Vec::new();
    for id in all_ids(pool, ALL_KEY).await? {
        if let Some(row) = load_call_assignment(pool, id).await? {
            assignments.push(row);
        }
    }
    Ok(assignments)
}
