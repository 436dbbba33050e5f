//! Survey queries (Redis).

use crate::client::{
    claim_index, drop_row, index_all, load_row, next_id, save_row, RedisError, RedisPool,
    RedisResult,
};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyRow {
    pub id: i64,
    pub slug: String,
    pub bsd_id: Option<i64>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSurvey {
    pub slug: String,
    pub bsd_id: Option<i64>,
}

fn survey_key(id: i64) -> String {
    format!("gc:survey:{}", id)
}

fn bsd_key(bsd_id: i64) -> String {
    format!("gc:survey:bsd:{}", bsd_id)
}

const ALL_KEY: &str = "gc:surveys:all";

/// Create a survey. A survey imported from a CRM form is unique per form:
/// when another writer already claimed the form id, its survey is returned.
pub async fn create_survey(pool: &RedisPool, new: &NewSurvey) -> RedisResult<SurveyRow> {
    let id = next_id(pool, "survey").await?;
    let row = SurveyRow {
        id,
        slug: new.slug.clone(),
        bsd_id: new.bsd_id,
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    save_row(pool, &survey_key(id), &row).await?;

    if let Some(bsd_id) = row.bsd_id {
        if let Some(winner) = claim_index(pool, &bsd_key(bsd_id), id).await? {
            drop_row(pool, &survey_key(id)).await?;
            return get_survey(pool, winner)
                .await?
                .ok_or_else(|| RedisError::NotFound(format!("survey {}", winner)));
        }
    }
    index_all(pool, ALL_KEY, id).await?;
    Ok(row)
}

pub async fn get_survey(pool: &RedisPool, id: i64) -> RedisResult<Option<SurveyRow>> {
    load_row(pool, &survey_key(id)).await
}

pub async fn get_survey_by_bsd_id(pool: &RedisPool, bsd_id: i64) -> RedisResult<Option<SurveyRow>> {
    let mut conn = pool.clone();
    let id: Option<i64> = conn.get(bsd_key(bsd_id)).await?;
    match id {
        Some(id) => get_survey(pool, id).await,
        None => Ok(None),
    }
}
