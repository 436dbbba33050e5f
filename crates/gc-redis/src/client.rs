//! Redis connection pool management.

use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Redis error types.
#[derive(Error, Debug)]
pub enum RedisError {
    #[error("Redis connection error: {0}")]
    Connection(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for Redis operations.
pub type RedisResult<T> = Result<T, RedisError>;

/// Redis connection pool. ConnectionManager multiplexes internally and is
/// Clone, so callers clone it to get a mutable handle for each operation.
pub type RedisPool = ConnectionManager;

/// Initialize a Redis connection pool from a URL.
///
/// Example URL: `redis://127.0.0.1:6379`
pub async fn init_pool(redis_url: &str) -> RedisResult<RedisPool> {
    let client = redis::Client::open(redis_url)?;
    let manager = ConnectionManager::new(client).await?;
    Ok(manager)
}

/// Allocate the next numeric id for an entity kind.
pub(crate) async fn next_id(pool: &RedisPool, kind: &str) -> RedisResult<i64> {
    let mut conn = pool.clone();
    let id: i64 = conn.incr(format!("gc:ids:{}", kind), 1).await?;
    Ok(id)
}

/// Read and decode the JSON `data` field of an entity hash.
pub(crate) async fn load_row<T: DeserializeOwned>(pool: &RedisPool, key: &str) -> RedisResult<Option<T>> {
    let mut conn = pool.clone();
    let json: Option<String> = conn.hget(key, "data").await?;
    match json {
        Some(j) => Ok(Some(serde_json::from_str(&j)?)),
        None => Ok(None),
    }
}

/// Encode a row into the `data` field of an entity hash.
pub(crate) async fn save_row<T: Serialize>(pool: &RedisPool, key: &str, row: &T) -> RedisResult<()> {
    let mut conn = pool.clone();
    conn.hset::<_, _, _, ()>(key, "data", serde_json::to_string(row)?).await?;
    Ok(())
}

/// Add an id to a kind's ordered `all` index. Ids are monotonic, so the id
/// doubles as the score and preserves creation order.
pub(crate) async fn index_all(pool: &RedisPool, zkey: &str, id: i64) -> RedisResult<()> {
    let mut conn = pool.clone();
    conn.zadd::<_, _, _, ()>(zkey, id, id).await?;
    Ok(())
}

/// Read every id of an `all` index in creation order.
pub(crate) async fn all_ids(pool: &RedisPool, zkey: &str) -> RedisResult<Vec<i64>> {
    let mut conn = pool.clone();
    let ids: Vec<i64> = conn.zrange(zkey, 0, -1).await?;
    Ok(ids)
}

/// Claim a unique secondary index key for `id` with `SET NX`.
///
/// Returns `None` when the claim succeeds, or the id already holding the key.
pub(crate) async fn claim_index(pool: &RedisPool, key: &str, id: i64) -> RedisResult<Option<i64>> {
    let mut conn = pool.clone();
    let claimed: bool = conn.set_nx(key, id).await?;
    if claimed {
        return Ok(None);
    }
    let holder: Option<i64> = conn.get(key).await?;
    holder
        .map(Some)
        .ok_or_else(|| RedisError::OperationFailed(format!("index {} lost its holder", key)))
}

/// Delete an entity hash that never became reachable.
pub(crate) async fn drop_row(pool: &RedisPool, key: &str) -> RedisResult<()> {
    let mut conn = pool.clone();
    conn.del::<_, ()>(key).await?;
    Ok(())
}
