//! Ground Control Entity Store.
//!
//! Defines the [`EntityStore`] contract the graph layer reads and writes
//! through, with a Redis backend (via gc-redis) and an in-memory backend.

pub mod memory;
pub mod redis_store;
pub mod store;

pub use gc_redis::RedisError as DbError;
pub use gc_redis::RedisPool as DbPool;
pub use gc_redis::RedisResult as DbResult;

pub use gc_redis::call_assignments::{AssignmentLink, CallAssignmentRow};
pub use gc_redis::events::{EventDetails, EventRow};
pub use gc_redis::groups::{GroupRow, NewGroup};
pub use gc_redis::people::{NewPerson, PersonRow};
pub use gc_redis::surveys::{NewSurvey, SurveyRow};

pub use memory::MemoryStore;
pub use redis_store::RedisStore;
pub use store::EntityStore;

/// Connect a Redis-backed store.
pub async fn connect_redis(redis_url: &str) -> DbResult<RedisStore> {
    let pool = gc_redis::init_pool(redis_url).await?;
    Ok(RedisStore::new(pool))
}

/// Connect a Redis-backed store reading REDIS_URL from environment (or default).
pub async fn connect_redis_from_env() -> DbResult<RedisStore> {
    let url = std::env::var("REDIS_URL")
        .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
    connect_redis(&url).await
}
