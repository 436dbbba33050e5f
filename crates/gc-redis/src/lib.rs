//! Ground Control Redis Data Layer
//!
//! Async Redis persistence for the locally owned entities: people, groups,
//! call assignments, surveys and events.

pub mod client;
pub mod queries;

pub use client::{RedisError, RedisPool, RedisResult, init_pool};
pub use queries::call_assignments;
pub use queries::events;
pub use queries::groups;
pub use queries::people;
pub use queries::surveys;
