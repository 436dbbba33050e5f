//! Query modules for all Ground Control entities stored in Redis.

pub mod call_assignments;
pub mod events;
pub mod groups;
pub mod people;
pub mod surveys;
