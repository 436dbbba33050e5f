//! Ground Control Core Library
//!
//! Domain models and graph resolution logic: global ids, node and type
//! resolution, connection pagination, and the call assignment workflow.

pub mod call_assignment;
pub mod connection;
pub mod context;
pub mod error;
pub mod event;
pub mod group;
pub mod identity;
pub mod node;
pub mod person;
pub mod registry;
pub mod survey;

pub use context::{AppContext, ListContainer, Session, LIST_CONTAINER_ID};
pub use error::{GcError, GcResult};
pub use node::Entity;
pub use registry::GraphType;
