//! Event domain model.

use gc_db::{EventDetails, EventRow};
use serde::{Deserialize, Serialize};

use crate::identity::to_global_id;
use crate::registry::GraphType;

/// A scheduled event. Read-only through the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    #[serde(flatten)]
    pub details: EventDetails,
}

impl Event {
    /// Create from database row.
    pub fn from_row(row: EventRow) -> Self {
        Self {
            id: row.id,
            details: row.details,
        }
    }

    pub fn global_id(&self) -> String {
        to_global_id(GraphType::Event.name(), &self.id.to_string())
    }
}
