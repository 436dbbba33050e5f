//! Group domain model.

use gc_db::GroupRow;
use serde::{Deserialize, Serialize};

/// A list of people as determined by some criteria.
///
/// Groups carry no global id; they are reached through call assignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: Option<String>,
    pub bsd_id: Option<i64>,
    pub person_ids: Vec<i64>,
}

impl Group {
    /// Create from database row.
    pub fn from_row(row: GroupRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            bsd_id: row.bsd_id,
            person_ids: row.person_ids,
        }
    }
}
