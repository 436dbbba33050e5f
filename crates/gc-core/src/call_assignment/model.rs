//! Call assignment domain model.

use gc_db::CallAssignmentRow;
use serde::{Deserialize, Serialize};

use crate::identity::to_global_id;
use crate::registry::GraphType;

/// A mass calling assignment: callers from one group phone the people of
/// another group and record answers in a survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallAssignment {
    pub id: i64,
    pub name: String,
    pub caller_group_id: Option<i64>,
    pub target_group_id: Option<i64>,
    pub survey_id: Option<i64>,
    pub created_at: String,
}

impl CallAssignment {
    /// Create from database row.
    pub fn from_row(row: CallAssignmentRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            caller_group_id: row.caller_group_id,
            target_group_id: row.target_group_id,
            survey_id: row.survey_id,
            created_at: row.created_at,
        }
    }

    pub fn global_id(&self) -> String {
        to_global_id(GraphType::CallAssignment.name(), &self.id.to_string())
    }
}
