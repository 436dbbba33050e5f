//! Person domain model.

use gc_bsd::ConstituentRecord;
use gc_db::{NewPerson, PersonRow};
use serde::{Deserialize, Serialize};

use crate::identity::to_global_id;
use crate::registry::GraphType;

/// A constituent known locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub bsd_id: Option<i64>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl Person {
    /// Create from database row.
    pub fn from_row(row: PersonRow) -> Self {
        Self {
            id: row.id,
            bsd_id: row.bsd_id,
            first_name: row.first_name,
            middle_name: row.middle_name,
            last_name: row.last_name,
            email: row.email,
        }
    }

    pub fn global_id(&self) -> String {
        to_global_id(GraphType::Person.name(), &self.id.to_string())
    }

    /// Password login is not supported, so no person has one.
    pub fn has_password(&self) -> bool {
        false
    }
}

/// Map a CRM constituent onto the fields of a local person.
pub fn from_constituent(record: &ConstituentRecord) -> NewPerson {
    NewPerson {
        bsd_id: Some(record.id),
        first_name: record.first_name.clone(),
        middle_name: record.middle_name.clone(),
        last_name: record.last_name.clone(),
        email: record.email.clone(),
    }
}
