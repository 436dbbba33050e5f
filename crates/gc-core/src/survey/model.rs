//! Survey domain model.

use gc_bsd::FormRecord;
use gc_db::{NewSurvey, SurveyRow};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{GcError, GcResult};
use crate::identity::to_global_id;
use crate::registry::GraphType;

/// A survey to be filled out by a person, backed by a BSD signup form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Survey {
    pub id: i64,
    pub slug: String,
    pub bsd_id: Option<i64>,
}

impl Survey {
    /// Create from database row.
    pub fn from_row(row: SurveyRow) -> Self {
        Self {
            id: row.id,
            slug: row.slug,
            bsd_id: row.bsd_id,
        }
    }

    pub fn global_id(&self) -> String {
        to_global_id(GraphType::Survey.name(), &self.id.to_string())
    }

    /// Public URL of the survey page on the BSD host.
    pub fn full_url(&self, bsd_host: &str) -> GcResult<String> {
        let base = format!("https://{}", bsd_host.trim_end_matches('/'));
        let url = Url::parse(&base)
            .and_then(|base| base.join(&format!("/page/s/{}", self.slug)))
            .map_err(|e| GcError::Config(format!("invalid BSD host '{}': {}", bsd_host, e)))?;
        Ok(url.to_string())
    }
}

/// Map a BSD signup form onto the fields of a local survey.
pub fn from_form(form: &FormRecord) -> NewSurvey {
    NewSurvey {
        slug: form.slug.clone(),
        bsd_id: Some(form.id),
    }
}
