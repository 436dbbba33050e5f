//! Surveys.

pub mod model;

use crate::context::AppContext;
use crate::error::GcResult;
use crate::identity::from_global_id;
use crate::registry::GraphType;
use model::Survey;

/// Get a survey by local id.
pub async fn get_survey(ctx: &AppContext, id: i64) -> GcResult<Option<Survey>> {
    let row = ctx.store().get_survey(id).await?;
    Ok(row.map(Survey::from_row))
}

/// Get the survey materialized from a BSD signup form.
pub async fn get_survey_by_form(ctx: &AppContext, form_id: i64) -> GcResult<Option<Survey>> {
    let row = ctx.store().get_survey_by_bsd_id(form_id).await?;
    Ok(row.map(Survey::from_row))
}

/// Look a survey up by global id. Ids of other types resolve to `None`.
pub async fn find_by_global_id(ctx: &AppContext, global_id: &str) -> GcResult<Option<Survey>> {
    let id = from_global_id(global_id)?;
    if id.type_name != GraphType::Survey.name() {
        return Ok(None);
    }
    match id.numeric_id() {
        Some(local_id) => get_survey(ctx, local_id).await,
        None => Ok(None),
    }
}
