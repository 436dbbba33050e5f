//! Call assignments.

pub mod create;
pub mod model;

use rand::Rng;

use crate::connection::{connection_from_vec, Connection, ConnectionArgs};
use crate::context::AppContext;
use crate::error::GcResult;
use crate::group::{self, model::Group};
use crate::identity::from_global_id;
use crate::person::model::Person;
use crate::registry::GraphType;
use crate::survey::{self, model::Survey};
use model::CallAssignment;

pub use create::{create_call_assignment, CreateCallAssignment, CreatedCallAssignment};

/// Get a call assignment by local id.
pub async fn get_call_assignment(ctx: &AppContext, id: i64) -> GcResult<Option<CallAssignment>> {
    let row = ctx.store().get_call_assignment(id).await?;
    Ok(row.map(CallAssignment::from_row))
}

/// Look an assignment up by global id. Ids of other types resolve to `None`.
pub async fn find_by_global_id(ctx: &AppContext, global_id: &str) -> GcResult<Option<CallAssignment>> {
    let id = from_global_id(global_id)?;
    if id.type_name != GraphType::CallAssignment.name() {
        return Ok(None);
    }
    match id.numeric_id() {
        Some(local_id) => get_call_assignment(ctx, local_id).await,
        None => Ok(None),
    }
}

/// Every published assignment in creation order.
pub async fn list_call_assignments(ctx: &AppContext) -> GcResult<Vec<CallAssignment>> {
    let rows = ctx.store().list_call_assignments().await?;
    Ok(rows.into_iter().map(CallAssignment::from_row).collect())
}

/// A page of all published assignments.
pub async fn call_assignment_list(
    ctx: &AppContext,
    args: &ConnectionArgs,
) -> GcResult<Connection<CallAssignment>> {
    connection_from_vec(list_call_assignments(ctx).await?, args)
}

async fn linked_group(ctx: &AppContext, id: Option<i64>) -> GcResult<Option<Group>> {
    match id {
        Some(id) => group::get_group(ctx, id).await,
        None => Ok(None),
    }
}

pub async fn caller_group(ctx: &AppContext, assignment: &CallAssignment) -> GcResult<Option<Group>> {
    linked_group(ctx, assignment.caller_group_id).await
}

pub async fn target_group(ctx: &AppContext, assignment: &CallAssignment) -> GcResult<Option<Group>> {
    linked_group(ctx, assignment.target_group_id).await
}

pub async fn survey(ctx: &AppContext, assignment: &CallAssignment) -> GcResult<Option<Survey>> {
    match assignment.survey_id {
        Some(id) => survey::get_survey(ctx, id).await,
        None => Ok(None),
    }
}

/// Pick the next person for a caller to phone: a uniformly random member of
/// the target group. `None` when the group is missing or empty.
///
/// The calling person does not influence the pick yet.
pub async fn target_for_user(
    ctx: &AppContext,
    assignment: &CallAssignment,
    _person_id: Option<&str>,
) -> GcResult<Option<Person>> {
    let Some(target) = target_group(ctx, assignment).await? else {
        return Ok(None);
    };
    let mut people = group::people(ctx, &target).await?;
    if people.is_empty() {
        return Ok(None);
    }
    let index = rand::rng().random_range(0..people.len());
    Ok(Some(people.swap_remove(index)))
}
