//! Groups of people.

pub mod model;

use gc_db::NewGroup;

use crate::connection::{connection_from_vec, Connection, ConnectionArgs};
use crate::context::AppContext;
use crate::error::{GcError, GcResult};
use crate::person::model::Person;
use model::Group;

/// Get a group by local id.
pub async fn get_group(ctx: &AppContext, id: i64) -> GcResult<Option<Group>> {
    let row = ctx.store().get_group(id).await?;
    Ok(row.map(Group::from_row))
}

/// List every group.
pub async fn list_groups(ctx: &AppContext) -> GcResult<Vec<Group>> {
    let rows = ctx.store().list_groups().await?;
    Ok(rows.into_iter().map(Group::from_row).collect())
}

/// Create a local group.
pub async fn create_group(ctx: &AppContext, group: &NewGroup) -> GcResult<Group> {
    if group.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(GcError::validation("Group name must not be blank"));
    }
    let row = ctx.store().create_group(group).await?;
    Ok(Group::from_row(row))
}

/// Add a person to a group.
pub async fn add_member(ctx: &AppContext, group_id: i64, person_id: i64) -> GcResult<Group> {
    let row = ctx.store().add_group_member(group_id, person_id).await?;
    Ok(Group::from_row(row))
}

/// Members of a group in membership order.
pub async fn people(ctx: &AppContext, group: &Group) -> GcResult<Vec<Person>> {
    let rows = ctx.store().get_people(&group.person_ids).await?;
    Ok(rows.into_iter().map(Person::from_row).collect())
}

/// A page of a group's members.
pub async fn person_list(
    ctx: &AppContext,
    group: &Group,
    args: &ConnectionArgs,
) -> GcResult<Connection<Person>> {
    connection_from_vec(people(ctx, group).await?, args)
}
