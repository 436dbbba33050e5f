//! Events.

pub mod model;

use gc_db::EventDetails;
use tracing::info;

use crate::connection::{connection_from_vec, Connection, ConnectionArgs};
use crate::context::AppContext;
use crate::error::GcResult;
use model::Event;

/// Get an event by local id.
pub async fn get_event(ctx: &AppContext, id: i64) -> GcResult<Option<Event>> {
    let row = ctx.store().get_event(id).await?;
    Ok(row.map(Event::from_row))
}

/// List every event.
pub async fn list_events(ctx: &AppContext) -> GcResult<Vec<Event>> {
    let rows = ctx.store().list_events().await?;
    Ok(rows.into_iter().map(Event::from_row).collect())
}

/// A page of all events.
pub async fn event_list(ctx: &AppContext, args: &ConnectionArgs) -> GcResult<Connection<Event>> {
    connection_from_vec(list_events(ctx).await?, args)
}

/// Store a batch of imported event records.
pub async fn import_events(ctx: &AppContext, events: &[EventDetails]) -> GcResult<Vec<Event>> {
    let mut imported = Vec::with_capacity(events.len());
    for details in events {
        let row = ctx.store().create_event(details).await?;
        imported.push(Event::from_row(row));
    }
    info!(count = imported.len(), "Imported events");
    Ok(imported)
}
