//! The Ground Control graph schema.
//!
//! Object types wrap the `gc-core` models; resolvers delegate to the
//! `gc-core` operations and map [`GcError`] into GraphQL errors.

pub mod mutation;
pub mod node;
pub mod query;
pub mod types;

use std::sync::Arc;

use async_graphql::connection::{Connection, Edge};
use async_graphql::{Context, EmptySubscription, Error, ErrorExtensions, OutputType, Schema};
use gc_core::connection::{Connection as Page, ConnectionArgs};
use gc_core::{AppContext, GcError};
use tracing::{error, warn};

use self::mutation::MutationRoot;
use self::query::QueryRoot;

pub type GroundControlSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with the application context injected as data.
pub fn build_schema(ctx: Arc<AppContext>) -> GroundControlSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(ctx)
        .finish()
}

/// Export the schema in SDL form.
pub fn export_sdl() -> String {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .finish()
        .sdl()
}

pub(crate) fn app<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a AppContext> {
    ctx.data::<Arc<AppContext>>().map(|app| app.as_ref())
}

/// Convert a domain error into a GraphQL error.
///
/// Invalid input keeps its message verbatim and carries its status in the
/// `status` extension.
pub(crate) fn graphql_error(err: GcError) -> Error {
    match err {
        GcError::InvalidInput { status, message } => {
            warn!(status, message = %message, "Rejected input");
            Error::new(message).extend_with(|_, e| e.set("status", i32::from(status)))
        }
        GcError::MalformedId(_) | GcError::ValidationError(_) => Error::new(err.to_string()),
        other => {
            error!(error = %other, "Resolver failed");
            Error::new(other.to_string())
        }
    }
}

pub(crate) fn connection_args(
    first: Option<i32>,
    after: Option<String>,
    last: Option<i32>,
    before: Option<String>,
) -> ConnectionArgs {
    ConnectionArgs {
        first: first.map(i64::from),
        after,
        last: last.map(i64::from),
        before,
    }
}

/// Turn a sliced page into a Relay connection, wrapping each node.
pub(crate) fn into_connection<T, N, F>(page: Page<T>, wrap: F) -> Connection<String, N>
where
    N: OutputType,
    F: Fn(T) -> N,
{
    let mut connection = Connection::new(
        page.page_info.has_previous_page,
        page.page_info.has_next_page,
    );
    connection.edges.extend(
        page.edges
            .into_iter()
            .map(|edge| Edge::new(edge.cursor, wrap(edge.node))),
    );
    connection
}
