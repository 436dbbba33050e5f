//! GraphQL route handlers.

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse},
};
use gc_core::Session;

use crate::state::AppState;

/// Request header naming the signed-in person.
pub const SESSION_HEADER: &str = "x-session-person-id";

/// Read the caller's session from the request headers.
pub fn session_from_headers(headers: &HeaderMap) -> Session {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(Session::for_person)
        .unwrap_or_default()
}

pub async fn graphql_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let session = session_from_headers(&headers);
    state.schema.execute(req.into_inner().data(session)).await.into()
}

pub async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

pub async fn schema_sdl(State(state): State<AppState>) -> String {
    state.schema.sdl()
}
