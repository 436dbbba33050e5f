//! Application state.

use std::sync::Arc;

use gc_core::AppContext;

use crate::graphql::{build_schema, GroundControlSchema};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<AppContext>,
    pub schema: GroundControlSchema,
}

impl AppState {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        let schema = build_schema(Arc::clone(&ctx));
        Self { ctx, schema }
    }
}
