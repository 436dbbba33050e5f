//! Application context shared by every resolver.

use std::sync::Arc;

use gc_bsd::RemoteDirectory;
use gc_db::EntityStore;
use serde::Serialize;

/// Id of the one list container.
pub const LIST_CONTAINER_ID: i64 = 1;

/// Root anchor for the top-level paginated lists.
///
/// Only [`AppContext::new`] constructs one, and it is never mutated, so the
/// instance handed out by a context is the only one for its lifetime.
#[derive(Debug, Serialize)]
pub struct ListContainer {
    id: i64,
}

impl ListContainer {
    fn new() -> Self {
        Self {
            id: LIST_CONTAINER_ID,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }
}

/// The caller's session. No person id means an anonymous caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub person_id: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn for_person(person_id: impl Into<String>) -> Self {
        Self {
            person_id: Some(person_id.into()),
        }
    }
}

/// Store, remote directory and the list container, built once per process.
pub struct AppContext {
    store: Arc<dyn EntityStore>,
    directory: Arc<dyn RemoteDirectory>,
    list_container: Arc<ListContainer>,
    bsd_host: String,
}

impl AppContext {
    pub fn new(
        store: Arc<dyn EntityStore>,
        directory: Arc<dyn RemoteDirectory>,
        bsd_host: impl Into<String>,
    ) -> Self {
        Self {
            store,
            directory,
            list_container: Arc::new(ListContainer::new()),
            bsd_host: bsd_host.into(),
        }
    }

    pub fn store(&self) -> &dyn EntityStore {
        self.store.as_ref()
    }

    pub fn directory(&self) -> &dyn RemoteDirectory {
        self.directory.as_ref()
    }

    /// The shared list container. Every call returns the same allocation.
    pub fn list_container(&self) -> Arc<ListContainer> {
        Arc::clone(&self.list_container)
    }

    /// Host of the BSD instance public pages are served from.
    pub fn bsd_host(&self) -> &str {
        &self.bsd_host
    }
}
