//! Node resolution: from a global id to a typed entity.

use std::sync::Arc;

use tracing::debug;

use crate::call_assignment::{self, model::CallAssignment};
use crate::context::{AppContext, ListContainer};
use crate::error::GcResult;
use crate::event::{self, model::Event};
use crate::group::{self, model::Group};
use crate::identity::from_global_id;
use crate::person::{self, model::Person};
use crate::registry::GraphType;
use crate::survey::{self, model::Survey};

/// Any entity reachable through the graph.
#[derive(Debug, Clone)]
pub enum Entity {
    Person(Person),
    Group(Group),
    CallAssignment(CallAssignment),
    Survey(Survey),
    Event(Event),
    ListContainer(Arc<ListContainer>),
}

impl Entity {
    /// Public graph type of this entity.
    pub fn graph_type(&self) -> GraphType {
        match self {
            Self::Person(_) => GraphType::Person,
            Self::Group(_) => GraphType::Group,
            Self::CallAssignment(_) => GraphType::CallAssignment,
            Self::Survey(_) => GraphType::Survey,
            Self::Event(_) => GraphType::Event,
            Self::ListContainer(_) => GraphType::ListContainer,
        }
    }
}

/// Resolve a global id to the entity it names.
///
/// Only a malformed id is an error. Unknown type names, non-numeric local ids
/// and missing records all resolve to `None`.
pub async fn resolve_node(ctx: &AppContext, global_id: &str) -> GcResult<Option<Entity>> {
    let id = from_global_id(global_id)?;

    let Some(graph_type) = GraphType::from_name(&id.type_name) else {
        debug!(type_name = %id.type_name, "Unknown node type");
        return Ok(None);
    };

    if graph_type == GraphType::ListContainer {
        return Ok(Some(Entity::ListContainer(ctx.list_container())));
    }

    let Some(local_id) = id.numeric_id() else {
        return Ok(None);
    };

    let entity = match graph_type {
        GraphType::Person => person::get_person(ctx, local_id).await?.map(Entity::Person),
        GraphType::Group => group::get_group(ctx, local_id).await?.map(Entity::Group),
        GraphType::CallAssignment => call_assignment::get_call_assignment(ctx, local_id)
            .await?
            .map(Entity::CallAssignment),
        GraphType::Survey => survey::get_survey(ctx, local_id).await?.map(Entity::Survey),
        GraphType::Event => event::get_event(ctx, local_id).await?.map(Entity::Event),
        GraphType::ListContainer => Some(Entity::ListContainer(ctx.list_container())),
    };
    Ok(entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::to_global_id;
    use crate::GcError;
    use gc_bsd::StaticDirectory;
    use gc_db::{EventDetails, MemoryStore, NewGroup, NewPerson};

    fn context() -> AppContext {
        AppContext::new(
            Arc::new(MemoryStore::new()),
            Arc::new(StaticDirectory::new()),
            "demo.bsd.net",
        )
    }

    #[tokio::test]
    async fn test_resolves_each_stored_type() {
        let ctx = context();
        let person = ctx
            .store()
            .upsert_person(&NewPerson {
                first_name: Some("Ada".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        let group = ctx.store().create_group(&NewGroup::default()).await.unwrap();
        let event = ctx
            .store()
            .create_event(&EventDetails {
                name: Some("Rally".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let found = resolve_node(&ctx, &to_global_id("Person", &person.id.to_string()))
            .await
            .unwrap();
        assert!(matches!(found, Some(Entity::Person(p)) if p.id == person.id));

        let found = resolve_node(&ctx, &to_global_id("Group", &group.id.to_string()))
            .await
            .unwrap();
        assert!(matches!(found, Some(Entity::Group(g)) if g.id == group.id));

        let found = resolve_node(&ctx, &to_global_id("Event", &event.id.to_string()))
            .await
            .unwrap();
        assert_eq!(found.map(|e| e.graph_type()), Some(GraphType::Event));
    }

    #[tokio::test]
    async fn test_missing_and_unknown_resolve_to_none() {
        let ctx = context();
        for global_id in [
            to_global_id("Person", "999"),
            to_global_id("Survey", "abc"),
            to_global_id("Call", "1"),
            to_global_id("Widget", "1"),
        ] {
            assert!(resolve_node(&ctx, &global_id).await.unwrap().is_none());
        }
    }

    #[tokio::test]
    async fn test_list_container_is_the_singleton() {
        let ctx = context();
        let found = resolve_node(&ctx, &to_global_id("ListContainer", "1"))
            .await
            .unwrap();
        match found {
            Some(Entity::ListContainer(container)) => {
                assert!(Arc::ptr_eq(&container, &ctx.list_container()))
            }
            other => panic!("expected list container, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_id_is_an_error() {
        let ctx = context();
        let err = resolve_node(&ctx, "%%%").await.unwrap_err();
        assert!(matches!(err, GcError::MalformedId(_)));
    }
}
