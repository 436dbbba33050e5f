//! The Relay `Node` interface.

use async_graphql::{Interface, ID};
use gc_core::registry::resolve_type;
use gc_core::Entity;

use super::types::{
    CallAssignmentObject, EventObject, ListContainerObject, PersonObject, SurveyObject,
};

/// An object with a global id.
///
/// Groups have no global id and are not nodes.
#[derive(Interface)]
#[graphql(field(name = "id", ty = "ID", desc = "The ID of an object"))]
pub enum Node {
    Person(PersonObject),
    CallAssignment(CallAssignmentObject),
    Survey(SurveyObject),
    Event(EventObject),
    ListContainer(ListContainerObject),
}

impl Node {
    /// Wrap a resolved entity. Entities whose graph type is not a node yield `None`.
    pub fn from_entity(entity: Entity) -> Option<Self> {
        if !resolve_type(&entity)?.is_node() {
            return None;
        }
        match entity {
            Entity::Person(person) => Some(Self::Person(PersonObject(person))),
            Entity::CallAssignment(assignment) => {
                Some(Self::CallAssignment(CallAssignmentObject(assignment)))
            }
            Entity::Survey(survey) => Some(Self::Survey(SurveyObject(survey))),
            Entity::Event(event) => Some(Self::Event(EventObject(event))),
            Entity::ListContainer(container) => {
                Some(Self::ListContainer(ListContainerObject(container)))
            }
            Entity::Group(_) => None,
        }
    }
}
