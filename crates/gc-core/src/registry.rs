//! Type resolution: which public graph type a runtime value belongs to.

use std::any::{Any, TypeId};
use std::sync::Arc;

use crate::call_assignment::model::CallAssignment;
use crate::context::ListContainer;
use crate::event::model::Event;
use crate::group::model::Group;
use crate::node::Entity;
use crate::person::model::Person;
use crate::survey::model::Survey;

/// The closed set of public graph types backed by entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphType {
    Person,
    Group,
    CallAssignment,
    Survey,
    Event,
    ListContainer,
}

impl GraphType {
    pub const ALL: [GraphType; 6] = [
        Self::Person,
        Self::Group,
        Self::CallAssignment,
        Self::Survey,
        Self::Event,
        Self::ListContainer,
    ];

    /// Schema name, also the type part of global ids.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Person => "Person",
            Self::Group => "Group",
            Self::CallAssignment => "CallAssignment",
            Self::Survey => "Survey",
            Self::Event => "Event",
            Self::ListContainer => "ListContainer",
        }
    }

    /// Parse a schema name. Unknown names are `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Whether the type implements the `Node` interface. Groups have no id.
    pub fn is_node(&self) -> bool {
        !matches!(self, Self::Group)
    }
}

/// Resolve the graph type of a runtime value.
///
/// Accepts an [`Entity`] or a bare model value and dispatches on the value's
/// concrete type tag, never on its shape. Anything else is `None`.
pub fn resolve_type(value: &dyn Any) -> Option<GraphType> {
    if let Some(entity) = value.downcast_ref::<Entity>() {
        return Some(entity.graph_type());
    }

    let tag = value.type_id();
    if tag == TypeId::of::<Person>() {
        Some(GraphType::Person)
    } else if tag == TypeId::of::<Group>() {
        Some(GraphType::Group)
    } else if tag == TypeId::of::<CallAssignment>() {
        Some(GraphType::CallAssignment)
    } else if tag == TypeId::of::<Survey>() {
        Some(GraphType::Survey)
    } else if tag == TypeId::of::<Event>() {
        Some(GraphType::Event)
    } else if tag == TypeId::of::<ListContainer>() || tag == TypeId::of::<Arc<ListContainer>>() {
        Some(GraphType::ListContainer)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(id: i64) -> Person {
        Person {
            id,
            bsd_id: None,
            first_name: Some("Ada".to_string()),
            middle_name: None,
            last_name: None,
            email: None,
        }
    }

    fn group(id: i64) -> Group {
        Group {
            id,
            name: None,
            bsd_id: None,
            person_ids: vec![],
        }
    }

    #[test]
    fn test_same_variant_same_type() {
        assert_eq!(resolve_type(&person(1)), Some(GraphType::Person));
        assert_eq!(resolve_type(&person(2)), Some(GraphType::Person));
        assert_eq!(resolve_type(&Entity::Person(person(3))), Some(GraphType::Person));
    }

    #[test]
    fn test_overlapping_shapes_stay_distinct() {
        // A group and a person can both be "a thing with an id"; only the tag counts.
        assert_eq!(resolve_type(&group(1)), Some(GraphType::Group));
        assert_ne!(resolve_type(&group(1)), resolve_type(&person(1)));
    }

    #[test]
    fn test_distinct_types_per_variant() {
        let survey = Survey {
            id: 1,
            slug: "s".to_string(),
            bsd_id: None,
        };
        let assignment = CallAssignment {
            id: 1,
            name: "a".to_string(),
            caller_group_id: None,
            target_group_id: None,
            survey_id: None,
            created_at: String::new(),
        };
        let event = Event {
            id: 1,
            details: Default::default(),
        };
        let resolved = [
            resolve_type(&person(1)),
            resolve_type(&group(1)),
            resolve_type(&assignment),
            resolve_type(&survey),
            resolve_type(&event),
        ];
        for (i, a) in resolved.iter().enumerate() {
            assert!(a.is_some());
            for b in &resolved[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_unknown_values() {
        assert_eq!(resolve_type(&42_i64), None);
        assert_eq!(resolve_type(&"Person".to_string()), None);
    }

    #[test]
    fn test_names_round_trip() {
        for graph_type in GraphType::ALL {
            assert_eq!(GraphType::from_name(graph_type.name()), Some(graph_type));
        }
        assert_eq!(GraphType::from_name("Call"), None);
        assert!(!GraphType::Group.is_node());
        assert!(GraphType::ListContainer.is_node());
    }
}
