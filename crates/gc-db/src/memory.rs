//! In-memory entity store, used by tests and `serve --memory`.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::store::EntityStore;
use crate::{
    AssignmentLink, CallAssignmentRow, DbError, DbResult, EventDetails, EventRow, GroupRow,
    NewGroup, NewPerson, NewSurvey, PersonRow, SurveyRow,
};

#[derive(Default)]
struct State {
    last_id: i64,
    people: BTreeMap<i64, PersonRow>,
    people_by_bsd: HashMap<i64, i64>,
    groups: BTreeMap<i64, GroupRow>,
    assignments: BTreeMap<i64, CallAssignmentRow>,
    published: Vec<i64>,
    surveys: BTreeMap<i64, SurveyRow>,
    surveys_by_bsd: HashMap<i64, i64>,
    events: BTreeMap<i64, EventRow>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

/// Entity store kept entirely in process memory.
///
/// Ids come from a single counter shared by all kinds, so ids never repeat
/// across entity types.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn get_person(&self, id: i64) -> DbResult<Option<PersonRow>> {
        Ok(self.state.read().await.people.get(&id).cloned())
    }

    async fn upsert_person(&self, person: &NewPerson) -> DbResult<PersonRow> {
        let mut state = self.state.write().await;

        let existing = person
            .bsd_id
            .and_then(|bsd_id| state.people_by_bsd.get(&bsd_id).copied());
        if let Some(id) = existing {
            if let Some(row) = state.people.get_mut(&id) {
                row.first_name = person.first_name.clone();
                row.middle_name = person.middle_name.clone();
                row.last_name = person.last_name.clone();
                row.email = person.email.clone().or(row.email.take());
                row.updated_at = now();
                return Ok(row.clone());
            }
        }

        let id = state.next_id();
        let row = PersonRow {
            id,
            bsd_id: person.bsd_id,
            first_name: person.first_name.clone(),
            middle_name: person.middle_name.clone(),
            last_name: person.last_name.clone(),
            email: person.email.clone(),
            created_at: now(),
            updated_at: now(),
        };
        if let Some(bsd_id) = row.bsd_id {
            state.people_by_bsd.insert(bsd_id, id);
        }
        state.people.insert(id, row.clone());
        Ok(row)
    }

    async fn get_people(&self, ids: &[i64]) -> DbResult<Vec<PersonRow>> {
        let state = self.state.read().await;
        Ok(ids.iter().filter_map(|id| state.people.get(id).cloned()).collect())
    }

    async fn create_group(&self, group: &NewGroup) -> DbResult<GroupRow> {
        let mut state = self.state.write().await;
        let id = state.next_id();
        let row = GroupRow {
            id,
            name: group.name.clone(),
            bsd_id: group.bsd_id,
            person_ids: group.person_ids.clone(),
            created_at: now(),
        };
        state.groups.insert(id, row.clone());
        Ok(row)
    }

    async fn get_group(&self, id: i64) -> DbResult<Option<GroupRow>> {
        Ok(self.state.read().await.groups.get(&id).cloned())
    }

    async fn list_groups(&self) -> DbResult<Vec<GroupRow>> {
        Ok(self.state.read().await.groups.values().cloned().collect())
    }

    async fn add_group_member(&self, group_id: i64, person_id: i64) -> DbResult<GroupRow> {
        let mut state = self.state.write().await;
        let row = state
            .groups
            .get_mut(&group_id)
            .ok_or_else(|| DbError::NotFound(format!("Group not found: {}", group_id)))?;
        if !row.person_ids.contains(&person_id) {
            row.person_ids.push(person_id);
        }
        Ok(row.clone())
    }

    async fn create_call_assignment(&self, name: &str) -> DbResult<CallAssignmentRow> {
        let mut state = self.state.write().await;
        let id = state.next_id();
        let row = CallAssignmentRow {
            id,
            name: name.to_string(),
            caller_group_id: None,
            target_group_id: None,
            survey_id: None,
            created_at: now(),
        };
        state.assignments.insert(id, row.clone());
        Ok(row)
    }

    async fn get_call_assignment(&self, id: i64) -> DbResult<Option<CallAssignmentRow>> {
        let state = self.state.read().await;
        if !state.published.contains(&id) {
            return Ok(None);
        }
        Ok(state.assignments.get(&id).cloned())
    }

    async fn set_call_assignment_link(
        &self,
        id: i64,
        link: AssignmentLink,
        target: Option<i64>,
    ) -> DbResult<()> {
        let mut state = self.state.write().await;
        let row = state
            .assignments
            .get_mut(&id)
            .ok_or_else(|| DbError::NotFound(format!("Call assignment not found: {}", id)))?;
        match link {
            AssignmentLink::CallerGroup => row.caller_group_id = target,
            AssignmentLink::TargetGroup => row.target_group_id = target,
            AssignmentLink::Survey => row.survey_id = target,
        }
        Ok(())
    }

    async fn publish_call_assignment(&self, id: i64) -> DbResult<()> {
        let mut state = self.state.write().await;
        if !state.published.contains(&id) {
            state.published.push(id);
        }
        Ok(())
    }

    async fn list_call_assignments(&self) -> DbResult<Vec<CallAssignmentRow>> {
        let state = self.state.read().await;
        Ok(state
            .published
            .iter()
            .filter_map(|id| state.assignments.get(id).cloned())
            .collect())
    }

    async fn create_survey(&self, survey: &NewSurvey) -> DbResult<SurveyRow> {
        let mut state = self.state.write().await;
        if let Some(existing) = survey
            .bsd_id
            .and_then(|bsd_id| state.surveys_by_bsd.get(&bsd_id))
            .and_then(|id| state.surveys.get(id))
        {
            return Ok(existing.clone());
        }
        let id = state.next_id();
        let row = SurveyRow {
            id,
            slug: survey.slug.clone(),
            bsd_id: survey.bsd_id,
            created_at: now(),
        };
        if let Some(bsd_id) = row.bsd_id {
            state.surveys_by_bsd.insert(bsd_id, id);
        }
        state.surveys.insert(id, row.clone());
        Ok(row)
    }

    async fn get_survey(&self, id: i64) -> DbResult<Option<SurveyRow>> {
        Ok(self.state.read().await.surveys.get(&id).cloned())
    }

    async fn get_survey_by_bsd_id(&self, bsd_id: i64) -> DbResult<Option<SurveyRow>> {
        let state = self.state.read().await;
        Ok(state
            .surveys_by_bsd
            .get(&bsd_id)
            .and_then(|id| state.surveys.get(id))
            .cloned())
    }

    async fn create_event(&self, event: &EventDetails) -> DbResult<EventRow> {
        let mut state = self.state.write().await;
        let id = state.next_id();
        let row = EventRow {
            id,
            details: event.clone(),
            created_at: now(),
        };
        state.events.insert(id, row.clone());
        Ok(row)
    }

    async fn get_event(&self, id: i64) -> DbResult<Option<EventRow>> {
        Ok(self.state.read().await.events.get(&id).cloned())
    }

    async fn list_events(&self) -> DbResult<Vec<EventRow>> {
        Ok(self.state.read().await.events.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constituent(bsd_id: i64, first: &str) -> NewPerson {
        NewPerson {
            bsd_id: Some(bsd_id),
            first_name: Some(first.to_string()),
            last_name: Some("Sanders".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_upsert_person_reuses_crm_identity() {
        let store = MemoryStore::new();
        let first = store.upsert_person(&constituent(42, "Bernie")).await.unwrap();
        let second = store.upsert_person(&constituent(42, "Bernard")).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.first_name.as_deref(), Some("Bernard"));
        assert_eq!(store.get_person(first.id).await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn test_unpublished_assignment_is_invisible() {
        let store = MemoryStore::new();
        let row = store.create_call_assignment("Spring Drive").await.unwrap();

        store
            .set_call_assignment_link(row.id, AssignmentLink::CallerGroup, Some(7))
            .await
            .unwrap();
        assert!(store.list_call_assignments().await.unwrap().is_empty());
        assert!(store.get_call_assignment(row.id).await.unwrap().is_none());

        store.publish_call_assignment(row.id).await.unwrap();
        store.publish_call_assignment(row.id).await.unwrap();
        let listed = store.list_call_assignments().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Spring Drive");
        assert_eq!(store.get_call_assignment(row.id).await.unwrap(), Some(listed[0].clone()));
    }

    #[tokio::test]
    async fn test_links_are_independent() {
        let store = MemoryStore::new();
        let row = store.create_call_assignment("Phonebank").await.unwrap();

        let (a, b, c) = tokio::join!(
            store.set_call_assignment_link(row.id, AssignmentLink::CallerGroup, Some(7)),
            store.set_call_assignment_link(row.id, AssignmentLink::TargetGroup, Some(8)),
            store.set_call_assignment_link(row.id, AssignmentLink::Survey, Some(9)),
        );
        a.unwrap();
        b.unwrap();
        c.unwrap();
        store.publish_call_assignment(row.id).await.unwrap();

        let linked = store.get_call_assignment(row.id).await.unwrap().unwrap();
        assert_eq!(linked.caller_group_id, Some(7));
        assert_eq!(linked.target_group_id, Some(8));
        assert_eq!(linked.survey_id, Some(9));
    }

    #[tokio::test]
    async fn test_link_on_missing_assignment_fails() {
        let store = MemoryStore::new();
        let err = store
            .set_call_assignment_link(99, AssignmentLink::Survey, Some(1))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_group_members_keep_order() {
        let store = MemoryStore::new();
        let a = store.upsert_person(&constituent(1, "Ada")).await.unwrap();
        let b = store.upsert_person(&constituent(2, "Bo")).await.unwrap();
        let group = store
            .create_group(&NewGroup {
                name: Some("Callers".to_string()),
                person_ids: vec![b.id],
                ..Default::default()
            })
            .await
            .unwrap();

        store.add_group_member(group.id, a.id).await.unwrap();
        let group = store.add_group_member(group.id, a.id).await.unwrap();
        assert_eq!(group.person_ids, vec![b.id, a.id]);

        let people = store.get_people(&[b.id, 1000, a.id]).await.unwrap();
        assert_eq!(people.len(), 2);
        assert_eq!(people[0].first_name.as_deref(), Some("Bo"));
    }

    #[tokio::test]
    async fn test_survey_lookup_by_bsd_id() {
        let store = MemoryStore::new();
        let survey = store
            .create_survey(&NewSurvey {
                slug: "call-survey".to_string(),
                bsd_id: Some(300),
            })
            .await
            .unwrap();

        assert_eq!(store.get_survey_by_bsd_id(300).await.unwrap(), Some(survey.clone()));
        assert_eq!(store.get_survey_by_bsd_id(301).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_concurrent_imports_share_one_row() {
        let store = MemoryStore::new();
        let form = NewSurvey {
            slug: "call-survey".to_string(),
            bsd_id: Some(300),
        };
        let (a, b) = tokio::join!(store.create_survey(&form), store.create_survey(&form));
        assert_eq!(a.unwrap().id, b.unwrap().id);

        let bernie = constituent(42, "Bernie");
        let bernard = constituent(42, "Bernard");
        let (a, b) = tokio::join!(
            store.upsert_person(&bernie),
            store.upsert_person(&bernard),
        );
        assert_eq!(a.unwrap().id, b.unwrap().id);
    }
}
