//! Redis-backed entity store.

use async_trait::async_trait;
use gc_redis::{call_assignments, events, groups, people, surveys};

use crate::store::EntityStore;
use crate::{
    AssignmentLink, CallAssignmentRow, DbPool, DbResult, EventDetails, EventRow, GroupRow,
    NewGroup, NewPerson, NewSurvey, PersonRow, SurveyRow,
};

/// Entity store over a shared Redis connection manager.
#[derive(Clone)]
pub struct RedisStore {
    pool: DbPool,
}

impl RedisStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl EntityStore for RedisStore {
    async fn get_person(&self, id: i64) -> DbResult<Option<PersonRow>> {
        people::get_person(&self.pool, id).await
    }

    async fn upsert_person(&self, person: &NewPerson) -> DbResult<PersonRow> {
        people::upsert_person(&self.pool, person).await
    }

    async fn get_people(&self, ids: &[i64]) -> DbResult<Vec<PersonRow>> {
        people::get_people(&self.pool, ids).await
    }

    async fn create_group(&self, group: &NewGroup) -> DbResult<GroupRow> {
        groups::create_group(&self.pool, group).await
    }

    async fn get_group(&self, id: i64) -> DbResult<Option<GroupRow>> {
        groups::get_group(&self.pool, id).await
    }

    async fn list_groups(&self) -> DbResult<Vec<GroupRow>> {
        groups::list_groups(&self.pool).await
    }

    async fn add_group_member(&self, group_id: i64, person_id: i64) -> DbResult<GroupRow> {
        groups::add_person(&self.pool, group_id, person_id).await
    }

    async fn create_call_assignment(&self, name: &str) -> DbResult<CallAssignmentRow> {
        call_assignments::create_call_assignment(&self.pool, name).await
    }

    async fn get_call_assignment(&self, id: i64) -> DbResult<Option<CallAssignmentRow>> {
        call_assignments::get_call_assignment(&self.pool, id).await
    }

    async fn set_call_assignment_link(
        &self,
        id: i64,
        link: AssignmentLink,
        target: Option<i64>,
    ) -> DbResult<()> {
        call_assignments::set_link(&self.pool, id, link, target).await
    }

    async fn publish_call_assignment(&self, id: i64) -> DbResult<()> {
        call_assignments::publish_call_assignment(&self.pool, id).await
    }

    async fn list_call_assignments(&self) -> DbResult<Vec<CallAssignmentRow>> {
        call_assignments::list_call_assignments(&self.pool).await
    }

    async fn create_survey(&self, survey: &NewSurvey) -> DbResult<SurveyRow> {
        surveys::create_survey(&self.pool, survey).await
    }

    async fn get_survey(&self, id: i64) -> DbResult<Option<SurveyRow>> {
        surveys::get_survey(&self.pool, id).await
    }

    async fn get_survey_by_bsd_id(&self, bsd_id: i64) -> DbResult<Option<SurveyRow>> {
        surveys::get_survey_by_bsd_id(&self.pool, bsd_id).await
    }

    async fn create_event(&self, event: &EventDetails) -> DbResult<EventRow> {
        events::create_event(&self.pool, event).await
    }

    async fn get_event(&self, id: i64) -> DbResult<Option<EventRow>> {
        events::get_event(&self.pool, id).await
    }

    async fn list_events(&self) -> DbResult<Vec<EventRow>> {
        events::list_events(&self.pool).await
    }
}
