//! The entity store contract.

use async_trait::async_trait;

use crate::{
    AssignmentLink, CallAssignmentRow, DbResult, EventDetails, EventRow, GroupRow, NewGroup,
    NewPerson, NewSurvey, PersonRow, SurveyRow,
};

/// Persistence of the locally owned entities.
///
/// Lookups return `Ok(None)` for missing records; only backend failures are
/// errors. Every write is atomic for a single record, but nothing spans
/// records: callers that write several records order them themselves.
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn get_person(&self, id: i64) -> DbResult<Option<PersonRow>>;

    /// Create a person, or refresh the one previously created for the same CRM id.
    async fn upsert_person(&self, person: &NewPerson) -> DbResult<PersonRow>;

    /// People for the given ids in the given order; unknown ids are skipped.
    async fn get_people(&self, ids: &[i64]) -> DbResult<Vec<PersonRow>>;

    async fn create_group(&self, group: &NewGroup) -> DbResult<GroupRow>;

    async fn get_group(&self, id: i64) -> DbResult<Option<GroupRow>>;

    async fn list_groups(&self) -> DbResult<Vec<GroupRow>>;

    async fn add_group_member(&self, group_id: i64, person_id: i64) -> DbResult<GroupRow>;

    /// Create an assignment that is neither linked nor listed yet.
    async fn create_call_assignment(&self, name: &str) -> DbResult<CallAssignmentRow>;

    /// A published assignment. Unpublished ones read as missing.
    async fn get_call_assignment(&self, id: i64) -> DbResult<Option<CallAssignmentRow>>;

    async fn set_call_assignment_link(
        &self,
        id: i64,
        link: AssignmentLink,
        target: Option<i64>,
    ) -> DbResult<()>;

    /// Make an assignment visible to lookups and the top-level list.
    async fn publish_call_assignment(&self, id: i64) -> DbResult<()>;

    /// Published assignments in creation order.
    async fn list_call_assignments(&self) -> DbResult<Vec<CallAssignmentRow>>;

    async fn create_survey(&self, survey: &NewSurvey) -> DbResult<SurveyRow>;

    async fn get_survey(&self, id: i64) -> DbResult<Option<SurveyRow>>;

    async fn get_survey_by_bsd_id(&self, bsd_id: i64) -> DbResult<Option<SurveyRow>>;

    async fn create_event(&self, event: &EventDetails) -> DbResult<EventRow>;

    async fn get_event(&self, id: i64) -> DbResult<Option<EventRow>>;

    async fn list_events(&self) -> DbResult<Vec<EventRow>>;
}
