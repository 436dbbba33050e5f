//! The create-call-assignment workflow.
//!
//! 1. Look up the caller group, the target group and the survey concurrently.
//! 2. Fetch a missing survey's signup form from BSD and materialize it.
//! 3. Create the assignment.
//! 4. Set its three relations concurrently.
//! 5. Publish it to the top-level list.
//!
//! Both joins fail fast on the first error. Nothing spans a store
//! transaction: if step 4 fails the created assignment stays unpublished and
//! is not rolled back.

use std::sync::Arc;

use gc_db::AssignmentLink;
use tracing::{info, warn};

use super::model::CallAssignment;
use crate::context::{AppContext, ListContainer};
use crate::error::{GcError, GcResult, SURVEY_NOT_IN_BSD};
use crate::group::{self, model::Group};
use crate::survey::{self, model::Survey};

/// Input of the create-call-assignment mutation.
///
/// The ids are local ids. `survey_id` also names the BSD signup form to
/// import when no local survey matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCallAssignment {
    pub name: String,
    pub caller_group_id: String,
    pub target_group_id: String,
    pub survey_id: String,
}

/// Result of a successful creation.
#[derive(Debug, Clone)]
pub struct CreatedCallAssignment {
    pub call_assignment: CallAssignment,
    pub list_container: Arc<ListContainer>,
}

fn local_id(id: &str) -> Option<i64> {
    id.trim().parse().ok()
}

async fn lookup_group(ctx: &AppContext, id: Option<i64>) -> GcResult<Option<Group>> {
    match id {
        Some(id) => group::get_group(ctx, id).await,
        None => Ok(None),
    }
}

async fn lookup_survey(ctx: &AppContext, id: Option<i64>) -> GcResult<Option<Survey>> {
    match id {
        Some(id) => survey::get_survey(ctx, id).await,
        None => Ok(None),
    }
}

async fn lookup_survey_by_form(ctx: &AppContext, form_id: Option<i64>) -> GcResult<Option<Survey>> {
    match form_id {
        Some(form_id) => survey::get_survey_by_form(ctx, form_id).await,
        None => Ok(None),
    }
}

/// Import the BSD signup form behind `form_id` as a local survey.
async fn import_survey(ctx: &AppContext, form_id: &str) -> GcResult<Survey> {
    let form = match ctx.directory().get_form(form_id).await {
        Ok(form) => form,
        Err(e) if e.is_conflict() => {
            warn!(survey_id = %form_id, "Survey id does not exist in BSD");
            return Err(GcError::invalid_input(SURVEY_NOT_IN_BSD));
        }
        Err(e) => return Err(e.into()),
    };

    let row = ctx.store().create_survey(&survey::model::from_form(&form)).await?;
    info!(survey_id = row.id, form_id = form.id, slug = %row.slug, "Created survey from BSD form");
    Ok(Survey::from_row(row))
}

/// Create a call assignment linked to its groups and survey.
pub async fn create_call_assignment(
    ctx: &AppContext,
    input: &CreateCallAssignment,
) -> GcResult<CreatedCallAssignment> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(GcError::validation("Call assignment name must not be empty"));
    }

    let survey_local_id = local_id(&input.survey_id);
    let (caller_group, target_group, survey, survey_by_form) = tokio::try_join!(
        lookup_group(ctx, local_id(&input.caller_group_id)),
        lookup_group(ctx, local_id(&input.target_group_id)),
        lookup_survey(ctx, survey_local_id),
        lookup_survey_by_form(ctx, survey_local_id),
    )?;

    // Remote group resolution is disabled: unknown groups are left unset.
    if caller_group.is_none() {
        warn!(caller_group_id = %input.caller_group_id, "Caller group not found locally");
    }
    if target_group.is_none() {
        warn!(target_group_id = %input.target_group_id, "Target group not found locally");
    }

    let survey = match survey.or(survey_by_form) {
        Some(survey) => survey,
        None => import_survey(ctx, &input.survey_id).await?,
    };

    let store = ctx.store();
    let row = store.create_call_assignment(name).await?;

    let caller_group_id = caller_group.as_ref().map(|g| g.id);
    let target_group_id = target_group.as_ref().map(|g| g.id);
    tokio::try_join!(
        store.set_call_assignment_link(row.id, AssignmentLink::CallerGroup, caller_group_id),
        store.set_call_assignment_link(row.id, AssignmentLink::TargetGroup, target_group_id),
        store.set_call_assignment_link(row.id, AssignmentLink::Survey, Some(survey.id)),
    )?;

    store.publish_call_assignment(row.id).await?;

    info!(
        call_assignment_id = row.id,
        name = %name,
        caller_group_id = ?caller_group_id,
        target_group_id = ?target_group_id,
        survey_id = survey.id,
        "Created call assignment"
    );

    Ok(CreatedCallAssignment {
        call_assignment: CallAssignment {
            id: row.id,
            name: row.name,
            caller_group_id,
            target_group_id,
            survey_id: Some(survey.id),
            created_at: row.created_at,
        },
        list_container: ctx.list_container(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call_assignment;
    use crate::node::{resolve_node, Entity};
    use crate::identity::to_global_id;
    use async_trait::async_trait;
    use gc_bsd::{FormRecord, StaticDirectory};
    use gc_db::{
        CallAssignmentRow, DbError, DbResult, EntityStore, EventDetails, EventRow, GroupRow,
        MemoryStore, NewGroup, NewPerson, NewSurvey, PersonRow, SurveyRow,
    };

    /// Memory store whose writes of one relation always fail.
    struct BrokenLinkStore {
        inner: MemoryStore,
        broken: AssignmentLink,
    }

    #[async_trait]
    impl EntityStore for BrokenLinkStore {
        async fn get_person(&self, id: i64) -> DbResult<Option<PersonRow>> {
            self.inner.get_person(id).await
        }
        async fn upsert_person(&self, person: &NewPerson) -> DbResult<PersonRow> {
            self.inner.upsert_person(person).await
        }
        async fn get_people(&self, ids: &[i64]) -> DbResult<Vec<PersonRow>> {
            self.inner.get_people(ids).await
        }
        async fn create_group(&self, group: &NewGroup) -> DbResult<GroupRow> {
            self.inner.create_group(group).await
        }
        async fn get_group(&self, id: i64) -> DbResult<Option<GroupRow>> {
            self.inner.get_group(id).await
        }
        async fn list_groups(&self) -> DbResult<Vec<GroupRow>> {
            self.inner.list_groups().await
        }
        async fn add_group_member(&self, group_id: i64, person_id: i64) -> DbResult<GroupRow> {
            self.inner.add_group_member(group_id, person_id).await
        }
        async fn create_call_assignment(&self, name: &str) -> DbResult<CallAssignmentRow> {
            self.inner.create_call_assignment(name).await
        }
        async fn get_call_assignment(&self, id: i64) -> DbResult<Option<CallAssignmentRow>> {
            self.inner.get_call_assignment(id).await
        }
        async fn set_call_assignment_link(
            &self,
            id: i64,
            link: AssignmentLink,
            target: Option<i64>,
        ) -> DbResult<()> {
            if link == self.broken {
                return Err(DbError::OperationFailed(format!("cannot write {}", link.field())));
            }
            self.inner.set_call_assignment_link(id, link, target).await
        }
        async fn publish_call_assignment(&self, id: i64) -> DbResult<()> {
            self.inner.publish_call_assignment(id).await
        }
        async fn list_call_assignments(&self) -> DbResult<Vec<CallAssignmentRow>> {
            self.inner.list_call_assignments().await
        }
        async fn create_survey(&self, survey: &NewSurvey) -> DbResult<SurveyRow> {
            self.inner.create_survey(survey).await
        }
        async fn get_survey(&self, id: i64) -> DbResult<Option<SurveyRow>> {
            self.inner.get_survey(id).await
        }
        async fn get_survey_by_bsd_id(&self, bsd_id: i64) -> DbResult<Option<SurveyRow>> {
            self.inner.get_survey_by_bsd_id(bsd_id).await
        }
        async fn create_event(&self, event: &EventDetails) -> DbResult<EventRow> {
            self.inner.create_event(event).await
        }
        async fn get_event(&self, id: i64) -> DbResult<Option<EventRow>> {
            self.inner.get_event(id).await
        }
        async fn list_events(&self) -> DbResult<Vec<EventRow>> {
            self.inner.list_events().await
        }
    }

    struct Fixture {
        ctx: AppContext,
        directory: Arc<StaticDirectory>,
        caller: i64,
        target: i64,
    }

    async fn fixture(directory: StaticDirectory) -> Fixture {
        let directory = Arc::new(directory);
        let ctx = AppContext::new(Arc::new(MemoryStore::new()), directory.clone(), "demo.bsd.net");
        let caller = ctx
            .store()
            .create_group(&NewGroup {
                name: Some("Callers".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        let target = ctx
            .store()
            .create_group(&NewGroup {
                name: Some("Targets".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        Fixture {
            ctx,
            directory,
            caller: caller.id,
            target: target.id,
        }
    }

    fn input(f: &Fixture, survey_id: &str) -> CreateCallAssignment {
        CreateCallAssignment {
            name: "Spring Drive".to_string(),
            caller_group_id: f.caller.to_string(),
            target_group_id: f.target.to_string(),
            survey_id: survey_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_creates_fully_linked_assignment() {
        let f = fixture(StaticDirectory::new()).await;
        let local_survey = f
            .ctx
            .store()
            .create_survey(&NewSurvey {
                slug: "spring".to_string(),
                bsd_id: None,
            })
            .await
            .unwrap();

        let created = create_call_assignment(&f.ctx, &input(&f, &local_survey.id.to_string()))
            .await
            .unwrap();
        assert!(Arc::ptr_eq(&created.list_container, &f.ctx.list_container()));
        assert_eq!(f.directory.form_requests(), 0);

        let node = resolve_node(&f.ctx, &created.call_assignment.global_id())
            .await
            .unwrap();
        let Some(Entity::CallAssignment(assignment)) = node else {
            panic!("expected call assignment");
        };
        assert_eq!(assignment.name, "Spring Drive");

        let caller = call_assignment::caller_group(&f.ctx, &assignment).await.unwrap();
        let target = call_assignment::target_group(&f.ctx, &assignment).await.unwrap();
        let survey = call_assignment::survey(&f.ctx, &assignment).await.unwrap();
        assert_eq!(caller.map(|g| g.id), Some(f.caller));
        assert_eq!(target.map(|g| g.id), Some(f.target));
        assert_eq!(survey.map(|s| s.id), Some(local_survey.id));

        let listed = call_assignment::list_call_assignments(&f.ctx).await.unwrap();
        assert_eq!(listed, vec![assignment]);
    }

    #[tokio::test]
    async fn test_imports_missing_survey_from_bsd() {
        let directory = StaticDirectory::new().with_form(FormRecord {
            id: 8100,
            name: Some("Phonebank Survey".to_string()),
            slug: "phonebank-survey".to_string(),
        });
        let f = fixture(directory).await;

        let created = create_call_assignment(&f.ctx, &input(&f, "8100")).await.unwrap();
        let survey = call_assignment::survey(&f.ctx, &created.call_assignment)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(survey.slug, "phonebank-survey");
        assert_eq!(survey.bsd_id, Some(8100));

        // A second assignment on the same form reuses the imported survey.
        create_call_assignment(&f.ctx, &input(&f, "8100")).await.unwrap();
        assert_eq!(f.directory.form_requests(), 1);
    }

    #[tokio::test]
    async fn test_unknown_survey_is_invalid_input() {
        let f = fixture(StaticDirectory::new()).await;

        let err = create_call_assignment(&f.ctx, &input(&f, "404404")).await.unwrap_err();
        match err {
            GcError::InvalidInput { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Provided Survey ID does not exist in BSD.");
            }
            other => panic!("expected invalid input, got {:?}", other),
        }
        assert!(call_assignment::list_call_assignments(&f.ctx).await.unwrap().is_empty());
        assert!(call_assignment::get_call_assignment(&f.ctx, f.target + 1)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_other_remote_failures_propagate() {
        let f = fixture(StaticDirectory::new().with_form_failure("77", 503)).await;

        let err = create_call_assignment(&f.ctx, &input(&f, "77")).await.unwrap_err();
        assert!(matches!(err, GcError::Remote(ref e) if e.status() == Some(503)));
        assert!(call_assignment::list_call_assignments(&f.ctx).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_groups_are_left_unset() {
        let directory = StaticDirectory::new().with_form(FormRecord {
            id: 5,
            name: None,
            slug: "s".to_string(),
        });
        let f = fixture(directory).await;
        let mut request = input(&f, "5");
        request.caller_group_id = "bsd-group-1".to_string();

        let created = create_call_assignment(&f.ctx, &request).await.unwrap();
        assert_eq!(created.call_assignment.caller_group_id, None);
        assert_eq!(created.call_assignment.target_group_id, Some(f.target));
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected() {
        let f = fixture(StaticDirectory::new()).await;
        let mut request = input(&f, "1");
        request.name = "   ".to_string();

        let err = create_call_assignment(&f.ctx, &request).await.unwrap_err();
        assert!(matches!(err, GcError::ValidationError(_)));
        assert_eq!(f.directory.form_requests(), 0);
    }

    #[tokio::test]
    async fn test_failed_link_write_is_fatal() {
        for broken in [
            AssignmentLink::CallerGroup,
            AssignmentLink::TargetGroup,
            AssignmentLink::Survey,
        ] {
            let store = BrokenLinkStore {
                inner: MemoryStore::new(),
                broken,
            };
            let caller = store.create_group(&NewGroup::default()).await.unwrap();
            let target = store.create_group(&NewGroup::default()).await.unwrap();
            let survey = store
                .create_survey(&NewSurvey {
                    slug: "s".to_string(),
                    bsd_id: None,
                })
                .await
                .unwrap();
            let ctx = AppContext::new(Arc::new(store), Arc::new(StaticDirectory::new()), "demo.bsd.net");

            let request = CreateCallAssignment {
                name: "Spring Drive".to_string(),
                caller_group_id: caller.id.to_string(),
                target_group_id: target.id.to_string(),
                survey_id: survey.id.to_string(),
            };
            let err = create_call_assignment(&ctx, &request).await.unwrap_err();
            assert!(matches!(err, GcError::Database(DbError::OperationFailed(_))));

            assert!(call_assignment::list_call_assignments(&ctx).await.unwrap().is_empty());
            // The record created before the failed link write is the next id.
            let orphan = to_global_id("CallAssignment", &(survey.id + 1).to_string());
            assert!(resolve_node(&ctx, &orphan).await.unwrap().is_none());
            assert!(call_assignment::find_by_global_id(&ctx, &orphan)
                .await
                .unwrap()
                .is_none());
        }
    }

    #[tokio::test]
    async fn test_in_flight_assignment_is_invisible() {
        let f = fixture(StaticDirectory::new()).await;
        let store = f.ctx.store();
        let row = store.create_call_assignment("Half linked").await.unwrap();
        store
            .set_call_assignment_link(row.id, AssignmentLink::CallerGroup, Some(f.caller))
            .await
            .unwrap();

        let global_id = to_global_id("CallAssignment", &row.id.to_string());
        assert!(resolve_node(&f.ctx, &global_id).await.unwrap().is_none());
        assert!(call_assignment::find_by_global_id(&f.ctx, &global_id)
            .await
            .unwrap()
            .is_none());

        store.publish_call_assignment(row.id).await.unwrap();
        assert!(resolve_node(&f.ctx, &global_id).await.unwrap().is_some());
    }
}
