//! Graph object types.

use std::sync::Arc;

use async_graphql::connection::Connection;
use async_graphql::{Context, Object, Result, ID};
use gc_core::call_assignment::{self, model::CallAssignment};
use gc_core::event::{self, model::Event};
use gc_core::group::{self, model::Group};
use gc_core::identity::to_global_id;
use gc_core::person::model::Person;
use gc_core::survey::model::Survey;
use gc_core::{GraphType, ListContainer};

use super::{app, connection_args, graphql_error, into_connection};

/// A person.
pub struct PersonObject(pub Person);

#[Object(name = "Person")]
impl PersonObject {
    pub(crate) async fn id(&self) -> ID {
        ID(self.0.global_id())
    }

    async fn first_name(&self) -> Option<&str> {
        self.0.first_name.as_deref()
    }

    async fn middle_name(&self) -> Option<&str> {
        self.0.middle_name.as_deref()
    }

    async fn last_name(&self) -> Option<&str> {
        self.0.last_name.as_deref()
    }

    async fn has_password(&self) -> bool {
        self.0.has_password()
    }

    /// Every call assignment, not only the ones this person takes part in.
    async fn call_assignment_list(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<Connection<String, CallAssignmentObject>> {
        let args = connection_args(first, after, last, before);
        let page = call_assignment::call_assignment_list(app(ctx)?, &args)
            .await
            .map_err(graphql_error)?;
        Ok(into_connection(page, CallAssignmentObject))
    }
}

/// A list of people as determined by some criteria
pub struct GroupObject(pub Group);

#[Object(name = "Group")]
impl GroupObject {
    async fn person_list(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<Connection<String, PersonObject>> {
        let args = connection_args(first, after, last, before);
        let page = group::person_list(app(ctx)?, &self.0, &args)
            .await
            .map_err(graphql_error)?;
        Ok(into_connection(page, PersonObject))
    }
}

/// A mass calling assignment
pub struct CallAssignmentObject(pub CallAssignment);

#[Object(name = "CallAssignment")]
impl CallAssignmentObject {
    pub(crate) async fn id(&self) -> ID {
        ID(self.0.global_id())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn caller_group(&self, ctx: &Context<'_>) -> Result<Option<GroupObject>> {
        let group = call_assignment::caller_group(app(ctx)?, &self.0)
            .await
            .map_err(graphql_error)?;
        Ok(group.map(GroupObject))
    }

    async fn target_group(&self, ctx: &Context<'_>) -> Result<Option<GroupObject>> {
        let group = call_assignment::target_group(app(ctx)?, &self.0)
            .await
            .map_err(graphql_error)?;
        Ok(group.map(GroupObject))
    }

    async fn survey(&self, ctx: &Context<'_>) -> Result<Option<SurveyObject>> {
        let survey = call_assignment::survey(app(ctx)?, &self.0)
            .await
            .map_err(graphql_error)?;
        Ok(survey.map(SurveyObject))
    }

    /// A random person from the target group for the given caller to phone.
    async fn target_for_user(
        &self,
        ctx: &Context<'_>,
        person_id: Option<String>,
    ) -> Result<Option<PersonObject>> {
        let person = call_assignment::target_for_user(app(ctx)?, &self.0, person_id.as_deref())
            .await
            .map_err(graphql_error)?;
        Ok(person.map(PersonObject))
    }
}

/// A survey to be filled out by a person
pub struct SurveyObject(pub Survey);

#[Object(name = "Survey")]
impl SurveyObject {
    pub(crate) async fn id(&self) -> ID {
        ID(self.0.global_id())
    }

    async fn slug(&self) -> &str {
        &self.0.slug
    }

    #[graphql(name = "fullURL")]
    async fn full_url(&self, ctx: &Context<'_>) -> Result<String> {
        let app = app(ctx)?;
        self.0.full_url(app.bsd_host()).map_err(graphql_error)
    }
}

/// An event
pub struct EventObject(pub Event);

#[Object(name = "Event")]
impl EventObject {
    pub(crate) async fn id(&self) -> ID {
        ID(self.0.global_id())
    }

    #[graphql(name = "BSDId")]
    async fn bsd_id(&self) -> Option<i32> {
        self.0.details.bsd_id
    }

    async fn event_id_obfuscated(&self) -> Option<&str> {
        self.0.details.event_id_obfuscated.as_deref()
    }

    async fn flag_approval(&self) -> Option<bool> {
        self.0.details.flag_approval
    }

    async fn event_type_id(&self) -> Option<i32> {
        self.0.details.event_type_id
    }

    async fn creator_cons_id(&self) -> Option<i32> {
        self.0.details.creator_cons_id
    }

    async fn name(&self) -> Option<&str> {
        self.0.details.name.as_deref()
    }

    async fn description(&self) -> Option<&str> {
        self.0.details.description.as_deref()
    }

    async fn venue_name(&self) -> Option<&str> {
        self.0.details.venue_name.as_deref()
    }

    async fn venue_zip(&self) -> Option<&str> {
        self.0.details.venue_zip.as_deref()
    }

    async fn venue_city(&self) -> Option<&str> {
        self.0.details.venue_city.as_deref()
    }

    async fn venue_state(&self) -> Option<&str> {
        self.0.details.venue_state.as_deref()
    }

    #[graphql(name = "venueAddr1")]
    async fn venue_addr1(&self) -> Option<&str> {
        self.0.details.venue_addr1.as_deref()
    }

    #[graphql(name = "venueAddr2")]
    async fn venue_addr2(&self) -> Option<&str> {
        self.0.details.venue_addr2.as_deref()
    }

    async fn venue_country(&self) -> Option<&str> {
        self.0.details.venue_country.as_deref()
    }

    async fn venue_directions(&self) -> Option<&str> {
        self.0.details.venue_directions.as_deref()
    }

    async fn local_timezone(&self) -> Option<&str> {
        self.0.details.local_timezone.as_deref()
    }

    async fn start_datetime(&self) -> Option<&str> {
        self.0.details.start_datetime.as_deref()
    }

    async fn duration(&self) -> Option<i32> {
        self.0.details.duration
    }

    async fn capacity(&self) -> Option<i32> {
        self.0.details.capacity
    }

    async fn attendee_volunteer_show(&self) -> Option<bool> {
        self.0.details.attendee_volunteer_show
    }

    async fn attendee_volunteer_message(&self) -> Option<&str> {
        self.0.details.attendee_volunteer_message.as_deref()
    }

    async fn is_searchable(&self) -> Option<i32> {
        self.0.details.is_searchable
    }

    async fn public_phone(&self) -> Option<bool> {
        self.0.details.public_phone
    }

    async fn contact_phone(&self) -> Option<&str> {
        self.0.details.contact_phone.as_deref()
    }

    async fn host_receive_rsvp_emails(&self) -> Option<bool> {
        self.0.details.host_receive_rsvp_emails
    }

    async fn rsvp_use_reminder_email(&self) -> Option<bool> {
        self.0.details.rsvp_use_reminder_email
    }

    async fn rsvp_reminder_hours(&self) -> Option<i32> {
        self.0.details.rsvp_reminder_hours
    }
}

/// Root anchor for the top-level lists.
pub struct ListContainerObject(pub Arc<ListContainer>);

#[Object(name = "ListContainer")]
impl ListContainerObject {
    pub(crate) async fn id(&self) -> ID {
        ID(to_global_id(
            GraphType::ListContainer.name(),
            &self.0.id().to_string(),
        ))
    }

    async fn event_list(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<Connection<String, EventObject>> {
        let args = connection_args(first, after, last, before);
        let page = event::event_list(app(ctx)?, &args)
            .await
            .map_err(graphql_error)?;
        Ok(into_connection(page, EventObject))
    }

    async fn call_assignment_list(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<Connection<String, CallAssignmentObject>> {
        let args = connection_args(first, after, last, before);
        let page = call_assignment::call_assignment_list(app(ctx)?, &args)
            .await
            .map_err(graphql_error)?;
        Ok(into_connection(page, CallAssignmentObject))
    }
}
