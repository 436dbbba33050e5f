//! Root query.

use async_graphql::{Context, Object, Result, ID};
use gc_core::node::resolve_node;
use gc_core::{call_assignment, person, survey, Session};

use super::node::Node;
use super::types::{CallAssignmentObject, ListContainerObject, PersonObject, SurveyObject};
use super::{app, graphql_error};

pub struct QueryRoot;

#[Object(name = "RootQuery")]
impl QueryRoot {
    /// The person signed in to this session, or null.
    async fn current_user(&self, ctx: &Context<'_>) -> Result<Option<PersonObject>> {
        let anonymous = Session::anonymous();
        let session = ctx.data_opt::<Session>().unwrap_or(&anonymous);
        let person = person::current_user(app(ctx)?, session)
            .await
            .map_err(graphql_error)?;
        Ok(person.map(PersonObject))
    }

    async fn list_container(&self, ctx: &Context<'_>) -> Result<ListContainerObject> {
        Ok(ListContainerObject(app(ctx)?.list_container()))
    }

    /// Look a person up in BSD by email.
    async fn person(&self, ctx: &Context<'_>, email: Option<String>) -> Result<Option<PersonObject>> {
        let person = person::find_by_email(app(ctx)?, email.as_deref())
            .await
            .map_err(graphql_error)?;
        Ok(person.map(PersonObject))
    }

    async fn survey(&self, ctx: &Context<'_>, id: ID) -> Result<Option<SurveyObject>> {
        let survey = survey::find_by_global_id(app(ctx)?, &id)
            .await
            .map_err(graphql_error)?;
        Ok(survey.map(SurveyObject))
    }

    async fn call_assignment(&self, ctx: &Context<'_>, id: ID) -> Result<Option<CallAssignmentObject>> {
        let assignment = call_assignment::find_by_global_id(app(ctx)?, &id)
            .await
            .map_err(graphql_error)?;
        Ok(assignment.map(CallAssignmentObject))
    }

    /// Fetches an object given its ID
    async fn node(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Node>> {
        let entity = resolve_node(app(ctx)?, &id).await.map_err(graphql_error)?;
        Ok(entity.and_then(Node::from_entity))
    }
}
