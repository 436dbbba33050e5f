//! Root mutation.

use async_graphql::{Context, InputObject, Object, Result, SimpleObject};
use gc_core::call_assignment::{create_call_assignment, CreateCallAssignment};

use super::types::{CallAssignmentObject, ListContainerObject};
use super::{app, graphql_error};

#[derive(InputObject)]
pub struct CreateCallAssignmentInput {
    pub name: String,
    pub caller_group_id: String,
    pub target_group_id: String,
    pub survey_id: String,
    pub client_mutation_id: Option<String>,
}

#[derive(SimpleObject)]
pub struct CreateCallAssignmentPayload {
    pub client_mutation_id: Option<String>,
    pub call_assignment: CallAssignmentObject,
    pub list_container: ListContainerObject,
}

pub struct MutationRoot;

#[Object(name = "RootMutation")]
impl MutationRoot {
    async fn create_call_assignment(
        &self,
        ctx: &Context<'_>,
        input: CreateCallAssignmentInput,
    ) -> Result<CreateCallAssignmentPayload> {
        let request = CreateCallAssignment {
            name: input.name,
            caller_group_id: input.caller_group_id,
            target_group_id: input.target_group_id,
            survey_id: input.survey_id,
        };
        let created = create_call_assignment(app(ctx)?, &request)
            .await
            .map_err(graphql_error)?;

        Ok(CreateCallAssignmentPayload {
            client_mutation_id: input.client_mutation_id,
            call_assignment: CallAssignmentObject(created.call_assignment),
            list_container: ListContainerObject(created.list_container),
        })
    }
}
