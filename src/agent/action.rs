//! Action agent - the single side-effecting node type
//!
//! One generic agent parameterized by an integration tag and an operation
//! menu from the catalog, instead of one subclass per integration. A step
//! performs at most one executor call: the one the classifier selected.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::agent::traits::{Agent, AgentHandle, AgentResponse, StepContext};
use crate::classifier::Decision;
use crate::core::{CandidateAction, EngineError, Message, Result};
use crate::integrations::{IntegrationTag, Operation};

/// Side-effecting agent bound to one integration group
pub struct ActionAgent {
    name: String,
    integration: IntegrationTag,
    instructions: String,
    operations: Vec<Operation>,
    /// Entry triage handle; successful and empty-result steps both hand
    /// control back here so the whole menu is available for the next step
    home: AgentHandle,
    /// Summary handle; unclassifiable or failed steps terminate through here
    fallback: AgentHandle,
}

impl ActionAgent {
    /// Create an action node from a catalog menu
    pub fn new(
        name: impl Into<String>,
        integration: IntegrationTag,
        instructions: impl Into<String>,
        operations: Vec<Operation>,
        home: impl Into<AgentHandle>,
        fallback: impl Into<AgentHandle>,
    ) -> Self {
        Self {
            name: name.into(),
            integration,
            instructions: instructions.into(),
            operations,
            home: home.into(),
            fallback: fallback.into(),
        }
    }

    /// The operation menu this node exposes to the classifier
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }
}

#[async_trait]
impl Agent for ActionAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn integration(&self) -> Option<IntegrationTag> {
        Some(self.integration)
    }

    async fn step(&self, ctx: StepContext<'_>) -> Result<AgentResponse> {
        let actions: Vec<CandidateAction> = self
            .operations
            .iter()
            .map(|op| op.action.clone())
            .collect();

        let decision = ctx
            .classifier
            .classify(ctx.transcript, &actions, &self.instructions)
            .await?;

        let call = match decision {
            Decision::Action(call) => call,
            // No operation applied; surface the raw reply through the
            // summarizer so the caller hears why nothing happened.
            Decision::Reply(text) => {
                warn!(agent = %self.name, "classifier selected no operation");
                return Ok(AgentResponse::handoff(
                    self.fallback.clone(),
                    Message::recoverable(text),
                ));
            }
        };

        let operation = self
            .operations
            .iter()
            .find(|op| op.action.name == call.name)
            .ok_or_else(|| {
                EngineError::contract(format!(
                    "{} does not declare action '{}'",
                    self.name, call.name
                ))
            })?;

        let executor = ctx.executors.get(self.integration).ok_or_else(|| {
            EngineError::system(format!(
                "no executor registered for the {} integration",
                self.integration
            ))
        })?;

        debug!(agent = %self.name, operation = %call.name, "invoking executor");

        let records = match executor
            .invoke(&call.name, &call.arguments, ctx.credentials)
            .await
        {
            Ok(records) => records,
            Err(e) => {
                warn!(agent = %self.name, operation = %call.name, error = %e, "executor call failed");
                return Ok(AgentResponse::handoff(
                    self.fallback.clone(),
                    Message::recoverable(format!(
                        "Failed to complete '{}'. Please check the message history and error \
                         log to advise the user on what might be the cause of the problem.\nError: {e}",
                        call.name
                    )),
                ));
            }
        };

        if records.is_empty() && operation.expects_results {
            return Ok(AgentResponse::handoff(
                self.home.clone(),
                Message::recoverable(operation.empty_hint),
            ));
        }

        Ok(AgentResponse::handoff(
            self.home.clone(),
            Message::assistant_with_data(operation.success_content, records),
        ))
    }
}
