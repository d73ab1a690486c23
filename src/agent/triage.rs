//! Triage agent - routing-only node
//!
//! A triage node's candidate menu is a set of argument-less transfer
//! handles. It performs zero integration calls; its only effect is choosing
//! the next agent. Its status messages are routing chatter the orchestrator
//! never shows to the caller.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::agent::traits::{Agent, AgentHandle, AgentResponse, StepContext};
use crate::classifier::Decision;
use crate::core::{CandidateAction, EngineError, Message, Result};
use crate::integrations::IntegrationTag;

/// One transfer a triage node may select
#[derive(Debug, Clone)]
pub struct Transfer {
    /// The argument-less action presented to the classifier
    pub action: CandidateAction,
    /// Registry handle of the target agent
    pub target: AgentHandle,
}

impl Transfer {
    /// Create a transfer with a conventional `transfer_to_*` action name
    pub fn new(
        action_name: impl Into<String>,
        description: impl Into<String>,
        target: impl Into<AgentHandle>,
    ) -> Self {
        Self {
            action: CandidateAction::no_args(action_name, description),
            target: target.into(),
        }
    }
}

/// Routing-only agent
pub struct TriageAgent {
    name: String,
    integration: Option<IntegrationTag>,
    instructions: String,
    transfers: Vec<Transfer>,
    /// Handle routed to when the classifier answers in plain language
    fallback: AgentHandle,
}

impl TriageAgent {
    /// Create a triage node
    pub fn new(
        name: impl Into<String>,
        integration: Option<IntegrationTag>,
        instructions: impl Into<String>,
        transfers: Vec<Transfer>,
        fallback: impl Into<AgentHandle>,
    ) -> Self {
        Self {
            name: name.into(),
            integration,
            instructions: instructions.into(),
            transfers,
            fallback: fallback.into(),
        }
    }

    /// The transfers this node may select
    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }
}

#[async_trait]
impl Agent for TriageAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn integration(&self) -> Option<IntegrationTag> {
        self.integration
    }

    fn is_triage(&self) -> bool {
        true
    }

    async fn step(&self, ctx: StepContext<'_>) -> Result<AgentResponse> {
        let actions: Vec<CandidateAction> = self
            .transfers
            .iter()
            .map(|t| t.action.clone())
            .collect();

        let decision = ctx
            .classifier
            .classify(ctx.transcript, &actions, &self.instructions)
            .await?;

        match decision {
            Decision::Action(call) => {
                let transfer = self
                    .transfers
                    .iter()
                    .find(|t| t.action.name == call.name)
                    .ok_or_else(|| {
                        EngineError::contract(format!(
                            "{} does not declare action '{}'",
                            self.name, call.name
                        ))
                    })?;

                debug!(agent = %self.name, target = %transfer.target, "routing hand-off");
                Ok(AgentResponse::handoff(
                    transfer.target.clone(),
                    Message::assistant(format!("Transferring to {}", transfer.target)),
                ))
            }
            // A plain reply from a routing node means no transfer applied;
            // let the terminal summarizer explain the breakdown.
            Decision::Reply(text) => {
                info!(agent = %self.name, "no transfer selected, routing to fallback");
                Ok(AgentResponse::handoff(
                    self.fallback.clone(),
                    Message::recoverable(text),
                ))
            }
        }
    }
}
