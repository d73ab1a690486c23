//! Summary agent - the terminal node
//!
//! Presents no candidate actions: the classifier is asked for a plain
//! natural-language wrap-up of everything that happened this turn, including
//! any error-flagged messages still visible in the flattened transcript.
//! This is the only node that returns `next = None`.

use async_trait::async_trait;
use tracing::debug;

use crate::agent::traits::{Agent, AgentResponse, StepContext};
use crate::classifier::Decision;
use crate::core::{EngineError, Message, Result};
use crate::integrations::IntegrationTag;

const DEFAULT_INSTRUCTIONS: &str = "You are an expert at summarizing the outcome of the \
conversation for the user. Review the message history, explain what was done, and if any step \
failed, explain the likely cause in plain language.";

/// Terminal summarizing agent
pub struct SummaryAgent {
    name: String,
    instructions: String,
}

impl SummaryAgent {
    /// Create a summary node with the default instructions
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
        }
    }

    /// Override the summarization instructions
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }
}

#[async_trait]
impl Agent for SummaryAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn integration(&self) -> Option<IntegrationTag> {
        None
    }

    async fn step(&self, ctx: StepContext<'_>) -> Result<AgentResponse> {
        let decision = ctx
            .classifier
            .classify(ctx.transcript, &[], &self.instructions)
            .await?;

        match decision {
            Decision::Reply(text) => {
                debug!(agent = %self.name, "turn complete");
                Ok(AgentResponse::terminal(Message::assistant(text)))
            }
            // No candidates were offered, so a selected action can only be
            // a backend violating the classification contract.
            Decision::Action(call) => Err(EngineError::contract(format!(
                "{} offered no actions but received '{}'",
                self.name, call.name
            ))),
        }
    }
}
