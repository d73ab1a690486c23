//! Agent capability contract
//!
//! An agent is an immutable, process-wide unit of work. Each `step` consumes
//! the flattened transcript and produces exactly one [`AgentResponse`]: the
//! next agent to run (or none, meaning terminal) plus the message to append.
//! All per-request data flows through [`StepContext`]; agents hold none.

use async_trait::async_trait;

use crate::classifier::IntentClassifier;
use crate::core::{Message, Result};
use crate::integrations::{CredentialBundle, ExecutorSet, IntegrationTag};

/// Symbolic handle naming an agent in the registry
pub type AgentHandle = String;

/// Transition record produced by one step
#[derive(Debug, Clone)]
pub struct AgentResponse {
    /// Handle of the next agent to run; `None` ends the turn
    pub next: Option<AgentHandle>,
    /// The message this step contributes
    pub message: Message,
}

impl AgentResponse {
    /// Hand control to another agent
    pub fn handoff(next: impl Into<AgentHandle>, message: Message) -> Self {
        Self {
            next: Some(next.into()),
            message,
        }
    }

    /// End the turn with a terminal message
    pub fn terminal(message: Message) -> Self {
        Self {
            next: None,
            message,
        }
    }
}

/// Per-request inputs to one agent step
pub struct StepContext<'a> {
    /// Flattened transcript the classifier consumes
    pub transcript: &'a [Message],
    /// Credentials for this agent's integration group (empty when tag-less)
    pub credentials: &'a CredentialBundle,
    /// Classifier backend
    pub classifier: &'a dyn IntentClassifier,
    /// Executors available to action agents
    pub executors: &'a ExecutorSet,
}

/// Polymorphic unit of work in the routing graph
#[async_trait]
pub trait Agent: Send + Sync {
    /// Get the agent's display name
    fn name(&self) -> &str;

    /// Integration group this agent needs credentials for
    fn integration(&self) -> Option<IntegrationTag>;

    /// Whether this agent only routes (its messages never reach the caller)
    fn is_triage(&self) -> bool {
        false
    }

    /// Run one step
    ///
    /// Expected business conditions come back as an `error`-flagged message
    /// inside the response; only classifier contract violations and
    /// infrastructure failures are returned as errors.
    async fn step(&self, ctx: StepContext<'_>) -> Result<AgentResponse>;
}
