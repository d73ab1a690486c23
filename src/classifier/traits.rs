//! Intent classifier contract
//!
//! The classifier maps a flattened transcript plus a candidate-action menu to
//! either one selected action with structured arguments or a plain
//! natural-language reply. Backend selection, prompting, and token accounting
//! live behind this trait.

use async_trait::async_trait;

use crate::core::{ActionCall, CandidateAction, Message, Result};

/// Outcome of one classification call
#[derive(Debug, Clone)]
pub enum Decision {
    /// The classifier selected an action from the candidate menu
    Action(ActionCall),
    /// No action applied; the classifier answered in natural language
    Reply(String),
}

impl Decision {
    /// The selected action name, if any
    pub fn action_name(&self) -> Option<&str> {
        match self {
            Decision::Action(call) => Some(&call.name),
            Decision::Reply(_) => None,
        }
    }
}

/// Trait for intent-classifier backends
///
/// When multiple candidate actions are structurally compatible with the same
/// utterance, the classifier's own ranking is authoritative; the engine never
/// re-ranks.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    /// Classify the current transcript against a candidate-action menu
    ///
    /// An empty menu requests a plain natural-language reply.
    async fn classify(
        &self,
        transcript: &[Message],
        actions: &[CandidateAction],
        instructions: &str,
    ) -> Result<Decision>;

    /// Get the backend name
    fn name(&self) -> &str;
}
