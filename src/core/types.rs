//! Shared types used across switchboard modules
//!
//! Contains the message data model, candidate-action definitions, and the
//! structures the classifier hands back to agents.

use serde::{Deserialize, Serialize};

/// A structured record returned by an integration call
pub type Record = serde_json::Value;

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A message in a conversation transcript
///
/// Immutable once appended. Messages flagged `error` stay visible to the
/// classifier for self-correction within the turn but are filtered out of
/// the transcript returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: Role,
    /// Content of the message
    pub content: String,
    /// Structured records attached by an action step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Record>>,
    /// Marks a recoverable-failure message, hidden from the caller
    #[serde(default)]
    pub error: bool,
}

impl Message {
    /// Create a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            data: None,
            error: false,
        }
    }

    /// Create a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            data: None,
            error: false,
        }
    }

    /// Create an assistant message carrying structured records
    pub fn assistant_with_data(content: impl Into<String>, data: Vec<Record>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            data: Some(data),
            error: false,
        }
    }

    /// Create a recoverable-failure message
    pub fn recoverable(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            data: None,
            error: true,
        }
    }

    /// Whether this message carries at least one record
    pub fn has_data(&self) -> bool {
        self.data.as_ref().is_some_and(|records| !records.is_empty())
    }
}

/// One entry of an agent's candidate-action menu
///
/// The fixed set of operations and transfers a given agent may select from
/// on one step, presented to the classifier as a callable function.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateAction {
    /// Name of the action
    pub name: String,
    /// Description of what the action does
    pub description: String,
    /// JSON Schema for the arguments
    pub parameters: serde_json::Value,
}

impl CandidateAction {
    /// Create a new candidate action
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }

    /// Create an argument-less candidate action (used for transfers)
    pub fn no_args(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(
            name,
            description,
            serde_json::json!({
                "type": "object",
                "properties": {}
            }),
        )
    }
}

/// An action selected by the classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionCall {
    /// Name of the selected action
    pub name: String,
    /// Structured arguments supplied by the classifier
    pub arguments: serde_json::Value,
}

impl ActionCall {
    /// Create a new action call
    pub fn new(name: impl Into<String>, arguments: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Get a string argument by key
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.arguments
            .get(key)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }
}

/// Result of a completed turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnOutcome {
    /// Canonical transcript with recoverable-failure messages removed
    pub transcript: Vec<Message>,
    /// Opaque session identifier produced by persistence
    pub instance: String,
}
