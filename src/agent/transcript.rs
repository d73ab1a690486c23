//! Conversation state and transcript projection
//!
//! One turn owns two transcripts. The canonical transcript keeps structured
//! records for the caller; the classifier-facing transcript rewrites every
//! message into plain assistant text so structured results read as
//! conversation. Error-flagged messages stay visible to the classifier for
//! self-correction but are filtered before the canonical transcript is
//! returned.

use crate::core::{Message, Role};

/// Project a canonical message into the classifier's text-only view
///
/// Every message is rewritten to `role=assistant` with its records rendered
/// inline after the content, so the classifier sees one uniform narration of
/// what has happened so far.
pub fn to_classifier_view(message: &Message) -> Message {
    let rendered = match &message.data {
        Some(records) => {
            serde_json::to_string(records).unwrap_or_else(|_| "[unrenderable]".to_string())
        }
        None => "none".to_string(),
    };

    Message {
        role: Role::Assistant,
        content: format!("{}: {}", message.content, rendered),
        data: None,
        error: message.error,
    }
}

/// Owns the canonical transcript and its flattened projection for one turn
#[derive(Debug, Clone)]
pub struct ConversationState {
    /// Append-only structured transcript
    canonical: Vec<Message>,
    /// Text-only projection fed to the classifier
    classifier_view: Vec<Message>,
}

impl ConversationState {
    /// Seed a turn with prior history plus the new user message
    pub fn seed(prior: Vec<Message>, user_message: Message) -> Self {
        let mut canonical = prior;
        canonical.push(user_message);

        let classifier_view = canonical.iter().map(to_classifier_view).collect();

        Self {
            canonical,
            classifier_view,
        }
    }

    /// Append a step's message to both transcripts
    pub fn append(&mut self, message: Message) {
        self.classifier_view.push(to_classifier_view(&message));
        self.canonical.push(message);
    }

    /// The classifier-facing transcript
    pub fn classifier_view(&self) -> &[Message] {
        &self.classifier_view
    }

    /// The canonical transcript, error entries included
    pub fn canonical(&self) -> &[Message] {
        &self.canonical
    }

    /// Canonical transcript length
    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    /// Whether the canonical transcript is empty
    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }

    /// Finalize for the caller: canonical transcript minus error entries
    pub fn into_filtered(self) -> Vec<Message> {
        self.canonical
            .into_iter()
            .filter(|msg| !msg.error)
            .collect()
    }
}
