//! Integration catalog - the data-driven operation tables
//!
//! Each integration group contributes one menu of operations. An action
//! node is parameterized by a menu entry rather than subclassed per
//! integration, so adding a connector means adding a table entry here and
//! registering an executor for it.

use serde_json::json;

use crate::core::CandidateAction;
use crate::integrations::IntegrationTag;

/// One operation in an integration's menu
#[derive(Debug, Clone)]
pub struct Operation {
    /// The callable surface presented to the classifier
    pub action: CandidateAction,
    /// Whether an empty result set indicates a recoverable failure
    pub expects_results: bool,
    /// Transcript content announcing the affected records
    pub success_content: &'static str,
    /// Transcript content when results were expected but none matched
    pub empty_hint: &'static str,
}

impl Operation {
    /// Create an operation whose empty result set is a recoverable failure
    pub fn expecting_results(
        action: CandidateAction,
        success_content: &'static str,
        empty_hint: &'static str,
    ) -> Self {
        Self {
            action,
            expects_results: true,
            success_content,
            empty_hint,
        }
    }

    /// Create an operation where an empty result set is a normal outcome
    pub fn fire_and_forget(action: CandidateAction, success_content: &'static str) -> Self {
        Self {
            action,
            expects_results: false,
            success_content,
            empty_hint: "",
        }
    }
}

/// The full operation catalog for one deployment
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    menus: Vec<(IntegrationTag, Vec<Operation>)>,
}

impl Catalog {
    /// Catalog covering every built-in integration group
    pub fn builtin() -> Self {
        Self {
            menus: vec![
                (IntegrationTag::Mail, mail_operations()),
                (IntegrationTag::Tracker, tracker_operations()),
                (IntegrationTag::Chat, chat_operations()),
                (IntegrationTag::Feed, feed_operations()),
            ],
        }
    }

    /// Menu for one integration group, if it has one
    pub fn menu(&self, tag: IntegrationTag) -> Option<&[Operation]> {
        self.menus
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, ops)| ops.as_slice())
    }

    /// Tags that carry an operation menu
    pub fn tags(&self) -> Vec<IntegrationTag> {
        self.menus.iter().map(|(tag, _)| *tag).collect()
    }
}

const EMPTY_MATCH_HINT: &str = "No records matched the given filter. Please check the message \
history to advise the user on what might be the cause of the problem. It could be an issue \
with spelling or capitalization.";

/// Operation menu for the mail connector
pub fn mail_operations() -> Vec<Operation> {
    vec![
        Operation::expecting_results(
            CandidateAction::new(
                "get_emails",
                "Retrieve emails matching a search query",
                json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "Mail search query; prefer filtering by message id where known"
                        },
                        "message_ids": {
                            "type": "array",
                            "items": {"type": "string"},
                            "description": "Exact message ids to retrieve, when known from the conversation"
                        }
                    },
                    "required": ["query"]
                }),
            ),
            "Here are the retrieved emails",
            EMPTY_MATCH_HINT,
        ),
        Operation::fire_and_forget(
            CandidateAction::new(
                "send_email",
                "Send a new email",
                json!({
                    "type": "object",
                    "properties": {
                        "recipient": {"type": "string", "description": "Recipient address"},
                        "subject": {"type": "string", "description": "Subject line"},
                        "body": {"type": "string", "description": "Plain-text body"}
                    },
                    "required": ["recipient", "subject", "body"]
                }),
            ),
            "The following email has been sent successfully",
        ),
        Operation::expecting_results(
            CandidateAction::new(
                "mark_as_read",
                "Mark emails matching a query as read",
                json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "Mail search query selecting the emails to update"
                        },
                        "message_ids": {
                            "type": "array",
                            "items": {"type": "string"},
                            "description": "Exact message ids to update, when known"
                        }
                    },
                    "required": ["query"]
                }),
            ),
            "Here are the emails marked as read",
            EMPTY_MATCH_HINT,
        ),
        Operation::expecting_results(
            CandidateAction::new(
                "delete_emails",
                "Delete emails matching a query",
                json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "Mail search query selecting the emails to delete"
                        },
                        "message_ids": {
                            "type": "array",
                            "items": {"type": "string"},
                            "description": "Exact message ids to delete, when known"
                        }
                    },
                    "required": ["query"]
                }),
            ),
            "The following emails have been successfully deleted",
            EMPTY_MATCH_HINT,
        ),
    ]
}

/// Operation menu for the issue-tracker connector
pub fn tracker_operations() -> Vec<Operation> {
    let filter_properties = json!({
        "id": {"type": "string", "description": "Issue uuid; not the human-facing number"},
        "number": {"type": "integer", "description": "Human-facing issue number"},
        "title": {"type": "string"},
        "status": {
            "type": "string",
            "enum": ["Backlog", "Todo", "In Progress", "In Review", "Done", "Canceled", "Duplicate"]
        },
        "assignee": {"type": "string"},
        "project": {"type": "string"},
        "use_and_clause": {
            "type": "boolean",
            "description": "True if every filter condition must hold; false if any one suffices"
        }
    });

    vec![
        Operation::fire_and_forget(
            CandidateAction::new(
                "create_issue",
                "Create a new issue in the tracker",
                json!({
                    "type": "object",
                    "properties": {
                        "title": {"type": "string"},
                        "description": {"type": "string"},
                        "status": {
                            "type": "string",
                            "enum": ["Backlog", "Todo", "In Progress", "In Review", "Done", "Canceled", "Duplicate"]
                        },
                        "assignee": {"type": "string"},
                        "project": {"type": "string"},
                        "labels": {"type": "array", "items": {"type": "string"}}
                    },
                    "required": ["title"]
                }),
            ),
            "Issue created successfully",
        ),
        Operation::expecting_results(
            CandidateAction::new(
                "get_issues",
                "Retrieve issues matching filter conditions; be as restrictive as possible",
                json!({
                    "type": "object",
                    "properties": filter_properties.clone(),
                    "required": ["use_and_clause"]
                }),
            ),
            "Here are the retrieved issues",
            EMPTY_MATCH_HINT,
        ),
        Operation::expecting_results(
            CandidateAction::new(
                "update_issues",
                "Update issues matching filter conditions",
                json!({
                    "type": "object",
                    "properties": {
                        "filter_conditions": {
                            "type": "object",
                            "properties": filter_properties.clone()
                        },
                        "update_conditions": {
                            "type": "object",
                            "properties": {
                                "title": {"type": "string"},
                                "status": {"type": "string"},
                                "assignee": {"type": "string"},
                                "project": {"type": "string"}
                            }
                        }
                    },
                    "required": ["filter_conditions", "update_conditions"]
                }),
            ),
            "Here are the updated issues",
            EMPTY_MATCH_HINT,
        ),
        Operation::expecting_results(
            CandidateAction::new(
                "delete_issues",
                "Delete issues matching filter conditions",
                json!({
                    "type": "object",
                    "properties": filter_properties,
                    "required": ["use_and_clause"]
                }),
            ),
            "Here are the deleted issues",
            EMPTY_MATCH_HINT,
        ),
    ]
}

/// Operation menu for the chat connector
pub fn chat_operations() -> Vec<Operation> {
    vec![
        Operation::fire_and_forget(
            CandidateAction::new(
                "send_message",
                "Send a message to a channel",
                json!({
                    "type": "object",
                    "properties": {
                        "channel_id": {"type": "string", "description": "Target channel id"},
                        "text": {"type": "string", "description": "Message text"}
                    },
                    "required": ["channel_id", "text"]
                }),
            ),
            "Chat message sent successfully",
        ),
        Operation::expecting_results(
            CandidateAction::new(
                "get_channel_ids",
                "Resolve channel names to channel ids",
                json!({
                    "type": "object",
                    "properties": {
                        "channel_names": {
                            "type": "array",
                            "items": {"type": "string"},
                            "description": "Channel names to resolve"
                        }
                    },
                    "required": ["channel_names"]
                }),
            ),
            "Here are the channel ids of the requested channel names",
            EMPTY_MATCH_HINT,
        ),
    ]
}

/// Operation menu for the social-feed connector
pub fn feed_operations() -> Vec<Operation> {
    vec![Operation::expecting_results(
        CandidateAction::new(
            "get_recent_posts",
            "Retrieve recent posts from the feed",
            json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "Search query; * matches everything"},
                    "hours": {
                        "type": "integer",
                        "description": "How far back to search, in hours",
                        "default": 1
                    }
                },
                "required": ["query"]
            }),
        ),
        "Here are the recent posts",
        "No posts were found for the given window. The feed may simply be quiet; a wider window \
could help.",
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_tags() {
        let catalog = Catalog::builtin();
        let tags = catalog.tags();
        assert!(tags.contains(&IntegrationTag::Mail));
        assert!(tags.contains(&IntegrationTag::Tracker));
        assert!(tags.contains(&IntegrationTag::Chat));
        assert!(tags.contains(&IntegrationTag::Feed));
        // Sheets and calendar have no action menu; they route straight to summary
        assert!(!tags.contains(&IntegrationTag::Sheets));
        assert!(!tags.contains(&IntegrationTag::Calendar));
    }

    #[test]
    fn test_menu_lookup() {
        let catalog = Catalog::builtin();
        let mail = catalog.menu(IntegrationTag::Mail).unwrap();
        assert_eq!(mail.len(), 4);
        assert!(mail.iter().any(|op| op.action.name == "send_email"));
        assert!(catalog.menu(IntegrationTag::Sheets).is_none());
    }

    #[test]
    fn test_operation_result_expectations() {
        let ops = mail_operations();
        let send = ops.iter().find(|op| op.action.name == "send_email").unwrap();
        assert!(!send.expects_results);

        let get = ops.iter().find(|op| op.action.name == "get_emails").unwrap();
        assert!(get.expects_results);
        assert!(!get.empty_hint.is_empty());
    }

    #[test]
    fn test_action_names_unique_per_menu() {
        let catalog = Catalog::builtin();
        for tag in catalog.tags() {
            let menu = catalog.menu(tag).unwrap();
            let mut names: Vec<_> = menu.iter().map(|op| op.action.name.as_str()).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), menu.len(), "duplicate action name under {tag}");
        }
    }
}
