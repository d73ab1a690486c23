//! Integrations module - the boundary to external services
//!
//! The engine never speaks to an upstream API itself; it routes one
//! classifier-selected operation per step into an [`ActionExecutor`] bound
//! to an integration group. Executor internals (wire formats, retries,
//! OAuth refresh) live behind the trait.

pub mod catalog;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::Record;

pub use catalog::{Catalog, Operation};

/// Integration group an agent may be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationTag {
    /// Mail connector (read, send, mark-as-read, delete)
    Mail,
    /// Issue-tracker connector (create, query, update, delete issues)
    Tracker,
    /// Chat workspace connector (send messages, resolve channels)
    Chat,
    /// Spreadsheet connector
    Sheets,
    /// Calendar connector
    Calendar,
    /// Social-feed connector (recent post retrieval)
    Feed,
}

impl fmt::Display for IntegrationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrationTag::Mail => write!(f, "mail"),
            IntegrationTag::Tracker => write!(f, "tracker"),
            IntegrationTag::Chat => write!(f, "chat"),
            IntegrationTag::Sheets => write!(f, "sheets"),
            IntegrationTag::Calendar => write!(f, "calendar"),
            IntegrationTag::Feed => write!(f, "feed"),
        }
    }
}

/// Secret bundle injected into executor calls
///
/// Opaque to the engine beyond being passed through to the executor that
/// needs it. Agents without an integration tag receive an empty bundle.
#[derive(Debug, Clone, Default)]
pub struct CredentialBundle {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub client_id: String,
    pub client_secret: String,
}

impl CredentialBundle {
    /// Create a bundle from an access token only
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Self::default()
        }
    }

    /// The empty bundle handed to agents with no integration tag
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Failure from an executor call
///
/// Always caught at the action-agent boundary and converted into a
/// recoverable transcript message; never crashes the step loop.
#[derive(Error, Debug)]
pub enum IntegrationError {
    /// Network or upstream-API failure
    #[error("upstream request failed: {0}")]
    Upstream(String),

    /// The credentials were rejected by the upstream service
    #[error("permission denied: {0}")]
    Permission(String),

    /// The upstream response could not be interpreted
    #[error("malformed upstream response: {0}")]
    Malformed(String),
}

/// Per-integration operation implementation
///
/// One executor serves one integration group's whole operation menu; the
/// operation name is the classifier-selected action name from the catalog.
#[async_trait]
pub trait ActionExecutor: Send + Sync {
    /// Perform one operation with classifier-supplied arguments
    async fn invoke(
        &self,
        operation: &str,
        arguments: &serde_json::Value,
        credentials: &CredentialBundle,
    ) -> std::result::Result<Vec<Record>, IntegrationError>;
}

/// The set of executors available to action agents, keyed by tag
#[derive(Clone, Default)]
pub struct ExecutorSet {
    executors: HashMap<IntegrationTag, Arc<dyn ActionExecutor>>,
}

impl ExecutorSet {
    /// Create an empty executor set
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an executor for an integration group
    pub fn register(&mut self, tag: IntegrationTag, executor: Arc<dyn ActionExecutor>) {
        self.executors.insert(tag, executor);
    }

    /// Look up the executor for an integration group
    pub fn get(&self, tag: IntegrationTag) -> Option<&Arc<dyn ActionExecutor>> {
        self.executors.get(&tag)
    }

    /// Tags with a registered executor
    pub fn tags(&self) -> Vec<IntegrationTag> {
        self.executors.keys().copied().collect()
    }
}
