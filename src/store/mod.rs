//! Store module - persistence-side collaborators
//!
//! Contracts the engine consumes for credential lookup, usage metering, and
//! transcript persistence. Their storage backends are out of scope; the
//! in-memory implementations in [`memory`] serve tests and embedding.

pub mod memory;

use async_trait::async_trait;

use crate::core::{Message, Result};
use crate::integrations::{CredentialBundle, IntegrationTag};

pub use memory::{InMemoryCredentialStore, InMemoryTranscriptStore, InMemoryUsageMeter};

/// Resolves the secret bundle for one caller and integration
#[async_trait]
pub trait CredentialResolver: Send + Sync {
    /// Look up credentials; `Ok(None)` means the caller never authenticated
    /// with this integration
    async fn get(
        &self,
        authorization_key: &str,
        integration: IntegrationTag,
    ) -> Result<Option<CredentialBundle>>;
}

/// Meters completed turns per caller
#[async_trait]
pub trait UsageAccounting: Send + Sync {
    /// Record one completed turn for the caller
    async fn increment(&self, authorization_key: &str) -> Result<()>;
}

/// Persists the canonical transcript of a completed turn
#[async_trait]
pub trait Persistence: Send + Sync {
    /// Store the transcript, returning the session instance identifier
    ///
    /// A `None` instance asks the store to open a new session.
    async fn store(
        &self,
        transcript: &[Message],
        authorization_key: &str,
        integrations: &[IntegrationTag],
        instance: Option<&str>,
    ) -> Result<String>;
}
