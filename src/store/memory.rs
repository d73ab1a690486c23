//! In-memory store implementations
//!
//! Process-local collaborators for tests and single-node embedding.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::core::{EngineError, Message, Result};
use crate::integrations::{CredentialBundle, IntegrationTag};
use crate::store::{CredentialResolver, Persistence, UsageAccounting};

/// Credential store backed by a process-local map
#[derive(Default)]
pub struct InMemoryCredentialStore {
    entries: RwLock<HashMap<(String, IntegrationTag), CredentialBundle>>,
}

impl InMemoryCredentialStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store credentials for one caller and integration
    pub fn insert(
        &self,
        authorization_key: impl Into<String>,
        integration: IntegrationTag,
        bundle: CredentialBundle,
    ) {
        self.entries
            .write()
            .expect("credential store lock poisoned")
            .insert((authorization_key.into(), integration), bundle);
    }
}

#[async_trait]
impl CredentialResolver for InMemoryCredentialStore {
    async fn get(
        &self,
        authorization_key: &str,
        integration: IntegrationTag,
    ) -> Result<Option<CredentialBundle>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| EngineError::system("credential store lock poisoned"))?;
        Ok(entries
            .get(&(authorization_key.to_string(), integration))
            .cloned())
    }
}

/// Usage meter backed by a process-local counter map
#[derive(Default)]
pub struct InMemoryUsageMeter {
    counts: RwLock<HashMap<String, u64>>,
}

impl InMemoryUsageMeter {
    /// Create an empty meter
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed-turn count for one caller
    pub fn count(&self, authorization_key: &str) -> u64 {
        self.counts
            .read()
            .expect("usage meter lock poisoned")
            .get(authorization_key)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl UsageAccounting for InMemoryUsageMeter {
    async fn increment(&self, authorization_key: &str) -> Result<()> {
        let mut counts = self
            .counts
            .write()
            .map_err(|_| EngineError::system("usage meter lock poisoned"))?;
        *counts.entry(authorization_key.to_string()).or_insert(0) += 1;
        Ok(())
    }
}

/// One persisted session
#[derive(Debug, Clone)]
pub struct StoredSession {
    pub transcript: Vec<Message>,
    pub authorization_key: String,
    pub integrations: Vec<IntegrationTag>,
}

/// Transcript store backed by a process-local map
#[derive(Default)]
pub struct InMemoryTranscriptStore {
    sessions: RwLock<HashMap<String, StoredSession>>,
    next_id: AtomicU64,
}

impl InMemoryTranscriptStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieve a stored session by instance id
    pub fn get(&self, instance: &str) -> Option<StoredSession> {
        self.sessions
            .read()
            .expect("transcript store lock poisoned")
            .get(instance)
            .cloned()
    }

    /// Number of stored sessions
    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .expect("transcript store lock poisoned")
            .len()
    }

    /// Whether no sessions are stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl Persistence for InMemoryTranscriptStore {
    async fn store(
        &self,
        transcript: &[Message],
        authorization_key: &str,
        integrations: &[IntegrationTag],
        instance: Option<&str>,
    ) -> Result<String> {
        let id = match instance {
            Some(existing) => existing.to_string(),
            None => format!("session-{}", self.next_id.fetch_add(1, Ordering::Relaxed) + 1),
        };

        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| EngineError::system("transcript store lock poisoned"))?;
        sessions.insert(
            id.clone(),
            StoredSession {
                transcript: transcript.to_vec(),
                authorization_key: authorization_key.to_string(),
                integrations: integrations.to_vec(),
            },
        );

        Ok(id)
    }
}
