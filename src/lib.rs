//! Switchboard - Conversational Action-Routing Engine
//!
//! Routes a single user turn through a chain of specialized agents until a
//! terminal response is produced. Each step consults an intent classifier
//! and either performs one side-effecting operation against an external
//! integration or hands control to another agent.
//!
//! # Architecture
//!
//! - **Core**: Shared types, configuration, and error handling
//! - **Classifier**: Intent-classification contract with an OpenAI-compatible backend
//! - **Agent**: Node variants, handle registry, dual-transcript state, and the orchestrator
//! - **Integrations**: Executor contract and the data-driven operation catalog
//! - **Store**: Credential, usage, and persistence collaborators
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use switchboard::agent::{default_registry, Orchestrator, TurnRequest};
//! use switchboard::classifier::OpenAiClassifier;
//! use switchboard::core::{Config, Message};
//! use switchboard::integrations::{Catalog, ExecutorSet};
//! use switchboard::store::{InMemoryCredentialStore, InMemoryTranscriptStore, InMemoryUsageMeter};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::load();
//!     let registry = default_registry(&Catalog::builtin());
//!     let classifier = Arc::new(OpenAiClassifier::from_config(&config).unwrap());
//!
//!     let orchestrator = Orchestrator::new(
//!         registry,
//!         classifier,
//!         ExecutorSet::new(),
//!         Arc::new(InMemoryCredentialStore::new()),
//!         Arc::new(InMemoryUsageMeter::new()),
//!         Arc::new(InMemoryTranscriptStore::new()),
//!     );
//!
//!     let outcome = orchestrator
//!         .run_turn(TurnRequest {
//!             message: Message::user("summarize my day"),
//!             prior_transcript: vec![],
//!             authorization_key: "demo-key".to_string(),
//!             integrations: vec![],
//!             instance: None,
//!         })
//!         .await
//!         .unwrap();
//!     println!("{}", outcome.instance);
//! }
//! ```

pub mod agent;
pub mod classifier;
pub mod core;
pub mod integrations;
pub mod store;

// Re-export commonly used items
pub use agent::Orchestrator;
pub use core::{Config, EngineError, Result};
