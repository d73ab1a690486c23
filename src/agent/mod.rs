//! Agent module - the routing graph and the turn driver
//!
//! Contains the agent capability contract, the two node variants plus the
//! terminal summarizer, the handle registry, dual-transcript state, and the
//! orchestrator that walks the graph.

pub mod action;
pub mod loop_state;
pub mod orchestrator;
pub mod registry;
pub mod summary;
pub mod traits;
pub mod transcript;
pub mod triage;

pub use action::ActionAgent;
pub use loop_state::TurnState;
pub use orchestrator::{Orchestrator, TurnRequest};
pub use registry::{action_handle, default_registry, handles, triage_handle, AgentRegistry};
pub use summary::SummaryAgent;
pub use traits::{Agent, AgentHandle, AgentResponse, StepContext};
pub use transcript::{to_classifier_view, ConversationState};
pub use triage::{Transfer, TriageAgent};
