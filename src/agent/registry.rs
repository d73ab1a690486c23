//! Agent registry - symbolic handles resolved to agent instances
//!
//! The routing graph is dynamic: the next node is chosen at runtime from
//! classifier output. Agents therefore name each other by handle, and the
//! registry, built once at process start and passed into the orchestrator,
//! resolves handles to instances. No global singletons.

use std::collections::HashMap;
use std::sync::Arc;

use crate::agent::action::ActionAgent;
use crate::agent::summary::SummaryAgent;
use crate::agent::traits::{Agent, AgentHandle};
use crate::agent::triage::{Transfer, TriageAgent};
use crate::integrations::{Catalog, IntegrationTag};

/// Well-known handles in the default graph
pub mod handles {
    /// Global entry node for every turn
    pub const MAIN_TRIAGE: &str = "main-triage";
    /// Terminal summarizing node
    pub const SUMMARY: &str = "summary";
}

/// Handle of an integration's triage node
pub fn triage_handle(tag: IntegrationTag) -> AgentHandle {
    format!("{tag}-triage")
}

/// Handle of an integration's action node
pub fn action_handle(tag: IntegrationTag) -> AgentHandle {
    format!("{tag}-actions")
}

/// Immutable mapping from handle to agent instance
#[derive(Clone, Default)]
pub struct AgentRegistry {
    agents: HashMap<AgentHandle, Arc<dyn Agent>>,
}

impl AgentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent under a handle
    pub fn insert(&mut self, handle: impl Into<AgentHandle>, agent: Arc<dyn Agent>) {
        self.agents.insert(handle.into(), agent);
    }

    /// Resolve a handle to an agent
    pub fn get(&self, handle: &str) -> Option<&Arc<dyn Agent>> {
        self.agents.get(handle)
    }

    /// Whether a handle is registered
    pub fn contains(&self, handle: &str) -> bool {
        self.agents.contains_key(handle)
    }

    /// Number of registered agents
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

const TRIAGE_INSTRUCTIONS: &str = "You are an expert at choosing the right agent to perform \
the task described by the user. None of the transfers require any arguments. Carefully review \
the chat history and the actions of the previous agent to determine whether the task has been \
completed. If it has been completed or cannot be completed, call transfer_to_summary to end \
the conversation.";

const ACTION_INSTRUCTIONS_PREFIX: &str = "You are an expert at operating the";

/// Build the default routing graph over the given catalog
///
/// Main triage fans out to one triage node per integration group; each of
/// those hands to its action node or to the summary node. Every path ends at
/// summary, which is the graph's only terminal.
pub fn default_registry(catalog: &Catalog) -> AgentRegistry {
    let mut registry = AgentRegistry::new();

    registry.insert(
        handles::SUMMARY,
        Arc::new(SummaryAgent::new("Summary Agent")) as Arc<dyn Agent>,
    );

    let all_tags = [
        IntegrationTag::Mail,
        IntegrationTag::Tracker,
        IntegrationTag::Chat,
        IntegrationTag::Sheets,
        IntegrationTag::Calendar,
        IntegrationTag::Feed,
    ];

    let mut main_transfers = Vec::new();

    for tag in all_tags {
        let triage = triage_handle(tag);
        let mut transfers = Vec::new();

        if let Some(menu) = catalog.menu(tag) {
            let action = action_handle(tag);
            registry.insert(
                action.clone(),
                Arc::new(ActionAgent::new(
                    format!("{tag} action agent"),
                    tag,
                    format!(
                        "{ACTION_INSTRUCTIONS_PREFIX} {tag} integration. Your task is to help \
                         the user by supplying the correct request parameters to the selected \
                         operation. Prioritise filtering by exact ids found in the chat history \
                         where possible, and be as restrictive as possible with filters."
                    ),
                    menu.to_vec(),
                    handles::MAIN_TRIAGE,
                    handles::SUMMARY,
                )) as Arc<dyn Agent>,
            );
            transfers.push(Transfer::new(
                format!("transfer_to_{tag}_actions"),
                format!("Hand the task to the {tag} operations agent"),
                action,
            ));
        }

        transfers.push(Transfer::new(
            "transfer_to_summary",
            "End the conversation with a summary of what happened",
            handles::SUMMARY,
        ));

        registry.insert(
            triage.clone(),
            Arc::new(TriageAgent::new(
                format!("{tag} triage agent"),
                Some(tag),
                TRIAGE_INSTRUCTIONS,
                transfers,
                handles::SUMMARY,
            )) as Arc<dyn Agent>,
        );

        main_transfers.push(Transfer::new(
            format!("transfer_to_{tag}"),
            format!("Route tasks concerning the {tag} integration"),
            triage,
        ));
    }

    main_transfers.push(Transfer::new(
        "transfer_to_summary",
        "End the conversation with a summary of what happened",
        handles::SUMMARY,
    ));

    registry.insert(
        handles::MAIN_TRIAGE,
        Arc::new(TriageAgent::new(
            "Main Triage Agent",
            None,
            TRIAGE_INSTRUCTIONS,
            main_transfers,
            handles::SUMMARY,
        )) as Arc<dyn Agent>,
    );

    registry
}
