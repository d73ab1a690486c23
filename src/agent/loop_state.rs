//! Turn loop state
//!
//! Tracks the current node and the step budget for one turn. The routing
//! graph is chosen at runtime by classifier output, so the budget is what
//! guarantees the loop cannot hang on a cyclic hand-off.

use crate::agent::traits::AgentHandle;

/// State of the per-turn step loop
#[derive(Debug, Clone)]
pub struct TurnState {
    /// Steps taken so far
    pub step: usize,
    /// Maximum allowed steps
    pub max_steps: usize,
    /// Handle of the agent to run next; `None` once terminal
    pub current: Option<AgentHandle>,
}

impl TurnState {
    /// Create a turn state starting at the entry handle
    pub fn new(entry: impl Into<AgentHandle>, max_steps: usize) -> Self {
        Self {
            step: 0,
            max_steps,
            current: Some(entry.into()),
        }
    }

    /// Whether another step may run
    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }

    /// Whether the step budget is spent
    pub fn exhausted(&self) -> bool {
        self.step >= self.max_steps
    }

    /// Record a completed step and its hand-off target
    pub fn advance(&mut self, next: Option<AgentHandle>) {
        self.step += 1;
        self.current = next;
    }
}
