//! Turn orchestrator
//!
//! Drives the step loop for one conversational turn: resolves credentials up
//! front, walks the routing graph one agent at a time, applies the
//! transcript append policy, and sequences the post-loop side effects.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::agent::loop_state::TurnState;
use crate::agent::registry::{handles, AgentRegistry};
use crate::agent::traits::StepContext;
use crate::agent::transcript::ConversationState;
use crate::classifier::IntentClassifier;
use crate::core::{EngineError, Message, Result, Role, TurnOutcome};
use crate::integrations::{CredentialBundle, ExecutorSet, IntegrationTag};
use crate::store::{CredentialResolver, Persistence, UsageAccounting};

/// One caller invocation of the engine
#[derive(Debug, Clone)]
pub struct TurnRequest {
    /// The new user message
    pub message: Message,
    /// Canonical transcript of prior turns
    pub prior_transcript: Vec<Message>,
    /// Caller's authorization key
    pub authorization_key: String,
    /// Integration groups this turn may touch
    pub integrations: Vec<IntegrationTag>,
    /// Session to append to; `None` opens a new one
    pub instance: Option<String>,
}

/// Drives the step loop and the termination policy for each turn
///
/// Holds no per-turn state: concurrent turns share one orchestrator freely.
pub struct Orchestrator {
    registry: AgentRegistry,
    classifier: Arc<dyn IntentClassifier>,
    executors: ExecutorSet,
    credentials: Arc<dyn CredentialResolver>,
    usage: Arc<dyn UsageAccounting>,
    persistence: Arc<dyn Persistence>,
    max_steps: usize,
}

impl Orchestrator {
    /// Create an orchestrator over a prebuilt registry and collaborators
    pub fn new(
        registry: AgentRegistry,
        classifier: Arc<dyn IntentClassifier>,
        executors: ExecutorSet,
        credentials: Arc<dyn CredentialResolver>,
        usage: Arc<dyn UsageAccounting>,
        persistence: Arc<dyn Persistence>,
    ) -> Self {
        Self {
            registry,
            classifier,
            executors,
            credentials,
            usage,
            persistence,
            max_steps: crate::core::config::EngineConfig::default().max_steps,
        }
    }

    /// Override the per-turn step budget
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Run one turn to completion
    ///
    /// Returns the filtered canonical transcript and the session instance
    /// id. Fails before the first step with [`EngineError::Validation`] or
    /// [`EngineError::Authentication`]; fails mid-loop with
    /// [`EngineError::Contract`] when a classifier selection violates the
    /// current agent's menu, or [`EngineError::System`] on unknown handles
    /// and step-budget exhaustion. On any mid-loop failure nothing is
    /// persisted or metered.
    pub async fn run_turn(&self, request: TurnRequest) -> Result<TurnOutcome> {
        if request.message.role != Role::User {
            return Err(EngineError::validation(
                "turn message must carry the user role",
            ));
        }
        if request.message.content.trim().is_empty() {
            return Err(EngineError::validation("turn message content is empty"));
        }

        let bundles = self.resolve_credentials(&request).await?;

        let mut state =
            ConversationState::seed(request.prior_transcript.clone(), request.message.clone());
        let mut turn = TurnState::new(handles::MAIN_TRIAGE, self.max_steps);

        info!(
            authorization_key = %request.authorization_key,
            integrations = ?request.integrations,
            "starting turn"
        );

        while let Some(handle) = turn.current.clone() {
            if turn.exhausted() {
                return Err(EngineError::system(format!(
                    "turn exceeded {} steps without terminating; routing graph may be cyclic",
                    self.max_steps
                )));
            }

            let agent = self.registry.get(&handle).ok_or_else(|| {
                EngineError::system(format!("no agent registered under handle '{handle}'"))
            })?;

            let empty = CredentialBundle::empty();
            let credentials = match agent.integration() {
                None => &empty,
                Some(tag) => bundles
                    .get(&tag)
                    .ok_or(EngineError::Authentication { integration: tag })?,
            };

            let response = agent
                .step(StepContext {
                    transcript: state.classifier_view(),
                    credentials,
                    classifier: self.classifier.as_ref(),
                    executors: &self.executors,
                })
                .await?;

            debug!(
                step = turn.step,
                agent = agent.name(),
                next = response.next.as_deref().unwrap_or("<terminal>"),
                "step complete"
            );

            if agent.is_triage() {
                // Routing chatter never reaches the caller, but a triage
                // node emitting records would mean it performed work it is
                // not allowed to do.
                if response.message.has_data() {
                    return Err(EngineError::contract(format!(
                        "triage agent {} produced record data",
                        agent.name()
                    )));
                }
            } else {
                state.append(response.message);
            }

            turn.advance(response.next);
        }

        let instance = self.finish_turn(&request, &state).await;

        Ok(TurnOutcome {
            transcript: state.into_filtered(),
            instance,
        })
    }

    /// Resolve one credential bundle per requested integration, up front
    ///
    /// Absence of any bundle fails the whole turn before a single step runs.
    async fn resolve_credentials(
        &self,
        request: &TurnRequest,
    ) -> Result<HashMap<IntegrationTag, CredentialBundle>> {
        let mut bundles = HashMap::new();
        for &tag in &request.integrations {
            let bundle = self
                .credentials
                .get(&request.authorization_key, tag)
                .await?
                .ok_or(EngineError::Authentication { integration: tag })?;
            bundles.insert(tag, bundle);
        }
        Ok(bundles)
    }

    /// Post-loop side effects: usage metering and transcript persistence
    ///
    /// The two run concurrently and are both awaited; a failure in either is
    /// reported but does not invalidate the computed response.
    async fn finish_turn(&self, request: &TurnRequest, state: &ConversationState) -> String {
        let (usage_result, persist_result) = tokio::join!(
            self.usage.increment(&request.authorization_key),
            self.persistence.store(
                state.canonical(),
                &request.authorization_key,
                &request.integrations,
                request.instance.as_deref(),
            )
        );

        if let Err(e) = usage_result {
            error!(error = %e, "usage accounting failed");
        }

        match persist_result {
            Ok(instance) => instance,
            Err(e) => {
                error!(error = %e, "transcript persistence failed");
                request.instance.clone().unwrap_or_default()
            }
        }
    }
}
