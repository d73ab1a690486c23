//! Shared test doubles for the turn-engine integration tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use switchboard::agent::{default_registry, Orchestrator};
use switchboard::classifier::{Decision, IntentClassifier};
use switchboard::core::{ActionCall, CandidateAction, EngineError, Message, Record};
use switchboard::integrations::{
    ActionExecutor, Catalog, CredentialBundle, ExecutorSet, IntegrationError, IntegrationTag,
};
use switchboard::store::{InMemoryCredentialStore, InMemoryTranscriptStore, InMemoryUsageMeter};

/// Classifier that replays a scripted sequence of decisions
pub struct ScriptedClassifier {
    script: Mutex<VecDeque<Decision>>,
    /// Candidate-action names offered at each call
    pub offered: Mutex<Vec<Vec<String>>>,
}

impl ScriptedClassifier {
    pub fn new(script: Vec<Decision>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            offered: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.offered.lock().unwrap().len()
    }
}

#[async_trait]
impl IntentClassifier for ScriptedClassifier {
    async fn classify(
        &self,
        _transcript: &[Message],
        actions: &[CandidateAction],
        _instructions: &str,
    ) -> switchboard::Result<Decision> {
        self.offered
            .lock()
            .unwrap()
            .push(actions.iter().map(|a| a.name.clone()).collect());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| EngineError::classifier("test script exhausted"))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Classifier that always selects the same action, whatever is offered
pub struct FixedActionClassifier {
    action: String,
}

impl FixedActionClassifier {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
        }
    }
}

#[async_trait]
impl IntentClassifier for FixedActionClassifier {
    async fn classify(
        &self,
        _transcript: &[Message],
        _actions: &[CandidateAction],
        _instructions: &str,
    ) -> switchboard::Result<Decision> {
        Ok(Decision::Action(ActionCall::new(
            self.action.clone(),
            serde_json::json!({}),
        )))
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// One recorded executor invocation
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub operation: String,
    pub arguments: serde_json::Value,
    pub access_token: String,
}

/// Executor that replays scripted results and records every invocation
#[derive(Default)]
pub struct RecordingExecutor {
    results: Mutex<VecDeque<Result<Vec<Record>, IntegrationError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_result(&self, result: Result<Vec<Record>, IntegrationError>) {
        self.results.lock().unwrap().push_back(result);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ActionExecutor for RecordingExecutor {
    async fn invoke(
        &self,
        operation: &str,
        arguments: &serde_json::Value,
        credentials: &CredentialBundle,
    ) -> Result<Vec<Record>, IntegrationError> {
        self.calls.lock().unwrap().push(RecordedCall {
            operation: operation.to_string(),
            arguments: arguments.clone(),
            access_token: credentials.access_token.clone(),
        });
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(vec![serde_json::json!({"id": "record-1"})]))
    }
}

/// Everything a test needs to drive and inspect one orchestrator
pub struct Harness {
    pub orchestrator: Orchestrator,
    pub executor: Arc<RecordingExecutor>,
    pub credentials: Arc<InMemoryCredentialStore>,
    pub usage: Arc<InMemoryUsageMeter>,
    pub transcripts: Arc<InMemoryTranscriptStore>,
}

/// Build an orchestrator over the builtin graph with one recording executor
/// registered for every integration group
pub fn harness(classifier: Arc<dyn IntentClassifier>) -> Harness {
    let executor = Arc::new(RecordingExecutor::new());
    let mut executors = ExecutorSet::new();
    for tag in [
        IntegrationTag::Mail,
        IntegrationTag::Tracker,
        IntegrationTag::Chat,
        IntegrationTag::Feed,
    ] {
        executors.register(tag, executor.clone());
    }

    let credentials = Arc::new(InMemoryCredentialStore::new());
    let usage = Arc::new(InMemoryUsageMeter::new());
    let transcripts = Arc::new(InMemoryTranscriptStore::new());

    let orchestrator = Orchestrator::new(
        default_registry(&Catalog::builtin()),
        classifier,
        executors,
        credentials.clone(),
        usage.clone(),
        transcripts.clone(),
    );

    Harness {
        orchestrator,
        executor,
        credentials,
        usage,
        transcripts,
    }
}

/// Decision selecting a transfer or operation by name, no arguments
pub fn select(action: &str) -> Decision {
    Decision::Action(ActionCall::new(action, serde_json::json!({})))
}

/// Decision selecting an operation with arguments
pub fn select_with(action: &str, arguments: serde_json::Value) -> Decision {
    Decision::Action(ActionCall::new(action, arguments))
}
