//! Recovery and termination behavior of the turn engine
//!
//! Exercises the failure paths: integration errors, unclassifiable steps,
//! cyclic routing, and contract violations from misbehaving nodes.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use common::{harness, select, select_with, FixedActionClassifier, ScriptedClassifier};
use switchboard::agent::{
    handles, Agent, AgentRegistry, AgentResponse, Orchestrator, StepContext, Transfer, TriageAgent,
    TurnRequest,
};
use switchboard::classifier::Decision;
use switchboard::core::{EngineError, Message};
use switchboard::integrations::{
    CredentialBundle, ExecutorSet, IntegrationError, IntegrationTag,
};
use switchboard::store::{InMemoryCredentialStore, InMemoryTranscriptStore, InMemoryUsageMeter};

fn tracker_request(message: Message) -> TurnRequest {
    TurnRequest {
        message,
        prior_transcript: vec![],
        authorization_key: "key-1".to_string(),
        integrations: vec![IntegrationTag::Tracker],
        instance: None,
    }
}

/// An executor failure becomes a recoverable message explained by the
/// summarizer, never an error out of the loop
#[tokio::test]
async fn integration_error_converts_to_recoverable() {
    let classifier = Arc::new(ScriptedClassifier::new(vec![
        select("transfer_to_tracker"),
        select("transfer_to_tracker_actions"),
        select_with("create_issue", json!({"title": "Fix login"})),
        Decision::Reply("Creating the issue failed upstream; nothing was changed.".to_string()),
    ]));
    let h = harness(classifier.clone());
    h.credentials.insert(
        "key-1",
        IntegrationTag::Tracker,
        CredentialBundle::bearer("tracker-token"),
    );
    h.executor
        .push_result(Err(IntegrationError::Upstream("503 from tracker".to_string())));

    let outcome = h
        .orchestrator
        .run_turn(tracker_request(Message::user("open a bug for the login issue")))
        .await
        .unwrap();

    // The failure went straight to the summary node
    assert_eq!(classifier.calls(), 4);
    assert!(outcome.transcript.iter().all(|m| !m.error));
    assert!(outcome.transcript[1].content.contains("nothing was changed"));

    // The recoverable message survives in the persisted transcript
    let stored = h.transcripts.get(&outcome.instance).unwrap();
    let flagged = stored.transcript.iter().find(|m| m.error).unwrap();
    assert!(flagged.content.contains("503 from tracker"));
}

/// A plain reply at an action node is treated like a routing failure:
/// terminal through summary, raw reply preserved for the summarizer
#[tokio::test]
async fn unclassifiable_action_step_terminates_via_summary() {
    let classifier = Arc::new(ScriptedClassifier::new(vec![
        select("transfer_to_tracker"),
        select("transfer_to_tracker_actions"),
        Decision::Reply("I can only manage tracker issues, not payroll.".to_string()),
        Decision::Reply("That request is outside what the tracker can do.".to_string()),
    ]));
    let h = harness(classifier);
    h.credentials.insert(
        "key-1",
        IntegrationTag::Tracker,
        CredentialBundle::bearer("tracker-token"),
    );

    let outcome = h
        .orchestrator
        .run_turn(tracker_request(Message::user("give everyone a raise")))
        .await
        .unwrap();

    assert_eq!(h.executor.call_count(), 0);
    assert_eq!(outcome.transcript.len(), 2);
    assert!(outcome.transcript[1].content.contains("outside what the tracker"));
}

/// Two triage nodes transferring to each other forever must hit the step
/// budget and surface a system error instead of hanging
#[tokio::test]
async fn cyclic_routing_hits_step_budget() {
    let mut registry = AgentRegistry::new();
    registry.insert(
        handles::MAIN_TRIAGE,
        Arc::new(TriageAgent::new(
            "ping",
            None,
            "route",
            vec![Transfer::new("transfer_to_peer", "bounce", "pong")],
            "pong",
        )) as Arc<dyn Agent>,
    );
    registry.insert(
        "pong",
        Arc::new(TriageAgent::new(
            "pong",
            None,
            "route",
            vec![Transfer::new("transfer_to_peer", "bounce", handles::MAIN_TRIAGE)],
            handles::MAIN_TRIAGE,
        )) as Arc<dyn Agent>,
    );

    let usage = Arc::new(InMemoryUsageMeter::new());
    let transcripts = Arc::new(InMemoryTranscriptStore::new());
    let orchestrator = Orchestrator::new(
        registry,
        Arc::new(FixedActionClassifier::new("transfer_to_peer")),
        ExecutorSet::new(),
        Arc::new(InMemoryCredentialStore::new()),
        usage.clone(),
        transcripts.clone(),
    )
    .with_max_steps(6);

    let err = orchestrator
        .run_turn(TurnRequest {
            message: Message::user("loop forever"),
            prior_transcript: vec![],
            authorization_key: "key-1".to_string(),
            integrations: vec![],
            instance: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::System(_)));
    assert_eq!(usage.count("key-1"), 0);
    assert!(transcripts.is_empty());
}

/// A hand-off to an unregistered handle is a system error
#[tokio::test]
async fn unknown_handle_is_fatal() {
    let mut registry = AgentRegistry::new();
    registry.insert(
        handles::MAIN_TRIAGE,
        Arc::new(TriageAgent::new(
            "entry",
            None,
            "route",
            vec![Transfer::new("transfer_to_peer", "bounce", "nowhere")],
            "nowhere",
        )) as Arc<dyn Agent>,
    );

    let orchestrator = Orchestrator::new(
        registry,
        Arc::new(FixedActionClassifier::new("transfer_to_peer")),
        ExecutorSet::new(),
        Arc::new(InMemoryCredentialStore::new()),
        Arc::new(InMemoryUsageMeter::new()),
        Arc::new(InMemoryTranscriptStore::new()),
    );

    let err = orchestrator
        .run_turn(TurnRequest {
            message: Message::user("go"),
            prior_transcript: vec![],
            authorization_key: "key-1".to_string(),
            integrations: vec![],
            instance: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::System(_)));
}

/// A node claiming to be triage while emitting record data violates the
/// engine's invariant and fails the turn
struct RogueTriage;

#[async_trait]
impl Agent for RogueTriage {
    fn name(&self) -> &str {
        "rogue"
    }

    fn integration(&self) -> Option<IntegrationTag> {
        None
    }

    fn is_triage(&self) -> bool {
        true
    }

    async fn step(&self, _ctx: StepContext<'_>) -> switchboard::Result<AgentResponse> {
        Ok(AgentResponse::terminal(Message::assistant_with_data(
            "smuggled records",
            vec![json!({"id": 1})],
        )))
    }
}

#[tokio::test]
async fn triage_node_emitting_data_is_a_contract_violation() {
    let mut registry = AgentRegistry::new();
    registry.insert(handles::MAIN_TRIAGE, Arc::new(RogueTriage) as Arc<dyn Agent>);

    let orchestrator = Orchestrator::new(
        registry,
        Arc::new(FixedActionClassifier::new("unused")),
        ExecutorSet::new(),
        Arc::new(InMemoryCredentialStore::new()),
        Arc::new(InMemoryUsageMeter::new()),
        Arc::new(InMemoryTranscriptStore::new()),
    );

    let err = orchestrator
        .run_turn(TurnRequest {
            message: Message::user("go"),
            prior_transcript: vec![],
            authorization_key: "key-1".to_string(),
            integrations: vec![],
            instance: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::Contract(_)));
}

/// A fire-and-forget operation tolerates an empty result set
#[tokio::test]
async fn send_operations_accept_empty_results() {
    let classifier = Arc::new(ScriptedClassifier::new(vec![
        select("transfer_to_chat"),
        select("transfer_to_chat_actions"),
        select_with("send_message", json!({"channel_id": "C42", "text": "ship it"})),
        select("transfer_to_summary"),
        Decision::Reply("Message sent to the channel.".to_string()),
    ]));
    let h = harness(classifier);
    h.credentials.insert(
        "key-1",
        IntegrationTag::Chat,
        CredentialBundle::bearer("chat-token"),
    );
    h.executor.push_result(Ok(vec![]));

    let outcome = h
        .orchestrator
        .run_turn(TurnRequest {
            message: Message::user("tell #deploys to ship it"),
            prior_transcript: vec![],
            authorization_key: "key-1".to_string(),
            integrations: vec![IntegrationTag::Chat],
            instance: None,
        })
        .await
        .unwrap();

    // Empty result is success for send_message: no recoverable detour
    assert!(outcome.transcript.iter().all(|m| !m.error));
    assert_eq!(outcome.transcript[1].content, "Chat message sent successfully");
}
