//! OpenAI-compatible classifier implementation
//!
//! Async HTTP client for any chat-completions endpoint with function
//! calling. The first tool call in the response becomes the selected
//! action; a plain content response becomes a reply.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::traits::{Decision, IntentClassifier};
use crate::core::{ActionCall, CandidateAction, Config, EngineError, Message, Result, Role};

/// Chat-completions classifier client
#[derive(Clone)]
pub struct OpenAiClassifier {
    client: Client,
    url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

/// Chat request payload
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<WireTool<'a>>>,
    temperature: f32,
}

/// Wire message format
#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

/// Wire tool definition
#[derive(Debug, Serialize)]
struct WireTool<'a> {
    #[serde(rename = "type")]
    tool_type: &'static str,
    function: &'a CandidateAction,
}

/// Chat response payload
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Debug, Deserialize)]
struct WireToolCall {
    function: WireFunctionCall,
}

#[derive(Debug, Deserialize)]
struct WireFunctionCall {
    name: String,
    /// JSON-encoded argument object
    arguments: String,
}

impl OpenAiClassifier {
    /// Create a classifier from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config
            .classifier
            .api_key
            .clone()
            .ok_or_else(|| EngineError::config("classifier API key is not set"))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.classifier.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: config.classifier_url(),
            api_key,
            model: config.classifier.model.clone(),
            temperature: config.classifier.temperature,
        })
    }

    /// Convert an engine message to the wire format
    fn to_wire_message(msg: &Message) -> WireMessage {
        WireMessage {
            role: match msg.role {
                Role::User => "user".to_string(),
                Role::Assistant => "assistant".to_string(),
            },
            content: msg.content.clone(),
        }
    }
}

#[async_trait]
impl IntentClassifier for OpenAiClassifier {
    async fn classify(
        &self,
        transcript: &[Message],
        actions: &[CandidateAction],
        instructions: &str,
    ) -> Result<Decision> {
        let mut messages = vec![WireMessage {
            role: "system".to_string(),
            content: instructions.to_string(),
        }];
        messages.extend(transcript.iter().map(Self::to_wire_message));

        let tools = if actions.is_empty() {
            None
        } else {
            Some(
                actions
                    .iter()
                    .map(|action| WireTool {
                        tool_type: "function",
                        function: action,
                    })
                    .collect(),
            )
        };

        let request = ChatRequest {
            model: &self.model,
            messages,
            tools,
            temperature: self.temperature,
        };

        debug!(model = %self.model, candidates = actions.len(), "classifying transcript");

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::classifier(format!(
                "backend returned {status}: {body}"
            )));
        }

        let parsed: ChatResponse = response.json().await?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| EngineError::classifier("backend returned no choices"))?;

        if let Some(call) = choice
            .message
            .tool_calls
            .and_then(|calls| calls.into_iter().next())
        {
            let arguments: serde_json::Value = serde_json::from_str(&call.function.arguments)
                .map_err(|e| {
                    EngineError::classifier(format!(
                        "unparseable arguments for {}: {e}",
                        call.function.name
                    ))
                })?;
            return Ok(Decision::Action(ActionCall::new(
                call.function.name,
                arguments,
            )));
        }

        Ok(Decision::Reply(
            choice.message.content.unwrap_or_default(),
        ))
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_message_roles() {
        let wire = OpenAiClassifier::to_wire_message(&Message::user("hi"));
        assert_eq!(wire.role, "user");

        let wire = OpenAiClassifier::to_wire_message(&Message::assistant("hello"));
        assert_eq!(wire.role, "assistant");
    }

    #[test]
    fn test_tool_call_deserialization() {
        let raw = r#"{
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "function": {"name": "get_emails", "arguments": "{\"query\": \"is:unread\"}"}
                    }]
                }
            }]
        }"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        let call = parsed.choices[0].message.tool_calls.as_ref().unwrap();
        assert_eq!(call[0].function.name, "get_emails");
    }

    #[test]
    fn test_plain_reply_deserialization() {
        let raw = r#"{"choices": [{"message": {"content": "I cannot help with that"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert!(parsed.choices[0].message.tool_calls.is_none());
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("I cannot help with that")
        );
    }
}
