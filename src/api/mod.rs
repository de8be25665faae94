//! Wire payloads for the OpenAI-compatible chat completions and models
//! endpoints.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
pub struct ResponseMessage {
    pub role: Option<String>,
    pub content: Option<String>,
}

#[derive(Deserialize)]
pub struct ChatChoice {
    pub message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
pub struct ModelInfo {
    pub id: String,
}

#[derive(Deserialize)]
pub struct ModelsResponse {
    #[serde(default)]
    pub data: Vec<ModelInfo>,
}

pub mod client;
pub mod models;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_response_deserializes_first_choice_content() {
        let payload = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "hello there"}}
            ]
        }"#;
        let response: ChatResponse = serde_json::from_str(payload).expect("valid payload");
        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_deref());
        assert_eq!(content, Some("hello there"));
    }

    #[test]
    fn chat_response_tolerates_missing_choices() {
        let response: ChatResponse = serde_json::from_str("{}").expect("valid payload");
        assert!(response.choices.is_empty());
    }

    #[test]
    fn chat_request_serializes_user_message() {
        let request = ChatRequest {
            model: "test-model".to_string(),
            messages: vec![ChatMessage::user("hi")],
        };
        let json = serde_json::to_value(&request).expect("serializable");
        assert_eq!(json["model"], "test-model");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hi");
    }
}
