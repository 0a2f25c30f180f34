//! Request and response shapes for the completion endpoint.

use serde::{Deserialize, Serialize};

/// What a phase asks the generator for.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Short system directive.
    pub system: String,
    /// The phase prompt.
    pub prompt: String,
    /// Sampling temperature.
    pub temperature: f32,
}

impl GenerationRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(system: impl Into<String>, prompt: impl Into<String>, temperature: f32) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
            temperature,
        }
    }

    /// Converts into the wire body for `model`.
    #[must_use]
    pub fn to_completion(&self, model: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: model.to_owned(),
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: self.system.clone(),
                },
                ChatMessage {
                    role: Role::User,
                    content: self.prompt.clone(),
                },
            ],
            temperature: self.temperature,
        }
    }
}

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System directive.
    System,
    /// User prompt.
    User,
    /// Model reply.
    Assistant,
}

/// A role-tagged message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author role.
    pub role: Role,
    /// Message text.
    pub content: String,
}

/// Wire body of a chat-completion call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    /// Model identifier.
    pub model: String,
    /// Ordered conversation.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: f32,
}

/// Wire body of a chat-completion reply; only the text is kept.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    /// Candidate completions.
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

/// One candidate completion.
#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    /// The generated message.
    pub message: CompletionMessage,
}

/// Generated message body.
#[derive(Debug, Deserialize)]
pub struct CompletionMessage {
    /// Generated text; some providers send `null` on filtered output.
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if non-blank.
    #[must_use]
    pub fn into_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_body_has_system_then_user() {
        let request = GenerationRequest::new("be terse", "describe the mall", 0.8);

        let body = serde_json::to_value(request.to_completion("gpt-test")).unwrap();

        assert_eq!(body["model"], "gpt-test");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "be terse");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "describe the mall");
    }

    #[test]
    fn test_into_text_takes_first_non_blank_choice() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"  Rain falls.  "}}]}"#;
        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.into_text().as_deref(), Some("Rain falls."));
    }

    #[test]
    fn test_into_text_is_none_for_blank_or_missing_content() {
        let blank: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"   "}}]}"#).unwrap();
        let null: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        let empty: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();

        assert!(blank.into_text().is_none());
        assert!(null.into_text().is_none());
        assert!(empty.into_text().is_none());
    }
}
