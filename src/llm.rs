use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Model identifier passed through to Workers AI as an opaque token.
pub const MODEL_ID: &str = "@cf/meta/llama-3.1-8b-instruct";

#[derive(Serialize)]
struct PromptRequest<'a> {
    prompt: &'a str,
}

/// What the model hands back: either bare generated text or a structured
/// value whose shape is model-dependent.
#[derive(Debug, Clone)]
pub enum InferenceOutput {
    Text(String),
    Structured(Value),
}

impl InferenceOutput {
    /// Normalizes the output to plain text. Precedence is fixed: a bare
    /// string wins, then a string-typed `response` field, and anything else
    /// is serialized back to JSON text.
    pub fn into_text(self) -> String {
        match self {
            InferenceOutput::Text(text) => text,
            InferenceOutput::Structured(value) => {
                match value.get("response").and_then(Value::as_str) {
                    Some(response) => response.to_string(),
                    None => value.to_string(),
                }
            }
        }
    }
}

/// Failure reported by the inference collaborator, carrying only a
/// human-readable message. Transient and permanent failures are not
/// distinguished and nothing is retried.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct InferenceError(pub String);

impl From<reqwest::Error> for InferenceError {
    fn from(err: reqwest::Error) -> Self {
        InferenceError(err.to_string())
    }
}

#[async_trait]
pub trait Inference: Send + Sync {
    async fn run(&self, model: &str, prompt: &str) -> Result<InferenceOutput, InferenceError>;
}

/// Client for the Workers AI REST API.
pub struct WorkersAi {
    client: Client,
    account_id: String,
    api_token: String,
}

impl WorkersAi {
    pub fn new(account_id: String, api_token: String) -> Self {
        WorkersAi {
            client: Client::new(),
            account_id,
            api_token,
        }
    }
}

#[derive(Deserialize)]
struct AiEnvelope {
    success: bool,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    errors: Vec<AiErrorDetail>,
}

#[derive(Deserialize)]
struct AiErrorDetail {
    message: String,
}

#[async_trait]
impl Inference for WorkersAi {
    async fn run(&self, model: &str, prompt: &str) -> Result<InferenceOutput, InferenceError> {
        let url = format!(
            "https://api.cloudflare.com/client/v4/accounts/{}/ai/run/{}",
            self.account_id, model
        );

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(&PromptRequest { prompt })
            .send()
            .await?;

        let envelope: AiEnvelope = res.json().await?;
        if !envelope.success {
            let detail = envelope
                .errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            let detail = if detail.is_empty() {
                "inference request failed".to_string()
            } else {
                detail
            };
            return Err(InferenceError(detail));
        }

        Ok(match envelope.result {
            Some(Value::String(text)) => InferenceOutput::Text(text),
            Some(value) => InferenceOutput::Structured(value),
            None => InferenceOutput::Structured(Value::Null),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_string_is_used_directly() {
        let out = InferenceOutput::Text("Summary: hi".to_string());
        assert_eq!(out.into_text(), "Summary: hi");
    }

    #[test]
    fn string_response_field_is_extracted() {
        let out = InferenceOutput::Structured(json!({ "response": "- point one" }));
        assert_eq!(out.into_text(), "- point one");
    }

    #[test]
    fn non_string_response_field_falls_back_to_serialization() {
        let out = InferenceOutput::Structured(json!({ "response": 5 }));
        assert_eq!(out.into_text(), r#"{"response":5}"#);
    }

    #[test]
    fn unknown_shape_is_serialized_as_json() {
        let out = InferenceOutput::Structured(json!({ "tokens": [1, 2, 3] }));
        assert_eq!(out.into_text(), r#"{"tokens":[1,2,3]}"#);
    }
}
