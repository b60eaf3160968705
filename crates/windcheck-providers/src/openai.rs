//! OpenAI-compatible scorer implementation.

use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use windcheck_core::traits::{AnswerScorer, ScoreReply, ScoreRequest};

use crate::error::ScorerError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Scorer backed by an OpenAI-compatible chat completion endpoint.
///
/// Every request pins `response_format` to `json_object` so the service
/// returns the strict-JSON verdict the prompt asks for.
pub struct OpenAiScorer {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiScorer {
    pub fn new(api_key: &str, base_url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            api_key: api_key.to_string(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client,
        }
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    max_tokens: u32,
    temperature: f64,
    response_format: ResponseFormat,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    model: String,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[async_trait]
impl AnswerScorer for OpenAiScorer {
    fn name(&self) -> &str {
        "openai"
    }

    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn score(&self, request: &ScoreRequest) -> anyhow::Result<ScoreReply> {
        let start = Instant::now();

        let body = ChatRequest {
            model: request.model.clone(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            response_format: ResponseFormat {
                kind: "json_object".to_string(),
            },
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: request.prompt.clone(),
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ScorerError::Timeout(DEFAULT_TIMEOUT_SECS)
                } else {
                    ScorerError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status == 429 {
            return Err(ScorerError::RateLimited.into());
        }
        if status == 401 {
            let body = response.text().await.unwrap_or_default();
            return Err(ScorerError::AuthenticationFailed(body).into());
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(ScorerError::ApiError {
                status,
                message: body,
            }
            .into());
        }

        let api_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| ScorerError::MalformedResponse(e.to_string()))?;

        let latency_ms = start.elapsed().as_millis() as u64;
        let content = api_response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .unwrap_or_default();

        Ok(ScoreReply {
            content,
            model: api_response.model,
            latency_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(prompt: &str) -> ScoreRequest {
        ScoreRequest {
            model: "gpt-4o".into(),
            prompt: prompt.into(),
            max_tokens: 512,
            temperature: 0.0,
        }
    }

    #[tokio::test]
    async fn successful_scoring_call() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "choices": [{"message": {"content": "{\"punkte\": 87, \"begruendung\": \"gut\"}", "role": "assistant"}, "index": 0}],
            "model": "gpt-4o"
        });

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .and(body_string_contains("json_object"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let scorer = OpenAiScorer::new("test-key", Some(server.uri()));
        let reply = scorer.score(&request("Bewerte diese Antwort")).await.unwrap();

        assert!(reply.content.contains("\"punkte\": 87"));
        assert_eq!(reply.model, "gpt-4o");
    }

    #[tokio::test]
    async fn prompt_is_sent_verbatim() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "choices": [{"message": {"content": "{}", "role": "assistant"}, "index": 0}],
            "model": "gpt-4o"
        });

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_string_contains("Blasenspeicher defekt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .expect(1)
            .mount(&server)
            .await;

        let scorer = OpenAiScorer::new("key", Some(server.uri()));
        scorer
            .score(&request("Ist der Blasenspeicher defekt?"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn auth_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
            .mount(&server)
            .await;

        let scorer = OpenAiScorer::new("bad-key", Some(server.uri()));
        let err = scorer.score(&request("test")).await.unwrap_err();
        assert!(err.to_string().contains("authentication"));
    }

    #[tokio::test]
    async fn server_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&server)
            .await;

        let scorer = OpenAiScorer::new("key", Some(server.uri()));
        let err = scorer.score(&request("test")).await.unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn malformed_completion_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let scorer = OpenAiScorer::new("key", Some(server.uri()));
        let err = scorer.score(&request("test")).await.unwrap_err();
        assert!(err.to_string().contains("malformed"));
    }
}
