//! AI-generated command suggestions.
//!
//! The search engine never calls into this module; it backs the separate
//! "ask the assistant" endpoints.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use crate::config::AiConfig;
use crate::constants::{
    AI_EXPLAIN_TEMPERATURE, AI_MAX_SUGGESTIONS, AI_MAX_TOKENS, AI_SUGGEST_TEMPERATURE,
};
use crate::error::SuggestError;

const SUGGEST_PROMPT: &str = "Jesteś ekspertem Linux pomagającym użytkownikom znaleźć odpowiednie polecenia terminala.
Gdy użytkownik poda zapytanie, zasugeruj maksymalnie 3 najlepsze polecenia Linux i wyjaśnij dlaczego są odpowiednie.
Odpowiedź zwróć w formacie JSON:
{
  \"suggestedCommands\": [\"polecenie1\", \"polecenie2\", \"polecenie3\"],
  \"explanation\": \"Krótkie wyjaśnienie dlaczego te polecenia są odpowiednie\",
  \"confidence\": 0.85
}
Używaj tylko popularnych i bezpiecznych poleceń Linux. Confidence to wartość od 0 do 1 wskazująca jak bardzo jesteś pewien sugestii.";

const EXPLAIN_PROMPT: &str = "Jesteś ekspertem Linux. Wyjaśnij podane polecenie w prosty i zrozumiały sposób po polsku.
Skup się na tym co robi polecenie, jakie parametry używa i kiedy może być przydatne.
Odpowiedź zwróć w formacie JSON:
{
  \"explanation\": \"Szczegółowe wyjaśnienie polecenia\"
}";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSuggestion {
    pub suggested_commands: Vec<String>,
    pub explanation: String,
    pub confidence: f32,
}

#[derive(Debug, Deserialize)]
struct Explanation {
    explanation: String,
}

/// A text-generation backend that can propose and explain shell commands.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    async fn suggest(&self, query: &str) -> Result<AiSuggestion, SuggestError>;

    async fn explain(&self, command: &str) -> Result<String, SuggestError>;
}

/// Parse the model's JSON answer to a suggestion prompt.
pub fn parse_suggestion(content: &str) -> Result<AiSuggestion, SuggestError> {
    let mut parsed: AiSuggestion = serde_json::from_str(strip_code_fence(content))
        .map_err(|e| SuggestError::Malformed(e.to_string()))?;
    parsed.suggested_commands.truncate(AI_MAX_SUGGESTIONS);
    parsed.confidence = if parsed.confidence.is_nan() {
        0.0
    } else {
        parsed.confidence.clamp(0.0, 1.0)
    };
    Ok(parsed)
}

pub fn parse_explanation(content: &str) -> Result<String, SuggestError> {
    let parsed: Explanation = serde_json::from_str(strip_code_fence(content))
        .map_err(|e| SuggestError::Malformed(e.to_string()))?;
    Ok(parsed.explanation)
}

// Models sometimes wrap JSON in a ```json fence.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// OpenAI-compatible chat-completions client.
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiProvider {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, model: impl Into<String>) -> Self {
        OpenAiProvider {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    /// Build a provider from config; fails when no API key is set.
    pub fn from_config(cfg: &AiConfig) -> Result<Self, SuggestError> {
        match cfg.api_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(Self::new(key, &cfg.base_url, &cfg.model)),
            _ => Err(SuggestError::NotConfigured),
        }
    }

    async fn complete(&self, system: &str, user: &str, temperature: f32) -> Result<String, SuggestError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "temperature": temperature,
            "max_tokens": AI_MAX_TOKENS,
        });

        debug!(%url, model = %self.model, "requesting completion");
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "completion request rejected");
            return Err(SuggestError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = resp.json().await?;
        chat.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(SuggestError::EmptyResponse)
    }
}

#[async_trait]
impl SuggestionProvider for OpenAiProvider {
    async fn suggest(&self, query: &str) -> Result<AiSuggestion, SuggestError> {
        let content = self
            .complete(SUGGEST_PROMPT, query, AI_SUGGEST_TEMPERATURE)
            .await?;
        parse_suggestion(&content)
    }

    async fn explain(&self, command: &str) -> Result<String, SuggestError> {
        let user = format!("Wyjaśnij polecenie: {command}");
        let content = self
            .complete(EXPLAIN_PROMPT, &user, AI_EXPLAIN_TEMPERATURE)
            .await?;
        parse_explanation(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_bounds_suggestion() {
        let s = parse_suggestion(
            r#"{"suggestedCommands":["ls","ls -la","tree","find ."],"explanation":"lists","confidence":1.7}"#,
        )
        .unwrap();
        assert_eq!(s.suggested_commands, ["ls", "ls -la", "tree"]);
        assert_eq!(s.confidence, 1.0);
    }

    #[test]
    fn accepts_fenced_json() {
        let s = parse_suggestion(
            "```json\n{\"suggestedCommands\":[\"df -h\"],\"explanation\":\"disk\",\"confidence\":0.5}\n```",
        )
        .unwrap();
        assert_eq!(s.suggested_commands, ["df -h"]);
        assert_eq!(parse_explanation("```\n{\"explanation\":\"x\"}\n```").unwrap(), "x");
    }

    #[test]
    fn rejects_non_json() {
        assert!(matches!(
            parse_suggestion("Try ls."),
            Err(SuggestError::Malformed(_))
        ));
    }

    #[test]
    fn missing_key_is_not_configured() {
        let cfg = AiConfig {
            api_key: None,
            ..AiConfig::default()
        };
        assert!(matches!(
            OpenAiProvider::from_config(&cfg),
            Err(SuggestError::NotConfigured)
        ));
    }
}
