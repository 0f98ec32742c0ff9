//! Chat-completion client for the ask/summarize/translate commands.
//!
//! One linear request/response call against an OpenAI-compatible
//! `/chat/completions` endpoint. No streaming, no retries, no history.
//! Each command carries its own sampling parameters: answers run warm,
//! summaries cooler, translations coolest with extra room for long output.
//!
//! # Example
//!
//! ```no_run
//! use clipvault_core::ai::{AiConfig, ask};
//!
//! # async fn example() -> clipvault_core::Result<()> {
//! let config = AiConfig { api_key: "sk-...".to_string(), ..Default::default() };
//! let answer = ask(&config, "What is a slug?").await?;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ClipvaultError, Result};

const ASK_TEMPERATURE: f64 = 0.7;
const ASK_MAX_TOKENS: u32 = 1000;
const SUMMARIZE_TEMPERATURE: f64 = 0.3;
const SUMMARIZE_MAX_TOKENS: u32 = 1000;
const TRANSLATE_TEMPERATURE: f64 = 0.2;
const TRANSLATE_MAX_TOKENS: u32 = 2000;

/// Connection settings for the chat-completion endpoint.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Bearer token for the API.
    pub api_key: String,
    /// Base URL ending at the API version, e.g. `https://api.openai.com/v1`.
    pub endpoint: String,
    /// Model identifier.
    pub model: String,
    /// Language for answers and summaries. Translation detects its own
    /// direction unless given an explicit target.
    pub language: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            language: "Japanese".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

fn chat_request<'a>(
    model: &'a str,
    system: &'a str,
    user: &'a str,
    temperature: f64,
    max_tokens: u32,
) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: vec![
            ChatMessage { role: "system", content: system },
            ChatMessage { role: "user", content: user },
        ],
        temperature,
        max_tokens,
    }
}

/// Send one system+user message pair and return the first choice's content.
pub async fn chat(
    config: &AiConfig,
    system: &str,
    user: &str,
    temperature: f64,
    max_tokens: u32,
) -> Result<String> {
    if config.api_key.trim().is_empty() {
        return Err(ClipvaultError::MissingConfiguration("API key"));
    }

    let request = chat_request(&config.model, system, user, temperature, max_tokens);

    let url = format!("{}/chat/completions", config.endpoint.trim_end_matches('/'));
    let response = reqwest::Client::new()
        .post(&url)
        .bearer_auth(&config.api_key)
        .json(&request)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::error!(%status, %body, "chat completion request rejected");
        return Err(ClipvaultError::ApiError(format!("endpoint returned {status}")));
    }

    let parsed: ChatResponse = response.json().await?;
    extract_answer(parsed)
}

fn extract_answer(response: ChatResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.is_empty())
        .ok_or_else(|| ClipvaultError::ApiError("response contained no answer".to_string()))
}

fn ask_system(language: &str) -> String {
    format!(
        "You are a helpful and knowledgeable AI assistant. Please answer the user's question clearly in {language}. Keep your answers concise and practical."
    )
}

fn summarize_system(language: &str) -> String {
    format!(
        "You are an expert at summarizing text in {language}. Please summarize the user's text in {language}.\n\
         Output rules:\n\
         - Use only {language}\n\
         - Output 3-10 bullet points\n\
         - Each bullet MUST be a single line starting with \"- \"\n\
         - Retain all specific numbers, names, dates, and URLs\n\
         - Do not add any new information or opinions\n\
         - Output bullets only, no preface or suffix"
    )
}

/// Without a target, translation is a Japanese/English pair that detects
/// the input's language and translates in the opposite direction.
fn translate_system(target: Option<&str>) -> String {
    let direction = match target {
        Some(language) => format!("Translate the user's text into {language}."),
        None => "Detect whether the user's text is Japanese or English. If Japanese, translate to English. If English, translate to Japanese.".to_string(),
    };
    format!(
        "You are a professional translator. {direction}\n\
         Rules:\n\
         - Preserve meaning, tone, and formatting (line breaks, lists)\n\
         - Keep numbers, names, URLs unchanged\n\
         - Output ONLY the translation, no extra text, no code blocks"
    )
}

/// Answer a free-form question in the configured language.
pub async fn ask(config: &AiConfig, question: &str) -> Result<String> {
    let system = ask_system(&config.language);
    chat(config, &system, question, ASK_TEMPERATURE, ASK_MAX_TOKENS).await
}

/// Summarize text as bullet points in the configured language.
pub async fn summarize(config: &AiConfig, text: &str) -> Result<String> {
    let system = summarize_system(&config.language);
    chat(config, &system, text, SUMMARIZE_TEMPERATURE, SUMMARIZE_MAX_TOKENS).await
}

/// Translate text, auto-detecting the Japanese/English direction unless
/// `target` names an explicit language.
pub async fn translate(config: &AiConfig, text: &str, target: Option<&str>) -> Result<String> {
    let system = translate_system(target);
    chat(config, &system, text, TRANSLATE_TEMPERATURE, TRANSLATE_MAX_TOKENS).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_parsing() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"An answer."}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(extract_answer(parsed).unwrap(), "An answer.");
    }

    #[test]
    fn test_empty_choices_is_an_error() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(extract_answer(parsed).is_err());
    }

    #[test]
    fn test_null_content_is_an_error() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(json).unwrap();
        assert!(extract_answer(parsed).is_err());
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let config = AiConfig::default();
        let result = ask(&config, "hello").await;
        assert!(matches!(result, Err(ClipvaultError::MissingConfiguration(_))));
    }

    #[test]
    fn test_per_command_sampling() {
        assert_eq!((ASK_TEMPERATURE, ASK_MAX_TOKENS), (0.7, 1000));
        assert_eq!((SUMMARIZE_TEMPERATURE, SUMMARIZE_MAX_TOKENS), (0.3, 1000));
        assert_eq!((TRANSLATE_TEMPERATURE, TRANSLATE_MAX_TOKENS), (0.2, 2000));
    }

    #[test]
    fn test_request_serialization_carries_sampling() {
        let system = translate_system(None);
        let request = chat_request("gpt-4o-mini", &system, "こんにちは", TRANSLATE_TEMPERATURE, TRANSLATE_MAX_TOKENS);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["temperature"], 0.2);
        assert_eq!(value["max_tokens"], 2000);
    }

    #[test]
    fn test_translate_prompt_detects_direction_by_default() {
        let system = translate_system(None);
        assert!(system.contains("If Japanese, translate to English"));
        assert!(system.contains("If English, translate to Japanese"));
        assert!(system.contains("Keep numbers, names, URLs unchanged"));
    }

    #[test]
    fn test_translate_prompt_with_explicit_target() {
        let system = translate_system(Some("French"));
        assert!(system.contains("into French"));
        assert!(!system.contains("Detect whether"));
    }

    #[test]
    fn test_ask_and_summarize_prompts_use_language() {
        assert!(ask_system("English").contains("clearly in English"));
        assert!(summarize_system("English").contains("summarizing text in English"));
    }
}
