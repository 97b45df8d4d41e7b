//! HTTP client for the translation providers.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Local;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use super::chunk::{build_prompt, split_content};
use super::config::{Provider, TranslationConfig};
use super::translated_path;
use crate::error::{Error, Result};

/// Attempts per chunk.
pub const MAX_ATTEMPTS: usize = 3;

/// Wait before retry `n` is `n * RETRY_BASE_DELAY` (5 s, then 10 s).
pub const RETRY_BASE_DELAY: Duration = Duration::from_secs(5);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Characters of an error body kept in [`Error::Api`].
const ERROR_BODY_CHARS: usize = 200;

/// Delay before retry number `attempt`: the base delay times the attempt.
fn retry_wait(base: Duration, attempt: usize) -> Duration {
    base.saturating_mul(u32::try_from(attempt).unwrap_or(u32::MAX))
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
    content: String,
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: String,
}

/// Translated text of an OpenAI-compatible chat completion.
pub fn parse_chat_response(body: &str) -> Result<String> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| Error::MalformedResponse(e.to_string()))?;
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.trim().to_string())
        .ok_or_else(|| Error::MalformedResponse("no choices in response".to_string()))
}

/// Translated text of a Gemini `generateContent` response.
pub fn parse_gemini_response(body: &str) -> Result<String> {
    let response: GeminiResponse =
        serde_json::from_str(body).map_err(|e| Error::MalformedResponse(e.to_string()))?;
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content.parts.into_iter().next())
        .map(|part| part.text.trim().to_string())
        .ok_or_else(|| Error::MalformedResponse("no candidates in response".to_string()))
}

/// Chunked Markdown translator.
///
/// Chunks are sent one at a time; each is retried up to [`MAX_ATTEMPTS`]
/// times. Progress messages are kept for [`Translator::save_log`].
pub struct Translator {
    config: TranslationConfig,
    client: reqwest::Client,
    retry_delay: Duration,
    log: Vec<String>,
}

impl Translator {
    /// Build a translator.
    ///
    /// # Errors
    ///
    /// [`Error::MissingApiKey`] if the provider needs a key and none is set,
    /// [`Error::Http`] if the HTTP client cannot be built.
    pub fn new(config: TranslationConfig) -> Result<Self> {
        if config.provider.requires_api_key() && config.api_key.is_none() {
            return Err(Error::MissingApiKey(config.provider.name()));
        }
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            config,
            client,
            retry_delay: RETRY_BASE_DELAY,
            log: Vec::new(),
        })
    }

    /// Override the base retry delay.
    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    #[must_use]
    pub fn config(&self) -> &TranslationConfig {
        &self.config
    }

    /// Timestamped progress messages so far.
    #[must_use]
    pub fn log_messages(&self) -> &[String] {
        &self.log
    }

    fn note(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!(target: "rs_mdclean::translate", "{message}");
        self.log
            .push(format!("[{}] {message}", Local::now().format("%Y-%m-%d %H:%M:%S")));
    }

    /// The HTTP request for one prompt.
    pub fn build_request(&self, prompt: &str) -> reqwest::RequestBuilder {
        let config = &self.config;
        match config.provider {
            Provider::Gemini => {
                let url = format!("{}/models/{}:generateContent", config.api_base, config.model);
                let mut generation = json!({ "temperature": config.temperature });
                if let Some(max) = config.max_tokens {
                    generation["maxOutputTokens"] = Value::from(max);
                }
                let body = json!({
                    "contents": [{ "parts": [{ "text": prompt }] }],
                    "generationConfig": generation,
                });
                self.client
                    .post(url)
                    .query(&[("key", config.api_key.as_deref().unwrap_or_default())])
                    .json(&body)
            }
            Provider::OpenAi | Provider::Ollama => {
                let url = format!("{}/chat/completions", config.api_base);
                let mut body = json!({
                    "model": config.model,
                    "messages": [{ "role": "user", "content": prompt }],
                    "temperature": config.temperature,
                });
                if let Some(max) = config.max_tokens {
                    body["max_tokens"] = Value::from(max);
                }
                let request = self.client.post(url).json(&body);
                match config.api_key.as_deref() {
                    Some(key) => request.bearer_auth(key),
                    None => request,
                }
            }
        }
    }

    async fn call(&self, prompt: &str) -> Result<String> {
        let response = self.build_request(prompt).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_CHARS).collect(),
            });
        }
        match self.config.provider {
            Provider::Gemini => parse_gemini_response(&body),
            Provider::OpenAi | Provider::Ollama => parse_chat_response(&body),
        }
    }

    /// Translate one chunk, retrying with a growing delay.
    pub async fn translate_chunk(&mut self, chunk: &str, number: usize, total: usize) -> Result<String> {
        self.note(format!(
            "Translating chunk {number}/{total} ({} chars)...",
            chunk.chars().count()
        ));
        let prompt = build_prompt(chunk, &self.config.target_language);

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.call(&prompt).await {
                Ok(translated) => {
                    self.note(format!(
                        "Chunk {number}/{total} translated ({} chars)",
                        translated.chars().count()
                    ));
                    return Ok(translated);
                }
                Err(err) if attempt < MAX_ATTEMPTS => {
                    let wait = retry_wait(self.retry_delay, attempt);
                    warn!(attempt, error = %err, "translation attempt failed");
                    self.note(format!("Attempt {attempt} failed: {err}"));
                    self.note(format!("  Retrying in {} seconds...", wait.as_secs()));
                    tokio::time::sleep(wait).await;
                }
                Err(err) => {
                    self.note(format!("All {MAX_ATTEMPTS} attempts failed for chunk {number}"));
                    return Err(Error::Translation {
                        chunk: number,
                        total,
                        attempts: attempt,
                        source: Box::new(err),
                    });
                }
            }
        }
    }

    /// Translate `content` chunk by chunk; chunks are joined by a blank line.
    pub async fn translate(&mut self, content: &str) -> Result<String> {
        let chunks = split_content(content, self.config.chunk_size);
        let total = chunks.len();
        if total > 1 {
            self.note(format!("Split into {total} chunks for translation"));
        }

        let mut translated = Vec::with_capacity(total);
        for (i, chunk) in chunks.iter().enumerate() {
            translated.push(self.translate_chunk(chunk, i + 1, total).await?);
        }
        Ok(translated.join("\n\n"))
    }

    /// Translate a Markdown file.
    ///
    /// Without `output`, writes `<stem>_<language code><ext>` beside the
    /// input. Returns the path written.
    pub async fn translate_file(&mut self, input: &Path, output: Option<&Path>) -> Result<PathBuf> {
        self.note(format!("Starting translation: {}", input.display()));
        let config_json = self.config.to_json();
        self.note(format!("Config: {config_json}"));

        let content = fs::read_to_string(input)?;
        self.note(format!("Loaded file: {} characters", content.chars().count()));

        let translated = self.translate(&content).await?;
        let path = output.map_or_else(
            || translated_path(input, &self.config.target_language),
            Path::to_path_buf,
        );
        fs::write(&path, &translated)?;
        self.note(format!("Translation completed: {}", path.display()));
        self.note(format!("Output size: {} characters", translated.chars().count()));
        Ok(path)
    }

    /// Write the progress messages to `path`, creating parent directories.
    pub fn save_log(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut text = self.log.join("\n");
        text.push('\n');
        fs::write(path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_json(request: &reqwest::Request) -> Value {
        let bytes = request.body().and_then(|b| b.as_bytes()).unwrap_or_default();
        match serde_json::from_slice(bytes) {
            Ok(value) => value,
            Err(err) => panic!("request body is not JSON: {err}"),
        }
    }

    fn translator(config: TranslationConfig) -> Translator {
        match Translator::new(config) {
            Ok(t) => t,
            Err(err) => panic!("translator: {err}"),
        }
    }

    #[test]
    fn test_parse_chat_response() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  你好  "}}]}"#;
        assert_eq!(parse_chat_response(body).ok().as_deref(), Some("你好"));
        assert!(matches!(parse_chat_response(r#"{"choices":[]}"#), Err(Error::MalformedResponse(_))));
        assert!(matches!(parse_chat_response("not json"), Err(Error::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_gemini_response() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Bonjour\n"}]}}]}"#;
        assert_eq!(parse_gemini_response(body).ok().as_deref(), Some("Bonjour"));
    }

    #[test]
    fn test_gemini_requires_key() {
        let result = Translator::new(TranslationConfig::new(Provider::Gemini));
        assert!(matches!(result, Err(Error::MissingApiKey("gemini"))));
    }

    #[test]
    fn test_openai_request_shape() {
        let mut config = TranslationConfig::default().with_api_key("sk-test");
        config.max_tokens = Some(512);
        let t = translator(config);
        let request = match t.build_request("hello").build() {
            Ok(r) => r,
            Err(err) => panic!("request: {err}"),
        };
        assert_eq!(request.url().as_str(), "https://api.openai.com/v1/chat/completions");
        assert_eq!(
            request.headers().get("authorization").and_then(|v| v.to_str().ok()),
            Some("Bearer sk-test")
        );
        let body = body_json(&request);
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["content"], "hello");
        assert_eq!(body["max_tokens"], 512);
    }

    #[test]
    fn test_ollama_request_has_no_auth() {
        let t = translator(TranslationConfig::new(Provider::Ollama));
        let request = match t.build_request("hi").build() {
            Ok(r) => r,
            Err(err) => panic!("request: {err}"),
        };
        assert_eq!(request.url().as_str(), "http://localhost:11434/v1/chat/completions");
        assert!(request.headers().get("authorization").is_none());
    }

    #[test]
    fn test_gemini_request_shape() {
        let t = translator(TranslationConfig::new(Provider::Gemini).with_api_key("g-key"));
        let request = match t.build_request("hola").build() {
            Ok(r) => r,
            Err(err) => panic!("request: {err}"),
        };
        assert_eq!(
            request.url().as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash-exp:generateContent?key=g-key"
        );
        let body = body_json(&request);
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hola");
        assert!(body["generationConfig"]["maxOutputTokens"].is_null());
    }

    #[test]
    fn test_retry_wait_grows_with_attempt() {
        assert_eq!(retry_wait(RETRY_BASE_DELAY, 1), Duration::from_secs(5));
        assert_eq!(retry_wait(RETRY_BASE_DELAY, 2), Duration::from_secs(10));
        assert_eq!(retry_wait(Duration::from_secs(1), usize::MAX), Duration::from_secs(u64::from(u32::MAX)));
        assert_eq!(retry_wait(Duration::MAX, 2), Duration::MAX);
    }

    #[tokio::test]
    async fn test_unreachable_provider_exhausts_retries() {
        let mut config = TranslationConfig::new(Provider::Ollama).with_api_base("http://127.0.0.1:9/v1");
        config.timeout_secs = 2;
        let mut t = translator(config).with_retry_delay(Duration::ZERO);

        match t.translate("# Title").await {
            Err(Error::Translation { chunk, total, attempts, .. }) => {
                assert_eq!((chunk, total, attempts), (1, 1, MAX_ATTEMPTS));
            }
            other => panic!("expected a translation error, got {other:?}"),
        }
        assert!(t.log_messages().iter().any(|m| m.contains("All 3 attempts failed")));
    }
}
