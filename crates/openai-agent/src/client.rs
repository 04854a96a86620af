//! The summary client: prompt assembly, the retry state machine, and the
//! local fallback ladder.

use crate::error::SummaryError;
use crate::types::{InputMessage, ResponsesRequest, ResponsesReply};
use reqwest::header::HeaderMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Documented default model; override with `OPENAI_MODEL`.
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";

const OPENAI_BASE_URL: &str = "https://api.openai.com";
const RESPONSES_PATH: &str = "/v1/responses";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Page text is clamped before prompt assembly to reduce cost and
/// rate-limit pressure.
const PROMPT_TEXT_BUDGET: usize = 8_000;

const SYSTEM_PROMPT: &str =
    "You write concise, factual company summaries for internal demo directories.";

// ---------------------------------------------------------------------------
// SummaryInput
// ---------------------------------------------------------------------------

/// Everything the prompt needs: the parsed company request plus whatever the
/// fetcher extracted from the homepage (any field may be empty).
#[derive(Debug, Clone, Default)]
pub struct SummaryInput {
    pub company_name: String,
    pub website: String,
    pub tone: String,
    pub page_title: String,
    pub meta_description: String,
    pub page_text: String,
}

// ---------------------------------------------------------------------------
// RetryPolicy
// ---------------------------------------------------------------------------

/// Bounded retry with exponential backoff and jitter. Tests shrink the
/// delays; production uses the defaults.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(1500),
            max_jitter: Duration::from_millis(750),
        }
    }
}

impl RetryPolicy {
    /// `base × 2^(attempt-1)` plus uniform jitter in `[0, max_jitter)`.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let exp = self.base_delay.mul_f64(f64::powi(2.0, attempt as i32 - 1));
        let jitter = self.max_jitter.mul_f64(rand::random::<f64>());
        exp + jitter
    }
}

// ---------------------------------------------------------------------------
// SummaryClient
// ---------------------------------------------------------------------------

pub struct SummaryClient {
    http: reqwest::blocking::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    retry: RetryPolicy,
}

impl SummaryClient {
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        Self {
            http: reqwest::blocking::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
            api_key,
            model: model.into(),
            base_url: OPENAI_BASE_URL.to_string(),
            retry: RetryPolicy::default(),
        }
    }

    /// Configuration from `OPENAI_API_KEY` / `OPENAI_MODEL`. A missing or
    /// blank key is valid — the client then skips the network entirely and
    /// answers from the fallback.
    pub fn from_env() -> Self {
        let api_key = std::env::var("OPENAI_API_KEY").ok();
        let model = std::env::var("OPENAI_MODEL")
            .ok()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Self::new(api_key, model)
    }

    /// Point the client at a different endpoint (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Produce a 1–2 sentence summary for the company. Never fails: retries
    /// transient API errors with bounded backoff, then degrades to the
    /// deterministic local [`fallback`].
    pub fn summarize(&self, input: &SummaryInput) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("no API key configured; using fallback summary");
            return fallback(input);
        };

        let request = ResponsesRequest {
            model: self.model.clone(),
            input: vec![
                InputMessage::system(SYSTEM_PROMPT),
                InputMessage::user(build_prompt(input)),
            ],
            temperature: 0.4,
        };

        for attempt in 1..=self.retry.max_attempts {
            match self.attempt(api_key, &request) {
                Ok(text) => return text,
                Err(e) if e.is_retryable() => {
                    if attempt == self.retry.max_attempts {
                        break;
                    }
                    let delay = e
                        .retry_hint()
                        .unwrap_or_else(|| self.retry.backoff_delay(attempt));
                    debug!(
                        "summary attempt {attempt}/{} failed ({e}); retrying in {:.2}s",
                        self.retry.max_attempts,
                        delay.as_secs_f64()
                    );
                    std::thread::sleep(delay);
                }
                Err(e) => {
                    warn!("summary request failed permanently: {e}");
                    return fallback(input);
                }
            }
        }

        fallback(input)
    }

    /// One round trip. Transport errors and malformed success bodies both
    /// surface as `SummaryError::Http` (and are therefore retried).
    fn attempt(&self, api_key: &str, request: &ResponsesRequest) -> crate::Result<String> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, RESPONSES_PATH))
            .bearer_auth(api_key)
            .json(request)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SummaryError::Api {
                status: status.as_u16(),
                retry_after: retry_after_hint(resp.headers()),
            });
        }

        let reply: ResponsesReply = resp.json()?;
        let text = reply.collected_text();
        if text.is_empty() {
            return Err(SummaryError::EmptyOutput);
        }
        Ok(text)
    }
}

/// Numeric `retry-after` seconds, if the server sent one. HTTP-date values
/// are ignored.
fn retry_after_hint(headers: &HeaderMap) -> Option<Duration> {
    let raw = headers.get("retry-after")?.to_str().ok()?;
    let seconds: f64 = raw.trim().parse().ok()?;
    if seconds.is_finite() && seconds >= 0.0 {
        Some(Duration::from_secs_f64(seconds))
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Prompt
// ---------------------------------------------------------------------------

fn build_prompt(input: &SummaryInput) -> String {
    let page_text: String = input.page_text.chars().take(PROMPT_TEXT_BUDGET).collect();
    let website = if input.website.is_empty() {
        "(not provided)"
    } else {
        input.website.as_str()
    };

    format!(
        "You are generating short blurbs for an internal demo-site directory.\n\
         \n\
         Company name: {name}\n\
         Website: {website}\n\
         Tone: {tone}\n\
         \n\
         Use the information below from the company's website (it may be partial or messy).\n\
         Write a concise 1–2 sentence summary (max 45 words).\n\
         No hype, no markdown, no quotes. Don't mention that you're an AI.\n\
         \n\
         Page title: {title}\n\
         Meta description: {meta}\n\
         \n\
         Extracted text:\n\
         {page_text}",
        name = input.company_name,
        website = website,
        tone = input.tone,
        title = input.page_title,
        meta = input.meta_description,
        page_text = page_text,
    )
}

// ---------------------------------------------------------------------------
// Fallback
// ---------------------------------------------------------------------------

/// Best-effort summary when the API is unavailable: the page's own meta
/// description when it is substantial, else a name-referencing sentence when
/// the page at least had a title, else a fixed generic sentence.
pub fn fallback(input: &SummaryInput) -> String {
    let meta = input.meta_description.trim();
    if meta.chars().count() >= 40 {
        return meta.to_string();
    }
    if !input.page_title.trim().is_empty() {
        return format!(
            "{} — demo environment based on publicly available information.",
            input.company_name
        );
    }
    "Demo environment for this company.".to_string()
}
