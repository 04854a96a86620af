//! `openai-agent` — blocking client for the OpenAI Responses API, used to
//! turn scraped homepage content into a short company summary.
//!
//! # Architecture
//!
//! ```text
//! SummaryInput
//!     │
//!     ▼
//! SummaryClient    ← POST /v1/responses, bearer auth, typed payloads
//!     │               bounded retry: 5 attempts, exponential backoff
//!     │               + jitter, honoring numeric retry-after hints
//!     ▼
//! String           ← model text, or the deterministic local fallback
//! ```
//!
//! The public surface never fails: [`SummaryClient::summarize`] returns a
//! usable sentence even with no credentials, no network, or a misbehaving
//! API — the calling workflow must always be able to produce a page.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use openai_agent::{SummaryClient, SummaryInput};
//!
//! let client = SummaryClient::from_env();
//! let summary = client.summarize(&SummaryInput {
//!     company_name: "Acme Ltd".into(),
//!     website: "https://acme.com".into(),
//!     tone: "Professional".into(),
//!     page_title: "Acme — Widgets".into(),
//!     meta_description: "Industrial widgets since 1949.".into(),
//!     page_text: "…".into(),
//! });
//! println!("{summary}");
//! ```

pub mod client;
pub mod error;
pub mod types;

#[cfg(test)]
mod tests;

pub use client::{fallback, RetryPolicy, SummaryClient, SummaryInput, DEFAULT_MODEL};
pub use error::SummaryError;

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, SummaryError>;
