//! Wire types for the Responses API. Fully typed on both sides — the only
//! dynamic piece is [`ResponsesReply::collected_text`], which tolerates
//! segment variants the API has shipped over time (`output_text` vs `text`,
//! `text` vs `value` fields).

use serde::{Deserialize, Serialize};

// ─── Request ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ResponsesRequest {
    pub model: String,
    pub input: Vec<InputMessage>,
    pub temperature: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputMessage {
    pub role: String,
    pub content: String,
}

impl InputMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

// ─── Response ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct ResponsesReply {
    #[serde(default)]
    pub output: Vec<OutputItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputItem {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub content: Vec<ContentPart>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentPart {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

impl ResponsesReply {
    /// Concatenate every text segment of every message item, with all
    /// whitespace runs collapsed. Empty when the reply carried no text.
    pub fn collected_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        for item in &self.output {
            if item.kind != "message" {
                continue;
            }
            for part in &item.content {
                if part.kind != "output_text" && part.kind != "text" {
                    continue;
                }
                if let Some(t) = part.text.as_deref().or(part.value.as_deref()) {
                    if !t.is_empty() {
                        parts.push(t);
                    }
                }
            }
        }
        parts
            .join(" ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_text_across_items_and_variants() {
        let reply: ResponsesReply = serde_json::from_str(
            r#"{
                "output": [
                    {"type": "reasoning", "content": [{"type": "text", "text": "ignored"}]},
                    {"type": "message", "content": [
                        {"type": "output_text", "text": "Acme builds widgets. "},
                        {"type": "text", "value": "  Founded in 1949."}
                    ]}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(
            reply.collected_text(),
            "Acme builds widgets. Founded in 1949."
        );
    }

    #[test]
    fn empty_output_collects_nothing() {
        let reply: ResponsesReply = serde_json::from_str(r#"{"output": []}"#).unwrap();
        assert_eq!(reply.collected_text(), "");
    }

    #[test]
    fn missing_output_field_is_tolerated() {
        let reply: ResponsesReply = serde_json::from_str("{}").unwrap();
        assert_eq!(reply.collected_text(), "");
    }
}
