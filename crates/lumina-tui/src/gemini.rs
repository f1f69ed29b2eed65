//! Gemini streaming backend.
//!
//! POSTs to `models/{model}:streamGenerateContent?alt=sse` and forwards every
//! text part of every server-sent event as it arrives.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, trace};

use lumina_core::chat::{ChatBackend, ChatError, ChatTurn, Role, SYSTEM_PROMPT};
use lumina_core::config::ChatConfig;

pub struct GeminiBackend {
    http_client: reqwest::Client,
    endpoint: String,
    model: String,
    temperature: f32,
    api_key: String,
}

impl GeminiBackend {
    pub fn new(config: &ChatConfig, api_key: String) -> anyhow::Result<Self> {
        Ok(Self {
            http_client: reqwest::Client::builder()
                .connect_timeout(Duration::from_secs(10))
                .build()?,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            api_key,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.endpoint, self.model
        )
    }
}

/// Request body: persona, prior turns plus the new message, temperature.
///
/// The service wants the conversation to open with a user turn, so leading
/// model turns (the greeting) are dropped.
pub fn request_body(history: &[ChatTurn], message: &str, temperature: f32) -> Value {
    let contents: Vec<Value> = history
        .iter()
        .skip_while(|t| t.role == Role::Model)
        .filter(|t| !t.text.is_empty())
        .map(|t| json!({ "role": t.role.as_str(), "parts": [{ "text": t.text }] }))
        .chain(std::iter::once(
            json!({ "role": "user", "parts": [{ "text": message }] }),
        ))
        .collect();

    json!({
        "systemInstruction": { "parts": [{ "text": SYSTEM_PROMPT }] },
        "contents": contents,
        "generationConfig": { "temperature": temperature },
    })
}

#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Text fragments carried by one `data:` payload.
fn fragments(data: &str) -> Result<Vec<String>, ChatError> {
    let chunk: StreamChunk =
        serde_json::from_str(data).map_err(|e| ChatError::Decode(e.to_string()))?;
    Ok(chunk
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default())
}

/// Splits a byte stream into SSE lines. Buffers raw bytes so multi-byte
/// characters split across network chunks survive.
#[derive(Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    /// Feed bytes; returns the text fragments of every complete event line.
    pub fn push(&mut self, bytes: &[u8]) -> Result<Vec<String>, ChatError> {
        self.buffer.extend_from_slice(bytes);
        let mut out = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            out.extend(Self::line(&line)?);
        }
        Ok(out)
    }

    /// Flush a trailing line that had no newline.
    pub fn finish(&mut self) -> Result<Vec<String>, ChatError> {
        let rest = std::mem::take(&mut self.buffer);
        Self::line(&rest)
    }

    fn line(raw: &[u8]) -> Result<Vec<String>, ChatError> {
        let line = String::from_utf8_lossy(raw);
        let line = line.trim();
        let Some(data) = line.strip_prefix("data:") else {
            // blank separators, comments, event names
            return Ok(Vec::new());
        };
        let data = data.trim();
        if data.is_empty() || data == "[DONE]" {
            return Ok(Vec::new());
        }
        fragments(data)
    }
}

#[async_trait]
impl ChatBackend for GeminiBackend {
    async fn stream_reply(
        &self,
        history: &[ChatTurn],
        message: &str,
        on_chunk: &mut (dyn for<'a> FnMut(&'a str) + Send),
    ) -> Result<(), ChatError> {
        if self.api_key.is_empty() {
            return Err(ChatError::MissingApiKey);
        }
        let body = request_body(history, message, self.temperature);
        debug!(model = %self.model, turns = history.len(), "gemini: request");

        let response = self
            .http_client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Status { status, body });
        }

        let mut stream = response.bytes_stream();
        let mut decoder = SseDecoder::default();
        while let Some(chunk) = stream.next().await {
            let bytes = chunk.map_err(|e| ChatError::Transport(e.to_string()))?;
            for text in decoder.push(&bytes)? {
                trace!(len = text.len(), "gemini: chunk");
                on_chunk(&text);
            }
        }
        for text in decoder.finish()? {
            on_chunk(&text);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumina_core::chat::GREETING;

    fn turn(role: Role, text: &str) -> ChatTurn {
        ChatTurn {
            role,
            text: text.to_string(),
        }
    }

    #[test]
    fn body_drops_leading_model_turns() {
        let history = vec![
            turn(Role::Model, GREETING),
            turn(Role::User, "hi"),
            turn(Role::Model, "hello!"),
        ];
        let body = request_body(&history, "what stack?", 0.7);
        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[0]["parts"][0]["text"], "hi");
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[2]["parts"][0]["text"], "what stack?");
        assert!(body["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("Lumina"));
        assert!((body["generationConfig"]["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn decoder_yields_parts_in_order_across_split_chunks() {
        let mut d = SseDecoder::default();
        let event = "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"Hi\"},{\"text\":\" th\"}]}}]}\n\n";
        let (a, b) = event.split_at(20);
        assert!(d.push(a.as_bytes()).unwrap().is_empty());
        assert_eq!(d.push(b.as_bytes()).unwrap(), vec!["Hi", " th"]);
        let tail = "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"ere\"}]}}]}";
        assert!(d.push(tail.as_bytes()).unwrap().is_empty());
        assert_eq!(d.finish().unwrap(), vec!["ere"]);
    }

    #[test]
    fn decoder_keeps_multibyte_characters_whole() {
        let mut d = SseDecoder::default();
        let event = "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"café ✨\"}]}}]}\n".as_bytes();
        let split = event.len() - 10; // inside the sparkle
        assert!(d.push(&event[..split]).unwrap().is_empty());
        assert_eq!(d.push(&event[split..]).unwrap(), vec!["café ✨"]);
    }

    #[test]
    fn decoder_ignores_non_data_lines_and_rejects_garbage() {
        let mut d = SseDecoder::default();
        assert!(d.push(b": keep-alive\nevent: message\n\n").unwrap().is_empty());
        assert!(d.push(b"data: {\"candidates\":[]}\n").unwrap().is_empty());
        assert!(matches!(
            d.push(b"data: {not json\n"),
            Err(ChatError::Decode(_))
        ));
    }
}
