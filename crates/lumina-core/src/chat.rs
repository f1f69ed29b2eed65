//! Chat transcript and the streaming backend seam.
//!
//! A `ChatSession` belongs to one mounted chat region. Sending appends the
//! user message and a single empty model placeholder; chunks grow that
//! placeholder in place until the stream finishes or fails.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

pub const GREETING: &str = "Hi! I'm Lumina's AI assistant. Ask me anything about this portfolio, the tech stack, or Alex's experience.";
pub const APOLOGY: &str = "Sorry, I'm having trouble connecting to the AI brain right now.";
pub const UNAVAILABLE: &str =
    "Please ensure the API_KEY environment variable is set to use the chat feature.";

pub const SYSTEM_PROMPT: &str = "\
You are an AI assistant for a creative developer's portfolio website named \"Lumina\".
The developer is a Senior Frontend Engineer specializing in React, TypeScript, and AI integrations.

Key traits to embody:
- Professional yet witty and creative.
- Concise in your answers.
- You can explain the technical stack of this website (React, Tailwind, Framer Motion, Gemini API).

If the user asks about contact info, suggest they check the Contact tile.
If the user asks about projects, mention they can explore the Projects tile.
Keep responses under 100 words unless asked for a detailed technical explanation.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    pub is_error: bool,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            is_error: false,
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
            is_error: false,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::model(text)
        }
    }
}

/// One prior exchange as sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode stream: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SendRejected {
    #[error("message is empty")]
    Empty,
    #[error("a reply is still streaming")]
    InFlight,
    #[error("chat is unavailable")]
    Unavailable,
}

/// A streaming text service.
///
/// `on_chunk` is called once per text fragment in arrival order. The call
/// resolves when the stream ends; an error after some chunks were delivered
/// still counts as a failed reply.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn stream_reply(
        &self,
        history: &[ChatTurn],
        message: &str,
        on_chunk: &mut (dyn for<'a> FnMut(&'a str) + Send),
    ) -> Result<(), ChatError>;
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    in_flight: bool,
    available: bool,
}

impl ChatSession {
    pub fn new(available: bool) -> Self {
        Self {
            messages: vec![ChatMessage::model(GREETING)],
            in_flight: false,
            available,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    fn check(&self, text: &str) -> Result<(), SendRejected> {
        if !self.available {
            return Err(SendRejected::Unavailable);
        }
        if self.in_flight {
            return Err(SendRejected::InFlight);
        }
        if text.trim().is_empty() {
            return Err(SendRejected::Empty);
        }
        Ok(())
    }

    /// Start a send. Returns the history to hand to the backend, which is
    /// everything before the new user message minus error notices.
    pub fn begin(&mut self, text: &str) -> Result<Vec<ChatTurn>, SendRejected> {
        self.check(text)?;
        let history = self
            .messages
            .iter()
            .filter(|m| !m.is_error)
            .map(|m| ChatTurn {
                role: m.role,
                text: m.text.clone(),
            })
            .collect();
        self.messages.push(ChatMessage::user(text.trim()));
        self.messages.push(ChatMessage::model(String::new()));
        self.in_flight = true;
        debug!(turns = self.messages.len(), "chat send started");
        Ok(history)
    }

    fn placeholder(&mut self) -> Option<&mut ChatMessage> {
        if !self.in_flight {
            return None;
        }
        self.messages
            .last_mut()
            .filter(|m| m.role == Role::Model && !m.is_error)
    }

    pub fn apply_chunk(&mut self, chunk: &str) {
        if let Some(msg) = self.placeholder() {
            msg.text.push_str(chunk);
        }
    }

    pub fn finish(&mut self) {
        self.in_flight = false;
    }

    pub fn fail(&mut self) {
        if self.placeholder().is_some() {
            self.messages.pop();
        }
        self.messages.push(ChatMessage::error(APOLOGY));
        self.in_flight = false;
    }

    /// Run one full send against `backend`.
    pub async fn send(
        &mut self,
        backend: &dyn ChatBackend,
        text: &str,
    ) -> Result<(), SendRejected> {
        let history = self.begin(text)?;
        let message = text.trim().to_string();
        let result = backend
            .stream_reply(&history, &message, &mut |chunk: &str| self.apply_chunk(chunk))
            .await;
        match result {
            Ok(()) => self.finish(),
            Err(e) => {
                warn!("chat stream failed: {e}");
                self.fail();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_greeting() {
        let s = ChatSession::new(true);
        assert_eq!(s.messages(), &[ChatMessage::model(GREETING)]);
        assert!(!s.is_in_flight());
    }

    #[test]
    fn begin_appends_exactly_one_placeholder() {
        let mut s = ChatSession::new(true);
        let history = s.begin("  Hello ").unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].role, Role::Model);
        assert_eq!(s.messages().len(), 3);
        assert_eq!(s.messages()[1], ChatMessage::user("Hello"));
        assert_eq!(s.messages()[2], ChatMessage::model(""));
        assert_eq!(s.begin("again"), Err(SendRejected::InFlight));
        assert_eq!(s.messages().len(), 3);
    }

    #[test]
    fn rejections() {
        let mut s = ChatSession::new(true);
        assert_eq!(s.begin("   "), Err(SendRejected::Empty));
        let mut off = ChatSession::new(false);
        assert_eq!(off.begin("hi"), Err(SendRejected::Unavailable));
        assert_eq!(off.messages().len(), 1);
    }

    #[test]
    fn chunks_grow_placeholder_in_place() {
        let mut s = ChatSession::new(true);
        s.begin("Hello").unwrap();
        s.apply_chunk("Hi");
        s.apply_chunk(" there");
        s.finish();
        assert_eq!(s.messages().last().unwrap().text, "Hi there");
        s.apply_chunk("late");
        assert_eq!(s.messages().last().unwrap().text, "Hi there");
    }

    #[test]
    fn failure_replaces_placeholder_and_allows_retry() {
        let mut s = ChatSession::new(true);
        s.begin("Hello").unwrap();
        s.apply_chunk("partial");
        s.fail();
        let last = s.messages().last().unwrap();
        assert!(last.is_error);
        assert_eq!(last.text, APOLOGY);
        assert_eq!(s.messages().len(), 3);

        let history = s.begin("retry").unwrap();
        assert!(history.iter().all(|t| t.text != APOLOGY));
    }
}
