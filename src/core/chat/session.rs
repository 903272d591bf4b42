//! Local chat transcript with optimistic sends.
//!
//! A sent message is shown immediately as [`DeliveryStatus::Pending`] and
//! tagged with a correlation id. The response for that id confirms it,
//! adopting the server's stored ids when the backend returns them.

use uuid::Uuid;

use super::milestones::{Milestones, INITIAL_PROGRESS};
use crate::core::models::{ChatMessage, ChatReply};

/// Appended to the transcript when a send fails.
pub const SEND_FAILURE_MESSAGE: &str = "Sorry, I couldn't process your message. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Confirmed,
    Pending,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub message: ChatMessage,
    /// Set on messages this session sent.
    pub correlation: Option<Uuid>,
    pub status: DeliveryStatus,
}

impl TranscriptEntry {
    fn confirmed(message: ChatMessage) -> Self {
        Self {
            message,
            correlation: None,
            status: DeliveryStatus::Confirmed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    product_id: String,
    entries: Vec<TranscriptEntry>,
    progress: u8,
    in_flight: Option<Uuid>,
}

impl ChatSession {
    /// Seed a session from the product's stored transcript.
    pub fn new(product_id: impl Into<String>, history: Vec<ChatMessage>) -> Self {
        Self {
            product_id: product_id.into(),
            entries: history.into_iter().map(TranscriptEntry::confirmed).collect(),
            progress: INITIAL_PROGRESS,
            in_flight: None,
        }
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn is_sending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Append `text` as a pending user message.
    ///
    /// Returns the correlation id to pass back on completion, or `None` when
    /// the input is blank or another send has not settled.
    pub fn begin_send(&mut self, text: &str) -> Option<Uuid> {
        let text = text.trim();
        if text.is_empty() || self.in_flight.is_some() {
            return None;
        }

        let correlation = Uuid::new_v4();
        self.entries.push(TranscriptEntry {
            message: ChatMessage::user(text),
            correlation: Some(correlation),
            status: DeliveryStatus::Pending,
        });
        self.in_flight = Some(correlation);
        Some(correlation)
    }

    /// Confirm the pending message and append the assistant's reply.
    ///
    /// Returns `false` for a correlation id this session is not waiting on;
    /// the reply is dropped in that case.
    pub fn complete_send(&mut self, correlation: Uuid, reply: ChatReply) -> bool {
        if self.in_flight != Some(correlation) {
            tracing::warn!(%correlation, "Dropping chat reply for unknown send");
            return false;
        }
        self.in_flight = None;

        if let Some(entry) = self.entry_mut(correlation) {
            entry.status = DeliveryStatus::Confirmed;
            if let Some(stored) = reply.user_message.as_ref().and_then(|m| m.id.clone()) {
                entry.message.id = Some(stored);
            }
        }

        let assistant = match reply.assistant_message {
            Some(stored) => stored,
            None => ChatMessage::assistant(reply.assistant_reply),
        };
        self.entries.push(TranscriptEntry::confirmed(assistant));

        if let Some(raw) = reply.milestones_completed.as_deref() {
            self.apply_milestones(raw);
        }
        true
    }

    /// Mark the pending message failed and append the apology.
    pub fn fail_send(&mut self, correlation: Uuid) -> bool {
        if self.in_flight != Some(correlation) {
            return false;
        }
        self.in_flight = None;

        if let Some(entry) = self.entry_mut(correlation) {
            entry.status = DeliveryStatus::Failed;
        }
        self.entries
            .push(TranscriptEntry::confirmed(ChatMessage::assistant(SEND_FAILURE_MESSAGE)));
        true
    }

    /// Append an assistant-side notice, used by the skip flow.
    pub fn push_notice(&mut self, text: impl Into<String>) {
        self.entries
            .push(TranscriptEntry::confirmed(ChatMessage::assistant(text)));
    }

    /// Update progress from a `"n/m"` report. Malformed reports leave it unchanged.
    pub fn apply_milestones(&mut self, raw: &str) {
        match raw.parse::<Milestones>() {
            Ok(m) => self.progress = m.percent(),
            Err(e) => tracing::warn!(raw, error = %e, "Ignoring malformed milestone report"),
        }
    }

    fn entry_mut(&mut self, correlation: Uuid) -> Option<&mut TranscriptEntry> {
        self.entries
            .iter_mut()
            .rev()
            .find(|e| e.correlation == Some(correlation))
    }
}
