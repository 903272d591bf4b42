use serde::{Deserialize, Serialize};

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn label(self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Assistant => "Assistant",
        }
    }
}

/// A single message in a product's chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Server-assigned id. Absent on messages the client has not had confirmed.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub message: String,
    pub sender: Sender,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: None,
            message: text.into(),
            sender: Sender::User,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            id: None,
            message: text.into(),
            sender: Sender::Assistant,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Response to `POST /api/products/chat/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub assistant_reply: String,
    /// Fraction like `"2/4"`.
    #[serde(default)]
    pub milestones_completed: Option<String>,
    /// Stored copy of the user's message, when the backend echoes it.
    #[serde(default)]
    pub user_message: Option<ChatMessage>,
    /// Stored copy of the reply, when the backend returns it with an id.
    #[serde(default)]
    pub assistant_message: Option<ChatMessage>,
}

/// Response to `GET /api/products/chat/skip/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkipResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub product: Option<super::Product>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_wire_format() {
        let msg: ChatMessage =
            serde_json::from_str(r#"{"_id":"m1","message":"hi","sender":"assistant"}"#).unwrap();
        assert_eq!(msg.id.as_deref(), Some("m1"));
        assert_eq!(msg.sender, Sender::Assistant);

        let json = serde_json::to_value(ChatMessage::user("hello")).unwrap();
        assert_eq!(json["sender"], "user");
        assert!(json.get("_id").is_none());
    }

    #[test]
    fn test_reply_optional_fields() {
        let reply: ChatReply =
            serde_json::from_str(r#"{"assistantReply":"Tell me more"}"#).unwrap();
        assert_eq!(reply.assistant_reply, "Tell me more");
        assert!(reply.milestones_completed.is_none());
        assert!(reply.user_message.is_none());
    }

    #[test]
    fn test_unknown_sender_rejected() {
        let result: Result<ChatMessage, _> =
            serde_json::from_str(r#"{"message":"x","sender":"system"}"#);
        assert!(result.is_err());
    }
}
