//! Wire types for the WhatsApp REST bridge

use megu_core::InboundMessage;
use serde::{Deserialize, Serialize};

/// Message as delivered by the bridge's receive endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMessage {
    /// Platform message id
    pub id: String,
    /// Sender JID
    pub sender: String,
    /// Group JID, present for group chats
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Message body
    #[serde(default)]
    pub text: String,
    /// Unix timestamp (seconds)
    pub timestamp: u64,
    /// Whether the bot's own account sent this message
    #[serde(default)]
    pub from_me: bool,
}

impl From<WireMessage> for InboundMessage {
    fn from(wire: WireMessage) -> Self {
        Self {
            id: wire.id,
            sender: wire.sender,
            group: wire.group,
            text: wire.text,
            timestamp: wire.timestamp,
        }
    }
}

/// Payload for the send endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendRequest {
    /// Bot account number
    pub number: String,
    /// Conversation (JID) to deliver into
    pub recipient: String,
    /// Message text
    pub message: String,
    /// JIDs to mention
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub mentions: Vec<String>,
    /// Quoted message, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quoted: Option<QuotedRef>,
}

/// Reference to a quoted message in a send payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotedRef {
    pub message_id: String,
    pub sender: String,
    pub text: String,
}

/// Bridge response for a successful send
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendResponse {
    /// Id assigned to the sent message
    pub id: String,
    /// Server timestamp
    pub timestamp: u64,
}

/// Payload for the read-receipt endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadRequest {
    pub number: String,
    pub conversation_id: String,
    pub message_id: String,
}

/// Group metadata from the bridge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupInfo {
    /// Group JID
    pub id: String,
    /// Group subject
    #[serde(default)]
    pub name: String,
    /// Current members
    pub participants: Vec<Participant>,
}

/// A single group member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    /// Member JID
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_message_parses_bridge_json() {
        let json = r#"{
            "id": "3EB0A9C5",
            "sender": "628111@c.us",
            "group": "12036304@g.us",
            "text": "!play",
            "timestamp": 1700000000,
            "from_me": false
        }"#;
        let wire: WireMessage = serde_json::from_str(json).unwrap();
        assert_eq!(wire.group.as_deref(), Some("12036304@g.us"));
        assert!(!wire.from_me);

        let msg = InboundMessage::from(wire);
        assert_eq!(msg.conversation_id(), "12036304@g.us");
        assert_eq!(msg.text, "!play");
    }

    #[test]
    fn test_wire_message_defaults_for_direct_chat() {
        let json = r#"{"id": "A1", "sender": "628111@c.us", "timestamp": 1}"#;
        let wire: WireMessage = serde_json::from_str(json).unwrap();
        assert!(wire.group.is_none());
        assert!(wire.text.is_empty());
        assert!(!wire.from_me);
    }

    #[test]
    fn test_send_request_omits_empty_fields() {
        let request = SendRequest {
            number: "+62800".to_string(),
            recipient: "628111@c.us".to_string(),
            message: "hi".to_string(),
            mentions: Vec::new(),
            quoted: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("mentions"));
        assert!(!json.contains("quoted"));
    }

    #[test]
    fn test_group_info_parses_participants() {
        let json = r#"{
            "id": "12036304@g.us",
            "name": "study group",
            "participants": [{"id": "628111@c.us"}, {"id": "628222@c.us"}]
        }"#;
        let info: GroupInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.participants.len(), 2);
        assert_eq!(info.participants[0].id, "628111@c.us");
    }
}
