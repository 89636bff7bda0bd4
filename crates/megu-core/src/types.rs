//! Message types exchanged between the core and the transport layer

/// An inbound text message delivered by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Platform message id
    pub id: String,
    /// Sender identifier
    pub sender: String,
    /// Group identifier, present for group messages
    pub group: Option<String>,
    /// Raw message text
    pub text: String,
    /// Unix timestamp (seconds) the message was sent
    pub timestamp: u64,
}

impl InboundMessage {
    /// The conversation to reply into: the group for group messages,
    /// otherwise the sender's direct chat.
    pub fn conversation_id(&self) -> &str {
        self.group.as_deref().unwrap_or(&self.sender)
    }

    /// Whether this message arrived in a group conversation
    pub fn is_group(&self) -> bool {
        self.group.is_some()
    }
}

/// Reference to a prior message, attached as context to a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// Id of the quoted message
    pub message_id: String,
    /// Original sender of the quoted message
    pub sender: String,
    /// Original text of the quoted message
    pub text: String,
}

/// An outbound text message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Conversation (direct chat or group) to deliver into
    pub conversation_id: String,
    /// Message text
    pub text: String,
    /// Participants to mention (notify) in the message
    pub mentions: Vec<String>,
    /// Quoted trigger message, if any
    pub quote: Option<Quote>,
}

impl OutboundMessage {
    /// Plain text message with no mentions and no quote
    pub fn text(conversation_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            text: text.into(),
            mentions: Vec::new(),
            quote: None,
        }
    }

    /// Attach a mention list
    pub fn with_mentions(mut self, mentions: Vec<String>) -> Self {
        self.mentions = mentions;
        self
    }

    /// Quote the given trigger message
    pub fn quoting(mut self, message: &InboundMessage) -> Self {
        self.quote = Some(Quote {
            message_id: message.id.clone(),
            sender: message.sender.clone(),
            text: message.text.clone(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_message() -> InboundMessage {
        InboundMessage {
            id: "ABCDEF".to_string(),
            sender: "628111@c.us".to_string(),
            group: Some("12036304@g.us".to_string()),
            text: "!everyone".to_string(),
            timestamp: 1_700_000_000,
        }
    }

    #[test]
    fn test_conversation_id_prefers_group() {
        let msg = group_message();
        assert_eq!(msg.conversation_id(), "12036304@g.us");
        assert!(msg.is_group());

        let direct = InboundMessage { group: None, ..group_message() };
        assert_eq!(direct.conversation_id(), "628111@c.us");
        assert!(!direct.is_group());
    }

    #[test]
    fn test_quoting_copies_the_trigger() {
        let msg = group_message();
        let reply = OutboundMessage::text(msg.conversation_id(), "Please read this!")
            .with_mentions(vec!["628111@c.us".to_string()])
            .quoting(&msg);

        let quote = reply.quote.unwrap();
        assert_eq!(quote.message_id, "ABCDEF");
        assert_eq!(quote.sender, "628111@c.us");
        assert_eq!(quote.text, "!everyone");
        assert_eq!(reply.mentions, vec!["628111@c.us".to_string()]);
    }
}
