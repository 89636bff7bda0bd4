//! WhatsApp REST bridge client

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info};

use megu_core::{ChatTransport, OutboundMessage};

use crate::error::{Result, WhatsAppError};
use crate::types::{GroupInfo, QuotedRef, ReadRequest, SendRequest, SendResponse, WireMessage};

/// Client for the WhatsApp REST bridge
#[derive(Clone)]
pub struct WhatsAppApiClient {
    client: Client,
    base_url: String,
    phone_number: String,
}

impl WhatsAppApiClient {
    /// Create a new bridge client
    pub fn new(base_url: &str, phone_number: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(WhatsAppError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            phone_number: phone_number.to_string(),
        })
    }

    /// Check if the bridge is reachable
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/v1/health", self.base_url);

        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(e) => {
                debug!("Health check failed: {}", e);
                Ok(false)
            }
        }
    }

    /// Fetch pending inbound messages
    pub async fn receive_messages(&self) -> Result<Vec<WireMessage>> {
        let url = format!("{}/v1/receive/{}", self.base_url, self.phone_number);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(WhatsAppError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Receive messages failed: {} - {}", status, error_text);
            return Err(WhatsAppError::Api(format!("{}: {}", status, error_text)));
        }

        let messages: Vec<WireMessage> = response
            .json()
            .await
            .map_err(|e| WhatsAppError::Parse(e.to_string()))?;

        if !messages.is_empty() {
            debug!("Received {} messages", messages.len());
        }
        Ok(messages)
    }

    /// Send a text message, with optional mentions and quote
    pub async fn send_message(&self, message: &OutboundMessage) -> Result<SendResponse> {
        let url = format!("{}/v1/send", self.base_url);

        let body = SendRequest {
            number: self.phone_number.clone(),
            recipient: message.conversation_id.clone(),
            message: message.text.clone(),
            mentions: message.mentions.clone(),
            quoted: message.quote.as_ref().map(|quote| QuotedRef {
                message_id: quote.message_id.clone(),
                sender: quote.sender.clone(),
                text: quote.text.clone(),
            }),
        };

        debug!("Sending message to {}", message.conversation_id);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(WhatsAppError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Send message failed: {} - {}", status, error_text);
            return Err(WhatsAppError::Api(format!("{}: {}", status, error_text)));
        }

        let send_response: SendResponse = response
            .json()
            .await
            .map_err(|e| WhatsAppError::Parse(e.to_string()))?;

        info!(
            "Message sent to {} as {}",
            message.conversation_id, send_response.id
        );
        Ok(send_response)
    }

    /// Mark a message as read
    pub async fn send_read_receipt(&self, conversation_id: &str, message_id: &str) -> Result<()> {
        let url = format!("{}/v1/read", self.base_url);

        let body = ReadRequest {
            number: self.phone_number.clone(),
            conversation_id: conversation_id.to_string(),
            message_id: message_id.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(WhatsAppError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(WhatsAppError::Api(format!("{}: {}", status, error_text)));
        }

        Ok(())
    }

    /// Fetch group metadata
    pub async fn group_info(&self, group_id: &str) -> Result<GroupInfo> {
        let url = format!("{}/v1/groups/{}", self.base_url, group_id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(WhatsAppError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Group info failed: {} - {}", status, error_text);
            return Err(WhatsAppError::Api(format!("{}: {}", status, error_text)));
        }

        response
            .json()
            .await
            .map_err(|e| WhatsAppError::Parse(e.to_string()))
    }
}

#[async_trait]
impl ChatTransport for WhatsAppApiClient {
    async fn send(&self, message: &OutboundMessage) -> megu_core::Result<()> {
        self.send_message(message).await.map_err(megu_core::Error::from)?;
        Ok(())
    }

    async fn mark_read(&self, conversation_id: &str, message_id: &str) -> megu_core::Result<()> {
        self.send_read_receipt(conversation_id, message_id)
            .await
            .map_err(megu_core::Error::from)
    }

    async fn group_members(&self, group_id: &str) -> megu_core::Result<Vec<String>> {
        let info = self.group_info(group_id).await.map_err(megu_core::Error::from)?;
        Ok(info.participants.into_iter().map(|p| p.id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_normalizes_base_url() {
        let client = WhatsAppApiClient::new("http://localhost:3000/", "+62800").unwrap();
        assert_eq!(client.base_url, "http://localhost:3000");
    }
}
