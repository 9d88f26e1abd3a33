//! Transactional-API transport
//!
//! The platform is the technical sender; the caregiver's address rides
//! along as reply-to so providers answer the right person. Wire shape
//! follows the SendGrid v3 mail send endpoint.

use super::TransportAdapter;
use crate::config::FileTransactionalConfig;
use askedith_application::ports::mail_gateway::TransportError;
use askedith_domain::delivery::{OutboundEmail, SendReceipt, TransportKind};
use async_trait::async_trait;
use serde::Serialize;

#[derive(Serialize)]
struct MailAddress<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Serialize)]
struct Personalization<'a> {
    to: Vec<MailAddress<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    content_type: &'static str,
    value: &'a str,
}

#[derive(Serialize)]
struct MailSendRequest<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: MailAddress<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<MailAddress<'a>>,
    subject: &'a str,
    content: Vec<Content<'a>>,
}

/// Sends through a transactional mail API
pub struct TransactionalTransport {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    from_address: Option<String>,
    from_name: Option<String>,
}

impl TransactionalTransport {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        from_address: Option<String>,
        from_name: Option<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
            from_address,
            from_name,
        }
    }

    pub fn from_config(config: &FileTransactionalConfig) -> Self {
        Self::new(
            config.base_url.clone(),
            config.resolve_api_key(),
            config.from_address.clone(),
            config.from_name.clone(),
        )
    }

    fn credentials(&self) -> Result<(&str, &str), TransportError> {
        let key = self.api_key.as_deref().ok_or_else(|| {
            TransportError::NotConfigured("transactional API key is not configured".to_string())
        })?;
        let from = self.from_address.as_deref().ok_or_else(|| {
            TransportError::NotConfigured(
                "transactional sender address is not configured".to_string(),
            )
        })?;
        Ok((key, from))
    }
}

#[async_trait]
impl TransportAdapter for TransactionalTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Transactional
    }

    async fn is_usable(&self) -> bool {
        self.api_key.is_some() && self.from_address.is_some()
    }

    async fn deliver(&self, email: &OutboundEmail) -> Result<SendReceipt, TransportError> {
        let (key, from) = self.credentials()?;

        let payload = MailSendRequest {
            personalizations: vec![Personalization {
                to: vec![MailAddress {
                    email: &email.to,
                    name: None,
                }],
            }],
            from: MailAddress {
                email: from,
                name: self.from_name.as_deref(),
            },
            reply_to: email.reply_to.as_deref().map(|address| MailAddress {
                email: address,
                name: None,
            }),
            subject: &email.subject,
            content: vec![Content {
                content_type: "text/plain",
                value: &email.body,
            }],
        };

        let response = self
            .http
            .post(format!("{}/v3/mail/send", self.base_url))
            .bearer_auth(key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout
                } else {
                    TransportError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TransportError::Rejected(format!(
                "provider error {}: {}",
                status.as_u16(),
                message
            )));
        }

        // The provider reports the queued message id in a header, not
        // the (empty) body.
        let message_id = response
            .headers()
            .get("x-message-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Ok(match message_id {
            Some(id) => SendReceipt::new(TransportKind::Transactional, id),
            None => SendReceipt::without_id(TransportKind::Transactional),
        })
    }
}
