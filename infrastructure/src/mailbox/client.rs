//! HTTP client for the connected-mailbox provider
//!
//! One client covers the whole capability set: hosted authorization, grant
//! health, sending, and the category folder operations. The wire shapes
//! follow the Nylas v3 API; any provider exposing the same surface works.

use crate::config::FileMailboxConfig;
use askedith_application::ports::mailbox::{
    AuthorizationStart, FiledMessage, MailboxCredential, MailboxError, MailboxPort,
};
use askedith_domain::delivery::{OutboundEmail, SendReceipt, TransportKind};
use askedith_domain::resource::Category;
use async_trait::async_trait;
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

static STATE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Opaque token tying a consent callback to the flow that started it
fn fresh_state() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let n = STATE_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("ae-{millis}-{n}")
}

/// Folder a category's outreach is filed under
fn folder_name(category: &Category) -> String {
    format!("AskEdith/{}", category.as_str())
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    code: &'a str,
    client_id: &'a str,
    redirect_uri: &'a str,
    grant_type: &'static str,
}

#[derive(Deserialize)]
struct TokenResponse {
    grant_id: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Serialize)]
struct EmailAddress<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    subject: &'a str,
    body: &'a str,
    to: Vec<EmailAddress<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<Vec<EmailAddress<'a>>>,
}

#[derive(Deserialize)]
struct SendMessageResponse {
    data: SentMessage,
}

#[derive(Deserialize)]
struct SentMessage {
    #[serde(default)]
    id: Option<String>,
}

#[derive(Deserialize)]
struct FolderListResponse {
    data: Vec<Folder>,
}

#[derive(Deserialize)]
struct FolderResponse {
    data: Folder,
}

#[derive(Deserialize)]
struct Folder {
    id: String,
    name: String,
}

#[derive(Serialize)]
struct CreateFolderRequest<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct MoveToFolderRequest<'a> {
    folders: Vec<&'a str>,
}

#[derive(Deserialize)]
struct MessageListResponse {
    data: Vec<ListedMessage>,
}

#[derive(Deserialize)]
struct ListedMessage {
    id: String,
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    to: Vec<ListedAddress>,
    /// Epoch seconds
    #[serde(default)]
    date: Option<i64>,
}

#[derive(Deserialize)]
struct ListedAddress {
    email: String,
}

/// Client for a Nylas-v3-compatible mailbox provider
pub struct MailboxClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    redirect_uri: String,
}

impl MailboxClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
            redirect_uri: redirect_uri.into(),
        }
    }

    pub fn from_config(config: &FileMailboxConfig) -> Self {
        Self::new(
            config.base_url.clone(),
            config.resolve_api_key(),
            config.redirect_uri.clone(),
        )
    }

    /// Whether a provider key is available at all
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn key(&self) -> Result<&str, MailboxError> {
        self.api_key.as_deref().ok_or_else(|| {
            MailboxError::AuthorizationFailed(
                "mailbox provider API key is not configured".to_string(),
            )
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a failed grant-scoped response; an invalid grant is recoverable
    /// by re-authorizing, everything else is a provider error.
    async fn grant_error(response: reqwest::Response) -> MailboxError {
        let status = response.status().as_u16();
        if status == 401 || status == 404 {
            return MailboxError::GrantExpired;
        }
        let message = response.text().await.unwrap_or_default();
        MailboxError::Provider { status, message }
    }

    fn network(e: reqwest::Error) -> MailboxError {
        MailboxError::Network(e.to_string())
    }

    async fn find_folder(
        &self,
        credential: &MailboxCredential,
        name: &str,
    ) -> Result<Option<Folder>, MailboxError> {
        let response = self
            .http
            .get(self.url(&format!("/v3/grants/{}/folders", credential.grant_id)))
            .bearer_auth(self.key()?)
            .send()
            .await
            .map_err(Self::network)?;

        if !response.status().is_success() {
            return Err(Self::grant_error(response).await);
        }

        let folders: FolderListResponse = response
            .json()
            .await
            .map_err(|e| MailboxError::UnexpectedResponse(e.to_string()))?;
        Ok(folders.data.into_iter().find(|f| f.name == name))
    }

    async fn ensure_folder(
        &self,
        credential: &MailboxCredential,
        name: &str,
    ) -> Result<Folder, MailboxError> {
        if let Some(folder) = self.find_folder(credential, name).await? {
            return Ok(folder);
        }

        let response = self
            .http
            .post(self.url(&format!("/v3/grants/{}/folders", credential.grant_id)))
            .bearer_auth(self.key()?)
            .json(&CreateFolderRequest { name })
            .send()
            .await
            .map_err(Self::network)?;

        if !response.status().is_success() {
            return Err(Self::grant_error(response).await);
        }

        let created: FolderResponse = response
            .json()
            .await
            .map_err(|e| MailboxError::UnexpectedResponse(e.to_string()))?;
        debug!("Created mailbox folder {}", created.data.name);
        Ok(created.data)
    }
}

#[async_trait]
impl MailboxPort for MailboxClient {
    async fn begin_authorization(
        &self,
        email: &str,
    ) -> Result<AuthorizationStart, MailboxError> {
        let key = self.key()?;
        let state = fresh_state();
        let url = reqwest::Url::parse_with_params(
            &self.url("/v3/connect/auth"),
            &[
                ("client_id", key),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("response_type", "code"),
                ("login_hint", email),
                ("state", state.as_str()),
            ],
        )
        .map_err(|e| MailboxError::AuthorizationFailed(format!("invalid provider URL: {e}")))?;

        Ok(AuthorizationStart {
            auth_url: url.to_string(),
            state,
        })
    }

    async fn complete_authorization(
        &self,
        email: &str,
        code: &str,
    ) -> Result<MailboxCredential, MailboxError> {
        let key = self.key()?;
        let response = self
            .http
            .post(self.url("/v3/connect/token"))
            .bearer_auth(key)
            .json(&TokenRequest {
                code,
                client_id: key,
                redirect_uri: &self.redirect_uri,
                grant_type: "authorization_code",
            })
            .send()
            .await
            .map_err(Self::network)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            if status.as_u16() == 400 || status.as_u16() == 401 {
                return Err(MailboxError::AuthorizationFailed(message));
            }
            return Err(MailboxError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| MailboxError::UnexpectedResponse(e.to_string()))?;

        // The provider reports the mailbox it actually granted; trust it
        // over what the user typed.
        let address = token.email.unwrap_or_else(|| email.to_string());
        Ok(MailboxCredential::new(address, token.grant_id))
    }

    async fn check_connection(
        &self,
        credential: &MailboxCredential,
    ) -> Result<bool, MailboxError> {
        let response = self
            .http
            .get(self.url(&format!("/v3/grants/{}", credential.grant_id)))
            .bearer_auth(self.key()?)
            .send()
            .await
            .map_err(Self::network)?;

        let status = response.status();
        if status.is_success() {
            return Ok(true);
        }
        if status.as_u16() == 401 || status.as_u16() == 404 {
            return Ok(false);
        }
        let message = response.text().await.unwrap_or_default();
        Err(MailboxError::Provider {
            status: status.as_u16(),
            message,
        })
    }

    async fn send(
        &self,
        credential: &MailboxCredential,
        email: &OutboundEmail,
    ) -> Result<SendReceipt, MailboxError> {
        let payload = SendMessageRequest {
            subject: &email.subject,
            body: &email.body,
            to: vec![EmailAddress { email: &email.to }],
            reply_to: email
                .reply_to
                .as_deref()
                .map(|address| vec![EmailAddress { email: address }]),
        };

        let response = self
            .http
            .post(self.url(&format!(
                "/v3/grants/{}/messages/send",
                credential.grant_id
            )))
            .bearer_auth(self.key()?)
            .json(&payload)
            .send()
            .await
            .map_err(Self::network)?;

        if !response.status().is_success() {
            return Err(Self::grant_error(response).await);
        }

        let sent: SendMessageResponse = response
            .json()
            .await
            .map_err(|e| MailboxError::UnexpectedResponse(e.to_string()))?;

        Ok(match sent.data.id {
            Some(id) => SendReceipt::new(TransportKind::Mailbox, id),
            None => SendReceipt::without_id(TransportKind::Mailbox),
        })
    }

    async fn file_into_category(
        &self,
        credential: &MailboxCredential,
        message_id: &str,
        category: &Category,
    ) -> Result<(), MailboxError> {
        let folder = self
            .ensure_folder(credential, &folder_name(category))
            .await?;

        let response = self
            .http
            .put(self.url(&format!(
                "/v3/grants/{}/messages/{}",
                credential.grant_id, message_id
            )))
            .bearer_auth(self.key()?)
            .json(&MoveToFolderRequest {
                folders: vec![folder.id.as_str()],
            })
            .send()
            .await
            .map_err(Self::network)?;

        if !response.status().is_success() {
            return Err(Self::grant_error(response).await);
        }
        Ok(())
    }

    async fn list_by_category(
        &self,
        credential: &MailboxCredential,
        category: &Category,
    ) -> Result<Vec<FiledMessage>, MailboxError> {
        let Some(folder) = self.find_folder(credential, &folder_name(category)).await? else {
            return Ok(vec![]);
        };

        let response = self
            .http
            .get(self.url(&format!("/v3/grants/{}/messages", credential.grant_id)))
            .query(&[("in", folder.id.as_str())])
            .bearer_auth(self.key()?)
            .send()
            .await
            .map_err(Self::network)?;

        if !response.status().is_success() {
            return Err(Self::grant_error(response).await);
        }

        let listed: MessageListResponse = response
            .json()
            .await
            .map_err(|e| MailboxError::UnexpectedResponse(e.to_string()))?;

        Ok(listed
            .data
            .into_iter()
            .map(|message| FiledMessage {
                id: message.id,
                subject: message.subject.unwrap_or_default(),
                to: message
                    .to
                    .first()
                    .map(|a| a.email.clone())
                    .unwrap_or_default(),
                sent_at: message
                    .date
                    .and_then(|secs| DateTime::from_timestamp(secs, 0)),
            })
            .collect())
    }
}
