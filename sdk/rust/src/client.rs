//! HTTP client for the user service.

use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
struct UserPayload<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or undecodable response.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("user service returned {status}: {message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => StatusCode::from_u16(*status).ok(),
            ClientError::Http(e) => e.status(),
        }
    }
}

pub struct UserClient {
    client: Client,
    base_url: String,
}

impl UserClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a user; the returned record carries the assigned id.
    pub async fn create(&self, name: &str, email: &str) -> Result<User, ClientError> {
        let resp = self
            .client
            .post(format!("{}/users", self.base_url))
            .json(&UserPayload { name, email })
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    pub async fn get(&self, id: &str) -> Result<User, ClientError> {
        let resp = self
            .client
            .get(format!("{}/users/{}", self.base_url, id))
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    /// Replace name and email. Returns the service's confirmation message.
    pub async fn update(&self, id: &str, name: &str, email: &str) -> Result<String, ClientError> {
        let resp = self
            .client
            .put(format!("{}/users/{}", self.base_url, id))
            .json(&UserPayload { name, email })
            .send()
            .await?;
        let body: MessageBody = check(resp).await?.json().await?;
        Ok(body.message)
    }

    pub async fn delete(&self, id: &str) -> Result<String, ClientError> {
        let resp = self
            .client
            .delete(format!("{}/users/{}", self.base_url, id))
            .send()
            .await?;
        let body: MessageBody = check(resp).await?.json().await?;
        Ok(body.message)
    }
}

/// Turn non-success responses into [`ClientError::Api`].
async fn check(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let text = resp.text().await?;
    let message = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => body.error,
        Err(_) => text,
    };
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
