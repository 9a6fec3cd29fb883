use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{
    ApiResponse, ProtocolActionReceipt, ProtocolSnapshot, StrategyActionReceipt, StrategySnapshot,
};
use crate::simulation::{ProtocolActionRequest, StrategyActionRequest};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },
}

impl ClientError {
    /// The server's own error text when there is one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => Some(message),
            ClientError::Http(_) => None,
        }
    }
}

/// Thin client for the Aegis JSON API.
#[derive(Debug, Clone)]
pub struct AegisClient {
    http: Client,
    base_url: String,
}

impl AegisClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get_protocols(&self) -> Result<Vec<ProtocolSnapshot>, ClientError> {
        let url = format!("{}/api/protocols", self.base_url);
        let resp = self.http.get(&url).send().await?;
        read_envelope(resp).await
    }

    pub async fn get_strategy(&self) -> Result<StrategySnapshot, ClientError> {
        let url = format!("{}/api/strategy", self.base_url);
        let resp = self.http.get(&url).send().await?;
        read_envelope(resp).await
    }

    pub async fn strategy_action(
        &self,
        request: &StrategyActionRequest,
    ) -> Result<StrategyActionReceipt, ClientError> {
        let url = format!("{}/api/strategy", self.base_url);
        let resp = self.http.post(&url).json(request).send().await?;
        read_envelope(resp).await
    }

    pub async fn protocol_action(
        &self,
        request: &ProtocolActionRequest,
    ) -> Result<ProtocolActionReceipt, ClientError> {
        let url = format!("{}/api/protocols", self.base_url);
        let resp = self.http.post(&url).json(request).send().await?;
        read_envelope(resp).await
    }
}

/// Unwrap `{success, data, error}`. Error statuses still carry the envelope,
/// so the body is decoded before the status is judged.
async fn read_envelope<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    let body: ApiResponse<T> = resp.json().await?;

    match body {
        ApiResponse {
            success: true,
            data: Some(data),
            ..
        } if status.is_success() => Ok(data),
        ApiResponse { error, .. } => Err(ClientError::Api {
            status: status.as_u16(),
            message: error.unwrap_or_else(|| "unexpected response".into()),
        }),
    }
}
