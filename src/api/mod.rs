//! This module holds the client for the movie backend
//!
//! Every call goes through [ApiClient::request]. It only fails on transport
//! errors, a response with a non-2xx status is handed back to the caller.
//! The typed wrappers in [endpoints] turn those into [ClientError::Rejected].

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use futures::future::BoxFuture;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use crate::api::http::HttpTransport;

pub mod endpoints;
pub mod http;
#[cfg(test)]
pub(crate) mod mock;

/// The http methods used by the backend
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ApiMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `DELETE`
    Delete,
}

impl Display for ApiMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiMethod::Get => write!(f, "GET"),
            ApiMethod::Post => write!(f, "POST"),
            ApiMethod::Delete => write!(f, "DELETE"),
        }
    }
}

/// A request to the backend
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    /// The method to use
    pub method: ApiMethod,
    /// Path relative to the base url of the backend, e.g. `/api/login`
    pub path: String,
    /// Query parameters, encoded by the transport
    pub query: Vec<(String, String)>,
    /// The json body, if any
    pub body: Option<serde_json::Value>,
}

/// The raw answer of the backend
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    /// Http status code
    pub status: u16,
    /// The body as text
    pub body: String,
}

impl ApiResponse {
    /// Check whether the status is in the 2xx range
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as json
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_str(&self.body).map_err(ClientError::Decode)
    }

    /// Convert a non-2xx response into [ClientError::Rejected]
    pub fn error_for_status(self) -> Result<Self, ClientError> {
        if self.ok() {
            Ok(self)
        } else {
            Err(ClientError::Rejected {
                status: self.status,
                message: self.body.trim().to_string(),
            })
        }
    }
}

/// Network level failure while talking to the backend
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportError(pub String);

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sends [ApiRequest]s to the backend.
pub trait Transport: Send + Sync {
    /// Send a single request and read the complete response
    fn send(&self, request: ApiRequest) -> BoxFuture<'_, Result<ApiResponse, TransportError>>;
}

/// The errors that can occur while using the backend
#[derive(Debug)]
pub enum ClientError {
    /// The backend could not be reached
    Transport(TransportError),
    /// The request body could not be serialized
    Encode(serde_json::Error),
    /// The backend answered with a non-2xx status
    Rejected {
        /// Http status code
        status: u16,
        /// The trimmed body of the response
        message: String,
    },
    /// The backend sent a body that does not match the expected shape
    Decode(serde_json::Error),
}

impl ClientError {
    /// Build the message that is shown to the user.
    ///
    /// Rejections carry the text of the backend, everything else uses `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Rejected { message, .. } if !message.is_empty() => {
                format!("{fallback}: {message}")
            }
            _ => fallback.to_string(),
        }
    }
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Transport(err) => write!(f, "Backend unreachable: {err}"),
            ClientError::Encode(err) => write!(f, "Could not encode request: {err}"),
            ClientError::Rejected { status, message } => {
                write!(f, "Backend rejected request with {status}: {message}")
            }
            ClientError::Decode(err) => write!(f, "Invalid response from backend: {err}"),
        }
    }
}

impl From<TransportError> for ClientError {
    fn from(value: TransportError) -> Self {
        Self::Transport(value)
    }
}

/// Client for the backend, shared between all workers
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Create a new client on top of a [Transport]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Send a request to the backend.
    ///
    /// **Parameter**:
    /// - `path`: path below the base url, e.g. `/api/login`
    /// - `method`: [ApiMethod]
    /// - `query`: query parameters
    /// - `body`: optional json body
    pub async fn request<B: Serialize>(
        &self,
        path: &str,
        method: ApiMethod,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<ApiResponse, ClientError> {
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(ClientError::Encode)?;

        let request = ApiRequest {
            method,
            path: path.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body,
        };

        debug!("{method} {path}");
        let response = self.transport.send(request).await.map_err(|err| {
            warn!("{method} {path} failed: {err}");
            ClientError::from(err)
        })?;

        if !response.ok() {
            info!("{method} {path} returned {}", response.status);
        }

        Ok(response)
    }
}
