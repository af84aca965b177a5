//! Reqwest backed [Transport]

use futures::future::BoxFuture;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Url};

use crate::api::{ApiMethod, ApiRequest, ApiResponse, Transport, TransportError};

/// Sends requests to the backend over http
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Create a transport for the backend at `base_url`
    pub fn new(base_url: Url) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self { client, base_url })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: ApiRequest) -> BoxFuture<'_, Result<ApiResponse, TransportError>> {
        Box::pin(async move {
            let url = self
                .base_url
                .join(request.path.trim_start_matches('/'))
                .map_err(|err| TransportError(format!("Invalid path {}: {err}", request.path)))?;

            let method = match request.method {
                ApiMethod::Get => Method::GET,
                ApiMethod::Post => Method::POST,
                ApiMethod::Delete => Method::DELETE,
            };

            let mut builder = self
                .client
                .request(method, url)
                .header(CONTENT_TYPE, "application/json")
                .query(&request.query);
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            let response = builder
                .send()
                .await
                .map_err(|err| TransportError(err.to_string()))?;
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|err| TransportError(err.to_string()))?;

            Ok(ApiResponse { status, body })
        })
    }
}
