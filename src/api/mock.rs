//! In-memory backend for the tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;

use crate::api::{ApiClient, ApiMethod, ApiRequest, ApiResponse, Transport, TransportError};

enum Reply {
    Response(ApiResponse),
    Unreachable,
}

/// Records every request and answers with canned responses.
///
/// Unknown routes answer with `404`.
#[derive(Default)]
pub(crate) struct MockBackend {
    routes: Mutex<HashMap<(ApiMethod, String), Reply>>,
    calls: Mutex<Vec<ApiRequest>>,
}

impl MockBackend {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn respond(&self, method: ApiMethod, path: &str, status: u16, body: &str) {
        self.routes.lock().unwrap().insert(
            (method, path.to_string()),
            Reply::Response(ApiResponse {
                status,
                body: body.to_string(),
            }),
        );
    }

    pub(crate) fn fail(&self, method: ApiMethod, path: &str) {
        self.routes
            .lock()
            .unwrap()
            .insert((method, path.to_string()), Reply::Unreachable);
    }

    pub(crate) fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn calls_to(&self, path: &str) -> Vec<ApiRequest> {
        self.calls()
            .into_iter()
            .filter(|call| call.path == path)
            .collect()
    }

    pub(crate) fn client(self: &Arc<Self>) -> ApiClient {
        ApiClient::new(self.clone())
    }
}

impl Transport for MockBackend {
    fn send(&self, request: ApiRequest) -> BoxFuture<'_, Result<ApiResponse, TransportError>> {
        Box::pin(async move {
            let key = (request.method, request.path.clone());
            self.calls.lock().unwrap().push(request);

            // Give concurrent callers a chance to run while this one is in flight
            tokio::task::yield_now().await;

            match self.routes.lock().unwrap().get(&key) {
                Some(Reply::Response(response)) => Ok(response.clone()),
                Some(Reply::Unreachable) => Err(TransportError("connection refused".to_string())),
                None => Ok(ApiResponse {
                    status: 404,
                    body: String::new(),
                }),
            }
        })
    }
}
