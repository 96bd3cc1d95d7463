//! Test doubles for the transport and interceptor seams.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use config_model::{ClientError, ContentHandling, Payload};
use serde_json::Value;

use crate::interceptor::{Interceptor, LoggingInterceptor};
use crate::transport::{OutboundRequest, Transport, TransportResponse};

/// Records every request and answers each with the same scripted outcome.
pub struct StubTransport {
    outcome: Result<(u16, Payload), ClientError>,
    sent: Mutex<Vec<OutboundRequest>>,
}

impl StubTransport {
    pub fn json(status: u16, body: Value) -> Arc<Self> {
        Self::with_outcome(Ok((status, Payload::Json(body))))
    }

    pub fn text(status: u16, body: &str) -> Arc<Self> {
        Self::with_outcome(Ok((status, Payload::Text(body.to_string()))))
    }

    pub fn failing(error: ClientError) -> Arc<Self> {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: Result<(u16, Payload), ClientError>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn sent(&self) -> Vec<OutboundRequest> {
        self.sent.lock().unwrap().clone()
    }

    /// Returns the single request sent so far.
    pub fn only_request(&self) -> OutboundRequest {
        let sent = self.sent();
        assert_eq!(sent.len(), 1, "expected exactly one request, got {sent:?}");
        sent[0].clone()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(&self, request: &OutboundRequest) -> Result<TransportResponse, ClientError> {
        self.sent.lock().unwrap().push(request.clone());
        let (status, payload) = self.outcome.clone()?;
        // Mirror the real transport: the body shape follows the request.
        let payload = match (request.content_handling(), payload) {
            (ContentHandling::ParseJson, Payload::Text(text)) => {
                Payload::Json(serde_json::from_str(&text).map_err(|e| ClientError::Decode {
                    message: e.to_string(),
                })?)
            }
            (ContentHandling::PassthroughText, Payload::Json(value)) => {
                Payload::Text(value.to_string())
            }
            (_, payload) => payload,
        };
        Ok(TransportResponse {
            status,
            url: request.path().to_string(),
            payload,
        })
    }
}

/// Counts hook invocations, delegating to [`LoggingInterceptor`].
#[derive(Default)]
pub struct CountingInterceptor {
    requests: AtomicUsize,
    responses: AtomicUsize,
    errors: AtomicUsize,
}

impl CountingInterceptor {
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn responses(&self) -> usize {
        self.responses.load(Ordering::SeqCst)
    }

    pub fn errors(&self) -> usize {
        self.errors.load(Ordering::SeqCst)
    }
}

impl Interceptor for CountingInterceptor {
    fn on_request(&self, request: OutboundRequest) -> Result<OutboundRequest, ClientError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        LoggingInterceptor.on_request(request)
    }

    fn on_response(&self, response: TransportResponse) -> Payload {
        self.responses.fetch_add(1, Ordering::SeqCst);
        LoggingInterceptor.on_response(response)
    }

    fn on_error(&self, request: &OutboundRequest, error: ClientError) -> ClientError {
        self.errors.fetch_add(1, Ordering::SeqCst);
        LoggingInterceptor.on_error(request, error)
    }
}
