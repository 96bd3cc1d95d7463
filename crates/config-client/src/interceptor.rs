//! Request/response hooks applied to every call.
//!
//! An [`Interceptor`] observes each call at two points: before dispatch
//! ([`Interceptor::on_request`]) and after resolution ([`Interceptor::on_response`]
//! for success, [`Interceptor::on_error`] for failure). The [`Dispatcher`] runs
//! them around the shared [`Transport`] in a fixed order:
//!
//! ```text
//! on_request ──► Transport::send ──┬─► on_response ──► Ok(Payload)
//!                                  └─► on_error    ──► Err(ClientError)
//! ```
//!
//! A request rejected by `on_request` is never sent and does not reach
//! `on_error`; the hook has already logged it. Every other failure reaches
//! `on_error` exactly once.

use std::sync::Arc;

use config_model::{ClientError, Payload, RequestId};
use tracing::{error, info, info_span, Instrument};

use crate::transport::{OutboundRequest, Transport, TransportResponse};

/// Cross-cutting hooks around a single call.
///
/// Hooks are synchronous and must not block.
pub trait Interceptor: Send + Sync {
    /// Observes an outbound request and passes it through, or rejects it.
    fn on_request(&self, request: OutboundRequest) -> Result<OutboundRequest, ClientError>;

    /// Observes a success response and returns only its body.
    fn on_response(&self, response: TransportResponse) -> Payload;

    /// Observes a failure and returns it for the caller.
    fn on_error(&self, request: &OutboundRequest, error: ClientError) -> ClientError;
}

// ---------------------------------------------------------------------------

/// The default [`Interceptor`]: one structured log record per hook.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingInterceptor;

impl Interceptor for LoggingInterceptor {
    fn on_request(&self, request: OutboundRequest) -> Result<OutboundRequest, ClientError> {
        if !request.path().starts_with('/') {
            let err = ClientError::InvalidRequest {
                message: format!("request path must be absolute, got '{}'", request.path()),
            };
            error!(
                method = %request.method(),
                url = %request.path(),
                error = %err,
                "config request error"
            );
            return Err(err);
        }

        info!(method = %request.method(), url = %request.path(), "config request");
        Ok(request)
    }

    fn on_response(&self, response: TransportResponse) -> Payload {
        info!(status = response.status, url = %response.url, "config response");
        response.payload
    }

    fn on_error(&self, request: &OutboundRequest, error: ClientError) -> ClientError {
        error!(
            status = ?error.status(),
            method = %request.method(),
            url = %request.path(),
            error = %error.message(),
            "config response error"
        );
        error
    }
}

// ---------------------------------------------------------------------------

/// The shared transport with its interceptor attached.
///
/// One instance is constructed per client and shared by both API surfaces, so
/// every call observes the same headers, timeout, and hooks.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    interceptor: Arc<dyn Interceptor>,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>, interceptor: Arc<dyn Interceptor>) -> Self {
        Self {
            transport,
            interceptor,
        }
    }

    /// Runs one call through the hooks and the transport.
    pub async fn dispatch(&self, request: OutboundRequest) -> Result<Payload, ClientError> {
        let request_id = RequestId::new_random();
        let span = info_span!("config_call", request_id = %request_id);

        async move {
            let request = self.interceptor.on_request(request)?;
            match self.transport.send(&request).await {
                Ok(response) => Ok(self.interceptor.on_response(response)),
                Err(err) => Err(self.interceptor.on_error(&request, err)),
            }
        }
        .instrument(span)
        .await
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CountingInterceptor, StubTransport};
    use serde_json::json;
    use tracing_test::traced_test;

    #[tokio::test]
    async fn success_returns_only_the_body() {
        let transport = StubTransport::json(200, json!({"value": "jdbc:postgresql://db"}));
        let interceptor = Arc::new(CountingInterceptor::default());
        let dispatcher = Dispatcher::new(transport.clone(), interceptor.clone());

        let payload = dispatcher
            .dispatch(OutboundRequest::get("/api/config/health"))
            .await
            .unwrap();

        assert_eq!(payload, Payload::Json(json!({"value": "jdbc:postgresql://db"})));
        assert_eq!(interceptor.requests(), 1);
        assert_eq!(interceptor.responses(), 1);
        assert_eq!(interceptor.errors(), 0);
        assert_eq!(transport.sent().len(), 1);
    }

    #[tokio::test]
    async fn http_failure_reaches_error_hook_exactly_once() {
        let transport = StubTransport::failing(ClientError::Http {
            status: 404,
            message: "Not Found".into(),
        });
        let interceptor = Arc::new(CountingInterceptor::default());
        let dispatcher = Dispatcher::new(transport, interceptor.clone());

        let err = dispatcher
            .dispatch(OutboundRequest::get("/api/config/orders-svc/prod/main"))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert_eq!(interceptor.errors(), 1);
        assert_eq!(interceptor.responses(), 0);
    }

    #[tokio::test]
    async fn rejected_request_is_never_sent() {
        let transport = StubTransport::json(200, json!({}));
        let dispatcher = Dispatcher::new(transport.clone(), Arc::new(LoggingInterceptor));

        let err = dispatcher
            .dispatch(OutboundRequest::get("api/config/health"))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::InvalidRequest { .. }));
        assert!(transport.sent().is_empty());
    }

    #[test]
    fn request_hook_passes_descriptor_through_unchanged() {
        let request = OutboundRequest::get("/api/config/search/orders-svc/prod/main")
            .query("keyword", "db");
        let passed = LoggingInterceptor.on_request(request.clone()).unwrap();
        assert_eq!(passed, request);
    }

    #[traced_test]
    #[tokio::test]
    async fn logging_interceptor_records_request_and_response() {
        let transport = StubTransport::json(200, json!({"status": "UP"}));
        let dispatcher = Dispatcher::new(transport, Arc::new(LoggingInterceptor));

        dispatcher
            .dispatch(OutboundRequest::get("/api/config/health"))
            .await
            .unwrap();

        assert!(logs_contain("config request"));
        assert!(logs_contain("/api/config/health"));
        assert!(logs_contain("config response"));
        assert!(logs_contain("status=200"));
    }

    #[traced_test]
    #[tokio::test]
    async fn logging_interceptor_records_failures_without_status() {
        let transport = StubTransport::failing(ClientError::Transport {
            message: "operation timed out".into(),
            timed_out: true,
        });
        let dispatcher = Dispatcher::new(transport, Arc::new(LoggingInterceptor));

        let err = dispatcher
            .dispatch(OutboundRequest::post("/api/config/refresh"))
            .await
            .unwrap_err();

        assert!(err.is_timeout());
        assert_eq!(err.status(), None);
        assert!(logs_contain("config response error"));
        assert!(logs_contain("status=None"));
        assert!(logs_contain("operation timed out"));
    }
}
