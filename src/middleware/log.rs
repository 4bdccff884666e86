//! Per-request structured logging.

use std::time::Instant;

use async_trait::async_trait;
use tracing::info;

use super::{Middleware, Next};
use crate::handler::HandlerResult;
use crate::request::Request;

/// Emits one `info!` event per request once the response is known.
///
/// Never alters the outcome: whatever the inner layers return is passed back
/// unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestLog;

#[async_trait]
impl Middleware for RequestLog {
    async fn handle(&self, req: Request, next: Next<'_>) -> HandlerResult {
        let method = req.method().clone();
        let path = req.path().to_owned();
        let started = Instant::now();

        let result = next.run(req).await;

        let status = match &result {
            Ok(res) => res.status_code(),
            Err(err) => err.status(),
        };
        info!(
            %method,
            %path,
            status = status.as_u16(),
            latency_ms = started.elapsed().as_secs_f64() * 1000.0,
            "request"
        );
        result
    }
}
