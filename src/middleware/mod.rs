//! Middleware layer.
//!
//! Middleware wraps every routed request and is the place for cross-cutting
//! concerns. Each layer receives the request and a [`Next`] handle; calling
//! [`Next::run`] passes control inward, towards the matched handler.
//!
//! Layers run in registration order: the first [`Router::layer`] call is the
//! outermost.
//!
//! Built-in middleware:
//! - [`RequestLog`] — one structured log line per request with method, path,
//!   status and latency
//! - [`NormalizeErrors`] — turns a normalized [`HttpError`] into the JSON
//!   error response
//!
//! [`Router::layer`]: crate::Router::layer
//! [`HttpError`]: crate::HttpError

use std::sync::Arc;

use async_trait::async_trait;

use crate::handler::{BoxFuture, HandlerResult};
use crate::request::Request;

mod error;
mod log;

pub use error::NormalizeErrors;
pub use log::RequestLog;

/// A request interceptor.
#[async_trait]
pub trait Middleware: Send + Sync + 'static {
    async fn handle(&self, req: Request, next: Next<'_>) -> HandlerResult;
}

pub(crate) type Endpoint<'a> = Box<dyn FnOnce(Request) -> BoxFuture<'static, HandlerResult> + Send + 'a>;

/// The remainder of the middleware chain, ending at the routed handler.
pub struct Next<'a> {
    chain: &'a [Arc<dyn Middleware>],
    endpoint: Endpoint<'a>,
}

impl<'a> Next<'a> {
    pub(crate) fn new(chain: &'a [Arc<dyn Middleware>], endpoint: Endpoint<'a>) -> Self {
        Self { chain, endpoint }
    }

    /// Hands `req` to the next layer, or to the handler once the chain is
    /// exhausted.
    pub async fn run(self, req: Request) -> HandlerResult {
        match self.chain.split_first() {
            Some((layer, rest)) => {
                layer.handle(req, Next { chain: rest, endpoint: self.endpoint }).await
            }
            None => (self.endpoint)(req).await,
        }
    }
}
