//! Error normalization.

use async_trait::async_trait;
use tracing::{error, warn};

use super::{Middleware, Next};
use crate::handler::HandlerResult;
use crate::request::Request;
use crate::response::IntoResponse;

/// Writes a normalized [`HttpError`](crate::HttpError) out as the response:
/// the carried status and a `{"message": ...}` JSON body.
///
/// Everything inside this layer can fail with `?`; everything outside it
/// sees a plain response.
#[derive(Clone, Copy, Debug, Default)]
pub struct NormalizeErrors;

#[async_trait]
impl Middleware for NormalizeErrors {
    async fn handle(&self, req: Request, next: Next<'_>) -> HandlerResult {
        match next.run(req).await {
            Ok(res) => Ok(res),
            Err(err) => {
                if err.status().is_server_error() {
                    error!(status = err.status().as_u16(), message = err.message(), "request failed");
                } else {
                    warn!(status = err.status().as_u16(), message = err.message(), "request rejected");
                }
                Ok(err.into_response())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use http::{Method, StatusCode};

    use super::*;
    use crate::error::HttpError;
    use crate::handler::BoxFuture;
    use crate::request::test_request;

    #[tokio::test]
    async fn error_becomes_json_response() {
        let chain: Vec<Arc<dyn Middleware>> = vec![Arc::new(NormalizeErrors)];
        let req = test_request(Method::GET, "/contact/x", None, "", &[]);

        let res = Next::new(
            &chain,
            Box::new(|_req: Request| -> BoxFuture<'static, HandlerResult> {
                Box::pin(async { Err(HttpError::new(StatusCode::NOT_FOUND, "Contact not found")) })
            }),
        )
        .run(req)
        .await
        .unwrap();

        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(res.body(), br#"{"message":"Contact not found"}"#);
    }
}
