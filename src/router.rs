//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path, you
//! get a handler; the middleware chain wraps whatever was matched.

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;

use http::{Method, StatusCode};
use http_body_util::BodyExt;
use matchit::Router as MatchitRouter;
use tracing::warn;

use crate::error::HttpError;
use crate::handler::{BoxFuture, BoxedHandler, Handler, HandlerResult};
use crate::middleware::{Endpoint, Middleware, Next};
use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// The application router.
///
/// Holds the route trees, the middleware chain and the state every handler
/// receives. Build it once at startup and pass it to [`Server::serve`].
/// Registration methods return `self` so they chain.
///
/// [`Server::serve`]: crate::Server::serve
pub struct Router<S = ()> {
    routes: HashMap<Method, MatchitRouter<BoxedHandler<S>>>,
    middleware: Vec<Arc<dyn Middleware>>,
    state: S,
}

impl Router<()> {
    pub fn new() -> Self {
        Self::with_state(())
    }
}

impl Default for Router<()> {
    fn default() -> Self { Self::new() }
}

impl<S> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// A router whose handlers all receive a clone of `state`.
    pub fn with_state(state: S) -> Self {
        Self { routes: HashMap::new(), middleware: Vec::new(), state }
    }

    /// Register a handler for a method + path pair.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves
    /// them.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::GET, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::POST, path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::PUT, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::DELETE, path, handler)
    }

    /// Appends a middleware. The first layer added is the outermost.
    pub fn layer(mut self, middleware: impl Middleware) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    fn lookup(&self, method: &Method, path: &str) -> Option<(BoxedHandler<S>, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }

    /// Routes one request through the middleware chain and produces one
    /// response.
    ///
    /// Unrouted requests still pass through the middleware and fail with
    /// `404 Route not found`. An error that escapes every layer is rendered
    /// here, so the caller always gets a response.
    pub async fn call<B>(&self, req: http::Request<B>) -> Response
    where
        B: hyper::body::Body,
        B::Error: Display,
    {
        let (parts, body) = req.into_parts();
        let body = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                warn!(path = parts.uri.path(), "failed to read request body: {e}");
                return HttpError::new(StatusCode::BAD_REQUEST, "Unable to read request body")
                    .into_response();
            }
        };

        let (endpoint, params) = match self.lookup(&parts.method, parts.uri.path()) {
            Some((handler, params)) => {
                let state = self.state.clone();
                let endpoint: Endpoint<'_> = Box::new(move |req: Request| handler.call(req, state));
                (endpoint, params)
            }
            None => {
                let endpoint: Endpoint<'_> = Box::new(route_not_found);
                (endpoint, HashMap::new())
            }
        };

        let req = Request::new(parts, body, params);
        Next::new(&self.middleware, endpoint)
            .run(req)
            .await
            .unwrap_or_else(IntoResponse::into_response)
    }
}

fn route_not_found(_req: Request) -> BoxFuture<'static, HandlerResult> {
    Box::pin(async { Err(HttpError::new(StatusCode::NOT_FOUND, "Route not found")) })
}
