//! Handler trait and type erasure.
//!
//! # How async handlers are stored
//!
//! The router holds handlers of *different* types in a single
//! `HashMap<Method, Tree>`, so each one is hidden behind a trait object
//! (`dyn ErasedHandler<S>`) and stored uniformly.
//!
//! ```text
//! async fn get(req: Request, state: S) -> Result<R, E>   ← handler
//!        ↓ router.get("/contact/{id}", get)
//! get.into_boxed_handler()                              ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(get))                              ← stored as BoxedHandler<S>
//!        ↓
//! handler.call(req, state.clone())  at request time      ← one vtable dispatch
//!        ↓
//! Box::pin(async { get(req, state).await.map(..).map_err(Into::into) })
//! ```
//!
//! The error half of the handler's result is converted into [`HttpError`]
//! right here, at the handler boundary. Everything past this point (the
//! middleware chain, the server) only ever sees normalized errors.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::HttpError;
use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// What a handler (or a middleware) produces once its error is normalized.
pub type HandlerResult = Result<Response, HttpError>;

/// A heap-allocated, type-erased future.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` rather than `pub(crate)` because it appears in the
/// return type of the public `Handler` trait's `into_boxed_handler` method.
#[doc(hidden)]
pub trait ErasedHandler<S> {
    fn call(&self, req: Request, state: S) -> BoxFuture<'static, HandlerResult>;
}

/// A type-erased handler shared across concurrent requests.
#[doc(hidden)]
pub type BoxedHandler<S> = Arc<dyn ErasedHandler<S> + Send + Sync + 'static>;

/// Implemented for every valid route handler.
///
/// Never implemented by hand. It is satisfied by any `async fn` shaped like
///
/// ```text
/// async fn name(req: Request, state: S) -> Result<impl IntoResponse, impl Into<HttpError>>
/// ```
///
/// The trait is sealed: only the blanket impl below can satisfy it.
pub trait Handler<S>: private::Sealed<S> + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler<S>;
}

mod private {
    pub trait Sealed<S> {}
}

impl<F, Fut, R, E, S> private::Sealed<S> for F
where
    F: Fn(Request, S) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
    R: IntoResponse + Send + 'static,
    E: Into<HttpError> + Send + 'static,
{
}

impl<F, Fut, R, E, S> Handler<S> for F
where
    F: Fn(Request, S) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
    R: IntoResponse + Send + 'static,
    E: Into<HttpError> + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler<S> {
        Arc::new(FnHandler(self))
    }
}

/// Bridges a concrete handler `F` to the trait-object world.
struct FnHandler<F>(F);

impl<F, Fut, R, E, S> ErasedHandler<S> for FnHandler<F>
where
    F: Fn(Request, S) -> Fut + Send + Sync,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
    R: IntoResponse + Send + 'static,
    E: Into<HttpError> + Send + 'static,
{
    fn call(&self, req: Request, state: S) -> BoxFuture<'static, HandlerResult> {
        let fut = (self.0)(req, state);
        Box::pin(async move {
            fut.await
                .map(IntoResponse::into_response)
                .map_err(Into::into)
        })
    }
}
