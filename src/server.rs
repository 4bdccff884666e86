//! HTTP server.
//!
//! The server has two states: configured (after [`Server::bind`]) and
//! listening (inside [`Server::serve`]). Once listening it accepts
//! connections until the process exits; there is no drain or reload.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::Full;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::error::Error;
use crate::router::Router;

/// The HTTP server.
pub struct Server {
    addr: SocketAddr,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    pub fn bind(addr: SocketAddr) -> Self {
        Self { addr }
    }

    /// Binds, then accepts connections and dispatches them through `router`.
    ///
    /// Only returns if the listener cannot be bound.
    pub async fn serve<S>(self, router: Router<S>) -> Result<(), Error>
    where
        S: Clone + Send + Sync + 'static,
    {
        let listener = TcpListener::bind(self.addr).await?;
        serve_listener(listener, router).await
    }
}

/// Serves `router` on an already-bound listener.
///
/// Useful when the port is picked by the OS (`127.0.0.1:0`) and the caller
/// needs the resulting address before serving.
pub async fn serve_listener<S>(listener: TcpListener, router: Router<S>) -> Result<(), Error>
where
    S: Clone + Send + Sync + 'static,
{
    let addr = listener.local_addr()?;

    // Shared across connection tasks without copying the routing table.
    let router = Arc::new(router);

    info!(%addr, "server listening on http://{addr}");

    loop {
        let (stream, remote_addr) = match listener.accept().await {
            Ok(v) => v,
            Err(e) => {
                error!("accept error: {e}");
                continue;
            }
        };
        debug!(peer = %remote_addr, "connection accepted");

        let router = Arc::clone(&router);
        let io = TokioIo::new(stream);

        tokio::spawn(async move {
            // Called once per request on the connection, not once per
            // connection.
            let svc = service_fn(move |req| {
                let router = Arc::clone(&router);
                async move { dispatch(&router, req).await }
            });

            // HTTP/1.1 or HTTP/2, whichever the client negotiates.
            if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                .serve_connection(io, svc)
                .await
            {
                error!(peer = %remote_addr, "connection error: {e}");
            }
        });
    }
}

/// Failures are all turned into responses by the router, so hyper never
/// sees an error.
async fn dispatch<S>(
    router: &Router<S>,
    req: hyper::Request<hyper::body::Incoming>,
) -> Result<http::Response<Full<Bytes>>, Infallible>
where
    S: Clone + Send + Sync + 'static,
{
    Ok(router.call(req).await.into_inner())
}
