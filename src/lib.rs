//! # contactd
//!
//! A minimal HTTP CRUD service for a single resource: contacts, stored as
//! documents in a `contacts` collection.
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | `/contacts` | 200, JSON array |
//! | POST | `/contact` | 201, `{"insertedId": "..."}` |
//! | GET | `/contact/{id}` | 200, JSON contact |
//! | PUT | `/contact/{id}` | 204 |
//! | DELETE | `/contact/{id}` | 204 |
//!
//! Failures are served as `{"message": "..."}` with the matching status.
//!
//! The crate is layered leaves-first:
//!
//! - [`store`] — the document store interface and an in-memory implementation
//! - a small hyper-based HTTP layer: [`Router`], [`Request`], [`Response`],
//!   [`middleware`], [`Server`]
//! - [`contacts`] — the five handlers, their error enum and validation
//! - [`app`] — the route table and middleware stack
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use contactd::{app, config::Config, store::MemoryDatabase, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::default();
//!     let db = MemoryDatabase::new(config.db_name.clone());
//!     let router = app::build_app(app::state_from_config(&config, &db));
//!
//!     Server::bind(config.addr()).serve(router).await.unwrap();
//! }
//! ```

mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;

pub mod app;
pub mod config;
pub mod contacts;
pub mod middleware;
pub mod store;

pub use error::{Error, HttpError};
pub use handler::{Handler, HandlerResult};
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::{Server, serve_listener};
