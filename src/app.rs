//! Application wiring: state, middleware and the contact routes.

use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::contacts::{ContactState, ContactValidator, PresenceOnly, TypedFields, handlers};
use crate::middleware::{NormalizeErrors, RequestLog};
use crate::router::Router;
use crate::store::MemoryDatabase;

/// The full route table.
///
/// | Method | Path | Handler |
/// |---|---|---|
/// | GET | `/contacts` | [`handlers::list`] |
/// | POST | `/contact` | [`handlers::create`] |
/// | GET | `/contact/{id}` | [`handlers::get`] |
/// | PUT | `/contact/{id}` | [`handlers::update`] |
/// | DELETE | `/contact/{id}` | [`handlers::delete`] |
///
/// Every route runs inside [`RequestLog`] then [`NormalizeErrors`].
pub fn build_app(state: ContactState) -> Router<ContactState> {
    Router::with_state(state)
        .layer(RequestLog)
        .layer(NormalizeErrors)
        .get("/contacts", handlers::list)
        .post("/contact", handlers::create)
        .get("/contact/{id}", handlers::get)
        .put("/contact/{id}", handlers::update)
        .delete("/contact/{id}", handlers::delete)
}

/// Opens the contacts collection in `db` and picks the validator `config`
/// asks for.
pub fn state_from_config(config: &Config, db: &MemoryDatabase) -> ContactState {
    let validator: Arc<dyn ContactValidator> = if config.strict_validation {
        Arc::new(TypedFields)
    } else {
        Arc::new(PresenceOnly)
    };
    info!(
        db = db.name(),
        collection = Config::COLLECTION,
        strict_validation = config.strict_validation,
        "contacts collection opened"
    );
    ContactState::new(db.collection(Config::COLLECTION), validator)
}
