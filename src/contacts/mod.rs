//! The contact resource: model, errors, validation and HTTP handlers.

use std::sync::Arc;

use crate::store::Collection;

mod error;
pub mod handlers;
mod model;
mod validate;

pub use error::ContactError;
pub use model::{Contact, ContactFields};
pub use validate::{ContactValidator, PresenceOnly, TypedFields};

/// What every contact handler is handed: the shared collection handle and
/// the validator.
///
/// Constructed once at startup. Cloning is two `Arc` bumps.
#[derive(Clone)]
pub struct ContactState {
    contacts: Arc<dyn Collection>,
    validator: Arc<dyn ContactValidator>,
}

impl ContactState {
    pub fn new(contacts: Arc<dyn Collection>, validator: Arc<dyn ContactValidator>) -> Self {
        Self { contacts, validator }
    }

    /// A state that performs no field validation.
    pub fn unvalidated(contacts: Arc<dyn Collection>) -> Self {
        Self::new(contacts, Arc::new(PresenceOnly))
    }

    pub fn contacts(&self) -> &dyn Collection { self.contacts.as_ref() }
    pub fn validator(&self) -> &dyn ContactValidator { self.validator.as_ref() }
}
