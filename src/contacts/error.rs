//! Contact handler failures and their status mapping.

use thiserror::Error;

use crate::error::HttpError;
use crate::store::StoreError;

/// Everything a contact handler can fail with.
///
/// Each variant maps to one HTTP status; [`From<ContactError>`] for
/// [`HttpError`] is the handler boundary where that mapping is applied.
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("Invalid body")]
    InvalidContentType,

    #[error("Request body can not be empty!")]
    EmptyBody,

    #[error("Request body must be a JSON object")]
    MalformedBody,

    /// Rejected by the configured [`ContactValidator`](super::ContactValidator).
    #[error("{0}")]
    Invalid(String),

    #[error("Contact not found")]
    NotFound,

    /// The document disappeared between lookup and update.
    #[error("Unable to update contact")]
    UpdateConflict,

    #[error("Unable to delete contact")]
    DeleteFailed,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ContactError {
    /// The status this error is served with. `None` only for a store failure
    /// that did not carry one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::InvalidContentType => Some(422),
            Self::EmptyBody | Self::MalformedBody | Self::Invalid(_) | Self::DeleteFailed => Some(400),
            Self::NotFound => Some(404),
            Self::UpdateConflict => Some(409),
            Self::Store(e) => e.status(),
        }
    }
}

impl From<ContactError> for HttpError {
    fn from(err: ContactError) -> Self {
        HttpError::with_code(err.status(), err.to_string())
    }
}
