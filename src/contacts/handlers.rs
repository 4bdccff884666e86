//! The five contact handlers.
//!
//! Each one translates a request into store calls and the store's answer
//! into a response. Failures propagate with `?` as [`ContactError`] and are
//! normalized into an [`HttpError`](crate::HttpError) when they leave the
//! handler.
//!
//! Update and delete look the document up before acting on it. The two
//! store calls are not atomic: a concurrent delete in between shows up as
//! [`ContactError::UpdateConflict`] or [`ContactError::DeleteFailed`].

use http::StatusCode;
use serde_json::Value;
use tracing::{debug, info};

use super::{Contact, ContactError, ContactFields, ContactState};
use crate::request::Request;
use crate::response::Json;
use crate::store::{Document, InsertOneResult, ObjectId, StoredDocument};

/// `POST /contact`
pub async fn create(
    req: Request,
    state: ContactState,
) -> Result<(StatusCode, Json<InsertOneResult>), ContactError> {
    let fields = ContactFields::from_document(&json_body(&req)?);
    state.validator().validate_new(&fields)?;

    let inserted = state.contacts().insert_one(fields.into_document()).await?;
    info!(id = %inserted.inserted_id, "contact created");
    Ok((StatusCode::CREATED, Json(inserted)))
}

/// `GET /contacts`
pub async fn list(_req: Request, state: ContactState) -> Result<Json<Vec<Contact>>, ContactError> {
    let docs = state.contacts().find().await?;
    Ok(Json(docs.into_iter().map(Contact::from).collect()))
}

/// `GET /contact/{id}`
pub async fn get(req: Request, state: ContactState) -> Result<Json<Contact>, ContactError> {
    let doc = lookup(&req, &state).await?;
    Ok(Json(Contact::from(doc)))
}

/// `PUT /contact/{id}`
pub async fn update(req: Request, state: ContactState) -> Result<StatusCode, ContactError> {
    let fields = ContactFields::from_document(&json_body(&req)?);
    state.validator().validate_patch(&fields)?;

    let existing = lookup(&req, &state).await?;
    let result = state.contacts().update_one(&existing.id, fields.into_document()).await?;
    if result.matched_count == 0 {
        return Err(ContactError::UpdateConflict);
    }
    info!(id = %existing.id, modified = result.modified_count, "contact updated");
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /contact/{id}`
pub async fn delete(req: Request, state: ContactState) -> Result<StatusCode, ContactError> {
    let existing = lookup(&req, &state).await?;
    let result = state.contacts().delete_one(&existing.id).await?;
    if result.deleted_count == 0 {
        return Err(ContactError::DeleteFailed);
    }
    info!(id = %existing.id, "contact deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Finds the document named by the `id` path parameter. An id that does not
/// parse cannot name a document, so it is reported as not found.
async fn lookup(req: &Request, state: &ContactState) -> Result<StoredDocument, ContactError> {
    let raw = req.param("id").unwrap_or_default();
    let Ok(id) = raw.parse::<ObjectId>() else {
        debug!(id = raw, "unparseable contact id");
        return Err(ContactError::NotFound);
    };
    state.contacts().find_one(&id).await?.ok_or(ContactError::NotFound)
}

/// The body of a write request: declared as JSON, and a non-empty object.
fn json_body(req: &Request) -> Result<Document, ContactError> {
    if !req.is_json() {
        return Err(ContactError::InvalidContentType);
    }
    if req.body().trim_ascii().is_empty() {
        return Err(ContactError::EmptyBody);
    }
    match req.json::<Value>() {
        Ok(Value::Object(map)) if map.is_empty() => Err(ContactError::EmptyBody),
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(ContactError::MalformedBody),
    }
}
