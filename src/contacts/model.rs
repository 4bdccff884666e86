//! Contact document shape.

use serde::Serialize;
use serde_json::Value;

use crate::store::{Document, ObjectId, StoredDocument};

/// The keys a contact document may carry.
const FIELDS: [&str; 4] = ["name", "age", "email", "address"];

/// The writable part of a contact.
///
/// Values are kept as raw JSON: by default nothing checks that `age` is a
/// number or `email` a string. A field the client did not send is `None`
/// and is left out of both the stored document and the JSON output; an
/// explicit `null` is kept.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ContactFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Value>,
}

impl ContactFields {
    /// Picks the contact keys out of a request body or stored document.
    /// Any other key is ignored.
    pub fn from_document(doc: &Document) -> Self {
        Self {
            name: doc.get("name").cloned(),
            age: doc.get("age").cloned(),
            email: doc.get("email").cloned(),
            address: doc.get("address").cloned(),
        }
    }

    /// `(key, value)` for every supplied field, in [`FIELDS`] order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        FIELDS
            .into_iter()
            .zip([&self.name, &self.age, &self.email, &self.address])
            .filter_map(|(key, value)| value.as_ref().map(|v| (key, v)))
    }

    /// The document to store, or the `$set` to apply: supplied fields only.
    pub fn into_document(self) -> Document {
        [("name", self.name), ("age", self.age), ("email", self.email), ("address", self.address)]
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key.to_owned(), v)))
            .collect()
    }
}

/// A contact as served over HTTP: `{id, name, age, email, address}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Contact {
    pub id: ObjectId,
    #[serde(flatten)]
    pub fields: ContactFields,
}

impl From<StoredDocument> for Contact {
    fn from(doc: StoredDocument) -> Self {
        Self { id: doc.id, fields: ContactFields::from_document(&doc.body) }
    }
}
