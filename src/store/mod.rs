//! Document store interface.
//!
//! The service talks to its database through [`Collection`], a
//! collection-oriented interface in the style of a document database driver:
//! schema-free JSON documents addressed by a store-assigned [`ObjectId`].
//!
//! The shipped implementation is [`MemoryDatabase`] / [`MemoryCollection`].
//! Anything else that can insert, scan, look up, `$set`-merge and delete
//! documents by id can stand in for it.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use serde::{Serialize, Serializer};
use thiserror::Error;

mod memory;

pub use memory::{MemoryCollection, MemoryDatabase};

/// A schema-free document body. The id is stored alongside, never inside it.
pub type Document = serde_json::Map<String, serde_json::Value>;

// ── ObjectId ──────────────────────────────────────────────────────────────────

/// A 12-byte document identifier, rendered as 24 lowercase hex characters.
///
/// Layout: 4-byte big-endian UNIX seconds, 5 bytes fixed per process, 3-byte
/// big-endian counter. Ids minted by one process sort in creation order.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ObjectId([u8; 12]);

static PROCESS_UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();
static COUNTER: AtomicU32 = AtomicU32::new(0);

impl ObjectId {
    /// Mints a fresh id.
    pub fn new() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or_default();
        let unique = PROCESS_UNIQUE.get_or_init(rand::random::<[u8; 5]>);
        let count = COUNTER.fetch_add(1, Ordering::Relaxed) & 0x00ff_ffff;

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(unique);
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl Default for ObjectId {
    fn default() -> Self { Self::new() }
}

/// Returned when a string is not 24 hex characters.
#[derive(Debug, Error)]
#[error("invalid object id: {0}")]
pub struct InvalidObjectId(#[from] hex::FromHexError);

impl FromStr for ObjectId {
    type Err = InvalidObjectId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 12];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.to_hex())
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

// ── Operation results ─────────────────────────────────────────────────────────

/// A document as it comes back from the store.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredDocument {
    pub id: ObjectId,
    pub body: Document,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    pub inserted_id: ObjectId,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub matched_count: u64,
    pub modified_count: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub deleted_count: u64,
}

// ── Errors ────────────────────────────────────────────────────────────────────

/// Failures reported by a store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("document store unavailable: {0}")]
    Unavailable(String),

    /// The driver rejected the operation. `status`, when present, is the
    /// HTTP status the driver associates with the failure.
    #[error("{message}")]
    Driver { message: String, status: Option<u16> },
}

impl StoreError {
    /// HTTP status carried by the error, if the store supplied one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unavailable(_) => Some(503),
            Self::Driver { status, .. } => *status,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

// ── Collection ────────────────────────────────────────────────────────────────

/// One named collection of documents.
#[async_trait]
pub trait Collection: Send + Sync {
    fn name(&self) -> &str;

    /// Stores `doc` under a freshly minted id.
    async fn insert_one(&self, doc: Document) -> StoreResult<InsertOneResult>;

    /// Every document in store iteration order.
    async fn find(&self) -> StoreResult<Vec<StoredDocument>>;

    async fn find_one(&self, id: &ObjectId) -> StoreResult<Option<StoredDocument>>;

    /// `$set` merge: each key in `set` overwrites the stored value, other
    /// keys are left untouched.
    async fn update_one(&self, id: &ObjectId, set: Document) -> StoreResult<UpdateResult>;

    async fn delete_one(&self, id: &ObjectId) -> StoreResult<DeleteResult>;
}
