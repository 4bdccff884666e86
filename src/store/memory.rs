//! In-process document store.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use super::{
    Collection, DeleteResult, Document, InsertOneResult, ObjectId, StoreResult, StoredDocument,
    UpdateResult,
};

/// A named set of in-memory collections.
///
/// Opened once at startup; [`collection`](MemoryDatabase::collection) hands
/// out shared handles, so two lookups of the same name see the same data.
pub struct MemoryDatabase {
    name: String,
    collections: RwLock<HashMap<String, Arc<MemoryCollection>>>,
}

impl MemoryDatabase {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), collections: RwLock::new(HashMap::new()) }
    }

    pub fn name(&self) -> &str { &self.name }

    /// Returns the collection called `name`, creating it on first use.
    pub fn collection(&self, name: &str) -> Arc<MemoryCollection> {
        if let Some(existing) = self.collections.read().get(name) {
            return Arc::clone(existing);
        }
        let mut collections = self.collections.write();
        let entry = collections.entry(name.to_owned()).or_insert_with(|| {
            debug!(db = %self.name, collection = name, "collection created");
            Arc::new(MemoryCollection::new(name))
        });
        Arc::clone(entry)
    }
}

/// A single collection held in memory.
///
/// Documents are keyed by [`ObjectId`], so iteration follows creation order.
pub struct MemoryCollection {
    name: String,
    docs: RwLock<BTreeMap<ObjectId, Document>>,
}

impl MemoryCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), docs: RwLock::new(BTreeMap::new()) }
    }

    pub fn is_empty(&self) -> bool { self.docs.read().is_empty() }
}

#[async_trait]
impl Collection for MemoryCollection {
    fn name(&self) -> &str { &self.name }

    async fn insert_one(&self, doc: Document) -> StoreResult<InsertOneResult> {
        let id = ObjectId::new();
        self.docs.write().insert(id, doc);
        Ok(InsertOneResult { inserted_id: id })
    }

    async fn find(&self) -> StoreResult<Vec<StoredDocument>> {
        let docs = self.docs.read();
        Ok(docs
            .iter()
            .map(|(id, body)| StoredDocument { id: *id, body: body.clone() })
            .collect())
    }

    async fn find_one(&self, id: &ObjectId) -> StoreResult<Option<StoredDocument>> {
        Ok(self.docs.read().get(id).map(|body| StoredDocument { id: *id, body: body.clone() }))
    }

    async fn update_one(&self, id: &ObjectId, set: Document) -> StoreResult<UpdateResult> {
        let mut docs = self.docs.write();
        let Some(doc) = docs.get_mut(id) else {
            return Ok(UpdateResult::default());
        };

        let mut modified = false;
        for (key, value) in set {
            if doc.get(&key) != Some(&value) {
                doc.insert(key, value);
                modified = true;
            }
        }
        Ok(UpdateResult { matched_count: 1, modified_count: u64::from(modified) })
    }

    async fn delete_one(&self, id: &ObjectId) -> StoreResult<DeleteResult> {
        let removed = self.docs.write().remove(id).is_some();
        Ok(DeleteResult { deleted_count: u64::from(removed) })
    }
}
