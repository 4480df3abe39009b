use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use tracing::trace;

#[derive(Debug, Default)]
pub(super) struct StoreInner {
    next_id: u64,
    blobs: HashMap<u64, Arc<[u8]>>,
}

#[derive(Debug, Clone, Default)]
pub struct BlobStore {
    pub(super) inner: Arc<Mutex<StoreInner>>,
}

impl BlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, bytes: Arc<[u8]>) -> ObjectUrl {
        let id = {
            let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.next_id += 1;
            let id = inner.next_id;
            inner.blobs.insert(id, bytes);
            id
        };
        trace!(id, "object url created");
        ObjectUrl {
            id,
            url: format!("blob:imgtools/{id:08x}"),
            store: Arc::downgrade(&self.inner),
        }
    }

    pub fn resolve(&self, url: &str) -> Option<Arc<[u8]>> {
        let id = parse_id(url)?;
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.blobs.get(&id).cloned()
    }

    pub fn live_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .blobs
            .len()
    }
}

fn parse_id(url: &str) -> Option<u64> {
    let hex = url.strip_prefix("blob:imgtools/")?;
    u64::from_str_radix(hex, 16).ok()
}

/// Owned handle to one object URL; dropping it revokes the URL.
pub struct ObjectUrl {
    id: u64,
    url: String,
    store: Weak<Mutex<StoreInner>>,
}

impl ObjectUrl {
    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn revoke(self) {}
}

impl fmt::Debug for ObjectUrl {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("ObjectUrl").field(&self.url).finish()
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.url)
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        let Some(store) = self.store.upgrade() else {
            return;
        };
        store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .blobs
            .remove(&self.id);
        trace!(id = self.id, "object url revoked");
    }
}
