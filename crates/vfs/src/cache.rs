//! Resource cache with transparent fetch-on-miss.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;

use redfish_vfs_client::Transport;
use redfish_vfs_common::normalize;
use redfish_vfs_model::{parse, Resource};

use crate::error::VfsError;
use crate::persist;

/// Path-keyed store of parsed resources.
///
/// `get` consults the map first and fetches through the attached transport
/// on a miss. Resources are immutable once inserted; a refresh is
/// `invalidate` followed by the next `get`. Without a transport the cache
/// is offline and misses fail with [`VfsError::NotCached`].
///
/// The lock is never held across network or parse calls: misses fetch and
/// parse unlocked, then re-check under the write lock, so two racing
/// fetchers publish exactly one `Resource` per path.
pub struct ResourceCache {
    transport: Option<Box<dyn Transport>>,
    store: RwLock<HashMap<String, Arc<Resource>>>,
    file: Option<PathBuf>,
}

impl ResourceCache {
    /// Create a cache backed by a transport, preloading `file` when it
    /// already exists. A broken cache file is ignored here; the transport
    /// can refetch everything.
    pub fn new(transport: Box<dyn Transport>, file: Option<PathBuf>) -> Self {
        let store: HashMap<String, Arc<Resource>> = match &file {
            Some(path) => persist::load_entries(path).unwrap_or_else(|e| {
                tracing::debug!("ignoring unreadable cache file {}: {}", path.display(), e);
                HashMap::new()
            }),
            None => HashMap::new(),
        };

        Self {
            transport: Some(transport),
            store: RwLock::new(store),
            file,
        }
    }

    /// Create an offline cache from a cache file alone. Fails if the file
    /// cannot be read or decoded, since there is no other data source.
    pub fn offline(file: PathBuf) -> Result<Self, VfsError> {
        let store: HashMap<String, Arc<Resource>> = persist::load_entries(&file)?;
        Ok(Self {
            transport: None,
            store: RwLock::new(store),
            file: Some(file),
        })
    }

    /// Retrieve a resource, fetching and parsing on a miss.
    pub fn get(&self, path: &str) -> Result<Arc<Resource>, VfsError> {
        let path: String = normalize(path);

        if let Some(resource) = self.store.read().get(&path) {
            return Ok(resource.clone());
        }

        let Some(transport) = &self.transport else {
            return Err(VfsError::NotCached { path });
        };

        tracing::debug!("cache miss, fetching {}", path);
        let data: Vec<u8> = transport.fetch(&path)?;
        let resource: Resource = parse(&path, &data).map_err(|e| VfsError::Parse {
            path: path.clone(),
            source: e,
        })?;
        let resource: Arc<Resource> = Arc::new(resource);

        // Another thread may have fetched the same path meanwhile; keep
        // whichever entry is already published.
        let mut store = self.store.write();
        Ok(store.entry(path).or_insert(resource).clone())
    }

    /// POST through to the transport. Never touches the cached state.
    pub fn post(&self, path: &str, body: &[u8]) -> Result<(Vec<u8>, u16), VfsError> {
        let path: String = normalize(path);
        let Some(transport) = &self.transport else {
            return Err(VfsError::NotCached { path });
        };
        Ok(transport.post(&path, body)?)
    }

    /// Insert an already-parsed resource.
    pub fn put(&self, resource: Resource) {
        let path: String = resource.path.clone();
        self.store.write().insert(path, Arc::new(resource));
    }

    /// Remove one entry; the next `get` refetches it.
    pub fn invalidate(&self, path: &str) {
        let path: String = normalize(path);
        self.store.write().remove(&path);
    }

    /// Remove all entries.
    pub fn clear(&self) {
        self.store.write().clear();
    }

    /// Sorted snapshot of all cached paths.
    pub fn known_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.store.read().keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Number of cached resources.
    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }

    /// True when no transport is attached and misses cannot be served.
    pub fn is_offline(&self) -> bool {
        self.transport.is_none()
    }

    /// Persist every entry to the cache file. A cache constructed without
    /// a file path saves nothing.
    pub fn save(&self) -> Result<(), VfsError> {
        let Some(file) = &self.file else {
            return Ok(());
        };
        // The read lock is held across the disk write so concurrent saves
        // serialize and see a consistent snapshot.
        let store = self.store.read();
        persist::save_entries(&store, file)
    }
}
