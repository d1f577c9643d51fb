//! The public surface of the virtual filesystem.

use std::path::PathBuf;
use std::sync::Arc;

use redfish_vfs_client::{ConnectionConfig, RedfishClient, Transport};
use redfish_vfs_common as paths;
use redfish_vfs_model::{Property, Resource, Target};

use crate::cache::ResourceCache;
use crate::entry::{entries_for, Entry};
use crate::error::VfsError;
use crate::resolver;

/// A Redfish service presented as a filesystem.
///
/// Resources are directories, properties are files or sub-directories,
/// hyperlinks are symlinks; one `/`-separated addressing scheme covers all
/// of them. All operations are synchronous and safe to call from multiple
/// threads.
pub struct Vfs {
    cache: ResourceCache,
}

impl Vfs {
    /// Connect and authenticate against a live endpoint. The cache
    /// persists to `.rfsh_cache_{host}.json` in the working directory and
    /// is preloaded from it when present.
    pub fn connect(config: &ConnectionConfig) -> Result<Self, VfsError> {
        let client: RedfishClient = RedfishClient::connect(config)?;
        let host: String = config.host().unwrap_or_else(|| "unknown".to_string());
        let cache_file: PathBuf = PathBuf::from(format!(".rfsh_cache_{}.json", host));

        Ok(Self {
            cache: ResourceCache::new(Box::new(client), Some(cache_file)),
        })
    }

    /// Browse a previously saved cache without any network access. Cache
    /// misses fail with [`VfsError::NotCached`].
    pub fn offline(cache_file: impl Into<PathBuf>) -> Result<Self, VfsError> {
        Ok(Self {
            cache: ResourceCache::offline(cache_file.into())?,
        })
    }

    /// Assemble a VFS from an arbitrary transport, e.g. a canned one in
    /// tests.
    pub fn with_transport(transport: Box<dyn Transport>, cache_file: Option<PathBuf>) -> Self {
        Self {
            cache: ResourceCache::new(transport, cache_file),
        }
    }

    /// Retrieve a resource by canonical path, fetching on a miss.
    pub fn get(&self, path: &str) -> Result<Arc<Resource>, VfsError> {
        self.cache.get(path)
    }

    /// Invoke an action: POST a JSON body, bypassing the cache entirely.
    pub fn post(&self, path: &str, body: &[u8]) -> Result<(Vec<u8>, u16), VfsError> {
        self.cache.post(path, body)
    }

    /// Resolve a path (absolute or relative to `base_path`) to the
    /// resource, property, or link it names.
    pub fn resolve_target(&self, base_path: &str, target: &str) -> Result<Target, VfsError> {
        resolver::resolve(&self.cache, base_path, target)
    }

    /// List children and top-level properties of a resource, name-sorted.
    pub fn list_all(&self, path: &str) -> Result<Vec<Entry>, VfsError> {
        let resource: Arc<Resource> = self.cache.get(path)?;
        Ok(entries_for(&resource))
    }

    /// List only the top-level properties of a resource, name-sorted.
    pub fn list_properties(&self, path: &str) -> Result<Vec<Property>, VfsError> {
        let resource: Arc<Resource> = self.cache.get(path)?;
        Ok(resource.properties.values().cloned().collect())
    }

    /// Join a target onto a base path. Pure string manipulation.
    pub fn join(&self, base: &str, target: &str) -> String {
        paths::join(base, target)
    }

    /// Parent of a path; the root is its own parent.
    pub fn parent(&self, path: &str) -> String {
        paths::parent(path)
    }

    /// Snapshot of every cached path.
    pub fn known_paths(&self) -> Vec<String> {
        self.cache.known_paths()
    }

    /// Drop one cached resource so the next access refetches it.
    pub fn invalidate(&self, path: &str) {
        self.cache.invalidate(path)
    }

    /// Drop all cached resources.
    pub fn clear(&self) {
        self.cache.clear()
    }

    /// Persist the cache to disk.
    pub fn sync(&self) -> Result<(), VfsError> {
        self.cache.save()
    }
}
