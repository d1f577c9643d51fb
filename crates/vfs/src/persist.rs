//! Disk persistence of the resource cache.
//!
//! The cache file is a JSON object keyed by canonical path. Each entry
//! stores the raw server bytes (base64) rather than the parsed tree, so
//! loading re-parses through the current parser and yields structures
//! identical to a fresh fetch, and parser changes migrate stored data for
//! free.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use redfish_vfs_model::{parse, Resource};

use crate::error::VfsError;

/// One persisted resource.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheEntry {
    path: String,
    odata_id: String,
    odata_type: String,
    /// RFC 3339, e.g. `2025-01-15T10:30:00Z`.
    fetched_at: String,
    /// Base64 of the raw response body.
    data: String,
}

/// Write every cached resource to `file`.
pub(crate) fn save_entries(
    store: &HashMap<String, Arc<Resource>>,
    file: &Path,
) -> Result<(), VfsError> {
    let mut entries: BTreeMap<&str, CacheEntry> = BTreeMap::new();
    for (path, resource) in store {
        entries.insert(
            path,
            CacheEntry {
                path: resource.path.clone(),
                odata_id: resource.odata_id.clone(),
                odata_type: resource.odata_type.clone(),
                fetched_at: resource
                    .fetched_at
                    .to_rfc3339_opts(SecondsFormat::Secs, true),
                data: BASE64.encode(&resource.raw_json),
            },
        );
    }

    let data: Vec<u8> = serde_json::to_vec_pretty(&entries).map_err(|e| VfsError::Parse {
        path: file.display().to_string(),
        source: e.into(),
    })?;

    std::fs::write(file, data).map_err(|e| VfsError::Io {
        path: file.display().to_string(),
        source: e,
    })
}

/// Read a cache file back into resources. A missing file is an empty
/// cache; an unreadable or non-JSON file is an error; a readable file with
/// some broken entries loads the good ones and skips the rest.
pub(crate) fn load_entries(file: &Path) -> Result<HashMap<String, Arc<Resource>>, VfsError> {
    let data: Vec<u8> = match std::fs::read(file) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
        Err(e) => {
            return Err(VfsError::Io {
                path: file.display().to_string(),
                source: e,
            })
        }
    };

    let raw_entries: HashMap<String, serde_json::Value> =
        serde_json::from_slice(&data).map_err(|e| VfsError::Parse {
            path: file.display().to_string(),
            source: e.into(),
        })?;

    let mut store: HashMap<String, Arc<Resource>> = HashMap::new();
    for (key, value) in raw_entries {
        match load_entry(value) {
            Some(resource) => {
                store.insert(resource.path.clone(), Arc::new(resource));
            }
            None => {
                tracing::debug!("skipping corrupted cache entry {}", key);
            }
        }
    }

    Ok(store)
}

/// Decode one entry, or `None` when any part of it is corrupt.
fn load_entry(value: serde_json::Value) -> Option<Resource> {
    let entry: CacheEntry = serde_json::from_value(value).ok()?;
    let raw: Vec<u8> = BASE64.decode(&entry.data).ok()?;
    let fetched_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&entry.fetched_at)
        .ok()?
        .with_timezone(&Utc);

    let mut resource: Resource = parse(&entry.path, &raw).ok()?;
    // Restore the fetch time of the original request, not the load time.
    resource.fetched_at = fetched_at;
    Some(resource)
}
