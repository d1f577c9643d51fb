//! Directory-listing rows for frontends.

use chrono::{DateTime, Utc};

use redfish_vfs_model::{ChildKind, Property, PropertyKind, Resource};

/// Display kind of a listed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Child resource under the parent URL.
    Child,
    /// Child resource elsewhere in the tree.
    Symlink,
    /// Object property, navigable with `/`.
    Object,
    /// Array property, navigable with `[n]`.
    Array,
    /// Link property.
    Link,
    /// Scalar property.
    Simple,
}

/// One row of a resource listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub name: String,
    /// Child entries carry their target URL; property entries carry the
    /// property's path under the resource.
    pub path: String,
    pub kind: EntryKind,
    /// Byte size of the property's JSON; zero for children.
    pub size: u64,
    /// Fetch time of the owning resource.
    pub modified: DateTime<Utc>,
}

impl Entry {
    /// True when the entry can be navigated into.
    pub fn is_dir(&self) -> bool {
        !matches!(self.kind, EntryKind::Simple)
    }
}

/// All entries of a resource, one per child and one per top-level
/// property, sorted by name.
pub(crate) fn entries_for(resource: &Resource) -> Vec<Entry> {
    let mut entries: Vec<Entry> =
        Vec::with_capacity(resource.children.len() + resource.properties.len());

    for child in resource.children.values() {
        entries.push(Entry {
            name: child.name.clone(),
            path: child.target.clone(),
            kind: match child.kind {
                ChildKind::Link => EntryKind::Child,
                ChildKind::Symlink => EntryKind::Symlink,
            },
            size: 0,
            modified: resource.fetched_at,
        });
    }

    for property in resource.properties.values() {
        entries.push(Entry {
            name: property.name.clone(),
            path: format!("{}/{}", resource.path, property.name),
            kind: kind_for_property(property),
            size: property.raw_json.len() as u64,
            modified: resource.fetched_at,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

fn kind_for_property(property: &Property) -> EntryKind {
    match property.kind {
        PropertyKind::Simple(_) => EntryKind::Simple,
        PropertyKind::Object(_) => EntryKind::Object,
        PropertyKind::Array(_) => EntryKind::Array,
        PropertyKind::Link(_) => EntryKind::Link,
    }
}
