//! Resources and the navigable links between them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::property::Property;

/// One Redfish endpoint's parsed state.
///
/// Immutable once built: a refresh produces a new `Resource` rather than
/// mutating an existing one. The parser guarantees that `properties` and
/// `children` never share a key, so a path segment names exactly one of the
/// two.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    /// Canonical path (absolute, no trailing slash).
    pub path: String,
    /// Top-level `@odata.id`, when the server provided one.
    pub odata_id: String,
    /// Top-level `@odata.type`.
    pub odata_type: String,
    /// The exact bytes the server returned, retained for dump and
    /// persistence.
    pub raw_json: Vec<u8>,
    /// Data fields, keyed by name. `BTreeMap` so iteration is name-sorted.
    pub properties: BTreeMap<String, Property>,
    /// Navigable links to other resources, keyed by segment name.
    pub children: BTreeMap<String, Child>,
    /// When the fetch that produced this resource happened.
    pub fetched_at: DateTime<Utc>,
}

impl Resource {
    /// Look up a top-level property by name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    /// Look up a child by name.
    pub fn child(&self, name: &str) -> Option<&Child> {
        self.children.get(name)
    }
}

/// Whether a child's target lies inside its parent's URL subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildKind {
    /// Target is the parent itself or underneath it.
    Link,
    /// Target lives elsewhere in the tree (a cross-reference).
    Symlink,
}

/// A navigable link exposed on a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Child {
    /// Segment under which this child appears (for collection members, the
    /// last URL segment of the target).
    pub name: String,
    pub kind: ChildKind,
    /// Absolute resource URL.
    pub target: String,
    /// Canonical path of the owning resource.
    pub parent: String,
}

impl Child {
    /// True when this child references a resource outside its parent's
    /// subtree.
    pub fn is_external(&self) -> bool {
        self.kind == ChildKind::Symlink
    }
}
