//! Resolution results.

use std::sync::Arc;

use crate::property::Property;
use crate::resource::Resource;

/// What a path resolved to: a resource, a property inside one, or a link
/// property reached at the end of the path.
///
/// Targets are ephemeral; they borrow nothing and can be held across later
/// cache operations. A tail link is returned unfollowed so the caller
/// decides whether to canonicalize (`cd` follows, `open` may not).
#[derive(Debug, Clone)]
pub enum Target {
    /// The path named a resource.
    Resource {
        resource: Arc<Resource>,
        /// Canonical path of the resolved resource.
        path: String,
    },
    /// The path ended on a non-link property.
    Property {
        /// The resource containing the property.
        resource: Arc<Resource>,
        property: Property,
    },
    /// The path ended on a link property.
    Link {
        /// The resource containing the link.
        resource: Arc<Resource>,
        property: Property,
        /// The link's target URL; not fetched.
        target: String,
    },
}

impl Target {
    /// The resource this target points into (or at).
    pub fn resource(&self) -> &Arc<Resource> {
        match self {
            Target::Resource { resource, .. }
            | Target::Property { resource, .. }
            | Target::Link { resource, .. } => resource,
        }
    }

    /// The resource path a navigation frontend should move to: the resolved
    /// resource's path, or a tail link's target. `None` for plain
    /// properties.
    pub fn resource_path(&self) -> Option<&str> {
        match self {
            Target::Resource { path, .. } => Some(path),
            Target::Link { target, .. } => Some(target),
            Target::Property { .. } => None,
        }
    }

    /// The reached property, for property and link targets.
    pub fn property(&self) -> Option<&Property> {
        match self {
            Target::Resource { .. } => None,
            Target::Property { property, .. } | Target::Link { property, .. } => Some(property),
        }
    }

    pub fn is_resource(&self) -> bool {
        matches!(self, Target::Resource { .. })
    }
}
