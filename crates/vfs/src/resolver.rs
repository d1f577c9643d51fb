//! Path resolution across resources and property trees.
//!
//! A path like `Systems/1/Links/Chassis[0]/Manufacturer` crosses two
//! address spaces: resource URLs (fetched over HTTP) and the JSON property
//! trees inside each resource (pure in-memory lookups). The walk runs in
//! two modes. In resource mode a segment is first tried as a child link,
//! which moves the walk to another resource; anything else drops into
//! property mode, where segments descend the property tree and never
//! fetch. A link property with segments remaining after it switches back
//! to resource mode at the link's target: at most one fetch per segment,
//! and a link at the end of the path is returned unfollowed.

use std::collections::BTreeMap;
use std::sync::Arc;

use redfish_vfs_common::{normalize, REDFISH_ROOT};
use redfish_vfs_model::{Property, PropertyKind, Resource, Target};

use crate::cache::ResourceCache;
use crate::error::VfsError;

/// Resolve `target` against `base_path`.
///
/// An empty target resolves the base itself; an absolute target (leading
/// `/`) ignores the base; anything else is joined onto it. The full path
/// must lie under `/redfish/v1`.
pub(crate) fn resolve(
    cache: &ResourceCache,
    base_path: &str,
    target: &str,
) -> Result<Target, VfsError> {
    if target.is_empty() {
        resolve_absolute(cache, base_path)
    } else if target.starts_with('/') {
        resolve_absolute(cache, target)
    } else {
        resolve_absolute(cache, &format!("{}/{}", base_path, target))
    }
}

fn resolve_absolute(cache: &ResourceCache, path: &str) -> Result<Target, VfsError> {
    let path: String = normalize(path);
    let rest: &str = path
        .strip_prefix(REDFISH_ROOT)
        .filter(|r| r.is_empty() || r.starts_with('/'))
        .ok_or_else(|| VfsError::InvalidPath {
            path: path.clone(),
        })?;

    // Empty segments from trailing or doubled slashes are dropped.
    let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();

    if segments.is_empty() {
        let resource: Arc<Resource> = cache.get(REDFISH_ROOT)?;
        return Ok(Target::Resource {
            resource,
            path: REDFISH_ROOT.to_string(),
        });
    }

    walk(cache, &segments)
}

/// Consume one segment per iteration, fetching resources as the walk
/// crosses link boundaries.
fn walk(cache: &ResourceCache, segments: &[&str]) -> Result<Target, VfsError> {
    let mut current_path: String = REDFISH_ROOT.to_string();
    let mut index: usize = 0;

    'resource: loop {
        let resource: Arc<Resource> = cache.get(&current_path)?;

        // Resource mode: children first. A bracketed segment can only be
        // an array access, so it never names a child.
        if !segments[index].contains('[') {
            if let Some(child) = resource.children.get(segments[index]) {
                current_path.clone_from(&child.target);
                index += 1;
                if index == segments.len() {
                    // Path ended on a child: resolve its resource.
                    let resolved: Arc<Resource> = cache.get(&current_path)?;
                    let path: String = resolved.path.clone();
                    return Ok(Target::Resource {
                        resource: resolved,
                        path,
                    });
                }
                continue 'resource;
            }
        }

        // Property mode: walk the tree of this one resource. No fetches
        // happen here; only following a link returns to resource mode.
        let mut props: &BTreeMap<String, Property> = &resource.properties;
        loop {
            let prop: &Property = navigate_segment(props, segments[index])?;

            if index == segments.len() - 1 {
                return Ok(match &prop.kind {
                    PropertyKind::Link(target) => Target::Link {
                        resource: resource.clone(),
                        property: prop.clone(),
                        target: target.clone(),
                    },
                    _ => Target::Property {
                        resource: resource.clone(),
                        property: prop.clone(),
                    },
                });
            }

            index += 1;
            match &prop.kind {
                PropertyKind::Link(target) => {
                    current_path.clone_from(target);
                    continue 'resource;
                }
                PropertyKind::Object(children) => props = children,
                PropertyKind::Array(_) | PropertyKind::Simple(_) => {
                    // Scalars and arrays have no named namespace for the
                    // next segment to match.
                    return Err(VfsError::NotFound {
                        path: segments[index].to_string(),
                    });
                }
            }
        }
    }
}

/// Look up one segment in a property map, handling `name[index]` array
/// access. Malformed index syntax is the caller's mistake
/// ([`VfsError::InvalidPath`]); a missing name, non-array property, or
/// out-of-range index is [`VfsError::NotFound`].
fn navigate_segment<'a>(
    props: &'a BTreeMap<String, Property>,
    segment: &str,
) -> Result<&'a Property, VfsError> {
    let Some(open) = segment.find('[') else {
        return props.get(segment).ok_or_else(|| VfsError::NotFound {
            path: segment.to_string(),
        });
    };

    let index: i64 = segment[open + 1..]
        .strip_suffix(']')
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| VfsError::InvalidPath {
            path: segment.to_string(),
        })?;

    let name: &str = &segment[..open];
    let prop: &Property = props.get(name).ok_or_else(|| VfsError::NotFound {
        path: name.to_string(),
    })?;

    let PropertyKind::Array(elements) = &prop.kind else {
        return Err(VfsError::NotFound {
            path: segment.to_string(),
        });
    };

    usize::try_from(index)
        .ok()
        .and_then(|i| elements.get(i))
        .ok_or_else(|| VfsError::NotFound {
            path: segment.to_string(),
        })
}
