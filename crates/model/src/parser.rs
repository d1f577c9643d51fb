//! Conversion of raw Redfish JSON into [`Resource`] trees.
//!
//! The parser places every top-level key in exactly one of two buckets:
//! link-only objects (and the `Members` array of a collection) become
//! navigable [`Child`]ren; everything else becomes a recursive [`Property`].
//! Nested link-only objects stay properties of kind `Link` so they keep
//! their position inside larger structures.

use std::collections::BTreeMap;

use chrono::Utc;
use serde_json::{Map, Value};

use redfish_vfs_common::{base_name, normalize};

use crate::error::ParseError;
use crate::property::{Property, PropertyKind, Scalar};
use crate::resource::{Child, ChildKind, Resource};

/// Prefix of OData protocol metadata. Keys with this prefix are dropped;
/// other `@`-prefixed keys (`@Redfish.*`, `@Message.*`) are data
/// annotations and are preserved.
const ODATA_PREFIX: &str = "@odata.";

/// Parse one resource's raw JSON into a [`Resource`].
pub fn parse(path: &str, data: &[u8]) -> Result<Resource, ParseError> {
    let root: Value = serde_json::from_slice(data)?;
    let object: &Map<String, Value> = root.as_object().ok_or(ParseError::NotAnObject)?;

    let canonical: String = normalize(path);
    let mut resource = Resource {
        path: canonical.clone(),
        odata_id: string_field(object, "@odata.id"),
        odata_type: string_field(object, "@odata.type"),
        raw_json: data.to_vec(),
        properties: BTreeMap::new(),
        children: BTreeMap::new(),
        fetched_at: Utc::now(),
    };

    for (key, value) in object {
        if key.starts_with(ODATA_PREFIX) {
            continue;
        }

        // A top-level link-only object is a navigable child, not a property.
        if let Some(target) = link_only_target(value) {
            resource.children.insert(
                key.clone(),
                Child {
                    name: key.clone(),
                    kind: classify_link(&canonical, target),
                    target: target.to_string(),
                    parent: canonical.clone(),
                },
            );
            continue;
        }

        // Collection members become children named by their last URL segment.
        if key == "Members" {
            if let Value::Array(elements) = value {
                if is_link_array(elements) {
                    extract_member_children(elements, &canonical, &mut resource.children);
                    continue;
                }
            }
        }

        resource
            .properties
            .insert(key.clone(), parse_property(key, value));
    }

    Ok(resource)
}

/// Recursively parse a JSON value into a property tree.
fn parse_property(name: &str, value: &Value) -> Property {
    let kind: PropertyKind = match value {
        Value::Object(object) => {
            if let Some(target) = link_only_target(value) {
                PropertyKind::Link(target.to_string())
            } else {
                let mut children: BTreeMap<String, Property> = BTreeMap::new();
                for (key, child) in object {
                    if key.starts_with(ODATA_PREFIX) {
                        continue;
                    }
                    children.insert(key.clone(), parse_property(key, child));
                }
                PropertyKind::Object(children)
            }
        }
        Value::Array(elements) => PropertyKind::Array(
            elements
                .iter()
                .enumerate()
                .map(|(i, element)| parse_property(&format!("[{}]", i), element))
                .collect(),
        ),
        Value::String(s) => {
            // URI-bearing names whose value is a Redfish path are links.
            if is_uri_property(name) && s.starts_with('/') {
                PropertyKind::Link(s.clone())
            } else {
                PropertyKind::Simple(Scalar::String(s.clone()))
            }
        }
        Value::Number(n) => PropertyKind::Simple(match n.as_i64() {
            Some(i) => Scalar::Integer(i),
            None => Scalar::Float(n.as_f64().unwrap_or(f64::NAN)),
        }),
        Value::Bool(b) => PropertyKind::Simple(Scalar::Bool(*b)),
        Value::Null => PropertyKind::Simple(Scalar::Null),
    };

    Property {
        name: name.to_string(),
        kind,
        raw_json: value.to_string(),
    }
}

/// Whether a property name marks a URI reference per the DMTF convention:
/// "Non-resource reference properties shall include the Uri or URI term in
/// their property name and shall be of type string." `@Redfish.ActionInfo`
/// and action `target` fields are URI strings as well.
fn is_uri_property(name: &str) -> bool {
    name.ends_with("Uri")
        || name.ends_with("URI")
        || name == "@Redfish.ActionInfo"
        || name == "target"
}

/// If the value is an object carrying `@odata.id` and nothing but
/// `@odata.*` keys, return the link target. Any non-metadata key means the
/// object carries data and must be parsed as a property.
fn link_only_target(value: &Value) -> Option<&str> {
    let object: &Map<String, Value> = value.as_object()?;
    let target: &str = object.get("@odata.id")?.as_str()?;
    if target.is_empty() {
        return None;
    }
    if object.keys().all(|k| k.starts_with(ODATA_PREFIX)) {
        Some(target)
    } else {
        None
    }
}

/// Whether a non-empty array consists solely of link-only objects.
fn is_link_array(elements: &[Value]) -> bool {
    !elements.is_empty() && elements.iter().all(|e| link_only_target(e).is_some())
}

fn extract_member_children(
    elements: &[Value],
    parent: &str,
    children: &mut BTreeMap<String, Child>,
) {
    for element in elements {
        if let Some(target) = link_only_target(element) {
            let name: &str = base_name(target);
            if name.is_empty() {
                continue;
            }
            children.insert(
                name.to_string(),
                Child {
                    name: name.to_string(),
                    kind: classify_link(parent, target),
                    target: target.to_string(),
                    parent: parent.to_string(),
                },
            );
        }
    }
}

/// Classify a link by URL containment alone: a target equal to the parent
/// or underneath it is in-subtree, anything else is a cross-reference.
pub fn classify_link(parent: &str, target: &str) -> ChildKind {
    let parent: &str = parent.trim_end_matches('/');
    let target: &str = target.trim_end_matches('/');

    if target == parent || target.starts_with(&format!("{}/", parent)) {
        ChildKind::Link
    } else {
        ChildKind::Symlink
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> String {
    object
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
