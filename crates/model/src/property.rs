//! Property trees: the recursive structure of a resource's JSON fields.

use std::collections::BTreeMap;
use std::fmt;

/// A decoded JSON scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    /// Whole numbers that fit an `i64`.
    Integer(i64),
    /// All other numbers.
    Float(f64),
    Bool(bool),
    Null,
}

impl Scalar {
    /// The string payload, if this is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => write!(f, "{}", s),
            Scalar::Integer(n) => write!(f, "{}", n),
            Scalar::Float(n) => write!(f, "{}", n),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Null => write!(f, "null"),
        }
    }
}

/// One JSON field of a resource.
///
/// Properties form a tree: objects carry named children, arrays carry
/// ordered elements (named `[0]`, `[1]`, ...), links carry the URL of the
/// resource they reference. The original JSON slice is retained for display
/// and sizing.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Field name as it appears in the JSON.
    pub name: String,
    /// The variant payload.
    pub kind: PropertyKind,
    /// JSON for this subtree.
    pub raw_json: String,
}

/// The four shapes a property can take.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    /// A scalar leaf.
    Simple(Scalar),
    /// A nested object; keys are field names.
    Object(BTreeMap<String, Property>),
    /// An ordered sequence of elements.
    Array(Vec<Property>),
    /// A navigation reference; the payload is the `@odata.id` URL or a
    /// URI-valued string.
    Link(String),
}

impl Property {
    /// The link target, if this property is a link.
    pub fn link_target(&self) -> Option<&str> {
        match &self.kind {
            PropertyKind::Link(target) => Some(target),
            _ => None,
        }
    }

    /// The decoded scalar, if this property is simple.
    pub fn value(&self) -> Option<&Scalar> {
        match &self.kind {
            PropertyKind::Simple(value) => Some(value),
            _ => None,
        }
    }

    /// Named children, if this property is an object.
    pub fn children(&self) -> Option<&BTreeMap<String, Property>> {
        match &self.kind {
            PropertyKind::Object(children) => Some(children),
            _ => None,
        }
    }

    /// Ordered elements, if this property is an array.
    pub fn elements(&self) -> Option<&[Property]> {
        match &self.kind {
            PropertyKind::Array(elements) => Some(elements),
            _ => None,
        }
    }

    pub fn is_link(&self) -> bool {
        matches!(self.kind, PropertyKind::Link(_))
    }
}
