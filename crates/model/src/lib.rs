//! Data model and parser for the Redfish virtual filesystem.
//!
//! A Redfish endpoint answers GETs with JSON documents that reference each
//! other through `@odata.id` hyperlinks. This crate turns one such document
//! into a [`Resource`]: data fields become a recursive [`Property`] tree,
//! navigable hyperlinks become [`Child`] entries, and the two never share a
//! name, which is what lets a single `/`-separated path address both.
//!
//! The crate is pure data and parsing; fetching and caching live in the
//! `redfish-vfs` crate.

pub mod error;
pub mod parser;
pub mod property;
pub mod resource;
pub mod target;

pub use error::ParseError;
pub use parser::{classify_link, parse};
pub use property::{Property, PropertyKind, Scalar};
pub use resource::{Child, ChildKind, Resource};
pub use target::Target;
