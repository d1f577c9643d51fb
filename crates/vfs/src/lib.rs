//! Virtual filesystem over the Redfish management API.
//!
//! Redfish resources become directories, their JSON properties become
//! files, and hyperlinks between resources become symbolic links, all
//! addressed with one `/`-separated scheme:
//!
//! ```text
//! Frontend ──▶ Resolver ──▶ Cache ──▶ Client ──▶ Parser ──▶ Resolver ──▶ Frontend
//! ```
//!
//! Fetching is strictly on demand: the resolver asks the cache, the cache
//! asks the session client on a miss, and the parser turns the response
//! into an immutable [`Resource`] that lives in the cache until it is
//! invalidated. Raw response bytes are retained and can be persisted to a
//! cache file for offline browsing.
//!
//! # Example
//!
//! ```ignore
//! use redfish_vfs::{ConnectionConfig, Vfs};
//!
//! let config = ConnectionConfig::new("https://bmc.example.com", "admin", "secret")
//!     .with_insecure(true);
//! let vfs = Vfs::connect(&config)?;
//!
//! let target = vfs.resolve_target("/redfish/v1", "Systems/1/Status/Health")?;
//! println!("{:?}", target.property());
//! vfs.sync()?;
//! ```

pub mod cache;
pub mod entry;
pub mod error;
pub mod facade;
mod persist;
mod resolver;

#[cfg(test)]
pub(crate) mod testutil;

pub use cache::ResourceCache;
pub use entry::{Entry, EntryKind};
pub use error::VfsError;
pub use facade::Vfs;

// Re-export the lower layers for convenience.
pub use redfish_vfs_client::{ClientError, ConnectionConfig, RedfishClient, Transport};
pub use redfish_vfs_common::{
    base_name, join, normalize, parent, split_for_completion, REDFISH_ROOT,
};
pub use redfish_vfs_model::{
    parse, Child, ChildKind, ParseError, Property, PropertyKind, Resource, Scalar, Target,
};
