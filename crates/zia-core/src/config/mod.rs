//! Manifest of desired resources
//!
//! A manifest (`zia.toml`, or YAML) lists the resources to reconcile, in
//! order, plus the location of the local store and default options.

mod manifest;

pub use manifest::{DEFAULT_MANIFEST, DefaultsSection, Manifest, ResourceEntry, StoreSection};
