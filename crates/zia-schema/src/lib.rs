//! Resource schemas for ZIA Resource Manager.
//!
//! This crate declares the field set of every resource kind the manager
//! handles, and validates caller input against those declarations.

pub mod builtins;
pub mod error;
pub mod field;
pub mod registry;
pub mod schema;
mod validation;

pub use error::{Error, Result};
pub use field::{FieldKind, FieldSpec, ScalarType, stable_key_text};
pub use registry::SchemaRegistry;
pub use schema::ResourceSchema;
