//! Resource records, normalization and structural diffing for ZIA Resource Manager
//!
//! Desired and remote records are reduced to a [`CanonicalResource`] by
//! [`normalize`], then compared field by field with [`compare`]. Payloads
//! for the remote API are built with the functions in [`payload`].

pub mod canonical;
pub mod diff;
pub mod error;
pub mod normalize;
pub mod payload;
pub mod record;

pub use canonical::{CanonicalResource, CanonicalValue};
pub use diff::{ChangeKind, DiffResult, FieldChange, MAX_DIFF_DEPTH, MemberChange, compare};
pub use error::{Error, Result};
pub use normalize::normalize;
pub use payload::{create_payload, merge_for_update, prune_unset};
pub use record::{DesiredResource, Record, RemoteResource, ResourceId};
