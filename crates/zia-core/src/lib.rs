//! Reconciliation engine for ZIA Resource Manager
//!
//! This crate drives remote resources towards a declared state:
//!
//! - **Gateway**: the boundary to one remote resource collection
//! - **Reconciler**: lookup, comparison and the single mutating call per pass
//! - **Query**: read-only lookups by id, by name, or of everything
//! - **Manifest**: the list of desired resources, read from `zia.toml`
//!
//! # Architecture
//!
//! ```text
//!                 CLI
//!                  |
//!              zia-core
//!                  |
//!        +---------+---------+
//!        |                   |
//!   zia-content          zia-schema
//! ```
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use zia_content::DesiredResource;
//! use zia_core::{Action, LifecycleState, MemoryGateway, Reconciler};
//! use zia_schema::builtins::zpa_gateway;
//!
//! let schema = zpa_gateway();
//! let desired = DesiredResource::from_input(&schema, &json!({
//!     "name": "GW01",
//!     "zpa_server_group": {"external_id": 123, "name": "SRV01"},
//! })).unwrap();
//!
//! let gateway = MemoryGateway::new();
//! let reconciler = Reconciler::new(&schema, &gateway);
//! let first = reconciler.reconcile(&desired, LifecycleState::Present).unwrap();
//! let second = reconciler.reconcile(&desired, LifecycleState::Present).unwrap();
//!
//! assert_eq!(first.action, Action::Create);
//! assert!(!second.changed);
//! ```

pub mod config;
pub mod error;
pub mod gateway;
pub mod query;
pub mod reconcile;

pub use config::{Manifest, ResourceEntry};
pub use error::{Error, ErrorKind, Result};
pub use gateway::{DeleteStatus, GatewayCall, GatewayError, MemoryGateway, ResourceGateway};
pub use query::{Query, QueryFilter, QueryReport};
pub use reconcile::{
    Action, DeleteOutcome, LifecycleState, ReconcileOptions, ReconcileReport, Reconciler,
};
