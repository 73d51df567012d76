//! Shared test utilities for the zia-resource-manager workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixtures`] — gateway inputs and remote records
//! - [`faulty`] — [`FaultyGateway`] for injecting remote failures
//! - [`workspace`] — [`TestWorkspace`] with a manifest and a local store

pub mod faulty;
pub mod fixtures;
pub mod workspace;

pub use faulty::{Fault, FaultyGateway};
pub use fixtures::{desired_gateway, gateway_input, remote_gateway, zpa_gateway_schema};
pub use workspace::TestWorkspace;
