//! Command implementations for zia-cli

pub mod apply;
pub mod get;
pub mod kinds;
pub mod plan;

pub use apply::run_apply;
pub use get::run_get;
pub use kinds::run_kinds;
pub use plan::run_plan;
