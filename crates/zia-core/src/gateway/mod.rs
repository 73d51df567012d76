//! Boundary to the remote resource collection
//!
//! The reconciler only ever talks to a [`ResourceGateway`]. One gateway
//! instance serves one resource kind; transport, authentication and session
//! handling live behind the trait.

mod memory;

pub use memory::{GatewayCall, MemoryGateway};

use zia_content::{Record, ResourceId};

/// Failure reported by a gateway call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
}

/// Result of a delete call that reached the remote side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteStatus {
    Deleted,
    /// The resource was already gone
    NotFound,
    /// The remote side refused with a non-success status
    Rejected { status: u16 },
}

impl DeleteStatus {
    /// Map an HTTP-style status code onto a delete outcome.
    pub fn from_status(status: u16) -> Self {
        match status {
            200..=299 => DeleteStatus::Deleted,
            404 => DeleteStatus::NotFound,
            other => DeleteStatus::Rejected { status: other },
        }
    }
}

/// Remote collection of one resource kind.
///
/// `get` returning `Ok(None)` means the id does not exist. `create` and
/// `update` return the stored resource; `Ok(None)` means the remote side
/// accepted the call but returned nothing usable.
pub trait ResourceGateway {
    fn get(&self, id: &ResourceId) -> Result<Option<Record>, GatewayError>;

    /// Every resource of the kind, in the remote side's listing order.
    fn list(&self) -> Result<Vec<Record>, GatewayError>;

    fn create(&self, payload: &Record) -> Result<Option<Record>, GatewayError>;

    fn update(&self, id: &ResourceId, payload: &Record) -> Result<Option<Record>, GatewayError>;

    fn delete(&self, id: &ResourceId) -> Result<DeleteStatus, GatewayError>;
}

impl<G: ResourceGateway + ?Sized> ResourceGateway for &G {
    fn get(&self, id: &ResourceId) -> Result<Option<Record>, GatewayError> {
        (**self).get(id)
    }

    fn list(&self) -> Result<Vec<Record>, GatewayError> {
        (**self).list()
    }

    fn create(&self, payload: &Record) -> Result<Option<Record>, GatewayError> {
        (**self).create(payload)
    }

    fn update(&self, id: &ResourceId, payload: &Record) -> Result<Option<Record>, GatewayError> {
        (**self).update(id, payload)
    }

    fn delete(&self, id: &ResourceId) -> Result<DeleteStatus, GatewayError> {
        (**self).delete(id)
    }
}

impl<G: ResourceGateway + ?Sized> ResourceGateway for Box<G> {
    fn get(&self, id: &ResourceId) -> Result<Option<Record>, GatewayError> {
        (**self).get(id)
    }

    fn list(&self) -> Result<Vec<Record>, GatewayError> {
        (**self).list()
    }

    fn create(&self, payload: &Record) -> Result<Option<Record>, GatewayError> {
        (**self).create(payload)
    }

    fn update(&self, id: &ResourceId, payload: &Record) -> Result<Option<Record>, GatewayError> {
        (**self).update(id, payload)
    }

    fn delete(&self, id: &ResourceId) -> Result<DeleteStatus, GatewayError> {
        (**self).delete(id)
    }
}
