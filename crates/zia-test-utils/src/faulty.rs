//! [`FaultyGateway`]: a [`MemoryGateway`] that fails on demand.

use std::collections::HashSet;

use zia_content::{Record, ResourceId};
use zia_core::{DeleteStatus, GatewayError, MemoryGateway, ResourceGateway};

/// A failure to inject
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Fault {
    /// `get` and `list` fail with a transport error
    Lookup,
    /// `create` fails with an API error
    Create,
    /// `create` succeeds remotely but returns nothing
    CreateReturnsNothing,
    /// `update` fails with an API error
    Update,
    /// `update` succeeds remotely but returns nothing
    UpdateReturnsNothing,
    /// `delete` is refused with this status
    DeleteRejected(u16),
    /// `delete` fails with a transport error
    DeleteTransport,
}

/// Wraps a [`MemoryGateway`], failing the calls named by its faults.
///
/// Injected failures never reach the inner gateway, so they are not recorded
/// in its call log.
pub struct FaultyGateway {
    inner: MemoryGateway,
    faults: HashSet<Fault>,
}

impl FaultyGateway {
    pub fn new(inner: MemoryGateway) -> Self {
        Self {
            inner,
            faults: HashSet::new(),
        }
    }

    pub fn with_fault(mut self, fault: Fault) -> Self {
        self.faults.insert(fault);
        self
    }

    pub fn inner(&self) -> &MemoryGateway {
        &self.inner
    }

    fn has(&self, fault: &Fault) -> bool {
        self.faults.contains(fault)
    }
}

impl ResourceGateway for FaultyGateway {
    fn get(&self, id: &ResourceId) -> Result<Option<Record>, GatewayError> {
        if self.has(&Fault::Lookup) {
            return Err(GatewayError::Transport("connection reset".into()));
        }
        self.inner.get(id)
    }

    fn list(&self) -> Result<Vec<Record>, GatewayError> {
        if self.has(&Fault::Lookup) {
            return Err(GatewayError::Transport("connection reset".into()));
        }
        self.inner.list()
    }

    fn create(&self, payload: &Record) -> Result<Option<Record>, GatewayError> {
        if self.has(&Fault::Create) {
            return Err(GatewayError::Api {
                status: 400,
                message: "invalid server group".into(),
            });
        }
        if self.has(&Fault::CreateReturnsNothing) {
            self.inner.create(payload)?;
            return Ok(None);
        }
        self.inner.create(payload)
    }

    fn update(&self, id: &ResourceId, payload: &Record) -> Result<Option<Record>, GatewayError> {
        if self.has(&Fault::Update) {
            return Err(GatewayError::Api {
                status: 409,
                message: "edit lock held".into(),
            });
        }
        if self.has(&Fault::UpdateReturnsNothing) {
            self.inner.update(id, payload)?;
            return Ok(None);
        }
        self.inner.update(id, payload)
    }

    fn delete(&self, id: &ResourceId) -> Result<DeleteStatus, GatewayError> {
        if self.has(&Fault::DeleteTransport) {
            return Err(GatewayError::Transport("timed out".into()));
        }
        if let Some(status) = self.faults.iter().find_map(|f| match f {
            Fault::DeleteRejected(status) => Some(*status),
            _ => None,
        }) {
            return Ok(DeleteStatus::Rejected { status });
        }
        self.inner.delete(id)
    }
}
