//! In-process resource collection

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use serde_json::Value;
use zia_content::{Record, ResourceId};

use super::{DeleteStatus, GatewayError, ResourceGateway};

const ID_FIELD: &str = "id";
const MODIFIED_FIELD: &str = "last_modified_time";

/// A call received by a [`MemoryGateway`]
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    Get(ResourceId),
    List,
    Create(Record),
    Update(ResourceId, Record),
    Delete(ResourceId),
}

impl GatewayCall {
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            GatewayCall::Create(_) | GatewayCall::Update(..) | GatewayCall::Delete(_)
        )
    }
}

#[derive(Debug, Default)]
struct State {
    records: Vec<Record>,
    next_id: i64,
    calls: Vec<GatewayCall>,
}

/// Resource collection held in memory.
///
/// Behaves like the remote API: ids are assigned on create, every stored
/// resource carries a server-computed `last_modified_time`, and update
/// replaces the whole object. Every call is recorded.
#[derive(Debug)]
pub struct MemoryGateway {
    state: Mutex<State>,
}

impl Default for MemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                next_id: 1,
                ..State::default()
            }),
        }
    }

    /// Seed the collection. Records without an id are assigned one.
    pub fn with_records(records: impl IntoIterator<Item = Record>) -> Self {
        let gateway = Self::new();
        {
            let mut state = gateway.lock();
            let mut pending = Vec::new();
            for record in records {
                match record.get(ID_FIELD).and_then(ResourceId::from_value) {
                    Some(id) => {
                        if let Ok(n) = id.as_str().parse::<i64>() {
                            state.next_id = state.next_id.max(n + 1);
                        }
                    }
                    None => pending.push(state.records.len()),
                }
                state.records.push(record);
            }
            for index in pending {
                let id = state.next_id;
                state.next_id += 1;
                state.records[index].insert(ID_FIELD, id);
            }
        }
        gateway
    }

    /// Snapshot of the stored resources in listing order.
    pub fn records(&self) -> Vec<Record> {
        self.lock().records.clone()
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.lock().calls.clone()
    }

    pub fn mutating_calls(&self) -> Vec<GatewayCall> {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.is_mutating())
            .cloned()
            .collect()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Consume the gateway, returning the stored resources.
    pub fn into_records(self) -> Vec<Record> {
        match self.state.into_inner() {
            Ok(state) => state.records,
            Err(poisoned) => poisoned.into_inner().records,
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl State {
    fn position(&self, id: &ResourceId) -> Option<usize> {
        self.records
            .iter()
            .position(|r| r.get(ID_FIELD).and_then(ResourceId::from_value).as_ref() == Some(id))
    }

    fn stamp(mut record: Record, id: Value) -> Record {
        record.insert(ID_FIELD, id);
        record.insert(MODIFIED_FIELD, Utc::now().timestamp());
        record
    }
}

impl ResourceGateway for MemoryGateway {
    fn get(&self, id: &ResourceId) -> Result<Option<Record>, GatewayError> {
        let mut state = self.lock();
        state.calls.push(GatewayCall::Get(id.clone()));
        Ok(state.position(id).map(|i| state.records[i].clone()))
    }

    fn list(&self) -> Result<Vec<Record>, GatewayError> {
        let mut state = self.lock();
        state.calls.push(GatewayCall::List);
        Ok(state.records.clone())
    }

    fn create(&self, payload: &Record) -> Result<Option<Record>, GatewayError> {
        let mut state = self.lock();
        state.calls.push(GatewayCall::Create(payload.clone()));

        let id = state.next_id;
        state.next_id += 1;
        let stored = State::stamp(payload.clone(), Value::from(id));
        state.records.push(stored.clone());
        tracing::debug!(id, "Stored new resource");
        Ok(Some(stored))
    }

    fn update(&self, id: &ResourceId, payload: &Record) -> Result<Option<Record>, GatewayError> {
        let mut state = self.lock();
        state
            .calls
            .push(GatewayCall::Update(id.clone(), payload.clone()));

        let index = state.position(id).ok_or_else(|| GatewayError::Api {
            status: 404,
            message: format!("resource {} does not exist", id),
        })?;
        let stored = State::stamp(payload.clone(), id.to_value());
        state.records[index] = stored.clone();
        Ok(Some(stored))
    }

    fn delete(&self, id: &ResourceId) -> Result<DeleteStatus, GatewayError> {
        let mut state = self.lock();
        state.calls.push(GatewayCall::Delete(id.clone()));

        match state.position(id) {
            Some(index) => {
                state.records.remove(index);
                Ok(DeleteStatus::Deleted)
            }
            None => Ok(DeleteStatus::NotFound),
        }
    }
}
