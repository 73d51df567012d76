//! Outcome types for a reconciliation pass

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use zia_content::DiffResult;

/// What a pass did, or would do in check mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Update,
    Delete,
    NoOp,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::NoOp => "no_op",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the resource should exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    #[default]
    Present,
    Absent,
}

impl FromStr for LifecycleState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "present" => Ok(LifecycleState::Present),
            "absent" => Ok(LifecycleState::Absent),
            other => Err(format!(
                "Invalid state '{}', expected 'present' or 'absent'",
                other
            )),
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleState::Present => f.write_str("present"),
            LifecycleState::Absent => f.write_str("absent"),
        }
    }
}

/// How an absent pass ended.
///
/// A rejected delete is reported here rather than as an error; the pass
/// still reports `changed = false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeleteOutcome {
    Deleted,
    AlreadyAbsent,
    Rejected { reason: String },
}

/// Result of reconciling one desired resource
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconcileReport {
    pub kind: String,
    pub name: String,
    pub action: Action,
    pub changed: bool,
    /// Resulting resource, the last-known resource on delete, or the payload
    /// that would have been sent in check mode
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "DiffResult::is_empty")]
    pub diff: DiffResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_outcome: Option<DeleteOutcome>,
    /// Canonical form of the existing resource, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,
    /// Canonical form of the desired resource, if it should exist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,
    pub check_mode: bool,
    pub msg: String,
}

impl ReconcileReport {
    pub(crate) fn new(kind: &str, name: &str, action: Action, check_mode: bool) -> Self {
        let changed = action != Action::NoOp;
        Self {
            kind: kind.to_string(),
            name: name.to_string(),
            action,
            changed,
            data: None,
            diff: DiffResult::default(),
            delete_outcome: None,
            before: None,
            after: None,
            check_mode,
            msg: String::new(),
        }
    }

    pub(crate) fn with_data(mut self, data: Option<Value>) -> Self {
        self.data = data;
        self
    }

    pub(crate) fn with_diff(mut self, diff: DiffResult) -> Self {
        self.diff = diff;
        self
    }

    pub(crate) fn with_delete_outcome(mut self, outcome: DeleteOutcome) -> Self {
        self.delete_outcome = Some(outcome);
        self
    }

    pub(crate) fn with_states(mut self, before: Option<Value>, after: Option<Value>) -> Self {
        self.before = before;
        self.after = after;
        self
    }

    pub(crate) fn with_msg(mut self, msg: impl Into<String>) -> Self {
        self.msg = msg.into();
        self
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
