//! Structural comparison of canonical resources

use serde::Serialize;
use serde_json::Value;

use crate::canonical::{CanonicalResource, CanonicalValue};

/// Maximum recursion depth for nested comparison
pub const MAX_DIFF_DEPTH: usize = 64;

/// How a field differs between the current and desired side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Unset on the current side, set on the desired side
    Added,
    /// Set on the current side, unset on the desired side
    Removed,
    /// Set on both sides with different values
    Modified,
}

/// Per-item detail for a nested collection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MemberChange {
    OnlyCurrent { key: String },
    OnlyDesired { key: String },
    Differs { key: String, changes: Vec<FieldChange> },
}

impl MemberChange {
    pub fn key(&self) -> &str {
        match self {
            MemberChange::OnlyCurrent { key }
            | MemberChange::OnlyDesired { key }
            | MemberChange::Differs { key, .. } => key,
        }
    }
}

/// A single field that differs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldChange {
    pub field: String,
    pub kind: ChangeKind,
    pub current: Value,
    pub desired: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<MemberChange>,
}

/// Outcome of comparing two canonical resources.
///
/// Empty exactly when the two sides are semantically identical.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct DiffResult {
    changes: Vec<FieldChange>,
}

impl DiffResult {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Names of the differing fields, in sorted order.
    pub fn fields(&self) -> Vec<&str> {
        self.changes.iter().map(|c| c.field.as_str()).collect()
    }

    pub fn get(&self, field: &str) -> Option<&FieldChange> {
        self.changes.iter().find(|c| c.field == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldChange> {
        self.changes.iter()
    }
}

impl<'a> IntoIterator for &'a DiffResult {
    type Item = &'a FieldChange;
    type IntoIter = std::slice::Iter<'a, FieldChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

/// Compare two canonical resources over the union of their field names.
///
/// Nested collections are matched by stable key, so item order never
/// matters. Beyond [`MAX_DIFF_DEPTH`] a differing subtree is reported as a
/// single modification without member detail.
pub fn compare(current: &CanonicalResource, desired: &CanonicalResource) -> DiffResult {
    let changes = compare_resources(current, desired, 0);
    tracing::trace!(changes = changes.len(), "Compared canonical resources");
    DiffResult { changes }
}

fn compare_resources(
    current: &CanonicalResource,
    desired: &CanonicalResource,
    depth: usize,
) -> Vec<FieldChange> {
    let mut names: Vec<&str> = current.field_names().chain(desired.field_names()).collect();
    names.sort_unstable();
    names.dedup();

    names
        .into_iter()
        .filter_map(|name| compare_field(name, current.get(name), desired.get(name), depth))
        .collect()
}

fn compare_field(
    field: &str,
    current: &CanonicalValue,
    desired: &CanonicalValue,
    depth: usize,
) -> Option<FieldChange> {
    if current == desired {
        return None;
    }

    let kind = match (current.is_null(), desired.is_null()) {
        (true, false) => ChangeKind::Added,
        (false, true) => ChangeKind::Removed,
        _ => ChangeKind::Modified,
    };

    let members = match (current, desired) {
        (CanonicalValue::Nested(cur), CanonicalValue::Nested(des)) if depth < MAX_DIFF_DEPTH => {
            let mut members = Vec::new();
            for (key, item) in cur {
                match des.get(key) {
                    Some(other) => {
                        let changes = compare_resources(item, other, depth + 1);
                        if !changes.is_empty() {
                            members.push(MemberChange::Differs {
                                key: key.clone(),
                                changes,
                            });
                        }
                    }
                    None => members.push(MemberChange::OnlyCurrent { key: key.clone() }),
                }
            }
            for key in des.keys().filter(|k| !cur.contains_key(*k)) {
                members.push(MemberChange::OnlyDesired { key: key.clone() });
            }
            members
        }
        _ => Vec::new(),
    };

    Some(FieldChange {
        field: field.to_string(),
        kind,
        current: current.to_json(),
        desired: desired.to_json(),
        members,
    })
}
