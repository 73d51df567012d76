//! Reconciler implementation
//!
//! One pass reads the remote collection at most once, decides an [`Action`]
//! and issues at most one mutating call.

use tracing::{debug, info, warn};
use zia_content::{
    DesiredResource, RemoteResource, compare, create_payload, merge_for_update, normalize,
};
use zia_schema::ResourceSchema;

use super::report::{Action, DeleteOutcome, LifecycleState, ReconcileReport};
use crate::gateway::{DeleteStatus, GatewayError, ResourceGateway};
use crate::{Error, Result};

/// Options for a reconciliation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Decide the action without issuing the mutating call
    pub check_mode: bool,
}

/// Drives one resource kind towards its desired state
pub struct Reconciler<'s, G> {
    schema: &'s ResourceSchema,
    gateway: G,
    options: ReconcileOptions,
}

impl<'s, G: ResourceGateway> Reconciler<'s, G> {
    pub fn new(schema: &'s ResourceSchema, gateway: G) -> Self {
        Self {
            schema,
            gateway,
            options: ReconcileOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ReconcileOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> ReconcileOptions {
        self.options
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Run one pass for `desired`.
    ///
    /// # Errors
    ///
    /// - [`Error::Lookup`] if the remote collection cannot be read
    /// - [`Error::MalformedResource`] if either side cannot be normalized
    /// - [`Error::Create`] / [`Error::Update`] if the mutating call fails
    ///
    /// A failed delete is not an error; see [`DeleteOutcome::Rejected`].
    pub fn reconcile(
        &self,
        desired: &DesiredResource,
        state: LifecycleState,
    ) -> Result<ReconcileReport> {
        let existing = self.lookup(desired)?;
        match state {
            LifecycleState::Present => self.ensure_present(desired, existing),
            LifecycleState::Absent => Ok(self.ensure_absent(desired, existing)),
        }
    }

    /// Find the existing resource: by id when given, otherwise the first
    /// listed resource whose name matches.
    fn lookup(&self, desired: &DesiredResource) -> Result<Option<RemoteResource>> {
        let kind = &self.schema.kind;
        let lookup_err = |source: GatewayError| Error::Lookup {
            kind: kind.clone(),
            source,
        };

        let found = match desired.id() {
            Some(id) => {
                debug!(kind = %kind, id = %id, "Looking up resource by id");
                self.gateway.get(id).map_err(lookup_err)?
            }
            None => {
                debug!(kind = %kind, name = desired.name(), "Looking up resource by name");
                self.gateway
                    .list()
                    .map_err(lookup_err)?
                    .into_iter()
                    .find(|r| r.field_equals(&self.schema.name_field, desired.name()))
            }
        };

        match found {
            Some(record) => Ok(Some(RemoteResource::from_record(self.schema, record)?)),
            None => {
                debug!(kind = %kind, name = desired.name(), "No existing resource");
                Ok(None)
            }
        }
    }

    fn ensure_present(
        &self,
        desired: &DesiredResource,
        existing: Option<RemoteResource>,
    ) -> Result<ReconcileReport> {
        let kind = self.schema.kind.as_str();
        let name = desired.name();
        let check_mode = self.options.check_mode;
        let after = normalize(self.schema, desired.record())?;

        let Some(existing) = existing else {
            let payload = create_payload(self.schema, desired);
            debug!(kind, payload = %payload.to_value(), "Create payload");
            let report = ReconcileReport::new(kind, name, Action::Create, check_mode)
                .with_states(None, Some(after.to_json()));

            if check_mode {
                return Ok(report
                    .with_data(Some(payload.into_value()))
                    .with_msg(format!("Would create {} '{}'", kind, name)));
            }

            let created = self
                .gateway
                .create(&payload)
                .map_err(Some)
                .and_then(|r| r.ok_or(None))
                .map_err(|source| Error::Create {
                    kind: kind.to_string(),
                    name: name.to_string(),
                    source,
                })?;
            info!(kind, name, "Created resource");
            return Ok(report
                .with_data(Some(created.into_value()))
                .with_msg(format!("Created {} '{}'", kind, name)));
        };

        let before = normalize(self.schema, existing.record())?;
        let diff = compare(&before, &after);
        let states = (Some(before.to_json()), Some(after.to_json()));

        if diff.is_empty() {
            debug!(kind, name, id = %existing.id(), "Resource already up to date");
            return Ok(ReconcileReport::new(kind, name, Action::NoOp, check_mode)
                .with_states(states.0, states.1)
                .with_data(Some(existing.into_record().into_value()))
                .with_msg(format!("{} '{}' is up to date", kind, name)));
        }

        for change in &diff {
            warn!(
                kind,
                name,
                field = %change.field,
                current = %change.current,
                desired = %change.desired,
                "Field differs from desired state"
            );
        }

        let payload = merge_for_update(self.schema, &existing, desired);
        debug!(kind, id = %existing.id(), payload = %payload.to_value(), "Update payload");
        let report = ReconcileReport::new(kind, name, Action::Update, check_mode)
            .with_diff(diff)
            .with_states(states.0, states.1);

        if check_mode {
            return Ok(report
                .with_data(Some(payload.into_value()))
                .with_msg(format!("Would update {} '{}'", kind, name)));
        }

        let updated = self
            .gateway
            .update(existing.id(), &payload)
            .map_err(Some)
            .and_then(|r| r.ok_or(None))
            .map_err(|source| Error::Update {
                kind: kind.to_string(),
                id: existing.id().to_string(),
                source,
            })?;
        info!(kind, name, id = %existing.id(), "Updated resource");
        Ok(report
            .with_data(Some(updated.into_value()))
            .with_msg(format!("Updated {} '{}'", kind, name)))
    }

    fn ensure_absent(
        &self,
        desired: &DesiredResource,
        existing: Option<RemoteResource>,
    ) -> ReconcileReport {
        let kind = self.schema.kind.as_str();
        let name = desired.name();
        let check_mode = self.options.check_mode;

        let Some(existing) = existing else {
            return ReconcileReport::new(kind, name, Action::NoOp, check_mode)
                .with_delete_outcome(DeleteOutcome::AlreadyAbsent)
                .with_msg(format!("{} '{}' is already absent", kind, name));
        };

        let before = normalize(self.schema, existing.record())
            .ok()
            .map(|c| c.to_json());
        let id = existing.id().clone();
        let last_known = existing.into_record().into_value();

        if check_mode {
            return ReconcileReport::new(kind, name, Action::Delete, check_mode)
                .with_states(before, None)
                .with_data(Some(last_known))
                .with_msg(format!("Would delete {} '{}'", kind, name));
        }

        let rejected = |reason: String| {
            warn!(kind, name, id = %id, reason = %reason, "Delete failed; resource left in place");
            ReconcileReport::new(kind, name, Action::NoOp, check_mode)
                .with_delete_outcome(DeleteOutcome::Rejected {
                    reason: reason.clone(),
                })
                .with_msg(format!("Failed to delete {} '{}': {}", kind, name, reason))
        };

        match self.gateway.delete(&id) {
            Ok(DeleteStatus::Deleted) => {
                info!(kind, name, id = %id, "Deleted resource");
                ReconcileReport::new(kind, name, Action::Delete, check_mode)
                    .with_states(before, None)
                    .with_data(Some(last_known))
                    .with_delete_outcome(DeleteOutcome::Deleted)
                    .with_msg(format!("Deleted {} '{}'", kind, name))
            }
            Ok(DeleteStatus::NotFound) => {
                debug!(kind, name, id = %id, "Resource vanished before delete");
                ReconcileReport::new(kind, name, Action::NoOp, check_mode)
                    .with_delete_outcome(DeleteOutcome::AlreadyAbsent)
                    .with_msg(format!("{} '{}' is already absent", kind, name))
            }
            Ok(DeleteStatus::Rejected { status }) => rejected(format!("status {}", status)),
            Err(e) => rejected(e.to_string()),
        }
    }
}
