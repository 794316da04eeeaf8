//! Diff computation for resources

use crate::catalog::ResourceRef;
use crate::resource::ResourceType;
use crate::types::{Ensure, ResourceState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One property whose observed value does not satisfy the desired value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyChange {
    /// Property name
    pub property: String,
    /// Observed value, `None` if the device reported nothing
    pub is: Option<String>,
    /// Desired value
    pub should: String,
}

/// A diff between current and desired state of a resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceDiff {
    /// The resource being compared
    pub resource: ResourceRef,
    /// Human-readable description
    pub description: String,
    /// Current state
    pub current: ResourceState,
    /// Desired state
    pub desired: ResourceState,
    /// Out-of-sync properties
    pub changes: Vec<PropertyChange>,
}

impl ResourceDiff {
    /// Compare a desired instance with the observed one
    ///
    /// `is` is `None` when the device reports no such resource. An observed
    /// instance whose `ensure` is absent counts as not reported. Returns `None`
    /// when nothing needs to change. A resource being removed reports no
    /// property changes.
    pub fn between<R: ResourceType>(should: &R, is: Option<&R>) -> Option<Self> {
        let is = is.filter(|observed| observed.ensure() != Some(Ensure::Absent));
        let current = match is {
            Some(_) => ResourceState::Present,
            None => ResourceState::Absent,
        };

        let (desired, changes) = match (should.ensure(), is) {
            (Some(Ensure::Absent), None) => return None,
            (Some(Ensure::Absent), Some(_)) => (ResourceState::Absent, Vec::new()),
            (ensure, observed) => {
                let changes = should.changes(observed);
                // Without a declared ensure, existence alone is not managed
                let nothing_to_create = observed.is_some() || ensure.is_none();
                if nothing_to_create && changes.is_empty() {
                    return None;
                }
                (ResourceState::Present, changes)
            }
        };

        Some(Self {
            resource: should.to_ref(),
            description: should.description(),
            current,
            desired,
            changes,
        })
    }

    /// Check if this diff represents an addition
    pub fn is_addition(&self) -> bool {
        self.current.is_absent() && self.desired.is_present()
    }

    /// Check if this diff represents a removal
    pub fn is_removal(&self) -> bool {
        self.current.is_present() && self.desired.is_absent()
    }

    /// Check if this diff represents a modification
    pub fn is_modification(&self) -> bool {
        self.current.is_present() && self.desired.is_present() && !self.changes.is_empty()
    }
}

/// Diff summary statistics
#[derive(Debug, Clone, Default)]
pub struct DiffSummary {
    /// Number of resources to add
    pub additions: usize,
    /// Number of resources to remove
    pub removals: usize,
    /// Number of resources to modify
    pub modifications: usize,
    /// Number of out-of-sync properties across all diffs
    pub property_changes: usize,
}

impl DiffSummary {
    /// Create a summary from a list of diffs
    pub fn from_diffs(diffs: &[ResourceDiff]) -> Self {
        let mut summary = Self::default();
        for diff in diffs {
            if diff.is_addition() {
                summary.additions += 1;
            } else if diff.is_removal() {
                summary.removals += 1;
            } else {
                summary.modifications += 1;
            }
            summary.property_changes += diff.changes.len();
        }
        summary
    }

    /// Total number of changes
    pub fn total(&self) -> usize {
        self.additions + self.removals + self.modifications
    }

    /// Check if there are any changes
    pub fn has_changes(&self) -> bool {
        self.total() > 0
    }
}

/// Group diffs by resource type
pub fn group_by_type(diffs: &[ResourceDiff]) -> BTreeMap<&str, Vec<&ResourceDiff>> {
    let mut groups: BTreeMap<&str, Vec<&ResourceDiff>> = BTreeMap::new();
    for diff in diffs {
        groups
            .entry(diff.resource.resource_type.as_str())
            .or_default()
            .push(diff);
    }
    groups
}
