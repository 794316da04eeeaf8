//! Catalog lookups
//!
//! The catalog (working set) belongs to the host engine. Resource types only
//! read from it through the [`Catalog`] trait when computing dependencies.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Reference to a resource by type and title
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceRef {
    /// Lower-case type name, e.g. `cisco_tacacs_server`
    pub resource_type: String,
    /// Resource title
    pub title: String,
}

impl ResourceRef {
    pub fn new(resource_type: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into().to_lowercase(),
            title: title.into(),
        }
    }
}

/// Displays as `Type_name[title]`, capitalizing every `::` segment
impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let type_name = self
            .resource_type
            .split("::")
            .map(|segment| {
                let mut chars = segment.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join("::");
        write!(f, "{type_name}[{}]", self.title)
    }
}

/// Read-only view of the resources being reconciled together
pub trait Catalog {
    /// Look up a resource; type names compare case-insensitively
    fn resource(&self, resource_type: &str, title: &str) -> Option<ResourceRef>;
}

/// In-memory catalog holding plain references
#[derive(Debug, Clone, Default)]
pub struct WorkingSet {
    resources: BTreeSet<ResourceRef>,
}

impl WorkingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource, returning false if it was already present
    pub fn insert(&mut self, resource: ResourceRef) -> bool {
        self.resources.insert(resource)
    }

    pub fn contains(&self, resource: &ResourceRef) -> bool {
        self.resources.contains(resource)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceRef> {
        self.resources.iter()
    }
}

impl Catalog for WorkingSet {
    fn resource(&self, resource_type: &str, title: &str) -> Option<ResourceRef> {
        let wanted = ResourceRef::new(resource_type, title);
        self.resources.get(&wanted).cloned()
    }
}

impl FromIterator<ResourceRef> for WorkingSet {
    fn from_iter<I: IntoIterator<Item = ResourceRef>>(iter: I) -> Self {
        Self {
            resources: iter.into_iter().collect(),
        }
    }
}

impl Extend<ResourceRef> for WorkingSet {
    fn extend<I: IntoIterator<Item = ResourceRef>>(&mut self, iter: I) {
        self.resources.extend(iter);
    }
}
