//! # Declarative
//!
//! Building blocks for declarative resource types.
//!
//! A resource type describes how an instance is identified, which attributes
//! it manages, how observed state is compared with desired state, and which
//! other resources it should be ordered after. The host engine owns the
//! catalog, the providers and the execution order; this crate only defines
//! the contract between them and a resource type.
//!
//! ## Core Concepts
//!
//! - **TitlePattern**: Ordered rules turning a raw title into identity attributes
//! - **Property**: Validation, normalization and sync check for one managed attribute
//! - **ResourceType**: Identity, attribute assignment, sync checks and autorequires
//! - **Catalog**: Read-only lookup into the set of resources reconciled together
//! - **ResourceDiff**: Observed vs desired state of one resource
//!
//! ## Example
//!
//! ```ignore
//! use declarative::{compute_dependencies, instantiate, ResourceDiff, WorkingSet};
//!
//! let desired: MyType = instantiate("console", &attributes)?;
//! let observed: MyType = instantiate("console", &reported)?;
//!
//! let edges = compute_dependencies(&desired, &working_set);
//! if let Some(diff) = ResourceDiff::between(&desired, Some(&observed)) {
//!     for change in &diff.changes {
//!         println!("{}: {:?} -> {}", change.property, change.is, change.should);
//!     }
//! }
//! ```
//!
//! ## Dependency Injection
//!
//! Catalog lookups go through the [`Catalog`] trait so that resource types
//! never reach for global state. [`WorkingSet`] is a plain in-memory
//! implementation.

pub mod catalog;
pub mod diff;
pub mod error;
pub mod property;
pub mod resource;
pub mod title;
pub mod types;
pub mod value;

// Re-export main types at crate root
pub use catalog::{Catalog, ResourceRef, WorkingSet};
pub use diff::{DiffSummary, PropertyChange, ResourceDiff, group_by_type};
pub use error::{Error, Result};
pub use property::{Property, PropertyValue};
pub use resource::{
    AttributeDoc, AttributeKind, Autorequire, ResourceType, compute_dependencies, instantiate,
};
pub use title::{Extractor, TitlePattern, identity, resolve_title};
pub use types::{ApplyTo, Ensure, ResourceState};
pub use value::Value;
