//! Managed properties - validation, normalization and sync checks
//!
//! A property is described by a type implementing [`Property`]. The three
//! hooks mirror how a catalog value is processed:
//!
//! 1. [`Property::validate`] rejects raw values outside the domain
//! 2. [`Property::munge`] normalizes an accepted value into its typed form
//! 3. [`Property::insync`] decides whether the observed value satisfies the desired one
//!
//! The hooks are associated functions: a property carries no state of its own,
//! values live in the resource instance.

use crate::diff::PropertyChange;
use crate::error::Result;
use crate::value::Value;
use std::fmt;

/// Declarative description of one managed property
pub trait Property {
    /// Attribute name as written in a catalog
    const NAME: &'static str;

    /// Human-readable description
    const DOC: &'static str = "";

    /// Normalized, typed form of the property value
    type Value: Clone + PartialEq + fmt::Debug + fmt::Display;

    /// Reject values outside the property's domain
    fn validate(raw: &Value) -> Result<()>;

    /// Normalize a validated value
    fn munge(raw: &Value) -> Result<Self::Value>;

    /// Whether the observed value satisfies the desired value
    ///
    /// Defaults to plain equality.
    fn insync(is: &Self::Value, should: &Self::Value) -> bool {
        is == should
    }

    /// Validate then munge
    fn parse(raw: &Value) -> Result<Self::Value> {
        Self::validate(raw)?;
        Self::munge(raw)
    }
}

/// Observed (`is`) and desired (`should`) values of one property
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyValue<'a, T> {
    /// Value reported by the device, `None` if not reported
    pub is: Option<&'a T>,
    /// Value declared in the catalog, `None` if unmanaged
    pub should: Option<&'a T>,
}

impl<'a, T: fmt::Display> PropertyValue<'a, T> {
    pub fn new(is: Option<&'a T>, should: Option<&'a T>) -> Self {
        Self { is, should }
    }

    /// Run the property's sync check
    ///
    /// An unmanaged property (no `should`) is always in sync. A managed
    /// property with nothing observed is never in sync.
    pub fn insync<P>(&self) -> bool
    where
        P: Property<Value = T>,
    {
        match (self.is, self.should) {
            (_, None) => true,
            (None, Some(_)) => false,
            (Some(is), Some(should)) => P::insync(is, should),
        }
    }

    /// The change needed to bring this property in sync, if any
    pub fn change<P>(&self) -> Option<PropertyChange>
    where
        P: Property<Value = T>,
    {
        if self.insync::<P>() {
            return None;
        }
        let should = self.should?;
        Some(PropertyChange {
            property: P::NAME.to_string(),
            is: self.is.map(ToString::to_string),
            should: should.to_string(),
        })
    }
}
