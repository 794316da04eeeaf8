//! Core types for declarative resource management

use crate::error::{Error, Result};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a resource type may be applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ApplyTo {
    /// Only on the managing host
    #[default]
    Host,
    /// Only through a device proxy
    Device,
    /// Either on the host or through a device proxy
    All,
}

impl ApplyTo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::Device => "device",
            Self::All => "all",
        }
    }
}

/// Lifecycle intent for an ensurable resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ensure {
    Present,
    Absent,
}

impl Ensure {
    /// Name of the ensure attribute on every ensurable type
    pub const ATTRIBUTE: &'static str = "ensure";

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
        }
    }

    /// Parse a raw catalog value into an ensure state
    pub fn from_value(value: &Value) -> Result<Self> {
        match value.as_str() {
            Some("present") => Ok(Self::Present),
            Some("absent") => Ok(Self::Absent),
            _ => Err(Error::invalid_value(
                Self::ATTRIBUTE,
                format!("expected 'present' or 'absent', got {value}"),
            )),
        }
    }
}

impl fmt::Display for Ensure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current or desired state of a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceState {
    /// Resource exists/is configured
    Present,
    /// Resource does not exist/is not configured
    Absent,
}

impl ResourceState {
    /// Check if state represents presence
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present)
    }

    /// Check if state represents absence
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl From<Ensure> for ResourceState {
    fn from(ensure: Ensure) -> Self {
        match ensure {
            Ensure::Present => Self::Present,
            Ensure::Absent => Self::Absent,
        }
    }
}
