//! Error types for resource compilation
//!
//! Every failure here is raised synchronously while a resource is being
//! constructed or mutated. Nothing is retried and nothing is coerced; the
//! caller decides how to surface the failure.

use thiserror::Error;

/// Errors raised while resolving or validating a resource
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Title matched none of the type's title patterns
    #[error("no title pattern of {resource_type} matches title {title:?}")]
    InvalidIdentity {
        /// Type whose patterns were tried
        resource_type: String,
        /// The raw title
        title: String,
    },

    /// Attribute received a value outside its declared domain
    #[error("invalid value for {attribute}: {message}")]
    InvalidValue {
        /// Name of the attribute being assigned
        attribute: String,
        /// What was wrong with the value
        message: String,
    },

    /// Attribute is not declared by the resource type
    #[error("{resource_type} has no attribute {attribute}")]
    UnknownAttribute {
        /// Type the attribute was assigned on
        resource_type: String,
        /// Name of the undeclared attribute
        attribute: String,
    },
}

impl Error {
    /// Shorthand for an [`Error::InvalidValue`]
    pub fn invalid_value(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            attribute: attribute.into(),
            message: message.into(),
        }
    }

    /// Whether this is an identity resolution failure
    pub fn is_invalid_identity(&self) -> bool {
        matches!(self, Self::InvalidIdentity { .. })
    }

    /// Whether this is a value domain failure
    pub fn is_invalid_value(&self) -> bool {
        matches!(self, Self::InvalidValue { .. })
    }

    /// The attribute the error is about, if any
    pub fn attribute(&self) -> Option<&str> {
        match self {
            Self::InvalidIdentity { .. } => None,
            Self::InvalidValue { attribute, .. } | Self::UnknownAttribute { attribute, .. } => {
                Some(attribute)
            }
        }
    }
}

/// Result type for declarative operations
pub type Result<T> = std::result::Result<T, Error>;
