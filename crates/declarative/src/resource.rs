//! Resource types - identity, attributes and implicit dependencies
//!
//! A [`ResourceType`] ties together everything the host engine needs to build
//! and reconcile instances of one kind of resource:
//! - Identity (type name, namevar, title patterns)
//! - Attribute assignment with validation
//! - Sync checks against an observed instance
//! - Soft dependencies on other resources in the catalog

use crate::catalog::{Catalog, ResourceRef};
use crate::diff::PropertyChange;
use crate::error::{Error, Result};
use crate::title::{TitlePattern, resolve_title};
use crate::types::{ApplyTo, Ensure};
use crate::value::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// How an attribute participates in a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// Identity attribute, fixed at construction
    Namevar,
    /// Managed attribute compared against observed state
    Property,
}

/// Documentation for one declared attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDoc {
    pub name: &'static str,
    pub kind: AttributeKind,
    pub doc: &'static str,
}

/// A soft dependency declaration
///
/// Each title is looked up in the catalog; titles not found there are
/// dropped rather than reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Autorequire {
    /// Type of the resources required
    pub target_type: &'static str,
    /// Titles to look up
    pub titles: Vec<String>,
}

impl Autorequire {
    pub fn new(target_type: &'static str, titles: Vec<String>) -> Self {
        Self {
            target_type,
            titles,
        }
    }
}

/// Core trait for declarative resource types
///
/// # Example
///
/// ```ignore
/// use declarative::{instantiate, compute_dependencies, WorkingSet};
///
/// let svc: MyType = instantiate("console", &attributes)?;
/// let edges = compute_dependencies(&svc, &working_set);
/// ```
pub trait ResourceType: Sized + fmt::Debug {
    /// Type name as used in catalogs, lower-case
    const TYPE_NAME: &'static str;

    /// Name of the identity attribute
    const NAMEVAR: &'static str = "name";

    /// Type-level documentation
    const DOC: &'static str = "";

    /// Where instances of this type may be applied
    fn apply_to() -> ApplyTo {
        ApplyTo::Host
    }

    /// Whether the type manages presence through `ensure`
    fn ensurable() -> bool {
        false
    }

    /// Ordered title patterns, first match wins
    fn title_patterns() -> &'static [TitlePattern];

    /// Declared attributes, namevar first
    fn attributes() -> Vec<AttributeDoc>;

    /// Create an instance with only its identity set
    ///
    /// Fails with [`Error::InvalidValue`] if the name is outside the
    /// namevar's domain.
    fn with_name(name: &str) -> Result<Self>;

    /// Value of the namevar
    fn name(&self) -> &str;

    /// Assign one attribute from a raw catalog value
    fn set(&mut self, attribute: &str, value: &Value) -> Result<()>;

    /// Desired presence, if ensurable and declared
    fn ensure(&self) -> Option<Ensure> {
        None
    }

    /// Properties of `self` (desired) not satisfied by `is` (observed)
    ///
    /// With `is` set to `None` every managed property is reported.
    fn changes(&self, is: Option<&Self>) -> Vec<PropertyChange>;

    /// Soft dependencies, recomputed from current attribute values
    fn autorequires(&self) -> Vec<Autorequire> {
        Vec::new()
    }

    /// Human-readable description
    fn description(&self) -> String {
        self.to_ref().to_string()
    }

    /// Reference to this instance
    fn to_ref(&self) -> ResourceRef {
        ResourceRef::new(Self::TYPE_NAME, self.name())
    }
}

/// Build an instance from a title and declared attributes
///
/// Attributes derived from the title are applied first; explicitly declared
/// attributes override them, including the namevar.
pub fn instantiate<R: ResourceType>(title: &str, attributes: &BTreeMap<String, Value>) -> Result<R> {
    let mut seeded = resolve_title(R::TYPE_NAME, R::title_patterns(), title)?;
    let from_title = seeded.remove(R::NAMEVAR);

    let name = match attributes.get(R::NAMEVAR) {
        Some(Value::String(name)) => name.clone(),
        Some(other) => {
            return Err(Error::invalid_value(
                R::NAMEVAR,
                format!("expected a string, got {}", other.kind()),
            ));
        }
        None => from_title.ok_or_else(|| Error::InvalidIdentity {
            resource_type: R::TYPE_NAME.to_string(),
            title: title.to_string(),
        })?,
    };

    let mut resource = R::with_name(&name)?;

    for (attribute, value) in seeded {
        if !attributes.contains_key(&attribute) {
            resource.set(&attribute, &Value::String(value))?;
        }
    }

    for (attribute, value) in attributes {
        if attribute != R::NAMEVAR {
            resource.set(attribute, value)?;
        }
    }

    Ok(resource)
}

/// Resolve a resource's autorequires against a catalog
///
/// Best effort: targets missing from the catalog produce no edge and no error.
pub fn compute_dependencies<R: ResourceType>(
    resource: &R,
    catalog: &dyn Catalog,
) -> BTreeSet<ResourceRef> {
    let mut edges = BTreeSet::new();

    for autorequire in resource.autorequires() {
        for title in &autorequire.titles {
            match catalog.resource(autorequire.target_type, title) {
                Some(target) => {
                    edges.insert(target);
                }
                None => log::debug!(
                    "{}: no {} titled {title:?} in catalog, skipping",
                    resource.to_ref(),
                    autorequire.target_type
                ),
            }
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::WorkingSet;
    use crate::title::identity;
    use std::sync::LazyLock;

    static PATTERNS: LazyLock<Vec<TitlePattern>> = LazyLock::new(|| {
        vec![
            TitlePattern::new(
                r"^(\S+)/(\S+)$",
                vec![("name", identity), ("peer", identity)],
            )
            .unwrap(),
            TitlePattern::new(r"^(\S+)$", vec![("name", identity)]).unwrap(),
        ]
    });

    /// Link to a named peer
    #[derive(Debug, Default)]
    struct Link {
        name: String,
        peer: Option<String>,
    }

    impl ResourceType for Link {
        const TYPE_NAME: &'static str = "link";

        fn title_patterns() -> &'static [TitlePattern] {
            &PATTERNS
        }

        fn attributes() -> Vec<AttributeDoc> {
            vec![AttributeDoc {
                name: "peer",
                kind: AttributeKind::Property,
                doc: "",
            }]
        }

        fn with_name(name: &str) -> Result<Self> {
            if name.starts_with('x') {
                return Err(Error::invalid_value("name", "must not start with x"));
            }
            Ok(Self {
                name: name.to_string(),
                peer: None,
            })
        }

        fn name(&self) -> &str {
            &self.name
        }

        fn set(&mut self, attribute: &str, value: &Value) -> Result<()> {
            match attribute {
                "peer" => {
                    self.peer = value.as_str().map(str::to_string);
                    Ok(())
                }
                other => Err(Error::UnknownAttribute {
                    resource_type: Self::TYPE_NAME.to_string(),
                    attribute: other.to_string(),
                }),
            }
        }

        fn changes(&self, _is: Option<&Self>) -> Vec<PropertyChange> {
            Vec::new()
        }

        fn autorequires(&self) -> Vec<Autorequire> {
            vec![Autorequire::new(
                "link",
                self.peer.iter().cloned().collect(),
            )]
        }
    }

    #[test]
    fn test_instantiate_from_title() {
        let link: Link = instantiate("a/b", &BTreeMap::new()).unwrap();
        assert_eq!(link.name, "a");
        assert_eq!(link.peer.as_deref(), Some("b"));
    }

    #[test]
    fn test_explicit_attributes_override_title() {
        let mut attributes = BTreeMap::new();
        attributes.insert("name".to_string(), Value::from("c"));
        attributes.insert("peer".to_string(), Value::from("d"));

        let link: Link = instantiate("a/b", &attributes).unwrap();
        assert_eq!(link.name, "c");
        assert_eq!(link.peer.as_deref(), Some("d"));
    }

    #[test]
    fn test_instantiate_validates_name() {
        let err = instantiate::<Link>("xray", &BTreeMap::new()).unwrap_err();
        assert!(err.is_invalid_value());

        let mut attributes = BTreeMap::new();
        attributes.insert("name".to_string(), Value::Integer(1));
        let err = instantiate::<Link>("a", &attributes).unwrap_err();
        assert_eq!(err.attribute(), Some("name"));
    }

    #[test]
    fn test_instantiate_rejects_unmatched_title() {
        let err = instantiate::<Link>("a b", &BTreeMap::new()).unwrap_err();
        assert!(err.is_invalid_identity());
    }

    #[test]
    fn test_unknown_attribute() {
        let mut attributes = BTreeMap::new();
        attributes.insert("colour".to_string(), Value::from("red"));
        let err = instantiate::<Link>("a", &attributes).unwrap_err();
        assert!(matches!(err, Error::UnknownAttribute { .. }));
    }

    #[test]
    fn test_dependencies_skip_missing_targets() {
        let link: Link = instantiate("a/b", &BTreeMap::new()).unwrap();

        let empty = WorkingSet::new();
        assert!(compute_dependencies(&link, &empty).is_empty());

        let set: WorkingSet = [ResourceRef::new("link", "b")].into_iter().collect();
        let edges = compute_dependencies(&link, &set);
        assert_eq!(edges.len(), 1);
        assert!(edges.contains(&ResourceRef::new("link", "b")));
    }
}
