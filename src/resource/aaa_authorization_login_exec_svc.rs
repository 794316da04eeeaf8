//! Exec login authorization service resource
//!
//! Manages `aaa authorization login exec` for the `console` or `default`
//! service on a Cisco device:
//!
//! ```text
//! [[resource]]
//! type = "cisco_aaa_authorization_login_exec_svc"
//! title = "console"
//! ensure = "present"
//! groups = ["group1", "group2"]
//! method = "local"
//! ```

use declarative::{
    ApplyTo, AttributeDoc, AttributeKind, Autorequire, Ensure, Error, Property, PropertyChange,
    PropertyValue, ResourceType, Result, TitlePattern, Value, identity,
};
use std::fmt;
use std::ops::Deref;
use std::sync::LazyLock;

/// Type name of the TACACS+ server resource
pub const TACACS_SERVER_TYPE: &str = "cisco_tacacs_server";

/// Type name of the TACACS+ server group resource
pub const TACACS_GROUP_TYPE: &str = "cisco_aaa_group_tacacs";

/// Services that can be configured
const SERVICES: [&str; 2] = ["console", "default"];

static TITLE_PATTERNS: LazyLock<Vec<TitlePattern>> = LazyLock::new(|| {
    vec![
        TitlePattern::new(r"^([^ \t\r\n\f\v]+)$", vec![("name", identity)])
            .expect("single-token title pattern is a valid regex"),
    ]
});

// ============================================================================
// Groups
// ============================================================================

/// One entry of the `groups` property
///
/// `Default` sorts before every named group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupValue {
    /// Use the device's default groups
    Default,
    /// A named TACACS+ server group
    Name(String),
}

impl GroupValue {
    /// Normalize: the string "default" becomes the sentinel
    pub fn munge(self) -> Self {
        match self {
            Self::Name(name) if name == "default" => Self::Default,
            other => other,
        }
    }

    /// Name used when looking up the group in a catalog
    pub fn as_str(&self) -> &str {
        match self {
            Self::Default => "default",
            Self::Name(name) => name,
        }
    }
}

impl fmt::Display for GroupValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flat, ordered list of groups
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupList(Vec<GroupValue>);

impl GroupList {
    pub fn new(groups: Vec<GroupValue>) -> Self {
        Self(groups)
    }

    /// Entries in sort order, for order-insensitive comparison
    pub fn sorted(&self) -> Vec<&GroupValue> {
        let mut sorted: Vec<&GroupValue> = self.0.iter().collect();
        sorted.sort();
        sorted
    }
}

impl Deref for GroupList {
    type Target = [GroupValue];

    fn deref(&self) -> &[GroupValue] {
        &self.0
    }
}

impl FromIterator<GroupValue> for GroupList {
    fn from_iter<I: IntoIterator<Item = GroupValue>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for GroupList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, group) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{group}")?;
        }
        f.write_str("]")
    }
}

/// The `groups` property
pub struct Groups;

impl Property for Groups {
    const NAME: &'static str = "groups";
    const DOC: &'static str = "TACACS+ groups configured for this service. Valid values are an \
                               array of strings, or the keyword 'default'.";

    type Value = GroupList;

    fn validate(raw: &Value) -> Result<()> {
        if raw.is_default_keyword() {
            return Ok(());
        }
        for group in raw.flatten() {
            if !matches!(group, Value::String(_) | Value::Default) {
                return Err(Error::invalid_value(
                    Self::NAME,
                    format!("group {group} must be a String, got {}", group.kind()),
                ));
            }
        }
        Ok(())
    }

    fn munge(raw: &Value) -> Result<GroupList> {
        raw.flatten()
            .into_iter()
            .map(|group| match group {
                Value::Default => Ok(GroupValue::Default),
                Value::String(name) => Ok(GroupValue::Name(name.clone()).munge()),
                other => Err(Error::invalid_value(
                    Self::NAME,
                    format!("group {other} must be a String"),
                )),
            })
            .collect()
    }

    /// Same size and same entries, ignoring order
    fn insync(is: &GroupList, should: &GroupList) -> bool {
        is.len() == should.len() && is.sorted() == should.sorted()
    }
}

// ============================================================================
// Method
// ============================================================================

/// Authentication method bound to the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoginMethod {
    Local,
    Unselected,
    Default,
}

impl LoginMethod {
    pub const ALL: [LoginMethod; 3] = [Self::Local, Self::Unselected, Self::Default];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Unselected => "unselected",
            Self::Default => "default",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }
}

impl fmt::Display for LoginMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `method` property
pub struct Method;

impl Property for Method {
    const NAME: &'static str = "method";
    const DOC: &'static str =
        "Authentication methods on this device. Valid values are 'local', 'unselected', 'default'.";

    type Value = LoginMethod;

    fn validate(raw: &Value) -> Result<()> {
        Self::munge(raw).map(|_| ())
    }

    fn munge(raw: &Value) -> Result<LoginMethod> {
        let method = match raw {
            Value::Default => Some(LoginMethod::Default),
            Value::String(name) => LoginMethod::from_name(name),
            _ => None,
        };
        method.ok_or_else(|| {
            Error::invalid_value(
                Self::NAME,
                format!("{raw} is not one of 'local', 'unselected', 'default'"),
            )
        })
    }
}

// ============================================================================
// Resource
// ============================================================================

/// `cisco_aaa_authorization_login_exec_svc` instance
#[derive(Debug, Clone, PartialEq)]
pub struct AaaAuthorizationLoginExecSvc {
    name: String,
    ensure: Option<Ensure>,
    groups: Option<GroupList>,
    method: Option<LoginMethod>,
}

impl AaaAuthorizationLoginExecSvc {
    /// Check a service name
    pub fn validate_name(name: &str) -> Result<()> {
        if SERVICES.contains(&name) {
            Ok(())
        } else {
            Err(Error::invalid_value(
                Self::NAMEVAR,
                format!("{name:?} is not 'console' or 'default'"),
            ))
        }
    }

    pub fn groups(&self) -> Option<&GroupList> {
        self.groups.as_ref()
    }

    pub fn method(&self) -> Option<LoginMethod> {
        self.method
    }

    pub fn set_ensure(&mut self, raw: &Value) -> Result<()> {
        self.ensure = Some(Ensure::from_value(raw)?);
        Ok(())
    }

    pub fn set_groups(&mut self, raw: &Value) -> Result<()> {
        self.groups = Some(Groups::parse(raw)?);
        Ok(())
    }

    pub fn set_method(&mut self, raw: &Value) -> Result<()> {
        self.method = Some(Method::parse(raw)?);
        Ok(())
    }
}

impl ResourceType for AaaAuthorizationLoginExecSvc {
    const TYPE_NAME: &'static str = "cisco_aaa_authorization_login_exec_svc";

    const DOC: &'static str = "Manages configuration for Authorization Login Exec Service.

'console' and 'default' are the only services configurable.

Example:
    [[resource]]
    type = \"cisco_aaa_authorization_login_exec_svc\"
    title = \"console\"
    ensure = \"present\"
    groups = [\"group1\", \"group2\"]
    method = \"local\"";

    fn apply_to() -> ApplyTo {
        ApplyTo::All
    }

    fn ensurable() -> bool {
        true
    }

    fn title_patterns() -> &'static [TitlePattern] {
        &TITLE_PATTERNS
    }

    fn attributes() -> Vec<AttributeDoc> {
        vec![
            AttributeDoc {
                name: Self::NAMEVAR,
                kind: AttributeKind::Namevar,
                doc: "Name of the exec login service. Valid values are 'console' or 'default'.",
            },
            AttributeDoc {
                name: Ensure::ATTRIBUTE,
                kind: AttributeKind::Property,
                doc: "Whether the service configuration should be present or absent.",
            },
            AttributeDoc {
                name: Groups::NAME,
                kind: AttributeKind::Property,
                doc: Groups::DOC,
            },
            AttributeDoc {
                name: Method::NAME,
                kind: AttributeKind::Property,
                doc: Method::DOC,
            },
        ]
    }

    fn with_name(name: &str) -> Result<Self> {
        Self::validate_name(name)?;
        Ok(Self {
            name: name.to_string(),
            ensure: None,
            groups: None,
            method: None,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set(&mut self, attribute: &str, value: &Value) -> Result<()> {
        match attribute {
            "ensure" => self.set_ensure(value),
            "groups" => self.set_groups(value),
            "method" => self.set_method(value),
            "name" => Err(Error::invalid_value(
                Self::NAMEVAR,
                "cannot be changed after creation",
            )),
            other => Err(Error::UnknownAttribute {
                resource_type: Self::TYPE_NAME.to_string(),
                attribute: other.to_string(),
            }),
        }
    }

    fn ensure(&self) -> Option<Ensure> {
        self.ensure
    }

    fn changes(&self, is: Option<&Self>) -> Vec<PropertyChange> {
        let groups = PropertyValue::new(is.and_then(|r| r.groups.as_ref()), self.groups.as_ref());
        let method = PropertyValue::new(is.and_then(|r| r.method.as_ref()), self.method.as_ref());

        groups
            .change::<Groups>()
            .into_iter()
            .chain(method.change::<Method>())
            .collect()
    }

    fn autorequires(&self) -> Vec<Autorequire> {
        let groups = self
            .groups
            .iter()
            .flat_map(|groups| groups.iter())
            .map(|group| group.as_str().to_string())
            .collect();

        vec![
            // tacacs_server must be enabled before any of this applies
            Autorequire::new(TACACS_SERVER_TYPE, vec!["default".to_string()]),
            Autorequire::new(TACACS_GROUP_TYPE, groups),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use declarative::{ResourceDiff, ResourceRef, WorkingSet, compute_dependencies, instantiate};
    use std::collections::BTreeMap;

    type Svc = AaaAuthorizationLoginExecSvc;

    fn names(groups: &[&str]) -> GroupList {
        groups
            .iter()
            .map(|g| GroupValue::Name((*g).to_string()))
            .collect()
    }

    fn attrs(pairs: &[(&str, Value)]) -> BTreeMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_title_binds_name() {
        let svc: Svc = instantiate("console", &BTreeMap::new()).unwrap();
        assert_eq!(svc.name(), "console");

        let svc: Svc = instantiate("default", &BTreeMap::new()).unwrap();
        assert_eq!(svc.name(), "default");
    }

    #[test]
    fn test_title_with_whitespace_or_empty_is_invalid_identity() {
        for title in ["", "console default", " console"] {
            let err = instantiate::<Svc>(title, &BTreeMap::new()).unwrap_err();
            assert!(err.is_invalid_identity(), "{title:?}");
        }
    }

    #[test]
    fn test_only_ascii_whitespace_splits_title() {
        let err = instantiate::<Svc>("con\tsole", &BTreeMap::new()).unwrap_err();
        assert!(err.is_invalid_identity());

        let err = instantiate::<Svc>("con\u{a0}sole", &BTreeMap::new()).unwrap_err();
        assert!(err.is_invalid_value());
        assert_eq!(err.attribute(), Some("name"));
    }

    #[test]
    fn test_name_validation() {
        assert!(Svc::validate_name("console").is_ok());
        assert!(Svc::validate_name("default").is_ok());

        for bad in ["exec", "", "Console", "DEFAULT", "vty"] {
            let err = Svc::validate_name(bad).unwrap_err();
            assert!(err.is_invalid_value(), "{bad:?}");
            assert_eq!(err.attribute(), Some("name"));
        }
    }

    #[test]
    fn test_title_outside_domain_is_invalid_value() {
        let err = instantiate::<Svc>("exec", &BTreeMap::new()).unwrap_err();
        assert!(err.is_invalid_value());
    }

    #[test]
    fn test_name_is_immutable() {
        let mut svc = Svc::with_name("console").unwrap();
        let err = svc.set("name", &Value::from("default")).unwrap_err();
        assert!(err.is_invalid_value());
        assert_eq!(svc.name(), "console");
    }

    #[test]
    fn test_group_munge() {
        assert_eq!(
            GroupValue::Name("default".to_string()).munge(),
            GroupValue::Default
        );
        assert_eq!(
            GroupValue::Name("g1".to_string()).munge(),
            GroupValue::Name("g1".to_string())
        );
        assert_eq!(GroupValue::Default.munge(), GroupValue::Default);
        assert_eq!(
            GroupValue::Name("default".to_string()).munge().munge(),
            GroupValue::Default
        );
    }

    #[test]
    fn test_groups_parse_flattens_and_munges() {
        let raw = Value::Array(vec![
            Value::from("g1"),
            Value::Array(vec![Value::from("default"), Value::from("g2")]),
        ]);
        let groups = Groups::parse(&raw).unwrap();
        assert_eq!(
            groups,
            GroupList::new(vec![
                GroupValue::Name("g1".to_string()),
                GroupValue::Default,
                GroupValue::Name("g2".to_string()),
            ])
        );
    }

    #[test]
    fn test_groups_keyword_skips_validation() {
        assert!(Groups::validate(&Value::Default).is_ok());
        assert_eq!(
            Groups::parse(&Value::Default).unwrap(),
            GroupList::new(vec![GroupValue::Default])
        );
    }

    #[test]
    fn test_groups_rejects_non_strings() {
        for raw in [
            Value::Integer(5),
            Value::Array(vec![Value::from("g1"), Value::Boolean(true)]),
            Value::Array(vec![Value::Array(vec![Value::Float(1.5)])]),
        ] {
            let err = Groups::parse(&raw).unwrap_err();
            assert!(err.is_invalid_value());
            assert_eq!(err.attribute(), Some("groups"));
        }
    }

    #[test]
    fn test_groups_insync_ignores_order() {
        assert!(Groups::insync(&names(&["g2", "g1"]), &names(&["g1", "g2"])));
    }

    #[test]
    fn test_groups_insync_requires_same_cardinality() {
        assert!(!Groups::insync(&names(&["g1"]), &names(&["g1", "g1"])));
    }

    #[test]
    fn test_groups_insync_compares_multisets() {
        assert!(!Groups::insync(&names(&["g1", "g1"]), &names(&["g1", "g2"])));
    }

    #[test]
    fn test_groups_insync_with_sentinel() {
        let should = Groups::parse(&Value::from(vec!["default"])).unwrap();
        let is = GroupList::new(vec![GroupValue::Default]);
        assert!(Groups::insync(&is, &should));
        assert!(!Groups::insync(&names(&["g1"]), &should));
    }

    #[test]
    fn test_method_accepts_enumeration() {
        assert_eq!(Method::parse(&Value::from("local")).unwrap(), LoginMethod::Local);
        assert_eq!(
            Method::parse(&Value::from("unselected")).unwrap(),
            LoginMethod::Unselected
        );
        assert_eq!(
            Method::parse(&Value::from("default")).unwrap(),
            LoginMethod::Default
        );
        assert_eq!(Method::parse(&Value::Default).unwrap(), LoginMethod::Default);
    }

    #[test]
    fn test_method_rejects_other_values() {
        for raw in [Value::from("radius"), Value::from(""), Value::Integer(1)] {
            let err = Method::parse(&raw).unwrap_err();
            assert!(err.is_invalid_value());
            assert_eq!(err.attribute(), Some("method"));
        }
    }

    #[test]
    fn test_method_uses_plain_equality() {
        assert!(Method::insync(&LoginMethod::Local, &LoginMethod::Local));
        assert!(!Method::insync(&LoginMethod::Local, &LoginMethod::Default));
    }

    #[test]
    fn test_round_trip() {
        let svc: Svc = instantiate(
            "console",
            &attrs(&[
                ("groups", Value::from(vec!["alpha", "beta"])),
                ("method", Value::from("local")),
            ]),
        )
        .unwrap();

        assert_eq!(svc.name(), "console");
        assert_eq!(svc.groups(), Some(&names(&["alpha", "beta"])));
        assert_eq!(svc.method(), Some(LoginMethod::Local));
    }

    #[test]
    fn test_invalid_attribute_aborts_construction() {
        let err = instantiate::<Svc>("console", &attrs(&[("method", Value::from("radius"))]))
            .unwrap_err();
        assert_eq!(err.attribute(), Some("method"));

        let err = instantiate::<Svc>("console", &attrs(&[("priority", Value::Integer(1))]))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownAttribute { .. }));
    }

    #[test]
    fn test_dependencies_all_present() {
        let svc: Svc = instantiate(
            "console",
            &attrs(&[("groups", Value::from(vec!["g1", "g2"]))]),
        )
        .unwrap();

        let set: WorkingSet = [
            ResourceRef::new(TACACS_SERVER_TYPE, "default"),
            ResourceRef::new(TACACS_GROUP_TYPE, "g1"),
            ResourceRef::new(TACACS_GROUP_TYPE, "g2"),
            ResourceRef::new(TACACS_GROUP_TYPE, "g3"),
        ]
        .into_iter()
        .collect();

        let edges = compute_dependencies(&svc, &set);
        assert_eq!(edges.len(), 3);
        assert!(edges.contains(&ResourceRef::new(TACACS_SERVER_TYPE, "default")));
        assert!(edges.contains(&ResourceRef::new(TACACS_GROUP_TYPE, "g1")));
        assert!(edges.contains(&ResourceRef::new(TACACS_GROUP_TYPE, "g2")));
    }

    #[test]
    fn test_dependencies_empty_working_set() {
        let svc: Svc = instantiate(
            "console",
            &attrs(&[("groups", Value::from(vec!["g1", "g2"]))]),
        )
        .unwrap();
        assert!(compute_dependencies(&svc, &WorkingSet::new()).is_empty());
    }

    #[test]
    fn test_dependencies_without_groups() {
        let svc = Svc::with_name("default").unwrap();
        let set: WorkingSet = [
            ResourceRef::new(TACACS_SERVER_TYPE, "default"),
            ResourceRef::new(TACACS_GROUP_TYPE, "g1"),
        ]
        .into_iter()
        .collect();

        let edges = compute_dependencies(&svc, &set);
        assert_eq!(edges.len(), 1);
        assert!(edges.contains(&ResourceRef::new(TACACS_SERVER_TYPE, "default")));
    }

    #[test]
    fn test_dependencies_follow_mutation() {
        let mut svc = Svc::with_name("console").unwrap();
        let set: WorkingSet = [ResourceRef::new(TACACS_GROUP_TYPE, "g9")]
            .into_iter()
            .collect();
        assert!(compute_dependencies(&svc, &set).is_empty());

        svc.set_groups(&Value::from(vec!["g9"])).unwrap();
        assert_eq!(compute_dependencies(&svc, &set).len(), 1);
    }

    #[test]
    fn test_diff_reports_out_of_sync_properties() {
        let should: Svc = instantiate(
            "console",
            &attrs(&[
                ("ensure", Value::from("present")),
                ("groups", Value::from(vec!["g1", "g2"])),
                ("method", Value::from("local")),
            ]),
        )
        .unwrap();

        let is: Svc = instantiate(
            "console",
            &attrs(&[
                ("groups", Value::from(vec!["g2", "g1"])),
                ("method", Value::from("unselected")),
            ]),
        )
        .unwrap();

        let diff = ResourceDiff::between(&should, Some(&is)).unwrap();
        assert!(diff.is_modification());
        assert_eq!(diff.changes.len(), 1);
        assert_eq!(diff.changes[0].property, "method");
        assert_eq!(diff.changes[0].is.as_deref(), Some("unselected"));
        assert_eq!(diff.changes[0].should, "local");
    }

    #[test]
    fn test_diff_observed_absent_service() {
        let observed: Svc = instantiate(
            "console",
            &attrs(&[
                ("ensure", Value::from("absent")),
                ("method", Value::from("local")),
            ]),
        )
        .unwrap();

        let should: Svc = instantiate(
            "console",
            &attrs(&[
                ("ensure", Value::from("present")),
                ("method", Value::from("local")),
            ]),
        )
        .unwrap();
        let diff = ResourceDiff::between(&should, Some(&observed)).unwrap();
        assert!(diff.is_addition());
        assert_eq!(diff.changes[0].property, "method");

        let should: Svc =
            instantiate("console", &attrs(&[("ensure", Value::from("absent"))])).unwrap();
        assert!(ResourceDiff::between(&should, Some(&observed)).is_none());
    }

    #[test]
    fn test_diff_in_sync() {
        let should: Svc =
            instantiate("default", &attrs(&[("groups", Value::from(vec!["a", "b"]))])).unwrap();
        let is: Svc =
            instantiate("default", &attrs(&[("groups", Value::from(vec!["b", "a"]))])).unwrap();
        assert!(ResourceDiff::between(&should, Some(&is)).is_none());
    }

    #[test]
    fn test_type_metadata() {
        assert_eq!(Svc::TYPE_NAME, "cisco_aaa_authorization_login_exec_svc");
        assert_eq!(Svc::apply_to(), ApplyTo::All);
        assert!(Svc::ensurable());
        assert_eq!(Svc::title_patterns().len(), 1);

        let attributes: Vec<_> = Svc::attributes().iter().map(|a| a.name).collect();
        assert_eq!(attributes, vec!["name", "ensure", "groups", "method"]);
    }
}
