use anyhow::{Context, Result};
use declarative::{Error, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Manifest Schema
// ============================================================================

/// A set of declared resources
///
/// ```toml
/// [[resource]]
/// type = "cisco_aaa_authorization_login_exec_svc"
/// title = "console"
/// ensure = "present"
/// groups = ["group1", "group2"]
/// method = "local"
///
/// [[resource]]
/// type = "cisco_tacacs_server"
/// title = "default"
/// ```
///
/// The same format describes observed device state.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, rename = "resource")]
    pub resources: Vec<ResourceDecl>,
}

/// One declared resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceDecl {
    /// Resource type name
    #[serde(rename = "type")]
    pub resource_type: String,

    /// Title, parsed by the type's title patterns
    pub title: String,

    /// Everything else is an attribute
    #[serde(flatten)]
    pub attributes: BTreeMap<String, toml::Value>,
}

impl Manifest {
    /// Default manifest location (~/.config/cisco-aaa-exec/manifest.toml)
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home
            .join(".config")
            .join("cisco-aaa-exec")
            .join("manifest.toml"))
    }

    /// Resolve a user-supplied path, falling back to the default location
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(shellexpand::tilde(p).as_ref())),
            None => Self::default_path(),
        }
    }

    /// Load a manifest from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read manifest: {}", path.display()))?;

        let manifest = Self::parse(&content)
            .with_context(|| format!("Failed to parse manifest: {}", path.display()))?;

        log::debug!(
            "Loaded {} resources from {}",
            manifest.resources.len(),
            path.display()
        );
        Ok(manifest)
    }

    /// Parse a manifest from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid TOML format in manifest")
    }
}

impl ResourceDecl {
    /// Attributes converted to catalog values
    pub fn values(&self) -> declarative::Result<BTreeMap<String, Value>> {
        self.attributes
            .iter()
            .map(|(name, value)| Ok((name.clone(), to_value(name, value)?)))
            .collect()
    }
}

// ============================================================================
// TOML Conversion
// ============================================================================

/// Convert a TOML value into a catalog value
///
/// Datetimes become strings. Tables have no catalog equivalent. TOML has no
/// bare keywords, so [`Value::Default`] is never produced here: a `"default"`
/// string reaches the same typed value, since `groups` munges it to the
/// default sentinel and `method` lists it in its enumeration.
pub fn to_value(attribute: &str, value: &toml::Value) -> declarative::Result<Value> {
    Ok(match value {
        toml::Value::String(s) => Value::String(s.clone()),
        toml::Value::Integer(i) => Value::Integer(*i),
        toml::Value::Float(f) => Value::Float(*f),
        toml::Value::Boolean(b) => Value::Boolean(*b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| to_value(attribute, item))
                .collect::<declarative::Result<_>>()?,
        ),
        toml::Value::Table(_) => {
            return Err(Error::invalid_value(attribute, "tables are not supported"));
        }
    })
}
