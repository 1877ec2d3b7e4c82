//! Declarative schema packages.
//!
//! A [`SchemaPackage`] describes a whole registry as data, so commands and
//! their switch sets can live in a JSON or YAML file instead of code. Every
//! declaration goes through the same validating constructors as the code
//! API, so a package that loads is as well-formed as one built by hand.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! commands:
//!   - name: cidr
//!     description: Compute network details for a CIDR block.
//!     switch_sets:
//!       - - name: cidr
//!           switches: ["-c", "--cidr"]
//!           value_pattern_text: "<a.b.c.d/n>"
//!       - - name: ip
//!           switches: ["-i", "--ip"]
//!         - name: cb
//!           switches: ["-cb", "--cidr-bits"]
//!           value_pattern: '^\d{1,3}$'
//!   - name: version
//!     description: Print the program version.
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, PackageError};
use crate::registry::SchemaRegistry;
use crate::types::{CommandSchema, SwitchConfig};

/// Declaration of one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Command name.
    pub name: String,
    /// Description for help output.
    #[serde(default)]
    pub description: String,
    /// Alternatives, each a list of nodes with the head first.
    #[serde(default)]
    pub switch_sets: Vec<Vec<SwitchConfig>>,
}

impl CommandSpec {
    /// Builds the validated schema for this declaration.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found in the declaration.
    pub fn to_schema(&self) -> Result<CommandSchema, ConfigError> {
        let mut schema = CommandSchema::new(&self.name, &self.description)?;
        for chain in &self.switch_sets {
            let Some((head, rest)) = chain.split_first() else {
                return Err(ConfigError::EmptyChain(schema.name().to_string()));
            };
            let mut builder = schema.add_switch_set(head.clone())?;
            for node in rest {
                builder = builder.then(node.clone())?;
            }
        }
        Ok(schema)
    }
}

/// Serializable registry declaration.
///
/// # Examples
///
/// ```
/// use switchset_core::{Outcome, SchemaPackage};
///
/// let json = r#"{
///     "version": "1.0",
///     "commands": [
///         { "name": "greet", "switch_sets": [[ { "name": "who", "switches": ["-n"] } ]] }
///     ]
/// }"#;
///
/// let mut registry = SchemaPackage::from_json_str(json)
///     .unwrap()
///     .into_registry()
///     .unwrap();
/// let outcome = registry.resolve(&["greet", "-n", "world"]).unwrap();
/// assert_eq!(outcome.selected().unwrap().value_of("who"), Some("world"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaPackage {
    /// Package format version.
    pub version: String,
    /// Optional package name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Optional package description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Command declarations in registration order.
    #[serde(default)]
    pub commands: Vec<CommandSpec>,
}

impl SchemaPackage {
    /// Creates an empty package.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            name: None,
            description: None,
            commands: Vec::new(),
        }
    }

    /// Parses a package from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PackageError::JsonError`] on malformed input.
    pub fn from_json_str(raw: &str) -> Result<Self, PackageError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Parses a package from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`PackageError::YamlError`] on malformed input.
    pub fn from_yaml_str(raw: &str) -> Result<Self, PackageError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Loads a package file, choosing the format from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`PackageError::UnsupportedFormat`] for extensions other than
    /// `json`, `yaml` and `yml`, or an I/O or parse error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PackageError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Self::from_json_str(&std::fs::read_to_string(path)?),
            Some("yaml" | "yml") => Self::from_yaml_str(&std::fs::read_to_string(path)?),
            _ => Err(PackageError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Serializes the package as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PackageError::JsonError`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, PackageError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Returns the number of commands in this package.
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Registers every declared command into `registry`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found, wrapped in
    /// [`PackageError::ConfigError`].
    pub fn register_into(&self, registry: &mut SchemaRegistry) -> Result<(), PackageError> {
        for spec in &self.commands {
            registry.register(spec.to_schema()?)?;
        }
        Ok(())
    }

    /// Builds a fresh registry from this package.
    ///
    /// # Errors
    ///
    /// See [`register_into`](SchemaPackage::register_into).
    pub fn into_registry(self) -> Result<SchemaRegistry, PackageError> {
        let mut registry = SchemaRegistry::new();
        self.register_into(&mut registry)?;
        Ok(registry)
    }
}
