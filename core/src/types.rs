//! Schema type definitions for commands and their switch sets.
//!
//! A [`CommandSchema`] owns an ordered list of [`SwitchSetChain`]s. Each chain
//! is one alternative way to supply the command's information and is made of
//! one or more [`SwitchSetNode`]s, head first. Nodes are declared through the
//! canonical [`SwitchConfig`] struct and validated on construction, so a
//! schema that exists is always well-formed.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

static SWITCH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-{1,2}[A-Za-z][A-Za-z0-9-]*$").expect("static regex must compile")
});
static COMMAND_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").expect("static regex must compile"));

/// Pattern text used when a declaration does not provide one.
pub const DEFAULT_PATTERN_TEXT: &str = "<value>";
/// Value pattern used when a declaration does not provide one.
pub const DEFAULT_VALUE_PATTERN: &str = "^.+$";

/// Returns `true` if `spelling` is a well-formed switch (`-x`, `--long-name`).
///
/// # Examples
///
/// ```
/// use switchset_core::is_valid_switch;
///
/// assert!(is_valid_switch("-c"));
/// assert!(is_valid_switch("--cidr-bits"));
/// assert!(!is_valid_switch("cidr"));
/// assert!(!is_valid_switch("---c"));
/// assert!(!is_valid_switch("-1"));
/// ```
pub fn is_valid_switch(spelling: &str) -> bool {
    SWITCH_RE.is_match(spelling)
}

/// Declaration of one switch-set node.
///
/// This is the single configuration shape accepted by
/// [`CommandSchema::add_switch_set`] and [`ChainBuilder::then`]. It can be
/// written out field by field, built with the convenience methods below, or
/// deserialized from a [`SchemaPackage`](crate::SchemaPackage).
///
/// # Examples
///
/// ```
/// use switchset_core::SwitchConfig;
///
/// let config = SwitchConfig::new("cidr", ["-c", "--cidr"])
///     .with_description("Network in CIDR notation")
///     .with_pattern("<a.b.c.d/n>", r"^\d{1,3}(\.\d{1,3}){3}/\d{1,2}$");
///
/// assert_eq!(config.switches, vec!["-c", "--cidr"]);
/// assert!(config.default_value.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchConfig {
    /// Identifier of the node; the command handler uses it to tell which
    /// alternative was supplied.
    pub name: String,
    /// Flag spellings accepted for this node (e.g. `-c`, `--cidr`).
    pub switches: Vec<String>,
    /// Human-readable description for help output.
    pub description: String,
    /// Human-readable form of the expected value (e.g. `<a.b.c.d/n>`).
    pub value_pattern_text: String,
    /// Regular expression a value must match to be accepted.
    pub value_pattern: String,
    /// Value the node starts with before any argument is applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            switches: Vec::new(),
            description: String::new(),
            value_pattern_text: DEFAULT_PATTERN_TEXT.to_string(),
            value_pattern: DEFAULT_VALUE_PATTERN.to_string(),
            default_value: None,
        }
    }
}

impl SwitchConfig {
    /// Creates a declaration with the given name and switch spellings.
    pub fn new<I, S>(name: &str, switches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            switches: switches.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    /// Sets the displayed pattern text and the validating regex.
    pub fn with_pattern(mut self, text: &str, regex: &str) -> Self {
        self.value_pattern_text = text.to_string();
        self.value_pattern = regex.to_string();
        self
    }

    /// Sets a default value.
    pub fn with_default(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }
}

/// One position in a switch-set chain.
///
/// Bundles one or more synonymous switch spellings with a value pattern and
/// the node's current value. The value can only change through
/// [`set_value`](SwitchSetNode::set_value), which validates the candidate
/// first.
#[derive(Debug, Clone)]
pub struct SwitchSetNode {
    name: String,
    switches: Vec<String>,
    description: String,
    value_pattern_text: String,
    value_pattern: Regex,
    default_value: String,
    value: String,
}

impl SwitchSetNode {
    /// Validates a declaration and builds a node from it.
    ///
    /// Switch spellings are trimmed, blank ones dropped, and the rest
    /// de-duplicated and sorted.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for a blank name, an empty or malformed
    /// switch list, an uncompilable pattern, or a default value that does
    /// not satisfy the pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// use switchset_core::{SwitchConfig, SwitchSetNode};
    ///
    /// let node = SwitchSetNode::from_config(
    ///     SwitchConfig::new("ip", ["--ip", "-i", "-i "]),
    /// ).unwrap();
    /// assert_eq!(node.switches(), ["--ip", "-i"]);
    /// assert_eq!(node.value(), "");
    /// ```
    pub fn from_config(config: SwitchConfig) -> Result<Self, ConfigError> {
        let name = config.name.trim().to_string();
        if name.is_empty() {
            return Err(ConfigError::EmptyNodeName);
        }

        let switches: BTreeSet<String> = config
            .switches
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        if switches.is_empty() {
            return Err(ConfigError::EmptySwitchList(name));
        }
        if let Some(bad) = switches.iter().find(|s| !is_valid_switch(s)) {
            return Err(ConfigError::InvalidSwitch(bad.clone()));
        }

        let value_pattern =
            Regex::new(&config.value_pattern).map_err(|err| ConfigError::InvalidPattern {
                name: name.clone(),
                message: err.to_string(),
            })?;

        let default_value = config
            .default_value
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        if !default_value.is_empty() && !value_pattern.is_match(&default_value) {
            return Err(ConfigError::InvalidDefault {
                name,
                value: default_value,
            });
        }

        Ok(Self {
            name,
            switches: switches.into_iter().collect(),
            description: config.description,
            value_pattern_text: config.value_pattern_text,
            value_pattern,
            value: default_value.clone(),
            default_value,
        })
    }

    /// Validates `candidate` and stores it on success.
    ///
    /// The candidate is trimmed and tested against the node's pattern. On a
    /// match the stored value is replaced and `true` is returned; otherwise
    /// the stored value is left untouched and `false` is returned.
    ///
    /// An empty candidate is never a mismatch: it clears the value and
    /// returns `true`. The resolver skips empty token values so that a bare
    /// switch leaves a default in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use switchset_core::{SwitchConfig, SwitchSetNode};
    ///
    /// let mut node = SwitchSetNode::from_config(
    ///     SwitchConfig::new("cb", ["-cb"]).with_pattern("<n>", r"^\d{1,3}$"),
    /// ).unwrap();
    ///
    /// assert!(node.set_value(" 24 "));
    /// assert_eq!(node.value(), "24");
    /// assert!(!node.set_value("abc"));
    /// assert_eq!(node.value(), "24");
    /// ```
    pub fn set_value(&mut self, candidate: &str) -> bool {
        let candidate = candidate.trim();
        if !candidate.is_empty() && !self.value_pattern.is_match(candidate) {
            return false;
        }
        self.value = candidate.to_string();
        true
    }

    /// Restores the construction-time default value.
    pub fn reset(&mut self) {
        self.value.clone_from(&self.default_value);
    }

    /// Returns `true` if the node currently holds a non-empty value.
    pub fn is_matched(&self) -> bool {
        !self.value.is_empty()
    }

    /// Checks if `spelling` is one of this node's switches.
    pub fn matches_switch(&self, spelling: &str) -> bool {
        self.switches.iter().any(|s| s == spelling)
    }

    /// Node identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sorted, de-duplicated switch spellings.
    pub fn switches(&self) -> &[String] {
        &self.switches
    }

    /// Description for help output.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Human-readable form of the expected value.
    pub fn value_pattern_text(&self) -> &str {
        &self.value_pattern_text
    }

    /// Source of the validating regex.
    pub fn value_pattern(&self) -> &str {
        self.value_pattern.as_str()
    }

    /// Current value (empty when unset).
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Construction-time default (empty when none was declared).
    pub fn default_value(&self) -> &str {
        &self.default_value
    }
}

/// One alternative way to supply a command's information.
///
/// Nodes are stored head first; a chain always has at least one node.
#[derive(Debug, Clone)]
pub struct SwitchSetChain {
    nodes: Vec<SwitchSetNode>,
}

impl SwitchSetChain {
    fn new(head: SwitchSetNode) -> Self {
        Self { nodes: vec![head] }
    }

    fn push(&mut self, node: SwitchSetNode) -> Result<(), ConfigError> {
        for spelling in node.switches() {
            if self.nodes.iter().any(|n| n.matches_switch(spelling)) {
                return Err(ConfigError::DuplicateSwitch(spelling.clone()));
            }
        }
        self.nodes.push(node);
        Ok(())
    }

    /// Chain name, taken from the head node.
    pub fn name(&self) -> &str {
        self.nodes[0].name()
    }

    /// First node of the chain.
    pub fn head(&self) -> &SwitchSetNode {
        &self.nodes[0]
    }

    /// All nodes, head first.
    pub fn nodes(&self) -> &[SwitchSetNode] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [SwitchSetNode] {
        &mut self.nodes
    }

    /// Number of nodes in the chain.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; chains are created with a head node.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Handle returned by [`CommandSchema::add_switch_set`] for appending
/// follow-on nodes to the chain that was just started.
#[derive(Debug)]
pub struct ChainBuilder<'a> {
    chain: &'a mut SwitchSetChain,
}

impl<'a> ChainBuilder<'a> {
    /// Appends the next node to this chain.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the declaration is invalid or one of its
    /// spellings is already used by an earlier node of the same chain.
    pub fn then(self, config: SwitchConfig) -> Result<Self, ConfigError> {
        let node = SwitchSetNode::from_config(config)?;
        self.chain.push(node)?;
        Ok(self)
    }

    /// The chain being built.
    pub fn chain(&self) -> &SwitchSetChain {
        self.chain
    }
}

/// A named top-level command and its switch-set alternatives.
///
/// A schema with no chains is valid and means the command takes no
/// arguments.
///
/// # Examples
///
/// ```
/// use switchset_core::{CommandSchema, SwitchConfig};
///
/// let mut schema = CommandSchema::new("CIDR", "Compute network details").unwrap();
/// schema.add_switch_set(SwitchConfig::new("cidr", ["-c", "--cidr"])).unwrap();
/// schema
///     .add_switch_set(SwitchConfig::new("ip", ["-i", "--ip"]))
///     .unwrap()
///     .then(SwitchConfig::new("cb", ["-cb", "--cidr-bits"]))
///     .unwrap();
///
/// assert_eq!(schema.name(), "cidr");
/// assert_eq!(schema.chains().len(), 2);
/// assert_eq!(schema.chains()[1].len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct CommandSchema {
    name: String,
    description: String,
    chains: Vec<SwitchSetChain>,
}

impl CommandSchema {
    /// Creates a command with no switch sets.
    ///
    /// The name is trimmed and lower-cased.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCommandName`],
    /// [`ConfigError::CommandNameLeadingDash`], or
    /// [`ConfigError::InvalidCommandName`].
    pub fn new(name: &str, description: &str) -> Result<Self, ConfigError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ConfigError::EmptyCommandName);
        }
        if name.starts_with('-') {
            return Err(ConfigError::CommandNameLeadingDash(name.to_string()));
        }
        if !COMMAND_NAME_RE.is_match(name) {
            return Err(ConfigError::InvalidCommandName(name.to_string()));
        }

        Ok(Self {
            name: name.to_lowercase(),
            description: description.to_string(),
            chains: Vec::new(),
        })
    }

    /// Starts a new switch-set chain headed by `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the declaration is invalid.
    pub fn add_switch_set(&mut self, config: SwitchConfig) -> Result<ChainBuilder<'_>, ConfigError> {
        let head = SwitchSetNode::from_config(config)?;
        self.chains.push(SwitchSetChain::new(head));
        let index = self.chains.len() - 1;
        Ok(ChainBuilder {
            chain: &mut self.chains[index],
        })
    }

    /// Lower-cased command name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description for help output.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Switch-set chains in registration order.
    pub fn chains(&self) -> &[SwitchSetChain] {
        &self.chains
    }

    pub(crate) fn chains_mut(&mut self) -> &mut [SwitchSetChain] {
        &mut self.chains
    }

    /// Returns `true` if the command declares no switch sets.
    pub fn is_argless(&self) -> bool {
        self.chains.is_empty()
    }

    /// Restores every node to its default value.
    pub fn reset_values(&mut self) {
        for chain in &mut self.chains {
            for node in chain.nodes_mut() {
                node.reset();
            }
        }
    }
}
