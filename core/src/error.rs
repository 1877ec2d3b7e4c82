//! Error types for schema construction and argument resolution.
//!
//! Configuration errors ([`ConfigError`]) are raised while commands and switch
//! sets are being declared. Parse faults ([`ParseError`]) are raised while an
//! argument list is being resolved. The expected, recoverable results of a
//! resolution (unknown command, incomplete switch set, usage request) are not
//! errors; they are reported through [`Outcome`](crate::Outcome).

use thiserror::Error;

/// Errors raised while building a command schema or registry.
///
/// Every variant is fatal to schema setup: a program that hits one of these
/// has a broken declaration and should not start parsing arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Command name is empty or whitespace-only.
    #[error("command name cannot be empty")]
    EmptyCommandName,
    /// Command name starts with `-`, which would make it look like a switch.
    #[error("command name cannot start with a dash: {0}")]
    CommandNameLeadingDash(String),
    /// Command name contains characters other than ASCII letters and digits.
    #[error("invalid command name: {0}")]
    InvalidCommandName(String),
    /// Two commands in the same registry share a (case-insensitive) name.
    #[error("duplicate command in registry: {0}")]
    DuplicateCommand(String),
    /// Switch-set node name is empty or whitespace-only.
    #[error("switch set name cannot be empty")]
    EmptyNodeName,
    /// No usable switch spelling remained after normalization.
    #[error("switch set '{0}' must define at least one switch")]
    EmptySwitchList(String),
    /// A switch spelling does not look like `-x` or `--long-name`.
    #[error("invalid switch format: {0}")]
    InvalidSwitch(String),
    /// The same switch spelling appears twice within one chain.
    #[error("duplicate switch in switch set chain: {0}")]
    DuplicateSwitch(String),
    /// The value pattern is not a valid regular expression.
    #[error("invalid value pattern for '{name}': {message}")]
    InvalidPattern {
        /// Node the pattern belongs to.
        name: String,
        /// Message reported by the regex compiler.
        message: String,
    },
    /// The declared default value does not satisfy the value pattern.
    #[error("default value '{value}' for '{name}' does not match its pattern")]
    InvalidDefault {
        /// Node the default belongs to.
        name: String,
        /// Rejected default value.
        value: String,
    },
    /// A declared chain has no nodes.
    #[error("command '{0}' declares an empty switch set chain")]
    EmptyChain(String),
}

/// Faults that abort the resolution of an argument list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A value token appeared without a preceding switch to attach it to.
    #[error("CMDARG_NOKEY: value '{0}' has no preceding switch")]
    NoKey(String),
}

impl ParseError {
    /// Stable machine-readable code for this fault.
    ///
    /// ```
    /// use switchset_core::ParseError;
    ///
    /// let err = ParseError::NoKey("10.0.0.0/24".into());
    /// assert_eq!(err.code(), "CMDARG_NOKEY");
    /// ```
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoKey(_) => "CMDARG_NOKEY",
        }
    }
}

/// Errors that can occur while loading a declarative schema package.
#[derive(Debug, Error)]
pub enum PackageError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The package parsed but declares an invalid schema.
    #[error("invalid schema: {0}")]
    ConfigError(#[from] ConfigError),

    /// File extension is not one of `.json`, `.yaml`, `.yml`.
    #[error("unsupported package format: {0}")]
    UnsupportedFormat(String),
}
