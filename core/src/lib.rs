//! Declarative switch-set schemas and argument resolution.
//!
//! This crate lets a program declare its commands as data and resolve a raw
//! argument list against them:
//!
//! - [`CommandSchema`] — a named command with zero or more alternative
//!   switch-set chains.
//! - [`SwitchSetChain`] / [`SwitchSetNode`] — one alternative, made of one or
//!   more flags, each validated against a value pattern.
//! - [`SwitchConfig`] — the single declaration shape for a node.
//! - [`SchemaRegistry`] — all commands of a program, and the entry point for
//!   [`resolve`](SchemaRegistry::resolve).
//! - [`Outcome`] / [`SelectedCommand`] — the result of a resolution and the
//!   read-only snapshot handed to the command handler.
//! - [`SchemaPackage`] — a JSON/YAML declaration of a whole registry.
//!
//! Schema mistakes surface as [`ConfigError`] at construction time. A value
//! without a preceding switch aborts resolution with [`ParseError`]. Unknown
//! commands and incomplete switch sets are ordinary [`Outcome`]s.
//!
//! # Example
//!
//! ```
//! use switchset_core::*;
//!
//! let mut cidr = CommandSchema::new("cidr", "Compute network details").unwrap();
//! cidr.add_switch_set(SwitchConfig::new("cidr", ["-c", "--cidr"])).unwrap();
//! cidr.add_switch_set(SwitchConfig::new("ip", ["-i", "--ip"]))
//!     .unwrap()
//!     .then(SwitchConfig::new("cb", ["-cb", "--cidr-bits"]).with_pattern("<n>", r"^\d{1,3}$"))
//!     .unwrap();
//!
//! let mut registry = SchemaRegistry::new();
//! registry.register(cidr).unwrap();
//!
//! // Only half of the second alternative was supplied.
//! let outcome = registry.resolve(&["cidr", "-i", "10.0.0.0"]).unwrap();
//! let Outcome::MissingArg(selected) = outcome else { panic!() };
//! let chain = selected.chain().unwrap();
//! assert_eq!(chain.name, "ip");
//! assert_eq!(chain.missing()[0].name, "cb");
//! ```

mod error;
mod package;
mod registry;
mod resolve;
mod snapshot;
mod tokenize;
mod types;

pub use error::{ConfigError, PackageError, ParseError};
pub use package::{CommandSpec, SchemaPackage};
pub use registry::SchemaRegistry;
pub use resolve::{ChainMatch, Outcome, match_chains, select};
pub use snapshot::{SelectedChain, SelectedCommand, SelectedSwitch};
pub use tokenize::{TokenMap, is_switch_token, tokenize};
pub use types::*;
