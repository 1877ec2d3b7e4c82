//! The set of commands known to a program and the top-level resolver.

use tracing::debug;

use crate::error::{ConfigError, ParseError};
use crate::resolve::{Outcome, match_chains, select};
use crate::snapshot::SelectedCommand;
use crate::tokenize::tokenize;
use crate::types::CommandSchema;

/// Owns every [`CommandSchema`] of a program.
///
/// Resolving mutates node values in place, which is why
/// [`resolve`](SchemaRegistry::resolve) takes `&mut self`: one registry
/// serves one argument list at a time.
///
/// # Examples
///
/// ```
/// use switchset_core::{CommandSchema, Outcome, SchemaRegistry, SwitchConfig};
///
/// let mut cidr = CommandSchema::new("cidr", "Compute network details").unwrap();
/// cidr.add_switch_set(SwitchConfig::new("cidr", ["-c", "--cidr"])).unwrap();
///
/// let mut registry = SchemaRegistry::new();
/// registry.register(cidr).unwrap();
///
/// let outcome = registry.resolve(&["cidr", "-c", "10.0.0.0/24"]).unwrap();
/// let Outcome::Success(selected) = outcome else { panic!() };
/// assert_eq!(selected.value_of("cidr"), Some("10.0.0.0/24"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    commands: Vec<CommandSchema>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a command.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateCommand`] if a command with the same
    /// name is already registered.
    pub fn register(&mut self, schema: CommandSchema) -> Result<(), ConfigError> {
        if self.find(schema.name()).is_some() {
            return Err(ConfigError::DuplicateCommand(schema.name().to_string()));
        }
        self.commands.push(schema);
        Ok(())
    }

    /// Finds a command by case-insensitive name.
    pub fn find(&self, name: &str) -> Option<&CommandSchema> {
        let name = name.to_lowercase();
        self.commands.iter().find(|c| c.name() == name)
    }

    /// Finds a command by case-insensitive name for mutation.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut CommandSchema> {
        let name = name.to_lowercase();
        self.commands.iter_mut().find(|c| c.name() == name)
    }

    /// Registered commands in registration order.
    pub fn commands(&self) -> &[CommandSchema] {
        &self.commands
    }

    /// Gets all command names.
    pub fn command_names(&self) -> Vec<&str> {
        self.commands.iter().map(CommandSchema::name).collect()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if no command is registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Resolves an argument list (without the program name).
    ///
    /// - no arguments → [`Outcome::Usage`];
    /// - unknown first argument → [`Outcome::MissingCommand`];
    /// - command without switch sets → [`Outcome::Success`], ignoring any
    ///   further arguments;
    /// - command with switch sets but no further arguments →
    ///   [`Outcome::MissingArg`] with every chain in the snapshot;
    /// - otherwise the arguments are tokenized, matched and the winning
    ///   chain decides between [`Outcome::Success`] and
    ///   [`Outcome::MissingArg`].
    ///
    /// Node values are reset to their defaults before any argument is
    /// applied, so earlier calls never leak into this one.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::NoKey`] when a value appears without a
    /// preceding switch.
    pub fn resolve<S: AsRef<str>>(&mut self, argv: &[S]) -> Result<Outcome, ParseError> {
        let Some((first, rest)) = argv.split_first() else {
            return Ok(Outcome::Usage);
        };
        let first = first.as_ref();

        let Some(schema) = self.find_mut(first) else {
            debug!(command = first, "Unknown command");
            return Ok(Outcome::MissingCommand(first.to_string()));
        };
        schema.reset_values();

        if schema.is_argless() {
            debug!(command = schema.name(), "Command takes no arguments");
            return Ok(Outcome::Success(SelectedCommand::full(schema, &[])));
        }
        if rest.is_empty() {
            debug!(command = schema.name(), "Command arguments missing");
            return Ok(Outcome::MissingArg(SelectedCommand::full(schema, &[])));
        }

        let tokens = tokenize(rest)?;
        let matches = match_chains(schema, &tokens);
        Ok(select(schema, &matches))
    }
}
