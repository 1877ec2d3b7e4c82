//! Built-in commands and their handlers.

use switchset_core::{CommandSchema, ConfigError, SchemaRegistry, SelectedCommand, SwitchConfig};
use tracing::debug;

use crate::cidr::{CidrBlock, CidrError};

/// Pattern for `<address>/<prefix>`; the address itself is checked by [`CidrBlock`].
const CIDR_PATTERN: &str = r"^[0-9A-Fa-f:.]+/\d{1,3}$";
const IP_PATTERN: &str = r"^[0-9A-Fa-f:.]+$";
const PREFIX_PATTERN: &str = r"^\d{1,3}$";

pub const CIDR_COMMAND: &str = "cidr";
pub const HELP_COMMAND: &str = "help";
pub const VERSION_COMMAND: &str = "version";

/// Builds the registry of built-in commands.
pub fn builtin_registry() -> Result<SchemaRegistry, ConfigError> {
    let mut cidr = CommandSchema::new(CIDR_COMMAND, "Compute network details for a CIDR block.")?;
    cidr.add_switch_set(
        SwitchConfig::new("cidr", ["-c", "--cidr"])
            .with_description("Network in CIDR notation")
            .with_pattern("<a.b.c.d/n>", CIDR_PATTERN),
    )?;
    cidr.add_switch_set(
        SwitchConfig::new("ip", ["-i", "--ip"])
            .with_description("IP address")
            .with_pattern("<a.b.c.d>", IP_PATTERN),
    )?
    .then(
        SwitchConfig::new("cb", ["-cb", "--cidr-bits"])
            .with_description("Prefix length in bits")
            .with_pattern("<n>", PREFIX_PATTERN),
    )?;

    let mut registry = SchemaRegistry::new();
    registry.register(cidr)?;
    registry.register(CommandSchema::new(HELP_COMMAND, "Print this usage information.")?)?;
    registry.register(CommandSchema::new(VERSION_COMMAND, "Print the program version.")?)?;
    Ok(registry)
}

/// Maps the conventional help/version flags onto the matching commands.
pub fn normalize_builtin_flags(mut argv: Vec<String>) -> Vec<String> {
    if let Some(first) = argv.first_mut() {
        match first.as_str() {
            "-h" | "--help" => *first = HELP_COMMAND.to_string(),
            "-V" | "--version" => *first = VERSION_COMMAND.to_string(),
            _ => {}
        }
    }
    argv
}

/// Runs the `cidr` command on a resolved snapshot.
///
/// Accepts either alternative: the combined `cidr` value, or `ip` plus
/// `cb`.
pub fn run_cidr(selected: &SelectedCommand) -> Result<String, CidrError> {
    let block = match (
        selected.value_of("cidr"),
        selected.value_of("ip"),
        selected.value_of("cb"),
    ) {
        (Some(notation), _, _) => CidrBlock::parse(notation)?,
        (None, Some(ip), Some(bits)) => CidrBlock::from_parts(ip, bits)?,
        _ => return Err(CidrError::NoBlock),
    };

    debug!(block = %block, "Computing network details");
    Ok(block.summarize().to_string())
}

/// Handler for commands declared in an external schema package: prints the
/// resolved snapshot as JSON.
pub fn run_declared(selected: &SelectedCommand) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(selected)
}
