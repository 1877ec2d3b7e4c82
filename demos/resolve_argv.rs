//! Programmatic schema construction and resolution.
//!
//! Declares a `cidr` command with two alternatives (combined notation, or
//! address plus prefix length) and resolves whatever arguments are passed to
//! the example.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p switchset-demos --example resolve_argv -- cidr -c 10.0.0.0/24
//! cargo run -p switchset-demos --example resolve_argv -- cidr -i 10.0.0.0
//! ```

use switchset_core::{CommandSchema, Outcome, SchemaRegistry, SwitchConfig};

fn build_registry() -> Result<SchemaRegistry, switchset_core::ConfigError> {
    let mut cidr = CommandSchema::new("cidr", "Compute network details for a CIDR block.")?;
    cidr.add_switch_set(
        SwitchConfig::new("cidr", ["-c", "--cidr"])
            .with_description("Network in CIDR notation")
            .with_pattern("<a.b.c.d/n>", r"^\d{1,3}(\.\d{1,3}){3}/\d{1,2}$"),
    )?;
    cidr.add_switch_set(
        SwitchConfig::new("ip", ["-i", "--ip"])
            .with_description("IP address")
            .with_pattern("<a.b.c.d>", r"^\d{1,3}(\.\d{1,3}){3}$"),
    )?
    .then(
        SwitchConfig::new("cb", ["-cb", "--cidr-bits"])
            .with_description("Prefix length in bits")
            .with_pattern("<n>", r"^\d{1,2}$"),
    )?;

    let mut registry = SchemaRegistry::new();
    registry.register(cidr)?;
    registry.register(CommandSchema::new("version", "Print the version.")?)?;
    Ok(registry)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = build_registry()?;
    let argv: Vec<String> = std::env::args().skip(1).collect();

    match registry.resolve(&argv)? {
        Outcome::Usage => {
            println!("Commands: {}", registry.command_names().join(", "));
        }
        Outcome::MissingCommand(command) => {
            println!("Unknown command: {command}");
        }
        Outcome::MissingArg(selected) => {
            println!("Incomplete arguments for '{}':", selected.name);
            for chain in &selected.chains {
                let missing: Vec<&str> = chain.missing().iter().map(|n| n.name.as_str()).collect();
                println!("  {} still needs: {}", chain.name, missing.join(", "));
            }
        }
        Outcome::Success(selected) => {
            println!("{}", serde_json::to_string_pretty(&selected)?);
        }
    }

    Ok(())
}
