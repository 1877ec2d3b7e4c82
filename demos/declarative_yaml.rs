//! Declaring a registry in YAML.
//!
//! Builds the same kind of registry as `resolve_argv`, but from a
//! [`SchemaPackage`] document, then resolves a few fixed argument lists and
//! prints the outcome of each.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p switchset-demos --example declarative_yaml
//! ```

use switchset_core::{Outcome, SchemaPackage};

const PACKAGE: &str = r#"
version: "1.0"
name: demo
commands:
  - name: cidr
    description: Compute network details for a CIDR block.
    switch_sets:
      - - name: cidr
          switches: ["-c", "--cidr"]
          value_pattern_text: "<a.b.c.d/n>"
          value_pattern: '^\d{1,3}(\.\d{1,3}){3}/\d{1,2}$'
      - - name: ip
          switches: ["-i", "--ip"]
          value_pattern_text: "<a.b.c.d>"
          value_pattern: '^\d{1,3}(\.\d{1,3}){3}$'
        - name: cb
          switches: ["-cb", "--cidr-bits"]
          value_pattern_text: "<n>"
          value_pattern: '^\d{1,2}$'
  - name: version
    description: Print the version.
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = SchemaPackage::from_yaml_str(PACKAGE)?.into_registry()?;

    let samples: [&[&str]; 5] = [
        &[],
        &["bogus"],
        &["cidr", "-c", "10.0.0.0/24"],
        &["cidr", "--ip", "192.168.1.1"],
        &["version"],
    ];

    for argv in samples {
        let outcome = registry.resolve(argv)?;
        let summary = match &outcome {
            Outcome::Usage => "usage".to_string(),
            Outcome::MissingCommand(command) => format!("missing command '{command}'"),
            Outcome::MissingArg(selected) => format!(
                "missing arguments ({} candidate chain(s))",
                selected.chains.len()
            ),
            Outcome::Success(selected) => match selected.chain() {
                Some(chain) => format!("success via '{}'", chain.name),
                None => "success".to_string(),
            },
        };
        println!("{:<40} -> {summary}", format!("{argv:?}"));
    }

    Ok(())
}
