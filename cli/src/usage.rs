//! Usage and help text rendering.

use switchset_core::{SchemaRegistry, SelectedChain, SelectedCommand, SelectedSwitch};

/// Program metadata shown in usage output.
///
/// Built once at startup and passed to every renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInfo {
    pub name: String,
    pub version: String,
    pub description: String,
}

impl ProgramInfo {
    /// Metadata of this binary, taken from the package manifest.
    pub fn from_env() -> Self {
        Self {
            name: env!("CARGO_BIN_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: env!("CARGO_PKG_DESCRIPTION").to_string(),
        }
    }

    /// `<name> <version>` line.
    pub fn version_line(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}

/// Full program usage: every command with every switch-set alternative.
pub fn render_usage(info: &ProgramInfo, registry: &SchemaRegistry) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", info.version_line()));
    if !info.description.is_empty() {
        out.push_str(&format!("{}\n", info.description));
    }
    out.push('\n');
    out.push_str(&format!("Usage: {} <command> [switches]\n", info.name));
    out.push('\n');
    out.push_str("Commands:\n");

    let width = registry
        .commands()
        .iter()
        .map(|c| c.name().len())
        .max()
        .unwrap_or(0)
        + 2;

    for schema in registry.commands() {
        let selected = SelectedCommand::from(schema);
        out.push_str(&format!("  {:<width$}{}\n", selected.name, selected.description));
        for chain in &selected.chains {
            out.push_str(&format!(
                "  {:<width$}{}\n",
                "",
                synopsis(&info.name, &selected.name, chain)
            ));
        }
    }

    out
}

/// Help for a recognized command whose switch sets were not fully supplied.
///
/// Every chain in the snapshot is listed with its switches; nodes still
/// without a value are marked, and rejected values are explained.
pub fn render_command_help(info: &ProgramInfo, selected: &SelectedCommand) -> String {
    let mut out = String::new();
    match selected.chain() {
        Some(chain) if chain.nodes.iter().any(SelectedSwitch::is_set) => {
            let missing: Vec<String> = chain.missing().iter().map(|n| display_switches(n)).collect();
            out.push_str(&format!(
                "Missing arguments for '{}': {}\n",
                selected.name,
                missing.join(", ")
            ));
        }
        _ => {
            out.push_str(&format!("Missing arguments for '{}'.\n", selected.name));
        }
    }
    if !selected.description.is_empty() {
        out.push_str(&format!("{}\n", selected.description));
    }

    for (i, chain) in selected.chains.iter().enumerate() {
        out.push('\n');
        if selected.chains.len() > 1 {
            out.push_str(&format!("Alternative {}:\n", i + 1));
        }
        out.push_str(&format!("  {}\n", synopsis(&info.name, &selected.name, chain)));
        for node in &chain.nodes {
            out.push_str(&format!("    {}\n", node_line(node)));
        }
    }

    out
}

/// One-line invocation form of a chain, e.g. `prog cidr -c|--cidr <a.b.c.d/n>`.
pub fn synopsis(program: &str, command: &str, chain: &SelectedChain) -> String {
    let mut line = format!("{program} {command}");
    for node in &chain.nodes {
        line.push_str(&format!(" {} {}", node.switches.join("|"), node.value_pattern_text));
    }
    line
}

fn display_switches(node: &SelectedSwitch) -> String {
    node.switches.join("|")
}

fn node_line(node: &SelectedSwitch) -> String {
    let head = format!("{} {}", node.switches.join(", "), node.value_pattern_text);
    let mut line = format!("{head:<32}{}", node.description);
    if let Some(rejected) = &node.rejected_value {
        line.push_str(&format!("  (invalid value '{rejected}')"));
    } else if node.is_set() {
        line.push_str(&format!("  [{}]", node.value));
    } else {
        line.push_str("  (missing)");
    }
    line.trim_end().to_string()
}
