//! Read-only snapshots handed to command handlers after resolution.
//!
//! Snapshots are plain owned data copied out of the registry. They never
//! change once taken, even if the registry resolves another argument list.

use serde::Serialize;

use crate::types::{CommandSchema, SwitchSetChain, SwitchSetNode};

/// Resolved state of one switch-set node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedSwitch {
    /// Node identifier.
    pub name: String,
    /// Accepted switch spellings, sorted.
    pub switches: Vec<String>,
    /// Description for help output.
    pub description: String,
    /// Human-readable form of the expected value.
    pub value_pattern_text: String,
    /// Final value (empty when the node was not supplied).
    pub value: String,
    /// Value supplied on the command line that failed validation.
    ///
    /// Only reported for nodes left without a value; a rejection is dropped
    /// once another spelling of the node supplied a valid value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_value: Option<String>,
}

impl SelectedSwitch {
    pub(crate) fn from_node(node: &SwitchSetNode, rejected_value: Option<String>) -> Self {
        Self {
            name: node.name().to_string(),
            switches: node.switches().to_vec(),
            description: node.description().to_string(),
            value_pattern_text: node.value_pattern_text().to_string(),
            value: node.value().to_string(),
            rejected_value,
        }
    }

    /// Returns `true` if the node holds a value.
    pub fn is_set(&self) -> bool {
        !self.value.is_empty()
    }
}

/// Resolved state of one switch-set chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedChain {
    /// Chain name (the head node's name).
    pub name: String,
    /// Nodes, head first.
    pub nodes: Vec<SelectedSwitch>,
}

impl SelectedChain {
    pub(crate) fn from_chain(chain: &SwitchSetChain, rejected: &[(usize, String)]) -> Self {
        let nodes = chain
            .nodes()
            .iter()
            .enumerate()
            .map(|(i, node)| {
                let rejected_value = rejected
                    .iter()
                    .rev()
                    .find(|(index, _)| *index == i && !node.is_matched())
                    .map(|(_, value)| value.clone());
                SelectedSwitch::from_node(node, rejected_value)
            })
            .collect();
        Self {
            name: chain.name().to_string(),
            nodes,
        }
    }

    /// Finds a node by name.
    pub fn node(&self, name: &str) -> Option<&SelectedSwitch> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Nodes that are still without a value.
    pub fn missing(&self) -> Vec<&SelectedSwitch> {
        self.nodes.iter().filter(|n| !n.is_set()).collect()
    }

    /// Returns `true` if every node holds a value.
    pub fn is_complete(&self) -> bool {
        self.nodes.iter().all(SelectedSwitch::is_set)
    }
}

/// Immutable copy of a matched command and the chains relevant to the
/// outcome.
///
/// After a successful resolution `chains` holds exactly the winning chain.
/// For an incomplete resolution it holds either the partially matched chain
/// or, when nothing matched at all, every chain of the command. Commands
/// without switch sets produce an empty `chains` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedCommand {
    /// Lower-cased command name.
    pub name: String,
    /// Command description.
    pub description: String,
    /// Chains included in this snapshot.
    pub chains: Vec<SelectedChain>,
}

impl SelectedCommand {
    /// Snapshot of the command with every chain included.
    ///
    /// `rejected[i]` lists the rejected values of chain `i`; missing entries
    /// mean none.
    pub(crate) fn full(schema: &CommandSchema, rejected: &[Vec<(usize, String)>]) -> Self {
        Self {
            name: schema.name().to_string(),
            description: schema.description().to_string(),
            chains: schema
                .chains()
                .iter()
                .enumerate()
                .map(|(i, chain)| {
                    let rejected = rejected.get(i).map(Vec::as_slice).unwrap_or_default();
                    SelectedChain::from_chain(chain, rejected)
                })
                .collect(),
        }
    }

    /// Snapshot of the command restricted to one chain.
    pub(crate) fn single(
        schema: &CommandSchema,
        index: usize,
        rejected: &[(usize, String)],
    ) -> Self {
        Self {
            name: schema.name().to_string(),
            description: schema.description().to_string(),
            chains: vec![SelectedChain::from_chain(&schema.chains()[index], rejected)],
        }
    }

    /// The single surviving chain, if the snapshot holds exactly one.
    pub fn chain(&self) -> Option<&SelectedChain> {
        match self.chains.as_slice() {
            [chain] => Some(chain),
            _ => None,
        }
    }

    /// Value of the named node in the single surviving chain.
    ///
    /// Returns `None` when there is no single chain, no such node, or the
    /// node has no value.
    pub fn value_of(&self, node: &str) -> Option<&str> {
        self.chain()?
            .node(node)
            .filter(|n| n.is_set())
            .map(|n| n.value.as_str())
    }
}

impl From<&CommandSchema> for SelectedCommand {
    /// Snapshot of every chain with the nodes' current values, for usage
    /// display.
    fn from(schema: &CommandSchema) -> Self {
        Self::full(schema, &[])
    }
}
