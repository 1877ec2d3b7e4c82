//! Matching switch-set chains against tokenized arguments and selecting the
//! winning alternative.
//!
//! Resolution of one command runs in two steps:
//!
//! 1. [`match_chains`] walks every chain of the command against the token
//!    map, storing validated values on the nodes and counting how many
//!    nodes of each chain hold a value.
//! 2. [`select`] picks the winning chain among those that matched and
//!    turns the result into an [`Outcome`].

use tracing::debug;

use crate::snapshot::SelectedCommand;
use crate::tokenize::TokenMap;
use crate::types::{CommandSchema, SwitchSetNode};

/// Result of resolving an argument list against a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No arguments were given; the caller should print program usage.
    Usage,
    /// The first argument names no registered command.
    MissingCommand(String),
    /// The command was recognized but no switch set was fully supplied.
    MissingArg(SelectedCommand),
    /// The command was recognized and, if it takes arguments, exactly one
    /// switch set was fully supplied.
    Success(SelectedCommand),
}

impl Outcome {
    /// Returns `true` for [`Outcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Snapshot carried by the outcome, if any.
    pub fn selected(&self) -> Option<&SelectedCommand> {
        match self {
            Self::MissingArg(selected) | Self::Success(selected) => Some(selected),
            Self::Usage | Self::MissingCommand(_) => None,
        }
    }
}

/// Match bookkeeping for one chain, indexed by its position in the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainMatch {
    /// Position of the chain in registration order.
    pub index: usize,
    /// Number of nodes in the chain.
    pub total_nodes: usize,
    /// Number of nodes holding a value after matching.
    pub matched_nodes: usize,
    /// `(node index, value)` pairs supplied on the command line but rejected
    /// by the node's pattern.
    pub rejected: Vec<(usize, String)>,
}

impl ChainMatch {
    /// Returns `true` if every node of the chain holds a value.
    pub fn is_complete(&self) -> bool {
        self.matched_nodes == self.total_nodes
    }
}

/// Applies the token map to one node and reports whether it now holds a
/// value.
///
/// Every spelling with a non-empty value is offered to the node in sorted
/// order. A node that already holds a default counts as matched even when
/// no token supplied a fresh value.
fn match_node(node: &mut SwitchSetNode, tokens: &TokenMap, rejected: &mut Vec<String>) -> bool {
    let supplied: Vec<(String, String)> = node
        .switches()
        .iter()
        .filter_map(|s| {
            tokens
                .get(s)
                .filter(|v| !v.is_empty())
                .map(|v| (s.clone(), v.clone()))
        })
        .collect();

    for (switch, value) in supplied {
        if !node.set_value(&value) {
            debug!(node = node.name(), switch = %switch, value = %value, "Rejected switch value");
            rejected.push(value);
        }
    }

    node.is_matched()
}

/// Walks every chain of `schema` against `tokens`.
///
/// A chain whose head does not match is recorded with `matched_nodes == 0`
/// and its remaining nodes are not evaluated, even if their switches appear
/// in the token map. Node values are not reset here; the caller decides
/// when a parse starts.
pub fn match_chains(schema: &mut CommandSchema, tokens: &TokenMap) -> Vec<ChainMatch> {
    let mut matches = Vec::with_capacity(schema.chains().len());

    for (index, chain) in schema.chains_mut().iter_mut().enumerate() {
        let nodes = chain.nodes_mut();
        let total_nodes = nodes.len();
        let mut matched_nodes = 0;
        let mut rejected = Vec::new();

        for (position, node) in nodes.iter_mut().enumerate() {
            let mut node_rejected = Vec::new();
            let matched = match_node(node, tokens, &mut node_rejected);
            rejected.extend(node_rejected.into_iter().map(|v| (position, v)));

            if matched {
                matched_nodes += 1;
            } else if position == 0 {
                break;
            }
        }

        debug!(
            chain = index,
            total = total_nodes,
            matched = matched_nodes,
            "Matched switch set chain"
        );
        matches.push(ChainMatch {
            index,
            total_nodes,
            matched_nodes,
            rejected,
        });
    }

    matches
}

/// Chooses the winning chain and builds the outcome.
///
/// Among chains with at least one matched node the shortest wins; equal
/// lengths go to the chain registered first. A complete winner yields
/// [`Outcome::Success`] with a snapshot of that chain alone. An incomplete
/// winner yields [`Outcome::MissingArg`] with a snapshot of that chain, and
/// when nothing matched at all the snapshot includes every chain.
pub fn select(schema: &CommandSchema, matches: &[ChainMatch]) -> Outcome {
    let winner = matches
        .iter()
        .filter(|m| m.matched_nodes > 0)
        .min_by_key(|m| (m.total_nodes, m.index));

    let Some(winner) = winner else {
        debug!(command = schema.name(), "No switch set matched");
        let rejected: Vec<Vec<(usize, String)>> =
            matches.iter().map(|m| m.rejected.clone()).collect();
        return Outcome::MissingArg(SelectedCommand::full(schema, &rejected));
    };

    let selected = SelectedCommand::single(schema, winner.index, &winner.rejected);
    debug!(
        command = schema.name(),
        chain = %selected.chains[0].name,
        complete = winner.is_complete(),
        "Selected switch set"
    );

    if winner.is_complete() {
        Outcome::Success(selected)
    } else {
        Outcome::MissingArg(selected)
    }
}
