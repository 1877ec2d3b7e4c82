use switchset_core::{
    CommandSchema, Outcome, ParseError, SchemaRegistry, SelectedCommand, SwitchConfig,
};

const CIDR_PATTERN: &str = r"^\d{1,3}(\.\d{1,3}){3}/\d{1,2}$";
const IP_PATTERN: &str = r"^\d{1,3}(\.\d{1,3}){3}$";

fn cidr_registry() -> SchemaRegistry {
    let mut cidr = CommandSchema::new("cidr", "Compute network details").unwrap();
    cidr.add_switch_set(
        SwitchConfig::new("cidr", ["-c", "--cidr"]).with_pattern("<a.b.c.d/n>", CIDR_PATTERN),
    )
    .unwrap();
    cidr.add_switch_set(SwitchConfig::new("ip", ["-i", "--ip"]).with_pattern("<a.b.c.d>", IP_PATTERN))
        .unwrap()
        .then(
            SwitchConfig::new("cb", ["-cb", "--cidr-bits"]).with_pattern("<n>", r"^\d{1,3}$"),
        )
        .unwrap();

    let mut registry = SchemaRegistry::new();
    registry.register(cidr).unwrap();
    registry
        .register(CommandSchema::new("version", "Print the version").unwrap())
        .unwrap();
    registry
}

fn expect_success(outcome: Outcome) -> SelectedCommand {
    match outcome {
        Outcome::Success(selected) => selected,
        other => panic!("expected success, got {other:?}"),
    }
}

fn expect_missing_arg(outcome: Outcome) -> SelectedCommand {
    match outcome {
        Outcome::MissingArg(selected) => selected,
        other => panic!("expected missing arg, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn combined_notation_resolves_single_node_chain() {
    let mut registry = cidr_registry();
    let selected = expect_success(registry.resolve(&["cidr", "-c", "10.0.0.0/24"]).unwrap());

    let chain = selected.chain().unwrap();
    assert_eq!(chain.name, "cidr");
    assert_eq!(chain.nodes[0].value, "10.0.0.0/24");
    assert_eq!(selected.value_of("cidr"), Some("10.0.0.0/24"));
}

#[test]
fn half_supplied_chain_reports_missing_arg() {
    let mut registry = cidr_registry();
    let selected = expect_missing_arg(registry.resolve(&["cidr", "-i", "10.0.0.0"]).unwrap());

    let chain = selected.chain().unwrap();
    assert_eq!(chain.name, "ip");
    assert_eq!(chain.nodes[0].value, "10.0.0.0");
    assert_eq!(chain.nodes[1].value, "");
    assert_eq!(chain.missing().len(), 1);
}

#[test]
fn unknown_command_is_reported_verbatim() {
    let mut registry = cidr_registry();
    assert_eq!(
        registry.resolve(&["bogus"]).unwrap(),
        Outcome::MissingCommand("bogus".to_string())
    );
}

#[test]
fn empty_argv_requests_usage() {
    let mut registry = cidr_registry();
    let argv: Vec<String> = Vec::new();
    assert_eq!(registry.resolve(&argv).unwrap(), Outcome::Usage);
}

#[test]
fn value_without_switch_is_a_parse_fault() {
    let mut registry = cidr_registry();
    let err = registry.resolve(&["cidr", "10.0.0.0/24"]).unwrap_err();
    assert_eq!(err, ParseError::NoKey("10.0.0.0/24".to_string()));
    assert_eq!(err.code(), "CMDARG_NOKEY");
}

#[test]
fn argless_command_succeeds_without_args_component() {
    let mut registry = cidr_registry();
    let selected = expect_success(registry.resolve(&["version"]).unwrap());
    assert_eq!(selected.name, "version");
    assert!(selected.chains.is_empty());
    assert!(selected.chain().is_none());
}

#[test]
fn command_without_tokens_carries_full_schema() {
    let mut registry = cidr_registry();
    let selected = expect_missing_arg(registry.resolve(&["cidr"]).unwrap());
    let names: Vec<&str> = selected.chains.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["cidr", "ip"]);
}

#[test]
fn two_separate_flags_resolve_second_chain() {
    let mut registry = cidr_registry();
    let selected = expect_success(
        registry
            .resolve(&["CIDR", "--ip", "192.168.1.7", "-cb", "26"])
            .unwrap(),
    );
    assert_eq!(selected.chain().unwrap().name, "ip");
    assert_eq!(selected.value_of("ip"), Some("192.168.1.7"));
    assert_eq!(selected.value_of("cb"), Some("26"));
}

#[test]
fn invalid_value_leaves_node_unset_and_is_reported() {
    let mut registry = cidr_registry();
    let selected = expect_missing_arg(registry.resolve(&["cidr", "-c", "not-a-cidr"]).unwrap());

    // Nothing matched, so every chain is in the snapshot.
    assert_eq!(selected.chains.len(), 2);
    let head = &selected.chains[0].nodes[0];
    assert_eq!(head.value, "");
    assert_eq!(head.rejected_value.as_deref(), Some("not-a-cidr"));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn head_gate_ignores_follow_on_flags() {
    let mut registry = cidr_registry();
    let selected = expect_missing_arg(registry.resolve(&["cidr", "-cb", "24"]).unwrap());

    assert_eq!(selected.chains.len(), 2);
    assert!(selected.chains.iter().all(|c| c.nodes.iter().all(|n| n.value.is_empty())));
}

#[test]
fn selection_is_deterministic() {
    let mut registry = cidr_registry();
    let argv = ["cidr", "-c", "10.0.0.0/8", "-i", "10.0.0.1", "-cb", "8"];

    let first = registry.resolve(&argv).unwrap();
    for _ in 0..10 {
        assert_eq!(registry.resolve(&argv).unwrap(), first);
    }
    assert_eq!(expect_success(first).chain().unwrap().name, "cidr");
}

#[test]
fn equal_length_complete_chains_go_to_first_registered() {
    let mut schema = CommandSchema::new("pick", "").unwrap();
    schema.add_switch_set(SwitchConfig::new("first", ["-a"])).unwrap();
    schema.add_switch_set(SwitchConfig::new("second", ["-b"])).unwrap();
    let mut registry = SchemaRegistry::new();
    registry.register(schema).unwrap();

    let selected = expect_success(registry.resolve(&["pick", "-b", "1", "-a", "2"]).unwrap());
    assert_eq!(selected.chain().unwrap().name, "first");
}

#[test]
fn shorter_incomplete_chain_wins_over_longer_one() {
    let mut schema = CommandSchema::new("pick", "").unwrap();
    schema
        .add_switch_set(SwitchConfig::new("long", ["-a"]))
        .unwrap()
        .then(SwitchConfig::new("b", ["-b"]))
        .unwrap()
        .then(SwitchConfig::new("c", ["-c"]))
        .unwrap();
    schema
        .add_switch_set(SwitchConfig::new("short", ["-x"]))
        .unwrap()
        .then(SwitchConfig::new("y", ["-y"]))
        .unwrap();
    let mut registry = SchemaRegistry::new();
    registry.register(schema).unwrap();

    let selected =
        expect_missing_arg(registry.resolve(&["pick", "-a", "1", "-b", "2", "-x", "3"]).unwrap());
    assert_eq!(selected.chain().unwrap().name, "short");
}

#[test]
fn snapshot_is_independent_of_later_parses() {
    let mut registry = cidr_registry();
    let snapshot = expect_success(registry.resolve(&["cidr", "-c", "10.0.0.0/24"]).unwrap());

    let _ = registry.resolve(&["cidr", "-c", "172.16.0.0/12"]).unwrap();
    assert_eq!(snapshot.value_of("cidr"), Some("10.0.0.0/24"));
}

#[test]
fn synonym_spellings_fill_the_same_node() {
    let mut registry = cidr_registry();
    let selected = expect_success(
        registry
            .resolve(&["cidr", "-i", "10.1.2.3", "--cidr-bits", "16"])
            .unwrap(),
    );
    assert_eq!(selected.value_of("cb"), Some("16"));
}
