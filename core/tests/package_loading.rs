use std::fs;

use switchset_core::{ConfigError, Outcome, PackageError, SchemaPackage};

const PACKAGE_YAML: &str = r#"
version: "1.0"
name: cidr-tools
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
        - name: cb
          switches: ["-cb", "--cidr-bits"]
          value_pattern: '^\d{1,3}$'
          default_value: "24"
  - name: version
    description: Print the program version.
"#;

#[test]
fn yaml_package_loads_from_disk_and_resolves() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schema.yaml");
    fs::write(&path, PACKAGE_YAML).unwrap();

    let package = SchemaPackage::load(&path).unwrap();
    assert_eq!(package.name.as_deref(), Some("cidr-tools"));

    let mut registry = package.into_registry().unwrap();

    // The default on `cb` completes the chain once `-i` is supplied.
    let outcome = registry.resolve(&["cidr", "-i", "10.0.0.0"]).unwrap();
    let Outcome::Success(selected) = outcome else {
        panic!("expected success, got {outcome:?}");
    };
    assert_eq!(selected.value_of("cb"), Some("24"));
}

#[test]
fn json_package_loads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let yaml_package = SchemaPackage::from_yaml_str(PACKAGE_YAML).unwrap();
    let path = dir.path().join("schema.json");
    fs::write(&path, yaml_package.to_json_pretty().unwrap()).unwrap();

    let package = SchemaPackage::load(&path).unwrap();
    assert_eq!(package, yaml_package);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SchemaPackage::load(dir.path().join("absent.yml")).unwrap_err();
    assert!(matches!(err, PackageError::IoError(_)));
}

#[test]
fn malformed_json_is_a_json_error() {
    let err = SchemaPackage::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, PackageError::JsonError(_)));
}

#[test]
fn duplicate_commands_are_rejected() {
    let yaml = "version: '1'\ncommands:\n  - name: a\n  - name: A\n";
    let err = SchemaPackage::from_yaml_str(yaml)
        .unwrap()
        .into_registry()
        .unwrap_err();
    assert!(matches!(
        err,
        PackageError::ConfigError(ConfigError::DuplicateCommand(ref name)) if name == "a"
    ));
}

#[test]
fn invalid_default_is_rejected() {
    let yaml = r#"
version: "1"
commands:
  - name: cmd
    switch_sets:
      - - name: n
          switches: ["-n"]
          value_pattern: '^\d+$'
          default_value: "many"
"#;
    let err = SchemaPackage::from_yaml_str(yaml)
        .unwrap()
        .into_registry()
        .unwrap_err();
    assert!(matches!(
        err,
        PackageError::ConfigError(ConfigError::InvalidDefault { .. })
    ));
}
