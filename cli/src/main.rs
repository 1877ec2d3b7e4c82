mod cidr;
mod commands;
mod usage;

use switchset_core::{Outcome, SchemaPackage, SchemaRegistry, SelectedCommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::commands::{
    CIDR_COMMAND, HELP_COMMAND, VERSION_COMMAND, builtin_registry, normalize_builtin_flags,
    run_cidr, run_declared,
};
use crate::usage::{ProgramInfo, render_command_help, render_usage};

/// Log filter, e.g. `CIDRCALC_LOG=debug`.
const LOG_ENV: &str = "CIDRCALC_LOG";
/// Optional JSON/YAML schema package registered next to the built-in commands.
const SCHEMA_ENV: &str = "CIDRCALC_SCHEMA";
const DEFAULT_LOG_FILTER: &str = "warn";

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_USAGE: i32 = 2;

fn main() {
    init_tracing();

    let info = ProgramInfo::from_env();
    let argv: Vec<String> = std::env::args().skip(1).collect();

    let code = match run(&info, argv) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            EXIT_FAILURE
        }
    };
    std::process::exit(code);
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();
}

fn load_registry() -> Result<SchemaRegistry, String> {
    let mut registry = builtin_registry().map_err(|err| format!("invalid built-in schema: {err}"))?;

    if let Some(path) = std::env::var_os(SCHEMA_ENV) {
        let package = SchemaPackage::load(&path).map_err(|err| {
            format!(
                "Failed to load schema package '{}': {err}",
                path.to_string_lossy()
            )
        })?;
        debug!(
            path = %path.to_string_lossy(),
            commands = package.command_count(),
            "Loaded schema package"
        );
        package
            .register_into(&mut registry)
            .map_err(|err| format!("Failed to register schema package: {err}"))?;
    }

    Ok(registry)
}

fn run(info: &ProgramInfo, argv: Vec<String>) -> Result<i32, String> {
    let mut registry = load_registry()?;
    let argv = normalize_builtin_flags(argv);

    let outcome = registry.resolve(&argv).map_err(|err| err.to_string())?;
    match outcome {
        Outcome::Usage => {
            print!("{}", render_usage(info, &registry));
            Ok(EXIT_SUCCESS)
        }
        Outcome::MissingCommand(command) => {
            eprintln!("unknown command '{command}'");
            eprintln!();
            eprint!("{}", render_usage(info, &registry));
            Ok(EXIT_USAGE)
        }
        Outcome::MissingArg(selected) => {
            eprint!("{}", render_command_help(info, &selected));
            Ok(EXIT_USAGE)
        }
        Outcome::Success(selected) => execute(info, &registry, &selected),
    }
}

fn execute(
    info: &ProgramInfo,
    registry: &SchemaRegistry,
    selected: &SelectedCommand,
) -> Result<i32, String> {
    debug!(command = %selected.name, "Executing command");
    match selected.name.as_str() {
        CIDR_COMMAND => {
            let summary = run_cidr(selected).map_err(|err| err.to_string())?;
            print!("{summary}");
        }
        HELP_COMMAND => print!("{}", render_usage(info, registry)),
        VERSION_COMMAND => println!("{}", info.version_line()),
        _ => {
            let raw = run_declared(selected)
                .map_err(|err| format!("Failed to serialize resolved arguments: {err}"))?;
            println!("{raw}");
        }
    }
    Ok(EXIT_SUCCESS)
}
