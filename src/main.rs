//! asset-xref CLI
//!
//! Entry point for the `asset-xref` command-line tool.

use actor_param::ActorRecord;
use asset_xref::config::{EffectiveConfig, ExtractSettings, DEFAULT_CONFIG_FILE};
use asset_xref::{run_batch, write_output};
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "asset-xref")]
#[command(about = "Extract actor drop tables from an unpacked asset pack", version)]
struct Cli {
    /// Log resolution steps (same as RUST_LOG=debug)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that reads the pack
#[derive(clap::Args)]
struct PackArgs {
    /// Path to config file (default: ./asset-xref.toml)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Root of the unpacked pack
    #[arg(long)]
    pack: Option<PathBuf>,

    /// Shared fallback root
    #[arg(long)]
    shared: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble the drop tables of every actor and write them to one file
    Drops {
        #[command(flatten)]
        pack: PackArgs,

        /// Output file (default: drop_tables.json)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Keep reference lists and parent references in the output
        #[arg(long)]
        no_clean: bool,

        /// Skip actors with malformed documents instead of failing
        #[arg(long)]
        keep_going: bool,

        /// Only process actors matching these globs (repeatable)
        #[arg(long = "actor", short = 'a')]
        actors: Vec<String>,

        /// Write a JSON run report to this file
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Print one actor's resolved parameter document
    Actor {
        /// Actor name (directory under the actor root)
        name: String,

        #[command(flatten)]
        pack: PackArgs,

        /// Components to resolve (repeatable, default: DropRef)
        #[arg(long = "component")]
        components: Vec<String>,
    },

    /// Show the effective configuration
    Config {
        /// Path to config file (default: ./asset-xref.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Drops {
            pack,
            output,
            no_clean,
            keep_going,
            actors,
            report,
        } => {
            let mut overrides = pack_overrides(&pack);
            if let Some(output) = output {
                overrides.insert("output".into(), path_value(&output));
            }
            if no_clean {
                overrides.insert("clean".into(), Value::Bool(false));
            }
            if keep_going {
                overrides.insert("keep_going".into(), Value::Bool(true));
            }
            if !actors.is_empty() {
                overrides.insert("actors".into(), Value::from(actors));
            }
            let settings = load_settings(pack.config, overrides);
            run_drops(&settings, report);
        }
        Commands::Actor {
            name,
            pack,
            components,
        } => {
            let overrides = pack_overrides(&pack);
            let settings = load_settings(pack.config, overrides);
            run_actor(&settings, &name, components);
        }
        Commands::Config { config, json } => {
            run_config(config, json);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn path_value(path: &std::path::Path) -> Value {
    Value::String(path.to_string_lossy().to_string())
}

fn pack_overrides(args: &PackArgs) -> Map<String, Value> {
    let mut overrides = Map::new();
    if let Some(ref pack) = args.pack {
        overrides.insert("pack_root".into(), path_value(pack));
    }
    if let Some(ref shared) = args.shared {
        overrides.insert("shared_root".into(), path_value(shared));
    }
    overrides
}

fn build_config(config_path: Option<PathBuf>, overrides: Option<Value>) -> EffectiveConfig {
    let path = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    match EffectiveConfig::build(Some(&path), overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    }
}

fn load_settings(config_path: Option<PathBuf>, overrides: Map<String, Value>) -> ExtractSettings {
    let overrides = (!overrides.is_empty()).then_some(Value::Object(overrides));
    match build_config(config_path, overrides).settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    }
}

fn run_drops(settings: &ExtractSettings, report_path: Option<PathBuf>) {
    let outcome = match run_batch(settings) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    println!("saving to {}", settings.output.display());
    if let Err(e) = write_output(&settings.output, &outcome.tables) {
        eprintln!("Error writing {}: {}", settings.output.display(), e);
        process::exit(1);
    }

    if let Some(path) = report_path {
        if let Err(e) = outcome.report.write_to_file(&path) {
            eprintln!("Error writing report {}: {}", path.display(), e);
            process::exit(1);
        }
    }

    println!("{}", outcome.report.summary_line());
}

fn run_actor(settings: &ExtractSettings, name: &str, components: Vec<String>) {
    let components = if components.is_empty() {
        vec![asset_xref::drops::DROP_REF_COMPONENT.to_string()]
    } else {
        components
    };

    let work_root = settings.actor_root().join(name);
    let param_path = settings.actor_param_path(&work_root, name);
    if !param_path.is_file() {
        eprintln!("Actor '{}' has no parameter file at {}", name, param_path.display());
        process::exit(1);
    }

    let loader = settings.loader_for(&work_root);
    let mut record = match ActorRecord::load(&loader, &param_path) {
        Ok(record) => record,
        Err(e) => {
            eprintln!("Error loading actor '{}': {}", name, e);
            process::exit(1);
        }
    };

    for component in &components {
        match record.read_component(component) {
            Ok(true) => {}
            Ok(false) => tracing::warn!(actor = name, component = %component, "component not present"),
            Err(e) => {
                eprintln!("Error reading component '{}' of '{}': {}", component, name, e);
                process::exit(1);
            }
        }
    }

    match serde_json::to_string_pretty(&record.to_document()) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

fn run_config(config_path: Option<PathBuf>, json_output: bool) {
    let config = build_config(config_path, None);

    if json_output {
        match config.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    println!("Effective configuration:");
    println!();
    for source in &config.sources {
        match (&source.path, &source.digest) {
            (Some(path), Some(digest)) => {
                println!("  Source: {:?} {} (sha256 {})", source.origin, path, digest)
            }
            _ => println!("  Source: {:?}", source.origin),
        }
    }
    println!();
    match serde_json::to_string_pretty(&config.config) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}
