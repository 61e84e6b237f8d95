//! DeepCoder CLI entry point.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use deepcoder_ir::{Catalog, Program, Value, Vocabulary};
use deepcoder_runtime::{ConfigError, Interpreter, ProgramState, RunConfig};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "deepcoder")]
#[command(about = "Run and inspect DeepCoder list DSL programs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program on a set of inputs
    Run {
        /// Program text (or - for stdin)
        program: String,

        /// Inputs as a JSON array, e.g. '[[3, 2], 1]'
        #[arg(short, long, default_value = "[]")]
        inputs: String,

        /// Modulus for arithmetic lambdas (0 disables it)
        #[arg(short, long)]
        modulo: Option<u32>,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the final state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse a program and print it in canonical form
    Check {
        /// Program text (or - for stdin)
        program: String,
    },

    /// Print the operation and lambda catalog
    Catalog {
        #[arg(short, long, value_enum, default_value_t = Format::Toml)]
        format: Format,
    },

    /// Print the token vocabulary
    Vocab {
        /// Number of variable tokens to include
        #[arg(long, default_value_t = deepcoder_ir::vocab::DEFAULT_MAX_VARIABLES)]
        max_variables: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Toml,
    Json,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("deepcoder=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            program,
            inputs,
            modulo,
            config,
            json,
        } => {
            let program: Program = read_source(&program)?.parse()?;
            let inputs = parse_inputs(&inputs)?;
            let config = resolve_config(config.as_deref(), modulo)?;
            debug!(?config, "resolved configuration");

            let state = Interpreter::new(config).run_program(&program, inputs)?;
            if state.is_none() {
                info!("program produced no result");
            }
            println!("{}", render_state(state.as_ref(), json)?);
        }

        Commands::Check { program } => {
            let program: Program = read_source(&program)?.parse()?;
            println!("{}", program);
        }

        Commands::Catalog { format } => {
            let catalog = Catalog::builtin();
            let output = match format {
                Format::Toml => catalog.to_toml_string()?,
                Format::Json => catalog.to_json_string()?,
            };
            println!("{}", output);
        }

        Commands::Vocab { max_variables } => {
            let vocab = Vocabulary::new(max_variables);
            for (id, token) in vocab.tokens().iter().enumerate() {
                println!("{}\t{}", id, token);
            }
        }
    }

    Ok(())
}

fn read_source(arg: &str) -> std::io::Result<String> {
    if arg == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(arg.to_string())
    }
}

fn parse_inputs(json: &str) -> Result<Vec<Value>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Defaults, then the config file, then the `--modulo` flag.
fn resolve_config(path: Option<&Path>, modulo: Option<u32>) -> Result<RunConfig, ConfigError> {
    let mut config = match path {
        Some(path) => RunConfig::from_file(path)?,
        None => RunConfig::default(),
    };
    if let Some(modulo) = modulo {
        config.modulo = modulo;
    }
    Ok(config)
}

fn render_state(state: Option<&ProgramState>, json: bool) -> Result<String, serde_json::Error> {
    match (state, json) {
        (Some(state), true) => serde_json::to_string(state.values()),
        (None, true) => Ok("null".to_string()),
        (Some(state), false) => Ok(state.to_string()),
        (None, false) => Ok("no result".to_string()),
    }
}
