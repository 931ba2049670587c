//! # Wirestub CLI Entry Point
//!
//! Main binary for the wirestub stub generator. Reads a JSON service
//! contract and writes one generated artifact per invocation.
//!
//! ## Usage
//!
//! ```bash
//! # Generate the client stub module (writes rpc_client.rs)
//! wirestub client contract.json
//!
//! # Generate the server dispatcher binary (writes rpc_server.rs)
//! wirestub server contract.json
//! ```
//!
//! Each subcommand takes exactly one positional argument, the contract
//! file path, and writes to its fixed output filename in the current
//! directory. Read, validation, and write failures print a message and
//! exit non-zero.

use anyhow::{Context, Result};
use argh::FromArgs;
use std::path::PathBuf;

use wirestub_codegen::{emit_client, emit_server, Contract};

/// Fixed output filename of the client role.
const CLIENT_OUTPUT: &str = "rpc_client.rs";
/// Fixed output filename of the server role.
const SERVER_OUTPUT: &str = "rpc_server.rs";

/// Main CLI structure parsed from command-line arguments.
///
/// Uses `argh` for declarative argument parsing. The top-level command
/// dispatches to one of the two emitter roles.
#[derive(FromArgs)]
/// wirestub - contract-driven RPC stub generator
struct Cli {
    #[argh(subcommand)]
    command: Commands,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Commands {
    Client(ClientArgs),
    Server(ServerArgs),
}

/// Arguments for generating the client stub module.
#[derive(FromArgs)]
#[argh(subcommand, name = "client")]
/// generate the client stub module from a contract
struct ClientArgs {
    /// path to the JSON contract file
    #[argh(positional)]
    contract: PathBuf,
}

/// Arguments for generating the server dispatcher binary.
#[derive(FromArgs)]
#[argh(subcommand, name = "server")]
/// generate the server dispatcher from a contract
struct ServerArgs {
    /// path to the JSON contract file
    #[argh(positional)]
    contract: PathBuf,
}

fn main() -> Result<()> {
    let cli: Cli = argh::from_env();

    // Set default log level to INFO, but allow RUST_LOG env var to override
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Client(args) => generate(&args.contract, emit_client, CLIENT_OUTPUT, "client"),
        Commands::Server(args) => generate(&args.contract, emit_server, SERVER_OUTPUT, "server"),
    }
}

/// Loads the contract, runs one emitter role, and writes its artifact.
fn generate(
    contract_path: &PathBuf,
    emit: fn(&Contract) -> std::result::Result<String, wirestub_codegen::ContractError>,
    output: &str,
    role: &str,
) -> Result<()> {
    let contract = Contract::from_path(contract_path)?;
    tracing::info!(
        "Loaded contract with {} procedures from {}",
        contract.procedures.len(),
        contract_path.display()
    );

    let source = emit(&contract)?;

    std::fs::write(output, source)
        .with_context(|| format!("Error writing {} code to {}", role, output))?;
    tracing::info!("Generated {} stubs in {}", role, output);

    Ok(())
}
