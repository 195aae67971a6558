#![deny(missing_docs)]

//! # WSDoc CLI
//!
//! Command Line Interface for the web-service documentation generator.
//!
//! Supported Commands:
//! - `example`: Renders the example document of a type (XML or JSON).
//! - `bind`: Dry-runs REST request binding against declared resources.
//! - `request-qname`: Prints the request document element of SOAP web methods.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wsdoc_core::GeneratorConfig;

use crate::error::CliResult;

mod bind;
mod error;
mod example;
mod loader;
mod logging;
mod qname;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Web-service documentation generator CLI")]
struct Cli {
    /// Generator configuration file (YAML or JSON).
    #[clap(long, global = true, env = "WSDOC_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG).
    #[clap(long, short, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the example document of a type.
    Example(example::ExampleArgs),
    /// Resolve a request against declared REST resources.
    Bind(bind::BindArgs),
    /// Print request document names of SOAP web methods.
    RequestQname(qname::QnameArgs),
}

fn load_config(path: Option<&PathBuf>) -> CliResult<GeneratorConfig> {
    match path {
        Some(path) => Ok(GeneratorConfig::load(path)?),
        None => Ok(GeneratorConfig::default()),
    }
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = load_config(cli.config.as_ref())?;

    match &cli.command {
        Commands::Example(args) => example::execute(args, &config)?,
        Commands::Bind(args) => bind::execute(args, &config)?,
        Commands::RequestQname(args) => qname::execute(args)?,
    }

    Ok(())
}
