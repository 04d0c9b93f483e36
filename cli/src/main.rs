use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::error;

use cli::{crdgen, list, render, schema};
use manifest_utils::setup_logging;
use terraform_provider_k8s::{
    Diagnostics, K8sProvider, RenderError, Severity, DEFAULT_PROVIDER_TYPE_NAME, PROVIDER_NAME_ENV,
};

#[derive(Parser, Debug)]
#[command(name = "k8s-manifest")]
#[command(version, about = "Renders Kubernetes manifests for NetObserv custom resources")]
struct Cli {
    /// Provider type name used as the data source name prefix
    #[arg(long, global = true, env = PROVIDER_NAME_ENV, default_value = DEFAULT_PROVIDER_TYPE_NAME)]
    provider: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List all data sources
    List,

    /// Print the attribute schema of a data source
    Schema {
        /// Data source type name or kind, e.g. FlowCollector
        data_source: String,
    },

    /// Validate a configuration file and print the rendered manifest
    Render {
        /// Data source type name or kind, e.g. FlowCollector
        data_source: String,

        /// Configuration file, YAML or JSON
        config: PathBuf,
    },

    /// Print the CustomResourceDefinitions of all supported kinds
    Crdgen,
}

fn main() {
    if let Err(e) = setup_logging() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let cli = Cli::parse();
    let provider = K8sProvider::new(&cli.provider);

    if let Err(e) = run(&provider, cli.command) {
        match e.downcast_ref::<RenderError>() {
            Some(RenderError::Diagnostics(diagnostics)) => print_diagnostics(diagnostics),
            _ => error!("{:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(provider: &K8sProvider, command: Commands) -> Result<()> {
    let out = match command {
        Commands::List => list(provider),
        Commands::Schema { data_source } => schema(provider, &data_source)?,
        Commands::Render {
            data_source,
            config,
        } => render(provider, &data_source, &config)?,
        Commands::Crdgen => crdgen(provider)?,
    };
    print!("{}", out);
    Ok(())
}

fn print_diagnostics(diagnostics: &Diagnostics) {
    for diagnostic in diagnostics.iter() {
        let line = diagnostic.to_string();
        match diagnostic.severity {
            Severity::Error => eprintln!("{}", line.red()),
            Severity::Warning => eprintln!("{}", line.yellow()),
        }
    }
}
