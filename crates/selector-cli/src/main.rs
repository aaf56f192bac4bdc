use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "selector", version, about = "Workspace asset selection tooling")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate workspace definitions and report every error.
    Check {
        /// Workspace YAML file, or a directory of them
        path: PathBuf,
    },

    /// Print the wire (GraphQL) payload of a workspace's selections.
    Wire {
        /// Workspace YAML file
        file: PathBuf,
    },

    /// Convert a wire payload into a declarative workspace definition.
    Import {
        /// Wire payload (JSON)
        file: PathBuf,

        /// Name of the generated workspace
        #[arg(long, default_value = "imported")]
        name: String,
    },

    /// Evaluate assets against a workspace and report which are selected.
    Eval {
        /// Workspace YAML file
        file: PathBuf,

        /// Asset list (JSON or YAML)
        #[arg(long)]
        assets: PathBuf,

        /// Print a step-by-step trace for every asset
        #[arg(long, default_value_t = false)]
        explain: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Check { path } => commands::check::run(&path)?,
        Command::Wire { file } => commands::wire::run(&file)?,
        Command::Import { file, name } => commands::import::run(&file, &name)?,
        Command::Eval {
            file,
            assets,
            explain,
        } => commands::eval::run(&file, &assets, explain)?,
    }

    Ok(())
}
