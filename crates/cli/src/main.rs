use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
use commands::{functions::FunctionsArgs, scan::ScanArgs};

#[derive(Parser)]
#[command(name = "nullaudit")]
#[command(about = "Null dereference detection for Python with LLM path verification")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a file or directory and report confirmed null dereference flows
    Scan(ScanArgs),

    /// List the function units discovered in a file, without verification
    Functions(FunctionsArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan(args) => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(commands::scan::execute(args))
        }
        Commands::Functions(args) => commands::functions::execute(args),
    }
}
