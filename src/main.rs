use clap::Parser;
use hash_ledger::cli::commands::{run_cli, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging is initialized inside run_cli based on the debug flag
    run_cli(cli)?;

    Ok(())
}
