use crate::config::Config;
use crate::core::{Block, Chain};
use crate::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

const DEMO_PAYLOADS: [&str; 3] = ["second block", "third block", "fourth block"];

#[derive(Parser, Debug)]
#[command(name = "ledgerd")]
#[command(about = "Hash Ledger - A minimal append-only hash-chained ledger")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable debug logging")]
    pub debug: bool,

    #[arg(long, global = true, help = "Configuration file path")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build genesis plus three demo blocks and print the chain
    Demo,

    /// Append each payload to a fresh chain and print the result
    Append {
        #[arg(required = true, help = "Data payloads, appended in order")]
        data: Vec<String>,

        #[arg(long, help = "Write the resulting chain dump to this file")]
        output: Option<PathBuf>,
    },

    /// Rebuild a chain from a JSON dump and check every link
    Verify {
        path: PathBuf,
    },

    /// Print the effective configuration
    ShowConfig,
}

pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    // Initialize logging once
    let _ = if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).try_init()
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init()
    };

    let config = Config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Demo => {
            let chain = build_chain(&config, DEMO_PAYLOADS)?;
            println!("{}", chain.to_json()?);
        }
        Commands::Append { data, output } => {
            let chain = build_chain(&config, data.iter().map(String::as_str))?;
            let dump = chain.to_json()?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &dump)?;
                    println!("📦 Wrote {} blocks to {}", chain.len(), path.display());
                }
                None => println!("{}", dump),
            }
        }
        Commands::Verify { path } => {
            let chain = load_dump(&path, &config)?;
            println!("✅ Chain of {} blocks verified", chain.len());
            println!("🔗 Tip: #{} {}", chain.latest().index, chain.latest().hash);
        }
        Commands::ShowConfig => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

/// Appends `payloads` in order to a chain seeded from `config`.
pub fn build_chain<'a, I>(config: &Config, payloads: I) -> Result<Chain>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut chain = Chain::new(&config.genesis);
    for data in payloads {
        chain.create_and_append(data)?;
    }
    Ok(chain)
}

/// Reads a JSON dump and replays it through the append protocol. The dump's
/// root must match the configured genesis block.
pub fn load_dump(path: &Path, config: &Config) -> Result<Chain> {
    let content = std::fs::read_to_string(path)?;
    let blocks: Vec<Block> = serde_json::from_str(&content)?;
    Chain::from_blocks_rooted(blocks, &config.genesis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RejectionKind;
    use crate::LedgerError;
    use tempfile::TempDir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["ledgerd", "--debug", "append", "a", "b"]).unwrap();
        assert!(cli.debug);
        match cli.command {
            Commands::Append { data, output } => {
                assert_eq!(data, vec!["a".to_string(), "b".to_string()]);
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(Cli::try_parse_from(["ledgerd", "append"]).is_err());
    }

    #[test]
    fn test_demo_chain() -> Result<()> {
        let chain = build_chain(&Config::default(), DEMO_PAYLOADS)?;

        assert_eq!(chain.len(), 4);
        assert_eq!(chain.latest().data, "fourth block");
        chain.verify()?;
        Ok(())
    }

    #[test]
    fn test_dump_and_verify() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("chain.json");

        let chain = build_chain(&Config::default(), ["one", "two"])?;
        std::fs::write(&path, chain.to_json()?)?;

        let loaded = load_dump(&path, &Config::default())?;
        assert_eq!(loaded.blocks(), chain.blocks());
        Ok(())
    }

    #[test]
    fn test_verify_detects_tampering() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("chain.json");

        let chain = build_chain(&Config::default(), ["one", "two"])?;
        let tampered = chain.to_json()?.replace("\"one\"", "\"uno\"");
        std::fs::write(&path, tampered)?;

        let err = load_dump(&path, &Config::default()).unwrap_err();
        assert_eq!(err.kind(), Some(RejectionKind::Integrity));
        Ok(())
    }

    #[test]
    fn test_verify_rejects_foreign_root() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("chain.json");

        let mut config = Config::default();
        config.genesis.hash = "cafebabe".to_string();
        let chain = build_chain(&config, ["one"])?;
        std::fs::write(&path, chain.to_json()?)?;

        assert!(load_dump(&path, &config).is_ok());

        let err = load_dump(&path, &Config::default()).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidGenesis(_)));
        Ok(())
    }

    #[test]
    fn test_verify_empty_dump() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("chain.json");
        std::fs::write(&path, "[]")?;

        assert!(matches!(load_dump(&path, &Config::default()), Err(LedgerError::EmptyChain)));
        Ok(())
    }
}
