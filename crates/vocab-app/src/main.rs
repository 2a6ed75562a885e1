use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vocab_config::Config;

pub mod commands;

#[cfg(test)]
mod tests;

#[derive(Parser)]
#[command(name = "vocab")]
#[command(about = "Clean, filter and translate the vocabulary dataset")]
struct Cli {
    /// Directory holding the per-year files and the aggregate
    #[arg(long, global = true)]
    vocab_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the fixed mean and example-sentence corrections
    Clean,
    /// Re-extract broken example sentences from the raw corpus
    Snippets {
        /// Directory holding `<year>.txt` corpus files
        #[arg(long)]
        raw_dir: Option<PathBuf>,
    },
    /// Drop records whose headword is a personal name
    RemoveNames {
        /// Extra names to drop, on top of the built-in list
        #[arg(long = "name")]
        names: Vec<String>,
    },
    /// Fill `mean` and `onePhraseJa` through the translation provider
    Translate(commands::translate::TranslateArgs),
    /// Print word counts of extracted text files as CSV
    Frequency {
        #[arg(long, default_value = "data/extracted")]
        input_dir: PathBuf,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // a missing .env is fine
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let mut config = Config::new();
    if let Some(dir) = cli.vocab_dir {
        config.dataset.vocab_dir = dir;
    }

    match cli.command {
        Commands::Clean => {
            commands::clean::run(&config.dataset)?;
        }
        Commands::Snippets { raw_dir } => {
            if let Some(dir) = raw_dir {
                config.dataset.raw_dir = dir;
            }
            commands::snippets::run(&config.dataset)?;
        }
        Commands::RemoveNames { names } => {
            commands::remove_names::run(&config.dataset, &names)?;
        }
        Commands::Translate(args) => {
            commands::translate::run(&config, args).await?;
        }
        Commands::Frequency { input_dir } => {
            let csv = commands::frequency::run(&input_dir)?;
            print!("{csv}");
        }
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}
