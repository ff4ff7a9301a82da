use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mapmuse::{App, MapMuseConfig, MoodCatalog, logging};

#[derive(Debug, Parser)]
#[command(name = "mapmuse", version, about = "MapMuse: let your feelings guide your food")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Mood catalog to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Take the mood quiz interactively (default)
    Quiz,
    /// List the cities with curated places
    Cities,
    /// List the moods in the catalog
    Moods,
    /// Recommend places from answers given on the command line
    Recommend {
        #[arg(long)]
        name: String,
        #[arg(long)]
        city: String,
        /// One answer per question, in order; option text or number
        #[arg(long = "answer", value_name = "ANSWER", required = true)]
        answers: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = MapMuseConfig::load_from_path(cli.config.clone())?;
    if let Some(path) = cli.catalog {
        config.catalog.path = path;
    }
    logging::init(&config.logging, cli.verbose)?;

    match cli.command.unwrap_or(Command::Quiz) {
        Command::Quiz => {
            let app = App::from_config(&config)?;
            let stdin = io::stdin();
            app.run_interactive(stdin.lock(), io::stdout()).await?;
        }
        Command::Cities => {
            let catalog = load_catalog(&config)?;
            for city in catalog.cities() {
                println!("{city}");
            }
        }
        Command::Moods => {
            let catalog = load_catalog(&config)?;
            for mood in catalog.moods() {
                println!("{} {} ({})", mood.icon, mood.name, mood.cuisine_tags.join(", "));
            }
        }
        Command::Recommend {
            name,
            city,
            answers,
        } => {
            let app = App::from_config(&config)?;
            let screen = app.recommend_for_answers(&name, &city, &answers).await?;
            println!("{screen}");
        }
    }

    Ok(())
}

fn load_catalog(config: &MapMuseConfig) -> Result<MoodCatalog> {
    MoodCatalog::load(&config.catalog.path).with_context(|| "Failed to load mood catalog")
}
