//! Pixy - Main CLI entry point

use anyhow::{bail, Result};
use clap::Parser;
use colored::Colorize;
use pixy::agent::Agent;
use pixy::chat::ChatClient;
use pixy::cli::{Args, Commands, Config};
use pixy::repl::Repl;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load(args.config.as_deref())?;

    match &args.command {
        Some(Commands::Models) => list_models(&args, &config).await,
        Some(Commands::Config) => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
        Some(Commands::Clean) => clean_state(&config),
        Some(Commands::Chat) => chat(&args, &config, None).await,
        None => chat(&args, &config, args.message.as_deref()).await,
    }
}

/// Resolve model and endpoint from flags over config
fn resolve(args: &Args, config: &Config) -> (String, String) {
    let model = args
        .model
        .clone()
        .unwrap_or_else(|| config.ollama.default_model.clone());
    let url = args.ollama_url(config);
    (model, url)
}

async fn chat(args: &Args, config: &Config, one_shot: Option<&str>) -> Result<()> {
    let (model, url) = resolve(args, config);
    let mut agent = Agent::new(config, &url, &model, &config.paths.data_dir)?;

    if !agent.health_check().await? {
        bail!(
            "Ollama is not reachable at {}. Start it with: ollama serve",
            url
        );
    }

    match one_shot {
        Some(message) => {
            let answer = agent.run(message, &args.user).await?;
            println!("{}", answer);
            Ok(())
        }
        None => {
            let mut repl = Repl::new(agent, &config.agent.name, &args.user)?;
            repl.run().await?;
            Ok(())
        }
    }
}

async fn list_models(args: &Args, config: &Config) -> Result<()> {
    let (model, url) = resolve(args, config);
    let client = ChatClient::new(&url, &model)?;
    let models = client.list_models().await?;

    if models.is_empty() {
        println!("no models installed; pull one with: ollama pull {}", model);
        return Ok(());
    }
    for name in models {
        if name == model {
            println!("{} {}", name.bold().green(), "(default)".dimmed());
        } else {
            println!("{}", name);
        }
    }
    Ok(())
}

fn clean_state(config: &Config) -> Result<()> {
    let mut removed = 0;
    for file in ["history.json", "memory.json", "user_data.json"] {
        let path = config.paths.data_dir.join(file);
        if path.exists() {
            std::fs::remove_file(&path)?;
            removed += 1;
            println!("removed {}", path.display());
        }
    }
    if removed == 0 {
        println!("nothing to clean in {}", config.paths.data_dir.display());
    }
    Ok(())
}
