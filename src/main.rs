use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use skyboard_core::{Config, ConfigOverrides};
use skyboard_dashboard::{command, render, Command, Dashboard, Flow};
use skyboard_services::{FavoritesStore, FileStorage};
use skyboard_weather::{OpenWeatherClient, WeatherSource};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Terminal weather dashboard backed by OpenWeatherMap
#[derive(Parser, Debug)]
#[command(name = "skyboard", version, about)]
struct Args {
    /// Config file (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// API key, overriding both config and OPENWEATHERMAP_API_KEY
    #[arg(long)]
    api_key: Option<String>,

    /// City to load at startup; repeat to load several
    #[arg(long = "city")]
    cities: Vec<String>,

    /// Directory for saved favorites
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    skyboard_core::init()?;

    let overrides = ConfigOverrides {
        api_key: args.api_key,
        cities: args.cities,
        data_dir: args.data_dir,
    };
    let (config, _) = Config::load_validated(args.config.as_deref(), overrides)?;

    let client =
        OpenWeatherClient::from_config(&config.weather).context("Failed to build weather client")?;
    let source: Arc<dyn WeatherSource> = Arc::new(client);

    let data_dir = config.storage.effective_data_dir();
    tracing::info!("Favorites stored in {}", data_dir.display());
    let favorites = FavoritesStore::load(Box::new(FileStorage::new(data_dir)));

    let (mut dashboard, mut rx) = Dashboard::new(source, favorites);
    dashboard.load_defaults(&config.dashboard.default_cities).await;
    draw(&dashboard)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let command = Command::parse(&line);
                let show_help = command == Command::Help;

                match dashboard.dispatch(command) {
                    Ok(Flow::Quit) => break,
                    Ok(Flow::Continue) => draw(&dashboard)?,
                    Err(e) => {
                        tracing::debug!("Command failed: {}", e);
                        println!("{}", e.user_message());
                    }
                }

                if show_help {
                    println!("{}", command::HELP);
                }
            }
            Some(message) = rx.recv() => {
                dashboard.apply(message);
                draw(&dashboard)?;
            }
        }
    }

    tracing::info!("Skyboard shutting down");
    Ok(())
}

fn draw(dashboard: &Dashboard) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "\x1b[2J\x1b[H{}\n> ", render::render(dashboard))?;
    stdout.flush()?;
    Ok(())
}
