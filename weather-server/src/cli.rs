use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use weather_core::{Config, LocationQuery, WeatherLookup};
use weather_server::ApiError;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Weather lookup API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API.
    Serve {
        /// Address to bind, overriding the configured host.
        #[arg(long)]
        host: Option<String>,

        /// Port to bind, overriding the configured port.
        #[arg(long)]
        port: Option<u16>,
    },

    /// Look up the weather once and print the JSON the API would return.
    Show {
        /// City or place name; wins over coordinates when both are given.
        #[arg(long)]
        city: Option<String>,

        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,

        #[arg(long, allow_negative_numbers = true)]
        lon: Option<f64>,
    },

    /// Store the WeatherAPI.com key and server settings in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Serve { host, port } => {
                let mut config = Config::load()?;
                if let Some(host) = host {
                    config.server.host = host;
                }
                if let Some(port) = port {
                    config.server.port = port;
                }
                weather_server::serve(config).await?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { city, lat, lon } => show(LocationQuery { city, lat, lon }).await,
            Command::Configure => {
                configure()?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

async fn show(query: LocationQuery) -> anyhow::Result<ExitCode> {
    let config = Config::load()?;
    let lookup = WeatherLookup::from_config(&config)?;

    match lookup.lookup(&query).await {
        Ok(weather) => {
            println!("{}", serde_json::to_string_pretty(&weather)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            let err = ApiError::from(err);
            eprintln!("{}", serde_json::to_string_pretty(&err.body())?);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let path = Config::config_file_path()?;
    let mut config = Config::load_from(&path)?;

    let api_key = Password::new("WeatherAPI.com API key (empty keeps the current one):")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    let base_url = Text::new("Provider base URL:")
        .with_default(&config.provider.base_url)
        .prompt()
        .context("Failed to read base URL")?;

    let origin = Text::new("Allowed CORS origin (empty disables cross-origin access):")
        .with_default(config.server.allowed_origin.as_deref().unwrap_or_default())
        .prompt()
        .context("Failed to read allowed origin")?;

    if !api_key.trim().is_empty() {
        config.provider.api_key = Some(api_key.trim().to_string());
    }
    config.provider.base_url = base_url.trim().to_string();
    config.server.allowed_origin = Some(origin.trim().to_string()).filter(|o| !o.is_empty());

    config.api_key()?;
    config.save_to(&path)?;

    println!("Configuration saved to {}", path.display());
    Ok(())
}
