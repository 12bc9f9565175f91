use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::{fs, path::PathBuf};
use tracing_subscriber::EnvFilter;
use weatherly_core::{
    Config, Coordinates, FixedGeolocator, LeafletMap, UiEvent, UiSession, WeatherPresenter,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherly", version, about = "Current weather and 7-day forecast")]
pub struct Cli {
    /// Log pipeline progress to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the API key, default location and home coordinates.
    Configure,

    /// Show weather for a location, or for the current position when none is given.
    Show {
        /// Address or location name.
        location: Option<String>,

        /// Latitude of the current position; overrides the configured home.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude of the current position; overrides the configured home.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        #[command(flatten)]
        output: Output,
    },

    /// Clear the input and show the default location.
    Reset {
        #[command(flatten)]
        output: Output,
    },
}

#[derive(Debug, Args)]
pub struct Output {
    /// Write a complete HTML page with map to this path instead of printing fragments.
    #[arg(long)]
    pub page: Option<PathBuf>,
}

impl Cli {
    /// Install the stderr log subscriber; `RUST_LOG` wins over `--verbose`.
    pub fn init_tracing(&self) {
        let fallback = if self.verbose { "debug" } else { "warn" };

        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;

        match self.command {
            Command::Configure => configure(&mut config)?,
            Command::Show { location, lat, lon, output } => {
                let position = match (lat, lon) {
                    (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
                    _ => config.home,
                };
                let event = match location {
                    Some(text) => UiEvent::Submit(text),
                    None => UiEvent::PageLoad,
                };
                let session = present(&config, position, event).await?;
                output.emit(&session)?;
            }
            Command::Reset { output } => {
                let session = present(&config, config.home, UiEvent::Clear).await?;
                output.emit(&session)?;
            }
        }

        Ok(())
    }
}

async fn present(
    config: &Config,
    position: Option<Coordinates>,
    event: UiEvent,
) -> anyhow::Result<UiSession<LeafletMap>> {
    tracing::info!(?event, ?position, "presenting");
    let mut presenter =
        WeatherPresenter::from_config(config, Box::new(FixedGeolocator::new(position)))?;
    presenter.handle(event).await;
    Ok(presenter.into_session())
}

impl Output {
    fn emit(&self, session: &UiSession<LeafletMap>) -> anyhow::Result<()> {
        match &self.page {
            Some(path) => {
                fs::write(path, session.to_page("Weatherly"))
                    .with_context(|| format!("Failed to write page: {}", path.display()))?;
                println!("Wrote {}", path.display());
            }
            None => {
                println!("{}", session.current.inner_html().trim());
                println!();
                println!("{}", session.forecast.inner_html().trim());
            }
        }
        Ok(())
    }
}

fn configure(config: &mut Config) -> anyhow::Result<()> {
    let api_key = inquire::Password::new("Visual Crossing API key:")
        .without_confirmation()
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key);

    let location = inquire::Text::new("Default location:")
        .with_default(&config.default_location)
        .prompt()
        .context("Failed to read default location")?;
    config.set_default_location(&location);

    let use_home = inquire::Confirm::new("Set home coordinates for position-based lookups?")
        .with_default(config.home.is_some())
        .prompt()
        .context("Failed to read answer")?;

    config.home = if use_home {
        let latitude = inquire::CustomType::<f64>::new("Latitude:")
            .with_error_message("Please enter a number, e.g. 22.5726")
            .prompt()
            .context("Failed to read latitude")?;
        let longitude = inquire::CustomType::<f64>::new("Longitude:")
            .with_error_message("Please enter a number, e.g. 88.3639")
            .prompt()
            .context("Failed to read longitude")?;
        Some(Coordinates::new(latitude, longitude))
    } else {
        None
    };

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}
