use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::model::Coordinates;

pub const DEFAULT_LOCATION: &str = "Kolkata";
pub const VISUAL_CROSSING_BASE_URL: &str =
    "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services";
pub const NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Base URLs of the external services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub weather_base_url: String,
    pub geocode_base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            weather_base_url: VISUAL_CROSSING_BASE_URL.to_string(),
            geocode_base_url: NOMINATIM_BASE_URL.to_string(),
        }
    }
}

/// Map widget settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Zoom used when centering on a fetched location.
    pub zoom: u8,
    pub initial_zoom: u8,
    pub tile_url: String,
    pub max_zoom: u8,
    pub attribution: String,
    pub initial_center: Coordinates,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            zoom: 10,
            initial_zoom: 8,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            max_zoom: 19,
            attribution: "© OpenStreetMap contributors".to_string(),
            initial_center: Coordinates::new(22.5726, 88.3639),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_location = "Kolkata"
///
/// [home]
/// latitude = 22.5726
/// longitude = 88.3639
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Visual Crossing API key.
    pub api_key: Option<String>,

    /// Location used when geolocation fails and when the input is cleared.
    pub default_location: String,

    /// Coordinates reported as the device position, if any.
    pub home: Option<Coordinates>,

    pub endpoints: Endpoints,
    pub map: MapConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            default_location: DEFAULT_LOCATION.to_string(),
            home: None,
            endpoints: Endpoints::default(),
            map: MapConfig::default(),
        }
    }
}

impl Config {
    /// API key for the weather service, or an error with a setup hint.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No weather API key configured.\n\
                     Hint: run `weatherly configure` and enter your Visual Crossing API key."
                )
            })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key.trim().to_string());
    }

    /// Replace the default location; blank input keeps the current one.
    pub fn set_default_location(&mut self, location: &str) {
        let location = location.trim();
        if !location.is_empty() {
            self.default_location = location.to_string();
        }
    }

    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherly", "weatherly")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.api_key().unwrap_err();

        assert!(err.to_string().contains("No weather API key configured"));
        assert!(err.to_string().contains("weatherly configure"));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let mut cfg = Config::default();
        cfg.set_api_key("   ".into());

        assert!(cfg.api_key().is_err());
    }

    #[test]
    fn set_api_key_trims() {
        let mut cfg = Config::default();
        cfg.set_api_key(" KEY \n".into());

        assert_eq!(cfg.api_key().unwrap(), "KEY");
    }

    #[test]
    fn blank_default_location_is_ignored() {
        let mut cfg = Config::default();
        cfg.set_default_location("  ");
        assert_eq!(cfg.default_location, DEFAULT_LOCATION);

        cfg.set_default_location("Pune ");
        assert_eq!(cfg.default_location, "Pune");
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg = Config::from_toml(
            r#"
            api_key = "abc"

            [home]
            latitude = 51.5
            longitude = -0.12

            [map]
            zoom = 12
            "#,
        )
        .unwrap();

        assert_eq!(cfg.api_key().unwrap(), "abc");
        assert_eq!(cfg.default_location, DEFAULT_LOCATION);
        assert_eq!(cfg.home, Some(Coordinates::new(51.5, -0.12)));
        assert_eq!(cfg.map.zoom, 12);
        assert_eq!(cfg.map.initial_zoom, 8);
        assert_eq!(cfg.endpoints, Endpoints::default());
    }

    #[test]
    fn toml_roundtrip_keeps_settings() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.home = Some(Coordinates::new(1.5, 2.5));

        let text = toml::to_string_pretty(&cfg).unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), cfg);
    }
}
