use async_trait::async_trait;
use std::fmt::Debug;

use crate::{Config, WeatherError, WeatherPayload, provider::visualcrossing::VisualCrossingProvider};

pub mod visualcrossing;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions plus the daily series for a free-text location.
    async fn get_weather(&self, location: &str) -> Result<WeatherPayload, WeatherError>;
}

/// Single-attempt fetch that degrades every failure to `None`.
#[derive(Debug)]
pub struct WeatherFetcher {
    provider: Box<dyn WeatherProvider>,
}

impl WeatherFetcher {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    pub async fn fetch(&self, location: &str) -> Option<WeatherPayload> {
        tracing::debug!(location, "fetching weather");

        match self.provider.get_weather(location).await {
            Ok(payload) => {
                tracing::info!(
                    location,
                    resolved = %payload.resolved_address,
                    days = payload.days.len(),
                    "weather fetched"
                );
                Some(payload)
            }
            Err(err) => {
                tracing::error!(location, error = %err, "Error fetching weather data");
                None
            }
        }
    }
}

/// Construct the weather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key()?;

    Ok(Box::new(VisualCrossingProvider::new(
        api_key.to_owned(),
        config.endpoints.weather_base_url.clone(),
    )))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{CurrentConditions, DailySummary};
    use std::sync::Mutex;

    /// Provider that replays a canned payload and records every query.
    #[derive(Debug, Default)]
    pub(crate) struct StubProvider {
        pub payload: Option<WeatherPayload>,
        pub queries: Mutex<Vec<String>>,
    }

    impl StubProvider {
        pub fn with_payload(payload: WeatherPayload) -> Self {
            Self { payload: Some(payload), queries: Mutex::default() }
        }

        pub fn failing() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl WeatherProvider for std::sync::Arc<StubProvider> {
        async fn get_weather(&self, location: &str) -> Result<WeatherPayload, WeatherError> {
            self.queries.lock().unwrap().push(location.to_string());
            self.payload
                .clone()
                .ok_or_else(|| WeatherError::Url("stub has no payload".into()))
        }
    }

    pub(crate) fn sample_payload(days: usize) -> WeatherPayload {
        WeatherPayload {
            resolved_address: "Kolkata, WB, India".into(),
            latitude: 22.5726,
            longitude: 88.3639,
            current_conditions: CurrentConditions {
                temp: Some(30.0),
                feelslike: Some(34.5),
                conditions: "Partially cloudy".into(),
                humidity: Some(70.0),
                windspeed: Some(11.2),
                icon: "partly-cloudy-day".into(),
                sunrise: Some("05:12:30".into()),
                sunset: Some("18:01:44".into()),
                precip: Some(0.0),
            },
            days: (0..days)
                .map(|i| DailySummary {
                    datetime: format!("2024-03-{:02}", i + 4),
                    tempmin: Some(21.0),
                    tempmax: Some(33.5),
                    conditions: "Clear".into(),
                    icon: "clear-day".into(),
                })
                .collect(),
            city_name_override: None,
        }
    }

    #[tokio::test]
    async fn fetch_returns_payload_on_success() {
        let stub = std::sync::Arc::new(StubProvider::with_payload(sample_payload(3)));
        let fetcher = WeatherFetcher::new(Box::new(stub.clone()));

        let payload = fetcher.fetch("Kolkata").await;

        assert!(payload.is_some());
        assert_eq!(*stub.queries.lock().unwrap(), vec!["Kolkata".to_string()]);
    }

    #[tokio::test]
    async fn fetch_degrades_failure_to_none() {
        let stub = std::sync::Arc::new(StubProvider::failing());
        let fetcher = WeatherFetcher::new(Box::new(stub.clone()));

        assert!(fetcher.fetch("Nowhere").await.is_none());
        assert_eq!(stub.queries.lock().unwrap().len(), 1);
    }

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No weather API key configured"));
    }

    #[test]
    fn provider_from_config_works_when_configured() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());

        assert!(provider_from_config(&cfg).is_ok());
    }
}
