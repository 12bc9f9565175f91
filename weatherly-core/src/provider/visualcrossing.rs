use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::{
    error::{WeatherError, truncate_body},
    model::WeatherPayload,
};

use super::WeatherProvider;

/// Visual Crossing timeline API client.
#[derive(Debug, Clone)]
pub struct VisualCrossingProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl VisualCrossingProvider {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self { api_key, base_url, http: Client::new() }
    }

    /// `{base}/timeline/{location}` with the location as one encoded path segment.
    fn timeline_url(&self, location: &str) -> Result<Url, WeatherError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| WeatherError::Url(format!("{}: {e}", self.base_url)))?;

        url.path_segments_mut()
            .map_err(|_| WeatherError::Url(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .push("timeline")
            .push(location);

        url.query_pairs_mut()
            .append_pair("unitGroup", "metric")
            .append_pair("key", &self.api_key)
            .append_pair("include", "days,current");

        Ok(url)
    }
}

#[async_trait]
impl WeatherProvider for VisualCrossingProvider {
    async fn get_weather(&self, location: &str) -> Result<WeatherPayload, WeatherError> {
        let url = self.timeline_url(location)?;

        let res = self.http.get(url).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Status { status, body: truncate_body(&body) });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
