//! Reverse geocoding: convert coordinates to human-readable place names.
//! Uses Nominatim (OpenStreetMap) - free, no API key required.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;

use crate::{error::GeocodeError, model::Coordinates};

const USER_AGENT: &str = concat!("weatherly/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReverseResponse {
    pub address: Option<Address>,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Address {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub municipality: Option<String>,
    pub state_district: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}

impl Address {
    /// Most specific place name: city > town > village > ... > country.
    pub fn place_name(&self) -> Option<&str> {
        [
            &self.city,
            &self.town,
            &self.village,
            &self.municipality,
            &self.state_district,
            &self.county,
            &self.state,
            &self.region,
            &self.country,
        ]
        .into_iter()
        .filter_map(|field| field.as_deref())
        .find(|name| !name.is_empty())
    }
}

impl ReverseResponse {
    /// Address-derived name, falling back to the service's display name.
    pub fn place_name(&self) -> Option<&str> {
        self.address
            .as_ref()
            .and_then(Address::place_name)
            .or_else(|| self.display_name.as_deref().filter(|name| !name.is_empty()))
    }
}

#[async_trait]
pub trait ReverseGeocoder: Send + Sync + Debug {
    async fn reverse(&self, at: Coordinates) -> Result<ReverseResponse, GeocodeError>;
}

#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    base_url: String,
    http: Client,
}

impl NominatimGeocoder {
    pub fn new(base_url: String) -> Result<Self, GeocodeError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { base_url, http })
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    async fn reverse(&self, at: Coordinates) -> Result<ReverseResponse, GeocodeError> {
        let url = format!("{}/reverse", self.base_url.trim_end_matches('/'));
        let lat = at.latitude.to_string();
        let lon = at.longitude.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("format", "json"),
                ("addressdetails", "1"),
                ("zoom", "12"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeocodeError::Status(response.status()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Turns coordinates into the label shown instead of the weather service's
/// resolved address.
#[derive(Debug)]
pub struct LocationResolver {
    geocoder: Box<dyn ReverseGeocoder>,
}

impl LocationResolver {
    pub fn new(geocoder: Box<dyn ReverseGeocoder>) -> Self {
        Self { geocoder }
    }

    /// Place name for `at`, or `"lat,lon"` when the lookup fails.
    pub async fn resolve_name(&self, at: Coordinates) -> String {
        let result = self
            .geocoder
            .reverse(at)
            .await
            .and_then(|res| res.place_name().map(str::to_owned).ok_or(GeocodeError::NoName));

        match result {
            Ok(name) => {
                tracing::info!(%at, name = %name, "reverse geocoded");
                name
            }
            Err(err) => {
                tracing::warn!(%at, error = %err, "Reverse geocoding failed");
                at.as_label()
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use wiremock::matchers::{header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Geocoder returning a fixed response, or failing when there is none.
    #[derive(Debug, Default)]
    pub(crate) struct StubGeocoder(pub Option<ReverseResponse>);

    #[async_trait]
    impl ReverseGeocoder for StubGeocoder {
        async fn reverse(&self, _at: Coordinates) -> Result<ReverseResponse, GeocodeError> {
            self.0.clone().ok_or(GeocodeError::NoName)
        }
    }

    pub(crate) fn city(name: &str) -> ReverseResponse {
        ReverseResponse {
            address: Some(Address { city: Some(name.into()), ..Address::default() }),
            display_name: None,
        }
    }

    #[test]
    fn state_wins_over_country() {
        let addr = Address {
            state: Some("West Bengal".into()),
            country: Some("India".into()),
            ..Address::default()
        };
        assert_eq!(addr.place_name(), Some("West Bengal"));
    }

    #[test]
    fn fallback_order_is_respected() {
        let mut addr = Address {
            city: Some("Kolkata".into()),
            town: Some("Salt Lake".into()),
            village: Some("Rajarhat".into()),
            county: Some("North 24 Parganas".into()),
            region: Some("East India".into()),
            ..Address::default()
        };
        assert_eq!(addr.place_name(), Some("Kolkata"));

        addr.city = None;
        assert_eq!(addr.place_name(), Some("Salt Lake"));

        addr.town = None;
        assert_eq!(addr.place_name(), Some("Rajarhat"));

        addr.village = None;
        assert_eq!(addr.place_name(), Some("North 24 Parganas"));

        addr.county = None;
        assert_eq!(addr.place_name(), Some("East India"));
    }

    #[test]
    fn empty_fields_are_skipped() {
        let addr = Address {
            city: Some(String::new()),
            municipality: Some("Bidhannagar".into()),
            ..Address::default()
        };
        assert_eq!(addr.place_name(), Some("Bidhannagar"));
    }

    #[test]
    fn display_name_used_without_address_fields() {
        let res = ReverseResponse {
            address: Some(Address::default()),
            display_name: Some("Bay of Bengal".into()),
        };
        assert_eq!(res.place_name(), Some("Bay of Bengal"));

        assert_eq!(ReverseResponse::default().place_name(), None);
    }

    #[tokio::test]
    async fn resolver_falls_back_to_coordinates() {
        let resolver = LocationResolver::new(Box::new(StubGeocoder(None)));
        let name = resolver.resolve_name(Coordinates::new(22.5, 88.25)).await;
        assert_eq!(name, "22.5,88.25");
    }

    #[tokio::test]
    async fn resolver_falls_back_when_response_has_no_name() {
        let resolver = LocationResolver::new(Box::new(StubGeocoder(Some(ReverseResponse::default()))));
        let name = resolver.resolve_name(Coordinates::new(-33.9, 151.2)).await;
        assert_eq!(name, "-33.9,151.2");
    }

    #[tokio::test]
    async fn nominatim_request_and_parse() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/reverse"))
            .and(query_param("lat", "22.5726"))
            .and(query_param("lon", "88.3639"))
            .and(query_param("format", "json"))
            .and(query_param("addressdetails", "1"))
            .and(query_param("zoom", "12"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "display_name": "Kolkata, West Bengal, India",
                "address": { "city": "Kolkata", "state": "West Bengal", "country": "India" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let geocoder = NominatimGeocoder::new(server.uri()).unwrap();
        let resolver = LocationResolver::new(Box::new(geocoder));

        let name = resolver.resolve_name(Coordinates::new(22.5726, 88.3639)).await;
        assert_eq!(name, "Kolkata");
    }

    #[tokio::test]
    async fn nominatim_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let geocoder = NominatimGeocoder::new(server.uri()).unwrap();
        let err = geocoder.reverse(Coordinates::new(1.0, 2.0)).await.unwrap_err();
        assert!(matches!(err, GeocodeError::Status(_)));
    }
}
