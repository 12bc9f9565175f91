use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Query string handed to the weather service, e.g. `"22.57, 88.36"`.
    pub fn as_query(&self) -> String {
        format!("{}, {}", self.latitude, self.longitude)
    }

    /// Label used when no place name could be resolved, e.g. `"22.57,88.36"`.
    pub fn as_label(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Timeline response of the weather service, trimmed to what gets rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherPayload {
    pub resolved_address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub current_conditions: CurrentConditions,
    #[serde(default)]
    pub days: Vec<DailySummary>,

    /// Place name from reverse geocoding; never part of the service response.
    #[serde(skip)]
    pub city_name_override: Option<String>,
}

impl WeatherPayload {
    /// Name shown in the current-conditions panel.
    pub fn display_name(&self) -> &str {
        self.city_name_override
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.resolved_address)
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Days after today, at most seven of them.
    pub fn upcoming_days(&self) -> &[DailySummary] {
        let end = self.days.len().min(8);
        self.days.get(1..end).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrentConditions {
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub feelslike: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub conditions: String,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub windspeed: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub icon: String,
    #[serde(default)]
    pub sunrise: Option<String>,
    #[serde(default)]
    pub sunset: Option<String>,
    #[serde(default)]
    pub precip: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummary {
    /// Calendar date as `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub datetime: String,
    #[serde(default)]
    pub tempmin: Option<f64>,
    #[serde(default)]
    pub tempmax: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub conditions: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub icon: String,
}

/// Treats an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
