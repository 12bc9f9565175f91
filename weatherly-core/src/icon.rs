//! Icon codes reported by the weather service and the Font Awesome glyphs
//! used to draw them.

/// Every icon code with a dedicated glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconCode {
    ClearDay,
    ClearNight,
    PartlyCloudyDay,
    PartlyCloudyNight,
    Cloudy,
    Rain,
    Sleet,
    Snow,
    Wind,
    Fog,
    Sunrise,
    Sunset,
    Humidity,
    WindSpeed,
    Precipitation,
    Aqi,
}

/// Glyph for codes not in the table.
pub const UNKNOWN_GLYPH: &str = "question";

impl IconCode {
    pub const fn all() -> &'static [IconCode] {
        &[
            IconCode::ClearDay,
            IconCode::ClearNight,
            IconCode::PartlyCloudyDay,
            IconCode::PartlyCloudyNight,
            IconCode::Cloudy,
            IconCode::Rain,
            IconCode::Sleet,
            IconCode::Snow,
            IconCode::Wind,
            IconCode::Fog,
            IconCode::Sunrise,
            IconCode::Sunset,
            IconCode::Humidity,
            IconCode::WindSpeed,
            IconCode::Precipitation,
            IconCode::Aqi,
        ]
    }

    /// Parse the service's icon string; `None` for codes without a glyph.
    pub fn parse(code: &str) -> Option<Self> {
        Self::all().iter().copied().find(|icon| icon.as_str() == code)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IconCode::ClearDay => "clear-day",
            IconCode::ClearNight => "clear-night",
            IconCode::PartlyCloudyDay => "partly-cloudy-day",
            IconCode::PartlyCloudyNight => "partly-cloudy-night",
            IconCode::Cloudy => "cloudy",
            IconCode::Rain => "rain",
            IconCode::Sleet => "sleet",
            IconCode::Snow => "snow",
            IconCode::Wind => "wind",
            IconCode::Fog => "fog",
            IconCode::Sunrise => "sunrise",
            IconCode::Sunset => "sunset",
            IconCode::Humidity => "humidity",
            IconCode::WindSpeed => "wind_speed",
            IconCode::Precipitation => "precipitation",
            IconCode::Aqi => "aqi",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            IconCode::ClearDay => "sun",
            IconCode::ClearNight => "moon",
            IconCode::PartlyCloudyDay => "cloud-sun",
            IconCode::PartlyCloudyNight => "cloud-moon",
            IconCode::Cloudy => "cloud",
            IconCode::Rain => "cloud-rain",
            IconCode::Sleet => "cloud-sleet",
            IconCode::Snow => "cloud-snow",
            IconCode::Wind | IconCode::WindSpeed => "wind",
            IconCode::Fog => "fog",
            IconCode::Sunrise => "sunrise",
            IconCode::Sunset => "sunset",
            IconCode::Humidity => "tint",
            IconCode::Precipitation => "cloud-showers-heavy",
            IconCode::Aqi => "smog",
        }
    }
}

/// Glyph name for any icon code the service may send.
pub fn glyph_for(code: &str) -> &'static str {
    IconCode::parse(code).map_or(UNKNOWN_GLYPH, |icon| icon.glyph())
}
