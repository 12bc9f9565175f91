//! HTML fragments for the current-conditions panel and the forecast list.

use chrono::NaiveDate;
use std::fmt::Write as _;

use crate::{
    icon::glyph_for,
    map::{MapUpdater, MapWidget},
    model::{DailySummary, WeatherPayload},
};

pub const FETCH_FAILED: &str = "Failed to fetch weather data.";

/// A display region whose contents are replaced as a whole or appended to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    inner_html: String,
}

impl Region {
    pub fn inner_html(&self) -> &str {
        &self.inner_html
    }

    pub fn set_inner_html(&mut self, html: impl Into<String>) {
        self.inner_html = html.into();
    }

    pub fn append_html(&mut self, html: &str) {
        self.inner_html.push_str(html);
    }

    pub fn clear(&mut self) {
        self.inner_html.clear();
    }
}

/// Renders the current-conditions panel and moves the map marker.
pub fn render_current<M: MapWidget>(
    region: &mut Region,
    map: &mut MapUpdater<M>,
    payload: Option<&WeatherPayload>,
) {
    let Some(data) = payload else {
        region.set_inner_html(FETCH_FAILED);
        return;
    };

    let now = &data.current_conditions;
    let temp = format_optional(now.temp);
    let conditions = escape_html(&now.conditions);

    let mut html = String::new();
    let _ = write!(
        html,
        r#"
<div class="weatherInfo">
  <div class="locationDetails">
    <h2>{name}</h2>
    <p>Sunrise <i class="info-weather-icon fas fa-sunrise"></i>: {sunrise}</p>
    <p>Sunset <i class="info-weather-icon fas fa-sunset"></i>: {sunset}</p>
    <p>Precipitation <i class="info-weather-icon fas fa-cloud-showers-heavy"></i>: {precip}%</p>
    <p>Humidity <i class="info-weather-icon fas fa-tint"></i>: {humidity}%</p>
    <p>Windspeed <i class="info-weather-icon fas fa-wind"></i>: {wind} km/h</p>
  </div>
  <div class="weatherCondition">
    <div class="temperature">
      <p>{temp}°C</p>
    </div>
    <div class="tempFeelsLike">
      <p><em>{feels}°C <br> Feels Like</em></p>
    </div>
  </div>
</div>
<i class="weather-icon fas fa-{glyph}" style="display:block;"></i>
<p>{conditions}</p>
"#,
        name = escape_html(data.display_name()),
        sunrise = escape_html(now.sunrise.as_deref().unwrap_or("N/A")),
        sunset = escape_html(now.sunset.as_deref().unwrap_or("N/A")),
        precip = format_optional(now.precip),
        humidity = format_optional(now.humidity),
        wind = format_optional(now.windspeed),
        feels = format_optional(now.feelslike),
        glyph = glyph_for(&now.icon),
    );

    region.set_inner_html(html);
    map.update(data.coordinates(), &temp, &conditions);
}

/// Renders one card per day for the seven days after today.
pub fn render_forecast(region: &mut Region, payload: Option<&WeatherPayload>) {
    let Some(data) = payload else {
        region.set_inner_html(FETCH_FAILED);
        return;
    };

    region.clear();
    for day in data.upcoming_days() {
        region.append_html(&forecast_card(day));
    }
}

fn forecast_card(day: &DailySummary) -> String {
    format!(
        r#"
<div class="forecast-item">
  <p>{date}</p>
  <p>Min: {min}°C</p>
  <p>Max: {max}°C</p>
  <p>{conditions}</p>
  <i class="weather-icon fas fa-{glyph}"></i>
</div>
"#,
        date = escape_html(&format_forecast_date(&day.datetime)),
        min = format_optional(day.tempmin),
        max = format_optional(day.tempmax),
        conditions = escape_html(&day.conditions),
        glyph = glyph_for(&day.icon),
    )
}

/// `"2024-03-05"` becomes `"5 Mar 24, Tue"`. Unparseable input is returned as is.
pub fn format_forecast_date(datetime: &str) -> String {
    match NaiveDate::parse_from_str(datetime, "%Y-%m-%d") {
        Ok(date) => date.format("%-d %b %y, %a").to_string(),
        Err(_) => datetime.to_string(),
    }
}

/// Numbers the way a browser prints them: `30`, `28.5`, `-3.2`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Covers -0.0 as well.
        return "0".to_string();
    }
    value.to_string()
}

fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), format_number)
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape for a single-quoted JavaScript string inside a `<script>` block.
pub fn escape_js(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '<' => out.push_str("\\u003c"),
            _ => out.push(c),
        }
    }
    out
}
