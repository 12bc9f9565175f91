use crate::{
    config::Config,
    map::{LeafletMap, MapUpdater, MapWidget},
    render::Region,
};

/// Everything the page shows: the input field, both output regions and the map.
#[derive(Debug, Clone)]
pub struct UiSession<M> {
    pub input: String,
    pub current: Region,
    pub forecast: Region,
    pub map: MapUpdater<M>,
}

impl<M: MapWidget> UiSession<M> {
    pub fn new(map: M, zoom: u8) -> Self {
        Self {
            input: String::new(),
            current: Region::default(),
            forecast: Region::default(),
            map: MapUpdater::new(map, zoom),
        }
    }
}

impl UiSession<LeafletMap> {
    pub fn from_config(config: &Config) -> Self {
        Self::new(LeafletMap::from_config(&config.map), config.map.zoom)
    }

    /// Full HTML document with both regions and the Leaflet map.
    pub fn to_page(&self, title: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.2/css/all.min.css">
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
</head>
<body>
  <form id="location-form">
    <input id="location-input" type="text" value="{input}" placeholder="Enter a location">
  </form>
  <section id="weather">{current}</section>
  <section id="forecast">{forecast}</section>
  <div id="map" style="height: 400px;"></div>
  <script>
{script}  </script>
</body>
</html>
"#,
            title = crate::render::escape_html(title),
            input = crate::render::escape_html(&self.input),
            current = self.current.inner_html(),
            forecast = self.forecast.inner_html(),
            script = self.map.map().to_leaflet_script(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_is_blank_with_initial_map() {
        let session = UiSession::from_config(&Config::default());

        assert!(session.input.is_empty());
        assert!(session.current.inner_html().is_empty());
        assert!(session.forecast.inner_html().is_empty());
        assert!(session.map.marker().is_none());
        assert_eq!(session.map.map().zoom(), 8);
    }

    #[test]
    fn page_embeds_regions_and_map_script() {
        let mut session = UiSession::from_config(&Config::default());
        session.input = "Pune".into();
        session.current.set_inner_html("<p>now</p>");
        session.forecast.set_inner_html("<p>later</p>");

        let page = session.to_page("Weatherly");

        assert!(page.contains("<title>Weatherly</title>"));
        assert!(page.contains(r#"value="Pune""#));
        assert!(page.contains(r#"<section id="weather"><p>now</p></section>"#));
        assert!(page.contains(r#"<section id="forecast"><p>later</p></section>"#));
        assert!(page.contains("L.map('map')"));
    }
}
