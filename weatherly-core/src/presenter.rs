use crate::{
    config::Config,
    geocode::{LocationResolver, NominatimGeocoder},
    location::{Geolocator, LocationSource},
    map::{LeafletMap, MapWidget},
    model::WeatherPayload,
    provider::{WeatherFetcher, provider_from_config},
    render::{render_current, render_forecast},
    session::UiSession,
};

/// The four things a user can do that trigger a refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    PageLoad,
    /// Form submission with the typed text.
    Submit(String),
    Clear,
    /// Enter pressed in the input field. Handled exactly like `Submit`; the
    /// command-line front end only ever produces `Submit`.
    EnterKey(String),
}

/// Runs the locate → fetch → render pipeline against one [`UiSession`].
#[derive(Debug)]
pub struct WeatherPresenter<M> {
    fetcher: WeatherFetcher,
    resolver: LocationResolver,
    geolocator: Box<dyn Geolocator>,
    default_location: String,
    session: UiSession<M>,
}

impl WeatherPresenter<LeafletMap> {
    /// Presenter wired to the real services described by `config`.
    pub fn from_config(config: &Config, geolocator: Box<dyn Geolocator>) -> anyhow::Result<Self> {
        let fetcher = WeatherFetcher::new(provider_from_config(config)?);
        let geocoder = NominatimGeocoder::new(config.endpoints.geocode_base_url.clone())?;

        Ok(Self::new(
            fetcher,
            LocationResolver::new(Box::new(geocoder)),
            geolocator,
            config.default_location.clone(),
            UiSession::from_config(config),
        ))
    }
}

impl<M: MapWidget> WeatherPresenter<M> {
    pub fn new(
        fetcher: WeatherFetcher,
        resolver: LocationResolver,
        geolocator: Box<dyn Geolocator>,
        default_location: String,
        session: UiSession<M>,
    ) -> Self {
        Self { fetcher, resolver, geolocator, default_location, session }
    }

    pub fn session(&self) -> &UiSession<M> {
        &self.session
    }

    pub fn into_session(self) -> UiSession<M> {
        self.session
    }

    pub async fn handle(&mut self, event: UiEvent) {
        tracing::debug!(?event, "handling ui event");

        match event {
            UiEvent::PageLoad => {
                let source = self.locate().await;
                self.show(source).await;
            }
            UiEvent::Submit(text) | UiEvent::EnterKey(text) => {
                self.session.input = text.clone();
                self.show(LocationSource::Query(text)).await;
            }
            UiEvent::Clear => {
                self.session.input.clear();
                self.show(LocationSource::Default).await;
            }
        }
    }

    /// Device position if the geolocator has one, otherwise the default location.
    async fn locate(&self) -> LocationSource {
        match self.geolocator.current_position().await {
            Ok(at) => LocationSource::Position(at),
            Err(err) => {
                tracing::warn!(error = %err, default = %self.default_location, "Using default location");
                LocationSource::Default
            }
        }
    }

    /// Fetch weather for `source` and render both regions.
    pub async fn show(&mut self, source: LocationSource) {
        let payload = match source {
            LocationSource::Query(text) => self.fetcher.fetch(&text).await,
            LocationSource::Default => self.fetcher.fetch(&self.default_location).await,
            LocationSource::Position(at) => {
                let name = self.resolver.resolve_name(at).await;
                let mut payload = self.fetcher.fetch(&at.as_query()).await;
                if let Some(data) = payload.as_mut() {
                    data.city_name_override = Some(name);
                }
                payload
            }
        };

        self.display(payload.as_ref());
    }

    fn display(&mut self, payload: Option<&WeatherPayload>) {
        render_current(&mut self.session.current, &mut self.session.map, payload);
        render_forecast(&mut self.session.forecast, payload);
    }
}
