use std::sync::Arc;

use crate::clients::{
    DarkSkyClient, Geocoder, GoogleGeocoder, HikingProjectClient, MeetupClient, MovieDbClient,
    Provider, YelpClient, build_shared_http_client,
};
use crate::config::Config;
use crate::db::Store;
use crate::models::{Business, Meetup, Movie, Trail, Weather};
use crate::services::{LocationService, ResourceService};

/// One upstream source per resource kind.
#[derive(Clone)]
pub struct Providers {
    pub geocoder: Arc<dyn Geocoder>,

    pub weather: Arc<dyn Provider<Weather>>,

    pub businesses: Arc<dyn Provider<Business>>,

    pub movies: Arc<dyn Provider<Movie>>,

    pub meetups: Arc<dyn Provider<Meetup>>,

    pub trails: Arc<dyn Provider<Trail>>,
}

impl Providers {
    /// The real HTTP clients, sharing one connection pool.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let p = &config.providers;
        let http_client = build_shared_http_client(p.request_timeout_seconds.into())?;

        Ok(Self {
            geocoder: Arc::new(GoogleGeocoder::with_shared_client(
                http_client.clone(),
                p.geocode.clone(),
            )),
            weather: Arc::new(DarkSkyClient::with_shared_client(
                http_client.clone(),
                p.weather.clone(),
            )),
            businesses: Arc::new(YelpClient::with_shared_client(
                http_client.clone(),
                p.yelp.clone(),
            )),
            movies: Arc::new(MovieDbClient::with_shared_client(
                http_client.clone(),
                p.movies.clone(),
            )),
            meetups: Arc::new(MeetupClient::with_shared_client(
                http_client.clone(),
                p.meetups.clone(),
            )),
            trails: Arc::new(HikingProjectClient::with_shared_client(
                http_client,
                p.trails.clone(),
            )),
        })
    }
}

pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub locations: LocationService,

    pub weather: ResourceService<Weather>,

    pub businesses: ResourceService<Business>,

    pub movies: ResourceService<Movie>,

    pub meetups: ResourceService<Meetup>,

    pub trails: ResourceService<Trail>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let providers = Providers::from_config(&config)?;
        Self::with_providers(config, providers).await
    }

    /// Connects the store and wires every service to the given providers.
    pub async fn with_providers(config: Config, providers: Providers) -> anyhow::Result<Self> {
        let max_connections = config.general.max_db_connections;
        let store = Store::with_pool_options(
            &config.general.database_url,
            max_connections,
            max_connections.min(1),
        )
        .await?;

        Ok(Self::from_parts(config, store, providers))
    }

    #[must_use]
    pub fn from_parts(config: Config, store: Store, providers: Providers) -> Self {
        Self {
            config: Arc::new(config),
            locations: LocationService::new(store.clone(), providers.geocoder),
            weather: ResourceService::new(store.clone(), providers.weather),
            businesses: ResourceService::new(store.clone(), providers.businesses),
            movies: ResourceService::new(store.clone(), providers.movies),
            meetups: ResourceService::new(store.clone(), providers.meetups),
            trails: ResourceService::new(store.clone(), providers.trails),
            store,
        }
    }
}
