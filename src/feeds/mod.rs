//! External feeds consumed by the dashboard
//!
//! Every feed is a read-only HTTP JSON endpoint. Each submodule owns the
//! response schema and view-model helpers for one feed; [`FeedHub`] ties the
//! clients to the shared [`ReadThroughCache`] so every feature is fetched and
//! cached the same way.

pub mod earth;
pub mod exoplanets;
pub mod iss;
pub mod missions;
pub mod neo;
pub mod space_weather;

pub use earth::{EarthClient, EarthImage, ShareTarget};
pub use exoplanets::{Exoplanet, ExoplanetClient};
pub use iss::{IssClient, IssPosition};
pub use missions::{MissionsClient, Rover};
pub use neo::{NearEarthObject, NeoClient};
pub use space_weather::{SpaceWeatherAlert, SpaceWeatherClient};

use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::cache::{Fetched, ReadThroughCache};
use crate::config::AppConfig;
use crate::refresh::RefreshConfig;

/// Errors that can occur when fetching a feed
///
/// Transport failures, non-2xx statuses and decode failures all end up here and
/// are shown to the user as a single per-feature message.
#[derive(Debug, Error)]
pub enum FeedError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Writing a downloaded file failed
    #[error("Failed to save file: {0}")]
    Io(#[from] std::io::Error),
}

/// One dashboard feature, backed by exactly one feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    Iss,
    Neo,
    Exoplanets,
    EarthView,
    SpaceWeather,
    Missions,
}

impl Feature {
    pub const ALL: [Feature; 6] = [
        Feature::Iss,
        Feature::Neo,
        Feature::Exoplanets,
        Feature::EarthView,
        Feature::SpaceWeather,
        Feature::Missions,
    ];

    /// Stable position of the feature in [`Feature::ALL`]
    pub fn index(self) -> usize {
        match self {
            Feature::Iss => 0,
            Feature::Neo => 1,
            Feature::Exoplanets => 2,
            Feature::EarthView => 3,
            Feature::SpaceWeather => 4,
            Feature::Missions => 5,
        }
    }

    /// Base key of the feature's entry in the local store
    pub fn cache_key(self) -> &'static str {
        match self {
            Feature::Iss => "iss",
            Feature::Neo => "neo",
            Feature::Exoplanets => "exoplanets",
            Feature::EarthView => "earth_images",
            Feature::SpaceWeather => "space_weather",
            Feature::Missions => "missions",
        }
    }

    /// The message shown when a fetch fails
    pub fn error_message(self) -> &'static str {
        match self {
            Feature::Iss => "Error fetching ISS location. Please try again.",
            Feature::Neo => "Error fetching NEO data. Please try again.",
            Feature::Exoplanets => "Error fetching Exoplanet data. Please try again.",
            Feature::EarthView => "Failed to fetch Earth images.",
            Feature::SpaceWeather => "Error fetching space weather alerts. Please try again.",
            Feature::Missions => "Failed to fetch mission data. Please try again.",
        }
    }
}

/// Decoded payload of any feed
#[derive(Debug, Clone)]
pub enum FeedData {
    Iss(IssPosition),
    Neo(Vec<NearEarthObject>),
    Exoplanets(Vec<Exoplanet>),
    EarthView(Vec<EarthImage>),
    SpaceWeather(Vec<SpaceWeatherAlert>),
    Missions(Vec<Rover>),
}

/// All feed clients plus the cache they read through
#[derive(Debug, Clone)]
pub struct FeedHub {
    iss: IssClient,
    neo: NeoClient,
    exoplanets: ExoplanetClient,
    earth: EarthClient,
    space_weather: SpaceWeatherClient,
    missions: MissionsClient,
    cache: ReadThroughCache,
    refresh: RefreshConfig,
}

impl FeedHub {
    /// Builds every client from the configuration, sharing one HTTP client
    pub fn new(config: &AppConfig, cache: ReadThroughCache) -> Self {
        let client = Client::new();
        let endpoints = &config.endpoints;
        Self {
            iss: IssClient::with_client(client.clone(), endpoints.iss.clone()),
            neo: NeoClient::with_client(
                client.clone(),
                endpoints.neo.clone(),
                config.api_key.clone(),
                config.neo_date,
            ),
            exoplanets: ExoplanetClient::with_client(client.clone(), endpoints.exoplanets.clone()),
            earth: EarthClient::with_client(
                client.clone(),
                endpoints.epic.clone(),
                config.api_key.clone(),
            ),
            space_weather: SpaceWeatherClient::with_client(
                client.clone(),
                endpoints.donki.clone(),
                config.api_key.clone(),
            ),
            missions: MissionsClient::with_client(
                client,
                endpoints.rovers.clone(),
                config.api_key.clone(),
            ),
            cache,
            refresh: config.refresh.clone(),
        }
    }

    pub fn earth(&self) -> &EarthClient {
        &self.earth
    }

    /// Key under which `feature` is cached; NEO snapshots are per feed date
    pub fn cache_key(&self, feature: Feature) -> String {
        match feature {
            Feature::Neo => format!("{}_{}", feature.cache_key(), self.neo.date()),
            other => other.cache_key().to_string(),
        }
    }

    /// Runs the fetch-and-cache routine for one feature
    pub async fn load(&self, feature: Feature) -> Result<Fetched<FeedData>, FeedError> {
        let key = self.cache_key(feature);
        let window = self.refresh.schedule(feature).freshness_window();

        match feature {
            Feature::Iss => Ok(self
                .cache
                .get_or_fetch(&key, window, || self.iss.fetch_position())
                .await?
                .map(FeedData::Iss)),
            Feature::Neo => Ok(self
                .cache
                .get_or_fetch(&key, window, || self.neo.fetch_objects())
                .await?
                .map(FeedData::Neo)),
            Feature::Exoplanets => Ok(self
                .cache
                .get_or_fetch(&key, window, || self.exoplanets.fetch_exoplanets())
                .await?
                .map(FeedData::Exoplanets)),
            Feature::EarthView => Ok(self
                .cache
                .get_or_fetch(&key, window, || self.earth.fetch_images())
                .await?
                .map(FeedData::EarthView)),
            Feature::SpaceWeather => Ok(self
                .cache
                .get_or_fetch(&key, window, || self.space_weather.fetch_alerts())
                .await?
                .map(FeedData::SpaceWeather)),
            Feature::Missions => Ok(self
                .cache
                .get_or_fetch(&key, window, || self.missions.fetch_rovers())
                .await?
                .map(FeedData::Missions)),
        }
    }
}

/// Sends a request and decodes the JSON body, treating any non-2xx status as an error
pub(crate) async fn get_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, FeedError> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FeedError::Status(status.as_u16()));
    }
    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}

/// Accepts a number or a decimal string
pub(crate) fn de_lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[derive(Debug, Deserialize)]
    struct Lenient {
        #[serde(deserialize_with = "de_lenient_f64")]
        value: f64,
    }

    #[test]
    fn test_lenient_f64_accepts_string_and_number() {
        let a: Lenient = serde_json::from_str(r#"{"value": "12.34"}"#).unwrap();
        let b: Lenient = serde_json::from_str(r#"{"value": 12.34}"#).unwrap();
        assert!((a.value - 12.34).abs() < f64::EPSILON);
        assert!((b.value - 12.34).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lenient_f64_rejects_garbage() {
        let result: Result<Lenient, _> = serde_json::from_str(r#"{"value": "north"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_feature_indices_match_all_order() {
        for (i, feature) in Feature::ALL.iter().enumerate() {
            assert_eq!(feature.index(), i);
        }
    }

    #[test]
    fn test_cache_keys_are_unique() {
        let mut keys: Vec<_> = Feature::ALL.iter().map(|f| f.cache_key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), Feature::ALL.len());
    }

    #[test]
    fn test_neo_cache_key_includes_date() {
        let hub = FeedHub::new(&AppConfig::default(), ReadThroughCache::disabled());
        assert_eq!(hub.cache_key(Feature::Neo), "neo_2025-02-01");
        assert_eq!(hub.cache_key(Feature::Iss), "iss");
    }

    #[tokio::test]
    async fn test_load_serves_fresh_cache_without_network() {
        let temp_dir = TempDir::new().unwrap();
        let store = crate::cache::CacheManager::with_dir(temp_dir.path().to_path_buf());
        let planets = vec![exoplanets::tests::planet("Kepler-22 b")];
        store.write("exoplanets", &planets).unwrap();

        let mut config = AppConfig::default();
        // Unroutable so an accidental request fails instead of reaching the internet
        config.endpoints.exoplanets = "http://127.0.0.1:9/bodies".to_string();
        let hub = FeedHub::new(&config, ReadThroughCache::new(Some(store)));

        let fetched = hub.load(Feature::Exoplanets).await.unwrap();

        assert_eq!(fetched.source, crate::cache::Source::Cache);
        match fetched.data {
            FeedData::Exoplanets(list) => assert_eq!(list, planets),
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_reports_error_without_cache() {
        let mut config = AppConfig::default();
        config.endpoints.iss = "http://127.0.0.1:9/iss".to_string();
        let hub = FeedHub::new(&config, ReadThroughCache::disabled());

        let result = hub.load(Feature::Iss).await;

        assert!(matches!(result, Err(FeedError::RequestFailed(_))));
    }
}
