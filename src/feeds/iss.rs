//! ISS position feed (wheretheiss.at)
//!
//! The feed reports latitude, longitude, altitude and velocity. Depending on the
//! mirror these arrive as JSON numbers or decimal strings, so both are accepted.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{de_lenient_f64, get_json, FeedError};

/// Default endpoint for the ISS (NORAD 25544)
pub const ISS_URL: &str = "https://api.wheretheiss.at/v1/satellites/25544";

/// Current position of the International Space Station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssPosition {
    #[serde(deserialize_with = "de_lenient_f64")]
    pub latitude: f64,
    #[serde(deserialize_with = "de_lenient_f64")]
    pub longitude: f64,
    /// Altitude in km
    #[serde(deserialize_with = "de_lenient_f64")]
    pub altitude: f64,
    /// Velocity in km/h
    #[serde(deserialize_with = "de_lenient_f64")]
    pub velocity: f64,
    /// "daylight" or "eclipsed"
    #[serde(default)]
    pub visibility: Option<String>,
}

impl IssPosition {
    pub fn latitude_display(&self) -> String {
        format!("{:.4}", self.latitude)
    }

    pub fn longitude_display(&self) -> String {
        format!("{:.4}", self.longitude)
    }

    pub fn altitude_display(&self) -> String {
        format!("{:.2} km", self.altitude)
    }

    pub fn velocity_display(&self) -> String {
        format!("{:.2} km/h", self.velocity)
    }

    /// Link to the current ground position on Google Maps
    pub fn map_url(&self) -> String {
        format!(
            "https://www.google.com/maps?q={},{}",
            self.latitude, self.longitude
        )
    }

    /// Which hemisphere quadrant the station is over, e.g. "N / E"
    pub fn hemisphere(&self) -> &'static str {
        match (self.latitude >= 0.0, self.longitude >= 0.0) {
            (true, true) => "N / E",
            (true, false) => "N / W",
            (false, true) => "S / E",
            (false, false) => "S / W",
        }
    }
}

/// Client for the ISS position feed
#[derive(Debug, Clone)]
pub struct IssClient {
    client: Client,
    url: String,
}

impl IssClient {
    pub fn with_client(client: Client, url: String) -> Self {
        Self { client, url }
    }

    /// Fetches the current position
    pub async fn fetch_position(&self) -> Result<IssPosition, FeedError> {
        tracing::debug!(url = %self.url, "fetching ISS position");
        get_json(self.client.get(&self.url)).await
    }
}
