//! Mars rover mission roster (NASA Mars Rover Photos API)

use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{get_json, FeedError};
use crate::filter::Searchable;
use crate::format::group_thousands;

/// Default endpoint of the rover roster
pub const ROVERS_URL: &str = "https://api.nasa.gov/mars-photos/api/v1/rovers";

/// Mission statuses offered by the status filter
pub const MISSION_STATUSES: [&str; 2] = ["active", "complete"];

#[derive(Debug, Deserialize)]
struct RoversResponse {
    #[serde(default)]
    rovers: Vec<Rover>,
}

/// One rover mission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rover {
    #[serde(default)]
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub landing_date: Option<String>,
    #[serde(default)]
    pub launch_date: Option<String>,
    /// `active` or `complete`
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub max_sol: Option<u32>,
    #[serde(default)]
    pub total_photos: Option<u64>,
    #[serde(default)]
    pub cameras: Vec<Camera>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub name: String,
    #[serde(default)]
    pub full_name: String,
}

fn or_na(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or("N/A")
        .to_string()
}

impl Rover {
    pub fn launch_date_display(&self) -> String {
        or_na(self.launch_date.as_deref())
    }

    pub fn landing_date_display(&self) -> String {
        or_na(self.landing_date.as_deref())
    }

    pub fn status_display(&self) -> &str {
        self.status
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("Unknown")
    }

    pub fn total_photos_display(&self) -> String {
        self.total_photos
            .map(|n| group_thousands(n as f64, 0))
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn cameras_display(&self) -> String {
        if self.cameras.is_empty() {
            return "N/A".to_string();
        }
        self.cameras
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Searchable for Rover {
    fn search_text(&self) -> &str {
        &self.name
    }

    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn sort_key(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::parse_from_str(self.launch_date.as_deref()?, "%Y-%m-%d").ok()?;
        date.and_hms_opt(0, 0, 0)
    }
}

/// Client for the rover roster
#[derive(Debug, Clone)]
pub struct MissionsClient {
    client: Client,
    url: String,
    api_key: String,
}

impl MissionsClient {
    pub fn with_client(client: Client, url: String, api_key: String) -> Self {
        Self {
            client,
            url,
            api_key,
        }
    }

    pub async fn fetch_rovers(&self) -> Result<Vec<Rover>, FeedError> {
        tracing::debug!(url = %self.url, "fetching rover missions");
        let request = self
            .client
            .get(&self.url)
            .query(&[("api_key", self.api_key.as_str())]);
        let response: RoversResponse = get_json(request).await?;
        Ok(response.rovers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "rovers": [
            {
                "id": 5,
                "name": "Curiosity",
                "landing_date": "2012-08-06",
                "launch_date": "2011-11-26",
                "status": "active",
                "max_sol": 4102,
                "max_date": "2024-02-19",
                "total_photos": 695670,
                "cameras": [
                    { "id": 20, "name": "FHAZ", "rover_id": 5, "full_name": "Front Hazard Avoidance Camera" },
                    { "id": 22, "name": "MAST", "rover_id": 5, "full_name": "Mast Camera" }
                ]
            },
            {
                "id": 7,
                "name": "Spirit",
                "landing_date": "2004-01-04",
                "launch_date": "2003-06-10",
                "status": "complete",
                "total_photos": 124550,
                "cameras": []
            }
        ]
    }"#;

    #[test]
    fn test_decode_roster() {
        let response: RoversResponse = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(response.rovers.len(), 2);
        assert_eq!(response.rovers[0].name, "Curiosity");
    }

    #[test]
    fn test_display_fields() {
        let response: RoversResponse = serde_json::from_str(FIXTURE).unwrap();
        let curiosity = &response.rovers[0];

        assert_eq!(curiosity.launch_date_display(), "2011-11-26");
        assert_eq!(curiosity.status_display(), "active");
        assert_eq!(curiosity.total_photos_display(), "695,670");
        assert_eq!(curiosity.cameras_display(), "FHAZ, MAST");
        assert_eq!(response.rovers[1].cameras_display(), "N/A");
    }

    #[test]
    fn test_missing_fields_fall_back() {
        let rover: Rover = serde_json::from_str(r#"{ "name": "Mystery" }"#).unwrap();

        assert_eq!(rover.launch_date_display(), "N/A");
        assert_eq!(rover.landing_date_display(), "N/A");
        assert_eq!(rover.status_display(), "Unknown");
        assert_eq!(rover.total_photos_display(), "N/A");
        assert!(rover.sort_key().is_none());
    }

    #[test]
    fn test_searchable_fields() {
        let response: RoversResponse = serde_json::from_str(FIXTURE).unwrap();
        let spirit = &response.rovers[1];

        assert_eq!(spirit.search_text(), "Spirit");
        assert_eq!(spirit.status(), Some("complete"));
        assert!(spirit.sort_key() < response.rovers[0].sort_key());
    }
}
