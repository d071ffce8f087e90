//! Near-Earth object feed (NASA NeoWs)
//!
//! The feed groups objects by close-approach date. Only the configured date is
//! shown; by default that is the fixed date the dashboard has always used.

use std::collections::HashMap;

use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{de_lenient_f64, get_json, FeedError};
use crate::filter::Searchable;
use crate::format::group_thousands;

/// Default endpoint for the NeoWs feed
pub const NEO_FEED_URL: &str = "https://api.nasa.gov/neo/rest/v1/feed";

/// Response envelope of the NeoWs feed
#[derive(Debug, Deserialize)]
struct NeoFeedResponse {
    #[serde(default)]
    near_earth_objects: HashMap<String, Vec<NearEarthObject>>,
}

/// A single near-Earth object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearEarthObject {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub estimated_diameter: EstimatedDiameter,
    #[serde(default)]
    pub close_approach_data: Vec<CloseApproach>,
    #[serde(default)]
    pub is_potentially_hazardous_asteroid: bool,
    /// Only present on the per-object lookup, shown in the detailed view
    #[serde(default)]
    pub orbital_data: Option<OrbitalData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatedDiameter {
    pub kilometers: DiameterRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiameterRange {
    pub estimated_diameter_min: f64,
    pub estimated_diameter_max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloseApproach {
    #[serde(default)]
    pub close_approach_date: String,
    #[serde(default)]
    pub close_approach_date_full: Option<String>,
    pub relative_velocity: RelativeVelocity,
    pub miss_distance: MissDistance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelativeVelocity {
    #[serde(deserialize_with = "de_lenient_f64")]
    pub kilometers_per_second: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissDistance {
    #[serde(deserialize_with = "de_lenient_f64")]
    pub kilometers: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitalData {
    #[serde(default)]
    pub discovery_date: Option<String>,
    #[serde(default)]
    pub first_observation_date: Option<String>,
    #[serde(default)]
    pub orbital_period: Option<String>,
}

impl NearEarthObject {
    pub fn first_approach(&self) -> Option<&CloseApproach> {
        self.close_approach_data.first()
    }

    pub fn max_diameter_km(&self) -> f64 {
        self.estimated_diameter.kilometers.estimated_diameter_max
    }

    pub fn size_display(&self) -> String {
        format!("{:.2} km", self.max_diameter_km())
    }

    pub fn approach_date_display(&self) -> String {
        self.first_approach()
            .map(|a| {
                a.close_approach_date_full
                    .clone()
                    .unwrap_or_else(|| a.close_approach_date.clone())
            })
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn miss_distance_display(&self) -> String {
        self.first_approach()
            .map(|a| format!("{} km", group_thousands(a.miss_distance.kilometers, 3)))
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn velocity_display(&self) -> String {
        self.first_approach()
            .map(|a| format!("{:.2} km/s", a.relative_velocity.kilometers_per_second))
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn hazardous_display(&self) -> &'static str {
        if self.is_potentially_hazardous_asteroid {
            "Yes"
        } else {
            "No"
        }
    }

    pub fn discovery_date_display(&self) -> String {
        self.orbital_data
            .as_ref()
            .and_then(|o| o.discovery_date.clone().or_else(|| o.first_observation_date.clone()))
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn orbital_period_display(&self) -> String {
        self.orbital_data
            .as_ref()
            .and_then(|o| o.orbital_period.as_deref())
            .and_then(|p| p.parse::<f64>().ok())
            .map(|p| format!("{:.2} days", p))
            .unwrap_or_else(|| "N/A".to_string())
    }
}

impl Searchable for NearEarthObject {
    fn search_text(&self) -> &str {
        &self.name
    }
}

/// Client for the NeoWs feed
#[derive(Debug, Clone)]
pub struct NeoClient {
    client: Client,
    url: String,
    api_key: String,
    date: NaiveDate,
}

impl NeoClient {
    pub fn with_client(client: Client, url: String, api_key: String, date: NaiveDate) -> Self {
        Self {
            client,
            url,
            api_key,
            date,
        }
    }

    /// The close-approach date this client asks for
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Fetches the objects approaching on the configured date
    pub async fn fetch_objects(&self) -> Result<Vec<NearEarthObject>, FeedError> {
        let date = self.date.format("%Y-%m-%d").to_string();
        tracing::debug!(url = %self.url, %date, "fetching near-Earth objects");

        let request = self.client.get(&self.url).query(&[
            ("start_date", date.as_str()),
            ("end_date", date.as_str()),
            ("api_key", self.api_key.as_str()),
        ]);
        let response: NeoFeedResponse = get_json(request).await?;

        Ok(objects_for_date(response, &date))
    }
}

/// Picks the objects for `date`; an absent date means no objects
fn objects_for_date(mut response: NeoFeedResponse, date: &str) -> Vec<NearEarthObject> {
    response.near_earth_objects.remove(date).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED_FIXTURE: &str = r#"{
        "links": {},
        "element_count": 2,
        "near_earth_objects": {
            "2025-02-01": [
                {
                    "id": "2465633",
                    "name": "465633 (2009 JR5)",
                    "estimated_diameter": {
                        "kilometers": {
                            "estimated_diameter_min": 0.2170475943,
                            "estimated_diameter_max": 0.4853331752
                        }
                    },
                    "is_potentially_hazardous_asteroid": true,
                    "close_approach_data": [
                        {
                            "close_approach_date": "2025-02-01",
                            "close_approach_date_full": "2025-Feb-01 20:28",
                            "relative_velocity": { "kilometers_per_second": "18.1279360862" },
                            "miss_distance": { "kilometers": "45290438.204452618" }
                        }
                    ]
                },
                {
                    "id": "3426410",
                    "name": "(2008 QV11)",
                    "estimated_diameter": {
                        "kilometers": {
                            "estimated_diameter_min": 0.2658,
                            "estimated_diameter_max": 0.5943
                        }
                    },
                    "is_potentially_hazardous_asteroid": false,
                    "close_approach_data": []
                }
            ]
        }
    }"#;

    fn decode() -> NeoFeedResponse {
        serde_json::from_str(FEED_FIXTURE).unwrap()
    }

    #[test]
    fn test_objects_for_configured_date() {
        let objects = objects_for_date(decode(), "2025-02-01");
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].name, "465633 (2009 JR5)");
    }

    #[test]
    fn test_absent_date_yields_empty() {
        assert!(objects_for_date(decode(), "2025-02-02").is_empty());
    }

    #[test]
    fn test_display_fields() {
        let objects = objects_for_date(decode(), "2025-02-01");
        let neo = &objects[0];

        assert_eq!(neo.size_display(), "0.49 km");
        assert_eq!(neo.approach_date_display(), "2025-Feb-01 20:28");
        assert_eq!(neo.miss_distance_display(), "45,290,438.204 km");
        assert_eq!(neo.velocity_display(), "18.13 km/s");
        assert_eq!(neo.hazardous_display(), "Yes");
    }

    #[test]
    fn test_missing_approach_and_orbit_show_na() {
        let objects = objects_for_date(decode(), "2025-02-01");
        let neo = &objects[1];

        assert_eq!(neo.miss_distance_display(), "N/A");
        assert_eq!(neo.velocity_display(), "N/A");
        assert_eq!(neo.discovery_date_display(), "N/A");
        assert_eq!(neo.orbital_period_display(), "N/A");
        assert_eq!(neo.hazardous_display(), "No");
    }

    #[test]
    fn test_orbital_data_display() {
        let mut neo = objects_for_date(decode(), "2025-02-01").remove(0);
        neo.orbital_data = Some(OrbitalData {
            discovery_date: None,
            first_observation_date: Some("1998-11-12".to_string()),
            orbital_period: Some("643.0457".to_string()),
        });

        assert_eq!(neo.discovery_date_display(), "1998-11-12");
        assert_eq!(neo.orbital_period_display(), "643.05 days");
    }
}
