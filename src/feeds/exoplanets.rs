//! Exoplanet catalog (le-systeme-solaire.net)

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{get_json, FeedError};
use crate::filter::Searchable;

/// Default endpoint of the bodies catalog
pub const EXOPLANETS_URL: &str = "https://api.le-systeme-solaire.net/rest/bodies/";

/// At most this many planets are kept from a response
pub const EXOPLANET_DISPLAY_CAP: usize = 100;

#[derive(Debug, Deserialize)]
struct BodiesResponse {
    #[serde(default)]
    bodies: Vec<Exoplanet>,
}

/// One planet from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exoplanet {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub discovery_method: Option<String>,
    /// Orbital period in days; the catalog reports 0 when unknown
    #[serde(default)]
    pub sideral_orbit: f64,
    #[serde(default)]
    pub mass: Option<Mass>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mass {
    pub mass_value: f64,
    pub mass_exponent: i32,
}

impl Exoplanet {
    pub fn discovery_method_display(&self) -> &str {
        self.discovery_method
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or("N/A")
    }

    pub fn orbital_period_display(&self) -> String {
        if self.sideral_orbit == 0.0 {
            "N/A".to_string()
        } else {
            format!("{} days", self.sideral_orbit)
        }
    }

    pub fn mass_display(&self) -> String {
        match &self.mass {
            Some(mass) if mass.mass_value != 0.0 => {
                if mass.mass_exponent != 0 {
                    format!("{} x 10^{} kg", mass.mass_value, mass.mass_exponent)
                } else {
                    format!("{} kg", mass.mass_value)
                }
            }
            _ => "N/A".to_string(),
        }
    }
}

impl Searchable for Exoplanet {
    fn search_text(&self) -> &str {
        &self.name
    }
}

/// Client for the exoplanet catalog
#[derive(Debug, Clone)]
pub struct ExoplanetClient {
    client: Client,
    url: String,
}

impl ExoplanetClient {
    pub fn with_client(client: Client, url: String) -> Self {
        Self { client, url }
    }

    /// Fetches exoplanets, keeping the first [`EXOPLANET_DISPLAY_CAP`]
    pub async fn fetch_exoplanets(&self) -> Result<Vec<Exoplanet>, FeedError> {
        tracing::debug!(url = %self.url, "fetching exoplanets");
        let request = self
            .client
            .get(&self.url)
            .query(&[("filter[]", "isExoplanet,eq,true")]);
        let response: BodiesResponse = get_json(request).await?;
        Ok(cap(response.bodies))
    }
}

fn cap(mut planets: Vec<Exoplanet>) -> Vec<Exoplanet> {
    planets.truncate(EXOPLANET_DISPLAY_CAP);
    planets
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn planet(name: &str) -> Exoplanet {
        Exoplanet {
            id: name.to_lowercase().replace(' ', "-"),
            name: name.to_string(),
            discovery_method: Some("Transit".to_string()),
            sideral_orbit: 289.9,
            mass: Some(Mass {
                mass_value: 2.1,
                mass_exponent: 25,
            }),
        }
    }

    const FIXTURE: &str = r#"{
        "bodies": [
            {
                "id": "kepler22b",
                "name": "Kepler-22 b",
                "englishName": "Kepler-22 b",
                "isPlanet": true,
                "isExoplanet": true,
                "discoveryMethod": "Transit",
                "sideralOrbit": 289.8623,
                "mass": { "massValue": 3.4, "massExponent": 25 }
            },
            {
                "id": "x1",
                "name": "Unknown One",
                "sideralOrbit": 0,
                "mass": null
            }
        ]
    }"#;

    #[test]
    fn test_decode_catalog() {
        let response: BodiesResponse = serde_json::from_str(FIXTURE).unwrap();
        let planets = cap(response.bodies);

        assert_eq!(planets.len(), 2);
        assert_eq!(planets[0].discovery_method_display(), "Transit");
        assert_eq!(planets[0].orbital_period_display(), "289.8623 days");
        assert_eq!(planets[0].mass_display(), "3.4 x 10^25 kg");
    }

    #[test]
    fn test_missing_values_show_na() {
        let response: BodiesResponse = serde_json::from_str(FIXTURE).unwrap();
        let unknown = &response.bodies[1];

        assert_eq!(unknown.discovery_method_display(), "N/A");
        assert_eq!(unknown.orbital_period_display(), "N/A");
        assert_eq!(unknown.mass_display(), "N/A");
    }

    #[test]
    fn test_cap_keeps_first_hundred_in_order() {
        let planets: Vec<Exoplanet> = (0..150).map(|i| planet(&format!("P{i}"))).collect();

        let capped = cap(planets);

        assert_eq!(capped.len(), EXOPLANET_DISPLAY_CAP);
        assert_eq!(capped[0].name, "P0");
        assert_eq!(capped[99].name, "P99");
    }

    #[test]
    fn test_mass_without_exponent() {
        let mut p = planet("Small");
        p.mass = Some(Mass {
            mass_value: 5.0,
            mass_exponent: 0,
        });
        assert_eq!(p.mass_display(), "5 kg");
    }
}
