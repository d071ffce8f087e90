//! Space-weather notifications (NASA DONKI)

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{get_json, FeedError};
use crate::filter::Searchable;
use crate::format::truncate_chars;

/// Default endpoint of the DONKI notifications feed
pub const DONKI_URL: &str = "https://api.nasa.gov/DONKI/notifications";

/// Only the latest alerts are kept
pub const ALERT_DISPLAY_CAP: usize = 10;

/// Characters of the cleaned body shown on a card
pub const PREVIEW_CHARS: usize = 100;

/// One notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceWeatherAlert {
    /// Short type code such as `FLR`, `CME`, `GST` or `Report`
    pub message_type: String,
    #[serde(rename = "messageID", default)]
    pub message_id: String,
    #[serde(rename = "messageURL", default)]
    pub message_url: String,
    /// Issue time, e.g. `2025-01-31T14:52Z`
    pub message_issue_time: String,
    #[serde(default)]
    pub message_body: String,
}

impl SpaceWeatherAlert {
    /// Body with the `##` section markers removed
    pub fn cleaned_body(&self) -> String {
        self.message_body.replace("##", "")
    }

    /// First [`PREVIEW_CHARS`] characters of the cleaned body followed by `...`
    pub fn preview(&self) -> String {
        let cleaned = self.cleaned_body();
        format!("{}...", truncate_chars(cleaned.trim(), PREVIEW_CHARS))
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        parse_issue_time(&self.message_issue_time)
    }

    /// Issue time in local time, or the raw string when it does not parse
    pub fn issued_display(&self) -> String {
        self.issued_at()
            .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| self.message_issue_time.clone())
    }
}

impl Searchable for SpaceWeatherAlert {
    fn search_text(&self) -> &str {
        &self.message_type
    }

    fn sort_key(&self) -> Option<NaiveDateTime> {
        self.issued_at().map(|t| t.naive_utc())
    }
}

/// DONKI uses minute precision with a literal `Z`; full RFC 3339 is accepted too
fn parse_issue_time(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ")
        .map(|naive| naive.and_utc())
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|t| t.with_timezone(&Utc))
        })
}

/// Client for the DONKI notifications feed
#[derive(Debug, Clone)]
pub struct SpaceWeatherClient {
    client: Client,
    url: String,
    api_key: String,
}

impl SpaceWeatherClient {
    pub fn with_client(client: Client, url: String, api_key: String) -> Self {
        Self {
            client,
            url,
            api_key,
        }
    }

    /// Fetches notifications of every type, keeping the latest [`ALERT_DISPLAY_CAP`]
    pub async fn fetch_alerts(&self) -> Result<Vec<SpaceWeatherAlert>, FeedError> {
        tracing::debug!(url = %self.url, "fetching space weather notifications");
        let request = self
            .client
            .get(&self.url)
            .query(&[("type", "all"), ("api_key", self.api_key.as_str())]);
        let alerts: Vec<SpaceWeatherAlert> = get_json(request).await?;
        Ok(cap(alerts))
    }
}

fn cap(mut alerts: Vec<SpaceWeatherAlert>) -> Vec<SpaceWeatherAlert> {
    alerts.truncate(ALERT_DISPLAY_CAP);
    alerts
}
