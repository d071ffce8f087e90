//! Earth imagery feed (NASA EPIC)
//!
//! The catalog lists capture records; the actual image lives in the EPIC
//! archive under a path derived from the capture date.

use std::path::{Path, PathBuf};

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{get_json, FeedError};

/// Default endpoint of the EPIC natural-color catalog
pub const EPIC_URL: &str = "https://api.nasa.gov/EPIC/api/natural/images";

/// Default base of the EPIC image archive
pub const EPIC_ARCHIVE_URL: &str = "https://epic.gsfc.nasa.gov/archive/natural";

/// Number of images shown in the grid
pub const EARTH_GRID_CAP: usize = 9;

/// One capture record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarthImage {
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub caption: String,
    /// Image name without extension, e.g. `epic_1b_20250131001751`
    pub image: String,
    /// Capture time, `YYYY-MM-DD HH:MM:SS`
    pub date: String,
}

impl EarthImage {
    /// Builds the archive URL: `<base>/YYYY/MM/DD/png/<image>.png`
    pub fn image_url(&self, archive_base: &str) -> String {
        let day = self.date.split(' ').next().unwrap_or_default();
        format!(
            "{}/{}/png/{}.png",
            archive_base.trim_end_matches('/'),
            day.replace('-', "/"),
            self.image
        )
    }

    pub fn captured_display(&self) -> String {
        format!("Captured on {}", self.date)
    }
}

/// File name used when saving the image at `index` (0-based) of the gallery
pub fn download_file_name(index: usize) -> String {
    format!("earth_image_{}.png", index + 1)
}

/// Social sites an image link can be shared to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareTarget {
    Facebook,
    LinkedIn,
    WhatsApp,
    Twitter,
}

impl ShareTarget {
    pub const ALL: [ShareTarget; 4] = [
        ShareTarget::Facebook,
        ShareTarget::LinkedIn,
        ShareTarget::WhatsApp,
        ShareTarget::Twitter,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ShareTarget::Facebook => "Facebook",
            ShareTarget::LinkedIn => "LinkedIn",
            ShareTarget::WhatsApp => "WhatsApp",
            ShareTarget::Twitter => "Twitter",
        }
    }

    /// Share-intent URL carrying `link` as its encoded parameter
    pub fn share_url(self, link: &str) -> String {
        let encoded = urlencoding::encode(link);
        match self {
            ShareTarget::Facebook => {
                format!("https://www.facebook.com/sharer/sharer.php?u={encoded}")
            }
            ShareTarget::LinkedIn => {
                format!("https://www.linkedin.com/sharing/share-offsite/?url={encoded}")
            }
            ShareTarget::WhatsApp => format!("https://wa.me/?text={encoded}"),
            ShareTarget::Twitter => format!("https://twitter.com/intent/tweet?url={encoded}"),
        }
    }
}

/// Client for the EPIC catalog and archive
#[derive(Debug, Clone)]
pub struct EarthClient {
    client: Client,
    url: String,
    api_key: String,
}

impl EarthClient {
    pub fn with_client(client: Client, url: String, api_key: String) -> Self {
        Self {
            client,
            url,
            api_key,
        }
    }

    /// Fetches the latest capture records
    pub async fn fetch_images(&self) -> Result<Vec<EarthImage>, FeedError> {
        tracing::debug!(url = %self.url, "fetching Earth imagery catalog");
        let request = self
            .client
            .get(&self.url)
            .query(&[("api_key", self.api_key.as_str())]);
        get_json(request).await
    }

    /// Downloads `url` into `dir` as `earth_image_<index + 1>.png`
    pub async fn download_image(
        &self,
        url: &str,
        dir: &Path,
        index: usize,
    ) -> Result<PathBuf, FeedError> {
        tracing::info!(%url, dir = %dir.display(), "downloading Earth image");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }
        let bytes = response.bytes().await?;

        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(download_file_name(index));
        tokio::fs::write(&path, &bytes).await?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"[
        {
            "identifier": "20250131001751",
            "caption": "This image was taken by NASA's EPIC camera onboard the NOAA DSCOVR spacecraft",
            "image": "epic_1b_20250131001751",
            "version": "03",
            "date": "2025-01-31 00:13:03"
        },
        {
            "identifier": "20250131012323",
            "caption": "",
            "image": "epic_1b_20250131012323",
            "date": "2025-01-31 01:18:35"
        }
    ]"#;

    #[test]
    fn test_decode_catalog() {
        let images: Vec<EarthImage> = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[1].identifier, "20250131012323");
    }

    #[test]
    fn test_image_url_template() {
        let images: Vec<EarthImage> = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(
            images[0].image_url(EPIC_ARCHIVE_URL),
            "https://epic.gsfc.nasa.gov/archive/natural/2025/01/31/png/epic_1b_20250131001751.png"
        );
    }

    #[test]
    fn test_image_url_tolerates_trailing_slash() {
        let images: Vec<EarthImage> = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(
            images[1].image_url("http://mirror/archive/"),
            "http://mirror/archive/2025/01/31/png/epic_1b_20250131012323.png"
        );
    }

    #[test]
    fn test_share_urls_encode_the_link() {
        let link = "https://epic.gsfc.nasa.gov/archive/natural/2025/01/31/png/epic_1b_1.png";

        assert_eq!(
            ShareTarget::WhatsApp.share_url(link),
            "https://wa.me/?text=https%3A%2F%2Fepic.gsfc.nasa.gov%2Farchive%2Fnatural%2F2025%2F01%2F31%2Fpng%2Fepic_1b_1.png"
        );
        for target in ShareTarget::ALL {
            let url = target.share_url(link);
            assert!(url.starts_with("https://"), "{url}");
            assert!(url.ends_with("epic_1b_1.png"), "{url}");
            assert!(!url.contains("gov/archive"), "{url}");
        }
    }

    #[test]
    fn test_download_file_name_is_one_based() {
        assert_eq!(download_file_name(0), "earth_image_1.png");
        assert_eq!(download_file_name(8), "earth_image_9.png");
    }

    #[test]
    fn test_captured_display() {
        let images: Vec<EarthImage> = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(images[0].captured_display(), "Captured on 2025-01-31 00:13:03");
    }
}
