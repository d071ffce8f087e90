//! Timer-driven feed refresh
//!
//! Only the page on screen owns a repeating timer. Each tick (and each manual
//! refresh) runs the feature's fetch-and-cache routine on its own task and
//! reports back over a channel. Every fetch takes a fresh generation number so
//! the app can drop responses that were overtaken by a newer request or that
//! arrived after the page was left.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::cache::Fetched;
use crate::feeds::{FeedData, FeedHub, Feature};

/// Choices offered by the NEO page's interval selector, in seconds
pub const NEO_INTERVAL_CHOICES: [u64; 4] = [30, 60, 180, 300];

/// Messages sent from background fetches to the app
#[derive(Debug, Clone)]
pub enum RefreshMessage {
    /// A fetch was issued
    Started { feature: Feature, generation: u64 },
    /// A fetch finished; the error is already rendered to text
    Loaded {
        feature: Feature,
        generation: u64,
        result: Result<Fetched<FeedData>, String>,
    },
    /// An Earth image download finished
    ImageSaved(Result<PathBuf, String>),
}

/// Timer interval and cache freshness window of one feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSchedule {
    pub interval_secs: u64,
    pub freshness_secs: u64,
}

impl FeedSchedule {
    pub const fn new(interval_secs: u64, freshness_secs: u64) -> Self {
        Self {
            interval_secs,
            freshness_secs,
        }
    }

    pub fn interval(&self) -> Duration {
        // tokio panics on a zero period
        Duration::from_secs(self.interval_secs.max(1))
    }

    pub fn freshness_window(&self) -> Duration {
        Duration::from_secs(self.freshness_secs)
    }
}

/// Configuration for refresh intervals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    pub iss: FeedSchedule,
    pub neo: FeedSchedule,
    pub exoplanets: FeedSchedule,
    pub earth_view: FeedSchedule,
    pub space_weather: FeedSchedule,
    pub missions: FeedSchedule,
    /// Whether pages keep refreshing after the first load
    pub enabled: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            iss: FeedSchedule::new(30, 15),
            neo: FeedSchedule::new(30, 20),
            exoplanets: FeedSchedule::new(600, 600),
            earth_view: FeedSchedule::new(3600, 3600),
            space_weather: FeedSchedule::new(900, 600),
            missions: FeedSchedule::new(3600, 3600),
            enabled: true,
        }
    }
}

impl RefreshConfig {
    pub fn schedule(&self, feature: Feature) -> &FeedSchedule {
        match feature {
            Feature::Iss => &self.iss,
            Feature::Neo => &self.neo,
            Feature::Exoplanets => &self.exoplanets,
            Feature::EarthView => &self.earth_view,
            Feature::SpaceWeather => &self.space_weather,
            Feature::Missions => &self.missions,
        }
    }
}

/// Per-feature request counters
///
/// A response is current only while its generation is the newest one issued
/// for its feature.
#[derive(Debug, Default)]
pub struct Generations {
    counters: [AtomicU64; 6],
}

impl Generations {
    /// Takes the next generation for `feature`
    pub fn issue(&self, feature: Feature) -> u64 {
        self.counters[feature.index()].fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, feature: Feature, generation: u64) -> bool {
        self.counters[feature.index()].load(Ordering::SeqCst) == generation
    }

    /// Makes every outstanding generation of `feature` stale
    pub fn invalidate(&self, feature: Feature) {
        self.counters[feature.index()].fetch_add(1, Ordering::SeqCst);
    }
}

struct ActiveTimer {
    feature: Feature,
    /// `None` when auto-refresh is disabled and only the first load ran
    shutdown_tx: Option<mpsc::Sender<()>>,
}

/// Handle for controlling background refresh
pub struct RefreshHandle {
    /// Channel for receiving refresh messages
    pub receiver: mpsc::Receiver<RefreshMessage>,
    sender: mpsc::Sender<RefreshMessage>,
    hub: Arc<FeedHub>,
    generations: Arc<Generations>,
    config: RefreshConfig,
    download_dir: PathBuf,
    active: Option<ActiveTimer>,
}

impl RefreshHandle {
    /// Creates the handle; no timer runs until a page is activated
    pub fn spawn(hub: FeedHub, config: RefreshConfig, download_dir: PathBuf) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        Self {
            receiver,
            sender,
            hub: Arc::new(hub),
            generations: Arc::new(Generations::default()),
            config,
            download_dir,
            active: None,
        }
    }

    pub fn generations(&self) -> Arc<Generations> {
        Arc::clone(&self.generations)
    }

    pub fn active_feature(&self) -> Option<Feature> {
        self.active.as_ref().map(|timer| timer.feature)
    }

    /// Starts the timer of `feature` at `interval`, replacing whatever ran before
    ///
    /// The first tick fires immediately, which is the page's initial load. With
    /// auto-refresh disabled only that first load happens.
    pub fn activate(&mut self, feature: Feature, interval: Duration) {
        self.deactivate();

        if !self.config.enabled {
            self.request_refresh(feature);
            self.active = Some(ActiveTimer {
                feature,
                shutdown_tx: None,
            });
            return;
        }

        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let hub = Arc::clone(&self.hub);
        let generations = Arc::clone(&self.generations);
        let tx = self.sender.clone();

        tracing::debug!(?feature, ?interval, "starting refresh timer");
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(interval);
            loop {
                tokio::select! {
                    biased;
                    _ = shutdown_rx.recv() => {
                        break;
                    }
                    _ = interval.tick() => {
                        let generation = generations.issue(feature);
                        tokio::spawn(fetch_feature(
                            Arc::clone(&hub),
                            tx.clone(),
                            feature,
                            generation,
                        ));
                    }
                }
            }
        });

        self.active = Some(ActiveTimer {
            feature,
            shutdown_tx: Some(shutdown_tx),
        });
    }

    /// Leaves the active page: stops its timer and discards its outstanding responses
    pub fn deactivate(&mut self) {
        if let Some(timer) = self.active.take() {
            tracing::debug!(feature = ?timer.feature, "stopping refresh timer");
            if let Some(shutdown_tx) = timer.shutdown_tx {
                let _ = shutdown_tx.try_send(());
            }
            self.generations.invalidate(timer.feature);
        }
    }

    /// Fetches `feature` once, outside the timer
    ///
    /// The generation is taken here, so a later `deactivate` always overtakes it.
    pub fn request_refresh(&self, feature: Feature) {
        let generation = self.generations.issue(feature);
        tokio::spawn(fetch_feature(
            Arc::clone(&self.hub),
            self.sender.clone(),
            feature,
            generation,
        ));
    }

    /// Downloads an Earth image into the download directory
    pub fn save_image(&self, url: String, index: usize) {
        let hub = Arc::clone(&self.hub);
        let tx = self.sender.clone();
        let dir = self.download_dir.clone();
        tokio::spawn(async move {
            let result = hub
                .earth()
                .download_image(&url, &dir, index)
                .await
                .map_err(|e| {
                    tracing::warn!(%url, error = %e, "image download failed");
                    e.to_string()
                });
            let _ = tx.send(RefreshMessage::ImageSaved(result)).await;
        });
    }

    /// Stops the running timer
    pub fn shutdown(&mut self) {
        self.deactivate();
    }
}

async fn fetch_feature(
    hub: Arc<FeedHub>,
    tx: mpsc::Sender<RefreshMessage>,
    feature: Feature,
    generation: u64,
) {
    let _ = tx
        .send(RefreshMessage::Started {
            feature,
            generation,
        })
        .await;

    let result = hub.load(feature).await.map_err(|e| {
        tracing::warn!(?feature, error = %e, "feed fetch failed");
        e.to_string()
    });

    let _ = tx
        .send(RefreshMessage::Loaded {
            feature,
            generation,
            result,
        })
        .await;
}

/// Checks for pending refresh messages without blocking
pub fn try_recv(handle: &mut RefreshHandle) -> Option<RefreshMessage> {
    handle.receiver.try_recv().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheManager, ReadThroughCache, Source};
    use crate::config::AppConfig;
    use tempfile::TempDir;

    async fn next_message(handle: &mut RefreshHandle) -> RefreshMessage {
        tokio::time::timeout(Duration::from_secs(5), handle.receiver.recv())
            .await
            .expect("timed out waiting for refresh message")
            .expect("channel closed")
    }

    fn offline_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.endpoints.iss = "http://127.0.0.1:9/iss".to_string();
        config.endpoints.exoplanets = "http://127.0.0.1:9/bodies".to_string();
        config
    }

    #[test]
    fn test_refresh_config_default() {
        let config = RefreshConfig::default();
        assert_eq!(config.iss.interval(), Duration::from_secs(30));
        assert_eq!(config.iss.freshness_window(), Duration::from_secs(15));
        assert_eq!(config.neo.freshness_window(), Duration::from_secs(20));
        assert_eq!(config.exoplanets.interval(), Duration::from_secs(600));
        assert_eq!(config.earth_view.freshness_window(), Duration::from_secs(3600));
        assert!(config.enabled);
    }

    #[test]
    fn test_schedule_lookup() {
        let config = RefreshConfig::default();
        assert_eq!(config.schedule(Feature::SpaceWeather).interval_secs, 900);
        assert_eq!(config.schedule(Feature::Missions).interval_secs, 3600);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        assert_eq!(FeedSchedule::new(0, 0).interval(), Duration::from_secs(1));
        assert_eq!(FeedSchedule::new(0, 0).freshness_window(), Duration::ZERO);
    }

    #[test]
    fn test_only_newest_generation_is_current() {
        let generations = Generations::default();
        let first = generations.issue(Feature::Neo);
        let second = generations.issue(Feature::Neo);

        assert!(!generations.is_current(Feature::Neo, first));
        assert!(generations.is_current(Feature::Neo, second));
    }

    #[test]
    fn test_generations_are_per_feature() {
        let generations = Generations::default();
        let iss = generations.issue(Feature::Iss);
        generations.issue(Feature::Neo);

        assert!(generations.is_current(Feature::Iss, iss));
    }

    #[test]
    fn test_invalidate_drops_outstanding() {
        let generations = Generations::default();
        let issued = generations.issue(Feature::Iss);
        generations.invalidate(Feature::Iss);

        assert!(!generations.is_current(Feature::Iss, issued));
    }

    #[tokio::test]
    async fn test_activate_fetches_immediately() {
        let config = offline_config();
        let hub = FeedHub::new(&config, ReadThroughCache::disabled());
        let mut handle = RefreshHandle::spawn(hub, config.refresh.clone(), PathBuf::from("."));

        handle.activate(Feature::Iss, Duration::from_secs(3600));

        match next_message(&mut handle).await {
            RefreshMessage::Started { feature, .. } => assert_eq!(feature, Feature::Iss),
            other => panic!("unexpected message: {other:?}"),
        }
        match next_message(&mut handle).await {
            RefreshMessage::Loaded {
                feature, result, ..
            } => {
                assert_eq!(feature, Feature::Iss);
                assert!(result.is_err());
            }
            other => panic!("unexpected message: {other:?}"),
        }
        assert_eq!(handle.active_feature(), Some(Feature::Iss));
        handle.shutdown();
    }

    #[tokio::test]
    async fn test_deactivate_invalidates_generation() {
        let config = offline_config();
        let hub = FeedHub::new(&config, ReadThroughCache::disabled());
        let mut handle = RefreshHandle::spawn(hub, config.refresh.clone(), PathBuf::from("."));
        let generations = handle.generations();

        handle.activate(Feature::Iss, Duration::from_secs(3600));
        let generation = match next_message(&mut handle).await {
            RefreshMessage::Started { generation, .. } => generation,
            other => panic!("unexpected message: {other:?}"),
        };
        handle.deactivate();

        assert!(!generations.is_current(Feature::Iss, generation));
        assert!(handle.active_feature().is_none());
    }

    #[tokio::test]
    async fn test_refresh_requested_before_leaving_is_never_current() {
        let config = offline_config();
        let hub = FeedHub::new(&config, ReadThroughCache::disabled());
        let mut handle = RefreshHandle::spawn(hub, config.refresh.clone(), PathBuf::from("."));
        let generations = handle.generations();

        handle.activate(Feature::Iss, Duration::from_secs(3600));
        handle.request_refresh(Feature::Iss);
        handle.deactivate();

        let mut current = 0;
        while let Ok(Some(message)) =
            tokio::time::timeout(Duration::from_secs(2), handle.receiver.recv()).await
        {
            match message {
                RefreshMessage::Started { feature, generation }
                | RefreshMessage::Loaded {
                    feature, generation, ..
                } => {
                    if generations.is_current(feature, generation) {
                        current += 1;
                    }
                }
                RefreshMessage::ImageSaved(_) => {}
            }
        }

        assert_eq!(current, 0);
    }

    #[tokio::test]
    async fn test_manual_refresh_reads_through_cache() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheManager::with_dir(temp_dir.path().to_path_buf());
        store
            .write("exoplanets", &vec![crate::feeds::exoplanets::tests::planet("HD 1")])
            .unwrap();
        let config = offline_config();
        let hub = FeedHub::new(&config, ReadThroughCache::new(Some(store)));
        let mut handle = RefreshHandle::spawn(hub, config.refresh.clone(), PathBuf::from("."));

        handle.request_refresh(Feature::Exoplanets);
        next_message(&mut handle).await;

        match next_message(&mut handle).await {
            RefreshMessage::Loaded { result, .. } => {
                assert_eq!(result.unwrap().source, Source::Cache);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_disabled_refresh_loads_once_without_timer() {
        let config = offline_config();
        let hub = FeedHub::new(&config, ReadThroughCache::disabled());
        let refresh = RefreshConfig {
            enabled: false,
            ..Default::default()
        };
        let mut handle = RefreshHandle::spawn(hub, refresh, PathBuf::from("."));

        handle.activate(Feature::Iss, Duration::from_secs(1));

        assert!(matches!(
            next_message(&mut handle).await,
            RefreshMessage::Started { .. }
        ));
        assert!(matches!(
            next_message(&mut handle).await,
            RefreshMessage::Loaded { .. }
        ));
        assert_eq!(handle.active_feature(), Some(Feature::Iss));

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(try_recv(&mut handle).is_none());
    }
}
