//! Application state management for OrbitX
//!
//! This module contains the page state machine, per-feed view state and key
//! handling. Anything that has to touch the outside world (timers, downloads,
//! the settings file) is returned as an [`Effect`] for the event loop to run.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::cache::{Fetched, Source};
use crate::cli::StartupConfig;
use crate::config::AppConfig;
use crate::feeds::earth::EARTH_GRID_CAP;
use crate::feeds::missions::MISSION_STATUSES;
use crate::feeds::{
    EarthImage, Exoplanet, FeedData, Feature, IssPosition, NearEarthObject, Rover,
    SpaceWeatherAlert,
};
use crate::filter::{self, Query, SortOrder};
use crate::gallery::Gallery;
use crate::refresh::{Generations, RefreshConfig, RefreshMessage, NEO_INTERVAL_CHOICES};

/// Columns of the Earth View image grid
pub const EARTH_GRID_COLUMNS: usize = 3;

/// One screen of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Iss,
    Neo,
    Exoplanets,
    EarthView,
    SpaceWeather,
    Missions,
}

impl Page {
    /// Every page in navigation order
    pub const ALL: [Page; 7] = [
        Page::Home,
        Page::Iss,
        Page::Neo,
        Page::Exoplanets,
        Page::EarthView,
        Page::SpaceWeather,
        Page::Missions,
    ];

    /// Pages grouped under the Explore dropdown
    pub const EXPLORE: [Page; 3] = [Page::Exoplanets, Page::EarthView, Page::SpaceWeather];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Iss => "ISS Tracker",
            Page::Neo => "NEO Tracker",
            Page::Exoplanets => "Exoplanets",
            Page::EarthView => "Earth View",
            Page::SpaceWeather => "Space Weather",
            Page::Missions => "Missions",
        }
    }

    pub fn feature(self) -> Option<Feature> {
        match self {
            Page::Home => None,
            Page::Iss => Some(Feature::Iss),
            Page::Neo => Some(Feature::Neo),
            Page::Exoplanets => Some(Feature::Exoplanets),
            Page::EarthView => Some(Feature::EarthView),
            Page::SpaceWeather => Some(Feature::SpaceWeather),
            Page::Missions => Some(Feature::Missions),
        }
    }

    /// Parses a page name as given on the command line
    pub fn from_arg(s: &str) -> Option<Page> {
        match s.trim().to_lowercase().as_str() {
            "home" => Some(Page::Home),
            "iss" | "iss-tracker" => Some(Page::Iss),
            "neo" | "neo-tracker" | "asteroids" => Some(Page::Neo),
            "exoplanets" | "planets" => Some(Page::Exoplanets),
            "earth" | "earth-view" | "epic" => Some(Page::EarthView),
            "weather" | "space-weather" | "donki" => Some(Page::SpaceWeather),
            "missions" | "rovers" => Some(Page::Missions),
            _ => None,
        }
    }

    fn position(self) -> usize {
        Page::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    fn next(self) -> Page {
        Page::ALL[(self.position() + 1) % Page::ALL.len()]
    }

    fn previous(self) -> Page {
        Page::ALL[(self.position() + Page::ALL.len() - 1) % Page::ALL.len()]
    }
}

/// Side effects requested by key handling
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// The page changed; stop the old timer and start the new page's one
    Navigate(Page),
    /// Fetch the feature once, now
    Refresh(Feature),
    /// Restart the feature's timer at a new interval
    RestartTimer { feature: Feature, interval: Duration },
    /// Download an Earth image
    SaveImage { url: String, index: usize },
    /// Put a link on the system clipboard
    CopyLink(String),
    ToggleTheme,
}

/// What one page knows about its feed
#[derive(Debug, Clone)]
pub struct FeedState<T> {
    pub data: Option<T>,
    pub loading: bool,
    /// User-facing message of the last failed fetch
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Local>>,
    pub source: Option<Source>,
}

impl<T> Default for FeedState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            last_updated: None,
            source: None,
        }
    }
}

impl<T> FeedState<T> {
    /// Records the outcome of a fetch
    ///
    /// A failure keeps whatever was displayed before and only sets the error.
    /// A stale cache fallback shows the cached data together with the error.
    pub fn finish(&mut self, result: Result<Fetched<T>, String>, message: &str) {
        self.loading = false;
        match result {
            Ok(fetched) => {
                self.error = match fetched.source {
                    Source::Stale { .. } => Some(message.to_string()),
                    _ => None,
                };
                self.last_updated = Some(fetched.fetched_at.with_timezone(&Local));
                self.source = Some(fetched.source);
                self.data = Some(fetched.data);
            }
            Err(_) => {
                self.error = Some(message.to_string());
            }
        }
    }

    /// Loading with nothing to show yet
    pub fn is_initial_load(&self) -> bool {
        self.loading && self.data.is_none()
    }
}

/// Search, filter and cursor of one list page
#[derive(Debug, Clone, Default)]
pub struct ListView {
    pub query: Query,
    pub selected: usize,
    /// The search box has focus
    pub editing: bool,
}

impl ListView {
    fn with_order(order: SortOrder) -> Self {
        Self {
            query: Query {
                order,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn move_up(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = if self.selected == 0 {
            len - 1
        } else {
            self.selected - 1
        };
    }

    fn move_down(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1) % len;
    }

    fn clamp(&mut self, len: usize) {
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}

/// NEO page toggles
#[derive(Debug, Clone)]
pub struct NeoView {
    pub list: ListView,
    /// Show discovery date and orbital period on every card
    pub premium: bool,
    pub show_graph: bool,
    /// Current timer period in seconds
    pub interval_secs: u64,
    /// Object shown in the detail modal
    pub detail: Option<NearEarthObject>,
}

/// Main application struct managing state and data
pub struct App {
    pub page: Page,
    pub should_quit: bool,
    pub show_help: bool,
    pub explore_open: bool,
    pub explore_index: usize,
    /// Cursor on the home page's feature list
    pub home_selected: usize,
    /// One-line message shown in the status bar
    pub status: Option<String>,

    pub iss: FeedState<IssPosition>,
    pub neo: FeedState<Vec<NearEarthObject>>,
    pub exoplanets: FeedState<Vec<Exoplanet>>,
    pub earth: FeedState<Vec<EarthImage>>,
    pub space_weather: FeedState<Vec<SpaceWeatherAlert>>,
    pub missions: FeedState<Vec<Rover>>,

    pub neo_view: NeoView,
    pub exoplanet_view: ListView,
    pub weather_view: ListView,
    pub mission_view: ListView,
    /// Alert shown in the detail modal
    pub alert_detail: Option<SpaceWeatherAlert>,
    /// Cursor on the Earth View grid
    pub earth_cursor: usize,
    pub gallery: Gallery,

    pub neo_date: NaiveDate,
    pub archive_url: String,
    refresh: RefreshConfig,
    generations: Arc<Generations>,
}

impl App {
    /// Creates the app for `startup`, sharing `generations` with the refresh handle
    pub fn new(startup: &StartupConfig, config: &AppConfig, generations: Arc<Generations>) -> Self {
        Self {
            page: startup.start_page,
            should_quit: false,
            show_help: false,
            explore_open: false,
            explore_index: 0,
            home_selected: 0,
            status: None,
            iss: FeedState::default(),
            neo: FeedState::default(),
            exoplanets: FeedState::default(),
            earth: FeedState::default(),
            space_weather: FeedState::default(),
            missions: FeedState::default(),
            neo_view: NeoView {
                list: ListView::default(),
                premium: false,
                show_graph: false,
                interval_secs: config.refresh.neo.interval_secs,
                detail: None,
            },
            exoplanet_view: ListView::default(),
            weather_view: ListView::default(),
            mission_view: ListView::with_order(SortOrder::Ascending),
            alert_detail: None,
            earth_cursor: 0,
            gallery: Gallery::default(),
            neo_date: config.neo_date,
            archive_url: config.endpoints.epic_archive.clone(),
            refresh: config.refresh.clone(),
            generations,
        }
    }

    /// Timer period for `feature`; the NEO page uses the user's choice
    pub fn refresh_interval(&self, feature: Feature) -> Duration {
        match feature {
            Feature::Neo => Duration::from_secs(self.neo_view.interval_secs.max(1)),
            other => self.refresh.schedule(other).interval(),
        }
    }

    pub fn visible_neos(&self) -> Vec<&NearEarthObject> {
        visible(&self.neo, &self.neo_view.list.query)
    }

    pub fn visible_exoplanets(&self) -> Vec<&Exoplanet> {
        visible(&self.exoplanets, &self.exoplanet_view.query)
    }

    pub fn visible_alerts(&self) -> Vec<&SpaceWeatherAlert> {
        visible(&self.space_weather, &self.weather_view.query)
    }

    pub fn visible_missions(&self) -> Vec<&Rover> {
        visible(&self.missions, &self.mission_view.query)
    }

    /// Images shown in the Earth View grid
    pub fn earth_grid(&self) -> &[EarthImage] {
        let images = self.earth.data.as_deref().unwrap_or_default();
        &images[..images.len().min(EARTH_GRID_CAP)]
    }

    /// Image currently open in the viewer
    pub fn gallery_image(&self) -> Option<&EarthImage> {
        let images = self.earth.data.as_ref()?;
        images.get(self.gallery.selected()?)
    }

    /// Applies a message from the refresh system
    ///
    /// Responses whose generation is no longer the newest for their feature are dropped.
    pub fn apply(&mut self, message: RefreshMessage) {
        match message {
            RefreshMessage::Started {
                feature,
                generation,
            } => {
                if self.generations.is_current(feature, generation) {
                    self.set_loading(feature, true);
                }
            }
            RefreshMessage::Loaded {
                feature,
                generation,
                result,
            } => {
                if !self.generations.is_current(feature, generation) {
                    tracing::debug!(?feature, generation, "dropping superseded response");
                    return;
                }
                self.apply_loaded(feature, result);
            }
            RefreshMessage::ImageSaved(result) => {
                self.status = Some(match result {
                    Ok(path) => format!("Saved image to {}", path.display()),
                    Err(e) => format!("Failed to save image: {e}"),
                });
            }
        }
    }

    /// Shows how copying a link to the clipboard went
    pub fn report_copy(&mut self, result: Result<(), arboard::Error>) {
        self.status = Some(match result {
            Ok(()) => "Link copied!".to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "clipboard error");
                format!("Clipboard error: {e}")
            }
        });
    }

    fn apply_loaded(&mut self, feature: Feature, result: Result<Fetched<FeedData>, String>) {
        let message = feature.error_message();
        match feature {
            Feature::Iss => self.iss.finish(
                extract(result, |d| match d {
                    FeedData::Iss(position) => Some(position),
                    _ => None,
                }),
                message,
            ),
            Feature::Neo => {
                self.neo.finish(
                    extract(result, |d| match d {
                        FeedData::Neo(objects) => Some(objects),
                        _ => None,
                    }),
                    message,
                );
                let len = self.visible_neos().len();
                self.neo_view.list.clamp(len);
            }
            Feature::Exoplanets => {
                self.exoplanets.finish(
                    extract(result, |d| match d {
                        FeedData::Exoplanets(planets) => Some(planets),
                        _ => None,
                    }),
                    message,
                );
                let len = self.visible_exoplanets().len();
                self.exoplanet_view.clamp(len);
            }
            Feature::EarthView => {
                self.earth.finish(
                    extract(result, |d| match d {
                        FeedData::EarthView(images) => Some(images),
                        _ => None,
                    }),
                    message,
                );
                let total = self.earth.data.as_ref().map_or(0, Vec::len);
                self.gallery.set_len(total);
                let grid = self.earth_grid().len();
                if self.earth_cursor >= grid {
                    self.earth_cursor = grid.saturating_sub(1);
                }
            }
            Feature::SpaceWeather => {
                self.space_weather.finish(
                    extract(result, |d| match d {
                        FeedData::SpaceWeather(alerts) => Some(alerts),
                        _ => None,
                    }),
                    message,
                );
                let len = self.visible_alerts().len();
                self.weather_view.clamp(len);
            }
            Feature::Missions => {
                self.missions.finish(
                    extract(result, |d| match d {
                        FeedData::Missions(rovers) => Some(rovers),
                        _ => None,
                    }),
                    message,
                );
                let len = self.visible_missions().len();
                self.mission_view.clamp(len);
            }
        }
    }

    fn set_loading(&mut self, feature: Feature, loading: bool) {
        match feature {
            Feature::Iss => self.iss.loading = loading,
            Feature::Neo => self.neo.loading = loading,
            Feature::Exoplanets => self.exoplanets.loading = loading,
            Feature::EarthView => self.earth.loading = loading,
            Feature::SpaceWeather => self.space_weather.loading = loading,
            Feature::Missions => self.missions.loading = loading,
        }
    }

    /// Advances time-driven UI state; returns true when something changed
    pub fn tick(&mut self, now: Instant) -> bool {
        self.gallery.tick(now)
    }

    /// Handles keyboard input
    ///
    /// # Key Bindings
    /// - `q`: Quit the application
    /// - `Tab`/`Shift-Tab`, `1`-`7`: Switch page
    /// - `e`: Open the Explore menu
    /// - `t`: Toggle light/dark theme
    /// - `r`: Refresh the current page
    /// - `/`: Search the current list
    /// - `?`: Toggle help
    /// - `Esc`: Close / go back to Home / quit from Home
    pub fn handle_key(&mut self, key_event: KeyEvent) -> Effect {
        if key_event.kind != KeyEventKind::Press {
            return Effect::None;
        }

        // Help overlay intercepts all keys when shown
        if self.show_help {
            if matches!(
                key_event.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return Effect::None;
        }

        if let Some(view) = self.search_view_mut() {
            return Self::handle_search_key(view, key_event.code);
        }
        if self.explore_open {
            return self.handle_explore_key(key_event.code);
        }
        if self.gallery.is_open() {
            return self.handle_gallery_key(key_event.code);
        }
        if self.alert_detail.is_some() || self.neo_view.detail.is_some() {
            if matches!(
                key_event.code,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')
            ) {
                self.alert_detail = None;
                self.neo_view.detail = None;
            }
            return Effect::None;
        }

        match key_event.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                Effect::None
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                Effect::None
            }
            KeyCode::Char('t') => Effect::ToggleTheme,
            KeyCode::Char('e') => {
                self.explore_open = true;
                self.explore_index = Page::EXPLORE
                    .iter()
                    .position(|p| *p == self.page)
                    .unwrap_or(0);
                Effect::None
            }
            KeyCode::Tab => self.navigate(self.page.next()),
            KeyCode::BackTab => self.navigate(self.page.previous()),
            KeyCode::Char(c @ '1'..='7') => {
                let index = c as usize - '1' as usize;
                self.navigate(Page::ALL[index])
            }
            KeyCode::Char('r') => match self.page.feature() {
                Some(feature) => {
                    self.status = None;
                    Effect::Refresh(feature)
                }
                None => Effect::None,
            },
            KeyCode::Esc => {
                if self.page == Page::Home {
                    self.should_quit = true;
                    Effect::None
                } else {
                    self.navigate(Page::Home)
                }
            }
            code => self.handle_page_key(code),
        }
    }

    fn handle_page_key(&mut self, code: KeyCode) -> Effect {
        match self.page {
            Page::Home => match code {
                KeyCode::Up | KeyCode::Char('k') => {
                    let count = Page::ALL.len() - 1;
                    self.home_selected = (self.home_selected + count - 1) % count;
                    Effect::None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.home_selected = (self.home_selected + 1) % (Page::ALL.len() - 1);
                    Effect::None
                }
                KeyCode::Enter => self.navigate(Page::ALL[self.home_selected + 1]),
                _ => Effect::None,
            },
            Page::Iss => Effect::None,
            Page::Neo => {
                let len = self.visible_neos().len();
                match code {
                    KeyCode::Up | KeyCode::Char('k') => self.neo_view.list.move_up(len),
                    KeyCode::Down | KeyCode::Char('j') => self.neo_view.list.move_down(len),
                    KeyCode::Char('/') => self.neo_view.list.editing = true,
                    KeyCode::Char('p') => self.neo_view.premium = !self.neo_view.premium,
                    KeyCode::Char('g') => self.neo_view.show_graph = !self.neo_view.show_graph,
                    KeyCode::Char('i') => return self.cycle_neo_interval(),
                    KeyCode::Enter => {
                        self.neo_view.detail = self
                            .visible_neos()
                            .get(self.neo_view.list.selected)
                            .map(|neo| (*neo).clone());
                    }
                    _ => {}
                }
                Effect::None
            }
            Page::Exoplanets => {
                let len = self.visible_exoplanets().len();
                match code {
                    KeyCode::Up | KeyCode::Char('k') => self.exoplanet_view.move_up(len),
                    KeyCode::Down | KeyCode::Char('j') => self.exoplanet_view.move_down(len),
                    KeyCode::Char('/') => self.exoplanet_view.editing = true,
                    _ => {}
                }
                Effect::None
            }
            Page::EarthView => self.handle_earth_key(code),
            Page::SpaceWeather => {
                let len = self.visible_alerts().len();
                match code {
                    KeyCode::Up | KeyCode::Char('k') => self.weather_view.move_up(len),
                    KeyCode::Down | KeyCode::Char('j') => self.weather_view.move_down(len),
                    KeyCode::Char('/') => self.weather_view.editing = true,
                    KeyCode::Char('s') => {
                        self.weather_view.query.order = self.weather_view.query.order.next();
                    }
                    KeyCode::Enter => {
                        self.alert_detail = self
                            .visible_alerts()
                            .get(self.weather_view.selected)
                            .map(|alert| (*alert).clone());
                    }
                    _ => {}
                }
                Effect::None
            }
            Page::Missions => {
                let len = self.visible_missions().len();
                match code {
                    KeyCode::Up | KeyCode::Char('k') => self.mission_view.move_up(len),
                    KeyCode::Down | KeyCode::Char('j') => self.mission_view.move_down(len),
                    KeyCode::Char('/') => self.mission_view.editing = true,
                    KeyCode::Char('f') => {
                        self.mission_view.query.status =
                            self.mission_view.query.status.cycle(&MISSION_STATUSES);
                        self.mission_view.selected = 0;
                    }
                    KeyCode::Char('s') => {
                        self.mission_view.query.order = match self.mission_view.query.order {
                            SortOrder::Ascending => SortOrder::Descending,
                            _ => SortOrder::Ascending,
                        };
                    }
                    _ => {}
                }
                Effect::None
            }
        }
    }

    fn handle_earth_key(&mut self, code: KeyCode) -> Effect {
        let count = self.earth_grid().len();
        if count == 0 {
            return Effect::None;
        }
        match code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.earth_cursor = (self.earth_cursor + count - 1) % count;
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.earth_cursor = (self.earth_cursor + 1) % count;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.earth_cursor >= EARTH_GRID_COLUMNS {
                    self.earth_cursor -= EARTH_GRID_COLUMNS;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.earth_cursor + EARTH_GRID_COLUMNS < count {
                    self.earth_cursor += EARTH_GRID_COLUMNS;
                }
            }
            KeyCode::Enter => {
                self.gallery.open(self.earth_cursor);
            }
            _ => {}
        }
        Effect::None
    }

    fn handle_gallery_key(&mut self, code: KeyCode) -> Effect {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => self.gallery.close(),
            KeyCode::Left | KeyCode::Char('h') => self.gallery.previous(),
            KeyCode::Right | KeyCode::Char('l') => self.gallery.next(),
            KeyCode::Char(' ') | KeyCode::Char('p') => self.gallery.toggle_play(Instant::now()),
            KeyCode::Char('d') => {
                let target = self.gallery.selected().zip(
                    self.gallery_image()
                        .map(|image| (image.image_url(&self.archive_url), image.image.clone())),
                );
                if let Some((index, (url, name))) = target {
                    self.status = Some(format!("Saving {name}..."));
                    return Effect::SaveImage { url, index };
                }
            }
            KeyCode::Char('c') => {
                if let Some(url) = self.gallery_image().map(|image| image.image_url(&self.archive_url)) {
                    return Effect::CopyLink(url);
                }
            }
            _ => {}
        }
        Effect::None
    }

    fn handle_explore_key(&mut self, code: KeyCode) -> Effect {
        let count = Page::EXPLORE.len();
        match code {
            KeyCode::Esc | KeyCode::Char('e') => {
                self.explore_open = false;
                Effect::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.explore_index = (self.explore_index + count - 1) % count;
                Effect::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.explore_index = (self.explore_index + 1) % count;
                Effect::None
            }
            KeyCode::Enter => self.navigate(Page::EXPLORE[self.explore_index]),
            _ => Effect::None,
        }
    }

    fn handle_search_key(view: &mut ListView, code: KeyCode) -> Effect {
        match code {
            KeyCode::Esc | KeyCode::Enter => view.editing = false,
            KeyCode::Backspace => {
                view.query.search.pop();
                view.selected = 0;
            }
            KeyCode::Char(c) => {
                view.query.search.push(c);
                view.selected = 0;
            }
            _ => {}
        }
        Effect::None
    }

    fn search_view_mut(&mut self) -> Option<&mut ListView> {
        let view = match self.page {
            Page::Neo => &mut self.neo_view.list,
            Page::Exoplanets => &mut self.exoplanet_view,
            Page::SpaceWeather => &mut self.weather_view,
            Page::Missions => &mut self.mission_view,
            _ => return None,
        };
        view.editing.then_some(view)
    }

    /// Active search box, for rendering the cursor
    pub fn search_view(&self) -> Option<&ListView> {
        match self.page {
            Page::Neo => Some(&self.neo_view.list),
            Page::Exoplanets => Some(&self.exoplanet_view),
            Page::SpaceWeather => Some(&self.weather_view),
            Page::Missions => Some(&self.mission_view),
            _ => None,
        }
    }

    /// Moves to the next interval choice and asks for the NEO timer to restart
    fn cycle_neo_interval(&mut self) -> Effect {
        let current = self.neo_view.interval_secs;
        let next = NEO_INTERVAL_CHOICES
            .iter()
            .copied()
            .find(|&secs| secs > current)
            .unwrap_or(NEO_INTERVAL_CHOICES[0]);
        self.neo_view.interval_secs = next;
        Effect::RestartTimer {
            feature: Feature::Neo,
            interval: Duration::from_secs(next),
        }
    }

    fn navigate(&mut self, page: Page) -> Effect {
        self.explore_open = false;
        if page == self.page {
            return Effect::None;
        }
        if let Some(feature) = self.page.feature() {
            // Responses for the page being left are discarded, so nothing will clear this
            self.set_loading(feature, false);
        }
        self.gallery.close();
        self.alert_detail = None;
        self.neo_view.detail = None;
        self.status = None;
        self.page = page;
        Effect::Navigate(page)
    }
}

fn visible<'a, T: filter::Searchable>(state: &'a FeedState<Vec<T>>, query: &Query) -> Vec<&'a T> {
    state
        .data
        .as_deref()
        .map(|items| filter::apply(items, query))
        .unwrap_or_default()
}

fn extract<T>(
    result: Result<Fetched<FeedData>, String>,
    pick: impl FnOnce(FeedData) -> Option<T>,
) -> Result<Fetched<T>, String> {
    let Fetched {
        data,
        source,
        fetched_at,
    } = result?;
    let data = pick(data).ok_or_else(|| "unexpected payload".to_string())?;
    Ok(Fetched {
        data,
        source,
        fetched_at,
    })
}
