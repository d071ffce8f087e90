//! OrbitX - Live space data in your terminal
//!
//! A terminal UI application that shows the ISS position, near-Earth objects,
//! exoplanets, Earth imagery, space-weather alerts and Mars rover missions.

use std::fs::{self, File};
use std::io;
use std::panic;
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use directories::ProjectDirs;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use orbitx::app::{App, Effect};
use orbitx::cache::{CacheManager, ReadThroughCache};
use orbitx::cli::{Cli, StartupConfig};
use orbitx::config::AppConfig;
use orbitx::feeds::FeedHub;
use orbitx::refresh::{try_recv, RefreshHandle};
use orbitx::settings::Settings;
use orbitx::ui;

/// Log file inside the cache directory
const LOG_FILE: &str = "orbitx.log";

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Sends logs to a file; the terminal belongs to the UI
fn init_tracing() {
    let Some(dirs) = ProjectDirs::from("", "", "orbitx") else {
        return;
    };
    let dir = dirs.cache_dir();
    if fs::create_dir_all(dir).is_err() {
        return;
    }
    let Ok(file) = File::create(dir.join(LOG_FILE)) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("orbitx=info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init();
}

/// Runs one side effect requested by the app
fn run_effect(effect: Effect, app: &mut App, refresh: &mut RefreshHandle, settings: &Settings) {
    match effect {
        Effect::None => {}
        Effect::Navigate(page) => match page.feature() {
            Some(feature) => refresh.activate(feature, app.refresh_interval(feature)),
            None => refresh.deactivate(),
        },
        Effect::Refresh(feature) => refresh.request_refresh(feature),
        Effect::RestartTimer { feature, interval } => refresh.activate(feature, interval),
        Effect::SaveImage { url, index } => refresh.save_image(url, index),
        Effect::CopyLink(url) => {
            let result = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(url));
            app.report_copy(result);
        }
        Effect::ToggleTheme => match settings.toggle_theme() {
            Ok(theme) => tracing::info!(theme = theme.label(), "theme changed"),
            Err(e) => {
                tracing::warn!(error = %e, "could not persist theme");
                app.status = Some(e.to_string());
            }
        },
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let startup = match StartupConfig::from_cli(&cli) {
        Ok(startup) => startup,
        Err(e) => {
            eprintln!("error: {e}");
            return Ok(ExitCode::from(2));
        }
    };

    init_tracing();

    let mut config = AppConfig::load();
    config.apply_startup(&startup);
    tracing::info!(page = ?startup.start_page, neo_date = %config.neo_date, "starting");

    let settings = Settings::load();
    let theme_rx = settings.subscribe();

    let store = if config.cache_enabled {
        CacheManager::new()
    } else {
        None
    };
    let hub = FeedHub::new(&config, ReadThroughCache::new(store));
    let mut refresh = RefreshHandle::spawn(hub, config.refresh.clone(), config.download_dir());
    let mut app = App::new(&startup, &config, refresh.generations());

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Initial load of the start page
    if let Some(feature) = app.page.feature() {
        refresh.activate(feature, app.refresh_interval(feature));
    }

    // Main event loop
    loop {
        let theme = *theme_rx.borrow();
        terminal.draw(|f| ui::render(f, &app, theme))?;

        while let Some(message) = try_recv(&mut refresh) {
            app.apply(message);
        }
        app.tick(Instant::now());

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                let effect = app.handle_key(key);
                run_effect(effect, &mut app, &mut refresh, &settings);
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    refresh.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(ExitCode::SUCCESS)
}
