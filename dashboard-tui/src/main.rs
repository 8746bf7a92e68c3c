mod app;
mod error;
mod input;
mod paths;
mod terminal;
mod ui;

use std::fs::File;
use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyEventKind};
use dashboard_lib::settings::{SettingsProvider, SqliteBackend};
use dashboard_lib::theme::ThemeMode;
use futures::StreamExt;
use log::{debug, error, info, trace, warn};
use simplelog::{Config, LevelFilter, WriteLogger};
use tokio::sync::mpsc;

use crate::app::{App, AppEvent, Effect};
use crate::error::AppError;
use crate::terminal::Terminal;

/// How often expired notices are swept.
const TICK: Duration = Duration::from_millis(250);

fn init_logging() {
    paths::rotate_logs();
    let path = paths::log_file().unwrap_or_else(|| "dashboard-tui.log".into());
    match File::create(&path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), file) {
                eprintln!("Failed to initialize logger: {}", e);
            }
        }
        Err(e) => eprintln!("Failed to create log file {}: {}", path.display(), e),
    }
}

async fn open_settings() -> SettingsProvider {
    let Some(path) = paths::settings_db() else {
        warn!("No data directory; settings will not persist");
        return SettingsProvider::in_memory();
    };
    match SqliteBackend::open(&path).await {
        Ok(backend) => {
            info!("Settings stored in {}", path.display());
            SettingsProvider::new(backend)
        }
        Err(e) => {
            error!("Failed to open settings at {}: {}", path.display(), e);
            SettingsProvider::in_memory()
        }
    }
}

/// Guesses light or dark from `COLORFGBG` ("fg;bg"), which many terminals set.
fn system_theme() -> Option<ThemeMode> {
    let value = std::env::var("COLORFGBG").ok()?;
    let bg: u8 = value.rsplit(';').next()?.parse().ok()?;
    // 0-6 and 8 are the dark ANSI colours
    Some(if bg < 7 || bg == 8 {
        ThemeMode::Dark
    } else {
        ThemeMode::Light
    })
}

async fn run_effect(app: &mut App, effect: Effect, tx: &mpsc::UnboundedSender<AppEvent>) {
    match effect {
        Effect::ToggleTheme => {
            let result = app.theme.toggle().await;
            app.on_theme_changed(result);
        }
        Effect::FollowSystemTheme => {
            let result = app.theme.follow_system(app.system_theme).await;
            app.on_theme_changed(result);
        }
        Effect::SaveProfile(task) => {
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = task.run().await;
                if tx.send(AppEvent::ProfileSaved(result)).is_err() {
                    debug!("Profile saved after the app closed");
                }
            });
        }
    }
}

async fn run() -> Result<(), AppError> {
    let settings = open_settings().await;
    let mut app = App::load(settings, system_theme()).await?;

    let mut terminal = Terminal::new()?;
    let mut events = EventStream::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut tick = tokio::time::interval(TICK);

    while app.running {
        terminal.draw(&app)?;

        tokio::select! {
            Some(event) = events.next() => match event? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    trace!("Key: {:?}", key);
                    if let Some(action) = input::map_key(&app, key) {
                        debug!("Action: {:?}", action);
                        if let Some(effect) = app.handle(action) {
                            run_effect(&mut app, effect, &tx).await;
                        }
                    }
                }
                _ => {}
            },
            Some(event) = rx.recv() => app.on_event(event),
            _ = tick.tick() => {
                app.notices.prune(Instant::now());
            }
        }
    }

    info!("Shutting down");
    Ok(())
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run().await {
        error!("Fatal: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
