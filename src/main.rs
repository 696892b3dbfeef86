mod app;
mod client;
mod config;
mod estimate;
mod logging;
mod ui;

use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state::AppState;
use crate::client::EstimationClient;
use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    // Load config
    let cfg = config::load_config()?;

    if let Some(path) = logging::init(&cfg.logging)? {
        info!(log_file = %path.display(), "logging initialized");
    }

    let client = EstimationClient::new(&cfg.service.base_url, cfg.service.timeout())
        .context("Invalid prediction service configuration")?;
    info!(base_url = client.base_url(), "starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, cfg, client).await;

    // Restore terminal
    restore_terminal()?;

    if let Err(e) = result {
        error!(error = %e, "exiting with error");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: config::AppConfig,
    client: EstimationClient,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let mut state = AppState::new(cfg);

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        loop {
            match reader.next().await {
                Some(Ok(event)) => {
                    if term_tx.send(AppEvent::Terminal(event)).is_err() {
                        break;
                    }
                }
                Some(Err(_)) => break,
                None => break,
            }
        }
    });

    // Spawn tick task (20 FPS = 50ms)
    let tick_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_millis(50));
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    // Location list is fetched once at startup
    if let Some(action) = handler::load_locations(&mut state) {
        dispatch(action, &mut state, &client, &event_tx);
    }

    // Initial render
    terminal.draw(|f| ui::render(f, &state))?;

    // Main event loop
    loop {
        let event = event_rx.recv().await;
        let Some(event) = event else { break };

        let actions = handler::handle_event(&mut state, event);
        for action in actions {
            dispatch(action, &mut state, &client, &event_tx);
        }

        if state.should_quit {
            info!("quit requested");
            break;
        }

        // Conditional render (only if dirty)
        if state.dirty {
            terminal.draw(|f| ui::render(f, &state))?;
            state.dirty = false;
        }
    }

    Ok(())
}

/// Run an action. Network calls are spawned and report back as events;
/// overlapping estimate requests are neither cancelled nor de-duplicated.
fn dispatch(
    action: Action,
    state: &mut AppState,
    client: &EstimationClient,
    event_tx: &mpsc::UnboundedSender<AppEvent>,
) {
    match action {
        Action::FetchLocations => {
            let client = client.clone();
            let tx = event_tx.clone();
            tokio::spawn(async move {
                let event = match client.fetch_locations().await {
                    Ok(locations) => AppEvent::LocationsLoaded { locations },
                    Err(e) => AppEvent::LocationsFailed {
                        error: e.to_string(),
                    },
                };
                let _ = tx.send(event);
            });
        }
        Action::FetchEstimate { request_id, input } => {
            let client = client.clone();
            let tx = event_tx.clone();
            tokio::spawn(async move {
                let event = match client.fetch_estimate(&input).await {
                    Ok(Some(price)) => AppEvent::EstimateReady { request_id, price },
                    Ok(None) => AppEvent::EstimateFailed {
                        request_id,
                        error: "form incomplete, nothing submitted".to_string(),
                    },
                    Err(e) => AppEvent::EstimateFailed {
                        request_id,
                        error: e.to_string(),
                    },
                };
                let _ = tx.send(event);
            });
        }
        Action::Quit => {
            state.should_quit = true;
        }
    }
}
