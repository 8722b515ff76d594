use quire::adapters::{FileSessionStore, ReqwestHttpClient};
use quire::app::App;
use quire::auth::{spawn_refresh_loop, spawn_session_watcher, SessionManager};
use quire::backend::Backend;
use quire::cli::{parse_args, run_cli_command};
use quire::config::AppConfig;
use quire::terminal::{setup_panic_hook, TerminalManager};
use quire::{logging, ui};

use color_eyre::Result;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::{backend::Backend as TerminalBackend, Terminal};
use std::sync::Arc;
use std::time::Duration;

/// Spinner and notice refresh rate.
const TICK: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    if let Some(result) = run_cli_command(parse_args(std::env::args())) {
        return result;
    }

    color_eyre::install()?;

    // Configuration problems are reported before the terminal is touched.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("quire: {}", e);
            eprintln!("Run `quire --help` for the available settings.");
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init() {
        eprintln!("Warning: logging disabled: {}", e.user_message());
    }

    setup_panic_hook();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(config))
}

async fn run(config: AppConfig) -> Result<()> {
    let sessions = Arc::new(FileSessionStore::new(SessionManager::with_path(
        config.session_path.clone(),
    )));
    let backend = Backend::new(
        config.backend.clone(),
        Arc::new(ReqwestHttpClient::new()),
        sessions,
    );

    let mut app = App::new(config, backend);
    let watcher = spawn_session_watcher(
        app.backend.auth.clone(),
        app.backend.store.clone(),
        app.message_tx.clone(),
    );
    let refresher = spawn_refresh_loop(app.backend.auth.clone());
    app.initialize();

    let mut manager = TerminalManager::new()?;
    let result = run_app(manager.terminal(), &mut app).await;
    let restored = manager.restore();

    watcher.abort();
    refresher.abort();
    tracing::info!("quire exiting");
    result.and(restored)
}

async fn run_app<B: TerminalBackend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();
    let mut ticker = tokio::time::interval(TICK);

    // Take the message receiver from the app (we need ownership for select!)
    let Some(mut message_rx) = app.message_rx.take() else {
        return Ok(());
    };

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, &mut *app))?;
            app.needs_redraw = false;
        }

        tokio::select! {
            _ = ticker.tick() => {
                app.tick();
            }

            event = event_stream.next() => {
                match event {
                    Some(Ok(Event::Key(key))) => app.handle_key(key),
                    Some(Ok(Event::Paste(text))) => app.handle_paste(&text),
                    Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!("Terminal event error: {}", e);
                        app.should_quit = true;
                    }
                    None => app.should_quit = true,
                }
            }

            Some(msg) = message_rx.recv() => {
                app.handle_message(msg);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
