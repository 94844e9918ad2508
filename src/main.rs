mod app;
mod config;
mod handler;
mod inference;
mod logging;
mod menu;
mod pipeline;
mod theme;
mod tui;
mod ui;

use anyhow::Result;

use app::App;
use config::Config;
use inference::InferenceError;
use tui::EventHandler;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init()?;

    let config = Config::load().unwrap_or_else(|err| {
        tracing::warn!("could not load config, using defaults: {err}");
        Config::new()
    });
    let mut app = App::new(&config);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new();

    let result = run(&mut terminal, &mut events, &mut app).await;
    tui::restore()?;
    result
}

async fn run(terminal: &mut tui::Tui, events: &mut EventHandler, app: &mut App) -> Result<()> {
    while !app.should_quit {
        poll_inference(app).await;

        terminal.draw(|frame| ui::render(app, frame))?;

        if let Some(event) = events.next().await {
            handler::handle_event(app, event);
        }
    }
    Ok(())
}

/// Resolve the in-flight generation request once its task has finished.
/// The tick event guarantees this is reached at least every 250ms.
async fn poll_inference(app: &mut App) {
    let finished = app
        .inference_task
        .as_ref()
        .is_some_and(|task| task.is_finished());
    if !finished {
        return;
    }

    if let Some(task) = app.inference_task.take() {
        match task.await {
            Ok(outcome) => app.resolve(outcome),
            Err(err) => {
                tracing::error!("inference task panicked or was cancelled: {err}");
                app.resolve(Err(InferenceError::TaskFailed));
            }
        }
    }
}
