use std::sync::Arc;

use anyhow::{Context, Result};

mod app;
mod handler;
mod tui;
mod ui;

use app::App;
use souschef_core::{Config, GeminiClient, ModelGateway};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().unwrap_or_else(|_| Config::new());

    let gateway: Arc<dyn ModelGateway> = Arc::new(
        GeminiClient::from_env()
            .context("set GEMINI_API_KEY to use the generative endpoint")?,
    );

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = tui::EventHandler::new();
    let mut app = App::new(&config, gateway);

    let result = run(&mut terminal, &mut events, &mut app).await;

    tui::restore()?;
    result
}

async fn run(terminal: &mut tui::Tui, events: &mut tui::EventHandler, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        let Some(event) = events.next().await else {
            break;
        };
        handler::handle_event(app, event).await?;

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
