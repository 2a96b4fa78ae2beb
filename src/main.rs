//! Terminal layout editor (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from
//! `block_layout::term`. Layouts persist to the JSON store named by
//! `BLOCK_LAYOUT_STORE_PATH`.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use block_layout::core::Editor;
use block_layout::store::{FileStore, LayoutStore};
use block_layout::term::{FrameBuffer, LayoutView, TerminalScreen, Viewport};
use block_layout::{App, EditorConfig};

fn main() -> Result<()> {
    let config = EditorConfig::from_env();
    init_logging(&config)?;
    info!(
        store = %config.store_path.display(),
        color = config.color.name(),
        "starting block-layout v{}",
        env!("CARGO_PKG_VERSION")
    );

    let store = LayoutStore::new(FileStore::new(&config.store_path));
    let mut app = App::new(Editor::with_color(config.color), store);

    let mut term = TerminalScreen::new();
    term.enter().context("entering terminal raw mode")?;

    let result = run(&mut term, &mut app);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!("exiting");
    result
}

/// Log to the configured file; the terminal itself is owned by the editor.
fn init_logging(config: &EditorConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("installing tracing subscriber")?;
    Ok(())
}

fn run(term: &mut TerminalScreen, app: &mut App<FileStore>) -> Result<()> {
    let view = LayoutView::new();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        app.render_into(&view, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse, &view, viewport),
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
