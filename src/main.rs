//! Terminal Tetris runner (default binary).
//!
//! This is the primary gameplay entrypoint.
//! It uses crossterm for input and a custom framebuffer-based renderer.
//! Scores are persisted through a background [`ScoreService`].

mod app;

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use arcade_tetris::scores::ScoreService;
use arcade_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use arcade_tetris::types::TICK_MS;

use app::{App, Flow};

fn main() -> Result<()> {
    // Start before raw mode so a runtime failure is still readable.
    let service = match ScoreService::start_from_env() {
        Ok(s) => Some(s),
        Err(e) => {
            eprintln!("[Scores] disabled: {:#}", e);
            None
        }
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, service);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn seed_from_env() -> u32 {
    std::env::var("TETRIS_SEED")
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
}

fn run(term: &mut TerminalRenderer, service: Option<ScoreService>) -> Result<()> {
    let mut app = App::new(seed_from_env(), service);

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        app.poll_scores();

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let snap = app.session.snapshot();
        app.refresh_status();
        let hud = app.hud();
        view.render_into(&snap, &hud, &app.effects, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                // Repeats go through too; the session debounces them.
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if app.handle_key(key) == Flow::Quit {
                        return Ok(());
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            app.tick_elapsed(elapsed);
        }
    }
}
