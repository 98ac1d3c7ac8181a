//! Terminal runner (default binary).
//!
//! Polls `crossterm` input until the next tick, feeds the session the real
//! elapsed time, and redraws through the framebuffer renderer.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{ensure, Result};
use clap::Parser;
use crossterm::event::{self, Event};

use blockfall::core::{GameSession, GameSnapshot};
use blockfall::input::{handle_key_event, handle_key_release, should_quit};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{GameAction, NEXT_PREVIEW, SOFT_DROP_GRACE_MS, TICK_MS};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Seed for the piece sequence. The same seed replays the same pieces.
    /// Defaults to a value taken from the system clock.
    #[arg(short, long)]
    seed: Option<u32>,
    /// Input polling interval in milliseconds.
    #[arg(short, long, default_value_t = u64::from(TICK_MS))]
    tick_ms: u64,
    /// Number of upcoming pieces shown in the side panel.
    #[arg(short, long, default_value_t = NEXT_PREVIEW)]
    preview: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    ensure!(args.tick_ms > 0, "--tick-ms must be positive");
    ensure!(
        args.preview <= NEXT_PREVIEW,
        "--preview must be at most {NEXT_PREVIEW}"
    );
    let seed = args.seed.unwrap_or_else(clock_seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, &args, seed);
    // Always try to restore terminal state.
    let _ = term.exit();

    let (session, pieces) = result?;
    println!(
        "seed {seed}: score {} level {} lines {} pieces {pieces}",
        session.score(),
        session.level(),
        session.lines()
    );
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

/// Play until the user quits, returning the final session and the number of
/// pieces locked in it.
fn run(term: &mut TerminalRenderer, args: &Args, seed: u32) -> Result<(GameSession, u32)> {
    let mut session = GameSession::new(seed);
    let mut pieces = 0u32;
    let view = GameView::default().with_preview(args.preview);
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick = Duration::from_millis(args.tick_ms);
    let soft_drop_grace = Duration::from_millis(u64::from(SOFT_DROP_GRACE_MS));
    let mut last_tick = Instant::now();
    // Last soft drop press or repeat; terminals without release events rely
    // on this timing out.
    let mut soft_drop_seen: Option<Instant> = None;

    loop {
        session.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size()?;
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok((session, pieces));
                    }
                    if let Some(action) = handle_key_release(key) {
                        soft_drop_seen = None;
                        session.apply_action(action);
                    } else if let Some(action) = handle_key_event(key) {
                        match action {
                            GameAction::SoftDropStart => soft_drop_seen = Some(Instant::now()),
                            GameAction::Restart => pieces = 0,
                            _ => {}
                        }
                        session.apply_action(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick {
            last_tick = Instant::now();

            if soft_drop_seen.is_some_and(|t| t.elapsed() >= soft_drop_grace) {
                soft_drop_seen = None;
                session.apply_action(GameAction::SoftDropStop);
            }

            session.tick(u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX));
        }

        if session.take_last_event().is_some() {
            pieces += 1;
        }
    }
}
