//! Terminal match-3 runner (default binary).
//!
//! Uses crossterm for input and a framebuffer-based renderer. The cursor
//! walks the grid; space swaps the selected block with the one under the
//! cursor.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use pixel_frenzy::core::Game;
use pixel_frenzy::services::Services;
use pixel_frenzy::term::{
    CueLine, FrameBuffer, GameView, ScoreFeed, TermScene, TermScreen, VIEW_HEIGHT, VIEW_WIDTH,
};
use pixel_frenzy::types::{GRID_HEIGHT, GRID_WIDTH, TICK_MS};

fn main() -> Result<()> {
    let mut screen = TermScreen::new();
    screen.enter()?;

    let result = run(&mut screen);

    // Always try to restore terminal state.
    let _ = screen.exit();
    result
}

fn run(screen: &mut TermScreen) -> Result<()> {
    let mut game = Game::new(time_seed());
    let mut scene = TermScene::new();
    let mut cue = CueLine::default();
    let mut feed = ScoreFeed::default();

    {
        let mut svc = services(&mut scene, &mut cue, &mut feed);
        game.start(&mut svc);
    }

    let view = GameView;
    let mut fb = FrameBuffer::new(VIEW_WIDTH, VIEW_HEIGHT);
    let mut cursor: (i8, i8) = (GRID_WIDTH as i8 / 2, 2);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        view.render(&game, &scene, cursor, &cue, &feed, &mut fb);
        screen.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let ctrl_c = key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL);
                    if ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                        return Ok(());
                    }

                    match key.code {
                        KeyCode::Left => cursor.0 = (cursor.0 - 1).max(0),
                        KeyCode::Right => cursor.0 = (cursor.0 + 1).min(GRID_WIDTH as i8 - 1),
                        KeyCode::Down => cursor.1 = (cursor.1 - 1).max(0),
                        KeyCode::Up => cursor.1 = (cursor.1 + 1).min(GRID_HEIGHT as i8 - 1),
                        KeyCode::Char(' ') | KeyCode::Enter => {
                            let mut svc = services(&mut scene, &mut cue, &mut feed);
                            game.select_cell(cursor.0, cursor.1, &mut svc);
                        }
                        KeyCode::Char('r') if game.is_game_over() => {
                            feed = ScoreFeed::default();
                            let mut svc = services(&mut scene, &mut cue, &mut feed);
                            game.teardown(&mut svc);
                            game.start(&mut svc);
                        }
                        _ => {}
                    }
                }
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            cue.tick(TICK_MS);
            feed.tick(TICK_MS);
            let mut svc = services(&mut scene, &mut cue, &mut feed);
            game.tick(TICK_MS, &mut svc);
        }
    }
}

fn services<'a>(
    scene: &'a mut TermScene,
    cue: &'a mut CueLine,
    feed: &'a mut ScoreFeed,
) -> Services<'a> {
    Services {
        render: scene,
        audio: cue,
        hooks: feed,
    }
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(0x5eed)
}
