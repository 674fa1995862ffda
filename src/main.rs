/// Entry point and game loop.
///
/// One frame: drain terminal input, translate it into at most one abstract
/// command for the core, advance the session on the tick boundary, forward
/// the emitted events to the sound engine, render the snapshot.

mod config;
mod domain;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use config::GameConfig;
use domain::block::Dir;
use sim::session::{Phase, Session};
use sim::step::{self, Command};
use ui::input::InputState;
use ui::renderer::Renderer;
use ui::sound::SoundEngine;

const FRAME_SLEEP: Duration = Duration::from_millis(5);

fn main() {
    let config = GameConfig::load();
    let mut session = Session::new(config.timing.clone());

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let sound = if config.sound_enabled {
        SoundEngine::new()
    } else {
        None
    };

    let result = game_loop(&mut session, &mut renderer, sound.as_ref(), &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }
    if let Err(e) = result {
        eprintln!("Game error: {e}");
    }

    println!();
    println!("Thanks for playing RollCube!");
    println!("Final score: {}", session.score);
}

fn game_loop(
    session: &mut Session,
    renderer: &mut Renderer,
    sound: Option<&SoundEngine>,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut input = InputState::new();
    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(config.timing.tick_rate_ms);

    // Input is buffered: the freshest command waits here until the next
    // tick boundary, so the core consumes at most one per discrete step.
    let mut pending: Option<Command> = None;

    loop {
        input.drain_events();
        if input.ctrl_c_pressed() || input.any_pressed(KEYS_QUIT) {
            break;
        }

        if let Some(cmd) = read_command(session, &input) {
            pending = Some(cmd);
        }

        if last_tick.elapsed() >= tick_rate {
            let events = step::advance(session, pending.take());
            if let Some(sfx) = sound {
                for event in &events {
                    sfx.handle_event(event);
                }
            }
            last_tick = Instant::now();
        }

        renderer.render(session)?;
        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

// ── Key Constants ──

const KEYS_NORTH: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const KEYS_SOUTH: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const KEYS_WEST: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const KEYS_EAST: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const KEYS_RESTART: &[KeyCode] = &[KeyCode::Char('r'), KeyCode::Char('R')];
const KEYS_CONFIRM: &[KeyCode] = &[KeyCode::Enter, KeyCode::Char(' ')];
const KEYS_QUIT: &[KeyCode] = &[KeyCode::Char('q'), KeyCode::Char('Q'), KeyCode::Esc];

/// Translate fresh key presses into the phase-appropriate command.
/// Phases with no accepted input simply return None; the core drops
/// anything else anyway.
fn read_command(session: &Session, kb: &InputState) -> Option<Command> {
    match session.phase {
        Phase::Title => {
            if kb.any_pressed(KEYS_CONFIRM) {
                return Some(Command::LoadLevel(0));
            }
            if let Some(d) = kb.digit_pressed() {
                let idx = d as usize;
                if (1..=sim::level::count()).contains(&idx) {
                    return Some(Command::LoadLevel(idx - 1));
                }
            }
            None
        }
        Phase::Playing => {
            if let Some(dir) = detect_direction(kb) {
                return Some(Command::Move(dir));
            }
            if kb.any_pressed(KEYS_RESTART) {
                return Some(Command::ResetLevel);
            }
            None
        }
        Phase::GameOver | Phase::GameComplete => {
            if kb.any_pressed(KEYS_CONFIRM) {
                Some(Command::ResetLevel)
            } else {
                None
            }
        }
        _ => None,
    }
}

fn detect_direction(kb: &InputState) -> Option<Dir> {
    if kb.any_pressed(KEYS_NORTH) {
        Some(Dir::North)
    } else if kb.any_pressed(KEYS_SOUTH) {
        Some(Dir::South)
    } else if kb.any_pressed(KEYS_WEST) {
        Some(Dir::West)
    } else if kb.any_pressed(KEYS_EAST) {
        Some(Dir::East)
    } else {
        None
    }
}
