/// The advance function: one frame of the logical state machine.
///
/// Processing order while Playing, per buffered command:
///   1. Count the move (monotonic + since-reset counters)
///   2. Roll the block (pure kinematics, always succeeds)
///   3. Resolve tile effects against the effective grid
///   4. Apply effects to the session (grid mutation, phase changes)
///   5. Refresh switch latches from the final occupancy
///
/// Animated phases (intro, falling, winning, banners) consume no commands;
/// they tick their timer and run the expiry action when it fires. Move
/// commands arriving in any phase but Playing are silently dropped.

use crate::domain::block::{roll, Block, ControlMode, Dir};
use crate::domain::rules::{resolve, Effect};
use crate::domain::tile::Tile;
use crate::sim::event::GameEvent;
use crate::sim::session::{Phase, Session, Timer, FALL_PENALTY, MAX_ATTEMPTS, WIN_BONUS};

/// Abstract command from the input collaborator. One per discrete step;
/// no raw key codes cross this boundary.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Move(Dir),
    ResetLevel,
    LoadLevel(usize),
}

pub fn advance(s: &mut Session, cmd: Option<Command>) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match s.phase {
        Phase::Title => {
            if let Some(Command::LoadLevel(idx)) = cmd {
                s.load_level(idx);
            }
        }

        Phase::Playing => match cmd {
            Some(Command::Move(dir)) => do_move(s, dir, &mut events),
            Some(Command::ResetLevel) => {
                // A voluntary retry: no penalty, no attempt charged, but the
                // undone moves stop counting, same as on a fall.
                s.moves -= s.moves_since_reset;
                s.reload();
            }
            Some(Command::LoadLevel(idx)) => s.load_level(idx),
            None => {}
        },

        Phase::LevelIntro => {
            if s.anim.tick() {
                s.phase = Phase::Playing;
            }
        }

        Phase::Falling => {
            if s.anim.tick() {
                finalize_fall(s, &mut events);
            }
        }

        Phase::Winning => {
            if s.anim.tick() {
                s.load_level(s.level + 1);
            }
        }

        Phase::GameOver | Phase::GameComplete => match cmd {
            Some(Command::ResetLevel) => {
                s.reset_run();
                s.load_level(0);
            }
            Some(Command::LoadLevel(idx)) => {
                s.reset_run();
                s.load_level(idx);
            }
            _ => {
                if s.anim.tick() {
                    s.reset_run();
                }
            }
        },
    }

    events
}

// ══════════════════════════════════════════════════════════════
// Move processing
// ══════════════════════════════════════════════════════════════

fn do_move(s: &mut Session, dir: Dir, events: &mut Vec<GameEvent>) {
    // Every move counts, even one that ends in a fall: the since-reset
    // counter is clawed back from the total on the fall, not skipped here.
    s.moves += 1;
    s.moves_since_reset += 1;

    let (block, _) = roll(s.block, s.mode, dir);
    s.block = block;
    events.push(GameEvent::Moved);

    let effects = {
        let grid = s.grid();
        resolve(&grid, block, s.mode, &s.latches, s.rules())
    };

    for fx in effects {
        apply_effect(s, fx, events);
    }

    // Latches track occupancy only while the attempt keeps running.
    if s.phase == Phase::Playing {
        let block = s.block;
        for (bind, latch) in s.rules().switches.iter().zip(s.latches.iter_mut()) {
            latch.pressed = bind.is_pressed(block);
        }
    }
}

fn apply_effect(s: &mut Session, fx: Effect, events: &mut Vec<GameEvent>) {
    match fx {
        Effect::Fall => {
            s.phase = Phase::Falling;
            s.anim = Timer::new(s.timing.fall_ticks);
            events.push(GameEvent::Fell);
        }
        Effect::Win => {
            s.attempts = 1;
            s.score += WIN_BONUS;
            s.phase = Phase::Winning;
            s.anim = Timer::new(s.timing.win_ticks);
            events.push(GameEvent::Won);
        }
        Effect::ToggleBridge { binding } => {
            let open = !s.latches[binding].open;
            s.latches[binding].open = open;
            s.set_region(binding, open);
            events.push(GameEvent::SwitchToggled { open });
        }
        Effect::Collapse { cell } => {
            s.set_tile(cell, Tile::Hole);
            events.push(GameEvent::TileCollapsed { row: cell.row, col: cell.col });
        }
        Effect::EnterLever { mode, jump } => {
            s.mode = mode;
            if let Some((a, b)) = jump {
                s.block = Block { a, b };
                events.push(GameEvent::LeverEntered);
            }
        }
        Effect::ExitLever => {
            s.mode = ControlMode::Coupled;
        }
    }
}

fn finalize_fall(s: &mut Session, events: &mut Vec<GameEvent>) {
    s.attempts += 1;
    s.score -= FALL_PENALTY;
    s.moves -= s.moves_since_reset;
    if s.attempts > MAX_ATTEMPTS {
        s.phase = Phase::GameOver;
        s.anim = Timer::new(s.timing.banner_ticks);
        events.push(GameEvent::GameOver);
    } else {
        s.reload();
    }
}
