/// Session: the complete logical state of a run.
///
/// ## Tile layers
///
/// Two layers, composed at load time:
///   - `base_tiles` — the catalog layout as parsed. **Never mutated** after load.
///   - `tiles`      — the effective grid (base + switch toggles + collapses).
///
/// All runtime grid mutation goes through `set_tile()` / `set_region()`.
/// `reload()` resets `tiles = base_tiles.clone()`, so switch toggles and
/// collapses are scoped to one attempt.
///
/// ## Snapshot
///
/// The session *is* the read-only snapshot the presentation layer consumes
/// each frame: level id, effective grid, block occupancy, control mode,
/// attempts, moves, score and phase are all plain public fields. Rendering
/// and audio never get a mutable borrow.

use crate::config::TimingConfig;
use crate::domain::block::{Block, Cell, ControlMode};
use crate::domain::rules::{GridView, RuleSet, SwitchLatch, EMPTY_RULES};
use crate::domain::tile::Tile;
use crate::sim::level::{self, LevelDef};

pub const MAX_ATTEMPTS: u32 = 3;
pub const WIN_BONUS: i32 = 100;
pub const FALL_PENALTY: i32 = 10;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Title,
    LevelIntro,
    Playing,
    Falling,
    Winning,
    GameOver,
    GameComplete,
}

/// Count-down timer driving the animated phases.
/// One tick per frame; the expiry action lives with the phase logic.
#[derive(Clone, Copy, Debug)]
pub struct Timer {
    remaining: u32,
}

impl Timer {
    pub fn new(ticks: u32) -> Self {
        Timer { remaining: ticks }
    }

    pub fn idle() -> Self {
        Timer { remaining: 0 }
    }

    /// Advance one frame. Returns true on the tick that reaches zero.
    pub fn tick(&mut self) -> bool {
        if self.remaining > 0 {
            self.remaining -= 1;
            self.remaining == 0
        } else {
            false
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

pub struct Session {
    // ── Tile layers ──
    pub base_tiles: Vec<Vec<Tile>>,
    pub tiles: Vec<Vec<Tile>>,

    // ── Block ──
    pub block: Block,
    pub mode: ControlMode,
    pub latches: Vec<SwitchLatch>,
    start: Cell,

    // ── Progress ──
    pub level: usize,
    pub attempts: u32,
    pub moves: u32,
    pub moves_since_reset: u32,
    pub score: i32,

    // ── Lifecycle ──
    pub phase: Phase,
    pub anim: Timer,
    pub timing: TimingConfig,

    rules: &'static RuleSet,
}

impl Session {
    pub fn new(timing: TimingConfig) -> Self {
        Session {
            base_tiles: vec![],
            tiles: vec![],
            block: Block::standing_at(Cell::default()),
            mode: ControlMode::Coupled,
            latches: vec![],
            start: Cell::default(),
            level: 0,
            attempts: 1,
            moves: 0,
            moves_since_reset: 0,
            score: 0,
            phase: Phase::Title,
            anim: Timer::idle(),
            timing,
            rules: &EMPTY_RULES,
        }
    }

    pub fn grid(&self) -> GridView {
        GridView { tiles: &self.tiles }
    }

    pub fn rules(&self) -> &'static RuleSet {
        self.rules
    }

    /// Load a catalog level fresh. Past the end of the catalog the run
    /// ends in the "you win" state — an out-of-range request is not an error.
    pub fn load_level(&mut self, idx: usize) {
        let Some(def) = level::get(idx) else {
            self.phase = Phase::GameComplete;
            self.anim = Timer::new(self.timing.banner_ticks);
            return;
        };
        self.level = idx;
        self.load_def(def);
    }

    /// Install a level definition as the pristine state of a new attempt run.
    pub fn load_def(&mut self, def: &'static LevelDef) {
        self.base_tiles = level::parse(def);
        self.rules = &def.rules;
        self.start = def.start;
        self.reload();
    }

    /// Reset the current level to its pristine layout: undoes switch
    /// toggles and collapses, re-stands the block, re-couples control.
    /// Attempts, score and the monotonic move counter are preserved.
    pub fn reload(&mut self) {
        self.tiles = self.base_tiles.clone();
        self.block = Block::standing_at(self.start);
        self.mode = ControlMode::Coupled;
        self.latches = vec![SwitchLatch::default(); self.rules.switches.len()];
        self.moves_since_reset = 0;
        self.phase = Phase::LevelIntro;
        self.anim = Timer::new(self.timing.intro_ticks);
    }

    /// Start a fresh run from the title screen state.
    pub fn reset_run(&mut self) {
        self.attempts = 1;
        self.moves = 0;
        self.moves_since_reset = 0;
        self.score = 0;
        self.level = 0;
        self.phase = Phase::Title;
        self.anim = Timer::idle();
    }

    // ── Runtime grid mutation ──

    pub fn set_tile(&mut self, cell: Cell, tile: Tile) {
        if cell.in_bounds() {
            self.tiles[cell.row as usize][cell.col as usize] = tile;
        }
    }

    /// Open or close the bridge region of switch binding `idx`.
    pub fn set_region(&mut self, idx: usize, open: bool) {
        let region = self.rules.switches[idx].region;
        let tile = if open { Tile::Bridge } else { Tile::Hole };
        for &c in region {
            self.set_tile(c, tile);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(TimingConfig::default())
    }

    #[test]
    fn load_level_installs_pristine_state() {
        let mut s = session();
        s.load_level(1);
        assert_eq!(s.level, 1);
        assert_eq!(s.phase, Phase::LevelIntro);
        assert_eq!(s.block, Block::standing_at(Cell::new(3, 1)));
        assert_eq!(s.mode, ControlMode::Coupled);
        assert_eq!(s.latches.len(), 2);
        assert_eq!(s.moves_since_reset, 0);
        assert_eq!(s.tiles, s.base_tiles);
    }

    #[test]
    fn reload_undoes_runtime_mutation() {
        let mut s = session();
        s.load_level(1);
        s.set_region(0, true);
        assert_eq!(s.grid().tile_at(Cell::new(6, 4)), Tile::Bridge);
        s.set_tile(Cell::new(3, 1), Tile::Hole);

        s.reload();
        assert_eq!(s.grid().tile_at(Cell::new(6, 4)), Tile::Hole);
        assert_eq!(s.grid().tile_at(Cell::new(3, 1)), Tile::Floor);
        assert!(s.latches.iter().all(|l| !l.pressed && !l.open));
    }

    #[test]
    fn out_of_catalog_level_ends_the_run_in_a_win() {
        let mut s = session();
        s.load_level(crate::sim::level::count());
        assert_eq!(s.phase, Phase::GameComplete);
    }

    #[test]
    fn timer_fires_exactly_once() {
        let mut t = Timer::new(2);
        assert!(!t.tick());
        assert!(t.tick());
        assert!(!t.tick());
    }
}
