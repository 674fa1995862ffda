/// Presentation layer: draws the logical session snapshot each frame.
///
/// The renderer owns the terminal (raw mode + alternate screen) and reads
/// the session immutably; it never feeds anything back into the core.
/// Commands are batched with `queue!` into a buffered writer and flushed
/// once per frame. The fixed 10x15 board is redrawn in place with
/// constant-width lines, so no per-frame clear is needed; only phase
/// changes clear the screen.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::block::{Cell, COLS, ROWS};
use crate::domain::tile::Tile;
use crate::sim::level;
use crate::sim::session::{Phase, Session};

/// Each grid cell is two terminal columns wide.
const CELL_W: u16 = 2;

const HUD_ROW: u16 = 0;
const MAP_ROW: u16 = 2;
const MSG_ROW: u16 = MAP_ROW + ROWS as u16 + 1;
const HELP_ROW: u16 = MSG_ROW + 1;
const MAP_COL: u16 = 2;

const FRAME_W: usize = (COLS as usize) * (CELL_W as usize) + 8;

const BG: Color = Color::Rgb { r: 18, g: 18, b: 28 };

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    last_phase: Option<Phase>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            last_phase: None,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(BG),
            Clear(ClearType::All)
        )
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, s: &Session) -> io::Result<()> {
        if self.last_phase != Some(s.phase) {
            queue!(self.writer, SetBackgroundColor(BG), Clear(ClearType::All))?;
            self.last_phase = Some(s.phase);
        }

        match s.phase {
            Phase::Title => self.draw_title()?,
            Phase::GameOver => self.draw_banner(s, "Y O U   L O S E", Color::Red)?,
            Phase::GameComplete => self.draw_banner(s, "Y O U   W I N", Color::Green)?,
            _ => self.draw_game(s)?,
        }

        self.writer.flush()
    }

    // ── Title ──

    fn draw_title(&mut self) -> io::Result<()> {
        let lines = [
            ("", Color::White),
            ("  R O L L C U B E", Color::Yellow),
            ("", Color::White),
            ("  Roll the block onto the round goal tile", Color::Grey),
            ("  and stand it upright. Don't fall off.", Color::Grey),
            ("", Color::White),
            ("  Arrows / WASD  roll", Color::DarkCyan),
            ("  R              retry level", Color::DarkCyan),
            ("  Q / Esc        quit", Color::DarkCyan),
            ("", Color::White),
            ("  Enter  start    1-8  jump to a level", Color::White),
        ];
        for (i, (text, color)) in lines.iter().enumerate() {
            queue!(
                self.writer,
                MoveTo(2, 2 + i as u16),
                SetForegroundColor(*color),
                Print(pad(text))
            )?;
        }
        Ok(())
    }

    // ── End banners ──

    fn draw_banner(&mut self, s: &Session, text: &str, color: Color) -> io::Result<()> {
        queue!(
            self.writer,
            MoveTo(8, 5),
            SetForegroundColor(color),
            Print(pad(text)),
            MoveTo(8, 7),
            SetForegroundColor(Color::White),
            Print(pad(&format!("FINAL SCORE {}   MOVES {}", s.score, s.moves))),
            MoveTo(8, 9),
            SetForegroundColor(Color::Grey),
            Print(pad("Enter: new run    Q: quit")),
        )?;
        Ok(())
    }

    // ── Game board ──

    fn draw_game(&mut self, s: &Session) -> io::Result<()> {
        self.draw_hud(s)?;

        // The intro reveals the board row by row, tiles dropping into place.
        let revealed = match s.phase {
            Phase::LevelIntro => {
                let total = s.timing.intro_ticks.max(1);
                let elapsed = total - s.anim.remaining().min(total);
                ((ROWS as u32 * elapsed) / total) as i16
            }
            _ => ROWS,
        };

        for row in 0..ROWS {
            queue!(self.writer, MoveTo(MAP_COL, MAP_ROW + row as u16))?;
            for col in 0..COLS {
                let cell = Cell::new(row, col);
                let (glyph, fg) = if revealed > row && s.block.occupies(cell) {
                    block_glyph(s)
                } else if revealed > row {
                    tile_glyph(s.grid().tile_at(cell))
                } else {
                    ("  ", Color::White)
                };
                queue!(self.writer, SetForegroundColor(fg), Print(glyph))?;
            }
        }

        let msg = match s.phase {
            Phase::LevelIntro => level::get(s.level)
                .map(|d| format!("LEVEL {}  {}", s.level + 1, d.name))
                .unwrap_or_default(),
            Phase::Falling => "the block tumbles into the void...".to_string(),
            Phase::Winning => "level clear!".to_string(),
            _ => String::new(),
        };
        queue!(
            self.writer,
            MoveTo(MAP_COL, MSG_ROW),
            SetForegroundColor(Color::Yellow),
            Print(pad(&msg)),
            MoveTo(MAP_COL, HELP_ROW),
            SetForegroundColor(Color::DarkGrey),
            Print(pad("arrows roll · r retry · q quit")),
        )?;
        Ok(())
    }

    fn draw_hud(&mut self, s: &Session) -> io::Result<()> {
        let hud = format!(
            "LEVEL {}/{}   MOVES {}   SCORE {}   ATTEMPTS {}/3",
            s.level + 1,
            level::count(),
            s.moves,
            s.score,
            s.attempts.min(3),
        );
        queue!(
            self.writer,
            MoveTo(MAP_COL, HUD_ROW),
            SetForegroundColor(Color::White),
            Print(pad(&hud))
        )
    }
}

/// Pad to the frame width so stale characters are overwritten in place.
fn pad(text: &str) -> String {
    format!("{:<1$}", text, FRAME_W)
}

// Block-element glyphs only: they are single-width everywhere, unlike
// the rounder unicode candidates whose width is terminal-dependent.
fn tile_glyph(tile: Tile) -> (&'static str, Color) {
    match tile {
        Tile::Hole => ("  ", Color::White),
        Tile::Floor => ("▓▓", Color::Grey),
        Tile::Goal => ("()", Color::Green),
        Tile::SwitchA => ("()", Color::Magenta),
        Tile::SwitchB => ("()", Color::Yellow),
        Tile::Bridge => ("▒▒", Color::Cyan),
        Tile::Collapsible => ("░░", Color::Red),
        Tile::Lever => ("/\\", Color::White),
    }
}

fn block_glyph(s: &Session) -> (&'static str, Color) {
    match s.phase {
        // Sinking out of sight reads as a dimmed block.
        Phase::Falling => ("██", Color::DarkRed),
        Phase::Winning => ("██", Color::DarkGreen),
        _ if s.block.is_standing() => ("██", Color::Rgb { r: 255, g: 210, b: 80 }),
        _ => ("██", Color::Rgb { r: 220, g: 170, b: 60 }),
    }
}
