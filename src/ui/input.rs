/// Input state tracker.
///
/// The core consumes at most one discrete command per tick, so this
/// tracker is edge-triggered only: it records which keys were freshly
/// pressed since the last drain and never synthesizes repeats. Holding
/// an arrow rolls once per terminal auto-repeat event, which is the
/// debounce the state machine expects from its input collaborator.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub struct InputState {
    /// Keys pressed since the last `drain_events` call, in arrival order.
    presses: Vec<KeyEvent>,
}

impl InputState {
    pub fn new() -> Self {
        InputState { presses: Vec::with_capacity(8) }
    }

    /// Drain all pending terminal events. Call once per frame.
    pub fn drain_events(&mut self) {
        self.presses.clear();
        while event::poll(Duration::ZERO).unwrap_or(false) {
            if let Ok(Event::Key(key)) = event::read() {
                if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    self.presses.push(key);
                }
            }
        }
    }

    /// Was any of the given keys freshly pressed this frame?
    pub fn any_pressed(&self, codes: &[KeyCode]) -> bool {
        self.presses.iter().any(|k| codes.contains(&k.code))
    }

    /// First pressed digit this frame, if any.
    pub fn digit_pressed(&self) -> Option<u32> {
        self.presses.iter().find_map(|k| match k.code {
            KeyCode::Char(c) => c.to_digit(10),
            _ => None,
        })
    }

    pub fn ctrl_c_pressed(&self) -> bool {
        self.presses.iter().any(|k| {
            k.code == KeyCode::Char('c') && k.modifiers.contains(KeyModifiers::CONTROL)
        })
    }
}
