/// Events emitted while advancing the session.
/// The presentation layer consumes these for sound; the core never
/// decides whether or how a sound is played.

#[derive(Clone, Copy, Debug)]
pub enum GameEvent {
    Moved,
    Fell,
    SwitchToggled { open: bool },
    TileCollapsed { row: i16, col: i16 },
    LeverEntered,
    Won,
    GameOver,
}
