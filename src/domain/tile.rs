/// Tile types and their properties.
/// Properties are queried via methods, not stored as flags,
/// so tile semantics are centralized here.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    Hole,
    Floor,
    Goal,
    SwitchA,     // pressure switch, first of the level's pair
    SwitchB,     // pressure switch, second of the level's pair
    Bridge,      // solid bridge tile; toggled region cells become this when open
    Collapsible, // breaks into a hole after carrying a lying block
    Lever,       // splits block control when stood upon upright
}

impl Tile {
    /// Can the block rest on this tile without falling?
    pub fn is_solid(self) -> bool {
        !matches!(self, Tile::Hole)
    }

    /// Is this one of the paired pressure switches?
    pub fn is_switch(self) -> bool {
        matches!(self, Tile::SwitchA | Tile::SwitchB)
    }

    /// Does this tile break under a lying block?
    pub fn is_collapsible(self) -> bool {
        matches!(self, Tile::Collapsible)
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::Hole
    }
}
