/// Block occupancy and the rolling rule.
///
/// The block is a 1x1x2 cuboid occupying one grid cell standing upright
/// or two 4-adjacent cells lying down. A single direction-parametrized
/// transition covers all four directions:
///
/// ## Roll Truth Table
/// ┌─────────────────────────────┬──────────────────────────────┬────────────────┐
/// │ Posture vs. direction        │ New occupancy                │ Classified     │
/// ├─────────────────────────────┼──────────────────────────────┼────────────────┤
/// │ Standing at c                │ a' = c+dir, b' = c+2·dir     │ PivotToLying   │
/// │ Lying, axis parallel to dir  │ a' = b' = far_end + dir      │ PivotToStanding│
/// │ Lying, axis perpendicular    │ a' = a+dir, b' = b+dir       │ Sideways       │
/// │ Split mode (either half)     │ named half steps by dir      │ Solo           │
/// └─────────────────────────────┴──────────────────────────────┴────────────────┘
///
/// No legality checks happen here: walls, holes and the goal are judged
/// afterwards by the effect resolver. This function is total and pure.

pub const ROWS: i16 = 10;
pub const COLS: i16 = 15;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Cell {
    pub row: i16,
    pub col: i16,
}

impl Cell {
    pub const fn new(row: i16, col: i16) -> Self {
        Cell { row, col }
    }

    /// Is this cell inside the 10x15 playfield?
    pub fn in_bounds(self) -> bool {
        self.row >= 0 && self.row < ROWS && self.col >= 0 && self.col < COLS
    }

    /// The cell `n` steps along `dir`.
    pub fn step(self, dir: Dir, n: i16) -> Self {
        let (dr, dc) = dir.delta();
        Cell::new(self.row + dr * n, self.col + dc * n)
    }

    /// 4-adjacency (shared edge).
    pub fn is_adjacent(self, other: Cell) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }
}

/// Directional move command. North is towards row 0.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Dir {
    North,
    South,
    East,
    West,
}

impl Dir {
    /// Unit step as (row delta, col delta).
    pub fn delta(self) -> (i16, i16) {
        match self {
            Dir::North => (-1, 0),
            Dir::South => (1, 0),
            Dir::East => (0, 1),
            Dir::West => (0, -1),
        }
    }
}

/// Which half of the block responds to input.
/// `Coupled` is the default; the split modes are entered via a lever tile.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ControlMode {
    Coupled,
    MoveOnlyA,
    MoveOnlyB,
}

/// How a move changed the block's posture.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Roll {
    PivotToLying,
    PivotToStanding,
    Sideways,
    Solo,
}

/// The block's occupancy: standing iff `a == b`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Block {
    pub a: Cell,
    pub b: Cell,
}

impl Block {
    pub const fn standing_at(c: Cell) -> Self {
        Block { a: c, b: c }
    }

    pub fn is_standing(&self) -> bool {
        self.a == self.b
    }

    pub fn occupies(&self, c: Cell) -> bool {
        self.a == c || self.b == c
    }
}

/// Apply one directional move. See the roll truth table above.
pub fn roll(block: Block, mode: ControlMode, dir: Dir) -> (Block, Roll) {
    match mode {
        ControlMode::MoveOnlyA => {
            (Block { a: block.a.step(dir, 1), b: block.b }, Roll::Solo)
        }
        ControlMode::MoveOnlyB => {
            (Block { a: block.a, b: block.b.step(dir, 1) }, Roll::Solo)
        }
        ControlMode::Coupled => {
            debug_assert!(
                block.is_standing() || block.a.is_adjacent(block.b),
                "coupled block must stand on one cell or lie on two adjacent cells"
            );
            if block.is_standing() {
                let c = block.a;
                (Block { a: c.step(dir, 1), b: c.step(dir, 2) }, Roll::PivotToLying)
            } else {
                let (dr, dc) = dir.delta();
                let axis_row = block.a.col == block.b.col; // long axis runs along rows
                let parallel = (axis_row && dr != 0) || (!axis_row && dc != 0);
                if parallel {
                    // Far end: the half with the larger projection onto dir.
                    let proj = |c: Cell| c.row * dr + c.col * dc;
                    let far = if proj(block.a) > proj(block.b) { block.a } else { block.b };
                    let c = far.step(dir, 1);
                    (Block::standing_at(c), Roll::PivotToStanding)
                } else {
                    (
                        Block { a: block.a.step(dir, 1), b: block.b.step(dir, 1) },
                        Roll::Sideways,
                    )
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIRS: [Dir; 4] = [Dir::North, Dir::South, Dir::East, Dir::West];

    #[test]
    fn standing_pivots_to_lying_in_every_direction() {
        let c = Cell::new(5, 5);
        for dir in DIRS {
            let (next, kind) = roll(Block::standing_at(c), ControlMode::Coupled, dir);
            assert_eq!(kind, Roll::PivotToLying);
            assert!(!next.is_standing());
            assert!(next.a.is_adjacent(next.b));
            assert_eq!(next.a, c.step(dir, 1));
            assert_eq!(next.b, c.step(dir, 2));
        }
    }

    #[test]
    fn double_roll_stands_three_cells_along_the_axis() {
        let c = Cell::new(5, 5);
        for dir in DIRS {
            let (lying, _) = roll(Block::standing_at(c), ControlMode::Coupled, dir);
            let (standing, kind) = roll(lying, ControlMode::Coupled, dir);
            assert_eq!(kind, Roll::PivotToStanding);
            assert!(standing.is_standing());
            assert_eq!(standing.a, c.step(dir, 3));
        }
    }

    #[test]
    fn parallel_roll_backwards_returns_to_start() {
        let c = Cell::new(4, 7);
        let (lying, _) = roll(Block::standing_at(c), ControlMode::Coupled, Dir::East);
        let (standing, kind) = roll(lying, ControlMode::Coupled, Dir::West);
        assert_eq!(kind, Roll::PivotToStanding);
        assert_eq!(standing.a, c);
    }

    #[test]
    fn perpendicular_roll_translates_both_cells() {
        // Lying east-west, rolled south.
        let block = Block { a: Cell::new(5, 6), b: Cell::new(5, 7) };
        let (next, kind) = roll(block, ControlMode::Coupled, Dir::South);
        assert_eq!(kind, Roll::Sideways);
        assert_eq!(next.a, Cell::new(6, 6));
        assert_eq!(next.b, Cell::new(6, 7));
        assert!(next.a.is_adjacent(next.b));
    }

    #[test]
    fn east_twice_from_5_5_lands_on_5_8() {
        let start = Block::standing_at(Cell::new(5, 5));
        let (lying, _) = roll(start, ControlMode::Coupled, Dir::East);
        assert_eq!(lying.a, Cell::new(5, 6));
        assert_eq!(lying.b, Cell::new(5, 7));
        let (standing, _) = roll(lying, ControlMode::Coupled, Dir::East);
        assert_eq!(standing, Block::standing_at(Cell::new(5, 8)));
    }

    #[test]
    fn split_modes_move_only_the_named_half() {
        let block = Block { a: Cell::new(8, 10), b: Cell::new(2, 10) };
        let (next, kind) = roll(block, ControlMode::MoveOnlyB, Dir::East);
        assert_eq!(kind, Roll::Solo);
        assert_eq!(next.a, block.a);
        assert_eq!(next.b, Cell::new(2, 11));

        let (next, kind) = roll(block, ControlMode::MoveOnlyA, Dir::North);
        assert_eq!(kind, Roll::Solo);
        assert_eq!(next.a, Cell::new(7, 10));
        assert_eq!(next.b, block.b);
    }

    #[test]
    fn moves_may_leave_the_grid() {
        // Legality is the resolver's concern; the roll itself is total.
        let (next, _) = roll(Block::standing_at(Cell::new(0, 0)), ControlMode::Coupled, Dir::North);
        assert_eq!(next.a, Cell::new(-1, 0));
        assert_eq!(next.b, Cell::new(-2, 0));
        assert!(!next.a.in_bounds());
    }
}
