/// Tile-effect resolution — what the grid does to the block after a move.
///
/// Pure functions operating on the effective grid, the block occupancy and
/// the switch latches. `resolve` never mutates anything: the session applies
/// the returned effects and refreshes the latches, so resolving the same
/// state twice yields the same effects.
///
/// ## Evaluation Order
/// ┌───┬──────────────────────────────────────────────┬───────────────────┐
/// │ 1 │ any half out of bounds or on a hole           │ Fall (terminal)   │
/// │ 2 │ standing on the goal tile                     │ Win (terminal)    │
/// │ 3 │ switch binding newly pressed (rising edge)    │ ToggleBridge      │
/// │ 4 │ lying across a collapsible tile               │ Collapse          │
/// │ 5 │ lever choreography (enter / hand-off / exit)  │ EnterLever/Exit   │
/// └───┴──────────────────────────────────────────────┴───────────────────┘
///
/// `Fall` and `Win` suppress all later checks. Steps 3-5 may emit several
/// effects for one move.

use super::block::{Block, Cell, ControlMode};
use super::tile::Tile;

/// Immutable view of the effective tile grid for rule queries.
pub struct GridView<'a> {
    pub tiles: &'a [Vec<Tile>],
}

impl<'a> GridView<'a> {
    /// Tile at `c`; anywhere outside the grid reads as a hole.
    pub fn tile_at(&self, c: Cell) -> Tile {
        if c.row < 0 || c.col < 0 {
            return Tile::Hole;
        }
        self.tiles
            .get(c.row as usize)
            .and_then(|row| row.get(c.col as usize))
            .copied()
            .unwrap_or(Tile::Hole)
    }
}

/// Which occupancy presses a switch.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Trigger {
    /// Either half of the block resting on the switch cell.
    EitherHalf,
    /// Only the full weight of the standing block.
    Standing,
}

/// A pressure switch bound to a bridge region.
#[derive(Debug)]
pub struct SwitchBinding {
    pub cell: Cell,
    pub trigger: Trigger,
    /// Cells whose solidity the switch controls.
    pub region: &'static [Cell],
    /// One-way switches open their region once and never close it again.
    pub one_way: bool,
}

impl SwitchBinding {
    /// Is the block currently pressing this switch?
    pub fn is_pressed(&self, block: Block) -> bool {
        match self.trigger {
            Trigger::EitherHalf => block.occupies(self.cell),
            Trigger::Standing => block.is_standing() && block.a == self.cell,
        }
    }
}

/// Latch state for one switch binding.
///
/// `pressed` remembers whether the block was on the trigger at the previous
/// evaluation, so a toggle fires only on the rising edge — dwelling on a
/// switch across many frames toggles its region exactly once.
#[derive(Clone, Copy, Default, Debug)]
pub struct SwitchLatch {
    pub pressed: bool,
    pub open: bool,
}

/// A lever and its split-control choreography.
///
/// Standing on the lever throws both halves to `jump_a`/`jump_b` and hands
/// input to half B alone. Docking B at `dock_b` hands input to half A;
/// once A reaches `dock_a` the halves re-couple.
#[derive(Debug)]
pub struct LeverBinding {
    pub cell: Cell,
    pub jump_a: Cell,
    pub jump_b: Cell,
    pub dock_a: Cell,
    pub dock_b: Cell,
}

/// Per-level special-tile rule set, consumed uniformly by the resolver.
#[derive(Debug)]
pub struct RuleSet {
    pub switches: &'static [SwitchBinding],
    pub lever: Option<LeverBinding>,
}

pub const EMPTY_RULES: RuleSet = RuleSet { switches: &[], lever: None };

/// One consequence of the block's post-move occupancy.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Effect {
    Fall,
    Win,
    /// Flip the bound bridge region of switch binding `binding`.
    ToggleBridge { binding: usize },
    /// The tile under `cell` breaks into a hole.
    Collapse { cell: Cell },
    /// Enter (or advance) split control; `jump` teleports the halves.
    EnterLever { mode: ControlMode, jump: Option<(Cell, Cell)> },
    /// Both halves docked: revert to coupled control.
    ExitLever,
}

/// Resolve all effects of the current occupancy. See evaluation order above.
pub fn resolve(
    grid: &GridView,
    block: Block,
    mode: ControlMode,
    latches: &[SwitchLatch],
    rules: &RuleSet,
) -> Vec<Effect> {
    // 1. Bounds / hole — either half unsupported means the whole block falls.
    if grid.tile_at(block.a) == Tile::Hole || grid.tile_at(block.b) == Tile::Hole {
        return vec![Effect::Fall];
    }

    // 2. Win — only the standing block triggers the goal.
    if block.is_standing() && grid.tile_at(block.a) == Tile::Goal {
        return vec![Effect::Win];
    }

    let mut effects = Vec::new();

    // 3. Switches — rising edge only.
    for (i, bind) in rules.switches.iter().enumerate() {
        let latch = latches.get(i).copied().unwrap_or_default();
        if bind.is_pressed(block) && !latch.pressed {
            if bind.one_way && latch.open {
                continue;
            }
            effects.push(Effect::ToggleBridge { binding: i });
        }
    }

    // 4. Collapsibles — weight is only split across two cells while lying.
    if !block.is_standing() {
        for c in [block.a, block.b] {
            if grid.tile_at(c).is_collapsible() {
                effects.push(Effect::Collapse { cell: c });
            }
        }
    }

    // 5. Lever choreography.
    if let Some(lv) = &rules.lever {
        match mode {
            ControlMode::Coupled => {
                if block.is_standing() && grid.tile_at(block.a) == Tile::Lever {
                    effects.push(Effect::EnterLever {
                        mode: ControlMode::MoveOnlyB,
                        jump: Some((lv.jump_a, lv.jump_b)),
                    });
                }
            }
            ControlMode::MoveOnlyB => {
                if block.b == lv.dock_b {
                    if block.a == lv.dock_a {
                        effects.push(Effect::ExitLever);
                    } else {
                        effects.push(Effect::EnterLever {
                            mode: ControlMode::MoveOnlyA,
                            jump: None,
                        });
                    }
                }
            }
            ControlMode::MoveOnlyA => {
                if block.a == lv.dock_a && block.b == lv.dock_b {
                    effects.push(Effect::ExitLever);
                }
            }
        }
    }

    effects
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: build a tile grid from a string diagram.
    /// Legend: ' '=Hole  '#'=Floor  'G'=Goal  'a'=SwitchA  'b'=SwitchB
    ///         '='=Bridge  '!'=Collapsible  'L'=Lever
    fn grid_from(rows: &[&str]) -> Vec<Vec<Tile>> {
        rows.iter()
            .map(|row| {
                row.chars()
                    .map(|ch| match ch {
                        '#' => Tile::Floor,
                        'G' => Tile::Goal,
                        'a' => Tile::SwitchA,
                        'b' => Tile::SwitchB,
                        '=' => Tile::Bridge,
                        '!' => Tile::Collapsible,
                        'L' => Tile::Lever,
                        _ => Tile::Hole,
                    })
                    .collect()
            })
            .collect()
    }

    fn standing(row: i16, col: i16) -> Block {
        Block::standing_at(Cell::new(row, col))
    }

    fn lying(r1: i16, c1: i16, r2: i16, c2: i16) -> Block {
        Block { a: Cell::new(r1, c1), b: Cell::new(r2, c2) }
    }

    #[test]
    fn hole_under_either_half_falls() {
        let tiles = grid_from(&["## ", "###"]);
        let g = GridView { tiles: &tiles };
        let fx = resolve(&g, lying(0, 1, 0, 2), ControlMode::Coupled, &[], &EMPTY_RULES);
        assert_eq!(fx, vec![Effect::Fall]);
    }

    #[test]
    fn out_of_bounds_falls() {
        let tiles = grid_from(&["###"]);
        let g = GridView { tiles: &tiles };
        let fx = resolve(&g, lying(0, -1, 0, 0), ControlMode::Coupled, &[], &EMPTY_RULES);
        assert_eq!(fx, vec![Effect::Fall]);
    }

    #[test]
    fn standing_on_goal_wins() {
        let tiles = grid_from(&["#G#"]);
        let g = GridView { tiles: &tiles };
        let fx = resolve(&g, standing(0, 1), ControlMode::Coupled, &[], &EMPTY_RULES);
        assert_eq!(fx, vec![Effect::Win]);
    }

    #[test]
    fn lying_across_goal_does_not_win() {
        let tiles = grid_from(&["#G#"]);
        let g = GridView { tiles: &tiles };
        let fx = resolve(&g, lying(0, 0, 0, 1), ControlMode::Coupled, &[], &EMPTY_RULES);
        assert!(fx.is_empty());
    }

    #[test]
    fn resolve_is_read_only() {
        // Same state resolved twice yields the same effects: no hidden
        // mutation happens during evaluation.
        static SW: [SwitchBinding; 1] = [SwitchBinding {
            cell: Cell::new(0, 1),
            trigger: Trigger::EitherHalf,
            region: &[Cell::new(0, 3)],
            one_way: false,
        }];
        let rules = RuleSet { switches: &SW, lever: None };
        let tiles = grid_from(&["#a# #"]);
        let g = GridView { tiles: &tiles };
        let latches = [SwitchLatch::default()];
        let block = standing(0, 1);
        let first = resolve(&g, block, ControlMode::Coupled, &latches, &rules);
        let second = resolve(&g, block, ControlMode::Coupled, &latches, &rules);
        assert_eq!(first, second);
        assert_eq!(first, vec![Effect::ToggleBridge { binding: 0 }]);
    }

    #[test]
    fn held_switch_does_not_retoggle() {
        static SW: [SwitchBinding; 1] = [SwitchBinding {
            cell: Cell::new(0, 1),
            trigger: Trigger::EitherHalf,
            region: &[Cell::new(0, 3)],
            one_way: false,
        }];
        let rules = RuleSet { switches: &SW, lever: None };
        let tiles = grid_from(&["#a# #"]);
        let g = GridView { tiles: &tiles };
        // Latch already records the press: no rising edge, no toggle.
        let latches = [SwitchLatch { pressed: true, open: true }];
        let fx = resolve(&g, standing(0, 1), ControlMode::Coupled, &latches, &rules);
        assert!(fx.is_empty());
    }

    #[test]
    fn standing_trigger_ignores_a_lying_half() {
        static SW: [SwitchBinding; 1] = [SwitchBinding {
            cell: Cell::new(0, 1),
            trigger: Trigger::Standing,
            region: &[Cell::new(0, 4)],
            one_way: false,
        }];
        let rules = RuleSet { switches: &SW, lever: None };
        let tiles = grid_from(&["#b## #"]);
        let g = GridView { tiles: &tiles };
        let latches = [SwitchLatch::default()];

        let fx = resolve(&g, lying(0, 1, 0, 2), ControlMode::Coupled, &latches, &rules);
        assert!(fx.is_empty());

        let fx = resolve(&g, standing(0, 1), ControlMode::Coupled, &latches, &rules);
        assert_eq!(fx, vec![Effect::ToggleBridge { binding: 0 }]);
    }

    #[test]
    fn one_way_switch_never_closes() {
        static SW: [SwitchBinding; 1] = [SwitchBinding {
            cell: Cell::new(0, 1),
            trigger: Trigger::Standing,
            region: &[Cell::new(0, 3)],
            one_way: true,
        }];
        let rules = RuleSet { switches: &SW, lever: None };
        let tiles = grid_from(&["#a# #"]);
        let g = GridView { tiles: &tiles };
        // Region already open, block re-enters the switch: nothing happens.
        let latches = [SwitchLatch { pressed: false, open: true }];
        let fx = resolve(&g, standing(0, 1), ControlMode::Coupled, &latches, &rules);
        assert!(fx.is_empty());
    }

    #[test]
    fn collapsible_fires_only_while_lying() {
        let tiles = grid_from(&["#!#"]);
        let g = GridView { tiles: &tiles };

        let fx = resolve(&g, standing(0, 1), ControlMode::Coupled, &[], &EMPTY_RULES);
        assert!(fx.is_empty());

        let fx = resolve(&g, lying(0, 0, 0, 1), ControlMode::Coupled, &[], &EMPTY_RULES);
        assert_eq!(fx, vec![Effect::Collapse { cell: Cell::new(0, 1) }]);
    }

    #[test]
    fn collapse_targets_only_the_collapsible_cell() {
        let tiles = grid_from(&["#!#"]);
        let g = GridView { tiles: &tiles };
        let fx = resolve(&g, lying(0, 1, 0, 2), ControlMode::Coupled, &[], &EMPTY_RULES);
        assert_eq!(fx, vec![Effect::Collapse { cell: Cell::new(0, 1) }]);
    }

    const LEVER: RuleSet = RuleSet {
        switches: &[],
        lever: Some(LeverBinding {
            cell: Cell::new(0, 1),
            jump_a: Cell::new(2, 0),
            jump_b: Cell::new(2, 4),
            dock_a: Cell::new(2, 1),
            dock_b: Cell::new(2, 2),
        }),
    };

    #[test]
    fn standing_on_lever_splits_control() {
        let tiles = grid_from(&["#L#  ", "     ", "#####"]);
        let g = GridView { tiles: &tiles };
        let fx = resolve(&g, standing(0, 1), ControlMode::Coupled, &[], &LEVER);
        assert_eq!(
            fx,
            vec![Effect::EnterLever {
                mode: ControlMode::MoveOnlyB,
                jump: Some((Cell::new(2, 0), Cell::new(2, 4))),
            }]
        );
    }

    #[test]
    fn lying_over_lever_does_nothing() {
        let tiles = grid_from(&["#L#  ", "     ", "#####"]);
        let g = GridView { tiles: &tiles };
        let fx = resolve(&g, lying(0, 0, 0, 1), ControlMode::Coupled, &[], &LEVER);
        assert!(fx.is_empty());
    }

    #[test]
    fn docking_b_hands_control_to_a() {
        let tiles = grid_from(&["#L#  ", "     ", "#####"]);
        let g = GridView { tiles: &tiles };
        let block = Block { a: Cell::new(2, 0), b: Cell::new(2, 2) };
        let fx = resolve(&g, block, ControlMode::MoveOnlyB, &[], &LEVER);
        assert_eq!(
            fx,
            vec![Effect::EnterLever { mode: ControlMode::MoveOnlyA, jump: None }]
        );
    }

    #[test]
    fn both_docked_recouples() {
        let tiles = grid_from(&["#L#  ", "     ", "#####"]);
        let g = GridView { tiles: &tiles };
        let block = Block { a: Cell::new(2, 1), b: Cell::new(2, 2) };
        let fx = resolve(&g, block, ControlMode::MoveOnlyA, &[], &LEVER);
        assert_eq!(fx, vec![Effect::ExitLever]);
        // The same occupancy reached while B still drives also re-couples.
        let fx = resolve(&g, block, ControlMode::MoveOnlyB, &[], &LEVER);
        assert_eq!(fx, vec![Effect::ExitLever]);
    }

    #[test]
    fn fall_suppresses_other_checks() {
        static SW: [SwitchBinding; 1] = [SwitchBinding {
            cell: Cell::new(0, 0),
            trigger: Trigger::EitherHalf,
            region: &[Cell::new(0, 2)],
            one_way: false,
        }];
        let rules = RuleSet { switches: &SW, lever: None };
        let tiles = grid_from(&["a !"]);
        let g = GridView { tiles: &tiles };
        let latches = [SwitchLatch::default()];
        // One half on the switch, the other over a hole: only Fall.
        let fx = resolve(&g, lying(0, 0, 0, 1), ControlMode::Coupled, &latches, &rules);
        assert_eq!(fx, vec![Effect::Fall]);
    }
}
