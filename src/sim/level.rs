/// Built-in level catalog.
///
/// Each level is a string diagram plus the special-tile rule set the
/// effect resolver consumes uniformly. Where the resolver or session needs
/// level-specific behavior (switch wiring, lever choreography), it comes
/// from here — never from conditionals on the level number.
///
/// ## Tile legend:
///   ' ' = Hole          '#' = Floor        'G' = Goal
///   'a' = SwitchA       'b' = SwitchB
///   '=' = Bridge (fixed, never toggled)
///   '!' = Collapsible   'L' = Lever
///
/// Toggleable bridge cells are holes in the diagram; their coordinates live
/// in the owning switch binding and open into `Tile::Bridge` at runtime.

use crate::domain::block::{Cell, COLS, ROWS};
use crate::domain::rules::{LeverBinding, RuleSet, SwitchBinding, Trigger};
use crate::domain::tile::Tile;

pub struct LevelDef {
    pub name: &'static str,
    pub rows: [&'static str; ROWS as usize],
    /// Where the block starts, standing.
    pub start: Cell,
    pub rules: RuleSet,
}

pub fn count() -> usize {
    LEVELS.len()
}

pub fn get(idx: usize) -> Option<&'static LevelDef> {
    LEVELS.get(idx)
}

/// Expand a level diagram into its pristine tile grid.
pub fn parse(def: &LevelDef) -> Vec<Vec<Tile>> {
    let mut tiles = vec![vec![Tile::Hole; COLS as usize]; ROWS as usize];
    for (r, row) in def.rows.iter().enumerate() {
        for (c, ch) in row.chars().enumerate() {
            if c >= COLS as usize {
                break;
            }
            tiles[r][c] = match ch {
                '#' => Tile::Floor,
                'G' => Tile::Goal,
                'a' => Tile::SwitchA,
                'b' => Tile::SwitchB,
                '=' => Tile::Bridge,
                '!' => Tile::Collapsible,
                'L' => Tile::Lever,
                _ => Tile::Hole,
            };
        }
    }
    tiles
}

pub static LEVELS: [LevelDef; 8] = [
    LevelDef {
        name: "First Steps",
        rows: [
            "               ",
            "               ",
            "###            ",
            "######         ",
            "#########      ",
            " #########     ",
            "     ##G##     ",
            "      ###      ",
            "               ",
            "               ",
        ],
        start: Cell::new(3, 1),
        rules: RuleSet { switches: &[], lever: None },
    },
    LevelDef {
        name: "Twin Switches",
        rows: [
            "               ",
            "               ",
            "      ####  ###",
            "####  ##b#  #G#",
            "##a#  ####  ###",
            "####  ####  ###",
            "####  ####  ###",
            "####  ####     ",
            "               ",
            "               ",
        ],
        start: Cell::new(3, 1),
        rules: RuleSet {
            switches: &[
                SwitchBinding {
                    cell: Cell::new(4, 2),
                    trigger: Trigger::EitherHalf,
                    region: &[Cell::new(6, 4), Cell::new(6, 5)],
                    one_way: false,
                },
                SwitchBinding {
                    cell: Cell::new(3, 8),
                    trigger: Trigger::Standing,
                    region: &[Cell::new(6, 10), Cell::new(6, 11)],
                    one_way: false,
                },
            ],
            lever: None,
        },
    },
    LevelDef {
        name: "The Long Way",
        rows: [
            "               ",
            "               ",
            "               ",
            "      #######  ",
            "####  ###  ##  ",
            "#########  ####",
            "####       ##G#",
            "####        ###",
            "               ",
            "               ",
        ],
        start: Cell::new(6, 1),
        rules: RuleSet { switches: &[], lever: None },
    },
    LevelDef {
        name: "Glass Causeway",
        rows: [
            "               ",
            "   =======###  ",
            "   =======###  ",
            "####     ######",
            "###       #####",
            "###       #####",
            "###  ####======",
            "###  ####======",
            "     #G# ====!=",
            "     ### ======",
        ],
        start: Cell::new(3, 1),
        rules: RuleSet { switches: &[], lever: None },
    },
    LevelDef {
        name: "Zigzag Terrace",
        rows: [
            "     ######    ",
            "     #  ###    ",
            "     #  #####  ",
            "######     ####",
            "    ###    ##G#",
            "    ###     ###",
            "      #  ##    ",
            "      #####    ",
            "      #####    ",
            "       ###     ",
        ],
        start: Cell::new(3, 1),
        rules: RuleSet { switches: &[], lever: None },
    },
    LevelDef {
        name: "Pressure Gate",
        rows: [
            "               ",
            "        ####   ",
            "        ####   ",
            "###     #  ####",
            "#########   #G#",
            "###    ##a  ###",
            "###    ###  ###",
            "###    ##      ",
            "#########      ",
            "               ",
        ],
        start: Cell::new(4, 2),
        rules: RuleSet {
            switches: &[SwitchBinding {
                cell: Cell::new(5, 9),
                trigger: Trigger::Standing,
                region: &[Cell::new(7, 3)],
                one_way: true,
            }],
            lever: None,
        },
    },
    LevelDef {
        name: "The Split",
        rows: [
            "               ",
            "         ###   ",
            "         ###   ",
            "         ###   ",
            "######   ######",
            "####L#   ####G#",
            "######   ######",
            "         ###   ",
            "         ###   ",
            "         ###   ",
        ],
        start: Cell::new(4, 1),
        rules: RuleSet {
            switches: &[],
            lever: Some(LeverBinding {
                cell: Cell::new(5, 4),
                jump_a: Cell::new(8, 10),
                jump_b: Cell::new(2, 10),
                dock_a: Cell::new(5, 11),
                dock_b: Cell::new(5, 12),
            }),
        },
    },
    LevelDef {
        name: "Long Throw",
        rows: [
            "               ",
            "               ",
            "               ",
            "####   #   ####",
            "####   #   ##L#",
            "###############",
            "      #G#      ",
            "      ###      ",
            "               ",
            "               ",
        ],
        start: Cell::new(4, 1),
        rules: RuleSet {
            switches: &[],
            lever: Some(LeverBinding {
                cell: Cell::new(4, 13),
                jump_a: Cell::new(4, 12),
                jump_b: Cell::new(4, 2),
                dock_a: Cell::new(5, 7),
                dock_b: Cell::new(4, 7),
            }),
        },
    },
];
