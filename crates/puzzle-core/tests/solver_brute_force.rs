//! The breadth-first search agrees with exhaustive enumeration on small spaces.

use puzzle_core::puzzles::switch::{OptimalTable, Shape, SwitchPuzzle, SIZE};
use puzzle_core::solver::{minimum_moves, Optimum, StateSpace};

/// Lights-out on a 2x2 grid: toggling a cell flips its row and column
#[derive(Debug)]
struct TinyLights;

fn toggle_mask(cell: usize) -> u8 {
    let (row, col) = (cell / 2, cell % 2);
    (0..4)
        .filter(|&i| i / 2 == row || i % 2 == col)
        .fold(0, |mask, i| mask | 1 << i)
}

impl StateSpace for TinyLights {
    type State = u8;

    fn key_bound(&self) -> u64 {
        16
    }

    fn encode(&self, state: &u8) -> u64 {
        u64::from(*state)
    }

    fn decode(&self, key: u64) -> u8 {
        key as u8
    }

    fn neighbors(&self, state: &u8, out: &mut Vec<u8>) {
        out.extend((0..4).map(|cell| state ^ toggle_mask(cell)));
    }

    fn is_goal(&self, state: &u8) -> bool {
        *state == 0
    }
}

/// Toggles commute and are involutions, so the optimum is the smallest set
/// of toggles whose masks cancel the start
fn smallest_cancelling_set(start: u16, masks: &[u16], max_size: u32) -> Option<u32> {
    let count = masks.len();
    let mut best: Option<u32> = None;
    let mut stack = vec![(0usize, start, 0u32)];
    while let Some((next, state, used)) = stack.pop() {
        if state == 0 {
            best = Some(best.map_or(used, |b| b.min(used)));
            continue;
        }
        if used == max_size {
            continue;
        }
        for i in next..count {
            stack.push((i + 1, state ^ masks[i], used + 1));
        }
    }
    best
}

#[test]
fn tiny_lights_match_enumeration() {
    let masks: Vec<u16> = (0..4).map(|cell| u16::from(toggle_mask(cell))).collect();
    for start in 0u8..16 {
        let expected = match smallest_cancelling_set(u16::from(start), &masks, 4) {
            Some(n) => Optimum::Moves(n),
            None => Optimum::Unreachable,
        };
        assert_eq!(minimum_moves(&TinyLights, &start), expected, "start {:04b}", start);
    }
}

#[test]
fn switch_scramble_matches_enumeration() {
    let masks: Vec<u16> = Shape::ALL
        .iter()
        .flat_map(|&shape| (0..SIZE * SIZE).map(move |cell| shape.mask(cell / SIZE, cell % SIZE)))
        .collect();
    let start = Shape::Plus.mask(1, 1) ^ Shape::Times.mask(2, 2) ^ Shape::FullRect.mask(3, 0);

    let expected = smallest_cancelling_set(start, &masks, 3).expect("three moves suffice");
    let puzzle = SwitchPuzzle::new(start);
    assert_eq!(minimum_moves(&puzzle, &start), Optimum::Moves(expected));
    assert_eq!(OptimalTable::compute().unwrap().lookup(start), Optimum::Moves(expected));
}

#[test]
fn switch_table_matches_single_searches() {
    let table = OptimalTable::compute().unwrap();
    for grid in [0x0001u16, 0x8000, 0x0ff0, 0xa5a5, 0xffff] {
        let puzzle = SwitchPuzzle::new(grid);
        assert_eq!(table.lookup(grid), minimum_moves(&puzzle, &grid), "grid {:#06x}", grid);
    }
}

#[test]
fn shipped_switch_table_is_current() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../content/switch/optimal.csv");
    let shipped = OptimalTable::load(&path).unwrap();
    assert_eq!(shipped, OptimalTable::compute().unwrap());
}
