//! Colors: a row of six cells, each holding an action. Activating a cell runs
//! its action on the nearest non-empty cells; the goal is an empty row.
//!
//! Every forward action has an exact reverse, so starts are produced by
//! walking backwards from the empty row.

use crate::catalog::PuzzleKind;
use crate::error::Result;
use crate::generator::{generate_with_retries, scramble, ReverseMoves, ScrambleConfig, DEFAULT_MAX_ATTEMPTS};
use crate::rng::DailyRng;
use crate::session::Puzzle;
use crate::solver::StateSpace;

pub const CELL_COUNT: usize = 6;

/// Cell contents. The discriminant is the encoding digit; the six actions
/// `1..=6` form the cycle that colder and hotter rotate through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty = 0,
    /// Flip the next cell's action to the opposite side of the cycle
    Invert = 1,
    /// Rotate the previous cell's action one step down
    Colder = 2,
    /// Exchange the previous and next cells
    Swap = 3,
    /// Trade places with the next cell
    MoveDown = 4,
    /// Clear this cell
    Erase = 5,
    /// Rotate the previous cell's action one step up
    Hotter = 6,
}

impl Cell {
    pub const ALL: [Cell; 7] = [
        Cell::Empty,
        Cell::Invert,
        Cell::Colder,
        Cell::Swap,
        Cell::MoveDown,
        Cell::Erase,
        Cell::Hotter,
    ];

    fn from_digit(digit: u8) -> Self {
        Self::ALL.get(usize::from(digit)).copied().unwrap_or(Cell::Empty)
    }

    fn digit(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Cell::Empty => "empty",
            Cell::Invert => "invert",
            Cell::Colder => "colder",
            Cell::Swap => "swap",
            Cell::MoveDown => "move down",
            Cell::Erase => "erase",
            Cell::Hotter => "hotter",
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    fn inverted(self) -> Self {
        self.rotated(3)
    }

    fn hotter(self) -> Self {
        self.rotated(1)
    }

    fn colder(self) -> Self {
        self.rotated(5)
    }

    /// Move `by` steps along the cycle `1..=6`; empty cells stay empty
    fn rotated(self, by: u8) -> Self {
        match self {
            Cell::Empty => Cell::Empty,
            other => Self::from_digit((other.digit() - 1 + by) % 6 + 1),
        }
    }
}

pub type Row = [Cell; CELL_COUNT];

/// Activate the cell at `index`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activate {
    pub index: usize,
}

#[derive(Debug, Clone)]
pub struct ColorsConfig {
    pub scramble: ScrambleConfig,
    pub max_attempts: usize,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            scramble: ScrambleConfig {
                steps: 10,
                branching: 4,
            },
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

fn previous_filled(row: &Row, index: usize) -> Option<usize> {
    (0..index).rev().find(|&i| !row[i].is_empty())
}

fn next_filled(row: &Row, index: usize) -> Option<usize> {
    (index + 1..CELL_COUNT).find(|&i| !row[i].is_empty())
}

/// Run the action stored at `index`. Returns `None` for empty cells and
/// actions that have nothing to act on.
pub fn activate(row: &Row, index: usize) -> Option<Row> {
    let mut next = *row;
    match *row.get(index)? {
        Cell::Empty => return None,
        Cell::Invert => {
            let j = next_filled(row, index)?;
            next[j] = row[j].inverted();
        }
        Cell::Colder => {
            let j = previous_filled(row, index)?;
            next[j] = row[j].colder();
        }
        Cell::Hotter => {
            let j = previous_filled(row, index)?;
            next[j] = row[j].hotter();
        }
        Cell::Swap => {
            let p = previous_filled(row, index)?;
            let n = next_filled(row, index)?;
            next.swap(p, n);
        }
        Cell::MoveDown => {
            let j = next_filled(row, index)?;
            next.swap(index, j);
        }
        Cell::Erase => next[index] = Cell::Empty,
    }
    Some(next)
}

/// A row from which one activation leads to `row`, chosen by the contents of
/// `index`. Empty cells were erased; a move-down cell came from the cell
/// before it; erase cells have no predecessor.
pub fn reverse_activate(row: &Row, index: usize) -> Option<Row> {
    let mut prev = *row;
    match *row.get(index)? {
        Cell::Empty => prev[index] = Cell::Erase,
        Cell::Erase => return None,
        Cell::Invert | Cell::Swap => return activate(row, index),
        Cell::Colder => {
            let j = previous_filled(row, index)?;
            prev[j] = row[j].hotter();
        }
        Cell::Hotter => {
            let j = previous_filled(row, index)?;
            prev[j] = row[j].colder();
        }
        Cell::MoveDown => {
            let j = previous_filled(row, index)?;
            prev.swap(index, j);
        }
    }
    Some(prev)
}

fn distinct_actions(row: &Row) -> i64 {
    let seen = row
        .iter()
        .filter(|cell| !cell.is_empty())
        .fold(0u8, |mask, cell| mask | 1 << cell.digit());
    i64::from(seen.count_ones())
}

/// Colors puzzle instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorsPuzzle {
    start: Row,
}

impl ColorsPuzzle {
    pub fn new(start: Row) -> Self {
        Self { start }
    }

    /// Walk back from the empty row, preferring rows with many kinds of action
    pub fn generate(rng: &mut DailyRng, config: &ColorsConfig) -> Result<Self> {
        let empty = [Cell::Empty; CELL_COUNT];
        generate_with_retries(PuzzleKind::Colors, config.max_attempts, |_| {
            let start = scramble(&RowSpace, empty, config.scramble, rng, distinct_actions);
            (start != empty).then_some(Self { start })
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct RowSpace;

impl StateSpace for RowSpace {
    type State = Row;

    fn key_bound(&self) -> u64 {
        7u64.pow(CELL_COUNT as u32)
    }

    fn encode(&self, state: &Row) -> u64 {
        state
            .iter()
            .rev()
            .fold(0, |key, cell| key * 7 + u64::from(cell.digit()))
    }

    fn decode(&self, key: u64) -> Row {
        let mut row = [Cell::Empty; CELL_COUNT];
        let mut rest = key;
        for cell in row.iter_mut() {
            *cell = Cell::from_digit((rest % 7) as u8);
            rest /= 7;
        }
        row
    }

    fn neighbors(&self, state: &Row, out: &mut Vec<Row>) {
        out.extend((0..CELL_COUNT).filter_map(|i| activate(state, i)));
    }

    fn is_goal(&self, state: &Row) -> bool {
        state.iter().all(|cell| cell.is_empty())
    }
}

impl ReverseMoves for RowSpace {
    fn sample_reverse(&self, state: &Row, rng: &mut DailyRng) -> Option<Row> {
        reverse_activate(state, rng.below(CELL_COUNT))
    }
}

impl StateSpace for ColorsPuzzle {
    type State = Row;

    fn key_bound(&self) -> u64 {
        RowSpace.key_bound()
    }

    fn encode(&self, state: &Row) -> u64 {
        RowSpace.encode(state)
    }

    fn decode(&self, key: u64) -> Row {
        RowSpace.decode(key)
    }

    fn neighbors(&self, state: &Row, out: &mut Vec<Row>) {
        RowSpace.neighbors(state, out);
    }

    fn is_goal(&self, state: &Row) -> bool {
        RowSpace.is_goal(state)
    }
}

impl Puzzle for ColorsPuzzle {
    type Action = Activate;
    const KIND: PuzzleKind = PuzzleKind::Colors;

    fn start(&self) -> Row {
        self.start
    }

    fn apply(&self, state: &Row, action: Activate) -> Option<Row> {
        activate(state, action.index)
    }

    fn actions(&self, state: &Row) -> Vec<Activate> {
        (0..CELL_COUNT)
            .filter(|&index| !state[index].is_empty())
            .map(|index| Activate { index })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{minimum_moves, Optimum};
    use Cell::*;

    #[test]
    fn test_cycle_steps() {
        assert_eq!(Invert.inverted(), MoveDown);
        assert_eq!(Erase.inverted(), Colder);
        assert_eq!(Hotter.hotter(), Invert);
        assert_eq!(Invert.colder(), Hotter);
        for cell in Cell::ALL {
            assert_eq!(cell.inverted().inverted(), cell);
            assert_eq!(cell.hotter().colder(), cell);
        }
    }

    #[test]
    fn test_actions_skip_empty_cells() {
        let row = [Swap, Empty, Invert, Empty, Empty, Colder];
        let next = activate(&row, 2).unwrap();
        assert_eq!(next, [Swap, Empty, Invert, Empty, Empty, Erase]);

        let row = [Erase, Empty, Swap, Empty, Hotter, Empty];
        assert_eq!(activate(&row, 2), Some([Hotter, Empty, Swap, Empty, Erase, Empty]));
    }

    #[test]
    fn test_actions_without_target_are_rejected() {
        let row = [Colder, Invert, Empty, Empty, Empty, Empty];
        assert_eq!(activate(&row, 0), None);
        assert_eq!(activate(&row, 1), None);
        assert_eq!(activate(&row, 3), None);
    }

    #[test]
    fn test_move_down_and_erase() {
        let row = [MoveDown, Empty, Erase, Empty, Empty, Empty];
        let moved = activate(&row, 0).unwrap();
        assert_eq!(moved, [Erase, Empty, MoveDown, Empty, Empty, Empty]);
        let erased = activate(&moved, 0).unwrap();
        assert_eq!(erased, [Empty, Empty, MoveDown, Empty, Empty, Empty]);
    }

    #[test]
    fn test_reverse_undoes_every_forward_action() {
        let rows = [
            [Invert, Colder, Swap, MoveDown, Erase, Hotter],
            [Swap, Empty, MoveDown, Hotter, Empty, Colder],
            [Hotter, Hotter, Empty, Invert, Erase, Empty],
        ];
        for row in rows {
            for index in 0..CELL_COUNT {
                let Some(next) = activate(&row, index) else {
                    continue;
                };
                let undone = (0..CELL_COUNT).any(|i| reverse_activate(&next, i) == Some(row));
                assert!(undone, "{:?} at {}", row, index);
            }
        }
    }

    #[test]
    fn test_single_erase_is_one_move() {
        let row = [Empty, Empty, Erase, Empty, Empty, Empty];
        let puzzle = ColorsPuzzle::new(row);
        assert_eq!(minimum_moves(&puzzle, &row), Optimum::Moves(1));
    }

    #[test]
    fn test_encoding_round_trip() {
        let row = [Hotter, Empty, Swap, Erase, Invert, MoveDown];
        let key = RowSpace.encode(&row);
        assert!(key < RowSpace.key_bound());
        assert_eq!(RowSpace.decode(key), row);
    }

    #[test]
    fn test_generated_rows_are_solvable() {
        let config = ColorsConfig::default();
        for seed in 1..10 {
            let puzzle = ColorsPuzzle::generate(&mut DailyRng::new(seed), &config).unwrap();
            let optimum = minimum_moves(&puzzle, &puzzle.start());
            assert!(optimum.moves().is_some_and(|n| (1..=10).contains(&n)), "{:?}", optimum);
        }
    }
}
