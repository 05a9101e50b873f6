//! Switch: turn every cell of a 4x4 grid off by flipping fixed patterns.
//!
//! The grid is a `u16` with bit `row * 4 + col` set when that cell is on. The
//! same indexing is used by the precomputed [`OptimalTable`].

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::catalog::PuzzleKind;
use crate::error::{Error, Result};
use crate::generator::{generate_with_retries, scramble, ReverseMoves, ScrambleConfig, DEFAULT_MAX_ATTEMPTS};
use crate::rng::DailyRng;
use crate::session::Puzzle;
use crate::solver::{distance_table, DistanceTable, Optimum, StateSpace};

pub const SIZE: usize = 4;
const CELLS: usize = SIZE * SIZE;
/// Number of distinct grids
pub const GRID_COUNT: usize = 1 << CELLS;

/// Flip pattern, centred on the chosen cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// The full 3x3 square
    FullRect,
    Plus,
    /// Centre and the four diagonals
    Times,
}

impl Shape {
    pub const ALL: [Shape; 3] = [Shape::FullRect, Shape::Plus, Shape::Times];

    /// Offsets `(row, col)` flipped by this shape
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Shape::FullRect => &[
                (-1, -1),
                (-1, 0),
                (-1, 1),
                (0, -1),
                (0, 0),
                (0, 1),
                (1, -1),
                (1, 0),
                (1, 1),
            ],
            Shape::Plus => &[(0, -1), (-1, 0), (0, 0), (1, 0), (0, 1)],
            Shape::Times => &[(-1, -1), (-1, 1), (0, 0), (1, -1), (1, 1)],
        }
    }

    /// Mask of the cells flipped when centred at `(row, col)`. Offsets outside
    /// the grid are ignored.
    pub fn mask(self, row: usize, col: usize) -> u16 {
        self.offsets()
            .iter()
            .filter_map(|&(dr, dc)| {
                let r = row as i32 + dr;
                let c = col as i32 + dc;
                let inside = (0..SIZE as i32).contains(&r) && (0..SIZE as i32).contains(&c);
                inside.then(|| 1u16 << (r as usize * SIZE + c as usize))
            })
            .fold(0, |mask, bit| mask | bit)
    }
}

/// Flip a shape centred on a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchAction {
    pub shape: Shape,
    pub row: usize,
    pub col: usize,
}

impl SwitchAction {
    fn mask(self) -> u16 {
        self.shape.mask(self.row, self.col)
    }
}

/// Whether the cell at `(row, col)` is on
pub fn is_on(grid: u16, row: usize, col: usize) -> bool {
    grid & (1 << (row * SIZE + col)) != 0
}

#[derive(Debug, Clone)]
pub struct SwitchConfig {
    pub scramble: ScrambleConfig,
    pub max_attempts: usize,
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            scramble: ScrambleConfig {
                steps: 6,
                branching: 4,
            },
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Switch puzzle instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchPuzzle {
    start: u16,
}

impl SwitchPuzzle {
    pub fn new(start: u16) -> Self {
        Self { start }
    }

    /// Scramble the blank grid, preferring grids with many cells on. Every
    /// pattern is its own inverse, so flipping forward walks backwards.
    pub fn generate(rng: &mut DailyRng, config: &SwitchConfig) -> Result<Self> {
        generate_with_retries(PuzzleKind::Switch, config.max_attempts, |_| {
            let start = scramble(&SwitchSpace, 0, config.scramble, rng, |grid| {
                i64::from(grid.count_ones())
            });
            (start != 0).then_some(Self { start })
        })
    }
}

/// The grid graph without a particular start
#[derive(Debug, Clone, Copy)]
struct SwitchSpace;

impl StateSpace for SwitchSpace {
    type State = u16;

    fn key_bound(&self) -> u64 {
        GRID_COUNT as u64
    }

    fn encode(&self, state: &u16) -> u64 {
        u64::from(*state)
    }

    fn decode(&self, key: u64) -> u16 {
        key as u16
    }

    fn neighbors(&self, state: &u16, out: &mut Vec<u16>) {
        for shape in Shape::ALL {
            for cell in 0..CELLS {
                out.push(state ^ shape.mask(cell / SIZE, cell % SIZE));
            }
        }
    }

    fn is_goal(&self, state: &u16) -> bool {
        *state == 0
    }
}

impl ReverseMoves for SwitchSpace {
    fn sample_reverse(&self, state: &u16, rng: &mut DailyRng) -> Option<u16> {
        let shape = Shape::ALL[rng.below(Shape::ALL.len())];
        let cell = rng.below(CELLS);
        Some(state ^ shape.mask(cell / SIZE, cell % SIZE))
    }
}

impl StateSpace for SwitchPuzzle {
    type State = u16;

    fn key_bound(&self) -> u64 {
        SwitchSpace.key_bound()
    }

    fn encode(&self, state: &u16) -> u64 {
        SwitchSpace.encode(state)
    }

    fn decode(&self, key: u64) -> u16 {
        SwitchSpace.decode(key)
    }

    fn neighbors(&self, state: &u16, out: &mut Vec<u16>) {
        SwitchSpace.neighbors(state, out);
    }

    fn is_goal(&self, state: &u16) -> bool {
        *state == 0
    }
}

impl Puzzle for SwitchPuzzle {
    type Action = SwitchAction;
    const KIND: PuzzleKind = PuzzleKind::Switch;

    fn start(&self) -> u16 {
        self.start
    }

    fn apply(&self, state: &u16, action: SwitchAction) -> Option<u16> {
        if action.row >= SIZE || action.col >= SIZE {
            return None;
        }
        Some(state ^ action.mask())
    }

    fn actions(&self, _state: &u16) -> Vec<SwitchAction> {
        Shape::ALL
            .iter()
            .flat_map(|&shape| {
                (0..CELLS).map(move |cell| SwitchAction {
                    shape,
                    row: cell / SIZE,
                    col: cell % SIZE,
                })
            })
            .collect()
    }
}

/// Minimum moves for every grid, indexed by the grid bitmask
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimalTable {
    table: DistanceTable,
}

impl OptimalTable {
    /// Breadth-first search outwards from the blank grid
    pub fn compute() -> Result<Self> {
        Ok(Self {
            table: distance_table(&SwitchSpace, &0)?,
        })
    }

    /// Optimum for a grid
    pub fn lookup(&self, grid: u16) -> Optimum {
        match self.table.get(u64::from(grid)) {
            Some(moves) => Optimum::Moves(moves),
            None => Optimum::Unreachable,
        }
    }

    /// Every entry followed by a comma, `-1` for unreachable grids
    pub fn to_csv(&self) -> String {
        let mut csv = String::with_capacity(GRID_COUNT * 3);
        for distance in self.table.as_slice() {
            let _ = write!(csv, "{},", distance);
        }
        csv
    }

    /// Parse the comma-separated format written by [`OptimalTable::to_csv`]
    pub fn parse(text: &str) -> Result<Self> {
        let entries: Vec<&str> = text
            .split(',')
            .map(str::trim)
            .collect();
        // A trailing comma leaves one empty entry at the end
        let entries = match entries.split_last() {
            Some((last, rest)) if last.is_empty() => rest,
            _ => &entries[..],
        };

        let distances = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                entry
                    .parse::<i32>()
                    .ok()
                    .filter(|&d| d >= -1)
                    .ok_or_else(|| Error::InvalidTableEntry {
                        index,
                        entry: entry.to_string(),
                    })
            })
            .collect::<Result<Vec<i32>>>()?;

        if distances.len() != GRID_COUNT {
            return Err(Error::TableSizeMismatch {
                expected: GRID_COUNT,
                got: distances.len(),
            });
        }
        Ok(Self {
            table: DistanceTable::from_raw(distances),
        })
    }

    /// Read a table file; a missing file is reported as unavailable content
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::ContentUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_csv()).map_err(|source| Error::Io {
            operation: format!("write {}", path.display()),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::minimum_moves;

    fn grid(cells: &[(usize, usize)]) -> u16 {
        cells.iter().fold(0, |g, &(r, c)| g | 1 << (r * SIZE + c))
    }

    #[test]
    fn test_plus_at_one_one() {
        let expected = grid(&[(0, 1), (1, 0), (1, 1), (1, 2), (2, 1)]);
        assert_eq!(Shape::Plus.mask(1, 1), expected);
    }

    #[test]
    fn test_shapes_clip_at_the_edge() {
        assert_eq!(Shape::FullRect.mask(0, 0), grid(&[(0, 0), (0, 1), (1, 0), (1, 1)]));
        assert_eq!(Shape::Times.mask(3, 3), grid(&[(2, 2), (3, 3)]));
    }

    #[test]
    fn test_moves_are_involutions() {
        let puzzle = SwitchPuzzle::new(0);
        for action in puzzle.actions(&0) {
            let once = puzzle.apply(&0b1010_0110, action).unwrap();
            assert_eq!(puzzle.apply(&once, action), Some(0b1010_0110));
        }
    }

    #[test]
    fn test_known_scramble_solves_in_three() {
        let start = Shape::Plus.mask(1, 1) ^ Shape::Times.mask(2, 2) ^ Shape::FullRect.mask(3, 0);
        let puzzle = SwitchPuzzle::new(start);
        let optimum = minimum_moves(&puzzle, &start);
        assert!(optimum.moves().is_some_and(|n| n <= 3));
        assert_eq!(optimum, OptimalTable::compute().unwrap().lookup(start));
    }

    #[test]
    fn test_table_format() {
        let table = OptimalTable::compute().unwrap();
        assert_eq!(table.lookup(0), Optimum::Moves(0));
        assert_eq!(table.lookup(Shape::Plus.mask(2, 2)), Optimum::Moves(1));

        let csv = table.to_csv();
        assert!(csv.starts_with("0,"));
        assert!(csv.ends_with(','));
        assert_eq!(OptimalTable::parse(&csv).unwrap(), table);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            OptimalTable::parse("0,1,x,"),
            Err(Error::InvalidTableEntry { index: 2, .. })
        ));
        assert!(matches!(
            OptimalTable::parse("0,1,2,"),
            Err(Error::TableSizeMismatch { got: 3, .. })
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("optimal.csv");
        let table = OptimalTable::compute().unwrap();
        table.save(&path).unwrap();
        assert_eq!(OptimalTable::load(&path).unwrap(), table);
        assert!(matches!(
            OptimalTable::load(&dir.path().join("missing.csv")),
            Err(Error::ContentUnavailable { .. })
        ));
    }

    #[test]
    fn test_generated_start_is_scrambled() {
        let config = SwitchConfig::default();
        for seed in 1..20 {
            let puzzle = SwitchPuzzle::generate(&mut DailyRng::new(seed), &config).unwrap();
            let optimum = minimum_moves(&puzzle, &puzzle.start());
            assert!(optimum.moves().is_some_and(|n| (1..=6).contains(&n)));
        }
    }
}
