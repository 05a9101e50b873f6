//! Spread: place seeds on a 5x5 board so that, once they spread, every open
//! cell is filled. Fewer seeds is better.

use crate::catalog::PuzzleKind;
use crate::error::Result;
use crate::generator::{generate_with_retries, DEFAULT_MAX_ATTEMPTS};
use crate::rng::DailyRng;
use crate::session::Puzzle;
use crate::solver::StateSpace;

pub const SIZE: usize = 5;
const CELLS: usize = SIZE * SIZE;

/// Seed kinds. The discriminant is the encoding digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeedKind {
    /// Spreads left and right
    Horizontal = 1,
    /// Spreads right only
    Right = 2,
    /// Spreads up and down
    Vertical = 3,
}

impl SeedKind {
    pub const ALL: [SeedKind; 3] = [SeedKind::Horizontal, SeedKind::Right, SeedKind::Vertical];

    fn from_digit(digit: u64) -> Option<Self> {
        match digit {
            1 => Some(SeedKind::Horizontal),
            2 => Some(SeedKind::Right),
            3 => Some(SeedKind::Vertical),
            _ => None,
        }
    }

    /// Offsets `(row, col)` this kind spreads to
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            SeedKind::Horizontal => &[(0, -1), (0, 1)],
            SeedKind::Right => &[(0, 1)],
            SeedKind::Vertical => &[(-1, 0), (1, 0)],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SeedKind::Horizontal => "horizontal",
            SeedKind::Right => "right",
            SeedKind::Vertical => "vertical",
        }
    }
}

/// Seeds placed by the player, by cell
pub type Seeds = [[Option<SeedKind>; SIZE]; SIZE];
pub type Walls = [[bool; SIZE]; SIZE];

/// Board contents after simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Wall,
    Empty,
    Kind(SeedKind),
}

pub type Board = [[Fill; SIZE]; SIZE];

/// Place a seed of `kind`; placing the same kind again removes it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Place {
    pub row: usize,
    pub col: usize,
    pub kind: SeedKind,
}

#[derive(Debug, Clone)]
pub struct SpreadConfig {
    /// Seeds whose spread decides the walls
    pub seeds: usize,
    /// Fewest open cells a board may have
    pub min_open: usize,
    pub max_attempts: usize,
}

impl Default for SpreadConfig {
    fn default() -> Self {
        Self {
            seeds: 3,
            min_open: 14,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Spread the seeds until the board stops changing. Each step reads the
/// board as it was when the step began, row by row, and only fills cells
/// that are still empty.
pub fn simulate(walls: &Walls, seeds: &Seeds) -> Board {
    let mut board = [[Fill::Empty; SIZE]; SIZE];
    for r in 0..SIZE {
        for c in 0..SIZE {
            board[r][c] = match (walls[r][c], seeds[r][c]) {
                (true, _) => Fill::Wall,
                (false, Some(kind)) => Fill::Kind(kind),
                (false, None) => Fill::Empty,
            };
        }
    }

    loop {
        let snapshot = board;
        for r in 0..SIZE {
            for c in 0..SIZE {
                let Fill::Kind(kind) = snapshot[r][c] else {
                    continue;
                };
                for &(dr, dc) in kind.offsets() {
                    let (tr, tc) = (r as i32 + dr, c as i32 + dc);
                    if !(0..SIZE as i32).contains(&tr) || !(0..SIZE as i32).contains(&tc) {
                        continue;
                    }
                    let target = &mut board[tr as usize][tc as usize];
                    if *target == Fill::Empty {
                        *target = Fill::Kind(kind);
                    }
                }
            }
        }
        if board == snapshot {
            return board;
        }
    }
}

/// Spread puzzle instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadPuzzle {
    walls: Walls,
}

impl SpreadPuzzle {
    pub fn new(walls: Walls) -> Self {
        Self { walls }
    }

    /// Walls are the cells a few random seeds fail to reach
    pub fn generate(rng: &mut DailyRng, config: &SpreadConfig) -> Result<Self> {
        generate_with_retries(PuzzleKind::Spread, config.max_attempts, |_| {
            let mut seeds: Seeds = [[None; SIZE]; SIZE];
            for _ in 0..config.seeds {
                let row = rng.below(SIZE);
                let col = rng.below(SIZE);
                seeds[row][col] = Some(SeedKind::ALL[rng.below(SeedKind::ALL.len())]);
            }

            let board = simulate(&[[false; SIZE]; SIZE], &seeds);
            let mut walls = [[false; SIZE]; SIZE];
            for (wall_row, board_row) in walls.iter_mut().zip(board.iter()) {
                for (wall, fill) in wall_row.iter_mut().zip(board_row.iter()) {
                    *wall = *fill == Fill::Empty;
                }
            }

            let puzzle = Self { walls };
            (puzzle.open_cells() >= config.min_open).then_some(puzzle)
        })
    }

    pub fn is_wall(&self, row: usize, col: usize) -> bool {
        self.walls[row][col]
    }

    pub fn open_cells(&self) -> usize {
        self.walls.iter().flatten().filter(|&&wall| !wall).count()
    }

    pub fn board(&self, seeds: &Seeds) -> Board {
        simulate(&self.walls, seeds)
    }
}

fn seed_count(seeds: &Seeds) -> usize {
    seeds.iter().flatten().filter(|seed| seed.is_some()).count()
}

impl StateSpace for SpreadPuzzle {
    type State = Seeds;

    fn key_bound(&self) -> u64 {
        1 << (2 * CELLS)
    }

    /// Base-4 digits, row-major, first cell least significant
    fn encode(&self, state: &Seeds) -> u64 {
        state
            .iter()
            .flatten()
            .enumerate()
            .fold(0, |key, (i, seed)| key | seed.map_or(0, |k| k as u64) << (2 * i))
    }

    fn decode(&self, key: u64) -> Seeds {
        let mut seeds: Seeds = [[None; SIZE]; SIZE];
        for (i, seed) in seeds.iter_mut().flatten().enumerate() {
            *seed = SeedKind::from_digit((key >> (2 * i)) & 3);
        }
        seeds
    }

    /// Seeds are only added after the last placed one, so each set of seeds
    /// is reached once and the depth is the seed count
    fn neighbors(&self, state: &Seeds, out: &mut Vec<Seeds>) {
        let first_free = (0..CELLS)
            .rev()
            .find(|&i| state[i / SIZE][i % SIZE].is_some())
            .map_or(0, |i| i + 1);
        for i in first_free..CELLS {
            let (r, c) = (i / SIZE, i % SIZE);
            if self.walls[r][c] {
                continue;
            }
            for kind in SeedKind::ALL {
                let mut next = *state;
                next[r][c] = Some(kind);
                out.push(next);
            }
        }
    }

    fn is_goal(&self, state: &Seeds) -> bool {
        self.board(state).iter().flatten().all(|fill| *fill != Fill::Empty)
    }
}

impl Puzzle for SpreadPuzzle {
    type Action = Place;
    const KIND: PuzzleKind = PuzzleKind::Spread;

    fn start(&self) -> Seeds {
        [[None; SIZE]; SIZE]
    }

    fn apply(&self, state: &Seeds, action: Place) -> Option<Seeds> {
        if action.row >= SIZE || action.col >= SIZE || self.walls[action.row][action.col] {
            return None;
        }
        let mut next = *state;
        let cell = &mut next[action.row][action.col];
        *cell = match *cell {
            Some(kind) if kind == action.kind => None,
            _ => Some(action.kind),
        };
        Some(next)
    }

    fn actions(&self, _state: &Seeds) -> Vec<Place> {
        (0..CELLS)
            .filter(|&i| !self.walls[i / SIZE][i % SIZE])
            .flat_map(|i| {
                SeedKind::ALL.into_iter().map(move |kind| Place {
                    row: i / SIZE,
                    col: i % SIZE,
                    kind,
                })
            })
            .collect()
    }

    /// Scored by seeds on the board, not clicks
    fn moves_taken(&self, state: &Seeds, _history_len: usize) -> usize {
        seed_count(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{minimum_moves, Optimum};

    const OPEN: Walls = [[false; SIZE]; SIZE];

    fn seeds(placed: &[(usize, usize, SeedKind)]) -> Seeds {
        let mut seeds: Seeds = [[None; SIZE]; SIZE];
        for &(r, c, kind) in placed {
            seeds[r][c] = Some(kind);
        }
        seeds
    }

    #[test]
    fn test_horizontal_fills_its_row() {
        let board = simulate(&OPEN, &seeds(&[(2, 2, SeedKind::Horizontal)]));
        assert!(board[2].iter().all(|f| *f == Fill::Kind(SeedKind::Horizontal)));
        assert_eq!(board[1][2], Fill::Empty);
    }

    #[test]
    fn test_right_only_spreads_right() {
        let board = simulate(&OPEN, &seeds(&[(0, 2, SeedKind::Right)]));
        assert_eq!(board[0][1], Fill::Empty);
        assert_eq!(board[0][4], Fill::Kind(SeedKind::Right));
    }

    #[test]
    fn test_walls_block_spread() {
        let mut walls = OPEN;
        walls[0][3] = true;
        let board = simulate(&walls, &seeds(&[(0, 0, SeedKind::Horizontal)]));
        assert_eq!(board[0][2], Fill::Kind(SeedKind::Horizontal));
        assert_eq!(board[0][3], Fill::Wall);
        assert_eq!(board[0][4], Fill::Empty);
    }

    #[test]
    fn test_first_writer_wins_within_a_step() {
        // Both seeds reach (1, 1) in the first step; (0, 1) comes first in
        // row order, and the right seed is blocked for good
        let board = simulate(
            &OPEN,
            &seeds(&[(0, 1, SeedKind::Vertical), (1, 0, SeedKind::Right)]),
        );
        assert_eq!(board[1][1], Fill::Kind(SeedKind::Vertical));
        assert_eq!(board[4][1], Fill::Kind(SeedKind::Vertical));
        assert_eq!(board[1][2], Fill::Empty);
    }

    #[test]
    fn test_placing_toggles_and_replaces() {
        let mut walls = OPEN;
        walls[4][4] = true;
        let puzzle = SpreadPuzzle::new(walls);
        let start = puzzle.start();
        let place = |kind| Place { row: 1, col: 1, kind };

        let one = puzzle.apply(&start, place(SeedKind::Right)).unwrap();
        assert_eq!(one[1][1], Some(SeedKind::Right));
        let swapped = puzzle.apply(&one, place(SeedKind::Vertical)).unwrap();
        assert_eq!(swapped[1][1], Some(SeedKind::Vertical));
        assert_eq!(puzzle.apply(&swapped, place(SeedKind::Vertical)), Some(start));

        let on_wall = Place { row: 4, col: 4, kind: SeedKind::Right };
        assert_eq!(puzzle.apply(&start, on_wall), None);
    }

    #[test]
    fn test_one_row_needs_one_seed() {
        let mut walls = [[true; SIZE]; SIZE];
        walls[3] = [false; SIZE];
        let puzzle = SpreadPuzzle::new(walls);
        assert_eq!(minimum_moves(&puzzle, &puzzle.start()), Optimum::Moves(1));
    }

    #[test]
    fn test_score_is_seed_count() {
        let puzzle = SpreadPuzzle::new(OPEN);
        let state = seeds(&[(0, 0, SeedKind::Right), (3, 3, SeedKind::Vertical)]);
        assert_eq!(puzzle.moves_taken(&state, 9), 2);
    }

    #[test]
    fn test_encoding_round_trip() {
        let puzzle = SpreadPuzzle::new(OPEN);
        let state = seeds(&[(0, 0, SeedKind::Vertical), (4, 4, SeedKind::Horizontal)]);
        let key = puzzle.encode(&state);
        assert!(key < puzzle.key_bound());
        assert_eq!(key & 3, SeedKind::Vertical as u64);
        assert_eq!(puzzle.decode(key), state);
    }

    #[test]
    fn test_generated_boards_need_at_most_the_generating_seeds() {
        let config = SpreadConfig::default();
        for seed in [2, 7, 12] {
            let puzzle = SpreadPuzzle::generate(&mut DailyRng::new(seed), &config).unwrap();
            assert!(puzzle.open_cells() >= 14);
            let optimum = minimum_moves(&puzzle, &puzzle.start());
            assert!(optimum.moves().is_some_and(|n| (1..=3).contains(&n)), "{:?}", optimum);
        }
    }
}
