//! Light: place bulbs so that sampled cells reach their target light level,
//! using as few bulbs as possible.

use crate::catalog::PuzzleKind;
use crate::error::Result;
use crate::generator::{generate_with_retries, DEFAULT_MAX_ATTEMPTS};
use crate::rng::DailyRng;
use crate::session::Puzzle;
use crate::solver::StateSpace;

pub const HEIGHT: usize = 6;
pub const WIDTH: usize = 6;
const CELLS: usize = HEIGHT * WIDTH;

#[derive(Debug, Clone)]
pub struct LightConfig {
    /// Level of a bulb's own cell; it drops by one per step of Manhattan distance
    pub base_level: u8,
    /// Bulbs placed to produce the targets
    pub bulbs: usize,
    /// Cells sampled as targets
    pub targets: usize,
    pub max_attempts: usize,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            base_level: 6,
            bulbs: 5,
            targets: 10,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Toggle the bulb at a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggle {
    pub row: usize,
    pub col: usize,
}

fn bit(row: usize, col: usize) -> u64 {
    1 << (row * WIDTH + col)
}

/// Bulb grid: bit `row * WIDTH + col` is set when that bulb is on
pub type Bulbs = u64;

/// Light puzzle instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightPuzzle {
    base_level: u8,
    /// Target level per cell, if that cell has one
    targets: [[Option<u8>; WIDTH]; HEIGHT],
}

impl LightPuzzle {
    pub fn new(base_level: u8, targets: [[Option<u8>; WIDTH]; HEIGHT]) -> Self {
        Self {
            base_level,
            targets,
        }
    }

    /// Light random bulbs and sample levels from the result as targets
    pub fn generate(rng: &mut DailyRng, config: &LightConfig) -> Result<Self> {
        generate_with_retries(PuzzleKind::Light, config.max_attempts, |_| {
            let mut bulbs: Bulbs = 0;
            for _ in 0..config.bulbs {
                let row = rng.below(HEIGHT);
                let col = rng.below(WIDTH);
                bulbs |= bit(row, col);
            }

            let levels = light_levels(bulbs, config.base_level);
            let mut targets = [[None; WIDTH]; HEIGHT];
            for _ in 0..config.targets {
                let row = rng.below(HEIGHT);
                let col = rng.below(WIDTH);
                targets[row][col] = Some(levels[row][col]);
            }

            let puzzle = Self::new(config.base_level, targets);
            // An unlit board must not already be a solution
            (!puzzle.is_goal(&0)).then_some(puzzle)
        })
    }

    pub fn target(&self, row: usize, col: usize) -> Option<u8> {
        self.targets[row][col]
    }

    /// Light level of every cell
    pub fn levels(&self, bulbs: Bulbs) -> [[u8; WIDTH]; HEIGHT] {
        light_levels(bulbs, self.base_level)
    }

    pub fn base_level(&self) -> u8 {
        self.base_level
    }
}

/// Brightest bulb wins: `max(0, base - distance)`
fn light_levels(bulbs: Bulbs, base_level: u8) -> [[u8; WIDTH]; HEIGHT] {
    let mut levels = [[0u8; WIDTH]; HEIGHT];
    for cell in (0..CELLS).filter(|&i| bulbs & (1 << i) != 0) {
        let (br, bc) = (cell / WIDTH, cell % WIDTH);
        for (r, row) in levels.iter_mut().enumerate() {
            for (c, level) in row.iter_mut().enumerate() {
                let distance = r.abs_diff(br) + c.abs_diff(bc);
                let brightness = usize::from(base_level).saturating_sub(distance) as u8;
                *level = (*level).max(brightness);
            }
        }
    }
    levels
}

pub fn is_lit(bulbs: Bulbs, row: usize, col: usize) -> bool {
    bulbs & bit(row, col) != 0
}

impl StateSpace for LightPuzzle {
    type State = Bulbs;

    fn key_bound(&self) -> u64 {
        1 << CELLS
    }

    fn encode(&self, state: &Bulbs) -> u64 {
        *state
    }

    fn decode(&self, key: u64) -> Bulbs {
        key
    }

    /// Bulbs are only ever added after the highest one already lit, so every
    /// set of bulbs is reached exactly once and the depth is the bulb count
    fn neighbors(&self, state: &Bulbs, out: &mut Vec<Bulbs>) {
        let first_free = (u64::BITS - state.leading_zeros()) as usize;
        out.extend((first_free..CELLS).map(|i| state | (1 << i)));
    }

    fn is_goal(&self, state: &Bulbs) -> bool {
        let levels = self.levels(*state);
        self.targets.iter().zip(levels.iter()).all(|(targets, levels)| {
            targets
                .iter()
                .zip(levels.iter())
                .all(|(target, level)| target.map_or(true, |t| t == *level))
        })
    }
}

impl Puzzle for LightPuzzle {
    type Action = Toggle;
    const KIND: PuzzleKind = PuzzleKind::Light;

    fn start(&self) -> Bulbs {
        0
    }

    fn apply(&self, state: &Bulbs, action: Toggle) -> Option<Bulbs> {
        (action.row < HEIGHT && action.col < WIDTH).then(|| state ^ bit(action.row, action.col))
    }

    fn actions(&self, _state: &Bulbs) -> Vec<Toggle> {
        (0..CELLS)
            .map(|i| Toggle {
                row: i / WIDTH,
                col: i % WIDTH,
            })
            .collect()
    }

    /// Scored by bulbs lit, not clicks
    fn moves_taken(&self, state: &Bulbs, _history_len: usize) -> usize {
        state.count_ones() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{minimum_moves, Optimum};

    #[test]
    fn test_levels_fall_off_with_distance() {
        let levels = light_levels(bit(0, 0), 6);
        assert_eq!(levels[0][0], 6);
        assert_eq!(levels[0][1], 5);
        assert_eq!(levels[2][3], 1);
        assert_eq!(levels[3][3], 0);
        assert_eq!(levels[5][5], 0);
    }

    #[test]
    fn test_brightest_bulb_wins() {
        let levels = light_levels(bit(0, 0) | bit(0, 2), 6);
        assert_eq!(levels[0][1], 5);
        assert_eq!(levels[0][2], 6);
    }

    #[test]
    fn test_single_bulb_optimum() {
        let mut targets = [[None; WIDTH]; HEIGHT];
        targets[2][2] = Some(6);
        let puzzle = LightPuzzle::new(6, targets);
        assert_eq!(minimum_moves(&puzzle, &0), Optimum::Moves(1));
    }

    #[test]
    fn test_two_bulb_optimum() {
        let mut targets = [[None; WIDTH]; HEIGHT];
        targets[0][0] = Some(6);
        targets[5][5] = Some(6);
        let puzzle = LightPuzzle::new(6, targets);
        assert_eq!(minimum_moves(&puzzle, &0), Optimum::Moves(2));
    }

    #[test]
    fn test_canonical_neighbors() {
        let puzzle = LightPuzzle::new(6, [[None; WIDTH]; HEIGHT]);
        let mut out = Vec::new();
        puzzle.neighbors(&0, &mut out);
        assert_eq!(out.len(), CELLS);
        out.clear();
        puzzle.neighbors(&(1 << 33), &mut out);
        assert_eq!(out, vec![(1 << 33) | (1 << 34), (1 << 33) | (1 << 35)]);
    }

    #[test]
    fn test_score_is_bulb_count() {
        let puzzle = LightPuzzle::new(6, [[None; WIDTH]; HEIGHT]);
        assert_eq!(puzzle.moves_taken(&(bit(1, 1) | bit(4, 2)), 7), 2);
    }

    #[test]
    fn test_generated_targets_are_solvable() {
        let config = LightConfig::default();
        for seed in [3, 8, 15] {
            let puzzle = LightPuzzle::generate(&mut DailyRng::new(seed), &config).unwrap();
            let optimum = minimum_moves(&puzzle, &0);
            assert!(optimum.moves().is_some_and(|n| (1..=5).contains(&n)), "{:?}", optimum);
        }
    }
}
