//! Operator: reach a target triple of numbers from `[0, 0, 0]` with a small
//! set of arithmetic buttons acting on the last slot.

use crate::catalog::PuzzleKind;
use crate::day::DayIndex;
use crate::generator::shuffle;
use crate::rng::DailyRng;
use crate::session::Puzzle;
use crate::solver::StateSpace;

/// Three tracked numbers
pub type Numbers = [i32; 3];

/// Every value must stay strictly below this in magnitude
pub const LIMIT: i32 = 100;

const OFFSET: i32 = LIMIT - 1;
const RADIX: u64 = (2 * OFFSET + 1) as u64;

/// Operator buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorAction {
    AddOne,
    RemoveOne,
    Zero,
    /// Swap the first and last number
    Swap,
    /// Rotate right: `[a, b, c]` becomes `[c, a, b]`
    Cycle,
    Negate,
    /// Last becomes first plus second
    Add,
    /// Last becomes first times second
    Multiply,
}

impl OperatorAction {
    pub const ALL: [OperatorAction; 8] = [
        OperatorAction::AddOne,
        OperatorAction::RemoveOne,
        OperatorAction::Zero,
        OperatorAction::Swap,
        OperatorAction::Cycle,
        OperatorAction::Negate,
        OperatorAction::Add,
        OperatorAction::Multiply,
    ];

    /// Button label
    pub fn label(self) -> &'static str {
        match self {
            OperatorAction::AddOne => "+1",
            OperatorAction::RemoveOne => "-1",
            OperatorAction::Zero => "0",
            OperatorAction::Swap => "swap",
            OperatorAction::Cycle => "cycle",
            OperatorAction::Negate => "neg",
            OperatorAction::Add => "a+b",
            OperatorAction::Multiply => "a*b",
        }
    }

    fn perform(self, [a, b, c]: Numbers) -> Numbers {
        match self {
            OperatorAction::AddOne => [a, b, c + 1],
            OperatorAction::RemoveOne => [a, b, c - 1],
            OperatorAction::Zero => [a, b, 0],
            OperatorAction::Swap => [c, b, a],
            OperatorAction::Cycle => [c, a, b],
            OperatorAction::Negate => [a, b, -c],
            OperatorAction::Add => [a, b, a + b],
            OperatorAction::Multiply => [a, b, a * b],
        }
    }
}

/// Query generation tuning
#[derive(Debug, Clone)]
pub struct OperatorConfig {
    /// Days up to and including this one use the first query generator
    pub legacy_last_day: u32,
    /// Candidates drawn by the first generator
    pub legacy_samples: usize,
    /// Probability of negating each number
    pub negative_prob: f64,
    /// Probability of two large numbers
    pub two_large_prob: f64,
    /// Probability of three large numbers
    pub three_large_prob: f64,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            legacy_last_day: 3,
            legacy_samples: 10,
            negative_prob: 0.15,
            two_large_prob: 0.2,
            three_large_prob: 0.05,
        }
    }
}

const SMALL_CHOICES: [i32; 15] = [0, 1, 1, 1, 2, 2, 2, 3, 3, 4, 5, 6, 7, 8, 9];
const LEGACY_CHOICES: [i32; 10] = [0, 1, 1, 1, 2, 2, 3, 4, 5, 6];

/// Operator puzzle instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorPuzzle {
    query: Numbers,
}

impl OperatorPuzzle {
    pub fn new(query: Numbers) -> Self {
        Self { query }
    }

    /// Generate the query for a day. Practice puzzles (no day) always use the
    /// current generator.
    pub fn generate(day: Option<DayIndex>, rng: &mut DailyRng, config: &OperatorConfig) -> Self {
        let legacy = day.is_some_and(|d| d.get() <= config.legacy_last_day);
        let query = if legacy {
            legacy_query(rng, config)
        } else {
            query(rng, config)
        };
        Self { query }
    }

    pub fn query(&self) -> Numbers {
        self.query
    }
}

fn is_valid(numbers: &Numbers) -> bool {
    numbers.iter().all(|v| v.abs() < LIMIT)
}

/// Current generator: one to three large numbers, the rest small, some
/// negated, then shuffled
fn query(rng: &mut DailyRng, config: &OperatorConfig) -> Numbers {
    let r = rng.next_f64();
    let large = if r < config.three_large_prob {
        3
    } else if r < config.two_large_prob + config.three_large_prob {
        2
    } else {
        1
    };

    let mut numbers = [0; 3];
    for (i, slot) in numbers.iter_mut().enumerate() {
        *slot = if i < large {
            large_number(rng)
        } else {
            SMALL_CHOICES[rng.below(SMALL_CHOICES.len())]
        };
    }
    for slot in numbers.iter_mut() {
        if rng.chance(config.negative_prob) {
            *slot = -*slot;
        }
    }
    shuffle(&mut numbers, rng);
    numbers
}

/// Between 12 and 47, rarely plus a square of up to 49
fn large_number(rng: &mut DailyRng) -> i32 {
    let x = rng.scaled(6.0, 0.0);
    let y = rng.scaled(6.0, 1.0);
    let z = rng.scaled(6.0, 1.0);
    let mut value = 10 + x * x + y + z;
    if rng.chance(0.1) {
        let w = rng.scaled(7.0, 1.0);
        value += w * w;
    }
    value
}

/// First generator: best of several scored samples
fn legacy_query(rng: &mut DailyRng, config: &OperatorConfig) -> Numbers {
    let mut best = [0; 3];
    let mut best_score = f64::NEG_INFINITY;
    for _ in 0..config.legacy_samples {
        let candidate = legacy_sample(rng);
        let score = legacy_score(&candidate);
        if score > best_score {
            best_score = score;
            best = candidate;
        }
    }
    best
}

fn legacy_sample(rng: &mut DailyRng) -> Numbers {
    let mut numbers = [0; 3];
    for slot in numbers.iter_mut() {
        let mut value = if rng.chance(0.8) {
            LEGACY_CHOICES[rng.below(LEGACY_CHOICES.len())]
        } else {
            let x = rng.scaled(6.0, 0.0);
            let y = rng.scaled(4.0, 0.0);
            let z = rng.scaled(5.0, -2.0);
            let mut value = x * x + y + z;
            if rng.chance(0.1) {
                value += rng.scaled(20.0, 0.0);
            }
            value
        };
        if rng.chance(0.2) {
            value = -value;
        }
        *slot = value;
    }
    numbers
}

/// Score of a legacy candidate. The spread term tracks the minimum against two
/// different starting points; published puzzles were chosen with exactly this
/// formula.
fn legacy_score(numbers: &Numbers) -> f64 {
    let mut total = 0.0;
    let mut smallest = f64::from(LIMIT);
    let mut largest = 0.0f64;
    for &value in numbers {
        let value = f64::from(value);
        total += value.abs() / 5.0;
        total += value / 5.0;
        if value > 0.0 {
            total += 10.0;
        }
        smallest = smallest.min(value);
        largest = largest.min(value);
    }
    total + (largest - smallest) * (largest - smallest) / 4.0
}

impl StateSpace for OperatorPuzzle {
    type State = Numbers;

    fn key_bound(&self) -> u64 {
        RADIX * RADIX * RADIX
    }

    fn encode(&self, state: &Numbers) -> u64 {
        state
            .iter()
            .fold(0, |key, &v| key * RADIX + (v + OFFSET) as u64)
    }

    fn decode(&self, key: u64) -> Numbers {
        let digit = |k: u64| (k % RADIX) as i32 - OFFSET;
        [
            digit(key / (RADIX * RADIX)),
            digit(key / RADIX),
            digit(key),
        ]
    }

    fn neighbors(&self, state: &Numbers, out: &mut Vec<Numbers>) {
        out.extend(
            OperatorAction::ALL
                .iter()
                .filter_map(|&action| self.apply(state, action)),
        );
    }

    fn is_goal(&self, state: &Numbers) -> bool {
        *state == self.query
    }
}

impl Puzzle for OperatorPuzzle {
    type Action = OperatorAction;
    const KIND: PuzzleKind = PuzzleKind::Operator;

    fn start(&self) -> Numbers {
        [0; 3]
    }

    fn apply(&self, state: &Numbers, action: OperatorAction) -> Option<Numbers> {
        let next = action.perform(*state);
        (is_valid(&next) && next != *state).then_some(next)
    }

    fn actions(&self, _state: &Numbers) -> Vec<OperatorAction> {
        OperatorAction::ALL.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{minimum_moves, Optimum};

    #[test]
    fn test_actions() {
        let s = [2, 3, 4];
        assert_eq!(OperatorAction::Swap.perform(s), [4, 3, 2]);
        assert_eq!(OperatorAction::Cycle.perform(s), [4, 2, 3]);
        assert_eq!(OperatorAction::Add.perform(s), [2, 3, 5]);
        assert_eq!(OperatorAction::Multiply.perform(s), [2, 3, 6]);
        assert_eq!(OperatorAction::Negate.perform(s), [2, 3, -4]);
    }

    #[test]
    fn test_out_of_bounds_and_noops_are_rejected() {
        let puzzle = OperatorPuzzle::new([1, 1, 1]);
        assert_eq!(puzzle.apply(&[50, 2, 0], OperatorAction::Multiply), None);
        assert_eq!(puzzle.apply(&[0, 0, 99], OperatorAction::AddOne), None);
        assert_eq!(puzzle.apply(&[0, 0, 0], OperatorAction::Zero), None);
        assert_eq!(puzzle.apply(&[0, 0, -99], OperatorAction::Negate), Some([0, 0, 99]));
    }

    #[test]
    fn test_encoding_round_trip() {
        let puzzle = OperatorPuzzle::new([0, 0, 0]);
        for state in [[0, 0, 0], [-99, -99, -99], [99, 99, 99], [12, -40, 7]] {
            let key = puzzle.encode(&state);
            assert!(key < puzzle.key_bound());
            assert_eq!(puzzle.decode(key), state);
        }
    }

    #[test]
    fn test_small_optimums() {
        let cases = [([0, 0, 1], 1), ([0, 0, -1], 1), ([1, 0, 0], 2), ([0, 0, 2], 2)];
        for (query, expected) in cases {
            let puzzle = OperatorPuzzle::new(query);
            assert_eq!(minimum_moves(&puzzle, &[0, 0, 0]), Optimum::Moves(expected), "{:?}", query);
        }
    }

    #[test]
    fn test_legacy_score() {
        assert!((legacy_score(&[5, -3, 10]) - 26.0).abs() < 1e-9);
        assert!((legacy_score(&[1, 2, 3]) - 32.65).abs() < 1e-9);
    }

    #[test]
    fn test_generated_queries_are_valid() {
        let config = OperatorConfig::default();
        for day in 1..200 {
            let mut rng = DailyRng::new(day);
            let puzzle = OperatorPuzzle::generate(Some(DayIndex::new(day as u32)), &mut rng, &config);
            assert!(is_valid(&puzzle.query()), "day {}: {:?}", day, puzzle.query());
        }
    }

    #[test]
    fn test_current_generator_has_a_large_number() {
        let config = OperatorConfig::default();
        for day in 4..200 {
            let mut rng = DailyRng::new(day);
            let puzzle = OperatorPuzzle::generate(Some(DayIndex::new(day as u32)), &mut rng, &config);
            assert!(puzzle.query().iter().any(|v| v.abs() >= 12));
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let config = OperatorConfig::default();
        let a = OperatorPuzzle::generate(Some(DayIndex::new(2)), &mut DailyRng::new(2), &config);
        let b = OperatorPuzzle::generate(Some(DayIndex::new(2)), &mut DailyRng::new(2), &config);
        assert_eq!(a, b);
    }
}
