//! Daily puzzle engine
//!
//! This crate generates one reproducible puzzle per day from a seeded random
//! stream, computes the fewest moves needed to solve it with a breadth-first
//! search, and tracks play with undo, redo and reset.

pub mod catalog;
pub mod content;
pub mod daily;
pub mod day;
pub mod error;
pub mod generator;
pub mod history;
pub mod puzzles;
pub mod rng;
pub mod session;
pub mod share;
pub mod solver;

pub use catalog::{AccentColor, PuzzleDescriptor, PuzzleKind, Schedule};
pub use content::{ContentStore, PuzzleContent};
pub use daily::{DailyGame, GameSession};
pub use day::{DayIndex, Weekday};
pub use error::{Error, Result};
pub use history::History;
pub use rng::DailyRng;
pub use session::{MoveOutcome, Puzzle, Session};
pub use share::SolvedReport;
pub use solver::{minimum_moves, Optimum, PendingOptimum, StateSpace};
