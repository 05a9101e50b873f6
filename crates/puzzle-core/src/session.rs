//! One puzzle being played: current state, history and the optimum.

use std::fmt::Debug;

use tracing::{debug, info};

use crate::catalog::PuzzleKind;
use crate::day::DayIndex;
use crate::history::History;
use crate::share::{solved_report, SolvedReport};
use crate::solver::{spawn_minimum_moves, Optimum, PendingOptimum, StateSpace};

/// A playable puzzle instance
pub trait Puzzle: StateSpace + Clone + Send + Sync + 'static {
    /// A move the player can make
    type Action: Copy + Debug + PartialEq;

    const KIND: PuzzleKind;

    /// Generated starting state
    fn start(&self) -> Self::State;

    /// Apply an action, or `None` if it is invalid in `state`
    fn apply(&self, state: &Self::State, action: Self::Action) -> Option<Self::State>;

    /// Every action available in `state`, valid or not
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// The number reported to the player once solved. Most puzzles count the
    /// moves made; placement puzzles count what is on the board.
    fn moves_taken(&self, _state: &Self::State, history_len: usize) -> usize {
        history_len
    }
}

/// Outcome of [`Session::play`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move was recorded
    Applied,
    /// The move was recorded and solved the puzzle
    Solved,
    /// The move was invalid, had no effect, or the puzzle is already solved
    Rejected,
}

/// Play state of one puzzle
#[derive(Debug)]
pub struct Session<P: Puzzle> {
    puzzle: P,
    current: P::State,
    history: History<P::State>,
    optimum: PendingOptimum,
    solved: bool,
}

impl<P: Puzzle> Session<P> {
    /// Start a session and begin computing the optimum in the background
    pub fn new(puzzle: P) -> Self {
        let start = puzzle.start();
        let optimum = spawn_minimum_moves(puzzle.clone(), start.clone());
        Self::with_optimum(puzzle, optimum)
    }

    /// Start a session with an optimum from elsewhere, e.g. a precomputed table
    pub fn with_optimum(puzzle: P, optimum: PendingOptimum) -> Self {
        let current = puzzle.start();
        let solved = puzzle.is_goal(&current);
        info!("loaded {} puzzle", P::KIND);
        Self {
            puzzle,
            current,
            history: History::new(),
            optimum,
            solved,
        }
    }

    pub fn puzzle(&self) -> &P {
        &self.puzzle
    }

    pub fn state(&self) -> &P::State {
        &self.current
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Moves that can currently be undone
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Score shown to the player
    pub fn moves_taken(&self) -> usize {
        self.puzzle.moves_taken(&self.current, self.history.len())
    }

    /// Make a move. Invalid moves and moves that leave the state unchanged are
    /// rejected and never reach the history.
    pub fn play(&mut self, action: P::Action) -> MoveOutcome {
        if self.solved {
            return MoveOutcome::Rejected;
        }
        let next = match self.puzzle.apply(&self.current, action) {
            Some(next) if next != self.current => next,
            _ => {
                debug!("rejected {:?}", action);
                return MoveOutcome::Rejected;
            }
        };

        let previous = std::mem::replace(&mut self.current, next);
        self.history.push(previous);

        if self.puzzle.is_goal(&self.current) {
            self.solved = true;
            info!("{} solved in {} moves", P::KIND, self.moves_taken());
            MoveOutcome::Solved
        } else {
            MoveOutcome::Applied
        }
    }

    /// Undo the last move
    pub fn undo(&mut self) -> bool {
        if self.solved {
            return false;
        }
        match self.history.undo(self.current.clone()) {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    /// Redo the last undone move
    pub fn redo(&mut self) -> bool {
        if self.solved {
            return false;
        }
        match self.history.redo(self.current.clone()) {
            Some(next) => {
                self.current = next;
                self.solved = self.puzzle.is_goal(&self.current);
                true
            }
            None => false,
        }
    }

    /// Return to the starting state and clear the history
    pub fn reset(&mut self) -> bool {
        if self.solved {
            return false;
        }
        match self.history.reset() {
            Some(first) => {
                self.current = first;
                true
            }
            None => false,
        }
    }

    /// The optimum, if the background search has finished
    pub fn optimum(&mut self) -> Option<Optimum> {
        self.optimum.poll()
    }

    /// Block until the optimum is known
    pub fn wait_optimum(&mut self) -> Optimum {
        self.optimum.wait()
    }

    /// Solved report for sharing, once the puzzle is solved. A practice
    /// puzzle has no day.
    pub fn report(&mut self, day: Option<DayIndex>) -> Option<SolvedReport> {
        if !self.solved {
            return None;
        }
        let optimum = self.optimum.poll();
        Some(solved_report(P::KIND, day, self.moves_taken(), optimum))
    }
}
