//! Loading the puzzle of the day.

use tracing::info;

use crate::catalog::{self, PuzzleKind};
use crate::day::DayIndex;
use crate::error::Result;
use crate::puzzles::colors::{ColorsConfig, ColorsPuzzle};
use crate::puzzles::light::{LightConfig, LightPuzzle};
use crate::puzzles::operator::{OperatorConfig, OperatorPuzzle};
use crate::puzzles::salesman::{SalesmanConfig, SalesmanPuzzle};
use crate::puzzles::slide::{SlideConfig, SlidePuzzle};
use crate::puzzles::spread::{SpreadConfig, SpreadPuzzle};
use crate::puzzles::switch::{OptimalTable, SwitchConfig, SwitchPuzzle};
use crate::rng::DailyRng;
use crate::session::{Puzzle, Session};
use crate::share::SolvedReport;
use crate::solver::{Optimum, PendingOptimum};

/// A session of any puzzle kind
#[derive(Debug)]
pub enum GameSession {
    Operator(Session<OperatorPuzzle>),
    Slide(Session<SlidePuzzle>),
    Switch(Session<SwitchPuzzle>),
    Salesman(Session<SalesmanPuzzle>),
    Light(Session<LightPuzzle>),
    Colors(Session<ColorsPuzzle>),
    Spread(Session<SpreadPuzzle>),
}

macro_rules! each_session {
    ($session:expr, $s:ident => $body:expr) => {
        match $session {
            GameSession::Operator($s) => $body,
            GameSession::Slide($s) => $body,
            GameSession::Switch($s) => $body,
            GameSession::Salesman($s) => $body,
            GameSession::Light($s) => $body,
            GameSession::Colors($s) => $body,
            GameSession::Spread($s) => $body,
        }
    };
}

impl GameSession {
    pub fn kind(&self) -> PuzzleKind {
        match self {
            GameSession::Operator(_) => OperatorPuzzle::KIND,
            GameSession::Slide(_) => SlidePuzzle::KIND,
            GameSession::Switch(_) => SwitchPuzzle::KIND,
            GameSession::Salesman(_) => SalesmanPuzzle::KIND,
            GameSession::Light(_) => LightPuzzle::KIND,
            GameSession::Colors(_) => ColorsPuzzle::KIND,
            GameSession::Spread(_) => SpreadPuzzle::KIND,
        }
    }

    pub fn is_solved(&self) -> bool {
        each_session!(self, s => s.is_solved())
    }

    pub fn moves_taken(&self) -> usize {
        each_session!(self, s => s.moves_taken())
    }

    pub fn history_len(&self) -> usize {
        each_session!(self, s => s.history_len())
    }

    pub fn can_redo(&self) -> bool {
        each_session!(self, s => s.can_redo())
    }

    pub fn undo(&mut self) -> bool {
        each_session!(self, s => s.undo())
    }

    pub fn redo(&mut self) -> bool {
        each_session!(self, s => s.redo())
    }

    pub fn reset(&mut self) -> bool {
        each_session!(self, s => s.reset())
    }

    pub fn optimum(&mut self) -> Option<Optimum> {
        each_session!(self, s => s.optimum())
    }

    pub fn wait_optimum(&mut self) -> Optimum {
        each_session!(self, s => s.wait_optimum())
    }

    pub fn report(&mut self, day: Option<DayIndex>) -> Option<SolvedReport> {
        each_session!(self, s => s.report(day))
    }
}

/// The puzzle being played, and the day it belongs to
#[derive(Debug)]
pub struct DailyGame {
    day: Option<DayIndex>,
    session: GameSession,
}

impl DailyGame {
    /// The scheduled puzzle for `day`
    pub fn load(day: DayIndex) -> Result<Self> {
        Self::load_kind(catalog::select(day).kind, day)
    }

    /// A specific kind, generated from `day`'s seed
    pub fn load_kind(kind: PuzzleKind, day: DayIndex) -> Result<Self> {
        Self::generate(kind, Some(day), &mut DailyRng::new(day.seed()), None)
    }

    /// A fresh puzzle that belongs to no day
    pub fn practice(kind: PuzzleKind) -> Result<Self> {
        Self::generate(kind, None, &mut DailyRng::from_entropy(), None)
    }

    /// Generate `kind` from `rng`. A switch table, when given, replaces the
    /// background search for switch puzzles.
    pub fn generate(
        kind: PuzzleKind,
        day: Option<DayIndex>,
        rng: &mut DailyRng,
        switch_table: Option<&OptimalTable>,
    ) -> Result<Self> {
        match day {
            Some(day) => info!("generating {} for day {}", kind, day),
            None => info!("generating practice {} (seed {})", kind, rng.seed()),
        }

        let session = match kind {
            PuzzleKind::Operator => GameSession::Operator(Session::new(OperatorPuzzle::generate(
                day,
                rng,
                &OperatorConfig::default(),
            ))),
            PuzzleKind::Slide => {
                GameSession::Slide(Session::new(SlidePuzzle::generate(rng, &SlideConfig::default())))
            }
            PuzzleKind::Switch => {
                let puzzle = SwitchPuzzle::generate(rng, &SwitchConfig::default())?;
                let session = match switch_table {
                    Some(table) => {
                        let optimum = table.lookup(puzzle.start());
                        Session::with_optimum(puzzle, PendingOptimum::ready(optimum))
                    }
                    None => Session::new(puzzle),
                };
                GameSession::Switch(session)
            }
            PuzzleKind::Salesman => GameSession::Salesman(Session::new(SalesmanPuzzle::generate(
                rng,
                &SalesmanConfig::default(),
            )?)),
            PuzzleKind::Light => {
                GameSession::Light(Session::new(LightPuzzle::generate(rng, &LightConfig::default())?))
            }
            PuzzleKind::Colors => {
                GameSession::Colors(Session::new(ColorsPuzzle::generate(rng, &ColorsConfig::default())?))
            }
            PuzzleKind::Spread => {
                GameSession::Spread(Session::new(SpreadPuzzle::generate(rng, &SpreadConfig::default())?))
            }
        };

        Ok(Self { day, session })
    }

    /// `None` for practice puzzles
    pub fn day(&self) -> Option<DayIndex> {
        self.day
    }

    pub fn kind(&self) -> PuzzleKind {
        self.session.kind()
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    /// Solved report, once solved
    pub fn report(&mut self) -> Option<SolvedReport> {
        self.session.report(self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_picks_kind() {
        // 10 % 7 == 3 has no scheduled puzzle
        assert_eq!(DailyGame::load(DayIndex::new(10)).unwrap().kind(), PuzzleKind::Operator);
        assert_eq!(DailyGame::load(DayIndex::new(12)).unwrap().kind(), PuzzleKind::Switch);
        assert_eq!(DailyGame::load(DayIndex::new(14)).unwrap().kind(), PuzzleKind::Spread);
    }

    #[test]
    fn test_every_kind_loads_unsolved() {
        for &kind in PuzzleKind::all() {
            let mut game = DailyGame::load_kind(kind, DayIndex::new(60)).unwrap();
            assert_eq!(game.kind(), kind);
            assert_eq!(game.day(), Some(DayIndex::new(60)));
            assert!(!game.session().is_solved());
            assert!(game.report().is_none());
            assert!(game.session_mut().wait_optimum().moves().is_some_and(|n| n > 0));
        }
    }

    #[test]
    fn test_switch_table_supplies_the_optimum() {
        let table = OptimalTable::compute().unwrap();
        let day = DayIndex::new(61);
        let mut with_table =
            DailyGame::generate(PuzzleKind::Switch, Some(day), &mut DailyRng::new(day.seed()), Some(&table))
                .unwrap();
        let mut searched = DailyGame::load_kind(PuzzleKind::Switch, day).unwrap();

        let optimum = with_table.session_mut().optimum();
        assert!(optimum.is_some());
        assert_eq!(optimum, Some(searched.session_mut().wait_optimum()));
    }

    #[test]
    fn test_practice_has_no_day() {
        let game = DailyGame::practice(PuzzleKind::Slide).unwrap();
        assert_eq!(game.day(), None);
        assert_eq!(game.kind(), PuzzleKind::Slide);
    }
}
