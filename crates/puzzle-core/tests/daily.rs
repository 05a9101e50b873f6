//! The same day always yields the same puzzle.

use puzzle_core::catalog::{self, PuzzleKind, HISTORY_FIRST_DAY};
use puzzle_core::puzzles::operator::{OperatorAction, OperatorPuzzle};
use puzzle_core::{DailyGame, DayIndex, GameSession, MoveOutcome, Session};

fn same_start(a: &GameSession, b: &GameSession) -> bool {
    match (a, b) {
        (GameSession::Operator(a), GameSession::Operator(b)) => a.puzzle() == b.puzzle(),
        (GameSession::Slide(a), GameSession::Slide(b)) => a.state() == b.state(),
        (GameSession::Switch(a), GameSession::Switch(b)) => a.state() == b.state(),
        (GameSession::Salesman(a), GameSession::Salesman(b)) => a.puzzle().graph() == b.puzzle().graph(),
        (GameSession::Light(a), GameSession::Light(b)) => a.puzzle() == b.puzzle(),
        (GameSession::Colors(a), GameSession::Colors(b)) => a.state() == b.state(),
        (GameSession::Spread(a), GameSession::Spread(b)) => a.puzzle() == b.puzzle(),
        _ => false,
    }
}

#[test]
fn same_day_same_puzzle() {
    // One full week
    for day in 47..54 {
        let day = DayIndex::new(day);
        let first = DailyGame::load(day).unwrap();
        let second = DailyGame::load(day).unwrap();
        assert_eq!(first.kind(), second.kind());
        assert!(same_start(first.session(), second.session()), "day {}", day);
    }
}

#[test]
fn every_kind_is_deterministic() {
    let day = DayIndex::new(120);
    for &kind in PuzzleKind::all() {
        let first = DailyGame::load_kind(kind, day).unwrap();
        let second = DailyGame::load_kind(kind, day).unwrap();
        assert!(same_start(first.session(), second.session()), "{}", kind);
    }
}

#[test]
fn history_listing_matches_the_schedule() {
    let today = DayIndex::new(100);
    let listing = catalog::history(today);
    assert_eq!(listing.len(), 28);
    assert_eq!(listing[0].day, today);
    for entry in &listing {
        assert!(entry.day.get() >= HISTORY_FIRST_DAY);
        assert_eq!(entry.kind, catalog::select(entry.day).kind);
    }
}

/// Walk the last slot to `target` one step at a time
fn set_last(session: &mut Session<OperatorPuzzle>, target: i32) {
    while !session.is_solved() && session.state()[2] != target {
        let step = if target > session.state()[2] {
            OperatorAction::AddOne
        } else {
            OperatorAction::RemoveOne
        };
        assert_ne!(session.play(step), MoveOutcome::Rejected);
    }
}

#[test]
fn solving_the_operator_puzzle_reports_the_day() {
    let day = DayIndex::new(1000);
    let mut game = DailyGame::load_kind(PuzzleKind::Operator, day).unwrap();
    let GameSession::Operator(session) = game.session_mut() else {
        panic!("expected an operator session");
    };
    let [first, second, third] = session.puzzle().query();

    // [b, 0, 0] after one rotation, [a, b, 0] after two, then set c
    for target in [second, first] {
        set_last(session, target);
        if !session.is_solved() {
            // Rotating three equal numbers is a rejected no-op, which is fine here
            session.play(OperatorAction::Cycle);
        }
    }
    set_last(session, third);
    assert!(session.is_solved());
    session.wait_optimum();

    let report = game.report().expect("solved puzzles have a report");
    assert!(report.share_text.starts_with("Daily Puzzle #1000"));
}
