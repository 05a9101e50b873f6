//! Undo, redo and reset invariants under random move sequences.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use puzzle_core::puzzles::switch::{Shape, SwitchAction, SwitchPuzzle, SIZE};
use puzzle_core::{History, MoveOutcome, Session};

#[test]
fn n_moves_then_n_undos_returns_to_start() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let mut history = History::new();
        let mut current: u32 = 0;
        let moves = rng.gen_range(1..40);
        for _ in 0..moves {
            history.push(current);
            current = rng.gen();
        }
        for _ in 0..moves {
            current = history.undo(current).unwrap();
        }
        assert_eq!(current, 0);
        assert!(history.is_empty());
        assert_eq!(history.undo(current), None);
    }
}

#[test]
fn undo_then_redo_is_identity() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut history = History::new();
    let mut current: u32 = 0;
    let mut states = vec![current];
    for _ in 0..30 {
        history.push(current);
        current = rng.gen();
        states.push(current);
    }

    let back = rng.gen_range(1..30);
    for _ in 0..back {
        current = history.undo(current).unwrap();
    }
    assert_eq!(current, states[states.len() - 1 - back]);
    for _ in 0..back {
        current = history.redo(current).unwrap();
    }
    assert_eq!(current, *states.last().unwrap());
    assert!(!history.can_redo());
}

#[test]
fn reset_returns_the_first_state_and_empties() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut history = History::new();
    let mut current: u32 = 42;
    for _ in 0..rng.gen_range(2..20) {
        history.push(current);
        current = rng.gen();
    }
    let _ = history.undo(current);
    assert_eq!(history.reset(), Some(42));
    assert!(history.is_empty());
    assert!(!history.can_redo());
    assert_eq!(history.reset(), None);
}

fn random_action(rng: &mut StdRng) -> SwitchAction {
    SwitchAction {
        shape: Shape::ALL[rng.gen_range(0..Shape::ALL.len())],
        // Occasionally off the board, which must be rejected
        row: rng.gen_range(0..SIZE + 1),
        col: rng.gen_range(0..SIZE),
    }
}

#[test]
fn session_history_tracks_accepted_moves_only() {
    let mut rng = StdRng::seed_from_u64(99);
    // Start far from solved so random play rarely finishes
    let start = 0xffff;
    let mut session = Session::new(SwitchPuzzle::new(start));
    let mut accepted: usize = 0;

    for _ in 0..200 {
        if session.is_solved() {
            break;
        }
        let before = session.history_len();
        let state = *session.state();
        match rng.gen_range(0..10) {
            0 => {
                if session.undo() {
                    accepted -= 1;
                }
            }
            1 => {
                if session.redo() {
                    accepted += 1;
                }
            }
            _ => match session.play(random_action(&mut rng)) {
                MoveOutcome::Rejected => {
                    assert_eq!(session.history_len(), before);
                    assert_eq!(*session.state(), state);
                }
                MoveOutcome::Applied | MoveOutcome::Solved => accepted += 1,
            },
        }
        assert_eq!(session.history_len(), accepted);
    }

    if !session.is_solved() {
        session.reset();
        assert_eq!(*session.state(), start);
        assert_eq!(session.history_len(), 0);
    }
}
