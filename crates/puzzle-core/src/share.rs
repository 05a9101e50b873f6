//! Solved screen text and the shareable result.

use serde::{Deserialize, Serialize};

use crate::catalog::{AccentColor, PuzzleKind};
use crate::day::DayIndex;
use crate::solver::Optimum;

/// Link appended to every share text
pub const SHARE_URL: &str = "https://dirckvdende.github.io/daily-puzzle";

/// Boxes per line of the move visualisation
const BOXES_PER_LINE: usize = 10;

/// Everything shown once a puzzle is solved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolvedReport {
    pub title: String,
    pub message: String,
    pub share_text: String,
    /// Solved in the minimum number of moves
    pub perfect: bool,
}

/// Wording of a puzzle's score: "in 5 moves" or "using 5 light bulbs"
fn score_phrase(kind: PuzzleKind, count: usize) -> (String, &'static str) {
    match kind {
        PuzzleKind::Light => (format!("using {} light bulbs", count), "bulbs"),
        PuzzleKind::Spread => (format!("using {} seeds", count), "seeds"),
        _ => (format!("in {} moves", count), "moves"),
    }
}

/// One coloured box per move, ten per line, each line preceded by a newline
pub fn move_boxes(count: usize, accent: AccentColor) -> String {
    let mut boxes = String::new();
    for i in 0..count {
        if i % BOXES_PER_LINE == 0 {
            boxes.push('\n');
        }
        boxes.push_str(accent.emoji());
    }
    boxes
}

/// Build the solved report. `optimum` is `None` while the solver is still
/// running; no optimum messaging is shown then, nor when it is unreachable.
pub fn solved_report(
    kind: PuzzleKind,
    day: Option<DayIndex>,
    moves: usize,
    optimum: Option<Optimum>,
) -> SolvedReport {
    let (phrase, unit) = score_phrase(kind, moves);
    let best = optimum.and_then(Optimum::moves);
    let perfect = best.is_some_and(|best| moves <= best as usize);

    let title = if perfect { "Perfect! 🏆" } else { "Solved!" }.to_string();

    let mut message = format!("You solved today's puzzle {}.", phrase);
    match best {
        _ if perfect => message.push_str(&format!(" That's the minimum number of {}!", unit)),
        Some(best) => message.push_str(&format!(" The minimum number of {} is {}.", unit, best)),
        None => {}
    }
    message.push_str(" But how do you compare against your friends?");

    let header = match day {
        Some(day) => format!("Daily Puzzle #{}", day.get()),
        None => "Daily Puzzle (practice)".to_string(),
    };
    let mut share_text = format!("{}\nI solved today's puzzle {}.", header, phrase);
    if perfect {
        share_text.push_str(" 🏆");
    }
    share_text.push_str(&move_boxes(moves, kind.accent()));
    share_text.push('\n');
    share_text.push_str(SHARE_URL);

    SolvedReport {
        title,
        message,
        share_text,
        perfect,
    }
}
