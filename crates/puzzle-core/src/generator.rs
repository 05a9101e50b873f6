//! Reverse-walk scrambling and bounded regeneration.

use tracing::debug;

use crate::catalog::PuzzleKind;
use crate::error::{Error, Result};
use crate::rng::DailyRng;
use crate::solver::StateSpace;

/// Default cap on whole-run regeneration attempts
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

/// A state space that can be walked backwards from its goal
pub trait ReverseMoves: StateSpace {
    /// Sample one state from which a single forward move leads to `state`.
    /// Returns `None` when the sampled move does not apply.
    fn sample_reverse(&self, state: &Self::State, rng: &mut DailyRng) -> Option<Self::State>;
}

/// Configuration for a reverse-walk scramble
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrambleConfig {
    /// Number of reverse moves taken
    pub steps: usize,
    /// Candidates sampled per step; the best-scoring one is kept
    pub branching: usize,
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        Self {
            steps: 6,
            branching: 4,
        }
    }
}

/// Walk backwards from `goal`, keeping the best-scoring of `branching`
/// candidates at every step. The first of equally scored candidates wins; a
/// step with no applicable candidate stays in place.
pub fn scramble<S, F>(
    space: &S,
    goal: S::State,
    config: ScrambleConfig,
    rng: &mut DailyRng,
    mut score: F,
) -> S::State
where
    S: ReverseMoves + ?Sized,
    F: FnMut(&S::State) -> i64,
{
    let mut current = goal;
    for _ in 0..config.steps {
        let mut best: Option<(S::State, i64)> = None;
        for _ in 0..config.branching {
            let Some(candidate) = space.sample_reverse(&current, rng) else {
                continue;
            };
            let candidate_score = score(&candidate);
            if best.as_ref().map_or(true, |(_, s)| candidate_score > *s) {
                best = Some((candidate, candidate_score));
            }
        }
        if let Some((state, _)) = best {
            current = state;
        }
    }
    current
}

/// Run `attempt` until it produces a value, at most `max_attempts` times.
/// The attempt number (starting at zero) is passed in.
pub fn generate_with_retries<T, F>(kind: PuzzleKind, max_attempts: usize, mut attempt: F) -> Result<T>
where
    F: FnMut(usize) -> Option<T>,
{
    for n in 0..max_attempts {
        if let Some(value) = attempt(n) {
            if n > 0 {
                debug!("{} generated after {} rejected attempts", kind, n);
            }
            return Ok(value);
        }
        debug!("{} generation attempt {} rejected", kind, n);
    }
    Err(Error::GenerationExhausted {
        kind,
        attempts: max_attempts,
    })
}

/// Fisher–Yates shuffle drawing `j = i + below(len - i)`
pub fn shuffle<T>(items: &mut [T], rng: &mut DailyRng) {
    let len = items.len();
    for i in 0..len {
        let j = i + rng.below(len - i);
        items.swap(i, j);
    }
}
