//! Breadth-first shortest-path search over a puzzle's state graph.
//!
//! Every puzzle kind describes its states through [`StateSpace`]: a bijective
//! encoding to integer keys below a known bound, a neighbour enumeration and a
//! goal test. The search stores only keys in its frontier and visited set, so
//! the same code serves a 2^16 bitmask grid and a 4^25 seed board.

use std::collections::{HashSet, VecDeque};
use std::fmt::Debug;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Largest key bound for which a dense bitset is used as the visited set
pub const DENSE_KEY_LIMIT: u64 = 1 << 28;

/// State graph of one puzzle instance
pub trait StateSpace {
    type State: Clone + PartialEq + Debug + Send + 'static;

    /// Exclusive upper bound of [`StateSpace::encode`]
    fn key_bound(&self) -> u64;

    /// Map a state to its key in `0..key_bound()`
    fn encode(&self, state: &Self::State) -> u64;

    /// Inverse of [`StateSpace::encode`] for every reachable state
    fn decode(&self, key: u64) -> Self::State;

    /// Push every state reachable in one move onto `out`
    fn neighbors(&self, state: &Self::State, out: &mut Vec<Self::State>);

    fn is_goal(&self, state: &Self::State) -> bool;
}

/// Result of a minimum-moves search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Optimum {
    /// Shortest solution length
    Moves(u32),
    /// No goal state is reachable from the start
    Unreachable,
    /// The depth limit cut the search off before a goal was found
    LimitReached,
}

impl Optimum {
    /// Move count, if one is known
    pub fn moves(self) -> Option<u32> {
        match self {
            Optimum::Moves(n) => Some(n),
            _ => None,
        }
    }
}

impl std::fmt::Display for Optimum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Optimum::Moves(n) => write!(f, "{}", n),
            Optimum::Unreachable => write!(f, "unreachable"),
            Optimum::LimitReached => write!(f, "limit reached"),
        }
    }
}

/// Bounds on a single search run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Do not look for solutions longer than this
    pub max_depth: Option<u32>,
}

impl SearchLimits {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn depth(max_depth: u32) -> Self {
        Self {
            max_depth: Some(max_depth),
        }
    }
}

/// Visited keys: a bitset when the key space is small enough, a hash set
/// otherwise
enum VisitedSet {
    Dense(Vec<u64>),
    Sparse(HashSet<u64>),
}

impl VisitedSet {
    fn for_bound(bound: u64) -> Self {
        if bound <= DENSE_KEY_LIMIT {
            VisitedSet::Dense(vec![0; bound.div_ceil(64) as usize])
        } else {
            VisitedSet::Sparse(HashSet::new())
        }
    }

    /// Mark `key` as visited, returning false if it already was
    fn insert(&mut self, key: u64) -> bool {
        match self {
            VisitedSet::Dense(words) => {
                let word = &mut words[(key / 64) as usize];
                let bit = 1u64 << (key % 64);
                let fresh = *word & bit == 0;
                *word |= bit;
                fresh
            }
            VisitedSet::Sparse(keys) => keys.insert(key),
        }
    }
}

/// Shortest number of moves from `start` to any goal state
pub fn minimum_moves<S: StateSpace + ?Sized>(space: &S, start: &S::State) -> Optimum {
    minimum_moves_with_limits(space, start, SearchLimits::unlimited())
}

/// [`minimum_moves`] with a depth cap
pub fn minimum_moves_with_limits<S: StateSpace + ?Sized>(
    space: &S,
    start: &S::State,
    limits: SearchLimits,
) -> Optimum {
    let started = Instant::now();
    let result = search(space, start, limits);
    debug!(
        "minimum moves {} in {} ms",
        result,
        started.elapsed().as_millis()
    );
    if result == Optimum::Unreachable {
        warn!("no solution found; state space exhausted");
    }
    result
}

fn search<S: StateSpace + ?Sized>(space: &S, start: &S::State, limits: SearchLimits) -> Optimum {
    if space.is_goal(start) {
        return Optimum::Moves(0);
    }

    let mut visited = VisitedSet::for_bound(space.key_bound());
    let mut queue = VecDeque::new();
    let mut next = Vec::new();
    let mut truncated = false;

    let start_key = space.encode(start);
    visited.insert(start_key);
    queue.push_back((start_key, 0u32));

    while let Some((key, distance)) = queue.pop_front() {
        if limits.max_depth.is_some_and(|max| distance >= max) {
            truncated = true;
            continue;
        }
        let state = space.decode(key);
        next.clear();
        space.neighbors(&state, &mut next);
        for neighbor in next.drain(..) {
            let neighbor_key = space.encode(&neighbor);
            if !visited.insert(neighbor_key) {
                continue;
            }
            if space.is_goal(&neighbor) {
                return Optimum::Moves(distance + 1);
            }
            queue.push_back((neighbor_key, distance + 1));
        }
    }

    if truncated {
        Optimum::LimitReached
    } else {
        Optimum::Unreachable
    }
}

/// Distance from one source state to every key of a dense state space
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceTable {
    distances: Vec<i32>,
}

impl DistanceTable {
    /// Wrap raw distances, `-1` meaning unreachable
    pub fn from_raw(distances: Vec<i32>) -> Self {
        Self { distances }
    }

    pub fn get(&self, key: u64) -> Option<u32> {
        self.distances
            .get(key as usize)
            .and_then(|&d| u32::try_from(d).ok())
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.distances
    }
}

/// Breadth-first distances from `source` to every state. For puzzles whose
/// moves are their own inverse this is also the distance *to* the source.
pub fn distance_table<S: StateSpace + ?Sized>(space: &S, source: &S::State) -> Result<DistanceTable> {
    let bound = space.key_bound();
    if bound > DENSE_KEY_LIMIT {
        return Err(Error::StateSpaceTooLarge { bound });
    }

    let started = Instant::now();
    let mut distances = vec![-1i32; bound as usize];
    let mut queue = VecDeque::new();
    let mut next = Vec::new();

    let source_key = space.encode(source);
    distances[source_key as usize] = 0;
    queue.push_back(source_key);

    while let Some(key) = queue.pop_front() {
        let distance = distances[key as usize];
        next.clear();
        space.neighbors(&space.decode(key), &mut next);
        for neighbor in next.drain(..) {
            let neighbor_key = space.encode(&neighbor);
            let slot = &mut distances[neighbor_key as usize];
            if *slot < 0 {
                *slot = distance + 1;
                queue.push_back(neighbor_key);
            }
        }
    }

    debug!(
        "distance table of {} keys in {} ms",
        bound,
        started.elapsed().as_millis()
    );
    Ok(DistanceTable { distances })
}

/// Optimum being computed on a worker thread
#[derive(Debug)]
pub struct PendingOptimum {
    receiver: Option<Receiver<Optimum>>,
    result: Option<Optimum>,
}

impl PendingOptimum {
    /// An optimum that is already known, e.g. from a precomputed table
    pub fn ready(optimum: Optimum) -> Self {
        Self {
            receiver: None,
            result: Some(optimum),
        }
    }

    /// Check for the result without blocking
    pub fn poll(&mut self) -> Option<Optimum> {
        if self.result.is_none() {
            if let Some(receiver) = &self.receiver {
                match receiver.try_recv() {
                    Ok(optimum) => self.result = Some(optimum),
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Disconnected) => {
                        warn!("solver thread ended without a result");
                        self.result = Some(Optimum::Unreachable);
                    }
                }
            }
        }
        self.result
    }

    /// Block until the result arrives
    pub fn wait(&mut self) -> Optimum {
        if let Some(optimum) = self.result {
            return optimum;
        }
        let optimum = match self.receiver.as_ref().map(|r| r.recv()) {
            Some(Ok(optimum)) => optimum,
            _ => {
                warn!("solver thread ended without a result");
                Optimum::Unreachable
            }
        };
        self.result = Some(optimum);
        optimum
    }
}

/// Run [`minimum_moves`] on a background thread over an owned snapshot of the
/// puzzle and its start state
pub fn spawn_minimum_moves<S>(space: S, start: S::State) -> PendingOptimum
where
    S: StateSpace + Send + 'static,
{
    let (sender, receiver) = mpsc::channel();
    let spawned = thread::Builder::new()
        .name("optimum-solver".into())
        .spawn(move || {
            // The receiver may already be gone if the session was dropped
            let _ = sender.send(minimum_moves(&space, &start));
        });

    match spawned {
        Ok(_) => PendingOptimum {
            receiver: Some(receiver),
            result: None,
        },
        Err(err) => {
            warn!("could not start solver thread: {}", err);
            PendingOptimum::ready(Optimum::Unreachable)
        }
    }
}
