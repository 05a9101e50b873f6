//! Salesman: visit every node of a small lattice graph, walking as few edges
//! as possible.

use std::sync::Arc;

use crate::catalog::PuzzleKind;
use crate::error::Result;
use crate::generator::{generate_with_retries, shuffle, DEFAULT_MAX_ATTEMPTS};
use crate::puzzles::dsu::DisjointUnion;
use crate::rng::DailyRng;
use crate::session::Puzzle;
use crate::solver::StateSpace;

/// Largest supported node count (visited sets are `u16` masks)
pub const MAX_NODES: usize = 16;

/// Edges sharing an endpoint closer in angle than this are duplicates
const ANGLE_EPSILON: f64 = 1e-5;

#[derive(Debug, Clone)]
pub struct SalesmanConfig {
    /// Width and height of the lattice nodes are placed on
    pub grid_size: usize,
    pub node_count: usize,
    /// Random node pairs tried as edges
    pub edge_samples: usize,
    /// Longest edge, in lattice steps
    pub max_edge_span: i32,
    pub min_edges: usize,
    pub max_attempts: usize,
}

impl Default for SalesmanConfig {
    fn default() -> Self {
        Self {
            grid_size: 4,
            node_count: 12,
            edge_samples: 80,
            max_edge_span: 2,
            min_edges: 14,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Lattice point `(x, y)`
pub type Point = (i32, i32);

/// Undirected graph with nodes on lattice points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    positions: Vec<Point>,
    adjacency: Vec<u16>,
    edges: Vec<(usize, usize)>,
}

impl Graph {
    fn empty(positions: Vec<Point>) -> Self {
        let n = positions.len();
        Self {
            positions,
            adjacency: vec![0; n],
            edges: Vec::new(),
        }
    }

    /// Build a graph from explicit nodes and edges
    pub fn from_edges(positions: Vec<Point>, edges: &[(usize, usize)]) -> Self {
        let mut graph = Self::empty(positions);
        for &(a, b) in edges {
            graph.connect(a, b);
        }
        graph
    }

    fn connect(&mut self, a: usize, b: usize) {
        self.adjacency[a] |= 1 << b;
        self.adjacency[b] |= 1 << a;
        self.edges.push((a, b));
    }

    pub fn node_count(&self) -> usize {
        self.positions.len()
    }

    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn is_adjacent(&self, a: usize, b: usize) -> bool {
        a < self.node_count() && b < self.node_count() && self.adjacency[a] & (1 << b) != 0
    }

    /// Nodes adjacent to `node`, ascending
    pub fn neighbors_of(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        let mask = self.adjacency.get(node).copied().unwrap_or(0);
        (0..self.node_count()).filter(move |&m| mask & (1 << m) != 0)
    }

    fn has_node_at(&self, point: Point) -> bool {
        self.positions.contains(&point)
    }

    /// Whether `a - b` may become an edge: straight, short, not passing over
    /// another node and not overlapping an existing edge at a shared endpoint
    fn accepts_edge(&self, a: usize, b: usize, max_span: i32) -> bool {
        if a == b || self.is_adjacent(a, b) {
            return false;
        }
        let (pa, pb) = (self.positions[a], self.positions[b]);
        let (dx, dy) = (pb.0 - pa.0, pb.1 - pa.1);
        let straight = dx == 0 || dy == 0 || dx.abs() == dy.abs();
        let span = dx.abs().max(dy.abs());
        if !straight || span > max_span {
            return false;
        }

        let step = (dx / span, dy / span);
        let passes_node = (1..span).any(|k| self.has_node_at((pa.0 + k * step.0, pa.1 + k * step.1)));
        if passes_node {
            return false;
        }

        !self.edges.iter().any(|&(c, d)| {
            let shared = [(a, b, c, d), (a, b, d, c), (b, a, c, d), (b, a, d, c)];
            shared.iter().any(|&(p, q, s, r)| {
                p == s && (self.angle(p, q) - self.angle(p, r)).abs() < ANGLE_EPSILON
            })
        })
    }

    fn angle(&self, from: usize, to: usize) -> f64 {
        let (a, b) = (self.positions[from], self.positions[to]);
        f64::from(b.1 - a.1).atan2(f64::from(b.0 - a.0))
    }

    fn is_connected(&self) -> bool {
        let mut dsu = DisjointUnion::new(self.node_count());
        for &(a, b) in &self.edges {
            dsu.join(a, b);
        }
        dsu.parts() == 1
    }
}

/// Position on the tour: current node and the set of visited nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tour {
    pub node: usize,
    pub visited: u16,
}

/// Walk to an adjacent node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub to: usize,
}

/// Salesman puzzle instance
#[derive(Debug, Clone)]
pub struct SalesmanPuzzle {
    graph: Arc<Graph>,
}

impl SalesmanPuzzle {
    pub fn new(graph: Graph) -> Self {
        Self {
            graph: Arc::new(graph),
        }
    }

    /// Sample graphs until one is connected and has enough edges
    pub fn generate(rng: &mut DailyRng, config: &SalesmanConfig) -> Result<Self> {
        let graph = generate_with_retries(PuzzleKind::Salesman, config.max_attempts, |_| {
            sample_graph(rng, config)
        })?;
        Ok(Self::new(graph))
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    fn full_mask(&self) -> u16 {
        ((1u32 << self.graph.node_count()) - 1) as u16
    }
}

fn sample_graph(rng: &mut DailyRng, config: &SalesmanConfig) -> Option<Graph> {
    let size = config.grid_size as i32;
    let mut points: Vec<Point> = (0..size * size).map(|i| (i % size, i / size)).collect();
    shuffle(&mut points, rng);
    points.truncate(config.node_count.min(MAX_NODES));

    let n = points.len();
    let mut graph = Graph::empty(points);
    for _ in 0..config.edge_samples {
        let a = rng.below(n);
        let b = rng.below(n);
        if graph.accepts_edge(a, b, config.max_edge_span) {
            graph.connect(a, b);
        }
    }

    (graph.edges.len() >= config.min_edges && graph.is_connected()).then_some(graph)
}

impl StateSpace for SalesmanPuzzle {
    type State = Tour;

    fn key_bound(&self) -> u64 {
        let n = self.graph.node_count() as u64;
        n << n
    }

    fn encode(&self, state: &Tour) -> u64 {
        ((state.node as u64) << self.graph.node_count()) | u64::from(state.visited)
    }

    fn decode(&self, key: u64) -> Tour {
        let n = self.graph.node_count();
        Tour {
            node: (key >> n) as usize,
            visited: (key & ((1 << n) - 1)) as u16,
        }
    }

    fn neighbors(&self, state: &Tour, out: &mut Vec<Tour>) {
        out.extend(self.graph.neighbors_of(state.node).map(|to| Tour {
            node: to,
            visited: state.visited | (1 << to),
        }));
    }

    fn is_goal(&self, state: &Tour) -> bool {
        state.visited == self.full_mask()
    }
}

impl Puzzle for SalesmanPuzzle {
    type Action = Step;
    const KIND: PuzzleKind = PuzzleKind::Salesman;

    fn start(&self) -> Tour {
        Tour {
            node: 0,
            visited: 1,
        }
    }

    fn apply(&self, state: &Tour, action: Step) -> Option<Tour> {
        self.graph.is_adjacent(state.node, action.to).then(|| Tour {
            node: action.to,
            visited: state.visited | (1 << action.to),
        })
    }

    fn actions(&self, state: &Tour) -> Vec<Step> {
        self.graph.neighbors_of(state.node).map(|to| Step { to }).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{minimum_moves, Optimum};

    /// Star graph: 0 in the middle of 1, 2, 3
    fn star() -> SalesmanPuzzle {
        SalesmanPuzzle::new(Graph::from_edges(
            vec![(1, 1), (0, 1), (2, 1), (1, 0)],
            &[(0, 1), (0, 2), (0, 3)],
        ))
    }

    #[test]
    fn test_star_needs_backtracking() {
        let puzzle = star();
        // 0-1-0-2-0-3
        assert_eq!(minimum_moves(&puzzle, &puzzle.start()), Optimum::Moves(5));
    }

    #[test]
    fn test_steps_follow_edges() {
        let puzzle = star();
        let start = puzzle.start();
        assert_eq!(puzzle.apply(&start, Step { to: 2 }).map(|t| t.visited), Some(0b101));
        let at_one = puzzle.apply(&start, Step { to: 1 }).unwrap();
        assert_eq!(puzzle.apply(&at_one, Step { to: 2 }), None);
    }

    #[test]
    fn test_encoding_round_trip() {
        let puzzle = star();
        let tour = Tour {
            node: 3,
            visited: 0b1011,
        };
        let key = puzzle.encode(&tour);
        assert!(key < puzzle.key_bound());
        assert_eq!(puzzle.decode(key), tour);
    }

    #[test]
    fn test_edge_rules() {
        let graph = Graph::from_edges(vec![(0, 0), (1, 0), (2, 0), (1, 2), (3, 3)], &[(0, 1)]);
        // Passes over node 1
        assert!(!graph.accepts_edge(0, 2, 2));
        // Not straight
        assert!(!graph.accepts_edge(0, 3, 2));
        // Too long
        assert!(!graph.accepts_edge(0, 4, 2));
        // Already present
        assert!(!graph.accepts_edge(1, 0, 2));
        assert!(graph.accepts_edge(1, 2, 2));
    }

    #[test]
    fn test_collinear_edges_at_shared_endpoint_are_rejected() {
        // The long edge 0-1 passes over node 2; a short edge along it overlaps
        let graph = Graph::from_edges(vec![(0, 0), (2, 0), (1, 0)], &[(0, 1)]);
        assert!(!graph.accepts_edge(0, 2, 2));
        assert!(!graph.accepts_edge(2, 0, 2));
    }

    #[test]
    fn test_generated_graphs_meet_constraints() {
        let config = SalesmanConfig::default();
        for seed in 1..10 {
            let puzzle = SalesmanPuzzle::generate(&mut DailyRng::new(seed), &config).unwrap();
            let graph = puzzle.graph();
            assert_eq!(graph.node_count(), 12);
            assert!(graph.edges().len() >= 14);
            assert!(graph.is_connected());
            for &(a, b) in graph.edges() {
                let (pa, pb) = (graph.positions()[a], graph.positions()[b]);
                let (dx, dy) = ((pb.0 - pa.0).abs(), (pb.1 - pa.1).abs());
                assert!(dx <= 2 && dy <= 2);
                assert!(dx == 0 || dy == 0 || dx == dy);
            }
        }
    }

    #[test]
    fn test_generated_tour_is_solvable() {
        let puzzle = SalesmanPuzzle::generate(&mut DailyRng::new(6), &SalesmanConfig::default()).unwrap();
        let optimum = minimum_moves(&puzzle, &puzzle.start());
        assert!(optimum.moves().is_some_and(|n| n >= 11));
    }

    #[test]
    fn test_too_strict_config_exhausts() {
        let config = SalesmanConfig {
            min_edges: 1000,
            max_attempts: 3,
            ..SalesmanConfig::default()
        };
        assert!(SalesmanPuzzle::generate(&mut DailyRng::new(1), &config).is_err());
    }
}
