//! Slide: a 4x4 sliding-tile puzzle with repeated tile symbols.

use crate::catalog::PuzzleKind;
use crate::generator::{scramble, ReverseMoves, ScrambleConfig};
use crate::rng::DailyRng;
use crate::session::Puzzle;
use crate::solver::StateSpace;

pub const SIZE: usize = 4;
const CELLS: usize = SIZE * SIZE;

/// Tile symbols. The discriminant is the encoding digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Empty = 0,
    Heart = 1,
    Star = 2,
    Circle = 3,
}

impl Tile {
    fn from_digit(digit: u64) -> Self {
        match digit {
            1 => Tile::Heart,
            2 => Tile::Star,
            3 => Tile::Circle,
            _ => Tile::Empty,
        }
    }
}

pub type Board = [[Tile; SIZE]; SIZE];

/// Layout to restore
pub const TARGET: Board = {
    use Tile::*;
    [
        [Star, Circle, Circle, Star],
        [Circle, Heart, Heart, Circle],
        [Circle, Heart, Heart, Circle],
        [Star, Circle, Circle, Empty],
    ]
};

/// Slide a tile into the empty cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideMove {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone)]
pub struct SlideConfig {
    /// Random moves applied to the target
    pub shuffle_moves: usize,
}

impl Default for SlideConfig {
    fn default() -> Self {
        Self { shuffle_moves: 300 }
    }
}

fn empty_cell(board: &Board) -> Option<(usize, usize)> {
    (0..CELLS)
        .map(|i| (i / SIZE, i % SIZE))
        .find(|&(r, c)| board[r][c] == Tile::Empty)
}

/// Tiles that can slide, in the order up, down, left, right of the empty cell
pub fn possible_moves(board: &Board) -> Vec<SlideMove> {
    let Some((er, ec)) = empty_cell(board) else {
        return Vec::new();
    };
    let mut moves = Vec::with_capacity(4);
    if er > 0 {
        moves.push(SlideMove { row: er - 1, col: ec });
    }
    if er + 1 < SIZE {
        moves.push(SlideMove { row: er + 1, col: ec });
    }
    if ec > 0 {
        moves.push(SlideMove { row: er, col: ec - 1 });
    }
    if ec + 1 < SIZE {
        moves.push(SlideMove { row: er, col: ec + 1 });
    }
    moves
}

fn slide(board: &Board, mv: SlideMove) -> Board {
    let mut next = *board;
    if let Some((er, ec)) = empty_cell(board) {
        next[er][ec] = board[mv.row][mv.col];
        next[mv.row][mv.col] = Tile::Empty;
    }
    next
}

/// Slide puzzle instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidePuzzle {
    start: Board,
}

impl SlidePuzzle {
    pub fn new(start: Board) -> Self {
        Self { start }
    }

    /// Random walk away from the target
    pub fn generate(rng: &mut DailyRng, config: &SlideConfig) -> Self {
        let walk = ScrambleConfig {
            steps: config.shuffle_moves,
            branching: 1,
        };
        let start = scramble(&TargetSpace, TARGET, walk, rng, |_| 0);
        Self { start }
    }
}

/// Slide moves are their own inverse, so the scramble walks forward from the
/// target over the same graph
#[derive(Debug)]
struct TargetSpace;

impl StateSpace for TargetSpace {
    type State = Board;

    fn key_bound(&self) -> u64 {
        1 << (2 * CELLS)
    }

    fn encode(&self, state: &Board) -> u64 {
        encode_board(state)
    }

    fn decode(&self, key: u64) -> Board {
        decode_board(key)
    }

    fn neighbors(&self, state: &Board, out: &mut Vec<Board>) {
        out.extend(possible_moves(state).into_iter().map(|mv| slide(state, mv)));
    }

    fn is_goal(&self, state: &Board) -> bool {
        *state == TARGET
    }
}

impl ReverseMoves for TargetSpace {
    fn sample_reverse(&self, state: &Board, rng: &mut DailyRng) -> Option<Board> {
        let moves = possible_moves(state);
        if moves.is_empty() {
            return None;
        }
        Some(slide(state, moves[rng.below(moves.len())]))
    }
}

/// Base-4 digits, row-major, first cell least significant
fn encode_board(board: &Board) -> u64 {
    board
        .iter()
        .flatten()
        .rev()
        .fold(0, |key, &tile| key * 4 + tile as u64)
}

fn decode_board(key: u64) -> Board {
    let mut board = [[Tile::Empty; SIZE]; SIZE];
    for (i, tile) in board.iter_mut().flatten().enumerate() {
        *tile = Tile::from_digit((key >> (2 * i)) & 3);
    }
    board
}

impl StateSpace for SlidePuzzle {
    type State = Board;

    fn key_bound(&self) -> u64 {
        TargetSpace.key_bound()
    }

    fn encode(&self, state: &Board) -> u64 {
        encode_board(state)
    }

    fn decode(&self, key: u64) -> Board {
        decode_board(key)
    }

    fn neighbors(&self, state: &Board, out: &mut Vec<Board>) {
        TargetSpace.neighbors(state, out);
    }

    fn is_goal(&self, state: &Board) -> bool {
        *state == TARGET
    }
}

impl Puzzle for SlidePuzzle {
    type Action = SlideMove;
    const KIND: PuzzleKind = PuzzleKind::Slide;

    fn start(&self) -> Board {
        self.start
    }

    fn apply(&self, state: &Board, action: SlideMove) -> Option<Board> {
        possible_moves(state)
            .contains(&action)
            .then(|| slide(state, action))
    }

    fn actions(&self, state: &Board) -> Vec<SlideMove> {
        possible_moves(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{minimum_moves, Optimum};

    #[test]
    fn test_target_moves() {
        let moves = possible_moves(&TARGET);
        assert_eq!(
            moves,
            vec![SlideMove { row: 2, col: 3 }, SlideMove { row: 3, col: 2 }]
        );
    }

    #[test]
    fn test_one_move_from_target() {
        for mv in possible_moves(&TARGET) {
            let board = slide(&TARGET, mv);
            let puzzle = SlidePuzzle::new(board);
            assert_eq!(minimum_moves(&puzzle, &board), Optimum::Moves(1));
        }
    }

    #[test]
    fn test_encoding_round_trip() {
        assert_eq!(decode_board(encode_board(&TARGET)), TARGET);
        // First cell is the least significant digit
        assert_eq!(encode_board(&TARGET) & 3, Tile::Star as u64);
    }

    #[test]
    fn test_only_adjacent_tiles_slide() {
        let puzzle = SlidePuzzle::new(TARGET);
        assert_eq!(puzzle.apply(&TARGET, SlideMove { row: 0, col: 0 }), None);
        let next = puzzle.apply(&TARGET, SlideMove { row: 3, col: 2 }).unwrap();
        assert_eq!(next[3][3], Tile::Circle);
        assert_eq!(next[3][2], Tile::Empty);
    }

    #[test]
    fn test_generated_board_keeps_tiles() {
        let puzzle = SlidePuzzle::generate(&mut DailyRng::new(9), &SlideConfig::default());
        let count = |board: &Board, tile: Tile| board.iter().flatten().filter(|&&t| t == tile).count();
        for tile in [Tile::Empty, Tile::Heart, Tile::Star, Tile::Circle] {
            assert_eq!(count(&puzzle.start(), tile), count(&TARGET, tile));
        }
    }

    #[test]
    fn test_short_walk_is_solvable_within_its_length() {
        let config = SlideConfig { shuffle_moves: 8 };
        let puzzle = SlidePuzzle::generate(&mut DailyRng::new(21), &config);
        match minimum_moves(&puzzle, &puzzle.start()) {
            Optimum::Moves(n) => assert!(n <= 8),
            other => panic!("unexpected {:?}", other),
        }
    }
}
