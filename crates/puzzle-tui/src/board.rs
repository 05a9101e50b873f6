//! Grid layout of each puzzle kind: what the cursor points at, what pressing
//! Enter does there, and how each cell is drawn.

use puzzle_core::puzzles::colors::{Activate, Cell};
use puzzle_core::puzzles::light::{is_lit, Toggle};
use puzzle_core::puzzles::operator::OperatorAction;
use puzzle_core::puzzles::salesman::Step;
use puzzle_core::puzzles::slide::{SlideMove, Tile, TARGET};
use puzzle_core::puzzles::spread::{Fill, Place, SeedKind};
use puzzle_core::puzzles::switch::{is_on, Shape, SwitchAction};
use puzzle_core::{GameSession, MoveOutcome, PuzzleKind};

/// Cell position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

impl Cursor {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Move by a delta, clamped to the board
    pub fn moved(self, kind: PuzzleKind, row_delta: i32, col_delta: i32) -> Self {
        let (rows, cols) = dimensions(kind);
        Self {
            row: (self.row as i32 + row_delta).clamp(0, rows as i32 - 1) as usize,
            col: (self.col as i32 + col_delta).clamp(0, cols as i32 - 1) as usize,
        }
    }
}

/// Rows and columns of the board
pub fn dimensions(kind: PuzzleKind) -> (usize, usize) {
    match kind {
        PuzzleKind::Operator => (1, OperatorAction::ALL.len()),
        PuzzleKind::Slide | PuzzleKind::Switch | PuzzleKind::Salesman => (4, 4),
        PuzzleKind::Light => (6, 6),
        PuzzleKind::Colors => (1, 6),
        PuzzleKind::Spread => (5, 5),
    }
}

/// Tools selected with the digit keys
pub fn tools(kind: PuzzleKind) -> &'static [&'static str] {
    match kind {
        PuzzleKind::Switch => &["square", "plus", "cross"],
        PuzzleKind::Spread => &["horizontal", "right", "vertical"],
        _ => &[],
    }
}

/// Play the move under the cursor. `None` when there is nothing to press.
pub fn activate(session: &mut GameSession, cursor: Cursor, tool: usize) -> Option<MoveOutcome> {
    let Cursor { row, col } = cursor;
    let outcome = match session {
        GameSession::Operator(s) => s.play(*OperatorAction::ALL.get(col)?),
        GameSession::Slide(s) => s.play(SlideMove { row, col }),
        GameSession::Switch(s) => s.play(SwitchAction {
            shape: *Shape::ALL.get(tool)?,
            row,
            col,
        }),
        GameSession::Salesman(s) => {
            let to = s
                .puzzle()
                .graph()
                .positions()
                .iter()
                .position(|&(x, y)| (x as usize, y as usize) == (col, row))?;
            s.play(Step { to })
        }
        GameSession::Light(s) => s.play(Toggle { row, col }),
        GameSession::Colors(s) => s.play(Activate { index: col }),
        GameSession::Spread(s) => s.play(Place {
            row,
            col,
            kind: *SeedKind::ALL.get(tool)?,
        }),
    };
    Some(outcome)
}

/// How a cell is colored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Plain,
    /// Switched on, lit, visited or placed by the player
    On,
    /// Filled in by the puzzle in the accent color
    Accent,
    /// Walls and empty lattice points
    Wall,
    /// The salesman's current node
    Current,
}

/// Text and style of one cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub text: String,
    pub style: CellStyle,
}

impl CellView {
    fn new(text: impl Into<String>, style: CellStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

fn tile_symbol(tile: Tile) -> &'static str {
    match tile {
        Tile::Empty => " ",
        Tile::Heart => "♥",
        Tile::Star => "★",
        Tile::Circle => "●",
    }
}

fn seed_letter(kind: SeedKind) -> char {
    match kind {
        SeedKind::Horizontal => 'H',
        SeedKind::Right => 'R',
        SeedKind::Vertical => 'V',
    }
}

fn color_abbreviation(cell: Cell) -> &'static str {
    match cell {
        Cell::Empty => "",
        Cell::Invert => "inv",
        Cell::Colder => "cld",
        Cell::Swap => "swp",
        Cell::MoveDown => "dwn",
        Cell::Erase => "ers",
        Cell::Hotter => "hot",
    }
}

/// The cell at `cursor`
pub fn cell_view(session: &GameSession, cursor: Cursor) -> CellView {
    let Cursor { row, col } = cursor;
    match session {
        GameSession::Operator(_) => CellView::new(
            OperatorAction::ALL.get(col).map_or("", |a| a.label()),
            CellStyle::Plain,
        ),
        GameSession::Slide(s) => {
            let tile = s.state()[row][col];
            let style = if tile == Tile::Empty {
                CellStyle::Wall
            } else {
                CellStyle::Plain
            };
            CellView::new(tile_symbol(tile), style)
        }
        GameSession::Switch(s) => {
            if is_on(*s.state(), row, col) {
                CellView::new("■", CellStyle::On)
            } else {
                CellView::new("·", CellStyle::Plain)
            }
        }
        GameSession::Salesman(s) => {
            let tour = s.state();
            let node = s
                .puzzle()
                .graph()
                .positions()
                .iter()
                .position(|&(x, y)| (x as usize, y as usize) == (col, row));
            match node {
                Some(node) if node == tour.node => CellView::new(node.to_string(), CellStyle::Current),
                Some(node) if tour.visited & (1 << node) != 0 => CellView::new(node.to_string(), CellStyle::On),
                Some(node) => CellView::new(node.to_string(), CellStyle::Plain),
                None => CellView::new("", CellStyle::Wall),
            }
        }
        GameSession::Light(s) => {
            let bulbs = *s.state();
            let target = s.puzzle().target(row, col);
            let level = s.puzzle().levels(bulbs)[row][col];
            let text = target.map_or_else(|| "·".to_string(), |t| t.to_string());
            let style = if is_lit(bulbs, row, col) {
                CellStyle::On
            } else if target == Some(level) {
                CellStyle::Accent
            } else {
                CellStyle::Plain
            };
            CellView::new(text, style)
        }
        GameSession::Colors(s) => {
            let cell = s.state()[col];
            let style = if cell.is_empty() {
                CellStyle::Wall
            } else {
                CellStyle::Accent
            };
            CellView::new(color_abbreviation(cell), style)
        }
        GameSession::Spread(s) => {
            let seeds = s.state();
            match (seeds[row][col], s.puzzle().board(seeds)[row][col]) {
                (_, Fill::Wall) => CellView::new("", CellStyle::Wall),
                (Some(kind), _) => CellView::new(seed_letter(kind).to_string(), CellStyle::On),
                (None, Fill::Kind(kind)) => {
                    CellView::new(seed_letter(kind).to_ascii_lowercase().to_string(), CellStyle::Accent)
                }
                (None, Fill::Empty) => CellView::new("·", CellStyle::Plain),
            }
        }
    }
}

/// Extra lines shown under the board
pub fn status_lines(session: &GameSession) -> Vec<String> {
    match session {
        GameSession::Operator(s) => {
            let [a, b, c] = *s.state();
            let [x, y, z] = s.puzzle().query();
            vec![
                format!("Numbers: {:>4} {:>4} {:>4}", a, b, c),
                format!("Target:  {:>4} {:>4} {:>4}", x, y, z),
            ]
        }
        GameSession::Slide(_) => {
            let mut lines = vec!["Target:".to_string()];
            for row in TARGET {
                lines.push(row.iter().map(|&t| tile_symbol(t)).collect::<Vec<_>>().join(" "));
            }
            lines
        }
        GameSession::Salesman(s) => {
            let tour = s.state();
            let graph = s.puzzle().graph();
            let neighbors: Vec<String> = graph.neighbors_of(tour.node).map(|n| n.to_string()).collect();
            vec![
                format!("At node {}, visited {}/{}", tour.node, tour.visited.count_ones(), graph.node_count()),
                format!("Roads to: {}", neighbors.join(", ")),
            ]
        }
        GameSession::Colors(s) => {
            let names: Vec<&str> = s.state().iter().filter(|c| !c.is_empty()).map(|c| c.name()).collect();
            vec![format!("Row: {}", names.join(", "))]
        }
        GameSession::Light(_) | GameSession::Switch(_) | GameSession::Spread(_) => Vec::new(),
    }
}
