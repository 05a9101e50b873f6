//! Puzzle kinds. Each one is a [`StateSpace`](crate::solver::StateSpace) with
//! a generator and a [`Puzzle`](crate::session::Puzzle) implementation.

pub mod colors;
pub mod dsu;
pub mod light;
pub mod operator;
pub mod salesman;
pub mod slide;
pub mod spread;
pub mod switch;

pub use colors::ColorsPuzzle;
pub use light::LightPuzzle;
pub use operator::OperatorPuzzle;
pub use salesman::SalesmanPuzzle;
pub use slide::SlidePuzzle;
pub use spread::SpreadPuzzle;
pub use switch::SwitchPuzzle;
