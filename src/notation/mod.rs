//! Text formats at the edge of the engine: FEN positions and long algebraic moves.

pub mod fen;
pub mod uci;

pub use fen::{parse_fen, to_fen};
pub use uci::parse_move;
