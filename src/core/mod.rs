//! Core chess types and representations
//!
//! This module contains the position model the engine searches over:
//! - Squares, piece tags and bitboards
//! - Leaper and magic slider attack tables
//! - Zobrist keys, undo snapshots and piece lists
//! - The reversible board and game-end rules

pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod game_state;
pub mod magic;
pub mod moves;
pub mod outcome;
pub mod piece;
pub mod piece_list;
pub mod position_info;
pub mod square;
pub mod zobrist;

pub use bitboard::{Bitboard, BitboardIter};
pub use board::Board;
pub use game_state::{CastlingRights, GameState};
pub use moves::{Move, MoveFlag, MoveList};
pub use outcome::GameOutcome;
pub use piece::{Color, Piece, PieceType};
pub use piece_list::PieceList;
pub use position_info::{PositionInfo, START_FEN};
pub use square::Square;
pub use zobrist::ZobristKeys;
