//! Game termination rules

use std::fmt;

use super::board::Board;
use super::piece::Color;
use crate::engine::movegen::MoveGen;

/// Occurrences of one position that end the game as a draw
pub const REPETITION_DRAW_COUNT: usize = 3;
/// Half-moves without capture or pawn move that end the game as a draw
pub const FIFTY_MOVE_PLIES: u32 = 100;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameOutcome {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    FiftyMoveRule,
    Repetition,
    InsufficientMaterial,
}

impl GameOutcome {
    pub fn is_over(self) -> bool {
        self != GameOutcome::Ongoing
    }

    pub fn is_draw(self) -> bool {
        matches!(
            self,
            GameOutcome::Stalemate
                | GameOutcome::FiftyMoveRule
                | GameOutcome::Repetition
                | GameOutcome::InsufficientMaterial
        )
    }

    /// PGN-style result tag
    pub fn result_tag(self) -> &'static str {
        match self {
            GameOutcome::Ongoing => "*",
            GameOutcome::Checkmate { winner: Color::White } => "1-0",
            GameOutcome::Checkmate { winner: Color::Black } => "0-1",
            _ => "1/2-1/2",
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Ongoing => write!(f, "ongoing"),
            GameOutcome::Checkmate { winner } => write!(f, "checkmate, {:?} wins", winner),
            GameOutcome::Stalemate => write!(f, "draw by stalemate"),
            GameOutcome::FiftyMoveRule => write!(f, "draw by fifty-move rule"),
            GameOutcome::Repetition => write!(f, "draw by repetition"),
            GameOutcome::InsufficientMaterial => write!(f, "draw by insufficient material"),
        }
    }
}

impl Board {
    /// Classify the current position. Mate and stalemate take precedence over
    /// the counting rules.
    pub fn outcome(&self) -> GameOutcome {
        if MoveGen::generate_legal_moves(self).is_empty() {
            return if self.is_in_check() {
                GameOutcome::Checkmate { winner: self.side_to_move().opposite() }
            } else {
                GameOutcome::Stalemate
            };
        }
        if self.fifty_move_counter() >= FIFTY_MOVE_PLIES {
            return GameOutcome::FiftyMoveRule;
        }
        if self.repetition_count() >= REPETITION_DRAW_COUNT {
            return GameOutcome::Repetition;
        }
        if self.is_insufficient_material() {
            return GameOutcome::InsufficientMaterial;
        }
        GameOutcome::Ongoing
    }
}
