//! Agent versus agent games.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::MatchConfig;
use crate::core::board::Board;
use crate::core::moves::Move;
use crate::core::outcome::GameOutcome;
use crate::core::piece::Color;
use crate::engine::agent::Agent;
use crate::engine::movegen::MoveGen;
use crate::engine::search::SearchLimits;
use crate::notation::fen::to_fen;

#[derive(Clone, Debug)]
pub struct GameRecord {
    pub start_fen: String,
    pub moves: Vec<Move>,
    /// `Ongoing` when the move cap ended the game
    pub outcome: GameOutcome,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl GameRecord {
    /// Moves in long algebraic notation, space separated
    pub fn move_text(&self) -> String {
        self.moves.iter().map(|mv| mv.to_uci()).collect::<Vec<_>>().join(" ")
    }
}

/// Play from `board` until the game ends or `config.max_moves` plies are made.
/// Moves are applied outside search mode so repetition history is kept.
pub fn play_game(board: &mut Board, white: &mut dyn Agent, black: &mut dyn Agent, config: &MatchConfig) -> GameRecord {
    let started_at = Utc::now();
    let start_fen = to_fen(board);
    let limits = SearchLimits::default();
    let mut moves = Vec::new();

    white.new_game();
    black.new_game();
    info!(white = white.name(), black = black.name(), fen = %start_fen, "starting game");

    let mut outcome = board.outcome();
    while !outcome.is_over() && moves.len() < config.max_moves as usize {
        let side = board.side_to_move();
        let agent: &mut dyn Agent = match side {
            Color::White => &mut *white,
            Color::Black => &mut *black,
        };
        let Some(mv) = agent.choose_move(board, &limits) else {
            break;
        };
        debug_assert!(MoveGen::is_legal(board, mv), "agent {} chose illegal move {}", agent.name(), mv);

        board.make_move(mv, false);
        moves.push(mv);
        info!(
            ply = moves.len(),
            side = ?side,
            agent = agent.name(),
            mv = %mv,
            "move played"
        );
        outcome = board.outcome();
    }

    let finished_at = Utc::now();
    info!(
        result = outcome.result_tag(),
        outcome = %outcome,
        plies = moves.len(),
        seconds = (finished_at - started_at).num_milliseconds() as f64 / 1000.0,
        "game over"
    );
    debug!(moves = %moves.iter().map(|mv| mv.to_uci()).collect::<Vec<_>>().join(" "), "game record");

    GameRecord {
        start_fen,
        moves,
        outcome,
        started_at,
        finished_at,
    }
}
