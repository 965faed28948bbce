//! Chess position with reversible updates
//!
//! The board keeps redundant views of the same position (a square array,
//! per-piece and per-color bitboards, piece lists, slider caches, king
//! squares) and updates all of them incrementally in `make_move`. Every
//! change is undone exactly by `unmake_move` using the [`GameState`] pushed
//! by the make, so search never copies a position.

use std::cell::Cell;
use std::fmt;

use super::attacks;
use super::bitboard::Bitboard;
use super::game_state::{CastlingRights, GameState};
use super::moves::{Move, MoveFlag};
use super::piece::{Color, PIECE_TAGS, Piece, PieceType};
use super::piece_list::PieceList;
use super::position_info::PositionInfo;
use super::square::Square;
use super::zobrist::ZobristKeys;
use crate::error::FenError;

/// Most recent game positions consulted for repetition
pub const REPETITION_WINDOW: usize = 64;

#[derive(Clone)]
pub struct Board {
    squares: [Piece; 64],
    piece_bitboards: [Bitboard; PIECE_TAGS],
    color_bitboards: [Bitboard; 2],
    all_pieces: Bitboard,
    // rook | queen and bishop | queen, per color
    orthogonal_sliders: [Bitboard; 2],
    diagonal_sliders: [Bitboard; 2],
    king_square: [Square; 2],
    piece_lists: [PieceList; PIECE_TAGS],
    side_to_move: Color,
    ply_count: u32,
    /// Live irreversible state
    state: GameState,
    /// States preceding `state`, one per made move
    state_stack: Vec<GameState>,
    move_history: Vec<Move>,
    /// Hash after every game move, starting with the loaded position
    repetition_history: Vec<u64>,
    in_check: Cell<Option<bool>>,
}

impl Board {
    /// A board with no pieces, white to move
    pub fn empty() -> Self {
        let mut board = Board {
            squares: [Piece::NONE; 64],
            piece_bitboards: [Bitboard::EMPTY; PIECE_TAGS],
            color_bitboards: [Bitboard::EMPTY; 2],
            all_pieces: Bitboard::EMPTY,
            orthogonal_sliders: [Bitboard::EMPTY; 2],
            diagonal_sliders: [Bitboard::EMPTY; 2],
            king_square: [Square::E1, Square::E8],
            piece_lists: std::array::from_fn(|_| PieceList::new()),
            side_to_move: Color::White,
            ply_count: 0,
            state: GameState::default(),
            state_stack: Vec::with_capacity(256),
            move_history: Vec::new(),
            repetition_history: Vec::with_capacity(256),
            in_check: Cell::new(None),
        };
        board.state.hash = board.compute_hash();
        board
    }

    pub fn start_position() -> Self {
        Self::from_info(&PositionInfo::start_position())
    }

    pub fn from_info(info: &PositionInfo) -> Self {
        let mut board = Board::empty();
        board.load(info);
        board
    }

    /// Parse a FEN string and load it
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let info = crate::notation::fen::parse_fen(fen)?;
        Ok(Self::from_info(&info))
    }

    /// Replace the whole position with parsed fields, dropping all history
    pub fn load(&mut self, info: &PositionInfo) {
        *self = Board::empty();

        for sq in Square::all() {
            let piece = info.squares[sq.index()];
            if !piece.is_none() {
                self.add_piece(piece, sq);
            }
        }
        for color in Color::BOTH {
            let kings = self.pieces(Piece::new(PieceType::King, color));
            if kings.is_not_empty() {
                self.king_square[color.index()] = kings.lsb();
            }
        }

        self.side_to_move = info.side_to_move;
        self.ply_count = info.ply_count();
        self.state = GameState {
            captured: None,
            en_passant_file: info.en_passant_file,
            castling: info.castling,
            fifty_move_counter: info.fifty_move_counter,
            hash: 0,
        };
        self.state.hash = self.compute_hash();
        self.repetition_history.push(self.state.hash);
    }

    /// Fields a notation exporter needs
    pub fn to_info(&self) -> PositionInfo {
        PositionInfo {
            squares: self.squares,
            side_to_move: self.side_to_move,
            castling: self.state.castling,
            en_passant_file: self.state.en_passant_file,
            fifty_move_counter: self.state.fifty_move_counter,
            fullmove_number: self.fullmove_number(),
        }
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    #[inline]
    pub fn piece_on(&self, sq: Square) -> Piece {
        self.squares[sq.index()]
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        let piece = self.squares[sq.index()];
        (!piece.is_none()).then_some(piece)
    }

    #[inline]
    pub fn pieces(&self, piece: Piece) -> Bitboard {
        self.piece_bitboards[piece.index()]
    }

    #[inline]
    pub fn pieces_of(&self, piece_type: PieceType, color: Color) -> Bitboard {
        self.pieces(Piece::new(piece_type, color))
    }

    #[inline]
    pub fn color_bitboard(&self, color: Color) -> Bitboard {
        self.color_bitboards[color.index()]
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.all_pieces
    }

    #[inline]
    pub fn orthogonal_sliders(&self, color: Color) -> Bitboard {
        self.orthogonal_sliders[color.index()]
    }

    #[inline]
    pub fn diagonal_sliders(&self, color: Color) -> Bitboard {
        self.diagonal_sliders[color.index()]
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_square[color.index()]
    }

    #[inline]
    pub fn piece_list(&self, piece: Piece) -> &PieceList {
        &self.piece_lists[piece.index()]
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.state.castling
    }

    /// 0 = none, otherwise file index + 1
    #[inline]
    pub fn en_passant_file(&self) -> u8 {
        self.state.en_passant_file
    }

    /// Square a pawn would land on when capturing en passant
    pub fn en_passant_square(&self) -> Option<Square> {
        let file = self.state.en_passant_file.checked_sub(1)?;
        let rank = match self.side_to_move {
            Color::White => 5,
            Color::Black => 2,
        };
        Some(Square::from_file_rank(file, rank))
    }

    #[inline]
    pub fn fifty_move_counter(&self) -> u32 {
        self.state.fifty_move_counter
    }

    #[inline]
    pub fn ply_count(&self) -> u32 {
        self.ply_count
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.ply_count / 2 + 1
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.state.hash
    }

    /// Moves made outside of search since the position was loaded
    pub fn move_history(&self) -> &[Move] {
        &self.move_history
    }

    /// Number of undo snapshots currently stacked
    pub fn undo_depth(&self) -> usize {
        self.state_stack.len()
    }

    /// How often the current position occurs among the game positions since
    /// the last pawn move or capture, looking back at most `REPETITION_WINDOW`
    pub fn repetition_count(&self) -> usize {
        let hash = self.state.hash;
        let reversible = (self.state.fifty_move_counter as usize + 1).min(REPETITION_WINDOW);
        let start = self.repetition_history.len().saturating_sub(reversible);
        self.repetition_history[start..].iter().filter(|&&h| h == hash).count()
    }

    /// Hash of the position computed from scratch
    pub fn compute_hash(&self) -> u64 {
        let keys = ZobristKeys::instance();
        let mut hash = 0u64;
        for sq in self.all_pieces {
            hash ^= keys.piece(self.squares[sq.index()], sq);
        }
        if self.side_to_move == Color::Black {
            hash ^= keys.side_to_move();
        }
        hash ^= keys.castling(self.state.castling);
        hash ^= keys.en_passant(self.state.en_passant_file);
        hash
    }

    /// Pieces of color `by` attacking `sq`, given occupancy `occupied`
    pub fn attackers_to(&self, sq: Square, by: Color, occupied: Bitboard) -> Bitboard {
        (attacks::pawn_attacks(sq, by.opposite()) & self.pieces_of(PieceType::Pawn, by))
            | (attacks::knight_attacks(sq) & self.pieces_of(PieceType::Knight, by))
            | (attacks::king_attacks(sq) & self.pieces_of(PieceType::King, by))
            | (attacks::rook_attacks(sq, occupied) & self.orthogonal_sliders(by))
            | (attacks::bishop_attacks(sq, occupied) & self.diagonal_sliders(by))
    }

    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        self.attackers_to(sq, by, self.all_pieces).is_not_empty()
    }

    /// Enemy pieces giving check to the side to move
    pub fn checkers(&self) -> Bitboard {
        let us = self.side_to_move;
        self.attackers_to(self.king_square(us), us.opposite(), self.all_pieces)
    }

    /// Whether the side to move is in check; computed once per position
    pub fn is_in_check(&self) -> bool {
        if let Some(cached) = self.in_check.get() {
            return cached;
        }
        let in_check = self.checkers().is_not_empty();
        self.in_check.set(Some(in_check));
        in_check
    }

    /// Approximate dead-position test: bare kings, a single minor piece, or
    /// one bishop each on the same square color.
    pub fn is_insufficient_material(&self) -> bool {
        let heavy_or_pawn = Color::BOTH.iter().any(|&c| {
            (self.pieces_of(PieceType::Pawn, c)
                | self.pieces_of(PieceType::Rook, c)
                | self.pieces_of(PieceType::Queen, c))
            .is_not_empty()
        });
        if heavy_or_pawn {
            return false;
        }

        match self.all_pieces.count() {
            2 | 3 => true,
            4 => {
                let bishops = self.pieces_of(PieceType::Bishop, Color::White)
                    | self.pieces_of(PieceType::Bishop, Color::Black);
                let one_each = self.pieces_of(PieceType::Bishop, Color::White).count() == 1
                    && self.pieces_of(PieceType::Bishop, Color::Black).count() == 1;
                one_each
                    && ((bishops & Bitboard::LIGHT_SQUARES).count() == 2
                        || (bishops & Bitboard::DARK_SQUARES).count() == 2)
            }
            _ => false,
        }
    }

    // ---------------------------------------------------------------------
    // Make / unmake
    // ---------------------------------------------------------------------

    /// Apply a legal move. Outside of search (`in_search == false`) the move
    /// and resulting hash are also recorded in the game history.
    pub fn make_move(&mut self, mv: Move, in_search: bool) {
        let keys = ZobristKeys::instance();
        let us = self.side_to_move;
        let them = us.opposite();
        let from = mv.from();
        let to = mv.to();
        let flag = mv.flag();
        let moving = self.squares[from.index()];

        debug_assert!(!moving.is_none() && moving.color() == us, "no {:?} piece on {}", us, from);
        debug_assert!(
            self.piece_at(to).is_none_or(|p| p.color() == them && p.piece_type() != PieceType::King),
            "illegal destination {} for {}",
            to,
            mv
        );

        let previous = self.state;
        let mut hash = previous.hash;

        let capture_sq = if flag == MoveFlag::EnPassant { to.offset(-us.pawn_push()) } else { to };
        let captured = self.squares[capture_sq.index()];
        let captured_type = if captured.is_none() {
            None
        } else {
            self.remove_piece(captured, capture_sq);
            hash ^= keys.piece(captured, capture_sq);
            Some(captured.piece_type())
        };

        self.move_piece(moving, from, to);
        hash ^= keys.piece(moving, from) ^ keys.piece(moving, to);
        if moving.piece_type() == PieceType::King {
            self.king_square[us.index()] = to;
        }

        if flag == MoveFlag::Castle {
            let (rook_from, rook_to) = castle_rook_squares(to);
            let rook = Piece::new(PieceType::Rook, us);
            self.move_piece(rook, rook_from, rook_to);
            hash ^= keys.piece(rook, rook_from) ^ keys.piece(rook, rook_to);
        }

        if let Some(promoted_type) = flag.promotion_piece() {
            let promoted = Piece::new(promoted_type, us);
            self.remove_piece(moving, to);
            self.add_piece(promoted, to);
            hash ^= keys.piece(moving, to) ^ keys.piece(promoted, to);
        }

        let en_passant_file = if flag == MoveFlag::DoublePawnPush { from.file() + 1 } else { 0 };
        let castling = previous
            .castling
            .without(CastlingRights::lost_by_touching(from) | CastlingRights::lost_by_touching(to));

        hash ^= keys.castling(previous.castling) ^ keys.castling(castling);
        hash ^= keys.en_passant(previous.en_passant_file) ^ keys.en_passant(en_passant_file);
        hash ^= keys.side_to_move();

        let resets_clock = moving.piece_type() == PieceType::Pawn || captured_type.is_some();
        let fifty_move_counter = if resets_clock { 0 } else { previous.fifty_move_counter + 1 };

        self.side_to_move = them;
        self.ply_count += 1;
        self.state_stack.push(previous);
        self.state = GameState {
            captured: captured_type,
            en_passant_file,
            castling,
            fifty_move_counter,
            hash,
        };
        self.in_check.set(None);

        if !in_search {
            // A reset fifty-move counter hides everything older from repetition_count
            self.repetition_history.push(hash);
            self.move_history.push(mv);
        }
    }

    /// Revert `mv`, which must be the last move made with the same `in_search` flag
    pub fn unmake_move(&mut self, mv: Move, in_search: bool) {
        let Some(previous) = self.state_stack.pop() else {
            debug_assert!(false, "unmake_move({}) without a matching make", mv);
            return;
        };
        let undone = std::mem::replace(&mut self.state, previous);

        let us = self.side_to_move.opposite();
        let from = mv.from();
        let to = mv.to();
        let flag = mv.flag();

        self.side_to_move = us;
        self.ply_count -= 1;

        if let Some(promoted_type) = flag.promotion_piece() {
            self.remove_piece(Piece::new(promoted_type, us), to);
            self.add_piece(Piece::new(PieceType::Pawn, us), to);
        }

        let moving = self.squares[to.index()];
        self.move_piece(moving, to, from);
        if moving.piece_type() == PieceType::King {
            self.king_square[us.index()] = from;
        }

        if flag == MoveFlag::Castle {
            let (rook_from, rook_to) = castle_rook_squares(to);
            self.move_piece(Piece::new(PieceType::Rook, us), rook_to, rook_from);
        }

        if let Some(captured_type) = undone.captured {
            let capture_sq = if flag == MoveFlag::EnPassant { to.offset(-us.pawn_push()) } else { to };
            self.add_piece(Piece::new(captured_type, us.opposite()), capture_sq);
        }

        self.in_check.set(None);

        if !in_search {
            self.move_history.pop();
            self.repetition_history.pop();
        }
    }

    /// Pass the turn. Only used by search, never while in check.
    pub fn make_null_move(&mut self) {
        let keys = ZobristKeys::instance();
        let previous = self.state;
        let hash = previous.hash ^ keys.en_passant(previous.en_passant_file) ^ keys.side_to_move();

        self.state_stack.push(previous);
        self.state = GameState {
            captured: None,
            en_passant_file: 0,
            castling: previous.castling,
            fifty_move_counter: previous.fifty_move_counter + 1,
            hash,
        };
        self.side_to_move = self.side_to_move.opposite();
        self.ply_count += 1;
        self.in_check.set(Some(false));
    }

    pub fn unmake_null_move(&mut self) {
        let Some(previous) = self.state_stack.pop() else {
            debug_assert!(false, "unmake_null_move without a matching make");
            return;
        };
        self.state = previous;
        self.side_to_move = self.side_to_move.opposite();
        self.ply_count -= 1;
        self.in_check.set(None);
    }

    // ---------------------------------------------------------------------
    // Piece placement primitives; every view is updated together
    // ---------------------------------------------------------------------

    fn add_piece(&mut self, piece: Piece, sq: Square) {
        let color = piece.color().index();
        self.squares[sq.index()] = piece;
        self.piece_bitboards[piece.index()].set(sq);
        self.color_bitboards[color].set(sq);
        self.all_pieces.set(sq);
        if piece.is_orthogonal_slider() {
            self.orthogonal_sliders[color].set(sq);
        }
        if piece.is_diagonal_slider() {
            self.diagonal_sliders[color].set(sq);
        }
        self.piece_lists[piece.index()].add(sq);
    }

    fn remove_piece(&mut self, piece: Piece, sq: Square) {
        let color = piece.color().index();
        self.squares[sq.index()] = Piece::NONE;
        self.piece_bitboards[piece.index()].clear(sq);
        self.color_bitboards[color].clear(sq);
        self.all_pieces.clear(sq);
        if piece.is_orthogonal_slider() {
            self.orthogonal_sliders[color].clear(sq);
        }
        if piece.is_diagonal_slider() {
            self.diagonal_sliders[color].clear(sq);
        }
        self.piece_lists[piece.index()].remove(sq);
    }

    fn move_piece(&mut self, piece: Piece, from: Square, to: Square) {
        let color = piece.color().index();
        let span = from.bitboard() | to.bitboard();
        self.squares[from.index()] = Piece::NONE;
        self.squares[to.index()] = piece;
        self.piece_bitboards[piece.index()] ^= span;
        self.color_bitboards[color] ^= span;
        self.all_pieces ^= span;
        if piece.is_orthogonal_slider() {
            self.orthogonal_sliders[color] ^= span;
        }
        if piece.is_diagonal_slider() {
            self.diagonal_sliders[color] ^= span;
        }
        self.piece_lists[piece.index()].move_piece(from, to);
    }
}

/// Rook origin and destination for a castle landing the king on `king_to`
fn castle_rook_squares(king_to: Square) -> (Square, Square) {
    if king_to.file() == 6 {
        (king_to.offset(1), king_to.offset(-1))
    } else {
        (king_to.offset(-2), king_to.offset(1))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::start_position()
    }
}

/// Positions compare on every observable field; the lazily filled check
/// cache is not part of a position's identity.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.squares == other.squares
            && self.piece_bitboards == other.piece_bitboards
            && self.color_bitboards == other.color_bitboards
            && self.all_pieces == other.all_pieces
            && self.orthogonal_sliders == other.orthogonal_sliders
            && self.diagonal_sliders == other.diagonal_sliders
            && self.king_square == other.king_square
            && self.piece_lists == other.piece_lists
            && self.side_to_move == other.side_to_move
            && self.ply_count == other.ply_count
            && self.state == other.state
            && self.state_stack == other.state_stack
            && self.move_history == other.move_history
            && self.repetition_history == other.repetition_history
    }
}

impl Eq for Board {}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for rank in (0..8).rev() {
            write!(f, "  {} ", rank + 1)?;
            for file in 0..8 {
                write!(f, "{} ", self.piece_on(Square::from_file_rank(file, rank)).to_char())?;
            }
            writeln!(f)?;
        }
        writeln!(f, "    a b c d e f g h")?;
        writeln!(f)?;
        writeln!(f, "  FEN: {}", crate::notation::fen::to_fen(self))?;
        write!(f, "  Key: {:016X}", self.hash())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn assert_views_consistent(board: &Board) {
        let mut all = Bitboard::EMPTY;
        for piece in Piece::all() {
            let bb = board.pieces(piece);
            assert_eq!(bb.count() as usize, board.piece_list(piece).len());
            for s in board.piece_list(piece).iter() {
                assert!(bb.contains(s));
                assert_eq!(board.piece_on(s), piece);
            }
            all |= bb;
        }
        assert_eq!(all, board.occupied());
        assert_eq!(board.compute_hash(), board.hash());
    }

    #[test]
    fn test_start_position() {
        let board = Board::start_position();
        assert_eq!(board.occupied().count(), 32);
        assert_eq!(board.king_square(Color::White), Square::E1);
        assert_eq!(board.king_square(Color::Black), Square::E8);
        assert_eq!(board.castling_rights(), CastlingRights::ALL);
        assert_eq!(board.orthogonal_sliders(Color::White).count(), 3);
        assert_eq!(board.diagonal_sliders(Color::Black).count(), 3);
        assert!(!board.is_in_check());
        assert_views_consistent(&board);
    }

    #[test]
    fn test_double_push_sets_en_passant_file() {
        let mut board = Board::start_position();
        board.make_move(Move::with_flag(sq("e2"), sq("e4"), MoveFlag::DoublePawnPush), false);
        assert_eq!(board.en_passant_file(), 5);
        assert_eq!(board.en_passant_square(), Some(sq("e3")));
        assert_eq!(board.side_to_move(), Color::Black);
        assert_eq!(board.fifty_move_counter(), 0);
        assert_views_consistent(&board);
    }

    #[test]
    fn test_make_unmake_restores_position() {
        let original = Board::start_position();
        let mut board = original.clone();
        let mv = Move::new(sq("g1"), sq("f3"));
        board.make_move(mv, false);
        assert_eq!(board.fifty_move_counter(), 1);
        assert_eq!(board.move_history(), &[mv]);
        board.unmake_move(mv, false);
        assert_eq!(board, original);
    }

    #[test]
    fn test_castle_moves_rook_and_clears_rights() {
        let info = crate::notation::fen::parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let original = Board::from_info(&info);
        let mut board = original.clone();
        let castle = Move::with_flag(Square::E1, Square::C1, MoveFlag::Castle);
        board.make_move(castle, true);
        assert_eq!(board.piece_on(sq("d1")), Piece::new(PieceType::Rook, Color::White));
        assert!(board.piece_at(Square::A1).is_none());
        assert_eq!(board.king_square(Color::White), Square::C1);
        assert_eq!(board.castling_rights().raw(), CastlingRights::BLACK_KINGSIDE | CastlingRights::BLACK_QUEENSIDE);
        assert_views_consistent(&board);
        board.unmake_move(castle, true);
        assert_eq!(board, original);
    }

    #[test]
    fn test_null_move_round_trip() {
        let mut board = Board::start_position();
        board.make_move(Move::with_flag(sq("d2"), sq("d4"), MoveFlag::DoublePawnPush), true);
        let before = board.clone();
        board.make_null_move();
        assert_eq!(board.side_to_move(), Color::White);
        assert_eq!(board.en_passant_file(), 0);
        assert_eq!(board.compute_hash(), board.hash());
        board.unmake_null_move();
        assert_eq!(board, before);
    }

    #[test]
    fn test_repetition_scan_is_bounded() {
        let mut board = Board::start_position();
        let shuffle = [
            Move::new(sq("g1"), sq("f3")),
            Move::new(sq("g8"), sq("f6")),
            Move::new(sq("f3"), sq("g1")),
            Move::new(sq("f6"), sq("g8")),
        ];
        for _ in 0..40 {
            for mv in shuffle {
                board.make_move(mv, false);
            }
        }
        assert_eq!(board.repetition_history.len(), 161);
        assert_eq!(board.repetition_count(), REPETITION_WINDOW / 4);
    }

    #[test]
    fn test_insufficient_material() {
        let kk = Board::from_fen("8/8/4k3/8/8/3K4/8/8 w - - 0 1").unwrap();
        assert!(kk.is_insufficient_material());
        let knn = Board::from_fen("8/8/4k3/8/8/3K4/8/6N1 w - - 0 1").unwrap();
        assert!(knn.is_insufficient_material());
        let kp = Board::from_fen("8/8/4k3/8/8/3K4/4P3/8 w - - 0 1").unwrap();
        assert!(!kp.is_insufficient_material());
    }
}
