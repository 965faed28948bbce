//! Legal move generation
//!
//! Moves are generated per piece from the attack tables and filtered for
//! legality without making them:
//! - pinned pieces may only move along the line to their pinner
//! - in single check, non-king moves must capture the checker or block
//! - in double check, only the king moves
//! - king destinations are tested with the king lifted off the board
//! - en passant is tested against the exact occupancy after the capture

use crate::core::attacks;
use crate::core::bitboard::Bitboard;
use crate::core::board::Board;
use crate::core::game_state::CastlingRights;
use crate::core::moves::{Move, MoveFlag, MoveList};
use crate::core::piece::{Color, Piece, PieceType};
use crate::core::square::Square;

pub struct MoveGen;

/// Per-call facts shared by the piece generators
struct Context<'a> {
    board: &'a Board,
    us: Color,
    them: Color,
    ours: Bitboard,
    theirs: Bitboard,
    occupied: Bitboard,
    king_sq: Square,
    /// Destinations that resolve a single check (all squares when not in check)
    evasion_mask: Bitboard,
    pinned: Bitboard,
    /// For a pinned piece: the squares between king and pinner plus the pinner
    pin_ray: [Bitboard; 64],
}

impl<'a> Context<'a> {
    fn new(board: &'a Board, checkers: Bitboard) -> Self {
        let us = board.side_to_move();
        let them = us.opposite();
        let ours = board.color_bitboard(us);
        let occupied = board.occupied();
        let king_sq = board.king_square(us);

        let evasion_mask = if checkers.is_empty() {
            Bitboard::ALL
        } else {
            attacks::between(king_sq, checkers.lsb()) | checkers
        };

        let mut pinned = Bitboard::EMPTY;
        let mut pin_ray = [Bitboard::EMPTY; 64];
        let snipers = (attacks::rook_attacks(king_sq, Bitboard::EMPTY) & board.orthogonal_sliders(them))
            | (attacks::bishop_attacks(king_sq, Bitboard::EMPTY) & board.diagonal_sliders(them));
        for sniper in snipers {
            let line = attacks::between(king_sq, sniper);
            let blockers = line & occupied;
            if !blockers.more_than_one() && (blockers & ours).is_not_empty() {
                pinned |= blockers;
                pin_ray[blockers.lsb().index()] = line | sniper.bitboard();
            }
        }

        Context {
            board,
            us,
            them,
            ours,
            theirs: board.color_bitboard(them),
            occupied,
            king_sq,
            evasion_mask,
            pinned,
            pin_ray,
        }
    }

    /// Squares a non-king piece on `from` may legally land on
    #[inline]
    fn allowed(&self, from: Square) -> Bitboard {
        if self.pinned.contains(from) {
            self.evasion_mask & self.pin_ray[from.index()]
        } else {
            self.evasion_mask
        }
    }
}

impl MoveGen {
    /// Every legal move for the side to move, without duplicates
    pub fn generate_legal_moves(board: &Board) -> MoveList {
        let mut moves = MoveList::new();
        let checkers = board.checkers();
        let ctx = Context::new(board, checkers);

        Self::generate_king_moves(&ctx, &mut moves);
        if checkers.more_than_one() {
            return moves;
        }

        Self::generate_pawn_moves(&ctx, &mut moves);
        Self::generate_piece_moves(&ctx, &mut moves);
        if checkers.is_empty() {
            Self::generate_castling_moves(&ctx, &mut moves);
        }
        moves
    }

    /// Legal moves of the piece standing on `sq`
    pub fn generate_legal_moves_for_square(board: &Board, sq: Square) -> MoveList {
        let mut moves = MoveList::new();
        for &mv in Self::generate_legal_moves(board).iter().filter(|mv| mv.from() == sq) {
            moves.push(mv);
        }
        moves
    }

    pub fn is_legal(board: &Board, mv: Move) -> bool {
        Self::generate_legal_moves(board).contains(mv)
    }

    fn generate_pawn_moves(ctx: &Context, moves: &mut MoveList) {
        let us = ctx.us;
        let push = us.pawn_push();
        let (start_rank, promotion_rank) = match us {
            Color::White => (1, 7),
            Color::Black => (6, 0),
        };
        let en_passant = ctx.board.en_passant_square();

        for from in ctx.board.pieces_of(PieceType::Pawn, us) {
            let allowed = ctx.allowed(from);
            let promotes = from.offset(push).rank() == promotion_rank;

            let one = from.offset(push);
            if !ctx.occupied.contains(one) {
                if allowed.contains(one) {
                    Self::push_pawn_move(moves, from, one, promotes);
                }
                if from.rank() == start_rank {
                    let two = one.offset(push);
                    if !ctx.occupied.contains(two) && allowed.contains(two) {
                        moves.push(Move::with_flag(from, two, MoveFlag::DoublePawnPush));
                    }
                }
            }

            let pawn_attacks = attacks::pawn_attacks(from, us);
            for to in pawn_attacks & ctx.theirs & allowed {
                Self::push_pawn_move(moves, from, to, promotes);
            }

            if let Some(ep) = en_passant {
                if pawn_attacks.contains(ep) && Self::en_passant_is_legal(ctx, from, ep) {
                    moves.push(Move::with_flag(from, ep, MoveFlag::EnPassant));
                }
            }
        }
    }

    fn push_pawn_move(moves: &mut MoveList, from: Square, to: Square, promotes: bool) {
        if promotes {
            for flag in MoveFlag::PROMOTIONS {
                moves.push(Move::with_flag(from, to, flag));
            }
        } else {
            moves.push(Move::new(from, to));
        }
    }

    /// En passant removes two pawns from their squares at once, which can
    /// expose the king along a rank; test the real resulting occupancy.
    fn en_passant_is_legal(ctx: &Context, from: Square, ep: Square) -> bool {
        let captured = ep.offset(-ctx.us.pawn_push());
        let occupied = (ctx.occupied ^ from.bitboard() ^ captured.bitboard()) | ep.bitboard();
        let remaining = ctx.theirs & !captured.bitboard();
        (ctx.board.attackers_to(ctx.king_sq, ctx.them, occupied) & remaining).is_empty()
    }

    fn generate_piece_moves(ctx: &Context, moves: &mut MoveList) {
        for piece_type in [PieceType::Knight, PieceType::Bishop, PieceType::Rook, PieceType::Queen] {
            for from in ctx.board.pieces_of(piece_type, ctx.us) {
                let reach = match piece_type {
                    PieceType::Knight => attacks::knight_attacks(from),
                    PieceType::Bishop => attacks::bishop_attacks(from, ctx.occupied),
                    PieceType::Rook => attacks::rook_attacks(from, ctx.occupied),
                    _ => attacks::queen_attacks(from, ctx.occupied),
                };
                for to in reach & !ctx.ours & ctx.allowed(from) {
                    moves.push(Move::new(from, to));
                }
            }
        }
    }

    fn generate_king_moves(ctx: &Context, moves: &mut MoveList) {
        // A king stepping away from a slider must not count as a blocker
        let occupied = ctx.occupied ^ ctx.king_sq.bitboard();
        for to in attacks::king_attacks(ctx.king_sq) & !ctx.ours {
            if ctx.board.attackers_to(to, ctx.them, occupied).is_empty() {
                moves.push(Move::new(ctx.king_sq, to));
            }
        }
    }

    fn generate_castling_moves(ctx: &Context, moves: &mut MoveList) {
        let rights = ctx.board.castling_rights();
        let home = match ctx.us {
            Color::White => Square::E1,
            Color::Black => Square::E8,
        };
        if ctx.king_sq != home {
            return;
        }
        let rook = Piece::new(PieceType::Rook, ctx.us);

        if rights.has(CastlingRights::kingside(ctx.us)) {
            let (f, g, h) = (home.offset(1), home.offset(2), home.offset(3));
            let path = f.bitboard() | g.bitboard();
            if ctx.board.piece_on(h) == rook
                && (ctx.occupied & path).is_empty()
                && !ctx.board.is_square_attacked(f, ctx.them)
                && !ctx.board.is_square_attacked(g, ctx.them)
            {
                moves.push(Move::with_flag(home, g, MoveFlag::Castle));
            }
        }

        if rights.has(CastlingRights::queenside(ctx.us)) {
            let (d, c, b, a) = (home.offset(-1), home.offset(-2), home.offset(-3), home.offset(-4));
            let path = d.bitboard() | c.bitboard() | b.bitboard();
            if ctx.board.piece_on(a) == rook
                && (ctx.occupied & path).is_empty()
                && !ctx.board.is_square_attacked(d, ctx.them)
                && !ctx.board.is_square_attacked(c, ctx.them)
            {
                moves.push(Move::with_flag(home, c, MoveFlag::Castle));
            }
        }
    }
}
