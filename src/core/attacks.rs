//! Precomputed attack tables
//!
//! Knight, king and pawn attacks come from per-square lookups; rook and bishop
//! attacks go through the magic tables. Everything is built once into a
//! process-wide instance and only read afterwards.

use std::sync::OnceLock;

use super::bitboard::Bitboard;
use super::magic::{Slider, SliderTable};
use super::piece::Color;
use super::square::Square;

pub struct AttackTables {
    knight: [Bitboard; 64],
    king: [Bitboard; 64],
    // [color][square]
    pawn: [[Bitboard; 64]; 2],
    rook: SliderTable,
    bishop: SliderTable,
    // Squares strictly between two aligned squares, empty otherwise
    between: Box<[[Bitboard; 64]; 64]>,
}

static TABLES: OnceLock<AttackTables> = OnceLock::new();

impl AttackTables {
    pub fn instance() -> &'static AttackTables {
        TABLES.get_or_init(AttackTables::build)
    }

    fn build() -> Self {
        let mut tables = AttackTables {
            knight: [Bitboard::EMPTY; 64],
            king: [Bitboard::EMPTY; 64],
            pawn: [[Bitboard::EMPTY; 64]; 2],
            rook: SliderTable::build(Slider::Rook),
            bishop: SliderTable::build(Slider::Bishop),
            between: Box::new([[Bitboard::EMPTY; 64]; 64]),
        };
        tables.init_leapers();
        tables.init_between();
        tables
    }

    fn init_leapers(&mut self) {
        let not_a = !Bitboard::FILE_A;
        let not_ab = !(Bitboard::FILE_A | Bitboard::FILE_B);
        let not_h = !Bitboard::FILE_H;
        let not_gh = !(Bitboard::FILE_G | Bitboard::FILE_H);

        for sq in Square::all() {
            let bb = sq.bitboard();
            let b = bb.0;

            self.knight[sq.index()] = (Bitboard(b << 17) & not_a)
                | (Bitboard(b << 15) & not_h)
                | (Bitboard(b << 10) & not_ab)
                | (Bitboard(b << 6) & not_gh)
                | (Bitboard(b >> 17) & not_h)
                | (Bitboard(b >> 15) & not_a)
                | (Bitboard(b >> 10) & not_gh)
                | (Bitboard(b >> 6) & not_ab);

            self.king[sq.index()] = bb.north()
                | bb.south()
                | bb.east()
                | bb.west()
                | bb.north_east()
                | bb.north_west()
                | bb.south_east()
                | bb.south_west();

            self.pawn[Color::White.index()][sq.index()] = bb.north_east() | bb.north_west();
            self.pawn[Color::Black.index()][sq.index()] = bb.south_east() | bb.south_west();
        }
    }

    fn init_between(&mut self) {
        for a in Square::all() {
            for b in Square::all() {
                let dr = b.rank() as i8 - a.rank() as i8;
                let df = b.file() as i8 - a.file() as i8;
                let aligned = a != b && (dr == 0 || df == 0 || dr.abs() == df.abs());
                if !aligned {
                    continue;
                }
                let (step_r, step_f) = (dr.signum(), df.signum());
                let mut squares = Bitboard::EMPTY;
                let mut r = a.rank() as i8 + step_r;
                let mut f = a.file() as i8 + step_f;
                while (r, f) != (b.rank() as i8, b.file() as i8) {
                    squares.set(Square::from_file_rank(f as u8, r as u8));
                    r += step_r;
                    f += step_f;
                }
                self.between[a.index()][b.index()] = squares;
            }
        }
    }
}

/// Build every table now instead of on first use
pub fn init() {
    AttackTables::instance();
}

#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    AttackTables::instance().knight[sq.index()]
}

#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    AttackTables::instance().king[sq.index()]
}

/// Squares a pawn of `color` standing on `sq` attacks
#[inline]
pub fn pawn_attacks(sq: Square, color: Color) -> Bitboard {
    AttackTables::instance().pawn[color.index()][sq.index()]
}

#[inline]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    AttackTables::instance().rook.attacks(sq, occupied)
}

#[inline]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    AttackTables::instance().bishop.attacks(sq, occupied)
}

#[inline]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    rook_attacks(sq, occupied) | bishop_attacks(sq, occupied)
}

/// Squares strictly between `a` and `b` if they share a line, else empty
#[inline]
pub fn between(a: Square, b: Square) -> Bitboard {
    AttackTables::instance().between[a.index()][b.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn test_knight_attacks() {
        assert_eq!(knight_attacks(sq("e4")).count(), 8);
        assert_eq!(knight_attacks(Square::A1).count(), 2);
        assert_eq!(knight_attacks(Square::H8).count(), 2);
        assert!(knight_attacks(sq("g1")).contains(sq("f3")));
        assert!(!knight_attacks(sq("h1")).contains(sq("a2")));
    }

    #[test]
    fn test_king_attacks() {
        assert_eq!(king_attacks(sq("e4")).count(), 8);
        assert_eq!(king_attacks(Square::A1).count(), 3);
        assert_eq!(king_attacks(sq("a4")).count(), 5);
    }

    #[test]
    fn test_pawn_attacks() {
        let white = pawn_attacks(sq("e4"), Color::White);
        assert!(white.contains(sq("d5")) && white.contains(sq("f5")));
        assert_eq!(white.count(), 2);
        let black = pawn_attacks(sq("a5"), Color::Black);
        assert_eq!(black, sq("b4").bitboard());
    }

    #[test]
    fn test_slider_attacks_on_empty_board() {
        assert_eq!(rook_attacks(sq("e4"), Bitboard::EMPTY).count(), 14);
        assert_eq!(bishop_attacks(sq("e4"), Bitboard::EMPTY).count(), 13);
        assert_eq!(queen_attacks(sq("d4"), Bitboard::EMPTY).count(), 27);
    }

    #[test]
    fn test_slider_stops_at_blocker() {
        let occupied = sq("e6").bitboard() | sq("c4").bitboard();
        let attacks = rook_attacks(sq("e4"), occupied);
        assert!(attacks.contains(sq("e6")));
        assert!(!attacks.contains(sq("e7")));
        assert!(attacks.contains(sq("c4")));
        assert!(!attacks.contains(sq("b4")));
    }

    #[test]
    fn test_between() {
        assert_eq!(between(sq("a1"), sq("d4")), sq("b2").bitboard() | sq("c3").bitboard());
        assert_eq!(between(sq("e1"), sq("e3")), sq("e2").bitboard());
        assert!(between(sq("a1"), sq("b3")).is_empty());
        assert!(between(sq("a1"), sq("b2")).is_empty());
    }
}
