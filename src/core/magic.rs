//! Magic bitboard tables for sliding pieces
//!
//! For every square the relevant blockers (the rays minus the board edge) are
//! hashed with a fixed multiplier into a dense attack table:
//! `index = ((occupied & mask) * magic) >> (64 - bits)`.
//! The multipliers below were checked to map every blocker subset of every
//! square without a destructive collision; [`SliderTable::build`] re-checks
//! this while filling the table.

use super::bitboard::Bitboard;
use super::square::Square;

#[rustfmt::skip]
const ROOK_MAGICS: [u64; 64] = [
    0x8A80104000800020, 0x0140002000100040, 0x02801880A0017001, 0x0100081001000420,
    0x0200020010080420, 0x03001C0002010008, 0x8480008002000100, 0x2080088004402900,
    0x0000800098204000, 0x2024401000200040, 0x0100802000801000, 0x0120800800801000,
    0x0208808088000400, 0x0002802200800400, 0x2200800100020080, 0x0801000060821100,
    0x0080044006422000, 0x0100808020004000, 0x12108A0010204200, 0x0140848010000802,
    0x0481828014002800, 0x8094004002004100, 0x4010040010010802, 0x0000020008806104,
    0x0100400080208000, 0x2040002120081000, 0x0021200680100081, 0x0020100080080080,
    0x0002000A00200410, 0x0000020080800400, 0x0080088400100102, 0x0080004600042881,
    0x4040008040800020, 0x0440003000200801, 0x0004200011004500, 0x0188020010100100,
    0x0014800401802800, 0x2080040080800200, 0x0124080204001001, 0x0200046502000484,
    0x0480400080088020, 0x1000422010034000, 0x0030200100110040, 0x0000100021010009,
    0x2002080100110004, 0x0202008004008002, 0x0020020004010100, 0x2048440040820001,
    0x0101002200408200, 0x0040802000401080, 0x4008142004410100, 0x02060820C0120200,
    0x0001001004080100, 0x020C020080040080, 0x2935610830022400, 0x0044440041009200,
    0x0280001040802101, 0x2100190040002085, 0x80C0084100102001, 0x4024081001000421,
    0x00020030A0244872, 0x0012001008414402, 0x02006104900A0804, 0x0001004081002402,
];

#[rustfmt::skip]
const BISHOP_MAGICS: [u64; 64] = [
    0x0040040844404084, 0x002004208A004208, 0x0010190041080202, 0x0108208820400092,
    0x0581104180800210, 0x2112080446200010, 0x1080820820060210, 0x03C0808410220200,
    0x0004050404440404, 0x0000021001420088, 0x24D0080801082102, 0x0001020A0A020400,
    0x0000040308200402, 0x0004011002100800, 0x0401484104104005, 0x0801010402020200,
    0x00400210C3880100, 0x0404022024108200, 0x0810018200204102, 0x0004002801A02003,
    0x0085040820080400, 0x810102C808880400, 0x000E900410884800, 0x8002020480840102,
    0x0220200865090201, 0x2010100A02021202, 0x0152048408022401, 0x0020080002081110,
    0x4001001021004000, 0x800040400A011002, 0x00E4004081011002, 0x001C004001012080,
    0x8004200962A00220, 0x8422100208500202, 0x2000402200300C08, 0x8646020080080080,
    0x80020A0200100808, 0x2010004880111000, 0x623000A080011400, 0x42008C0340209202,
    0x0209188240001000, 0x400408A884001800, 0x00110400A6080400, 0x1840060A44020800,
    0x0090080104000041, 0x0201011000808101, 0x1A2208080504F080, 0x8012020600211212,
    0x0500861011240000, 0x0180806108200800, 0x4000020E01040044, 0x300000261044000A,
    0x0802241102020002, 0x0020906061210001, 0x5A84841004010310, 0x0004010801011C04,
    0x000A010109502200, 0x0000004A02012000, 0x500201010098B028, 0x8040002811040900,
    0x0028000010020204, 0x06000020202D0240, 0x8918844842082200, 0x4010011029020020,
];

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Which slider a table serves
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Slider {
    Rook,
    Bishop,
}

impl Slider {
    fn directions(self) -> &'static [(i8, i8); 4] {
        match self {
            Slider::Rook => &ROOK_DIRECTIONS,
            Slider::Bishop => &BISHOP_DIRECTIONS,
        }
    }

    fn magics(self) -> &'static [u64; 64] {
        match self {
            Slider::Rook => &ROOK_MAGICS,
            Slider::Bishop => &BISHOP_MAGICS,
        }
    }
}

/// Per-square lookup parameters
#[derive(Clone, Copy, Default)]
struct Magic {
    mask: u64,
    magic: u64,
    shift: u32,
    offset: usize,
}

impl Magic {
    #[inline]
    fn index(&self, occupied: Bitboard) -> usize {
        self.offset + (((occupied.0 & self.mask).wrapping_mul(self.magic)) >> self.shift) as usize
    }
}

/// All 64 magic entries for one slider kind plus the shared attack storage
pub struct SliderTable {
    magics: [Magic; 64],
    attacks: Vec<Bitboard>,
}

impl SliderTable {
    /// Build the table by enumerating every blocker subset of every square.
    ///
    /// Panics if a multiplier maps two subsets with different attack sets to
    /// the same slot; the constants are fixed, so this can only fire if they
    /// are edited.
    pub fn build(slider: Slider) -> Self {
        let mut magics = [Magic::default(); 64];
        let mut attacks = Vec::new();

        for sq in Square::all() {
            let mask = relevance_mask(slider, sq);
            let bits = mask.count_ones();
            let size = 1usize << bits;
            let entry = Magic {
                mask,
                magic: slider.magics()[sq.index()],
                shift: 64 - bits,
                offset: attacks.len(),
            };

            let mut filled = vec![None; size];
            // Carry-rippler walk over every subset of the mask
            let mut subset = 0u64;
            loop {
                let occupied = Bitboard(subset);
                let reach = ray_attacks(slider, sq, occupied);
                let slot = entry.index(occupied) - entry.offset;
                match filled[slot] {
                    None => filled[slot] = Some(reach),
                    Some(existing) => assert!(
                        existing == reach,
                        "magic collision for {:?} on {}",
                        slider,
                        sq
                    ),
                }
                subset = subset.wrapping_sub(mask) & mask;
                if subset == 0 {
                    break;
                }
            }

            attacks.extend(filled.into_iter().map(Option::unwrap_or_default));
            magics[sq.index()] = entry;
        }

        SliderTable { magics, attacks }
    }

    #[inline]
    pub fn attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.attacks[self.magics[sq.index()].index(occupied)]
    }

    /// Total number of stored attack sets
    pub fn len(&self) -> usize {
        self.attacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attacks.is_empty()
    }
}

/// Squares whose occupancy can change the slider's reach: the rays from `sq`
/// without the final edge square of each ray.
pub fn relevance_mask(slider: Slider, sq: Square) -> u64 {
    let mut mask = 0u64;
    for &(dr, df) in slider.directions() {
        let mut r = sq.rank() as i8 + dr;
        let mut f = sq.file() as i8 + df;
        while (0..8).contains(&(r + dr)) && (0..8).contains(&(f + df)) {
            mask |= 1u64 << (r * 8 + f);
            r += dr;
            f += df;
        }
    }
    mask
}

/// Reference attack computation: march each ray until it leaves the board or
/// hits a blocker (the blocker square is included).
pub fn ray_attacks(slider: Slider, sq: Square, occupied: Bitboard) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for &(dr, df) in slider.directions() {
        let mut r = sq.rank() as i8 + dr;
        let mut f = sq.file() as i8 + df;
        while (0..8).contains(&r) && (0..8).contains(&f) {
            let target = Square::from_file_rank(f as u8, r as u8);
            attacks.set(target);
            if occupied.contains(target) {
                break;
            }
            r += dr;
            f += df;
        }
    }
    attacks
}
