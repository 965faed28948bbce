//! Dense per-piece square lists
//!
//! Each list keeps the squares of one piece tag packed at the front of a
//! fixed array, plus a square -> slot map so add, remove and move are O(1).

use super::square::Square;

const CAPACITY: usize = 16;
const NO_SLOT: u8 = u8::MAX;

#[derive(Clone)]
pub struct PieceList {
    squares: [Square; CAPACITY],
    slot: [u8; 64],
    len: usize,
}

impl PieceList {
    pub fn new() -> Self {
        PieceList {
            squares: [Square::default(); CAPACITY],
            slot: [NO_SLOT; 64],
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn contains(&self, sq: Square) -> bool {
        self.slot[sq.index()] != NO_SLOT
    }

    pub fn add(&mut self, sq: Square) {
        debug_assert!(!self.contains(sq), "{} already listed", sq);
        debug_assert!(self.len < CAPACITY);
        self.squares[self.len] = sq;
        self.slot[sq.index()] = self.len as u8;
        self.len += 1;
    }

    /// Swap-remove: the last entry fills the hole
    pub fn remove(&mut self, sq: Square) {
        let hole = self.slot[sq.index()];
        debug_assert!(hole != NO_SLOT, "{} not listed", sq);
        let last = self.squares[self.len - 1];
        self.squares[hole as usize] = last;
        self.slot[last.index()] = hole;
        self.slot[sq.index()] = NO_SLOT;
        self.len -= 1;
    }

    pub fn move_piece(&mut self, from: Square, to: Square) {
        let index = self.slot[from.index()];
        debug_assert!(index != NO_SLOT, "{} not listed", from);
        self.squares[index as usize] = to;
        self.slot[to.index()] = index;
        self.slot[from.index()] = NO_SLOT;
    }

    #[inline]
    pub fn as_slice(&self) -> &[Square] {
        &self.squares[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = Square> + '_ {
        self.as_slice().iter().copied()
    }
}

impl Default for PieceList {
    fn default() -> Self {
        Self::new()
    }
}

/// Lists compare as sets: slot order depends on the removal history.
impl PartialEq for PieceList {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().all(|sq| other.contains(sq))
    }
}

impl Eq for PieceList {}

impl std::fmt::Debug for PieceList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
