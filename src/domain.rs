//! Core domain types for the dual-case approximate membership index.
//!
//! These newtypes prevent mixing the four distinct "flavors" of integer the
//! index juggles: a dense keyword id, a pair-index slot, a deletion-index
//! slot, and a packed nibble code. Mixing any two of these at a call site
//! compiles silently with bare `u32`/`u64` and produces a wrong answer with
//! no panic; the wrapper types make the mix-up a type error instead.
//!
//! Kept in a separate module, same as the teacher's `FileId`/`GlobalSliceIndex`
//! split, to avoid circular dependencies between `csr`, `pair_index`, and
//! `deletion_index`.

/// Dense identifier for a keyword in insertion order, `[0, N)`, `N <= 2^20`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeywordId(u32);

impl KeywordId {
    pub const MAX: u32 = (1 << 20) - 1;

    pub fn new(id: u32) -> Self {
        debug_assert!(id <= Self::MAX, "keyword id {id} exceeds 2^20 - 1");
        KeywordId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for KeywordId {
    fn from(id: u32) -> Self {
        KeywordId::new(id)
    }
}

impl std::fmt::Display for KeywordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of a single-character deletion within an `L`-character word, `[0, L)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DelPos(u8);

impl DelPos {
    pub fn new(pos: usize) -> Self {
        debug_assert!(pos < crate::codec::L, "deletion position {pos} out of range");
        DelPos(pos as u8)
    }

    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for DelPos {
    fn from(pos: usize) -> Self {
        DelPos::new(pos)
    }
}

impl std::fmt::Display for DelPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dense slot in a Case-A (pair) CSR table, `s = base10(6-char key) + pair * KA`.
/// Distinct from [`DeletionSlot`] so a pair-table offset can never be used to
/// index the deletion table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairSlot(u32);

impl PairSlot {
    pub fn new(slot: u32) -> Self {
        PairSlot(slot)
    }

    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for PairSlot {
    fn from(slot: u32) -> Self {
        PairSlot::new(slot)
    }
}

/// Dense slot in the Case-B (deletion) CSR table, `s = base10(7-char key)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeletionSlot(u32);

impl DeletionSlot {
    pub fn new(slot: u32) -> Self {
        DeletionSlot(slot)
    }

    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for DeletionSlot {
    fn from(slot: u32) -> Self {
        DeletionSlot::new(slot)
    }
}

/// A nibble-packed word: symbol `i` occupies bits `[4i, 4i+4)`.
///
/// Holds either a 60-bit (`L`-symbol) or a 56-bit (`L-1`-symbol, post-deletion)
/// code; the two are never implicitly convertible into each other, since a
/// 56-bit code compared against a 60-bit one with the wrong nibble count
/// would silently include a spurious high nibble in the Hamming mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NibbleCode(u64);

impl NibbleCode {
    pub fn new(bits: u64) -> Self {
        NibbleCode(bits)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for NibbleCode {
    fn from(bits: u64) -> Self {
        NibbleCode::new(bits)
    }
}

impl std::fmt::Display for NibbleCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}
