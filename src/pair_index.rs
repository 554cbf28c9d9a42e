//! Case A: the substitution-only inverted index.
//!
//! Ten CSR tables, one per unordered pair of the five 3-character blocks a
//! word splits into. By pigeonhole, any query within Hamming distance 3 of a
//! dictionary word must still agree with it on at least 2 of the 5 blocks
//! (`k=3 < B-1=4`), so probing all 10 pair slots enumerates a superset of
//! Case-A positives with no false negatives.

use crate::csr::CsrTable;
use crate::domain::{KeywordId, PairSlot};

/// Number of 3-character blocks a word is split into.
pub const BLOCKS: usize = 5;

/// Number of unordered pairs of blocks, `C(5,2)`.
pub const P: usize = 10;

/// Per-pair key space: `10^6` six-character keys.
pub const KA: u32 = 1_000_000;

/// Fixed `(alpha, beta)` block-index table, in the order the spec mandates.
pub const PAIR_TABLE: [(usize, usize); P] = [
    (0, 1),
    (0, 2),
    (0, 3),
    (0, 4),
    (1, 2),
    (1, 3),
    (1, 4),
    (2, 3),
    (2, 4),
    (3, 4),
];

/// The per-pair key in `[0, KA)`, before the `p * KA` offset that makes it a
/// dense slot across all ten tables combined.
fn local_key(word: &[u8; crate::codec::L], p: usize) -> u32 {
    let (alpha, beta) = PAIR_TABLE[p];
    let mut key = [0u8; 6];
    key[0..3].copy_from_slice(&word[3 * alpha..3 * alpha + 3]);
    key[3..6].copy_from_slice(&word[3 * beta..3 * beta + 3]);
    crate::codec::base10(&key)
}

/// Compute the pair slot for pair `p` of word `word`.
///
/// `s = base10(word[3*alpha .. 3*alpha+3] ++ word[3*beta .. 3*beta+3]) + p * KA`.
pub fn slot_for(word: &[u8; crate::codec::L], p: usize) -> PairSlot {
    PairSlot::new(local_key(word, p) + p as u32 * KA)
}

/// The ten Case-A CSR tables, one per pair.
pub struct PairIndex {
    tables: [CsrTable<KeywordId>; P],
}

impl PairIndex {
    /// Build all ten tables from the dictionary's raw words, in id order.
    pub fn build(words: &[[u8; crate::codec::L]]) -> Self {
        let tables = std::array::from_fn(|p| {
            CsrTable::build(KA as usize, || {
                words
                    .iter()
                    .enumerate()
                    .map(move |(i, word)| (local_key(word, p), KeywordId::new(i as u32)))
            })
        });
        PairIndex { tables }
    }

    pub fn from_tables(tables: [CsrTable<KeywordId>; P]) -> Self {
        PairIndex { tables }
    }

    pub fn tables(&self) -> &[CsrTable<KeywordId>; P] {
        &self.tables
    }

    /// Postings filed under pair `p`'s slot for `word`.
    pub fn postings(&self, p: usize, word: &[u8; crate::codec::L]) -> &[KeywordId] {
        self.tables[p].postings(local_key(word, p))
    }

    /// Length of pair `p`'s posting list for `word`, without materializing it.
    pub fn posting_len(&self, p: usize, word: &[u8; crate::codec::L]) -> u32 {
        self.tables[p].slot_len(local_key(word, p))
    }

    /// Probe order for a query: the 10 pair indices sorted ascending by
    /// posting length, ties broken by pair index (stable sort preserves the
    /// original ascending order of equal-length pairs).
    pub fn probe_order(&self, word: &[u8; crate::codec::L]) -> [usize; P] {
        let mut order: [usize; P] = std::array::from_fn(|p| p);
        let lens: [u32; P] = std::array::from_fn(|p| self.posting_len(p, word));
        order.sort_by_key(|&p| lens[p]);
        order
    }
}
