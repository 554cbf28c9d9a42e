//! Case B: the single-deletion inverted index.
//!
//! For every word and every one of its 15 deletion positions, the resulting
//! 14-character string is split into a left and right 7-character half; both
//! halves' keys receive a posting. A query within edit distance 3 that needs
//! exactly one insertion and one deletion to align with some dictionary word
//! shares at least one such half unchanged (see spec §4.5), so probing both
//! halves for every one of the query's own 15 deletion positions enumerates
//! Case-B candidates — with the documented shift-pattern gap (§9) where a
//! difference straddling the 7/7 split can still be missed.

use crate::csr::CsrTable;
use crate::domain::{DelPos, DeletionSlot, KeywordId};

/// Length of the string after a single-character deletion.
pub const L_MINUS_1: usize = crate::codec::L_MINUS_1;

/// Width of each half of a post-deletion string.
pub const HALF: usize = L_MINUS_1 / 2;

/// Key space for each half's CSR table: `10^7` seven-character keys.
pub const KB: u32 = 10_000_000;

/// A Case-B posting: a keyword id and the deletion position that produced
/// the 14-character string it was filed under, packed as the spec's
/// `(id:20 | del_pos:4)` so it serializes to exactly 3 bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeletionPosting(u32);

impl DeletionPosting {
    pub fn new(id: KeywordId, pos: DelPos) -> Self {
        DeletionPosting((id.as_u32() << 4) | pos.as_usize() as u32)
    }

    pub fn id(&self) -> KeywordId {
        KeywordId::new(self.0 >> 4)
    }

    pub fn del_pos(&self) -> DelPos {
        DelPos::new((self.0 & 0xF) as usize)
    }

    pub fn packed(&self) -> u32 {
        self.0
    }

    pub fn from_packed(bits: u32) -> Self {
        DeletionPosting(bits)
    }
}

/// Delete the byte at `p` from an `L`-byte word, returning the resulting
/// `L-1`-byte string. Used only to derive the 7-character half keys; the
/// nibble code for the Hamming check comes from [`crate::codec::delete`].
fn delete_byte(word: &[u8; crate::codec::L], p: usize) -> [u8; L_MINUS_1] {
    let mut out = [0u8; L_MINUS_1];
    out[..p].copy_from_slice(&word[..p]);
    out[p..].copy_from_slice(&word[p + 1..]);
    out
}

fn half_slots(u: &[u8; L_MINUS_1]) -> (DeletionSlot, DeletionSlot) {
    let left = crate::codec::base10(&u[..HALF]);
    let right = crate::codec::base10(&u[HALF..]);
    (DeletionSlot::new(left), DeletionSlot::new(right))
}

/// The single Case-B CSR table, shared by both halves (both use the same
/// `[0, KB)` key space since each half is independently a 7-character key).
pub struct DeletionIndex {
    table: CsrTable<DeletionPosting>,
}

impl DeletionIndex {
    /// Build the table from the dictionary's raw words, in id order. Each
    /// word contributes `2 * L` postings: one to the left-half slot and one
    /// to the right-half slot, for each of its `L` deletion positions.
    pub fn build(words: &[[u8; crate::codec::L]]) -> Self {
        let table = CsrTable::build(KB as usize, || {
            words.iter().enumerate().flat_map(|(i, word)| {
                let id = KeywordId::new(i as u32);
                (0..crate::codec::L).flat_map(move |p| {
                    let u = delete_byte(word, p);
                    let (left, right) = half_slots(&u);
                    let posting = DeletionPosting::new(id, DelPos::new(p));
                    [
                        (left.as_usize() as u32, posting),
                        (right.as_usize() as u32, posting),
                    ]
                })
            })
        });
        DeletionIndex { table }
    }

    pub fn from_table(table: CsrTable<DeletionPosting>) -> Self {
        DeletionIndex { table }
    }

    pub fn table(&self) -> &CsrTable<DeletionPosting> {
        &self.table
    }

    /// Postings filed under `slot` (either half's key space).
    pub fn postings(&self, slot: DeletionSlot) -> &[DeletionPosting] {
        self.table.postings(slot.as_usize() as u32)
    }

    /// Compute the left/right half slots a query produces for deletion
    /// position `p`, for use by the search engine's Phase B probe.
    pub fn query_slots(query: &[u8; crate::codec::L], p: usize) -> (DeletionSlot, DeletionSlot) {
        let u = delete_byte(query, p);
        half_slots(&u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(s: &str) -> [u8; crate::codec::L] {
        s.as_bytes().try_into().unwrap()
    }

    #[test]
    fn every_word_gets_exactly_two_l_postings() {
        let words = vec![w("ABCDEFGHIJABCDE"), w("JJJJJJJJJJJJJJJ")];
        let index = DeletionIndex::build(&words);

        for (i, word) in words.iter().enumerate() {
            let mut seen_positions = Vec::new();
            for p in 0..crate::codec::L {
                let (left, right) = DeletionIndex::query_slots(word, p);
                for slot in [left, right] {
                    for posting in index.postings(slot) {
                        if posting.id().as_usize() == i && posting.del_pos().as_usize() == p {
                            seen_positions.push(p);
                        }
                    }
                }
            }
            // exactly 2*L postings total (one per half) -> each position seen twice
            assert_eq!(seen_positions.len(), 2 * crate::codec::L);
        }
    }

    #[test]
    fn posting_roundtrips_through_packed_representation() {
        let id = KeywordId::new(12345);
        let pos = DelPos::new(7);
        let posting = DeletionPosting::new(id, pos);
        assert_eq!(posting.id(), id);
        assert_eq!(posting.del_pos(), pos);

        let rebuilt = DeletionPosting::from_packed(posting.packed());
        assert_eq!(rebuilt, posting);
    }

    #[test]
    fn aligned_single_deletion_finds_the_word() {
        // q is w rotated: w's first character is deleted and appended at the
        // end (spec scenario 3). Deleting w at p=0 and q at p=14 both yield
        // the 14-character string "BCDEFGHIJABCDE", so the halves line up.
        let w0 = w("ABCDEFGHIJABCDE");
        let q = w("BCDEFGHIJABCDEA");
        let index = DeletionIndex::build(&[w0]);

        assert_eq!(delete_byte(&w0, 0), delete_byte(&q, 14));

        let (left, right) = DeletionIndex::query_slots(&q, 14);
        let found = index
            .postings(left)
            .iter()
            .chain(index.postings(right))
            .any(|p| p.id().as_usize() == 0 && p.del_pos().as_usize() == 0);
        assert!(found, "expected query's p=14 deletion to match word's p=0 posting");
    }
}
