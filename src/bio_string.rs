//! A normalized, 1-based biological character sequence.
//!
//! Sequence data arrives from many sources in many shapes; `BioString`
//! normalizes it at construction by stripping all whitespace, and from then
//! on guarantees every byte is printable ASCII (32–126). All public
//! coordinates are 1-based and inclusive; internally storage is a plain
//! 0-based byte buffer and the translation happens only at the API boundary.
//!
//! Out-of-range positions and ranges are contract violations and panic. Use
//! `is_valid_position`/`is_valid_range` to validate untrusted coordinates
//! first, and `remove_unallowed_chars`/`mask_unallowed_chars` to pre-sanitize
//! untrusted bytes.

use std::{
    fmt,
    ops::Index,
};

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::{
    sequence::{complement_byte, is_acgt, is_gap_char, Grammar},
    util::RangeIncl,
};

const MIN_ASCII_VAL: u8 = 32;
const MAX_ASCII_VAL: u8 = 126;

fn is_seq_whitespace(ch: u8) -> bool {
    // Space, tab, LF, VT, FF, CR.
    matches!(ch, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}

#[derive(Clone, PartialEq, Eq, Hash, Encode, Decode, Serialize, Deserialize)]
pub struct BioString {
    seq: Vec<u8>,
    grammar: Grammar,
}

impl BioString {
    /// Constructs from raw bytes, stripping all whitespace. Panics if any
    /// remaining byte falls outside printable ASCII.
    pub fn new(seq: impl AsRef<[u8]>, grammar: Grammar) -> Self {
        let mut seq: Vec<u8> = seq
            .as_ref()
            .iter()
            .copied()
            .filter(|&ch| !is_seq_whitespace(ch))
            .collect();
        seq.shrink_to_fit();

        for &ch in &seq {
            assert!(
                (MIN_ASCII_VAL..=MAX_ASCII_VAL).contains(&ch),
                "BioString byte {ch:#x} outside printable ASCII; pre-sanitize with remove_unallowed_chars"
            );
        }

        Self { seq, grammar }
    }

    pub fn empty(grammar: Grammar) -> Self {
        Self {
            seq: Vec::new(),
            grammar,
        }
    }

    pub fn grammar(&self) -> Grammar {
        self.grammar
    }

    pub fn set_grammar(&mut self, grammar: Grammar) {
        self.grammar = grammar;
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.seq
    }

    /// The sequence as text; every byte is printable ASCII.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.seq).expect("printable ASCII")
    }

    pub fn is_valid_position(&self, position: usize) -> bool {
        position >= 1 && position <= self.len()
    }

    pub fn is_valid_range(&self, range: RangeIncl) -> bool {
        !range.is_empty() && self.is_valid_position(range.start) && self.is_valid_position(range.end)
    }

    fn assert_position(&self, position: usize) {
        assert!(self.is_valid_position(position), "position out of range");
    }

    fn assert_range(&self, range: RangeIncl) {
        assert!(self.is_valid_range(range), "range out of range");
    }

    /// The byte at a 1-based position.
    pub fn at(&self, position: usize) -> u8 {
        self.assert_position(position);
        self.seq[position - 1]
    }

    /// The substring covered by `range`, grammar preserved.
    pub fn mid(&self, range: RangeIncl) -> Self {
        self.assert_range(range);
        Self {
            seq: self.seq[range.start - 1..range.end].to_vec(),
            grammar: self.grammar,
        }
    }

    /// The substring of `length` bytes starting at `position`.
    pub fn substring(&self, position: usize, length: usize) -> Self {
        self.mid(RangeIncl::new(position, position + length - 1))
    }

    // ---------------------------------------------------------------------
    // Editing. Mutators return `&mut Self` to allow chaining.

    /// Inserts at `position`; the valid range is `1..=len + 1` and insertion
    /// happens at the index itself, not after it.
    pub fn insert(&mut self, position: usize, other: &BioString) -> &mut Self {
        assert!(
            position >= 1 && position <= self.len() + 1,
            "position out of range"
        );

        self.seq
            .splice(position - 1..position - 1, other.seq.iter().copied());
        self
    }

    pub fn append(&mut self, other: &BioString) -> &mut Self {
        assert!(self.grammar == other.grammar, "incompatible grammar");

        self.seq.extend_from_slice(&other.seq);
        self
    }

    pub fn prepend(&mut self, other: &BioString) -> &mut Self {
        assert!(self.grammar == other.grammar, "incompatible grammar");

        self.seq.splice(0..0, other.seq.iter().copied());
        self
    }

    pub fn remove(&mut self, range: RangeIncl) -> &mut Self {
        self.assert_range(range);

        self.seq.drain(range.start - 1..range.end);
        self
    }

    pub fn replace(&mut self, range: RangeIncl, other: &BioString) -> &mut Self {
        self.assert_range(range);

        self.seq
            .splice(range.start - 1..range.end, other.seq.iter().copied());
        self
    }

    /// Inserts `n_gaps` copies of `gap_char` at `position` (valid range
    /// `1..=len + 1`).
    pub fn insert_gaps(&mut self, position: usize, n_gaps: usize, gap_char: u8) -> &mut Self {
        assert!(
            position >= 1 && position <= self.len() + 1,
            "position out of range"
        );
        assert!(is_gap_char(gap_char), "gap_char is not a gap character");

        self.seq
            .splice(position - 1..position - 1, std::iter::repeat(gap_char).take(n_gaps));
        self
    }

    /// Removes `n_gaps` contiguous gaps beginning at `position`. All removed
    /// characters must actually be gaps.
    pub fn remove_gaps_at(&mut self, position: usize, n_gaps: usize) -> &mut Self {
        self.assert_position(position);

        if n_gaps > 0 {
            let range = RangeIncl::new(position, position + n_gaps - 1);
            assert!(
                self.gaps_between(range) == n_gaps,
                "non-gap characters in removal range"
            );
            self.seq.drain(position - 1..position - 1 + n_gaps);
        }
        self
    }

    pub fn remove_gaps(&mut self) -> &mut Self {
        self.seq.retain(|&ch| !is_gap_char(ch));
        self
    }

    /// Replaces every gap character with `gap_char`.
    pub fn translate_gaps(&mut self, gap_char: u8) -> &mut Self {
        assert!(is_gap_char(gap_char), "gap_char is not a gap character");

        for ch in &mut self.seq {
            if is_gap_char(*ch) {
                *ch = gap_char;
            }
        }
        self
    }

    /// Replaces every occurrence of `before` with `after`.
    pub fn tr(&mut self, before: u8, after: u8) -> &mut Self {
        for ch in &mut self.seq {
            if *ch == before {
                *ch = after;
            }
        }
        self
    }

    pub fn reverse(&mut self) -> &mut Self {
        self.seq.reverse();
        self
    }

    // ---------------------------------------------------------------------
    // Gap queries.

    pub fn has_gap_at(&self, position: usize) -> bool {
        self.assert_position(position);
        is_gap_char(self.seq[position - 1])
    }

    pub fn has_gaps(&self) -> bool {
        self.seq.iter().any(|&ch| is_gap_char(ch))
    }

    pub fn has_non_gaps(&self) -> bool {
        self.seq.iter().any(|&ch| !is_gap_char(ch))
    }

    /// Number of gaps before the first non-gap character.
    pub fn head_gaps(&self) -> usize {
        self.seq.iter().take_while(|&&ch| is_gap_char(ch)).count()
    }

    /// Number of gaps after the last non-gap character.
    pub fn tail_gaps(&self) -> usize {
        self.seq
            .iter()
            .rev()
            .take_while(|&&ch| is_gap_char(ch))
            .count()
    }

    pub fn gaps_between(&self, range: RangeIncl) -> usize {
        self.assert_range(range);
        self.seq[range.start - 1..range.end]
            .iter()
            .filter(|&&ch| is_gap_char(ch))
            .count()
    }

    pub fn non_gaps_between(&self, range: RangeIncl) -> usize {
        self.assert_range(range);
        range.len() - self.gaps_between(range)
    }

    /// Number of contiguous gaps strictly left of `position`; the character
    /// at `position` itself is not considered.
    ///
    /// ```text
    /// 12345678
    /// AB----CD
    ///
    /// gaps_left_of(3) -> 0
    /// gaps_left_of(5) -> 2
    /// gaps_left_of(7) -> 4
    /// gaps_left_of(8) -> 0
    /// ```
    pub fn gaps_left_of(&self, position: usize) -> usize {
        self.assert_position(position);

        self.seq[..position - 1]
            .iter()
            .rev()
            .take_while(|&&ch| is_gap_char(ch))
            .count()
    }

    /// Number of contiguous gaps strictly right of `position`.
    ///
    /// ```text
    /// 12345678
    /// AB----CD
    ///
    /// gaps_right_of(1) -> 0
    /// gaps_right_of(2) -> 4
    /// gaps_right_of(5) -> 1
    /// gaps_right_of(6) -> 0
    /// ```
    pub fn gaps_right_of(&self, position: usize) -> usize {
        self.assert_position(position);

        self.seq[position..]
            .iter()
            .take_while(|&&ch| is_gap_char(ch))
            .count()
    }

    // ---------------------------------------------------------------------
    // Collapse and slide.

    /// Maximally shifts the non-gap characters in `range` to the left,
    /// swapping them with the gaps they displace. Returns the sub-range of
    /// positions that changed, or `None` if nothing moved.
    pub fn collapse_left(&mut self, range: RangeIncl) -> Option<RangeIncl> {
        self.assert_range(range);

        // First gap within the range; everything before it is already packed.
        let first_gap = (range.start..=range.end).find(|&i| is_gap_char(self.seq[i - 1]))?;

        let mut affected: Option<RangeIncl> = None;
        let mut gap_pos = first_gap;
        for i in first_gap + 1..=range.end {
            if !is_gap_char(self.seq[i - 1]) {
                self.seq.swap(gap_pos - 1, i - 1);
                gap_pos += 1;

                affected = Some(match affected {
                    None => RangeIncl::new(first_gap, i),
                    Some(r) => RangeIncl::new(r.start, i),
                });
            }
        }

        affected
    }

    /// Mirror of `collapse_left`: shifts the non-gap characters in `range`
    /// to the right.
    pub fn collapse_right(&mut self, range: RangeIncl) -> Option<RangeIncl> {
        self.assert_range(range);

        let first_gap = (range.start..=range.end)
            .rev()
            .find(|&i| is_gap_char(self.seq[i - 1]))?;

        let mut affected: Option<RangeIncl> = None;
        let mut gap_pos = first_gap;
        for i in (range.start..first_gap).rev() {
            if !is_gap_char(self.seq[i - 1]) {
                self.seq.swap(gap_pos - 1, i - 1);
                gap_pos -= 1;

                affected = Some(match affected {
                    None => RangeIncl::new(i, first_gap),
                    Some(r) => RangeIncl::new(i, r.end),
                });
            }
        }

        affected
    }

    /// How far the segment in `range` may slide left: a segment containing
    /// non-gap characters is limited to the contiguous gaps immediately to
    /// its left, while a pure-gap segment may move to the string boundary.
    ///
    /// ```text
    /// 123456789
    /// AB--C-D-E
    ///
    /// left_slidable_positions(5..=7) -> 2
    /// left_slidable_positions(6..=6) -> 5
    /// left_slidable_positions(3..=5) -> 0
    /// ```
    pub fn left_slidable_positions(&self, range: RangeIncl) -> usize {
        self.assert_range(range);

        if self.non_gaps_between(range) > 0 {
            self.gaps_left_of(range.start)
        } else {
            range.start - 1
        }
    }

    /// Mirror of `left_slidable_positions`.
    pub fn right_slidable_positions(&self, range: RangeIncl) -> usize {
        self.assert_range(range);

        if self.non_gaps_between(range) > 0 {
            self.gaps_right_of(range.end)
        } else {
            self.len() - range.end
        }
    }

    /// Slides the characters in `range` up to `delta` positions (negative =
    /// left, positive = right), exchanging places with the adjacent gaps
    /// rather than overwriting anything. Returns the signed number of
    /// positions actually moved, which may be smaller in magnitude than
    /// `delta`.
    ///
    /// ```text
    /// 1234567890123
    /// ABC--D-EF--GH
    ///
    /// slide(6..=9, -1) -> -1, sequence = ABC-D-EF---GH
    /// slide(6..=9, -2) -> -2, sequence = ABCD-EF----GH
    /// slide(6..=9, -5) -> same as -2
    /// slide(9..=11, 2) -> 0, unchanged
    /// slide(9..=10, 2) -> 1, sequence = ABC--D-E-F-GH
    /// ```
    pub fn slide(&mut self, range: RangeIncl, delta: isize) -> isize {
        self.assert_range(range);

        if delta < 0 {
            let actual = (delta.unsigned_abs()).min(self.left_slidable_positions(range));
            if actual > 0 {
                // The displaced gaps keep their exact characters by rotating
                // them to the right end of the widened window.
                self.seq[range.start - 1 - actual..range.end].rotate_left(actual);
            }
            -(actual as isize)
        } else if delta > 0 {
            let actual = (delta as usize).min(self.right_slidable_positions(range));
            if actual > 0 {
                self.seq[range.start - 1..range.end + actual].rotate_right(actual);
            }
            actual as isize
        } else {
            0
        }
    }

    // ---------------------------------------------------------------------
    // Grammar conversions.

    /// The DNA complement, case preserved; gaps and letters without a
    /// distinct IUPAC complement pass through. The result always carries DNA
    /// grammar.
    pub fn complement(&self) -> Self {
        Self {
            seq: self.seq.iter().map(|&ch| complement_byte(ch)).collect(),
            grammar: Grammar::Dna,
        }
    }

    pub fn reverse_complement(&self) -> Self {
        let mut dna = self.complement();
        dna.reverse();
        dna
    }

    /// RNA copy with `T`/`t` translated to `U`/`u`.
    pub fn transcribe(&self) -> Self {
        if self.grammar != Grammar::Dna {
            log::warn!("transcribe() called on non-DNA grammar");
        }

        let mut rna = self.clone();
        rna.grammar = Grammar::Rna;
        rna.tr(b'T', b'U').tr(b't', b'u');
        rna
    }

    /// DNA copy with `U`/`u` translated to `T`/`t`.
    pub fn back_transcribe(&self) -> Self {
        if self.grammar != Grammar::Rna {
            log::warn!("back_transcribe() called on non-RNA grammar");
        }

        let mut dna = self.clone();
        dna.grammar = Grammar::Dna;
        dna.tr(b'U', b'T').tr(b'u', b't');
        dna
    }

    /// True only for a non-empty, even-length, gap-free DNA sequence that
    /// equals its own reverse complement.
    pub fn is_palindrome(&self) -> bool {
        self.grammar == Grammar::Dna
            && !self.is_empty()
            && self.len() % 2 == 0
            && !self.has_gaps()
            && *self == self.reverse_complement()
    }

    // ---------------------------------------------------------------------
    // Comparisons and searching.

    /// True if `other` has the same grammar, the same length, identical
    /// non-gap characters at identical positions, and gaps in identical
    /// positions — the particular gap characters (`-` vs `.`) are ignored.
    pub fn is_equivalent_to(&self, other: &BioString) -> bool {
        self.grammar == other.grammar
            && self.len() == other.len()
            && self
                .seq
                .iter()
                .zip(&other.seq)
                .all(|(&a, &b)| a == b || (is_gap_char(a) && is_gap_char(b)))
    }

    /// True if `other` occurs verbatim starting at `position`. Empty inputs
    /// never match.
    pub fn is_exact_match(&self, position: usize, other: &BioString) -> bool {
        self.assert_position(position);

        if other.is_empty() || position + other.len() - 1 > self.len() {
            return false;
        }

        self.seq[position - 1..position - 1 + other.len()] == other.seq[..]
    }

    /// 1-based position of the first occurrence of `needle` at or after
    /// `from`.
    pub fn index_of(&self, needle: &BioString, from: usize) -> Option<usize> {
        if needle.is_empty() || needle.len() > self.len() {
            return None;
        }

        let start = from.max(1) - 1;
        if start >= self.seq.len() {
            return None;
        }
        self.seq[start..]
            .windows(needle.len())
            .position(|w| w == needle.seq)
            .map(|i| i + start + 1)
    }

    /// 1-based position of the last occurrence of `needle`.
    pub fn last_index_of(&self, needle: &BioString) -> Option<usize> {
        if needle.is_empty() || needle.len() > self.len() {
            return None;
        }

        self.seq
            .windows(needle.len())
            .rposition(|w| w == needle.seq)
            .map(|i| i + 1)
    }

    /// Number of (possibly overlapping) occurrences of `needle`.
    pub fn count(&self, needle: &BioString) -> usize {
        if needle.is_empty() || needle.len() > self.len() {
            return 0;
        }

        self.seq
            .windows(needle.len())
            .filter(|w| *w == &needle.seq[..])
            .count()
    }

    pub fn only_contains_acgt(&self) -> bool {
        !self.is_empty() && self.seq.iter().all(|&ch| is_acgt(ch))
    }

    pub fn only_contains_acgt_in(&self, range: RangeIncl) -> bool {
        if range.is_empty() {
            return false;
        }
        self.assert_range(range);

        self.seq[range.start - 1..range.end].iter().all(|&ch| is_acgt(ch))
    }

    pub fn ungapped(&self) -> Self {
        Self {
            seq: self
                .seq
                .iter()
                .copied()
                .filter(|&ch| !is_gap_char(ch))
                .collect(),
            grammar: self.grammar,
        }
    }

    pub fn ungapped_len(&self) -> usize {
        self.seq.iter().filter(|&&ch| !is_gap_char(ch)).count()
    }

    // ---------------------------------------------------------------------
    // Raw-buffer utilities, independent of any instance.

    pub fn contains_unallowed_chars(bytes: &[u8]) -> bool {
        bytes
            .iter()
            .any(|&ch| !(MIN_ASCII_VAL..=MAX_ASCII_VAL).contains(&ch))
    }

    pub fn remove_unallowed_chars(bytes: &[u8]) -> Vec<u8> {
        bytes
            .iter()
            .copied()
            .filter(|&ch| (MIN_ASCII_VAL..=MAX_ASCII_VAL).contains(&ch))
            .collect()
    }

    pub fn mask_unallowed_chars(bytes: &[u8], mask: u8) -> Vec<u8> {
        assert!(
            (MIN_ASCII_VAL..=MAX_ASCII_VAL).contains(&mask),
            "unallowed mask char"
        );

        bytes
            .iter()
            .map(|&ch| {
                if (MIN_ASCII_VAL..=MAX_ASCII_VAL).contains(&ch) {
                    ch
                } else {
                    mask
                }
            })
            .collect()
    }
}

impl Index<usize> for BioString {
    type Output = u8;

    /// 1-based, like every other coordinate on this type.
    fn index(&self, position: usize) -> &u8 {
        self.assert_position(position);
        &self.seq[position - 1]
    }
}

impl fmt::Display for BioString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for BioString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "BioString({:?}, {:?})", self.as_str(), self.grammar)
    }
}
