//! IUPAC ambiguity-code pattern matching over a `BioString`.
//!
//! A pattern is a byte string over 17 symbols: the four bases, the six
//! two-way and four three-way ambiguity codes, `N`, the gap symbol `-`
//! (matches any gap character in the subject), and space (matches any
//! character whatsoever). Patterns are stored as given but match subject
//! characters case-insensitively. An invalid or empty pattern never matches.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::{bio_string::BioString, sequence::is_gap_char};

#[derive(Clone, PartialEq, Eq, Debug, Default, Encode, Decode, Serialize, Deserialize)]
pub struct DnaPattern {
    pattern: Vec<u8>,
    valid: bool,
}

impl DnaPattern {
    pub fn new(pattern: impl AsRef<[u8]>) -> Self {
        let mut result = Self::default();
        result.set_pattern(pattern);
        result
    }

    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    pub fn set_pattern(&mut self, pattern: impl AsRef<[u8]>) {
        self.pattern = pattern.as_ref().to_vec();
        self.valid = Self::is_valid_pattern(&self.pattern);
    }

    pub fn clear(&mut self) {
        self.set_pattern([]);
    }

    pub fn len(&self) -> usize {
        self.pattern.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Validity as computed when the pattern was last set.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_valid_pattern(pattern: &[u8]) -> bool {
        pattern.iter().all(|ch| {
            matches!(
                ch,
                b'A' | b'C'
                    | b'G'
                    | b'T'
                    | b'R'
                    | b'Y'
                    | b'M'
                    | b'K'
                    | b'S'
                    | b'W'
                    | b'H'
                    | b'B'
                    | b'V'
                    | b'D'
                    | b'N'
                    | b'-'
                    | b' '
            )
        })
    }

    /// True if the whole pattern matches `subject` starting at the 1-based
    /// `offset`. The pattern must fit entirely within the subject.
    pub fn matches_at(&self, subject: &BioString, offset: usize) -> bool {
        if subject.is_empty() {
            return false;
        }

        assert!(subject.is_valid_position(offset), "offset out of range");

        if self.pattern.is_empty() || !self.valid {
            return false;
        }
        if offset + self.pattern.len() - 1 > subject.len() {
            return false;
        }

        self.pattern
            .iter()
            .zip(&subject.as_bytes()[offset - 1..])
            .all(|(&p, &q)| Self::matches(q, p))
    }

    pub fn matches_at_beginning(&self, subject: &BioString) -> bool {
        self.matches_at(subject, 1)
    }

    /// Anchors the pattern so its last character aligns with the subject's
    /// last character.
    pub fn matches_at_end(&self, subject: &BioString) -> bool {
        if subject.is_empty() {
            return false;
        }

        let offset = (subject.len() + 1).saturating_sub(self.pattern.len()).max(1);
        self.matches_at(subject, offset)
    }

    /// 1-based position of the first match at or after `from`, scanning
    /// linearly.
    pub fn index_in(&self, subject: &BioString, from: usize) -> Option<usize> {
        if subject.is_empty() || self.pattern.is_empty() || !self.valid {
            return None;
        }

        assert!(subject.is_valid_position(from), "from out of range");

        let max_start = (subject.len() + 1).checked_sub(self.pattern.len())?;
        (from..=max_start).find(|&i| self.matches_at(subject, i))
    }

    /// Human-readable rendering, e.g. `R` -> `[A/G]`, `N` -> `*`.
    pub fn display_text(&self) -> String {
        let mut text = String::new();
        for &ch in &self.pattern {
            match ch {
                b'R' => text.push_str("[A/G]"),
                b'Y' => text.push_str("[C/T]"),
                b'M' => text.push_str("[A/C]"),
                b'K' => text.push_str("[G/T]"),
                b'S' => text.push_str("[C/G]"),
                b'W' => text.push_str("[A/T]"),
                b'H' => text.push_str("[A/C/T]"),
                b'B' => text.push_str("[C/G/T]"),
                b'V' => text.push_str("[A/C/G]"),
                b'D' => text.push_str("[A/G/T]"),
                b'N' => text.push('*'),
                other => text.push(other as char),
            }
        }

        text
    }

    /// Whether one subject character satisfies one pattern symbol. Subject
    /// case is ignored; the pattern symbol is not.
    fn matches(query: u8, pattern: u8) -> bool {
        let q = query.to_ascii_uppercase();
        match pattern {
            b'A' | b'C' | b'G' | b'T' => q == pattern,

            b'R' => matches!(q, b'A' | b'G'),
            b'Y' => matches!(q, b'C' | b'T'),
            b'M' => matches!(q, b'A' | b'C'),
            b'K' => matches!(q, b'G' | b'T'),
            b'S' => matches!(q, b'C' | b'G'),
            b'W' => matches!(q, b'A' | b'T'),

            b'H' => matches!(q, b'A' | b'C' | b'T'),
            b'B' => matches!(q, b'C' | b'G' | b'T'),
            b'V' => matches!(q, b'A' | b'C' | b'G'),
            b'D' => matches!(q, b'A' | b'G' | b'T'),

            b'N' => matches!(q, b'A' | b'C' | b'G' | b'T'),

            b'-' => is_gap_char(query),
            b' ' => true,

            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::Grammar::Dna;

    fn dna(s: &str) -> BioString {
        BioString::new(s, Dna)
    }

    #[test]
    fn pattern_validity() {
        assert!(DnaPattern::new("ACGTRYMKSWHBVDN- ").is_valid());
        assert!(DnaPattern::new("").is_valid());
        assert!(!DnaPattern::new("ACGU").is_valid());
        assert!(!DnaPattern::new("acgt").is_valid());
        assert!(!DnaPattern::new("AC.T").is_valid());

        let mut p = DnaPattern::new("XX");
        assert!(!p.is_valid());
        p.set_pattern("NN");
        assert!(p.is_valid());
        p.clear();
        assert!(p.is_valid());
        assert!(p.is_empty());
    }

    #[test]
    fn empty_or_invalid_never_matches() {
        let subject = dna("ACGT");
        assert!(!DnaPattern::new("").matches_at(&subject, 1));
        assert!(!DnaPattern::new("acgt").matches_at(&subject, 1));
        assert!(!DnaPattern::new("").matches_at_end(&subject));
    }

    #[test]
    fn base_and_ambiguity_matching() {
        let p = DnaPattern::new("GRN");
        assert!(p.matches_at(&dna("GAT"), 1));
        assert!(p.matches_at(&dna("ggc"), 1)); // subject case ignored
        assert!(!p.matches_at(&dna("GCT"), 1)); // C fails R
        assert!(!p.matches_at(&dna("GA-"), 1)); // gap fails N

        assert!(DnaPattern::new("W").matches_at(&dna("t"), 1));
        assert!(DnaPattern::new("S").matches_at(&dna("C"), 1));
        assert!(DnaPattern::new("H").matches_at(&dna("T"), 1));
        assert!(!DnaPattern::new("H").matches_at(&dna("G"), 1));
        assert!(DnaPattern::new("D").matches_at(&dna("G"), 1));
        assert!(!DnaPattern::new("V").matches_at(&dna("T"), 1));
        assert!(DnaPattern::new("B").matches_at(&dna("g"), 1));
    }

    #[test]
    fn gap_and_space_symbols() {
        let p = DnaPattern::new("A-C");
        assert!(p.matches_at(&dna("A-C"), 1));
        assert!(p.matches_at(&dna("A.C"), 1)); // `-` matches either gap char
        assert!(!p.matches_at(&dna("AGC"), 1));

        let any = DnaPattern::new(" ");
        assert!(any.matches_at(&dna("Q"), 1));
        assert!(any.matches_at(&dna("-"), 1));
    }

    #[test]
    fn must_fit_within_subject() {
        let p = DnaPattern::new("ACG");
        let subject = dna("TACG");
        assert!(!p.matches_at(&subject, 3));
        assert!(p.matches_at(&subject, 2));
    }

    #[test]
    fn anchored_matching() {
        let p = DnaPattern::new("GT");
        assert!(p.matches_at_beginning(&dna("GTAA")));
        assert!(!p.matches_at_beginning(&dna("AGTA")));

        assert!(p.matches_at_end(&dna("AAGT")));
        assert!(!p.matches_at_end(&dna("AGTA")));

        // Pattern longer than the subject anchors at position 1 and fails.
        assert!(!DnaPattern::new("ACGT").matches_at_end(&dna("GT")));
    }

    #[test]
    fn index_in_scans_forward() {
        let p = DnaPattern::new("RT");
        let subject = dna("CCATGGGT");
        assert_eq!(p.index_in(&subject, 1), Some(3));
        assert_eq!(p.index_in(&subject, 4), Some(7));
        assert_eq!(p.index_in(&subject, 8), None);
        assert_eq!(DnaPattern::new("TTT").index_in(&subject, 1), None);
    }

    #[test]
    fn display_text_rendering() {
        assert_eq!(DnaPattern::new("ART").display_text(), "A[A/G]T");
        assert_eq!(DnaPattern::new("NH").display_text(), "*[A/C/T]");
    }
}
