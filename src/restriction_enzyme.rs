//! Restriction enzyme records: a named recognition site plus the cut
//! offsets on each strand.
//!
//! [Wikipedia: List of RE sites](https://en.wikipedia.org/wiki/List_of_restriction_enzyme_cutting_sites:_A)
//! [NEB guide](https://www.neb.com/en-us/tools-and-resources/selection-charts/frequencies-of-restriction-sites)
//!
//! Cut positions are 1-based, relative to the 5' end of the sense strand,
//! and the cut falls immediately to the right of the given value. Negative
//! values indicate a position before the first base; zero is undefined and
//! rejected. Enzymes may cut at arbitrary offsets, so beyond grammar and
//! gap checks there is little validation.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::{bio_string::BioString, sequence::Grammar};

const CUT_DELIMITER: char = ',';

#[derive(Clone, PartialEq, Eq, Debug, Encode, Decode, Serialize, Deserialize)]
pub struct RestrictionEnzyme {
    name: String,
    recognition_site: BioString,
    forward_cuts: Vec<i32>,
    reverse_cuts: Vec<i32>,
}

impl Default for RestrictionEnzyme {
    fn default() -> Self {
        Self {
            name: String::new(),
            recognition_site: BioString::empty(Grammar::Dna),
            forward_cuts: Vec::new(),
            reverse_cuts: Vec::new(),
        }
    }
}

impl RestrictionEnzyme {
    /// Panics if the recognition site is not gap-free DNA, if any cut is
    /// zero, or if cuts are supplied without a site.
    pub fn new(
        name: &str,
        recognition_site: BioString,
        mut forward_cuts: Vec<i32>,
        mut reverse_cuts: Vec<i32>,
    ) -> Self {
        assert!(
            recognition_site.grammar() == Grammar::Dna,
            "recognition site must be DNA"
        );
        assert!(!recognition_site.has_gaps(), "recognition site must be gap-free");
        assert!(
            !forward_cuts.contains(&0) && !reverse_cuts.contains(&0),
            "zero cut positions are undefined"
        );
        assert!(
            !recognition_site.is_empty() || forward_cuts.len() + reverse_cuts.len() == 0,
            "cuts without a recognition site"
        );

        forward_cuts.sort_unstable();
        reverse_cuts.sort_unstable();

        Self {
            name: name.to_owned(),
            recognition_site,
            forward_cuts,
            reverse_cuts,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_owned();
    }

    pub fn recognition_site(&self) -> &BioString {
        &self.recognition_site
    }

    pub fn forward_cuts(&self) -> &[i32] {
        &self.forward_cuts
    }

    pub fn reverse_cuts(&self) -> &[i32] {
        &self.reverse_cuts
    }

    pub fn num_cuts(&self) -> usize {
        self.forward_cuts.len() + self.reverse_cuts.len()
    }

    /// True when no recognition site has been defined.
    pub fn is_empty(&self) -> bool {
        self.recognition_site.is_empty()
    }

    pub fn is_blunt(&self) -> bool {
        !self.forward_cuts.is_empty() && self.forward_cuts == self.reverse_cuts
    }

    pub fn is_sticky(&self) -> bool {
        !self.forward_cuts.is_empty()
            && !self.reverse_cuts.is_empty()
            && self.forward_cuts != self.reverse_cuts
    }

    pub fn cuts_only_one_strand(&self) -> bool {
        (self.forward_cuts.is_empty() && !self.reverse_cuts.is_empty())
            || (!self.forward_cuts.is_empty() && self.reverse_cuts.is_empty())
    }

    /// A depiction of where the sense strand is first cut, e.g. `G | AATTC`.
    pub fn cut_depiction(&self) -> String {
        let mut result = String::new();
        for (i, ch) in self.recognition_site.as_str().chars().enumerate() {
            result.push(ch);
            if self.forward_cuts.first() == Some(&(i as i32 + 1)) {
                result.push_str(" | ");
            }
        }

        result
    }

    /// Parses a delimited cut string as stored by the enzyme database, e.g.
    /// `"1,5"`. Malformed entries are skipped.
    pub fn deserialize_cut_string(cut_string: &str) -> Vec<i32> {
        cut_string
            .split(CUT_DELIMITER)
            .filter_map(|part| part.trim().parse().ok())
            .collect()
    }

    pub fn serialize_cuts(cuts: &[i32]) -> String {
        let mut result = String::new();
        for (i, cut) in cuts.iter().enumerate() {
            if i > 0 {
                result.push(CUT_DELIMITER);
            }
            result.push_str(&cut.to_string());
        }
        result
    }
}

/// A library of common restriction enzymes with exact recognition sites.
/// This supplements records sourced from an external REBASE feed; both kinds
/// flow into the search identically.
pub fn load_re_library() -> Vec<RestrictionEnzyme> {
    let re = |name, site: &str, fwd: i32, rev: i32| {
        RestrictionEnzyme::new(name, BioString::new(site, Grammar::Dna), vec![fwd], vec![rev])
    };

    vec![
        re("AatII", "GACGTC", 5, 1),
        re("AflII", "CTTAAG", 1, 5),
        re("AgeI", "ACCGGT", 1, 5),
        re("ApaI", "GGGCCC", 5, 1),
        re("AscI", "GGCGCGCC", 2, 6),
        re("AseI", "ATTAAT", 2, 4),
        re("BamHI", "GGATCC", 1, 5),
        re("BglII", "AGATCT", 1, 5),
        re("ClaI", "ATCGAT", 2, 4),
        re("EcoRI", "GAATTC", 1, 5),
        re("EcoRV", "GATATC", 3, 3),
        re("HindIII", "AAGCTT", 1, 5),
        re("HpaI", "GTTAAC", 3, 3),
        re("KpnI", "GGTACC", 5, 1),
        re("MscI", "TGGCCA", 3, 3),
        re("NdeI", "CATATG", 2, 4),
        re("NotI", "GCGGCCGC", 2, 6),
        re("NsiI", "ATGCAT", 5, 1),
        re("PacI", "TTAATTAA", 5, 3),
        re("PmeI", "GTTTAAAC", 4, 4),
        re("PstI", "CTGCAG", 5, 1),
        re("SacI", "GAGCTC", 5, 1),
        re("SalI", "GTCGAC", 1, 5),
        re("ScaI", "AGTACT", 3, 3),
        re("SmaI", "CCCGGG", 3, 3),
        re("SpeI", "ACTAGT", 1, 5),
        re("SphI", "GCATGC", 5, 1),
        re("StuI", "AGGCCT", 3, 3),
        re("XbaI", "TCTAGA", 1, 5),
        re("XhoI", "CTCGAG", 1, 5),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eco_ri() -> RestrictionEnzyme {
        RestrictionEnzyme::new(
            "EcoRI",
            BioString::new("GAATTC", Grammar::Dna),
            vec![1],
            vec![5],
        )
    }

    #[test]
    fn cut_classification() {
        let sticky = eco_ri();
        assert!(sticky.is_sticky());
        assert!(!sticky.is_blunt());
        assert!(!sticky.cuts_only_one_strand());
        assert_eq!(sticky.num_cuts(), 2);

        let blunt = RestrictionEnzyme::new(
            "EcoRV",
            BioString::new("GATATC", Grammar::Dna),
            vec![3],
            vec![3],
        );
        assert!(blunt.is_blunt());
        assert!(!blunt.is_sticky());

        let nicking = RestrictionEnzyme::new(
            "Nt.BspQI",
            BioString::new("GCTCTTC", Grammar::Dna),
            vec![8],
            vec![],
        );
        assert!(nicking.cuts_only_one_strand());
        assert!(!nicking.is_blunt());
        assert!(!nicking.is_sticky());
    }

    #[test]
    fn empty_enzyme() {
        let empty = RestrictionEnzyme::default();
        assert!(empty.is_empty());
        assert_eq!(empty.num_cuts(), 0);
        assert!(!empty.is_blunt());
        assert!(!empty.cuts_only_one_strand());
    }

    #[test]
    fn cuts_are_sorted() {
        let re = RestrictionEnzyme::new(
            "Multi",
            BioString::new("GACGTC", Grammar::Dna),
            vec![5, 1],
            vec![4, -2],
        );
        assert_eq!(re.forward_cuts(), &[1, 5]);
        assert_eq!(re.reverse_cuts(), &[-2, 4]);
    }

    #[test]
    #[should_panic]
    fn zero_cut_rejected() {
        RestrictionEnzyme::new(
            "Bad",
            BioString::new("GAATTC", Grammar::Dna),
            vec![0],
            vec![],
        );
    }

    #[test]
    fn cut_depiction_marks_forward_cut() {
        assert_eq!(eco_ri().cut_depiction(), "G | AATTC");
    }

    #[test]
    fn cut_string_round_trip() {
        assert_eq!(RestrictionEnzyme::deserialize_cut_string("1,5"), vec![1, 5]);
        assert_eq!(RestrictionEnzyme::deserialize_cut_string("-2, 4,"), vec![-2, 4]);
        assert_eq!(RestrictionEnzyme::deserialize_cut_string(""), Vec::<i32>::new());
        assert_eq!(RestrictionEnzyme::serialize_cuts(&[1, 5]), "1,5");
    }

    #[test]
    fn library_records_are_consistent() {
        let lib = load_re_library();
        assert!(!lib.is_empty());
        for re in &lib {
            assert!(!re.is_empty());
            assert!(!re.recognition_site().has_gaps());
            assert_eq!(re.forward_cuts().len(), 1);
            assert_eq!(re.reverse_cuts().len(), 1);
            assert!(re.is_blunt() || re.is_sticky());
        }
    }
}
