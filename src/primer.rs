//! Primer design value objects and their factories.
//!
//! `Primer` and `PrimerPair` are plain value objects: melting temperatures
//! and dimer scores must be supplied at construction, so derivation lives in
//! `PrimerFactory` / `PrimerPairFactory`. All primer sequence data is stored
//! 5' -> 3'. A primer's full sequence is its optional restriction-site
//! addition followed by the core sequence; the core alone is what anneals to
//! the template.

use std::sync::Arc;

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::{
    bio_string::BioString,
    dna_pattern::DnaPattern,
    melting_temp_calcs,
    primer_metrics::{dimer_score, homo_dimer_score},
    restriction_enzyme::RestrictionEnzyme,
    sequence::Grammar,
    util::{fuzzy_eq, RangeF, RangeIncl},
};

const DEFAULT_MIN_PRIMER_LEN: usize = 20;
const DEFAULT_MAX_PRIMER_LEN: usize = 25;
const DEFAULT_MIN_TM: f64 = 55.;
const DEFAULT_MAX_TM: f64 = 65.;
const DEFAULT_SODIUM_MOLARITY: f64 = 0.2; // Molar
const DEFAULT_PRIMER_DNA_MOLARITY: f64 = 0.000001; // Molar
const DEFAULT_MAX_PRIMER_PAIR_DELTA_TM: f64 = 5.; // °C

/// The validated configuration bundle for a primer-pair search. Fields are
/// public and externally mutable; validity is therefore re-evaluated on
/// demand rather than cached.
#[derive(Clone, Debug, Encode, Decode, Serialize, Deserialize)]
pub struct PrimerSearchParameters {
    /// Identifier for persistence round-trips only; never interpreted here.
    pub id: i32,
    pub amplicon_length_range: RangeIncl,
    pub primer_length_range: RangeIncl,
    /// Acceptable Tm window for each individual primer, °C.
    pub individual_primer_tm_range: RangeF,
    /// Maximum |ΔTm| between the members of a pair, °C.
    pub maximum_primer_pair_delta_tm: f64,
    /// Optional 5' addition for the forward primer.
    pub forward_restriction_enzyme: RestrictionEnzyme,
    /// Optional 5' addition for the reverse primer.
    pub reverse_restriction_enzyme: RestrictionEnzyme,
    /// Required 3' terminal pattern for the forward primer.
    pub forward_terminal_pattern: DnaPattern,
    /// Required 3' terminal pattern for the reverse primer.
    pub reverse_terminal_pattern: DnaPattern,
    /// Molar sodium concentration.
    pub sodium_concentration: f64,
    /// Molar primer DNA concentration.
    pub primer_dna_concentration: f64,
}

impl Default for PrimerSearchParameters {
    fn default() -> Self {
        Self {
            id: 0,
            amplicon_length_range: RangeIncl::empty(),
            primer_length_range: RangeIncl::new(DEFAULT_MIN_PRIMER_LEN, DEFAULT_MAX_PRIMER_LEN),
            individual_primer_tm_range: RangeF::new(DEFAULT_MIN_TM, DEFAULT_MAX_TM),
            maximum_primer_pair_delta_tm: DEFAULT_MAX_PRIMER_PAIR_DELTA_TM,
            forward_restriction_enzyme: RestrictionEnzyme::default(),
            reverse_restriction_enzyme: RestrictionEnzyme::default(),
            forward_terminal_pattern: DnaPattern::default(),
            reverse_terminal_pattern: DnaPattern::default(),
            sodium_concentration: DEFAULT_SODIUM_MOLARITY,
            primer_dna_concentration: DEFAULT_PRIMER_DNA_MOLARITY,
        }
    }
}

impl PrimerSearchParameters {
    /// The first failed check in evaluation order, as a human-readable
    /// message, or `None` when the configuration is valid.
    pub fn validation_error(&self) -> Option<String> {
        if self.amplicon_length_range.is_empty() {
            return Some(
                "Invalid amplicon length range. The start value must be less than or equal to the stop value."
                    .to_owned(),
            );
        }
        if self.amplicon_length_range.start < 1 {
            return Some("The amplicon length minimum must be greater than or equal to 1.".to_owned());
        }
        if self.primer_length_range.is_empty() {
            return Some(
                "Invalid primer length range. The start value must be less than or equal to the stop value."
                    .to_owned(),
            );
        }
        if self.primer_length_range.start < 1 {
            return Some("The minimum primer length must be greater than or equal to 1.".to_owned());
        }
        // An amplicon must at minimum hold two primers.
        if self.primer_length_range.start * 2 > self.amplicon_length_range.end {
            return Some(
                "The amplicon size that you have selected is too small. The maximum amplicon size \
                 must be at least 2 times longer than the minimum primer length."
                    .to_owned(),
            );
        }
        if !self.individual_primer_tm_range.is_valid() {
            return Some(
                "Invalid melting point range. The start value must be less than or equal to the stop value."
                    .to_owned(),
            );
        }
        if self.sodium_concentration < 0. {
            return Some("Sodium concentration must be a positive molar value.".to_owned());
        }
        if self.primer_dna_concentration < 0. {
            return Some("Primer DNA concentration must be a positive molar value.".to_owned());
        }
        if self.maximum_primer_pair_delta_tm < 0. {
            return Some(
                "The maximum melting temperature difference for a given primer pair must be positive."
                    .to_owned(),
            );
        }

        None
    }

    pub fn is_valid(&self) -> bool {
        self.validation_error().is_none()
    }

    /// The first validation failure, or an empty string when valid.
    pub fn error_message(&self) -> String {
        self.validation_error().unwrap_or_default()
    }

    pub fn micro_molar_dna_concentration(&self) -> f64 {
        self.primer_dna_concentration * 1_000_000.
    }

    pub fn milli_molar_sodium_concentration(&self) -> i32 {
        (self.sodium_concentration * 1000.) as i32
    }

    pub fn set_sodium_concentration_from_milli_moles(&mut self, milli_molar: f64) {
        self.sodium_concentration = milli_molar / 1000.;
    }

    pub fn set_primer_dna_concentration_from_micro_moles(&mut self, micro_molar: f64) {
        self.primer_dna_concentration = micro_molar / 1_000_000.;
    }
}

/// An individual primer with an optional restriction-site addition. A primer
/// with an empty core sequence is "null". Equality ignores the name, the
/// identifier, and the originating search parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Primer {
    /// Identifier for persistence round-trips only.
    pub id: i32,
    name: String,
    core_sequence: BioString,
    restriction_enzyme: RestrictionEnzyme,
    tm: f64,
    homo_dimer_score: f64,
    /// The parameters this primer was derived under, shared read-only for
    /// audit and display. Never mutated through this handle.
    #[serde(skip)]
    search_parameters: Option<Arc<PrimerSearchParameters>>,
}

impl Default for Primer {
    fn default() -> Self {
        Self::null()
    }
}

impl PartialEq for Primer {
    fn eq(&self, other: &Self) -> bool {
        self.core_sequence == other.core_sequence
            && self.restriction_enzyme == other.restriction_enzyme
            && fuzzy_eq(self.tm, other.tm)
            && fuzzy_eq(self.homo_dimer_score, other.homo_dimer_score)
    }
}

impl Primer {
    pub fn new(
        core_sequence: BioString,
        restriction_enzyme: RestrictionEnzyme,
        tm: f64,
        homo_dimer_score: f64,
        search_parameters: Option<Arc<PrimerSearchParameters>>,
    ) -> Self {
        Self {
            id: 0,
            name: String::new(),
            core_sequence,
            restriction_enzyme,
            tm,
            homo_dimer_score,
            search_parameters,
        }
    }

    /// A null primer: no core sequence defined.
    pub fn null() -> Self {
        Self {
            id: 0,
            name: String::new(),
            core_sequence: BioString::empty(Grammar::Dna),
            restriction_enzyme: RestrictionEnzyme::default(),
            tm: 0.,
            homo_dimer_score: 0.,
            search_parameters: None,
        }
    }

    pub fn is_null(&self) -> bool {
        self.core_sequence.is_empty()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_owned();
    }

    /// The primer sequence excluding any restriction-site addition.
    pub fn core_sequence(&self) -> &BioString {
        &self.core_sequence
    }

    pub fn restriction_enzyme(&self) -> &RestrictionEnzyme {
        &self.restriction_enzyme
    }

    /// Melting temperature of the full primer sequence, °C.
    pub fn tm(&self) -> f64 {
        self.tm
    }

    /// Score of this primer paired with itself.
    pub fn homo_dimer_score(&self) -> f64 {
        self.homo_dimer_score
    }

    pub fn search_parameters(&self) -> Option<&PrimerSearchParameters> {
        self.search_parameters.as_deref()
    }

    /// The full primer sequence: restriction-site addition followed by the
    /// core.
    pub fn sequence(&self) -> BioString {
        Self::assemble_sequence(&self.core_sequence, &self.restriction_enzyme)
    }

    /// Assembles site + core; shared with the factories.
    pub fn assemble_sequence(
        core_sequence: &BioString,
        restriction_enzyme: &RestrictionEnzyme,
    ) -> BioString {
        let mut sequence = restriction_enzyme.recognition_site().clone();
        sequence.append(core_sequence);
        sequence
    }

    pub fn count_core_sequence_forward_matches_in(&self, dna: &BioString) -> usize {
        assert!(dna.grammar() == Grammar::Dna, "subject must be DNA");
        dna.count(&self.core_sequence)
    }

    pub fn count_core_sequence_reverse_matches_in(&self, dna: &BioString) -> usize {
        assert!(dna.grammar() == Grammar::Dna, "subject must be DNA");
        dna.reverse_complement().count(&self.core_sequence)
    }

    /// Sum of forward and reverse matches in both strands of `dna`.
    pub fn count_core_sequence_matches_in(&self, dna: &BioString) -> usize {
        self.count_core_sequence_forward_matches_in(dna)
            + self.count_core_sequence_reverse_matches_in(dna)
    }

    pub fn core_sequence_forward_locations_in(&self, dna: &BioString) -> Vec<RangeIncl> {
        self.locations_of(dna, &self.core_sequence)
    }

    pub fn core_sequence_reverse_locations_in(&self, dna: &BioString) -> Vec<RangeIncl> {
        if self.core_sequence.is_empty() {
            return Vec::new();
        }
        self.locations_of(dna, &self.core_sequence.reverse_complement())
    }

    fn locations_of(&self, dna: &BioString, needle: &BioString) -> Vec<RangeIncl> {
        if needle.is_empty() {
            return Vec::new();
        }

        let mut matches = Vec::new();
        let mut from = 1;
        while let Some(start) = dna.index_of(needle, from) {
            matches.push(RangeIncl::new(start, start + needle.len() - 1));
            from = start + 1;
        }
        matches
    }

    /// Range of the first occurrence of the core sequence in `dna`.
    pub fn locate_core_sequence_in(&self, dna: &BioString) -> Option<RangeIncl> {
        if self.core_sequence.is_empty() {
            return None;
        }

        dna.index_of(&self.core_sequence, 1)
            .map(|start| RangeIncl::new(start, start + self.core_sequence.len() - 1))
    }

    /// Range of the first occurrence of the core's reverse complement in
    /// `dna`. Because this targets the cognate strand, the first occurrence
    /// is the right-most one.
    pub fn locate_core_sequence_in_cognate_strand(&self, dna: &BioString) -> Option<RangeIncl> {
        if self.core_sequence.is_empty() {
            return None;
        }

        dna.last_index_of(&self.core_sequence.reverse_complement())
            .map(|start| RangeIncl::new(start, start + self.core_sequence.len() - 1))
    }
}

/// A forward/reverse primer combination with its precomputed pair score.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PrimerPair {
    /// Identifier for persistence round-trips only.
    pub id: i32,
    name: String,
    forward_primer: Primer,
    reverse_primer: Primer,
    score: f64,
}

impl PartialEq for PrimerPair {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.forward_primer == other.forward_primer
            && self.reverse_primer == other.reverse_primer
            && fuzzy_eq(self.score, other.score)
    }
}

impl PrimerPair {
    pub fn new(forward_primer: Primer, reverse_primer: Primer, score: f64) -> Self {
        Self {
            id: 0,
            name: String::new(),
            forward_primer,
            reverse_primer,
            score,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_owned();
    }

    pub fn forward_primer(&self) -> &Primer {
        &self.forward_primer
    }

    pub fn reverse_primer(&self) -> &Primer {
        &self.reverse_primer
    }

    pub fn set_forward_primer_name(&mut self, name: &str) {
        self.forward_primer.set_name(name);
    }

    pub fn set_reverse_primer_name(&mut self, name: &str) {
        self.reverse_primer.set_name(name);
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn delta_tm(&self) -> f64 {
        Self::delta_tm_between(&self.forward_primer, &self.reverse_primer)
    }

    pub fn delta_tm_between(primer1: &Primer, primer2: &Primer) -> f64 {
        (primer1.tm() - primer2.tm()).abs()
    }

    pub fn locate_forward_primer_core_sequence_in(&self, dna: &BioString) -> Option<RangeIncl> {
        self.forward_primer.locate_core_sequence_in(dna)
    }

    pub fn locate_reverse_primer_core_sequence_in(&self, dna: &BioString) -> Option<RangeIncl> {
        self.reverse_primer.locate_core_sequence_in_cognate_strand(dna)
    }

    /// Length of the region bounded by the forward primer's first sense
    /// match and the reverse primer's last cognate-strand match, primers
    /// included; 0 if either primer does not bind.
    pub fn longest_amplicon_length(&self, dna: &BioString) -> usize {
        let Some(forward) = self.forward_primer.locate_core_sequence_in(dna) else {
            return 0;
        };
        let Some(reverse) = self.reverse_primer.locate_core_sequence_in_cognate_strand(dna) else {
            return 0;
        };

        RangeIncl::new(forward.start, reverse.end).len()
    }
}

/// Derives complete `Primer` value objects: assembles the full sequence,
/// computes the melting temperature when not already known, and scores the
/// homodimer. A shared parameter handle, when set, is attached to every
/// produced primer.
#[derive(Clone, Debug)]
pub struct PrimerFactory {
    sodium_concentration: f64,
    primer_dna_concentration: f64,
    primer_search_parameters: Option<Arc<PrimerSearchParameters>>,
}

impl Default for PrimerFactory {
    fn default() -> Self {
        Self {
            sodium_concentration: DEFAULT_SODIUM_MOLARITY,
            primer_dna_concentration: DEFAULT_PRIMER_DNA_MOLARITY,
            primer_search_parameters: None,
        }
    }
}

impl PrimerFactory {
    pub fn new(sodium_concentration: f64, primer_dna_concentration: f64) -> Self {
        assert!(sodium_concentration > 0., "sodium concentration must be positive");
        assert!(
            primer_dna_concentration > 0.,
            "primer DNA concentration must be positive"
        );

        Self {
            sodium_concentration,
            primer_dna_concentration,
            primer_search_parameters: None,
        }
    }

    pub fn sodium_concentration(&self) -> f64 {
        self.sodium_concentration
    }

    pub fn set_sodium_concentration(&mut self, concentration: f64) {
        assert!(concentration > 0., "sodium concentration must be positive");
        self.sodium_concentration = concentration;
    }

    pub fn primer_dna_concentration(&self) -> f64 {
        self.primer_dna_concentration
    }

    pub fn set_primer_dna_concentration(&mut self, concentration: f64) {
        assert!(concentration > 0., "primer DNA concentration must be positive");
        self.primer_dna_concentration = concentration;
    }

    pub fn set_primer_search_parameters(&mut self, parameters: Arc<PrimerSearchParameters>) {
        self.primer_search_parameters = Some(parameters);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Makes a primer, computing the melting temperature of the full
    /// sequence (site + core) from this factory's concentrations.
    pub fn make_primer(&self, core_sequence: BioString, restriction_enzyme: RestrictionEnzyme) -> Primer {
        assert!(core_sequence.only_contains_acgt(), "core sequence must be bare ACGT");

        let tm = melting_temp_calcs::melting_temperature_of(
            &Primer::assemble_sequence(&core_sequence, &restriction_enzyme),
            self.sodium_concentration,
            self.primer_dna_concentration,
        );
        self.make_primer_with_tm(core_sequence, restriction_enzyme, tm)
    }

    /// Makes a primer from an already-computed melting temperature, scoring
    /// only the homodimer.
    pub fn make_primer_with_tm(
        &self,
        core_sequence: BioString,
        restriction_enzyme: RestrictionEnzyme,
        tm: f64,
    ) -> Primer {
        assert!(core_sequence.grammar() == Grammar::Dna, "core sequence must be DNA");
        assert!(!core_sequence.has_gaps(), "core sequence must be gap-free");

        let homo_dimer_score =
            homo_dimer_score(&Primer::assemble_sequence(&core_sequence, &restriction_enzyme));

        Primer::new(
            core_sequence,
            restriction_enzyme,
            tm,
            homo_dimer_score,
            self.primer_search_parameters.clone(),
        )
    }
}

/// Combines two primers into a `PrimerPair`, scoring the pair with the
/// heterodimer score of the two full sequences. Lower scores indicate less
/// self-interference; callers rank ascending.
#[derive(Clone, Debug, Default)]
pub struct PrimerPairFactory;

impl PrimerPairFactory {
    pub fn make_primer_pair(&self, forward_primer: Primer, reverse_primer: Primer) -> PrimerPair {
        let score = dimer_score(&forward_primer.sequence(), &reverse_primer.sequence());
        PrimerPair::new(forward_primer, reverse_primer, score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::restriction_enzyme::load_re_library;

    fn dna(s: &str) -> BioString {
        BioString::new(s, Grammar::Dna)
    }

    fn valid_params() -> PrimerSearchParameters {
        PrimerSearchParameters {
            amplicon_length_range: RangeIncl::new(100, 200),
            ..Default::default()
        }
    }

    #[test]
    fn default_parameters() {
        let p = PrimerSearchParameters::default();
        assert_eq!(p.primer_length_range, RangeIncl::new(20, 25));
        assert_eq!(p.individual_primer_tm_range, RangeF::new(55., 65.));
        assert_eq!(p.maximum_primer_pair_delta_tm, 5.);
        assert_eq!(p.sodium_concentration, 0.2);
        assert_eq!(p.primer_dna_concentration, 1e-6);
        // The amplicon range starts unset, so defaults are not yet valid.
        assert!(!p.is_valid());
    }

    #[test]
    fn parameter_validation() {
        let p = valid_params();
        assert!(p.is_valid());
        assert!(p.error_message().is_empty());

        let mut p = valid_params();
        p.amplicon_length_range = RangeIncl::new(10, 5);
        assert!(!p.is_valid());
        assert!(p.error_message().contains("amplicon length range"));

        let mut p = valid_params();
        p.primer_length_range = RangeIncl::new(0, 25);
        assert!(!p.is_valid());
        assert!(p.error_message().contains("minimum primer length"));

        let mut p = valid_params();
        p.individual_primer_tm_range = RangeF::new(65., 55.);
        assert!(!p.is_valid());
        assert!(p.error_message().contains("melting point range"));

        let mut p = valid_params();
        p.sodium_concentration = -0.1;
        assert!(!p.is_valid());

        let mut p = valid_params();
        p.maximum_primer_pair_delta_tm = -1.;
        assert!(!p.is_valid());
    }

    #[test]
    fn amplicon_must_hold_two_primers() {
        let mut p = valid_params();
        p.primer_length_range = RangeIncl::new(10, 12);
        p.amplicon_length_range = RangeIncl::new(1, 15);
        assert!(!p.is_valid());
        assert!(p.error_message().contains("amplicon size"));

        p.amplicon_length_range = RangeIncl::new(1, 20);
        assert!(p.is_valid());
    }

    #[test]
    fn unit_conversions() {
        let mut p = valid_params();
        assert_eq!(p.milli_molar_sodium_concentration(), 200);
        assert!(fuzzy_eq(p.micro_molar_dna_concentration(), 1.));

        p.set_sodium_concentration_from_milli_moles(50.);
        assert!(fuzzy_eq(p.sodium_concentration, 0.05));
        p.set_primer_dna_concentration_from_micro_moles(2.5);
        assert!(fuzzy_eq(p.primer_dna_concentration, 2.5e-6));
    }

    #[test]
    fn null_primer() {
        let p = Primer::null();
        assert!(p.is_null());
        assert!(p.sequence().is_empty());
        assert!(!PrimerFactory::default()
            .make_primer_with_tm(dna("ACGTACGT"), RestrictionEnzyme::default(), 60.)
            .is_null());
    }

    #[test]
    fn sequence_includes_restriction_site() {
        let eco_ri = load_re_library()
            .into_iter()
            .find(|re| re.name() == "EcoRI")
            .unwrap();

        let factory = PrimerFactory::default();
        let primer = factory.make_primer(dna("ATGCATTGCCAGT"), eco_ri);
        assert_eq!(primer.core_sequence().as_str(), "ATGCATTGCCAGT");
        assert_eq!(primer.sequence().as_str(), "GAATTCATGCATTGCCAGT");
    }

    #[test]
    fn factory_derives_tm_and_homodimer() {
        let factory = PrimerFactory::default();
        let core = dna("AGCGGATAACAATTTCACAC");
        let primer = factory.make_primer(core.clone(), RestrictionEnzyme::default());

        let expected_tm = melting_temp_calcs::melting_temperature_of(&core, 0.2, 1e-6);
        assert!(fuzzy_eq(primer.tm(), expected_tm));
        assert!(fuzzy_eq(primer.homo_dimer_score(), homo_dimer_score(&core)));
    }

    #[test]
    fn factory_attaches_shared_parameters() {
        let mut factory = PrimerFactory::default();
        let params = Arc::new(valid_params());
        factory.set_primer_search_parameters(params.clone());

        let primer = factory.make_primer_with_tm(dna("ACGTACGTACGT"), RestrictionEnzyme::default(), 60.);
        assert!(primer.search_parameters().is_some());
        assert_eq!(
            primer.search_parameters().unwrap().amplicon_length_range,
            params.amplicon_length_range
        );

        factory.reset();
        let primer = factory.make_primer_with_tm(dna("ACGTACGTACGT"), RestrictionEnzyme::default(), 60.);
        assert!(primer.search_parameters().is_none());
    }

    #[test]
    fn primer_equality_ignores_name_and_id() {
        let factory = PrimerFactory::default();
        let mut a = factory.make_primer_with_tm(dna("ACGTACGT"), RestrictionEnzyme::default(), 60.);
        let mut b = a.clone();
        b.set_name("other");
        b.id = 42;
        assert_eq!(a, b);

        a.set_name("first");
        assert_eq!(a, b);

        let c = factory.make_primer_with_tm(dna("ACGTACGA"), RestrictionEnzyme::default(), 60.);
        assert_ne!(a, c);
    }

    #[test]
    fn match_counting_covers_both_strands() {
        let factory = PrimerFactory::default();
        let primer = factory.make_primer_with_tm(dna("GAAT"), RestrictionEnzyme::default(), 60.);

        let subject = dna("GGAATCCATTCG");
        assert_eq!(primer.count_core_sequence_forward_matches_in(&subject), 1);
        // Reverse complement of the subject contains GAAT once as well
        // (from the ATTC at positions 8..11).
        assert_eq!(primer.count_core_sequence_reverse_matches_in(&subject), 1);
        assert_eq!(primer.count_core_sequence_matches_in(&subject), 2);
    }

    #[test]
    fn locating_core_sequences() {
        let factory = PrimerFactory::default();
        let primer = factory.make_primer_with_tm(dna("ATG"), RestrictionEnzyme::default(), 60.);

        let subject = dna("CCATGATGCC");
        assert_eq!(
            primer.locate_core_sequence_in(&subject),
            Some(RangeIncl::new(3, 5))
        );
        assert_eq!(
            primer.core_sequence_forward_locations_in(&subject),
            vec![RangeIncl::new(3, 5), RangeIncl::new(6, 8)]
        );

        // Cognate strand: looks for CAT, right-most occurrence first.
        let subject = dna("CATGGCATGG");
        assert_eq!(
            primer.locate_core_sequence_in_cognate_strand(&subject),
            Some(RangeIncl::new(6, 8))
        );

        assert_eq!(Primer::null().locate_core_sequence_in(&subject), None);
    }

    #[test]
    fn pair_delta_tm_and_score() {
        let factory = PrimerFactory::default();
        let forward = factory.make_primer_with_tm(dna("ACGTACGTAC"), RestrictionEnzyme::default(), 60.);
        let reverse = factory.make_primer_with_tm(dna("TTGCATGCAA"), RestrictionEnzyme::default(), 57.5);

        let pair = PrimerPairFactory.make_primer_pair(forward.clone(), reverse.clone());
        assert!(fuzzy_eq(pair.delta_tm(), 2.5));
        assert!(fuzzy_eq(
            pair.score(),
            dimer_score(&forward.sequence(), &reverse.sequence())
        ));
        assert_eq!(pair.forward_primer(), &forward);
        assert_eq!(pair.reverse_primer(), &reverse);
    }

    #[test]
    fn longest_amplicon_length() {
        let factory = PrimerFactory::default();
        //                 fwd: ATGC at 3..6       rev core CCGG matches GGCC rc at 13..16
        let subject = dna("CCATGCAAATTTGGCCAA");
        let forward = factory.make_primer_with_tm(dna("ATGC"), RestrictionEnzyme::default(), 60.);
        let reverse = factory.make_primer_with_tm(dna("GGCC"), RestrictionEnzyme::default(), 60.);

        let pair = PrimerPairFactory.make_primer_pair(forward, reverse);
        assert_eq!(pair.longest_amplicon_length(&subject), 14);

        let unbound = PrimerPairFactory.make_primer_pair(
            factory.make_primer_with_tm(dna("TTTTTTTT"), RestrictionEnzyme::default(), 60.),
            factory.make_primer_with_tm(dna("GGCC"), RestrictionEnzyme::default(), 60.),
        );
        assert_eq!(unbound.longest_amplicon_length(&subject), 0);
    }
}
