//! The combinatorial primer-pair search.
//!
//! Given a gap-free DNA sequence, a 1-based search range and a validated
//! parameter bundle, `PrimerPairFinder` partitions the range into maximal
//! runs of unambiguous bases, enumerates candidate primers on both strands
//! filtered by 3' terminal pattern, melting temperature and
//! genome-uniqueness, then pairs forward and reverse candidates under ΔTm,
//! amplicon-size and non-overlap constraints. Surviving pairs are
//! materialized through the factories, which compute the dimer scores.
//!
//! Searches over long sequences run for seconds to minutes, so the finder is
//! meant to live on a worker thread; `cancel` may be called from any other
//! thread and is observed at every loop nesting level. Cancellation is
//! one-shot: a canceled finder returns an empty result and stays canceled,
//! so restart with a fresh finder rather than resuming.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use itertools::Itertools;
use thiserror::Error;

use crate::{
    bio_string::BioString,
    dna_pattern::DnaPattern,
    melting_temp_calcs,
    primer::{PrimerFactory, PrimerPair, PrimerPairFactory, PrimerSearchParameters},
    restriction_enzyme::RestrictionEnzyme,
    sequence::{is_acgt, Grammar},
    util::RangeIncl,
};

/// Input validation failures reported by `find_primer_pairs`. A legitimately
/// empty result (no ACGT runs, no compatible primers or pairs) is a normal
/// outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("sequence must have DNA grammar")]
    NotDna,
    #[error("sequence must be gap-free")]
    GappedSequence,
    #[error("search range is not within the sequence bounds")]
    InvalidRange,
    #[error("invalid search parameters: {0}")]
    InvalidParameters(String),
    #[error("the maximum amplicon length does not fit within the search range")]
    AmpliconExceedsSearchRange,
}

/// A surviving (temperature, location) candidate. Restriction sites and
/// scores are not materialized until pairing succeeds, to bound memory
/// during enumeration.
#[derive(Clone, Copy, Debug)]
struct LitePrimer {
    tm: f64,
    location: RangeIncl,
}

#[derive(Debug, Default)]
pub struct PrimerPairFinder {
    canceled: AtomicBool,
}

impl PrimerPairFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that a running search stop at its next checkpoint. Safe to
    /// call from any thread; the flag is never reset.
    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::Relaxed);
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::Relaxed)
    }

    /// Runs the search synchronously and returns all compatible pairs,
    /// unordered. Ranking and truncation are the caller's concern. A search
    /// canceled at any point returns an empty collection.
    pub fn find_primer_pairs(
        &self,
        dna: &BioString,
        range: RangeIncl,
        parameters: &PrimerSearchParameters,
    ) -> Result<Vec<PrimerPair>, SearchError> {
        if dna.grammar() != Grammar::Dna {
            return Err(SearchError::NotDna);
        }
        if dna.has_gaps() {
            return Err(SearchError::GappedSequence);
        }
        if !dna.is_valid_range(range) {
            return Err(SearchError::InvalidRange);
        }
        if let Some(message) = parameters.validation_error() {
            return Err(SearchError::InvalidParameters(message));
        }
        // The entire amplicon range must fit within the requested range.
        if parameters.amplicon_length_range.end > range.len() {
            return Err(SearchError::AmpliconExceedsSearchRange);
        }

        let acgt_ranges = find_acgt_ranges_within(dna, range);
        if acgt_ranges.is_empty() {
            return Ok(Vec::new());
        }

        let abs_max_primer_start = absolute_max_primer_start(range, parameters);
        let mut forward_lite_primers = Vec::new();
        let mut reverse_lite_primers = Vec::new();

        let reverse_complement = dna.reverse_complement();
        for acgt_range in &acgt_ranges {
            // Runs shorter than the smallest primer cannot yield candidates.
            if acgt_range.len() < parameters.primer_length_range.start {
                continue;
            }

            forward_lite_primers.extend(self.find_compatible_lite_primers(
                dna,
                *acgt_range,
                abs_max_primer_start,
                &parameters.forward_restriction_enzyme,
                &parameters.forward_terminal_pattern,
                parameters,
            ));

            // Invert the range for the reverse direction.
            let reverse_range = RangeIncl::new(
                dna.len() - acgt_range.end + 1,
                dna.len() - acgt_range.start + 1,
            );
            reverse_lite_primers.extend(self.find_compatible_lite_primers(
                &reverse_complement,
                reverse_range,
                abs_max_primer_start,
                &parameters.reverse_restriction_enzyme,
                &parameters.reverse_terminal_pattern,
                parameters,
            ));

            if self.is_canceled() {
                return Ok(Vec::new());
            }
        }

        if forward_lite_primers.is_empty() || reverse_lite_primers.is_empty() {
            return Ok(Vec::new());
        }

        self.find_compatible_primer_pairs(
            &forward_lite_primers,
            &reverse_lite_primers,
            dna,
            parameters,
        )
    }

    /// Enumerates candidates within `range` of `dna`, which must already be
    /// oriented 5' -> 3' (the caller passes the reverse complement with an
    /// inverted range for the reverse strand). Only `dna.mid(range)` is
    /// searched for candidates, but uniqueness is checked against the whole
    /// of both strands to rule out ambiguous binding.
    fn find_compatible_lite_primers(
        &self,
        dna: &BioString,
        range: RangeIncl,
        absolute_max_primer_start: usize,
        restriction_enzyme: &RestrictionEnzyme,
        terminal_pattern: &DnaPattern,
        parameters: &PrimerSearchParameters,
    ) -> Vec<LitePrimer> {
        let full_rc = dna.reverse_complement();
        let search_string = dna.mid(range);

        // Amount to add to a candidate's positions to map them back onto the
        // original sequence coordinates.
        let translation = range.start - 1;

        let site = restriction_enzyme.recognition_site();
        let has_end_pattern = !terminal_pattern.is_empty();

        let mut compatible = Vec::new();
        let mut primer_seq = Vec::with_capacity(site.len() + parameters.primer_length_range.end);

        for primer_length in
            parameters.primer_length_range.start..=parameters.primer_length_range.end
        {
            if self.is_canceled() {
                return compatible;
            }

            let local_max_primer_start =
                absolute_max_primer_start.min(range.len().saturating_sub(primer_length));

            for j in 1..=local_max_primer_start {
                if self.is_canceled() {
                    return compatible;
                }

                primer_seq.clear();
                primer_seq.extend_from_slice(site.as_bytes());
                primer_seq.extend_from_slice(&search_string.as_bytes()[j - 1..j - 1 + primer_length]);

                let primer_string = BioString::new(&primer_seq, Grammar::Dna);

                if has_end_pattern && !terminal_pattern.matches_at_end(&primer_string) {
                    continue;
                }

                let tm = melting_temp_calcs::melting_temperature_of(
                    &primer_string,
                    parameters.sodium_concentration,
                    parameters.primer_dna_concentration,
                );
                if !parameters.individual_primer_tm_range.contains(tm) {
                    continue;
                }

                // The bare core sequence must occur exactly once across both
                // strands of the full sequence.
                let core = primer_string.mid(RangeIncl::new(site.len() + 1, primer_string.len()));
                if dna.count(&core) + full_rc.count(&core) != 1 {
                    continue;
                }

                compatible.push(LitePrimer {
                    tm,
                    location: RangeIncl::new(
                        j + translation,
                        j + primer_length - 1 + translation,
                    ),
                });
            }
        }

        compatible
    }

    /// Pairs every forward candidate with every reverse candidate and
    /// materializes the survivors. The reverse candidates' coordinates are
    /// relative to the reverse complement and are normalized here.
    fn find_compatible_primer_pairs(
        &self,
        forward_primers: &[LitePrimer],
        reverse_primers: &[LitePrimer],
        dna: &BioString,
        parameters: &PrimerSearchParameters,
    ) -> Result<Vec<PrimerPair>, SearchError> {
        let mut primer_factory = PrimerFactory::new(
            parameters.sodium_concentration,
            parameters.primer_dna_concentration,
        );
        primer_factory.set_primer_search_parameters(Arc::new(parameters.clone()));
        let primer_pair_factory = PrimerPairFactory;

        let mut compatible_pairs = Vec::new();
        for (forward, reverse) in forward_primers.iter().cartesian_product(reverse_primers) {
            if self.is_canceled() {
                return Ok(Vec::new());
            }

            // Check 1: is the difference in melting temperatures acceptable?
            let delta_tm = (forward.tm - reverse.tm).abs();
            if delta_tm > parameters.maximum_primer_pair_delta_tm {
                continue;
            }

            // Normalize the reverse primer's location onto the sense strand.
            let reverse_sense_location = RangeIncl::new(
                dna.len() - reverse.location.end + 1,
                dna.len() - reverse.location.start + 1,
            );

            // Check 2: do the primers amplify a region within the acceptable
            // size range? A reverse footprint left of the forward primer
            // makes no amplicon at all.
            if reverse_sense_location.end < forward.location.start {
                continue;
            }
            let amplicon_size = reverse_sense_location.end - forward.location.start + 1;
            if !parameters.amplicon_length_range.contains(amplicon_size) {
                continue;
            }

            // Check 3: do the primer footprints overlap?
            if forward.location.end >= reverse_sense_location.start {
                continue;
            }

            let forward_sequence = dna.mid(forward.location);
            let reverse_sequence = dna.mid(reverse_sense_location).reverse_complement();
            let forward_primer = primer_factory.make_primer_with_tm(
                forward_sequence,
                parameters.forward_restriction_enzyme.clone(),
                forward.tm,
            );
            let reverse_primer = primer_factory.make_primer_with_tm(
                reverse_sequence,
                parameters.reverse_restriction_enzyme.clone(),
                reverse.tm,
            );
            compatible_pairs.push(primer_pair_factory.make_primer_pair(forward_primer, reverse_primer));
        }

        Ok(compatible_pairs)
    }
}

/// Splits `range` into maximal contiguous runs of unambiguous (A/C/G/T)
/// bases.
fn find_acgt_ranges_within(dna: &BioString, range: RangeIncl) -> Vec<RangeIncl> {
    let mut acgt_ranges: Vec<RangeIncl> = Vec::new();

    for i in range.start..=range.end {
        if !is_acgt(dna.at(i)) {
            continue;
        }

        match acgt_ranges.last_mut() {
            Some(last) if last.end + 1 == i => last.end = i,
            _ => acgt_ranges.push(RangeIncl::new(i, i)),
        }
    }

    acgt_ranges
}

/// The last start position, relative to the search range, from which the
/// smallest acceptable amplicon still fits.
fn absolute_max_primer_start(range: RangeIncl, parameters: &PrimerSearchParameters) -> usize {
    range.len() - parameters.amplicon_length_range.start + 1
}

/// Ranks pairs the way host code conventionally consumes them: ascending by
/// pair score, so the least dimer-prone combinations come first. The finder
/// itself never orders or truncates its results.
pub fn rank_pairs(mut pairs: Vec<PrimerPair>) -> Vec<PrimerPair> {
    pairs.sort_by(|a, b| a.score().total_cmp(&b.score()));
    pairs
}
