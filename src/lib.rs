//! Primer design and biological-sequence engine.
//!
//! This crate is the computational core of a desktop sequence editor: a
//! normalized, 1-based sequence type ([`BioString`]) together with the
//! primer-pair search subsystem — nearest-neighbor melting-temperature
//! thermodynamics, dimerization scoring, IUPAC ambiguity-pattern matching,
//! and a cancelable combinatorial search over forward/reverse candidates.
//!
//! The surrounding editor (GUI, undo, persistence, BLAST ingestion) lives
//! elsewhere and talks to this crate through plain value objects: it hands
//! over a sequence, a search range and a [`PrimerSearchParameters`], and
//! receives a collection of [`PrimerPair`] to rank and display.
//!
//! ```
//! use primercad::{BioString, Grammar, PrimerPairFinder, PrimerSearchParameters, RangeIncl};
//!
//! let seq = BioString::new("ACGT".repeat(250), Grammar::Dna);
//! let params = PrimerSearchParameters {
//!     amplicon_length_range: RangeIncl::new(100, 200),
//!     ..Default::default()
//! };
//! assert!(params.is_valid());
//!
//! let finder = PrimerPairFinder::new();
//! let pairs = finder
//!     .find_primer_pairs(&seq, RangeIncl::new(1, 1000), &params)
//!     .unwrap();
//! // Every 20-25mer of this repetitive sequence binds many times, so
//! // nothing passes the uniqueness filter.
//! assert!(pairs.is_empty());
//! ```

mod bio_string;
mod dna_pattern;
mod melting_temp_calcs;
mod primer;
mod primer_metrics;
mod primer_search;
mod restriction_enzyme;
mod sequence;
mod util;

pub use bio_string::BioString;
pub use dna_pattern::DnaPattern;
pub use melting_temp_calcs::{
    enthalpy, entropy, melting_temperature, melting_temperature_of, sodium_corrected_entropy, R,
};
pub use primer::{
    Primer, PrimerFactory, PrimerPair, PrimerPairFactory, PrimerSearchParameters,
};
pub use primer_metrics::{
    dimer_score, dimer_score_from_bonds, homo_dimer_score, locate_maximum_hydrogen_bonds,
    maximum_hydrogen_bonds, PairwiseHydrogenBondCount,
};
pub use primer_search::{rank_pairs, PrimerPairFinder, SearchError};
pub use restriction_enzyme::{load_re_library, RestrictionEnzyme};
pub use sequence::{Grammar, Nucleotide};
pub use util::{RangeF, RangeIncl};
