//! Alphabet fundamentals: the grammar tag attached to every sequence, the
//! DNA nucleotide enum backing the thermodynamic tables, and gap/complement
//! helpers shared by the string and search modules.

use bincode::{Decode, Encode};
use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

/// The alphabet/domain a sequence belongs to. Most operations assert grammar
/// compatibility; complement and transcription are DNA/RNA-specific.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Encode, Decode, Serialize, Deserialize)]
pub enum Grammar {
    #[default]
    Unknown,
    Dna,
    Rna,
    Amino,
}

/// A DNA nucleotide.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Debug, Encode, Decode, Serialize, Deserialize, EnumIter,
    TryFromPrimitive,
)]
#[repr(u8)]
pub enum Nucleotide {
    A = b'A',
    C = b'C',
    G = b'G',
    T = b'T',
}

impl Nucleotide {
    /// Case-insensitive conversion from a raw sequence byte.
    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            b'A' | b'a' => Some(Self::A),
            b'C' | b'c' => Some(Self::C),
            b'G' | b'g' => Some(Self::G),
            b'T' | b't' => Some(Self::T),
            _ => None,
        }
    }

    pub fn complement(self) -> Self {
        match self {
            Self::A => Self::T,
            Self::T => Self::A,
            Self::C => Self::G,
            Self::G => Self::C,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::A => "A",
            Self::C => "C",
            Self::G => "G",
            Self::T => "T",
        }
    }
}

/// A gap is `-` or `.`, representing an alignment gap rather than a residue.
pub fn is_gap_char(ch: u8) -> bool {
    ch == b'-' || ch == b'.'
}

pub fn is_acgt(ch: u8) -> bool {
    matches!(ch, b'A' | b'C' | b'G' | b'T')
}

/// IUPAC complement for a single byte, case preserved. Bases and the
/// two-way/three-way ambiguity letters with distinct complements are
/// translated (A↔T, C↔G, B↔V, D↔H, K↔M); everything else, gaps included,
/// passes through.
///
/// Source: http://www.chem.qmul.ac.uk/iubmb/misc/naseq.html
pub fn complement_byte(ch: u8) -> u8 {
    const QUERY: &[u8] = b"ABCDGHKMTVabcdghkmtv";
    const REPLACEMENT: &[u8] = b"TVGHCDMKABtvghcdmkab";

    match QUERY.iter().position(|&q| q == ch) {
        Some(i) => REPLACEMENT[i],
        None => ch,
    }
}
