//! Primer melting temperature calculations using nearest-neighbor
//! thermodynamics: empirical enthalpy/entropy contributions for terminal
//! monomers and consecutive dimers, a sodium entropy correction, and the
//! two-state melting formula.
//!
//! Values are the unified parameters from [SantaLucia (1998)](https://pubmed.ncbi.nlm.nih.gov/9465037/),
//! identical to Allawi & SantaLucia (1997). Enthalpies are kcal/mol,
//! entropies cal/(K·mol).
//!
//! [This calculator from NorthWestern](http://biotools.nubic.northwestern.edu/OligoCalc.html) may be used
//! for QC of melting temperatures against these methods.

use crate::{
    bio_string::BioString,
    sequence::{
        Grammar,
        Nucleotide::{self, A, C, G, T},
    },
};

/// Universal gas constant (cal/(K·mol)).
pub const R: f64 = 1.987;

const ENTHALPY_SYMMETRY_CORRECTION: f64 = 0.;
const ENTROPY_SYMMETRY_CORRECTION: f64 = -1.4;

/// Enthalpy (dH) and entropy (dS) contribution of a terminal nucleotide.
fn dh_ds_terminal(nt: Nucleotide) -> (f64, f64) {
    match nt {
        A | T => (2.3, 4.1),
        C | G => (0.1, -2.8),
    }
}

/// Enthalpy (dH) and entropy (dS) contribution of one nearest-neighbor
/// dimer, read 5' -> 3' on the sense strand. Complementary dimers share a
/// value (e.g. AA/TT), but note AT and TA differ in entropy.
fn dh_ds_neighbors(neighbors: (Nucleotide, Nucleotide)) -> (f64, f64) {
    match neighbors {
        (A, A) | (T, T) => (-7.9, -22.2),
        (A, T) => (-7.2, -20.4),
        (T, A) => (-7.2, -21.3),
        (C, A) | (T, G) => (-8.5, -22.7),
        (G, T) | (A, C) => (-8.4, -22.4),
        (C, T) | (A, G) => (-7.8, -21.0),
        (G, A) | (T, C) => (-8.2, -22.2),
        (C, G) => (-10.6, -27.2),
        (G, C) => (-9.8, -24.4),
        (G, G) | (C, C) => (-8.0, -19.9),
    }
}

fn to_nucleotides(dna: &BioString) -> Vec<Nucleotide> {
    assert!(dna.grammar() == Grammar::Dna, "sequence must be DNA");
    assert!(!dna.has_gaps(), "sequence must be gap-free");

    dna.as_bytes()
        .iter()
        .map(|&ch| Nucleotide::from_u8(ch).expect("invalid nucleotide"))
        .collect()
}

/// Total enthalpy (kcal/mol) of a gap-free DNA sequence: terminal monomer
/// terms plus every consecutive dimer, with the symmetry correction when the
/// sequence is a palindrome. A single nucleotide contributes only its
/// monomer term; an empty sequence is 0.
pub fn enthalpy(dna: &BioString) -> f64 {
    nn_sum(dna, |nt| dh_ds_terminal(nt).0, |pair| dh_ds_neighbors(pair).0, ENTHALPY_SYMMETRY_CORRECTION)
}

/// Total entropy (cal/(K·mol)); same structure as `enthalpy`.
pub fn entropy(dna: &BioString) -> f64 {
    nn_sum(dna, |nt| dh_ds_terminal(nt).1, |pair| dh_ds_neighbors(pair).1, ENTROPY_SYMMETRY_CORRECTION)
}

fn nn_sum(
    dna: &BioString,
    terminal: impl Fn(Nucleotide) -> f64,
    dimer: impl Fn((Nucleotide, Nucleotide)) -> f64,
    symmetry_correction: f64,
) -> f64 {
    let nts = to_nucleotides(dna);

    match nts.len() {
        0 => 0.,
        1 => terminal(nts[0]),
        _ => {
            let mut sum = terminal(nts[0]) + terminal(*nts.last().unwrap());
            sum += nts.windows(2).map(|w| dimer((w[0], w[1]))).sum::<f64>();

            if dna.is_palindrome() {
                sum += symmetry_correction;
            }

            sum
        }
    }
}

/// Applies the sodium correction of SantaLucia (1998), eq. 7:
/// `dS + 0.368 * (N - 1) * ln[Na+]`. Only accurate above 0.1 M sodium; below
/// that a diagnostic is logged but the value is still returned.
pub fn sodium_corrected_entropy(entropy: f64, sequence_length: usize, molar_sodium: f64) -> f64 {
    assert!(sequence_length > 0, "sequence length must be positive");
    assert!(molar_sodium > 0., "sodium concentration must be positive");

    if molar_sodium <= 0.1 {
        log::warn!("entropy correction for sodium is only accurate above 0.1 M");
    }

    entropy + 0.368 * (sequence_length as f64 - 1.) * molar_sodium.ln()
}

/// Two-state melting temperature (°C) from precomputed values:
/// `1000 * dH / (dS' + R * ln(C)) - 273.15`, where the effective
/// concentration C is the primer DNA concentration for palindromic
/// sequences and half of it otherwise.
pub fn melting_temperature(
    enthalpy: f64,
    sodium_corrected_entropy: f64,
    molar_primer_dna: f64,
    is_palindrome: bool,
) -> f64 {
    assert!(molar_primer_dna > 0., "primer DNA concentration must be positive");

    let effective_concentration = if is_palindrome {
        molar_primer_dna
    } else {
        molar_primer_dna / 2.
    };

    1000. * enthalpy / (sodium_corrected_entropy + R * effective_concentration.ln()) - 273.15
}

/// Convenience composition over a raw sequence. Returns 0 for an empty
/// sequence.
pub fn melting_temperature_of(dna: &BioString, molar_sodium: f64, molar_primer_dna: f64) -> f64 {
    assert!(dna.grammar() == Grammar::Dna, "sequence must be DNA");
    assert!(!dna.has_gaps(), "sequence must be gap-free");
    assert!(molar_sodium > 0., "sodium concentration must be positive");
    assert!(molar_primer_dna > 0., "primer DNA concentration must be positive");

    if dna.is_empty() {
        return 0.;
    }

    melting_temperature(
        enthalpy(dna),
        sodium_corrected_entropy(entropy(dna), dna.len(), molar_sodium),
        molar_primer_dna,
        dna.is_palindrome(),
    )
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::util::fuzzy_eq;

    fn dna(s: &str) -> BioString {
        BioString::new(s, Grammar::Dna)
    }

    #[test]
    fn terminal_terms() {
        assert_eq!(dh_ds_terminal(A), (2.3, 4.1));
        assert_eq!(dh_ds_terminal(T), (2.3, 4.1));
        assert_eq!(dh_ds_terminal(C), (0.1, -2.8));
        assert_eq!(dh_ds_terminal(G), (0.1, -2.8));
    }

    #[test]
    fn dimer_enthalpy_table() {
        assert_eq!(dh_ds_neighbors((A, A)).0, -7.9);
        assert_eq!(dh_ds_neighbors((A, C)).0, -8.4);
        assert_eq!(dh_ds_neighbors((A, G)).0, -7.8);
        assert_eq!(dh_ds_neighbors((A, T)).0, -7.2);
        assert_eq!(dh_ds_neighbors((C, A)).0, -8.5);
        assert_eq!(dh_ds_neighbors((C, C)).0, -8.0);
        assert_eq!(dh_ds_neighbors((C, G)).0, -10.6);
        assert_eq!(dh_ds_neighbors((C, T)).0, -7.8);
        assert_eq!(dh_ds_neighbors((G, A)).0, -8.2);
        assert_eq!(dh_ds_neighbors((G, C)).0, -9.8);
        assert_eq!(dh_ds_neighbors((G, G)).0, -8.0);
        assert_eq!(dh_ds_neighbors((G, T)).0, -8.4);
        assert_eq!(dh_ds_neighbors((T, A)).0, -7.2);
        assert_eq!(dh_ds_neighbors((T, C)).0, -8.2);
        assert_eq!(dh_ds_neighbors((T, G)).0, -8.5);
        assert_eq!(dh_ds_neighbors((T, T)).0, -7.9);
    }

    #[test]
    fn dimer_entropy_table() {
        assert_eq!(dh_ds_neighbors((A, A)).1, -22.2);
        assert_eq!(dh_ds_neighbors((A, T)).1, -20.4);
        assert_eq!(dh_ds_neighbors((T, A)).1, -21.3);
        assert_eq!(dh_ds_neighbors((C, G)).1, -27.2);
        assert_eq!(dh_ds_neighbors((G, C)).1, -24.4);
        assert_eq!(dh_ds_neighbors((G, G)).1, -19.9);

        // Complementary dimers read off the same value.
        for (x, y) in [(A, A), (C, A), (G, T), (C, T), (G, A)] {
            assert_eq!(
                dh_ds_neighbors((x, y)),
                dh_ds_neighbors((y.complement(), x.complement()))
            );
        }
    }

    #[test]
    fn enthalpy_composition() {
        assert_eq!(enthalpy(&BioString::empty(Grammar::Dna)), 0.);

        for nt in Nucleotide::iter() {
            let single = dna(nt.as_str());
            assert_eq!(enthalpy(&single), dh_ds_terminal(nt).0);
            assert_eq!(entropy(&single), dh_ds_terminal(nt).1);
        }

        // Two-letter palindromes pick up the symmetry correction.
        let expected = dh_ds_terminal(A).0 + dh_ds_neighbors((A, T)).0 + dh_ds_terminal(T).0
            + ENTHALPY_SYMMETRY_CORRECTION;
        assert!(fuzzy_eq(enthalpy(&dna("AT")), expected));

        let expected = dh_ds_terminal(G).0 + dh_ds_neighbors((G, A)).0 + dh_ds_terminal(A).0;
        assert!(fuzzy_eq(enthalpy(&dna("GA")), expected));

        let expected = dh_ds_terminal(A).0
            + dh_ds_neighbors((A, G)).0
            + dh_ds_neighbors((G, C)).0
            + dh_ds_neighbors((C, G)).0
            + dh_ds_neighbors((G, G)).0
            + dh_ds_neighbors((G, A)).0
            + dh_ds_neighbors((A, T)).0
            + dh_ds_neighbors((T, A)).0
            + dh_ds_neighbors((A, A)).0
            + dh_ds_terminal(A).0;
        assert!(fuzzy_eq(enthalpy(&dna("AGCGGATAA")), expected));
    }

    #[test]
    fn entropy_composition() {
        assert_eq!(entropy(&BioString::empty(Grammar::Dna)), 0.);

        let expected = dh_ds_terminal(G).1
            + dh_ds_neighbors((G, A)).1
            + dh_ds_neighbors((A, A)).1
            + dh_ds_neighbors((A, T)).1
            + dh_ds_neighbors((T, T)).1
            + dh_ds_neighbors((T, C)).1
            + dh_ds_terminal(C).1
            + ENTROPY_SYMMETRY_CORRECTION; // GAATTC is palindromic
        assert!(fuzzy_eq(entropy(&dna("GAATTC")), expected));
    }

    #[test]
    fn sodium_correction() {
        let ds = -100.;
        assert!(fuzzy_eq(
            sodium_corrected_entropy(ds, 10, 1.),
            ds // ln(1) = 0
        ));
        assert!(fuzzy_eq(
            sodium_corrected_entropy(ds, 21, 0.2),
            ds + 0.368 * 20. * 0.2_f64.ln()
        ));
        // Length one: no correction regardless of concentration.
        assert!(fuzzy_eq(sodium_corrected_entropy(ds, 1, 0.2), ds));
    }

    #[test]
    fn melting_temperature_formula() {
        // Direct closed-form substitution across a grid, palindromic and not.
        for dh in [-50., -80., -120.] {
            for ds in [-150., -220.] {
                for conc in [1e-7, 1e-6, 1e-5] {
                    let expected_half =
                        1000. * dh / (ds + R * (conc / 2.0_f64).ln()) - 273.15;
                    assert!(fuzzy_eq(
                        melting_temperature(dh, ds, conc, false),
                        expected_half
                    ));

                    let expected_full = 1000. * dh / (ds + R * conc.ln()) - 273.15;
                    assert!(fuzzy_eq(
                        melting_temperature(dh, ds, conc, true),
                        expected_full
                    ));
                }
            }
        }
    }

    #[test]
    fn melting_temperature_of_sequence() {
        assert_eq!(
            melting_temperature_of(&BioString::empty(Grammar::Dna), 0.2, 1e-6),
            0.
        );

        let seq = dna("AGCGGATAACAATTTCACACAGGA");
        let expected = melting_temperature(
            enthalpy(&seq),
            sodium_corrected_entropy(entropy(&seq), seq.len(), 0.2),
            1e-6,
            false,
        );
        assert!(fuzzy_eq(melting_temperature_of(&seq, 0.2, 1e-6), expected));

        // A typical mid-GC 24-mer lands in a physically plausible window.
        assert!(expected > 40. && expected < 90.);

        // Palindromic input takes the unhalved concentration path.
        let pal = dna("GGGAATTCCC");
        assert!(pal.is_palindrome());
        let expected = melting_temperature(
            enthalpy(&pal),
            sodium_corrected_entropy(entropy(&pal), pal.len(), 0.2),
            1e-6,
            true,
        );
        assert!(fuzzy_eq(melting_temperature_of(&pal, 0.2, 1e-6), expected));
    }

    #[test]
    fn case_insensitive_input() {
        assert!(fuzzy_eq(
            enthalpy(&dna("acgt")),
            enthalpy(&dna("ACGT"))
        ));
    }
}
