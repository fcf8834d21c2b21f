//! Striped Smith-Waterman local alignment with affine gap penalties. The query is turned into a
//! SIMD query profile once, then aligned against any number of reference sequences, reporting
//! the best local alignment score and where it ends in both sequences. Runs on AVX2 or SSE2 on
//! x86_64, NEON on aarch64, and a portable fallback everywhere else, picked at runtime.
//!
//! Sequences are slices of residue codes `0..alphabet_size`, scored through a flattened
//! `alphabet_size * alphabet_size` substitution matrix. See [`scoring`] for turning letters
//! into codes and for the standard nucleotide and BLOSUM62 tables.
//!
//! # Example: using `build_profile` and `align`
//!
//! ```rust
//! // A, C, G, T with +5 for a match and -4 for a mismatch
//! #[rustfmt::skip]
//! let matrix = [
//!      5, -4, -4, -4,
//!     -4,  5, -4, -4,
//!     -4, -4,  5, -4,
//!     -4, -4, -4,  5,
//! ];
//!
//! let profile = ssw::build_profile(&[0, 1, 2, 3], &matrix, 4).unwrap();
//! let result = ssw::align(&profile, &[0, 1, 2, 3], 3, 1).unwrap();
//!
//! assert_eq!(result.score, 20);
//! assert_eq!((result.ref_end, result.read_end), (3, 3));
//! assert_eq!((result.ref_begin, result.read_begin), (-1, -1));
//! ```
//!
//! # Example: using `Aligner`
//!
//! Useful for when you want to align one query against more than one reference.
//!
//! ```rust
//! use ssw::{Aligner, Config, scoring::ResidueTable};
//!
//! let table = ResidueTable::nucc();
//! let query = table.encode(b"GATTACA").unwrap();
//! let references = [
//!     table.encode(b"TTGATTACAGG").unwrap(),
//!     table.encode(b"CCCCCC").unwrap(),
//! ];
//!
//! let aligner = Aligner::new(&query, table.matrix(), &Config::default()).unwrap();
//! let results = aligner.align_list(&references).unwrap();
//!
//! assert_eq!(results[0].score, 35);
//! assert_eq!(results[0].ref_end, 8);
//! assert_eq!(results[1].score, 5);
//! ```
//!
//! # Example: alignment path
//!
//! Recording directions allows walking the alignment back from its end.
//!
//! ```rust
//! use ssw::{Aligner, Config, scoring::ResidueTable, smith_waterman::Alignment};
//!
//! let table = ResidueTable::nucc();
//! let query = table.encode(b"ACGTACGT").unwrap();
//! let reference = table.encode(b"ACGTGACGT").unwrap();
//!
//! let config = Config { gap_open: 6, gap_extend: 2, traceback: true };
//! let aligner = Aligner::new(&query, table.matrix(), &config).unwrap();
//! let (result, path) = aligner.align_path(&reference).unwrap();
//!
//! assert_eq!(result.score, 32);
//! assert_eq!(result.begins(), Some((0, 0)));
//! // the extra G in the reference is skipped by a gap in the query
//! assert_eq!(path[4], Alignment::Left((3, 4)));
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod aligner;
mod r#const;
mod error;
pub mod scoring;
mod simd;
pub mod smith_waterman;

pub use aligner::{Aligner, align_list, align_residues};
pub use error::{Error, Result};
pub use r#const::{GAP_EXTEND_PENALTY, GAP_OPEN_PENALTY};
pub use scoring::ScoringMatrix;
pub use smith_waterman::{AlignmentResult, Backend, DirectionMatrix, Profile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Penalty for opening a gap. The first residue of a gap costs `gap_open + gap_extend`.
    pub gap_open: u8,
    /// Penalty for every residue of a gap
    pub gap_extend: u8,
    /// Record the direction of every cell, allowing the alignment path and its begin
    /// positions to be recovered. Costs one vector per query segment and reference residue.
    pub traceback: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            gap_open: GAP_OPEN_PENALTY,
            gap_extend: GAP_EXTEND_PENALTY,
            traceback: false,
        }
    }
}

/// Builds the striped query profile for `query`, scored by the flattened
/// `alphabet_size * alphabet_size` matrix (reference residue selects the row).
pub fn build_profile(query: &[u8], matrix: &[i8], alphabet_size: usize) -> Result<Profile> {
    if query.is_empty() {
        return Err(Error::EmptyQuery);
    }
    let matrix = ScoringMatrix::new(matrix.to_vec(), alphabet_size)?;
    Profile::new(query, &matrix)
}

/// Best local alignment of the profile's query against `reference`. Begin positions are `-1`.
pub fn align(
    profile: &Profile,
    reference: &[u8],
    gap_open: u8,
    gap_extend: u8,
) -> Result<AlignmentResult> {
    profile.align(reference, gap_open, gap_extend)
}

/// Same result as [`align`], along with the direction of every cell for traceback
pub fn align_with_directions(
    profile: &Profile,
    reference: &[u8],
    gap_open: u8,
    gap_extend: u8,
) -> Result<(AlignmentResult, DirectionMatrix)> {
    profile.align_with_directions(reference, gap_open, gap_extend)
}

/// Gives up the profile. Dropping it has the same effect.
pub fn release_profile(profile: Profile) {
    drop(profile)
}

/// Gives up the result. Dropping it has the same effect.
pub fn release_result(result: AlignmentResult) {
    drop(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rustfmt::skip]
    const DNA: [i8; 16] = [
         5, -4, -4, -4,
        -4,  5, -4, -4,
        -4, -4,  5, -4,
        -4, -4, -4,  5,
    ];

    #[test]
    fn test_exact_match() {
        let profile = build_profile(&[0, 1, 2, 3], &DNA, 4).unwrap();
        let result = align(&profile, &[0, 1, 2, 3], 3, 1).unwrap();
        assert_eq!(
            result,
            AlignmentResult {
                score: 20,
                ref_begin: -1,
                ref_end: 3,
                read_begin: -1,
                read_end: 3,
            }
        );
        release_result(result);
        release_profile(profile);
    }

    #[test]
    fn test_single_mismatch() {
        let profile = build_profile(&[0, 1, 2, 3], &DNA, 4).unwrap();
        assert_eq!(align(&profile, &[0, 1, 2, 3], 6, 2).unwrap().score, 20);

        let result = align(&profile, &[0, 1, 1, 3], 6, 2).unwrap();
        assert_eq!(result.score, 11);
        assert_eq!((result.ref_end, result.read_end), (3, 3));
    }

    #[test]
    fn test_mismatch_in_the_middle() {
        #[rustfmt::skip]
        let matrix = [
             3, -1, -1, -1,
            -1,  3, -1, -1,
            -1, -1,  3, -1,
            -1, -1, -1,  3,
        ];
        let profile = build_profile(&[0, 1, 2, 3], &matrix, 4).unwrap();
        let result = align(&profile, &[0, 1, 1, 3], 3, 1).unwrap();
        assert_eq!(result.score, 8);
        assert_eq!((result.ref_end, result.read_end), (3, 3));
    }

    #[test]
    fn test_build_profile_errors() {
        assert_eq!(build_profile(&[], &DNA, 4).unwrap_err(), Error::EmptyQuery);
        assert_eq!(
            build_profile(&[0], &DNA, 3).unwrap_err(),
            Error::MatrixDimension {
                expected: 9,
                actual: 16
            }
        );
        assert_eq!(build_profile(&[0], &[], 0).unwrap_err(), Error::EmptyAlphabet);
        assert_eq!(
            build_profile(&[0, 4], &DNA, 4).unwrap_err(),
            Error::ResidueOutOfRange {
                position: 1,
                code: 4,
                alphabet_size: 4
            }
        );
    }

    #[test]
    fn test_empty_reference() {
        let profile = build_profile(&[0, 1, 2, 3], &DNA, 4).unwrap();
        assert_eq!(align(&profile, &[], 3, 1), Err(Error::EmptyReference));
        assert!(matches!(
            align_with_directions(&profile, &[], 3, 1),
            Err(Error::EmptyReference)
        ));
    }

    #[test]
    fn test_deterministic() {
        let profile = build_profile(&[0, 1, 2, 3, 3, 2, 1, 0, 0, 1], &DNA, 4).unwrap();
        let reference = [3, 2, 0, 1, 2, 3, 3, 2, 1, 1, 0, 1, 2];
        let first = align(&profile, &reference, 4, 2).unwrap();
        for _ in 0..10 {
            assert_eq!(align(&profile, &reference, 4, 2).unwrap(), first);
        }
    }

    #[test]
    fn test_larger_gap_penalties_never_raise_score() {
        let profile = build_profile(&[0, 1, 2, 3, 0, 1, 2, 3, 0, 1, 2, 3], &DNA, 4).unwrap();
        let reference = [0, 1, 2, 2, 3, 0, 1, 0, 2, 3, 0, 1, 3, 2, 3];

        let mut previous = i16::MAX;
        for gap_open in 0..12 {
            let score = align(&profile, &reference, gap_open, 1).unwrap().score;
            assert!(score <= previous, "score rose with gap_open {gap_open}");
            previous = score;
        }

        let mut previous = i16::MAX;
        for gap_extend in 0..6 {
            let score = align(&profile, &reference, 2, gap_extend).unwrap().score;
            assert!(score <= previous, "score rose with gap_extend {gap_extend}");
            previous = score;
        }
        assert!(previous >= 20);
    }

    #[test]
    fn test_endpoints_in_range() {
        let query = [1, 3, 3, 0, 2, 1, 0, 0, 3, 2, 1, 2, 0, 3, 1, 1, 2];
        let profile = build_profile(&query, &DNA, 4).unwrap();
        for reference_len in 1..40 {
            let reference: Vec<u8> = (0..reference_len).map(|i| ((i * 7) % 4) as u8).collect();
            let result = align(&profile, &reference, 3, 1).unwrap();
            assert!(result.score >= 0);
            assert!((0..reference_len as i32).contains(&result.ref_end));
            assert!((0..query.len() as i32).contains(&result.read_end));
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.gap_open, 20);
        assert_eq!(config.gap_extend, 3);
        assert!(!config.traceback);
    }
}
