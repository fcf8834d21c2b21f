//! Substitution scores between residue codes.
//!
//! Sequences handed to the aligner are already encoded: every residue is a small integer
//! `0..alphabet_size`. A [`ScoringMatrix`] is the flattened `alphabet_size * alphabet_size`
//! table of scores between those codes, with the reference residue selecting the row and
//! the query residue selecting the column.
//!
//! [`ResidueTable`] carries the standard IUPAC nucleotide and BLOSUM62 tables keyed by
//! residue letters, and [`ResidueEncoder`] turns raw letters into compact codes.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::r#const::MAX_ALPHABET_SIZE;

mod encoder;
mod tables;

pub use encoder::ResidueEncoder;
pub use tables::ResidueTable;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScoringMatrix {
    values: Vec<i8>,
    alphabet_size: usize,
}

impl ScoringMatrix {
    /// Takes ownership of a row-major `alphabet_size * alphabet_size` table
    pub fn new(values: Vec<i8>, alphabet_size: usize) -> Result<Self> {
        if alphabet_size == 0 {
            return Err(Error::EmptyAlphabet);
        }
        if alphabet_size > MAX_ALPHABET_SIZE {
            return Err(Error::AlphabetTooLarge {
                size: alphabet_size,
            });
        }

        let expected = alphabet_size * alphabet_size;
        if values.len() != expected {
            return Err(Error::MatrixDimension {
                expected,
                actual: values.len(),
            });
        }

        Ok(Self {
            values,
            alphabet_size,
        })
    }

    /// Narrows wider scores, failing on the first one outside the `i8` range
    pub fn from_i32(values: &[i32], alphabet_size: usize) -> Result<Self> {
        let values = values
            .iter()
            .map(|&score| i8::try_from(score).map_err(|_| Error::ScoreOutOfRange { score }))
            .collect::<Result<Vec<_>>>()?;
        Self::new(values, alphabet_size)
    }

    /// Uniform table: `match_score` on the diagonal, `mismatch_score` everywhere else
    pub fn match_mismatch(alphabet_size: usize, match_score: i8, mismatch_score: i8) -> Result<Self> {
        let values = (0..alphabet_size * alphabet_size)
            .map(|i| {
                if i / alphabet_size == i % alphabet_size {
                    match_score
                } else {
                    mismatch_score
                }
            })
            .collect();
        Self::new(values, alphabet_size)
    }

    pub fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }

    /// Score for aligning the reference residue `reference` against the query residue `query`.
    /// Both codes must be below the alphabet size.
    #[inline(always)]
    pub fn score(&self, reference: u8, query: u8) -> i8 {
        self.values[reference as usize * self.alphabet_size + query as usize]
    }

    pub fn as_slice(&self) -> &[i8] {
        &self.values
    }

    /// Checks that every code of `sequence` addresses a row of this matrix
    pub(crate) fn validate_codes(&self, sequence: &[u8]) -> Result<()> {
        validate_codes(sequence, self.alphabet_size)
    }
}

pub(crate) fn validate_codes(sequence: &[u8], alphabet_size: usize) -> Result<()> {
    match sequence
        .iter()
        .position(|&code| code as usize >= alphabet_size)
    {
        Some(position) => Err(Error::ResidueOutOfRange {
            position,
            code: sequence[position],
            alphabet_size,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_wrong_dimension() {
        assert_eq!(
            ScoringMatrix::new(vec![0; 15], 4),
            Err(Error::MatrixDimension {
                expected: 16,
                actual: 15
            })
        );
        assert_eq!(ScoringMatrix::new(vec![], 0), Err(Error::EmptyAlphabet));
        assert_eq!(
            ScoringMatrix::new(vec![0; 257 * 257], 257),
            Err(Error::AlphabetTooLarge { size: 257 })
        );
    }

    #[test]
    fn test_score_is_row_major_by_reference() {
        #[rustfmt::skip]
        let matrix = ScoringMatrix::new(vec![
            1, 2,
            3, 4,
        ], 2).unwrap();

        assert_eq!(matrix.score(0, 1), 2);
        assert_eq!(matrix.score(1, 0), 3);
        assert_eq!(matrix.alphabet_size(), 2);
    }

    #[test]
    fn test_match_mismatch() {
        let matrix = ScoringMatrix::match_mismatch(4, 5, -4).unwrap();
        for a in 0..4 {
            for b in 0..4 {
                assert_eq!(matrix.score(a, b), if a == b { 5 } else { -4 });
            }
        }
    }

    #[test]
    fn test_from_i32_range() {
        let matrix = ScoringMatrix::from_i32(&[127, -128, 0, 1], 2).unwrap();
        assert_eq!(matrix.as_slice(), &[127, -128, 0, 1]);

        assert_eq!(
            ScoringMatrix::from_i32(&[1, 2, 300, 4], 2),
            Err(Error::ScoreOutOfRange { score: 300 })
        );
    }

    #[test]
    fn test_validate_codes() {
        let matrix = ScoringMatrix::match_mismatch(4, 2, -1).unwrap();
        assert!(matrix.validate_codes(&[0, 1, 2, 3]).is_ok());
        assert_eq!(
            matrix.validate_codes(&[0, 1, 4, 9]),
            Err(Error::ResidueOutOfRange {
                position: 2,
                code: 4,
                alphabet_size: 4
            })
        );
    }
}
