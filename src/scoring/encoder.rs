use super::{ResidueTable, ScoringMatrix};
use crate::error::{Error, Result};

/// Assigns compact residue codes in order of first appearance.
///
/// Encoding the query and the reference through the same encoder yields the smallest alphabet
/// covering both, which keeps the query profile small. [`ResidueEncoder::flatten`] then builds
/// the matching scoring matrix from a full [`ResidueTable`].
///
/// ```rust
/// use ssw::scoring::{ResidueEncoder, ResidueTable};
///
/// let mut encoder = ResidueEncoder::new();
/// let read = encoder.encode(b"GATTACA");
/// let reference = encoder.encode(b"TAGC");
///
/// assert_eq!(read, vec![0, 1, 2, 2, 1, 3, 1]);
/// assert_eq!(reference, vec![2, 1, 0, 3]);
///
/// let matrix = encoder.flatten(ResidueTable::nucc()).unwrap();
/// assert_eq!(matrix.alphabet_size(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct ResidueEncoder {
    codes: [Option<u8>; 256],
    residues: Vec<u8>,
}

impl Default for ResidueEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResidueEncoder {
    pub fn new() -> Self {
        Self {
            codes: [None; 256],
            residues: Vec::new(),
        }
    }

    pub fn encode(&mut self, sequence: &[u8]) -> Vec<u8> {
        sequence
            .iter()
            .map(|&residue| match self.codes[residue as usize] {
                Some(code) => code,
                None => {
                    // at most 256 distinct bytes, so the code always fits
                    let code = self.residues.len() as u8;
                    self.codes[residue as usize] = Some(code);
                    self.residues.push(residue);
                    code
                }
            })
            .collect()
    }

    pub fn alphabet_size(&self) -> usize {
        self.residues.len()
    }

    /// Residues seen so far, indexed by their code
    pub fn residues(&self) -> &[u8] {
        &self.residues
    }

    /// Builds the scoring matrix over the codes handed out so far
    pub fn flatten(&self, table: &ResidueTable) -> Result<ScoringMatrix> {
        let codes = self
            .residues
            .iter()
            .map(|&residue| {
                table.code(residue).ok_or(Error::UnknownResidue {
                    residue: residue as char,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let values = codes
            .iter()
            .flat_map(|&reference| {
                codes
                    .iter()
                    .map(move |&query| table.matrix().score(reference, query))
            })
            .collect();
        ScoringMatrix::new(values, codes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_shared_across_sequences() {
        let mut encoder = ResidueEncoder::new();
        assert_eq!(encoder.encode(b"ACGT"), vec![0, 1, 2, 3]);
        assert_eq!(encoder.encode(b"TTAN"), vec![3, 3, 0, 4]);
        assert_eq!(encoder.residues(), b"ACGTN");
        assert_eq!(encoder.alphabet_size(), 5);
    }

    #[test]
    fn test_flatten_follows_first_appearance() {
        let mut encoder = ResidueEncoder::new();
        encoder.encode(b"WC");

        let matrix = encoder.flatten(ResidueTable::blosum62()).unwrap();
        assert_eq!(matrix.as_slice(), &[11, -2, -2, 9]);
    }

    #[test]
    fn test_flatten_unknown_residue() {
        let mut encoder = ResidueEncoder::new();
        encoder.encode(b"ACGU");
        assert_eq!(
            encoder.flatten(ResidueTable::nucc()),
            Err(Error::UnknownResidue { residue: 'U' })
        );
    }

    #[test]
    fn test_empty_encoder_has_no_matrix() {
        let encoder = ResidueEncoder::default();
        assert_eq!(
            encoder.flatten(ResidueTable::nucc()),
            Err(Error::EmptyAlphabet)
        );
    }
}
