use std::sync::LazyLock;

use super::ScoringMatrix;
use crate::error::{Error, Result};

const NUCC_RESIDUES: &[u8; 15] = b"ATGCSWRYKMBVHDN";

/// IUPAC nucleotide scores (NUC.4.4)
#[rustfmt::skip]
const NUCC_SCORES: [[i8; 15]; 15] = [
    // A   T   G   C   S   W   R   Y   K   M   B   V   H   D   N
    [  5, -4, -4, -4, -4,  1,  1, -4, -4,  1, -4, -1, -1, -1, -2], // A
    [ -4,  5, -4, -4, -4,  1, -4,  1,  1, -4, -1, -4, -1, -1, -2], // T
    [ -4, -4,  5, -4,  1, -4,  1, -4,  1, -4, -1, -1, -4, -1, -2], // G
    [ -4, -4, -4,  5,  1, -4, -4,  1, -4,  1, -1, -1, -1, -4, -2], // C
    [ -4, -4,  1,  1, -1, -4, -2, -2, -2, -2, -1, -1, -3, -3, -1], // S
    [  1,  1, -4, -4, -4, -1, -2, -2, -2, -2, -3, -3, -1, -1, -1], // W
    [  1, -4,  1, -4, -2, -2, -1, -4, -2, -2, -3, -1, -3, -1, -1], // R
    [ -4,  1, -4,  1, -2, -2, -4, -1, -2, -2, -1, -3, -1, -3, -1], // Y
    [ -4,  1,  1, -4, -2, -2, -2, -2, -1, -4, -1, -3, -3, -1, -1], // K
    [  1, -4, -4,  1, -2, -2, -2, -2, -4, -1, -3, -1, -1, -3, -1], // M
    [ -4, -1, -1, -1, -1, -3, -3, -1, -1, -3, -1, -2, -2, -2, -1], // B
    [ -1, -4, -1, -1, -1, -3, -1, -3, -3, -1, -2, -1, -2, -2, -1], // V
    [ -1, -1, -4, -1, -3, -1, -3, -1, -3, -1, -2, -2, -1, -2, -1], // H
    [ -1, -1, -1, -4, -3, -1, -1, -3, -1, -3, -2, -2, -2, -1, -1], // D
    [ -2, -2, -2, -2, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1], // N
];

const BLOSUM62_RESIDUES: &[u8; 24] = b"ARNDCQEGHILKMFPSTWYVBZX*";

#[rustfmt::skip]
const BLOSUM62_SCORES: [[i8; 24]; 24] = [
    // A   R   N   D   C   Q   E   G   H   I   L   K   M   F   P   S   T   W   Y   V   B   Z   X   *
    [  4, -1, -2, -2,  0, -1, -1,  0, -2, -1, -1, -1, -1, -2, -1,  1,  0, -3, -2,  0, -2, -1,  0, -4], // A
    [ -1,  5,  0, -2, -3,  1,  0, -2,  0, -3, -2,  2, -1, -3, -2, -1, -1, -3, -2, -3, -1,  0, -1, -4], // R
    [ -2,  0,  6,  1, -3,  0,  0,  0,  1, -3, -3,  0, -2, -3, -2,  1,  0, -4, -2, -3,  3,  0, -1, -4], // N
    [ -2, -2,  1,  6, -3,  0,  2, -1, -1, -3, -4, -1, -3, -3, -1,  0, -1, -4, -3, -3,  4,  1, -1, -4], // D
    [  0, -3, -3, -3,  9, -3, -4, -3, -3, -1, -1, -3, -1, -2, -3, -1, -1, -2, -2, -1, -3, -3, -2, -4], // C
    [ -1,  1,  0,  0, -3,  5,  2, -2,  0, -3, -2,  1,  0, -3, -1,  0, -1, -2, -1, -2,  0,  3, -1, -4], // Q
    [ -1,  0,  0,  2, -4,  2,  5, -2,  0, -3, -3,  1, -2, -3, -1,  0, -1, -3, -2, -2,  1,  4, -1, -4], // E
    [  0, -2,  0, -1, -3, -2, -2,  6, -2, -4, -4, -2, -3, -3, -2,  0, -2, -2, -3, -3, -1, -2, -1, -4], // G
    [ -2,  0,  1, -1, -3,  0,  0, -2,  8, -3, -3, -1, -2, -1, -2, -1, -2, -2,  2, -3,  0,  0, -1, -4], // H
    [ -1, -3, -3, -3, -1, -3, -3, -4, -3,  4,  2, -3,  1,  0, -3, -2, -1, -3, -1,  3, -3, -3, -1, -4], // I
    [ -1, -2, -3, -4, -1, -2, -3, -4, -3,  2,  4, -2,  2,  0, -3, -2, -1, -2, -1,  1, -4, -3, -1, -4], // L
    [ -1,  2,  0, -1, -3,  1,  1, -2, -1, -3, -2,  5, -1, -3, -1,  0, -1, -3, -2, -2,  0,  1, -1, -4], // K
    [ -1, -1, -2, -3, -1,  0, -2, -3, -2,  1,  2, -1,  5,  0, -2, -1, -1, -1, -1,  1, -3, -1, -1, -4], // M
    [ -2, -3, -3, -3, -2, -3, -3, -3, -1,  0,  0, -3,  0,  6, -4, -2, -2,  1,  3, -1, -3, -3, -1, -4], // F
    [ -1, -2, -2, -1, -3, -1, -1, -2, -2, -3, -3, -1, -2, -4,  7, -1, -1, -4, -3, -2, -2, -1, -2, -4], // P
    [  1, -1,  1,  0, -1,  0,  0,  0, -1, -2, -2,  0, -1, -2, -1,  4,  1, -3, -2, -2,  0,  0,  0, -4], // S
    [  0, -1,  0, -1, -1, -1, -1, -2, -2, -1, -1, -1, -1, -2, -1,  1,  5, -2, -2,  0, -1, -1,  0, -4], // T
    [ -3, -3, -4, -4, -2, -2, -3, -2, -2, -3, -2, -3, -1,  1, -4, -3, -2, 11,  2, -3, -4, -3, -2, -4], // W
    [ -2, -2, -2, -3, -2, -1, -2, -3,  2, -1, -1, -2, -1,  3, -3, -2, -2,  2,  7, -1, -3, -2, -1, -4], // Y
    [  0, -3, -3, -3, -1, -2, -2, -3, -3,  3,  1, -2,  1, -1, -2, -2,  0, -3, -1,  4, -3, -2, -1, -4], // V
    [ -2, -1,  3,  4, -3,  0,  1, -1,  0, -3, -4,  0, -3, -3, -2,  0, -1, -4, -3, -3,  4,  1, -1, -4], // B
    [ -1,  0,  0,  1, -3,  3,  4, -2,  0, -3, -3,  1, -1, -3, -1,  0, -1, -3, -2, -2,  1,  4, -1, -4], // Z
    [  0, -1, -1, -1, -2, -1, -1, -1, -1, -1, -1, -1, -1, -1, -2,  0,  0, -2, -1, -1, -1, -1, -1, -4], // X
    [ -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4,  1], // *
];

static NUCC: LazyLock<ResidueTable> =
    LazyLock::new(|| ResidueTable::build("NUC.4.4", NUCC_RESIDUES, NUCC_SCORES.as_flattened()));

static BLOSUM62: LazyLock<ResidueTable> = LazyLock::new(|| {
    ResidueTable::build("BLOSUM62", BLOSUM62_RESIDUES, BLOSUM62_SCORES.as_flattened())
});

/// Substitution table keyed by residue letters. Lookups are case-insensitive.
///
/// The table's own residue order doubles as an encoding: [`ResidueTable::encode`] maps each
/// letter to its row, so the encoded sequences can be aligned against
/// [`ResidueTable::matrix`] directly.
#[derive(Debug)]
pub struct ResidueTable {
    name: &'static str,
    residues: &'static [u8],
    codes: [Option<u8>; 256],
    matrix: ScoringMatrix,
}

impl ResidueTable {
    fn build(name: &'static str, residues: &'static [u8], scores: &[i8]) -> Self {
        let mut codes = [None; 256];
        for (code, &residue) in residues.iter().enumerate() {
            codes[residue.to_ascii_uppercase() as usize] = Some(code as u8);
            codes[residue.to_ascii_lowercase() as usize] = Some(code as u8);
        }

        Self {
            name,
            residues,
            codes,
            matrix: ScoringMatrix {
                values: scores.to_vec(),
                alphabet_size: residues.len(),
            },
        }
    }

    /// IUPAC nucleotide table, including ambiguity codes
    pub fn nucc() -> &'static Self {
        &NUCC
    }

    pub fn blosum62() -> &'static Self {
        &BLOSUM62
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Residue letters in row order
    pub fn residues(&self) -> &'static [u8] {
        self.residues
    }

    pub fn matrix(&self) -> &ScoringMatrix {
        &self.matrix
    }

    pub fn code(&self, residue: u8) -> Option<u8> {
        self.codes[residue as usize]
    }

    pub fn score(&self, reference: u8, query: u8) -> Option<i8> {
        Some(self.matrix.score(self.code(reference)?, self.code(query)?))
    }

    /// Maps every letter to its row in this table
    pub fn encode(&self, sequence: &[u8]) -> Result<Vec<u8>> {
        sequence
            .iter()
            .map(|&residue| {
                self.code(residue).ok_or(Error::UnknownResidue {
                    residue: residue as char,
                })
            })
            .collect()
    }
}
