use thiserror::Error;

use crate::r#const::{MAX_ALPHABET_SIZE, MAX_SEQUENCE_LEN};
use crate::smith_waterman::Backend;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("query sequence is empty")]
    EmptyQuery,

    #[error("reference sequence is empty")]
    EmptyReference,

    #[error("alphabet size must be at least 1")]
    EmptyAlphabet,

    #[error("alphabet of {size} residues exceeds the maximum of {max}", max = MAX_ALPHABET_SIZE)]
    AlphabetTooLarge { size: usize },

    #[error("scoring matrix has {actual} entries, expected {expected}")]
    MatrixDimension { expected: usize, actual: usize },

    #[error(
        "residue code {code} at position {position} is outside the alphabet of size {alphabet_size}"
    )]
    ResidueOutOfRange {
        position: usize,
        code: u8,
        alphabet_size: usize,
    },

    #[error("sequence of length {len} exceeds the maximum of {max}", max = MAX_SEQUENCE_LEN)]
    SequenceTooLong { len: usize },

    #[error("residue {residue:?} has no entry in the scoring table")]
    UnknownResidue { residue: char },

    #[error("score {score} does not fit in a signed byte")]
    ScoreOutOfRange { score: i32 },

    #[error("{0:?} backend is not supported by this CPU")]
    BackendUnavailable(Backend),
}
