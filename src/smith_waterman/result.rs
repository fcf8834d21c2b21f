use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::direction::DirectionMatrix;

/// Best local alignment between a query and a reference.
///
/// Positions are 0-based and inclusive. Begin positions are `-1` unless they were recovered
/// from a traceback (see [`AlignmentResult::with_traceback_begin`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlignmentResult {
    pub score: i16,
    pub ref_begin: i32,
    pub ref_end: i32,
    pub read_begin: i32,
    pub read_end: i32,
}

impl AlignmentResult {
    pub(crate) fn from_end(end: &AlignmentEnd) -> Self {
        // both lengths were checked against `MAX_SEQUENCE_LEN` before aligning
        Self {
            score: end.score,
            ref_begin: -1,
            ref_end: end.ref_end as i32,
            read_begin: -1,
            read_end: end.read_end as i32,
        }
    }

    /// `(read_begin, ref_begin)` when known
    pub fn begins(&self) -> Option<(usize, usize)> {
        match (self.read_begin, self.ref_begin) {
            (read, reference) if read >= 0 && reference >= 0 => {
                Some((read as usize, reference as usize))
            }
            _ => None,
        }
    }

    /// Fills in the begin positions from the first cell of the traceback path. Results with a
    /// score of zero have no path and keep their `-1` begins.
    pub fn with_traceback_begin(self, directions: &DirectionMatrix) -> Self {
        match directions
            .traceback(self.read_end as usize, self.ref_end as usize)
            .last()
        {
            Some(start) => Self {
                read_begin: start.read_idx() as i32,
                ref_begin: start.ref_idx() as i32,
                ..self
            },
            None => self,
        }
    }
}

impl fmt::Display for AlignmentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "score={},ref_begin={},ref_end={},read_begin={},read_end={}",
            self.score, self.ref_begin, self.ref_end, self.read_begin, self.read_end
        )
    }
}

/// End cell of the best alignment, as found by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AlignmentEnd {
    pub score: i16,
    pub ref_end: usize,
    pub read_end: usize,
}

/// Lowest read position whose score in the striped column `column` equals `score`.
///
/// Lane `k` of segment `s` holds read position `s + k * seg_len`; padding lanes past
/// `read_len` are never considered. Falls back to the last read position if no lane matches.
pub(crate) fn find_read_end(column: &[i16], read_len: usize, seg_len: usize, lanes: usize, score: i16) -> usize {
    (0..read_len)
        .find(|&read_idx| column[(read_idx % seg_len) * lanes + read_idx / seg_len] == score)
        .unwrap_or(read_len - 1)
}
