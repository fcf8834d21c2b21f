use itertools::iproduct;

use crate::scoring::ScoringMatrix;
use crate::simd::Vector;

/// Query profile in striped layout.
///
/// For every residue code `r` the profile holds `seg_len` vectors, where lane `k` of segment `s`
/// scores `r` against the query residue at `s + k * seg_len`. Lanes past the end of the query
/// score 0.
#[derive(Debug, Clone)]
pub struct StripedProfile<V: Vector> {
    pub(crate) scores: Vec<V>,
    pub(crate) read_len: usize,
    pub(crate) seg_len: usize,
    pub(crate) alphabet_size: usize,
}

impl<V: Vector> StripedProfile<V> {
    /// Expects every code of `read` to be below the matrix's alphabet size
    #[inline(always)]
    pub fn new(read: &[u8], matrix: &ScoringMatrix) -> Self {
        let alphabet_size = matrix.alphabet_size();
        let seg_len = read.len().div_ceil(V::LANES);

        let mut lanes = vec![0i16; alphabet_size * seg_len * V::LANES];
        for ((residue, segment, lane), score) in
            iproduct!(0..alphabet_size, 0..seg_len, 0..V::LANES).zip(lanes.iter_mut())
        {
            if let Some(&query) = read.get(segment + lane * seg_len) {
                *score = matrix.score(residue as u8, query) as i16;
            }
        }

        let scores = lanes
            .chunks_exact(V::LANES)
            .map(|chunk| unsafe { V::load_unaligned(chunk.as_ptr()) })
            .collect();

        Self {
            scores,
            read_len: read.len(),
            seg_len,
            alphabet_size,
        }
    }

    /// Score vectors for one reference residue, `seg_len` long
    #[inline(always)]
    pub fn residue(&self, residue: u8) -> &[V] {
        let start = residue as usize * self.seg_len;
        &self.scores[start..start + self.seg_len]
    }
}
