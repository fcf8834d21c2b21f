#![allow(unsafe_op_in_unsafe_fn)]

use super::direction::{Direction, EXTEND_LEFT, EXTEND_UP};
use super::profile::StripedProfile;
use super::result::{AlignmentEnd, find_read_end};
use crate::simd::{Vector, as_lanes};

/// Striped Smith-Waterman with affine gaps over one reference, using a prebuilt query profile.
///
/// Walks the reference one residue (column) at a time, computing the whole column of the
/// score matrix in `seg_len` vectors. Within a column, vertical gaps (`F`) are first carried
/// across segments in a single pass, then corrected by the lazy-F loop, which rotates `F`
/// into the next lane and sweeps again until it can no longer raise any cell. Cells raised by
/// the lazy-F loop also refresh the horizontal gaps (`E`) they open into the next column.
///
/// Opening a gap costs `gap_open + gap_extend`, each further residue costs `gap_extend`.
/// Scores saturate at `i16::MAX`.
///
/// When `TRACEBACK` is set, the code of every cell is written to `directions`, which must hold
/// `reference.len() * seg_len * V::LANES` lanes. Otherwise `directions` is left untouched.
///
/// # Safety
///
/// Caller must ensure the instructions used by `V` are available, and that every code of
/// `reference` is below the profile's alphabet size.
#[inline(always)]
pub unsafe fn smith_waterman<V: Vector, const TRACEBACK: bool>(
    profile: &StripedProfile<V>,
    reference: &[u8],
    gap_open: u8,
    gap_extend: u8,
    directions: &mut [i16],
) -> AlignmentEnd {
    let seg_len = profile.seg_len;
    let column_lanes = seg_len * V::LANES;
    debug_assert!(!TRACEBACK || directions.len() == reference.len() * column_lanes);

    let zero = V::zero();
    let min = V::splat_i16(i16::MIN);
    let gap_open_extend = V::splat_i16(gap_open as i16 + gap_extend as i16);
    let gap_extend = V::splat_i16(gap_extend as i16);

    let left_code = V::splat_i16(Direction::Left as i16);
    let up_code = V::splat_i16(Direction::Up as i16);
    let stop_code = V::splat_i16(Direction::Stop as i16);
    let extend_left = V::splat_i16(EXTEND_LEFT);
    let extend_up = V::splat_i16(EXTEND_UP);

    let mut h_store = vec![zero; seg_len];
    let mut h_load = vec![zero; seg_len];
    let mut h_best = vec![zero; seg_len];
    let mut e = vec![min; seg_len];
    let mut codes = if TRACEBACK {
        vec![zero; seg_len]
    } else {
        Vec::new()
    };

    let mut max_score = i16::MIN;
    let mut ref_end = 0;
    let mut lazy_sweeps = 0usize;

    for (ref_idx, &residue) in reference.iter().enumerate() {
        let scores = profile.residue(residue);

        let mut f = min;
        let mut column_max = zero;

        // diagonal for segment 0 is the last segment of the previous column, one lane down
        let mut h = h_store[seg_len - 1].shift_right_padded_i16(zero);
        std::mem::swap(&mut h_load, &mut h_store);

        for seg in 0..seg_len {
            h = h.adds_i16(scores[seg]).max_i16(zero);
            let e_seg = e[seg];
            h = h.max_i16(e_seg).max_i16(f);

            column_max = column_max.max_i16(h);
            h_store[seg] = h;

            let h_gap = h.subs_i16(gap_open_extend);
            let e_extend = e_seg.subs_i16(gap_extend);
            let f_extend = f.subs_i16(gap_extend);

            if TRACEBACK {
                // F is ORed last so it wins ties with E
                let code = e_seg
                    .eq_i16(h)
                    .and(left_code)
                    .or(f.eq_i16(h).and(up_code));
                let stopped = h.eq_i16(zero);
                codes[seg] = stopped
                    .andnot(code)
                    .or(stopped.and(stop_code))
                    .or(e_extend.gt_i16(h_gap).and(extend_left))
                    .or(f_extend.gt_i16(h_gap).and(extend_up));
            }

            e[seg] = e_extend.max_i16(h_gap);
            f = f_extend.max_i16(h_gap);

            h = h_load[seg];
        }

        // lazy-F: F leaving the last segment continues in the next lane of segment 0
        let mut settled = false;
        for _ in 0..V::LANES {
            lazy_sweeps += 1;
            f = f.shift_right_padded_i16(min);

            for seg in 0..seg_len {
                let h_old = h_store[seg];
                let h = h_old.max_i16(f);
                column_max = column_max.max_i16(h);
                h_store[seg] = h;

                let h_gap = h.subs_i16(gap_open_extend);
                let e_old = e[seg];
                e[seg] = e_old.max_i16(h_gap);
                let f_in = f;
                f = f.subs_i16(gap_extend);

                if TRACEBACK {
                    let raised = f_in.gt_i16(h_old).and(up_code);
                    // a raised cell may open the gap to its right at least as well as extending
                    let reopened = e_old.gt_i16(h_gap).andnot(extend_left);
                    codes[seg] = reopened
                        .andnot(codes[seg].or(raised))
                        .or(f.gt_i16(h_gap).and(extend_up));
                }

                // below this cell the first pass already carried at least `h_old - gap_open_extend`
                settled = f.gt_i16(h_old.subs_i16(gap_open_extend)).movemask() == 0;
                if settled {
                    break;
                }
            }
            if settled {
                break;
            }
        }

        if TRACEBACK {
            directions[ref_idx * column_lanes..][..column_lanes].copy_from_slice(as_lanes(&codes));
        }

        let column_max = column_max.smax_i16();
        if column_max > max_score {
            max_score = column_max;
            ref_end = ref_idx;
            h_best.copy_from_slice(&h_store);
        }
    }

    if max_score == i16::MAX {
        log::warn!(
            "alignment score saturated at {}, reported end positions may be early",
            i16::MAX
        );
    }

    let read_end = find_read_end(
        as_lanes(&h_best),
        profile.read_len,
        seg_len,
        V::LANES,
        max_score,
    );
    log::trace!(
        "aligned {} residues against {}: score={max_score}, ref_end={ref_end}, read_end={read_end}, lazy_sweeps={lazy_sweeps}",
        profile.read_len,
        reference.len(),
    );

    AlignmentEnd {
        score: max_score,
        ref_end,
        read_end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringMatrix;
    use crate::simd::PortableVector;
    use crate::smith_waterman::DirectionMatrix;

    fn align(read: &[u8], reference: &[u8], matrix: &ScoringMatrix, gap_open: u8, gap_extend: u8) -> AlignmentEnd {
        let profile = StripedProfile::<PortableVector>::new(read, matrix);
        unsafe { smith_waterman::<_, false>(&profile, reference, gap_open, gap_extend, &mut []) }
    }

    #[test]
    fn test_exact_match() {
        let matrix = ScoringMatrix::match_mismatch(4, 5, -4).unwrap();
        let end = align(&[0, 1, 2, 3], &[0, 1, 2, 3], &matrix, 3, 1);
        assert_eq!(
            end,
            AlignmentEnd {
                score: 20,
                ref_end: 3,
                read_end: 3
            }
        );
    }

    #[test]
    fn test_no_positive_cell() {
        let matrix = ScoringMatrix::match_mismatch(4, 5, -4).unwrap();
        let end = align(&[0, 0, 0], &[1, 2, 3, 1], &matrix, 3, 1);
        assert_eq!(end.score, 0);
        assert_eq!(end.ref_end, 0);
        assert_eq!(end.read_end, 0);
    }

    #[test]
    fn test_gap_carried_by_lazy_f() {
        // read spans several segments, and the best path needs a vertical gap crossing the
        // segment boundary, which only the lazy-F sweep can supply
        let matrix = ScoringMatrix::match_mismatch(4, 5, -4).unwrap();
        let read: Vec<u8> = [0, 1, 2, 3, 0, 1, 2, 3, 3, 2, 1, 0, 3, 3, 2, 2, 1, 1, 0, 0]
            .into_iter()
            .collect();
        // reference is the read without residue 9
        let reference: Vec<u8> = read
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 9)
            .map(|(_, &r)| r)
            .collect();

        let end = align(&read, &reference, &matrix, 2, 1);
        // 19 matches, one gap of length one
        assert_eq!(end.score, 19 * 5 - 3);
        assert_eq!(end.ref_end, reference.len() - 1);
        assert_eq!(end.read_end, read.len() - 1);
    }

    #[test]
    fn test_directions_match_columns() {
        let matrix = ScoringMatrix::match_mismatch(4, 5, -4).unwrap();
        let profile = StripedProfile::<PortableVector>::new(&[0, 1], &matrix);
        let mut directions = DirectionMatrix::new(2, 3, profile.seg_len, PortableVector::LANES);
        let end = unsafe {
            smith_waterman::<_, true>(&profile, &[2, 0, 1], 6, 2, directions.as_striped_mut())
        };

        assert_eq!(end.score, 10);
        assert_eq!(directions.ref_len(), 3);
        assert_eq!(directions.read_len(), 2);
        // reference residue 0 matches nothing
        assert_eq!(directions.get(0, 0), Direction::Stop);
        assert_eq!(directions.get(1, 0), Direction::Stop);
        assert_eq!(directions.get(0, 1), Direction::Diagonal);
        assert_eq!(directions.get(1, 2), Direction::Diagonal);
    }

    #[test]
    fn test_zero_gap_open_carries_lazy_f() {
        // with free gap opening, the cell raised by the lazy-F sweep has to keep passing its
        // gap down, even though reopening from it would score the same
        let matrix = ScoringMatrix::match_mismatch(4, 5, -4).unwrap();
        let read = [2, 3, 0, 3, 3, 2, 2, 0, 2, 3, 2, 2, 3, 0, 0, 1, 3, 0, 1, 3, 2, 0, 2, 0];
        let reference = [2, 3, 0, 3, 2, 2, 0, 2, 3, 2, 3, 0, 0, 1, 3, 0, 1, 3, 2, 0, 2, 0];

        for (gap_open, gap_extend) in [(0, 3), (0, 1), (0, 0), (1, 3)] {
            let expected = crate::smith_waterman::reference::smith_waterman(
                &read, &reference, &matrix, gap_open, gap_extend,
            );
            let end = align(&read, &reference, &matrix, gap_open, gap_extend);
            assert_eq!(end.score, expected.score, "gaps ({gap_open}, {gap_extend})");
            assert_eq!(end.ref_end as i32, expected.ref_end);
            assert_eq!(end.read_end as i32, expected.read_end);
        }
        assert!(
            align(&read, &reference, &matrix, 0, 3).score
                >= align(&read, &reference, &matrix, 1, 3).score
        );
    }

    #[test]
    fn test_adjacent_gaps_across_segments() {
        // with free gaps and a harsh mismatch, skipping one residue of each sequence beats a
        // mismatch; the vertical half of that detour crosses a segment boundary
        let matrix = ScoringMatrix::match_mismatch(4, 5, -20).unwrap();
        let read: Vec<u8> = (0..24).map(|i| (i % 3) as u8).collect();
        let mut reference = read.clone();
        reference[12] = 3;

        let end = align(&read, &reference, &matrix, 0, 0);
        let expected =
            crate::smith_waterman::reference::smith_waterman(&read, &reference, &matrix, 0, 0);
        assert_eq!(end.score, expected.score);
        assert_eq!(end.score, 23 * 5);
    }
}
