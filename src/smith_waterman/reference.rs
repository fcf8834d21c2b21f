use super::result::AlignmentResult;
use crate::scoring::ScoringMatrix;

/// Plain Gotoh recurrence, one cell at a time. Slow, but easy to check by hand, so the striped
/// engine is tested against it.
///
/// Follows the same conventions as the striped engine: the best score is the first column
/// (reference position) to strictly exceed all earlier columns, and the lowest read position
/// holding it within that column. Scores are not saturated.
pub fn smith_waterman(
    read: &[u8],
    reference: &[u8],
    matrix: &ScoringMatrix,
    gap_open: u8,
    gap_extend: u8,
) -> AlignmentResult {
    let gap_open_extend = gap_open as i32 + gap_extend as i32;
    let gap_extend = gap_extend as i32;
    // low enough to never win, high enough to never overflow when decayed
    let unreachable = i32::MIN / 2;

    let mut prev_col_scores = vec![0; read.len()];
    let mut curr_col_scores = vec![0; read.len()];
    let mut left_gaps = vec![unreachable; read.len()];

    let mut max_score = i32::MIN;
    let mut ref_end = 0;
    let mut read_end = read.len().saturating_sub(1);

    for (ref_idx, &ref_residue) in reference.iter().enumerate() {
        let mut up_gap = unreachable;

        for (read_idx, &read_residue) in read.iter().enumerate() {
            let diag = match read_idx {
                0 => 0,
                _ => prev_col_scores[read_idx - 1],
            };
            let score = (diag + matrix.score(ref_residue, read_residue) as i32)
                .max(0)
                .max(left_gaps[read_idx])
                .max(up_gap);
            curr_col_scores[read_idx] = score;

            left_gaps[read_idx] = (left_gaps[read_idx] - gap_extend).max(score - gap_open_extend);
            up_gap = (up_gap - gap_extend).max(score - gap_open_extend);
        }

        let (best_read_idx, &column_max) = curr_col_scores
            .iter()
            .enumerate()
            .rev()
            .max_by_key(|(_, score)| **score)
            .unwrap_or((0, &0));
        if column_max > max_score {
            max_score = column_max;
            ref_end = ref_idx;
            read_end = best_read_idx;
        }

        std::mem::swap(&mut prev_col_scores, &mut curr_col_scores);
    }

    AlignmentResult {
        score: max_score.clamp(0, i16::MAX as i32) as i16,
        ref_begin: -1,
        ref_end: ref_end as i32,
        read_begin: -1,
        read_end: read_end as i32,
    }
}
