use log::debug;

use unigene_seq::sequence::ReadRecord;

const MATCH_BONUS: f64 = 2.0;
const MISMATCH_PENALTY: f64 = 5.0;
const GAP_OPEN: f64 = 6.0;
const GAP_EXTEND: f64 = 2.0;
const MISMATCH_WEIGHT: f64 = 1.0;

/// Error probability of a phred quality value.
fn error_probability(quality: u32) -> f64 {
    10f64.powf(quality as f64 / -10.0)
}

/// Mean error probability over a small window ending at `center`.
fn window_error(quality: &[u32], center: usize) -> f64 {
    let mut sum = 0.0;
    let mut n = 0;
    for k in -2i64..=0 {
        let pos = center as i64 + k;
        if pos < 0 || pos >= quality.len() as i64 { continue; }
        sum += error_probability(quality[pos as usize]);
        n += 1;
    }
    sum / n as f64
}

/// Outcome of a quality-weighted banded local alignment.
///
/// `mismatch_score` accumulates, per mismatch or gap, the geometric mean of
/// the probabilities that each base was called correctly; a high value means
/// the differences sit in trustworthy sequence and the overlap is suspect.
/// `trim_score` weighs the unaligned sequence hanging off both ends the same
/// way.
#[derive(Clone, Copy, Debug)]
pub struct BandedAlignment {
    pub s1_ltrim: usize,
    pub s2_ltrim: usize,
    pub s1_rtrim: usize,
    pub s2_rtrim: usize,
    pub length: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub gaps: usize,
    pub mismatch_score: f64,
    pub trim_score: f64,
    pub align_score: f64,
}

/// Aligns two reads locally inside a band around a known diagonal.
///
/// `diagonal` is the expected offset of positions in `b` relative to `a`
/// (the scanner's diagonal for the pair); only cells within `bandwidth` of it
/// are filled. This is a scoring refinement for pairs the scanner already
/// accepted; clustering correctness never depends on it.
pub fn banded_smith_waterman(a: &ReadRecord, b: &ReadRecord,
                             diagonal: i32, bandwidth: i32) -> BandedAlignment {

    let (a_len, b_len) = (a.len(), b.len());
    let mut mat = vec![vec![0.0f64; b_len + 1]; a_len + 1];
    let mut moves = vec![vec![0u8; b_len + 1]; a_len + 1];

    // ---------- fill the band
    let (mut max_i, mut max_j) = (0usize, 0usize);
    for i in 1..=a_len {
        for jj in (i as i32 + diagonal - bandwidth)..(i as i32 + diagonal + bandwidth) {
            if jj < 1 { continue; }
            if jj > b_len as i32 { break; }
            let j = jj as usize;

            let diag = if a.seq()[i - 1] == b.seq()[j - 1] {
                mat[i - 1][j - 1] + MATCH_BONUS
            } else {
                mat[i - 1][j - 1] - MISMATCH_PENALTY
            };
            let mut up = 0.0;
            for k in 1..=i {
                let value = mat[i - k][j] - (GAP_OPEN + GAP_EXTEND * k as f64);
                if value > up { up = value; }
            }
            let mut left = 0.0;
            for k in 1..=j {
                let value = mat[i][j - k] - (GAP_OPEN + GAP_EXTEND * k as f64);
                if value > left { left = value; }
            }

            let mut best = 0.0;
            let mut move_code = 0u8;
            for (code, value) in [(0u8, diag), (1u8, up), (2u8, left)] {
                if value > best {
                    best = value;
                    move_code = code;
                }
            }
            mat[i][j] = best;
            moves[i][j] = move_code;
            if best > mat[max_i][max_j] {
                max_i = i;
                max_j = j;
            }
        }
    }

    // ---------- walk the alignment back from its best cell
    let (mut i, mut j) = (max_i, max_j);
    let (mut matches, mut mismatches, mut gaps) = (0usize, 0usize, 0usize);
    let mut mismatch_score = 0.0;
    let mut length = 0usize;
    while mat[i][j] > 0.0 {
        length += 1;
        match moves[i][j] {
            0 => {
                i -= 1;
                j -= 1;
                if a.seq()[i] == b.seq()[j] {
                    matches += 1;
                } else {
                    mismatches += 1;
                    mismatch_score += MISMATCH_WEIGHT
                        * ((1.0 - error_probability(a.quality()[i]))
                         * (1.0 - error_probability(b.quality()[j]))).sqrt();
                }
            }
            code => {
                let q_err = window_error(a.quality(), i.saturating_sub(1));
                let s_err = window_error(b.quality(), j.saturating_sub(1));
                mismatch_score += MISMATCH_WEIGHT * ((1.0 - q_err) * (1.0 - s_err)).sqrt();
                gaps += 1;
                if code == 1 { i -= 1; } else { j -= 1; }
            }
        }
    }
    let (min_i, min_j) = (i, j);

    // ---------- weigh the unaligned overhangs
    let mut l_trim = 0.0;
    let (mut i, mut j) = (min_i, min_j);
    while i > 0 && j > 0 {
        i -= 1;
        j -= 1;
        l_trim += ((1.0 - error_probability(a.quality()[i]))
                 * (1.0 - error_probability(b.quality()[j]))).powf(0.2);
    }
    let mut r_trim = 0.0;
    let (mut i, mut j) = (max_i, max_j);
    while i < a_len && j < b_len {
        r_trim += ((1.0 - error_probability(a.quality()[i]))
                 * (1.0 - error_probability(b.quality()[j]))).powf(0.2);
        i += 1;
        j += 1;
    }

    debug!("Max banded score for {} vs {}: {:.2} ({} matches, {} mismatches, {} gaps)",
           a.name(), b.name(), mat[max_i][max_j], matches, mismatches, gaps);

    BandedAlignment {
        s1_ltrim: min_i,
        s2_ltrim: min_j,
        s1_rtrim: a_len - max_i,
        s2_rtrim: b_len - max_j,
        length,
        matches,
        mismatches,
        gaps,
        mismatch_score,
        trim_score: l_trim + r_trim,
        align_score: mat[max_i][max_j],
    }
}
