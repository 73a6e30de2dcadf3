use log::debug;

use crate::sequence::ReadRecord;

/// Minimum run length considered a poly-A / poly-T artifact.
const MIN_RUN: usize = 12;

/// The run must be this much better in quality than its surroundings.
const QUALITY_RATIO: f64 = 1.5;

struct TailCandidate {
    run_start: usize,
    run_end: usize,
    run_length: usize,
}

fn mean_quality(quality: &[u32]) -> f64 {
    quality.iter().sum::<u32>() as f64 / quality.len() as f64
}

/// Truncates post-poly-A noise from a read.
///
/// Looks for runs of at least 12 consecutive As. A run is a truncation
/// candidate when its mean quality exceeds 1.5 times the mean quality of the
/// (up to run-length) bases following it, and the remainder past the run is
/// shorter than a third of the read. The longest candidate run wins, first in
/// scan order on ties; the read is cut at the run start, dropping the run and
/// everything after it. Returns the cut position, if any.
pub fn truncate_poly_a(read: &mut ReadRecord) -> Option<usize> {
    let len = read.len();
    let mut best: Option<TailCandidate> = None;

    let mut j = 0;
    while j < len {
        if read.seq()[j] != b'A' {
            j += 1;
            continue;
        }
        let run_start = j;
        while j < len && read.seq()[j] == b'A' { j += 1; }
        let run_length = j - run_start;
        if run_length < MIN_RUN { continue; }

        let window_end = (j + run_length).min(len);
        if window_end == j { continue; }                // run reaches the end of the read
        let q_run = mean_quality(&read.quality()[run_start..j]);
        let q_post = mean_quality(&read.quality()[j..window_end]);
        if q_run > QUALITY_RATIO * q_post && (len - j) < len / 3 {
            if best.as_ref().map_or(true, |b| run_length > b.run_length) {
                best = Some(TailCandidate { run_start, run_end: j, run_length });
            }
        }
    }

    best.map(|candidate| {
        debug!("Truncating post poly-A noise for sequence {} at position {}",
               read.name(), candidate.run_start);
        read.truncate(candidate.run_start);
        candidate.run_start
    })
}

/// Truncates leading poly-T noise from a read.
///
/// The mirror image of [`truncate_poly_a`]: runs of at least 12 Ts whose head
/// (the bases before the run, up to run-length of them) is markedly worse in
/// quality, with the run starting inside the leading third of the read. The
/// read is cut at the run end, dropping the run and everything before it.
/// Returns the cut position, if any.
pub fn truncate_poly_t(read: &mut ReadRecord) -> Option<usize> {
    let len = read.len();
    let mut best: Option<TailCandidate> = None;

    let mut j = 0;
    while j < len {
        if read.seq()[j] != b'T' {
            j += 1;
            continue;
        }
        let run_start = j;
        while j < len && read.seq()[j] == b'T' { j += 1; }
        let run_length = j - run_start;
        if run_length < MIN_RUN { continue; }

        let window_start = run_start.saturating_sub(run_length);
        if window_start == run_start { continue; }      // run starts the read, nothing to compare
        let q_run = mean_quality(&read.quality()[run_start..j]);
        let q_pre = mean_quality(&read.quality()[window_start..run_start]);
        if q_run > QUALITY_RATIO * q_pre && run_start < len / 3 {
            if best.as_ref().map_or(true, |b| run_length > b.run_length) {
                best = Some(TailCandidate { run_start, run_end: j, run_length });
            }
        }
    }

    best.map(|candidate| {
        debug!("Truncating leading poly-T noise for sequence {} at position {}",
               read.name(), candidate.run_end);
        read.cut_head(candidate.run_end);
        candidate.run_end
    })
}

/// Runs poly-A and then poly-T truncation over a whole set of reads.
pub fn truncate_poly_tails(reads: &mut [ReadRecord]) {
    for read in reads.iter_mut() {
        truncate_poly_a(read);
        truncate_poly_t(read);
    }
}
