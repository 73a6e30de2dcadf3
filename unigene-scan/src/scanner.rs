use unigene_index::LookupTable;

use crate::{combine_runs, find_word_hits, PathScratch};

/// Tunable knobs of the scanner.
#[derive(Clone, Copy, Debug)]
pub struct ScanParams {
    /// minimum best-path score for a hit to be reported
    pub threshold: i32,
    /// widening applied to the reported diagonal bounds
    pub diagonal_slack: i32,
}

impl Default for ScanParams {
    fn default() -> Self {
        ScanParams { threshold: 75, diagonal_slack: 5 }
    }
}

/// An accepted overlap between one query and one target.
#[derive(Clone, Copy, Debug)]
pub struct HitReport {
    /// target sequence id
    pub target: u32,
    /// best-path score
    pub score: i32,
    /// smallest diagonal on the path, widened by the slack
    pub min_di: i32,
    /// largest diagonal on the path, widened by the slack
    pub max_di: i32,
    /// query extent of the chain
    pub start: i32,
    pub end: i32,
    /// target extent of the chain
    pub s_start: i32,
    pub s_end: i32,
}

impl HitReport {
    /// The trim discount: unmatched bases outside the overlap, counted on
    /// whichever sequence has fewer of them on each side.
    pub fn discount(&self, query_length: i32, target_length: i32) -> i32 {
        self.start.min(self.s_start)
            + (query_length - self.end - 1).min(target_length - self.s_end - 1)
    }
}

/// Formats a report as one line of the scanner's text output.
pub fn report_line(query_id: u32, query_length: i32, target_length: i32,
                   report: &HitReport, reverse_complement: bool) -> String {
    let discount = report.discount(query_length, target_length);
    format!("{} {} {} {} {} {} {} {} {} {} {}{}",
            query_id, report.target, report.score, discount, report.score - discount,
            query_length, target_length, report.start, report.end,
            report.s_start, report.s_end,
            if reverse_complement { " RC" } else { "" })
}

/// Scans query sequences against one loaded lookup-table shard.
///
/// The scanner owns all per-query scratch (the per-target hit counters and
/// the DAG matrices), so a long run allocates once and reuses; the shard
/// itself is borrowed immutably and can be shared.
pub struct Scanner<'a> {
    table: &'a LookupTable,
    params: ScanParams,
    hits_by_target: Vec<i32>,
    scratch: PathScratch,
}

impl<'a> Scanner<'a> {
    pub fn new(table: &'a LookupTable, params: ScanParams) -> Scanner<'a> {
        Scanner { table, params, hits_by_target: Vec::new(), scratch: PathScratch::new() }
    }

    /// Returns the shard this scanner reads from.
    pub fn table(&self) -> &LookupTable { self.table }

    /// Runs the whole per-query pipeline for one sequence and returns every
    /// report meeting the score threshold.
    ///
    /// A query shorter than the word size, or one whose every target is
    /// censored, yields an empty report list; that is not an error.
    pub fn scan(&mut self, seq: &[u8], seq_id: u32) -> Vec<HitReport> {
        let mut hits = find_word_hits(self.table, seq, seq_id,
                                      self.params.threshold, &mut self.hits_by_target);
        if hits.is_empty() { return Vec::new(); }
        combine_runs(&mut hits, self.table.wordsize() as i32);

        let mut reports = Vec::new();
        let mut i = 0;
        while i < hits.len() {
            let mut j = i;
            while j < hits.len() && hits[j].target == hits[i].target { j += 1; }
            let target = hits[i].target;

            let path = self.scratch.best_path(&mut hits[i..j]);
            if path.score >= self.params.threshold {
                reports.push(HitReport {
                    target,
                    score: path.score,
                    min_di: path.min_di - self.params.diagonal_slack,
                    max_di: path.max_di + self.params.diagonal_slack,
                    start: path.start,
                    end: path.end,
                    s_start: path.s_start,
                    s_end: path.s_end,
                });
            }
            i = j;
        }
        reports
    }
}
