use crate::WordHit;

/// Extent and score of the best chain found for one target.
///
/// Positions follow the scanner's convention (word start minus one) on both
/// the query (`start`, `end`) and the target (`s_start`, `s_end`) side.
/// `min_di`/`max_di` bound the diagonals of the chained hits on the path,
/// before any reporting slack is applied.
#[derive(Clone, Copy, Debug)]
pub struct ChainPath {
    pub score: i32,
    pub min_di: i32,
    pub max_di: i32,
    pub start: i32,
    pub end: i32,
    pub s_start: i32,
    pub s_end: i32,
}

/// Reusable scratch for the per-target DAG.
///
/// The adjacency matrix, predecessor and score vectors grow to the maximum
/// span seen and are then reused for every target of every query; only the
/// submatrix actually used is cleared per target.
pub struct PathScratch {
    adj: Vec<i32>,
    pred: Vec<i32>,
    score: Vec<i32>,
    side: usize,
}

impl PathScratch {
    pub fn new() -> PathScratch {
        PathScratch { adj: Vec::new(), pred: Vec::new(), score: Vec::new(), side: 0 }
    }

    fn ensure(&mut self, n_nodes: usize) {
        if self.side < n_nodes {
            self.side = n_nodes;
            self.adj.resize(n_nodes * n_nodes, 0);
            self.pred.resize(n_nodes, 0);
            self.score.resize(n_nodes, 0);
        }
    }

    /// Finds the maximum-score path through one target's chained hits.
    ///
    /// The hits are sorted by query position; nodes are the hits plus a
    /// virtual source (0) and sink (n+1). An edge runs from `k` to `l`
    /// whenever `k` starts strictly before `l`, at a cost of
    /// `|di(k) − di(l)| + |(pos(k) + len(k)) − pos(l)| + 1` (gap plus overlap
    /// penalty); the source reaches every hit and every hit reaches the sink
    /// at cost 1, which is not charged on the sink side. Node reward is the
    /// chained hit length. Relaxation walks the nodes in index order (after
    /// the sort every edge points forward, so that order is topological) and
    /// the best-scoring node is traced back through its predecessors.
    pub fn best_path(&mut self, hits: &mut [WordHit]) -> ChainPath {
        hits.sort_by(|a, b| a.pos.cmp(&b.pos));

        let m = hits.len();
        let n_nodes = m + 2;
        self.ensure(n_nodes);
        let side = self.side;

        // ---------- adjacency matrix, cleared only on the used submatrix
        for row in 0..n_nodes {
            self.adj[row * side..row * side + n_nodes].fill(0);
        }
        for k in 0..m {
            for l in 0..m {
                if hits[k].pos < hits[l].pos {
                    self.adj[(k + 1) * side + (l + 1)] = (hits[k].di - hits[l].di).abs()
                        + (hits[k].pos + hits[k].length - hits[l].pos).abs() + 1;
                }
            }
        }
        for l in 1..n_nodes - 1 {
            self.adj[l] = 1;                            // source reaches every hit
            self.adj[l * side + (n_nodes - 1)] = 1;     // every hit reaches the sink
        }

        // ---------- relax in topological (index) order
        for k in 0..n_nodes {
            self.pred[k] = -1;
            self.score[k] = i32::MIN;
        }
        self.score[0] = 0;
        for k in 0..n_nodes {
            if self.score[k] == i32::MIN { continue; }
            for l in 0..n_nodes {
                let cost = self.adj[k * side + l];
                if cost == 0 { continue; }
                let s = if l > 0 && l < n_nodes - 1 {
                    self.score[k] - cost + hits[l - 1].length
                } else {
                    self.score[k]
                };
                if s > self.score[l] {
                    self.pred[l] = k as i32;
                    self.score[l] = s;
                }
            }
        }

        // ---------- trace the best node back to the source
        let mut best = 0;
        for k in 1..n_nodes {
            if self.score[k] > self.score[best] { best = k; }
        }
        let last = &hits[best - 1];
        let mut path = ChainPath {
            score: self.score[best],
            min_di: last.di,
            max_di: last.di,
            start: last.pos + last.length,
            end: last.pos + last.length,
            s_start: last.pos + last.di + last.length,
            s_end: last.pos + last.di + last.length,
        };
        let mut k = best;
        while k != 0 {
            let hit = &hits[k - 1];
            if hit.di < path.min_di { path.min_di = hit.di; }
            if hit.di > path.max_di { path.max_di = hit.di; }
            if self.pred[k] == 0 {
                path.start = hit.pos;
                path.s_start = hit.pos + hit.di;
            }
            k = self.pred[k] as usize;
        }
        path
    }
}

impl Default for PathScratch {
    fn default() -> Self { PathScratch::new() }
}
