use unigene_index::LookupTable;
use unigene_seq::sequence::words;

/// A transient word match between the query and one target sequence.
///
/// `pos` follows the scanner's position convention: the query start of the
/// word minus one, so the window opening the query sits at −1. Diagonals are
/// exact under this convention since both sides shift by the same amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordHit {
    /// target sequence id
    pub target: u32,
    /// diagonal: target word start minus query word start
    pub di: i32,
    /// query word start minus one
    pub pos: i32,
    /// combined length of the collinear run, in bases; 0 until chained
    pub length: i32,
}

/// Accumulates the word hits of one query against a loaded shard.
///
/// The first pass only counts hits per target, so that unpromising targets
/// can be censored before any hit record exists: a target is dropped when its
/// id is below the query's (each pair is processed once, from the lower id)
/// or when twice its hit count stays below the score threshold, which bounds
/// the score it could ever chain. The second pass emits hits for the
/// survivors, sorted by (target, diagonal, position) with a single stable
/// sort.
///
/// `hits_by_target` is caller-owned scratch, one counter per shard id; it is
/// resized and cleared here.
pub fn find_word_hits(table: &LookupTable, seq: &[u8], seq_id: u32, threshold: i32,
                      hits_by_target: &mut Vec<i32>) -> Vec<WordHit> {

    let wordsize = table.wordsize() as usize;
    let shard_span = (table.end() - table.start()) as usize;
    hits_by_target.clear();
    hits_by_target.resize(shard_span, 0);

    // ---------- first pass: count word hits per target
    for (_, word) in words(seq, wordsize) {
        for posting in table.postings(word) {
            hits_by_target[(posting.seq_id - table.start()) as usize] += 1;
        }
    }

    // ---------- censor targets that cannot reach the threshold
    let mut n_hits = 0usize;
    for (j, count) in hits_by_target.iter_mut().enumerate() {
        let target = j as u32 + table.start();
        if target >= seq_id && *count * 2 >= threshold {
            n_hits += *count as usize;
        } else {
            *count = 0;
        }
    }
    if n_hits == 0 { return Vec::new(); }

    // ---------- second pass: emit hits for the surviving targets
    let mut hits = Vec::with_capacity(n_hits);
    for (start, word) in words(seq, wordsize) {
        for posting in table.postings(word) {
            if hits_by_target[(posting.seq_id - table.start()) as usize] > 0 {
                hits.push(WordHit {
                    target: posting.seq_id,
                    di: posting.seq_pos as i32 - start as i32,
                    pos: start as i32 - 1,
                    length: 0,
                });
            }
        }
    }
    debug_assert_eq!(hits.len(), n_hits);

    hits.sort_by(|a, b| (a.target, a.di, a.pos).cmp(&(b.target, b.di, b.pos)));
    hits
}

/// Collapses maximal collinear runs of consecutive word hits, in place.
///
/// Hits must arrive sorted by (target, diagonal, position). A run is maximal
/// while target and diagonal stay fixed and query positions advance by
/// exactly one per hit; it collapses into a single hit whose length is
/// `(last_pos - first_pos) + wordsize`.
pub fn combine_runs(hits: &mut Vec<WordHit>, wordsize: i32) {
    let mut filled = 0;
    let mut i = 0;
    while i < hits.len() {
        let mut j = i;
        while j < hits.len()
            && hits[j].target == hits[i].target
            && hits[j].di == hits[i].di
            && hits[j].pos - hits[i].pos == (j - i) as i32 { j += 1; }
        hits[filled] = WordHit {
            target: hits[i].target,
            di: hits[i].di,
            pos: hits[i].pos,
            length: (j - i) as i32 + wordsize - 1,
        };
        filled += 1;
        i = j;
    }
    hits.truncate(filled);
}
