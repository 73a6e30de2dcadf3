use std::fs::File;
use std::io::{BufReader, BufWriter, Write};

use log::{debug, info};

use unigene_io::{read_i32, read_u32, write_i32, write_u32};
use unigene_seq::sequence::words;

use crate::{IndexError, SequenceDatabase, LOOKUP_MAGIC};

/// Bytes taken by one posting on disk (`u32` sequence id + `u32` position).
const POSTING_SIZE: u64 = 8;

/// Bytes taken by the shard header: six 32-bit fields.
const HEADER_SIZE: u64 = 24;

/// Bytes taken by one per-word descriptor (`u32` count + `u32` file offset).
const DESCRIPTOR_SIZE: u64 = 8;

/// A word is censored when observed more than this many times over expectation.
const CENSOR_RATIO: f64 = 50.0;

/// Configuration of the lookup-table builder.
#[derive(Clone, Copy, Debug)]
pub struct LookupConfig {
    /// word size, 2..=24
    pub wordsize: u32,
    /// shard memory budget, in megabytes of posting storage
    pub memsize_mb: u32,
    /// skip odd-numbered sequence ids (the reverse-complement mates)
    pub forward_only: bool,
}

impl Default for LookupConfig {
    fn default() -> Self {
        LookupConfig { wordsize: 9, memsize_mb: 192, forward_only: false }
    }
}

/// One occurrence of a word: which sequence, and the 0-based word start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Posting {
    pub seq_id: u32,
    pub seq_pos: u32,
}

/// Builds every lookup-table shard for a database.
///
/// Shards are cut so that the posting storage of each stays within the
/// configured memory budget: sequences are accumulated while the running
/// posting count is below the budget, and the sequence that crosses it stays
/// in the shard. After counting, words observed more than 50 times their
/// expected frequency are censored: their postings are not written and they
/// simply contribute no matches downstream.
///
/// Returns the shard file names, `<basename>.lt.<n>` in shard order.
pub fn build_lookup_tables(db: &mut SequenceDatabase, basename: &str, config: &LookupConfig)
        -> Result<Vec<String>, IndexError> {

    if !(2..=24).contains(&config.wordsize) {
        return Err(IndexError::WordSizeOutOfRange {
            file_name: basename.to_owned(),
            wordsize: config.wordsize,
        });
    }
    let wordsize = config.wordsize as usize;
    let n_words = 1usize << (2 * wordsize);
    let limit = config.memsize_mb as u64 * 1024 * 1024 / POSTING_SIZE;

    let n_seq = db.n_seq();
    let mut counts = vec![0u32; n_words];
    let mut codes: Vec<u8> = Vec::new();
    let mut shard_files = Vec::new();

    let mut start = 0u32;
    let mut table_index = 0i32;
    while start < n_seq {
        // ---------- first pass: count postings until the memory budget is crossed
        counts.fill(0);
        let mut total: u64 = 0;
        let mut seq_id = start;
        while seq_id < n_seq && total < limit {
            if !(config.forward_only && seq_id & 0x1 == 1) {
                db.read_into(seq_id, &mut codes)?;
                for (_, word) in words(&codes, wordsize) {
                    counts[word as usize] += 1;
                    total += 1;
                }
            }
            seq_id += 1;
        }
        let end = seq_id;

        // ---------- censor over-represented words
        let expected = total as f64 / n_words as f64;
        let mut censored: u64 = 0;
        for (word, count) in counts.iter_mut().enumerate() {
            if *count as f64 > CENSOR_RATIO * expected {
                debug!("Censoring word {:#x}: {} observations out of {} total, expected {:.2}",
                       word, count, total, expected);
                censored += *count as u64;
                *count = 0;
            }
        }
        let total_postings = total - censored;

        // ---------- second pass: lay the surviving postings out word-major
        let mut fill = vec![0u32; n_words];
        let mut next: u32 = 0;
        for word in 0..n_words {
            fill[word] = next;
            next += counts[word];
        }
        let mut postings = vec![Posting::default(); total_postings as usize];
        for seq_id in start..end {
            if config.forward_only && seq_id & 0x1 == 1 { continue; }
            db.read_into(seq_id, &mut codes)?;
            for (seq_pos, word) in words(&codes, wordsize) {
                let word = word as usize;
                if counts[word] == 0 { continue; }
                postings[fill[word] as usize] = Posting { seq_id, seq_pos: seq_pos as u32 };
                fill[word] += 1;
            }
        }

        let file_name = format!("{}.lt.{}", basename, table_index);
        info!("Writing lookup table {} spanning sequences {} - {}", table_index, start, end - 1);
        write_shard(&file_name, config.wordsize, start, end, table_index, &counts, &postings)?;
        shard_files.push(file_name);

        start = end;
        table_index += 1;
    }

    Ok(shard_files)
}

fn write_shard(file_name: &str, wordsize: u32, start: u32, end: u32, table_index: i32,
               counts: &[u32], postings: &[Posting]) -> Result<(), IndexError> {

    let mut file = BufWriter::new(File::create(file_name)?);
    write_u32(&mut file, LOOKUP_MAGIC)?;
    write_u32(&mut file, wordsize)?;
    write_u32(&mut file, start)?;
    write_u32(&mut file, end - 1)?;                 // stored inclusive, fixed up on load
    write_i32(&mut file, table_index)?;
    write_u32(&mut file, postings.len() as u32)?;

    let mut start_pos = HEADER_SIZE + DESCRIPTOR_SIZE * counts.len() as u64;
    for &count in counts {
        write_u32(&mut file, count)?;
        write_u32(&mut file, start_pos as u32)?;
        start_pos += POSTING_SIZE * count as u64;
    }
    for posting in postings {
        write_u32(&mut file, posting.seq_id)?;
        write_u32(&mut file, posting.seq_pos)?;
    }
    file.flush()?;
    Ok(())
}

/// One lookup-table shard, loaded whole.
///
/// Postings live in a single arena vector; each word addresses its contiguous
/// range through a `(start, count)` pair, so a lookup is one slice borrow.
pub struct LookupTable {
    wordsize: u32,
    start: u32,
    end: u32,
    table_index: i32,
    counts: Vec<u32>,
    offsets: Vec<u32>,
    postings: Vec<Posting>,
}

impl LookupTable {
    /// Loads a shard file, verifying its magic tag, word size, posting totals
    /// and the id range of every posting.
    pub fn open(file_name: &str) -> Result<LookupTable, IndexError> {
        let mut file = BufReader::new(File::open(file_name)?);
        if read_u32(&mut file)? != LOOKUP_MAGIC {
            return Err(IndexError::BadMagic { file_name: file_name.to_owned() });
        }
        let wordsize = read_u32(&mut file)?;
        if !(2..=24).contains(&wordsize) {
            return Err(IndexError::WordSizeOutOfRange { file_name: file_name.to_owned(), wordsize });
        }
        let start = read_u32(&mut file)?;
        let last = read_u32(&mut file)?;
        let table_index = read_i32(&mut file)?;
        let total = read_u32(&mut file)?;
        info!("Loading lookup table file {}: covering sequences {} - {}", table_index, start, last);
        let end = last + 1;

        let n_words = 1usize << (2 * wordsize as usize);
        let mut counts = vec![0u32; n_words];
        let mut offsets = vec![0u32; n_words];
        let mut from_counts: u64 = 0;
        let mut next: u32 = 0;
        for word in 0..n_words {
            counts[word] = read_u32(&mut file)?;
            let _start_pos = read_u32(&mut file)?;
            offsets[word] = next;
            next = next.wrapping_add(counts[word]);
            from_counts += counts[word] as u64;
        }
        if from_counts != total as u64 {
            return Err(IndexError::PostingCountMismatch {
                file_name: file_name.to_owned(),
                from_counts,
                total,
            });
        }

        let mut postings = Vec::with_capacity(total as usize);
        for _ in 0..total {
            let posting = Posting { seq_id: read_u32(&mut file)?, seq_pos: read_u32(&mut file)? };
            if posting.seq_id < start || posting.seq_id >= end {
                return Err(IndexError::PostingOutOfRange {
                    file_name: file_name.to_owned(),
                    seq_id: posting.seq_id,
                    start,
                    end,
                });
            }
            postings.push(posting);
        }

        Ok(LookupTable { wordsize, start, end, table_index, counts, offsets, postings })
    }

    /// Returns the word size this shard was built with.
    pub fn wordsize(&self) -> u32 { self.wordsize }

    /// Returns the first sequence id covered by this shard.
    pub fn start(&self) -> u32 { self.start }

    /// Returns one past the last sequence id covered by this shard.
    pub fn end(&self) -> u32 { self.end }

    /// Returns the position of this shard in the shard series.
    pub fn table_index(&self) -> i32 { self.table_index }

    /// Returns the total number of postings held.
    pub fn n_postings(&self) -> u32 { self.postings.len() as u32 }

    /// Returns the postings of a word, in sequence-id order.
    pub fn postings(&self, word: u64) -> &[Posting] {
        let word = word as usize;
        let from = self.offsets[word] as usize;
        &self.postings[from..from + self.counts[word] as usize]
    }
}
