use displaydoc::Display;
use thiserror::Error;

#[derive(Debug, Error, Display)]
#[non_exhaustive]
/// Errors that may be thrown while reading or writing database and lookup files
pub enum IndexError {
    /// file {file_name} does not appear to be properly formatted: bad magic number
    BadMagic {
        /// name of the rejected file
        file_name: String,
    },
    /// file {file_name} declares a word size of {wordsize}, allowed range is 2..=24
    WordSizeOutOfRange {
        /// name of the rejected file
        file_name: String,
        /// the declared word size
        wordsize: u32,
    },
    /// lookup file {file_name} is inconsistent: descriptors add up to {from_counts} postings, header says {total}
    PostingCountMismatch {
        /// name of the rejected file
        file_name: String,
        /// sum over the per-word posting counts
        from_counts: u64,
        /// total postings declared in the header
        total: u32,
    },
    /// lookup file {file_name} holds a posting for sequence {seq_id}, outside its id range {start}..{end}
    PostingOutOfRange {
        /// name of the rejected file
        file_name: String,
        /// the out-of-range sequence id
        seq_id: u32,
        /// first id covered by the shard
        start: u32,
        /// one past the last id covered by the shard
        end: u32,
    },
    /// sequence id {seq_id} is not in this database of {n_seq} sequences
    SequenceOutOfRange {
        /// the requested id
        seq_id: u32,
        /// number of sequences in the database
        n_seq: u32,
    },
    /// general I/O error while accessing a database or lookup file
    Io(#[from] std::io::Error),
}
