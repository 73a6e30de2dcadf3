use displaydoc::Display;
use thiserror::Error;

#[derive(Debug, Error, Display)]
#[non_exhaustive]
/// Errors that may be thrown while loading or clustering the overlap graph
pub enum ClusterError {
    /// adjacency stream is malformed: {reason}
    BadAdjacency {
        /// what went wrong
        reason: String,
    },
    /// adjacency stream points at sequence {target}, but only {n_seq} sequences are declared
    EdgeOutOfRange {
        /// the offending target id
        target: i32,
        /// number of sequences the stream declared
        n_seq: u32,
    },
    /// general I/O error while reading the adjacency stream or a chimera file
    Io(#[from] std::io::Error),
}
