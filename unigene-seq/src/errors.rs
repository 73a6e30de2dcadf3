use displaydoc::Display;
use thiserror::Error;

#[derive(Debug, Error, Display)]
#[non_exhaustive]
/// Errors that may be thrown while loading sequencing reads
pub enum SequenceError {
    /// FASTA parse error at line {line} in file {file_name}: {reason}
    FastaParseError {
        /// name of the offending file
        file_name: String,
        /// 1-based line number where parsing broke
        line: usize,
        /// what was expected or found
        reason: String,
    },
    /// quality record for sequence {name} holds {n_quality} values for {n_bases} bases
    QualityCountMismatch {
        /// name of the sequence with a mismatched quality record
        name: String,
        /// number of quality values found
        n_quality: usize,
        /// number of sequence letters found
        n_bases: usize,
    },
    /// general I/O error occurred while reading a sequence file
    Io(#[from] std::io::Error),
}
