use std::collections::HashMap;
use std::io::BufRead;

use log::{error, info, warn};

use unigene_io::open_file;

use crate::sequence::ReadRecord;
use crate::SequenceError;

/// A raw FASTA entry: the record name and its concatenated body lines.
///
/// The body keeps a single space between the original lines so that it can be
/// consumed both as nucleotide text and as a whitespace-separated list of
/// quality values.
pub struct FastaEntry {
    /// record name: the first whitespace-delimited token of the header
    pub name: String,
    /// 1-based line number of the header line
    pub line: usize,
    /// body lines of the record, joined with single spaces
    pub body: String,
}

/// Iterator that provides entries from a FASTA-formatted buffer.
///
/// This object iterates over a buffer without loading its whole content, which
/// allows processing very large FASTA files. Malformed input (a missing header,
/// a header without a name) stops the iteration with an error carrying the
/// file name and line number.
pub struct FastaIterator<R> {
    reader: R,
    file_name: String,
    buffer: String,
    line_no: usize,
    header: Option<(String, usize)>,
    body: String,
    failed: bool,
}

impl<R: BufRead> FastaIterator<R> {
    pub fn new(reader: R, file_name: &str) -> Self {
        FastaIterator {
            reader,
            file_name: file_name.to_owned(),
            buffer: String::new(),
            line_no: 0,
            header: None,
            body: String::new(),
            failed: false,
        }
    }

    fn parse_error(&mut self, reason: &str) -> SequenceError {
        self.failed = true;
        SequenceError::FastaParseError {
            file_name: self.file_name.clone(),
            line: self.line_no,
            reason: reason.to_owned(),
        }
    }

    fn take_entry(&mut self, next_header: Option<(String, usize)>) -> Option<FastaEntry> {
        let entry = self.header.take().map(|(name, line)| FastaEntry {
            name,
            line,
            body: std::mem::take(&mut self.body),
        });
        self.header = next_header;
        self.body.clear();
        entry
    }
}

impl<R: BufRead> Iterator for FastaIterator<R> {
    type Item = Result<FastaEntry, SequenceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed { return None; }
        loop {
            self.buffer.clear();
            match self.reader.read_line(&mut self.buffer) {
                Ok(0) => return self.take_entry(None).map(Ok),
                Ok(_) => {
                    self.line_no += 1;
                    let line = self.buffer.trim();
                    if let Some(header) = line.strip_prefix('>') {
                        let name = match header.split_whitespace().next() {
                            Some(name) => name.to_owned(),
                            None => return Some(Err(self.parse_error("sequence name not found in header"))),
                        };
                        let next = Some((name, self.line_no));
                        if let Some(entry) = self.take_entry(next) {
                            return Some(Ok(entry));
                        }
                    } else if !line.is_empty() {
                        if self.header.is_none() {
                            return Some(Err(self.parse_error("header line expected, beginning with '>'")));
                        }
                        if !self.body.is_empty() { self.body.push(' '); }
                        self.body.push_str(line);
                    }
                }
                Err(e) => {
                    self.failed = true;
                    return Some(Err(SequenceError::Io(e)));
                }
            }
        }
    }
}

/// Reads all sequences from a FASTA-formatted buffer.
///
/// Letters are uppercased; only the nucleotide alphabet (A, C, G, T plus the
/// ambiguity codes N and X) is kept, everything else found inside a record
/// body is dropped.
pub fn read_fasta_sequences<R: BufRead>(reader: R, file_name: &str)
        -> Result<Vec<(String, Vec<u8>)>, SequenceError> {

    let mut sequences = Vec::new();
    for entry in FastaIterator::new(reader, file_name) {
        let entry = entry?;
        let seq: Vec<u8> = entry.body.bytes()
            .map(|letter| letter.to_ascii_uppercase())
            .filter(|letter| matches!(letter, b'A' | b'C' | b'G' | b'T' | b'N' | b'X'))
            .collect();
        sequences.push((entry.name, seq));
    }
    Ok(sequences)
}

/// Reads all records of a FASTA-shaped quality file.
///
/// Each record body is a list of whitespace-separated, non-negative integers.
/// A non-numeric token is a fatal parse error.
pub fn read_quality_records<R: BufRead>(reader: R, file_name: &str)
        -> Result<Vec<(String, Vec<u32>)>, SequenceError> {

    let mut records = Vec::new();
    for entry in FastaIterator::new(reader, file_name) {
        let entry = entry?;
        let mut values = Vec::new();
        for token in entry.body.split_ascii_whitespace() {
            match token.parse::<u32>() {
                Ok(value) => values.push(value),
                Err(_) => {
                    return Err(SequenceError::FastaParseError {
                        file_name: file_name.to_owned(),
                        line: entry.line,
                        reason: format!("non-numeric characters found where phred quality values \
                                         expected in record {}", entry.name),
                    });
                }
            }
        }
        records.push((entry.name, values));
    }
    Ok(records)
}

/// Loads reads from a FASTA sequence file and its companion quality file.
///
/// Records are paired by name. A quality record naming an unknown sequence and
/// a duplicate quality record are warnings, recovered by skipping the record;
/// a quality record of the wrong length is fatal. A sequence left without any
/// quality record gets uniform zero qualities.
pub fn load_reads(seq_fname: &str, qual_fname: &str) -> Result<Vec<ReadRecord>, SequenceError> {

    let sequences = read_fasta_sequences(open_file(seq_fname)?, seq_fname)?;
    info!("Loaded {} sequences from {}", sequences.len(), seq_fname);

    let mut index_of: HashMap<&str, usize> = HashMap::new();
    for (i, (name, _)) in sequences.iter().enumerate() {
        index_of.entry(name.as_str()).or_insert(i);
    }

    let mut qualities: Vec<Option<Vec<u32>>> = vec![None; sequences.len()];
    let mut n_quality = 0;
    for (name, values) in read_quality_records(open_file(qual_fname)?, qual_fname)? {
        let i = match index_of.get(name.as_str()) {
            Some(&i) => i,
            None => {
                warn!("Sequence {} in quality file was not found in the FASTA sequence input file", name);
                continue;
            }
        };
        if qualities[i].is_some() {
            warn!("Sequence {} has more than one entry in the quality file", name);
            continue;
        }
        if values.len() != sequences[i].1.len() {
            return Err(SequenceError::QualityCountMismatch {
                name,
                n_quality: values.len(),
                n_bases: sequences[i].1.len(),
            });
        }
        qualities[i] = Some(values);
        n_quality += 1;
    }
    info!("Loaded {} corresponding quality records from {}", n_quality, qual_fname);

    let reads = sequences.into_iter().zip(qualities)
        .map(|((name, seq), quality)| {
            let quality = quality.unwrap_or_else(|| {
                error!("Sequence {} has no entry in the quality file", name);
                vec![0; seq.len()]
            });
            ReadRecord::new(&name, seq, quality)
        })
        .collect();
    Ok(reads)
}
