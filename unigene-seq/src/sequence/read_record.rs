use std::fmt;

use log::error;

/// A sequencing read: a name, nucleotide letters and per-base phred qualities.
///
/// A `ReadRecord` lives in the text stage of the pipeline. Its letters are
/// uppercase A/C/G/T plus the ambiguity codes N and X; the quality vector is
/// always exactly as long as the sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct ReadRecord {
    name: String,
    seq: Vec<u8>,
    quality: Vec<u32>,
}

impl ReadRecord {
    /// Creates a read from its parts.
    ///
    /// # Example
    /// ```rust
    /// use unigene_seq::sequence::ReadRecord;
    ///
    /// let read = ReadRecord::new("read-1", b"ACGT".to_vec(), vec![30; 4]);
    /// assert_eq!(read.name(), "read-1");
    /// assert_eq!(read.len(), 4);
    /// ```
    pub fn new(name: &str, seq: Vec<u8>, quality: Vec<u32>) -> Self {
        debug_assert_eq!(seq.len(), quality.len());
        ReadRecord { name: name.to_owned(), seq, quality }
    }

    /// Returns the name of this read.
    pub fn name(&self) -> &str { &self.name }

    /// Returns the nucleotide letters of this read.
    pub fn seq(&self) -> &[u8] { &self.seq }

    /// Returns the per-base quality scores of this read.
    pub fn quality(&self) -> &[u32] { &self.quality }

    /// Returns the number of bases in this read.
    pub fn len(&self) -> usize { self.seq.len() }

    /// Says whether this read holds no bases at all.
    pub fn is_empty(&self) -> bool { self.seq.is_empty() }

    /// Cuts this read down to its first `new_len` bases.
    pub fn truncate(&mut self, new_len: usize) {
        self.seq.truncate(new_len);
        self.quality.truncate(new_len);
    }

    /// Removes the first `n` bases of this read.
    pub fn cut_head(&mut self, n: usize) {
        let n = n.min(self.seq.len());
        self.seq.drain(..n);
        self.quality.drain(..n);
    }

    /// Builds the reverse-complement mate of this read.
    ///
    /// The mate keeps the qualities (reversed) and is named after this read
    /// with a `-` appended. Ambiguous bases complement to themselves.
    pub fn reverse_complement(&self) -> ReadRecord {
        let mut seq = Vec::with_capacity(self.seq.len());
        let mut quality = Vec::with_capacity(self.quality.len());
        for i in (0..self.seq.len()).rev() {
            seq.push(complement_letter(self.seq[i], &self.name, i));
            quality.push(self.quality[i]);
        }
        ReadRecord { name: format!("{}-", self.name), seq, quality }
    }
}

impl fmt::Display for ReadRecord {
    /// Formats this read as a FASTA entry.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, ">{}\n{}\n", self.name, String::from_utf8_lossy(&self.seq))
    }
}

fn complement_letter(letter: u8, name: &str, pos: usize) -> u8 {
    match letter {
        b'A' => b'T',
        b'C' => b'G',
        b'G' => b'C',
        b'T' => b'A',
        b'N' | b'X' => letter,
        _ => {
            error!("Unknown nucleotide '{}' in sequence {} at position {}", letter as char, name, pos);
            letter
        }
    }
}
