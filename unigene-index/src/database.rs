use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};

use log::info;

use unigene_io::{read_bytes, read_u32, write_u32};
use unigene_seq::sequence::{encode, reverse_complement, ReadRecord};

use crate::{IndexError, BLOB_MAGIC, INDEX_MAGIC};

/// Per-sequence metadata stored in the index file.
///
/// `name_pos` points into the concatenated name block of the index file;
/// `seqbin_pos` is the absolute byte offset of the sequence's codes inside
/// the blob file.
#[derive(Clone, Copy, Debug, Default)]
pub struct SeqMeta {
    pub name_pos: u32,
    pub name_length: u32,
    pub seq_length: u32,
    pub seqbin_pos: u32,
}

/// A named, 2-bit-encoded sequence ready to enter the database.
#[derive(Clone, Debug)]
pub struct DbSequence {
    pub name: String,
    pub codes: Vec<u8>,
}

/// Encodes reads and interleaves each with its reverse complement.
///
/// Input read `k` becomes database id `2k` and its reverse-complement mate id
/// `2k + 1`, named with a `-` appended; mates are always `id ^ 1`. Ambiguous
/// bases disappear during encoding, so both strands keep the same length.
pub fn interleave_complements(reads: &[ReadRecord]) -> Vec<DbSequence> {
    let mut sequences = Vec::with_capacity(reads.len() * 2);
    for read in reads {
        let codes = encode(read.seq());
        let mut mate_codes = codes.clone();
        reverse_complement(&mut mate_codes);
        sequences.push(DbSequence { name: read.name().to_owned(), codes });
        sequences.push(DbSequence { name: format!("{}-", read.name()), codes: mate_codes });
    }
    sequences
}

/// Writes the two database files (`<basename>.ind`, `<basename>.sbin`).
///
/// The index file holds the magic tag, the sequence count, one [`SeqMeta`]
/// per sequence and the NUL-terminated sequence names; the blob holds the
/// magic tag followed by every sequence's codes, one byte per base, in id
/// order.
pub fn write_database(basename: &str, sequences: &[DbSequence]) -> Result<(), IndexError> {
    let ind_name = format!("{}.ind", basename);
    let bin_name = format!("{}.sbin", basename);

    let mut indfile = BufWriter::new(File::create(&ind_name)?);
    write_u32(&mut indfile, INDEX_MAGIC)?;
    write_u32(&mut indfile, sequences.len() as u32)?;

    let mut name_pos: u32 = 0;
    let mut seqbin_pos: u32 = 4;                    // codes start right after the blob magic
    for sequence in sequences {
        write_u32(&mut indfile, name_pos)?;
        write_u32(&mut indfile, sequence.name.len() as u32)?;
        write_u32(&mut indfile, sequence.codes.len() as u32)?;
        write_u32(&mut indfile, seqbin_pos)?;
        name_pos += sequence.name.len() as u32 + 1;
        seqbin_pos += sequence.codes.len() as u32;
    }
    for sequence in sequences {
        indfile.write_all(sequence.name.as_bytes())?;
        indfile.write_all(&[0u8])?;
    }
    indfile.flush()?;

    let mut binfile = BufWriter::new(File::create(&bin_name)?);
    write_u32(&mut binfile, BLOB_MAGIC)?;
    for sequence in sequences {
        binfile.write_all(&sequence.codes)?;
    }
    binfile.flush()?;

    info!("Wrote {} sequences under database basename {}", sequences.len(), basename);
    Ok(())
}

/// Read-only view of a sequence database.
///
/// The index file is loaded whole (metadata plus names); sequence codes are
/// read from the blob on demand so that memory stays bounded by the caller's
/// working set, not by the database size.
pub struct SequenceDatabase {
    metas: Vec<SeqMeta>,
    names: Vec<u8>,
    binfile: BufReader<File>,
}

impl SequenceDatabase {
    /// Opens `<basename>.ind` and `<basename>.sbin`, checking both magic tags.
    pub fn open(basename: &str) -> Result<SequenceDatabase, IndexError> {
        let ind_name = format!("{}.ind", basename);
        let bin_name = format!("{}.sbin", basename);

        let mut indfile = BufReader::new(File::open(&ind_name)?);
        if read_u32(&mut indfile)? != INDEX_MAGIC {
            return Err(IndexError::BadMagic { file_name: ind_name });
        }
        let n_seq = read_u32(&mut indfile)? as usize;
        let mut metas = Vec::with_capacity(n_seq);
        for _ in 0..n_seq {
            metas.push(SeqMeta {
                name_pos: read_u32(&mut indfile)?,
                name_length: read_u32(&mut indfile)?,
                seq_length: read_u32(&mut indfile)?,
                seqbin_pos: read_u32(&mut indfile)?,
            });
        }
        let names_size: usize = metas.iter().map(|m| m.name_length as usize + 1).sum();
        let names = read_bytes(&mut indfile, names_size)?;

        let mut binfile = BufReader::new(File::open(&bin_name)?);
        if read_u32(&mut binfile)? != BLOB_MAGIC {
            return Err(IndexError::BadMagic { file_name: bin_name });
        }

        Ok(SequenceDatabase { metas, names, binfile })
    }

    /// Returns the number of sequences in this database.
    pub fn n_seq(&self) -> u32 { self.metas.len() as u32 }

    /// Returns the metadata record of a sequence.
    pub fn meta(&self, seq_id: u32) -> Result<&SeqMeta, IndexError> {
        self.metas.get(seq_id as usize)
            .ok_or(IndexError::SequenceOutOfRange { seq_id, n_seq: self.n_seq() })
    }

    /// Returns the length of a sequence, in bases.
    pub fn seq_length(&self, seq_id: u32) -> Result<u32, IndexError> {
        Ok(self.meta(seq_id)?.seq_length)
    }

    /// Returns the name of a sequence.
    pub fn name(&self, seq_id: u32) -> Result<&str, IndexError> {
        let meta = self.meta(seq_id)?;
        let start = meta.name_pos as usize;
        let end = start + meta.name_length as usize;
        Ok(self.names.get(start..end)
            .and_then(|name| std::str::from_utf8(name).ok())
            .unwrap_or(""))
    }

    /// Reads the 2-bit codes of a sequence into a reusable buffer.
    pub fn read_into(&mut self, seq_id: u32, codes: &mut Vec<u8>) -> Result<(), IndexError> {
        let meta = *self.meta(seq_id)?;
        self.binfile.seek(SeekFrom::Start(meta.seqbin_pos as u64))?;
        codes.resize(meta.seq_length as usize, 0);
        self.binfile.read_exact(codes)?;
        Ok(())
    }

    /// Reads the 2-bit codes of a sequence into a fresh buffer.
    pub fn sequence(&mut self, seq_id: u32) -> Result<Vec<u8>, IndexError> {
        let mut codes = Vec::new();
        self.read_into(seq_id, &mut codes)?;
        Ok(codes)
    }
}
