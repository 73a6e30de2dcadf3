//! Central registry of the magic tags opening every unigene file.
//!
//! Each tag packs a three-letter ASCII file-kind name plus one version digit
//! into the little-endian `u32` every file starts with. Bumping a format
//! means bumping its digit here and nowhere else.

/// Tag of the sequence index file (`*.ind`).
pub const INDEX_MAGIC: u32 = u32::from_le_bytes(*b"UGI1");

/// Tag of the packed sequence blob (`*.sbin`).
pub const BLOB_MAGIC: u32 = u32::from_le_bytes(*b"UGB1");

/// Tag of a lookup-table shard (`<basename>.lt.<n>`).
pub const LOOKUP_MAGIC: u32 = u32::from_le_bytes(*b"UGL1");
