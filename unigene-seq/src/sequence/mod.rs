//! Provides [`ReadRecord`](crate::sequence::ReadRecord) structs and the operations applied to them

mod fasta;
mod polytail;
mod read_record;
mod twobit;

pub use fasta::*;
pub use polytail::*;
pub use read_record::*;
pub use twobit::*;
