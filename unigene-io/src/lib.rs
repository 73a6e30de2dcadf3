//! Provides I/O helpers shared by the unigene crates: little-endian binary
//! primitives for the on-disk formats and file opening / writer utilities.

mod binary;
mod utils;

// re-export symbols to the top-most level of the module's name space
pub use binary::*;
pub use utils::*;
