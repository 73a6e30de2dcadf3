//! The overlap scanner: runs one query sequence against one lookup-table
//! shard, turning raw word matches into best-scoring diagonal chains.
//!
//! The stages, in order: word-hit accumulation with a per-target censor
//! ([`find_word_hits`]), collapsing of collinear runs ([`combine_runs`]),
//! per-target DAG construction and longest-path recovery
//! ([`PathScratch::best_path`]) and report selection ([`Scanner::scan`]).
//! A quality-weighted banded aligner ([`banded_smith_waterman`]) is available
//! as an optional refinement of accepted pairs; clustering never depends on
//! it.

mod banded;
mod path;
mod scanner;
mod wordhits;

pub use banded::*;
pub use path::*;
pub use scanner::*;
pub use wordhits::*;
