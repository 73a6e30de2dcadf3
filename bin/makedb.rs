use std::env;
use std::error::Error;

use clap::Parser;
use log::info;

use unigene_index::{interleave_complements, write_database};
use unigene_seq::sequence::{load_reads, truncate_poly_tails};

#[derive(Parser, Debug)]
#[clap(name = "makedb", version)]
#[clap(about = "Formats FASTA reads and their qualities into a binary sequence database", long_about = None)]
struct Args {
    /// input FASTA sequence file
    #[clap(long, short = 's')]
    seqfile: String,
    /// input FASTA phred quality file
    #[clap(long, short = 'q')]
    qualfile: String,
    /// basename of the database files to write
    #[clap(long, short = 'o')]
    basename: String,
    /// verbosity level: 0 normal, negative enables debugging messages, positive is quieter
    #[clap(long, short = 'v', default_value = "0", allow_hyphen_values = true)]
    verbose: i32,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", match args.verbose {
            v if v < 0 => "debug",
            0 => "info",
            _ => "warn",
        });
    }
    env_logger::init();

    // ---------- load and preprocess the reads ----------
    let mut reads = load_reads(&args.seqfile, &args.qualfile)?;
    truncate_poly_tails(&mut reads);

    // ---------- interleave reverse complements and write the database ----------
    let sequences = interleave_complements(&reads);
    write_database(&args.basename, &sequences)?;
    info!("Database basename set to {}", args.basename);

    Ok(())
}
