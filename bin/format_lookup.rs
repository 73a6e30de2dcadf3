use std::env;

use clap::Parser;
use log::info;

use unigene_index::{build_lookup_tables, IndexError, LookupConfig, SequenceDatabase};

#[derive(Parser, Debug)]
#[clap(name = "format_lookup", version)]
#[clap(about = "Creates memory-bounded word lookup tables from a formatted sequence database",
       long_about = None)]
struct Args {
    /// basename of the preformatted sequence database to word-index
    #[clap(long, short = 'd')]
    database: String,
    /// filename prefix for the lookup tables, written as <prefix>.lt.N; defaults to the database basename
    #[clap(long, short = 'o')]
    basename: Option<String>,
    /// assumed available core RAM for one resident lookup table, in megabytes
    #[clap(long, short = 'm', default_value = "192", value_parser = clap::value_parser!(u32).range(1..))]
    memsize: u32,
    /// word size of the index
    #[clap(long, short = 'w', default_value = "9")]
    wordsize: u32,
    /// skip every other sequence, keeping the reverse-complement mates out of the tables
    #[clap(long, short = 'f', action)]
    forward_only: bool,
    /// verbosity level: 0 normal, negative enables debugging messages, positive is quieter
    #[clap(long, short = 'v', default_value = "0", allow_hyphen_values = true)]
    verbose: i32,
}

fn main() -> Result<(), IndexError> {
    let args = Args::parse();
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", match args.verbose {
            v if v < 0 => "debug",
            0 => "info",
            _ => "warn",
        });
    }
    env_logger::init();

    let output_basename = args.basename.clone().unwrap_or_else(|| args.database.clone());
    info!("Output basename set to {}", output_basename);

    let mut db = SequenceDatabase::open(&args.database)?;
    let config = LookupConfig {
        wordsize: args.wordsize,
        memsize_mb: args.memsize,
        forward_only: args.forward_only,
    };
    build_lookup_tables(&mut db, &output_basename, &config)?;

    Ok(())
}
