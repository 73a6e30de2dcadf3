use std::env;
use std::io::Write;

use clap::Parser;
use log::info;

use unigene_index::{IndexError, LookupTable, SequenceDatabase};
use unigene_scan::{report_line, ScanParams, Scanner};
use unigene_seq::sequence::reverse_complement;

#[derive(Parser, Debug)]
#[clap(name = "scan_overlaps", version)]
#[clap(about = "Scans a formatted sequence database against a lookup table, approximating \
                alignment by linking together runs of matching words", long_about = None)]
struct Args {
    /// basename of the preformatted sequence database
    #[clap(long, short = 's')]
    seqfile: String,
    /// preformatted lookup table to scan against
    #[clap(long, short = 'l')]
    lookupfile: String,
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
    info!("Input database basename set to {}", args.seqfile);

    let mut db = SequenceDatabase::open(&args.seqfile)?;
    let table = LookupTable::open(&args.lookupfile)?;
    let mut scanner = Scanner::new(&table, ScanParams::default());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut codes: Vec<u8> = Vec::new();
    for seq_id in 0..db.n_seq() {
        db.read_into(seq_id, &mut codes)?;
        let query_length = codes.len() as i32;

        for report in scanner.scan(&codes, seq_id) {
            let target_length = db.seq_length(report.target)? as i32;
            writeln!(out, "{}", report_line(seq_id, query_length, target_length, &report, false))?;
        }

        reverse_complement(&mut codes);
        for report in scanner.scan(&codes, seq_id) {
            let target_length = db.seq_length(report.target)? as i32;
            writeln!(out, "{}", report_line(seq_id, query_length, target_length, &report, true))?;
        }
    }

    Ok(())
}
