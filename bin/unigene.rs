use std::env;
use std::error::Error;
use std::fs::File;
use std::io::Write;

use clap::Parser;
use log::info;

use unigene_cluster::{articulation_points, depth_first_components, flip_reverse_complements,
                      load_chimera_ids, maximum_spanning_tree, ScoreEdge, ScoreGraph};
use unigene_index::{build_lookup_tables, interleave_complements, write_database, LookupConfig,
                    LookupTable, SequenceDatabase};
use unigene_io::out_writer;
use unigene_scan::{banded_smith_waterman, ScanParams, Scanner};
use unigene_seq::sequence::{load_reads, reverse_complement, truncate_poly_tails, ReadRecord};

#[derive(Parser, Debug)]
#[clap(name = "unigene", version)]
#[clap(about = "Runs the whole unigene pipeline: database formatting, word indexing, overlap \
                scanning and graph clustering", long_about = None)]
struct Args {
    /// input FASTA sequence file
    #[clap(long, short = 's')]
    seqfile: String,
    /// input FASTA phred quality file
    #[clap(long, short = 'q')]
    qualfile: String,
    /// basename for the database and lookup files written during the run
    #[clap(long, short = 'o', default_value = "unigene")]
    basename: String,
    /// shard memory budget in megabytes
    #[clap(long, short = 'm', default_value = "192", value_parser = clap::value_parser!(u32).range(1..))]
    memsize: u32,
    /// word size of the index
    #[clap(long, short = 'w', default_value = "9")]
    wordsize: u32,
    /// keep the reverse-complement mates out of the lookup tables
    #[clap(long, short = 'f', action)]
    forward_only: bool,
    /// minimum overlap path score for a pair to enter the cluster graph
    #[clap(long, default_value = "75")]
    threshold: i32,
    /// file of sequence ids which are (probably) chimeric; excluded from clustering
    #[clap(long, short = 'c')]
    chimera: Option<String>,
    /// swap components dominated by reverse-complement ids onto the forward strand
    #[clap(long, action)]
    flip_complements: bool,
    /// re-score each accepted forward pair with the banded quality-weighted aligner
    #[clap(long, action)]
    refine: bool,
    /// write the per-component assembly order to this file
    #[clap(long, default_value = "assembly_order.txt")]
    assembly_order: String,
    /// verbosity level: 0 normal, negative enables debugging messages, positive is quieter
    #[clap(long, short = 'v', default_value = "0", allow_hyphen_values = true)]
    verbose: i32,
}

/// Recovers the text-stage record of a database id: even ids are the loaded
/// reads, odd ids their reverse-complement mates.
fn text_record(reads: &[ReadRecord], seq_id: u32) -> ReadRecord {
    let read = &reads[(seq_id / 2) as usize];
    if seq_id & 0x1 == 0 { read.clone() } else { read.reverse_complement() }
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

    // ---------- stages 1-2: load the reads, truncate tails, write the database ----------
    let mut reads = load_reads(&args.seqfile, &args.qualfile)?;
    truncate_poly_tails(&mut reads);
    let sequences = interleave_complements(&reads);
    write_database(&args.basename, &sequences)?;
    drop(sequences);

    let mut db = SequenceDatabase::open(&args.basename)?;
    let n_seq = db.n_seq();

    // ---------- stage 3: word-index the database into memory-bounded shards ----------
    let config = LookupConfig {
        wordsize: args.wordsize,
        memsize_mb: args.memsize,
        forward_only: args.forward_only,
    };
    let shard_files = build_lookup_tables(&mut db, &args.basename, &config)?;

    // ---------- stage 4: scan every sequence against every shard ----------
    let params = ScanParams { threshold: args.threshold, ..ScanParams::default() };
    let mut adjacency: Vec<Vec<ScoreEdge>> = vec![Vec::new(); n_seq as usize];
    for shard_file in &shard_files {
        // one shard is resident at a time; it is freed before the next one loads
        let table = LookupTable::open(shard_file)?;
        let mut scanner = Scanner::new(&table, params);
        let mut codes: Vec<u8> = Vec::new();
        for seq_id in 0..n_seq {
            db.read_into(seq_id, &mut codes)?;
            for rc_pass in [false, true] {
                if rc_pass { reverse_complement(&mut codes); }
                for report in scanner.scan(&codes, seq_id) {
                    // a sequence and its reverse-complement mate (id ^ 1) always
                    // rediscover each other at full score; neither edge says
                    // anything about real overlap, so both stay out of the graph
                    if report.target == seq_id || report.target == (seq_id ^ 0x1) { continue; }
                    adjacency[seq_id as usize].push(ScoreEdge {
                        target: report.target,
                        score: report.score,
                    });
                    adjacency[report.target as usize].push(ScoreEdge {
                        target: seq_id,
                        score: report.score,
                    });
                    if args.refine && !rc_pass {
                        let a = text_record(&reads, seq_id);
                        let b = text_record(&reads, report.target);
                        let alignment = banded_smith_waterman(&a, &b,
                                (report.min_di + report.max_di) / 2, 20);
                        info!("Refined {} vs {}: banded score {:.1}, {} mismatches, \
                               difference weight {:.3}",
                              a.name(), b.name(), alignment.align_score, alignment.mismatches,
                              (alignment.mismatch_score + alignment.trim_score)
                                  / alignment.length.max(1) as f64);
                    }
                }
            }
        }
        info!("Scanned {} sequences against lookup table {}", n_seq, table.table_index());
    }

    // ---------- stage 5: cluster the overlap graph ----------
    let graph = ScoreGraph::from_lists(&adjacency);
    let chimeric = match &args.chimera {
        Some(file_name) => load_chimera_ids(file_name, graph.n_nodes())?,
        None => vec![false; graph.n_nodes()],
    };
    let mut forest = depth_first_components(&graph, &chimeric);
    if args.flip_complements {
        flip_reverse_complements(&mut forest.components);
    }
    let flagged = articulation_points(&forest, graph.n_nodes());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut clusters = 0;
    for component in &forest.components {
        if component.len() <= 1 { continue; }
        writeln!(out, ">Cluster {} ({} sequences)", clusters, component.len())?;
        for &member in component {
            write!(out, "{} ", db.name(member as u32)?)?;
        }
        writeln!(out)?;
        clusters += 1;
    }
    let singletons = forest.n_singletons();
    writeln!(out, ">Singletons ({} sequences)", singletons)?;
    for component in &forest.components {
        if component.len() == 1 {
            write!(out, "{} ", db.name(component[0] as u32)?)?;
        }
    }
    writeln!(out)?;
    info!("Clusters {} Singletons {}", clusters, singletons);

    let mut arti_file = File::create("articulations.txt")?;
    for (seq_id, is_articulation) in flagged.iter().enumerate() {
        if *is_articulation {
            writeln!(arti_file, "{}", seq_id)?;
        }
    }

    // ---------- stage 6: maximum spanning tree per component ----------
    let mut order_out = out_writer(&args.assembly_order)?;
    for (k, component) in forest.components.iter().filter(|c| c.len() > 1).enumerate() {
        writeln!(order_out, ">Component {} ({} sequences)", k, component.len())?;
        for record in maximum_spanning_tree(&graph, component) {
            writeln!(order_out, "{} {} {}", record.parent, record.node, record.score)?;
        }
    }
    order_out.flush()?;

    Ok(())
}
