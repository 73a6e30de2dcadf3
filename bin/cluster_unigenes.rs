use std::env;
use std::error::Error;
use std::fs::File;
use std::io::Write;

use clap::Parser;
use log::info;

use unigene_cluster::{articulation_points, depth_first_components, flip_reverse_complements,
                      load_chimera_ids, maximum_spanning_tree, DepthFirstForest, ScoreGraph};
use unigene_index::SequenceDatabase;
use unigene_io::out_writer;

#[derive(Parser, Debug)]
#[clap(name = "cluster_unigenes", version)]
#[clap(about = "Clusters sequences into putative unigenes from a binary adjacency list of \
                pairwise overlap scores read on standard input", long_about = None)]
struct Args {
    /// basename of the preformatted sequence database; when given, clusters list names instead of ids
    #[clap(long, short = 'd')]
    database: Option<String>,
    /// file of sequence ids which are (probably) chimeric; they are excluded from clustering
    #[clap(long, short = 'c')]
    chimera: Option<String>,
    /// swap components dominated by reverse-complement ids onto the forward strand
    #[clap(long, action)]
    flip_complements: bool,
    /// write the per-component assembly order (parent, node, edge score) to this file
    #[clap(long)]
    assembly_order: Option<String>,
    /// verbosity level: 0 normal, negative enables debugging messages, positive is quieter
    #[clap(long, short = 'v', default_value = "0", allow_hyphen_values = true)]
    verbose: i32,
}

fn member_label(db: &Option<SequenceDatabase>, member: usize) -> String {
    match db {
        Some(db) => db.name(member as u32).unwrap_or("").to_owned(),
        None => member.to_string(),
    }
}

fn print_clusters(forest: &DepthFirstForest, db: &Option<SequenceDatabase>)
        -> Result<(usize, usize), Box<dyn Error>> {

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut clusters = 0;
    for component in &forest.components {
        if component.len() <= 1 { continue; }
        writeln!(out, ">Cluster {} ({} sequences)", clusters, component.len())?;
        for &member in component {
            write!(out, "{} ", member_label(db, member))?;
        }
        writeln!(out)?;
        clusters += 1;
    }

    let singletons = forest.n_singletons();
    writeln!(out, ">Singletons ({} sequences)", singletons)?;
    for component in &forest.components {
        if component.len() == 1 {
            write!(out, "{} ", member_label(db, component[0]))?;
        }
    }
    writeln!(out)?;
    Ok((clusters, singletons))
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

    // ---------- load the adjacency stream and the optional sidecars ----------
    let graph = ScoreGraph::read_from(&mut std::io::stdin().lock())?;
    let db = match &args.database {
        Some(basename) => Some(SequenceDatabase::open(basename)?),
        None => None,
    };
    if let Some(db) = &db {
        if graph.n_nodes() as u32 > db.n_seq() {
            return Err("more sequences found in the adjacency list input than in the sequence \
                        database index".into());
        }
    }
    let chimeric = match &args.chimera {
        Some(file_name) => load_chimera_ids(file_name, graph.n_nodes())?,
        None => vec![false; graph.n_nodes()],
    };

    // ---------- cluster and report ----------
    let mut forest = depth_first_components(&graph, &chimeric);
    if args.flip_complements {
        flip_reverse_complements(&mut forest.components);
    }
    let flagged = articulation_points(&forest, graph.n_nodes());

    let (clusters, singletons) = print_clusters(&forest, &db)?;
    info!("Clusters {} Singletons {}", clusters, singletons);

    let mut arti_file = File::create("articulations.txt")?;
    for (seq_id, is_articulation) in flagged.iter().enumerate() {
        if *is_articulation {
            writeln!(arti_file, "{}", seq_id)?;
        }
    }

    // ---------- per-component assembly order ----------
    if let Some(file_name) = &args.assembly_order {
        let mut out = out_writer(file_name)?;
        for (k, component) in forest.components.iter().filter(|c| c.len() > 1).enumerate() {
            writeln!(out, ">Component {} ({} sequences)", k, component.len())?;
            for record in maximum_spanning_tree(&graph, component) {
                writeln!(out, "{} {} {}", record.parent, record.node, record.score)?;
            }
        }
        out.flush()?;
    }

    Ok(())
}
