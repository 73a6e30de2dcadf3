use std::io::Cursor;

use unigene_cluster::{ClusterError, ScoreEdge, ScoreGraph};

#[test]
fn adjacency_stream_round_trip() {
    let lists = vec![
        vec![ScoreEdge { target: 1, score: 100 }, ScoreEdge { target: 2, score: 80 }],
        vec![ScoreEdge { target: 0, score: 100 }],
        vec![ScoreEdge { target: 0, score: 80 }],
        vec![],
    ];
    let graph = ScoreGraph::from_lists(&lists);

    let mut stream: Vec<u8> = Vec::new();
    graph.write_to(&mut stream).unwrap();
    let loaded = ScoreGraph::read_from(&mut Cursor::new(stream)).unwrap();

    assert_eq!(loaded.n_nodes(), 4);
    for node in 0..4 {
        assert_eq!(loaded.edges(node), graph.edges(node));
    }
}

#[test]
fn out_of_range_edge_target_is_fatal() {
    let lists = vec![vec![ScoreEdge { target: 7, score: 10 }], vec![]];
    let graph = ScoreGraph::from_lists(&lists);

    let mut stream: Vec<u8> = Vec::new();
    graph.write_to(&mut stream).unwrap();
    assert!(matches!(ScoreGraph::read_from(&mut Cursor::new(stream)),
        Err(ClusterError::EdgeOutOfRange { target: 7, n_seq: 2 })));
}

#[test]
fn truncated_stream_is_an_io_error() {
    let lists = vec![vec![ScoreEdge { target: 1, score: 10 }], vec![]];
    let graph = ScoreGraph::from_lists(&lists);

    let mut stream: Vec<u8> = Vec::new();
    graph.write_to(&mut stream).unwrap();
    stream.truncate(stream.len() - 2);
    assert!(matches!(ScoreGraph::read_from(&mut Cursor::new(stream)),
        Err(ClusterError::Io(_))));
}

#[test]
fn bare_integer_chimera_lines_are_accepted() {
    // the '>' prefix is deliberately optional: hand-maintained exclusion
    // lists are plain id-per-line files, not FASTA-shaped records
    let path = std::env::temp_dir().join("unigene_chimera_bare.txt");
    std::fs::write(&path, "2\n5\n").unwrap();

    let chimeric = unigene_cluster::load_chimera_ids(path.to_str().unwrap(), 8).unwrap();
    assert_eq!(chimeric.iter().filter(|&&c| c).count(), 2);
    assert!(chimeric[2] && chimeric[5]);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn chimera_list_accepts_optional_fasta_prefix() {
    let path = std::env::temp_dir().join("unigene_chimera_list.txt");
    std::fs::write(&path, ">3\n1\n\n>12\nnot-an-id\n").unwrap();

    let chimeric = unigene_cluster::load_chimera_ids(path.to_str().unwrap(), 8).unwrap();
    assert_eq!(chimeric, vec![false, true, false, true, false, false, false, false]);

    let _ = std::fs::remove_file(&path);
}
