use unigene_cluster::{articulation_points, depth_first_components, flip_reverse_complements,
                      ScoreEdge, ScoreGraph};

/// Builds a symmetric graph over `n` nodes from undirected scored pairs.
fn graph_of(n: usize, pairs: &[(usize, usize, i32)]) -> ScoreGraph {
    let mut lists: Vec<Vec<ScoreEdge>> = vec![Vec::new(); n];
    for &(a, b, score) in pairs {
        lists[a].push(ScoreEdge { target: b as u32, score });
        lists[b].push(ScoreEdge { target: a as u32, score });
    }
    ScoreGraph::from_lists(&lists)
}

#[test]
fn pair_forms_one_cluster_without_articulation_points() {
    let graph = graph_of(2, &[(0, 1, 100)]);
    let forest = depth_first_components(&graph, &vec![false; 2]);

    assert_eq!(forest.components, vec![vec![0, 1]]);
    assert_eq!(forest.n_singletons(), 0);
    let flagged = articulation_points(&forest, 2);
    assert!(!flagged[0] && !flagged[1]);
}

#[test]
fn middle_of_a_chain_is_an_articulation_point() {
    // overlaps a-b and b-c but no a-c
    let graph = graph_of(3, &[(0, 1, 100), (1, 2, 90)]);
    let forest = depth_first_components(&graph, &vec![false; 3]);

    assert_eq!(forest.components.len(), 1);
    assert_eq!(forest.components[0], vec![0, 1, 2]);
    let flagged = articulation_points(&forest, 3);
    assert_eq!(flagged, vec![false, true, false]);
}

#[test]
fn four_cycle_has_no_articulation_points() {
    let graph = graph_of(4, &[(0, 1, 80), (1, 2, 80), (2, 3, 80), (3, 0, 80)]);
    let forest = depth_first_components(&graph, &vec![false; 4]);

    assert_eq!(forest.components.len(), 1);
    assert_eq!(forest.components[0].len(), 4);
    let flagged = articulation_points(&forest, 4);
    assert_eq!(flagged, vec![false; 4]);
}

#[test]
fn components_partition_the_non_chimeric_nodes() {
    // two components and two isolated nodes
    let graph = graph_of(7, &[(0, 1, 80), (1, 2, 80), (4, 5, 90)]);
    let forest = depth_first_components(&graph, &vec![false; 7]);

    let mut seen = vec![0usize; 7];
    for component in &forest.components {
        for &member in component {
            seen[member] += 1;
        }
    }
    assert_eq!(seen, vec![1; 7]);
    assert_eq!(forest.n_singletons(), 2);       // nodes 3 and 6
}

#[test]
fn chimeric_nodes_are_left_out_entirely() {
    // node 1 bridges 0 and 2; excluding it splits the chain
    let graph = graph_of(3, &[(0, 1, 100), (1, 2, 90)]);
    let mut excluded = vec![false; 3];
    excluded[1] = true;
    let forest = depth_first_components(&graph, &excluded);

    assert_eq!(forest.components, vec![vec![0], vec![2]]);
}

#[test]
fn every_neighbor_is_classified_exactly_once() {
    let graph = graph_of(4, &[(0, 1, 80), (1, 2, 80), (2, 3, 80), (3, 0, 80)]);
    let forest = depth_first_components(&graph, &vec![false; 4]);

    for node in 0..4 {
        let classified = forest.tree_edges[node].len() + forest.back_edges[node].len();
        assert_eq!(classified, graph.edges(node).len());
    }
}

#[test]
fn removing_the_flagged_node_disconnects_its_component() {
    // bowtie: two triangles sharing node 2
    let graph = graph_of(5, &[(0, 1, 80), (1, 2, 80), (2, 0, 80),
                              (2, 3, 80), (3, 4, 80), (4, 2, 80)]);
    let forest = depth_first_components(&graph, &vec![false; 5]);
    let flagged = articulation_points(&forest, 5);
    assert_eq!(flagged, vec![false, false, true, false, false]);

    // removing node 2 splits the rest in two; removing any other node does not
    for node in 0..5 {
        let mut excluded = vec![false; 5];
        excluded[node] = true;
        let survivors = depth_first_components(&graph, &excluded);
        assert_eq!(survivors.components.len() > 1, flagged[node]);
    }
}

#[test]
fn mostly_complement_components_are_flipped() {
    // the database interleaves strands: read k sits at id 2k, its
    // reverse-complement mate at 2k + 1, so mates are always id ^ 1
    let mut components = vec![vec![5, 6, 7, 1], vec![2, 3, 4]];
    flip_reverse_complements(&mut components);

    assert_eq!(components[0], vec![4, 7, 6, 0]);    // odd majority: swapped onto mates
    assert_eq!(components[1], vec![2, 3, 4]);       // no strict odd majority: untouched
}
