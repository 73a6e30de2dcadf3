use log::debug;

use crate::ScoreGraph;

/// One assembly-order record: `node` joins the tree under `parent` through an
/// edge of the given score. The root carries parent −1 and score 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssemblyEdge {
    pub parent: i32,
    pub node: u32,
    pub score: i32,
}

/// Grows a maximum-weight spanning tree over one component, Prim-style.
///
/// The root is the component member owning the highest-scoring incident edge.
/// Extract-max is a plain array scan over the component members, fine at the
/// component sizes seen here; a binary heap would drop in if they grew.
/// Returns one record per member, sorted by edge score descending: the
/// assembly order, with the root's own record last.
pub fn maximum_spanning_tree(graph: &ScoreGraph, component: &[usize]) -> Vec<AssemblyEdge> {
    let n_nodes = graph.n_nodes();
    let mut allowed = vec![false; n_nodes];
    let mut used = vec![false; n_nodes];
    let mut key = vec![i32::MIN; n_nodes];
    let mut parent = vec![-1i32; n_nodes];

    // ---------- root at the endpoint owning the best incident edge
    let mut root = component[0];
    let mut best_score = -1;
    for &member in component {
        allowed[member] = true;
        for edge in graph.edges(member) {
            if edge.score > best_score {
                best_score = edge.score;
                root = member;
            }
        }
    }
    key[root] = 0;

    let mut remaining = component.len();
    while remaining > 0 {
        let mut next = None;
        for &member in component {
            if used[member] { continue; }
            if next.map_or(true, |best| key[member] > key[best]) {
                next = Some(member);
            }
        }
        let node = next.unwrap();
        used[node] = true;
        remaining -= 1;

        // relax the freed node's edges into the candidate set
        for edge in graph.edges(node) {
            let target = edge.target as usize;
            if !allowed[target] || used[target] { continue; }
            if edge.score > key[target] {
                key[target] = edge.score;
                parent[target] = node as i32;
            }
        }
    }

    debug!("Spanning tree rooted at {} over {} nodes", root, component.len());
    let mut order: Vec<AssemblyEdge> = component.iter()
        .map(|&member| AssemblyEdge {
            parent: parent[member],
            node: member as u32,
            score: if key[member] == i32::MIN { 0 } else { key[member] },
        })
        .collect();
    order.sort_by(|a, b| b.score.cmp(&a.score));
    order
}
