use log::info;

use crate::ScoreGraph;

/// Everything the clustering DFS discovers.
///
/// Components hold their members in visit order, the first member being the
/// DFS root. For every node, each neighbor followed during the visit lands in
/// exactly one of its two edge lists: `tree_edges` points at the children it
/// discovered, `back_edges` at neighbors that were already visited.
pub struct DepthFirstForest {
    pub components: Vec<Vec<usize>>,
    pub tree_edges: Vec<Vec<usize>>,
    pub back_edges: Vec<Vec<usize>>,
}

impl DepthFirstForest {
    /// Returns the number of single-member components.
    pub fn n_singletons(&self) -> usize {
        self.components.iter().filter(|c| c.len() == 1).count()
    }
}

/// Finds the connected components of the overlap graph.
///
/// The traversal is an iterative depth-first search over an explicit stack of
/// `(node, next-edge-index)` frames, so arbitrarily large components cannot
/// overflow the call stack. Nodes marked `excluded` (the chimera list) join
/// no component and edges pointing at them are skipped.
pub fn depth_first_components(graph: &ScoreGraph, excluded: &[bool]) -> DepthFirstForest {
    let n_nodes = graph.n_nodes();
    let mut visited = vec![false; n_nodes];
    let mut tree_edges: Vec<Vec<usize>> = vec![Vec::new(); n_nodes];
    let mut back_edges: Vec<Vec<usize>> = vec![Vec::new(); n_nodes];
    let mut components: Vec<Vec<usize>> = Vec::new();
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..n_nodes {
        if visited[root] || excluded[root] { continue; }

        let mut component = vec![root];
        visited[root] = true;
        stack.push((root, 0));
        while !stack.is_empty() {
            let (node, edge_index) = {
                let frame = stack.last_mut().unwrap();
                if frame.1 >= graph.edges(frame.0).len() {
                    stack.pop();
                    continue;
                }
                frame.1 += 1;
                (frame.0, frame.1 - 1)
            };
            let target = graph.edges(node)[edge_index].target as usize;
            if excluded[target] { continue; }
            if !visited[target] {
                visited[target] = true;
                tree_edges[node].push(target);
                component.push(target);
                stack.push((target, 0));
            } else {
                back_edges[node].push(target);
            }
        }
        components.push(component);
    }

    info!("Found {} connected components", components.len());
    DepthFirstForest { components, tree_edges, back_edges }
}

/// Swaps mostly-reverse-complement components onto the forward strand.
///
/// The database interleaves strands, so every member's mate is `member ^ 1`
/// and reverse-complement records sit at the odd ids. A component in which
/// odd ids form the strict majority has every member swapped onto its mate.
pub fn flip_reverse_complements(components: &mut [Vec<usize>]) {
    for component in components.iter_mut() {
        let rc_count = component.iter().filter(|&&member| member & 0x1 == 1).count();
        if rc_count > component.len() / 2 {
            for member in component.iter_mut() {
                *member ^= 0x1;
            }
        }
    }
}
