use crate::DepthFirstForest;

/// Flags the articulation points of every component.
///
/// Works off the tree and back edges the DFS recorded. Discovery levels are
/// assigned down the tree; the lowlink of a node is the minimum of its own
/// level, the levels of its back-edge targets and the lowlinks of its tree
/// children, computed in reverse preorder so children resolve first. The root
/// of a component is an articulation point iff it kept two or more tree
/// children; any other node is one iff some tree child's lowlink fails to
/// climb above the node's level.
pub fn articulation_points(forest: &DepthFirstForest, n_nodes: usize) -> Vec<bool> {
    let mut flagged = vec![false; n_nodes];
    let mut level = vec![0usize; n_nodes];
    let mut low = vec![0usize; n_nodes];

    for component in &forest.components {
        if component.len() <= 1 { continue; }
        let root = component[0];

        // ---------- preorder walk down the recorded DFS tree
        let mut preorder = Vec::with_capacity(component.len());
        let mut stack = vec![(root, 0usize)];
        while let Some((node, node_level)) = stack.pop() {
            level[node] = node_level;
            preorder.push(node);
            for &child in &forest.tree_edges[node] {
                stack.push((child, node_level + 1));
            }
        }

        // ---------- lowlinks in reverse preorder: children before parents
        for &node in preorder.iter().rev() {
            let mut lowest = level[node];
            for &target in &forest.back_edges[node] {
                lowest = lowest.min(level[target]);
            }
            for &child in &forest.tree_edges[node] {
                lowest = lowest.min(low[child]);
            }
            low[node] = lowest;
        }

        if forest.tree_edges[root].len() > 1 {
            flagged[root] = true;
        }
        for &node in &preorder {
            if node == root { continue; }
            if forest.tree_edges[node].iter().any(|&child| low[child] >= level[node]) {
                flagged[node] = true;
            }
        }
    }
    flagged
}
