use std::io::{BufRead, Read, Write};

use log::warn;

use unigene_io::{open_file, read_i32, read_i32_array, read_u32, write_i32, write_u32};

use crate::ClusterError;

/// One scored edge of the overlap graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreEdge {
    /// the other endpoint
    pub target: u32,
    /// overlap score of the pair
    pub score: i32,
}

/// The pairwise-overlap graph.
///
/// Logically undirected but recorded as a directed adjacency list, the way
/// the scanner stream delivers it. Edges live in one arena vector; each
/// node's outgoing edges are a contiguous range of it, addressed through the
/// offset table, so building the graph costs no per-node allocations.
pub struct ScoreGraph {
    offsets: Vec<usize>,
    edges: Vec<ScoreEdge>,
}

impl ScoreGraph {
    /// Builds a graph from per-node edge lists.
    pub fn from_lists(lists: &[Vec<ScoreEdge>]) -> ScoreGraph {
        let mut offsets = Vec::with_capacity(lists.len() + 1);
        let mut edges = Vec::with_capacity(lists.iter().map(|l| l.len()).sum());
        offsets.push(0);
        for list in lists {
            edges.extend_from_slice(list);
            offsets.push(edges.len());
        }
        ScoreGraph { offsets, edges }
    }

    /// Returns the number of nodes.
    pub fn n_nodes(&self) -> usize { self.offsets.len() - 1 }

    /// Returns the outgoing edges of a node.
    pub fn edges(&self, node: usize) -> &[ScoreEdge] {
        &self.edges[self.offsets[node]..self.offsets[node + 1]]
    }

    /// Reads the binary adjacency stream.
    ///
    /// Layout: `u32` node count, one `i32` edge count per node, then each
    /// node's edges as `{i32 target, i32 score}` pairs. A negative count or a
    /// target outside the declared node range is fatal.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<ScoreGraph, ClusterError> {
        let n_seq = read_u32(reader)?;
        let mut counts = Vec::with_capacity(n_seq as usize);
        for count in read_i32_array(reader, n_seq as usize)? {
            if count < 0 {
                return Err(ClusterError::BadAdjacency {
                    reason: format!("negative edge count {}", count),
                });
            }
            counts.push(count as usize);
        }
        let mut offsets = Vec::with_capacity(n_seq as usize + 1);
        let mut edges = Vec::with_capacity(counts.iter().sum());
        offsets.push(0);
        for count in counts {
            for _ in 0..count {
                let target = read_i32(reader)?;
                let score = read_i32(reader)?;
                if target < 0 || target >= n_seq as i32 {
                    return Err(ClusterError::EdgeOutOfRange { target, n_seq });
                }
                edges.push(ScoreEdge { target: target as u32, score });
            }
            offsets.push(edges.len());
        }
        Ok(ScoreGraph { offsets, edges })
    }

    /// Writes the graph in the binary adjacency stream layout.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), ClusterError> {
        write_u32(writer, self.n_nodes() as u32)?;
        for node in 0..self.n_nodes() {
            write_i32(writer, self.edges(node).len() as i32)?;
        }
        for edge in &self.edges {
            write_i32(writer, edge.target as i32)?;
            write_i32(writer, edge.score)?;
        }
        Ok(())
    }
}

/// Reads a chimera exclusion list: one sequence id per line, with an optional
/// `>` prefix. Ids outside the graph are ignored; unparsable lines are
/// warnings.
pub fn load_chimera_ids(file_name: &str, n_seq: usize) -> Result<Vec<bool>, ClusterError> {
    let mut chimeric = vec![false; n_seq];
    let reader = open_file(file_name)?;
    for line in reader.lines() {
        let line = line?;
        let token = match line.trim().trim_start_matches('>').split_whitespace().next() {
            Some(token) => token.to_owned(),
            None => continue,
        };
        match token.parse::<usize>() {
            Ok(seq_id) if seq_id < n_seq => chimeric[seq_id] = true,
            Ok(_) => {}
            Err(_) => warn!("Skipping unparsable chimera list line: {}", line),
        }
    }
    Ok(chimeric)
}
