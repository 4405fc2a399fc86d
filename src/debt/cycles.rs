//! Cycle enumeration over an index-addressed graph.

use crate::matrix::CouplingMatrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VertexState {
    Unvisited,
    OnStack,
    Done,
}

/// Matrix vertices mapped to dense indices with sorted adjacency lists.
#[derive(Debug, Clone, Default)]
pub struct IndexedGraph {
    names: Vec<String>,
    adjacency: Vec<Vec<usize>>,
}

impl IndexedGraph {
    pub fn from_matrix(matrix: &CouplingMatrix) -> Self {
        let names = matrix.vertices();
        let index_of = |name: &str| {
            names
                .binary_search_by(|candidate| candidate.as_str().cmp(name))
                .ok()
        };

        let adjacency = names
            .iter()
            .map(|from| {
                matrix
                    .successors(from)
                    .filter_map(|(to, _)| index_of(to))
                    .collect()
            })
            .collect();

        Self { names, adjacency }
    }

    pub fn name(&self, index: usize) -> &str {
        &self.names[index]
    }

    /// Every cycle closed by a back edge of a depth-first traversal.
    ///
    /// Iterative, with an explicit stack of `(vertex, next neighbor)` frames
    /// so deep package chains cannot overflow the call stack. When a neighbor
    /// is still on the stack, the stack slice from that neighbor to the top is
    /// the cycle. Roots are taken in vertex order, so the result is stable for
    /// a given matrix.
    pub fn find_cycles(&self) -> Vec<Vec<usize>> {
        let mut state = vec![VertexState::Unvisited; self.names.len()];
        let mut cycles = Vec::new();

        for root in 0..self.names.len() {
            if state[root] != VertexState::Unvisited {
                continue;
            }
            state[root] = VertexState::OnStack;
            let mut stack: Vec<(usize, usize)> = vec![(root, 0)];

            while let Some(&(vertex, cursor)) = stack.last() {
                let neighbors = &self.adjacency[vertex];
                let mut next = cursor;
                let mut descend = None;

                while next < neighbors.len() {
                    let neighbor = neighbors[next];
                    next += 1;
                    match state[neighbor] {
                        VertexState::OnStack => {
                            cycles.push(cycle_from(&stack, neighbor));
                        }
                        VertexState::Unvisited => {
                            descend = Some(neighbor);
                            break;
                        }
                        VertexState::Done => {}
                    }
                }

                if let Some(top) = stack.last_mut() {
                    top.1 = next;
                }
                match descend {
                    Some(neighbor) => {
                        state[neighbor] = VertexState::OnStack;
                        stack.push((neighbor, 0));
                    }
                    None => {
                        state[vertex] = VertexState::Done;
                        stack.pop();
                    }
                }
            }
        }

        cycles
    }
}

fn cycle_from(stack: &[(usize, usize)], start: usize) -> Vec<usize> {
    let position = stack
        .iter()
        .rposition(|(vertex, _)| *vertex == start)
        .unwrap_or(0);
    stack[position..].iter().map(|(vertex, _)| *vertex).collect()
}
