use crate::{error::DomError, vertex::Vertex};

/// A directed graph over dense vertex indexes, stored as per-vertex successor lists.
///
/// The vertex count is one more than the largest index ever passed to `add_edge`, so vertices
/// which only appear as edge targets exist with an empty successor list.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    edges: Vec<Vec<usize>>,
    edge_count: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve room for `vertices` vertices without changing `vertex_count`.
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            edges: Vec::with_capacity(vertices),
            edge_count: 0,
        }
    }

    /// Record the directed edge `from -> to`.
    ///
    /// Parallel edges and self loops are kept as given. If either endpoint is not a valid vertex,
    /// the graph is left untouched.
    ///
    /// Storage is proportional to the largest index. An index too large to allocate room for is
    /// reported as an invalid vertex.
    pub fn add_edge<V: Vertex>(&mut self, from: V, to: V) -> Result<(), DomError> {
        let (Some(from), Some(to)) = (from.to_index(), to.to_index()) else {
            return Err(DomError::invalid_vertex("add_edge"));
        };

        let len = from
            .max(to)
            .checked_add(1)
            .ok_or(DomError::invalid_vertex("add_edge"))?;
        if len > self.edges.len() {
            self.edges
                .try_reserve(len - self.edges.len())
                .map_err(|_| DomError::invalid_vertex("add_edge"))?;
            self.edges.resize_with(len, Vec::new);
        }

        self.edges[from].push(to);
        self.edge_count += 1;
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns the index of `v` if it is in `[0, vertex_count)`.
    pub fn check_vertex<V: Vertex>(
        &self,
        v: V,
        operation: &'static str,
    ) -> Result<usize, DomError> {
        match v.to_index() {
            Some(i) if i < self.edges.len() => Ok(i),
            _ => Err(DomError::invalid_vertex(operation)),
        }
    }

    /// Successors of the vertex at index `v` in edge insertion order.
    ///
    /// Out of range indexes have no successors.
    pub fn successors(&self, v: usize) -> &[usize] {
        self.edges.get(v).map(Vec::as_slice).unwrap_or(&[])
    }
}
