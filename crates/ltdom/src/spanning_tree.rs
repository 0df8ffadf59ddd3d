use crate::graph::Graph;

/// A depth-first spanning tree of the vertices reachable from a root.
///
/// Reachable vertices are numbered by their DFS pre-order discovery index (their "id"), with the
/// root always having id 0. Parents and predecessors are stored by id rather than by vertex, so
/// vertices that were never reached simply have no entry.
#[derive(Debug, Clone)]
pub struct SpanningTree {
    // vertex by id, and id by vertex
    vertices: Vec<usize>,
    ids: Vec<Option<usize>>,

    // The root is its own parent.
    parents: Vec<usize>,
    predecessors: Vec<Vec<usize>>,
}

struct Frame {
    vertex: usize,
    id: usize,
    next_edge: usize,
}

impl SpanningTree {
    /// Build the spanning tree by searching `graph` depth-first from `root`, visiting successors
    /// in edge insertion order.
    ///
    /// Every edge leaving a reachable vertex is also recorded in reverse, whether it is a tree,
    /// forward, back or cross edge.
    ///
    /// The search uses an explicit stack, so long chains do not consume call stack. `root` must
    /// already be checked against `graph`, as `DomTree::run` does.
    pub fn build(graph: &Graph, root: usize) -> Self {
        debug_assert!(root < graph.vertex_count(), "root is not a vertex of the graph");

        let mut tree = SpanningTree {
            vertices: Vec::new(),
            ids: vec![None; graph.vertex_count()],
            parents: Vec::new(),
            predecessors: Vec::new(),
        };

        let root_id = tree.discover(root, 0);
        let mut stack = vec![Frame {
            vertex: root,
            id: root_id,
            next_edge: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(&succ) = graph.successors(frame.vertex).get(frame.next_edge) else {
                stack.pop();
                continue;
            };
            frame.next_edge += 1;
            let id = frame.id;

            let succ_id = match tree.ids[succ] {
                Some(succ_id) => succ_id,
                None => {
                    let succ_id = tree.discover(succ, id);
                    stack.push(Frame {
                        vertex: succ,
                        id: succ_id,
                        next_edge: 0,
                    });
                    succ_id
                }
            };
            tree.predecessors[succ_id].push(id);
        }

        tree
    }

    /// The number of vertices reachable from the root.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// The vertex with the given id.
    pub fn vertex(&self, id: usize) -> usize {
        self.vertices[id]
    }

    /// Reachable vertices in DFS pre-order.
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// The id of the given vertex, or `None` if it was not reached.
    pub fn id(&self, vertex: usize) -> Option<usize> {
        self.ids.get(vertex).copied().flatten()
    }

    /// The id of the spanning tree parent of the vertex with id `id`. The root is its own parent.
    pub fn parent(&self, id: usize) -> usize {
        self.parents[id]
    }

    /// The ids of every predecessor of the vertex with id `id` in the original graph.
    ///
    /// Only reachable predecessors are recorded, and parallel edges produce repeated entries.
    pub fn predecessors(&self, id: usize) -> &[usize] {
        &self.predecessors[id]
    }

    fn discover(&mut self, vertex: usize, parent: usize) -> usize {
        let id = self.vertices.len();
        self.vertices.push(vertex);
        self.ids[vertex] = Some(id);
        self.parents.push(parent);
        self.predecessors.push(Vec::new());
        id
    }
}
