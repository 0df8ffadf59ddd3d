use std::mem;

use crate::{
    dfs::depth_first_search, error::DomError, forest::Forest, graph::Graph,
    spanning_tree::SpanningTree, vertex::Vertex,
};

/// Immediate dominators of a directed graph, computed with the Lengauer-Tarjan algorithm.
///
/// Edges are accumulated with [`DomTree::add_edge`], then [`DomTree::run`] computes the
/// immediate dominator of every vertex reachable from the given root. Queries are only answered
/// for the most recent `run`. Adding an edge discards the computed dominators, so queries fail
/// with [`DomError::NotComputed`] until `run` is called again.
///
/// The algorithm is described in "A Fast Algorithm for Finding Dominators in a Flowgraph",
/// Lengauer and Tarjan (1979). The path compression here is the "simple" version without
/// balanced linking, which runs in O(m log n).
#[derive(Debug, Clone, Default)]
pub struct DomTree {
    graph: Graph,
    dominators: Option<Dominators>,
}

impl DomTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve room for `vertices` vertices up front.
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            graph: Graph::with_capacity(vertices),
            dominators: None,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    /// Add the edge `from -> to` to the graph.
    ///
    /// Vertices are expected to be `0..n` if there are `n` vertices. If either vertex is invalid,
    /// nothing changes, including any previously computed dominators.
    pub fn add_edge<V: Vertex>(&mut self, from: V, to: V) -> Result<(), DomError> {
        self.graph.add_edge(from, to)?;
        self.dominators = None;
        Ok(())
    }

    /// Compute the immediate dominators of every vertex reachable from `root`.
    ///
    /// Every table from a previous run is discarded, so running again with the same root gives the
    /// same answers.
    pub fn run<V: Vertex>(&mut self, root: V) -> Result<(), DomError> {
        let root = self.graph.check_vertex(root, "run")?;

        log::debug!(
            "computing dominators of {} vertices and {} edges from root {root}",
            self.graph.vertex_count(),
            self.graph.edge_count(),
        );

        let dominators = Dominators::compute(&self.graph, root);

        let unreachable = self.graph.vertex_count() - dominators.tree.len();
        if unreachable > 0 {
            log::trace!("{unreachable} vertices are unreachable from root {root}");
        }
        log::debug!(
            "finished computing dominators of {} reachable vertices",
            dominators.tree.len()
        );

        self.dominators = Some(dominators);
        Ok(())
    }

    /// Return the immediate dominator of `v`.
    ///
    /// The root is its own immediate dominator. Returns `Ok(None)` if `v` was not reachable from
    /// the root.
    ///
    /// Fails with [`DomError::InvalidVertex`] if the dominator does not fit in `V`.
    pub fn dom<V: Vertex>(&self, v: V) -> Result<Option<V>, DomError> {
        let v = self.graph.check_vertex(v, "dom")?;
        let dominators = self.computed()?;
        dominators
            .idom(v)
            .map(|idom| to_vertex(idom, "dom"))
            .transpose()
    }

    /// The root passed to the last `run`.
    pub fn root<V: Vertex>(&self) -> Result<V, DomError> {
        to_vertex(self.computed()?.tree.vertex(0), "root")
    }

    /// Return true if `v` was reachable from the root in the last `run`.
    pub fn is_reachable<V: Vertex>(&self, v: V) -> Result<bool, DomError> {
        let v = self.graph.check_vertex(v, "is_reachable")?;
        Ok(self.computed()?.tree.id(v).is_some())
    }

    /// Queries whether `a` dominates `b`. Every vertex dominates itself.
    ///
    /// Ranges are calculated during `run` that make this query O(1).
    ///
    /// Returns `Ok(None)` if either vertex was unreachable, since no dominance can be determined.
    pub fn dominates<V: Vertex>(&self, a: V, b: V) -> Result<Option<bool>, DomError> {
        let a = self.graph.check_vertex(a, "dominates")?;
        let b = self.graph.check_vertex(b, "dominates")?;
        Ok(self.computed()?.dominates(a, b))
    }

    /// Return the vertices immediately dominated by `v`.
    ///
    /// Returns `Ok(None)` if `v` was unreachable.
    pub fn dominance_children<V: Vertex>(
        &self,
        v: V,
    ) -> Result<Option<impl Iterator<Item = V>>, DomError> {
        let v = self.graph.check_vertex(v, "dominance_children")?;
        let dominators = self.computed()?;
        let Some(id) = dominators.tree.id(v) else {
            return Ok(None);
        };
        let children = dominators.children[id]
            .iter()
            .map(|&child| to_vertex(dominators.tree.vertex(child), "dominance_children"))
            .collect::<Result<Vec<V>, _>>()?;
        Ok(Some(children.into_iter()))
    }

    /// Every reachable vertex, in the depth-first pre-order used by the last `run`.
    ///
    /// Every vertex in this order comes after its immediate dominator.
    pub fn preorder<V: Vertex>(&self) -> Result<impl Iterator<Item = V>, DomError> {
        let vertices = self
            .computed()?
            .tree
            .vertices()
            .iter()
            .map(|&v| to_vertex(v, "preorder"))
            .collect::<Result<Vec<V>, _>>()?;
        Ok(vertices.into_iter())
    }

    /// Return the semidominator of `v` found during the last `run`.
    ///
    /// The root and unreachable vertices have no semidominator.
    pub fn semidominator<V: Vertex>(&self, v: V) -> Result<Option<V>, DomError> {
        let v = self.graph.check_vertex(v, "semidominator")?;
        let dominators = self.computed()?;
        dominators
            .tree
            .id(v)
            .filter(|&id| id != 0)
            .map(|id| {
                let semi = dominators.tree.vertex(dominators.semi[id]);
                to_vertex(semi, "semidominator")
            })
            .transpose()
    }

    fn computed(&self) -> Result<&Dominators, DomError> {
        self.dominators.as_ref().ok_or(DomError::NotComputed)
    }
}

// Queries are generic separately from `add_edge`, so a result may not fit the caller's type.
fn to_vertex<V: Vertex>(index: usize, operation: &'static str) -> Result<V, DomError> {
    V::from_index(index).ok_or(DomError::invalid_vertex(operation))
}

// Everything here is indexed by spanning tree id, not by vertex.
#[derive(Debug, Clone)]
struct Dominators {
    tree: SpanningTree,
    semi: Vec<usize>,
    idoms: Vec<usize>,
    children: Vec<Vec<usize>>,
    // pre and post order numbers in a DFS of the dominator tree
    ranges: Vec<(usize, usize)>,
}

impl Dominators {
    fn compute(graph: &Graph, root: usize) -> Self {
        let tree = SpanningTree::build(graph, root);
        let len = tree.len();

        // Ids are pre-order numbers, so every vertex starts as its own semidominator.
        let mut semi: Vec<usize> = (0..len).collect();
        let mut idoms = vec![0; len];
        let mut buckets = vec![Vec::new(); len];
        let mut forest = Forest::new(len);

        // Work from the bottom of the spanning tree up. The root is never a candidate.
        for w in (1..len).rev() {
            for &v in tree.predecessors(w) {
                let u = forest.eval(v, &semi);
                if semi[u] < semi[w] {
                    semi[w] = semi[u];
                }
            }
            buckets[semi[w]].push(w);

            let parent = tree.parent(w);
            forest.link(parent, w);

            // Every vertex in the parent's bucket has its semidominator path fully linked now.
            for v in mem::take(&mut buckets[parent]) {
                let u = forest.eval(v, &semi);
                idoms[v] = if semi[u] < semi[v] { u } else { parent };
            }
        }

        // Provisional dominators whose semidominator differs share the dominator of an
        // ancestor, which is already final when visited in pre-order.
        for w in 1..len {
            if idoms[w] != semi[w] {
                idoms[w] = idoms[idoms[w]];
            }
        }

        let mut children = vec![Vec::new(); len];
        for w in 1..len {
            children[idoms[w]].push(w);
        }

        let ranges = {
            let mut pre_order_i = 0;
            let mut pre_order_numbers = vec![0; len];

            let mut post_order_i = 0;
            let mut post_order_numbers = vec![0; len];

            depth_first_search(
                0,
                |i| {
                    pre_order_numbers[i] = pre_order_i;
                    pre_order_i += 1;
                    children[i].iter().copied()
                },
                |i| {
                    post_order_numbers[i] = post_order_i;
                    post_order_i += 1;
                },
            );

            pre_order_numbers
                .into_iter()
                .zip(post_order_numbers)
                .collect::<Vec<_>>()
        };

        Dominators {
            tree,
            semi,
            idoms,
            children,
            ranges,
        }
    }

    fn idom(&self, v: usize) -> Option<usize> {
        let id = self.tree.id(v)?;
        Some(self.tree.vertex(self.idoms[id]))
    }

    fn dominates(&self, a: usize, b: usize) -> Option<bool> {
        let (a_start, a_end) = self.ranges[self.tree.id(a)?];
        let (b_start, b_end) = self.ranges[self.tree.id(b)?];
        Some(a_start <= b_start && b_end <= a_end)
    }
}
