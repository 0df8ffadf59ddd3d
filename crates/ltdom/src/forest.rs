use std::mem;

/// The path-compressing forest used to evaluate semidominators.
///
/// Nodes are spanning tree ids. A node enters the forest when it is linked under its spanning
/// tree parent, and `eval` returns the node of minimum semidominator on the path from a node up
/// to (but not including) the root of its forest tree. Linking does no balancing, so a sequence
/// of `m` evaluations costs O(m log n).
#[derive(Debug, Clone)]
pub struct Forest {
    ancestors: Vec<Option<usize>>,
    labels: Vec<usize>,
    // scratch space for `compress`
    path: Vec<usize>,
}

impl Forest {
    /// Create a forest of `len` unlinked nodes, each labeled with itself.
    pub fn new(len: usize) -> Self {
        Self {
            ancestors: vec![None; len],
            labels: (0..len).collect(),
            path: Vec::new(),
        }
    }

    /// Make `parent` the forest ancestor of `child`.
    pub fn link(&mut self, parent: usize, child: usize) {
        self.ancestors[child] = Some(parent);
    }

    /// Returns the node with the smallest `semi` value on the forest path from `v`, or `v`
    /// itself if it is a forest root.
    pub fn eval(&mut self, v: usize, semi: &[usize]) -> usize {
        if self.ancestors[v].is_none() {
            return v;
        }

        self.compress(v, semi);
        self.labels[v]
    }

    /// Point every node on the path from `v` directly at the root of its forest tree, carrying
    /// the minimum-semidominator label down the path as it goes.
    fn compress(&mut self, v: usize, semi: &[usize]) {
        // Collect every node whose ancestor is not a forest root, nearest to `v` first.
        let mut path = mem::take(&mut self.path);
        let mut node = v;
        while let Some(ancestor) = self.ancestors[node] {
            if self.ancestors[ancestor].is_none() {
                break;
            }
            path.push(node);
            node = ancestor;
        }

        // Rewrite from the top, so each ancestor's label is final before it is read.
        for &node in path.iter().rev() {
            let Some(ancestor) = self.ancestors[node] else {
                continue;
            };
            let ancestor_label = self.labels[ancestor];
            if semi[ancestor_label] < semi[self.labels[node]] {
                self.labels[node] = ancestor_label;
            }
            self.ancestors[node] = self.ancestors[ancestor];
        }

        path.clear();
        self.path = path;
    }
}
