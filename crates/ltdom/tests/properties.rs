use std::collections::VecDeque;

use ltdom::DomTree;
use rand::{Rng, SeedableRng, rngs::StdRng};

struct TestGraph {
    successors: Vec<Vec<usize>>,
}

impl TestGraph {
    fn random(rng: &mut impl Rng) -> Self {
        let vertices = rng.random_range(1..=16usize);
        let edges = rng.random_range(0..=vertices * 3);

        let mut successors = vec![Vec::new(); vertices];
        for _ in 0..edges {
            let from = rng.random_range(0..vertices);
            let to = rng.random_range(0..vertices);
            successors[from].push(to);
        }
        Self { successors }
    }

    fn dom_tree(&self) -> DomTree {
        let mut tree = DomTree::new();
        // Mention the last vertex so the vertex count always matches.
        let last = self.successors.len() - 1;
        tree.add_edge(last, last).unwrap();
        for (from, succs) in self.successors.iter().enumerate() {
            for &to in succs {
                tree.add_edge(from, to).unwrap();
            }
        }
        tree
    }

    // Vertices reachable from `root` when every path through `removed` is cut.
    fn reachable(&self, root: usize, removed: Option<usize>) -> Vec<bool> {
        let mut reached = vec![false; self.successors.len()];
        if removed == Some(root) {
            return reached;
        }

        let mut queue = VecDeque::from([root]);
        reached[root] = true;
        while let Some(v) = queue.pop_front() {
            for &s in &self.successors[v] {
                if !reached[s] && Some(s) != removed {
                    reached[s] = true;
                    queue.push_back(s);
                }
            }
        }
        reached
    }

    // Immediate dominators straight from the definition: `d` dominates `v` if removing `d` makes
    // `v` unreachable, and the immediate dominator is the strict dominator with the most
    // dominators of its own.
    fn brute_force_idoms(&self, root: usize) -> Vec<Option<usize>> {
        let n = self.successors.len();
        let reachable = self.reachable(root, None);

        let mut strict_dominators = vec![Vec::new(); n];
        for d in 0..n {
            if !reachable[d] {
                continue;
            }
            let without = self.reachable(root, Some(d));
            for v in 0..n {
                if v != d && reachable[v] && !without[v] {
                    strict_dominators[v].push(d);
                }
            }
        }

        (0..n)
            .map(|v| {
                if !reachable[v] {
                    None
                } else if v == root {
                    Some(root)
                } else {
                    strict_dominators[v]
                        .iter()
                        .copied()
                        .max_by_key(|&d| strict_dominators[d].len())
                }
            })
            .collect()
    }
}

#[test]
fn test_matches_brute_force() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..500 {
        let graph = TestGraph::random(&mut rng);
        let root = rng.random_range(0..graph.successors.len());

        let mut tree = graph.dom_tree();
        tree.run(root).unwrap();

        let expected = graph.brute_force_idoms(root);
        for (v, &idom) in expected.iter().enumerate() {
            assert_eq!(
                tree.dom(v).unwrap(),
                idom,
                "vertex {v} from root {root} in {:?}",
                graph.successors
            );
        }
    }
}

#[test]
fn test_dominator_chains_reach_root() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..200 {
        let graph = TestGraph::random(&mut rng);
        let n = graph.successors.len();
        let root = rng.random_range(0..n);

        let mut tree = graph.dom_tree();
        tree.run(root).unwrap();

        assert_eq!(tree.dom(root).unwrap(), Some(root));

        for v in 0..n {
            if !tree.is_reachable(v).unwrap() {
                assert_eq!(tree.dom(v).unwrap(), None);
                continue;
            }

            let mut current = v;
            let mut steps = 0;
            while current != root {
                let idom = tree.dom(current).unwrap().unwrap();
                assert_ne!(idom, current);
                assert_eq!(tree.dominates(idom, v).unwrap(), Some(true));
                current = idom;
                steps += 1;
                assert!(steps <= n, "dominator chain of {v} does not terminate");
            }
        }
    }
}

#[test]
fn test_queries_are_stable() {
    let mut rng = StdRng::seed_from_u64(7);
    let graph = TestGraph::random(&mut rng);
    let n = graph.successors.len();

    let mut tree = graph.dom_tree();
    tree.run(0usize).unwrap();
    let first = (0..n).map(|v| tree.dom(v).unwrap()).collect::<Vec<_>>();
    let again = (0..n).map(|v| tree.dom(v).unwrap()).collect::<Vec<_>>();
    assert_eq!(first, again);

    tree.run(0usize).unwrap();
    let rerun = (0..n).map(|v| tree.dom(v).unwrap()).collect::<Vec<_>>();
    assert_eq!(first, rerun);
}
