use std::mem;

/// Walk every node reachable from `start` depth first.
///
/// `pre` sees a node the first time the walk reaches it and hands back that node's successors,
/// which are explored in the order given. `post` sees a node once all of its successors are done.
/// Nodes already seen are skipped, so cycles are fine, and the walk keeps its own stack instead
/// of recursing.
pub fn depth_first_search<I>(
    start: usize,
    mut pre: impl FnMut(usize) -> I,
    mut post: impl FnMut(usize),
) where
    I: IntoIterator<Item = usize>,
{
    let mut visited = Vec::new();
    mark_visited(&mut visited, start);

    let mut stack = Vec::new();
    stack.push((start, pre(start).into_iter()));

    while let Some((node, iter)) = stack.last_mut() {
        if let Some(next) = iter.next() {
            if mark_visited(&mut visited, next) {
                stack.push((next, pre(next).into_iter()))
            }
        } else {
            post(*node);
            stack.pop();
        }
    }
}

// Returns true if `node` was not already visited.
fn mark_visited(visited: &mut Vec<bool>, node: usize) -> bool {
    if node >= visited.len() {
        visited.resize(node + 1, false);
    }
    !mem::replace(&mut visited[node], true)
}
