use super::arena::EntityTree;

/// Compute aggregated weights for every internal node, for every revision (bottom-up).
/// After this, each internal node's weight equals the sum of its children's.
///
/// Returns the number of internal nodes whose own (loaded) weight was replaced.
pub fn aggregate_weights(tree: &mut EntityTree) -> usize {
    // Children always have higher indices than their parents in the arena,
    // so a reverse sweep sees every child before its parent.
    let revisions = tree.number_of_revisions();
    let mut overwritten = 0;
    for i in (0..tree.nodes.len()).rev() {
        if tree.nodes[i].is_leaf() {
            continue;
        }

        let mut totals = vec![0.0; revisions];
        for child in &tree.nodes[i].children {
            for (total, w) in totals.iter_mut().zip(&tree.nodes[child.index()].weights) {
                *total += w;
            }
        }

        if tree.nodes[i].weights.iter().any(|&w| w != 0.0) {
            tracing::warn!(
                "Entity '{}' has children; its own weight is replaced by their sum",
                tree.nodes[i].id
            );
            overwritten += 1;
        }
        tree.nodes[i].weights = totals;
    }
    overwritten
}
