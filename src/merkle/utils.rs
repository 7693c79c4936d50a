/// Returns the index of the node paired with `node_idx` in its layer.
/// The sibling may not exist if `node_idx` is the last node of an odd-length layer.
pub fn sibling_index(node_idx: usize) -> usize {
    node_idx ^ 1
}

/// Returns the index of the parent of `node_idx` in the layer above.
pub fn parent_index(node_idx: usize) -> usize {
    node_idx >> 1
}

/// Returns the number of nodes in the layer above a layer of `layer_len` nodes.
pub fn next_layer_len(layer_len: usize) -> usize {
    layer_len.div_ceil(2)
}

/// Computes the number of layers above the leaves in a tree with `num_leaves` leaves.
/// This is also the maximum length of a proof for the tree.
pub fn compute_tree_depth(num_leaves: usize) -> usize {
    let mut depth = 0;
    let mut layer_len = num_leaves;
    while layer_len > 1 {
        layer_len = next_layer_len(layer_len);
        depth += 1;
    }
    depth
}
