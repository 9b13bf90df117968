#[derive(Clone, Debug)]
pub(crate) struct MstEdge<T> {
    pub(crate) left: usize,
    pub(crate) right: usize,
    pub(crate) weight: T,
}

/// One merge of the single linkage dendrogram. Row k defines internal node
/// `n_samples + k`; `size` counts the leaves below it.
pub(crate) struct DendrogramRow<T> {
    pub(crate) left_child: usize,
    pub(crate) right_child: usize,
    pub(crate) delta: T,
    pub(crate) size: usize,
}

/// One row of the condensed tree. `child` is either a relabelled cluster id
/// (>= n_samples) or a point index falling out of `parent` at `lambda`.
#[derive(Clone, Debug)]
pub(crate) struct CondensedRow<T> {
    pub(crate) parent: usize,
    pub(crate) child: usize,
    pub(crate) lambda: T,
    pub(crate) child_size: usize,
}
