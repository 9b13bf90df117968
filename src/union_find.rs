/// Disjoint-set over the 2n-1 dendrogram slots. Every union allocates a fresh
/// internal node rather than merging by rank, so after m unions the root of
/// everything is node n + m - 1.
pub(crate) struct UnionFind {
    parent: Vec<usize>,
    next_label: usize,
    size: Vec<usize>,
}

const NO_PARENT: usize = usize::MAX;

impl UnionFind {
    pub(crate) fn new(n_samples: usize) -> Self {
        let length = 2 * n_samples - 1;
        let size = (0..length).map(|n| usize::from(n < n_samples)).collect();
        UnionFind {
            parent: vec![NO_PARENT; length],
            next_label: n_samples,
            size,
        }
    }

    pub(crate) fn union(&mut self, m: usize, n: usize) {
        self.parent[m] = self.next_label;
        self.parent[n] = self.next_label;
        self.size[self.next_label] = self.size[m] + self.size[n];
        self.next_label += 1;
    }

    /// Current root of `n`'s set, with full path compression.
    pub(crate) fn fast_find(&mut self, mut n: usize) -> usize {
        let mut root = n;
        while self.parent[root] != NO_PARENT {
            root = self.parent[root];
        }
        while self.parent[n] != NO_PARENT {
            let next = self.parent[n];
            self.parent[n] = root;
            n = next;
        }
        root
    }

    pub(crate) fn size_of(&self, n: usize) -> usize {
        self.size[n]
    }
}

/// Conventional union-by-rank disjoint-set, used only to collapse condensed
/// tree rows onto their nearest selected cluster during label assignment.
pub(crate) struct LabelUnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl LabelUnionFind {
    pub(crate) fn new(size: usize) -> Self {
        LabelUnionFind {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    pub(crate) fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            // Path halving keeps later finds near-constant.
            let grandparent = self.parent[self.parent[x]];
            self.parent[x] = grandparent;
            x = grandparent;
        }
        x
    }

    /// Merges the two sets. On a rank tie the root of `x`'s set survives, so
    /// repeatedly calling `union(parent, child)` keeps the topmost node as
    /// the representative of the collapsed set.
    pub(crate) fn union(&mut self, x: usize, y: usize) {
        let x_root = self.find(x);
        let y_root = self.find(y);
        if x_root == y_root {
            return;
        }
        if self.rank[x_root] < self.rank[y_root] {
            self.parent[x_root] = y_root;
        } else if self.rank[x_root] > self.rank[y_root] {
            self.parent[y_root] = x_root;
        } else {
            self.parent[y_root] = x_root;
            self.rank[x_root] += 1;
        }
    }
}
