/// Disjoint-set forest (union-find) with full path compression and union by size
use std::collections::{HashMap, TryReserveError};
use std::fmt;

use crate::error::ForestError;

/// Partition of `{0, .., n-1}` into disjoint sets.
///
/// `size[r]` is only meaningful while `r` is a root (`parent[r] == r`).
/// Every operation that walks the forest takes `&mut self` because it may
/// compress paths, so callers sharing a forest across threads must wrap the
/// whole structure in a lock.
#[derive(Debug, Clone)]
pub struct DisjointSetForest {
    parent: Vec<usize>,
    size: Vec<usize>,
    count: usize,
}

impl DisjointSetForest {
    /// Create a forest of `n` singleton sets
    pub fn new(n: usize) -> Self {
        let parent = (0..n).collect();
        let size = vec![1; n];
        DisjointSetForest {
            parent,
            size,
            count: n,
        }
    }

    /// Create a forest from a signed element count.
    ///
    /// Rejects negative counts and counts whose storage cannot be allocated.
    pub fn try_with_len(n: i64) -> Result<Self, ForestError> {
        let len = usize::try_from(n).map_err(|_| {
            ForestError::InvalidArgument(format!("element count {n} is negative"))
        })?;
        let unallocatable = |_: TryReserveError| {
            ForestError::InvalidArgument(format!("element count {n} cannot be allocated"))
        };

        let mut parent = Vec::new();
        parent.try_reserve_exact(len).map_err(unallocatable)?;
        parent.extend(0..len);

        let mut size = Vec::new();
        size.try_reserve_exact(len).map_err(unallocatable)?;
        size.resize(len, 1);

        Ok(DisjointSetForest {
            parent,
            size,
            count: len,
        })
    }

    /// Number of elements (fixed at construction)
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of disjoint sets currently in the forest
    pub fn count(&self) -> usize {
        self.count
    }

    fn check(&self, x: usize) -> Result<(), ForestError> {
        if x < self.parent.len() {
            Ok(())
        } else {
            Err(ForestError::IndexOutOfRange {
                index: x,
                len: self.parent.len(),
            })
        }
    }

    /// Find the root of `x`, pointing every node on the path directly at it
    pub fn find(&mut self, x: usize) -> Result<usize, ForestError> {
        self.check(x)?;
        Ok(self.find_root(x))
    }

    // Caller guarantees x is in range.
    fn find_root(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Merge the sets containing `x` and `y`.
    ///
    /// Returns `false` when both were already in the same set. The root of the
    /// smaller set is attached under the root of the larger one; on equal sizes
    /// `y`'s root goes under `x`'s root.
    pub fn union(&mut self, x: usize, y: usize) -> Result<bool, ForestError> {
        self.check(x)?;
        self.check(y)?;

        let mut root_x = self.find_root(x);
        let mut root_y = self.find_root(y);
        if root_x == root_y {
            return Ok(false);
        }

        if self.size[root_x] < self.size[root_y] {
            std::mem::swap(&mut root_x, &mut root_y);
        }
        self.parent[root_y] = root_x;
        self.size[root_x] += self.size[root_y];
        self.count -= 1;
        Ok(true)
    }

    /// Check if two elements are in the same set
    pub fn connected(&mut self, x: usize, y: usize) -> Result<bool, ForestError> {
        self.check(x)?;
        self.check(y)?;
        Ok(self.find_root(x) == self.find_root(y))
    }

    /// Number of elements in the set containing `x`
    pub fn size(&mut self, x: usize) -> Result<usize, ForestError> {
        self.check(x)?;
        let root = self.find_root(x);
        Ok(self.size[root])
    }

    /// Size of the largest set, 0 for an empty forest
    pub fn largest_set_size(&self) -> usize {
        self.roots().map(|r| self.size[r]).max().unwrap_or(0)
    }

    /// Current roots in ascending order
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.parent
            .iter()
            .enumerate()
            .filter(|&(i, &p)| i == p)
            .map(|(i, _)| i)
    }

    /// Get all sets as groups of indices.
    ///
    /// Members are ascending within a group and groups are ordered by their
    /// smallest member.
    pub fn groups(&mut self) -> Vec<Vec<usize>> {
        let mut slot_of_root: HashMap<usize, usize> = HashMap::with_capacity(self.count);
        let mut groups: Vec<Vec<usize>> = Vec::with_capacity(self.count);

        for i in 0..self.parent.len() {
            let root = self.find_root(i);
            let slot = *slot_of_root.entry(root).or_insert_with(|| {
                groups.push(Vec::with_capacity(self.size[root]));
                groups.len() - 1
            });
            groups[slot].push(i);
        }

        groups
    }
}

impl fmt::Display for DisjointSetForest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DisjointSetForest(len={}, sets={})", self.len(), self.count)
    }
}
