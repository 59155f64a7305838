use serde::{Deserialize, Serialize};

/// Disjoint sets over dense indices with path compression and union by rank.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u32>,
}

impl UnionFind {
    pub fn new(len: usize) -> UnionFind {
        UnionFind {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    pub fn find(&mut self, index: usize) -> usize {
        let mut root = index;

        while self.parent[root] != root {
            root = self.parent[root];
        }

        //
        // Compress the walked path directly on to the root.
        //

        let mut current = index;

        while self.parent[current] != root {
            let next = self.parent[current];

            self.parent[current] = root;

            current = next;
        }

        root
    }

    /// Joins the sets holding `a` and `b` and returns the resulting representative. The root
    /// with the higher rank wins; on equal rank the root of `a` wins and gains a rank.
    pub fn union(&mut self, a: usize, b: usize) -> usize {
        let root_a = self.find(a);
        let root_b = self.find(b);

        if root_a == root_b {
            return root_a;
        }

        let (winner, loser) = if self.rank[root_a] >= self.rank[root_b] {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };

        self.parent[loser] = winner;

        if self.rank[winner] == self.rank[loser] {
            self.rank[winner] += 1;
        }

        winner
    }

    pub fn same_set(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    pub fn rank(&self, index: usize) -> u32 {
        self.rank[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singletons_are_their_own_representative() {
        let mut sets = UnionFind::new(4);

        for index in 0..4 {
            assert_eq!(sets.find(index), index);
        }

        assert!(!sets.same_set(0, 1));
    }

    #[test]
    fn union_is_transitive() {
        let mut sets = UnionFind::new(6);

        sets.union(0, 1);
        sets.union(2, 3);
        sets.union(1, 3);

        assert!(sets.same_set(0, 2));
        assert!(sets.same_set(1, 3));
        assert!(!sets.same_set(0, 4));
        assert!(!sets.same_set(4, 5));
    }

    #[test]
    fn equal_rank_tie_keeps_first_root() {
        let mut sets = UnionFind::new(3);

        assert_eq!(sets.union(2, 0), 2);
        assert_eq!(sets.rank(2), 1);

        //
        // Lower rank root joins the higher rank one regardless of argument order.
        //

        assert_eq!(sets.union(1, 0), 2);
        assert_eq!(sets.find(1), 2);
    }

    #[test]
    fn find_compresses_paths() {
        let mut sets = UnionFind::new(4);

        sets.union(0, 1);
        sets.union(2, 3);
        sets.union(0, 2);

        let root = sets.find(3);

        assert_eq!(root, 0);
        assert_eq!(sets.parent[3], 0);
    }
}
