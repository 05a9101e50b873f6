//! Disjoint-set union used to check graph connectivity.

/// Union–find over `0..size` with path compression and union by size
#[derive(Debug, Clone)]
pub struct DisjointUnion {
    parent: Vec<usize>,
    sizes: Vec<usize>,
    parts: usize,
}

impl DisjointUnion {
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            sizes: vec![1; size],
            parts: size,
        }
    }

    /// Root of the part containing `x`
    pub fn find(&mut self, x: usize) -> usize {
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

    /// Merge the parts of `x` and `y`. Returns false if they already were one.
    pub fn join(&mut self, x: usize, y: usize) -> bool {
        let (mut x, mut y) = (self.find(x), self.find(y));
        if x == y {
            return false;
        }
        if self.sizes[x] < self.sizes[y] {
            std::mem::swap(&mut x, &mut y);
        }
        self.parent[y] = x;
        self.sizes[x] += self.sizes[y];
        self.parts -= 1;
        true
    }

    /// Number of disjoint parts
    pub fn parts(&self) -> usize {
        self.parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_and_find() {
        let mut dsu = DisjointUnion::new(5);
        assert_eq!(dsu.parts(), 5);
        assert!(dsu.join(0, 1));
        assert!(dsu.join(3, 4));
        assert!(!dsu.join(1, 0));
        assert_eq!(dsu.parts(), 3);
        assert_eq!(dsu.find(0), dsu.find(1));
        assert_ne!(dsu.find(0), dsu.find(3));
        assert!(dsu.join(1, 4));
        assert_eq!(dsu.find(0), dsu.find(3));
        assert_eq!(dsu.parts(), 2);
    }
}
