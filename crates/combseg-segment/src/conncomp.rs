//! Connected component labeling and area filtering.
//!
//! Foreground pixels are grouped with 8-connectivity (edges and corners)
//! through a disjoint-set structure; component areas fall out of the
//! union-by-size bookkeeping.

use std::collections::HashSet;

use combseg_image::BinaryMask;

use crate::error::SegmentError;

/// A disjoint-set (union-find) data structure over pixel indices.
pub struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    /// Creates a new UnionFind structure with `len` singleton sets.
    pub fn new(len: usize) -> Self {
        Self {
            parent: vec![usize::MAX; len],
            size: vec![1; len],
        }
    }

    /// Returns the representative (root) of the set containing `id`, with
    /// path compression.
    pub fn find(&mut self, mut id: usize) -> usize {
        let mut root = self.parent[id];

        if root == usize::MAX {
            self.parent[id] = id;
            return id;
        }

        // Chase down the root
        while self.parent[root] != root {
            root = self.parent[root];
        }

        // Go back and collapse the tree
        while self.parent[id] != root {
            let tmp = self.parent[id];
            self.parent[id] = root;
            id = tmp;
        }

        root
    }

    /// Unites the sets containing `a` and `b` (union by size), returning the
    /// representative of the merged set.
    pub fn union(&mut self, a: usize, b: usize) -> usize {
        let a_root = self.find(a);
        let b_root = self.find(b);

        if a_root == b_root {
            return a_root;
        }

        if self.size[a_root] > self.size[b_root] {
            self.parent[b_root] = a_root;
            self.size[a_root] += self.size[b_root];
            a_root
        } else {
            self.parent[a_root] = b_root;
            self.size[b_root] += self.size[a_root];
            b_root
        }
    }

    /// Returns the size of the set containing `id`.
    pub fn set_size(&mut self, id: usize) -> usize {
        let root = self.find(id);
        self.size[root]
    }

    /// Returns the number of elements in the UnionFind structure.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns true if the structure holds no elements.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }
}

/// Remove connected components smaller than `min_size` from a binary mask.
///
/// Foreground pixels (any non-zero value) are labeled with 8-connectivity:
/// two foreground pixels belong to the same component if they touch through
/// any of their eight neighbors, transitively. Every pixel whose component
/// area is strictly less than `min_size` is set to 0 in the output; all
/// other foreground pixels are set to 255. Background is never modified.
///
/// `remove_small_components(mask, 0)` is the identity on any mask already
/// normalized to {0, 255}.
///
/// # Examples
///
/// ```
/// use combseg_image::{BinaryMask, ImageSize};
/// use combseg_segment::conncomp::remove_small_components;
///
/// let size = ImageSize { width: 4, height: 1 };
/// let mask = BinaryMask::new(size, vec![255, 0, 0, 255]).unwrap();
///
/// // Both single-pixel components are below the minimum area.
/// let filtered = remove_small_components(&mask, 2).unwrap();
/// assert_eq!(filtered.as_slice(), &[0, 0, 0, 0]);
/// ```
pub fn remove_small_components(
    mask: &BinaryMask,
    min_size: usize,
) -> Result<BinaryMask, SegmentError> {
    let width = mask.width();
    let height = mask.height();
    let mask_data = mask.as_slice();

    let mut uf = UnionFind::new(mask_data.len());

    // Union each foreground pixel with its forward neighbors; connectivity
    // is symmetric, so the backward half of the 8-neighborhood is covered by
    // earlier pixels.
    for (i, &pixel) in mask_data.iter().enumerate() {
        if pixel == 0 {
            continue;
        }

        let y = i / width;
        let x = i % width;

        if x + 1 < width && mask_data[i + 1] != 0 {
            uf.union(i, i + 1);
        }

        if y + 1 < height {
            let below = i + width;
            if mask_data[below] != 0 {
                uf.union(i, below);
            }
            if x > 0 && mask_data[below - 1] != 0 {
                uf.union(i, below - 1);
            }
            if x + 1 < width && mask_data[below + 1] != 0 {
                uf.union(i, below + 1);
            }
        }
    }

    let mut dst = BinaryMask::from_size_val(mask.size(), 0).map_err(SegmentError::Image)?;
    let dst_data = dst.as_slice_mut();

    let mut kept = HashSet::new();
    let mut removed = HashSet::new();

    for (i, &pixel) in mask_data.iter().enumerate() {
        if pixel == 0 {
            continue;
        }

        let root = uf.find(i);
        if uf.set_size(root) < min_size {
            removed.insert(root);
        } else {
            kept.insert(root);
            dst_data[i] = 255;
        }
    }

    log::debug!(
        "component filter: kept {} components, removed {} below {} px",
        kept.len(),
        removed.len(),
        min_size
    );

    Ok(dst)
}
