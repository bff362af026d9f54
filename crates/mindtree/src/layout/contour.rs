//! Subtree contours used to pack sibling subtrees along the cross axis.
//!
//! A [`Contour`] summarises a subtree as one [`Band`] per depth below its
//! root. Each band records how far the nodes at that depth reach on the cross
//! axis (relative to the subtree root's center) and which span they cover on
//! the growth axis (absolute, since growth coordinates are known before
//! packing starts).
//!
//! Two subtrees placed side by side must keep bands at the same depth apart,
//! and also bands at different depths whenever their growth spans overlap:
//! with content-sized nodes a tall node can reach down into the next level
//! of its neighbour.

/// Extent of the nodes at one depth of a subtree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Band {
    cross_min: f32,
    cross_max: f32,
    growth_min: f32,
    growth_max: f32,
}

impl Band {
    /// Band of a single node centered at cross offset 0.
    pub(super) fn node(cross_extent: f32, growth_start: f32, growth_extent: f32) -> Self {
        Self {
            cross_min: -cross_extent / 2.0,
            cross_max: cross_extent / 2.0,
            growth_min: growth_start,
            growth_max: growth_start + growth_extent,
        }
    }

    fn shifted(self, offset: f32) -> Self {
        Self {
            cross_min: self.cross_min + offset,
            cross_max: self.cross_max + offset,
            ..self
        }
    }

    fn union(self, other: Self) -> Self {
        Self {
            cross_min: self.cross_min.min(other.cross_min),
            cross_max: self.cross_max.max(other.cross_max),
            growth_min: self.growth_min.min(other.growth_min),
            growth_max: self.growth_max.max(other.growth_max),
        }
    }

    fn overlaps_growth(self, other: Self) -> bool {
        self.growth_min < other.growth_max && other.growth_min < self.growth_max
    }
}

/// Per-depth bands of a subtree, `bands[0]` being the subtree root.
#[derive(Debug, Clone, Default, PartialEq)]
pub(super) struct Contour {
    bands: Vec<Band>,
}

impl Contour {
    /// Contour of a leaf.
    pub(super) fn leaf(band: Band) -> Self {
        Self { bands: vec![band] }
    }

    #[cfg(test)]
    fn depth(&self) -> usize {
        self.bands.len()
    }

    /// Smallest shift that places `right` entirely past `self` on the cross
    /// axis, keeping `gap` between every pair of bands that must not touch.
    ///
    /// The shift is applied to `right`'s coordinates, which share the origin
    /// of `self`.
    pub(super) fn separation(&self, right: &Contour, gap: f32) -> f32 {
        let mut shift = f32::NEG_INFINITY;
        for (left_depth, left) in self.bands.iter().enumerate() {
            for (right_depth, r) in right.bands.iter().enumerate() {
                if left_depth == right_depth || left.overlaps_growth(*r) {
                    shift = shift.max(left.cross_max + gap - r.cross_min);
                }
            }
        }
        shift
    }

    /// Merges `other`, shifted by `offset`, into this contour.
    pub(super) fn absorb(&mut self, other: &Contour, offset: f32) {
        for (depth, band) in other.bands.iter().enumerate() {
            let band = band.shifted(offset);
            match self.bands.get_mut(depth) {
                Some(existing) => *existing = existing.union(band),
                None => self.bands.push(band),
            }
        }
    }

    /// Returns this contour one level deeper, under a new root band.
    pub(super) fn under(self, root: Band, offset: f32) -> Contour {
        let mut bands = Vec::with_capacity(self.bands.len() + 1);
        bands.push(root);
        bands.extend(self.bands.into_iter().map(|band| band.shifted(offset)));
        Contour { bands }
    }
}

/// Packs sibling contours left to right, `gap` apart.
///
/// Returns the combined contour and the offset of each sibling's origin
/// relative to the first sibling's origin. An empty slice packs to an empty
/// contour.
pub(super) fn pack(siblings: &[&Contour], gap: f32) -> (Contour, Vec<f32>) {
    let mut packed = Contour::default();
    let mut offsets = Vec::with_capacity(siblings.len());

    for (idx, sibling) in siblings.iter().enumerate() {
        let offset = if idx == 0 {
            0.0
        } else {
            packed.separation(sibling, gap)
        };
        packed.absorb(sibling, offset);
        offsets.push(offset);
    }

    (packed, offsets)
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;

    #[test]
    fn test_leaves_are_spaced_by_size_and_gap() {
        let a = Contour::leaf(Band::node(100.0, 0.0, 50.0));
        let b = Contour::leaf(Band::node(300.0, 0.0, 50.0));

        let (packed, offsets) = pack(&[&a, &b], 20.0);

        // 50 (half of a) + 20 + 150 (half of b)
        assert_eq!(offsets, vec![0.0, 220.0]);
        assert_eq!(packed.depth(), 1);
    }

    #[test]
    fn test_deeper_levels_push_subtrees_apart() {
        let wide_child = Contour::leaf(Band::node(500.0, 100.0, 50.0));
        let left = wide_child.under(Band::node(10.0, 0.0, 50.0), 0.0);
        let right = Contour::leaf(Band::node(10.0, 100.0, 50.0))
            .under(Band::node(10.0, 0.0, 50.0), 0.0);

        let (_, offsets) = pack(&[&left, &right], 10.0);

        // Roots alone would need 20; the children at depth 1 need 250 + 10 + 5.
        assert!(approx_eq!(f32, offsets[1], 265.0));
    }

    #[test]
    fn test_different_depths_collide_when_growth_overlaps() {
        let tall = Contour::leaf(Band::node(100.0, 0.0, 400.0));
        let deep = Contour::leaf(Band::node(10.0, 200.0, 50.0))
            .under(Band::node(10.0, 0.0, 20.0), 0.0);

        let (_, offsets) = pack(&[&tall, &deep], 0.0);

        // depth 1 of `deep` lies within the growth span of `tall`.
        assert!(approx_eq!(f32, offsets[1], 55.0));
    }

    #[test]
    fn test_different_depths_ignore_each_other_without_growth_overlap() {
        let short = Contour::leaf(Band::node(100.0, 0.0, 50.0));
        let deep = Contour::leaf(Band::node(400.0, 200.0, 50.0))
            .under(Band::node(10.0, 0.0, 20.0), 0.0);

        let (_, offsets) = pack(&[&short, &deep], 0.0);

        assert!(approx_eq!(f32, offsets[1], 55.0));
    }

    #[test]
    fn test_pack_empty() {
        let (packed, offsets) = pack(&[], 10.0);
        assert_eq!(packed.depth(), 0);
        assert!(offsets.is_empty());
    }
}
