use rstar::{Envelope, PointDistance, RTree, RTreeObject, AABB};

use crate::geometry::{BBox, Point};
use crate::panel::PanelOutline;

/// An entry in the R-tree, referencing a panel by its list index.
#[derive(Debug, Clone)]
pub struct PanelEntry {
    /// Index into the product's panel outline list.
    pub panel_index: usize,
    /// Bounding box of the panel outline.
    pub bbox: BBox,
}

impl RTreeObject for PanelEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bbox.min.x, self.bbox.min.y],
            [self.bbox.max.x, self.bbox.max.y],
        )
    }
}

impl PointDistance for PanelEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        self.envelope().distance_2(point)
    }

    fn contains_point(&self, point: &[f64; 2]) -> bool {
        self.envelope().contains_point(point)
    }
}

/// Spatial index over panel bounding boxes. Candidate prefilter only:
/// exact containment/intersection still runs on the outline polygons.
pub struct PanelIndex {
    tree: RTree<PanelEntry>,
}

impl PanelIndex {
    /// Build the index for a product's outline list. Degenerate outlines
    /// without a bounding box are left out (they can never match).
    pub fn build(outlines: &[PanelOutline]) -> Self {
        let entries: Vec<PanelEntry> = outlines
            .iter()
            .enumerate()
            .filter_map(|(panel_index, outline)| {
                outline.polygon.bbox().map(|bbox| PanelEntry { panel_index, bbox })
            })
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Panel indices whose bounding box contains the point, in ascending
    /// panel-list order so downstream iteration stays stable.
    pub fn candidates_at_point(&self, point: &Point) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .tree
            .locate_all_at_point(&[point.x, point.y])
            .map(|e| e.panel_index)
            .collect();
        indices.sort_unstable();
        indices
    }

    /// Panel indices whose bounding box intersects the query box, in
    /// ascending panel-list order.
    pub fn candidates_in_bbox(&self, query: &BBox) -> Vec<usize> {
        let envelope = AABB::from_corners(
            [query.min.x, query.min.y],
            [query.max.x, query.max.y],
        );
        let mut indices: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|e| e.panel_index)
            .collect();
        indices.sort_unstable();
        indices
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
