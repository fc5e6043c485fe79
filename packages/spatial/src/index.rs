//! R-tree indexes over zone polygons and line corridors.
//!
//! Both indexes remember the source feature index of every entry so callers
//! can read attributes back from the originating [`FeatureCollection`].

use geo::{BoundingRect, MultiLineString, MultiPolygon, Point};
use rstar::{AABB, RTree, RTreeObject};

use crate::geometry::{self, LocalProjection};
use crate::layers::{Feature, FeatureCollection};

/// A zone polygon stored in the R-tree.
struct ZoneEntry {
    feature: usize,
    envelope: AABB<[f64; 2]>,
    polygon: MultiPolygon<f64>,
}

impl RTreeObject for ZoneEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Point-in-zone lookups over the polygons of one layer, in lon/lat.
pub struct ZoneIndex {
    zones: RTree<ZoneEntry>,
    skipped: usize,
}

impl ZoneIndex {
    /// An index with no zones. Every lookup misses.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            zones: RTree::new(),
            skipped: 0,
        }
    }

    /// Indexes every areal feature accepted by `filter`.
    ///
    /// Features without usable polygon geometry are skipped and counted.
    pub fn build<'a>(
        features: impl IntoIterator<Item = &'a Feature>,
        filter: impl Fn(&Feature) -> bool,
    ) -> Self {
        let mut skipped = 0;
        let mut entries = Vec::new();

        for (feature, f) in features.into_iter().enumerate() {
            if !filter(f) {
                continue;
            }
            let Some(polygon) = f
                .geometry
                .as_ref()
                .and_then(|g| geometry::polygonal(g).ok())
            else {
                skipped += 1;
                continue;
            };

            entries.push(ZoneEntry {
                feature,
                envelope: polygon_envelope(&polygon),
                polygon,
            });
        }

        if skipped > 0 {
            log::debug!("Skipped {skipped} zone features without usable polygons");
        }

        Self {
            zones: RTree::bulk_load(entries),
            skipped,
        }
    }

    /// Indexes a layer that may be absent. An absent layer gives an empty
    /// index.
    pub fn from_layer(
        layer: Option<&FeatureCollection>,
        filter: impl Fn(&Feature) -> bool,
    ) -> Self {
        layer.map_or_else(Self::empty, |collection| Self::build(collection, filter))
    }

    /// Whether any indexed zone contains `point`.
    #[must_use]
    pub fn contains(&self, point: Point<f64>) -> bool {
        self.containing(point).is_some()
    }

    /// Lowest source feature index of a zone containing `point`.
    #[must_use]
    pub fn containing(&self, point: Point<f64>) -> Option<usize> {
        let query_env = AABB::from_point([point.x(), point.y()]);

        self.zones
            .locate_in_envelope_intersecting(&query_env)
            .filter(|entry| geometry::contains_point(&entry.polygon, point))
            .map(|entry| entry.feature)
            .min()
    }

    /// Number of indexed zones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.size()
    }

    /// Whether no zones were indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.size() == 0
    }

    /// Number of accepted features skipped for unusable geometry.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }
}

/// A projected line feature stored in the R-tree.
struct LineEntry {
    feature: usize,
    envelope: AABB<[f64; 2]>,
    lines: MultiLineString<f64>,
}

impl RTreeObject for LineEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Result of a nearest-line search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestLine {
    /// Source feature index of the nearest line.
    pub feature: usize,
    /// Planar distance in kilometres.
    pub distance_km: f64,
}

/// Distance queries against the line features of one layer, held in
/// projected kilometres.
pub struct LineIndex {
    lines: RTree<LineEntry>,
    skipped: usize,
}

impl LineIndex {
    /// Indexes every linear feature accepted by `filter`, projected with
    /// `projection`.
    pub fn build<'a>(
        features: impl IntoIterator<Item = &'a Feature>,
        projection: LocalProjection,
        filter: impl Fn(&Feature) -> bool,
    ) -> Self {
        let mut skipped = 0;
        let mut entries = Vec::new();

        for (feature, f) in features.into_iter().enumerate() {
            if !filter(f) {
                continue;
            }
            let Some(lines) = f.geometry.as_ref().and_then(|g| geometry::lineal(g).ok()) else {
                skipped += 1;
                continue;
            };

            let lines = projection.lines(&lines);
            let Some(rect) = lines.bounding_rect() else {
                skipped += 1;
                continue;
            };

            entries.push(LineEntry {
                feature,
                envelope: AABB::from_corners(
                    [rect.min().x, rect.min().y],
                    [rect.max().x, rect.max().y],
                ),
                lines,
            });
        }

        if skipped > 0 {
            log::debug!("Skipped {skipped} line features without usable geometry");
        }

        Self {
            lines: RTree::bulk_load(entries),
            skipped,
        }
    }

    /// Nearest line to a projected point within `radius_km`.
    ///
    /// Ties are broken by the lowest source feature index so results do
    /// not depend on tree layout.
    #[must_use]
    pub fn nearest_within(&self, point_km: Point<f64>, radius_km: f64) -> Option<NearestLine> {
        let query_env = AABB::from_corners(
            [point_km.x() - radius_km, point_km.y() - radius_km],
            [point_km.x() + radius_km, point_km.y() + radius_km],
        );

        self.lines
            .locate_in_envelope_intersecting(&query_env)
            .filter_map(|entry| {
                geometry::distance_to_lines(&point_km, &entry.lines)
                    .ok()
                    .filter(|d| *d <= radius_km)
                    .map(|distance_km| NearestLine {
                        feature: entry.feature,
                        distance_km,
                    })
            })
            .min_by(|a, b| {
                a.distance_km
                    .total_cmp(&b.distance_km)
                    .then(a.feature.cmp(&b.feature))
            })
    }

    /// Whether any indexed line passes within `threshold_km` of the
    /// projected polygons.
    #[must_use]
    pub fn any_within(&self, polygons_km: &MultiPolygon<f64>, threshold_km: f64) -> bool {
        let Some(rect) = polygons_km.bounding_rect() else {
            return false;
        };
        let query_env = AABB::from_corners(
            [rect.min().x - threshold_km, rect.min().y - threshold_km],
            [rect.max().x + threshold_km, rect.max().y + threshold_km],
        );

        self.lines
            .locate_in_envelope_intersecting(&query_env)
            .any(|entry| geometry::polygons_within(polygons_km, &entry.lines, threshold_km))
    }

    /// Number of indexed line features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.size()
    }

    /// Whether no usable lines were indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.size() == 0
    }

    /// Number of accepted features skipped for unusable geometry.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }
}

fn polygon_envelope(mp: &MultiPolygon<f64>) -> AABB<[f64; 2]> {
    mp.bounding_rect().map_or_else(
        || AABB::from_point([0.0, 0.0]),
        |rect| AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]),
    )
}
