//! Geometry primitives with explicit failure values.
//!
//! `geo` itself rarely fails, but source layers do contain empty rings,
//! non-finite coordinates, and geometry types a given operation cannot use.
//! Those are reported as [`GeometryFailure`] so each caller can decide to
//! skip the feature for that one operation.
//!
//! Distances are measured in kilometres on a [`LocalProjection`]: an
//! equirectangular plane centred on the study area's latitude. At municipal
//! scale its error is far below the distance thresholds the strategies use.

use geo::{
    BoundingRect, Centroid, ChamberlainDuquetteArea, ConvexHull, Coord, CoordsIter,
    Distance, Euclidean, Geometry, Haversine, Intersects, LineString, MapCoords, MultiLineString,
    MultiPoint, MultiPolygon, Point, Rect, Simplify,
};
use thiserror::Error;

/// Square metres per acre.
pub const SQ_METERS_PER_ACRE: f64 = 4046.86;

/// Square feet per acre.
pub const SQ_FEET_PER_ACRE: f64 = 43_560.0;

/// Miles per kilometre.
pub const MILES_PER_KM: f64 = 0.621_371;

/// Feet per kilometre.
pub const FEET_PER_KM: f64 = 3280.84;

/// Why a geometry operation produced no value for a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryFailure {
    /// The geometry has no usable parts (e.g. no rings, a ring with fewer
    /// than three distinct vertices, or a line with one vertex).
    #[error("geometry is empty or degenerate")]
    Empty,
    /// A coordinate is NaN or infinite.
    #[error("geometry has non-finite coordinates")]
    NonFinite,
    /// The geometry type is not valid for the requested operation.
    #[error("geometry type is not supported for this operation")]
    Unsupported,
}

/// Result of a geometry operation on a single feature.
pub type GeomResult<T> = Result<T, GeometryFailure>;

fn ensure_finite<G: CoordsIter<Scalar = f64>>(geometry: &G) -> GeomResult<()> {
    if geometry
        .coords_iter()
        .all(|c| c.x.is_finite() && c.y.is_finite())
    {
        Ok(())
    } else {
        Err(GeometryFailure::NonFinite)
    }
}

/// Converts a polygon or multipolygon into a validated [`MultiPolygon`].
///
/// # Errors
///
/// * [`GeometryFailure::Unsupported`] for non-areal geometry.
/// * [`GeometryFailure::Empty`] if there are no polygons or any exterior
///   ring is degenerate.
/// * [`GeometryFailure::NonFinite`] for NaN/infinite coordinates.
pub fn polygonal(geometry: &Geometry<f64>) -> GeomResult<MultiPolygon<f64>> {
    let mp = match geometry {
        Geometry::Polygon(p) => MultiPolygon::new(vec![p.clone()]),
        Geometry::MultiPolygon(mp) => mp.clone(),
        _ => return Err(GeometryFailure::Unsupported),
    };

    if mp.0.is_empty() || mp.0.iter().any(|p| p.exterior().0.len() < 4) {
        return Err(GeometryFailure::Empty);
    }
    ensure_finite(&mp)?;
    Ok(mp)
}

/// Converts a line string or multi line string into a validated
/// [`MultiLineString`].
///
/// # Errors
///
/// * [`GeometryFailure::Unsupported`] for non-linear geometry.
/// * [`GeometryFailure::Empty`] if there are no lines or a line has fewer
///   than two vertices.
/// * [`GeometryFailure::NonFinite`] for NaN/infinite coordinates.
pub fn lineal(geometry: &Geometry<f64>) -> GeomResult<MultiLineString<f64>> {
    let mls = match geometry {
        Geometry::LineString(ls) => MultiLineString::new(vec![ls.clone()]),
        Geometry::MultiLineString(mls) => mls.clone(),
        _ => return Err(GeometryFailure::Unsupported),
    };

    if mls.0.is_empty() || mls.0.iter().any(|ls| ls.0.len() < 2) {
        return Err(GeometryFailure::Empty);
    }
    ensure_finite(&mls)?;
    Ok(mls)
}

/// Collects every exterior and interior ring of `polygons` as lines.
#[must_use]
pub fn boundary(polygons: &MultiPolygon<f64>) -> MultiLineString<f64> {
    MultiLineString::new(
        polygons
            .iter()
            .flat_map(|p| std::iter::once(p.exterior()).chain(p.interiors()))
            .cloned()
            .collect(),
    )
}

/// Area-weighted centroid.
///
/// # Errors
///
/// Returns [`GeometryFailure::Empty`] when `geo` cannot compute a centroid
/// and [`GeometryFailure::NonFinite`] when the result is not finite
/// (zero-area input).
pub fn centroid(polygons: &MultiPolygon<f64>) -> GeomResult<Point<f64>> {
    let point = polygons.centroid().ok_or(GeometryFailure::Empty)?;
    ensure_finite(&point)?;
    Ok(point)
}

/// First exterior vertex, the fallback representative point when no
/// centroid can be computed.
#[must_use]
pub fn first_vertex(polygons: &MultiPolygon<f64>) -> Option<Point<f64>> {
    polygons
        .iter()
        .next()
        .and_then(|p| p.exterior().0.first())
        .map(|c| Point::from(*c))
}

/// Geodesic area in acres.
///
/// # Errors
///
/// Returns [`GeometryFailure::NonFinite`] if the computed area is not a
/// finite number.
pub fn geodesic_acres(polygons: &MultiPolygon<f64>) -> GeomResult<f64> {
    let acres = polygons.chamberlain_duquette_unsigned_area() / SQ_METERS_PER_ACRE;
    if acres.is_finite() {
        Ok(acres)
    } else {
        Err(GeometryFailure::NonFinite)
    }
}

/// Great-circle distance between two lon/lat points, in kilometres.
#[must_use]
pub fn great_circle_km(a: Point<f64>, b: Point<f64>) -> f64 {
    Haversine.distance(a, b) / 1000.0
}

/// Whether `point` lies inside `polygons` or on their boundary.
#[must_use]
pub fn contains_point(polygons: &MultiPolygon<f64>, point: Point<f64>) -> bool {
    polygons.intersects(&point)
}

/// Whether two areal geometries share any point.
#[must_use]
pub fn polygons_intersect(a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> bool {
    a.intersects(b)
}

/// Bounding rectangle covering every geometry in `geometries`.
pub fn extent<'a>(geometries: impl IntoIterator<Item = &'a Geometry<f64>>) -> Option<Rect<f64>> {
    geometries
        .into_iter()
        .filter_map(BoundingRect::bounding_rect)
        .reduce(|a, b| {
            Rect::new(
                Coord {
                    x: a.min().x.min(b.min().x),
                    y: a.min().y.min(b.min().y),
                },
                Coord {
                    x: a.max().x.max(b.max().x),
                    y: a.max().y.max(b.max().y),
                },
            )
        })
}

/// Convex hull of `points` as a closed ring.
#[must_use]
pub fn convex_hull_ring(points: &[[f64; 2]]) -> Vec<[f64; 2]> {
    let multi: MultiPoint<f64> = points.iter().map(|[x, y]| Point::new(*x, *y)).collect();
    multi
        .convex_hull()
        .exterior()
        .coords()
        .map(|c| [c.x, c.y])
        .collect()
}

/// Rings of the first polygon of `polygons`, simplified with
/// Ramer–Douglas–Peucker at `tolerance` degrees.
///
/// Falls back to the unsimplified rings if simplification collapses the
/// exterior ring.
#[must_use]
pub fn simplified_rings(polygons: &MultiPolygon<f64>, tolerance: f64) -> Vec<Vec<[f64; 2]>> {
    let Some(first) = polygons.iter().next() else {
        return Vec::new();
    };

    let simplified = first.simplify(tolerance);
    let polygon = if simplified.exterior().0.len() >= 4 {
        &simplified
    } else {
        first
    };

    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(ring_coords)
        .collect()
}

fn ring_coords(ring: &LineString<f64>) -> Vec<[f64; 2]> {
    ring.coords().map(|c| [c.x, c.y]).collect()
}

/// Equirectangular projection from lon/lat degrees to a local kilometre
/// plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalProjection {
    km_per_deg_lon: f64,
    km_per_deg_lat: f64,
}

impl LocalProjection {
    /// Kilometres per degree of latitude.
    const KM_PER_DEG_LAT: f64 = 110.574;
    /// Kilometres per degree of longitude at the equator.
    const KM_PER_DEG_LON_EQUATOR: f64 = 111.320;

    /// Creates a projection whose longitude scale is exact at `latitude`.
    #[must_use]
    pub fn centered_on(latitude: f64) -> Self {
        Self {
            km_per_deg_lon: Self::KM_PER_DEG_LON_EQUATOR * latitude.to_radians().cos(),
            km_per_deg_lat: Self::KM_PER_DEG_LAT,
        }
    }

    /// Creates a projection centred on the middle latitude of `extent`.
    #[must_use]
    pub fn for_extent(extent: Rect<f64>) -> Self {
        Self::centered_on(extent.center().y)
    }

    fn coord(self, c: Coord<f64>) -> Coord<f64> {
        Coord {
            x: c.x * self.km_per_deg_lon,
            y: c.y * self.km_per_deg_lat,
        }
    }

    /// Projects a point into kilometres.
    #[must_use]
    pub fn point(self, point: Point<f64>) -> Point<f64> {
        Point::from(self.coord(point.0))
    }

    /// Projects lines into kilometres.
    #[must_use]
    pub fn lines(self, lines: &MultiLineString<f64>) -> MultiLineString<f64> {
        lines.map_coords(|c| self.coord(c))
    }

    /// Projects polygons into kilometres.
    #[must_use]
    pub fn polygons(self, polygons: &MultiPolygon<f64>) -> MultiPolygon<f64> {
        polygons.map_coords(|c| self.coord(c))
    }

    /// Converts a distance in kilometres into a conservative padding in
    /// degrees (the larger of the two axis conversions).
    #[must_use]
    pub fn km_to_degrees(self, km: f64) -> f64 {
        (km / self.km_per_deg_lon).max(km / self.km_per_deg_lat)
    }
}

/// Shortest planar distance from a projected point to any projected line.
///
/// # Errors
///
/// Returns [`GeometryFailure::Empty`] for an empty line set and
/// [`GeometryFailure::NonFinite`] if the distance is not finite.
pub fn distance_to_lines(point: &Point<f64>, lines: &MultiLineString<f64>) -> GeomResult<f64> {
    let distance = lines
        .iter()
        .map(|line| Euclidean.distance(point, line))
        .reduce(f64::min)
        .ok_or(GeometryFailure::Empty)?;

    if distance.is_finite() {
        Ok(distance)
    } else {
        Err(GeometryFailure::NonFinite)
    }
}

/// Whether any projected polygon lies within `threshold` of any projected
/// line. Equivalent to intersecting the polygons with a `threshold` buffer
/// around the lines.
#[must_use]
pub fn polygons_within(
    polygons: &MultiPolygon<f64>,
    lines: &MultiLineString<f64>,
    threshold: f64,
) -> bool {
    polygons.iter().any(|polygon| {
        lines
            .iter()
            .any(|line| Euclidean.distance(polygon, line) <= threshold)
    })
}
