use crate::error::DatasetError;
use crate::location::Location;
use crate::sphere::{Cap, Loop, Point, Polygon};
use geo::Area;
use geo_types::{LineString, Polygon as PlanarPolygon};
use geojson::Value;
use rstar::primitives::Rectangle;
use rstar::{Envelope, PointDistance, RTreeObject, AABB};
use std::f64::consts::PI;

type Point3 = [f64; 3];

/// One boundary feature in the index: its spherical polygon, the location
/// it resolves to, and a cached envelope for the R-tree.
#[derive(Debug)]
pub struct Shape {
    rect: Rectangle<Point3>,
    polygon: Polygon,
    location: Location,
    /// Insertion order across all datasets; queries sort matches by it.
    pub(crate) seq: usize,
}

impl Shape {
    pub(crate) fn new(polygon: Polygon, location: Location) -> Self {
        let aabb = polygon
            .loops()
            .iter()
            .map(|l| cap_envelope(l.cap()))
            .reduce(|merged, next| merged.merged(&next))
            .unwrap_or_else(|| AABB::from_point([0.0, 0.0, 0.0]));
        Shape {
            rect: Rectangle::from_aabb(aabb),
            polygon,
            location,
            seq: 0,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        self.polygon.contains(point)
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }
}

impl RTreeObject for Shape {
    type Envelope = AABB<Point3>;

    fn envelope(&self) -> Self::Envelope {
        self.rect.envelope()
    }
}

impl PointDistance for Shape {
    fn distance_2(&self, point: &Point3) -> f64 {
        self.rect.distance_2(point)
    }
}

/// A box around a cap in unit-vector space.
///
/// Every point within angular radius r of the center is within the chord
/// length 2·sin(r/2) of it along each axis.
fn cap_envelope(cap: Cap) -> AABB<Point3> {
    let chord = 2.0 * (cap.radius().min(PI) / 2.0).sin();
    let center = cap.center();
    let lower = [
        (center.x - chord).max(-1.0),
        (center.y - chord).max(-1.0),
        (center.z - chord).max(-1.0),
    ];
    let upper = [
        (center.x + chord).min(1.0),
        (center.y + chord).min(1.0),
        (center.z + chord).min(1.0),
    ];
    AABB::from_corners(lower, upper)
}

/// Compiles a GeoJSON geometry into a spherical polygon.
///
/// A Polygon's rings (outer, then holes) become one loop each; a
/// MultiPolygon concatenates the loops of all its parts. Any ring failure
/// aborts the whole geometry.
pub(crate) fn compile(geometry: &Value) -> Result<Polygon, DatasetError> {
    match geometry {
        Value::Polygon(rings) => {
            let mut loops = Vec::with_capacity(rings.len());
            for ring in rings {
                loops.push(spherical_loop(ring)?);
            }
            Ok(Polygon::new(loops))
        }
        Value::MultiPolygon(parts) => {
            let mut loops = Vec::with_capacity(parts.iter().map(Vec::len).sum());
            for rings in parts {
                for ring in rings {
                    loops.push(spherical_loop(ring)?);
                }
            }
            Ok(Polygon::new(loops))
        }
        other => Err(DatasetError::UnsupportedGeometry(
            type_name(other).to_string(),
        )),
    }
}

fn type_name(geometry: &Value) -> &'static str {
    match geometry {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

/// Converts one closed linear ring into an oriented spherical loop.
fn spherical_loop(ring: &[Vec<f64>]) -> Result<Loop, DatasetError> {
    let n = ring.len();
    // A closed ring repeats its first coordinate, so a triangle has four.
    if n < 4 {
        return Err(DatasetError::RingTooSmall(n));
    }
    let (first, last) = (&ring[0], &ring[n - 1]);
    if first[0] != last[0] || first[1] != last[1] {
        let flat = ring.iter().flat_map(|pos| pos.iter().copied()).collect();
        return Err(DatasetError::RingNotClosed(flat));
    }

    // First guess from the planar winding; it is blind to the antimeridian
    // and the poles, which the cap check below catches.
    let reverse = is_clockwise(ring);
    let vertices = (0..n - 1)
        .map(|i| {
            let pos = if reverse { &ring[n - 1 - i] } else { &ring[i] };
            Point::from_lon_lat(pos[0], pos[1])
        })
        .collect();

    let mut compiled = Loop::new(vertices);
    // More than a hemisphere means the guess picked the wrong side. Invert
    // in place; rebuilding from reordered coordinates shifts the vertices
    // under floating point.
    if compiled.cap().radius_degrees() > 90.0 {
        compiled.invert();
    }
    Ok(compiled)
}

/// Planar shoelace orientation of a lon/lat ring.
fn is_clockwise(ring: &[Vec<f64>]) -> bool {
    let boundary: LineString<f64> = ring.iter().map(|pos| (pos[0], pos[1])).collect();
    PlanarPolygon::new(boundary, vec![]).signed_area() < 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(coords: &[(f64, f64)]) -> Vec<Vec<f64>> {
        coords.iter().map(|&(lon, lat)| vec![lon, lat]).collect()
    }

    fn closed_square(lon: f64, lat: f64, size: f64) -> Vec<Vec<f64>> {
        ring(&[
            (lon, lat),
            (lon + size, lat),
            (lon + size, lat + size),
            (lon, lat + size),
            (lon, lat),
        ])
    }

    #[test]
    fn rejects_rings_with_too_few_coordinates() {
        let geometry = Value::Polygon(vec![ring(&[(1.0, 2.0), (3.0, 4.0), (1.0, 2.0)])]);
        assert!(matches!(
            compile(&geometry),
            Err(DatasetError::RingTooSmall(3))
        ));
    }

    #[test]
    fn rejects_unclosed_rings_with_their_coordinates() {
        let geometry = Value::Polygon(vec![ring(&[
            (1.0, 2.0),
            (3.0, 4.0),
            (5.0, 6.0),
            (7.0, 8.0),
        ])]);
        match compile(&geometry) {
            Err(DatasetError::RingNotClosed(flat)) => {
                assert_eq!(flat, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn rejects_unclosed_rings_inside_multi_polygons() {
        let geometry = Value::MultiPolygon(vec![vec![ring(&[
            (1.0, 2.0),
            (3.0, 4.0),
            (5.0, 6.0),
            (7.0, 8.0),
        ])]]);
        assert!(matches!(
            compile(&geometry),
            Err(DatasetError::RingNotClosed(_))
        ));
    }

    #[test]
    fn rejects_other_geometry_types() {
        let geometry = Value::Point(vec![0.0, 0.0]);
        match compile(&geometry) {
            Err(DatasetError::UnsupportedGeometry(name)) => assert_eq!(name, "Point"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn winding_direction_does_not_matter() {
        let counter_clockwise = compile(&Value::Polygon(vec![closed_square(0.0, 0.0, 10.0)]));
        let clockwise = compile(&Value::Polygon(vec![ring(&[
            (0.0, 0.0),
            (0.0, 10.0),
            (10.0, 10.0),
            (10.0, 0.0),
            (0.0, 0.0),
        ])]));
        let inside = Point::from_lon_lat(5.0, 5.0);
        let outside = Point::from_lon_lat(15.0, 5.0);
        for polygon in [counter_clockwise.unwrap(), clockwise.unwrap()] {
            assert!(polygon.contains(inside));
            assert!(!polygon.contains(outside));
        }
    }

    #[test]
    fn holes_are_subtracted() {
        let geometry = Value::Polygon(vec![
            closed_square(0.0, 0.0, 10.0),
            closed_square(4.0, 4.0, 2.0),
        ]);
        let polygon = compile(&geometry).unwrap();
        assert!(polygon.contains(Point::from_lon_lat(2.0, 2.0)));
        assert!(!polygon.contains(Point::from_lon_lat(5.0, 5.0)));
    }

    #[test]
    fn multi_polygon_parts_are_united() {
        let geometry = Value::MultiPolygon(vec![
            vec![closed_square(0.0, 0.0, 10.0)],
            vec![closed_square(20.0, 0.0, 10.0)],
        ]);
        let polygon = compile(&geometry).unwrap();
        assert!(polygon.contains(Point::from_lon_lat(5.0, 5.0)));
        assert!(polygon.contains(Point::from_lon_lat(25.0, 5.0)));
        assert!(!polygon.contains(Point::from_lon_lat(15.0, 5.0)));
    }

    #[test]
    fn antimeridian_ring_compiles_to_the_small_side() {
        // The planar winding of a ring crossing the antimeridian looks
        // reversed; the cap check has to recover it.
        let geometry = Value::Polygon(vec![ring(&[
            (175.0, -20.0),
            (-175.0, -20.0),
            (-175.0, -10.0),
            (175.0, -10.0),
            (175.0, -20.0),
        ])]);
        let polygon = compile(&geometry).unwrap();
        assert!(polygon.contains(Point::from_lon_lat(179.5, -15.0)));
        assert!(polygon.contains(Point::from_lon_lat(-179.5, -15.0)));
        assert!(!polygon.contains(Point::from_lon_lat(0.0, -15.0)));
    }

    #[test]
    fn polar_ring_compiles_to_the_polar_cap() {
        // Constant-latitude ring around the South Pole; its planar signed
        // area degenerates to zero.
        let mut coords: Vec<(f64, f64)> = (0..24).map(|i| (-180.0 + 15.0 * i as f64, -70.0)).collect();
        coords.push(coords[0]);
        let geometry = Value::Polygon(vec![ring(&coords)]);
        let polygon = compile(&geometry).unwrap();
        assert!(polygon.contains(Point::from_lon_lat(44.99, -89.99)));
        assert!(!polygon.contains(Point::from_lon_lat(44.99, -60.0)));
        assert!(!polygon.contains(Point::from_lon_lat(0.0, 90.0)));
    }

    #[test]
    fn compiled_loops_stay_under_a_hemisphere() {
        let geometries = [
            Value::Polygon(vec![closed_square(-102.0, 40.0, 20.0)]),
            Value::Polygon(vec![ring(&[
                (175.0, -20.0),
                (-175.0, -20.0),
                (-175.0, -10.0),
                (175.0, -10.0),
                (175.0, -20.0),
            ])]),
        ];
        for geometry in &geometries {
            for l in compile(geometry).unwrap().loops() {
                assert!(l.cap().radius_degrees() <= 90.0);
            }
        }
    }

    #[test]
    fn envelope_covers_the_polygon() {
        let polygon = compile(&Value::Polygon(vec![closed_square(0.0, 0.0, 10.0)])).unwrap();
        let shape = Shape::new(polygon, Location::default());
        let inside = Point::from_lon_lat(5.0, 5.0);
        assert!(shape
            .envelope()
            .contains_point(&[inside.x, inside.y, inside.z]));
        assert!(shape.contains(inside));
    }
}
