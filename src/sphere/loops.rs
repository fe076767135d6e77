use super::{Cap, Point};
use std::f64::consts::PI;

/// Guard added to a bounding cap radius so points computed onto the
/// boundary are not rejected by the cap pre-check.
const CAP_SLACK: f64 = 1e-9;

/// Tilt of the containment reference point off the exact cap antipode, in
/// radians. The reference must not be antipodal to any query point, or the
/// test arc between them is undefined.
const REFERENCE_TILT: f64 = 1e-3;

/// A closed loop of great-circle edges on the unit sphere.
///
/// Vertices are stored without the closing repeat and the edge from the
/// last vertex back to the first is implicit. The interior is on the left
/// of the traversal direction; [`Loop::invert`] flips it. A loop is only
/// queryable while its interior covers less than a hemisphere, which holds
/// for every loop whose bounding cap radius is at most 90°.
#[derive(Clone, Debug)]
pub struct Loop {
    vertices: Vec<Point>,
    cap: Cap,
    reference: Point,
}

impl Loop {
    /// Builds a loop from at least three distinct vertices in traversal
    /// order.
    pub fn new(vertices: Vec<Point>) -> Self {
        debug_assert!(vertices.len() >= 3);
        let cap = bounding_cap(&vertices);
        Loop {
            vertices,
            cap,
            reference: reference_outside(cap),
        }
    }

    /// Flips the interior to the other side of the boundary, in place.
    ///
    /// Reuses the existing vertices in reverse order; rebuilding the loop
    /// from scratch is not equivalent under floating point.
    pub fn invert(&mut self) {
        self.vertices.reverse();
        self.cap = bounding_cap(&self.vertices);
        self.reference = reference_outside(self.cap);
    }

    /// The cap bounding the loop's interior.
    ///
    /// A radius above 90° means the interior covers more than a hemisphere.
    pub fn cap(&self) -> Cap {
        self.cap
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Whether the interior contains `point`, under the open vertex model:
    /// a point equal to a vertex or exactly on an edge is outside.
    ///
    /// Counts edge crossings of the arc from a reference point outside the
    /// bounding cap; odd parity is inside.
    pub fn contains(&self, point: Point) -> bool {
        if !self.cap.contains(point) {
            return false;
        }
        let mut inside = false;
        let n = self.vertices.len();
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            if point == a || on_edge(a, b, point) {
                return false;
            }
            if simple_crossing(self.reference, point, a, b) {
                inside = !inside;
            }
        }
        inside
    }
}

/// A point provably outside `cap` for any radius up to 90°: almost
/// antipodal to the cap center, tilted off the exact antipode.
fn reference_outside(cap: Cap) -> Point {
    let center = cap.center();
    center
        .scaled(-REFERENCE_TILT.cos())
        .plus(center.ortho().scaled(-REFERENCE_TILT.sin()))
}

/// The cap bounding the loop interior implied by the traversal direction.
///
/// The summed cross products of successive vertices are the loop's vector
/// area, which points into the interior side for an interior smaller than
/// a hemisphere and away from it otherwise. Measuring the boundary's
/// angular extent around that axis therefore yields a radius above 90°
/// exactly when the traversal winds around the larger side.
fn bounding_cap(vertices: &[Point]) -> Cap {
    let n = vertices.len();
    let mut area_vector = Point::ZERO;
    for i in 0..n {
        area_vector = area_vector.plus(vertices[i].cross(vertices[(i + 1) % n]));
    }
    let axis = if area_vector.norm() == 0.0 {
        vertices[0]
    } else {
        area_vector.normalized()
    };
    let mut radius = 0f64;
    for i in 0..n {
        radius = radius.max(edge_max_angle(axis, vertices[i], vertices[(i + 1) % n]));
    }
    Cap::new(axis, (radius + CAP_SLACK).min(PI))
}

/// The largest angle between `axis` and any point of the edge from `a` to
/// `b`.
///
/// An edge can bulge past both endpoints where its great circle passes
/// through the point farthest from the axis; the maximum is there when
/// that point falls within the edge span, at an endpoint otherwise.
fn edge_max_angle(axis: Point, a: Point, b: Point) -> f64 {
    let at_endpoints = axis.angle(a).max(axis.angle(b));
    let normal = a.cross(b);
    if normal.norm() == 0.0 {
        return at_endpoints;
    }
    let normal = normal.normalized();
    let in_plane = axis.plus(normal.scaled(-axis.dot(normal)));
    if in_plane.norm() == 0.0 {
        // The axis is the edge plane's pole; the whole circle sits at 90°.
        return at_endpoints;
    }
    let farthest = in_plane.normalized().scaled(-1.0);
    let within_span =
        a.cross(farthest).dot(normal) >= 0.0 && farthest.cross(b).dot(normal) >= 0.0;
    if within_span {
        axis.angle(farthest)
    } else {
        at_endpoints
    }
}

/// Whether `point` lies exactly on the edge from `a` to `b`, endpoints
/// included.
fn on_edge(a: Point, b: Point, point: Point) -> bool {
    let normal = a.cross(b);
    if normal.dot(point) != 0.0 {
        return false;
    }
    a.cross(point).dot(normal) >= 0.0 && point.cross(b).dot(normal) >= 0.0
}

/// Whether arc `ab` strictly crosses arc `cd`.
///
/// The four triangle orientations acb, cbd, bda, dac must all agree for a
/// crossing; shared endpoints and touching arcs report no crossing.
fn simple_crossing(a: Point, b: Point, c: Point, d: Point) -> bool {
    let ab = a.cross(b);
    let acb = -ab.dot(c);
    let bda = ab.dot(d);
    if acb * bda <= 0.0 {
        return false;
    }
    let cd = c.cross(d);
    let cbd = -cd.dot(b);
    let dac = cd.dot(a);
    acb * cbd > 0.0 && cbd * dac > 0.0 && dac * bda > 0.0
}
