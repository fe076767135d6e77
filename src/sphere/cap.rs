use super::Point;

/// A spherical cap: everything within an angular radius of a center point.
///
/// Radii are in radians; a radius of π covers the whole sphere.
#[derive(Clone, Copy, Debug)]
pub struct Cap {
    center: Point,
    radius: f64,
}

impl Cap {
    pub fn new(center: Point, radius: f64) -> Self {
        Cap { center, radius }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn radius_degrees(&self) -> f64 {
        self.radius.to_degrees()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.center.angle(point) <= self.radius
    }
}
