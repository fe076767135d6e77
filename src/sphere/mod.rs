//! Geometry on the unit sphere.
//!
//! Boundary data arrives as planar lon/lat rings but queries have to be
//! answered on the sphere, where a "rectangle" spanning the antimeridian or
//! enclosing a pole is nothing special. Everything in this module works on
//! unit vectors so there is no coordinate wrapping anywhere: [`Point`] is a
//! position on the sphere, [`Loop`] a closed boundary with its interior on
//! the left of the traversal direction, [`Cap`] a bounding region, and
//! [`Polygon`] a set of loops with even-odd containment.
//!
//! Containment uses the open vertex model: a point lying exactly on a loop
//! vertex or edge is outside.

mod cap;
mod loops;
mod polygon;

pub use cap::Cap;
pub use loops::Loop;
pub use polygon::Polygon;

/// A point on the unit sphere.
///
/// Constructed from geographic coordinates via [`Point::from_lon_lat`]. The
/// components are only meaningful as a direction; all constructors produce
/// unit-length vectors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub(crate) const ZERO: Point = Point {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Converts (lon, lat) in degrees to a unit vector.
    pub fn from_lon_lat(lon: f64, lat: f64) -> Self {
        let (lon, lat) = (lon.to_radians(), lat.to_radians());
        Point {
            x: lat.cos() * lon.cos(),
            y: lat.cos() * lon.sin(),
            z: lat.sin(),
        }
    }

    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Point) -> Point {
        Point {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// The angle in radians between two directions, in [0, π].
    ///
    /// atan2 keeps small angles accurate where acos of a dot product loses
    /// precision.
    pub fn angle(self, other: Point) -> f64 {
        self.cross(other).norm().atan2(self.dot(other))
    }

    pub(crate) fn scaled(self, factor: f64) -> Point {
        Point {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }

    pub(crate) fn plus(self, other: Point) -> Point {
        Point {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }

    pub(crate) fn normalized(self) -> Point {
        let norm = self.norm();
        if norm == 0.0 {
            return self;
        }
        self.scaled(1.0 / norm)
    }

    /// A unit vector orthogonal to `self`.
    pub(crate) fn ortho(self) -> Point {
        // Cross against the coordinate axis self leans on least.
        let axis = if self.x.abs() <= self.y.abs() && self.x.abs() <= self.z.abs() {
            Point {
                x: 1.0,
                y: 0.0,
                z: 0.0,
            }
        } else if self.y.abs() <= self.z.abs() {
            Point {
                x: 0.0,
                y: 1.0,
                z: 0.0,
            }
        } else {
            Point {
                x: 0.0,
                y: 0.0,
                z: 1.0,
            }
        };
        self.cross(axis).normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(point: Point, x: f64, y: f64, z: f64) {
        assert!((point.x - x).abs() < 1e-12, "{point:?}");
        assert!((point.y - y).abs() < 1e-12, "{point:?}");
        assert!((point.z - z).abs() < 1e-12, "{point:?}");
    }

    #[test]
    fn from_lon_lat_hits_the_axes() {
        assert_close(Point::from_lon_lat(0.0, 0.0), 1.0, 0.0, 0.0);
        assert_close(Point::from_lon_lat(90.0, 0.0), 0.0, 1.0, 0.0);
        assert_close(Point::from_lon_lat(0.0, 90.0), 0.0, 0.0, 1.0);
        assert_close(Point::from_lon_lat(0.0, -90.0), 0.0, 0.0, -1.0);
    }

    #[test]
    fn from_lon_lat_is_unit_length() {
        for &(lon, lat) in &[(13.4, 52.5), (-74.0, 40.7), (179.9, -89.9)] {
            let norm = Point::from_lon_lat(lon, lat).norm();
            assert!((norm - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn angle_between_meridians() {
        let greenwich = Point::from_lon_lat(0.0, 0.0);
        let east = Point::from_lon_lat(90.0, 0.0);
        assert!((greenwich.angle(east) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((greenwich.angle(greenwich.scaled(-1.0)) - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn ortho_is_orthogonal_and_unit() {
        for &(lon, lat) in &[(0.0, 0.0), (0.0, 90.0), (45.0, 45.0), (-120.0, -33.0)] {
            let point = Point::from_lon_lat(lon, lat);
            let ortho = point.ortho();
            assert!(point.dot(ortho).abs() < 1e-12);
            assert!((ortho.norm() - 1.0).abs() < 1e-12);
        }
    }
}
