//! # landfall
//!
//! Offline reverse geocoding: a (longitude, latitude) pair in, the
//! administrative [`Location`] containing it out. All boundary data ships
//! inside the binary, so lookups never touch the network or the file
//! system.
//!
//! ## Usage
//!
//! Build a [`Geocoder`] from one or more datasets, stack finer layers on
//! top of coarser ones, and query away:
//!
//! ```no_run
//! # #[cfg(feature = "embedded-datasets")]
//! # {
//! use landfall::{dataset, Geocoder};
//!
//! let geocoder = Geocoder::new([dataset::provinces10(), dataset::cities10()])?;
//! geocoder.build(); // optional; the first query builds otherwise
//!
//! let location = geocoder.reverse_geocode(47.523836, -18.905691)?;
//! assert_eq!(location.country, "Madagascar");
//! assert_eq!(location.city, "Antananarivo");
//! # }
//! # Ok::<(), landfall::Error>(())
//! ```
//!
//! Datasets are gzip-compressed GeoJSON feature collections of Polygon and
//! MultiPolygon boundaries; the four Natural Earth blobs in [`dataset`] are
//! available with the `embedded-datasets` feature, and any blob in the same
//! format works. Construction decompresses each dataset, compiles every
//! boundary onto the unit sphere and indexes it; a query collects all
//! shapes containing the point and merges their attributes, first non-empty
//! value per field, walking the datasets in the order they were given.
//! List coarser datasets first.

pub mod dataset;
pub mod error;
pub mod index;
pub mod location;
pub mod shape;
pub mod sphere;

pub use error::{Error, Result};
pub use index::ShapeIndex;
pub use location::Location;

use crate::shape::Shape;
use crate::sphere::Point;
use tracing::{debug, instrument};

/// A reverse geocoder over a fixed set of boundary datasets.
///
/// Construction is single-threaded and fatal on the first bad dataset;
/// afterwards the geocoder is immutable and safe to share across threads.
#[derive(Debug)]
pub struct Geocoder {
    index: ShapeIndex,
}

impl Geocoder {
    /// Builds a geocoder from gzip-compressed GeoJSON datasets.
    ///
    /// Features are indexed in argument order, which is also the merge
    /// precedence for [`Geocoder::reverse_geocode`]; pass coarser datasets
    /// (countries, provinces) before finer ones (cities).
    #[instrument(level = "debug", skip_all)]
    pub fn new<'a, I>(datasets: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut index = ShapeIndex::new();
        for (position, blob) in datasets.into_iter().enumerate() {
            let collection = dataset::decode(blob)
                .map_err(|source| Error::dataset(position, source))?;
            debug!(
                dataset = position,
                features = collection.features.len(),
                "decoded dataset"
            );
            for feature in collection {
                let location = Location::from_properties(feature.properties.as_ref());
                let geometry = feature.geometry.as_ref().ok_or_else(|| {
                    Error::dataset(
                        position,
                        error::DatasetError::UnsupportedGeometry("none".to_string()),
                    )
                })?;
                let polygon = shape::compile(&geometry.value)
                    .map_err(|source| Error::dataset(position, source))?;
                index.add(Shape::new(polygon, location));
            }
        }
        Ok(Geocoder { index })
    }

    /// Pre-builds the shape index.
    ///
    /// Optional: the first query builds lazily through a one-shot barrier.
    /// Calling this up front makes later query latency predictable.
    pub fn build(&self) {
        self.index.build();
    }

    /// The location containing the point at (lon, lat), in decimal degrees.
    ///
    /// Fails with [`Error::LocationNotFound`] when no shape contains the
    /// point, e.g. in open ocean. A point exactly on a boundary vertex or
    /// edge counts as outside that boundary.
    #[instrument(level = "trace", skip(self))]
    pub fn reverse_geocode(&self, lon: f64, lat: f64) -> Result<Location> {
        let point = Point::from_lon_lat(lon, lat);
        let mut shapes: Vec<&Shape> = self.index.containing(point).collect();
        if shapes.is_empty() {
            return Err(Error::LocationNotFound { lon, lat });
        }
        // Merge precedence is dataset order, then feature order; the
        // R-tree returns candidates in build order instead.
        shapes.sort_by_key(|shape| shape.seq);
        let mut location = Location::default();
        for shape in shapes {
            location.fill_missing_from(shape.location());
        }
        Ok(location)
    }

    pub fn index(&self) -> &ShapeIndex {
        &self.index
    }
}
