//! Dataset decoding and the embedded boundary data.
//!
//! A dataset is a gzip-compressed GeoJSON `FeatureCollection` restricted to
//! Polygon and MultiPolygon geometries. The four standard Natural Earth
//! datasets are generated ahead of time by the datagen tooling and embedded
//! with the `embedded-datasets` feature; [`crate::Geocoder::new`] accepts
//! any blob in the same format.

use crate::error::DatasetError;
use flate2::read::GzDecoder;
use geojson::{FeatureCollection, GeoJson};
use std::io::Read;

/// Decompresses and parses one dataset blob.
pub(crate) fn decode(blob: &[u8]) -> Result<FeatureCollection, DatasetError> {
    if blob.is_empty() {
        return Err(DatasetError::Empty);
    }
    let mut json = String::new();
    GzDecoder::new(blob).read_to_string(&mut json)?;
    let geojson = json.parse::<GeoJson>()?;
    Ok(FeatureCollection::try_from(geojson)?)
}

/// Country boundaries at 1:110m scale. The smallest dataset; coarse
/// coastlines, country-level fields only.
#[cfg(feature = "embedded-datasets")]
pub fn countries110() -> &'static [u8] {
    include_bytes!("../data/Countries110.gz")
}

/// Country boundaries at 1:10m scale.
#[cfg(feature = "embedded-datasets")]
pub fn countries10() -> &'static [u8] {
    include_bytes!("../data/Countries10.gz")
}

/// Province boundaries at 1:10m scale. Features carry both country- and
/// province-level fields.
#[cfg(feature = "embedded-datasets")]
pub fn provinces10() -> &'static [u8] {
    include_bytes!("../data/Provinces10.gz")
}

/// Urban-area polygons at 1:10m scale. Meant to be stacked on top of
/// [`provinces10`].
#[cfg(feature = "embedded-datasets")]
pub fn cities10() -> &'static [u8] {
    include_bytes!("../data/Cities10.gz")
}
