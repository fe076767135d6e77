use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the geocoder.
///
/// Construction errors are fatal for the whole [`crate::Geocoder::new`]
/// call and identify the offending dataset by its position among the
/// arguments. [`Error::LocationNotFound`] is the one recoverable error and
/// expected for open ocean or points outside dataset coverage.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid dataset {dataset}: {source}")]
    Dataset {
        dataset: usize,
        #[source]
        source: DatasetError,
    },

    #[error("no location found for ({lon}, {lat})")]
    LocationNotFound { lon: f64, lat: f64 },
}

/// What went wrong while decoding or compiling a single dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("no data found")]
    Empty,

    #[error("invalid gzip stream: {0}")]
    Decompression(#[from] std::io::Error),

    #[error("malformed GeoJSON: {0}")]
    Malformed(#[from] geojson::Error),

    #[error("unsupported geometry type {0}, needs Polygon or MultiPolygon")]
    UnsupportedGeometry(String),

    #[error("ring has {0} coordinates, needs at least 4")]
    RingTooSmall(usize),

    #[error("ring not closed, first and last coordinate differ: {0:?}")]
    RingNotClosed(Vec<f64>),
}

impl Error {
    pub(crate) fn dataset(dataset: usize, source: DatasetError) -> Self {
        Error::Dataset { dataset, source }
    }
}
