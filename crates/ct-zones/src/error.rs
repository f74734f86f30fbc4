use thiserror::Error;

#[derive(Debug, Error)]
pub enum ZoneError {
    #[error("GeoJSON parse error: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("expected a GeoJSON FeatureCollection or Feature, found {0}")]
    NotFeatures(&'static str),

    #[error("feature {feature}: missing property `{key}`")]
    MissingProperty { feature: usize, key: String },

    #[error("feature {feature}: property `{key}` is not a number: {value}")]
    NotNumeric { feature: usize, key: String, value: String },

    #[error("feature {feature}: population density {density} must be finite and >= 0")]
    InvalidDensity { feature: usize, density: f64 },

    #[error("feature {feature}: has no geometry")]
    MissingGeometry { feature: usize },

    #[error("feature {feature}: unsupported geometry {kind}, expected Polygon or MultiPolygon")]
    UnsupportedGeometry { feature: usize, kind: &'static str },

    #[error("no zones to compute an area of interest from")]
    NoZones,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ZoneResult<T> = Result<T, ZoneError>;
