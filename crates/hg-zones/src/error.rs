use thiserror::Error;

/// Errors produced by `hg-zones`.
#[derive(Debug, Error)]
pub enum ZoneError {
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("expected a GeoJSON FeatureCollection or Feature")]
    NotFeatures,

    #[error("feature {feature} has no {property:?} property")]
    MissingProperty { feature: usize, property: String },

    #[error("feature {feature}: {geometry} geometry is not a polygon")]
    NotAPolygon { feature: usize, geometry: String },

    #[error("feature {feature} has no geometry")]
    MissingGeometry { feature: usize },

    #[error("zone {zone:?} has invalid attendance weight {value}")]
    InvalidWeight { zone: String, value: String },

    #[error("zone name {0:?} occurs more than once")]
    DuplicateZone(String),

    #[error("link {link:?} lies in both zone {first:?} and zone {second:?}")]
    OverlappingZones { link: String, first: String, second: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ZoneResult<T> = Result<T, ZoneError>;
