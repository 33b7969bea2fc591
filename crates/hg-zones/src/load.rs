//! GeoJSON readers for the attendance distribution and the residential mask.
//!
//! Both expect a `FeatureCollection` (a lone `Feature` is accepted too) in
//! the same projected CRS as the network.  Zone features carry a name and a
//! weight property whose keys are configurable, since every upstream dataset
//! names them differently:
//!
//! ```json
//! { "type": "Feature",
//!   "properties": { "name": "Spandau", "fans": 1250 },
//!   "geometry": { "type": "Polygon", "coordinates": [[[...]]] } }
//! ```
//!
//! Weights may be JSON numbers or numeric strings (shapefile conversions
//! often emit the latter).  Names may be strings or numbers (district codes).
//! Only `Polygon` and `MultiPolygon` geometries are accepted.

use std::path::Path;
use std::str::FromStr;

use geo::{Geometry, MultiPolygon};
use geojson::{Feature, GeoJson};

use crate::{Area, Zone, ZoneError, ZoneResult, ZoneSet};

/// Read zones from a GeoJSON file.
pub fn load_zones_geojson(path: &Path, name_property: &str, weight_property: &str) -> ZoneResult<ZoneSet> {
    let text = std::fs::read_to_string(path)?;
    let zones = load_zones_str(&text, name_property, weight_property)?;
    log::info!(
        "read {} zones with total weight {} from {}",
        zones.len(),
        zones.total_weight(),
        path.display()
    );
    Ok(zones)
}

/// Like [`load_zones_geojson`] but parses an in-memory document.
pub fn load_zones_str(text: &str, name_property: &str, weight_property: &str) -> ZoneResult<ZoneSet> {
    let mut zones = Vec::new();
    for (i, feature) in features(text)?.into_iter().enumerate() {
        let name = property(&feature, i, name_property)?;
        let name = match name.as_str() {
            Some(s) => s.to_owned(),
            None => name.to_string(),
        };
        let weight = weight(&feature, i, weight_property, &name)?;
        let geometry = area(feature, i)?;
        zones.push(Zone::new(name, weight, geometry));
    }
    ZoneSet::new(zones)
}

/// Read a residential mask: the union of every polygon in the file.
pub fn load_mask_geojson(path: &Path) -> ZoneResult<Area> {
    let text = std::fs::read_to_string(path)?;
    let mask = load_mask_str(&text)?;
    log::info!("read mask of {} polygons from {}", mask.0.len(), path.display());
    Ok(mask)
}

/// Like [`load_mask_geojson`] but parses an in-memory document.
pub fn load_mask_str(text: &str) -> ZoneResult<Area> {
    let mut polygons = Vec::new();
    for (i, feature) in features(text)?.into_iter().enumerate() {
        polygons.extend(area(feature, i)?.0);
    }
    Ok(MultiPolygon::new(polygons))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn features(text: &str) -> ZoneResult<Vec<Feature>> {
    match GeoJson::from_str(text)? {
        GeoJson::FeatureCollection(fc) => Ok(fc.features),
        GeoJson::Feature(f) => Ok(vec![f]),
        GeoJson::Geometry(_) => Err(ZoneError::NotFeatures),
    }
}

fn property<'a>(feature: &'a Feature, i: usize, key: &str) -> ZoneResult<&'a geojson::JsonValue> {
    feature
        .property(key)
        .filter(|v| !v.is_null())
        .ok_or_else(|| ZoneError::MissingProperty { feature: i, property: key.to_owned() })
}

fn weight(feature: &Feature, i: usize, key: &str, zone: &str) -> ZoneResult<f64> {
    let raw = property(feature, i, key)?;
    let parsed = match raw.as_str() {
        Some(s) => s.trim().parse::<f64>().ok(),
        None => raw.as_f64(),
    };
    parsed
        .filter(|w| w.is_finite() && *w >= 0.0)
        .ok_or_else(|| ZoneError::InvalidWeight { zone: zone.to_owned(), value: raw.to_string() })
}

fn area(feature: Feature, i: usize) -> ZoneResult<Area> {
    let geometry = feature.geometry.ok_or(ZoneError::MissingGeometry { feature: i })?;
    match Geometry::<f64>::try_from(geometry)? {
        Geometry::Polygon(p) => Ok(MultiPolygon::new(vec![p])),
        Geometry::MultiPolygon(mp) => Ok(mp),
        other => Err(ZoneError::NotAPolygon { feature: i, geometry: kind(&other).to_owned() }),
    }
}

fn kind(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
        Geometry::Polygon(_) | Geometry::MultiPolygon(_) => "Polygon",
    }
}
