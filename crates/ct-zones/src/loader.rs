//! GeoJSON zone loader.
//!
//! # Format
//!
//! A `FeatureCollection` (a bare `Feature` is also accepted) whose features
//! carry `Polygon` or `MultiPolygon` geometry and these properties:
//!
//! | Property     | Meaning                                   | Required |
//! |--------------|-------------------------------------------|----------|
//! | `denspob`    | population density, number or numeric string | yes   |
//! | `desc_zoni`  | land-use label (see [`LandUse::parse`])   | yes      |
//! | `tile_id`    | opaque tile identifier                    | no       |
//! | `sclas_zoni` | zoning sub-class                          | no       |
//!
//! ```json
//! {"type": "FeatureCollection", "features": [
//!   {"type": "Feature",
//!    "properties": {"denspob": 12.5, "desc_zoni": "RESIDENCIAL"},
//!    "geometry": {"type": "Polygon", "coordinates": [[[-70.6,-33.4], ...]]}}
//! ]}
//! ```
//!
//! Property names can be remapped with [`ZoneFields`].

use std::io::Read;
use std::path::Path;

use geo::{Geometry, MultiPolygon};
use geojson::{Feature, GeoJson, JsonValue};
use log::debug;

use crate::zone::{LandUse, Zone};
use crate::{ZoneError, ZoneResult};

/// Property keys read from each feature.
#[derive(Clone, Debug)]
pub struct ZoneFields {
    pub density:   String,
    pub land_use:  String,
    pub tile_id:   String,
    pub sub_class: String,
}

impl Default for ZoneFields {
    fn default() -> Self {
        Self {
            density:   "denspob".into(),
            land_use:  "desc_zoni".into(),
            tile_id:   "tile_id".into(),
            sub_class: "sclas_zoni".into(),
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load zones from a GeoJSON file with the default property names.
pub fn load_zones_geojson(path: &Path) -> ZoneResult<Vec<Zone>> {
    let file = std::fs::File::open(path)?;
    load_zones_reader(file, &ZoneFields::default())
}

/// Like [`load_zones_geojson`] but accepts any `Read` source and custom
/// property names.
pub fn load_zones_reader<R: Read>(mut reader: R, fields: &ZoneFields) -> ZoneResult<Vec<Zone>> {
    let mut raw = String::new();
    reader.read_to_string(&mut raw)?;
    load_zones_str(&raw, fields)
}

/// Parse zones from an in-memory GeoJSON document.
pub fn load_zones_str(raw: &str, fields: &ZoneFields) -> ZoneResult<Vec<Zone>> {
    let features = match raw.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => return Err(ZoneError::NotFeatures("a bare Geometry")),
    };

    let zones = features
        .into_iter()
        .enumerate()
        .map(|(i, feature)| zone_from_feature(i, feature, fields))
        .collect::<ZoneResult<Vec<_>>>()?;

    debug!("loaded {} zones", zones.len());
    Ok(zones)
}

// ── Feature conversion ────────────────────────────────────────────────────────

fn zone_from_feature(index: usize, feature: Feature, fields: &ZoneFields) -> ZoneResult<Zone> {
    let density = match feature.property(&fields.density) {
        Some(value) => numeric(index, &fields.density, value)?,
        None => return Err(missing(index, &fields.density)),
    };
    if !(density.is_finite() && density >= 0.0) {
        return Err(ZoneError::InvalidDensity { feature: index, density });
    }

    let land_use = feature
        .property(&fields.land_use)
        .and_then(JsonValue::as_str)
        .map(LandUse::parse)
        .ok_or_else(|| missing(index, &fields.land_use))?;

    let tile_id = feature.property(&fields.tile_id).and_then(label);
    let sub_class = feature.property(&fields.sub_class).and_then(label);

    let geometry = feature
        .geometry
        .ok_or(ZoneError::MissingGeometry { feature: index })?;
    let geometry = to_multipolygon(index, Geometry::<f64>::try_from(geometry.value)?)?;

    Ok(Zone {
        id: index as u32,
        geometry,
        land_use,
        density,
        tile_id,
        sub_class,
    })
}

fn to_multipolygon(index: usize, geometry: Geometry<f64>) -> ZoneResult<MultiPolygon<f64>> {
    let kind = match geometry {
        Geometry::Polygon(p) => return Ok(MultiPolygon::new(vec![p])),
        Geometry::MultiPolygon(mp) => return Ok(mp),
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    };
    Err(ZoneError::UnsupportedGeometry { feature: index, kind })
}

fn numeric(index: usize, key: &str, value: &JsonValue) -> ZoneResult<f64> {
    let parsed = match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| ZoneError::NotNumeric {
        feature: index,
        key:     key.to_owned(),
        value:   value.to_string(),
    })
}

/// Identifier-like property rendered as a string; `null` is treated as absent.
fn label(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn missing(index: usize, key: &str) -> ZoneError {
    ZoneError::MissingProperty { feature: index, key: key.to_owned() }
}
