//! Land-use zones.

use std::fmt;

use geo::{Centroid, MultiPolygon};

use ct_core::GeoPoint;

// ── LandUse ───────────────────────────────────────────────────────────────────

/// Land-use category of a zone.
///
/// Only residential zones act as trip origins and only commercial zones as
/// destinations; everything else is loaded but ignored by the sampler.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LandUse {
    Residential,
    Commercial,
    Other,
}

impl LandUse {
    /// Case-insensitive parse of a land-use label.
    ///
    /// Accepts both the Spanish labels used by municipal zoning layers
    /// (`RESIDENCIAL`, `COMERCIAL`) and their English forms.  Unknown labels
    /// map to [`LandUse::Other`].
    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("residencial") || label.eq_ignore_ascii_case("residential") {
            LandUse::Residential
        } else if label.eq_ignore_ascii_case("comercial") || label.eq_ignore_ascii_case("commercial") {
            LandUse::Commercial
        } else {
            LandUse::Other
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LandUse::Residential => "RESIDENTIAL",
            LandUse::Commercial => "COMMERCIAL",
            LandUse::Other => "OTHER",
        }
    }
}

impl fmt::Display for LandUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Zone ──────────────────────────────────────────────────────────────────────

/// One polygonal zone with its land use and population density.
///
/// Immutable once loaded.  `id` is the zone's position in its source file.
#[derive(Clone, Debug)]
pub struct Zone {
    pub id:        u32,
    /// Polygon zones are stored as single-member multipolygons.
    pub geometry:  MultiPolygon<f64>,
    pub land_use:  LandUse,
    /// People per zone; used as a relative sampling weight.
    pub density:   f64,
    pub tile_id:   Option<String>,
    pub sub_class: Option<String>,
}

impl Zone {
    pub fn new(id: u32, geometry: MultiPolygon<f64>, land_use: LandUse, density: f64) -> Self {
        Self { id, geometry, land_use, density, tile_id: None, sub_class: None }
    }

    #[inline]
    pub fn is_residential(&self) -> bool {
        self.land_use == LandUse::Residential
    }

    #[inline]
    pub fn is_commercial(&self) -> bool {
        self.land_use == LandUse::Commercial
    }

    /// Centroid of the whole geometry; `None` for an empty or degenerate
    /// shape.
    pub fn representative_point(&self) -> Option<GeoPoint> {
        self.geometry
            .centroid()
            .map(|p| GeoPoint::from_lon_lat(p.x(), p.y()))
    }
}

/// Sum of densities over residential zones.
pub fn residential_density(zones: &[Zone]) -> f64 {
    zones
        .iter()
        .filter(|z| z.is_residential())
        .map(|z| z.density)
        .sum()
}
