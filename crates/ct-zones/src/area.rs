//! Area of interest for network acquisition.

use geo::{BoundingRect, Coord, Polygon, Rect};

use crate::zone::Zone;
use crate::{ZoneError, ZoneResult};

/// Buffer added on every side of the zones' bounding box, in degrees.
///
/// Half of 0.01°, roughly 550 m of latitude, so border zones still snap to
/// roads that run just outside the zoning layer.
pub const AREA_BUFFER_DEG: f64 = 0.005;

/// Bounding box of every zone, grown by `buffer_deg` on all sides.
pub fn zones_bounds(zones: &[Zone], buffer_deg: f64) -> ZoneResult<Rect<f64>> {
    let rect = zones
        .iter()
        .filter_map(|z| z.geometry.bounding_rect())
        .reduce(|a, b| {
            Rect::new(
                Coord { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
                Coord { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
            )
        })
        .ok_or(ZoneError::NoZones)?;

    Ok(Rect::new(
        Coord { x: rect.min().x - buffer_deg, y: rect.min().y - buffer_deg },
        Coord { x: rect.max().x + buffer_deg, y: rect.max().y + buffer_deg },
    ))
}

/// Polygon the road network is built for: [`zones_bounds`] with the default
/// [`AREA_BUFFER_DEG`].
pub fn area_of_interest(zones: &[Zone]) -> ZoneResult<Polygon<f64>> {
    Ok(zones_bounds(zones, AREA_BUFFER_DEG)?.to_polygon())
}
