// mapper.rs
//! Linear GPS <-> scene mapping.
//!
//! The city spans well under half a degree, so plain linear scaling is used
//! with no great-circle correction. All conversions go through a
//! [`MapContext`] value; copying it snapshots the reference center for a
//! batch of conversions.

use crate::config;
use crate::geo::{CityBounds, GeoPoint, LocalPoint, LocalRange};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapContext {
    pub center: GeoPoint,
    bounds: CityBounds,
    range: LocalRange,
}

impl Default for MapContext {
    fn default() -> Self {
        Self::new(config::CITY_CENTER)
    }
}

impl MapContext {
    pub fn new(center: GeoPoint) -> Self {
        Self { center, bounds: config::CITY_BOUNDS, range: config::LOCAL_RANGE }
    }

    pub fn set_center(&mut self, center: GeoPoint) {
        self.center = center;
    }

    pub fn with_center(&self, center: GeoPoint) -> Self {
        Self { center, ..*self }
    }

    /// Offsets from the current center, scaled into the local range.
    /// Increasing latitude maps to decreasing z. Not clamped.
    pub fn to_local(&self, point: &GeoPoint) -> LocalPoint {
        let lon_diff = point.longitude - self.center.longitude;
        let lat_diff = point.latitude - self.center.latitude;

        let x = (lon_diff / self.bounds.lon_span()) * self.range.width() + self.range.x_min;
        let z = -(lat_diff / self.bounds.lat_span()) * self.range.depth() + self.range.z_min;
        LocalPoint::new(x, z)
    }

    /// Inverse of [`to_local`](Self::to_local), offset from the fixed city
    /// center rather than `self.center`. Only an exact inverse while the
    /// context is centered on [`config::CITY_CENTER`].
    pub fn to_geo(&self, point: &LocalPoint) -> GeoPoint {
        let lon_diff = (point.x - self.range.x_min) / self.range.width() * self.bounds.lon_span();
        let lat_diff = -(point.z - self.range.z_min) / self.range.depth() * self.bounds.lat_span();

        GeoPoint::new(config::CITY_CENTER.latitude + lat_diff, config::CITY_CENTER.longitude + lon_diff)
    }

    pub fn to_local_batch(&self, points: &[GeoPoint]) -> Vec<LocalPoint> {
        points.iter().map(|p| self.to_local(p)).collect()
    }
}
