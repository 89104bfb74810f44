// geo.rs
use serde::{Deserialize, Serialize};

use crate::config;

/// WGS84 latitude/longitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        distance_meters(self, other)
    }
}

/// Scene-space position on the ground plane. Unit-less.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LocalPoint {
    pub x: f64,
    pub z: f64,
}

impl LocalPoint {
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CityBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl CityBounds {
    pub fn lat_span(&self) -> f64 {
        self.north - self.south
    }

    pub fn lon_span(&self) -> f64 {
        self.east - self.west
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, p: &GeoPoint) -> bool {
        p.latitude >= self.south
            && p.latitude <= self.north
            && p.longitude >= self.west
            && p.longitude <= self.east
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalRange {
    pub x_min: f64,
    pub x_max: f64,
    pub z_min: f64,
    pub z_max: f64,
}

impl LocalRange {
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn depth(&self) -> f64 {
        self.z_max - self.z_min
    }
}

/// Great-circle distance in meters (haversine).
pub fn distance_meters(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let d_phi = (b.latitude - a.latitude).to_radians();
    let d_lambda = (b.longitude - a.longitude).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    config::EARTH_RADIUS_M * c
}

/// `"999m"` below a kilometer, `"2.5km"` from there on.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{}m", meters.round() as i64)
    } else {
        format!("{:.1}km", meters / 1000.0)
    }
}

pub fn is_in_bounds(point: &GeoPoint) -> bool {
    config::CITY_BOUNDS.contains(point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const SEOUL: GeoPoint = GeoPoint::new(37.5665, 126.9780);

    #[test]
    fn distance_is_symmetric() {
        let a = config::CITY_CENTER;
        let b = GeoPoint::new(36.9700, 127.9500);
        assert_eq!(distance_meters(&a, &b), distance_meters(&b, &a));
        assert_eq!(distance_meters(&SEOUL, &a), distance_meters(&a, &SEOUL));
    }

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(distance_meters(&SEOUL, &SEOUL), 0.0);
        assert_eq!(config::CITY_CENTER.distance_to(&config::CITY_CENTER), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = GeoPoint::new(36.0, 127.0);
        let b = GeoPoint::new(37.0, 127.0);
        // R * pi / 180
        assert_abs_diff_eq!(distance_meters(&a, &b), 111_194.93, epsilon = 0.01);
    }

    #[test]
    fn chungju_to_seoul() {
        let d = distance_meters(&config::CITY_CENTER, &SEOUL);
        assert!(d > 95_000.0 && d < 110_000.0, "unexpected distance {d}");
    }

    #[test]
    fn format_switches_units_at_one_kilometer() {
        assert_eq!(format_distance(999.0), "999m");
        assert_eq!(format_distance(1000.0), "1.0km");
        assert_eq!(format_distance(2500.0), "2.5km");
        assert_eq!(format_distance(0.0), "0m");
        assert_eq!(format_distance(12.6), "13m");
    }

    #[test]
    fn bounds_check() {
        assert!(is_in_bounds(&config::CITY_CENTER));
        let b = config::CITY_BOUNDS;
        assert!(!is_in_bounds(&GeoPoint::new(b.north + 5.0, 127.9)));
        assert!(!is_in_bounds(&GeoPoint::new(b.south - 5.0, 127.9)));
        assert!(!is_in_bounds(&GeoPoint::new(36.9, b.east + 5.0)));
        assert!(!is_in_bounds(&GeoPoint::new(36.9, b.west - 5.0)));
    }

    #[test]
    fn bounds_edges_are_inclusive() {
        let b = config::CITY_BOUNDS;
        assert!(is_in_bounds(&GeoPoint::new(b.north, b.east)));
        assert!(is_in_bounds(&GeoPoint::new(b.south, b.west)));
        assert!(!is_in_bounds(&GeoPoint::new(b.north + 1e-9, b.east)));
    }
}
