// config.rs
use std::time::Duration;

use crate::geo::{CityBounds, GeoPoint, LocalRange};

pub const APP_NAME: &str = "Chungju Map";

// --- Geography ---
// Chungju City Hall
pub const CITY_CENTER: GeoPoint = GeoPoint { latitude: 36.9912, longitude: 127.9260 };

// Rough city limits. Also the GPS -> local scaling domain.
pub const CITY_BOUNDS: CityBounds = CityBounds {
    north: 37.1,
    south: 36.8,
    east: 128.1,
    west: 127.7,
};

// Local coordinate codomain used by the scene
pub const LOCAL_RANGE: LocalRange = LocalRange {
    x_min: -10.0,
    x_max: 10.0,
    z_min: -10.0,
    z_max: 10.0,
};

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

// --- Buildings ---
pub const MAX_BUILDINGS: usize = 100;
pub const METERS_PER_LEVEL: f64 = 3.0;
pub const DEFAULT_BUILDING_HEIGHT: f64 = 2.0;
pub const BUILDING_FOOTPRINT: f32 = 0.8;

// --- Network ---
pub const API_BASE_URL: &str = "http://backend:8080/api";
pub const OVERPASS_API_URL: &str = "https://overpass-api.de/api/interpreter";
pub const OVERPASS_TIMEOUT_SECS: u32 = 15;
// Staggers the building fetch behind the shop list.
pub const BUILDING_FETCH_DELAY: Duration = Duration::from_millis(2000);

// --- Device location ---
pub const LOCATION_TIMEOUT: Duration = Duration::from_secs(10);
pub const LOCATION_MAX_AGE: Duration = Duration::from_secs(60);

// --- Player ---
pub const MOVE_STEP: f64 = 0.5;

// --- Scene ---
pub const GROUND_SIZE: f32 = 20.0;
pub const GROUND_THICKNESS: f32 = 0.1;
pub const GROUND_Y: f32 = -0.5;
pub const SHOP_MARKER_SIZE: f32 = 1.0;
pub const MARKER_SIZE: f32 = 0.6;
pub const HOVER_COLOR: &str = "#3b82f6";
pub const SELECTED_COLOR: &str = "#10b981";
pub const SHOP_COLOR: &str = "#f59e0b";
pub const PLAYER_COLOR: &str = "#ef4444";
pub const GROUND_COLOR: &str = "#e5e7eb";

/// Base addresses of the two remote services. Values can be overridden
/// through environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    pub api_base: String,
    pub overpass: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        let api_base = std::env::var("CHUNGJU_API_URL").unwrap_or_else(|_| API_BASE_URL.to_string());
        let overpass = std::env::var("CHUNGJU_OVERPASS_URL").unwrap_or_else(|_| OVERPASS_API_URL.to_string());
        Self { api_base, overpass }
    }
}
