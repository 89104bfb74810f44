// location.rs
//! Device location requests.
//!
//! The host's location service sits behind [`LocationProvider`]. Failures
//! are classified into user-facing categories and kept on the tracker
//! until the next [`LocationTracker::retry`].

use std::time::Duration;

use log::{info, warn};
use thiserror::Error;

use crate::config;
use crate::geo::{self, GeoPoint};
use crate::mapper::MapContext;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationError {
    #[error("This device does not support location services.")]
    Unsupported,
    #[error("Location access was denied. Allow location access in your settings.")]
    PermissionDenied,
    #[error("Location information is unavailable.")]
    PositionUnavailable,
    #[error("The location request timed out.")]
    Timeout,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceLocation {
    pub point: GeoPoint,
    /// Meters, 95% confidence radius as reported by the device.
    pub accuracy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    pub maximum_age: Duration,
}

impl Default for LocationOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: config::LOCATION_TIMEOUT,
            maximum_age: config::LOCATION_MAX_AGE,
        }
    }
}

pub trait LocationProvider {
    fn current_position(&mut self, opts: &LocationOptions) -> Result<DeviceLocation, LocationError>;
}

/// Always answers with the same outcome.
#[derive(Debug, Clone)]
pub struct FixedLocation(pub Result<DeviceLocation, LocationError>);

impl FixedLocation {
    pub fn at(point: GeoPoint) -> Self {
        Self(Ok(DeviceLocation { point, accuracy: 0.0 }))
    }

    pub fn failing(err: LocationError) -> Self {
        Self(Err(err))
    }
}

impl LocationProvider for FixedLocation {
    fn current_position(&mut self, _opts: &LocationOptions) -> Result<DeviceLocation, LocationError> {
        self.0
    }
}

pub struct LocationTracker<P> {
    provider: P,
    opts: LocationOptions,
    pub location: Option<DeviceLocation>,
    pub error: Option<LocationError>,
    pub loading: bool,
}

impl<P: LocationProvider> LocationTracker<P> {
    pub fn new(provider: P) -> Self {
        Self { provider, opts: LocationOptions::default(), location: None, error: None, loading: false }
    }

    /// Queries the provider. A fix recenters `ctx` on the device.
    pub fn request(&mut self, ctx: &mut MapContext) -> Option<DeviceLocation> {
        self.loading = true;
        self.error = None;

        let outcome = self.provider.current_position(&self.opts);
        self.loading = false;
        match outcome {
            Ok(fix) => {
                info!("device location {:.5}, {:.5} (+/- {:.0}m)", fix.point.latitude, fix.point.longitude, fix.accuracy);
                if !geo::is_in_bounds(&fix.point) {
                    warn!("device location is outside the city bounds");
                }
                ctx.set_center(fix.point);
                self.location = Some(fix);
                Some(fix)
            }
            Err(e) => {
                warn!("location request failed: {e}");
                self.error = Some(e);
                None
            }
        }
    }

    pub fn retry(&mut self, ctx: &mut MapContext) -> Option<DeviceLocation> {
        self.request(ctx)
    }

    /// Message to show for the last failure, if any.
    pub fn message(&self) -> Option<String> {
        self.error.map(|e| e.to_string())
    }
}
