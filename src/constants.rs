//! Numeric constants shared across the navigation core.

/// Mean Earth radius in meters for the spherical approximation.
/// Used by both the haversine distance and the forward azimuth.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Default arrival radius in meters.
/// A fix within this distance of the destination counts as arrived unless
/// the caller supplies its own threshold.
pub const DEFAULT_ARRIVAL_RADIUS_M: f64 = 50.0;

/// Default pressure history retention window in hours.
/// Readings older than this are evicted on the next mutation.
pub const DEFAULT_RETENTION_HOURS: i64 = 48;
