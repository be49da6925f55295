//! Geographic primitives: coordinates, bearings, and distances.
//!
//! All calculations use a spherical Earth approximation with the mean
//! radius from [`crate::constants::EARTH_RADIUS_M`]. Bearings are compass
//! degrees, 0 = north, increasing clockwise.

use std::fmt;
use std::str::FromStr;

use crate::constants::EARTH_RADIUS_M;
use crate::error::{NavError, Result};

/// Geographic point in floating-point degrees.
///
/// Construction validates the ranges; the math below assumes them.
///
/// # Example
/// ```
/// use waymark::geo::Coordinate;
///
/// let summit = Coordinate::new(46.8523, -121.7603).unwrap();
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// assert_eq!(summit, "46.8523, -121.7603".parse().unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting out-of-range degrees.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(NavError::InvalidLatitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(NavError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

impl FromStr for Coordinate {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| format!("expected \"lat,lon\", got: {}", s))?;
        let latitude: f64 = lat
            .trim()
            .parse()
            .map_err(|_| format!("invalid latitude: {}", lat.trim()))?;
        let longitude: f64 = lon
            .trim()
            .parse()
            .map_err(|_| format!("invalid longitude: {}", lon.trim()))?;
        Coordinate::new(latitude, longitude).map_err(|e| e.to_string())
    }
}

/// Normalize an angle in degrees into [0, 360).
pub fn normalize_degrees(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0)
}

/// Initial compass bearing in degrees [0, 360) along the great circle
/// from `from` to `to` (forward azimuth).
pub fn bearing(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let x = delta_lon.sin() * lat2.cos();
    let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();

    normalize_degrees(x.atan2(y).to_degrees())
}

/// Great-circle distance in meters between two points (haversine).
pub fn distance(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// Eight-point compass direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardinalDirection {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl CardinalDirection {
    /// Nearest compass point for an azimuth in degrees.
    /// Each point owns a 45 degree sector centered on its heading.
    pub fn from_degrees(degrees: f64) -> Self {
        use CardinalDirection::*;
        const POINTS: [CardinalDirection; 8] = [
            North, NorthEast, East, SouthEast, South, SouthWest, West, NorthWest,
        ];
        let sector = (normalize_degrees(degrees) + 22.5) / 45.0;
        POINTS[sector as usize % 8]
    }

    /// Display symbol, e.g. `"NE"`.
    pub fn symbol(&self) -> &'static str {
        match self {
            CardinalDirection::North => "N",
            CardinalDirection::NorthEast => "NE",
            CardinalDirection::East => "E",
            CardinalDirection::SouthEast => "SE",
            CardinalDirection::South => "S",
            CardinalDirection::SouthWest => "SW",
            CardinalDirection::West => "W",
            CardinalDirection::NorthWest => "NW",
        }
    }
}

impl fmt::Display for CardinalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
