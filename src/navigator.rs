//! Destination tracking: beacons and the queries against them.

use crate::error::{NavError, Result};
use crate::geo::{self, Coordinate};
use crate::observe::{SubscriberId, Subscribers};

/// A named destination point.
///
/// Identity is structural: two beacons with the same name and location
/// compare equal.
#[derive(Debug, Clone, PartialEq)]
pub struct Beacon {
    name: String,
    location: Coordinate,
}

impl Beacon {
    /// Create a beacon. The name must contain at least one
    /// non-whitespace character.
    pub fn new(name: impl Into<String>, location: Coordinate) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(NavError::EmptyBeaconName);
        }
        Ok(Self { name, location })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> Coordinate {
        self.location
    }
}

/// Holds the (at most one) active destination and answers bearing,
/// distance, and arrival queries against caller-supplied fixes.
///
/// The navigator never reads sensors itself; the caller feeds it the
/// current location on demand. Subscribers are told whenever the
/// destination changes and re-read state themselves.
///
/// # Example
/// ```
/// use waymark::geo::Coordinate;
/// use waymark::navigator::{Beacon, Navigator};
///
/// let mut navigator = Navigator::new();
/// let camp = Beacon::new("Camp", Coordinate::new(0.0, 0.0).unwrap()).unwrap();
/// navigator.set_destination(camp);
///
/// let here = Coordinate::new(-1.0, 0.0).unwrap();
/// assert_eq!(navigator.bearing_to(here).unwrap(), 0.0);
/// ```
#[derive(Default)]
pub struct Navigator {
    destination: Option<Beacon>,
    subscribers: Subscribers,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the active destination. Notifies subscribers exactly once,
    /// even if the new beacon equals the current one.
    pub fn set_destination(&mut self, beacon: Beacon) {
        log::debug!("destination set: {}", beacon.name());
        self.destination = Some(beacon);
        self.subscribers.notify();
    }

    /// Drop the active destination. Notifies subscribers exactly once,
    /// even if there was none.
    pub fn clear_destination(&mut self) {
        log::debug!("destination cleared");
        self.destination = None;
        self.subscribers.notify();
    }

    pub fn has_destination(&self) -> bool {
        self.destination.is_some()
    }

    pub fn destination(&self) -> Option<&Beacon> {
        self.destination.as_ref()
    }

    /// Name of the active beacon, if any.
    pub fn destination_name(&self) -> Option<&str> {
        self.destination.as_ref().map(|b| b.name())
    }

    /// Compass bearing from `current` to the destination.
    ///
    /// Callers are expected to guard with [`Navigator::has_destination`];
    /// asking with no destination is a precondition violation surfaced as
    /// [`NavError::NoDestination`].
    pub fn bearing_to(&self, current: Coordinate) -> Result<f64> {
        let beacon = self.destination.as_ref().ok_or(NavError::NoDestination)?;
        Ok(geo::bearing(current, beacon.location()))
    }

    /// Great-circle distance in meters from `current` to the destination.
    /// Same precondition as [`Navigator::bearing_to`].
    pub fn distance_to(&self, current: Coordinate) -> Result<f64> {
        let beacon = self.destination.as_ref().ok_or(NavError::NoDestination)?;
        Ok(geo::distance(current, beacon.location()))
    }

    /// Whether `current` is within `radius_m` meters of the destination.
    /// Always false with no destination. Arrival is a pure predicate:
    /// clearing the destination on arrival is the caller's decision.
    pub fn has_arrived(&self, current: Coordinate, radius_m: f64) -> bool {
        match self.distance_to(current) {
            Ok(distance) => distance <= radius_m,
            Err(_) => false,
        }
    }

    pub fn subscribe(&mut self, callback: impl FnMut() + 'static) -> SubscriberId {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.subscribers.unsubscribe(id)
    }
}
