use std::cell::Cell;
use std::rc::Rc;

use approx::assert_abs_diff_eq;

use waymark::constants::DEFAULT_ARRIVAL_RADIUS_M;
use waymark::geo::{self, CardinalDirection, Coordinate};
use waymark::indicator::{self, DialGeometry, IndicatorSize};
use waymark::navigator::{Beacon, Navigator};
use waymark::NavError;

fn coord(lat: f64, lon: f64) -> Coordinate {
    Coordinate::new(lat, lon).unwrap()
}

#[test]
fn test_walk_toward_a_beacon() {
    // Uetliberg summit, approached from the north along the ridge.
    let summit = Beacon::new("Uetliberg", coord(47.3497, 8.4915)).unwrap();

    let mut navigator = Navigator::new();
    let notifications = Rc::new(Cell::new(0));
    let count = Rc::clone(&notifications);
    navigator.subscribe(move || count.set(count.get() + 1));

    navigator.set_destination(summit);
    assert_eq!(notifications.get(), 1);
    assert_eq!(navigator.destination_name(), Some("Uetliberg"));

    let start = coord(47.3700, 8.4915);
    let bearing = navigator.bearing_to(start).unwrap();
    let distance = navigator.distance_to(start).unwrap();

    // Due south of the start, a little over 2 km.
    assert_abs_diff_eq!(bearing, 180.0, epsilon = 0.5);
    assert_eq!(CardinalDirection::from_degrees(bearing), CardinalDirection::South);
    assert!(
        (2000.0..2500.0).contains(&distance),
        "distance {} m outside expected ridge walk range",
        distance
    );
    assert!(!navigator.has_arrived(start, DEFAULT_ARRIVAL_RADIUS_M));

    // Closing in: a fix 20 m short of the summit.
    let near = coord(47.34988, 8.4915);
    assert!(navigator.distance_to(near).unwrap() < DEFAULT_ARRIVAL_RADIUS_M);
    assert!(navigator.has_arrived(near, DEFAULT_ARRIVAL_RADIUS_M));

    // The caller decides what arrival means; the navigator just reports.
    navigator.clear_destination();
    assert_eq!(notifications.get(), 2);
    assert!(!navigator.has_destination());
    assert!(matches!(
        navigator.bearing_to(near),
        Err(NavError::NoDestination)
    ));
}

#[test]
fn test_indicator_follows_the_computed_bearing() {
    let dest = Beacon::new("Trailhead", coord(0.0, 1.0)).unwrap();
    let mut navigator = Navigator::new();
    navigator.set_destination(dest);

    let here = coord(0.0, 0.0);
    let bearing = navigator.bearing_to(here).unwrap() as f32;

    let dial = DialGeometry {
        center_x: 540.0,
        center_y: 960.0,
        radius: 420.0,
    };
    let size = IndicatorSize::new(48.0, 48.0);

    // Facing north, a due-east target sits on the right edge of the dial.
    let placement = indicator::project(0.0, bearing, dial, size);
    assert_abs_diff_eq!(placement.x, 540.0 - 24.0 + 420.0, epsilon = 1e-2);
    assert_abs_diff_eq!(placement.y, 960.0 - 24.0, epsilon = 1e-2);
    assert_abs_diff_eq!(placement.rotation, 90.0, epsilon = 1e-3);

    // Turning to face the target puts the indicator at the top.
    let facing = indicator::project(bearing, bearing, dial, size);
    assert_abs_diff_eq!(facing.x, 540.0 - 24.0, epsilon = 1e-2);
    assert_abs_diff_eq!(facing.y, 960.0 - 24.0 - 420.0, epsilon = 1e-2);
    assert_abs_diff_eq!(facing.rotation, 0.0, epsilon = 1e-3);
}

#[test]
fn test_bearing_and_distance_over_a_long_leg() {
    // Zurich main station to Bern main station, roughly 95 km west-southwest.
    let zurich = coord(47.3779, 8.5403);
    let bern = coord(46.9490, 7.4393);

    let distance = geo::distance(zurich, bern);
    assert!(
        (90_000.0..100_000.0).contains(&distance),
        "Zurich-Bern distance {} m implausible",
        distance
    );

    let out = geo::bearing(zurich, bern);
    let back = geo::bearing(bern, zurich);
    assert!((230.0..250.0).contains(&out), "outbound bearing {}", out);
    assert!((50.0..70.0).contains(&back), "return bearing {}", back);
}
