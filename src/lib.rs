pub mod config;
pub mod constants;
pub mod error;
pub mod geo;
pub mod indicator;
pub mod navigator;
pub mod observe;
pub mod store;

pub use config::{HistoryConfig, NavConfig, RetentionWindow};
pub use error::{NavError, Result};
pub use geo::Coordinate;
pub use navigator::{Beacon, Navigator};
pub use store::{PressureHistory, PressureReading};
