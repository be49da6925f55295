use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavError {
    #[error("no destination is set")]
    NoDestination,

    #[error("beacon name must not be empty")]
    EmptyBeaconName,

    #[error("latitude {0} out of range [-90, 90]")]
    InvalidLatitude(f64),

    #[error("longitude {0} out of range [-180, 180]")]
    InvalidLongitude(f64),

    #[error("history storage error: {0}")]
    Storage(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NavError>;
