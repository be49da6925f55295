//! Configuration for the navigation core.
//!
//! The structs here carry the tunables the library does not hardcode:
//! the arrival radius handed to [`crate::navigator::Navigator::has_arrived`]
//! and the pressure history's backing file and retention window.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::Duration;

use crate::constants::{DEFAULT_ARRIVAL_RADIUS_M, DEFAULT_RETENTION_HOURS};

/// Retention window specification
///
/// Can be given as hours, minutes, or seconds. Bare numbers are hours.
///
/// # Parsing formats
/// - `48` or `48h` - hours
/// - `90m` - minutes
/// - `30s` - seconds
///
/// # Example
/// ```
/// use waymark::config::RetentionWindow;
///
/// let window: RetentionWindow = "90m".parse().unwrap();
/// assert_eq!(window.as_duration().num_minutes(), 90);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionWindow(Duration);

impl RetentionWindow {
    pub fn from_hours(hours: i64) -> Self {
        Self(Duration::hours(hours))
    }

    pub fn from_duration(duration: Duration) -> Self {
        Self(duration)
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }
}

impl Default for RetentionWindow {
    fn default() -> Self {
        Self::from_hours(DEFAULT_RETENTION_HOURS)
    }
}

impl fmt::Display for RetentionWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.0.num_minutes();
        if minutes % 60 == 0 {
            write!(f, "{}h", minutes / 60)
        } else {
            write!(f, "{}m", minutes)
        }
    }
}

impl FromStr for RetentionWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        let (number, unit) = match s.char_indices().last() {
            Some((idx, c)) if c.is_ascii_alphabetic() => (&s[..idx], &s[idx..]),
            _ => (s, "h"),
        };

        let value: i64 = number
            .trim()
            .parse()
            .map_err(|_| format!("invalid retention window: {}", s))?;
        if value <= 0 {
            return Err("retention window must be positive".to_string());
        }

        match unit {
            "h" | "H" => Ok(Self(Duration::hours(value))),
            "m" | "M" => Ok(Self(Duration::minutes(value))),
            "s" | "S" => Ok(Self(Duration::seconds(value))),
            _ => Err(format!("unknown retention unit: {}", unit)),
        }
    }
}

/// Navigation tunables
#[derive(Debug, Clone)]
pub struct NavConfig {
    /// Distance in meters below which the user counts as arrived
    pub arrival_radius_m: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            arrival_radius_m: DEFAULT_ARRIVAL_RADIUS_M,
        }
    }
}

/// Pressure history tunables
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Backing file for the persisted readings
    pub file: PathBuf,
    /// How long readings are retained
    pub retention: RetentionWindow,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("pressure.csv"),
            retention: RetentionWindow::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retention_window_bare_number_is_hours() {
        let window: RetentionWindow = "48".parse().unwrap();
        assert_eq!(window.as_duration(), Duration::hours(48));
    }

    #[test]
    fn test_retention_window_units() {
        let hours: RetentionWindow = "12h".parse().unwrap();
        assert_eq!(hours.as_duration(), Duration::hours(12));

        let minutes: RetentionWindow = "90m".parse().unwrap();
        assert_eq!(minutes.as_duration(), Duration::minutes(90));

        let seconds: RetentionWindow = "30s".parse().unwrap();
        assert_eq!(seconds.as_duration(), Duration::seconds(30));
    }

    #[test]
    fn test_retention_window_invalid() {
        assert!("abc".parse::<RetentionWindow>().is_err());
        assert!("-4h".parse::<RetentionWindow>().is_err());
        assert!("0h".parse::<RetentionWindow>().is_err());
        assert!("10d".parse::<RetentionWindow>().is_err());
    }

    #[test]
    fn test_retention_window_display() {
        assert_eq!(RetentionWindow::default().to_string(), "48h");
        let window: RetentionWindow = "90m".parse().unwrap();
        assert_eq!(window.to_string(), "90m");
    }

    #[test]
    fn test_defaults() {
        let nav = NavConfig::default();
        assert_eq!(nav.arrival_radius_m, DEFAULT_ARRIVAL_RADIUS_M);

        let history = HistoryConfig::default();
        assert_eq!(history.file, PathBuf::from("pressure.csv"));
        assert_eq!(history.retention, RetentionWindow::default());
    }
}
