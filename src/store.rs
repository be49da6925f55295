//! Retention-bounded pressure history, persisted to a flat record file.
//!
//! The store keeps an ordered sequence of timestamped readings, hydrates
//! it lazily from disk on first access, evicts readings older than the
//! retention window on every `add`, and rewrites the whole backing file
//! atomically after each mutation. Reads never evict: a caller that only
//! ever calls [`PressureHistory::get_all`] can observe entries past their
//! nominal retention until the next `add`.
//!
//! The on-disk format is one record per line,
//! `epoch_millis,pressure,altitude`, no header. A missing file is an
//! empty store. Malformed lines are skipped with a warning; a single
//! corrupt record should not discard two days of weather history.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};

use crate::config::RetentionWindow;
use crate::error::Result;
use crate::observe::{SubscriberId, Subscribers};

/// One barometer sample: wall-clock time, station pressure in hPa, and
/// the altitude estimate in meters at the time of the sample.
///
/// Timestamps persist at millisecond resolution; sub-millisecond
/// precision does not survive a round trip through storage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureReading {
    pub time: DateTime<Utc>,
    pub pressure: f32,
    pub altitude: f64,
}

impl PressureReading {
    pub fn new(time: DateTime<Utc>, pressure: f32, altitude: f64) -> Self {
        Self {
            time,
            pressure,
            altitude,
        }
    }

    /// Reading stamped with the current wall-clock time.
    pub fn now(pressure: f32, altitude: f64) -> Self {
        Self::new(Utc::now(), pressure, altitude)
    }

    fn to_line(self) -> String {
        format!(
            "{},{},{}",
            self.time.timestamp_millis(),
            self.pressure,
            self.altitude
        )
    }

    fn parse_line(line: &str) -> Option<Self> {
        let mut fields = line.split(',');
        let millis: i64 = fields.next()?.trim().parse().ok()?;
        let pressure: f32 = fields.next()?.trim().parse().ok()?;
        let altitude: f64 = fields.next()?.trim().parse().ok()?;
        if fields.next().is_some() {
            return None;
        }
        let time = DateTime::from_timestamp_millis(millis)?;
        Some(Self::new(time, pressure, altitude))
    }
}

/// Persisted, time-windowed sequence of pressure readings.
///
/// Construct one instance per backing file and pass it to whoever needs
/// the history; the store is single-owner and not internally
/// synchronized, so concurrent access must be serialized by the caller.
///
/// # Example
/// ```no_run
/// use waymark::store::{PressureHistory, PressureReading};
///
/// let mut history = PressureHistory::new("pressure.csv");
/// history.add(PressureReading::now(1013.25, 440.0))?;
/// for reading in history.get_all()? {
///     println!("{} {} hPa", reading.time, reading.pressure);
/// }
/// # Ok::<(), waymark::NavError>(())
/// ```
pub struct PressureHistory {
    path: PathBuf,
    retention: Duration,
    readings: Vec<PressureReading>,
    loaded: bool,
    subscribers: Subscribers,
}

impl PressureHistory {
    /// Store backed by `path` with the default 48 hour retention.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_retention(path, RetentionWindow::default())
    }

    pub fn with_retention(path: impl Into<PathBuf>, retention: RetentionWindow) -> Self {
        Self {
            path: path.into(),
            retention: retention.as_duration(),
            readings: Vec::new(),
            loaded: false,
            subscribers: Subscribers::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn retention(&self) -> RetentionWindow {
        RetentionWindow::from_duration(self.retention)
    }

    /// All retained readings, oldest first.
    ///
    /// Loads the backing file on first access. The returned slice is a
    /// read-only view; it never triggers eviction, so entries past their
    /// retention stay visible until the next [`PressureHistory::add`].
    pub fn get_all(&mut self) -> Result<&[PressureReading]> {
        self.ensure_loaded()?;
        Ok(&self.readings)
    }

    /// Append a reading, evict everything older than the retention
    /// window, persist the surviving sequence, and notify subscribers.
    /// Returns the reading unchanged.
    pub fn add(&mut self, reading: PressureReading) -> Result<PressureReading> {
        self.ensure_loaded()?;
        self.readings.push(reading);
        self.evict_expired(Utc::now());
        self.persist()?;
        self.subscribers.notify();
        Ok(reading)
    }

    pub fn subscribe(&mut self, callback: impl FnMut() + 'static) -> SubscriberId {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    fn ensure_loaded(&mut self) -> Result<()> {
        if self.loaded {
            return Ok(());
        }

        self.readings = match fs::read_to_string(&self.path) {
            Ok(contents) => Self::parse_contents(&contents, &self.path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        self.loaded = true;
        log::debug!(
            "loaded {} readings from {}",
            self.readings.len(),
            self.path.display()
        );
        Ok(())
    }

    fn parse_contents(contents: &str, path: &Path) -> Vec<PressureReading> {
        let mut readings = Vec::new();
        for (index, line) in contents.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            match PressureReading::parse_line(line) {
                Some(reading) => readings.push(reading),
                None => log::warn!(
                    "skipping malformed record at {}:{}",
                    path.display(),
                    index + 1
                ),
            }
        }
        readings
    }

    fn evict_expired(&mut self, now: DateTime<Utc>) {
        let retention = self.retention;
        self.readings.retain(|reading| now - reading.time <= retention);
    }

    /// Whole-file replace: write a sibling temp file, then rename it over
    /// the target, so an interrupted write leaves the previous snapshot
    /// intact.
    fn persist(&self) -> Result<()> {
        let mut contents = String::new();
        for reading in &self.readings {
            contents.push_str(&reading.to_line());
            contents.push('\n');
        }

        let mut tmp_name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "history".into());
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        fs::write(&tmp_path, contents)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}
