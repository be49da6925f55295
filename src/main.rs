use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use waymark::config::{HistoryConfig, NavConfig, RetentionWindow};
use waymark::geo::{self, CardinalDirection, Coordinate};
use waymark::navigator::{Beacon, Navigator};
use waymark::store::{PressureHistory, PressureReading};

#[derive(Parser, Debug)]
#[command(name = "waymark")]
#[command(about = "Outdoor navigation toolkit: bearings, beacons, pressure history", long_about = None)]
struct Args {
    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the bearing and distance between two coordinates
    Bearing {
        /// Starting point as "lat,lon"
        from: Coordinate,
        /// Destination as "lat,lon"
        to: Coordinate,
    },

    /// Navigate from a position toward a named beacon
    Navigate {
        /// Current position as "lat,lon"
        #[arg(short = 'p', long)]
        position: Coordinate,

        /// TOML file listing the known beacons
        #[arg(short = 'b', long, default_value = "beacons.toml")]
        beacons: PathBuf,

        /// Name of the destination beacon
        #[arg(short = 'd', long)]
        dest: String,

        /// Arrival radius in meters
        #[arg(long)]
        arrival_radius: Option<f64>,
    },

    /// Record or inspect the pressure history
    #[command(subcommand)]
    Pressure(PressureCommand),
}

#[derive(Subcommand, Debug)]
enum PressureCommand {
    /// Append a reading stamped with the current time
    Add {
        /// Backing file for the history
        #[arg(short = 'f', long)]
        file: Option<PathBuf>,

        /// Station pressure in hPa
        #[arg(short = 'p', long)]
        pressure: f32,

        /// Altitude estimate in meters
        #[arg(short = 'a', long, default_value = "0")]
        altitude: f64,

        /// Retention window (e.g. "48h", "90m")
        #[arg(short = 'r', long)]
        retention: Option<RetentionWindow>,
    },

    /// Print the retained readings
    History {
        /// Backing file for the history
        #[arg(short = 'f', long)]
        file: Option<PathBuf>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Deserialize)]
struct BeaconFile {
    #[serde(default)]
    beacons: Vec<BeaconEntry>,
}

#[derive(Debug, Deserialize)]
struct BeaconEntry {
    name: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Serialize)]
struct HistoryRecord {
    timestamp_ms: i64,
    time: String,
    pressure: f32,
    altitude: f64,
}

impl HistoryRecord {
    fn from_reading(reading: &PressureReading) -> Self {
        Self {
            timestamp_ms: reading.time.timestamp_millis(),
            time: reading
                .time
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string(),
            pressure: reading.pressure,
            altitude: reading.altitude,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match args.command {
        Command::Bearing { from, to } => print_bearing(from, to),
        Command::Navigate {
            position,
            beacons,
            dest,
            arrival_radius,
        } => navigate(position, &beacons, &dest, arrival_radius)?,
        Command::Pressure(cmd) => run_pressure(cmd)?,
    }

    Ok(())
}

fn print_bearing(from: Coordinate, to: Coordinate) {
    let bearing = geo::bearing(from, to);
    let distance = geo::distance(from, to);

    println!(
        "Bearing:  {:.1}\u{00b0} {}",
        bearing,
        CardinalDirection::from_degrees(bearing)
    );
    println!("Distance: {:.0} m", distance);
}

fn navigate(
    position: Coordinate,
    beacon_file: &Path,
    dest: &str,
    arrival_radius: Option<f64>,
) -> anyhow::Result<()> {
    let beacons = load_beacons(beacon_file)?;
    let beacon = beacons
        .into_iter()
        .find(|b| b.name() == dest)
        .with_context(|| format!("no beacon named {:?} in {}", dest, beacon_file.display()))?;

    let radius = arrival_radius.unwrap_or(NavConfig::default().arrival_radius_m);

    let mut navigator = Navigator::new();
    navigator.set_destination(beacon);

    let bearing = navigator.bearing_to(position)?;
    let distance = navigator.distance_to(position)?;

    println!(
        "{}:  {:.1}\u{00b0} {}  -  {:.0} m",
        navigator.destination_name().unwrap_or_default(),
        bearing,
        CardinalDirection::from_degrees(bearing),
        distance
    );

    if navigator.has_arrived(position, radius) {
        println!("Arrived (within {:.0} m)", radius);
    }

    Ok(())
}

fn load_beacons(path: &Path) -> anyhow::Result<Vec<Beacon>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let file: BeaconFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    file.beacons
        .into_iter()
        .map(|entry| {
            let location = Coordinate::new(entry.latitude, entry.longitude)
                .with_context(|| format!("beacon {:?} has an invalid location", entry.name))?;
            Beacon::new(entry.name, location).context("invalid beacon")
        })
        .collect()
}

fn run_pressure(cmd: PressureCommand) -> anyhow::Result<()> {
    match cmd {
        PressureCommand::Add {
            file,
            pressure,
            altitude,
            retention,
        } => {
            let mut history = open_history(file, retention);
            let reading = history.add(PressureReading::now(pressure, altitude))?;

            log::info!(
                "recorded {} hPa at {} m",
                reading.pressure,
                reading.altitude
            );
            println!("{} readings retained", history.get_all()?.len());
        }
        PressureCommand::History { file, json } => {
            let mut history = open_history(file, None);
            let records: Vec<HistoryRecord> = history
                .get_all()?
                .iter()
                .map(HistoryRecord::from_reading)
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                for record in &records {
                    println!(
                        "{}  {:>8.2} hPa  {:>8.1} m",
                        record.time, record.pressure, record.altitude
                    );
                }
            }
        }
    }
    Ok(())
}

fn open_history(file: Option<PathBuf>, retention: Option<RetentionWindow>) -> PressureHistory {
    let defaults = HistoryConfig::default();
    let path = file.unwrap_or(defaults.file);
    let retention = retention.unwrap_or(defaults.retention);
    PressureHistory::with_retention(path, retention)
}
