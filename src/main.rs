use std::fs;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use log::info;
use serde::Serialize;

use sat_o_scope::catalog::fill_missing_classes;
use sat_o_scope::config::Config;
use sat_o_scope::orbit::STATIONARY_THRESHOLD_DEG;
use sat_o_scope::{
    sample_for_display, sample_traceable, CriteriaUpdate, GroundTrackComputer, OrbitClass,
    OrbitTraceComputer, OrbitTrackCache, SatelliteRecord, Sgp4Propagator,
};

#[derive(Parser)]
#[command(name = "sat-o-scope")]
#[command(about = "Satellite catalog filtering and orbit geometry")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count records matching a filter
    Count {
        records: String,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Pick a representative subset for display
    Sample {
        records: String,
        #[arg(long)]
        limit: Option<usize>,
        /// Only sample records that have an element set
        #[arg(long)]
        traceable: bool,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Print the ground track of one record as JSON
    Track { records: String, id: String },
    /// Print the inertial orbit trace of one record as JSON
    Trace {
        records: String,
        id: String,
        #[arg(long)]
        points: Option<usize>,
    },
}

#[derive(Args)]
struct FilterArgs {
    #[arg(long = "orbit-class")]
    orbit_classes: Vec<OrbitClass>,
    #[arg(long = "owner")]
    owners: Vec<String>,
    #[arg(long = "user")]
    users: Vec<String>,
    #[arg(long = "purpose")]
    purposes: Vec<String>,
    #[arg(long)]
    from: Option<NaiveDate>,
    #[arg(long)]
    to: Option<NaiveDate>,
    /// Include inactive records
    #[arg(long)]
    all: bool,
}

impl FilterArgs {
    fn to_update(&self) -> CriteriaUpdate {
        let mut update = CriteriaUpdate::new()
            .orbit_classes(self.orbit_classes.iter().copied())
            .owners(self.owners.iter().cloned())
            .user_types(self.users.iter().cloned())
            .purposes(self.purposes.iter().cloned())
            .min_launch(self.from)
            .max_launch(self.to);
        if self.all {
            update = update.active(None);
        }
        update
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match Config::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Config error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    match cli.command {
        Commands::Count { records, filter } => count(&config, &records, &filter),
        Commands::Sample {
            records,
            limit,
            traceable,
            filter,
        } => sample(&config, &records, limit, traceable, &filter),
        Commands::Track { records, id } => track(&config, &records, &id),
        Commands::Trace {
            records,
            id,
            points,
        } => trace(&config, &records, &id, points),
    }
}

fn load_records(path: &str) -> Result<Vec<SatelliteRecord>, ExitCode> {
    let json = fs::read_to_string(path).map_err(|e| {
        eprintln!("Error reading file: {}", e);
        ExitCode::FAILURE
    })?;
    let mut records: Vec<SatelliteRecord> = serde_json::from_str(&json).map_err(|e| {
        eprintln!("Parse error: {}", e);
        ExitCode::FAILURE
    })?;
    let derived = fill_missing_classes(&mut records);
    info!(
        "Loaded {} records from {}, {} classified from orbit parameters",
        records.len(),
        path,
        derived
    );
    Ok(records)
}

fn find<'a>(records: &'a [SatelliteRecord], id: &str) -> Result<&'a SatelliteRecord, ExitCode> {
    records.iter().find(|r| r.id == id).ok_or_else(|| {
        eprintln!("No record with id {}", id);
        ExitCode::FAILURE
    })
}

fn count(config: &Config, path: &str, filter: &FilterArgs) -> ExitCode {
    let records = match load_records(path) {
        Ok(r) => r,
        Err(code) => return code,
    };

    let engine = config.filter_engine().update(filter.to_update());
    println!(
        "{} of {} records match",
        engine.filter(&records).len(),
        records.len()
    );
    for (class, n) in engine.orbit_class_counts(&records) {
        let label = class.map(|c| c.to_string()).unwrap_or_else(|| "All".into());
        println!("  {:<10} {}", label, n);
    }
    ExitCode::SUCCESS
}

fn sample(
    config: &Config,
    path: &str,
    limit: Option<usize>,
    traceable: bool,
    filter: &FilterArgs,
) -> ExitCode {
    let records = match load_records(path) {
        Ok(r) => r,
        Err(code) => return code,
    };

    let engine = config.filter_engine().update(filter.to_update());
    let filtered: Vec<SatelliteRecord> = engine.filter(&records).into_iter().cloned().collect();
    let limit = limit.unwrap_or(config.display.limit);
    let picked = if traceable {
        sample_traceable(&filtered, limit)
    } else {
        sample_for_display(&filtered, limit)
    };

    for r in picked {
        let class = r.orbit_class.map(|c| c.to_string()).unwrap_or_default();
        println!("{:<12} {:<10} {}", r.id, class, r.name);
    }
    ExitCode::SUCCESS
}

fn track(config: &Config, path: &str, id: &str) -> ExitCode {
    let records = match load_records(path) {
        Ok(r) => r,
        Err(code) => return code,
    };
    let record = match find(&records, id) {
        Ok(r) => r,
        Err(code) => return code,
    };

    let propagator = Sgp4Propagator::new();
    let cache = OrbitTrackCache::new();
    let computer =
        GroundTrackComputer::new(&propagator, &cache).with_options(config.ground_track_options());

    let track = computer.compute_ground_track(record);
    if track.is_empty() {
        info!("Nothing to draw for {}", id);
    }
    if let Some(center) = track.stationary_center(STATIONARY_THRESHOLD_DEG) {
        info!(
            "{} is stationary near {:.2}, {:.2}",
            id, center.longitude_deg, center.latitude_deg
        );
    }
    print_json(&*track)
}

fn trace(config: &Config, path: &str, id: &str, points: Option<usize>) -> ExitCode {
    let records = match load_records(path) {
        Ok(r) => r,
        Err(code) => return code,
    };
    let record = match find(&records, id) {
        Ok(r) => r,
        Err(code) => return code,
    };

    let propagator = Sgp4Propagator::new();
    let cache = OrbitTrackCache::new();
    let computer = OrbitTraceComputer::new(&propagator, &cache);

    let trace = computer.compute_orbit_trace(record, points.unwrap_or(config.orbit_trace.points));
    if trace.is_empty() {
        info!("Nothing to draw for {}", id);
    }
    print_json(&*trace)
}

fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Serialization error: {}", e);
            ExitCode::FAILURE
        }
    }
}
