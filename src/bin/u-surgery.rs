//! Surgery scheduling CLI.
//!
//! Reads the room list, timetable and arguments, anneals, prints an
//! initial-versus-best comparison and writes the reassigned timetable.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use u_surgery::data::{DataSource, TimetableSource};
use u_surgery::sa::AnnealConfig;
use u_surgery::schedule::ScheduleMetrics;
use u_surgery::{ScheduleOutcome, Scheduler};

#[derive(Parser)]
#[command(name = "u-surgery")]
#[command(about = "Assign surgery requests to operating rooms by simulated annealing")]
struct Cli {
    /// Room file (`# roomNamesOfAll` / `# roomNames4Orth` sections)
    #[arg(long, default_value = "in/room.csv")]
    rooms: PathBuf,

    /// Infer rooms from the timetable instead of reading a room file
    #[arg(long, conflicts_with = "rooms")]
    infer_rooms: bool,

    /// Timetable CSV
    #[arg(long, default_value = "in/TimeTable.csv")]
    timetable: PathBuf,

    /// Numeric arguments file (start, regular, overtime, transition)
    #[arg(long, default_value = "in/Arguments4Exec.csv")]
    arguments: PathBuf,

    /// Output base name; a timestamp is inserted before the extension
    #[arg(short, long, default_value = "out/OutTimeTable.csv")]
    output: PathBuf,

    /// Random seed
    #[arg(long, env = "U_SURGERY_SEED")]
    seed: Option<u64>,

    /// Independent restarts, best one kept (requires the `parallel` feature)
    #[arg(long, default_value = "1")]
    restarts: usize,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

impl Cli {
    fn rooms_path(&self) -> Option<&Path> {
        (!self.infer_rooms).then_some(self.rooms.as_path())
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut source = TimetableSource::load(cli.rooms_path(), &cli.timetable, Some(&cli.arguments))
        .with_context(|| format!("loading {}", cli.timetable.display()))?;

    let mut config = AnnealConfig::default();
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let scheduler =
        Scheduler::from_source(&source, config).context("invalid scheduling input")?;
    let Some(outcome) = schedule(&scheduler, cli.restarts)? else {
        info!("no surgery requests to schedule");
        return Ok(());
    };

    print_comparison(&outcome);

    source.apply_final_assignment(outcome.best());
    let path = source
        .write_output(&cli.output)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    println!("output: {}", path.display());
    Ok(())
}

#[cfg(feature = "parallel")]
fn schedule(scheduler: &Scheduler, restarts: usize) -> Result<Option<ScheduleOutcome>> {
    if restarts > 1 {
        return Ok(scheduler.schedule_restarts(restarts)?);
    }
    Ok(scheduler.schedule()?)
}

#[cfg(not(feature = "parallel"))]
fn schedule(scheduler: &Scheduler, restarts: usize) -> Result<Option<ScheduleOutcome>> {
    if restarts > 1 {
        anyhow::bail!("--restarts requires the `parallel` feature");
    }
    Ok(scheduler.schedule()?)
}

fn print_comparison(outcome: &ScheduleOutcome) {
    let r = &outcome.result;
    println!(
        "seed {}  T0 {:.2}  steps {}  iterations {}  accepted {}  improving {}",
        r.seed,
        r.initial_temperature,
        r.temperature_steps,
        r.iterations,
        r.accepted_moves,
        r.improving_moves
    );
    println!();
    println!("{:<28} {:>12} {:>12}", "", "initial", "best");
    let rows: [(&str, fn(&ScheduleMetrics) -> String); 7] = [
        ("cost", |m: &ScheduleMetrics| format!("{:.2}", m.cost)),
        ("surgery minutes", |m: &ScheduleMetrics| m.total_surgery_minutes.to_string()),
        ("transition minutes", |m: &ScheduleMetrics| m.total_transition_minutes.to_string()),
        ("usage minutes", |m: &ScheduleMetrics| m.total_usage_minutes.to_string()),
        ("regular overtime minutes", |m: &ScheduleMetrics| {
            m.total_regular_overtime_minutes.to_string()
        }),
        ("overtime minutes", |m: &ScheduleMetrics| m.total_overtime_minutes.to_string()),
        ("special rooms respected", |m: &ScheduleMetrics| {
            m.special_requirement_met.to_string()
        }),
    ];
    for (label, value) in rows {
        println!(
            "{:<28} {:>12} {:>12}",
            label,
            value(&outcome.initial_metrics),
            value(&outcome.best_metrics)
        );
    }

    println!();
    println!(
        "{:<10} {:>18} {:>18} {:>18}",
        "room", "usage", "regular overtime", "overtime"
    );
    for (room, best) in &outcome.best_metrics.rooms {
        let initial = outcome.initial_metrics.rooms.get(room).copied().unwrap_or_default();
        println!(
            "{:<10} {:>8} -> {:>6} {:>8} -> {:>6} {:>8} -> {:>6}",
            room,
            initial.usage_minutes,
            best.usage_minutes,
            initial.regular_overtime_minutes,
            best.regular_overtime_minutes,
            initial.overtime_minutes,
            best.overtime_minutes
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_file_read_by_default() {
        let cli = Cli::try_parse_from(["u-surgery"]).unwrap();
        assert_eq!(cli.rooms_path(), Some(Path::new("in/room.csv")));
    }

    #[test]
    fn test_explicit_room_file_kept() {
        let cli = Cli::try_parse_from(["u-surgery", "--rooms", "in/roomz.csv"]).unwrap();
        assert_eq!(cli.rooms_path(), Some(Path::new("in/roomz.csv")));
    }

    #[test]
    fn test_infer_rooms_skips_room_file() {
        let cli = Cli::try_parse_from(["u-surgery", "--infer-rooms"]).unwrap();
        assert_eq!(cli.rooms_path(), None);
    }

    #[test]
    fn test_infer_rooms_conflicts_with_room_file() {
        assert!(Cli::try_parse_from(["u-surgery", "--infer-rooms", "--rooms", "r.csv"]).is_err());
    }

    #[test]
    fn test_missing_room_file_fails_run() {
        let dir = tempfile::tempdir().unwrap();
        let timetable = dir.path().join("t.csv");
        std::fs::write(
            &timetable,
            "date,id,dept,doctor,type,room,start,minutes,special\nd,A1,x,x,x,OR1,0,60,N\n",
        )
        .unwrap();
        let rooms = dir.path().join("roomz.csv");
        let cli = Cli::try_parse_from([
            "u-surgery",
            "--rooms",
            rooms.to_str().unwrap(),
            "--timetable",
            timetable.to_str().unwrap(),
        ])
        .unwrap();
        let err = run(cli).unwrap_err();
        assert!(format!("{err:#}").contains("roomz.csv"), "{err:#}");
    }
}
