//! sim-runner: headless driver for the supervision-cascade simulation.
//!
//! Usage:
//!   sim-runner --seed 12345 --faculty 12 --trainees 40 --down F001,F004
//!   sim-runner --roster-dir ./data/roster --data-dir ./data --fix T0003
//!   sim-runner --roster-dir ./data/roster --drop-invalid --ipc-mode

use anyhow::Result;
use cascade_core::{
    command::SimCommand,
    config::SimConfig,
    roster::Roster,
    roster_gen::{generate_roster, RosterShape},
    session::SimSession,
    SupervisionGraph, TraineeStatus,
};
use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Bottlenecks,
    Command { command: SimCommand },
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let drop_invalid = args.iter().any(|a| a == "--drop-invalid");
    let top = parse_arg(&args, "--top", 5usize);
    let data_dir = string_arg(&args, "--data-dir").unwrap_or("./data");
    let roster_dir = string_arg(&args, "--roster-dir");

    let config = SimConfig::load_or_default(data_dir)?;
    let roster = match roster_dir {
        Some(dir) => Roster::load(dir)?,
        None => {
            let defaults = RosterShape::default();
            let shape = RosterShape {
                faculty_count: parse_arg(&args, "--faculty", defaults.faculty_count),
                trainee_count: parse_arg(&args, "--trainees", defaults.trainee_count),
                min_backups:   parse_arg(&args, "--min-backups", defaults.min_backups),
                max_backups:   parse_arg(&args, "--max-backups", defaults.max_backups),
            };
            generate_roster(seed, &shape)
        }
    };

    let mut session = start_session(&roster, config, drop_invalid)?;

    if !ipc_mode {
        let graph = session.graph();
        println!("Supervision cascade — sim-runner");
        println!("  roster:    {}", roster_dir.unwrap_or("synthetic"));
        println!("  seed:      {seed}");
        println!("  faculty:   {}", graph.faculty_count());
        println!("  trainees:  {}", graph.trainee_count());
        println!("  at-risk threshold: {}", session.config().policy.at_risk_remaining_backups);
        println!();
    }

    if ipc_mode {
        run_ipc_loop(&mut session)?;
    } else {
        for id in list_arg(&args, "--down") {
            session.toggle_faculty(&id)?;
        }
        for id in list_arg(&args, "--fix") {
            session.toggle_fixed(&id)?;
        }
        print_summary(&session, top);
    }

    Ok(())
}

/// Strict by default: the user sees every offending trainee and the load aborts.
fn start_session(roster: &Roster, config: SimConfig, drop_invalid: bool) -> Result<SimSession> {
    if drop_invalid {
        let (graph, errors) =
            SupervisionGraph::build_excluding_invalid(&roster.faculty, &roster.trainees);
        if !errors.is_empty() {
            eprintln!("Excluded {} roster problem(s):", errors.len());
            for e in &errors {
                eprintln!("  - {e}");
            }
        }
        return Ok(SimSession::new(Arc::new(graph), config)?);
    }

    let errors = cascade_core::graph::validate(&roster.faculty, &roster.trainees);
    if !errors.is_empty() {
        eprintln!("Roster has {} integrity problem(s):", errors.len());
        for e in &errors {
            eprintln!("  - {e}");
        }
        anyhow::bail!("roster failed validation; rerun with --drop-invalid to exclude offending trainees");
    }
    Ok(SimSession::from_roster(roster, config)?)
}

fn run_ipc_loop(session: &mut SimSession) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => {
                writeln!(stdout, "{}", session.snapshot().to_json()?)?;
            }
            IpcCommand::Bottlenecks => {
                writeln!(stdout, "{}", serde_json::to_string(&session.bottlenecks())?)?;
            }
            IpcCommand::Command { command } => match session.apply(command) {
                Ok(_) => writeln!(stdout, "{}", session.snapshot().to_json()?)?,
                Err(e) => {
                    log::warn!("Rejected command: {e}");
                    write_error(&mut stdout, &e.to_string())?;
                }
            },
        }
        stdout.flush()?;
    }
    Ok(())
}

fn write_error(stdout: &mut io::Stdout, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(stdout, "{err_json}")?;
    stdout.flush()?;
    Ok(())
}

fn print_summary(session: &SimSession, top: usize) {
    let m = session.metrics();
    let state = session.state();

    println!("=== CASCADE SUMMARY ===");
    println!("  session:      {}", session.session_id);
    println!("  steps:        {}", session.step());
    println!("  unavailable:  {}", join(state.unavailable_faculty_ids()));
    println!("  fixed:        {}", join(state.fixed_trainee_ids()));
    println!("  trainees:     {}", m.total_trainees);
    println!("  nominal:      {}", m.nominal_count);
    println!("  rerouted:     {}", m.rerouted_count);
    println!("  at risk:      {}", m.at_risk_count);
    println!("  orphaned:     {}", m.orphaned_count);
    println!("  fixed:        {}", m.fixed_count);
    println!("  coverage:     {}%", m.coverage_percentage);

    let snapshot = session.snapshot();
    let flagged: Vec<_> = snapshot
        .trainees
        .iter()
        .filter(|t| t.status != TraineeStatus::Nominal)
        .collect();
    if !flagged.is_empty() {
        println!();
        println!("=== AFFECTED TRAINEES ===");
        for t in flagged {
            println!(
                "  {} {:<24} {:<9} covered by {}",
                t.trainee_id,
                t.name,
                t.status.as_str(),
                t.covering_supervisor_id.as_deref().unwrap_or("-"),
            );
        }
    }

    println!();
    println!("=== TOP BOTTLENECKS (next absence) ===");
    let bottlenecks = session.bottlenecks();
    if bottlenecks.is_empty() {
        println!("  (No available faculty)");
    }
    for b in bottlenecks.iter().take(top) {
        println!(
            "  {} {:<28} primary {:>3} | backup {:>3} | degrades {:>3} | orphans {:>3}",
            b.faculty_id, b.name, b.primary_load, b.backup_load, b.degraded, b.newly_orphaned
        );
    }
}

fn join<'a>(ids: impl IntoIterator<Item = &'a String>) -> String {
    let v: Vec<&str> = ids.into_iter().map(String::as_str).collect();
    if v.is_empty() { "-".to_string() } else { v.join(", ") }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].as_str())
}

fn list_arg(args: &[String], flag: &str) -> Vec<String> {
    string_arg(args, flag)
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
