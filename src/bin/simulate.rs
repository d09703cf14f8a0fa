use chrono::{SecondsFormat, Utc};
use clap::Parser;
use maze_chase::constants::SPECIAL_DURATION;
use maze_chase::engine::autopilot::choose_direction;
use maze_chase::engine::Game;
use maze_chase::rng::Rng;
use maze_chase::save_file;
use maze_chase::types::{HunterKind, Snapshot};
use serde::Serialize;
use serde_json::{json, Value};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

const DEFAULT_TICKS: u32 = 2_000;
const MAX_TICKS: u32 = 1_000_000;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[arg(long)]
    map: PathBuf,
    #[arg(long)]
    ticks: Option<u32>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    hunter: Option<String>,
    #[arg(long)]
    save_out: Option<PathBuf>,
    #[arg(long)]
    summary_out: Option<PathBuf>,
    #[arg(long)]
    special_at: Option<u32>,
    #[arg(long)]
    frighten_every: Option<u32>,
}

#[derive(Clone, Debug)]
struct RunOptions {
    ticks: u32,
    seed: u64,
    special_at: Option<u32>,
    frighten_every: Option<u32>,
}

#[derive(Clone, Debug, Default, Serialize)]
struct RunResultLine {
    ticks: u32,
    level: u32,
    lives: u32,
    score: u32,
    #[serde(rename = "livesLost")]
    lives_lost: u32,
    #[serde(rename = "levelsCleared")]
    levels_cleared: u32,
    #[serde(rename = "finishedAtIso")]
    finished_at_iso: String,
}

#[derive(Clone, Debug, Serialize)]
struct RunSummary {
    #[serde(rename = "runId")]
    run_id: String,
    seed: u64,
    map: String,
    #[serde(rename = "startedAtMs")]
    started_at_ms: u64,
    #[serde(rename = "finishedAtMs")]
    finished_at_ms: u64,
    result: RunResultLine,
    #[serde(rename = "finalState")]
    final_state: Snapshot,
}

#[derive(Clone, Debug, Serialize)]
struct StructuredLogLine {
    #[serde(rename = "timestampMs")]
    timestamp_ms: u64,
    level: String,
    event: String,
    #[serde(rename = "runId")]
    run_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tick: Option<u32>,
    details: Value,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let started_at_ms = now_ms();
    let options = RunOptions {
        ticks: clamp_ticks(cli.ticks),
        seed: cli.seed.unwrap_or_else(rand::random::<u64>),
        special_at: cli.special_at,
        frighten_every: cli.frighten_every.filter(|every| *every > 0),
    };
    let run_id = default_run_id(options.seed, started_at_ms);

    let mut game = match save_file::load_path(&cli.map) {
        Ok(game) => game,
        Err(error) => {
            emit_log(
                "error",
                "map_load_failed",
                &run_id,
                None,
                json!({
                    "path": cli.map.to_string_lossy(),
                    "error": error.to_string(),
                }),
            );
            std::process::exit(2);
        }
    };

    if let Some(raw) = cli.hunter.as_deref() {
        match parse_hunter_kind(raw) {
            Some(kind) => {
                let converted = game.hunter().with_kind(kind);
                *game.hunter_mut() = converted;
            }
            None => emit_log(
                "warn",
                "unknown_hunter_kind",
                &run_id,
                None,
                json!({ "hunter": raw }),
            ),
        }
    }

    emit_log(
        "info",
        "run_started",
        &run_id,
        None,
        json!({
            "map": cli.map.to_string_lossy(),
            "title": game.title(),
            "hunter": game.hunter().kind(),
            "ticks": options.ticks,
            "seed": options.seed,
        }),
    );

    let result = run_simulation(&mut game, &options, &run_id);

    let mut save_out_written: Option<String> = None;
    if let Some(path) = cli.save_out.as_ref() {
        if let Err(error) = save_file::save_path(path, &game) {
            emit_log(
                "error",
                "save_write_failed",
                &run_id,
                None,
                json!({
                    "path": path.to_string_lossy(),
                    "error": error.to_string(),
                }),
            );
            std::process::exit(2);
        }
        save_out_written = Some(path.to_string_lossy().to_string());
    }

    let summary = RunSummary {
        run_id: run_id.clone(),
        seed: options.seed,
        map: cli.map.to_string_lossy().to_string(),
        started_at_ms,
        finished_at_ms: now_ms(),
        result: result.clone(),
        final_state: game.snapshot(),
    };

    let mut summary_out_written: Option<String> = None;
    if let Some(path) = cli.summary_out.as_ref() {
        if let Err(error) = write_summary(path, &summary) {
            emit_log(
                "error",
                "summary_write_failed",
                &run_id,
                None,
                json!({
                    "path": path.to_string_lossy(),
                    "error": error.to_string(),
                }),
            );
            std::process::exit(2);
        }
        summary_out_written = Some(path.to_string_lossy().to_string());
    }

    emit_log(
        "info",
        "run_finished",
        &run_id,
        Some(result.ticks),
        json!({
            "level": result.level,
            "lives": result.lives,
            "score": result.score,
            "saveOut": save_out_written,
            "summaryOut": summary_out_written,
        }),
    );

    match serde_json::to_string(&result) {
        Ok(line) => println!("{line}"),
        Err(error) => {
            emit_log(
                "error",
                "result_encode_failed",
                &run_id,
                None,
                json!({ "error": error.to_string() }),
            );
            std::process::exit(1);
        }
    }
}

fn run_simulation(game: &mut Game, options: &RunOptions, run_id: &str) -> RunResultLine {
    let mut rng = Rng::new(options.seed);
    let mut result = RunResultLine::default();

    for step in 0..options.ticks {
        if game.is_over() {
            break;
        }
        apply_controls(game, step, options);
        let direction = choose_direction(game, &mut rng);
        game.hunter_mut().set_direction(direction);

        let lives_before = game.lives();
        let level_before = game.level();
        game.tick();
        result.ticks += 1;

        if game.lives() < lives_before {
            result.lives_lost += lives_before - game.lives();
            emit_log(
                "info",
                "life_lost",
                run_id,
                Some(step),
                json!({ "livesLeft": game.lives(), "score": game.scores().score() }),
            );
        }
        if game.level() > level_before {
            result.levels_cleared += game.level() - level_before;
            emit_log(
                "info",
                "level_cleared",
                run_id,
                Some(step),
                json!({ "level": game.level(), "score": game.scores().score() }),
            );
        }
    }

    result.level = game.level();
    result.lives = game.lives();
    result.score = game.scores().score();
    result.finished_at_iso = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    result
}

fn apply_controls(game: &mut Game, step: u32, options: &RunOptions) {
    if options.special_at == Some(step) {
        game.hunter_mut().activate_special(SPECIAL_DURATION as i32);
    }
    if let Some(every) = options.frighten_every {
        if step > 0 && step % every == 0 {
            game.set_ghosts_frightened();
        }
    }
}

fn parse_hunter_kind(raw: &str) -> Option<HunterKind> {
    HunterKind::parse(&raw.trim().to_ascii_uppercase())
}

fn clamp_ticks(ticks: Option<u32>) -> u32 {
    ticks.unwrap_or(DEFAULT_TICKS).clamp(1, MAX_TICKS)
}

fn default_run_id(seed: u64, timestamp_ms: u64) -> String {
    format!("sim-{seed}-{timestamp_ms}")
}

fn emit_log(level: &str, event: &str, run_id: &str, tick: Option<u32>, details: Value) {
    let log_line = StructuredLogLine {
        timestamp_ms: now_ms(),
        level: level.to_string(),
        event: event.to_string(),
        run_id: run_id.to_string(),
        tick,
        details,
    };
    if let Ok(text) = serde_json::to_string(&log_line) {
        eprintln!("{text}");
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

fn write_summary(path: &Path, summary: &RunSummary) -> io::Result<()> {
    let summary_text = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, summary_text)
}
