use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use gallery_viewport::camera::Point;
use gallery_viewport::config::{ConfigError, ViewportConfig};
use gallery_viewport::engine::Viewport;
use gallery_viewport::input::Button;
use gallery_viewport::item::{self, ItemError};
use serde_json::json;
use tracing_subscriber::EnvFilter;

/// Frame interval used when driving the controller offline.
const FRAME_MS: f64 = 16.0;
/// Upper bound on a settle loop so a stuck animation cannot spin forever.
const SETTLE_LIMIT_MS: f64 = 10_000.0;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("invalid items: {0}")]
    Items(#[from] ItemError),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "gallery", about = "Offline driver for the gallery viewport controller")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the slot layout for an item list.
    Layout(SourceArgs),
    /// Run a scripted browse session and print the camera after each step.
    Simulate(SimulateArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// JSON array of product items.
    #[arg(long)]
    items: PathBuf,

    #[arg(long, env = "GALLERY_SEED", default_value_t = 1)]
    seed: u64,
}

#[derive(Args, Debug)]
struct SimulateArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    #[arg(long, default_value_t = 800.0)]
    height: f64,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Layout(args) => run_layout(&args),
        Command::Simulate(args) => run_simulate(&args),
    }
}

fn load(args: &SourceArgs, width: f64, height: f64) -> Result<Viewport, CliError> {
    let raw = std::fs::read_to_string(&args.items)
        .map_err(|source| CliError::Read { path: args.items.clone(), source })?;
    let items = item::parse_items(&raw)?;
    let config = ViewportConfig::from_env()?;
    let mut viewport = Viewport::new(config, width, height, args.seed)?;
    viewport.set_items(items);
    Ok(viewport)
}

fn run_layout(args: &SourceArgs) -> Result<(), CliError> {
    let viewport = load(args, 1280.0, 800.0)?;
    let canvas = viewport.config().canvas;
    let slots: Vec<_> = viewport
        .tiles()
        .map(|tile| {
            json!({
                "slot": tile.slot,
                "item_id": tile.item.id,
                "thumbnail": tile.thumbnail,
                "layout": tile.layout,
            })
        })
        .collect();
    let out = json!({
        "canvas": { "width": canvas.width, "height": canvas.height },
        "slots": slots,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn run_simulate(args: &SimulateArgs) -> Result<(), CliError> {
    let mut viewport = load(&args.source, args.width, args.height)?;
    let mut now = 0.0;
    emit(&viewport, "fit", now)?;

    settle(&mut viewport, &mut now);
    emit(&viewport, "intro", now)?;

    let center = viewport.bounds().viewport_center();
    viewport.on_pointer_down(1, center, Button::Primary);
    for step in 1..=10 {
        let offset = f64::from(step) * 20.0;
        viewport.on_pointer_move(1, Point::new(center.x - offset, center.y - offset * 0.5));
        viewport.frame(now);
        now += FRAME_MS;
    }
    emit(&viewport, "drag", now)?;

    viewport.on_pointer_up(1, Point::new(center.x - 200.0, center.y - 100.0));
    settle(&mut viewport, &mut now);
    emit(&viewport, "release", now)?;

    viewport.zoom_in();
    settle(&mut viewport, &mut now);
    emit(&viewport, "zoom_in", now)?;
    Ok(())
}

/// Drive frames until every animation has finished.
fn settle(viewport: &mut Viewport, now: &mut f64) {
    let deadline = *now + SETTLE_LIMIT_MS;
    viewport.frame(*now);
    while viewport.needs_frame() && *now < deadline {
        *now += FRAME_MS;
        viewport.frame(*now);
    }
}

fn emit(viewport: &Viewport, step: &str, now: f64) -> Result<(), CliError> {
    let transform = viewport.transform();
    let line = json!({
        "step": step,
        "time_ms": now,
        "phase": format!("{:?}", viewport.phase()),
        "transform": transform,
        "css": transform.css(),
    });
    println!("{}", serde_json::to_string(&line)?);
    Ok(())
}
