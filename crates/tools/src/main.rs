use std::path::PathBuf;

use anyhow::{Result, ensure};
use clap::Parser;
use serde_json::json;
use tower_core::{GameRng, generate_floor};
use tower_tools::{init_tracing, load_config};

/// Prints one generated floor as ASCII (`#` wall, `.` floor) or JSON.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Zero-based floor index; sizes grow with it.
    #[arg(short, long, default_value_t = 0)]
    floor: u32,
    #[arg(long)]
    json: bool,
    /// TOML file overriding `GameConfig` defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    ensure!(
        args.floor < config.floor_count,
        "floor {} is outside the tower ({} floors)",
        args.floor,
        config.floor_count
    );

    let floor = generate_floor(args.floor, &config, &mut GameRng::seeded(args.seed));
    let ascii = floor.grid.to_ascii();
    let cells = floor.grid.width() * floor.grid.height();
    let open_ratio = floor.walkable.len() as f64 / cells as f64;

    if args.json {
        let report = json!({
            "seed": args.seed,
            "floor_index": floor.floor_index,
            "width": floor.grid.width(),
            "height": floor.grid.height(),
            "room_count": floor.room_count,
            "walkable_tiles": floor.walkable.len(),
            "rows": ascii.lines().collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print!("{ascii}");
    println!();
    println!("Seed: {}  Floor: {}/{}", args.seed, args.floor + 1, config.floor_count);
    println!("Size: {}x{}", floor.grid.width(), floor.grid.height());
    println!("Rooms: {}", floor.room_count);
    println!("Walkable: {} ({:.1}%)", floor.walkable.len(), open_ratio * 100.0);

    Ok(())
}
