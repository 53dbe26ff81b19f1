use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};
use tower_core::{GameConfig, InputSnapshot, Session, TickOutcome, TileKind};
use tower_tools::{init_tracing, load_config};
use tracing::info;

/// Drives sessions with random held keys and swings, checking world invariants every tick.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 10_000)]
    ticks: u32,
    #[arg(short, long, default_value_t = 10)]
    runs: u32,
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Default)]
struct Tally {
    victories: u32,
    defeats: u32,
    unfinished: u32,
    deepest_floor: u32,
    total_ticks: u64,
}

fn random_input(rng: &mut ChaCha8Rng) -> InputSnapshot {
    // Bias towards a single held direction so the player actually travels.
    let direction = rng.next_u32() % 6;
    InputSnapshot {
        left: direction == 0,
        right: direction == 1,
        up: direction == 2,
        down: direction == 3,
        attack_pressed: rng.next_u32() % 6 == 0,
        pause_pressed: false,
    }
}

fn check_invariants(session: &Session, config: &GameConfig) -> Result<()> {
    let grid = session.grid();
    let tile_size = config.tile_size;
    let tick = session.clock().ticks();

    let player = session.player();
    ensure!(
        player.health() <= player.max_health(),
        "tick {tick}: player health {} above max",
        player.health()
    );
    let centre = player.rect().center_tile(tile_size);
    ensure!(
        grid.tile_at(centre) == Some(TileKind::Floor),
        "tick {tick}: player centre {centre:?} is not floor"
    );
    if !session.outcome().is_terminal() {
        ensure!(
            session.floor_index() < config.floor_count,
            "tick {tick}: floor index past the top"
        );
    }

    for (id, enemy) in session.enemies() {
        let centre = enemy.rect().center_tile(tile_size);
        ensure!(
            grid.tile_at(centre) == Some(TileKind::Floor),
            "tick {tick}: enemy {id:?} centre {centre:?} in a wall"
        );
    }
    Ok(())
}

fn soak_run(seed: u64, ticks: u32, config: &GameConfig, tally: &mut Tally) -> Result<()> {
    let mut session = Session::new(seed, config.clone())
        .with_context(|| format!("seed {seed}: session failed"))?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut outcome = TickOutcome::Continue;
    for _ in 0..ticks {
        outcome = session
            .tick(&random_input(&mut rng))
            .with_context(|| format!("seed {seed}: tick failed"))?;
        session.drain_events();
        check_invariants(&session, config).with_context(|| format!("seed {seed}"))?;
        if outcome.is_terminal() {
            break;
        }
    }

    match outcome {
        TickOutcome::Victory => tally.victories += 1,
        TickOutcome::GameOver => tally.defeats += 1,
        TickOutcome::Continue => tally.unfinished += 1,
    }
    tally.deepest_floor = tally.deepest_floor.max(session.floor_index() + 1);
    tally.total_ticks += session.clock().ticks();
    info!(
        seed,
        ?outcome,
        floor = session.floor_index() + 1,
        ticks = session.clock().ticks(),
        "run finished"
    );
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    println!(
        "Soaking {} runs from seed {} for up to {} ticks each...",
        args.runs, args.seed, args.ticks
    );
    let mut tally = Tally::default();
    for run in 0..args.runs {
        soak_run(args.seed.wrapping_add(u64::from(run)), args.ticks, &config, &mut tally)?;
    }

    println!("Victories: {}", tally.victories);
    println!("Game overs: {}", tally.defeats);
    println!("Unfinished: {}", tally.unfinished);
    println!("Deepest floor: {}/{}", tally.deepest_floor, config.floor_count);
    println!("Ticks simulated: {}", tally.total_ticks);
    println!("Soak completed without invariant violations.");
    Ok(())
}
