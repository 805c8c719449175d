//! Headless Skirmish Runner
//!
//! Loads fleets from a scenario snapshot, sets every fleet on the next one,
//! runs a fixed number of ticks and reports how each fleet held up.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use fleet_combat::capability::{Aggregator, CapabilityProfile, ProfileBasis};
use fleet_combat::combat::constants::MODULE_COLLIDER_RADIUS;
use fleet_combat::combat::{CombatEventKind, CombatKernel, TerminationReason};
use fleet_combat::core::config::CombatConfig;
use fleet_combat::core::error::Result;
use fleet_combat::core::types::FleetId;
use fleet_combat::fleet::load_armada_from_file;
use fleet_combat::world::SphereField;

/// Headless Skirmish Runner - fleet vs fleet with standing fire orders
#[derive(Parser, Debug)]
#[command(name = "skirmish")]
#[command(about = "Run a seeded fleet skirmish and report capability losses")]
struct Args {
    /// Scenario snapshot (JSON)
    scenario: PathBuf,

    /// Combat config (TOML); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Time step per tick
    #[arg(long, default_value_t = 0.1)]
    dt: f32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Enable debug logging of every shot
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Serialize)]
struct FleetReport {
    id: u32,
    name: String,
    original: CapabilityProfile,
    current: CapabilityProfile,
    hp_ratio: f32,
    destroyed: bool,
}

#[derive(Default, Serialize)]
struct EventCounts {
    fired: usize,
    beam_hits: usize,
    detonations: usize,
    friendly_blocked: usize,
    modules_destroyed: usize,
    expired: usize,
    out_of_range: usize,
}

#[derive(Serialize)]
struct SkirmishReport {
    seed: u64,
    ticks: u64,
    elapsed: f32,
    fleets: Vec<FleetReport>,
    events: EventCounts,
    damage_dealt: f32,
    beams_in_flight: usize,
    missiles_in_flight: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        "fleet_combat=debug"
    } else {
        "fleet_combat=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => CombatConfig::load(path)?,
        None => CombatConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);

    let aggregator = Aggregator::new(config.engine_speed_rule);
    let armada = load_armada_from_file(&args.scenario, aggregator)?;
    let world = SphereField::from_armada(&armada, MODULE_COLLIDER_RADIUS);
    let mut kernel = CombatKernel::new(armada, world, config, seed)?;

    assign_orders(&mut kernel)?;

    let mut counts = EventCounts::default();
    let mut damage_dealt = 0.0;
    for _ in 0..args.ticks {
        let log = kernel.tick(args.dt);
        damage_dealt += log.damage_dealt();
        for event in log.iter() {
            match event {
                CombatEventKind::ProjectileFired { .. } => counts.fired += 1,
                CombatEventKind::BeamDamage { .. } => counts.beam_hits += 1,
                CombatEventKind::MissileDetonated { .. } => counts.detonations += 1,
                CombatEventKind::FriendlyFireBlocked { .. } => counts.friendly_blocked += 1,
                CombatEventKind::ModuleDestroyed { .. } => counts.modules_destroyed += 1,
                CombatEventKind::ProjectileTerminated { reason, .. } => match reason {
                    TerminationReason::Expired => counts.expired += 1,
                    TerminationReason::OutOfRange => counts.out_of_range += 1,
                    _ => {}
                },
                CombatEventKind::ImpactEffect { .. } => {}
            }
        }

        // Profiles only change when a ship took damage
        let dirty = kernel.armada_mut().take_dirty_ships();
        if args.verbose && !dirty.is_empty() {
            for ship in dirty {
                if let Some(profile) = kernel.armada().ship_profile(ship, ProfileBasis::Current) {
                    tracing::debug!(
                        "{} now at {:.0} hp, {:.1} dps",
                        ship,
                        profile.hp,
                        profile.attack_dps
                    );
                }
            }
        }

        if kernel.orders().next().is_none() {
            tracing::info!("No standing orders left after tick {}", kernel.current_tick());
            break;
        }
    }

    let fleets = kernel
        .armada()
        .fleets()
        .iter()
        .map(|fleet| {
            let armada = kernel.armada();
            let original = armada
                .initial_fleet_profile(fleet.id)
                .unwrap_or_else(|| armada.aggregator().fleet(fleet, ProfileBasis::Original));
            let current = armada.aggregator().fleet(fleet, ProfileBasis::Current);
            FleetReport {
                id: fleet.id.0,
                name: fleet.name.clone(),
                original,
                current,
                hp_ratio: current.hp_ratio(&original),
                destroyed: fleet.is_destroyed(),
            }
        })
        .collect();

    let report = SkirmishReport {
        seed,
        ticks: kernel.current_tick(),
        elapsed: kernel.elapsed(),
        fleets,
        events: counts,
        damage_dealt,
        beams_in_flight: kernel.active_beams(),
        missiles_in_flight: kernel.active_missiles(),
    };

    match args.format.as_str() {
        "text" => print_text(&report),
        _ => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

/// Every fleet engages the next one in scenario order
fn assign_orders(kernel: &mut CombatKernel<SphereField>) -> Result<()> {
    let fleets: Vec<FleetId> = kernel.armada().fleets().iter().map(|f| f.id).collect();
    if fleets.len() < 2 {
        tracing::warn!("Scenario has {} fleet(s); nothing to fight", fleets.len());
        return Ok(());
    }
    for (i, attacker) in fleets.iter().enumerate() {
        kernel.engage_fleet(*attacker, fleets[(i + 1) % fleets.len()])?;
    }
    Ok(())
}

fn print_text(report: &SkirmishReport) {
    println!("=== Skirmish (seed {}) ===", report.seed);
    println!("{} ticks, {:.1} time units", report.ticks, report.elapsed);
    println!();
    for fleet in &report.fleets {
        println!(
            "Fleet {} '{}'{}",
            fleet.id,
            fleet.name,
            if fleet.destroyed { " [DESTROYED]" } else { "" }
        );
        println!(
            "  hp     {:>8.1} / {:<8.1} ({:.0}%)",
            fleet.current.hp,
            fleet.original.hp,
            fleet.hp_ratio * 100.0
        );
        println!(
            "  dps    {:>8.1} / {:<8.1}",
            fleet.current.attack_dps, fleet.original.attack_dps
        );
        println!(
            "  speed  {:>8.1} / {:<8.1}",
            fleet.current.speed, fleet.original.speed
        );
        println!(
            "  cargo  {:>8.1} / {:<8.1}",
            fleet.current.cargo, fleet.original.cargo
        );
    }
    println!();
    let e = &report.events;
    println!(
        "Shots {} | beam hits {} | detonations {} | friendly blocked {} | modules lost {}",
        e.fired, e.beam_hits, e.detonations, e.friendly_blocked, e.modules_destroyed
    );
    println!(
        "Expired {} | out of range {} | damage dealt {:.1}",
        e.expired, e.out_of_range, report.damage_dealt
    );
}
