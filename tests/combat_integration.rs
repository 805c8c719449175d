//! Combat kernel integration tests
//!
//! End-to-end checks through the public API: fleets are built, handed to a
//! kernel, and shots are resolved tick by tick.

use fleet_combat::capability::{Aggregator, ProfileBasis};
use fleet_combat::combat::{
    CombatEventKind, CombatEventLog, CombatKernel, ProjectileKind, TerminationReason, WeaponStats,
};
use fleet_combat::core::config::CombatConfig;
use fleet_combat::core::types::{FleetId, ModuleId, ShipId};
use fleet_combat::fleet::{load_armada_from_file, Armada, Fleet, Module, ModuleKind, Ship};
use fleet_combat::world::SphereField;
use glam::Vec3;

fn hull(id: u32, health: f32) -> Module {
    Module::new(ModuleId(id), "hull", ModuleKind::Body { cargo: 0.0 }, health)
}

fn weapon(id: u32, stats: WeaponStats) -> Module {
    Module::new(ModuleId(id), "gun", ModuleKind::Weapon(stats), 50.0)
}

fn heavy_beam() -> WeaponStats {
    WeaponStats {
        damage_per_shot: 100.0,
        fire_interval: 1.0,
        projectile: ProjectileKind::Beam,
        speed: 20.0,
        range: 100.0,
    }
}

fn kernel_for(armada: Armada) -> CombatKernel<SphereField> {
    let world = SphereField::from_armada(&armada, 1.0);
    CombatKernel::new(armada, world, CombatConfig::default(), 42).unwrap()
}

fn damage_events(log: &CombatEventLog) -> Vec<f32> {
    log.iter()
        .filter_map(|e| match e {
            CombatEventKind::BeamDamage { damage, .. } => Some(*damage),
            CombatEventKind::MissileDetonated { damage, .. } => Some(*damage),
            _ => None,
        })
        .collect()
}

/// Three ships with two 10-damage, 1.0-interval guns each
#[test]
fn test_fleet_dps_drops_with_destroyed_weapon() {
    let laser = WeaponStats {
        damage_per_shot: 10.0,
        fire_interval: 1.0,
        ..WeaponStats::laser()
    };
    let mut fleet = Fleet::new(FleetId(1), "line");
    for ship in 0..3u32 {
        let base = ship * 10;
        fleet = fleet.with_ship(Ship::new(
            ShipId(ship + 1),
            "picket",
            vec![
                weapon(base + 1, laser.clone()),
                weapon(base + 2, laser.clone()),
                hull(base + 3, 100.0),
            ],
        ));
    }
    let mut armada = Armada::new(Aggregator::default());
    armada.add_fleet(fleet).unwrap();

    let current = armada.fleet_profile(FleetId(1), ProfileBasis::Current).unwrap();
    assert_eq!(current.attack_dps, 60.0);
    assert_eq!(current.weapon_count, 6);

    let outcome = armada.apply_damage(ModuleId(1), 1000.0).unwrap();
    assert!(outcome.destroyed);

    let current = armada.fleet_profile(FleetId(1), ProfileBasis::Current).unwrap();
    let original = armada.fleet_profile(FleetId(1), ProfileBasis::Original).unwrap();
    assert_eq!(current.attack_dps, 50.0);
    assert_eq!(current.weapon_count, 5);
    // A destroyed module drops out of both bases
    assert_eq!(original.attack_dps, 50.0);
    assert_eq!(
        armada.initial_fleet_profile(FleetId(1)).unwrap().attack_dps,
        60.0
    );

    assert_eq!(armada.take_dirty_ships(), vec![ShipId(1)]);
    assert!(armada.take_dirty_ships().is_empty());
}

fn beam_duel(target_x: f32) -> Armada {
    let gunship = Ship::new(ShipId(1), "gunship", vec![weapon(1, heavy_beam())]);
    let target = Ship::new(ShipId(2), "target", vec![hull(2, 500.0)])
        .with_position(Vec3::new(target_x, 0.0, 0.0));
    let mut armada = Armada::default();
    armada
        .add_fleet(Fleet::new(FleetId(1), "blue").with_ship(gunship))
        .unwrap();
    armada
        .add_fleet(Fleet::new(FleetId(2), "red").with_ship(target))
        .unwrap();
    armada
}

/// Beam length 10, speed 20, damage 100, dt 0.1: a target in reach on the
/// first tick takes 20.
#[test]
fn test_beam_first_tick_frame_damage() {
    let mut kernel = kernel_for(beam_duel(2.5));
    kernel.fire(ModuleId(1), ModuleId(2)).unwrap();

    let log = kernel.tick(0.1);
    let damage = damage_events(&log);
    assert_eq!(damage.len(), 1);
    assert!((damage[0] - 20.0).abs() < 1e-4);
}

#[test]
fn test_beam_damage_telescopes_to_one_shot() {
    let mut kernel = kernel_for(beam_duel(2.5));
    let id = kernel.fire(ModuleId(1), ModuleId(2)).unwrap();

    let mut total = 0.0;
    let mut reason = None;
    for _ in 0..100 {
        let log = kernel.tick(0.1);
        total += damage_events(&log).iter().sum::<f32>();
        reason = log.terminations().find(|(p, _)| *p == id).map(|(_, r)| r);
        if reason.is_some() {
            break;
        }
    }
    assert_eq!(reason, Some(TerminationReason::Spent));
    assert!((total - 100.0).abs() < 1e-2);
    let health = kernel.armada().module(ModuleId(2)).unwrap().health;
    assert!((health - 400.0).abs() < 1e-2);
}

#[test]
fn test_beam_into_own_fleet_does_no_damage() {
    let gunship = Ship::new(ShipId(1), "gunship", vec![weapon(1, heavy_beam())]);
    let escort = Ship::new(ShipId(2), "escort", vec![hull(2, 100.0)])
        .with_position(Vec3::new(6.0, 0.0, 0.0));
    let enemy = Ship::new(ShipId(3), "enemy", vec![hull(3, 100.0)])
        .with_position(Vec3::new(20.0, 0.0, 0.0));
    let mut armada = Armada::default();
    armada
        .add_fleet(
            Fleet::new(FleetId(1), "blue")
                .with_ship(gunship)
                .with_ship(escort),
        )
        .unwrap();
    armada
        .add_fleet(Fleet::new(FleetId(2), "red").with_ship(enemy))
        .unwrap();

    let mut kernel = kernel_for(armada);
    let id = kernel.fire(ModuleId(1), ModuleId(3)).unwrap();

    let mut reason = None;
    let mut blocked = 0;
    for _ in 0..50 {
        let log = kernel.tick(0.1);
        assert!(damage_events(&log).is_empty());
        blocked += log
            .iter()
            .filter(|e| matches!(e, CombatEventKind::FriendlyFireBlocked { .. }))
            .count();
        reason = log.terminations().find(|(p, _)| *p == id).map(|(_, r)| r);
        if reason.is_some() {
            break;
        }
    }
    assert_eq!(reason, Some(TerminationReason::FriendlyFire));
    assert_eq!(blocked, 1);
    assert_eq!(kernel.armada().module(ModuleId(2)).unwrap().health, 100.0);
    assert_eq!(kernel.armada().module(ModuleId(3)).unwrap().health, 100.0);
}

fn missile_duel(target: Vec3, mount: Vec3) -> Armada {
    let launcher = Ship::new(
        ShipId(1),
        "launcher",
        vec![weapon(1, WeaponStats::missile_rack()).with_offset(mount)],
    );
    let victim = Ship::new(ShipId(2), "victim", vec![hull(2, 100.0)]).with_position(target);
    let mut armada = Armada::default();
    armada
        .add_fleet(Fleet::new(FleetId(1), "blue").with_ship(launcher))
        .unwrap();
    armada
        .add_fleet(Fleet::new(FleetId(2), "red").with_ship(victim))
        .unwrap();
    armada
}

#[test]
fn test_missile_facing_away_crawls() {
    // Tube faces -x, target is down +x
    let mut kernel = kernel_for(missile_duel(Vec3::new(40.0, 0.0, 0.0), Vec3::NEG_X));
    kernel.fire(ModuleId(1), ModuleId(2)).unwrap();
    kernel.tick(0.05);

    let missile = &kernel.missiles()[0];
    assert_eq!(missile.forward(), Vec3::NEG_X);
    assert!((missile.current_speed() - 0.1 * missile.base_speed()).abs() < 1e-5);
}

#[test]
fn test_missile_in_radius_deals_one_full_hit() {
    let mut kernel = kernel_for(missile_duel(Vec3::new(0.5, 0.0, 0.0), Vec3::ZERO));
    let id = kernel.fire(ModuleId(1), ModuleId(2)).unwrap();

    let log = kernel.tick(0.1);
    assert_eq!(damage_events(&log), vec![40.0]);
    assert_eq!(
        log.terminations().collect::<Vec<_>>(),
        vec![(id, TerminationReason::Impact)]
    );
    assert_eq!(kernel.armada().module(ModuleId(2)).unwrap().health, 60.0);

    let later = kernel.tick(0.1);
    assert!(damage_events(&later).is_empty());
    assert_eq!(kernel.active_missiles(), 0);
}

#[test]
fn test_missile_expires_without_damage() {
    let slow = WeaponStats {
        speed: 1.0,
        ..WeaponStats::missile_rack()
    };
    let launcher = Ship::new(ShipId(1), "launcher", vec![weapon(1, slow)]);
    let victim = Ship::new(ShipId(2), "victim", vec![hull(2, 100.0)])
        .with_position(Vec3::new(100.0, 0.0, 0.0));
    let mut armada = Armada::default();
    armada
        .add_fleet(Fleet::new(FleetId(1), "blue").with_ship(launcher))
        .unwrap();
    armada
        .add_fleet(Fleet::new(FleetId(2), "red").with_ship(victim))
        .unwrap();

    let mut kernel = kernel_for(armada);
    let id = kernel.fire(ModuleId(1), ModuleId(2)).unwrap();
    let mut reason = None;
    for _ in 0..30 {
        let log = kernel.tick(0.5);
        assert!(damage_events(&log).is_empty());
        reason = log.terminations().find(|(p, _)| *p == id).map(|(_, r)| r);
        if reason.is_some() {
            break;
        }
    }
    assert_eq!(reason, Some(TerminationReason::Expired));
    assert_eq!(kernel.elapsed(), 10.5);
}

#[test]
fn test_scenario_file_skirmish() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/scenarios/duel.json");
    let armada = load_armada_from_file(&path, Aggregator::default()).unwrap();
    assert_eq!(armada.fleets().len(), 2);

    let original: Vec<_> = armada
        .fleets()
        .iter()
        .map(|f| armada.fleet_profile(f.id, ProfileBasis::Original).unwrap())
        .collect();

    let mut kernel = kernel_for(armada);
    kernel.engage(ShipId(101), ShipId(201)).unwrap();
    kernel.engage(ShipId(102), ShipId(201)).unwrap();
    kernel.engage(ShipId(201), ShipId(101)).unwrap();
    kernel.engage(ShipId(202), ShipId(102)).unwrap();

    let mut last_hp: Vec<f32> = original.iter().map(|p| p.hp).collect();
    let mut dealt = 0.0;
    for _ in 0..300 {
        let log = kernel.tick(0.1);
        dealt += log.damage_dealt();
        for (i, fleet) in kernel.armada().fleets().iter().enumerate() {
            let current = kernel
                .armada()
                .fleet_profile(fleet.id, ProfileBasis::Current)
                .unwrap();
            assert!(current.hp <= last_hp[i] + 1e-3);
            last_hp[i] = current.hp;
        }
    }
    assert!(dealt > 0.0);

    // Session-start profiles stay put; the original basis only loses modules
    for (fleet, before) in kernel.armada().fleets().iter().zip(&original) {
        let armada = kernel.armada();
        assert_eq!(armada.initial_fleet_profile(fleet.id), Some(*before));
        let after = armada.fleet_profile(fleet.id, ProfileBasis::Original).unwrap();
        assert!(after.hp <= before.hp);
        assert!(after.weapon_count <= before.weapon_count);
    }
}

#[test]
fn test_config_file_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/combat.toml");
    let config = CombatConfig::load(&path).unwrap();
    assert_eq!(config.beam_max_length, 10.0);
    assert!(config.missile_friendly_fire_guard);
}
