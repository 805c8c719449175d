//! Benchmarks for aggregation and kernel ticking.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fleet_combat::capability::{Aggregator, ProfileBasis};
use fleet_combat::combat::{CombatKernel, WeaponStats};
use fleet_combat::core::config::CombatConfig;
use fleet_combat::core::types::{FleetId, ModuleId, ShipId};
use fleet_combat::fleet::{Armada, Fleet, Module, ModuleKind, Ship};
use fleet_combat::world::SphereField;
use glam::Vec3;

/// Two fleets of `ships` ships each, facing each other along x
fn armada(ships: u32) -> Armada {
    let mut armada = Armada::new(Aggregator::default());
    let mut next_module = 0;
    for (fleet, x) in [(1u32, 0.0f32), (2, 40.0)] {
        let mut f = Fleet::new(FleetId(fleet), format!("fleet {}", fleet));
        for s in 0..ships {
            let mut module = |kind: ModuleKind, health: f32, offset: Vec3| {
                next_module += 1;
                Module::new(ModuleId(next_module), "bench", kind, health).with_offset(offset)
            };
            let modules = vec![
                module(ModuleKind::Body { cargo: 10.0 }, 200.0, Vec3::ZERO),
                module(ModuleKind::Weapon(WeaponStats::laser()), 40.0, Vec3::Y * 2.0),
                module(ModuleKind::Weapon(WeaponStats::missile_rack()), 40.0, Vec3::NEG_Y * 2.0),
                module(ModuleKind::Engine { thrust: 5.0 }, 60.0, Vec3::NEG_X * 2.0),
            ];
            f = f.with_ship(
                Ship::new(ShipId(fleet * 10_000 + s), "bench", modules)
                    .with_position(Vec3::new(x, 0.0, s as f32 * 6.0)),
            );
        }
        armada.add_fleet(f).expect("unique ids");
    }
    armada
}

fn benchmark_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Fleet Aggregation");
    for ships in [10u32, 100, 1000] {
        let armada = armada(ships);
        group.bench_with_input(BenchmarkId::from_parameter(ships), &armada, |b, armada| {
            b.iter(|| black_box(armada.fleet_profile(FleetId(1), ProfileBasis::Current)));
        });
    }
    group.finish();
}

fn benchmark_kernel_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("Kernel Tick");
    for ships in [4u32, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(ships), &ships, |b, &ships| {
            b.iter_batched(
                || {
                    let armada = armada(ships);
                    let world = SphereField::from_armada(&armada, 1.0);
                    let mut kernel =
                        CombatKernel::new(armada, world, CombatConfig::default(), 3)
                            .expect("default config");
                    for s in 0..ships {
                        kernel
                            .engage(ShipId(10_000 + s), ShipId(20_000 + s))
                            .expect("ships exist");
                        kernel
                            .engage(ShipId(20_000 + s), ShipId(10_000 + s))
                            .expect("ships exist");
                    }
                    kernel
                },
                |mut kernel| {
                    for _ in 0..60 {
                        black_box(kernel.tick(1.0 / 30.0));
                    }
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_aggregation, benchmark_kernel_tick);
criterion_main!(benches);
