//! Brute-force hit scan: every live module is a sphere

use glam::Vec3;

use crate::core::types::ModuleId;
use crate::fleet::Armada;
use crate::world::{HitScan, RayHit};

pub struct SphereField {
    radius: f32,
    colliders: Vec<(ModuleId, Vec3)>,
}

impl SphereField {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            colliders: Vec::new(),
        }
    }

    pub fn from_armada(armada: &Armada, radius: f32) -> Self {
        let mut field = Self::new(radius);
        field.refresh(armada);
        field
    }

    pub fn insert(&mut self, module: ModuleId, center: Vec3) {
        self.colliders.push((module, center));
    }

    pub fn clear(&mut self) {
        self.colliders.clear();
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Entry distance of the ray into one sphere
    ///
    /// Spheres that contain the origin are ignored, so a shot never hits the
    /// collider it is fired from.
    fn intersect(&self, origin: Vec3, direction: Vec3, center: Vec3) -> Option<f32> {
        let m = origin - center;
        let c = m.length_squared() - self.radius * self.radius;
        if c <= 0.0 {
            return None;
        }
        let b = m.dot(direction);
        if b > 0.0 {
            return None;
        }
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        Some(-b - discriminant.sqrt())
    }
}

impl HitScan for SphereField {
    fn cast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        if max_distance <= 0.0 {
            return None;
        }
        self.colliders
            .iter()
            .filter_map(|&(module, center)| {
                self.intersect(origin, direction, center)
                    .filter(|&t| t <= max_distance)
                    .map(|t| RayHit {
                        module,
                        distance: t,
                        point: origin + direction * t,
                    })
            })
            .min_by(|a, b| {
                a.distance
                    .partial_cmp(&b.distance)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    fn refresh(&mut self, armada: &Armada) {
        self.colliders.clear();
        for ship in armada.ships() {
            for module in ship.live_modules() {
                self.colliders.push((module.id, ship.module_position(module)));
            }
        }
    }
}
