//! World collaborator - line-segment hit tests against module colliders
//!
//! The combat kernel only needs "what does this segment hit first". How the
//! world answers (spatial index, physics engine, brute force) is up to the
//! implementation behind `HitScan`.

pub mod sphere_field;

use glam::Vec3;

use crate::core::types::ModuleId;
use crate::fleet::Armada;

pub use sphere_field::SphereField;

/// First collider hit along a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub module: ModuleId,
    /// Distance from the ray origin
    pub distance: f32,
    pub point: Vec3,
}

pub trait HitScan {
    /// Cast from `origin` along the unit vector `direction`, up to `max_distance`
    fn cast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;

    /// Resync colliders with module state; called once at the start of every tick
    fn refresh(&mut self, _armada: &Armada) {}
}

impl<T: HitScan + ?Sized> HitScan for Box<T> {
    fn cast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        (**self).cast(origin, direction, max_distance)
    }

    fn refresh(&mut self, armada: &Armada) {
        (**self).refresh(armada)
    }
}
