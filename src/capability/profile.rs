//! Capability profile - an aggregated stat snapshot

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Combat and logistics stats summed over live modules
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CapabilityProfile {
    pub attack_dps: f32,
    pub hp: f32,
    pub speed: f32,
    pub cargo: f32,
    pub weapon_count: u32,
    pub engine_count: u32,
}

impl CapabilityProfile {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Fraction of `original` HP still present
    pub fn hp_ratio(&self, original: &CapabilityProfile) -> f32 {
        if original.hp > 0.0 {
            (self.hp / original.hp).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Compare with a tolerance suited to summed f32 values
    pub fn approx_eq(&self, other: &CapabilityProfile, epsilon: f32) -> bool {
        (self.attack_dps - other.attack_dps).abs() <= epsilon
            && (self.hp - other.hp).abs() <= epsilon
            && (self.speed - other.speed).abs() <= epsilon
            && (self.cargo - other.cargo).abs() <= epsilon
            && self.weapon_count == other.weapon_count
            && self.engine_count == other.engine_count
    }
}

impl Add for CapabilityProfile {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            attack_dps: self.attack_dps + rhs.attack_dps,
            hp: self.hp + rhs.hp,
            speed: self.speed + rhs.speed,
            cargo: self.cargo + rhs.cargo,
            weapon_count: self.weapon_count + rhs.weapon_count,
            engine_count: self.engine_count + rhs.engine_count,
        }
    }
}

impl AddAssign for CapabilityProfile {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for CapabilityProfile {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}
