use std::f32::consts::TAU;

use rand::Rng;

use super::{config::SimConfig, input::Viewport};
use crate::math::{ease_out_cubic, rng::random_between, Cplx};

/// Smallest viewport side used when sizing bubbles.
const MIN_BASE_DIMENSION: f32 = 320.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusRange {
    pub min: f32,
    pub max: f32,
}

/// Radii scale with the smaller viewport side, so a phone and a desktop
/// both get bubbles that look about as large.
pub fn radius_range(viewport: &Viewport) -> RadiusRange {
    let base = viewport.min_dimension().max(MIN_BASE_DIMENSION);

    let base_min = (base * 0.045).round().max(26.0);
    let base_max = (base * 0.063).round().max(base_min + 8.0);

    let min = base_min * 2.0;
    let max = (base_max * 2.0).max(min + 16.0);

    RadiusRange { min, max }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    pub pos: Cplx,
    pub vel: Cplx,
    radius: f32,
    pub alpha: f32,
    pub phase: f32,
    pub drift: f32,
    pub spawn_elapsed: f32,
    pub spawn_duration: f32,
}

impl Bubble {
    /// A fully grown bubble at rest.
    pub fn new(pos: Cplx, radius: f32) -> Self {
        Self {
            pos,
            vel: Cplx::zero(),
            radius,
            alpha: 0.5,
            phase: 0.0,
            drift: 1.0,
            spawn_elapsed: 0.0,
            spawn_duration: 0.0,
        }
    }

    pub fn with_velocity(self, vel: Cplx) -> Self {
        Self { vel, ..self }
    }

    /// A random bubble placed inside `viewport`, below the top inset.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, viewport: &Viewport, config: &SimConfig) -> Self {
        let range = radius_range(viewport);
        let radius = random_between(rng, range.min, range.max);
        let (min, max) = viewport.bounds_for(radius);

        let (spawn_min, spawn_max) = config.spawn_duration;

        Self {
            pos: Cplx::new(
                random_between(rng, min.x, max.x),
                random_between(rng, min.y, max.y),
            ),
            vel: Cplx::new(
                random_between(rng, -0.18, 0.18),
                random_between(rng, -0.12, 0.12),
            ),
            radius,
            alpha: random_between(rng, 0.35, 0.72),
            phase: random_between(rng, 0.0, TAU),
            drift: random_between(rng, 0.85, 1.2),
            spawn_elapsed: 0.0,
            spawn_duration: random_between(rng, spawn_min, spawn_max),
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn spawn_progress(&self) -> f32 {
        if self.spawn_duration <= 0.0 {
            return 1.0;
        }
        (self.spawn_elapsed / self.spawn_duration).clamp(0.0, 1.0)
    }

    pub fn spawn_ease(&self) -> f32 {
        ease_out_cubic(self.spawn_progress())
    }

    pub fn advance_spawn(&mut self, dt: f32) {
        if self.spawn_elapsed < self.spawn_duration {
            self.spawn_elapsed = (self.spawn_elapsed + dt).min(self.spawn_duration);
        }
    }

    pub fn clamp_into(&mut self, viewport: &Viewport) {
        let (min, max) = viewport.bounds_for(self.radius);
        self.pos.x = self.pos.x.clamp(min.x, max.x);
        self.pos.y = self.pos.y.clamp(min.y, max.y);
    }

    pub fn contains(&self, p: Cplx, hit_scale: f32) -> bool {
        let hit = self.radius * hit_scale;
        (p - self.pos).mag2() <= hit * hit
    }
}
