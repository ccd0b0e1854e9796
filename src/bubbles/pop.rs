use std::f32::consts::TAU;

use rand::Rng;

use super::{
    bubble::Bubble,
    config::{SimConfig, PARTICLE_FRAME_MS},
    palette::PopPalette,
};
use crate::math::{cos_sin, ease_out_cubic, rng::random_between, Cplx};

/// Below this an element of the burst is not drawn.
pub const MIN_VISIBLE_ALPHA: f32 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Cplx,
    pub vel: Cplx,
    pub size: f32,
    pub alpha: f32,
    pub life: f32,
    pub age: f32,
}

impl Particle {
    pub fn progress(&self) -> f32 {
        self.age / self.life
    }

    pub fn draw_alpha(&self) -> f32 {
        let fade = 1.0 - self.progress();
        fade * fade * 0.75 * self.alpha
    }
}

/// Burst left behind by a popped bubble: an expanding ring, a flash at the
/// origin and a handful of particles thrown outward.
#[derive(Debug, Clone, PartialEq)]
pub struct PopEffect {
    pub origin: Cplx,
    pub age: f32,
    pub duration: f32,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub alpha: f32,
    pub palette: PopPalette,
    pub particles: Vec<Particle>,
}

impl PopEffect {
    pub fn new<R: Rng + ?Sized>(
        rng: &mut R,
        bubble: &Bubble,
        palette: PopPalette,
        config: &SimConfig,
    ) -> Self {
        let r = bubble.radius();

        let particles = (0..config.pop_particle_count)
            .map(|_| {
                let angle = random_between(rng, 0.0, TAU);
                let speed = random_between(rng, 0.5, 1.8) + r * 0.02;

                Particle {
                    pos: bubble.pos,
                    vel: cos_sin(angle) * speed,
                    size: random_between(rng, (r * 0.08).max(1.6), (r * 0.16).max(2.8)),
                    alpha: random_between(rng, 0.55, 0.95) * bubble.alpha,
                    life: random_between(rng, 180.0, 320.0),
                    age: 0.0,
                }
            })
            .collect();

        Self {
            origin: bubble.pos,
            age: 0.0,
            duration: config.pop_duration,
            inner_radius: (r * 0.35).max(4.0),
            outer_radius: r * 1.9,
            alpha: (bubble.alpha + 0.2).min(1.0),
            palette,
            particles,
        }
    }

    /// Age the burst by `dt` milliseconds. Returns whether it is still alive.
    pub fn advance(&mut self, dt: f32, particle_damping: f32) -> bool {
        let frame_scale = dt / PARTICLE_FRAME_MS;

        self.age += dt;

        self.particles.retain_mut(|p| {
            p.age += dt;
            if p.age >= p.life {
                return false;
            }

            p.pos += p.vel * frame_scale;
            p.vel *= particle_damping;
            true
        });

        self.is_alive()
    }

    pub fn is_alive(&self) -> bool {
        self.age < self.duration || !self.particles.is_empty()
    }

    pub fn progress(&self) -> f32 {
        (self.age / self.duration).min(1.0)
    }

    pub fn ring_radius(&self) -> f32 {
        let expansion = ease_out_cubic(self.progress());
        self.inner_radius + (self.outer_radius - self.inner_radius) * expansion
    }

    pub fn ring_alpha(&self) -> f32 {
        (1.0 - self.progress()) * 0.46 * self.alpha
    }

    pub fn ring_width(&self) -> f32 {
        ((1.0 - self.progress()) * self.inner_radius * 0.5).max(1.1)
    }

    pub fn flash_radius(&self) -> f32 {
        self.inner_radius * 0.5
    }

    pub fn flash_alpha(&self) -> f32 {
        let fade = 1.0 - self.progress();
        fade * fade * 0.4 * self.alpha
    }
}
