/// Nominal frame length used for the first frame, in milliseconds.
pub const DEFAULT_FRAME_MS: f32 = 16.67;
pub const MIN_FRAME_MS: f32 = 8.0;
pub const MAX_FRAME_MS: f32 = 40.0;

/// Pop effect particles integrate in units of a 60hz frame.
pub const PARTICLE_FRAME_MS: f32 = 16.666;

pub const MIN_BUBBLE_COUNT: usize = 10;
pub const MAX_BUBBLE_COUNT: usize = 28;

pub const GOLDEN_ANGLE_STEP: f32 = 0.618_033_988_75;
pub const MIN_DISTANCE: f32 = 0.0001;

/// Tuning of the bubble field. Everything the reduced-motion preference
/// changes is picked once in [`SimConfig::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    pub reduced_motion: bool,

    /// Viewport pixels per bubble when deriving the bubble count.
    pub density: f32,

    pub wall_pop_speed_threshold: f32,
    pub bubble_pop_impact_threshold: f32,

    pub pointer_reaction_padding: f32,
    pub pointer_keep_out_padding: f32,
    pub pointer_base_force: f32,
    pub pointer_proximity_force: f32,
    pub pointer_keep_out_kick: f32,

    pub velocity_damping: f32,
    pub restitution: f32,
    pub wall_damping: f32,
    pub collision_margin: f32,

    pub hit_radius_scale: f32,

    pub spawn_duration: (f32, f32),
    pub pop_duration: f32,
    pub pop_particle_count: usize,
    pub particle_damping: f32,
}

impl SimConfig {
    pub fn new(reduced_motion: bool) -> Self {
        Self {
            reduced_motion,

            density: if reduced_motion { 95.0 } else { 70.0 },

            wall_pop_speed_threshold: if reduced_motion { 12.31 } else { 10.65 },
            bubble_pop_impact_threshold: if reduced_motion { 11.31 } else { 9.65 },

            pointer_reaction_padding: 180.0,
            pointer_keep_out_padding: 32.0,
            pointer_base_force: 0.42,
            pointer_proximity_force: 0.72,
            pointer_keep_out_kick: 1.55,

            velocity_damping: 0.986,
            restitution: 0.84,
            wall_damping: 0.92,
            collision_margin: 2.0,

            hit_radius_scale: 1.05,

            spawn_duration: if reduced_motion {
                (120.0, 220.0)
            } else {
                (260.0, 420.0)
            },
            pop_duration: if reduced_motion { 180.0 } else { 320.0 },
            pop_particle_count: if reduced_motion { 4 } else { 12 },
            particle_damping: 0.965,
        }
    }

    /// Pointer forces are disabled under reduced motion.
    pub fn pointer_enabled(&self) -> bool {
        !self.reduced_motion
    }

    /// Bubbles wanted for a viewport `width` pixels wide.
    pub fn target_count(&self, width: f32) -> usize {
        let count = (width / self.density).round().max(0.0) as usize;
        count.clamp(MIN_BUBBLE_COUNT, MAX_BUBBLE_COUNT)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduced_motion_raises_thresholds() {
        let normal = SimConfig::new(false);
        let reduced = SimConfig::new(true);

        assert!(reduced.wall_pop_speed_threshold > normal.wall_pop_speed_threshold);
        assert!(reduced.bubble_pop_impact_threshold > normal.bubble_pop_impact_threshold);
        assert!(reduced.pop_particle_count < normal.pop_particle_count);
        assert!(!reduced.pointer_enabled());
        assert!(normal.pointer_enabled());
    }

    #[test]
    fn target_count_is_clamped() {
        let config = SimConfig::new(false);
        assert_eq!(config.target_count(0.0), MIN_BUBBLE_COUNT);
        assert_eq!(config.target_count(980.0), 14);
        assert_eq!(config.target_count(10_000.0), MAX_BUBBLE_COUNT);

        let reduced = SimConfig::new(true);
        assert_eq!(reduced.target_count(1900.0), 20);
    }
}
