//! Motion of the bubble field. Every function works on plain bubbles so
//! each stage of a frame can be exercised on its own.

use super::{
    bubble::Bubble,
    config::{SimConfig, GOLDEN_ANGLE_STEP, MIN_DISTANCE},
    input::{Pointer, Viewport},
};
use crate::math::{cos_sin, Cplx};

/// Slow sinusoidal wander, de-synchronised per bubble by `phase` and `drift`.
///
/// `time` is in milliseconds and stays `f64` until the angle is formed.
pub fn apply_drift(bubble: &mut Bubble, time: f64) {
    let t = time * bubble.drift as f64;
    let phase = bubble.phase as f64;

    bubble.vel.x += (t * 0.0005 + phase).sin() as f32 * 0.007;
    bubble.vel.y += (t * 0.00042 + phase).cos() as f32 * 0.006;
}

/// Push away from the pointer, harder the closer it is.
pub fn apply_pointer_repulsion(bubble: &mut Bubble, pointer: Cplx, config: &SimConfig) {
    let d = bubble.pos - pointer;
    let reach = bubble.radius() + config.pointer_reaction_padding;

    if d.mag2() >= reach * reach {
        return;
    }

    let distance = d.mag().max(MIN_DISTANCE);
    let proximity = 1.0 - distance / reach;
    let force = config.pointer_base_force + proximity * proximity * config.pointer_proximity_force;

    bubble.vel += d * (force / distance);
}

pub fn integrate(bubble: &mut Bubble, damping: f32) {
    bubble.pos += bubble.vel;
    bubble.vel *= damping;
}

/// The pointer may never sit inside a bubble: anything that ended up too
/// close is moved out and kicked away.
pub fn apply_pointer_keep_out(bubble: &mut Bubble, pointer: Cplx, config: &SimConfig) {
    let d = bubble.pos - pointer;
    let distance = d.mag().max(MIN_DISTANCE);
    let keep_out = bubble.radius() + config.pointer_keep_out_padding;

    if distance >= keep_out {
        return;
    }

    let n = d * (1.0 / distance);
    bubble.pos += n * (keep_out - distance);
    bubble.vel += n * config.pointer_keep_out_kick;
}

/// Drift, pointer reaction and integration for one bubble.
pub fn step_bubble(bubble: &mut Bubble, time: f64, pointer: &Pointer, config: &SimConfig) {
    apply_drift(bubble, time);

    let pointer_on = pointer.active && config.pointer_enabled();

    if pointer_on {
        apply_pointer_repulsion(bubble, pointer.pos, config);
    }

    integrate(bubble, config.velocity_damping);

    if pointer_on {
        apply_pointer_keep_out(bubble, pointer.pos, config);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOutcome {
    Apart,
    Bounced,
    Popped,
}

/// Separate two overlapping bubbles and exchange momentum along the contact
/// normal. A closing speed above the impact threshold pops both instead.
///
/// `i` and `j` only seed the direction used for coincident centres.
pub fn resolve_pair(
    a: &mut Bubble,
    b: &mut Bubble,
    i: usize,
    j: usize,
    config: &SimConfig,
) -> PairOutcome {
    let mut d = b.pos - a.pos;
    let mut distance2 = d.mag2();
    let min_distance = a.radius() + b.radius() + config.collision_margin;

    if distance2 >= min_distance * min_distance {
        return PairOutcome::Apart;
    }

    if distance2 < MIN_DISTANCE {
        d = cos_sin((i + j + 1) as f32 * GOLDEN_ANGLE_STEP);
        distance2 = 1.0;
    }

    let distance = distance2.sqrt();
    let n = d * (1.0 / distance);
    let separation = (min_distance - distance) * 0.5;

    a.pos -= n * separation;
    b.pos += n * separation;

    let normal_velocity = (b.vel - a.vel).dot(n);
    let impact = -normal_velocity;

    if impact > config.bubble_pop_impact_threshold {
        return PairOutcome::Popped;
    }

    if normal_velocity < 0.0 {
        let impulse = -(1.0 + config.restitution) * normal_velocity / 2.0;
        a.vel -= n * impulse;
        b.vel += n * impulse;
    }

    PairOutcome::Bounced
}

/// O(n²) pass over every pair. Sets `popped[k]` for bubbles that burst.
///
/// A bubble marked while it is the first of a pair still meets the rest of
/// its partners, so it can push, bounce or pop them in the same pass. Only
/// bubbles marked earlier are skipped.
pub fn resolve_collisions(bubbles: &mut [Bubble], popped: &mut [bool], config: &SimConfig) {
    let n = bubbles.len();

    for i in 0..n {
        if popped[i] {
            continue;
        }

        for j in (i + 1)..n {
            if popped[j] {
                continue;
            }

            let (left, right) = bubbles.split_at_mut(j);
            let a = &mut left[i];
            let b = &mut right[0];

            if resolve_pair(a, b, i, j, config) == PairOutcome::Popped {
                popped[i] = true;
                popped[j] = true;
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallOutcome {
    Inside,
    Reflected,
    Popped,
}

/// Clamp into the viewport and bounce off the edge that was crossed.
/// Horizontal edges are checked before vertical ones; hitting a wall
/// faster than the wall threshold pops the bubble.
pub fn resolve_walls(bubble: &mut Bubble, viewport: &Viewport, config: &SimConfig) -> WallOutcome {
    let (min, max) = viewport.bounds_for(bubble.radius());
    let damping = config.wall_damping;
    let threshold = config.wall_pop_speed_threshold;

    let mut outcome = WallOutcome::Inside;

    let hit_x = if bubble.pos.x < min.x {
        Some((min.x, 1.0))
    } else if bubble.pos.x > max.x {
        Some((max.x, -1.0))
    } else {
        None
    };

    if let Some((edge, sign)) = hit_x {
        let impact = bubble.vel.x.abs();
        bubble.pos.x = edge;
        bubble.vel.x = sign * impact * damping;

        if impact > threshold {
            return WallOutcome::Popped;
        }
        outcome = WallOutcome::Reflected;
    }

    let hit_y = if bubble.pos.y < min.y {
        Some((min.y, 1.0))
    } else if bubble.pos.y > max.y {
        Some((max.y, -1.0))
    } else {
        None
    };

    if let Some((edge, sign)) = hit_y {
        let impact = bubble.vel.y.abs();
        bubble.pos.y = edge;
        bubble.vel.y = sign * impact * damping;

        if impact > threshold {
            return WallOutcome::Popped;
        }
        outcome = WallOutcome::Reflected;
    }

    outcome
}
