use super::{
    bubble::Bubble,
    palette::Palette,
    pop::{PopEffect, MIN_VISIBLE_ALPHA},
};
use crate::graphics::{gradient::RadialGradient, PixelBuffer};
use crate::math::Cplx;

/// Radius the bubble is drawn at: a slow breathing pulse, shrunk while the
/// entrance animation runs.
pub fn drawn_radius(bubble: &Bubble, time: f64) -> f32 {
    let pulse = 1.0 + (time * 0.0012 + bubble.phase as f64).sin() as f32 * 0.03;
    let entrance = 0.72 + 0.28 * bubble.spawn_ease();
    bubble.radius() * pulse * entrance
}

pub fn drawn_alpha(bubble: &Bubble) -> f32 {
    bubble.alpha * (0.12 + 0.88 * bubble.spawn_ease())
}

pub fn draw_bubble(pix: &mut PixelBuffer, bubble: &Bubble, time: f64, palette: &Palette) {
    let r = drawn_radius(bubble, time);
    let a = drawn_alpha(bubble);
    let c = bubble.pos;

    let at = |dx: f32, dy: f32| Cplx::new(c.x + r * dx, c.y + r * dy);

    // body
    let body = RadialGradient::new(at(-0.28, -0.32), r * 0.14, c, r)
        .stop(0.0, palette.body_core, 0.0)
        .stop(0.45, palette.body_core, 0.032 * a)
        .stop(0.8, palette.body_mid, 0.082 * a)
        .stop(1.0, palette.body_edge, 0.14 * a);
    pix.fill_circle_gradient(c, r, &body);

    // Shadow pooled at the lower right. Only the disc is painted, so its
    // last stop carries to the rim instead of glowing outside.
    let shadow = RadialGradient::new(at(0.34, 0.38), r * 0.06, c, r * 0.92)
        .stop(0.0, palette.inner_shadow, 0.0)
        .stop(0.72, palette.inner_shadow, 0.11 * a)
        .stop(1.0, palette.inner_shadow, 0.24 * a);
    pix.fill_circle_gradient(c, r, &shadow);

    let highlight = RadialGradient::new(at(-0.22, -0.24), r * 0.05, at(-0.08, -0.1), r * 0.82)
        .stop(0.0, palette.highlight, 0.0)
        .stop(0.42, palette.highlight, 0.035 * a)
        .stop(1.0, palette.highlight, 0.0);
    pix.fill_circle_gradient(c, r, &highlight);
}

pub fn draw_pop_effect(pix: &mut PixelBuffer, effect: &PopEffect) {
    let colors = &effect.palette;

    let ring_alpha = effect.ring_alpha();
    if ring_alpha > MIN_VISIBLE_ALPHA {
        pix.stroke_circle(
            effect.origin,
            effect.ring_radius(),
            effect.ring_width(),
            colors.ring,
            ring_alpha,
        );
    }

    let flash_alpha = effect.flash_alpha();
    if flash_alpha > MIN_VISIBLE_ALPHA {
        pix.fill_circle(effect.origin, effect.flash_radius(), colors.flash, flash_alpha);
    }

    for particle in &effect.particles {
        let alpha = particle.draw_alpha();
        if alpha <= MIN_VISIBLE_ALPHA {
            continue;
        }
        pix.fill_circle(particle.pos, particle.size, colors.particle, alpha);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bubbles::config::SimConfig;
    use crate::graphics::Pixel;
    use crate::math::rng::seeded;

    #[test]
    fn entrance_shrinks_and_fades() {
        let mut b = Bubble::new(Cplx::zero(), 50.0);
        b.spawn_duration = 300.0;

        assert!((drawn_radius(&b, 0.0) - 36.0).abs() < 1e-4);
        assert!((drawn_alpha(&b) - 0.06).abs() < 1e-6);

        b.advance_spawn(300.0);
        assert!((drawn_radius(&b, 0.0) - 50.0).abs() < 1e-4);
        assert!((drawn_alpha(&b) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn pulse_keeps_breathing_late_in_a_session() {
        let b = Bubble::new(Cplx::zero(), 50.0);
        let late = 100_000_000.0;

        let radii: Vec<f32> = (0..4).map(|k| drawn_radius(&b, late + k as f64 * 2.0)).collect();

        assert!(radii.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn bubble_paints_only_inside_its_disc() {
        let mut pix = PixelBuffer::new(120, 120);
        let mut b = Bubble::new(Cplx::new(60.0, 60.0), 40.0);
        b.alpha = 1.0;

        draw_bubble(&mut pix, &b, 0.0, &Palette::default());

        // near the rim the body and shadow are at their strongest
        assert!(pix.pixel(60 * 120 + 98).alpha() > 0);
        assert_eq!(pix.pixel(0), 0);
        assert_eq!(pix.pixel(60 * 120 + 119), 0);
    }

    #[test]
    fn fresh_pop_draws_ring_and_flash() {
        let mut pix = PixelBuffer::new(100, 100);
        let mut rng = seeded(Some(1));
        let mut bubble = Bubble::new(Cplx::new(50.0, 50.0), 30.0);
        bubble.alpha = 0.8;
        let config = SimConfig::default();
        let effect = PopEffect::new(&mut rng, &bubble, Palette::default().pop, &config);

        draw_pop_effect(&mut pix, &effect);

        assert!(pix.pixel(50 * 100 + 50).alpha() > 0);
        assert!(pix.pixel(50 * 100 + 60).alpha() > 0);
    }

    #[test]
    fn finished_pop_draws_nothing() {
        let mut pix = PixelBuffer::new(100, 100);
        let mut rng = seeded(Some(1));
        let bubble = Bubble::new(Cplx::new(50.0, 50.0), 30.0);
        let config = SimConfig::default();
        let mut effect = PopEffect::new(&mut rng, &bubble, Palette::default().pop, &config);
        effect.age = effect.duration;
        effect.particles.clear();

        draw_pop_effect(&mut pix, &effect);

        assert!(pix.as_slice().iter().all(|&p| p == 0));
    }
}
