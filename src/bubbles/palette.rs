use rand::Rng;

use crate::graphics::{Argb, Pixel, Rgb};
use crate::math::{interpolate::linearf, rng::random_between};

pub const DEFAULT_BACKGROUND: Rgb = [191, 191, 191];

const WHITE: Rgb = [255, 255, 255];
const BLACK: Rgb = [0, 0, 0];

/// Bubble colors, derived from the page background so the bubbles read as
/// its photographic negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub body_core: Rgb,
    pub body_mid: Rgb,
    pub body_edge: Rgb,
    pub inner_shadow: Rgb,
    pub highlight: Rgb,
    pub pop: PopPalette,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopPalette {
    pub ring: Rgb,
    pub flash: Rgb,
    pub particle: Rgb,
}

impl Palette {
    pub fn from_background(background: Rgb) -> Self {
        let inverse = invert(background);

        Self {
            body_core: mix_rgb(inverse, WHITE, 0.12),
            body_mid: mix_rgb(inverse, WHITE, 0.02),
            body_edge: mix_rgb(inverse, BLACK, 0.2),
            inner_shadow: mix_rgb(inverse, BLACK, 0.44),
            highlight: mix_rgb(inverse, WHITE, 0.45),
            pop: PopPalette {
                ring: mix_rgb(inverse, WHITE, 0.26),
                flash: mix_rgb(inverse, WHITE, 0.48),
                particle: mix_rgb(inverse, BLACK, 0.08),
            },
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_background(DEFAULT_BACKGROUND)
    }
}

pub fn invert([r, g, b]: Rgb) -> Rgb {
    [255 - r, 255 - g, 255 - b]
}

/// Channel-wise `a + (b - a) * t`, rounded.
pub fn mix_rgb(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    std::array::from_fn(|i| linearf(a[i] as f32, b[i] as f32, t).round() as u8)
}

pub fn cmyk_to_rgb(c: f32, m: f32, y: f32, k: f32) -> Rgb {
    let k = 1.0 - k.clamp(0.0, 1.0);
    [c, m, y].map(|v| (255.0 * (1.0 - v.clamp(0.0, 1.0)) * k).round() as u8)
}

/// A muted random print color for the page background: ink weights are
/// drawn per channel, pulled towards a neutral grey, and darkened by a
/// modest key.
pub fn random_backdrop<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    let k = random_between(rng, 0.2, 0.28);
    let ink = random_between(rng, 0.92, 1.18);
    let neutral_mix = random_between(rng, 0.05, 0.12);

    let weights: [f32; 3] = std::array::from_fn(|_| rng.gen::<f32>() + 0.08);
    let sum: f32 = weights.iter().sum();

    let [c, m, y] =
        weights.map(|w| (ink * w / sum * (1.0 - neutral_mix) + 0.42 * neutral_mix).clamp(0.0, 1.0));

    cmyk_to_rgb(c, m, y, k)
}

pub fn opaque(rgb: Rgb) -> Argb {
    let [r, g, b] = rgb;
    Argb::compose([0xFF, r, g, b])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::rng::seeded;

    #[test]
    fn default_palette_is_inverse_of_grey() {
        let p = Palette::default();
        // inverse of 191 is 64
        assert_eq!(p.body_mid, [68, 68, 68]);
        assert_eq!(p.body_edge, [51, 51, 51]);
        assert_eq!(p.highlight, mix_rgb([64; 3], WHITE, 0.45));
        assert!(p.inner_shadow[0] < p.body_edge[0]);
        assert!(p.pop.flash[0] > p.pop.ring[0]);
    }

    #[test]
    fn mix_endpoints() {
        assert_eq!(mix_rgb([10, 20, 30], WHITE, 0.0), [10, 20, 30]);
        assert_eq!(mix_rgb([10, 20, 30], BLACK, 1.0), BLACK);
        assert_eq!(invert([0, 128, 255]), [255, 127, 0]);
    }

    #[test]
    fn cmyk_extremes() {
        assert_eq!(cmyk_to_rgb(0.0, 0.0, 0.0, 0.0), WHITE);
        assert_eq!(cmyk_to_rgb(0.0, 0.0, 0.0, 1.0), BLACK);
        assert_eq!(cmyk_to_rgb(1.0, 0.0, 0.0, 0.0), [0, 255, 255]);
    }

    #[test]
    fn random_backdrop_is_never_light() {
        let mut rng = seeded(Some(3));
        for _ in 0..200 {
            let rgb = random_backdrop(&mut rng);
            // key of at least 0.2 caps every channel at 204
            assert!(rgb.iter().all(|&c| c <= 204));
        }
    }
}
