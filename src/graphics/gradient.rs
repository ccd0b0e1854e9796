use super::{blend, Argb, Rgb};
use crate::math::{interpolate::linearf, Cplx};

const MAX_STOPS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgb,
    pub alpha: f32,
}

/// Two-circle radial gradient from a start circle (`focus`, `inner_radius`)
/// to an end circle (`center`, `outer_radius`).
///
/// Offset `t` describes the circle whose centre and radius are interpolated
/// between the two. A point takes the largest `t` whose circle passes
/// through it with a non-negative radius, so every point of the end circle
/// sits at `t = 1`.
#[derive(Debug, Clone, Copy)]
pub struct RadialGradient {
    pub focus: Cplx,
    pub inner_radius: f32,
    pub center: Cplx,
    pub outer_radius: f32,
    stops: [ColorStop; MAX_STOPS],
    len: usize,
}

impl RadialGradient {
    pub fn new(focus: Cplx, inner_radius: f32, center: Cplx, outer_radius: f32) -> Self {
        Self {
            focus,
            inner_radius,
            center,
            outer_radius,
            stops: [ColorStop {
                offset: 0.0,
                color: [0, 0, 0],
                alpha: 0.0,
            }; MAX_STOPS],
            len: 0,
        }
    }

    /// Stops must be added in increasing offset order. Extra stops past
    /// the capacity are dropped.
    pub fn stop(mut self, offset: f32, color: Rgb, alpha: f32) -> Self {
        if self.len < MAX_STOPS {
            self.stops[self.len] = ColorStop {
                offset,
                color,
                alpha,
            };
            self.len += 1;
        }
        self
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops[..self.len]
    }

    /// Gradient offset of `p`, or `None` where no circle of the family
    /// reaches it and nothing is painted.
    ///
    /// Solves `|p - f - t·(c - f)| = r0 + t·(r1 - r0)` for `t`, written as
    /// `a·t² - 2b·t + k = 0`.
    pub fn parameter(&self, p: Cplx) -> Option<f32> {
        let cd = self.center - self.focus;
        let pd = p - self.focus;
        let r0 = self.inner_radius;
        let dr = self.outer_radius - self.inner_radius;

        let a = cd.mag2() - dr * dr;
        let b = pd.dot(cd) + r0 * dr;
        let k = pd.mag2() - r0 * r0;

        let radius_ok = |t: f32| r0 + t * dr >= 0.0;

        if a.abs() <= f32::EPSILON {
            if b.abs() <= f32::EPSILON {
                return None;
            }
            let t = k / (2.0 * b);
            return radius_ok(t).then_some(t);
        }

        let disc = b * b - a * k;
        if disc < 0.0 {
            return None;
        }

        let root = disc.sqrt();
        let (t1, t2) = ((b + root) / a, (b - root) / a);
        let (hi, lo) = if t1 >= t2 { (t1, t2) } else { (t2, t1) };

        [hi, lo].into_iter().find(|&t| radius_ok(t))
    }

    pub fn sample(&self, t: f32) -> Argb {
        let stops = self.stops();

        let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
            return 0;
        };

        if t <= first.offset {
            return blend::rgba(first.color, first.alpha);
        }

        if t >= last.offset {
            return blend::rgba(last.color, last.alpha);
        }

        for pair in stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t > b.offset {
                continue;
            }

            let span = b.offset - a.offset;
            let k = if span > 0.0 { (t - a.offset) / span } else { 1.0 };

            let channel = |i: usize| linearf(a.color[i] as f32, b.color[i] as f32, k).round() as u8;

            return blend::rgba(
                [channel(0), channel(1), channel(2)],
                linearf(a.alpha, b.alpha, k),
            );
        }

        blend::rgba(last.color, last.alpha)
    }

    pub fn color_at(&self, p: Cplx) -> Argb {
        self.parameter(p).map_or(0, |t| self.sample(t))
    }
}
