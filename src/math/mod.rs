pub mod rng;
mod vec2;

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2<T> {
    pub x: T,
    pub y: T,
}

pub type Cplx = Vec2<f32>;

/// Unit vector at angle `x` (radians).
pub fn cos_sin(x: f32) -> Cplx {
    let (y, x) = x.sin_cos();
    Cplx { x, y }
}

pub fn clamp_unit(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// `1 - (1 - p)^3`, with `p` clamped to 0..=1.
pub fn ease_out_cubic(p: f32) -> f32 {
    let q = 1.0 - clamp_unit(p);
    1.0 - q * q * q
}

pub mod interpolate {
    pub fn linearf(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn vector_basics() {
        let a = Cplx::new(3.0, 4.0);
        assert_eq!(a.mag(), 5.0);
        assert_eq!(a.mag2(), 25.0);
        assert_eq!(a.dot(Cplx::new(1.0, 0.0)), 3.0);

        assert_eq!(a / 5.0, Cplx::new(0.6, 0.8));

        let mut b = a;
        b += Cplx::new(1.0, 1.0);
        b *= 2.0;
        assert_eq!(b, Cplx::new(8.0, 10.0));
        assert_eq!(-b + b, Cplx::zero());
    }

    #[test]
    fn cos_sin_is_unit() {
        let v = cos_sin(1.234);
        assert!((v.mag() - 1.0).abs() < 1e-6);
        assert!((cos_sin(0.0).x - 1.0).abs() < 1e-6);
    }
}
