use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::{rngs::StdRng, Rng, SeedableRng};

pub type BubbleRng = StdRng;

pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::from_secs(0))
        .as_nanos() as u64
}

pub fn seeded(seed: Option<u64>) -> BubbleRng {
    StdRng::seed_from_u64(seed.unwrap_or_else(time_seed))
}

/// Uniform in `min..max`. Collapses to `min` on an empty range.
pub fn random_between<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_in_range() {
        let mut rng = seeded(Some(7));
        for _ in 0..1000 {
            let v = random_between(&mut rng, -0.18, 0.18);
            assert!((-0.18..0.18).contains(&v));
        }
    }

    #[test]
    fn empty_range_returns_min() {
        let mut rng = seeded(Some(7));
        assert_eq!(random_between(&mut rng, 5.0, 5.0), 5.0);
        assert_eq!(random_between(&mut rng, 5.0, 1.0), 5.0);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = seeded(Some(42));
        let mut b = seeded(Some(42));
        for _ in 0..16 {
            assert_eq!(random_between(&mut a, 0.0, 1.0), random_between(&mut b, 0.0, 1.0));
        }
    }
}
