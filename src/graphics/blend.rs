use super::{Argb, Pixel, Rgb};

pub type Mixer = fn(Argb, Argb) -> Argb;

/// Float alpha in 0..=1 to a channel byte.
pub fn alpha_u8(alpha: f32) -> u8 {
    (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Non-premultiplied "source over": `c2` drawn on top of `c1`.
pub fn composite_u32(c1: Argb, c2: Argb) -> Argb {
    let [a1, r1, g1, b1] = c1.decompose();
    let [a2, r2, g2, b2] = c2.decompose();

    let (a, a3) = {
        let a1 = a1 as u32;
        let a2 = a2 as u32;

        let a3 = (a1 * (255 - a2)) / 255;

        (a2 + a3, a3)
    };

    if a == 0 {
        return Argb::trans();
    }

    let composite_channel = |c1: u8, c2: u8| -> u8 {
        let c1 = c1 as u32;
        let c2 = c2 as u32;
        let a2 = a2 as u32;

        ((c2 * a2 + c1 * a3) / a) as u8
    };

    Argb::compose([
        a as u8,
        composite_channel(r1, r2),
        composite_channel(g1, g2),
        composite_channel(b1, b2),
    ])
}

pub fn rgba(rgb: Rgb, alpha: f32) -> Argb {
    let [r, g, b] = rgb;
    Argb::compose([alpha_u8(alpha), r, g, b])
}

impl Pixel for Argb {
    fn white() -> Argb {
        0xFF_FF_FF_FF
    }

    fn trans() -> Argb {
        0x0
    }

    fn over(self, other: Argb) -> Argb {
        other
    }

    fn mix(self, other: Argb) -> Argb {
        composite_u32(self, other)
    }

    fn set_alpha(self, alpha: u8) -> Argb {
        (self & 0x00_FF_FF_FF) | (alpha as Argb) << 24
    }

    fn alpha(self) -> u8 {
        (self >> 24) as u8
    }

    fn decompose(self) -> [u8; 4] {
        self.to_be_bytes()
    }

    fn compose(array: [u8; 4]) -> Argb {
        Argb::from_be_bytes(array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_source_replaces() {
        assert_eq!(0xFF_10_20_30u32.mix(0xFF_AA_BB_CC), 0xFF_AA_BB_CC);
    }

    #[test]
    fn transparent_source_keeps_destination() {
        assert_eq!(0xFF_10_20_30u32.mix(0x00_AA_BB_CC), 0xFF_10_20_30);
    }

    #[test]
    fn half_alpha_over_opaque_is_midway() {
        let out = 0xFF_00_00_00u32.mix(rgba([255, 255, 255], 0.5));
        let [a, r, g, b] = out.decompose();
        assert_eq!(a, 0xFF);
        assert!((126..=129).contains(&r));
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn both_transparent_stays_transparent() {
        assert_eq!(Argb::trans().mix(Argb::trans()), Argb::trans());
    }

    #[test]
    fn alpha_helpers() {
        assert_eq!(alpha_u8(1.5), 255);
        assert_eq!(alpha_u8(-1.0), 0);
        assert_eq!(0xFF_12_34_56u32.set_alpha(0x80).alpha(), 0x80);
    }
}
