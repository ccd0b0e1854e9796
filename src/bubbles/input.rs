use crate::math::Cplx;

/// Pointer button numbering follows the DOM: 0 is the main button.
pub const PRIMARY_BUTTON: i16 = 0;

/// A pointer press at the simulator boundary. The adapter decides
/// whether the press landed on an interactive element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
    pub is_primary: bool,
    pub button: i16,
    pub target_is_interactive: bool,
}

impl PointerEvent {
    pub fn primary(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            is_primary: true,
            button: PRIMARY_BUTTON,
            target_is_interactive: false,
        }
    }

    pub fn on_interactive(self, interactive: bool) -> Self {
        Self {
            target_is_interactive: interactive,
            ..self
        }
    }

    pub fn pos(&self) -> Cplx {
        Cplx::new(self.x, self.y)
    }

    pub fn is_main_press(&self) -> bool {
        self.is_primary && self.button == PRIMARY_BUTTON
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    pub pos: Cplx,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub top_inset: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, top_inset: f32) -> Self {
        Self {
            width,
            height,
            top_inset: top_inset.max(0.0),
        }
    }

    pub fn contains(&self, p: Cplx) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x <= self.width && p.y <= self.height
    }

    /// No room to place a bubble below the inset.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= self.top_inset
    }

    pub fn min_dimension(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Allowed centre positions for a bubble of radius `r`, as (min, max).
    /// The max corner never goes below the min one.
    pub fn bounds_for(&self, r: f32) -> (Cplx, Cplx) {
        let min = Cplx::new(r, self.top_inset + r);
        let max = Cplx::new(
            (self.width - r).max(min.x),
            (self.height - r).max(min.y),
        );
        (min, max)
    }
}

/// Screen rectangle standing in for an interactive element (a link,
/// a button, a chat widget). Presses inside it never reach the bubbles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Region {
    pub fn contains(&self, p: Cplx) -> bool {
        p.x >= self.x && p.y >= self.y && p.x < self.x + self.w && p.y < self.y + self.h
    }

    /// Parses the X11 style geometry `WxH+X+Y`.
    pub fn parse(s: &str) -> Option<Self> {
        let (size, offset) = s.split_once('+')?;
        let (w, h) = size.split_once('x')?;
        let (x, y) = offset.split_once('+')?;

        let [w, h, x, y] = [w, h, x, y].map(|v| v.trim().parse::<f32>().ok());

        let region = Region {
            x: x?,
            y: y?,
            w: w?,
            h: h?,
        };

        (region.w > 0.0 && region.h > 0.0).then_some(region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_geometry() {
        let r = Region::parse("120x40+10+20").unwrap();
        assert_eq!(r, Region { x: 10.0, y: 20.0, w: 120.0, h: 40.0 });
        assert!(r.contains(Cplx::new(10.0, 20.0)));
        assert!(r.contains(Cplx::new(129.0, 59.0)));
        assert!(!r.contains(Cplx::new(130.0, 30.0)));
    }

    #[test]
    fn region_rejects_garbage() {
        assert_eq!(Region::parse("120x40"), None);
        assert_eq!(Region::parse("0x40+1+1"), None);
        assert_eq!(Region::parse("ax40+1+1"), None);
        assert_eq!(Region::parse("10x40+1"), None);
    }

    #[test]
    fn bounds_respect_inset_and_never_invert() {
        let v = Viewport::new(400.0, 300.0, 50.0);
        let (min, max) = v.bounds_for(60.0);
        assert_eq!(min, Cplx::new(60.0, 110.0));
        assert_eq!(max, Cplx::new(340.0, 240.0));

        let tiny = Viewport::new(50.0, 50.0, 0.0);
        let (min, max) = tiny.bounds_for(60.0);
        assert_eq!(min, max);
    }

    #[test]
    fn main_press_only() {
        let e = PointerEvent::primary(1.0, 2.0);
        assert!(e.is_main_press());
        assert!(!PointerEvent { button: 2, ..e }.is_main_press());
        assert!(!PointerEvent { is_primary: false, ..e }.is_main_press());
    }
}
