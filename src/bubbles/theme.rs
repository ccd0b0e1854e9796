use crate::graphics::{Argb, PixelBuffer};

pub const SURFACE_LIGHT: Argb = 0xFF_FF_FF_FF;
pub const SURFACE_DARK: Argb = 0xFF_14_16_1A;

/// Background theme of the surface behind the bubbles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceMode {
    Light,
    Dark,
}

impl SurfaceMode {
    pub fn name(self) -> &'static str {
        match self {
            SurfaceMode::Light => "light",
            SurfaceMode::Dark => "dark",
        }
    }
}

/// Whatever owns the page background.
pub trait ThemeSink {
    fn apply_surface(&mut self, mode: SurfaceMode, color: Argb);
}

impl ThemeSink for PixelBuffer {
    fn apply_surface(&mut self, _: SurfaceMode, color: Argb) {
        self.set_background(color);
    }
}

/// Forwards a surface mode to its sink once per transition.
#[derive(Debug)]
pub struct ThemeSwitch {
    light: Argb,
    dark: Argb,
    current: Option<SurfaceMode>,
}

impl ThemeSwitch {
    pub fn new(light: Argb, dark: Argb) -> Self {
        Self {
            light,
            dark,
            current: None,
        }
    }

    pub fn color(&self, mode: SurfaceMode) -> Argb {
        match mode {
            SurfaceMode::Light => self.light,
            SurfaceMode::Dark => self.dark,
        }
    }

    pub fn current(&self) -> Option<SurfaceMode> {
        self.current
    }

    /// Returns whether the sink was touched.
    pub fn apply<S: ThemeSink + ?Sized>(&mut self, mode: SurfaceMode, sink: &mut S) -> bool {
        if self.current == Some(mode) {
            return false;
        }

        sink.apply_surface(mode, self.color(mode));
        self.current = Some(mode);
        true
    }
}

impl Default for ThemeSwitch {
    fn default() -> Self {
        Self::new(SURFACE_LIGHT, SURFACE_DARK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<SurfaceMode>);

    impl ThemeSink for Recorder {
        fn apply_surface(&mut self, mode: SurfaceMode, _: Argb) {
            self.0.push(mode);
        }
    }

    #[test]
    fn repeated_mode_is_a_noop() {
        let mut switch = ThemeSwitch::default();
        let mut sink = Recorder::default();

        assert!(switch.apply(SurfaceMode::Dark, &mut sink));
        assert!(!switch.apply(SurfaceMode::Dark, &mut sink));

        assert_eq!(sink.0, vec![SurfaceMode::Dark]);
    }

    #[test]
    fn each_transition_is_applied() {
        let mut switch = ThemeSwitch::default();
        let mut sink = Recorder::default();

        switch.apply(SurfaceMode::Light, &mut sink);
        switch.apply(SurfaceMode::Light, &mut sink);
        switch.apply(SurfaceMode::Dark, &mut sink);
        switch.apply(SurfaceMode::Light, &mut sink);

        assert_eq!(sink.0, vec![SurfaceMode::Light, SurfaceMode::Dark, SurfaceMode::Light]);
        assert_eq!(switch.current(), Some(SurfaceMode::Light));
    }

    #[test]
    fn pixel_buffer_background_follows_mode() {
        let mut pix = PixelBuffer::new(1, 1);
        let mut switch = ThemeSwitch::new(0xFF_C0_A0_80, SURFACE_DARK);

        switch.apply(SurfaceMode::Light, &mut pix);
        assert_eq!(pix.background(), 0xFF_C0_A0_80);

        switch.apply(SurfaceMode::Dark, &mut pix);
        assert_eq!(pix.background(), SURFACE_DARK);
    }
}
