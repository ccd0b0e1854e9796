#[macro_use]
pub mod log;

pub mod delta;
pub mod reader;

use std::time::Duration;

use crate::bubbles::{
    config::SimConfig,
    input::{PointerEvent, Region},
    palette::{self, Palette, DEFAULT_BACKGROUND},
    scheduler::{FrameScheduler, ManualScheduler},
    theme::{SurfaceMode, SURFACE_LIGHT},
    BubbleField,
};
use crate::graphics::{Argb, PixelBuffer, Rgb, P2};
use crate::math::rng;
use crate::modes::Mode;

pub const DEFAULT_WIN_W: u16 = 960;
pub const DEFAULT_WIN_H: u16 = 640;

pub const DEFAULT_MILLI_HZ: u32 = 60 * 1000;
pub const MAX_MILLI_HZ: u32 = 240 * 1000;

/// Faint outline around interactive regions.
pub const REGION_OUTLINE: Argb = 0x50_80_80_80;

/// Main program struct
///
/// Owns the pixel buffer the field draws into and everything read from
/// the command line. The window size lives in `WIN_W` and `WIN_H`; the
/// buffer follows the window on resize.
#[allow(non_snake_case)]
pub(crate) struct Program {
    pub pix: PixelBuffer,
    pub field: BubbleField,

    WIN_W: u16,
    WIN_H: u16,

    pub MILLI_HZ: u32,
    pub REFRESH_RATE: Duration,

    REDUCED_MOTION: bool,
    NAV_INSET: f32,

    /// Page color the palette is derived from. `None` keeps the default
    /// grey palette on a plain light surface.
    BACKGROUND: Option<Rgb>,
    RANDOM_BACKGROUND: bool,
    SEED: Option<u64>,

    /// Run this many frames without a window.
    HEADLESS_FRAMES: Option<u64>,

    regions: Vec<Region>,
}

impl Program {
    pub fn new() -> Self {
        let mut prog = Self {
            pix: PixelBuffer::new(DEFAULT_WIN_W as usize, DEFAULT_WIN_H as usize),
            field: BubbleField::new(SimConfig::default(), Palette::default(), rng::seeded(None)),

            WIN_W: DEFAULT_WIN_W,
            WIN_H: DEFAULT_WIN_H,

            MILLI_HZ: DEFAULT_MILLI_HZ,
            REFRESH_RATE: Duration::ZERO,

            REDUCED_MOTION: false,
            NAV_INSET: 0.0,

            BACKGROUND: None,
            RANDOM_BACKGROUND: false,
            SEED: None,

            HEADLESS_FRAMES: None,

            regions: Vec::new(),
        };

        prog.change_fps_frac(DEFAULT_MILLI_HZ);
        prog
    }

    /// Recreate the simulator from the current settings. Only meant to be
    /// called before the frame loop starts.
    pub fn rebuild_field(&mut self) {
        let mut rng = rng::seeded(self.SEED);

        let background = if self.RANDOM_BACKGROUND {
            Some(palette::random_backdrop(&mut rng))
        } else {
            self.BACKGROUND
        };

        let light = background.map_or(SURFACE_LIGHT, palette::opaque);
        let palette = Palette::from_background(background.unwrap_or(DEFAULT_BACKGROUND));

        self.BACKGROUND = background;

        self.field = BubbleField::new(SimConfig::new(self.REDUCED_MOTION), palette, rng)
            .with_light_surface(light);
        self.field.set_nav_inset(self.NAV_INSET);

        self.pix.set_background(light);
    }

    pub fn update_size(&mut self, s: (u16, u16)) {
        (self.WIN_W, self.WIN_H) = s;
        self.pix.resize(s.0 as usize, s.1 as usize);
    }

    pub fn window_size(&self) -> (u16, u16) {
        (self.WIN_W, self.WIN_H)
    }

    pub fn change_fps_frac(&mut self, milli_hz: u32) {
        let milli_hz = milli_hz.clamp(1, MAX_MILLI_HZ);
        self.MILLI_HZ = milli_hz;
        self.REFRESH_RATE = Duration::from_micros(1_000_000_000 / milli_hz as u64);
    }

    pub fn is_reduced_motion(&self) -> bool {
        self.REDUCED_MOTION
    }

    pub fn mode(&self) -> Mode {
        match self.HEADLESS_FRAMES {
            Some(n) => Mode::Headless(n),
            None => Mode::default(),
        }
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Whether a press at (x, y) lands on an interactive element.
    pub fn is_interactive(&self, x: f32, y: f32) -> bool {
        let p = crate::math::Cplx::new(x, y);
        self.regions.iter().any(|r| r.contains(p))
    }

    /// Build the simulator's view of a press, resolving its target.
    pub fn pointer_event(&self, x: f32, y: f32, is_primary: bool, button: i16) -> PointerEvent {
        PointerEvent {
            x,
            y,
            is_primary,
            button,
            target_is_interactive: self.is_interactive(x, y),
        }
    }

    pub fn start<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        self.field.initialize(Some(&self.pix), scheduler)
    }

    pub fn render<S: FrameScheduler + ?Sized>(&mut self, time: f64, scheduler: &mut S) {
        self.field.on_frame(time, &mut self.pix, scheduler);
        self.draw_regions();
    }

    pub fn draw_regions(&mut self) {
        for r in &self.regions {
            let ps = P2::new(r.x as i32, r.y as i32);
            let pe = P2::new((r.x + r.w) as i32 - 1, (r.y + r.h) as i32 - 1);
            self.pix.draw_rect_outline(ps, pe, REGION_OUTLINE);
        }
    }

    /// Drive the field for `frames` frames at the configured rate without
    /// a window, then report what is left.
    pub fn run_headless(&mut self, frames: u64) -> Summary {
        let mut scheduler = ManualScheduler::new();

        if !self.start(&mut scheduler) {
            alert!("Nothing to draw on, skipping the run.");
            return Summary::default();
        }

        let frame_ms = self.REFRESH_RATE.as_secs_f64() * 1000.0;
        let mut time = 0.0;

        for _ in 0..frames {
            if scheduler.take_due().is_none() {
                break;
            }

            time += frame_ms;
            self.render(time, &mut scheduler);
        }

        Summary {
            frames,
            bubbles: self.field.bubbles().len(),
            pop_effects: self.field.pop_effects().len(),
            exhausted: self.field.is_exhausted(),
            surface: self.field.surface_mode(),
        }
    }

    pub fn print_startup_info(&self) {
        info!("\nBubblefield");

        info!("Window: {}x{}", self.WIN_W, self.WIN_H);
        info!("Refresh rate: {}hz", self.MILLI_HZ as f64 / 1000.0);
        info!(
            "Reduced motion: {}",
            if self.REDUCED_MOTION { "on" } else { "off" }
        );

        if self.NAV_INSET > 0.0 {
            info!("Nav inset: {}px", self.NAV_INSET);
        }

        if let Some([r, g, b]) = self.BACKGROUND {
            info!("Background: rgb({}, {}, {})", r, g, b);
        }

        for r in &self.regions {
            debug!("Interactive region: {}x{}+{}+{}", r.w, r.h, r.x, r.y);
        }

        info!("Mode: {}", self.mode().get_name());

        match self.mode() {
            Mode::Headless(n) => info!("Running for {} frames", n),
            Mode::Win => info!("Running with: Winit"),
        }

        info!("");
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct Summary {
    pub frames: u64,
    pub bubbles: usize,
    pub pop_effects: usize,
    pub exhausted: bool,
    pub surface: Option<SurfaceMode>,
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} frames: {} bubbles left, {} bursts fading, surface {}{}",
            self.frames,
            self.bubbles,
            self.pop_effects,
            self.surface.map_or("unset", SurfaceMode::name),
            if self.exhausted { " (exhausted)" } else { "" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::Pixel;

    fn program(args: &[&str]) -> Program {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        Program::new()
            .try_eval_args(&mut args.iter())
            .unwrap()
    }

    #[test]
    fn regions_mark_presses_as_interactive() {
        let prog = program(&["bubblefield", "--exclude", "100x40+20+10"]);

        assert!(prog.is_interactive(50.0, 30.0));
        assert!(!prog.is_interactive(150.0, 30.0));

        let e = prog.pointer_event(50.0, 30.0, true, 0);
        assert!(e.target_is_interactive);
    }

    #[test]
    fn press_on_region_leaves_bubble_alone() {
        let mut prog = program(&["bubblefield", "--size", "400x300", "--seed", "9"]);
        let mut scheduler = ManualScheduler::new();
        assert!(prog.start(&mut scheduler));

        let p = prog.field.bubbles()[0].pos;
        let r = prog.field.bubbles()[0].radius();
        let count = prog.field.bubbles().len();

        prog.regions.push(Region {
            x: p.x - r,
            y: p.y - r,
            w: 2.0 * r,
            h: 2.0 * r,
        });

        let press = prog.pointer_event(p.x, p.y, true, 0);
        assert!(!prog.field.on_pointer_down(press));
        assert_eq!(prog.field.bubbles().len(), count);
    }

    #[test]
    fn headless_run_is_reproducible() {
        let mut a = program(&["bubblefield", "--seed", "77", "--frames", "120"]);
        let mut b = program(&["bubblefield", "--seed", "77", "--frames", "120"]);

        let sa = a.run_headless(120);
        let sb = b.run_headless(120);

        assert_eq!(sa, sb);
        assert_eq!(sa.frames, 120);
        assert_eq!(sa.surface, Some(SurfaceMode::Light));
        assert_eq!(a.field.bubbles(), b.field.bubbles());
    }

    #[test]
    fn background_sets_light_surface() {
        let mut prog = program(&["bubblefield", "--background", "10", "20", "30", "--frames", "1"]);
        prog.run_headless(1);

        assert_eq!(prog.pix.background(), 0xFF_0A_14_1E);
        assert_eq!(prog.field.palette(), &Palette::from_background([10, 20, 30]));
    }

    #[test]
    fn regions_are_outlined() {
        let mut prog = program(&["bubblefield", "--size", "200x200", "--exclude", "20x20+10+10"]);
        prog.draw_regions();

        assert!(prog.pix.pixel(10 * 200 + 10).alpha() > 0);
        assert_eq!(prog.pix.pixel(20 * 200 + 20), 0);
    }

    #[test]
    fn fps_is_clamped() {
        let mut prog = Program::new();
        prog.change_fps_frac(0);
        assert_eq!(prog.MILLI_HZ, 1);

        prog.change_fps_frac(1_000_000);
        assert_eq!(prog.MILLI_HZ, MAX_MILLI_HZ);

        prog.change_fps_frac(50_000);
        assert_eq!(prog.REFRESH_RATE, Duration::from_millis(20));
    }
}
