//! The bubble field: translucent circles drifting behind the page, pushed
//! around by the pointer, bouncing off each other and the window edges,
//! and popping into small bursts when hit too hard or clicked. Once every
//! bubble is gone the surface turns dark for good.

pub mod bubble;
pub mod config;
pub mod input;
pub mod palette;
pub mod physics;
pub mod pop;
pub mod render;
pub mod scheduler;
pub mod theme;

use bubble::Bubble;
use config::SimConfig;
use input::{Pointer, PointerEvent, Viewport};
use palette::Palette;
use physics::WallOutcome;
use pop::PopEffect;
use scheduler::{FrameHandle, FrameScheduler};
use theme::{SurfaceMode, ThemeSwitch};

use crate::data::delta::FrameClock;
use crate::graphics::{Argb, PixelBuffer};
use crate::math::{rng::BubbleRng, Cplx};

pub struct BubbleField {
    config: SimConfig,
    palette: Palette,
    rng: BubbleRng,

    viewport: Viewport,
    pointer: Pointer,

    bubbles: Vec<Bubble>,
    pop_effects: Vec<PopEffect>,

    /// Set once the first full population has been placed.
    populated: bool,
    exhausted: bool,
    hidden: bool,

    clock: FrameClock,
    pending_frame: Option<FrameHandle>,
    theme: ThemeSwitch,
}

impl BubbleField {
    pub fn new(config: SimConfig, palette: Palette, rng: BubbleRng) -> Self {
        Self {
            config,
            palette,
            rng,

            viewport: Viewport::default(),
            pointer: Pointer::default(),

            bubbles: Vec::with_capacity(config::MAX_BUBBLE_COUNT),
            pop_effects: Vec::new(),

            populated: false,
            exhausted: false,
            hidden: false,

            clock: FrameClock::new(),
            pending_frame: None,
            theme: ThemeSwitch::default(),
        }
    }

    /// Page color shown while bubbles remain.
    pub fn with_light_surface(mut self, color: Argb) -> Self {
        self.theme = ThemeSwitch::new(color, theme::SURFACE_DARK);
        self
    }

    /// Bind to a drawing surface and start the frame loop.
    ///
    /// Returns `false` without doing anything when there is nothing to draw
    /// on. Calling it again restarts the loop but keeps the bubbles.
    pub fn initialize<S: FrameScheduler + ?Sized>(
        &mut self,
        surface: Option<&PixelBuffer>,
        scheduler: &mut S,
    ) -> bool {
        let Some(surface) = surface else {
            debug!("Bubbles: no drawing surface.");
            return false;
        };

        if surface.is_empty() {
            debug!("Bubbles: drawing surface has no area.");
            return false;
        }

        self.viewport = Viewport::new(
            surface.width() as f32,
            surface.height() as f32,
            self.viewport.top_inset,
        );

        self.populate();

        if let Some(handle) = self.pending_frame.take() {
            scheduler.cancel_frame(handle);
        }
        self.pending_frame = Some(scheduler.request_frame());

        debug!(
            "Bubbles: {} on a {}x{} surface.",
            self.bubbles.len(),
            surface.width(),
            surface.height()
        );

        true
    }

    /// Fill the field up to its target count, unless that already happened
    /// once. A viewport with no room below the inset defers this.
    fn populate(&mut self) {
        if self.populated || self.exhausted || self.viewport.is_degenerate() {
            return;
        }

        let target = self.config.target_count(self.viewport.width);

        while self.bubbles.len() < target {
            let bubble = Bubble::spawn(&mut self.rng, &self.viewport, &self.config);
            self.bubbles.push(bubble);
        }

        self.populated = true;
    }

    /// One display refresh: schedule the next one, then advance and draw.
    pub fn on_frame<S: FrameScheduler + ?Sized>(
        &mut self,
        time: f64,
        pix: &mut PixelBuffer,
        scheduler: &mut S,
    ) {
        self.pending_frame = Some(scheduler.request_frame());

        if self.hidden {
            self.clock.skip(time);
            return;
        }

        let dt = self.clock.tick(time);

        self.step(time, dt);

        let mode = if self.exhausted {
            SurfaceMode::Dark
        } else {
            SurfaceMode::Light
        };
        self.theme.apply(mode, pix);

        pix.clear();

        for bubble in &self.bubbles {
            render::draw_bubble(pix, bubble, time, &self.palette);
        }

        let damping = self.config.particle_damping;
        self.pop_effects.retain_mut(|effect| effect.advance(dt, damping));

        for effect in &self.pop_effects {
            render::draw_pop_effect(pix, effect);
        }
    }

    /// Physics for one frame, up to removing whatever popped.
    fn step(&mut self, time: f64, dt: f32) {
        let config = &self.config;

        for bubble in self.bubbles.iter_mut() {
            bubble.advance_spawn(dt);
            physics::step_bubble(bubble, time, &self.pointer, config);
        }

        let mut popped = vec![false; self.bubbles.len()];

        physics::resolve_collisions(&mut self.bubbles, &mut popped, config);

        for (bubble, popped) in self.bubbles.iter_mut().zip(popped.iter_mut()) {
            if *popped {
                continue;
            }

            if physics::resolve_walls(bubble, &self.viewport, config) == WallOutcome::Popped {
                *popped = true;
            }
        }

        for i in (0..self.bubbles.len()).rev() {
            if popped[i] {
                self.pop(i);
            }
        }

        if self.populated && self.bubbles.is_empty() && !self.exhausted {
            self.exhausted = true;
            debug!("Bubbles: field exhausted.");
        }
    }

    fn pop(&mut self, index: usize) {
        let bubble = self.bubbles.remove(index);
        let effect = PopEffect::new(&mut self.rng, &bubble, self.palette.pop, &self.config);
        self.pop_effects.push(effect);
    }

    /// Index of the topmost bubble under `p`.
    fn bubble_at(&self, p: Cplx) -> Option<usize> {
        let scale = self.config.hit_radius_scale;
        self.bubbles.iter().rposition(|b| b.contains(p, scale))
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.pointer = Pointer {
            pos: Cplx::new(x, y),
            active: true,
        };
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer.active = false;
    }

    pub fn on_blur(&mut self) {
        self.pointer.active = false;
    }

    /// Pop the bubble under a main-button press. Returns whether one popped.
    pub fn on_pointer_down(&mut self, event: PointerEvent) -> bool {
        if !event.is_main_press() || event.target_is_interactive {
            return false;
        }

        let p = event.pos();

        if !self.viewport.contains(p) {
            return false;
        }

        match self.bubble_at(p) {
            Some(i) => {
                self.pop(i);
                true
            }
            None => false,
        }
    }

    pub fn on_resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height, self.viewport.top_inset);

        for bubble in self.bubbles.iter_mut() {
            bubble.clamp_into(&self.viewport);
        }

        self.populate();
    }

    /// Reserve `px` at the top for the navigation bar. Bubbles are pushed
    /// out of it by the next frame's wall pass.
    pub fn set_nav_inset(&mut self, px: f32) {
        self.viewport.top_inset = px.max(0.0);
    }

    pub fn on_visibility_change(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn pop_effects(&self) -> &[PopEffect] {
        &self.pop_effects
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn surface_mode(&self) -> Option<SurfaceMode> {
        self.theme.current()
    }

    pub fn surface_color(&self, mode: SurfaceMode) -> Argb {
        self.theme.color(mode)
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending_frame
    }
}
