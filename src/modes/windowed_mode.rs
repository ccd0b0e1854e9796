use softbuffer::{Context, SoftBufferError, Surface};

use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Icon, Theme, Window, WindowId},
};

use std::{
    num::NonZeroU32,
    sync::mpsc::{self, SyncSender},
    thread,
};

use crate::bubbles::{
    bubble::Bubble,
    input::PRIMARY_BUTTON,
    palette::Palette,
    render,
    scheduler::{FrameHandle, FrameScheduler},
    theme::SurfaceMode,
};
use crate::data::{delta::Timeline, Program};
use crate::graphics::{Pixel, PixelBuffer};
use crate::math::Cplx;

type WindowSurface = Surface<&'static Window, &'static Window>;

const ICON_SIZE: u32 = 64;

/// Frame requests wait here until the pacing thread triggers a redraw.
#[derive(Debug, Default)]
struct RedrawScheduler {
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl FrameScheduler for RedrawScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle::new(self.next_id);
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

impl RedrawScheduler {
    fn take_due(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }
}

struct WindowState {
    pub prog: Program,
    pub window: Option<&'static Window>,
    pub surface: Option<WindowSurface>,
    pub exit_sender: Option<SyncSender<()>>,
    pub final_buffer_size: PhysicalSize<u32>,

    scheduler: RedrawScheduler,
    timeline: Timeline,
    cursor: Option<PhysicalPosition<f64>>,
    started: bool,
}

impl ApplicationHandler for WindowState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let (w, h) = self.prog.window_size();
        let win_size = PhysicalSize::<u32>::new(w as u32, h as u32);

        let icon = Icon::from_rgba(bubble_icon(), ICON_SIZE, ICON_SIZE)
            .inspect_err(|e| alert!("Failed to create window icon: {e}"))
            .ok();

        let window_attributes = Window::default_attributes()
            .with_title("bubblefield")
            .with_inner_size(win_size)
            .with_theme(Some(Theme::Light))
            .with_window_icon(icon);

        // The window is leaked into a static reference, so a second
        // resume keeps the first window instead of leaking another.
        let window: &'static Window = match self.window {
            None => match event_loop.create_window(window_attributes) {
                Ok(window) => Box::leak(Box::new(window)),
                Err(e) => error!("Unable to create a window: {e}"),
            },

            Some(_) => {
                debug!("Resumed again, keeping the current window.");
                return;
            }
        };

        self.window = Some(window);

        let size = window.inner_size();
        self.final_buffer_size = size;
        self.resize_program(size);

        self.surface = Self::create_surface(window, size)
            .inspect_err(|e| alert!("Unable to create a drawing surface: {e}"))
            .ok();

        if self.surface.is_some() {
            self.start();
        } else {
            // Without a surface the field refuses to start and stays idle.
            self.prog.field.initialize(None, &mut self.scheduler);
        }

        let (exit_send, exit_recv) = mpsc::sync_channel(1);

        self.exit_sender = Some(exit_send);

        let interval = self.prog.REFRESH_RATE;

        // Thread to control requesting redraws.
        let _ = thread::Builder::new()
            .stack_size(1 << 16)
            .spawn(move || loop {
                if exit_recv.recv_timeout(interval).is_ok() {
                    break;
                }

                if !window.is_minimized().unwrap_or(false) {
                    window.request_redraw();
                }
            });
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some(position);
                self.prog
                    .field
                    .on_pointer_move(position.x as f32, position.y as f32);
            }

            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.prog.field.on_pointer_leave();
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => {
                let Some(position) = self.cursor else {
                    return;
                };

                let (x, y) = (position.x as f32, position.y as f32);
                let press = self.prog.pointer_event(x, y, true, dom_button(button));

                if self.prog.field.on_pointer_down(press) {
                    debug!("Popped a bubble at ({:.0}, {:.0}).", x, y);
                }
            }

            WindowEvent::Focused(focused) => {
                if !focused {
                    self.prog.field.on_blur();
                }

                if let Some(w) = self.window.as_ref() {
                    w.request_redraw()
                }
            }

            WindowEvent::Occluded(b) => {
                self.prog.field.on_visibility_change(b);
            }

            WindowEvent::Resized(size) => {
                self.final_buffer_size = size;
                self.resize_program(size);

                let Some(surface) = self.surface.as_mut() else {
                    return;
                };

                if let Err(e) = Self::resize_surface(surface, size.width, size.height) {
                    alert!("Unable to resize the drawing surface: {e}");
                    return;
                }

                if !self.started {
                    self.start();
                }
            }

            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                if let Key::Named(NamedKey::Escape) = event.logical_key.as_ref() {
                    event_loop.exit()
                }
            }

            WindowEvent::RedrawRequested => {
                let Some(window) = self.window.as_ref() else {
                    return;
                };

                if self.scheduler.take_due().is_none() {
                    return;
                }

                let before = self.prog.field.surface_mode();
                self.prog.render(self.timeline.now_ms(), &mut self.scheduler);
                let after = self.prog.field.surface_mode();

                if before != after {
                    window.set_theme(after.map(window_theme));
                }

                let Some(surface) = self.surface.as_mut() else {
                    return;
                };

                match surface.buffer_mut() {
                    Ok(mut buffer) => {
                        self.prog
                            .pix
                            .present_to(&mut buffer, self.final_buffer_size.width as usize);

                        window.pre_present_notify();
                        if let Err(e) = buffer.present() {
                            alert!("Failing to present buffers to the window: {e}.");
                        }
                    }

                    Err(e) => alert!("Unable to access the window buffer: {e}."),
                }
            }

            _ => {}
        }
    }
}

impl WindowState {
    fn start(&mut self) {
        self.started = self.prog.start(&mut self.scheduler);

        if self.started {
            debug!("Placed {} bubbles.", self.prog.field.bubbles().len());
        } else {
            debug!("Window has no room for bubbles yet.");
        }
    }

    fn resize_program(&mut self, size: PhysicalSize<u32>) {
        let w = size.width.min(u16::MAX as u32) as u16;
        let h = size.height.min(u16::MAX as u32) as u16;

        self.prog.update_size((w, h));
        self.prog.field.on_resize(w as f32, h as f32);
    }

    fn create_surface(
        window: &'static Window,
        size: PhysicalSize<u32>,
    ) -> Result<WindowSurface, SoftBufferError> {
        let context = Context::new(window)?;
        let mut surface = Surface::new(&context, window)?;

        Self::resize_surface(&mut surface, size.width, size.height)?;

        Ok(surface)
    }

    /// Zero sized surfaces are left as they are until the window grows.
    fn resize_surface(surface: &mut WindowSurface, w: u32, h: u32) -> Result<(), SoftBufferError> {
        match (NonZeroU32::new(w), NonZeroU32::new(h)) {
            (Some(w), Some(h)) => surface.resize(w, h),
            _ => Ok(()),
        }
    }
}

/// Button numbering of pointer events: main, auxiliary, secondary, back, forward.
fn dom_button(button: MouseButton) -> i16 {
    match button {
        MouseButton::Left => PRIMARY_BUTTON,
        MouseButton::Middle => 1,
        MouseButton::Right => 2,
        MouseButton::Back => 3,
        MouseButton::Forward => 4,
        MouseButton::Other(n) => n.min(i16::MAX as u16) as i16,
    }
}

fn window_theme(mode: SurfaceMode) -> Theme {
    match mode {
        SurfaceMode::Light => Theme::Light,
        SurfaceMode::Dark => Theme::Dark,
    }
}

/// A single bubble on a white disc, drawn with the same code as the field.
fn bubble_icon() -> Vec<u8> {
    let size = ICON_SIZE as usize;
    let mut pix = PixelBuffer::new(size, size);
    pix.set_background(u32::trans());

    let palette = Palette::default();
    let center = Cplx::new(size as f32 * 0.5, size as f32 * 0.5);
    let radius = size as f32 * 0.45;

    let mut bubble = Bubble::new(center, radius);
    bubble.alpha = 1.0;

    pix.fill_circle(center, radius, [255, 255, 255], 1.0);
    render::draw_bubble(&mut pix, &bubble, 0.0, &palette);
    pix.stroke_circle(center, radius - 1.0, 2.0, palette.body_edge, 0.8);

    pix.to_rgba()
}

pub fn winit_main(prog: Program) {
    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => error!("Unable to start the event loop: {e}"),
    };

    let mut state = WindowState {
        prog,
        window: None,
        surface: None,
        exit_sender: None,
        final_buffer_size: PhysicalSize::<u32>::new(0, 0),

        scheduler: RedrawScheduler::default(),
        timeline: Timeline::new(),
        cursor: None,
        started: false,
    };

    event_loop.set_control_flow(ControlFlow::Wait);

    if let Err(e) = event_loop.run_app(&mut state) {
        alert!("Event loop stopped with an error: {e}");
    }

    state.exit_sender.as_ref().map(|x| x.send(()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redraw_scheduler_serves_latest_request() {
        let mut s = RedrawScheduler::default();
        let a = s.request_frame();
        let b = s.request_frame();

        assert_ne!(a, b);
        s.cancel_frame(a);
        assert_eq!(s.take_due(), Some(b));
        assert_eq!(s.take_due(), None);
    }

    #[test]
    fn canceled_request_is_not_served() {
        let mut s = RedrawScheduler::default();
        let a = s.request_frame();
        s.cancel_frame(a);
        assert_eq!(s.take_due(), None);
    }

    #[test]
    fn mouse_buttons_follow_pointer_numbering() {
        assert_eq!(dom_button(MouseButton::Left), PRIMARY_BUTTON);
        assert_eq!(dom_button(MouseButton::Right), 2);
        assert_eq!(dom_button(MouseButton::Other(9)), 9);
    }

    #[test]
    fn icon_has_transparent_corners() {
        let icon = bubble_icon();
        assert_eq!(icon.len(), (ICON_SIZE * ICON_SIZE * 4) as usize);

        // Top left corner lies outside the disc.
        assert_eq!(icon[3], 0);

        let mid = ((ICON_SIZE / 2) * ICON_SIZE + ICON_SIZE / 2) as usize * 4;
        assert_eq!(icon[mid + 3], 255);
    }
}
