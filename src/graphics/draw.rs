use super::{
    blend::{self, Mixer},
    draw_raw::*,
    gradient::RadialGradient,
    Argb, Pixel, PixelBuffer, Rgb, P2,
};
use crate::math::Cplx;

impl PixelBuffer {
    fn canvas(&mut self) -> (&mut [Argb], usize, usize) {
        let len = self.sizel();
        (&mut self.buffer[..len], self.width, self.height)
    }

    pub fn set_pixel_xy(&mut self, p: P2, c: Argb) {
        let b = self.mixer;
        self.set_pixel_xy_by(p, c, b);
    }

    pub fn set_pixel_xy_by(&mut self, p: P2, c: Argb, b: Mixer) {
        let (canvas, w, h) = self.canvas();
        Plot { p }.exec(canvas, w, h, c, b);
    }

    // Using Bresenham's line algorithm.
    pub fn draw_line(&mut self, ps: P2, pe: P2, c: Argb) {
        let b = self.mixer;
        let (canvas, w, h) = self.canvas();
        Line { ps, pe }.exec(canvas, w, h, c, b);
    }

    /// One pixel wide outline, corners inclusive.
    pub fn draw_rect_outline(&mut self, ps: P2, pe: P2, c: Argb) {
        let tr = P2::new(pe.x, ps.y);
        let bl = P2::new(ps.x, pe.y);

        self.draw_line(ps, tr, c);
        self.draw_line(tr, pe, c);
        self.draw_line(pe, bl, c);
        self.draw_line(bl, ps, c);
    }

    pub fn fill_circle(&mut self, center: Cplx, radius: f32, color: Rgb, alpha: f32) {
        let b = self.mixer;
        let (canvas, w, h) = self.canvas();
        Disc { p: center, r: radius }.exec(canvas, w, h, blend::rgba(color, alpha), b);
    }

    pub fn stroke_circle(&mut self, center: Cplx, radius: f32, width: f32, color: Rgb, alpha: f32) {
        let b = self.mixer;
        let (canvas, w, h) = self.canvas();
        Ring { p: center, r: radius, w: width }.exec(canvas, w, h, blend::rgba(color, alpha), b);
    }

    pub fn fill_circle_gradient(&mut self, center: Cplx, radius: f32, gradient: &RadialGradient) {
        let b = self.mixer;
        let (canvas, w, h) = self.canvas();
        draw_gradient_disc_by(canvas, w, h, gradient, b, Disc { p: center, r: radius });
    }
}
