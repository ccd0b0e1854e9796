pub mod blend;
pub mod draw;
pub mod draw_raw;
pub mod gradient;

use blend::Mixer;

use crate::math::Vec2;

pub type Argb = u32;
pub type Rgb = [u8; 3];
pub type P2 = Vec2<i32>;

pub(crate) trait Pixel: Copy + Clone + Sized + std::fmt::Debug {
    fn white() -> Self;
    fn trans() -> Self;

    fn over(self, other: Self) -> Self;
    fn mix(self, other: Self) -> Self;

    fn set_alpha(self, alpha: u8) -> Self;

    fn alpha(self) -> u8;

    fn decompose(self) -> [u8; 4];
    fn compose(array: [u8; 4]) -> Self;
}

/// Software framebuffer the bubble field draws into.
///
/// Pixels are non-premultiplied ARGB and start out transparent. They are
/// composited over `background` only when copied to the window, so the
/// background can change (the surface theme) without redrawing.
pub struct PixelBuffer {
    buffer: Vec<Argb>,
    width: usize,
    height: usize,

    mixer: Mixer,

    background: Argb,
}

impl PixelBuffer {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            buffer: vec![Argb::trans(); w * h],
            width: w,
            height: h,

            mixer: u32::mix,

            background: Argb::white(),
        }
    }

    pub fn set_background(&mut self, bg: Argb) {
        self.background = bg;
    }

    pub fn background(&self) -> Argb {
        self.background
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn sizel(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.sizel() == 0
    }

    pub fn as_slice(&self) -> &[Argb] {
        &self.buffer[..self.sizel()]
    }

    pub fn clear(&mut self) {
        self.buffer.fill(Argb::trans());
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        let len = w * h;
        if len > self.buffer.len() {
            self.buffer.resize(len, Argb::trans());
        }
        self.width = w;
        self.height = h;
    }

    pub fn pixel(&self, i: usize) -> Argb {
        self.buffer[i]
    }

    /// Composite the frame over the background into `dest`, a window
    /// surface `dst_width` pixels wide. Rows and columns that do not exist
    /// on either side are skipped.
    pub fn present_to(&self, dest: &mut [Argb], dst_width: usize) {
        if self.width == 0 || dst_width == 0 {
            return;
        }

        let background = self.background;

        self.as_slice()
            .chunks_exact(self.width) // source lines
            .zip(dest.chunks_exact_mut(dst_width)) // with destination lines
            .flat_map(|(src_row, dst_row)| src_row.iter().zip(dst_row.iter_mut()))
            .for_each(|(src_pixel, dst_pixel)| *dst_pixel = background.mix(*src_pixel));
    }

    /// Straight RGBA bytes of the frame composited over the background.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.as_slice()
            .iter()
            .flat_map(|&p| {
                let [a, r, g, b] = self.background.mix(p).decompose();
                [r, g, b, a]
            })
            .collect()
    }
}
