use super::{blend::Mixer, gradient::RadialGradient, Argb, Pixel, P2};
use crate::math::Cplx;

macro_rules! make_struct {
	($i:item) => {
		#[derive(Clone)]
		$i
	}
}

make_struct!(pub struct Line {pub ps: P2, pub pe: P2});
make_struct!(pub struct Plot {pub p: P2});
make_struct!(pub struct Disc {pub p: Cplx, pub r: f32});
make_struct!(pub struct Ring {pub p: Cplx, pub r: f32, pub w: f32});

macro_rules! impl_param {
	($name:ty, $func:ident) => {
		impl $name {
			pub fn exec(self, canvas: &mut [Argb], cwidth: usize, cheight: usize, c: Argb, b: Mixer) {
				$func(canvas, cwidth, cheight, c, b, self);
			}
		}
	}
}

impl_param!(Line, draw_line_by);
impl_param!(Plot, set_pixel_xy_by);
impl_param!(Disc, draw_disc_by);
impl_param!(Ring, draw_ring_by);

fn index_of(cwidth: usize, cheight: usize, p: P2) -> Option<usize> {
    if p.x < 0 || p.y < 0 || p.x as usize >= cwidth || p.y as usize >= cheight {
        return None;
    }
    Some(p.y as usize * cwidth + p.x as usize)
}

/// Pixel rows and columns that a circle can touch, clipped to the canvas.
fn bounding_box(
    cwidth: usize,
    cheight: usize,
    p: Cplx,
    r: f32,
) -> Option<(usize, usize, usize, usize)> {
    if !(p.is_finite() && r.is_finite()) || r <= 0.0 {
        return None;
    }

    let xs = (p.x - r - 1.0).floor().max(0.0) as usize;
    let ys = (p.y - r - 1.0).floor().max(0.0) as usize;
    let xe = ((p.x + r + 1.0).ceil().max(0.0) as usize).min(cwidth);
    let ye = ((p.y + r + 1.0).ceil().max(0.0) as usize).min(cheight);

    (xs < xe && ys < ye).then_some((xs, ys, xe, ye))
}

/// Visit every pixel touched by a circle with its anti-aliased coverage.
fn for_each_covered(
    cwidth: usize,
    cheight: usize,
    p: Cplx,
    r: f32,
    mut f: impl FnMut(usize, Cplx, f32),
) {
    let Some((xs, ys, xe, ye)) = bounding_box(cwidth, cheight, p, r) else {
        return;
    };

    for y in ys..ye {
        for x in xs..xe {
            let sample = Cplx::new(x as f32 + 0.5, y as f32 + 0.5);
            let coverage = (r - (sample - p).mag() + 0.5).clamp(0.0, 1.0);

            if coverage > 0.0 {
                f(y * cwidth + x, sample, coverage);
            }
        }
    }
}

pub fn set_pixel_xy_by(
    canvas: &mut [Argb],
    cwidth: usize,
    cheight: usize,
    c: Argb,
    b: Mixer,
    param: Plot,
) {
    if let Some(p) = index_of(cwidth, cheight, param.p).and_then(|i| canvas.get_mut(i)) {
        *p = b(*p, c);
    }
}

// Using Bresenham's line algorithm.
pub fn draw_line_by(
    canvas: &mut [Argb],
    cwidth: usize,
    cheight: usize,
    c: Argb,
    b: Mixer,
    param: Line,
) {
    let ps = param.ps;
    let pe = param.pe;

    let dx = (pe.x - ps.x).abs();
    let sx = if ps.x < pe.x { 1 } else { -1 };
    let dy = -(pe.y - ps.y).abs();
    let sy = if ps.y < pe.y { 1 } else { -1 };
    let mut error = dx + dy;

    let mut p = ps;

    loop {
        set_pixel_xy_by(canvas, cwidth, cheight, c, b, Plot { p });

        if p.x == pe.x && p.y == pe.y {
            return;
        }
        let e2 = error * 2;

        if e2 >= dy {
            if p.x == pe.x {
                return;
            }
            error += dy;
            p.x += sx;
        }

        if e2 <= dx {
            if p.y == pe.y {
                return;
            }
            error += dx;
            p.y += sy;
        }
    }
}

pub fn draw_disc_by(
    canvas: &mut [Argb],
    cwidth: usize,
    cheight: usize,
    c: Argb,
    b: Mixer,
    param: Disc,
) {
    let alpha = c.alpha() as f32;

    for_each_covered(cwidth, cheight, param.p, param.r, |i, _, coverage| {
        let px = &mut canvas[i];
        *px = b(*px, c.set_alpha((alpha * coverage) as u8));
    });
}

pub fn draw_ring_by(
    canvas: &mut [Argb],
    cwidth: usize,
    cheight: usize,
    c: Argb,
    b: Mixer,
    param: Ring,
) {
    let half = param.w * 0.5;
    let alpha = c.alpha() as f32;

    for_each_covered(cwidth, cheight, param.p, param.r + half, |i, sample, _| {
        let d = (sample - param.p).mag();
        let coverage = (half - (d - param.r).abs() + 0.5).clamp(0.0, 1.0);

        if coverage > 0.0 {
            let px = &mut canvas[i];
            *px = b(*px, c.set_alpha((alpha * coverage) as u8));
        }
    });
}

/// Fill a disc, coloring each pixel from a radial gradient.
pub fn draw_gradient_disc_by(
    canvas: &mut [Argb],
    cwidth: usize,
    cheight: usize,
    gradient: &RadialGradient,
    b: Mixer,
    param: Disc,
) {
    for_each_covered(cwidth, cheight, param.p, param.r, |i, sample, coverage| {
        let c = gradient.color_at(sample);
        let a = c.alpha() as f32 * coverage;

        if a >= 1.0 {
            let px = &mut canvas[i];
            *px = b(*px, c.set_alpha(a as u8));
        }
    });
}
