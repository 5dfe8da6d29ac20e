use super::surface::RasterSurface;

/// Bresenham walk from `(x0, y0)` to `(x1, y1)`, calling `plot` for every
/// pixel. The caller decides what a pixel means: a single set for thin
/// strokes, a disc stamp for wide ones.
pub fn walk_line(x0: i64, y0: i64, x1: i64, y1: i64, mut plot: impl FnMut(i64, i64)) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        plot(x, y);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;

        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }

        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Draw a filled disc
pub fn draw_disc(surface: &mut RasterSurface, cx: i64, cy: i64, radius: i64, value: u8) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                surface.set_signed(cx + dx, cy + dy, value);
            }
        }
    }
}

/// Stroke a segment roughly `width` pixels wide. Strokes narrower than two
/// pixels draw a plain Bresenham line; wider ones stamp a disc along it.
pub fn draw_stroke(surface: &mut RasterSurface, p0: (i64, i64), p1: (i64, i64), width: f64, value: u8) {
    let radius = ((width - 1.0) / 2.0).round() as i64;
    if radius <= 0 {
        walk_line(p0.0, p0.1, p1.0, p1.1, |x, y| surface.set_signed(x, y, value));
    } else {
        walk_line(p0.0, p0.1, p1.0, p1.1, |x, y| draw_disc(surface, x, y, radius, value));
    }
}
