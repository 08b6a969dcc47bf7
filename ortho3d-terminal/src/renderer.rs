//! Half-block pixel canvas for terminal rendering
use crossterm::{
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use ortho3d_core::{Canvas, Color, DisplayList, ItemId, LineStyle, ScreenPoint, Shape, ShapeStyle};
use std::io::Write;

/// Upper half block: the foreground paints the top pixel of a cell and the
/// background paints the bottom one.
const HALF_BLOCK: char = '▀';

/// A canvas backed by terminal cells, two pixels per cell stacked
/// vertically so that pixels come out roughly square.
///
/// Items are retained in a [`DisplayList`] and painted in stacking order
/// into the pixel buffer on `flush`.
pub struct TerminalCanvas {
    columns: usize,
    rows: usize,
    background: Color,
    items: DisplayList,
    pixels: Vec<Option<Color>>,
}

impl TerminalCanvas {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            background: Color::BLACK,
            items: DisplayList::new(columns as u32, (rows * 2) as u32),
            pixels: vec![None; columns * rows * 2],
        }
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Items retained for the next flush
    pub fn display_list(&self) -> &DisplayList {
        &self.items
    }

    /// Color at a pixel, `None` if nothing covers it
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.columns && y < self.rows * 2 {
            self.pixels[y * self.columns + x]
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        for pixel in &mut self.pixels {
            *pixel = None;
        }
    }

    fn paint_shape(&mut self, shape: &Shape) {
        match shape {
            Shape::Rectangle { p0, p1, style } => self.paint_rectangle(*p0, *p1, style),
            Shape::Line { p0, p1, style } => self.paint_line(*p0, *p1, style),
            Shape::Polygon { points, style } => self.paint_polygon(points, style),
        }
    }

    fn paint_rectangle(&mut self, p0: ScreenPoint, p1: ScreenPoint, style: &ShapeStyle) {
        let Some(color) = style.fill.or(style.outline) else {
            return;
        };
        if !is_finite(p0) || !is_finite(p1) {
            return;
        }
        let x0 = p0.0.min(p1.0).floor() as i64;
        let y0 = p0.1.min(p1.1).floor() as i64;
        // Always cover at least one pixel
        let x1 = (p0.0.max(p1.0).ceil() as i64).max(x0.saturating_add(1));
        let y1 = (p0.1.max(p1.1).ceil() as i64).max(y0.saturating_add(1));

        // Clip to canvas bounds
        let (x0, x1) = (x0.max(0), x1.min(self.columns as i64));
        let (y0, y1) = (y0.max(0), y1.min(self.rows as i64 * 2));
        for y in y0..y1 {
            for x in x0..x1 {
                self.put(x, y, color);
            }
        }
    }

    fn paint_line(&mut self, p0: ScreenPoint, p1: ScreenPoint, style: &LineStyle) {
        if !is_finite(p0) || !is_finite(p1) {
            return;
        }
        self.stroke(p0, p1, style.width, style.color);
        // Arrowheads are drawn as a blob one pixel wider than the line
        let head = style.width + 2;
        if style.arrow.at_first() {
            self.dab(p0, head, style.color);
        }
        if style.arrow.at_last() {
            self.dab(p1, head, style.color);
        }
    }

    fn paint_polygon(&mut self, points: &[ScreenPoint], style: &ShapeStyle) {
        if points.len() < 3 {
            return;
        }

        if let Some(fill) = style.fill {
            for i in 1..points.len() - 1 {
                self.fill_triangle([points[0], points[i], points[i + 1]], fill);
            }
        }

        if let Some(outline) = style.outline {
            for i in 0..points.len() {
                let next = points[(i + 1) % points.len()];
                self.stroke(points[i], next, style.width, outline);
            }
        }
    }

    fn fill_triangle(&mut self, v: [ScreenPoint; 3], color: Color) {
        let [v0, v1, v2] = v;

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i64;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i64;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i64;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i64;

        // Clip to canvas bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.columns as i64 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.rows as i64 * 2 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f64 + 0.5, y as f64 + 0.5);
                if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, p) {
                    // Accept either winding
                    let inside = (w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0)
                        || (w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0);
                    if inside {
                        self.put(x, y, color);
                    }
                }
            }
        }
    }

    /// Step along the visible part of the segment one pixel at a time.
    fn stroke(&mut self, p0: ScreenPoint, p1: ScreenPoint, width: u32, color: Color) {
        // Keep a brush width of slack so strokes just outside still bleed in
        let margin = width.max(1) as f64;
        let max = (
            self.columns as f64 + margin,
            (self.rows * 2) as f64 + margin,
        );
        let Some((p0, p1)) = clip_segment(p0, p1, (-margin, -margin), max) else {
            return;
        };

        let (dx, dy) = (p1.0 - p0.0, p1.1 - p0.1);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.dab((p0.0 + t * dx, p0.1 + t * dy), width, color);
        }
    }

    /// Paint a square brush of `size` pixels centered on `p`.
    fn dab(&mut self, p: ScreenPoint, size: u32, color: Color) {
        if !is_finite(p) {
            return;
        }
        let size = size.max(1) as i64;
        let x0 = (p.0.floor() as i64).saturating_sub((size - 1) / 2);
        let y0 = (p.1.floor() as i64).saturating_sub((size - 1) / 2);
        let x1 = x0.saturating_add(size).min(self.columns as i64);
        let y1 = y0.saturating_add(size).min(self.rows as i64 * 2);
        for y in y0.max(0)..y1 {
            for x in x0.max(0)..x1 {
                self.put(x, y, color);
            }
        }
    }

    fn put(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.columns as i64 || y >= self.rows as i64 * 2 {
            return;
        }
        self.pixels[y as usize * self.columns + x as usize] = Some(color);
    }

    /// Queue the pixel buffer to a terminal writer, one row of cells per line.
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in 0..self.rows {
            for x in 0..self.columns {
                let top = self.pixels[2 * row * self.columns + x].unwrap_or(self.background);
                let bottom = self.pixels[(2 * row + 1) * self.columns + x].unwrap_or(self.background);

                writer.queue(SetForegroundColor(term_color(top)))?;
                writer.queue(SetBackgroundColor(term_color(bottom)))?;
                writer.queue(Print(HALF_BLOCK))?;
            }
            writer.queue(ResetColor)?;
            if row + 1 < self.rows {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Canvas for TerminalCanvas {
    fn width(&self) -> u32 {
        self.columns as u32
    }

    fn height(&self) -> u32 {
        (self.rows * 2) as u32
    }

    fn draw_rectangle(&mut self, p0: ScreenPoint, p1: ScreenPoint, style: &ShapeStyle) -> ItemId {
        self.items.draw_rectangle(p0, p1, style)
    }

    fn draw_line(&mut self, p0: ScreenPoint, p1: ScreenPoint, style: &LineStyle) -> ItemId {
        self.items.draw_line(p0, p1, style)
    }

    fn draw_polygon(&mut self, points: &[ScreenPoint], style: &ShapeStyle) -> ItemId {
        self.items.draw_polygon(points, style)
    }

    fn remove(&mut self, item: ItemId) {
        self.items.remove(item);
    }

    fn move_by(&mut self, item: ItemId, dx: f64, dy: f64) {
        self.items.move_by(item, dx, dy);
    }

    fn flush(&mut self) {
        self.clear();
        let shapes: Vec<Shape> = self.items.items().iter().map(|(_, s)| s.clone()).collect();
        for shape in &shapes {
            self.paint_shape(shape);
        }
        self.items.flush();
    }
}

fn term_color(c: Color) -> TermColor {
    TermColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

fn is_finite(p: ScreenPoint) -> bool {
    p.0.is_finite() && p.1.is_finite()
}

/// Liang-Barsky clip of the segment `p0`-`p1` to the box `min`..`max`.
///
/// Returns `None` when nothing of the segment is inside or an endpoint is
/// not finite.
fn clip_segment(
    p0: ScreenPoint,
    p1: ScreenPoint,
    min: ScreenPoint,
    max: ScreenPoint,
) -> Option<(ScreenPoint, ScreenPoint)> {
    if !is_finite(p0) || !is_finite(p1) {
        return None;
    }
    let (dx, dy) = (p1.0 - p0.0, p1.1 - p0.1);
    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    let edges = [
        (-dx, p0.0 - min.0),
        (dx, max.0 - p0.0),
        (-dy, p0.1 - min.1),
        (dy, max.1 - p0.1),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            // Parallel to this edge and outside it
            if q < 0.0 {
                return None;
            }
        } else if p < 0.0 {
            t0 = t0.max(q / p);
        } else {
            t1 = t1.min(q / p);
        }
    }

    (t0 <= t1).then(|| {
        (
            (p0.0 + t0 * dx, p0.1 + t0 * dy),
            (p0.0 + t1 * dx, p0.1 + t1 * dy),
        )
    })
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f64, f64),
    v1: (f64, f64),
    v2: (f64, f64),
    p: (f64, f64),
) -> Option<(f64, f64, f64)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-9 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
