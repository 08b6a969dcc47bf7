//! Drawing-surface abstraction consumed by the compositor
use crate::style::{LineStyle, ShapeStyle};

/// A position in pixel space, `(column, row)`
pub type ScreenPoint = (f64, f64);

/// Handle to a rasterized item on a canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

/// A retained-mode 2D drawing surface.
///
/// Items are stacked in creation order: an item drawn later covers the
/// items drawn before it. Nothing needs to become visible before `flush`.
pub trait Canvas {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn draw_rectangle(&mut self, p0: ScreenPoint, p1: ScreenPoint, style: &ShapeStyle) -> ItemId;

    fn draw_line(&mut self, p0: ScreenPoint, p1: ScreenPoint, style: &LineStyle) -> ItemId;

    fn draw_polygon(&mut self, points: &[ScreenPoint], style: &ShapeStyle) -> ItemId;

    /// Remove an item. Unknown handles are ignored.
    fn remove(&mut self, item: ItemId);

    /// Shift an item by a pixel offset. Unknown handles are ignored.
    fn move_by(&mut self, item: ItemId, dx: f64, dy: f64);

    fn flush(&mut self);
}

/// A shape retained by a [`DisplayList`]
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rectangle {
        p0: ScreenPoint,
        p1: ScreenPoint,
        style: ShapeStyle,
    },
    Line {
        p0: ScreenPoint,
        p1: ScreenPoint,
        style: LineStyle,
    },
    Polygon {
        points: Vec<ScreenPoint>,
        style: ShapeStyle,
    },
}

impl Shape {
    pub fn translate(&mut self, dx: f64, dy: f64) {
        let shift = |p: &mut ScreenPoint| {
            p.0 += dx;
            p.1 += dy;
        };
        match self {
            Shape::Rectangle { p0, p1, .. } | Shape::Line { p0, p1, .. } => {
                shift(p0);
                shift(p1);
            }
            Shape::Polygon { points, .. } => points.iter_mut().for_each(shift),
        }
    }

    pub fn points(&self) -> Vec<ScreenPoint> {
        match self {
            Shape::Rectangle { p0, p1, .. } | Shape::Line { p0, p1, .. } => vec![*p0, *p1],
            Shape::Polygon { points, .. } => points.clone(),
        }
    }
}

/// Headless canvas that keeps the stacked items in memory.
///
/// Useful on its own for inspecting what a scene would draw, and as the
/// backing store of pixel-producing canvases.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    width: u32,
    height: u32,
    next_id: u64,
    items: Vec<(ItemId, Shape)>,
    flushes: usize,
}

impl DisplayList {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Items bottom to top
    pub fn items(&self) -> &[(ItemId, Shape)] {
        &self.items
    }

    pub fn get(&self, item: ItemId) -> Option<&Shape> {
        self.items.iter().find(|(id, _)| *id == item).map(|(_, s)| s)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of times `flush` has been called
    pub fn flushes(&self) -> usize {
        self.flushes
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn push(&mut self, shape: Shape) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.push((id, shape));
        id
    }
}

impl Canvas for DisplayList {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn draw_rectangle(&mut self, p0: ScreenPoint, p1: ScreenPoint, style: &ShapeStyle) -> ItemId {
        self.push(Shape::Rectangle {
            p0,
            p1,
            style: *style,
        })
    }

    fn draw_line(&mut self, p0: ScreenPoint, p1: ScreenPoint, style: &LineStyle) -> ItemId {
        self.push(Shape::Line {
            p0,
            p1,
            style: *style,
        })
    }

    fn draw_polygon(&mut self, points: &[ScreenPoint], style: &ShapeStyle) -> ItemId {
        self.push(Shape::Polygon {
            points: points.to_vec(),
            style: *style,
        })
    }

    fn remove(&mut self, item: ItemId) {
        self.items.retain(|(id, _)| *id != item);
    }

    fn move_by(&mut self, item: ItemId, dx: f64, dy: f64) {
        if let Some((_, shape)) = self.items.iter_mut().find(|(id, _)| *id == item) {
            shape.translate(dx, dy);
        }
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_stack_in_creation_order() {
        let mut list = DisplayList::new(10, 10);
        let a = list.draw_line((0.0, 0.0), (1.0, 1.0), &LineStyle::default());
        let b = list.draw_rectangle((2.0, 2.0), (3.0, 3.0), &ShapeStyle::default());
        assert_eq!(list.items().iter().map(|(id, _)| *id).collect::<Vec<_>>(), vec![a, b]);

        list.remove(a);
        let c = list.draw_polygon(&[(0.0, 0.0), (4.0, 0.0), (0.0, 4.0)], &ShapeStyle::default());
        assert_eq!(list.items().iter().map(|(id, _)| *id).collect::<Vec<_>>(), vec![b, c]);
        assert_ne!(a, c);
    }

    #[test]
    fn test_move_by_shifts_every_point() {
        let mut list = DisplayList::new(10, 10);
        let tri = list.draw_polygon(&[(0.0, 0.0), (4.0, 0.0), (0.0, 4.0)], &ShapeStyle::default());
        list.move_by(tri, 1.5, -2.0);
        assert_eq!(
            list.get(tri).map(Shape::points),
            Some(vec![(1.5, -2.0), (5.5, -2.0), (1.5, 2.0)])
        );
        // Unknown handles are ignored
        list.move_by(ItemId(99), 1.0, 1.0);
        list.remove(ItemId(99));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_flush_is_counted() {
        let mut list = DisplayList::new(1, 1);
        assert_eq!(list.flushes(), 0);
        list.flush();
        list.flush();
        assert_eq!(list.flushes(), 2);
    }
}
