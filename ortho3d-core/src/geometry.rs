//! Drawable primitives in 3D space
use std::fmt;

use crate::canvas::{Canvas, ItemId};
use crate::error::Result;
use crate::scene::View;
use crate::style::{ArrowMode, Color, LineStyle, ShapeStyle};
use crate::vector::Vector3;

/// Capabilities shared by everything a [`Scene`](crate::Scene) can draw.
pub trait Drawable {
    /// The point used for depth ordering, `None` for flat 2D overlays.
    fn centroid(&self) -> Option<Vector3>;

    /// Project through `view` and issue the draw call on `canvas`.
    fn rasterize(&self, canvas: &mut dyn Canvas, view: &View) -> ItemId;

    /// Translate all owned coordinates in place.
    fn translate(&mut self, dx: f64, dy: f64, dz: f64);

    /// Projected depth of the centroid through the surface's `view`;
    /// larger is farther away.
    ///
    /// Objects without a centroid, and objects not on any surface
    /// (`view` is `None`), report negative infinity.
    fn depth(&self, view: Option<&View>) -> f64 {
        match (self.centroid(), view) {
            (Some(c), Some(view)) => view.project(c.x, c.y, c.z).2,
            _ => f64::NEG_INFINITY,
        }
    }

    /// Pixel position tracked by incremental moves.
    fn screen_anchor(&self, view: &View) -> (f64, f64) {
        let c = self.centroid().unwrap_or_default();
        view.to_screen_3d(c.x, c.y, c.z)
    }
}

/// A single point
#[derive(Debug, Clone, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    style: ShapeStyle,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            style: ShapeStyle::default(),
        }
    }

    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    pub fn set_fill(&mut self, color: Color) {
        self.style.fill = Some(color);
    }

    pub fn set_outline(&mut self, color: Color) {
        self.style.outline = Some(color);
    }

    pub fn to_vector(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<Vector3> for Point3 {
    fn from(v: Vector3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Point3> for Vector3 {
    fn from(p: Point3) -> Self {
        p.to_vector()
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point3({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Drawable for Point3 {
    fn centroid(&self) -> Option<Vector3> {
        Some(self.to_vector())
    }

    fn rasterize(&self, canvas: &mut dyn Canvas, view: &View) -> ItemId {
        let (x, y) = view.to_screen_3d(self.x, self.y, self.z);
        canvas.draw_rectangle((x, y), (x + 1.0, y + 1.0), &self.style)
    }

    fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }
}

/// A line segment between two owned points
#[derive(Debug, Clone, PartialEq)]
pub struct Segment3 {
    p1: Point3,
    p2: Point3,
    style: LineStyle,
}

impl Segment3 {
    pub fn new(p1: &Point3, p2: &Point3) -> Self {
        Self {
            p1: p1.clone(),
            p2: p2.clone(),
            style: LineStyle::default(),
        }
    }

    pub fn p1(&self) -> Point3 {
        self.p1.clone()
    }

    pub fn p2(&self) -> Point3 {
        self.p2.clone()
    }

    /// Midpoint of the segment
    pub fn center(&self) -> Point3 {
        Point3::from(0.5 * (self.p1.to_vector() + self.p2.to_vector()))
    }

    pub fn style(&self) -> &LineStyle {
        &self.style
    }

    pub fn set_color(&mut self, color: Color) {
        self.style.color = color;
    }

    pub fn set_width(&mut self, width: u32) {
        self.style.width = width;
    }

    pub fn set_arrow_mode(&mut self, mode: ArrowMode) {
        self.style.arrow = mode;
    }

    /// Set the arrow mode by name: `none`, `first`, `last` or `both`.
    pub fn set_arrow(&mut self, option: &str) -> Result<()> {
        self.style.arrow = option.parse()?;
        Ok(())
    }
}

impl fmt::Display for Segment3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Segment3({}, {})", self.p1, self.p2)
    }
}

impl Drawable for Segment3 {
    fn centroid(&self) -> Option<Vector3> {
        Some(self.center().to_vector())
    }

    fn rasterize(&self, canvas: &mut dyn Canvas, view: &View) -> ItemId {
        let a = view.to_screen_3d(self.p1.x, self.p1.y, self.p1.z);
        let b = view.to_screen_3d(self.p2.x, self.p2.y, self.p2.z);
        canvas.draw_line(a, b, &self.style)
    }

    fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.p1.translate(dx, dy, dz);
        self.p2.translate(dx, dy, dz);
    }
}

/// A filled triangle over three owned points
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle3 {
    p1: Point3,
    p2: Point3,
    p3: Point3,
    style: ShapeStyle,
}

impl Triangle3 {
    pub fn new(p1: &Point3, p2: &Point3, p3: &Point3) -> Self {
        Self {
            p1: p1.clone(),
            p2: p2.clone(),
            p3: p3.clone(),
            style: ShapeStyle::default(),
        }
    }

    pub fn p1(&self) -> Point3 {
        self.p1.clone()
    }

    pub fn p2(&self) -> Point3 {
        self.p2.clone()
    }

    pub fn p3(&self) -> Point3 {
        self.p3.clone()
    }

    pub fn vertices(&self) -> [Vector3; 3] {
        [self.p1.to_vector(), self.p2.to_vector(), self.p3.to_vector()]
    }

    /// Unweighted average of the vertices
    pub fn center(&self) -> Point3 {
        let [a, b, c] = self.vertices();
        let sum = a + b + c;
        Point3::new(sum.x / 3.0, sum.y / 3.0, sum.z / 3.0)
    }

    pub fn area(&self) -> f64 {
        let [a, b, c] = self.vertices();
        0.5 * (b - a).cross(c - a).magnitude()
    }

    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    pub fn set_fill(&mut self, color: Color) {
        self.style.fill = Some(color);
    }

    pub fn set_outline(&mut self, color: Color) {
        self.style.outline = Some(color);
    }

    pub fn clear_outline(&mut self) {
        self.style.outline = None;
    }

    pub fn set_width(&mut self, width: u32) {
        self.style.width = width;
    }
}

impl fmt::Display for Triangle3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Triangle3({}, {}, {})", self.p1, self.p2, self.p3)
    }
}

impl Drawable for Triangle3 {
    fn centroid(&self) -> Option<Vector3> {
        Some(self.center().to_vector())
    }

    fn rasterize(&self, canvas: &mut dyn Canvas, view: &View) -> ItemId {
        let points = [&self.p1, &self.p2, &self.p3].map(|p| view.to_screen_3d(p.x, p.y, p.z));
        canvas.draw_polygon(&points, &self.style)
    }

    fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.p1.translate(dx, dy, dz);
        self.p2.translate(dx, dy, dz);
        self.p3.translate(dx, dy, dz);
    }
}

/// A flat rectangle on the projection plane, unaffected by the camera.
///
/// Overlays have no depth and are always painted after the 3D primitives.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    style: ShapeStyle,
}

impl Overlay {
    /// Rectangle spanning two opposite corners in projection-plane units.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            style: ShapeStyle::default(),
        }
    }

    pub fn corners(&self) -> ((f64, f64), (f64, f64)) {
        ((self.x1, self.y1), (self.x2, self.y2))
    }

    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    pub fn set_fill(&mut self, color: Color) {
        self.style.fill = Some(color);
    }

    pub fn set_outline(&mut self, color: Color) {
        self.style.outline = Some(color);
    }
}

impl Drawable for Overlay {
    fn centroid(&self) -> Option<Vector3> {
        None
    }

    fn rasterize(&self, canvas: &mut dyn Canvas, view: &View) -> ItemId {
        let p0 = view.to_screen(self.x1, self.y1);
        let p1 = view.to_screen(self.x2, self.y2);
        canvas.draw_rectangle(p0, p1, &self.style)
    }

    /// Moves on the projection plane; `dz` has no meaning for overlays.
    fn translate(&mut self, dx: f64, dy: f64, _dz: f64) {
        self.x1 += dx;
        self.x2 += dx;
        self.y1 += dy;
        self.y2 += dy;
    }

    fn screen_anchor(&self, view: &View) -> (f64, f64) {
        view.to_screen(self.x1, self.y1)
    }
}

/// Any primitive a scene can hold
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Point(Point3),
    Segment(Segment3),
    Triangle(Triangle3),
    Overlay(Overlay),
}

impl Primitive {
    fn as_drawable(&self) -> &dyn Drawable {
        match self {
            Primitive::Point(p) => p,
            Primitive::Segment(s) => s,
            Primitive::Triangle(t) => t,
            Primitive::Overlay(o) => o,
        }
    }

    fn as_drawable_mut(&mut self) -> &mut dyn Drawable {
        match self {
            Primitive::Point(p) => p,
            Primitive::Segment(s) => s,
            Primitive::Triangle(t) => t,
            Primitive::Overlay(o) => o,
        }
    }
}

impl Drawable for Primitive {
    fn centroid(&self) -> Option<Vector3> {
        self.as_drawable().centroid()
    }

    fn rasterize(&self, canvas: &mut dyn Canvas, view: &View) -> ItemId {
        self.as_drawable().rasterize(canvas, view)
    }

    fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.as_drawable_mut().translate(dx, dy, dz)
    }

    fn depth(&self, view: Option<&View>) -> f64 {
        self.as_drawable().depth(view)
    }

    fn screen_anchor(&self, view: &View) -> (f64, f64) {
        self.as_drawable().screen_anchor(view)
    }
}

impl From<Point3> for Primitive {
    fn from(p: Point3) -> Self {
        Primitive::Point(p)
    }
}

impl From<Segment3> for Primitive {
    fn from(s: Segment3) -> Self {
        Primitive::Segment(s)
    }
}

impl From<Triangle3> for Primitive {
    fn from(t: Triangle3) -> Self {
        Primitive::Triangle(t)
    }
}

impl From<Overlay> for Primitive {
    fn from(o: Overlay) -> Self {
        Primitive::Overlay(o)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DisplayList, Shape};
    use crate::error::Error;
    use crate::projection::Camera;

    #[test]
    fn test_centroids() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(2.0, 4.0, -6.0);
        let c = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(a.centroid(), Some(Vector3::ZERO));
        assert_eq!(Segment3::new(&a, &b).centroid(), Some(Vector3::new(1.0, 2.0, -3.0)));
        assert_eq!(Triangle3::new(&a, &b, &c).centroid(), Some(Vector3::new(1.0, 2.0, -1.0)));
        assert_eq!(Overlay::new(0.0, 0.0, 1.0, 1.0).centroid(), None);
    }

    #[test]
    fn test_depth_through_camera() {
        let view = View::new(Some(Camera::default()), None);
        // Looking along -x, so depth is -x
        assert_eq!(Point3::new(4.0, 1.0, 1.0).depth(Some(&view)), -4.0);
        assert_eq!(Overlay::new(0.0, 0.0, 1.0, 1.0).depth(Some(&view)), f64::NEG_INFINITY);
        // Without a camera the projection is the identity
        assert_eq!(Point3::new(4.0, 1.0, 7.0).depth(Some(&View::default())), 7.0);
    }

    #[test]
    fn test_depth_off_surface_is_negative_infinity() {
        let point = Point3::new(4.0, 1.0, 7.0);
        let tri = Triangle3::new(
            &point,
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 2.0, 3.0),
        );
        assert_eq!(point.depth(None), f64::NEG_INFINITY);
        assert_eq!(tri.depth(None), f64::NEG_INFINITY);
        assert_eq!(Primitive::from(tri).depth(None), f64::NEG_INFINITY);
    }

    #[test]
    fn test_translate_moves_all_vertices() {
        let mut tri = Triangle3::new(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(0.0, 1.0, 0.0),
        );
        tri.translate(1.0, 2.0, 3.0);
        assert_eq!(
            tri.vertices(),
            [
                Vector3::new(1.0, 2.0, 3.0),
                Vector3::new(2.0, 2.0, 3.0),
                Vector3::new(1.0, 3.0, 3.0),
            ]
        );
    }

    #[test]
    fn test_segment_owns_copies() {
        let mut a = Point3::new(0.0, 0.0, 0.0);
        let seg = Segment3::new(&a, &Point3::new(1.0, 1.0, 1.0));
        a.translate(5.0, 5.0, 5.0);
        assert_eq!(Vector3::from(seg.p1()), Vector3::ZERO);
    }

    #[test]
    fn test_invalid_arrow_leaves_mode_unchanged() {
        let mut seg = Segment3::new(&Point3::new(0.0, 0.0, 0.0), &Point3::new(1.0, 0.0, 0.0));
        seg.set_arrow("last").unwrap();
        let err = seg.set_arrow("diagonal").unwrap_err();
        assert!(matches!(err, Error::InvalidOption { option: "arrow", .. }));
        assert_eq!(seg.style().arrow, ArrowMode::Last);
    }

    #[test]
    fn test_clone_is_deep() {
        let mut tri = Triangle3::new(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(0.0, 1.0, 0.0),
        );
        tri.set_fill(Color::RED);
        let copy = tri.clone();
        tri.translate(1.0, 1.0, 1.0);
        tri.set_fill(Color::BLUE);
        assert_eq!(copy.style().fill, Some(Color::RED));
        assert_eq!(copy.p1().to_vector(), Vector3::ZERO);
    }

    #[test]
    fn test_rasterize_issues_matching_draw_calls() {
        let view = View::default();
        let mut canvas = DisplayList::new(10, 10);
        let a = Point3::new(1.0, 2.0, 0.0);
        let b = Point3::new(3.0, 4.0, 0.0);
        let c = Point3::new(5.0, 2.0, 0.0);

        let pt = a.rasterize(&mut canvas, &view);
        let seg = Segment3::new(&a, &b).rasterize(&mut canvas, &view);
        let tri = Triangle3::new(&a, &b, &c).rasterize(&mut canvas, &view);

        assert!(matches!(canvas.get(pt), Some(Shape::Rectangle { .. })));
        assert_eq!(canvas.get(pt).map(Shape::points), Some(vec![(1.0, 2.0), (2.0, 3.0)]));
        assert!(matches!(canvas.get(seg), Some(Shape::Line { .. })));
        assert_eq!(canvas.get(seg).map(Shape::points), Some(vec![(1.0, 2.0), (3.0, 4.0)]));
        assert_eq!(
            canvas.get(tri).map(Shape::points),
            Some(vec![(1.0, 2.0), (3.0, 4.0), (5.0, 2.0)])
        );
    }

    #[test]
    fn test_triangle_area() {
        let tri = Triangle3::new(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(4.0, 0.0, 0.0),
            &Point3::new(0.0, 3.0, 0.0),
        );
        assert_eq!(tri.area(), 6.0);
    }
}
