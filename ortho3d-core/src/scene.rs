//! Scene composition with painter's-algorithm depth ordering
use log::{debug, trace};

use crate::canvas::{Canvas, ItemId};
use crate::geometry::{Drawable, Primitive};
use crate::projection::{Camera, ViewAngles};
use crate::transform::ViewportTransform;

/// The camera and viewport a scene projects through.
///
/// Either part may be absent, in which case that stage of the pipeline is
/// the identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct View {
    camera: Option<Camera>,
    viewport: Option<ViewportTransform>,
}

impl View {
    pub fn new(camera: Option<Camera>, viewport: Option<ViewportTransform>) -> Self {
        Self { camera, viewport }
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    pub fn viewport(&self) -> Option<&ViewportTransform> {
        self.viewport.as_ref()
    }

    /// World to projection space
    pub fn project(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        match &self.camera {
            Some(camera) => camera.project(x, y, z),
            None => (x, y, z),
        }
    }

    /// Projection space to world
    pub fn invert(&self, xp: f64, yp: f64, zp: f64) -> (f64, f64, f64) {
        match &self.camera {
            Some(camera) => camera.invert(xp, yp, zp),
            None => (xp, yp, zp),
        }
    }

    /// Projection plane to pixels
    pub fn to_screen(&self, xp: f64, yp: f64) -> (f64, f64) {
        match &self.viewport {
            Some(viewport) => viewport.to_screen(xp, yp),
            None => (xp, yp),
        }
    }

    /// Pixels to projection plane
    pub fn to_projection(&self, px: f64, py: f64) -> (f64, f64) {
        match &self.viewport {
            Some(viewport) => viewport.to_projection(px, py),
            None => (px, py),
        }
    }

    /// World straight to pixels
    pub fn to_screen_3d(&self, x: f64, y: f64, z: f64) -> (f64, f64) {
        let (xp, yp, _) = self.project(x, y, z);
        self.to_screen(xp, yp)
    }
}

/// Initial viewing setup for a [`Scene`]
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Projection-plane point shown at the center of the canvas
    pub center_x: f64,
    pub center_y: f64,
    /// Projection units per pixel, finite and positive
    pub scale: f64,
    /// Camera angles; `None` leaves the projection as the identity
    pub angles: Option<ViewAngles>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            center_x: 0.0,
            center_y: 0.0,
            scale: 1.0,
            angles: None,
        }
    }
}

/// Handle to a primitive attached to a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node {
    primitive: Primitive,
    item: Option<ItemId>,
}

/// A display surface: a canvas plus the camera, viewport and the set of
/// primitives drawn on it.
pub struct Scene<C: Canvas> {
    canvas: C,
    view: View,
    nodes: Vec<Option<Node>>,
}

impl<C: Canvas> Scene<C> {
    pub fn new(canvas: C) -> Self {
        Self {
            canvas,
            view: View::default(),
            nodes: Vec::new(),
        }
    }

    pub fn with_config(canvas: C, config: &SceneConfig) -> Self {
        let mut scene = Self::new(canvas);
        scene.view.viewport = Some(ViewportTransform::centered(
            scene.canvas.width(),
            scene.canvas.height(),
            config.center_x,
            config.center_y,
            config.scale,
        ));
        scene.view.camera = config.angles.map(Camera::from_angles);
        scene
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    /// Direct canvas access. Items drawn here are not managed by the scene.
    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn into_canvas(self) -> C {
        self.canvas
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.view.camera()
    }

    /// Replace the camera and repaint.
    pub fn set_camera(&mut self, azimuth: f64, altitude: f64, roll: f64) {
        self.set_angles(ViewAngles::new(azimuth, altitude, roll));
    }

    pub fn set_angles(&mut self, angles: ViewAngles) {
        debug!(
            "camera set to azimuth={} altitude={} roll={}",
            angles.azimuth, angles.altitude, angles.roll
        );
        self.view.camera = Some(Camera::from_angles(angles));
        self.redraw();
    }

    /// Drop the camera, making the projection the identity, and repaint.
    pub fn clear_camera(&mut self) {
        debug!("camera cleared");
        self.view.camera = None;
        self.redraw();
    }

    /// Center the canvas on `(center_x, center_y)` of the projection plane
    /// at `scale` projection units per pixel, and repaint.
    ///
    /// `scale` must be finite and positive, and the canvas must have a
    /// non-zero size. Debug builds assert this.
    pub fn set_viewport(&mut self, center_x: f64, center_y: f64, scale: f64) {
        let viewport = ViewportTransform::centered(
            self.canvas.width(),
            self.canvas.height(),
            center_x,
            center_y,
            scale,
        );
        debug!("viewport set to {:?}", viewport.bounds());
        self.view.viewport = Some(viewport);
        self.redraw();
    }

    pub fn project(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        self.view.project(x, y, z)
    }

    pub fn invert(&self, xp: f64, yp: f64, zp: f64) -> (f64, f64, f64) {
        self.view.invert(xp, yp, zp)
    }

    /// Attach a primitive and draw it on top of the current contents.
    ///
    /// Call [`redraw`](Self::redraw) to put it in depth order.
    pub fn attach(&mut self, primitive: impl Into<Primitive>) -> NodeId {
        let primitive = primitive.into();
        let item = primitive.rasterize(&mut self.canvas, &self.view);
        let id = NodeId(self.nodes.len());
        trace!("attached {id:?} as {item:?}");
        self.nodes.push(Some(Node {
            primitive,
            item: Some(item),
        }));
        id
    }

    /// Detach a primitive, erasing it from the canvas and handing it back.
    pub fn detach(&mut self, id: NodeId) -> Option<Primitive> {
        let node = self.nodes.get_mut(id.0)?.take()?;
        if let Some(item) = node.item {
            self.canvas.remove(item);
        }
        trace!("detached {id:?}");
        Some(node.primitive)
    }

    /// Detach everything.
    pub fn clear(&mut self) -> Vec<Primitive> {
        let ids: Vec<NodeId> = self.ids().collect();
        ids.into_iter().filter_map(|id| self.detach(id)).collect()
    }

    pub fn get(&self, id: NodeId) -> Option<&Primitive> {
        self.node(id).map(|n| &n.primitive)
    }

    /// Mutable access to an attached primitive's geometry.
    ///
    /// Changes made here show up on the next [`redraw`](Self::redraw).
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Primitive> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .map(|n| &mut n.primitive)
    }

    /// Canvas item currently showing the primitive
    pub fn item(&self, id: NodeId) -> Option<ItemId> {
        self.node(id).and_then(|n| n.item)
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_some())
            .map(|(i, _)| NodeId(i))
    }

    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Translate an attached primitive in world space.
    ///
    /// When the primitive is on the canvas, its item is shifted by the
    /// change in projected screen position instead of being redrawn. The
    /// depth order is left as is until the next redraw. Returns `false` for
    /// unknown ids.
    pub fn translate(&mut self, id: NodeId, dx: f64, dy: f64, dz: f64) -> bool {
        let view = &self.view;
        let Some(node) = self.nodes.get_mut(id.0).and_then(Option::as_mut) else {
            return false;
        };

        let before = node.primitive.screen_anchor(view);
        node.primitive.translate(dx, dy, dz);
        if let Some(item) = node.item {
            let after = node.primitive.screen_anchor(view);
            let (mx, my) = (after.0 - before.0, after.1 - before.1);
            trace!("moving {item:?} by ({mx}, {my}) px");
            self.canvas.move_by(item, mx, my);
        }
        true
    }

    /// Repaint every primitive back to front and flush the canvas.
    ///
    /// Primitives are stable-sorted by descending depth, so farther objects
    /// are painted first and nearer ones cover them. Safe to call
    /// repeatedly.
    pub fn redraw(&mut self) {
        let mut order: Vec<(f64, usize)> = self
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.as_ref().map(|n| (n.primitive.depth(Some(&self.view)), i)))
            .collect();
        order.sort_by(|a, b| b.0.total_cmp(&a.0));
        debug!("redrawing {} primitives", order.len());

        for (depth, i) in order {
            let Some(node) = self.nodes[i].as_mut() else {
                continue;
            };
            if let Some(old) = node.item.take() {
                self.canvas.remove(old);
            }
            let item = node.primitive.rasterize(&mut self.canvas, &self.view);
            trace!("painted node {i} at depth {depth} as {item:?}");
            node.item = Some(item);
        }
        self.canvas.flush();
    }

    /// Flush pending canvas changes, such as incremental moves.
    pub fn flush(&mut self) {
        self.canvas.flush();
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }
}
