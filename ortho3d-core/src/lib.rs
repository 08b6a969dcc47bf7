//! ortho3d core library - parallel projection and depth-sorted composition
//!
//! This library provides the drawing-surface independent part of the
//! renderer: vector math, the rotating camera, the viewport transform,
//! drawable primitives and the painter's-algorithm scene compositor.

pub mod canvas;
pub mod error;
pub mod geometry;
pub mod projection;
pub mod scene;
pub mod solids;
pub mod style;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use canvas::{Canvas, DisplayList, ItemId, ScreenPoint, Shape};
pub use error::{Error, Result};
pub use geometry::{Drawable, Overlay, Point3, Primitive, Segment3, Triangle3};
pub use projection::{Camera, ViewAngles};
pub use scene::{NodeId, Scene, SceneConfig, View};
pub use solids::fan_triangulate;
pub use style::{ArrowMode, Color, LineStyle, ShapeStyle};
pub use transform::ViewportTransform;
pub use vector::Vector3;
