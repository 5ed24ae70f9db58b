//! Move, resize, and rotate operations on elements.

use crate::element::{AspectConstraint, Element};
use crate::geometry::{angle_from_center, clamp, normalize_angle};
use crate::session::CanvasConfig;
use kurbo::{Point, Vec2};

/// Corner grip driving a resize gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

/// Move an element by a delta in canvas axes, clamping each axis to keep
/// the element fully inside the canvas.
///
/// Dragging never compensates for the element's own rotation.
pub fn move_by(element: &mut Element, delta: Vec2, canvas: &CanvasConfig) {
    move_to(
        element,
        Point::new(element.x + delta.x, element.y + delta.y),
        canvas,
    );
}

/// Move an element's top-left corner to a position, clamped per axis to
/// `[0, canvas_extent - element_extent]`.
pub fn move_to(element: &mut Element, position: Point, canvas: &CanvasConfig) {
    element.x = clamp(position.x, 0.0, canvas.width - element.width);
    element.y = clamp(position.y, 0.0, canvas.height - element.height);
}

/// Resize an element from a corner handle toward the pointer position.
///
/// North/west handles keep the opposite (far) edge fixed: the new extent
/// is "far edge minus clamped pointer" and the origin moves to hold the
/// far edge in place. After the per-handle rule and the shape's aspect
/// constraint, a final clamp shrinks width/height so the element never
/// extends past the canvas; that clamp is a hard constraint and outranks
/// the handle's own result.
pub fn resize(
    element: &mut Element,
    handle: ResizeHandle,
    pointer: Point,
    canvas: &CanvasConfig,
) {
    let min = canvas.min_element_size;
    let (old_x, old_y) = (element.x, element.y);
    let (old_w, old_h) = (element.width, element.height);

    let mut new_x = old_x;
    let mut new_y = old_y;
    // Every handle arm assigns both extents.
    let mut new_w;
    let mut new_h;

    match handle {
        ResizeHandle::SouthEast => {
            new_w = (pointer.x - old_x).min(canvas.width - old_x).max(min);
            new_h = (pointer.y - old_y).min(canvas.height - old_y).max(min);
        }
        ResizeHandle::SouthWest => {
            new_w = (old_x + old_w - pointer.x.max(0.0)).max(min);
            new_h = (pointer.y - old_y).min(canvas.height - old_y).max(min);
            new_x = (old_x + old_w - new_w).max(0.0);
        }
        ResizeHandle::NorthEast => {
            new_w = (pointer.x - old_x).min(canvas.width - old_x).max(min);
            new_h = (old_y + old_h - pointer.y.max(0.0)).max(min);
            new_y = (old_y + old_h - new_h).max(0.0);
        }
        ResizeHandle::NorthWest => {
            new_w = (old_x + old_w - pointer.x.max(0.0)).max(min);
            new_h = (old_y + old_h - pointer.y.max(0.0)).max(min);
            new_x = (old_x + old_w - new_w).max(0.0);
            new_y = (old_y + old_h - new_h).max(0.0);
        }
    }

    if element.shape.aspect_constraint() == AspectConstraint::Square {
        let size = new_w.min(new_h);
        new_w = size;
        new_h = size;
        // Re-anchor the moving edges to the squared size.
        if matches!(handle, ResizeHandle::SouthWest | ResizeHandle::NorthWest) {
            new_x = old_x + old_w - new_w;
        }
        if matches!(handle, ResizeHandle::NorthEast | ResizeHandle::NorthWest) {
            new_y = old_y + old_h - new_h;
        }
    }

    if new_x + new_w > canvas.width {
        new_w = canvas.width - new_x;
    }
    if new_y + new_h > canvas.height {
        new_h = canvas.height - new_y;
    }

    element.x = new_x;
    element.y = new_y;
    element.width = new_w;
    element.height = new_h;
}

/// Rotate an element by a delta in degrees (keyboard/wheel nudges).
pub fn rotate_by(element: &mut Element, degrees: f64) {
    element.rotation = normalize_angle(element.rotation + degrees);
}

/// Accumulator for pointer-driven rotation.
///
/// Each sample takes the shortest signed difference from the previous
/// sample (wrap-corrected across the ±180° atan2 boundary), applies it,
/// and re-baselines, keeping rotation continuous across the
/// discontinuity.
#[derive(Debug, Clone)]
pub struct RotationDrag {
    last_angle: f64,
}

impl RotationDrag {
    /// Capture the baseline angle at gesture start.
    pub fn begin(pointer: Point, element: &Element) -> Self {
        Self {
            last_angle: angle_from_center(pointer, element),
        }
    }

    /// Apply one pointer sample to the element's rotation.
    pub fn update(&mut self, pointer: Point, element: &mut Element) {
        let current = angle_from_center(pointer, element);
        let mut diff = current - self.last_angle;
        if diff > 180.0 {
            diff -= 360.0;
        }
        if diff < -180.0 {
            diff += 360.0;
        }
        element.rotation = normalize_angle(element.rotation + diff);
        self.last_angle = current;
    }
}
