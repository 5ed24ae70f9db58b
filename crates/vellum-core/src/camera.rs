//! View transform between device (screen) and document coordinates.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest allowed zoom level.
pub const MIN_ZOOM: f64 = 0.25;
/// Largest allowed zoom level.
pub const MAX_ZOOM: f64 = 3.0;
/// Increment used by the stepped zoom controls.
pub const ZOOM_STEP: f64 = 0.1;

/// Camera manages the paint transform for the design surface.
///
/// The rendering collaborator paints with `device = doc * zoom + offset`;
/// [`Camera::doc_from_device`] is the exact algebraic inverse of that
/// transform, so pointer math never drifts from what is on screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current pan offset in device units.
    pub offset: Vec2,
    /// Current zoom level (1.0 = 100%).
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    /// Create a camera at 100% zoom with no pan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a device-space point to document coordinates.
    pub fn doc_from_device(&self, device: Point) -> Point {
        Point::new(
            (device.x - self.offset.x) / self.zoom,
            (device.y - self.offset.y) / self.zoom,
        )
    }

    /// Convert a document-space point to device coordinates.
    pub fn device_from_doc(&self, doc: Point) -> Point {
        Point::new(
            doc.x * self.zoom + self.offset.x,
            doc.y * self.zoom + self.offset.y,
        )
    }

    /// Pan by a delta in device units.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Set the zoom level, clamped to the allowed range.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Step the zoom in by one increment.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    /// Step the zoom out by one increment.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    /// Reset pan and zoom to defaults.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_mapping() {
        let camera = Camera::new();
        let p = Point::new(100.0, 200.0);
        let doc = camera.doc_from_device(p);
        assert!((doc.x - p.x).abs() < f64::EPSILON);
        assert!((doc.y - p.y).abs() < f64::EPSILON);
    }

    #[test]
    fn test_inverse_under_zoom_and_pan() {
        let mut camera = Camera::new();
        camera.set_zoom(1.5);
        camera.pan(Vec2::new(30.0, -20.0));

        let device = Point::new(123.0, 456.0);
        let doc = camera.doc_from_device(device);
        let back = camera.device_from_doc(doc);

        assert!((back.x - device.x).abs() < 1e-10);
        assert!((back.y - device.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_divides_device_coordinates() {
        let mut camera = Camera::new();
        camera.set_zoom(2.0);
        let doc = camera.doc_from_device(Point::new(100.0, 200.0));
        assert!((doc.x - 50.0).abs() < f64::EPSILON);
        assert!((doc.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut camera = Camera::new();
        camera.set_zoom(0.01);
        assert!((camera.zoom - MIN_ZOOM).abs() < f64::EPSILON);

        camera.set_zoom(100.0);
        assert!((camera.zoom - MAX_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stepped_zoom() {
        let mut camera = Camera::new();
        camera.zoom_in();
        assert!((camera.zoom - 1.1).abs() < 1e-10);

        for _ in 0..40 {
            camera.zoom_out();
        }
        assert!((camera.zoom - MIN_ZOOM).abs() < f64::EPSILON);
    }
}
