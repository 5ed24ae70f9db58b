//! Element definitions for the design surface.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Unique identifier for elements, monotonically assigned per document session.
pub type ElementId = u64;

/// Default fill color for new elements.
pub const DEFAULT_FILL: &str = "#3b82f6";
/// Default border color for new elements.
pub const DEFAULT_BORDER: &str = "#1e3a8a";
/// Stroke width used for freehand paths.
pub const PATH_STROKE_WIDTH: f64 = 2.0;

/// Shape variant of an element.
///
/// The tag and variant names are the persistence compatibility contract:
/// saved documents carry them in the `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Rectangle,
    Circle,
    Triangle,
    Star,
    Line,
    Text,
    /// Freehand polyline; bounds are derived from the point set.
    Path { points: Vec<Point> },
}

/// Aspect-ratio constraint applied by the transform engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectConstraint {
    /// Width and height resize independently.
    Free,
    /// Height is locked to width (circles stay circular).
    Square,
}

impl Shape {
    /// Default dimensions used when the element is placed by a click.
    pub fn default_size(&self) -> Size {
        match self {
            Shape::Rectangle => Size::new(120.0, 80.0),
            Shape::Circle => Size::new(100.0, 100.0),
            Shape::Triangle => Size::new(100.0, 80.0),
            Shape::Star => Size::new(100.0, 100.0),
            Shape::Line => Size::new(150.0, 2.0),
            Shape::Text => Size::new(120.0, 40.0),
            // Paths grow from their points; the initial size is irrelevant.
            Shape::Path { .. } => Size::ZERO,
        }
    }

    /// Aspect constraint for this shape, applied uniformly across
    /// drag-resize and direct property edits.
    pub fn aspect_constraint(&self) -> AspectConstraint {
        match self {
            Shape::Circle => AspectConstraint::Square,
            Shape::Rectangle
            | Shape::Triangle
            | Shape::Star
            | Shape::Line
            | Shape::Text
            | Shape::Path { .. } => AspectConstraint::Free,
        }
    }

    pub fn is_path(&self) -> bool {
        matches!(self, Shape::Path { .. })
    }
}

/// A single placed shape, text box, or freehand path on a page.
///
/// `x`/`y` are the top-left corner in document coordinates. For paths the
/// position and size are derived from the point set (see
/// [`Element::recompute_path_bounds`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    #[serde(flatten)]
    pub shape: Shape,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees, normalized to `[0, 360)`.
    pub rotation: f64,
    pub background_color: String,
    pub border_color: String,
    pub border_width: f64,
    /// Only meaningful for `Shape::Text`.
    pub text_content: String,
    /// Relative paint and hit-test order; higher paints on top. Values
    /// need not be contiguous.
    pub z_index: i64,
}

impl Element {
    /// Create an element with default colors at the given position.
    pub fn new(
        id: ElementId,
        shape: Shape,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        z_index: i64,
    ) -> Self {
        let text_content = match shape {
            Shape::Text => "Text".to_string(),
            _ => String::new(),
        };
        let border_width = if shape.is_path() { PATH_STROKE_WIDTH } else { 0.0 };
        Self {
            id,
            shape,
            x,
            y,
            width,
            height,
            rotation: 0.0,
            background_color: DEFAULT_FILL.to_string(),
            border_color: DEFAULT_BORDER.to_string(),
            border_width,
            text_content,
            z_index,
        }
    }

    /// Center of the unrotated bounding box.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Bounding box in document coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Point-in-bounds test used for selection hit-testing.
    pub fn contains(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }

    /// Points of a path element, empty for other shapes.
    pub fn path_points(&self) -> &[Point] {
        match &self.shape {
            Shape::Path { points } => points,
            _ => &[],
        }
    }

    /// Recompute `x`/`y`/`width`/`height` from the path's point set,
    /// padded by half the stroke width on every side.
    ///
    /// No-op for non-path shapes or an empty point set.
    pub fn recompute_path_bounds(&mut self) {
        let Shape::Path { points } = &self.shape else {
            return;
        };
        if points.is_empty() {
            return;
        }

        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;
        for point in points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        let pad = self.border_width / 2.0;
        self.x = min_x - pad;
        self.y = min_y - pad;
        self.width = (max_x - min_x) + self.border_width;
        self.height = (max_y - min_y) + self.border_width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_gets_placeholder_content() {
        let text = Element::new(1, Shape::Text, 0.0, 0.0, 120.0, 40.0, 0);
        assert_eq!(text.text_content, "Text");

        let rect = Element::new(2, Shape::Rectangle, 0.0, 0.0, 120.0, 80.0, 1);
        assert!(rect.text_content.is_empty());
    }

    #[test]
    fn test_circle_is_square_constrained() {
        assert_eq!(Shape::Circle.aspect_constraint(), AspectConstraint::Square);
        assert_eq!(Shape::Rectangle.aspect_constraint(), AspectConstraint::Free);
    }

    #[test]
    fn test_path_bounds_padded_by_half_stroke() {
        let mut path = Element::new(
            3,
            Shape::Path {
                points: vec![Point::new(10.0, 20.0), Point::new(110.0, 70.0)],
            },
            0.0,
            0.0,
            0.0,
            0.0,
            0,
        );
        path.border_width = 4.0;
        path.recompute_path_bounds();

        assert!((path.x - 8.0).abs() < f64::EPSILON);
        assert!((path.y - 18.0).abs() < f64::EPSILON);
        assert!((path.width - 104.0).abs() < f64::EPSILON);
        assert!((path.height - 54.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_serde_field_names_match_contract() {
        let element = Element::new(7, Shape::Circle, 10.0, 20.0, 100.0, 100.0, 3);
        let json = serde_json::to_value(&element).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["type"], "circle");
        assert_eq!(json["x"], 10.0);
        assert_eq!(json["backgroundColor"], DEFAULT_FILL);
        assert_eq!(json["borderColor"], DEFAULT_BORDER);
        assert_eq!(json["borderWidth"], 0.0);
        assert_eq!(json["textContent"], "");
        assert_eq!(json["zIndex"], 3);
    }

    #[test]
    fn test_path_serde_round_trip() {
        let mut path = Element::new(
            9,
            Shape::Path {
                points: vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)],
            },
            0.0,
            0.0,
            0.0,
            0.0,
            2,
        );
        path.recompute_path_bounds();

        let json = serde_json::to_string(&path).unwrap();
        assert!(json.contains("\"type\":\"path\""));
        assert!(json.contains("\"points\""));

        let back: Element = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
        assert_eq!(back.path_points().len(), 2);
    }
}
