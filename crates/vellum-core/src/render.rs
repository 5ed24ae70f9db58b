//! Renderer seam.
//!
//! The engine mutates the model and tells a [`Renderer`] what changed;
//! the frontend owns all visual artifacts (DOM nodes, canvas layers,
//! whatever it uses). Selection chrome and transform handles are the
//! renderer's business entirely: the model only exposes which element is
//! selected.

use crate::element::Element;
use crate::element::ElementId;

pub trait Renderer {
    /// A new element exists; create its visual representation.
    fn render_element(&mut self, element: &Element);

    /// An existing element's geometry, style, or content changed.
    fn update_element_display(&mut self, element: &Element);

    /// An element was removed from the document.
    fn remove_element(&mut self, id: ElementId);

    /// Specific points of a freehand path were erased. Indices refer to
    /// the path's point list as it was before removal, ascending.
    fn remove_path_points(&mut self, id: ElementId, indices: &[usize]);

    /// Everything is gone (page switch, document restore).
    fn clear(&mut self);
}

/// Renderer that does nothing. Used headless and in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render_element(&mut self, _element: &Element) {}
    fn update_element_display(&mut self, _element: &Element) {}
    fn remove_element(&mut self, _id: ElementId) {}
    fn remove_path_points(&mut self, _id: ElementId, _indices: &[usize]) {}
    fn clear(&mut self) {}
}
