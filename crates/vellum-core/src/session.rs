//! Editing session: tool dispatch, pointer lifecycle, and document state.
//!
//! The session owns the active page's elements directly; inactive pages
//! keep theirs parked in [`Page`] structs and the two are swapped on page
//! changes. All pointer positions arrive in device coordinates and are
//! mapped through the [`Camera`] before any hit test or transform.

use kurbo::{Point, Size, Vec2};

use crate::camera::Camera;
use crate::element::{Element, ElementId, Shape};
use crate::geometry::{clamp, normalize_angle};
use crate::history::{History, Snapshot};
use crate::layers::{self, LayerDirection};
use crate::page::Page;
use crate::path::{self, ERASER_RADIUS, MIN_PATH_POINTS};
use crate::render::{NullRenderer, Renderer};
use crate::storage::Document;
use crate::transform::{self, ResizeHandle, RotationDrag};

/// Fixed canvas geometry and editing limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
    /// Smallest width/height a resize or property edit may produce.
    pub min_element_size: f64,
    /// Inset kept between a newly placed element and the canvas edge.
    pub boundary: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            min_element_size: 20.0,
            boundary: 5.0,
        }
    }
}

/// Active tool. Placement tools revert to `Select` once their element
/// lands on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Select,
    Rectangle,
    Circle,
    Triangle,
    Star,
    Line,
    Text,
    Path,
    Eraser,
    Pan,
}

impl Tool {
    /// The shape a click with this tool places, if it is a placement
    /// tool. Paths are drawn, not placed, so `Path` maps to None.
    fn placed_shape(self) -> Option<Shape> {
        match self {
            Tool::Rectangle => Some(Shape::Rectangle),
            Tool::Circle => Some(Shape::Circle),
            Tool::Triangle => Some(Shape::Triangle),
            Tool::Star => Some(Shape::Star),
            Tool::Line => Some(Shape::Line),
            Tool::Text => Some(Shape::Text),
            Tool::Select | Tool::Path | Tool::Eraser | Tool::Pan => None,
        }
    }
}

/// In-flight pointer gesture.
#[derive(Debug)]
pub enum Mode {
    Idle,
    /// Moving the selected element; `grab` is the pointer's offset from
    /// the element origin at press time. `moved` stays false for a bare
    /// click-select, which must not write a history entry.
    Dragging { grab: Vec2, moved: bool },
    Resizing { handle: ResizeHandle },
    Rotating { drag: RotationDrag },
    Drawing { id: ElementId },
    /// `erased_any` gates the end-of-gesture snapshot: a swipe that hit
    /// nothing leaves no history entry.
    Erasing { erased_any: bool },
    Panning { last_device: Point },
}

pub struct EditorSession {
    config: CanvasConfig,
    camera: Camera,
    pages: Vec<Page>,
    current_page: usize,
    elements: Vec<Element>,
    element_counter: u64,
    selected: Option<ElementId>,
    tool: Tool,
    mode: Mode,
    history: History,
    renderer: Box<dyn Renderer>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl EditorSession {
    pub fn new(config: CanvasConfig) -> Self {
        Self::with_renderer(config, Box::new(NullRenderer))
    }

    pub fn with_renderer(config: CanvasConfig, renderer: Box<dyn Renderer>) -> Self {
        let baseline = Snapshot {
            elements: Vec::new(),
            element_counter: 0,
            selected_id: None,
        };
        Self {
            config,
            camera: Camera::new(),
            pages: vec![Page::default()],
            current_page: 0,
            elements: Vec::new(),
            element_counter: 0,
            selected: None,
            tool: Tool::Select,
            mode: Mode::Idle,
            history: History::new(baseline),
            renderer,
        }
    }

    // --- accessors ---

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn selected_id(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn selected_element(&self) -> Option<&Element> {
        self.selected.and_then(|id| self.element(id))
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn current_page_index(&self) -> usize {
        self.current_page
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Element ids back to front, for painting and export.
    pub fn paint_order(&self) -> Vec<ElementId> {
        layers::paint_order(&self.elements)
    }

    // --- tools and camera ---

    /// Switch tools. A gesture in flight is terminated exactly as a
    /// pointer release would terminate it, so a mid-draw switch still
    /// discards a too-short path and a mid-erase switch still commits
    /// its snapshot. Leaving `Select` drops the selection.
    pub fn set_tool(&mut self, tool: Tool) {
        self.finish_gesture();
        self.tool = tool;
        if tool != Tool::Select {
            self.selected = None;
        }
    }

    pub fn zoom_in(&mut self) {
        self.camera.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.camera.zoom_out();
    }

    pub fn reset_view(&mut self) {
        self.camera.reset();
    }

    // --- pointer lifecycle ---

    /// Pointer pressed on the canvas surface (not on a transform handle;
    /// handle presses come in through [`begin_resize`] and
    /// [`begin_rotate`]).
    ///
    /// [`begin_resize`]: EditorSession::begin_resize
    /// [`begin_rotate`]: EditorSession::begin_rotate
    pub fn pointer_down(&mut self, device: Point) {
        let doc = self.camera.doc_from_device(device);
        match self.tool {
            Tool::Select => {
                if let Some(id) = self.topmost_at(doc) {
                    self.selected = Some(id);
                    // Origin offset is held so the element doesn't jump
                    // to center on the pointer.
                    if let Some(element) = self.element(id) {
                        let grab = Vec2::new(doc.x - element.x, doc.y - element.y);
                        self.mode = Mode::Dragging { grab, moved: false };
                    }
                } else {
                    self.selected = None;
                }
            }
            Tool::Path => {
                let id = self.begin_path(doc);
                self.mode = Mode::Drawing { id };
            }
            Tool::Eraser => {
                let erased_any = self.apply_erase(doc);
                self.mode = Mode::Erasing { erased_any };
            }
            Tool::Pan => {
                self.mode = Mode::Panning { last_device: device };
            }
            _ => {
                if let Some(shape) = self.tool.placed_shape() {
                    self.place_shape(shape, doc);
                }
            }
        }
    }

    pub fn pointer_move(&mut self, device: Point) {
        let doc = self.camera.doc_from_device(device);
        let canvas = self.config;
        match &mut self.mode {
            Mode::Idle => {}
            Mode::Dragging { grab, moved } => {
                *moved = true;
                let grab = *grab;
                let Some(id) = self.selected else { return };
                if let Some(element) = self.elements.iter_mut().find(|e| e.id == id) {
                    transform::move_to(element, Point::new(doc.x - grab.x, doc.y - grab.y), &canvas);
                    self.renderer.update_element_display(element);
                }
            }
            Mode::Resizing { handle } => {
                let handle = *handle;
                let Some(id) = self.selected else { return };
                if let Some(element) = self.elements.iter_mut().find(|e| e.id == id) {
                    transform::resize(element, handle, doc, &canvas);
                    self.renderer.update_element_display(element);
                }
            }
            Mode::Rotating { drag } => {
                let Some(id) = self.selected else { return };
                if let Some(element) = self.elements.iter_mut().find(|e| e.id == id) {
                    drag.update(doc, element);
                    self.renderer.update_element_display(element);
                }
            }
            Mode::Drawing { id } => {
                let id = *id;
                if let Some(element) = self.elements.iter_mut().find(|e| e.id == id) {
                    if path::extend_path(element, doc) {
                        self.renderer.update_element_display(element);
                    }
                }
            }
            Mode::Erasing { .. } => {
                let erased = self.apply_erase(doc);
                if let Mode::Erasing { erased_any } = &mut self.mode {
                    *erased_any |= erased;
                }
            }
            Mode::Panning { last_device } => {
                let delta = device - *last_device;
                *last_device = device;
                self.camera.pan(delta);
            }
        }
    }

    /// Pointer released: commit the gesture.
    pub fn pointer_up(&mut self) {
        self.finish_gesture();
    }

    /// Terminal routine for any in-flight gesture, shared by pointer
    /// release and tool switches.
    fn finish_gesture(&mut self) {
        let mode = std::mem::replace(&mut self.mode, Mode::Idle);
        match mode {
            Mode::Dragging { moved: false, .. } => {}
            Mode::Dragging { .. } | Mode::Resizing { .. } | Mode::Rotating { .. } => {
                self.save_history();
            }
            Mode::Drawing { id } => self.finish_path(id),
            Mode::Erasing { erased_any } => {
                if erased_any {
                    self.save_history();
                }
            }
            Mode::Idle | Mode::Panning { .. } => {}
        }
    }

    /// Pointer pressed on a corner resize grip of the selection.
    pub fn begin_resize(&mut self, handle: ResizeHandle) -> bool {
        if self.selected.is_none() {
            return false;
        }
        self.mode = Mode::Resizing { handle };
        true
    }

    /// Pointer pressed on the rotation grip of the selection.
    pub fn begin_rotate(&mut self, device: Point) -> bool {
        let doc = self.camera.doc_from_device(device);
        let Some(element) = self.selected_element() else {
            return false;
        };
        let drag = RotationDrag::begin(doc, element);
        self.mode = Mode::Rotating { drag };
        true
    }

    // --- element creation ---

    fn next_z(&self) -> i64 {
        self.elements
            .iter()
            .map(|e| e.z_index + 1)
            .max()
            .unwrap_or(0)
    }

    fn place_shape(&mut self, shape: Shape, doc: Point) {
        let Size { width, height } = shape.default_size();
        let b = self.config.boundary;
        let x = clamp(doc.x - width / 2.0, b, self.config.width - width - b);
        let y = clamp(doc.y - height / 2.0, b, self.config.height - height - b);

        self.element_counter += 1;
        let element = Element::new(
            self.element_counter,
            shape,
            x,
            y,
            width,
            height,
            self.next_z(),
        );
        let id = element.id;
        log::debug!("placed element {id} at ({x:.1}, {y:.1})");
        self.renderer.render_element(&element);
        self.elements.push(element);
        self.selected = Some(id);
        self.tool = Tool::Select;
        self.save_history();
    }

    fn begin_path(&mut self, doc: Point) -> ElementId {
        self.element_counter += 1;
        let mut element = Element::new(
            self.element_counter,
            Shape::Path { points: vec![doc] },
            doc.x,
            doc.y,
            0.0,
            0.0,
            self.next_z(),
        );
        element.recompute_path_bounds();
        let id = element.id;
        self.renderer.render_element(&element);
        self.elements.push(element);
        id
    }

    fn finish_path(&mut self, id: ElementId) {
        let points = self
            .element(id)
            .map(|e| e.path_points().len())
            .unwrap_or(0);
        if points < MIN_PATH_POINTS {
            // A click without movement leaves no mark.
            self.elements.retain(|e| e.id != id);
            self.renderer.remove_element(id);
            return;
        }
        self.selected = Some(id);
        self.tool = Tool::Select;
        self.save_history();
    }

    fn apply_erase(&mut self, doc: Point) -> bool {
        let outcome = path::erase_at(&mut self.elements, doc, ERASER_RADIUS);
        if outcome.is_empty() {
            return false;
        }
        for (id, indices) in &outcome.removed_points {
            self.renderer.remove_path_points(*id, indices);
        }
        for &id in &outcome.deleted_paths {
            self.elements.retain(|e| e.id != id);
            self.renderer.remove_element(id);
            if self.selected == Some(id) {
                self.selected = None;
            }
        }
        // Survivors shrank; refresh their bounds on screen.
        for (id, _) in &outcome.removed_points {
            if let Some(element) = self.elements.iter().find(|e| e.id == *id) {
                self.renderer.update_element_display(element);
            }
        }
        true
    }

    fn topmost_at(&self, doc: Point) -> Option<ElementId> {
        self.paint_order()
            .into_iter()
            .rev()
            .find(|&id| self.element(id).is_some_and(|e| e.contains(doc)))
    }

    // --- property edits ---

    /// Run `edit` against the selected element, then snapshot and
    /// refresh. No-op without a selection.
    fn edit_selected(&mut self, edit: impl FnOnce(&mut Element, &CanvasConfig)) -> bool {
        let canvas = self.config;
        let Some(id) = self.selected else {
            return false;
        };
        let Some(element) = self.elements.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        edit(element, &canvas);
        self.renderer.update_element_display(element);
        self.save_history();
        true
    }

    pub fn set_selected_position(&mut self, x: f64, y: f64) -> bool {
        self.edit_selected(|element, canvas| {
            transform::move_to(element, Point::new(x, y), canvas);
        })
    }

    /// Direct width edit. Floors at the minimum size, caps at the canvas
    /// width, keeps square shapes square, and pulls the element back
    /// inside the canvas if the new extent would overflow.
    pub fn set_selected_width(&mut self, width: f64) -> bool {
        self.edit_selected(|element, canvas| {
            let width = clamp(width, canvas.min_element_size, canvas.width);
            element.width = width;
            if element.shape.aspect_constraint() == crate::element::AspectConstraint::Square {
                element.height = width;
                element.y = clamp(element.y, 0.0, canvas.height - element.height);
            }
            element.x = clamp(element.x, 0.0, canvas.width - width);
        })
    }

    pub fn set_selected_height(&mut self, height: f64) -> bool {
        self.edit_selected(|element, canvas| {
            let height = clamp(height, canvas.min_element_size, canvas.height);
            element.height = height;
            if element.shape.aspect_constraint() == crate::element::AspectConstraint::Square {
                element.width = height;
                element.x = clamp(element.x, 0.0, canvas.width - element.width);
            }
            element.y = clamp(element.y, 0.0, canvas.height - height);
        })
    }

    pub fn set_selected_rotation(&mut self, degrees: f64) -> bool {
        self.edit_selected(|element, _| {
            element.rotation = normalize_angle(degrees);
        })
    }

    /// Relative rotation step (keyboard/wheel nudges).
    pub fn rotate_selected_by(&mut self, degrees: f64) -> bool {
        self.edit_selected(|element, _| {
            transform::rotate_by(element, degrees);
        })
    }

    pub fn set_selected_background(&mut self, color: &str) -> bool {
        self.edit_selected(|element, _| {
            element.background_color = color.to_string();
        })
    }

    pub fn set_selected_border_color(&mut self, color: &str) -> bool {
        self.edit_selected(|element, _| {
            element.border_color = color.to_string();
        })
    }

    pub fn set_selected_border_width(&mut self, width: f64) -> bool {
        self.edit_selected(|element, _| {
            element.border_width = width.max(0.0);
        })
    }

    pub fn set_selected_text(&mut self, text: &str) -> bool {
        self.edit_selected(|element, _| {
            element.text_content = text.to_string();
        })
    }

    /// Arrow-key nudge of the selection.
    pub fn nudge_selected(&mut self, delta: Vec2) -> bool {
        self.edit_selected(|element, canvas| {
            transform::move_by(element, delta, canvas);
        })
    }

    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.selected.take() else {
            return false;
        };
        log::debug!("deleting element {id}");
        self.elements.retain(|e| e.id != id);
        self.renderer.remove_element(id);
        self.save_history();
        true
    }

    // --- z-order ---

    pub fn bring_selected_to_front(&mut self) -> bool {
        let Some(id) = self.selected else { return false };
        let changed = layers::bring_to_front(&mut self.elements, id);
        if changed {
            self.refresh_stacking();
            self.save_history();
        }
        changed
    }

    pub fn send_selected_to_back(&mut self) -> bool {
        let Some(id) = self.selected else { return false };
        let changed = layers::send_to_back(&mut self.elements, id);
        if changed {
            self.refresh_stacking();
            self.save_history();
        }
        changed
    }

    pub fn move_selected_layer(&mut self, direction: LayerDirection) -> bool {
        let Some(id) = self.selected else { return false };
        let changed = layers::reorder(&mut self.elements, id, direction);
        if changed {
            self.refresh_stacking();
            self.save_history();
        }
        changed
    }

    /// Walk the selection to the adjacent element in z-order, wrapping at
    /// the ends. Selection-only; nothing moves.
    pub fn select_neighbor_in_z(&mut self, direction: LayerDirection) -> bool {
        let Some(id) = self.selected else { return false };
        match layers::neighbor_in_z(&self.elements, id, direction) {
            Some(next) => {
                self.selected = Some(next);
                true
            }
            None => false,
        }
    }

    fn refresh_stacking(&mut self) {
        for id in self.paint_order() {
            if let Some(element) = self.elements.iter().find(|e| e.id == id) {
                self.renderer.update_element_display(element);
            }
        }
    }

    // --- history ---

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            elements: self.elements.clone(),
            element_counter: self.element_counter,
            selected_id: self.selected,
        }
    }

    fn save_history(&mut self) {
        let snapshot = self.snapshot();
        self.history.save(snapshot);
    }

    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        log::debug!("undo to {} elements", snapshot.elements.len());
        self.restore(snapshot);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        log::debug!("redo to {} elements", snapshot.elements.len());
        self.restore(snapshot);
        true
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.elements = snapshot.elements;
        self.element_counter = snapshot.element_counter;
        // The remembered selection may name an element that no longer
        // exists in this state.
        self.selected = snapshot
            .selected_id
            .filter(|id| self.elements.iter().any(|e| e.id == *id));
        self.mode = Mode::Idle;
        self.rerender_all();
    }

    fn rerender_all(&mut self) {
        self.renderer.clear();
        for id in self.paint_order() {
            if let Some(element) = self.elements.iter().find(|e| e.id == id) {
                self.renderer.render_element(element);
            }
        }
    }

    // --- pages ---

    fn store_active_page(&mut self) {
        let page = &mut self.pages[self.current_page];
        page.elements = std::mem::take(&mut self.elements);
        page.element_counter = self.element_counter;
    }

    fn load_page(&mut self, index: usize) {
        self.current_page = index;
        let page = &mut self.pages[index];
        self.elements = std::mem::take(&mut page.elements);
        self.element_counter = page.element_counter;
        self.selected = None;
        self.mode = Mode::Idle;
        // Edits never undo across a page boundary.
        self.history.reset(self.snapshot());
        self.rerender_all();
    }

    pub fn add_page(&mut self) {
        self.store_active_page();
        let page = Page::numbered(self.pages.len() + 1);
        log::info!("adding {}", page.name);
        self.pages.push(page);
        self.load_page(self.pages.len() - 1);
    }

    pub fn switch_to_page(&mut self, index: usize) -> bool {
        if index == self.current_page || index >= self.pages.len() {
            return false;
        }
        self.store_active_page();
        self.load_page(index);
        true
    }

    /// Delete any page by index. The last remaining page cannot be
    /// deleted. The active index shifts down when the removed index is
    /// at or before it; deleting the active page lands on the previous
    /// page (or the new first page).
    pub fn delete_page(&mut self, index: usize) -> bool {
        if self.pages.len() <= 1 || index >= self.pages.len() {
            return false;
        }
        log::info!("deleting {}", self.pages[index].name);
        if index == self.current_page {
            // The live element buffer belongs to the removed page and
            // goes with it.
            self.pages.remove(index);
            self.load_page(index.saturating_sub(1));
        } else {
            self.pages.remove(index);
            if index < self.current_page {
                self.current_page -= 1;
            }
        }
        true
    }

    /// Delete the active page.
    pub fn delete_current_page(&mut self) -> bool {
        self.delete_page(self.current_page)
    }

    // --- persistence ---

    /// Snapshot the whole document for saving or export.
    pub fn to_document(&self) -> Document {
        let mut pages = self.pages.clone();
        pages[self.current_page].elements = self.elements.clone();
        pages[self.current_page].element_counter = self.element_counter;
        Document {
            pages,
            current_page_index: self.current_page,
        }
    }

    /// Replace the session's content with a loaded document.
    pub fn load_document(&mut self, document: Document) {
        self.pages = if document.pages.is_empty() {
            vec![Page::default()]
        } else {
            document.pages
        };
        let index = document.current_page_index.min(self.pages.len() - 1);
        self.load_page(index);
    }
}
