//! Vellum Core Library
//!
//! Platform-agnostic document model and editing engine for the Vellum
//! design surface.

pub mod camera;
pub mod element;
pub mod geometry;
pub mod history;
pub mod layers;
pub mod page;
pub mod path;
pub mod render;
pub mod session;
pub mod storage;
pub mod transform;

pub use camera::Camera;
pub use element::{AspectConstraint, Element, ElementId, Shape};
pub use history::{History, Snapshot, DEFAULT_HISTORY_DEPTH};
pub use layers::LayerDirection;
pub use page::Page;
pub use path::{EraseOutcome, ERASER_RADIUS, MIN_PATH_POINTS, MIN_SAMPLE_DISTANCE};
pub use render::{NullRenderer, Renderer};
pub use session::{CanvasConfig, EditorSession, Mode, Tool};
pub use storage::{Document, MemoryStorage, Storage, StorageError};
pub use transform::{ResizeHandle, RotationDrag};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
