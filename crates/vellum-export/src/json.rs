//! JSON export of the active page.

use serde::Serialize;
use vellum_core::Element;

use crate::ExportError;

/// Provenance block attached to every export. The timestamp is supplied
/// by the caller so the library stays clock-free.
#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    /// ISO 8601 creation time.
    pub created: String,
    /// Producing application name.
    pub tool: String,
}

impl ExportMetadata {
    pub fn new(created: impl Into<String>) -> Self {
        Self {
            created: created.into(),
            tool: "Vellum Design Tool".to_string(),
        }
    }
}

#[derive(Serialize)]
struct ExportBundle<'a> {
    elements: &'a [Element],
    metadata: &'a ExportMetadata,
}

/// Serialize the elements and metadata as pretty-printed JSON.
pub fn export_json(elements: &[Element], metadata: &ExportMetadata) -> Result<String, ExportError> {
    log::info!("exporting {} elements as JSON", elements.len());
    let bundle = ExportBundle { elements, metadata };
    Ok(serde_json::to_string_pretty(&bundle)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_core::Shape;

    #[test]
    fn test_bundle_shape() {
        let elements = vec![Element::new(1, Shape::Rectangle, 10.0, 20.0, 120.0, 80.0, 0)];
        let metadata = ExportMetadata::new("2026-01-01T00:00:00Z");
        let json = export_json(&elements, &metadata).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["elements"][0]["type"], "rectangle");
        assert_eq!(value["elements"][0]["backgroundColor"], "#3b82f6");
        assert_eq!(value["metadata"]["created"], "2026-01-01T00:00:00Z");
        assert_eq!(value["metadata"]["tool"], "Vellum Design Tool");
    }

    #[test]
    fn test_empty_page_exports() {
        let json = export_json(&[], &ExportMetadata::new("2026-01-01T00:00:00Z")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["elements"].as_array().unwrap().len(), 0);
    }
}
