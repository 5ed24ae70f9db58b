//! Document pages.
//!
//! A document holds one or more pages; each page owns its elements and
//! its element id counter, so ids are unique per page rather than per
//! document.

use serde::{Deserialize, Serialize};

use crate::element::Element;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub name: String,
    pub elements: Vec<Element>,
    pub element_counter: u64,
}

impl Page {
    /// An empty page numbered `n` (1-based, as shown to the user).
    pub fn numbered(n: usize) -> Self {
        Self {
            id: format!("page_{n}"),
            name: format!("Page {n}"),
            elements: Vec::new(),
            element_counter: 0,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::numbered(1)
    }
}
