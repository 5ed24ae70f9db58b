//! Freehand path construction and spatial erasure.

use crate::element::{Element, ElementId, Shape};
use kurbo::Point;

/// Minimum distance between consecutive sampled points, in document units.
pub const MIN_SAMPLE_DISTANCE: f64 = 3.0;
/// A path with fewer points than this is invalid and discarded.
pub const MIN_PATH_POINTS: usize = 2;
/// Radius of the circular eraser, in document units.
pub const ERASER_RADIUS: f64 = 10.0;

/// Append a pointer sample to a path element if it is far enough from the
/// last recorded point, recomputing the derived bounds.
///
/// Returns true if a point was recorded. No-op for non-path elements.
pub fn extend_path(element: &mut Element, point: Point) -> bool {
    let Shape::Path { points } = &mut element.shape else {
        return false;
    };
    if let Some(last) = points.last() {
        let dx = point.x - last.x;
        let dy = point.y - last.y;
        if (dx * dx + dy * dy).sqrt() <= MIN_SAMPLE_DISTANCE {
            return false;
        }
    }
    points.push(point);
    element.recompute_path_bounds();
    true
}

/// What a single erase sample did to the live element set.
#[derive(Debug, Default)]
pub struct EraseOutcome {
    /// Point indices removed per path, in the order they appeared. The
    /// rendering collaborator drops its per-point artifacts from these.
    pub removed_points: Vec<(ElementId, Vec<usize>)>,
    /// Paths left with fewer than [`MIN_PATH_POINTS`] points; the caller
    /// deletes these from the live set.
    pub deleted_paths: Vec<ElementId>,
}

impl EraseOutcome {
    pub fn is_empty(&self) -> bool {
        self.removed_points.is_empty() && self.deleted_paths.is_empty()
    }
}

/// Erase every path point within `radius` of `center`, across all path
/// elements.
///
/// Indices to remove are collected first and the point sequence rebuilt
/// once, so removal never shifts indices mid-iteration. Paths reduced
/// below the minimum point count are reported for deletion, not mutated
/// further; survivors get their bounds recomputed.
pub fn erase_at(elements: &mut [Element], center: Point, radius: f64) -> EraseOutcome {
    let radius_sq = radius * radius;
    let mut outcome = EraseOutcome::default();

    for element in elements.iter_mut() {
        let Shape::Path { points } = &mut element.shape else {
            continue;
        };

        let hit: Vec<usize> = points
            .iter()
            .enumerate()
            .filter(|(_, p)| {
                let dx = p.x - center.x;
                let dy = p.y - center.y;
                dx * dx + dy * dy <= radius_sq
            })
            .map(|(i, _)| i)
            .collect();
        if hit.is_empty() {
            continue;
        }

        let mut index = 0;
        points.retain(|_| {
            let keep = !hit.contains(&index);
            index += 1;
            keep
        });

        if points.len() < MIN_PATH_POINTS {
            outcome.deleted_paths.push(element.id);
        } else {
            element.recompute_path_bounds();
        }
        outcome.removed_points.push((element.id, hit));
    }

    outcome
}
