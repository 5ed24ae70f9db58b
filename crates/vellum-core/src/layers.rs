//! Z-order management.
//!
//! Z-order is a strict total order over `z_index`, ties broken by `id` so
//! ordering stays deterministic even if duplicate indices ever appear.

use crate::element::{Element, ElementId};

/// Direction of a layer operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerDirection {
    /// Toward the front (higher z, painted later).
    Forward,
    /// Toward the back (lower z, painted earlier).
    Backward,
}

fn z_key(element: &Element) -> (i64, ElementId) {
    (element.z_index, element.id)
}

/// Element ids in paint order (back to front).
pub fn paint_order(elements: &[Element]) -> Vec<ElementId> {
    let mut ids: Vec<(i64, ElementId)> = elements.iter().map(z_key).collect();
    ids.sort_unstable();
    ids.into_iter().map(|(_, id)| id).collect()
}

/// Raise an element above everything else by assigning one past the
/// current global maximum. Returns false (no-op) if it is already on top.
pub fn bring_to_front(elements: &mut [Element], id: ElementId) -> bool {
    let Some(max) = elements.iter().map(z_key).max() else {
        return false;
    };
    let Some(element) = elements.iter_mut().find(|e| e.id == id) else {
        return false;
    };
    if (element.z_index, element.id) == max {
        return false;
    }
    element.z_index = max.0 + 1;
    true
}

/// Lower an element below everything else by assigning one before the
/// current global minimum. Returns false (no-op) if it is already at the
/// back.
pub fn send_to_back(elements: &mut [Element], id: ElementId) -> bool {
    let Some(min) = elements.iter().map(z_key).min() else {
        return false;
    };
    let Some(element) = elements.iter_mut().find(|e| e.id == id) else {
        return false;
    };
    if (element.z_index, element.id) == min {
        return false;
    }
    element.z_index = min.0 - 1;
    true
}

/// Swap an element's rank with its immediate neighbor in sorted order,
/// then renumber every element to a dense `0..n-1` sequence consistent
/// with the new order. The full renumbering prevents unbounded index
/// drift. Returns false if the element is already at that extreme.
pub fn reorder(elements: &mut [Element], id: ElementId, direction: LayerDirection) -> bool {
    let mut order = paint_order(elements);
    let Some(position) = order.iter().position(|&e| e == id) else {
        return false;
    };

    let target = match direction {
        LayerDirection::Forward => {
            if position + 1 >= order.len() {
                return false;
            }
            position + 1
        }
        LayerDirection::Backward => {
            if position == 0 {
                return false;
            }
            position - 1
        }
    };
    order.swap(position, target);
    renumber(elements, &order);
    true
}

/// Reassign dense sequential indices consistent with the current order.
pub fn normalize(elements: &mut [Element]) {
    let order = paint_order(elements);
    renumber(elements, &order);
}

fn renumber(elements: &mut [Element], order: &[ElementId]) {
    for (rank, &id) in order.iter().enumerate() {
        if let Some(element) = elements.iter_mut().find(|e| e.id == id) {
            element.z_index = rank as i64;
        }
    }
}

/// The element adjacent to `id` in z-order, wrapping at either end.
/// Returns None for an unknown id or a single-element set.
pub fn neighbor_in_z(
    elements: &[Element],
    id: ElementId,
    direction: LayerDirection,
) -> Option<ElementId> {
    let order = paint_order(elements);
    if order.len() < 2 {
        return None;
    }
    let position = order.iter().position(|&e| e == id)?;
    let neighbor = match direction {
        LayerDirection::Forward => (position + 1) % order.len(),
        LayerDirection::Backward => (position + order.len() - 1) % order.len(),
    };
    Some(order[neighbor])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Shape;

    fn stack() -> Vec<Element> {
        (0..4)
            .map(|i| Element::new(i + 1, Shape::Rectangle, 0.0, 0.0, 10.0, 10.0, i as i64))
            .collect()
    }

    fn z_of(elements: &[Element], id: ElementId) -> i64 {
        elements.iter().find(|e| e.id == id).unwrap().z_index
    }

    #[test]
    fn test_paint_order_ties_break_by_id() {
        let mut elements = stack();
        elements[0].z_index = 2;
        elements[2].z_index = 2;
        // ids 1 and 3 both at z 2: id orders them.
        assert_eq!(paint_order(&elements), vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_bring_to_front() {
        let mut elements = stack();
        assert!(bring_to_front(&mut elements, 2));
        assert_eq!(z_of(&elements, 2), 4);
        assert_eq!(paint_order(&elements), vec![1, 3, 4, 2]);

        // Already on top: no-op.
        assert!(!bring_to_front(&mut elements, 2));
    }

    #[test]
    fn test_send_to_back() {
        let mut elements = stack();
        assert!(send_to_back(&mut elements, 3));
        assert_eq!(z_of(&elements, 3), -1);
        assert_eq!(paint_order(&elements), vec![3, 1, 2, 4]);

        assert!(!send_to_back(&mut elements, 3));
    }

    #[test]
    fn test_reorder_swaps_and_renumbers_dense() {
        let mut elements = stack();
        elements[1].z_index = 70; // id 2 far in front
        assert_eq!(paint_order(&elements), vec![1, 3, 4, 2]);

        assert!(reorder(&mut elements, 4, LayerDirection::Forward));
        assert_eq!(paint_order(&elements), vec![1, 3, 2, 4]);
        // Dense renumbering, no drift.
        let mut zs: Vec<i64> = elements.iter().map(|e| e.z_index).collect();
        zs.sort_unstable();
        assert_eq!(zs, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_reorder_at_extreme_is_noop() {
        let mut elements = stack();
        assert!(!reorder(&mut elements, 4, LayerDirection::Forward));
        assert!(!reorder(&mut elements, 1, LayerDirection::Backward));
    }

    #[test]
    fn test_neighbor_wraps() {
        let elements = stack();
        assert_eq!(neighbor_in_z(&elements, 2, LayerDirection::Forward), Some(3));
        assert_eq!(neighbor_in_z(&elements, 4, LayerDirection::Forward), Some(1));
        assert_eq!(neighbor_in_z(&elements, 1, LayerDirection::Backward), Some(4));
    }

    #[test]
    fn test_normalize_compacts_indices() {
        let mut elements = stack();
        elements[0].z_index = -40;
        elements[3].z_index = 900;
        normalize(&mut elements);
        assert_eq!(paint_order(&elements), vec![1, 2, 3, 4]);
        assert_eq!(z_of(&elements, 1), 0);
        assert_eq!(z_of(&elements, 4), 3);
    }
}
