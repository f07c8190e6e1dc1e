//! Drag-reorder decisions for the outline view.
//!
//! The rule matches the drag-and-drop hover handler of the editing UI: while
//! a row is being dragged over a sibling, the move fires only once the
//! pointer crosses the hovered row's vertical midpoint — downward drags past
//! it, upward drags before it. Anything else keeps the current order, which
//! stops the indices oscillating when adjacent rows are near-identical in
//! height.
#![allow(dead_code)]

/// Viewport-space bounding box of a hovered row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowRect {
    pub top: f64,
    pub bottom: f64,
}

impl RowRect {
    fn midpoint(&self) -> f64 {
        (self.bottom - self.top) / 2.0
    }
}

/// A reorder decision: move the node at `from` to position `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reorder {
    pub from: usize,
    pub to: usize,
}

/// Midpoint-hysteresis hover rule. `pointer_y` is in the same viewport space
/// as `rect`. Returns the move to apply, or `None` while the pointer has not
/// crossed the threshold.
pub fn hover_reorder(
    drag_index: usize,
    hover_index: usize,
    pointer_y: f64,
    rect: &RowRect,
) -> Option<Reorder> {
    if drag_index == hover_index {
        return None;
    }

    let hover_client_y = pointer_y - rect.top;
    let hover_middle_y = rect.midpoint();

    // Dragging downwards: wait until the cursor is below 50% of the row.
    if drag_index < hover_index && hover_client_y < hover_middle_y {
        return None;
    }
    // Dragging upwards: wait until the cursor is above 50% of the row.
    if drag_index > hover_index && hover_client_y > hover_middle_y {
        return None;
    }

    Some(Reorder {
        from: drag_index,
        to: hover_index,
    })
}

/// One in-flight drag. Captures the source index on pointer-down; after a
/// move fires the hovered index becomes the new drag index, so the same
/// boundary cannot re-trigger the inverse move on the next hover event.
#[derive(Debug, Clone, Copy)]
pub struct DragSession {
    drag_index: usize,
}

impl DragSession {
    pub fn begin(source_index: usize) -> Self {
        DragSession {
            drag_index: source_index,
        }
    }

    pub fn drag_index(&self) -> usize {
        self.drag_index
    }

    pub fn hover(&mut self, hover_index: usize, pointer_y: f64, rect: &RowRect) -> Option<Reorder> {
        let decision = hover_reorder(self.drag_index, hover_index, pointer_y, rect)?;
        self.drag_index = hover_index;
        Some(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 40px-tall row at the top of the viewport; midpoint at y=20.
    const ROW: RowRect = RowRect {
        top: 0.0,
        bottom: 40.0,
    };

    #[test]
    fn test_hover_over_own_index_never_fires() {
        assert_eq!(hover_reorder(2, 2, 39.0, &ROW), None);
        assert_eq!(hover_reorder(2, 2, 1.0, &ROW), None);
    }

    #[test]
    fn test_downward_drag_fires_only_past_midpoint() {
        assert_eq!(hover_reorder(0, 1, 10.0, &ROW), None);
        assert_eq!(hover_reorder(0, 1, 19.9, &ROW), None);
        assert_eq!(
            hover_reorder(0, 1, 25.0, &ROW),
            Some(Reorder { from: 0, to: 1 })
        );
    }

    #[test]
    fn test_upward_drag_fires_only_before_midpoint() {
        assert_eq!(hover_reorder(3, 1, 30.0, &ROW), None);
        assert_eq!(
            hover_reorder(3, 1, 10.0, &ROW),
            Some(Reorder { from: 3, to: 1 })
        );
    }

    #[test]
    fn test_rect_offset_from_viewport_top() {
        let rect = RowRect {
            top: 100.0,
            bottom: 140.0,
        };
        // Pointer at absolute y=105 is 5px into the row, above the midpoint.
        assert_eq!(hover_reorder(0, 1, 105.0, &rect), None);
        assert_eq!(
            hover_reorder(0, 1, 135.0, &rect),
            Some(Reorder { from: 0, to: 1 })
        );
    }

    #[test]
    fn test_session_adopts_hover_index_after_move() {
        let mut session = DragSession::begin(0);
        let fired = session.hover(1, 30.0, &ROW);
        assert_eq!(fired, Some(Reorder { from: 0, to: 1 }));
        assert_eq!(session.drag_index(), 1);
    }

    #[test]
    fn test_session_does_not_oscillate_between_adjacent_rows() {
        let mut session = DragSession::begin(0);
        assert!(session.hover(1, 30.0, &ROW).is_some());

        // The pointer is still below the midpoint of the same row. Without
        // the index adoption this would fire 1 -> 0 and flip forever.
        assert_eq!(session.hover(1, 31.0, &ROW), None);
        assert_eq!(session.hover(1, 30.0, &ROW), None);

        // Dragging back up does fire the inverse move.
        assert_eq!(
            session.hover(0, 5.0, &ROW),
            Some(Reorder { from: 1, to: 0 })
        );
    }
}
