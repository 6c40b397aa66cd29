//! Bubble positioning from the selection rectangle.

use crate::host::CaretRect;

/// Pixels the bubble sits above the selection's top edge.
const BUBBLE_RAISE: f64 = 5.0;

/// On-screen coordinates for the bubble, in page pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub top: f64,
    pub left: f64,
}

impl Position {
    /// Parking spot well outside the viewport. Used while hidden so a
    /// transparent bubble cannot intercept pointer events.
    pub const OFF_SCREEN: Self = Self {
        top: -999.0,
        left: -999.0,
    };
}

impl Default for Position {
    fn default() -> Self {
        Self::OFF_SCREEN
    }
}

/// Compute the bubble position for a selection rectangle.
///
/// The bubble sits slightly above the selection, horizontally centered over
/// it. The rectangle is viewport-relative, so `scroll_y` converts the top
/// edge into page coordinates.
pub fn compute_position(rect: CaretRect, scroll_y: f64) -> Position {
    Position {
        top: rect.top - BUBBLE_RAISE + scroll_y,
        left: (rect.left + rect.right) / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_raises_and_centers() {
        let rect = CaretRect {
            top: 100.0,
            left: 50.0,
            right: 150.0,
        };
        let position = compute_position(rect, 20.0);
        assert!((position.top - 115.0).abs() < f64::EPSILON);
        assert!((position.left - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_scroll_stays_viewport_relative() {
        let rect = CaretRect {
            top: 40.0,
            left: 0.0,
            right: 10.0,
        };
        let position = compute_position(rect, 0.0);
        assert!((position.top - 35.0).abs() < f64::EPSILON);
        assert!((position.left - 5.0).abs() < f64::EPSILON);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn left_is_the_horizontal_midpoint(
                left in -1000.0..1000.0f64,
                width in 0.0..1000.0f64,
                top in -1000.0..1000.0f64,
                scroll in 0.0..5000.0f64,
            ) {
                let rect = CaretRect { top, left, right: left + width };
                let position = compute_position(rect, scroll);
                prop_assert!(position.left >= rect.left - 1e-9);
                prop_assert!(position.left <= rect.right + 1e-9);
                prop_assert!((position.top - (top - 5.0 + scroll)).abs() < 1e-9);
            }
        }
    }
}
