//! Turning two raw points into a normalized region

use crate::app::{MouseState, Point, Region};
use crate::error::{AppError, AppResult};
use crate::selection::tracker::is_drag;

/// Normalizes a drag in any of the four diagonal directions
pub fn region_from_points(a: Point, b: Point) -> AppResult<Region> {
    let x0 = a.x.min(b.x);
    let y0 = a.y.min(b.y);
    let width = a.x.abs_diff(b.x);
    let height = a.y.abs_diff(b.y);

    Region::new(x0, y0, width, height).ok_or(AppError::InvalidSelection)
}

/// Fails with `InvalidSelection` if either point is missing or the two are
/// too close to count as a drag
pub fn select_region(state: &MouseState) -> AppResult<Region> {
    match (state.pressed, state.released) {
        (Some(pressed), Some(released)) if is_drag(pressed, released) => {
            region_from_points(pressed, released)
        }
        _ => Err(AppError::InvalidSelection),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_drag_direction_gives_same_region() {
        let corners = [
            (Point::new(10, 20), Point::new(110, 70)),
            (Point::new(110, 70), Point::new(10, 20)),
            (Point::new(10, 70), Point::new(110, 20)),
            (Point::new(110, 20), Point::new(10, 70)),
        ];
        for (a, b) in corners {
            let region = region_from_points(a, b).unwrap();
            assert_eq!(region, Region::new(10, 20, 100, 50).unwrap());
        }
    }

    #[test]
    fn swapping_points_is_identical() {
        let samples = [
            (Point::new(-300, 40), Point::new(-100, 400)),
            (Point::new(1919, 1079), Point::new(0, 0)),
            (Point::new(7, 900), Point::new(800, 13)),
        ];
        for (a, b) in samples {
            let forward = region_from_points(a, b).unwrap();
            let backward = region_from_points(b, a).unwrap();
            assert_eq!(forward, backward);
            assert_eq!(forward.x, a.x.min(b.x));
            assert_eq!(forward.y, a.y.min(b.y));
            assert!(forward.width > 0 && forward.height > 0);
        }
    }

    #[test]
    fn missing_point_is_invalid() {
        let state = MouseState {
            pressed: Some(Point::new(1, 1)),
            released: None,
        };
        assert!(matches!(
            select_region(&state),
            Err(AppError::InvalidSelection)
        ));
        assert!(matches!(
            select_region(&MouseState::new()),
            Err(AppError::InvalidSelection)
        ));
    }

    #[test]
    fn click_sized_drag_is_invalid() {
        for released in [Point::new(3, 3), Point::new(400, 2), Point::new(5, 5)] {
            let state = MouseState {
                pressed: Some(Point::new(0, 0)),
                released: Some(released),
            };
            assert!(
                matches!(select_region(&state), Err(AppError::InvalidSelection)),
                "(0, 0) -> {:?} should be rejected",
                released
            );
        }

        let state = MouseState {
            pressed: Some(Point::new(0, 0)),
            released: Some(Point::new(6, 6)),
        };
        assert_eq!(select_region(&state).unwrap(), Region::new(0, 0, 6, 6).unwrap());
    }

    #[test]
    fn flat_selection_is_invalid() {
        let result = region_from_points(Point::new(5, 5), Point::new(5, 80));
        assert!(matches!(result, Err(AppError::InvalidSelection)));
    }
}
