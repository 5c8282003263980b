//! Move (pan) detection from the centroid of all pointers.

use multitouch_model::event::PointerSnapshot;
use multitouch_model::geometry::Point2D;

use crate::detector::{GestureDetector, GestureKind, GestureTracker};

/// Focus is the centroid of every active pointer; the delta is how far it
/// moved. Adding or lifting a finger reports a zero delta for that update.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveGesture;

/// Move detector reporting to listener `L`.
pub type MoveDetector<L> = GestureDetector<MoveGesture, L>;

impl GestureKind for MoveGesture {
    type Focus = Point2D;
    type Delta = Point2D;

    const NAME: &'static str = "move";

    fn focus(snapshot: &PointerSnapshot) -> Option<Point2D> {
        centroid(snapshot)
    }

    fn delta(previous: &Point2D, current: &Point2D) -> Option<Point2D> {
        Some(*current - *previous)
    }

    fn neutral() -> Point2D {
        Point2D::ZERO
    }

    fn accumulate(total: Point2D, delta: Point2D) -> Point2D {
        total + delta
    }
}

/// Mean position of all pointers; `None` without pointers or when a
/// coordinate is not finite.
pub(crate) fn centroid(snapshot: &PointerSnapshot) -> Option<Point2D> {
    Point2D::centroid(snapshot.positions()).filter(|c| c.x.is_finite() && c.y.is_finite())
}

impl GestureTracker<MoveGesture> {
    /// Focus movement since the baseline.
    pub fn focus_delta(&self) -> Point2D {
        self.delta()
    }

    /// Focus position accumulated from zero at the gesture's down.
    ///
    /// Unlike the raw centroid this never jumps when fingers are added
    /// or removed.
    pub fn focus(&self) -> Point2D {
        self.cumulative()
    }

    pub fn focus_x(&self) -> f64 {
        self.cumulative().x
    }

    pub fn focus_y(&self) -> f64 {
        self.cumulative().y
    }

    /// Raw centroid of the current snapshot.
    pub fn centroid(&self) -> Option<Point2D> {
        self.current_focus().copied()
    }
}
