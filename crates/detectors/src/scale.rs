//! Scale (pinch) detection from the average finger spread.

use multitouch_model::event::PointerSnapshot;
use multitouch_model::geometry::Point2D;
use serde::Serialize;

use crate::detector::{GestureDetector, GestureKind, GestureTracker};
use crate::move_gesture::centroid;

/// Focus is the mean distance of the pointers from their centroid; the
/// delta is the ratio `current / previous` of that spread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScaleGesture;

/// Scale detector reporting to listener `L`.
pub type ScaleDetector<L> = GestureDetector<ScaleGesture, L>;

/// Spread of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleFocus {
    pub centroid: Point2D,
    /// Mean pointer distance from `centroid`.
    pub span: f64,
}

impl GestureKind for ScaleGesture {
    type Focus = ScaleFocus;
    type Delta = f64;

    const NAME: &'static str = "scale";
    const MIN_POINTERS: usize = 2;

    fn focus(snapshot: &PointerSnapshot) -> Option<ScaleFocus> {
        if snapshot.pointer_count() < Self::MIN_POINTERS {
            return None;
        }
        let centroid = centroid(snapshot)?;
        let span = snapshot
            .positions()
            .map(|p| p.distance_to(&centroid))
            .sum::<f64>()
            / snapshot.pointer_count() as f64;
        Some(ScaleFocus { centroid, span })
    }

    fn delta(previous: &ScaleFocus, current: &ScaleFocus) -> Option<f64> {
        if previous.span > 0.0 {
            Some(current.span / previous.span)
        } else {
            None
        }
    }

    fn neutral() -> f64 {
        1.0
    }

    fn accumulate(total: f64, delta: f64) -> f64 {
        total * delta
    }
}

impl GestureTracker<ScaleGesture> {
    /// Spread ratio since the baseline; multiply it into a running scale.
    pub fn scale_factor(&self) -> f64 {
        self.delta()
    }

    /// Product of all accepted scale factors of this gesture.
    pub fn cumulative_scale(&self) -> f64 {
        self.cumulative()
    }

    pub fn current_span(&self) -> Option<f64> {
        self.current_focus().map(|f| f.span)
    }

    pub fn previous_span(&self) -> Option<f64> {
        self.previous_focus().map(|f| f.span)
    }

    /// Centroid the pinch is centred on.
    pub fn focus_point(&self) -> Option<Point2D> {
        self.current_focus().map(|f| f.centroid)
    }
}
