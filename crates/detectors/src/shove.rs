//! Shove detection: fingers moving together across their own axis.
//!
//! The dominant finger axis is the principal axis of the pointers about
//! their centroid (for two fingers, the line joining them). A shove is
//! motion of the centroid along the axis normal, so spreading the fingers
//! (scale) or sliding them along the axis does not register.

use multitouch_model::event::PointerSnapshot;
use multitouch_model::geometry::Point2D;
use serde::Serialize;

use crate::detector::{GestureDetector, GestureKind, GestureTracker};
use crate::move_gesture::centroid;

/// Below this the pointer cloud has no dominant axis.
const MIN_ANISOTROPY: f64 = 1e-9;

/// Focus is the centroid offset along the axis normal; the delta is the
/// pixel distance the fingers moved along the baseline's normal.
/// Positive values point down-screen (or right for a vertical axis).
#[derive(Debug, Clone, Copy, Default)]
pub struct ShoveGesture;

/// Shove detector reporting to listener `L`.
pub type ShoveDetector<L> = GestureDetector<ShoveGesture, L>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShoveFocus {
    pub centroid: Point2D,
    /// Unit normal of the dominant finger axis.
    pub normal: Point2D,
    /// Mean projection of the pointers on `normal`.
    pub offset: f64,
    /// Axis direction in degrees, in `(-90, 90]`.
    pub axis_degrees: f64,
}

impl GestureKind for ShoveGesture {
    type Focus = ShoveFocus;
    type Delta = f64;

    const NAME: &'static str = "shove";
    const MIN_POINTERS: usize = 2;

    fn focus(snapshot: &PointerSnapshot) -> Option<ShoveFocus> {
        if snapshot.pointer_count() < Self::MIN_POINTERS {
            return None;
        }
        let centroid = centroid(snapshot)?;

        let (sxx, syy, sxy) = snapshot.positions().fold((0.0, 0.0, 0.0), |(sxx, syy, sxy), p| {
            let d = p - centroid;
            (sxx + d.x * d.x, syy + d.y * d.y, sxy + d.x * d.y)
        });
        if (sxx - syy).abs() < MIN_ANISOTROPY && sxy.abs() < MIN_ANISOTROPY {
            return None;
        }

        let axis = 0.5 * (2.0 * sxy).atan2(sxx - syy);
        let (sin, cos) = axis.sin_cos();
        let mut normal = Point2D::new(-sin, cos);
        if normal.y < 0.0 || (normal.y == 0.0 && normal.x < 0.0) {
            normal = normal * -1.0;
        }

        Some(ShoveFocus {
            centroid,
            normal,
            offset: centroid.dot(&normal),
            axis_degrees: axis.to_degrees(),
        })
    }

    fn delta(previous: &ShoveFocus, current: &ShoveFocus) -> Option<f64> {
        Some((current.centroid - previous.centroid).dot(&previous.normal))
    }

    fn neutral() -> f64 {
        0.0
    }

    fn accumulate(total: f64, delta: f64) -> f64 {
        total + delta
    }
}

impl GestureTracker<ShoveGesture> {
    /// Pixels moved across the finger axis since the baseline.
    pub fn shove_pixels_delta(&self) -> f64 {
        self.delta()
    }

    /// Sum of all accepted shove deltas of this gesture.
    pub fn cumulative_shove(&self) -> f64 {
        self.cumulative()
    }

    pub fn axis_degrees(&self) -> Option<f64> {
        self.current_focus().map(|f| f.axis_degrees)
    }

    pub fn focus_point(&self) -> Option<Point2D> {
        self.current_focus().map(|f| f.centroid)
    }
}
