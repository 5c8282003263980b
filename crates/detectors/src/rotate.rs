//! Rotate detection from pointer orientations about the centroid.
//!
//! Each pointer's orientation is the angle of its offset from the
//! centroid. The rotation between two snapshots is the circular mean of
//! the per-pointer angle changes, so wrapping past ±180° never produces a
//! ±360° jump. Averaging the orientations themselves would not work:
//! two fingers always sit on opposite sides of their centroid and their
//! orientation vectors cancel out.

use std::f64::consts::PI;

use multitouch_model::event::{PointerId, PointerSnapshot};
use multitouch_model::geometry::Point2D;
use serde::Serialize;

use crate::detector::{GestureDetector, GestureKind, GestureTracker};
use crate::move_gesture::centroid;

/// Offsets shorter than this have no usable orientation.
const MIN_RADIUS: f64 = 1e-6;

/// Focus is the set of pointer orientations; the delta is a signed
/// rotation in degrees, positive in the `atan2` direction (clockwise on a
/// y-down surface).
#[derive(Debug, Clone, Copy, Default)]
pub struct RotateGesture;

/// Rotate detector reporting to listener `L`.
pub type RotateDetector<L> = GestureDetector<RotateGesture, L>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RotateFocus {
    pub centroid: Point2D,
    /// `(pointer id, radians)` for every pointer off the centroid.
    pub orientations: Vec<(PointerId, f64)>,
}

impl RotateFocus {
    fn orientation_of(&self, id: PointerId) -> Option<f64> {
        self.orientations
            .iter()
            .find(|(pid, _)| *pid == id)
            .map(|(_, angle)| *angle)
    }
}

impl GestureKind for RotateGesture {
    type Focus = RotateFocus;
    type Delta = f64;

    const NAME: &'static str = "rotate";
    const MIN_POINTERS: usize = 2;

    fn focus(snapshot: &PointerSnapshot) -> Option<RotateFocus> {
        if snapshot.pointer_count() < Self::MIN_POINTERS {
            return None;
        }
        let centroid = centroid(snapshot)?;
        let orientations = snapshot
            .pointers
            .iter()
            .filter_map(|p| {
                let offset = p.position() - centroid;
                (offset.length() > MIN_RADIUS).then(|| (p.id, offset.angle()))
            })
            .collect();
        Some(RotateFocus {
            centroid,
            orientations,
        })
    }

    fn delta(previous: &RotateFocus, current: &RotateFocus) -> Option<f64> {
        let (sin, cos, matched) = current.orientations.iter().fold(
            (0.0, 0.0, 0usize),
            |(sin, cos, n), (id, angle)| match previous.orientation_of(*id) {
                Some(before) => {
                    let change = wrap_radians(angle - before);
                    (sin + change.sin(), cos + change.cos(), n + 1)
                }
                None => (sin, cos, n),
            },
        );
        if matched == 0 {
            return None;
        }
        Some(sin.atan2(cos).to_degrees())
    }

    fn neutral() -> f64 {
        0.0
    }

    fn accumulate(total: f64, delta: f64) -> f64 {
        total + delta
    }
}

/// Wrap an angle into `(-π, π]`.
fn wrap_radians(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped <= -PI {
        wrapped + 2.0 * PI
    } else {
        wrapped
    }
}

impl GestureTracker<RotateGesture> {
    /// Rotation since the baseline, in degrees.
    pub fn rotation_degrees_delta(&self) -> f64 {
        self.delta()
    }

    /// Sum of all accepted rotation deltas of this gesture, in degrees.
    pub fn cumulative_rotation_degrees(&self) -> f64 {
        self.cumulative()
    }

    /// Centroid the rotation happens around.
    pub fn focus_point(&self) -> Option<Point2D> {
        self.current_focus().map(|f| f.centroid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::GestureListener;
    use multitouch_model::event::{MotionAction, PointerSample};

    #[derive(Default)]
    struct Spin {
        total: f64,
        updates: usize,
    }

    impl GestureListener<RotateGesture> for Spin {
        fn on_update(&mut self, gesture: &GestureTracker<RotateGesture>) -> bool {
            self.total += gesture.rotation_degrees_delta();
            self.updates += 1;
            true
        }
    }

    fn fingers_at(t: u64, action: MotionAction, degrees: f64) -> PointerSnapshot {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let r = 40.0;
        PointerSnapshot::new(
            t,
            action,
            vec![
                PointerSample::new(0, 200.0 + r * cos, 200.0 + r * sin, 1.0),
                PointerSample::new(1, 200.0 - r * cos, 200.0 - r * sin, 1.0),
            ],
        )
    }

    #[test]
    fn test_wrap_radians() {
        assert!((wrap_radians(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
        assert!((wrap_radians(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-12);
        assert!((wrap_radians(PI) - PI).abs() < 1e-12);
        assert!((wrap_radians(-PI) - PI).abs() < 1e-12);
    }

    #[test]
    fn test_ten_degree_steps_accumulate() {
        let mut d = RotateDetector::new(Spin::default());
        d.process_event(&fingers_at(0, MotionAction::PointerDown, 0.0));
        for step in 1..=9 {
            d.process_event(&fingers_at(step * 10, MotionAction::Move, step as f64 * 10.0));
        }
        assert_eq!(d.listener().updates, 9);
        assert!((d.listener().total - 90.0).abs() < 1e-9);
        assert!((d.tracker().cumulative_rotation_degrees() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_crossing_half_turn_has_no_jump() {
        let mut d = RotateDetector::new(Spin::default());
        d.process_event(&fingers_at(0, MotionAction::PointerDown, 170.0));
        d.process_event(&fingers_at(10, MotionAction::Move, 175.0));
        d.process_event(&fingers_at(20, MotionAction::Move, 185.0));
        d.process_event(&fingers_at(30, MotionAction::Move, 195.0));
        assert!((d.listener().total - 25.0).abs() < 1e-9);

        let mut back = RotateDetector::new(Spin::default());
        back.process_event(&fingers_at(0, MotionAction::PointerDown, -170.0));
        back.process_event(&fingers_at(10, MotionAction::Move, -185.0));
        assert!((back.listener().total + 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_circular_mean_of_three_fingers() {
        let previous = RotateFocus {
            centroid: Point2D::ZERO,
            orientations: vec![(0, 179f64.to_radians()), (1, 0.0), (2, -1.0)],
        };
        let current = RotateFocus {
            centroid: Point2D::ZERO,
            orientations: vec![(0, (-179f64).to_radians()), (1, 2f64.to_radians()), (2, -1.0)],
        };
        // Per-pointer changes: +2°, +2°, 0°.
        let delta = RotateGesture::delta(&previous, &current).unwrap();
        assert!(delta > 1.0 && delta < 2.0, "delta = {delta}");
    }

    #[test]
    fn test_unmatched_pointers_are_undefined() {
        let previous = RotateFocus {
            centroid: Point2D::ZERO,
            orientations: vec![(0, 0.0), (1, PI)],
        };
        let current = RotateFocus {
            centroid: Point2D::ZERO,
            orientations: vec![(7, 0.0), (8, PI)],
        };
        assert_eq!(RotateGesture::delta(&previous, &current), None);
    }

    #[test]
    fn test_pointer_on_centroid_has_no_orientation() {
        let snapshot = PointerSnapshot::moved(
            0,
            vec![
                PointerSample::new(0, 5.0, 5.0, 1.0),
                PointerSample::new(1, 5.0, 5.0, 1.0),
            ],
        );
        let focus = RotateGesture::focus(&snapshot).unwrap();
        assert!(focus.orientations.is_empty());
    }
}
