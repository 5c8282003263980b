//! Scripted gestures for demos and tests.
//!
//! Each gesture is described by a shape and a few parameters, expanded to
//! contact reports, and run through a [`TouchAdapter`] so the resulting
//! snapshots look exactly like adapted device input.

use multitouch_common::error::MultitouchResult;
use multitouch_model::event::{PointerId, PointerSnapshot, TimestampMs};
use multitouch_model::geometry::Point2D;
use serde::{Deserialize, Serialize};

use crate::adapter::{ContactPhase, ContactReport, TouchAdapter};

/// What the fingers do over the course of the gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GestureShape {
    /// One finger translated by `(dx, dy)`.
    Drag { dx: f64, dy: f64 },
    /// Two fingers whose distance is multiplied by `factor`.
    Pinch { factor: f64 },
    /// Two fingers turned about their midpoint by `degrees`.
    Rotate { degrees: f64 },
    /// Two horizontal fingers moved together by `pixels` down-screen.
    Shove { pixels: f64 },
}

/// A scripted gesture around a centre point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyntheticGesture {
    pub shape: GestureShape,
    pub centre: Point2D,
    /// Half the initial distance between two fingers.
    pub radius: f64,
    /// Number of move frames between touch-down and lift-off.
    pub steps: u32,
    pub frame_interval_ms: TimestampMs,
    pub pressure: f64,
}

impl SyntheticGesture {
    pub fn new(shape: GestureShape) -> Self {
        Self {
            shape,
            centre: Point2D::new(540.0, 960.0),
            radius: 100.0,
            steps: 30,
            frame_interval_ms: 16,
            pressure: 1.0,
        }
    }

    pub fn drag(dx: f64, dy: f64) -> Self {
        Self::new(GestureShape::Drag { dx, dy })
    }

    pub fn pinch(factor: f64) -> Self {
        Self::new(GestureShape::Pinch { factor })
    }

    pub fn rotate(degrees: f64) -> Self {
        Self::new(GestureShape::Rotate { degrees })
    }

    pub fn shove(pixels: f64) -> Self {
        Self::new(GestureShape::Shove { pixels })
    }

    pub fn centred_at(mut self, centre: Point2D) -> Self {
        self.centre = centre;
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = steps.max(1);
        self
    }

    pub fn with_frame_interval(mut self, interval_ms: TimestampMs) -> Self {
        self.frame_interval_ms = interval_ms;
        self
    }

    /// Finger positions at progress `t` in `[0, 1]`.
    fn positions(&self, t: f64) -> Vec<Point2D> {
        let c = self.centre;
        let r = self.radius;
        match self.shape {
            GestureShape::Drag { dx, dy } => vec![c + Point2D::new(dx, dy) * t],
            GestureShape::Pinch { factor } => {
                let half = r * (1.0 + (factor - 1.0) * t);
                vec![c + Point2D::new(-half, 0.0), c + Point2D::new(half, 0.0)]
            }
            GestureShape::Rotate { degrees } => {
                let (sin, cos) = (degrees * t).to_radians().sin_cos();
                let arm = Point2D::new(r * cos, r * sin);
                vec![c - arm, c + arm]
            }
            GestureShape::Shove { pixels } => {
                let centre = c + Point2D::new(0.0, pixels * t);
                vec![centre + Point2D::new(-r, 0.0), centre + Point2D::new(r, 0.0)]
            }
        }
    }

    /// The gesture as raw contact reports, one finger landing per frame.
    pub fn reports(&self) -> Vec<ContactReport> {
        let steps = self.steps.max(1);
        let mut reports = Vec::new();
        let mut t: TimestampMs = 0;

        let contact = |t: TimestampMs, id: usize, phase: ContactPhase, p: Point2D| {
            ContactReport::new(t, id as PointerId, phase, p.x, p.y).with_pressure(self.pressure)
        };

        for (id, p) in self.positions(0.0).into_iter().enumerate() {
            reports.push(contact(t, id, ContactPhase::Start, p));
            t += self.frame_interval_ms;
        }
        for step in 1..=steps {
            let progress = step as f64 / steps as f64;
            for (id, p) in self.positions(progress).into_iter().enumerate() {
                reports.push(contact(t, id, ContactPhase::Move, p));
            }
            t += self.frame_interval_ms;
        }
        for (id, p) in self.positions(1.0).into_iter().enumerate().rev() {
            reports.push(contact(t, id, ContactPhase::End, p));
            t += self.frame_interval_ms;
        }
        reports
    }

    /// The gesture as adapted snapshots.
    pub fn snapshots(&self) -> MultitouchResult<Vec<PointerSnapshot>> {
        let snapshots = TouchAdapter::new().process(&self.reports())?;
        tracing::debug!(shape = ?self.shape, count = snapshots.len(), "Synthetic gesture generated");
        Ok(snapshots)
    }

    /// Surface extent needed to contain the gesture, rounded up.
    pub fn extent(&self) -> (u32, u32) {
        let points: Vec<Point2D> = [0.0, 0.5, 1.0]
            .iter()
            .flat_map(|t| self.positions(*t))
            .collect();
        let max_x = points.iter().map(|p| p.x).fold(self.centre.x, f64::max);
        let max_y = points.iter().map(|p| p.y).fold(self.centre.y, f64::max);
        (max_x.max(0.0).ceil() as u32, max_y.max(0.0).ceil() as u32)
    }
}
