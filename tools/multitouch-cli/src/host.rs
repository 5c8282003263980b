//! Demo host: feeds every snapshot to all four detectors and composes
//! their outputs into an image transform.

use multitouch_common::config::{AppConfig, DetectorConfig, HostConfig};
use multitouch_common::error::MultitouchResult;
use multitouch_detectors::{
    GestureListener, GestureTracker, MoveDetector, MoveGesture, RotateDetector, RotateGesture,
    ScaleDetector, ScaleGesture, ShoveDetector, ShoveGesture,
};
use multitouch_input::EventSource;
use multitouch_model::event::PointerSnapshot;
use multitouch_model::geometry::{Affine2D, Point2D};
use serde::Serialize;

/// Image position accumulated from move deltas.
#[derive(Debug, Default)]
struct FocusTracking {
    focus: Point2D,
}

impl GestureListener<MoveGesture> for FocusTracking {
    fn on_update(&mut self, gesture: &GestureTracker<MoveGesture>) -> bool {
        self.focus += gesture.focus_delta();
        true
    }
}

/// Scale accumulated from pinch factors, kept within `[min, max]`.
#[derive(Debug)]
struct ScaleTracking {
    scale: f64,
    min: f64,
    max: f64,
}

impl GestureListener<ScaleGesture> for ScaleTracking {
    fn on_update(&mut self, gesture: &GestureTracker<ScaleGesture>) -> bool {
        self.scale = (self.scale * gesture.scale_factor()).clamp(self.min, self.max);
        true
    }
}

#[derive(Debug, Default)]
struct RotationTracking {
    degrees: f64,
}

impl GestureListener<RotateGesture> for RotationTracking {
    fn on_update(&mut self, gesture: &GestureTracker<RotateGesture>) -> bool {
        self.degrees += gesture.rotation_degrees_delta();
        true
    }
}

/// Opacity driven by shoves: pushing the fingers up-screen raises it.
#[derive(Debug)]
struct AlphaTracking {
    alpha: f64,
}

impl GestureListener<ShoveGesture> for AlphaTracking {
    fn on_update(&mut self, gesture: &GestureTracker<ShoveGesture>) -> bool {
        self.alpha = (self.alpha - gesture.shove_pixels_delta()).clamp(0.0, 255.0);
        true
    }
}

/// Accumulated transform parameters after the last event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HostState {
    pub scale: f64,
    pub rotation_degrees: f64,
    pub focus: Point2D,
    pub alpha: u8,
}

/// Outcome of replaying a whole source.
#[derive(Debug, Clone, Serialize)]
pub struct ReplaySummary {
    pub events: u64,
    /// Events no detector reacted to.
    pub ignored: u64,
    pub state: HostState,
    pub matrix: Affine2D,
}

pub struct TouchHost {
    config: HostConfig,
    mover: MoveDetector<FocusTracking>,
    scaler: ScaleDetector<ScaleTracking>,
    rotator: RotateDetector<RotationTracking>,
    shover: ShoveDetector<AlphaTracking>,
    events: u64,
    ignored: u64,
}

impl TouchHost {
    pub fn new(detector: DetectorConfig, config: HostConfig) -> Self {
        let scaler = ScaleDetector::with_config(
            detector,
            ScaleTracking {
                scale: config.initial_scale,
                min: config.min_scale,
                max: config.max_scale,
            },
        );
        let shover = ShoveDetector::with_config(
            detector,
            AlphaTracking {
                alpha: f64::from(config.initial_alpha),
            },
        );
        Self {
            mover: MoveDetector::with_config(detector, FocusTracking::default()),
            scaler,
            rotator: RotateDetector::with_config(detector, RotationTracking::default()),
            shover,
            config,
            events: 0,
            ignored: 0,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.detector, config.host.clone())
    }

    /// Feed one event to every detector and return the resulting transform.
    pub fn on_touch(&mut self, event: &PointerSnapshot) -> Affine2D {
        let handled = [
            self.scaler.process_event(event),
            self.rotator.process_event(event),
            self.mover.process_event(event),
            self.shover.process_event(event),
        ];
        self.events += 1;
        if !handled.contains(&true) {
            self.ignored += 1;
            tracing::debug!(t = event.timestamp_ms, action = ?event.action, "Event ignored by all detectors");
        }
        self.matrix()
    }

    pub fn state(&self) -> HostState {
        HostState {
            scale: self.scaler.listener().scale,
            rotation_degrees: self.rotator.listener().degrees,
            focus: self.mover.listener().focus,
            // Clamped to [0, 255] on every update.
            alpha: self.shover.listener().alpha.round() as u8,
        }
    }

    /// Scale, then rotate about the scaled image centre, then move that
    /// centre to the focus.
    pub fn matrix(&self) -> Affine2D {
        let state = self.state();
        let centre = Point2D::new(
            self.config.image_width * state.scale / 2.0,
            self.config.image_height * state.scale / 2.0,
        );
        Affine2D::IDENTITY
            .post_scale(state.scale, state.scale)
            .post_rotate(state.rotation_degrees, centre)
            .post_translate(state.focus.x - centre.x, state.focus.y - centre.y)
    }

    /// Drain `source` through the host.
    pub fn replay(&mut self, source: &mut dyn EventSource) -> MultitouchResult<ReplaySummary> {
        tracing::info!(source = source.name(), "Replay started");
        while let Some(event) = source.poll()? {
            self.on_touch(&event);
        }
        let summary = self.summary();
        tracing::info!(events = summary.events, ignored = summary.ignored, "Replay finished");
        Ok(summary)
    }

    pub fn summary(&self) -> ReplaySummary {
        ReplaySummary {
            events: self.events,
            ignored: self.ignored,
            state: self.state(),
            matrix: self.matrix(),
        }
    }

    /// `true` while any detector is tracking a gesture.
    pub fn is_gesturing(&self) -> bool {
        self.mover.is_in_progress()
            || self.scaler.is_in_progress()
            || self.rotator.is_in_progress()
            || self.shover.is_in_progress()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multitouch_input::{MemorySource, SyntheticGesture};

    fn host() -> TouchHost {
        TouchHost::new(DetectorConfig::default(), HostConfig::default())
    }

    fn replay(gesture: SyntheticGesture) -> ReplaySummary {
        let mut source = MemorySource::new("test", gesture.snapshots().unwrap());
        let mut host = host();
        let summary = host.replay(&mut source).unwrap();
        assert!(!host.is_gesturing());
        summary
    }

    #[test]
    fn test_initial_state_matches_config() {
        let host = host();
        let state = host.state();
        assert_eq!(state.scale, 0.4);
        assert_eq!(state.rotation_degrees, 0.0);
        assert_eq!(state.focus, Point2D::ZERO);
        assert_eq!(state.alpha, 255);

        // Image centre sits at the origin before any move.
        let centre = host.matrix().apply(Point2D::new(256.0, 256.0));
        assert!(centre.x.abs() < 1e-9 && centre.y.abs() < 1e-9);
    }

    #[test]
    fn test_drag_moves_focus() {
        let summary = replay(SyntheticGesture::drag(120.0, -40.0).with_steps(6));
        assert!((summary.state.focus.x - 120.0).abs() < 1e-9);
        assert!((summary.state.focus.y + 40.0).abs() < 1e-9);
        assert_eq!(summary.state.scale, 0.4);
    }

    #[test]
    fn test_pinch_scales_and_clamps() {
        let summary = replay(SyntheticGesture::pinch(2.0));
        assert!((summary.state.scale - 0.8).abs() < 1e-9);

        let summary = replay(SyntheticGesture::pinch(50.0).with_radius(10.0));
        assert_eq!(summary.state.scale, 10.0);

        let summary = replay(SyntheticGesture::pinch(0.05));
        assert_eq!(summary.state.scale, 0.1);
    }

    #[test]
    fn test_rotate_accumulates_degrees() {
        let summary = replay(SyntheticGesture::rotate(90.0).with_steps(9));
        assert!((summary.state.rotation_degrees - 90.0).abs() < 1e-9);
        assert!(summary.state.focus.x.abs() < 1e-9);
    }

    #[test]
    fn test_shove_up_cannot_exceed_full_alpha() {
        let summary = replay(SyntheticGesture::shove(-80.0));
        assert_eq!(summary.state.alpha, 255);

        let summary = replay(SyntheticGesture::shove(80.0).with_steps(8));
        assert_eq!(summary.state.alpha, 175);
    }

    #[test]
    fn test_counts_events_no_detector_handled() {
        let summary = replay(SyntheticGesture::pinch(1.5).with_steps(4));
        // Down, pointer-down, 4 moves, pointer-up, up.
        assert_eq!(summary.events, 8);
        // Pointer-up is ignored by every detector in progress.
        assert_eq!(summary.ignored, 1);
    }

    #[test]
    fn test_matrix_rotates_about_scaled_centre() {
        let mut host = host();
        let mut source = MemorySource::new(
            "rotate",
            SyntheticGesture::rotate(90.0)
                .with_steps(3)
                .snapshots()
                .unwrap(),
        );
        host.replay(&mut source).unwrap();
        let m = host.matrix();
        // The scaled centre (102.4, 102.4) is the pivot and ends at the focus.
        let centre = m.apply(Point2D::new(256.0, 256.0));
        assert!(centre.x.abs() < 1e-9 && centre.y.abs() < 1e-9);
        // +x in image space now points down-screen.
        let right = m.apply(Point2D::new(356.0, 256.0));
        assert!(right.x.abs() < 1e-9);
        assert!((right.y - 40.0).abs() < 1e-9);
    }
}
