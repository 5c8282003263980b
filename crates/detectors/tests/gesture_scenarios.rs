use multitouch_detectors::{
    GestureListener, GestureState, GestureTracker, MoveDetector, MoveGesture, RotateDetector,
    RotateGesture, ScaleDetector, ScaleGesture, ShoveDetector, ShoveGesture,
};
use multitouch_model::event::{MotionAction, PointerSample, PointerSnapshot};
use multitouch_model::geometry::Point2D;

#[derive(Debug, Default)]
struct MoveLog {
    began: bool,
    deltas: Vec<Point2D>,
    ended: bool,
}

impl GestureListener<MoveGesture> for MoveLog {
    fn on_begin(&mut self, _gesture: &GestureTracker<MoveGesture>) -> bool {
        self.began = true;
        true
    }

    fn on_update(&mut self, gesture: &GestureTracker<MoveGesture>) -> bool {
        self.deltas.push(gesture.focus_delta());
        true
    }

    fn on_end(&mut self, _gesture: &GestureTracker<MoveGesture>) {
        self.ended = true;
    }
}

fn p(id: u32, x: f64, y: f64) -> PointerSample {
    PointerSample::new(id, x, y, 1.0)
}

#[test]
fn drag_add_finger_and_release() {
    let mut detector = MoveDetector::new(MoveLog::default());

    detector.process_event(&PointerSnapshot::down(0, 0.0, 0.0));
    assert_eq!(detector.state(), GestureState::Idle);

    detector.process_event(&PointerSnapshot::moved(16, vec![p(0, 10.0, 0.0)]));
    assert!(detector.listener().began);
    assert_eq!(detector.state(), GestureState::InProgress);
    assert_eq!(detector.listener().deltas, vec![Point2D::new(10.0, 0.0)]);

    let second_finger = PointerSnapshot::new(
        20,
        MotionAction::PointerDown,
        vec![p(0, 10.0, 0.0), p(1, 20.0, 0.0)],
    )
    .with_action_index(1);
    detector.process_event(&second_finger);
    detector.process_event(&PointerSnapshot::moved(
        32,
        vec![p(0, 10.0, 0.0), p(1, 20.0, 0.0)],
    ));
    assert_eq!(detector.listener().deltas[1], Point2D::ZERO);
    assert_eq!(detector.tracker().focus(), Point2D::new(10.0, 0.0));

    detector.process_event(&PointerSnapshot::up(48, vec![p(0, 10.0, 0.0)]));
    assert!(detector.listener().ended);
    assert_eq!(detector.state(), GestureState::Idle);
    assert!(detector.tracker().previous().is_none());
}

#[test]
fn cancel_ends_like_up() {
    let mut detector = MoveDetector::new(MoveLog::default());
    detector.process_event(&PointerSnapshot::down(0, 0.0, 0.0));
    detector.process_event(&PointerSnapshot::moved(10, vec![p(0, 1.0, 1.0)]));
    detector.process_event(&PointerSnapshot::new(
        20,
        MotionAction::Cancel,
        vec![p(0, 1.0, 1.0)],
    ));
    assert!(detector.listener().ended);
    assert!(!detector.is_in_progress());
}

#[derive(Default)]
struct Accept;

impl GestureListener<MoveGesture> for Accept {
    fn on_update(&mut self, _gesture: &GestureTracker<MoveGesture>) -> bool {
        true
    }
}

impl GestureListener<ScaleGesture> for Accept {
    fn on_update(&mut self, _gesture: &GestureTracker<ScaleGesture>) -> bool {
        true
    }
}

impl GestureListener<RotateGesture> for Accept {
    fn on_update(&mut self, _gesture: &GestureTracker<RotateGesture>) -> bool {
        true
    }
}

impl GestureListener<ShoveGesture> for Accept {
    fn on_update(&mut self, _gesture: &GestureTracker<ShoveGesture>) -> bool {
        true
    }
}

/// Two fingers spreading, turning and drifting down at the same time.
fn two_finger_stream() -> Vec<PointerSnapshot> {
    let mut stream = vec![PointerSnapshot::down(0, 180.0, 300.0)];
    let frame = |t: u64, action: MotionAction, step: f64| {
        let half = 20.0 + 2.0 * step;
        let angle = (3.0 * step).to_radians();
        let centre = Point2D::new(200.0, 300.0 + step);
        let (sin, cos) = angle.sin_cos();
        PointerSnapshot::new(
            t,
            action,
            vec![
                p(0, centre.x - half * cos, centre.y - half * sin),
                p(1, centre.x + half * cos, centre.y + half * sin),
            ],
        )
    };
    stream.push(frame(8, MotionAction::PointerDown, 0.0).with_action_index(1));
    for step in 1..=10 {
        stream.push(frame(8 + step * 16, MotionAction::Move, step as f64));
    }
    stream.push(frame(200, MotionAction::PointerUp, 10.0).with_action_index(1));
    stream.push(PointerSnapshot::up(216, vec![p(0, 160.0, 310.0)]));
    stream
}

#[test]
fn independent_detectors_share_one_stream() {
    let mut mover = MoveDetector::new(Accept);
    let mut scaler = ScaleDetector::new(Accept);
    let mut rotator = RotateDetector::new(Accept);
    let mut shover = ShoveDetector::new(Accept);

    let mut scale = 1.0;
    let mut rotation = 0.0;
    let mut shove = 0.0;

    for event in two_finger_stream() {
        mover.process_event(&event);
        scaler.process_event(&event);
        rotator.process_event(&event);
        shover.process_event(&event);

        if event.action == MotionAction::Move {
            scale *= scaler.tracker().scale_factor();
            rotation += rotator.tracker().rotation_degrees_delta();
            shove += shover.tracker().shove_pixels_delta();
        }
    }

    assert!((scale - 40.0 / 20.0).abs() < 1e-9, "scale = {scale}");
    assert!((rotation - 30.0).abs() < 1e-9, "rotation = {rotation}");
    // The axis tilts as the fingers turn, so the shove is close to but not
    // exactly the 10 px the centre drifted down.
    assert!(shove > 9.0 && shove < 10.0, "shove = {shove}");

    for in_progress in [
        mover.is_in_progress(),
        scaler.is_in_progress(),
        rotator.is_in_progress(),
        shover.is_in_progress(),
    ] {
        assert!(!in_progress);
    }
}
