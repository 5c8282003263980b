//! Listener callbacks invoked synchronously by a detector.

use crate::detector::{GestureKind, GestureTracker};

/// Callbacks for a gesture of kind `K`.
///
/// Every method has a default, so implementors only override what they
/// need. The defaults accept the gesture start, keep the baseline on
/// updates, and ignore the end.
pub trait GestureListener<K: GestureKind> {
    /// The first move after a down. Return `false` to keep the detector idle.
    fn on_begin(&mut self, _gesture: &GestureTracker<K>) -> bool {
        true
    }

    /// An in-progress move passed the pressure gate. Return `true` to make
    /// this snapshot the new baseline; `false` measures the next delta
    /// against the current baseline again.
    fn on_update(&mut self, _gesture: &GestureTracker<K>) -> bool {
        false
    }

    /// The gesture ended through an up or cancel.
    fn on_end(&mut self, _gesture: &GestureTracker<K>) {}
}

impl<K: GestureKind, L: GestureListener<K> + ?Sized> GestureListener<K> for &mut L {
    fn on_begin(&mut self, gesture: &GestureTracker<K>) -> bool {
        (**self).on_begin(gesture)
    }

    fn on_update(&mut self, gesture: &GestureTracker<K>) -> bool {
        (**self).on_update(gesture)
    }

    fn on_end(&mut self, gesture: &GestureTracker<K>) {
        (**self).on_end(gesture)
    }
}

/// Adapts an update closure into a listener; begin is always accepted.
#[derive(Debug, Clone)]
pub struct FnListener<F>(pub F);

impl<K, F> GestureListener<K> for FnListener<F>
where
    K: GestureKind,
    F: FnMut(&GestureTracker<K>) -> bool,
{
    fn on_update(&mut self, gesture: &GestureTracker<K>) -> bool {
        (self.0)(gesture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::GestureDetector;
    use crate::move_gesture::MoveGesture;
    use multitouch_model::event::{PointerSample, PointerSnapshot};

    #[derive(Default)]
    struct Defaults;

    impl GestureListener<MoveGesture> for Defaults {}

    fn drag(detector: &mut GestureDetector<MoveGesture, impl GestureListener<MoveGesture>>) {
        detector.process_event(&PointerSnapshot::down(0, 0.0, 0.0));
        detector.process_event(&PointerSnapshot::moved(
            10,
            vec![PointerSample::new(0, 3.0, 4.0, 1.0)],
        ));
        detector.process_event(&PointerSnapshot::moved(
            20,
            vec![PointerSample::new(0, 6.0, 8.0, 1.0)],
        ));
    }

    #[test]
    fn test_default_listener_never_advances_baseline() {
        let mut d = GestureDetector::<MoveGesture, _>::new(Defaults);
        drag(&mut d);
        assert!(d.is_in_progress());
        assert_eq!(d.tracker().previous().map(|s| s.timestamp_ms), Some(0));
    }

    #[test]
    fn test_fn_listener_sees_updates() {
        let mut seen = Vec::new();
        {
            let mut d = GestureDetector::<MoveGesture, _>::new(FnListener(
                |g: &GestureTracker<MoveGesture>| {
                    seen.push(g.focus_delta());
                    true
                },
            ));
            drag(&mut d);
        }
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].x, 3.0);
    }

    #[test]
    fn test_borrowed_listener_keeps_ownership() {
        let mut defaults = Defaults;
        let mut d = GestureDetector::<MoveGesture, _>::new(&mut defaults);
        drag(&mut d);
        assert!(d.is_in_progress());
    }
}
