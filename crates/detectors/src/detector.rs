//! The gesture state machine shared by every detector.
//!
//! A detector is idle until a down establishes a baseline snapshot. The
//! first move after that offers the gesture to the listener; once accepted
//! the detector is in progress and every move is compared against the
//! baseline. Accepted updates slide the baseline forward, rejected ones
//! keep it so the next delta is measured against the older snapshot.

use std::fmt;

use multitouch_common::config::DetectorConfig;
use multitouch_model::event::{MotionAction, PointerSnapshot, TimestampMs};
use serde::Serialize;

use crate::listener::GestureListener;

/// Per-gesture behaviour plugged into the state machine.
pub trait GestureKind: fmt::Debug {
    /// Value derived from a single snapshot.
    type Focus: Clone + fmt::Debug;

    /// Change between two focus values.
    type Delta: Copy + fmt::Debug + PartialEq;

    /// Short name used in logs.
    const NAME: &'static str;

    /// Pointers required before the gesture may begin.
    const MIN_POINTERS: usize = 1;

    /// Focus of a snapshot; `None` when it is undefined for this kind.
    fn focus(snapshot: &PointerSnapshot) -> Option<Self::Focus>;

    /// Delta from `previous` to `current`; `None` when the ratio or
    /// angle involved is undefined.
    fn delta(previous: &Self::Focus, current: &Self::Focus) -> Option<Self::Delta>;

    /// The delta reported when nothing changed.
    fn neutral() -> Self::Delta;

    /// Fold `delta` into a running `total`.
    fn accumulate(total: Self::Delta, delta: Self::Delta) -> Self::Delta;
}

/// Whether a gesture is currently being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureState {
    #[default]
    Idle,
    InProgress,
}

/// How a move was judged against the current baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    /// Deliver to the listener.
    Accept,
    /// Pressure collapsed; drop without touching the baseline.
    PressureGated,
    /// Undefined ratio or focus; drop and replace the baseline.
    Degenerate,
}

/// Snapshot bookkeeping and derived values of one detector.
///
/// Listeners receive a shared reference to this during callbacks; the
/// kind-specific accessors (focus delta, scale factor, ...) live in
/// `impl GestureTracker<Kind>` blocks next to each kind.
#[derive(Debug, Clone)]
pub struct GestureTracker<K: GestureKind> {
    config: DetectorConfig,
    state: GestureState,
    previous: Option<PointerSnapshot>,
    current: Option<PointerSnapshot>,
    previous_focus: Option<K::Focus>,
    current_focus: Option<K::Focus>,
    delta: K::Delta,
    cumulative_base: K::Delta,
    cumulative: K::Delta,
    time_delta_ms: TimestampMs,
    previous_pressure: f64,
    current_pressure: f64,
}

impl<K: GestureKind> GestureTracker<K> {
    fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            state: GestureState::Idle,
            previous: None,
            current: None,
            previous_focus: None,
            current_focus: None,
            delta: K::neutral(),
            cumulative_base: K::neutral(),
            cumulative: K::neutral(),
            time_delta_ms: 0,
            previous_pressure: 0.0,
            current_pressure: 0.0,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    /// `true` while a gesture is being reported.
    pub fn is_in_progress(&self) -> bool {
        self.state == GestureState::InProgress
    }

    /// Milliseconds between the baseline and the current snapshot.
    pub fn time_delta_ms(&self) -> TimestampMs {
        self.time_delta_ms
    }

    /// Timestamp of the snapshot being processed.
    pub fn event_time_ms(&self) -> Option<TimestampMs> {
        self.current.as_ref().map(|s| s.timestamp_ms)
    }

    /// Baseline snapshot deltas are measured against.
    pub fn previous(&self) -> Option<&PointerSnapshot> {
        self.previous.as_ref()
    }

    /// Snapshot being processed.
    pub fn current(&self) -> Option<&PointerSnapshot> {
        self.current.as_ref()
    }

    pub fn previous_focus(&self) -> Option<&K::Focus> {
        self.previous_focus.as_ref()
    }

    pub fn current_focus(&self) -> Option<&K::Focus> {
        self.current_focus.as_ref()
    }

    /// Change since the baseline.
    pub fn delta(&self) -> K::Delta {
        self.delta
    }

    /// All accepted deltas of this gesture folded together, including the
    /// one being processed.
    pub fn cumulative(&self) -> K::Delta {
        self.cumulative
    }

    /// `current / previous` pressure of the action pointer; `None` when the
    /// baseline pressure is zero or missing.
    pub fn pressure_ratio(&self) -> Option<f64> {
        if self.previous_pressure > 0.0 {
            Some(self.current_pressure / self.previous_pressure)
        } else {
            None
        }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    /// Take `snapshot` as both baseline and current.
    fn set_baseline(&mut self, snapshot: &PointerSnapshot) {
        self.reset();
        let focus = K::focus(snapshot);
        let pressure = snapshot.action_pressure().unwrap_or(0.0);
        self.previous = Some(snapshot.clone());
        self.current = Some(snapshot.clone());
        self.previous_focus = focus.clone();
        self.current_focus = focus;
        self.previous_pressure = pressure;
        self.current_pressure = pressure;
    }

    /// Capture `snapshot` as current and derive everything from it.
    fn update(&mut self, snapshot: &PointerSnapshot) -> Verdict {
        let Some(previous) = self.previous.as_ref() else {
            return Verdict::Degenerate;
        };

        self.time_delta_ms = snapshot.timestamp_ms.saturating_sub(previous.timestamp_ms);
        self.previous_pressure = previous.action_pressure().unwrap_or(0.0);
        self.current_pressure = snapshot.action_pressure().unwrap_or(0.0);
        self.current_focus = K::focus(snapshot);

        let delta = if pointer_set_changed(previous, snapshot) {
            // The focus jumps when a finger lands or lifts even without motion.
            Some(K::neutral())
        } else {
            match (&self.previous_focus, &self.current_focus) {
                (Some(prev), Some(curr)) => K::delta(prev, curr),
                _ => None,
            }
        };
        self.current = Some(snapshot.clone());

        // The pressure gate wins over an undefined delta: a gated event
        // must leave the baseline alone.
        let verdict = match (self.pressure_ratio(), delta) {
            (None, _) => Verdict::Degenerate,
            (Some(ratio), _) if !(ratio > self.config.pressure_threshold) => {
                Verdict::PressureGated
            }
            (_, None) => Verdict::Degenerate,
            _ => Verdict::Accept,
        };

        self.delta = delta.unwrap_or_else(K::neutral);
        self.cumulative = match verdict {
            Verdict::Accept => K::accumulate(self.cumulative_base, self.delta),
            _ => self.cumulative_base,
        };
        verdict
    }

    /// Slide the baseline to the current snapshot.
    fn advance_baseline(&mut self, fold_delta: bool) {
        self.previous = self.current.clone();
        self.previous_focus = self.current_focus.clone();
        if fold_delta {
            self.cumulative_base = self.cumulative;
        }
    }
}

fn pointer_set_changed(previous: &PointerSnapshot, current: &PointerSnapshot) -> bool {
    previous.pointer_count() != current.pointer_count()
        || current
            .pointers
            .iter()
            .any(|p| previous.pointer_by_id(p.id).is_none())
}

/// A gesture state machine of kind `K` reporting to listener `L`.
#[derive(Debug)]
pub struct GestureDetector<K: GestureKind, L> {
    tracker: GestureTracker<K>,
    listener: L,
}

impl<K: GestureKind, L: GestureListener<K>> GestureDetector<K, L> {
    /// Create a detector with the default pressure threshold.
    pub fn new(listener: L) -> Self {
        Self::with_config(DetectorConfig::default(), listener)
    }

    pub fn with_config(config: DetectorConfig, listener: L) -> Self {
        Self {
            tracker: GestureTracker::new(config),
            listener,
        }
    }

    /// Feed one snapshot through the state machine.
    ///
    /// Returns `false` when the snapshot was ignored.
    pub fn process_event(&mut self, event: &PointerSnapshot) -> bool {
        match self.tracker.state {
            GestureState::Idle => self.handle_idle(event),
            GestureState::InProgress => self.handle_in_progress(event),
        }
    }

    /// Drop all tracking state and return to idle without notifying.
    pub fn reset(&mut self) {
        self.tracker.reset();
    }

    pub fn is_in_progress(&self) -> bool {
        self.tracker.is_in_progress()
    }

    pub fn state(&self) -> GestureState {
        self.tracker.state()
    }

    pub fn tracker(&self) -> &GestureTracker<K> {
        &self.tracker
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn into_listener(self) -> L {
        self.listener
    }

    fn handle_idle(&mut self, event: &PointerSnapshot) -> bool {
        match event.action {
            MotionAction::Down | MotionAction::PointerDown => {
                // Also covers a missed up/cancel: stale snapshots are replaced.
                self.tracker.set_baseline(event);
                tracing::trace!(
                    gesture = K::NAME,
                    pointers = event.pointer_count(),
                    t = event.timestamp_ms,
                    "baseline captured"
                );
                true
            }
            MotionAction::Move => {
                let Some(baseline) = self.tracker.previous.as_ref() else {
                    tracing::trace!(gesture = K::NAME, "move without a baseline ignored");
                    return false;
                };
                if event.timestamp_ms < baseline.timestamp_ms {
                    tracing::trace!(gesture = K::NAME, "move older than baseline ignored");
                    return false;
                }
                if event.pointer_count() < K::MIN_POINTERS {
                    return false;
                }

                let verdict = self.tracker.update(event);
                if !self.listener.on_begin(&self.tracker) {
                    tracing::trace!(gesture = K::NAME, "begin vetoed by listener");
                    return true;
                }
                self.tracker.state = GestureState::InProgress;
                tracing::debug!(
                    gesture = K::NAME,
                    pointers = event.pointer_count(),
                    t = event.timestamp_ms,
                    "gesture began"
                );
                self.deliver(verdict);
                true
            }
            MotionAction::Up | MotionAction::Cancel => {
                // A tap ends without a gesture; its touch is gone.
                let had_baseline = self.tracker.previous.is_some();
                self.tracker.reset();
                had_baseline
            }
            MotionAction::PointerUp => false,
        }
    }

    fn handle_in_progress(&mut self, event: &PointerSnapshot) -> bool {
        match event.action {
            MotionAction::Up | MotionAction::Cancel => {
                self.listener.on_end(&self.tracker);
                tracing::debug!(
                    gesture = K::NAME,
                    action = ?event.action,
                    t = event.timestamp_ms,
                    "gesture ended"
                );
                self.tracker.reset();
                true
            }
            MotionAction::Down => {
                tracing::debug!(
                    gesture = K::NAME,
                    t = event.timestamp_ms,
                    "down while in progress, restarting tracking"
                );
                self.tracker.set_baseline(event);
                true
            }
            MotionAction::Move => {
                let stale = self
                    .tracker
                    .previous
                    .as_ref()
                    .map_or(true, |b| event.timestamp_ms < b.timestamp_ms);
                if stale {
                    tracing::trace!(gesture = K::NAME, "out-of-order move ignored");
                    return false;
                }
                let verdict = self.tracker.update(event);
                self.deliver(verdict);
                true
            }
            MotionAction::PointerDown | MotionAction::PointerUp => false,
        }
    }

    fn deliver(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Accept => {
                tracing::trace!(
                    gesture = K::NAME,
                    delta = ?self.tracker.delta,
                    dt_ms = self.tracker.time_delta_ms,
                    "update"
                );
                if self.listener.on_update(&self.tracker) {
                    self.tracker.advance_baseline(true);
                }
            }
            Verdict::PressureGated => {
                tracing::trace!(
                    gesture = K::NAME,
                    ratio = ?self.tracker.pressure_ratio(),
                    "update dropped: pressure falling"
                );
            }
            Verdict::Degenerate => {
                tracing::debug!(
                    gesture = K::NAME,
                    "update dropped: undefined focus or pressure, baseline replaced"
                );
                self.tracker.advance_baseline(false);
            }
        }
    }
}
