//! Converts per-contact touch reports into pointer snapshots.
//!
//! Platforms usually report each contact on its own (a finger started,
//! moved, ended). The detectors want the Android shape instead: one
//! snapshot per event holding every active pointer, with an action saying
//! what happened and which pointer did it. The adapter keeps the set of
//! active contacts in first-touch order so indices stay stable.

use multitouch_common::clock::RateController;
use multitouch_common::error::{MultitouchError, MultitouchResult};
use multitouch_model::event::{MotionAction, PointerId, PointerSample, PointerSnapshot, TimestampMs};
use serde::{Deserialize, Serialize};

/// Lifecycle stage of one contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// A single contact report from a touch surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactReport {
    pub id: PointerId,
    pub phase: ContactPhase,
    pub x: f64,
    pub y: f64,
    #[serde(default = "full_pressure")]
    pub pressure: f64,
    pub t: TimestampMs,
}

fn full_pressure() -> f64 {
    1.0
}

impl ContactReport {
    pub fn new(t: TimestampMs, id: PointerId, phase: ContactPhase, x: f64, y: f64) -> Self {
        Self {
            id,
            phase,
            x,
            y,
            pressure: 1.0,
            t,
        }
    }

    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = pressure;
        self
    }

    fn sample(&self) -> PointerSample {
        PointerSample::new(self.id, self.x, self.y, self.pressure)
    }
}

/// Stateful contact-to-snapshot converter.
///
/// Consecutive move reports with the same timestamp are coalesced into a
/// single `Move` snapshot, so a frame in which several fingers moved
/// produces one event.
#[derive(Debug, Clone, Default)]
pub struct TouchAdapter {
    contacts: Vec<PointerSample>,
    pending_move: Option<TimestampMs>,
    throttle: Option<RateController>,
    last_t: Option<TimestampMs>,
    dropped_moves: u64,
}

impl TouchAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit at most `hz` move snapshots per second. Starts and ends are
    /// never throttled.
    pub fn with_move_rate(hz: u32) -> Self {
        Self {
            throttle: Some(RateController::new(hz)),
            ..Self::default()
        }
    }

    /// Currently touching contacts, in first-touch order.
    pub fn active_contacts(&self) -> &[PointerSample] {
        &self.contacts
    }

    /// Move snapshots suppressed by the rate limit so far.
    pub fn dropped_moves(&self) -> u64 {
        self.dropped_moves
    }

    /// Feed one report.
    pub fn push(&mut self, report: ContactReport) -> MultitouchResult<Vec<PointerSnapshot>> {
        self.process(&[report])
    }

    /// Feed a batch of reports and emit the resulting snapshots in order.
    ///
    /// A trailing run of moves is emitted at the end of the batch rather
    /// than held back for the next call. A rejected report fails the whole
    /// batch and leaves the adapter as it was before the call.
    pub fn process(&mut self, reports: &[ContactReport]) -> MultitouchResult<Vec<PointerSnapshot>> {
        let mut staged = self.clone();
        let out = staged.apply(reports)?;
        *self = staged;
        Ok(out)
    }

    fn apply(&mut self, reports: &[ContactReport]) -> MultitouchResult<Vec<PointerSnapshot>> {
        let mut out = Vec::new();
        for report in reports {
            self.check(report)?;
            if self.pending_move.is_some_and(|t| t != report.t || report.phase != ContactPhase::Move) {
                self.flush_move(&mut out);
            }
            self.last_t = Some(report.t);

            match report.phase {
                ContactPhase::Start => {
                    self.contacts.push(report.sample());
                    let index = self.contacts.len() - 1;
                    let action = if index == 0 {
                        MotionAction::Down
                    } else {
                        MotionAction::PointerDown
                    };
                    if let Some(throttle) = self.throttle.as_mut() {
                        throttle.reset();
                    }
                    out.push(self.snapshot(report.t, action, index));
                }
                ContactPhase::Move => {
                    let index = self.index_of(report.id)?;
                    self.contacts[index] = report.sample();
                    self.pending_move = Some(report.t);
                }
                ContactPhase::End => {
                    let index = self.index_of(report.id)?;
                    self.contacts[index] = report.sample();
                    let action = if self.contacts.len() == 1 {
                        MotionAction::Up
                    } else {
                        MotionAction::PointerUp
                    };
                    out.push(self.snapshot(report.t, action, index));
                    self.contacts.remove(index);
                }
                ContactPhase::Cancel => {
                    if self.contacts.is_empty() {
                        tracing::debug!(id = report.id, "Cancel with no active contacts ignored");
                        continue;
                    }
                    out.push(self.snapshot(report.t, MotionAction::Cancel, 0));
                    self.contacts.clear();
                }
            }
        }
        self.flush_move(&mut out);
        Ok(out)
    }

    /// Drop all contacts without emitting anything.
    pub fn reset(&mut self) {
        self.contacts.clear();
        self.pending_move = None;
        self.last_t = None;
        if let Some(throttle) = self.throttle.as_mut() {
            throttle.reset();
        }
    }

    fn check(&self, report: &ContactReport) -> MultitouchResult<()> {
        if !report.x.is_finite() || !report.y.is_finite() {
            return Err(MultitouchError::adapter(format!(
                "contact {} has a non-finite position",
                report.id
            )));
        }
        if !report.pressure.is_finite() || report.pressure < 0.0 {
            return Err(MultitouchError::adapter(format!(
                "contact {} has invalid pressure {}",
                report.id, report.pressure
            )));
        }
        if let Some(last) = self.last_t {
            if report.t < last {
                return Err(MultitouchError::adapter(format!(
                    "report at {} ms is older than previous report at {last} ms",
                    report.t
                )));
            }
        }
        if report.phase == ContactPhase::Start && self.contacts.iter().any(|c| c.id == report.id) {
            return Err(MultitouchError::adapter(format!(
                "contact {} started twice",
                report.id
            )));
        }
        Ok(())
    }

    fn index_of(&self, id: PointerId) -> MultitouchResult<usize> {
        self.contacts
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| MultitouchError::adapter(format!("unknown contact {id}")))
    }

    fn flush_move(&mut self, out: &mut Vec<PointerSnapshot>) {
        let Some(t) = self.pending_move.take() else {
            return;
        };
        if let Some(throttle) = self.throttle.as_mut() {
            if !throttle.should_tick(t) {
                self.dropped_moves += 1;
                tracing::trace!(t, "Move throttled");
                return;
            }
        }
        out.push(self.snapshot(t, MotionAction::Move, 0));
    }

    fn snapshot(&self, t: TimestampMs, action: MotionAction, index: usize) -> PointerSnapshot {
        PointerSnapshot::new(t, action, self.contacts.clone()).with_action_index(index)
    }
}
