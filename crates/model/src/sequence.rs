//! Structural checks and summary statistics for snapshot sequences.
//!
//! Detectors tolerate malformed sequences; these helpers exist so tools
//! can report what a recorded stream actually contains.

use std::fmt;

use crate::event::{MotionAction, PointerSnapshot, SnapshotError, TimestampMs};

/// A problem found at a given position in a sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceIssue {
    /// Index of the offending snapshot.
    pub index: usize,
    pub kind: SequenceIssueKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SequenceIssueKind {
    /// The snapshot itself is malformed.
    Malformed(SnapshotError),
    /// Timestamp is earlier than its predecessor.
    TimeWentBackwards { previous: TimestampMs, current: TimestampMs },
    /// `Down` while pointers were still active (missed up/cancel).
    DownWhileActive { active: usize },
    /// Non-down action with no active pointers.
    NoActiveGesture { action: MotionAction },
    /// Pointer count does not match what the action implies.
    PointerCountMismatch { expected: usize, actual: usize },
}

impl fmt::Display for SequenceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}: ", self.index)?;
        match &self.kind {
            SequenceIssueKind::Malformed(e) => write!(f, "malformed snapshot ({e})"),
            SequenceIssueKind::TimeWentBackwards { previous, current } => {
                write!(f, "timestamp {current}ms precedes {previous}ms")
            }
            SequenceIssueKind::DownWhileActive { active } => {
                write!(f, "down with {active} pointer(s) still active")
            }
            SequenceIssueKind::NoActiveGesture { action } => {
                write!(f, "{action:?} without an active gesture")
            }
            SequenceIssueKind::PointerCountMismatch { expected, actual } => {
                write!(f, "expected {expected} pointer(s), found {actual}")
            }
        }
    }
}

/// Summary of a snapshot sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SequenceStats {
    pub snapshots: usize,
    /// Number of `Down` actions (gesture starts).
    pub gestures: usize,
    pub moves: usize,
    pub max_pointers: usize,
    pub duration_ms: TimestampMs,
}

/// Check a sequence for ordering and pointer-count consistency.
///
/// `PointerUp` snapshots still list the lifting pointer, matching how
/// platforms report them, so the count drops after that snapshot.
pub fn validate_sequence(snapshots: &[PointerSnapshot]) -> Vec<SequenceIssue> {
    let mut issues = Vec::new();
    let mut active = 0usize;
    let mut last_ts: Option<TimestampMs> = None;

    for (index, snapshot) in snapshots.iter().enumerate() {
        let mut push = |kind| issues.push(SequenceIssue { index, kind });

        if let Err(e) = snapshot.validate() {
            push(SequenceIssueKind::Malformed(e));
        }
        if let Some(previous) = last_ts {
            if snapshot.timestamp_ms < previous {
                push(SequenceIssueKind::TimeWentBackwards {
                    previous,
                    current: snapshot.timestamp_ms,
                });
            }
        }
        last_ts = Some(snapshot.timestamp_ms);

        let actual = snapshot.pointer_count();
        let expected = match snapshot.action {
            MotionAction::Down => {
                if active > 0 {
                    push(SequenceIssueKind::DownWhileActive { active });
                }
                active = 1;
                1
            }
            MotionAction::PointerDown => {
                if active == 0 {
                    push(SequenceIssueKind::NoActiveGesture {
                        action: snapshot.action,
                    });
                }
                active += 1;
                active
            }
            MotionAction::Move | MotionAction::PointerUp | MotionAction::Up => {
                if active == 0 {
                    push(SequenceIssueKind::NoActiveGesture {
                        action: snapshot.action,
                    });
                    active = actual;
                }
                let expected = active;
                match snapshot.action {
                    MotionAction::PointerUp => active = active.saturating_sub(1),
                    MotionAction::Up => active = 0,
                    _ => {}
                }
                expected
            }
            MotionAction::Cancel => {
                active = 0;
                actual
            }
        };

        if expected != actual {
            push(SequenceIssueKind::PointerCountMismatch { expected, actual });
        }
    }

    issues
}

/// Count snapshots, gestures and pointer usage.
pub fn sequence_stats(snapshots: &[PointerSnapshot]) -> SequenceStats {
    let duration_ms = match (snapshots.first(), snapshots.last()) {
        (Some(first), Some(last)) => last.timestamp_ms.saturating_sub(first.timestamp_ms),
        _ => 0,
    };
    SequenceStats {
        snapshots: snapshots.len(),
        gestures: snapshots
            .iter()
            .filter(|s| s.action == MotionAction::Down)
            .count(),
        moves: snapshots
            .iter()
            .filter(|s| s.action == MotionAction::Move)
            .count(),
        max_pointers: snapshots
            .iter()
            .map(PointerSnapshot::pointer_count)
            .max()
            .unwrap_or(0),
        duration_ms,
    }
}
