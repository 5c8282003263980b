//! Pointer snapshot types for multitouch event streams.
//!
//! A snapshot is the minimal projection of a platform touch event that the
//! detectors consume: what happened (the action), which pointer caused it,
//! where every active pointer is, and when. Streams are stored as JSONL
//! with an optional `# {header}` first line.

use serde::{Deserialize, Serialize};

use crate::geometry::Point2D;

/// Monotonic timestamp in milliseconds since the stream started.
pub type TimestampMs = u64;

/// Stable identifier of one touch contact for its whole lifetime.
pub type PointerId = u32;

/// What happened in a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionAction {
    /// First pointer touched down.
    Down,
    /// An additional pointer touched down while others are active.
    PointerDown,
    /// One or more active pointers moved.
    Move,
    /// A pointer lifted while others remain active.
    PointerUp,
    /// The last pointer lifted.
    Up,
    /// The gesture was aborted by the platform.
    Cancel,
}

impl MotionAction {
    /// `Down` or `PointerDown`.
    pub fn is_down(self) -> bool {
        matches!(self, Self::Down | Self::PointerDown)
    }

    /// `Up`, `PointerUp` or `Cancel`.
    pub fn is_release(self) -> bool {
        matches!(self, Self::Up | Self::PointerUp | Self::Cancel)
    }

    /// Actions that terminate the whole gesture.
    pub fn ends_gesture(self) -> bool {
        matches!(self, Self::Up | Self::Cancel)
    }
}

/// Position and pressure of a single pointer at snapshot time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub id: PointerId,
    pub x: f64,
    pub y: f64,
    /// Normalized contact pressure, usually in `[0.0, 1.0]`.
    #[serde(default = "default_pressure")]
    pub pressure: f64,
}

fn default_pressure() -> f64 {
    1.0
}

impl PointerSample {
    pub fn new(id: PointerId, x: f64, y: f64, pressure: f64) -> Self {
        Self { id, x, y, pressure }
    }

    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

/// Structural problems with a single snapshot.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot has no pointers")]
    NoPointers,

    #[error("action index {index} out of range for {count} pointer(s)")]
    ActionIndexOutOfRange { index: usize, count: usize },

    #[error("pointer {id} has a non-finite coordinate")]
    NonFiniteCoordinate { id: PointerId },

    #[error("pointer {id} has invalid pressure {pressure}")]
    InvalidPressure { id: PointerId, pressure: f64 },

    #[error("pointer id {id} appears more than once")]
    DuplicatePointer { id: PointerId },
}

/// Immutable capture of one touch event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerSnapshot {
    /// Monotonic milliseconds since stream start.
    #[serde(rename = "t")]
    pub timestamp_ms: TimestampMs,

    /// What happened.
    pub action: MotionAction,

    /// Index into `pointers` of the pointer that caused the action.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub action_index: usize,

    /// Every active pointer, in stable order.
    pub pointers: Vec<PointerSample>,
}

fn is_zero(value: &usize) -> bool {
    *value == 0
}

impl PointerSnapshot {
    /// Create a snapshot whose action refers to the first pointer.
    pub fn new(timestamp_ms: TimestampMs, action: MotionAction, pointers: Vec<PointerSample>) -> Self {
        Self {
            timestamp_ms,
            action,
            action_index: 0,
            pointers,
        }
    }

    /// Set which pointer caused the action.
    pub fn with_action_index(mut self, action_index: usize) -> Self {
        self.action_index = action_index;
        self
    }

    /// Single-pointer down at full pressure.
    pub fn down(timestamp_ms: TimestampMs, x: f64, y: f64) -> Self {
        Self::new(
            timestamp_ms,
            MotionAction::Down,
            vec![PointerSample::new(0, x, y, 1.0)],
        )
    }

    /// Move of the given pointers.
    pub fn moved(timestamp_ms: TimestampMs, pointers: Vec<PointerSample>) -> Self {
        Self::new(timestamp_ms, MotionAction::Move, pointers)
    }

    /// Last pointer lifted.
    pub fn up(timestamp_ms: TimestampMs, pointers: Vec<PointerSample>) -> Self {
        Self::new(timestamp_ms, MotionAction::Up, pointers)
    }

    /// Number of active pointers.
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Pointer by its index in this snapshot.
    pub fn pointer(&self, index: usize) -> Option<&PointerSample> {
        self.pointers.get(index)
    }

    /// Pointer by its stable id.
    pub fn pointer_by_id(&self, id: PointerId) -> Option<&PointerSample> {
        self.pointers.iter().find(|p| p.id == id)
    }

    /// Pressure of the pointer that caused the action.
    pub fn action_pressure(&self) -> Option<f64> {
        self.pointer(self.action_index).map(|p| p.pressure)
    }

    /// Positions of all pointers, in snapshot order.
    pub fn positions(&self) -> impl Iterator<Item = Point2D> + '_ {
        self.pointers.iter().map(PointerSample::position)
    }

    /// Check the snapshot for structural problems.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.pointers.is_empty() {
            return Err(SnapshotError::NoPointers);
        }
        if self.action_index >= self.pointers.len() {
            return Err(SnapshotError::ActionIndexOutOfRange {
                index: self.action_index,
                count: self.pointers.len(),
            });
        }
        for (i, p) in self.pointers.iter().enumerate() {
            if !p.x.is_finite() || !p.y.is_finite() {
                return Err(SnapshotError::NonFiniteCoordinate { id: p.id });
            }
            if !p.pressure.is_finite() || p.pressure < 0.0 {
                return Err(SnapshotError::InvalidPressure {
                    id: p.id,
                    pressure: p.pressure,
                });
            }
            if self.pointers[..i].iter().any(|q| q.id == p.id) {
                return Err(SnapshotError::DuplicatePointer { id: p.id });
            }
        }
        Ok(())
    }
}

/// Metadata written as the first (commented) line of a stream file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventStreamHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Wall-clock time at stream start (RFC 3339).
    pub epoch_wall: String,

    /// Touch surface dimensions in pixels.
    pub surface_width: u32,
    pub surface_height: u32,

    /// Nominal sampling rate for move events (Hz).
    pub pointer_sample_rate_hz: u32,
}

/// Current stream schema version.
pub const STREAM_SCHEMA_VERSION: &str = "1.0";

impl EventStreamHeader {
    /// Header stamped with the current wall-clock time.
    pub fn new(surface_width: u32, surface_height: u32, pointer_sample_rate_hz: u32) -> Self {
        Self::with_epoch(
            chrono::Utc::now().to_rfc3339(),
            surface_width,
            surface_height,
            pointer_sample_rate_hz,
        )
    }

    /// Header with an explicit wall-clock epoch.
    pub fn with_epoch(
        epoch_wall: impl Into<String>,
        surface_width: u32,
        surface_height: u32,
        pointer_sample_rate_hz: u32,
    ) -> Self {
        Self {
            schema_version: STREAM_SCHEMA_VERSION.to_string(),
            epoch_wall: epoch_wall.into(),
            surface_width,
            surface_height,
            pointer_sample_rate_hz,
        }
    }
}

/// Parse snapshots from JSONL content (one JSON object per line).
///
/// Blank lines and `#` comment lines (including the header) are skipped.
pub fn parse_snapshots(jsonl: &str) -> Result<Vec<PointerSnapshot>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Parse the `# {header}` line if the content starts with one.
pub fn parse_header(jsonl: &str) -> Option<Result<EventStreamHeader, serde_json::Error>> {
    let first = jsonl.lines().map(str::trim).find(|line| !line.is_empty())?;
    let json = first.strip_prefix('#')?.trim();
    Some(serde_json::from_str(json))
}

/// Serialize snapshots to JSONL format.
pub fn serialize_snapshots(snapshots: &[PointerSnapshot]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for snapshot in snapshots {
        output.push_str(&serde_json::to_string(snapshot)?);
        output.push('\n');
    }
    Ok(output)
}
