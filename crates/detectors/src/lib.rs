//! Multitouch Gesture Detectors
//!
//! Recognizes multi-touch gestures from a stream of pointer snapshots:
//! - **Move:** Centroid of all pointers (pan)
//! - **Scale:** Mean pointer distance from the centroid (pinch)
//! - **Rotate:** Circular mean of per-pointer orientation changes
//! - **Shove:** Two-finger motion across the finger axis
//!
//! Every detector is the same state machine ([`GestureDetector`])
//! parameterised by a [`GestureKind`]. Detectors never fail: malformed
//! or out-of-order input is ignored or restarts tracking. They emit
//! per-update deltas; integrating them is up to the caller.
//!
//! This crate is pure computation with no I/O or platform dependencies.

pub mod detector;
pub mod listener;
pub mod move_gesture;
pub mod rotate;
pub mod scale;
pub mod shove;

pub use detector::{GestureDetector, GestureKind, GestureState, GestureTracker};
pub use listener::{FnListener, GestureListener};
pub use move_gesture::{MoveDetector, MoveGesture};
pub use rotate::{RotateDetector, RotateGesture};
pub use scale::{ScaleDetector, ScaleGesture};
pub use shove::{ShoveDetector, ShoveGesture};
