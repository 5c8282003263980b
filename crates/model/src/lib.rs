//! Multitouch Model
//!
//! Defines the data contracts shared by the detectors and their hosts:
//! - **Snapshots:** Immutable captures of one touch event (action, pointers, time)
//! - **Streams:** JSONL touch streams with a commented header line
//! - **Sequences:** Structural checks over recorded snapshot sequences
//! - **Geometry:** Points and the 2-D affine transform composed by hosts
//!
//! Coordinates are surface pixels, y pointing down; timestamps are
//! monotonic milliseconds since the stream started.

pub mod event;
pub mod geometry;
pub mod sequence;

pub use event::*;
pub use geometry::*;
pub use sequence::*;
