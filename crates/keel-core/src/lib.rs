//! Core systems for Keel.
//!
//! This crate provides the foundations of the Keel control toolkit:
//!
//! - **Geometry**: `Point`, `Size`, and `Rect` primitives used for all
//!   widget geometry
//! - **Signal/Slot System**: type-safe change notification between controls
//!   and application code
//! - **Logging**: `tracing` target constants for filtering
//!
//! # Signal/Slot Example
//!
//! ```
//! use keel_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<f64>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42.0);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```

pub mod geometry;
pub mod logging;
pub mod signal;

pub use geometry::{Point, Rect, Size};
pub use signal::{ConnectionId, Signal};
