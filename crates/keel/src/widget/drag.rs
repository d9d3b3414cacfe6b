//! Pointer drag sessions and pointer capture.
//!
//! A drag session translates pointer movement into a position within a
//! control's range. The session records the anchor (where the drag started
//! and the control's position at that moment) and maps every subsequent
//! pointer position to a new position via a [`DragMapping`].
//!
//! While a session is live it holds the shared [`PointerCapture`], so all
//! pointer movement belongs to the dragging control even when the pointer
//! leaves its bounds. The capture is released through a guard's `Drop`, so
//! every way a session can end (release, cancel, control disabled, session
//! dropped) gives the capture back exactly once.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use keel_core::Point;
use keel_core::logging::targets;

/// Errors from pointer capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// Another drag already holds the pointer.
    AlreadyCaptured,
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::AlreadyCaptured => {
                write!(f, "pointer is already captured by another drag")
            }
        }
    }
}

impl std::error::Error for CaptureError {}

/// Shared pointer-capture state.
///
/// Clone this into every control that starts drags; clones share the
/// underlying state, so at most one drag session exists across all of them
/// at any time.
#[derive(Clone, Default)]
pub struct PointerCapture {
    holder: Arc<Mutex<Option<u64>>>,
}

/// Token source for capture guards. Monotonic, never reused.
static NEXT_CAPTURE_TOKEN: AtomicU64 = AtomicU64::new(1);

impl PointerCapture {
    /// Create an unheld capture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether some drag currently holds the pointer.
    pub fn is_captured(&self) -> bool {
        self.holder.lock().is_some()
    }

    /// Take the capture, failing if it is already held.
    ///
    /// The returned guard releases the capture when dropped.
    pub fn acquire(&self) -> Result<CaptureGuard, CaptureError> {
        let mut holder = self.holder.lock();
        if holder.is_some() {
            tracing::warn!(target: targets::CAPTURE, "capture refused, pointer already held");
            return Err(CaptureError::AlreadyCaptured);
        }
        let token = NEXT_CAPTURE_TOKEN.fetch_add(1, Ordering::Relaxed);
        *holder = Some(token);
        tracing::debug!(target: targets::CAPTURE, token, "pointer captured");
        Ok(CaptureGuard {
            capture: self.clone(),
            token,
        })
    }

    fn release(&self, token: u64) {
        let mut holder = self.holder.lock();
        if *holder == Some(token) {
            *holder = None;
            tracing::debug!(target: targets::CAPTURE, token, "pointer released");
        }
    }
}

/// Holds the pointer capture for the lifetime of a drag.
///
/// Dropping the guard releases the capture. Release is idempotent per
/// token, a stale guard cannot free a capture it no longer owns.
pub struct CaptureGuard {
    capture: PointerCapture,
    token: u64,
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        self.capture.release(self.token);
    }
}

impl fmt::Debug for CaptureGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureGuard")
            .field("token", &self.token)
            .finish()
    }
}

/// Maps pointer displacement to a position delta in `0.0..=1.0` units.
pub trait DragMapping: Send + Sync {
    /// The position change implied by the pointer moving from `anchor` to
    /// `current`. Unclamped; the session clamps the final position.
    fn percent_delta(&self, anchor: Point, current: Point) -> f64;
}

/// Axis of travel for linear drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragAxis {
    Horizontal,
    Vertical,
}

/// Drag mapping for track-and-handle controls.
///
/// One full traversal of the usable track (track length minus handle
/// length) spans the whole range. Horizontally, rightward motion increases
/// the position; vertically, upward motion does, matching a handle that
/// sits at the bottom when the value is at the minimum.
#[derive(Debug, Clone, Copy)]
pub struct LinearMapping {
    pub axis: DragAxis,
    pub track_length: f32,
    pub handle_length: f32,
    pub reversed: bool,
}

impl LinearMapping {
    fn usable_length(&self) -> f64 {
        f64::from((self.track_length - self.handle_length).max(0.0))
    }
}

impl DragMapping for LinearMapping {
    fn percent_delta(&self, anchor: Point, current: Point) -> f64 {
        let usable = self.usable_length();
        if usable <= 0.0 {
            return 0.0;
        }
        let raw = match self.axis {
            DragAxis::Horizontal => f64::from(current.x - anchor.x) / usable,
            DragAxis::Vertical => f64::from(anchor.y - current.y) / usable,
        };
        if self.reversed { -raw } else { raw }
    }
}

/// Drag mapping for rotary controls.
///
/// Only vertical pointer motion matters: dragging up by `sensitivity`
/// pixels sweeps the whole range. Horizontal motion is ignored so the
/// pointer can drift sideways during a long drag.
#[derive(Debug, Clone, Copy)]
pub struct AngularMapping {
    /// Vertical pixels per full range traversal.
    pub sensitivity: f64,
    pub reversed: bool,
}

impl DragMapping for AngularMapping {
    fn percent_delta(&self, anchor: Point, current: Point) -> f64 {
        if self.sensitivity <= 0.0 {
            return 0.0;
        }
        let raw = f64::from(anchor.y - current.y) / self.sensitivity;
        if self.reversed { -raw } else { raw }
    }
}

/// A live drag, from press to release.
///
/// Created by [`DragSession::begin`], which takes the pointer capture; the
/// capture is released when the session is dropped, however that happens.
pub struct DragSession<M: DragMapping> {
    anchor: Point,
    anchor_percent: f64,
    mapping: M,
    _guard: CaptureGuard,
}

impl<M: DragMapping> DragSession<M> {
    /// Start a drag at `anchor`, with the control's position at that
    /// moment, acquiring the pointer capture.
    pub fn begin(
        capture: &PointerCapture,
        anchor: Point,
        anchor_percent: f64,
        mapping: M,
    ) -> Result<Self, CaptureError> {
        let guard = capture.acquire()?;
        tracing::debug!(
            target: targets::DRAG,
            anchor_x = anchor.x,
            anchor_y = anchor.y,
            anchor_percent,
            "drag started"
        );
        Ok(Self {
            anchor,
            anchor_percent,
            mapping,
            _guard: guard,
        })
    }

    /// The position where the drag started.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// The control's position when the drag started.
    pub fn anchor_percent(&self) -> f64 {
        self.anchor_percent
    }

    /// The position implied by the pointer being at `current`, clamped to
    /// `0.0..=1.0`.
    ///
    /// Always computed from the anchor, not from the previous position, so
    /// overshooting an end and coming back retraces the same positions
    /// without hysteresis.
    pub fn update(&self, current: Point) -> f64 {
        let delta = self.mapping.percent_delta(self.anchor, current);
        (self.anchor_percent + delta).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal(track: f32, handle: f32) -> LinearMapping {
        LinearMapping {
            axis: DragAxis::Horizontal,
            track_length: track,
            handle_length: handle,
            reversed: false,
        }
    }

    #[test]
    fn test_capture_exclusive() {
        let capture = PointerCapture::new();
        let guard = capture.acquire();
        assert!(guard.is_ok());
        assert!(capture.is_captured());

        assert_eq!(capture.acquire().unwrap_err(), CaptureError::AlreadyCaptured);

        drop(guard);
        assert!(!capture.is_captured());
        assert!(capture.acquire().is_ok());
    }

    #[test]
    fn test_clones_share_capture_state() {
        let a = PointerCapture::new();
        let b = a.clone();
        let _guard = a.acquire().unwrap();
        assert!(b.is_captured());
        assert!(b.acquire().is_err());
    }

    #[test]
    fn test_session_releases_capture_on_drop() {
        let capture = PointerCapture::new();
        {
            let session = DragSession::begin(
                &capture,
                Point::new(10.0, 0.0),
                0.5,
                horizontal(120.0, 20.0),
            )
            .unwrap();
            assert!(capture.is_captured());
            let _ = session.update(Point::new(20.0, 0.0));
        }
        assert!(!capture.is_captured());
    }

    #[test]
    fn test_linear_horizontal_delta() {
        let capture = PointerCapture::new();
        // Usable length 100: moving 25px moves a quarter of the range.
        let session = DragSession::begin(
            &capture,
            Point::new(50.0, 10.0),
            0.5,
            horizontal(120.0, 20.0),
        )
        .unwrap();

        assert_eq!(session.update(Point::new(75.0, 10.0)), 0.75);
        assert_eq!(session.update(Point::new(25.0, 10.0)), 0.25);
        // Vertical motion is irrelevant on a horizontal track.
        assert_eq!(session.update(Point::new(50.0, 400.0)), 0.5);
    }

    #[test]
    fn test_linear_vertical_up_increases() {
        let capture = PointerCapture::new();
        let mapping = LinearMapping {
            axis: DragAxis::Vertical,
            track_length: 120.0,
            handle_length: 20.0,
            reversed: false,
        };
        let session =
            DragSession::begin(&capture, Point::new(0.0, 60.0), 0.5, mapping).unwrap();

        assert_eq!(session.update(Point::new(0.0, 35.0)), 0.75);
        assert_eq!(session.update(Point::new(0.0, 85.0)), 0.25);
    }

    #[test]
    fn test_reversed_negates_direction() {
        let capture = PointerCapture::new();
        let mut mapping = horizontal(120.0, 20.0);
        mapping.reversed = true;
        let session =
            DragSession::begin(&capture, Point::new(50.0, 0.0), 0.5, mapping).unwrap();

        assert_eq!(session.update(Point::new(75.0, 0.0)), 0.25);
    }

    #[test]
    fn test_overshoot_clamps_and_retraces() {
        let capture = PointerCapture::new();
        let session = DragSession::begin(
            &capture,
            Point::new(50.0, 0.0),
            0.5,
            horizontal(120.0, 20.0),
        )
        .unwrap();

        // Far past the right end: pinned at 1.0.
        assert_eq!(session.update(Point::new(500.0, 0.0)), 1.0);
        // Coming back retraces from the anchor, no hysteresis.
        assert_eq!(session.update(Point::new(75.0, 0.0)), 0.75);
        assert_eq!(session.update(Point::new(50.0, 0.0)), 0.5);
    }

    #[test]
    fn test_degenerate_track_is_inert() {
        let capture = PointerCapture::new();
        // Handle as long as the track: no usable travel.
        let session = DragSession::begin(
            &capture,
            Point::new(0.0, 0.0),
            0.5,
            horizontal(20.0, 20.0),
        )
        .unwrap();
        assert_eq!(session.update(Point::new(100.0, 0.0)), 0.5);
    }

    #[test]
    fn test_angular_vertical_only() {
        let capture = PointerCapture::new();
        let mapping = AngularMapping {
            sensitivity: 200.0,
            reversed: false,
        };
        let session =
            DragSession::begin(&capture, Point::new(30.0, 100.0), 0.5, mapping).unwrap();

        // Up 50px out of 200 is a quarter of the range.
        assert_eq!(session.update(Point::new(30.0, 50.0)), 0.75);
        // Sideways drift changes nothing.
        assert_eq!(session.update(Point::new(300.0, 100.0)), 0.5);
    }

    #[test]
    fn test_types_are_send_sync() {
        static_assertions::assert_impl_all!(PointerCapture: Send, Sync);
        static_assertions::assert_impl_all!(DragSession<LinearMapping>: Send, Sync);
        static_assertions::assert_impl_all!(DragSession<AngularMapping>: Send, Sync);
    }
}
