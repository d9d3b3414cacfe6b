//! Slider control.
//!
//! A track with a draggable handle for selecting a value from a range.
//! Supports horizontal and vertical orientation, reversed direction,
//! keyboard stepping, wheel stepping, and click-to-jump on the track.
//!
//! # Example
//!
//! ```
//! use keel::widget::widgets::Slider;
//! use keel::widget::layout::Orientation;
//!
//! let mut slider = Slider::new(Orientation::Horizontal)
//!     .with_range(0.0, 100.0)
//!     .with_value(25.0);
//!
//! slider.value_changed().connect(|&value| {
//!     println!("slider at {}", value);
//! });
//!
//! slider.set_value(50.0);
//! assert_eq!(slider.value(), 50.0);
//! ```

use keel_core::{Point, Rect, Signal};

use keel_core::logging::targets;

use crate::widget::base::WidgetBase;
use crate::widget::drag::{DragAxis, DragSession, LinearMapping, PointerCapture};
use crate::widget::events::{
    KeyPressEvent, MouseButton, MouseMoveEvent, MousePressEvent, MouseReleaseEvent, WheelEvent,
    WidgetEvent,
};
use crate::widget::layout::Orientation;
use crate::widget::step::DiscreteStepController;
use crate::widget::traits::Widget;
use crate::widget::value::{BoundedValue, ChangeEmitter};

/// Default handle length along the track, in pixels.
const DEFAULT_HANDLE_LENGTH: f32 = 20.0;

/// A slider for selecting a value from a range.
///
/// # Signals
///
/// - `value_changed(f64)`: emitted when the effective value changes
/// - `range_changed((f64, f64))`: emitted when the range changes
/// - `slider_pressed(())`: emitted when a handle drag starts
/// - `slider_released(())`: emitted when a handle drag ends
pub struct Slider {
    base: WidgetBase,
    value: BoundedValue,
    emitter: ChangeEmitter,
    stepper: DiscreteStepController,
    orientation: Orientation,
    reversed: bool,
    handle_length: f32,
    capture: PointerCapture,
    drag: Option<DragSession<LinearMapping>>,

    /// Signal emitted when the range changes.
    pub range_changed: Signal<(f64, f64)>,

    /// Signal emitted when the user starts dragging the handle.
    pub slider_pressed: Signal<()>,

    /// Signal emitted when the user releases the handle.
    pub slider_released: Signal<()>,
}

impl Slider {
    /// Create a slider with range 0..100, no decimals, value at minimum.
    pub fn new(orientation: Orientation) -> Self {
        let value = BoundedValue::default();
        let mut emitter = ChangeEmitter::new();
        emitter.sync(value.value());
        let mut base = WidgetBase::new();
        base.set_focusable(true);
        match orientation {
            Orientation::Horizontal => base.resize(160.0, 24.0),
            Orientation::Vertical => base.resize(24.0, 160.0),
        }

        Self {
            base,
            value,
            emitter,
            stepper: DiscreteStepController::new(),
            orientation,
            reversed: false,
            handle_length: DEFAULT_HANDLE_LENGTH,
            capture: PointerCapture::new(),
            drag: None,
            range_changed: Signal::new(),
            slider_pressed: Signal::new(),
            slider_released: Signal::new(),
        }
    }

    /// Create a horizontal slider.
    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    /// Create a vertical slider.
    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    /// Builder: set the range.
    pub fn with_range(mut self, minimum: f64, maximum: f64) -> Self {
        self.set_range(minimum, maximum);
        self
    }

    /// Builder: set the value.
    pub fn with_value(mut self, value: f64) -> Self {
        self.set_value(value);
        self
    }

    /// Builder: set the rounding precision.
    pub fn with_decimals(mut self, decimals: i32) -> Self {
        self.set_decimals(decimals);
        self
    }

    /// Builder: set reversed direction.
    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.set_reversed(reversed);
        self
    }

    // =========================================================================
    // Value
    // =========================================================================

    /// The effective value.
    pub fn value(&self) -> f64 {
        self.value.value()
    }

    /// Set the value. Emits `value_changed` if the effective value changes.
    pub fn set_value(&mut self, value: f64) {
        self.value.set_raw(value);
        if self.emitter.notify(self.value.value()) {
            self.base.update();
        }
    }

    /// The effective value formatted for display.
    pub fn text(&self) -> String {
        self.value.format()
    }

    /// The configured minimum.
    pub fn minimum(&self) -> f64 {
        self.value.minimum()
    }

    /// The configured maximum.
    pub fn maximum(&self) -> f64 {
        self.value.maximum()
    }

    /// Set the range. The stored raw value is kept; the effective value is
    /// re-derived, so narrowing and re-widening the range round-trips.
    pub fn set_range(&mut self, minimum: f64, maximum: f64) {
        if minimum == self.value.minimum() && maximum == self.value.maximum() {
            return;
        }
        self.value.set_range(minimum, maximum);
        self.range_changed.emit((minimum, maximum));
        self.emitter.notify(self.value.value());
        self.base.update();
    }

    /// The rounding precision in decimal places.
    pub fn decimals(&self) -> i32 {
        self.value.decimals()
    }

    /// Set the rounding precision. May change the effective value.
    pub fn set_decimals(&mut self, decimals: i32) {
        if decimals == self.value.decimals() {
            return;
        }
        self.value.set_decimals(decimals);
        self.emitter.notify(self.value.value());
        self.base.update();
    }

    /// The step size implied by the precision.
    pub fn step_size(&self) -> f64 {
        self.value.step_size()
    }

    /// Signal emitted when the effective value changes.
    pub fn value_changed(&self) -> &Signal<f64> {
        &self.emitter.value_changed
    }

    // =========================================================================
    // Appearance
    // =========================================================================

    /// The slider's axis.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Whether the direction of increase is flipped.
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Flip the direction of increase. Affects only presentation and drag
    /// direction; the value and range are untouched.
    pub fn set_reversed(&mut self, reversed: bool) {
        if self.reversed != reversed {
            self.reversed = reversed;
            self.base.update();
        }
    }

    /// The handle's length along the track.
    pub fn handle_length(&self) -> f32 {
        self.handle_length
    }

    /// Set the handle's length along the track.
    pub fn set_handle_length(&mut self, length: f32) {
        let length = length.max(0.0);
        if self.handle_length != length {
            self.handle_length = length;
            self.base.update();
        }
    }

    /// Share pointer-capture state with other controls.
    ///
    /// Controls given the same `PointerCapture` refuse to start a drag
    /// while any one of them is dragging.
    pub fn set_pointer_capture(&mut self, capture: PointerCapture) {
        self.capture = capture;
    }

    /// Whether a handle drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    // =========================================================================
    // Geometry helpers
    // =========================================================================

    fn track_length(&self) -> f32 {
        match self.orientation {
            Orientation::Horizontal => self.base.width(),
            Orientation::Vertical => self.base.height(),
        }
    }

    fn usable_length(&self) -> f32 {
        (self.track_length() - self.handle_length).max(0.0)
    }

    /// The handle's travel position in `0.0..=1.0`, measured from the left
    /// or top edge.
    ///
    /// Without reversal a horizontal slider's handle sits at the left end
    /// at minimum, a vertical one at the bottom.
    pub fn handle_travel(&self) -> f64 {
        let percent = self.value.percent();
        match self.orientation {
            Orientation::Horizontal => {
                if self.reversed {
                    1.0 - percent
                } else {
                    percent
                }
            }
            Orientation::Vertical => {
                if self.reversed {
                    percent
                } else {
                    1.0 - percent
                }
            }
        }
    }

    /// The handle's rectangle in local coordinates.
    pub fn handle_rect(&self) -> Rect {
        let offset = self.handle_travel() as f32 * self.usable_length();
        match self.orientation {
            Orientation::Horizontal => {
                Rect::new(offset, 0.0, self.handle_length, self.base.height())
            }
            Orientation::Vertical => {
                Rect::new(0.0, offset, self.base.width(), self.handle_length)
            }
        }
    }

    /// The value position corresponding to a pointer position centering
    /// the handle there, clamped to `0.0..=1.0`.
    fn percent_at(&self, pos: Point) -> f64 {
        let usable = f64::from(self.usable_length());
        if usable <= 0.0 {
            return self.value.percent();
        }
        let main = match self.orientation {
            Orientation::Horizontal => pos.x,
            Orientation::Vertical => pos.y,
        };
        let travel =
            (f64::from(main - self.handle_length / 2.0) / usable).clamp(0.0, 1.0);
        match self.orientation {
            Orientation::Horizontal => {
                if self.reversed {
                    1.0 - travel
                } else {
                    travel
                }
            }
            Orientation::Vertical => {
                if self.reversed {
                    travel
                } else {
                    1.0 - travel
                }
            }
        }
    }

    fn mapping(&self) -> LinearMapping {
        LinearMapping {
            axis: match self.orientation {
                Orientation::Horizontal => DragAxis::Horizontal,
                Orientation::Vertical => DragAxis::Vertical,
            },
            track_length: self.track_length(),
            handle_length: self.handle_length,
            reversed: self.reversed,
        }
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Check if the slider is enabled.
    pub fn is_enabled(&self) -> bool {
        self.base.is_enabled()
    }

    /// Set whether the slider is enabled.
    ///
    /// Disabling mid-drag ends the drag and releases the pointer capture.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled && self.drag.take().is_some() {
            tracing::debug!(target: targets::DRAG, "drag cancelled by disable");
            self.slider_released.emit(());
        }
        self.base.set_enabled(enabled);
    }

    // =========================================================================
    // Event handling
    // =========================================================================

    fn handle_mouse_press(&mut self, event: &mut MousePressEvent) -> bool {
        if event.button != MouseButton::Left || self.drag.is_some() {
            return false;
        }
        if !self.base.contains_point(event.local_pos) {
            return false;
        }

        // Pressing the track outside the handle jumps the handle to the
        // pointer first, then drags from there.
        if !self.handle_rect().contains(event.local_pos) {
            let percent = self.percent_at(event.local_pos);
            self.value.set_raw(self.value.value_at_percent(percent));
            if self.emitter.notify(self.value.value()) {
                self.base.update();
            }
        }

        match DragSession::begin(
            &self.capture,
            event.local_pos,
            self.value.percent(),
            self.mapping(),
        ) {
            Ok(session) => {
                self.drag = Some(session);
                self.slider_pressed.emit(());
                event.base.accept();
                true
            }
            Err(_) => false,
        }
    }

    fn handle_mouse_move(&mut self, event: &mut MouseMoveEvent) -> bool {
        let Some(drag) = &self.drag else {
            return false;
        };
        let percent = drag.update(event.local_pos);
        self.value.set_raw(self.value.value_at_percent(percent));
        if self.emitter.notify(self.value.value()) {
            self.base.update();
        }
        event.base.accept();
        true
    }

    fn handle_mouse_release(&mut self, event: &mut MouseReleaseEvent) -> bool {
        if event.button != MouseButton::Left {
            return false;
        }
        if self.drag.take().is_some() {
            self.slider_released.emit(());
            self.base.update();
            event.base.accept();
            return true;
        }
        false
    }

    fn handle_wheel(&mut self, event: &mut WheelEvent) -> bool {
        let Some(command) = self.stepper.command_for_wheel(event.delta_y) else {
            return false;
        };
        if self
            .stepper
            .apply(command, &mut self.value, &mut self.emitter)
        {
            self.base.update();
        }
        event.base.accept();
        true
    }

    fn handle_key_press(&mut self, event: &mut KeyPressEvent) -> bool {
        let Some(command) = self.stepper.command_for_key(event.key) else {
            return false;
        };
        if self
            .stepper
            .apply(command, &mut self.value, &mut self.emitter)
        {
            self.base.update();
        }
        event.base.accept();
        true
    }
}

impl Widget for Slider {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn event(&mut self, event: &mut WidgetEvent) -> bool {
        if !self.base.is_enabled() {
            return false;
        }
        match event {
            WidgetEvent::MousePress(e) => self.handle_mouse_press(e),
            WidgetEvent::MouseMove(e) => self.handle_mouse_move(e),
            WidgetEvent::MouseRelease(e) => self.handle_mouse_release(e),
            WidgetEvent::Wheel(e) => self.handle_wheel(e),
            WidgetEvent::KeyPress(e) => self.handle_key_press(e),
        }
    }
}

static_assertions::assert_impl_all!(Slider: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::events::Key;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicI32, Ordering};

    fn press(slider: &mut Slider, x: f32, y: f32) -> bool {
        let mut event =
            WidgetEvent::MousePress(MousePressEvent::new(Point::new(x, y), MouseButton::Left));
        slider.event(&mut event)
    }

    fn drag_to(slider: &mut Slider, x: f32, y: f32) -> bool {
        let mut event = WidgetEvent::MouseMove(MouseMoveEvent::new(Point::new(x, y)));
        slider.event(&mut event)
    }

    fn release(slider: &mut Slider, x: f32, y: f32) -> bool {
        let mut event = WidgetEvent::MouseRelease(MouseReleaseEvent::new(
            Point::new(x, y),
            MouseButton::Left,
        ));
        slider.event(&mut event)
    }

    fn counting_slider() -> (Slider, Arc<AtomicI32>) {
        let slider = Slider::horizontal().with_range(0.0, 100.0);
        let count = Arc::new(AtomicI32::new(0));
        let count_clone = count.clone();
        slider.value_changed().connect(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });
        (slider, count)
    }

    #[test]
    fn test_set_value_emits_once() {
        let (mut slider, count) = counting_slider();
        slider.set_value(40.0);
        slider.set_value(40.0);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(slider.value(), 40.0);
    }

    #[test]
    fn test_set_value_clamps_but_keeps_raw() {
        let mut slider = Slider::horizontal().with_range(0.0, 100.0);
        slider.set_value(150.0);
        assert_eq!(slider.value(), 100.0);

        // Widening the range reveals the raw value again.
        slider.set_range(0.0, 200.0);
        assert_eq!(slider.value(), 150.0);
    }

    #[test]
    fn test_range_narrowing_round_trips() {
        let (mut slider, _) = counting_slider();
        slider.set_value(80.0);
        slider.set_range(0.0, 50.0);
        assert_eq!(slider.value(), 50.0);
        slider.set_range(0.0, 100.0);
        assert_eq!(slider.value(), 80.0);
    }

    #[test]
    fn test_drag_moves_value() {
        // 160px wide, 20px handle: 140px usable travel.
        let mut slider = Slider::horizontal().with_range(0.0, 140.0);
        slider.set_value(0.0);

        // Handle at the far left; grab its middle.
        assert!(press(&mut slider, 10.0, 12.0));
        assert!(slider.is_dragging());

        assert!(drag_to(&mut slider, 80.0, 12.0));
        assert_eq!(slider.value(), 70.0);

        assert!(release(&mut slider, 80.0, 12.0));
        assert!(!slider.is_dragging());
        assert_eq!(slider.value(), 70.0);
    }

    #[test]
    fn test_track_press_snaps_handle_to_pointer() {
        let mut slider = Slider::horizontal().with_range(0.0, 140.0);
        slider.set_value(0.0);

        // Press at x=80, far from the handle. Handle centers there:
        // travel (80 - 10) / 140 = 0.5.
        assert!(press(&mut slider, 80.0, 12.0));
        assert_eq!(slider.value(), 70.0);
        assert!(slider.is_dragging());
        release(&mut slider, 80.0, 12.0);
    }

    #[test]
    fn test_drag_clamps_at_ends_without_hysteresis() {
        let mut slider = Slider::horizontal().with_range(0.0, 140.0);
        slider.set_value(70.0);

        assert!(press(&mut slider, 80.0, 12.0));
        drag_to(&mut slider, 1000.0, 12.0);
        assert_eq!(slider.value(), 140.0);

        // Coming back retraces from the anchor.
        drag_to(&mut slider, 150.0, 12.0);
        assert_eq!(slider.value(), 140.0);
        drag_to(&mut slider, 115.0, 12.0);
        assert_eq!(slider.value(), 105.0);
        release(&mut slider, 115.0, 12.0);
    }

    #[test]
    fn test_vertical_up_increases() {
        let mut slider = Slider::vertical().with_range(0.0, 140.0);
        slider.set_value(70.0);

        // Handle centered; grab it and pull up 35px.
        assert!(press(&mut slider, 12.0, 80.0));
        drag_to(&mut slider, 12.0, 45.0);
        assert_eq!(slider.value(), 105.0);
        release(&mut slider, 12.0, 45.0);
    }

    #[test]
    fn test_reversed_flips_presentation_not_value() {
        let mut slider = Slider::horizontal()
            .with_range(0.0, 100.0)
            .with_reversed(true);
        slider.set_value(0.0);
        // At minimum, a reversed horizontal handle sits at the right end.
        assert_eq!(slider.handle_rect().origin.x, 140.0);
        assert_eq!(slider.value(), 0.0);

        slider.set_value(100.0);
        assert_eq!(slider.handle_rect().origin.x, 0.0);
    }

    #[test]
    fn test_keyboard_steps() {
        let (mut slider, _) = counting_slider();
        slider.set_value(50.0);

        let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(Key::ArrowRight));
        assert!(slider.event(&mut event));
        assert_eq!(slider.value(), 51.0);

        let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(Key::PageDown));
        assert!(slider.event(&mut event));
        assert_eq!(slider.value(), 41.0);

        let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(Key::End));
        assert!(slider.event(&mut event));
        assert_eq!(slider.value(), 100.0);

        // Unhandled key passes through.
        let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(Key::Enter));
        assert!(!slider.event(&mut event));
    }

    #[test]
    fn test_wheel_steps_by_sign() {
        let (mut slider, count) = counting_slider();
        slider.set_value(50.0);
        let before = count.load(Ordering::SeqCst);

        let mut event = WidgetEvent::Wheel(WheelEvent::new(Point::new(5.0, 5.0), 0.0, 3.0));
        assert!(slider.event(&mut event));
        assert_eq!(slider.value(), 51.0);

        let mut event = WidgetEvent::Wheel(WheelEvent::new(Point::new(5.0, 5.0), 0.0, -0.5));
        assert!(slider.event(&mut event));
        assert_eq!(slider.value(), 50.0);
        assert_eq!(count.load(Ordering::SeqCst), before + 2);
    }

    #[test]
    fn test_disabled_ignores_input() {
        let (mut slider, count) = counting_slider();
        slider.set_value(50.0);
        slider.set_enabled(false);
        let before = count.load(Ordering::SeqCst);

        assert!(!press(&mut slider, 80.0, 12.0));
        let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(Key::ArrowRight));
        assert!(!slider.event(&mut event));
        assert_eq!(count.load(Ordering::SeqCst), before);
        assert_eq!(slider.value(), 50.0);
    }

    #[test]
    fn test_disable_mid_drag_releases_capture() {
        let capture = PointerCapture::new();
        let mut slider = Slider::horizontal().with_range(0.0, 140.0);
        slider.set_pointer_capture(capture.clone());
        slider.set_value(70.0);

        assert!(press(&mut slider, 80.0, 12.0));
        assert!(capture.is_captured());

        slider.set_enabled(false);
        assert!(!slider.is_dragging());
        assert!(!capture.is_captured());

        // Moves after the cancel do nothing.
        slider.set_enabled(true);
        assert!(!drag_to(&mut slider, 140.0, 12.0));
        assert_eq!(slider.value(), 70.0);
    }

    #[test]
    fn test_shared_capture_is_exclusive() {
        let capture = PointerCapture::new();
        let mut a = Slider::horizontal().with_range(0.0, 140.0);
        let mut b = Slider::horizontal().with_range(0.0, 140.0);
        a.set_pointer_capture(capture.clone());
        b.set_pointer_capture(capture.clone());

        assert!(press(&mut a, 80.0, 12.0));
        // Second slider cannot start while the first drags.
        assert!(!press(&mut b, 80.0, 12.0));
        assert!(!b.is_dragging());

        release(&mut a, 80.0, 12.0);
        assert!(press(&mut b, 80.0, 12.0));
        release(&mut b, 80.0, 12.0);
    }

    #[test]
    fn test_pressed_released_signals() {
        let mut slider = Slider::horizontal().with_range(0.0, 140.0);
        let pressed = Arc::new(AtomicI32::new(0));
        let released = Arc::new(AtomicI32::new(0));
        let pressed_clone = pressed.clone();
        let released_clone = released.clone();
        slider.slider_pressed.connect(move |_| {
            pressed_clone.fetch_add(1, Ordering::SeqCst);
        });
        slider.slider_released.connect(move |_| {
            released_clone.fetch_add(1, Ordering::SeqCst);
        });

        press(&mut slider, 80.0, 12.0);
        drag_to(&mut slider, 90.0, 12.0);
        release(&mut slider, 90.0, 12.0);
        assert_eq!(pressed.load(Ordering::SeqCst), 1);
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_decimals_quantize_drag() {
        let mut slider = Slider::horizontal()
            .with_range(0.0, 1.0)
            .with_decimals(1);
        slider.set_value(0.0);

        press(&mut slider, 10.0, 12.0);
        // 33px of 140px usable travel: raw 0.2357, effective 0.2.
        drag_to(&mut slider, 43.0, 12.0);
        assert_eq!(slider.value(), 0.2);
        release(&mut slider, 43.0, 12.0);
    }
}
