//! Knob control.
//!
//! A rotary control adjusted by dragging vertically: pressing anywhere on
//! the knob and pulling up increases the value, pulling down decreases it.
//! The indicator sweeps a 300 degree arc from the lower left around the
//! top to the lower right.

use keel_core::Signal;

use keel_core::logging::targets;

use crate::widget::base::WidgetBase;
use crate::widget::drag::{AngularMapping, DragSession, PointerCapture};
use crate::widget::events::{
    KeyPressEvent, MouseButton, MouseMoveEvent, MousePressEvent, MouseReleaseEvent, WheelEvent,
    WidgetEvent,
};
use crate::widget::step::DiscreteStepController;
use crate::widget::traits::Widget;
use crate::widget::value::{BoundedValue, ChangeEmitter};

/// Indicator angle at the minimum, in degrees. Zero is straight up,
/// positive clockwise.
const SWEEP_START_DEG: f64 = -240.0;

/// Total indicator sweep, in degrees.
const SWEEP_DEG: f64 = 300.0;

/// Default vertical drag distance for a full range traversal, in pixels.
const DEFAULT_SENSITIVITY: f64 = 200.0;

/// A rotary value control.
///
/// # Signals
///
/// - `value_changed(f64)`: emitted when the effective value changes
/// - `range_changed((f64, f64))`: emitted when the range changes
pub struct Knob {
    base: WidgetBase,
    value: BoundedValue,
    emitter: ChangeEmitter,
    stepper: DiscreteStepController,
    sensitivity: f64,
    reversed: bool,
    capture: PointerCapture,
    drag: Option<DragSession<AngularMapping>>,

    /// Signal emitted when the range changes.
    pub range_changed: Signal<(f64, f64)>,
}

impl Default for Knob {
    fn default() -> Self {
        Self::new()
    }
}

impl Knob {
    /// Create a knob with range 0..100, no decimals, value at minimum.
    pub fn new() -> Self {
        let value = BoundedValue::default();
        let mut emitter = ChangeEmitter::new();
        emitter.sync(value.value());
        let mut base = WidgetBase::new();
        base.set_focusable(true);
        base.resize(48.0, 48.0);

        Self {
            base,
            value,
            emitter,
            stepper: DiscreteStepController::new(),
            sensitivity: DEFAULT_SENSITIVITY,
            reversed: false,
            capture: PointerCapture::new(),
            drag: None,
            range_changed: Signal::new(),
        }
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

    /// Builder: set the drag sensitivity.
    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        self.set_sensitivity(sensitivity);
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

    /// Set the range, keeping the stored raw value.
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

    /// Set the rounding precision.
    pub fn set_decimals(&mut self, decimals: i32) {
        if decimals == self.value.decimals() {
            return;
        }
        self.value.set_decimals(decimals);
        self.emitter.notify(self.value.value());
        self.base.update();
    }

    /// Signal emitted when the effective value changes.
    pub fn value_changed(&self) -> &Signal<f64> {
        &self.emitter.value_changed
    }

    // =========================================================================
    // Drag behavior
    // =========================================================================

    /// Vertical drag distance for a full range traversal, in pixels.
    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    /// Set the drag sensitivity. Larger values make the knob slower.
    pub fn set_sensitivity(&mut self, sensitivity: f64) {
        if sensitivity > 0.0 {
            self.sensitivity = sensitivity;
        }
    }

    /// Whether the direction of increase is flipped.
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Flip the direction of increase.
    pub fn set_reversed(&mut self, reversed: bool) {
        if self.reversed != reversed {
            self.reversed = reversed;
            self.base.update();
        }
    }

    /// Share pointer-capture state with other controls.
    pub fn set_pointer_capture(&mut self, capture: PointerCapture) {
        self.capture = capture;
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// The indicator's angle in degrees. Zero points straight up, positive
    /// is clockwise; the sweep runs from -240 at the minimum to +60 at the
    /// maximum.
    pub fn indicator_angle(&self) -> f64 {
        let percent = if self.reversed {
            1.0 - self.value.percent()
        } else {
            self.value.percent()
        };
        SWEEP_START_DEG + percent * SWEEP_DEG
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Check if the knob is enabled.
    pub fn is_enabled(&self) -> bool {
        self.base.is_enabled()
    }

    /// Set whether the knob is enabled.
    ///
    /// Disabling mid-drag ends the drag and releases the pointer capture.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled && self.drag.take().is_some() {
            tracing::debug!(target: targets::DRAG, "knob drag cancelled by disable");
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
        let mapping = AngularMapping {
            sensitivity: self.sensitivity,
            reversed: self.reversed,
        };
        match DragSession::begin(
            &self.capture,
            event.local_pos,
            self.value.percent(),
            mapping,
        ) {
            Ok(session) => {
                self.drag = Some(session);
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

impl Widget for Knob {
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

static_assertions::assert_impl_all!(Knob: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::events::Key;
    use keel_core::Point;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicI32, Ordering};

    fn press(knob: &mut Knob, x: f32, y: f32) -> bool {
        let mut event =
            WidgetEvent::MousePress(MousePressEvent::new(Point::new(x, y), MouseButton::Left));
        knob.event(&mut event)
    }

    fn drag_to(knob: &mut Knob, x: f32, y: f32) -> bool {
        let mut event = WidgetEvent::MouseMove(MouseMoveEvent::new(Point::new(x, y)));
        knob.event(&mut event)
    }

    fn release(knob: &mut Knob, x: f32, y: f32) -> bool {
        let mut event = WidgetEvent::MouseRelease(MouseReleaseEvent::new(
            Point::new(x, y),
            MouseButton::Left,
        ));
        knob.event(&mut event)
    }

    #[test]
    fn test_vertical_drag_adjusts_value() {
        let mut knob = Knob::new().with_range(0.0, 100.0).with_sensitivity(200.0);
        knob.set_value(50.0);

        assert!(press(&mut knob, 24.0, 24.0));
        // Up 50px of 200 is a quarter of the range.
        drag_to(&mut knob, 24.0, -26.0);
        assert_eq!(knob.value(), 75.0);

        // Back at the anchor height: anchor value, however far sideways.
        drag_to(&mut knob, 300.0, 24.0);
        assert_eq!(knob.value(), 50.0);

        release(&mut knob, 300.0, 24.0);
        assert!(!knob.is_dragging());
    }

    #[test]
    fn test_drag_clamps_at_range_ends() {
        let mut knob = Knob::new().with_range(0.0, 100.0).with_sensitivity(100.0);
        knob.set_value(50.0);

        press(&mut knob, 24.0, 24.0);
        drag_to(&mut knob, 24.0, -1000.0);
        assert_eq!(knob.value(), 100.0);
        drag_to(&mut knob, 24.0, 1000.0);
        assert_eq!(knob.value(), 0.0);
        release(&mut knob, 24.0, 24.0);
    }

    #[test]
    fn test_indicator_sweep() {
        let mut knob = Knob::new().with_range(0.0, 100.0);
        knob.set_value(0.0);
        assert_eq!(knob.indicator_angle(), -240.0);

        knob.set_value(50.0);
        assert_eq!(knob.indicator_angle(), -90.0);

        knob.set_value(100.0);
        assert_eq!(knob.indicator_angle(), 60.0);
    }

    #[test]
    fn test_reversed_flips_drag_and_indicator() {
        let mut knob = Knob::new().with_range(0.0, 100.0).with_sensitivity(200.0);
        knob.set_reversed(true);
        knob.set_value(0.0);
        assert_eq!(knob.indicator_angle(), 60.0);

        press(&mut knob, 24.0, 24.0);
        // Dragging up decreases a reversed knob; already at minimum.
        drag_to(&mut knob, 24.0, -26.0);
        assert_eq!(knob.value(), 0.0);
        // Down increases.
        drag_to(&mut knob, 24.0, 74.0);
        assert_eq!(knob.value(), 25.0);
        release(&mut knob, 24.0, 74.0);
    }

    #[test]
    fn test_keyboard_and_wheel_step() {
        let mut knob = Knob::new().with_range(0.0, 100.0);
        knob.set_value(50.0);

        let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(Key::ArrowUp));
        assert!(knob.event(&mut event));
        assert_eq!(knob.value(), 51.0);

        let mut event = WidgetEvent::Wheel(WheelEvent::new(Point::new(5.0, 5.0), 0.0, -1.0));
        assert!(knob.event(&mut event));
        assert_eq!(knob.value(), 50.0);
    }

    #[test]
    fn test_disable_mid_drag_releases_capture() {
        let capture = PointerCapture::new();
        let mut knob = Knob::new().with_range(0.0, 100.0);
        knob.set_pointer_capture(capture.clone());
        knob.set_value(50.0);

        press(&mut knob, 24.0, 24.0);
        assert!(capture.is_captured());
        knob.set_enabled(false);
        assert!(!capture.is_captured());
        assert!(!knob.is_dragging());
    }

    #[test]
    fn test_press_outside_bounds_ignored() {
        let mut knob = Knob::new();
        assert!(!press(&mut knob, 100.0, 100.0));
        assert!(!knob.is_dragging());
    }

    #[test]
    fn test_dedup_on_same_effective_value() {
        let mut knob = Knob::new().with_range(0.0, 100.0);
        let count = Arc::new(AtomicI32::new(0));
        let count_clone = count.clone();
        knob.value_changed().connect(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        knob.set_value(30.0);
        knob.set_value(30.2); // rounds to 30
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
