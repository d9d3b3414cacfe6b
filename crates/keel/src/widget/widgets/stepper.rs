//! Stepper control.
//!
//! A numeric field flanked by decrement and increment buttons. Buttons
//! step once on press and auto-repeat while held; the field accepts typed
//! input which is sanitized and committed on confirm.

use std::time::Instant;

use keel_core::{Point, Rect, Signal};

use keel_core::logging::targets;

use crate::widget::base::WidgetBase;
use crate::widget::events::{
    KeyPressEvent, MouseButton, MousePressEvent, MouseReleaseEvent, WheelEvent, WidgetEvent,
};
use crate::widget::repeat::RepeatTimer;
use crate::widget::step::{DiscreteStepController, StepCommand};
use crate::widget::traits::Widget;
use crate::widget::value::{BoundedValue, ChangeEmitter};

/// Width of each step button, in pixels.
const BUTTON_WIDTH: f32 = 20.0;

/// The region of a stepper under a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepperPart {
    /// The decrement button on the left.
    Decrement,
    /// The editable field in the middle.
    Field,
    /// The increment button on the right.
    Increment,
}

/// A numeric field with step buttons and press-and-hold repeat.
///
/// # Signals
///
/// - `value_changed(f64)`: emitted when the effective value changes
/// - `range_changed((f64, f64))`: emitted when the range changes
pub struct Stepper {
    base: WidgetBase,
    value: BoundedValue,
    emitter: ChangeEmitter,
    stepper: DiscreteStepController,
    repeat: RepeatTimer,
    held: Option<StepperPart>,

    /// Signal emitted when the range changes.
    pub range_changed: Signal<(f64, f64)>,
}

impl Default for Stepper {
    fn default() -> Self {
        Self::new()
    }
}

impl Stepper {
    /// Create a stepper with range 0..100, no decimals, value at minimum.
    pub fn new() -> Self {
        let value = BoundedValue::default();
        let mut emitter = ChangeEmitter::new();
        emitter.sync(value.value());
        let mut base = WidgetBase::new();
        base.set_focusable(true);
        base.resize(100.0, 24.0);

        Self {
            base,
            value,
            emitter,
            stepper: DiscreteStepController::new(),
            repeat: RepeatTimer::new(),
            held: None,
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

    /// The field's display text.
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

    /// Set the rounding precision. The step size follows it.
    pub fn set_decimals(&mut self, decimals: i32) {
        if decimals == self.value.decimals() {
            return;
        }
        self.value.set_decimals(decimals);
        self.emitter.notify(self.value.value());
        self.base.update();
    }

    /// The distance one button press moves.
    pub fn step_size(&self) -> f64 {
        self.value.step_size()
    }

    /// Signal emitted when the effective value changes.
    pub fn value_changed(&self) -> &Signal<f64> {
        &self.emitter.value_changed
    }

    // =========================================================================
    // Text entry
    // =========================================================================

    /// Commit typed text as the new value.
    ///
    /// The input is sanitized first: everything except digits, minus signs
    /// and decimal points is discarded, so "$1,234.50" parses as 1234.50.
    /// Input with no parsable number is discarded and the field reverts to
    /// the current value's text.
    pub fn commit_text(&mut self, text: &str) {
        let sanitized: String = text
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '-' || *c == '.')
            .collect();
        match sanitized.parse::<f64>() {
            Ok(parsed) => self.set_value(parsed),
            Err(_) => {
                tracing::debug!(target: targets::CORE, input = text, "unparsable entry reverted");
            }
        }
    }

    // =========================================================================
    // Parts and stepping
    // =========================================================================

    /// The part under a local-coordinate point, if any.
    pub fn part_at(&self, pos: Point) -> Option<StepperPart> {
        if !self.base.contains_point(pos) {
            return None;
        }
        let width = self.base.width();
        let height = self.base.height();
        let button_width = BUTTON_WIDTH.min(width / 2.0);
        if Rect::new(0.0, 0.0, button_width, height).contains(pos) {
            Some(StepperPart::Decrement)
        } else if pos.x >= width - button_width {
            Some(StepperPart::Increment)
        } else {
            Some(StepperPart::Field)
        }
    }

    fn step_once(&mut self, steps: i32) {
        if self
            .stepper
            .apply(StepCommand::StepBy(steps), &mut self.value, &mut self.emitter)
        {
            self.base.update();
        }
    }

    /// Press the increment button at `now`. Steps once immediately and
    /// arms auto-repeat.
    pub fn press_increment(&mut self, now: Instant) {
        self.press_part(StepperPart::Increment, now);
    }

    /// Press the decrement button at `now`. Steps once immediately and
    /// arms auto-repeat.
    pub fn press_decrement(&mut self, now: Instant) {
        self.press_part(StepperPart::Decrement, now);
    }

    fn press_part(&mut self, part: StepperPart, now: Instant) {
        if self.held.is_some() {
            return;
        }
        if self.repeat.press(now) {
            self.held = Some(part);
            self.step_once(self.held_direction());
        }
    }

    fn held_direction(&self) -> i32 {
        match self.held {
            Some(StepperPart::Increment) => 1,
            Some(StepperPart::Decrement) => -1,
            _ => 0,
        }
    }

    /// Perform the auto-repeat steps due by `now`.
    ///
    /// Call this periodically (each frame) while a button is held. Returns
    /// the number of steps performed.
    pub fn poll_repeat(&mut self, now: Instant) -> u32 {
        let due = self.repeat.poll(now);
        let direction = self.held_direction();
        for _ in 0..due {
            self.step_once(direction);
        }
        due
    }

    /// Release the held button, cancelling auto-repeat.
    pub fn release_button(&mut self) {
        self.held = None;
        self.repeat.release();
    }

    /// Whether a step button is currently held.
    pub fn is_button_held(&self) -> bool {
        self.held.is_some()
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Check if the stepper is enabled.
    pub fn is_enabled(&self) -> bool {
        self.base.is_enabled()
    }

    /// Set whether the stepper is enabled.
    ///
    /// Disabling while a button is held cancels the auto-repeat.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled && self.held.is_some() {
            tracing::debug!(target: targets::REPEAT, "repeat cancelled by disable");
            self.release_button();
        }
        self.base.set_enabled(enabled);
    }

    // =========================================================================
    // Event handling
    // =========================================================================

    fn handle_mouse_press(&mut self, event: &mut MousePressEvent) -> bool {
        if event.button != MouseButton::Left {
            return false;
        }
        match self.part_at(event.local_pos) {
            Some(StepperPart::Increment) => {
                self.press_increment(Instant::now());
                event.base.accept();
                true
            }
            Some(StepperPart::Decrement) => {
                self.press_decrement(Instant::now());
                event.base.accept();
                true
            }
            Some(StepperPart::Field) => {
                event.base.accept();
                true
            }
            None => false,
        }
    }

    fn handle_mouse_release(&mut self, event: &mut MouseReleaseEvent) -> bool {
        if event.button != MouseButton::Left || self.held.is_none() {
            return false;
        }
        self.release_button();
        event.base.accept();
        true
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

impl Widget for Stepper {
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
            WidgetEvent::MouseRelease(e) => self.handle_mouse_release(e),
            WidgetEvent::Wheel(e) => self.handle_wheel(e),
            WidgetEvent::KeyPress(e) => self.handle_key_press(e),
            WidgetEvent::MouseMove(_) => false,
        }
    }
}

static_assertions::assert_impl_all!(Stepper: Send, Sync);
