//! Discrete stepping from keys and wheel ticks.
//!
//! Every value-bearing control steps the same way: arrow keys move one step,
//! page keys move a block of steps, Home/End jump to the ends, and wheel
//! ticks behave like arrows. [`DiscreteStepController`] turns those inputs
//! into [`StepCommand`]s and applies them to a [`BoundedValue`].

use keel_core::logging::targets;

use super::events::Key;
use super::value::{BoundedValue, ChangeEmitter};

/// A single discrete adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepCommand {
    /// Jump to the low end of the range.
    ToMinimum,
    /// Jump to the high end of the range.
    ToMaximum,
    /// Move by this many steps (negative decreases).
    StepBy(i32),
}

/// Shared keyboard/wheel stepping behavior.
#[derive(Debug, Clone)]
pub struct DiscreteStepController {
    page_steps: i32,
}

impl Default for DiscreteStepController {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscreteStepController {
    /// Create a controller with the default page size of 10 steps.
    pub fn new() -> Self {
        Self { page_steps: 10 }
    }

    /// The number of steps a page key moves.
    pub fn page_steps(&self) -> i32 {
        self.page_steps
    }

    /// Set the number of steps a page key moves.
    pub fn set_page_steps(&mut self, page_steps: i32) {
        self.page_steps = page_steps;
    }

    /// The command for a key press, if the key adjusts the value.
    ///
    /// Right and Up increase; Left and Down decrease. PageUp increases by
    /// the page size (the value goes up, whatever the control's visual
    /// orientation).
    pub fn command_for_key(&self, key: Key) -> Option<StepCommand> {
        match key {
            Key::Home => Some(StepCommand::ToMinimum),
            Key::End => Some(StepCommand::ToMaximum),
            Key::ArrowRight | Key::ArrowUp => Some(StepCommand::StepBy(1)),
            Key::ArrowLeft | Key::ArrowDown => Some(StepCommand::StepBy(-1)),
            Key::PageUp => Some(StepCommand::StepBy(self.page_steps)),
            Key::PageDown => Some(StepCommand::StepBy(-self.page_steps)),
            _ => None,
        }
    }

    /// The command for a wheel tick, if any.
    ///
    /// Only the sign matters: scrolling up (positive delta) increases by
    /// one step, down decreases by one. A zero delta does nothing.
    pub fn command_for_wheel(&self, delta_y: f64) -> Option<StepCommand> {
        if delta_y > 0.0 {
            Some(StepCommand::StepBy(1))
        } else if delta_y < 0.0 {
            Some(StepCommand::StepBy(-1))
        } else {
            None
        }
    }

    /// Apply a command to a value and notify.
    ///
    /// Returns `true` if the effective value changed. Stepping against an
    /// end of the range changes nothing and stays silent.
    pub fn apply(
        &self,
        command: StepCommand,
        value: &mut BoundedValue,
        emitter: &mut ChangeEmitter,
    ) -> bool {
        match command {
            StepCommand::ToMinimum => value.to_minimum(),
            StepCommand::ToMaximum => value.to_maximum(),
            StepCommand::StepBy(steps) => value.step_by(steps),
        }
        let changed = emitter.notify(value.value());
        tracing::trace!(
            target: targets::CORE,
            ?command,
            value = value.value(),
            changed,
            "step applied"
        );
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicI32, Ordering};

    fn setup() -> (BoundedValue, ChangeEmitter, Arc<AtomicI32>) {
        let mut value = BoundedValue::new(0.0, 100.0, 0);
        value.set_raw(50.0);
        let mut emitter = ChangeEmitter::new();
        emitter.sync(value.value());

        let count = Arc::new(AtomicI32::new(0));
        let count_clone = count.clone();
        emitter.value_changed.connect(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        (value, emitter, count)
    }

    #[test]
    fn test_key_commands() {
        let ctrl = DiscreteStepController::new();
        assert_eq!(ctrl.command_for_key(Key::Home), Some(StepCommand::ToMinimum));
        assert_eq!(ctrl.command_for_key(Key::End), Some(StepCommand::ToMaximum));
        assert_eq!(
            ctrl.command_for_key(Key::ArrowUp),
            Some(StepCommand::StepBy(1))
        );
        assert_eq!(
            ctrl.command_for_key(Key::ArrowLeft),
            Some(StepCommand::StepBy(-1))
        );
        assert_eq!(
            ctrl.command_for_key(Key::PageUp),
            Some(StepCommand::StepBy(10))
        );
        assert_eq!(
            ctrl.command_for_key(Key::PageDown),
            Some(StepCommand::StepBy(-10))
        );
        assert_eq!(ctrl.command_for_key(Key::Enter), None);
    }

    #[test]
    fn test_wheel_uses_sign_only() {
        let ctrl = DiscreteStepController::new();
        assert_eq!(
            ctrl.command_for_wheel(0.3),
            Some(StepCommand::StepBy(1))
        );
        assert_eq!(
            ctrl.command_for_wheel(-120.0),
            Some(StepCommand::StepBy(-1))
        );
        assert_eq!(ctrl.command_for_wheel(0.0), None);
    }

    #[test]
    fn test_apply_steps_and_notifies() {
        let ctrl = DiscreteStepController::new();
        let (mut value, mut emitter, count) = setup();

        assert!(ctrl.apply(StepCommand::StepBy(1), &mut value, &mut emitter));
        assert_eq!(value.value(), 51.0);

        assert!(ctrl.apply(StepCommand::StepBy(-10), &mut value, &mut emitter));
        assert_eq!(value.value(), 41.0);

        assert!(ctrl.apply(StepCommand::ToMaximum, &mut value, &mut emitter));
        assert_eq!(value.value(), 100.0);
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_step_at_end_is_silent() {
        let ctrl = DiscreteStepController::new();
        let (mut value, mut emitter, count) = setup();

        ctrl.apply(StepCommand::ToMaximum, &mut value, &mut emitter);
        assert_eq!(count.load(Ordering::SeqCst), 1);

        assert!(!ctrl.apply(StepCommand::StepBy(1), &mut value, &mut emitter));
        assert!(!ctrl.apply(StepCommand::ToMaximum, &mut value, &mut emitter));
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(value.value(), 100.0);
    }

    #[test]
    fn test_page_steps_configurable() {
        let mut ctrl = DiscreteStepController::new();
        ctrl.set_page_steps(4);
        assert_eq!(
            ctrl.command_for_key(Key::PageDown),
            Some(StepCommand::StepBy(-4))
        );
    }

    #[test]
    fn test_step_respects_precision() {
        let ctrl = DiscreteStepController::new();
        let mut value = BoundedValue::new(0.0, 1.0, 2);
        value.set_raw(0.5);
        let mut emitter = ChangeEmitter::new();

        ctrl.apply(StepCommand::StepBy(1), &mut value, &mut emitter);
        assert_eq!(value.value(), 0.51);

        ctrl.apply(StepCommand::StepBy(-2), &mut value, &mut emitter);
        assert_eq!(value.value(), 0.49);
    }
}
