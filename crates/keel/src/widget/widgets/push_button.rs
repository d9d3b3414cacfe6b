//! Push button control.
//!
//! A momentary button: pressing arms it, releasing inside the bounds
//! clicks it. Releasing outside cancels without a click, which is how a
//! user backs out of an accidental press.

use keel_core::Signal;

use crate::widget::base::WidgetBase;
use crate::widget::events::{Key, MouseButton, WidgetEvent};
use crate::widget::traits::Widget;

/// A momentary push button.
///
/// # Signals
///
/// - `clicked(())`: emitted on a completed press-release inside the button
/// - `pressed(())`: emitted when the button goes down
/// - `released(())`: emitted when the button comes back up, clicked or not
pub struct PushButton {
    base: WidgetBase,
    label: String,
    down: bool,

    /// Signal emitted on a completed click.
    pub clicked: Signal<()>,

    /// Signal emitted when the button is pressed down.
    pub pressed: Signal<()>,

    /// Signal emitted when the button is released.
    pub released: Signal<()>,
}

impl PushButton {
    /// Create a button.
    pub fn new(label: impl Into<String>) -> Self {
        let mut base = WidgetBase::new();
        base.set_focusable(true);
        base.resize(80.0, 24.0);

        Self {
            base,
            label: label.into(),
            down: false,
            clicked: Signal::new(),
            pressed: Signal::new(),
            released: Signal::new(),
        }
    }

    /// The button's label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Set the button's label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
        self.base.update();
    }

    /// Whether the button is currently held down.
    pub fn is_down(&self) -> bool {
        self.down
    }

    /// Programmatically click the button.
    pub fn click(&mut self) {
        self.clicked.emit(());
    }

    /// Check if the button is enabled.
    pub fn is_enabled(&self) -> bool {
        self.base.is_enabled()
    }

    /// Set whether the button is enabled.
    ///
    /// Disabling while down releases the button without a click.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled && self.down {
            self.down = false;
            self.released.emit(());
        }
        self.base.set_enabled(enabled);
    }
}

impl Widget for PushButton {
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
            WidgetEvent::MousePress(e)
                if e.button == MouseButton::Left
                    && !self.down
                    && self.base.contains_point(e.local_pos) =>
            {
                self.down = true;
                self.base.update();
                self.pressed.emit(());
                e.base.accept();
                true
            }
            WidgetEvent::MouseRelease(e) if e.button == MouseButton::Left && self.down => {
                self.down = false;
                self.base.update();
                self.released.emit(());
                if self.base.contains_point(e.local_pos) {
                    self.clicked.emit(());
                }
                e.base.accept();
                true
            }
            WidgetEvent::KeyPress(e) if e.key == Key::Space || e.key == Key::Enter => {
                self.clicked.emit(());
                e.base.accept();
                true
            }
            _ => false,
        }
    }
}

static_assertions::assert_impl_all!(PushButton: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::events::{KeyPressEvent, MousePressEvent, MouseReleaseEvent};
    use keel_core::Point;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicI32, Ordering};

    fn press_at(button: &mut PushButton, x: f32, y: f32) -> bool {
        let mut event =
            WidgetEvent::MousePress(MousePressEvent::new(Point::new(x, y), MouseButton::Left));
        button.event(&mut event)
    }

    fn release_at(button: &mut PushButton, x: f32, y: f32) -> bool {
        let mut event = WidgetEvent::MouseRelease(MouseReleaseEvent::new(
            Point::new(x, y),
            MouseButton::Left,
        ));
        button.event(&mut event)
    }

    fn click_counter(button: &PushButton) -> Arc<AtomicI32> {
        let count = Arc::new(AtomicI32::new(0));
        let count_clone = count.clone();
        button.clicked.connect(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });
        count
    }

    #[test]
    fn test_press_release_inside_clicks() {
        let mut button = PushButton::new("OK");
        let clicks = click_counter(&button);

        assert!(press_at(&mut button, 10.0, 10.0));
        assert!(button.is_down());
        assert!(release_at(&mut button, 10.0, 10.0));
        assert!(!button.is_down());
        assert_eq!(clicks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_release_outside_cancels() {
        let mut button = PushButton::new("OK");
        let clicks = click_counter(&button);

        press_at(&mut button, 10.0, 10.0);
        // Dragged off the button before releasing.
        assert!(release_at(&mut button, 200.0, 10.0));
        assert!(!button.is_down());
        assert_eq!(clicks.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_press_outside_ignored() {
        let mut button = PushButton::new("OK");
        assert!(!press_at(&mut button, 200.0, 10.0));
        assert!(!button.is_down());
    }

    #[test]
    fn test_keyboard_activation() {
        let mut button = PushButton::new("OK");
        let clicks = click_counter(&button);

        let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(Key::Space));
        assert!(button.event(&mut event));
        let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(Key::Enter));
        assert!(button.event(&mut event));
        assert_eq!(clicks.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_disable_while_down_releases_without_click() {
        let mut button = PushButton::new("OK");
        let clicks = click_counter(&button);

        press_at(&mut button, 10.0, 10.0);
        button.set_enabled(false);
        assert!(!button.is_down());
        assert_eq!(clicks.load(Ordering::SeqCst), 0);

        // Nothing while disabled.
        assert!(!press_at(&mut button, 10.0, 10.0));
    }
}
