//! Event types delivered to widgets.
//!
//! Events carry positions in widget-local coordinates. The embedder (or a
//! test) constructs events and routes them to a widget's
//! [`Widget::event`](crate::widget::Widget::event) method; the widget marks
//! an event accepted when it consumed it.

use keel_core::Point;

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Keyboard keys relevant to control interaction.
///
/// This is deliberately a small set; the engine only reacts to navigation
/// and activation keys. Embedders translate their own key codes into these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Home,
    End,
    Enter,
    Space,
    Escape,
    Tab,
}

/// Common state shared by all event types.
#[derive(Debug, Clone, Default)]
pub struct EventBase {
    accepted: bool,
}

impl EventBase {
    /// Mark the event as accepted (consumed by the widget).
    pub fn accept(&mut self) {
        self.accepted = true;
    }

    /// Check whether the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }
}

/// A mouse button press.
#[derive(Debug, Clone)]
pub struct MousePressEvent {
    pub base: EventBase,
    /// Position in widget-local coordinates.
    pub local_pos: Point,
    pub button: MouseButton,
}

impl MousePressEvent {
    pub fn new(local_pos: Point, button: MouseButton) -> Self {
        Self {
            base: EventBase::default(),
            local_pos,
            button,
        }
    }
}

/// A mouse move (with or without buttons held).
#[derive(Debug, Clone)]
pub struct MouseMoveEvent {
    pub base: EventBase,
    /// Position in widget-local coordinates. May lie outside the widget's
    /// bounds while the pointer is captured.
    pub local_pos: Point,
}

impl MouseMoveEvent {
    pub fn new(local_pos: Point) -> Self {
        Self {
            base: EventBase::default(),
            local_pos,
        }
    }
}

/// A mouse button release.
#[derive(Debug, Clone)]
pub struct MouseReleaseEvent {
    pub base: EventBase,
    /// Position in widget-local coordinates.
    pub local_pos: Point,
    pub button: MouseButton,
}

impl MouseReleaseEvent {
    pub fn new(local_pos: Point, button: MouseButton) -> Self {
        Self {
            base: EventBase::default(),
            local_pos,
            button,
        }
    }
}

/// A scroll wheel tick.
#[derive(Debug, Clone)]
pub struct WheelEvent {
    pub base: EventBase,
    /// Position in widget-local coordinates.
    pub local_pos: Point,
    /// Horizontal scroll delta. Positive scrolls right.
    pub delta_x: f64,
    /// Vertical scroll delta. Positive scrolls up (away from the user).
    pub delta_y: f64,
}

impl WheelEvent {
    pub fn new(local_pos: Point, delta_x: f64, delta_y: f64) -> Self {
        Self {
            base: EventBase::default(),
            local_pos,
            delta_x,
            delta_y,
        }
    }
}

/// A key press.
#[derive(Debug, Clone)]
pub struct KeyPressEvent {
    pub base: EventBase,
    pub key: Key,
}

impl KeyPressEvent {
    pub fn new(key: Key) -> Self {
        Self {
            base: EventBase::default(),
            key,
        }
    }
}

/// Any event deliverable to a widget.
#[derive(Debug, Clone)]
pub enum WidgetEvent {
    MousePress(MousePressEvent),
    MouseMove(MouseMoveEvent),
    MouseRelease(MouseReleaseEvent),
    Wheel(WheelEvent),
    KeyPress(KeyPressEvent),
}

impl WidgetEvent {
    /// Mark the event as accepted.
    pub fn accept(&mut self) {
        match self {
            WidgetEvent::MousePress(e) => e.base.accept(),
            WidgetEvent::MouseMove(e) => e.base.accept(),
            WidgetEvent::MouseRelease(e) => e.base.accept(),
            WidgetEvent::Wheel(e) => e.base.accept(),
            WidgetEvent::KeyPress(e) => e.base.accept(),
        }
    }

    /// Check whether the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        match self {
            WidgetEvent::MousePress(e) => e.base.is_accepted(),
            WidgetEvent::MouseMove(e) => e.base.is_accepted(),
            WidgetEvent::MouseRelease(e) => e.base.is_accepted(),
            WidgetEvent::Wheel(e) => e.base.is_accepted(),
            WidgetEvent::KeyPress(e) => e.base.is_accepted(),
        }
    }
}
