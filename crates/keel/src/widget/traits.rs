//! The core widget trait.

use super::base::WidgetBase;
use super::events::WidgetEvent;

/// The trait implemented by all controls.
///
/// Most of a widget's common behavior lives in [`WidgetBase`]; the trait
/// only requires access to it plus an event entry point. Widgets override
/// [`event`](Widget::event) to handle input.
pub trait Widget: Send + Sync {
    /// Access the widget's base.
    fn widget_base(&self) -> &WidgetBase;

    /// Mutable access to the widget's base.
    fn widget_base_mut(&mut self) -> &mut WidgetBase;

    /// Handle an event. Returns `true` if the event was consumed.
    ///
    /// The default implementation ignores all events.
    fn event(&mut self, _event: &mut WidgetEvent) -> bool {
        false
    }
}
