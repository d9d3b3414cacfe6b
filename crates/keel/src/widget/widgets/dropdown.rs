//! Drop-down list control.
//!
//! A closed field showing the current choice; activating it opens the item
//! list. Arrow keys cycle through the items with wraparound whether the
//! list is open or not.

use keel_core::Signal;

use crate::widget::base::WidgetBase;
use crate::widget::events::{
    Key, KeyPressEvent, MouseButton, MousePressEvent, WheelEvent, WidgetEvent,
};
use crate::widget::focus::{cycle_next, cycle_previous};
use crate::widget::traits::Widget;

/// A single-choice drop-down list.
///
/// # Signals
///
/// - `selection_changed(usize)`: emitted with the new index when the
///   selection changes
pub struct DropDown {
    base: WidgetBase,
    items: Vec<String>,
    selected: Option<usize>,
    open: bool,

    /// Signal emitted when the selected index changes.
    pub selection_changed: Signal<usize>,
}

impl Default for DropDown {
    fn default() -> Self {
        Self::new()
    }
}

impl DropDown {
    /// Create an empty drop-down.
    pub fn new() -> Self {
        let mut base = WidgetBase::new();
        base.set_focusable(true);
        base.resize(120.0, 24.0);

        Self {
            base,
            items: Vec::new(),
            selected: None,
            open: false,
            selection_changed: Signal::new(),
        }
    }

    /// Builder: add items.
    pub fn with_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for item in items {
            self.add_item(item);
        }
        self
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// The item labels, in order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// The number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add an item at the end. The first item added becomes selected.
    pub fn add_item(&mut self, label: impl Into<String>) {
        self.items.push(label.into());
        if self.selected.is_none() {
            self.set_selected_index(0);
        }
        self.base.update();
    }

    /// Remove the item at `index`. Out-of-range indices are ignored.
    ///
    /// Removing the selected item moves the selection to the same position
    /// (or the new last item), without emitting; the items after it shift
    /// down.
    pub fn remove_item(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        self.items.remove(index);
        self.selected = if self.items.is_empty() {
            None
        } else {
            self.selected
                .map(|s| if s > index { s - 1 } else { s.min(self.items.len() - 1) })
        };
        self.base.update();
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// The selected index, if any.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// The selected item's label, if any.
    pub fn selected_text(&self) -> Option<&str> {
        self.selected.and_then(|i| self.items.get(i)).map(String::as_str)
    }

    /// Select by index. Out-of-range indices are ignored; selecting the
    /// already-selected index emits nothing.
    pub fn set_selected_index(&mut self, index: usize) {
        if index >= self.items.len() || self.selected == Some(index) {
            return;
        }
        self.selected = Some(index);
        self.base.update();
        self.selection_changed.emit(index);
    }

    /// Select the next item, wrapping from the last to the first.
    pub fn select_next(&mut self) {
        if let Some(current) = self.selected {
            self.set_selected_index(cycle_next(self.items.len(), current));
        } else if !self.items.is_empty() {
            self.set_selected_index(0);
        }
    }

    /// Select the previous item, wrapping from the first to the last.
    pub fn select_previous(&mut self) {
        if let Some(current) = self.selected {
            self.set_selected_index(cycle_previous(self.items.len(), current));
        } else if !self.items.is_empty() {
            self.set_selected_index(self.items.len() - 1);
        }
    }

    // =========================================================================
    // Open state
    // =========================================================================

    /// Whether the item list is showing.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open the item list. Does nothing when there are no items.
    pub fn open_list(&mut self) {
        if !self.open && !self.items.is_empty() {
            self.open = true;
            self.base.update();
        }
    }

    /// Close the item list.
    pub fn close_list(&mut self) {
        if self.open {
            self.open = false;
            self.base.update();
        }
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Check if the drop-down is enabled.
    pub fn is_enabled(&self) -> bool {
        self.base.is_enabled()
    }

    /// Set whether the drop-down is enabled. Disabling closes the list.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.close_list();
        }
        self.base.set_enabled(enabled);
    }

    // =========================================================================
    // Event handling
    // =========================================================================

    fn handle_mouse_press(&mut self, event: &mut MousePressEvent) -> bool {
        if event.button != MouseButton::Left || !self.base.contains_point(event.local_pos) {
            return false;
        }
        if self.open {
            self.close_list();
        } else {
            self.open_list();
        }
        event.base.accept();
        true
    }

    fn handle_key_press(&mut self, event: &mut KeyPressEvent) -> bool {
        match event.key {
            Key::ArrowDown => self.select_next(),
            Key::ArrowUp => self.select_previous(),
            Key::Enter | Key::Space => {
                if self.open {
                    self.close_list();
                } else {
                    self.open_list();
                }
            }
            Key::Escape => {
                if !self.open {
                    return false;
                }
                self.close_list();
            }
            _ => return false,
        }
        event.base.accept();
        true
    }

    fn handle_wheel(&mut self, event: &mut WheelEvent) -> bool {
        if event.delta_y < 0.0 {
            self.select_next();
        } else if event.delta_y > 0.0 {
            self.select_previous();
        } else {
            return false;
        }
        event.base.accept();
        true
    }
}

impl Widget for DropDown {
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
            WidgetEvent::KeyPress(e) => self.handle_key_press(e),
            WidgetEvent::Wheel(e) => self.handle_wheel(e),
            _ => false,
        }
    }
}

static_assertions::assert_impl_all!(DropDown: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use keel_core::Point;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicI32, Ordering};

    fn abc() -> DropDown {
        DropDown::new().with_items(["alpha", "beta", "gamma"])
    }

    #[test]
    fn test_first_item_becomes_selected() {
        let dd = abc();
        assert_eq!(dd.selected_index(), Some(0));
        assert_eq!(dd.selected_text(), Some("alpha"));
    }

    #[test]
    fn test_cyclic_navigation() {
        let mut dd = abc();
        dd.select_next();
        assert_eq!(dd.selected_index(), Some(1));
        dd.select_next();
        dd.select_next();
        // Wrapped past the end.
        assert_eq!(dd.selected_index(), Some(0));
        dd.select_previous();
        assert_eq!(dd.selected_index(), Some(2));
    }

    #[test]
    fn test_selection_changed_dedup() {
        let mut dd = abc();
        let count = Arc::new(AtomicI32::new(0));
        let count_clone = count.clone();
        dd.selection_changed.connect(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        dd.set_selected_index(1);
        dd.set_selected_index(1);
        dd.set_selected_index(99);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(dd.selected_index(), Some(1));
    }

    #[test]
    fn test_open_close() {
        let mut dd = abc();
        assert!(!dd.is_open());
        dd.open_list();
        assert!(dd.is_open());
        dd.close_list();
        assert!(!dd.is_open());

        // An empty drop-down cannot open.
        let mut empty = DropDown::new();
        empty.open_list();
        assert!(!empty.is_open());
    }

    #[test]
    fn test_keyboard_interaction() {
        let mut dd = abc();
        let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(Key::ArrowDown));
        assert!(dd.event(&mut event));
        assert_eq!(dd.selected_index(), Some(1));

        let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(Key::Enter));
        assert!(dd.event(&mut event));
        assert!(dd.is_open());

        let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(Key::Escape));
        assert!(dd.event(&mut event));
        assert!(!dd.is_open());

        // Escape with the list closed passes through.
        let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(Key::Escape));
        assert!(!dd.event(&mut event));
    }

    #[test]
    fn test_click_toggles_list() {
        let mut dd = abc();
        let mut event = WidgetEvent::MousePress(MousePressEvent::new(
            Point::new(60.0, 12.0),
            MouseButton::Left,
        ));
        assert!(dd.event(&mut event));
        assert!(dd.is_open());
    }

    #[test]
    fn test_remove_item_adjusts_selection() {
        let mut dd = abc();
        dd.set_selected_index(2);
        dd.remove_item(0);
        assert_eq!(dd.selected_text(), Some("gamma"));

        dd.remove_item(1); // removes "gamma", the selected item
        assert_eq!(dd.selected_text(), Some("beta"));

        dd.remove_item(0);
        assert_eq!(dd.selected_index(), None);
        assert!(dd.is_empty());
    }

    #[test]
    fn test_disable_closes_list() {
        let mut dd = abc();
        dd.open_list();
        dd.set_enabled(false);
        assert!(!dd.is_open());

        let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(Key::ArrowDown));
        assert!(!dd.event(&mut event));
        assert_eq!(dd.selected_index(), Some(0));
    }
}
