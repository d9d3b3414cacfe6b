//! Widget storage.
//!
//! Layouts and containers refer to widgets by [`WidgetId`] rather than
//! holding them, so ownership stays in one place. [`WidgetStore`] is the
//! default owner; the [`WidgetAccess`] trait is the seam layouts operate
//! through, so tests can substitute lightweight storage.

use slotmap::{SlotMap, new_key_type};

use super::traits::Widget;

new_key_type! {
    /// Identifier for a widget held in storage.
    pub struct WidgetId;
}

/// Lookup access to stored widgets.
pub trait WidgetAccess {
    /// Get a widget by ID.
    fn get_widget(&self, id: WidgetId) -> Option<&dyn Widget>;

    /// Get a widget mutably by ID.
    fn get_widget_mut(&mut self, id: WidgetId) -> Option<&mut dyn Widget>;
}

/// Owning storage for widgets.
#[derive(Default)]
pub struct WidgetStore {
    widgets: SlotMap<WidgetId, Box<dyn Widget>>,
}

impl WidgetStore {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a widget, returning its ID.
    pub fn insert(&mut self, widget: Box<dyn Widget>) -> WidgetId {
        self.widgets.insert(widget)
    }

    /// Remove a widget, returning it if it existed.
    pub fn remove(&mut self, id: WidgetId) -> Option<Box<dyn Widget>> {
        self.widgets.remove(id)
    }

    /// Check whether an ID refers to a live widget.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(id)
    }

    /// The number of stored widgets.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

impl WidgetAccess for WidgetStore {
    fn get_widget(&self, id: WidgetId) -> Option<&dyn Widget> {
        self.widgets.get(id).map(|w| w.as_ref() as &dyn Widget)
    }

    fn get_widget_mut(&mut self, id: WidgetId) -> Option<&mut dyn Widget> {
        self.widgets
            .get_mut(id)
            .map(|w| w.as_mut() as &mut dyn Widget)
    }
}
