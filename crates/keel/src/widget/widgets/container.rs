//! Container widget.
//!
//! A widget that owns a [`LinearLayout`] and sizes itself to the
//! arrangement. Children live in external storage and are referenced by
//! ID, the container only positions them.

use crate::widget::base::WidgetBase;
use crate::widget::layout::{LinearLayout, Orientation};
use crate::widget::store::{WidgetAccess, WidgetId};
use crate::widget::traits::Widget;

/// A widget that arranges children along one axis.
pub struct Container {
    base: WidgetBase,
    layout: LinearLayout,
}

impl Container {
    /// Create an empty container.
    pub fn new(orientation: Orientation) -> Self {
        Self {
            base: WidgetBase::new(),
            layout: LinearLayout::new(orientation),
        }
    }

    /// Create an empty horizontal container.
    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    /// Create an empty vertical container.
    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    /// Builder: set the gap between children.
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.layout.set_spacing(spacing);
        self
    }

    /// The container's layout.
    pub fn layout(&self) -> &LinearLayout {
        &self.layout
    }

    /// The gap between children.
    pub fn spacing(&self) -> f32 {
        self.layout.spacing()
    }

    /// Set the gap between children and re-arrange.
    pub fn set_spacing(&mut self, storage: &mut dyn WidgetAccess, spacing: f32) {
        self.layout.set_spacing(spacing);
        self.relayout(storage);
    }

    /// The child IDs in layout order.
    pub fn children(&self) -> &[WidgetId] {
        self.layout.children()
    }

    /// Add a child at the end and re-arrange.
    pub fn add_child(&mut self, storage: &mut dyn WidgetAccess, id: WidgetId) {
        self.layout.append(storage, id);
        self.sync_size();
    }

    /// Remove a child and re-arrange. Returns `true` if it was a child.
    pub fn remove_child(&mut self, storage: &mut dyn WidgetAccess, id: WidgetId) -> bool {
        let removed = self.layout.remove(storage, id);
        if removed {
            self.sync_size();
        }
        removed
    }

    /// Re-run the layout, e.g. after children changed size.
    pub fn relayout(&mut self, storage: &mut dyn WidgetAccess) {
        self.layout.relayout(storage);
        self.sync_size();
    }

    fn sync_size(&mut self) {
        self.base.set_size(self.layout.extent());
    }
}

impl Widget for Container {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }
}

static_assertions::assert_impl_all!(Container: Send, Sync);
