//! Checkbox control.
//!
//! A toggle with two modes. Standalone, clicking flips its checked state.
//! Grouped, it behaves like a radio button: checking one member of a
//! [`FocusGroup`](crate::widget::focus::FocusGroup) unchecks the others,
//! and clicking an already-checked member changes nothing.

use std::sync::Arc;

use parking_lot::RwLock;

use keel_core::Signal;

use crate::widget::base::WidgetBase;
use crate::widget::events::{Key, MouseButton, WidgetEvent};
use crate::widget::focus::FocusGroup;
use crate::widget::traits::Widget;

/// Where a checkbox's checked state lives.
enum CheckState {
    /// Independent toggle.
    Standalone { checked: bool },
    /// Exclusive member of a shared group.
    Grouped {
        group: Arc<RwLock<FocusGroup>>,
        member_id: i32,
    },
}

/// A two-state toggle, standalone or group-exclusive.
///
/// # Signals
///
/// - `toggled(bool)`: emitted with the new checked state when this
///   checkbox itself is toggled. A grouped checkbox that loses its
///   selection to a sibling does not emit `toggled(false)`; observe the
///   group's `selection_changed` signal for cross-member changes.
pub struct Checkbox {
    base: WidgetBase,
    label: String,
    state: CheckState,

    /// Signal emitted when the checked state changes.
    pub toggled: Signal<bool>,
}

impl Checkbox {
    /// Create an unchecked standalone checkbox.
    pub fn new(label: impl Into<String>) -> Self {
        let mut base = WidgetBase::new();
        base.set_focusable(true);
        base.resize(100.0, 20.0);

        Self {
            base,
            label: label.into(),
            state: CheckState::Standalone { checked: false },
            toggled: Signal::new(),
        }
    }

    /// Create a checkbox that is an exclusive member of `group`.
    ///
    /// The checkbox registers itself as a new member; its checked state is
    /// the group's selection from then on. The group decides exclusivity,
    /// so every checkbox sharing the `Arc` participates.
    pub fn in_group(label: impl Into<String>, group: Arc<RwLock<FocusGroup>>) -> Self {
        let member_id = group.write().add_member();
        let mut checkbox = Self::new(label);
        checkbox.state = CheckState::Grouped { group, member_id };
        checkbox
    }

    /// Builder: set the initial checked state.
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.set_checked(checked);
        self
    }

    /// The checkbox's label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Set the checkbox's label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
        self.base.update();
    }

    /// The group member ID, when grouped.
    pub fn member_id(&self) -> Option<i32> {
        match &self.state {
            CheckState::Standalone { .. } => None,
            CheckState::Grouped { member_id, .. } => Some(*member_id),
        }
    }

    /// Whether the checkbox is checked.
    ///
    /// Grouped checkboxes read the shared group's selection.
    pub fn is_checked(&self) -> bool {
        match &self.state {
            CheckState::Standalone { checked } => *checked,
            CheckState::Grouped { group, member_id } => {
                group.read().selected() == Some(*member_id)
            }
        }
    }

    /// Set the checked state.
    ///
    /// Standalone: emits `toggled` on actual change. Grouped: checking
    /// selects this member exclusively in the group; unchecking is ignored,
    /// a grouped checkbox only unchecks when another member is selected.
    pub fn set_checked(&mut self, checked: bool) {
        match &self.state {
            CheckState::Standalone { checked: current } => {
                if *current != checked {
                    self.state = CheckState::Standalone { checked };
                    self.base.update();
                    self.toggled.emit(checked);
                }
            }
            CheckState::Grouped { group, member_id } => {
                if !checked {
                    return;
                }
                let was_checked = self.is_checked();
                // The ID came from add_member, so selection cannot fail.
                let _ = group.write().select_exclusive(*member_id);
                if !was_checked {
                    self.base.update();
                    self.toggled.emit(true);
                }
            }
        }
    }

    /// Toggle the checkbox as a click would.
    pub fn toggle(&mut self) {
        match &self.state {
            CheckState::Standalone { checked } => {
                let next = !*checked;
                self.set_checked(next);
            }
            // Clicking a grouped checkbox always checks it.
            CheckState::Grouped { .. } => self.set_checked(true),
        }
    }

    /// Check if the checkbox is enabled.
    pub fn is_enabled(&self) -> bool {
        self.base.is_enabled()
    }

    /// Set whether the checkbox is enabled.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.base.set_enabled(enabled);
    }
}

impl Widget for Checkbox {
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
                if e.button == MouseButton::Left && self.base.contains_point(e.local_pos) =>
            {
                self.toggle();
                e.base.accept();
                true
            }
            WidgetEvent::KeyPress(e) if e.key == Key::Space => {
                self.toggle();
                e.base.accept();
                true
            }
            _ => false,
        }
    }
}

static_assertions::assert_impl_all!(Checkbox: Send, Sync);
