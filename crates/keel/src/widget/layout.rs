//! Linear layout.
//!
//! [`LinearLayout`] lines children up along one axis at their natural
//! sizes, separated by uniform spacing. It holds [`WidgetId`]s, not
//! widgets; geometry is written back through [`WidgetAccess`].
//!
//! The layout is recomputed from scratch on every pass, so laying out
//! twice without intervening changes produces identical geometry.

use keel_core::{Point, Rect, Size};

use keel_core::logging::targets;

use super::store::{WidgetAccess, WidgetId};

/// Axis along which children are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Arranges children in a row or column at their natural sizes.
pub struct LinearLayout {
    orientation: Orientation,
    spacing: f32,
    children: Vec<WidgetId>,
    extent: Size,
}

impl LinearLayout {
    /// Create an empty layout along the given axis with no spacing.
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            spacing: 0.0,
            children: Vec::new(),
            extent: Size::ZERO,
        }
    }

    /// Create an empty horizontal layout.
    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    /// Create an empty vertical layout.
    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    /// The layout's axis.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The gap between adjacent children.
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Set the gap between adjacent children.
    ///
    /// Takes effect on the next layout pass; stored geometry is untouched
    /// until then.
    pub fn set_spacing(&mut self, spacing: f32) {
        self.spacing = spacing.max(0.0);
    }

    /// The IDs of the children, in layout order.
    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    /// The number of children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the layout has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// The overall size of the arrangement, as of the last layout pass.
    pub fn extent(&self) -> Size {
        self.extent
    }

    /// Add a child at the end and re-run the layout.
    ///
    /// Adding an ID that is already a child moves nothing; the existing
    /// arrangement is kept.
    pub fn append(&mut self, storage: &mut dyn WidgetAccess, id: WidgetId) {
        if self.children.contains(&id) {
            tracing::debug!(target: targets::LAYOUT, ?id, "child already in layout, ignoring");
            return;
        }
        self.children.push(id);
        self.relayout(storage);
    }

    /// Remove a child and re-run the layout.
    ///
    /// Returns `true` if the ID was a child. The removed widget's geometry
    /// is left as-is.
    pub fn remove(&mut self, storage: &mut dyn WidgetAccess, id: WidgetId) -> bool {
        let Some(index) = self.children.iter().position(|&c| c == id) else {
            return false;
        };
        self.children.remove(index);
        self.relayout(storage);
        true
    }

    /// Recompute every child's position from scratch.
    ///
    /// Children keep their own sizes; only positions are assigned. Each
    /// child's leading edge is the sum of the extents of the children
    /// before it plus one spacing per gap. IDs that no longer resolve are
    /// skipped without affecting the others.
    pub fn relayout(&mut self, storage: &mut dyn WidgetAccess) {
        let mut main: f32 = 0.0;
        let mut cross: f32 = 0.0;
        let mut first = true;

        for &id in &self.children {
            let Some(widget) = storage.get_widget_mut(id) else {
                continue;
            };
            if !first {
                main += self.spacing;
            }
            first = false;

            let size = widget.widget_base().size();
            let origin = match self.orientation {
                Orientation::Horizontal => Point::new(main, 0.0),
                Orientation::Vertical => Point::new(0.0, main),
            };
            widget.widget_base_mut().set_geometry(Rect { origin, size });

            match self.orientation {
                Orientation::Horizontal => {
                    main += size.width;
                    cross = cross.max(size.height);
                }
                Orientation::Vertical => {
                    main += size.height;
                    cross = cross.max(size.width);
                }
            }
        }

        self.extent = match self.orientation {
            Orientation::Horizontal => Size::new(main, cross),
            Orientation::Vertical => Size::new(cross, main),
        };
        tracing::trace!(
            target: targets::LAYOUT,
            children = self.children.len(),
            width = self.extent.width,
            height = self.extent.height,
            "layout pass complete"
        );
    }
}
