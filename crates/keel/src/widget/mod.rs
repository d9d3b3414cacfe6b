//! The widget engine.
//!
//! Widgets are plain structs that embed a [`WidgetBase`] and implement
//! [`Widget`]. Interaction machinery lives in focused submodules:
//!
//! - [`value`]: bounded values with precision and change dedup
//! - [`drag`]: pointer capture and drag sessions
//! - [`step`]: keyboard and wheel stepping
//! - [`repeat`]: press-and-hold auto-repeat timing
//! - [`layout`]: linear arrangement of stored widgets
//! - [`focus`]: exclusive selection groups with cyclic traversal
//! - [`widgets`]: the built-in controls

pub mod base;
pub mod drag;
pub mod events;
pub mod focus;
pub mod layout;
pub mod repeat;
pub mod step;
pub mod store;
pub mod traits;
pub mod value;
pub mod widgets;

pub use base::WidgetBase;
pub use drag::{CaptureError, CaptureGuard, DragSession, PointerCapture};
pub use events::{
    Key, KeyPressEvent, MouseButton, MouseMoveEvent, MousePressEvent, MouseReleaseEvent,
    WheelEvent, WidgetEvent,
};
pub use focus::{FocusGroup, FocusGroups, GroupError};
pub use layout::{LinearLayout, Orientation};
pub use repeat::RepeatTimer;
pub use step::{DiscreteStepController, StepCommand};
pub use store::{WidgetAccess, WidgetId, WidgetStore};
pub use traits::Widget;
pub use value::{BoundedValue, ChangeEmitter};
