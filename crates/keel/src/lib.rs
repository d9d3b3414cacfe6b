//! Keel: an embeddable control toolkit.
//!
//! Keel provides the interaction engine for value controls: sliders,
//! knobs, steppers, drop-downs, checkboxes, and buttons, plus linear
//! layout and selection groups. It is headless: the embedder delivers
//! input events and reads geometry and values back out, and supplies
//! rendering and the event loop itself.
//!
//! # Example
//!
//! ```
//! use keel::widget::widgets::Slider;
//! use keel::widget::Orientation;
//!
//! let mut volume = Slider::new(Orientation::Horizontal)
//!     .with_range(0.0, 11.0)
//!     .with_decimals(1);
//!
//! volume.value_changed().connect(|&v| {
//!     println!("volume: {}", v);
//! });
//!
//! volume.set_value(7.5);
//! assert_eq!(volume.text(), "7.5");
//! ```

pub mod widget;

pub use keel_core;

pub use widget::widgets::{Checkbox, Container, DropDown, Knob, PushButton, Slider, Stepper};
pub use widget::{Orientation, Widget, WidgetBase};
