//! Built-in controls.

pub mod checkbox;
pub mod container;
pub mod dropdown;
pub mod knob;
pub mod push_button;
pub mod slider;
pub mod stepper;

pub use checkbox::Checkbox;
pub use container::Container;
pub use dropdown::DropDown;
pub use knob::Knob;
pub use push_button::PushButton;
pub use slider::Slider;
pub use stepper::{Stepper, StepperPart};
