//! Logging facilities for Keel.
//!
//! Keel uses the `tracing` crate for instrumentation. To see logs, install a
//! tracing subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem, e.g.
/// `RUST_LOG=keel::drag=trace`.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "keel_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "keel_core::signal";
    /// Pointer capture target.
    pub const CAPTURE: &str = "keel::capture";
    /// Drag session target.
    pub const DRAG: &str = "keel::drag";
    /// Press-and-hold repeat target.
    pub const REPEAT: &str = "keel::repeat";
    /// Linear layout target.
    pub const LAYOUT: &str = "keel::layout";
    /// Focus/selection group target.
    pub const FOCUS: &str = "keel::focus";
}
