//! # Spur Gear Equations
//!
//! Direct formula evaluators from Shigley's Mechanical Engineering Design,
//! 10th edition, Chapters 13 and 14. Every evaluator is a pure function:
//! typed [`Quantity`](crate::units::Quantity) inputs in, a typed result or a
//! [`GearError`](crate::errors::GearError) out.
//!
//! Textbook forms are evaluated in the units the textbook writes them in
//! (horsepower and ft/min for Eq. 13-35, inches and rpm for Eq. 13-34, m/s
//! for Eq. 14-6, N and mm for Eq. 14-8); inputs are converted on the way in
//! and results converted to the caller's unit on the way out.
//!
//! ## Modules
//!
//! - [`loads`] - Pitch-line velocity, transmitted load, load components
//! - [`interference`] - Smallest pinion free of involute interference
//! - [`dynamic`] - Velocity (dynamic) factor Kv
//! - [`stress`] - Lewis bending stress

pub mod dynamic;
pub mod interference;
pub mod loads;
pub mod stress;

/// Shigley 10th ed. references for each evaluator.
pub mod shigley_ref {
    /// Diametral pitch, module and circular pitch relations
    pub const GEOMETRY: &str = "Shigley Eq. 13-1 to 13-4";
    /// Smallest pinion tooth count without interference
    pub const INTERFERENCE: &str = "Shigley Eq. 13-11";
    /// Pitch-line velocity V = πdn/12
    pub const PITCH_LINE_VELOCITY: &str = "Shigley Eq. 13-34";
    /// Transmitted load Wt = 33000 H / V
    pub const TRANSMITTED_LOAD: &str = "Shigley Eq. 13-35";
    /// Radial and resultant force from tangential load
    pub const LOAD_COMPONENTS: &str = "Shigley Fig. 13-32";
    /// Lewis form factor table
    pub const LEWIS_FORM_FACTOR: &str = "Shigley Table 14-2";
    /// Velocity factor Kv (SI form)
    pub const DYNAMIC_FACTOR: &str = "Shigley Eq. 14-6";
    /// Lewis bending stress σ = Kv Wt / (F m Y)
    pub const BENDING_STRESS: &str = "Shigley Eq. 14-8";
}

pub use dynamic::{dynamic_factor, ToothProfile};
pub use interference::{min_pinion_teeth, min_pinion_teeth_count, ToothSystem};
pub use loads::{load_components, pitch_line_velocity, transmitted_load, LoadVector};
pub use stress::bending_stress;
