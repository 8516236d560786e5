//! # gear_core - Spur Gear Calculation Engine
//!
//! `gear_core` implements the spur gear design equations of Shigley's
//! Mechanical Engineering Design (10th ed.) with unit-checked quantities:
//! geometry solving, pitch-line velocity, transmitted load, load components,
//! interference limits, dynamic factor, Lewis form factor and bending stress.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Unit-checked**: Inputs are [`Quantity`] values; a wrong dimension is an error, not a wrong answer
//! - **Rich Errors**: Structured [`GearError`] values, never console output
//! - **JSON-First**: All inputs and results implement Serialize/Deserialize
//!
//! ## Quick Start
//!
//! ```rust
//! use gear_core::geometry::{gear_char, GearParameterSet};
//! use gear_core::equations::{pitch_line_velocity, transmitted_load};
//! use gear_core::units::{Quantity, Unit};
//!
//! // Fill in the pinion's geometry from pitch and tooth count
//! let pinion = gear_char(&GearParameterSet::new(Unit::Inch).with_pitch(10.0).with_teeth(16.0)).unwrap();
//!
//! let v = pitch_line_velocity(&pinion.diameter_quantity(), &Quantity::new(1200.0, Unit::Rpm), None).unwrap();
//! let wt = transmitted_load(&Quantity::new(35.0, Unit::Horsepower), &v, Some(Unit::PoundForce)).unwrap();
//! assert!((wt.magnitude() - 2297.8).abs() < 0.1);
//! ```
//!
//! ## Modules
//!
//! - [`geometry`] - Gear geometry solver (pitch, teeth, module, circular pitch, diameter)
//! - [`equations`] - Load, velocity, interference, dynamic factor and stress formulas
//! - [`lewis`] - Lewis form factor table
//! - [`calculations`] - Complete pinion/gear stage analysis
//! - [`units`] - Runtime-dimensioned quantities
//! - [`settings`] - Calculation defaults
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod geometry;
pub mod lewis;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use errors::{GearError, GearResult};
pub use geometry::{gear_char, GearParameterSet, SolvedGear};
pub use lewis::{lewis_form_factor, PressureAngle};
pub use settings::{CalcSettings, UnitSystem};
pub use units::{Quantity, Unit};
