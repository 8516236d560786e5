//! # Gear Calculations
//!
//! Multi-step calculations built from the solver and equation evaluators.
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> GearResult<*Result>` - Pure calculation function
//! - `calculate_with(input, settings)` - Same, with omitted inputs taken from [`CalcSettings`](crate::settings::CalcSettings)
//!
//! ## Available Calculations
//!
//! - [`stage`] - One pinion/gear mesh: geometry, speeds, loads, Kv, bending stress

pub mod stage;

pub use stage::{SpurStageInput, SpurStageResult};
