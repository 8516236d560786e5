//! # Spur Stage Calculation
//!
//! Analyzes a single pinion/gear mesh driven through the pinion:
//!
//! 1. Resolve both gears' geometry with [`gear_char`]
//! 2. Gear ratio from pitch diameters, gear speed from pinion speed
//! 3. Pitch-line velocity at the pinion and the transmitted load
//! 4. Radial and resultant load components
//! 5. Dynamic factor, Lewis form factor and pinion bending stress
//! 6. Interference check against the smallest allowable pinion
//!
//! Pressure angle and output unit system may be left out of the input;
//! [`calculate_with`] fills them from [`CalcSettings`], and [`calculate`]
//! uses the default settings (20°, SI).
//!
//! ## Example
//!
//! ```rust
//! use gear_core::calculations::stage::{calculate, SpurStageInput};
//! use gear_core::equations::{ToothProfile, ToothSystem};
//! use gear_core::geometry::GearParameterSet;
//! use gear_core::lewis::PressureAngle;
//! use gear_core::settings::UnitSystem;
//! use gear_core::units::{Quantity, Unit};
//!
//! let input = SpurStageInput {
//!     label: "Stage 1".to_string(),
//!     pinion: GearParameterSet::new(Unit::Inch).with_pitch(10.0).with_teeth(16.0),
//!     gear: GearParameterSet::new(Unit::Inch).with_pitch(10.0).with_teeth(48.0),
//!     power: Quantity::new(35.0, Unit::Horsepower),
//!     pinion_speed: Quantity::new(1200.0, Unit::Rpm),
//!     pressure_angle: Some(PressureAngle::Deg20),
//!     tooth_system: ToothSystem::FullDepth,
//!     profile: ToothProfile::Hobbed,
//!     face_width: Quantity::new(1.5, Unit::Inch),
//!     unit_system: Some(UnitSystem::English),
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!((result.gear_ratio - 3.0).abs() < 1e-12);
//! assert!(result.interference_free);
//! ```

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::equations::{
    bending_stress, dynamic_factor, load_components, min_pinion_teeth, pitch_line_velocity, transmitted_load,
    LoadVector, ToothProfile, ToothSystem,
};
use crate::errors::{GearError, GearResult};
use crate::geometry::{gear_char, GearParameterSet, SolvedGear};
use crate::lewis::{lewis_form_factor, LewisFormFactorEntry, PressureAngle};
use crate::equations::shigley_ref;
use crate::settings::{CalcSettings, UnitSystem};
use crate::units::{Dimension, Quantity};

/// Input parameters for one spur gear mesh.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Stage 1",
///   "pinion": { "length_unit": "in", "pitch": 10.0, "teeth_num": 16.0,
///               "module": null, "circular_pitch": null, "diameter": null },
///   "gear":   { "length_unit": "in", "pitch": 10.0, "teeth_num": 48.0,
///               "module": null, "circular_pitch": null, "diameter": null },
///   "power": { "magnitude": 35.0, "unit": "hp" },
///   "pinion_speed": { "magnitude": 1200.0, "unit": "rpm" },
///   "pressure_angle": "20deg",
///   "tooth_system": "FullDepth",
///   "profile": "Hobbed",
///   "face_width": { "magnitude": 1.5, "unit": "in" },
///   "unit_system": "ENG"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpurStageInput {
    /// User label (e.g. "Stage 1", "Output mesh")
    pub label: String,

    /// Driving gear, any two independent parameters
    pub pinion: GearParameterSet,

    /// Driven gear, any two independent parameters
    pub gear: GearParameterSet,

    /// Transmitted power
    pub power: Quantity,

    /// Pinion rotational speed
    pub pinion_speed: Quantity,

    /// Pressure angle (tabulated Lewis columns only); settings default when absent
    #[serde(default)]
    pub pressure_angle: Option<PressureAngle>,

    #[serde(default)]
    pub tooth_system: ToothSystem,

    pub profile: ToothProfile,

    /// Pinion face width
    pub face_width: Quantity,

    /// Unit system for reported quantities; settings default when absent
    #[serde(default)]
    pub unit_system: Option<UnitSystem>,
}

impl SpurStageInput {
    /// Validate dimensions and signs of the scalar inputs.
    pub fn validate(&self) -> GearResult<()> {
        self.power.ensure_dimension("power", Dimension::Power)?;
        self.pinion_speed.ensure_dimension("pinion_speed", Dimension::AngularVelocity)?;
        self.face_width.ensure_dimension("face_width", Dimension::Length)?;

        for (field, q) in [
            ("power", &self.power),
            ("pinion_speed", &self.pinion_speed),
            ("face_width", &self.face_width),
        ] {
            if !(q.magnitude() > 0.0) {
                return Err(GearError::invalid_input(field, q.to_string(), "Must be positive"));
            }
        }
        Ok(())
    }
}

/// Results for one spur gear mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpurStageResult {
    pub label: String,

    /// Resolved pinion geometry
    pub pinion: SolvedGear,

    /// Resolved gear geometry
    pub gear: SolvedGear,

    /// d_gear / d_pinion
    pub gear_ratio: f64,

    /// Driven gear speed
    pub gear_speed: Quantity,

    /// Pitch-line velocity
    pub pitchline_velocity: Quantity,

    /// Tangential load W_t
    pub transmitted_load: Quantity,

    /// W_t with radial and resultant components
    pub loads: LoadVector,

    /// Dynamic factor Kv
    pub dynamic_factor: f64,

    /// Lewis form factor for the pinion
    pub lewis: LewisFormFactorEntry,

    /// Pinion bending stress
    pub bending_stress: Quantity,

    /// Smallest interference-free pinion tooth count (unrounded)
    pub min_pinion_teeth: f64,

    /// Pinion tooth count meets the interference limit
    pub interference_free: bool,
}

impl SpurStageResult {
    /// Format as a multi-line string for reports
    pub fn format_report(&self) -> String {
        format!(
            "Spur Stage: {}\n\
             ================================================\n\
             Pinion: N = {:.0}, d = {:.4} {}    {}\n\
             Gear:   N = {:.0}, d = {:.4} {}    {}\n\
             Ratio m_G          = {:.4}\n\
             Gear speed         = {:.2}\n\
             Pitch-line V       = {:.2}    {}\n\
             Transmitted W_t    = {:.2}    {}\n\
             Radial W_r         = {:.2}    {}\n\
             Kv                 = {:.3}    {}\n\
             Lewis Y            = {:.4}    {}{}\n\
             ------------------------------------------------\n\
             Bending stress     = {:.2}    {}\n\
             Min pinion teeth   = {:.2}    {}\n\
             Interference free  = {}",
            self.label,
            self.pinion.teeth_num, self.pinion.diameter, self.pinion.length_unit.symbol(), shigley_ref::GEOMETRY,
            self.gear.teeth_num, self.gear.diameter, self.gear.length_unit.symbol(), shigley_ref::GEOMETRY,
            self.gear_ratio,
            self.gear_speed,
            self.pitchline_velocity, shigley_ref::PITCH_LINE_VELOCITY,
            self.transmitted_load, shigley_ref::TRANSMITTED_LOAD,
            self.loads.radial, shigley_ref::LOAD_COMPONENTS,
            self.dynamic_factor, shigley_ref::DYNAMIC_FACTOR,
            self.lewis.factor, shigley_ref::LEWIS_FORM_FACTOR,
            if self.lewis.interpolated { " (interpolated)" } else { "" },
            self.bending_stress, shigley_ref::BENDING_STRESS,
            self.min_pinion_teeth, shigley_ref::INTERFERENCE,
            if self.interference_free { "yes" } else { "NO" },
        )
    }
}

/// Calculate a spur gear stage with the default [`CalcSettings`].
pub fn calculate(input: &SpurStageInput) -> GearResult<SpurStageResult> {
    calculate_with(input, &CalcSettings::default())
}

/// Calculate a spur gear stage, taking omitted inputs from `settings`.
///
/// The settings' default pressure angle must be one of the tabulated Lewis
/// columns (14.5° or 20°) when the input does not name one.
///
/// # Returns
///
/// * `Ok(SpurStageResult)` - Calculation results
/// * `Err(GearError)` - First failing step (unsolvable geometry, unit mismatch,
///   tooth count outside the Lewis table, ...)
pub fn calculate_with(input: &SpurStageInput, settings: &CalcSettings) -> GearResult<SpurStageResult> {
    input.validate()?;
    settings.validate()?;
    let units = input.unit_system.unwrap_or(settings.unit_system);
    let pressure_angle = match input.pressure_angle {
        Some(angle) => angle,
        None => PressureAngle::from_quantity(&settings.default_pressure_angle())?,
    };

    let pinion = gear_char(&input.pinion)?;
    let gear = gear_char(&input.gear)?;

    let gear_diameter = gear.diameter_quantity().value_in(pinion.length_unit)?;
    if pinion.diameter <= 0.0 {
        return Err(GearError::invalid_input(
            "pinion.diameter",
            pinion.diameter.to_string(),
            "Pinion pitch diameter must be positive",
        ));
    }
    let gear_ratio = gear_diameter / pinion.diameter;
    let gear_speed = input.pinion_speed.to(units.speed_unit())? / gear_ratio;

    let pitchline_velocity = pitch_line_velocity(
        &pinion.diameter_quantity(),
        &input.pinion_speed,
        Some(units.velocity_unit()),
    )?;
    let transmitted_load = transmitted_load(&input.power, &pitchline_velocity, Some(units.force_unit()))?;

    let angle = pressure_angle.to_quantity();
    let loads = load_components(Some(&transmitted_load), Some(&angle), Some(units.force_unit()))?;

    let kv = dynamic_factor(input.profile, &pitchline_velocity)?;
    let lewis = lewis_form_factor(pinion.teeth_count(), pressure_angle)?;
    let bending_stress = bending_stress(
        kv,
        &transmitted_load,
        &pinion.module_quantity(),
        &input.face_width,
        lewis.factor,
        Some(units.stress_unit()),
    )?;

    let min_pinion_teeth = min_pinion_teeth(Some(&angle), Some(gear_ratio), input.tooth_system)?;
    let interference_free = pinion.teeth_num >= min_pinion_teeth;

    info!(
        label = %input.label,
        ratio = gear_ratio,
        stress = %bending_stress,
        interference_free,
        "spur stage calculated"
    );

    Ok(SpurStageResult {
        label: input.label.clone(),
        pinion,
        gear,
        gear_ratio,
        gear_speed,
        pitchline_velocity,
        transmitted_load,
        loads,
        dynamic_factor: kv,
        lewis,
        bending_stress,
        min_pinion_teeth,
        interference_free,
    })
}
