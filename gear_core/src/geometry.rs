//! # Gear Geometry Solver
//!
//! Resolves the five coupled spur gear size parameters from any two
//! independent ones (Shigley 10th ed., Section 13-3):
//!
//! ```text
//! P = N / d          diametral pitch (teeth per unit length)
//! m = d / N          module (length per tooth)
//! p = π / P = π·m    circular pitch
//! d = N / P = m·N    pitch diameter
//! ```
//!
//! [`gear_char`] runs a bounded fixed-point iteration over these identities.
//! Each pass visits the unknown fields in the order pitch, teeth, module,
//! circular pitch, diameter and tries the two algebraic forms that yield the
//! field, keeping the first that has both operands known. Values derived
//! earlier in a pass are available to later fields in the same pass.
//!
//! ## Pass bound
//!
//! There are five fields, and a pass that makes progress fixes at least one
//! of them, so a solvable set is complete after at most five productive
//! passes. [`MAX_PASSES`] is six: the sixth pass is only a termination guard.
//! A pass that derives nothing ends the loop early because no later pass can
//! do better.
//!
//! ## Preconditions
//!
//! All lengths in a [`GearParameterSet`] share its `length_unit`; the solver
//! never converts units. Quantities are converted at the builder boundary
//! ([`GearParameterSet::with_diameter_quantity`] and friends). The solver
//! does not round the tooth count and does not check overdetermined input
//! for consistency.
//!
//! ## Example
//!
//! ```rust
//! use gear_core::geometry::{gear_char, GearParameterSet};
//! use gear_core::units::Unit;
//!
//! let pinion = GearParameterSet::new(Unit::Inch)
//!     .with_teeth(16.0)
//!     .with_diameter(1.6);
//! let solved = gear_char(&pinion).unwrap();
//!
//! assert!((solved.pitch - 10.0).abs() < 1e-12);
//! assert!((solved.module - 0.1).abs() < 1e-12);
//! assert!((solved.circular_pitch - 0.314159).abs() < 1e-6);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{GearError, GearResult};
use crate::units::{Dimension, Quantity, Unit};

/// Upper bound on solver passes (five fields plus one guard pass)
pub const MAX_PASSES: usize = 6;

/// Identifies one of the five geometry parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GearParam {
    Pitch,
    TeethNum,
    Module,
    CircularPitch,
    Diameter,
}

impl GearParam {
    /// Solver visiting order
    pub const ALL: [GearParam; 5] = [
        GearParam::Pitch,
        GearParam::TeethNum,
        GearParam::Module,
        GearParam::CircularPitch,
        GearParam::Diameter,
    ];

    /// Field name
    pub fn name(&self) -> &'static str {
        match self {
            GearParam::Pitch => "pitch",
            GearParam::TeethNum => "teeth_num",
            GearParam::Module => "module",
            GearParam::CircularPitch => "circular_pitch",
            GearParam::Diameter => "diameter",
        }
    }
}

impl std::fmt::Display for GearParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Partially known gear geometry.
///
/// `None` marks an unknown field. Lengths (`module`, `circular_pitch`,
/// `diameter`) are in `length_unit`, `pitch` in teeth per `length_unit`.
///
/// ## JSON Example
///
/// ```json
/// {
///   "length_unit": "in",
///   "pitch": 10.0,
///   "teeth_num": 16.0,
///   "module": null,
///   "circular_pitch": null,
///   "diameter": null
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GearParameterSet {
    pub length_unit: Unit,
    pub pitch: Option<f64>,
    pub teeth_num: Option<f64>,
    pub module: Option<f64>,
    pub circular_pitch: Option<f64>,
    pub diameter: Option<f64>,
}

impl GearParameterSet {
    /// Empty set with all lengths measured in `length_unit`
    pub fn new(length_unit: Unit) -> Self {
        GearParameterSet {
            length_unit,
            pitch: None,
            teeth_num: None,
            module: None,
            circular_pitch: None,
            diameter: None,
        }
    }

    /// Diametral pitch in teeth per `length_unit`
    pub fn with_pitch(mut self, pitch: f64) -> Self {
        self.pitch = Some(pitch);
        self
    }

    pub fn with_teeth(mut self, teeth_num: f64) -> Self {
        self.teeth_num = Some(teeth_num);
        self
    }

    pub fn with_module(mut self, module: f64) -> Self {
        self.module = Some(module);
        self
    }

    pub fn with_circular_pitch(mut self, circular_pitch: f64) -> Self {
        self.circular_pitch = Some(circular_pitch);
        self
    }

    pub fn with_diameter(mut self, diameter: f64) -> Self {
        self.diameter = Some(diameter);
        self
    }

    /// Set pitch from an inverse-length quantity (e.g. `10 1/in`)
    pub fn with_pitch_quantity(self, pitch: Quantity) -> GearResult<Self> {
        let unit = self.pitch_unit()?;
        let value = pitch.named_value_in(GearParam::Pitch.name(), unit)?;
        Ok(self.with_pitch(value))
    }

    /// Set module from a length quantity
    pub fn with_module_quantity(self, module: Quantity) -> GearResult<Self> {
        let value = module.named_value_in(GearParam::Module.name(), self.length_unit)?;
        Ok(self.with_module(value))
    }

    /// Set circular pitch from a length quantity
    pub fn with_circular_pitch_quantity(self, circular_pitch: Quantity) -> GearResult<Self> {
        let value = circular_pitch.named_value_in(GearParam::CircularPitch.name(), self.length_unit)?;
        Ok(self.with_circular_pitch(value))
    }

    /// Set pitch diameter from a length quantity
    pub fn with_diameter_quantity(self, diameter: Quantity) -> GearResult<Self> {
        let value = diameter.named_value_in(GearParam::Diameter.name(), self.length_unit)?;
        Ok(self.with_diameter(value))
    }

    /// Inverse-length unit matching `length_unit`
    pub fn pitch_unit(&self) -> GearResult<Unit> {
        self.length_unit.reciprocal_length().ok_or_else(|| {
            GearError::invalid_input(
                "length_unit",
                self.length_unit.symbol(),
                "Gear geometry needs a length unit",
            )
        })
    }

    pub fn get(&self, param: GearParam) -> Option<f64> {
        match param {
            GearParam::Pitch => self.pitch,
            GearParam::TeethNum => self.teeth_num,
            GearParam::Module => self.module,
            GearParam::CircularPitch => self.circular_pitch,
            GearParam::Diameter => self.diameter,
        }
    }

    fn set(&mut self, param: GearParam, value: f64) {
        let slot = match param {
            GearParam::Pitch => &mut self.pitch,
            GearParam::TeethNum => &mut self.teeth_num,
            GearParam::Module => &mut self.module,
            GearParam::CircularPitch => &mut self.circular_pitch,
            GearParam::Diameter => &mut self.diameter,
        };
        *slot = Some(value);
    }

    /// Number of known fields
    pub fn known_count(&self) -> usize {
        GearParam::ALL.iter().filter(|p| self.get(**p).is_some()).count()
    }

    /// Fields still unknown, in solver order
    pub fn missing(&self) -> Vec<GearParam> {
        GearParam::ALL.iter().copied().filter(|p| self.get(*p).is_none()).collect()
    }

    fn complete(&self, pitch_unit: Unit) -> Option<SolvedGear> {
        Some(SolvedGear {
            length_unit: self.length_unit,
            pitch_unit,
            pitch: self.pitch?,
            teeth_num: self.teeth_num?,
            module: self.module?,
            circular_pitch: self.circular_pitch?,
            diameter: self.diameter?,
        })
    }
}

/// Fully resolved gear geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolvedGear {
    pub length_unit: Unit,
    pub pitch_unit: Unit,
    /// Diametral pitch (teeth per `length_unit`)
    pub pitch: f64,
    /// Tooth count, unrounded
    pub teeth_num: f64,
    pub module: f64,
    pub circular_pitch: f64,
    pub diameter: f64,
}

impl SolvedGear {
    pub fn pitch_quantity(&self) -> Quantity {
        Quantity::new(self.pitch, self.pitch_unit)
    }

    pub fn module_quantity(&self) -> Quantity {
        Quantity::new(self.module, self.length_unit)
    }

    pub fn circular_pitch_quantity(&self) -> Quantity {
        Quantity::new(self.circular_pitch, self.length_unit)
    }

    pub fn diameter_quantity(&self) -> Quantity {
        Quantity::new(self.diameter, self.length_unit)
    }

    /// Tooth count rounded to the nearest whole tooth
    pub fn teeth_count(&self) -> u32 {
        self.teeth_num.round().max(0.0) as u32
    }

    /// Re-express every length in another length unit.
    pub fn to_length_unit(&self, target: Unit) -> GearResult<SolvedGear> {
        let pitch_unit = target.reciprocal_length().ok_or_else(|| {
            GearError::unit_mismatch("gear geometry", target.symbol(), Dimension::Length.name())
        })?;
        let scale = Quantity::new(1.0, self.length_unit).value_in(target)?;
        Ok(SolvedGear {
            length_unit: target,
            pitch_unit,
            pitch: self.pitch / scale,
            teeth_num: self.teeth_num,
            module: self.module * scale,
            circular_pitch: self.circular_pitch * scale,
            diameter: self.diameter * scale,
        })
    }

    /// Largest relative residual across the four identities
    pub fn identity_residual(&self) -> f64 {
        let rel = |actual: f64, expected: f64| (actual - expected).abs() / expected.abs().max(f64::MIN_POSITIVE);
        [
            rel(self.pitch, self.teeth_num / self.diameter),
            rel(self.module, self.diameter / self.teeth_num),
            rel(self.circular_pitch, PI / self.pitch),
            rel(self.circular_pitch, PI * self.module),
            rel(self.diameter, self.module * self.teeth_num),
        ]
        .into_iter()
        .fold(0.0, f64::max)
    }
}

/// Derive every unknown geometry field from the known ones.
///
/// # Returns
///
/// * `Ok(SolvedGear)` - all five fields determined
/// * `Err(GearError::Unsolvable)` - too few independent fields; names the
///   fields left undetermined
/// * `Err(GearError::InvalidInput)` - a known field is non-finite, a zero
///   divisor is hit, or `length_unit` is not a length
pub fn gear_char(input: &GearParameterSet) -> GearResult<SolvedGear> {
    let pitch_unit = input.pitch_unit()?;
    for param in GearParam::ALL {
        if let Some(value) = input.get(param) {
            if !value.is_finite() {
                return Err(GearError::invalid_input(
                    param.name(),
                    value.to_string(),
                    "Gear parameter must be finite",
                ));
            }
        }
    }

    let mut set = *input;
    for pass in 1..=MAX_PASSES {
        let mut progress = false;
        for param in GearParam::ALL {
            if set.get(param).is_some() {
                continue;
            }
            if let Some(value) = derive(&set, param)? {
                set.set(param, value);
                progress = true;
            }
        }

        debug!(pass, known = set.known_count(), "gear_char pass complete");

        if let Some(solved) = set.complete(pitch_unit) {
            return Ok(solved);
        }
        if !progress {
            break;
        }
    }

    let missing_fields: Vec<String> = set.missing().iter().map(|p| p.name().to_string()).collect();
    warn!(missing = ?missing_fields, "gear_char: too many unknowns to resolve geometry");
    Err(GearError::Unsolvable { missing_fields })
}

/// Try both forms that yield `param`; `None` when neither has its operands.
fn derive(set: &GearParameterSet, param: GearParam) -> GearResult<Option<f64>> {
    use GearParam::*;

    let first = match param {
        Pitch => quotient(set.teeth_num, set.diameter, Diameter)?,
        TeethNum => product(set.pitch, set.diameter),
        Module => quotient(set.diameter, set.teeth_num, TeethNum)?,
        CircularPitch => quotient(Some(PI), set.pitch, Pitch)?,
        Diameter => quotient(set.teeth_num, set.pitch, Pitch)?,
    };
    if first.is_some() {
        return Ok(first);
    }

    match param {
        Pitch => quotient(Some(PI), set.circular_pitch, CircularPitch),
        TeethNum => quotient(set.diameter, set.module, Module),
        Module => Ok(set.circular_pitch.map(|p| p / PI)),
        CircularPitch => Ok(product(Some(PI), set.module)),
        Diameter => Ok(product(set.module, set.teeth_num)),
    }
}

fn product(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    Some(a? * b?)
}

fn quotient(numerator: Option<f64>, denominator: Option<f64>, denominator_param: GearParam) -> GearResult<Option<f64>> {
    match (numerator, denominator) {
        (Some(_), Some(d)) if d == 0.0 => Err(GearError::invalid_input(
            denominator_param.name(),
            "0",
            "Gear parameter used as a divisor cannot be zero",
        )),
        (Some(n), Some(d)) => Ok(Some(n / d)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn full_set(teeth: f64, diameter: f64) -> [f64; 5] {
        let pitch = teeth / diameter;
        let module = diameter / teeth;
        [pitch, teeth, module, PI * module, diameter]
    }

    fn with_fields(unit: Unit, values: &[f64; 5], known: &[GearParam]) -> GearParameterSet {
        let mut set = GearParameterSet::new(unit);
        for (param, value) in GearParam::ALL.iter().zip(values) {
            if known.contains(param) {
                set.set(*param, *value);
            }
        }
        set
    }

    fn independent_pairs() -> Vec<(GearParam, GearParam)> {
        use GearParam::*;
        // pitch, module and circular pitch each fix the others, so any two
        // of them carry only one piece of information
        let size_only = [Pitch, Module, CircularPitch];
        let mut pairs = Vec::new();
        for (i, a) in GearParam::ALL.iter().enumerate() {
            for b in &GearParam::ALL[i + 1..] {
                if !(size_only.contains(a) && size_only.contains(b)) {
                    pairs.push((*a, *b));
                }
            }
        }
        pairs
    }

    #[test]
    fn test_teeth_and_diameter() {
        let set = GearParameterSet::new(Unit::Inch).with_teeth(16.0).with_diameter(1.6);
        let solved = gear_char(&set).unwrap();
        assert!((solved.pitch - 10.0).abs() < TOL);
        assert!((solved.module - 0.1).abs() < TOL);
        assert!((solved.circular_pitch - 0.314_159_265).abs() < 1e-6);
        assert_eq!(solved.pitch_unit, Unit::PerInch);
    }

    #[test]
    fn test_pitch_and_teeth() {
        let set = GearParameterSet::new(Unit::Inch).with_pitch(10.0).with_teeth(48.0);
        let solved = gear_char(&set).unwrap();
        assert!((solved.diameter - 4.8).abs() < TOL);
        assert_eq!(solved.teeth_count(), 48);
    }

    #[test]
    fn test_every_independent_pair_solves() {
        let gears = [(16.0, 1.6), (48.0, 4.8), (17.0, 85.0), (120.0, 3.0), (12.0, 0.75)];
        let pairs = independent_pairs();
        assert_eq!(pairs.len(), 7);

        for (teeth, diameter) in gears {
            let values = full_set(teeth, diameter);
            for (a, b) in &pairs {
                let set = with_fields(Unit::Millimeter, &values, &[*a, *b]);
                let solved = gear_char(&set).unwrap_or_else(|e| panic!("{} + {}: {}", a, b, e));
                assert!(solved.identity_residual() < TOL, "{} + {}", a, b);
                for (param, expected) in GearParam::ALL.iter().zip(&values) {
                    let actual = set_value(&solved, *param);
                    assert!(
                        (actual - expected).abs() <= TOL * expected.abs(),
                        "{} from {} + {}: {} vs {}",
                        param,
                        a,
                        b,
                        actual,
                        expected
                    );
                }
            }
        }
    }

    fn set_value(solved: &SolvedGear, param: GearParam) -> f64 {
        match param {
            GearParam::Pitch => solved.pitch,
            GearParam::TeethNum => solved.teeth_num,
            GearParam::Module => solved.module,
            GearParam::CircularPitch => solved.circular_pitch,
            GearParam::Diameter => solved.diameter,
        }
    }

    #[test]
    fn test_zero_or_one_known_is_unsolvable() {
        let values = full_set(20.0, 2.5);
        let empty = GearParameterSet::new(Unit::Inch);
        match gear_char(&empty) {
            Err(GearError::Unsolvable { missing_fields }) => assert_eq!(missing_fields.len(), 5),
            other => panic!("expected Unsolvable, got {:?}", other),
        }

        for param in GearParam::ALL {
            let set = with_fields(Unit::Inch, &values, &[param]);
            let err = gear_char(&set).unwrap_err();
            assert_eq!(err.error_code(), "UNSOLVABLE", "only {} known", param);
        }
    }

    #[test]
    fn test_dependent_pair_reports_missing_fields() {
        let set = GearParameterSet::new(Unit::Inch).with_pitch(10.0).with_module(0.1);
        match gear_char(&set) {
            Err(GearError::Unsolvable { missing_fields }) => {
                assert_eq!(missing_fields, vec!["teeth_num".to_string(), "diameter".to_string()]);
            }
            other => panic!("expected Unsolvable, got {:?}", other),
        }
    }

    #[test]
    fn test_overdetermined_input_is_not_checked() {
        // Inconsistent on purpose: returned unchanged
        let set = GearParameterSet::new(Unit::Inch)
            .with_pitch(10.0)
            .with_teeth(16.0)
            .with_module(0.5)
            .with_circular_pitch(1.0)
            .with_diameter(3.0);
        let solved = gear_char(&set).unwrap();
        assert_eq!(solved.module, 0.5);
        assert_eq!(solved.diameter, 3.0);
        assert!(solved.identity_residual() > 0.1);
    }

    #[test]
    fn test_teeth_not_rounded() {
        let set = GearParameterSet::new(Unit::Inch).with_pitch(10.0).with_diameter(1.63);
        let solved = gear_char(&set).unwrap();
        assert!((solved.teeth_num - 16.3).abs() < TOL);
        assert_eq!(solved.teeth_count(), 16);
    }

    #[test]
    fn test_zero_divisor_is_invalid_input() {
        let set = GearParameterSet::new(Unit::Inch).with_teeth(16.0).with_diameter(0.0);
        let err = gear_char(&set).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let set = GearParameterSet::new(Unit::Inch).with_circular_pitch(0.0).with_teeth(16.0);
        assert_eq!(gear_char(&set).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_non_length_unit_rejected() {
        let set = GearParameterSet::new(Unit::Newton).with_teeth(16.0).with_diameter(1.6);
        assert_eq!(gear_char(&set).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_quantity_builders_convert_to_set_unit() {
        let set = GearParameterSet::new(Unit::Inch)
            .with_teeth(16.0)
            .with_diameter_quantity(Quantity::new(40.64, Unit::Millimeter))
            .unwrap();
        let solved = gear_char(&set).unwrap();
        assert!((solved.diameter - 1.6).abs() < TOL);
        assert!((solved.pitch - 10.0).abs() < 1e-9);

        let pitch = GearParameterSet::new(Unit::Millimeter)
            .with_pitch_quantity(Quantity::new(10.0, Unit::PerInch))
            .unwrap();
        assert!((pitch.pitch.unwrap() - 10.0 / 25.4).abs() < 1e-12);

        let err = GearParameterSet::new(Unit::Inch)
            .with_diameter_quantity(Quantity::new(1.0, Unit::Newton))
            .unwrap_err();
        assert_eq!(err.error_code(), "UNIT_MISMATCH");
    }

    #[test]
    fn test_to_length_unit() {
        let set = GearParameterSet::new(Unit::Inch).with_teeth(16.0).with_diameter(1.6);
        let mm = gear_char(&set).unwrap().to_length_unit(Unit::Millimeter).unwrap();
        assert!((mm.diameter - 40.64).abs() < 1e-9);
        assert!((mm.module - 2.54).abs() < 1e-9);
        assert!((mm.pitch - 10.0 / 25.4).abs() < 1e-12);
        assert_eq!(mm.pitch_unit, Unit::PerMillimeter);
        assert!(mm.identity_residual() < TOL);
    }

    #[test]
    fn test_serialization() {
        let set = GearParameterSet::new(Unit::Inch).with_pitch(10.0).with_teeth(16.0);
        let json = serde_json::to_string(&set).unwrap();
        let roundtrip: GearParameterSet = serde_json::from_str(&json).unwrap();
        assert_eq!(set, roundtrip);
    }
}
