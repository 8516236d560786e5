//! # Unit Types
//!
//! Runtime-dimensioned quantities for gear calculations. Each [`Quantity`]
//! is a magnitude paired with a [`Unit`]; each unit knows its [`Dimension`]
//! and its scale to SI. Conversions between units of the same dimension are
//! exact scalings, conversions across dimensions fail with
//! [`GearError::UnitMismatch`].
//!
//! ## Design Philosophy
//!
//! Gear equations in Shigley mix US customary and SI units inside a single
//! formula (horsepower over ft/min giving lbf, millimetres giving MPa), and
//! callers pick their output units at run time. A closed `Unit` enum with a
//! dimension tag keeps that flexible while still refusing to turn a force
//! into a length:
//! - Every unit belongs to exactly one dimension
//! - No unit algebra: evaluators convert inputs to the units their formula
//!   expects, compute on raw `f64`, and tag the result
//! - JSON serialization uses unit symbols (`"in"`, `"ft/min"`, `"MPa"`)
//!
//! ## Example
//!
//! ```rust
//! use gear_core::units::{Quantity, Unit};
//!
//! let diameter = Quantity::new(2.0, Unit::Inch);
//! let diameter_mm = diameter.to(Unit::Millimeter).unwrap();
//! assert!((diameter_mm.magnitude() - 50.8).abs() < 1e-9);
//!
//! // Length cannot become force
//! assert!(diameter.to(Unit::Newton).is_err());
//! ```

use std::f64::consts::PI;
use std::fmt;
use std::ops::{Div, Mul};

use serde::{Deserialize, Serialize};

use crate::errors::{GearError, GearResult};

// ============================================================================
// Conversion Constants
// ============================================================================

/// Metres per inch (exact)
pub const METERS_PER_INCH: f64 = 0.0254;

/// Metres per foot (exact)
pub const METERS_PER_FOOT: f64 = 0.3048;

/// Newtons per pound-force
pub const NEWTONS_PER_LBF: f64 = 4.448_221_615_260_5;

/// Watts per mechanical horsepower (550 ft·lbf/s)
pub const WATTS_PER_HP: f64 = 550.0 * METERS_PER_FOOT * NEWTONS_PER_LBF;

/// Pascals per psi (lbf/in²)
pub const PASCALS_PER_PSI: f64 = NEWTONS_PER_LBF / (METERS_PER_INCH * METERS_PER_INCH);

// ============================================================================
// Dimensions
// ============================================================================

/// Physical dimension of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Dimensionless,
    Length,
    /// Teeth per unit length (diametral pitch)
    InverseLength,
    Force,
    Power,
    Velocity,
    AngularVelocity,
    Angle,
    Stress,
}

impl Dimension {
    /// Lowercase name for error messages
    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Dimensionless => "dimensionless",
            Dimension::Length => "length",
            Dimension::InverseLength => "inverse length",
            Dimension::Force => "force",
            Dimension::Power => "power",
            Dimension::Velocity => "velocity",
            Dimension::AngularVelocity => "angular velocity",
            Dimension::Angle => "angle",
            Dimension::Stress => "stress",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Units
// ============================================================================

/// Supported units. Serialized by symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "ratio")]
    Ratio,

    // Length
    #[serde(rename = "m")]
    Meter,
    #[serde(rename = "mm")]
    Millimeter,
    #[serde(rename = "in")]
    Inch,
    #[serde(rename = "ft")]
    Foot,

    // Inverse length
    #[serde(rename = "1/m")]
    PerMeter,
    #[serde(rename = "1/mm")]
    PerMillimeter,
    #[serde(rename = "1/in")]
    PerInch,
    #[serde(rename = "1/ft")]
    PerFoot,

    // Force
    #[serde(rename = "N")]
    Newton,
    #[serde(rename = "kN")]
    Kilonewton,
    #[serde(rename = "lbf")]
    PoundForce,
    #[serde(rename = "kip")]
    Kip,

    // Power
    #[serde(rename = "W")]
    Watt,
    #[serde(rename = "kW")]
    Kilowatt,
    #[serde(rename = "hp")]
    Horsepower,

    // Velocity
    #[serde(rename = "m/s")]
    MeterPerSecond,
    #[serde(rename = "ft/min")]
    FootPerMinute,
    #[serde(rename = "ft/s")]
    FootPerSecond,

    // Angular velocity
    #[serde(rename = "rad/s")]
    RadianPerSecond,
    #[serde(rename = "rpm")]
    Rpm,

    // Angle
    #[serde(rename = "rad")]
    Radian,
    #[serde(rename = "deg")]
    Degree,

    // Stress
    #[serde(rename = "Pa")]
    Pascal,
    #[serde(rename = "kPa")]
    Kilopascal,
    #[serde(rename = "MPa")]
    Megapascal,
    #[serde(rename = "psi")]
    Psi,
    #[serde(rename = "kpsi")]
    Kpsi,
}

impl Unit {
    /// Every supported unit
    pub const ALL: [Unit; 28] = [
        Unit::Ratio,
        Unit::Meter,
        Unit::Millimeter,
        Unit::Inch,
        Unit::Foot,
        Unit::PerMeter,
        Unit::PerMillimeter,
        Unit::PerInch,
        Unit::PerFoot,
        Unit::Newton,
        Unit::Kilonewton,
        Unit::PoundForce,
        Unit::Kip,
        Unit::Watt,
        Unit::Kilowatt,
        Unit::Horsepower,
        Unit::MeterPerSecond,
        Unit::FootPerMinute,
        Unit::FootPerSecond,
        Unit::RadianPerSecond,
        Unit::Rpm,
        Unit::Radian,
        Unit::Degree,
        Unit::Pascal,
        Unit::Kilopascal,
        Unit::Megapascal,
        Unit::Psi,
        Unit::Kpsi,
    ];

    /// Dimension this unit measures
    pub fn dimension(&self) -> Dimension {
        match self {
            Unit::Ratio => Dimension::Dimensionless,
            Unit::Meter | Unit::Millimeter | Unit::Inch | Unit::Foot => Dimension::Length,
            Unit::PerMeter | Unit::PerMillimeter | Unit::PerInch | Unit::PerFoot => Dimension::InverseLength,
            Unit::Newton | Unit::Kilonewton | Unit::PoundForce | Unit::Kip => Dimension::Force,
            Unit::Watt | Unit::Kilowatt | Unit::Horsepower => Dimension::Power,
            Unit::MeterPerSecond | Unit::FootPerMinute | Unit::FootPerSecond => Dimension::Velocity,
            Unit::RadianPerSecond | Unit::Rpm => Dimension::AngularVelocity,
            Unit::Radian | Unit::Degree => Dimension::Angle,
            Unit::Pascal | Unit::Kilopascal | Unit::Megapascal | Unit::Psi | Unit::Kpsi => Dimension::Stress,
        }
    }

    /// Multiplier taking a magnitude in this unit to the SI base unit of its dimension
    pub fn si_factor(&self) -> f64 {
        match self {
            Unit::Ratio => 1.0,
            Unit::Meter => 1.0,
            Unit::Millimeter => 1.0e-3,
            Unit::Inch => METERS_PER_INCH,
            Unit::Foot => METERS_PER_FOOT,
            Unit::PerMeter => 1.0,
            Unit::PerMillimeter => 1.0e3,
            Unit::PerInch => 1.0 / METERS_PER_INCH,
            Unit::PerFoot => 1.0 / METERS_PER_FOOT,
            Unit::Newton => 1.0,
            Unit::Kilonewton => 1.0e3,
            Unit::PoundForce => NEWTONS_PER_LBF,
            Unit::Kip => 1.0e3 * NEWTONS_PER_LBF,
            Unit::Watt => 1.0,
            Unit::Kilowatt => 1.0e3,
            Unit::Horsepower => WATTS_PER_HP,
            Unit::MeterPerSecond => 1.0,
            Unit::FootPerMinute => METERS_PER_FOOT / 60.0,
            Unit::FootPerSecond => METERS_PER_FOOT,
            Unit::RadianPerSecond => 1.0,
            Unit::Rpm => 2.0 * PI / 60.0,
            Unit::Radian => 1.0,
            Unit::Degree => PI / 180.0,
            Unit::Pascal => 1.0,
            Unit::Kilopascal => 1.0e3,
            Unit::Megapascal => 1.0e6,
            Unit::Psi => PASCALS_PER_PSI,
            Unit::Kpsi => 1.0e3 * PASCALS_PER_PSI,
        }
    }

    /// Unit symbol (matches the serialized form)
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Ratio => "ratio",
            Unit::Meter => "m",
            Unit::Millimeter => "mm",
            Unit::Inch => "in",
            Unit::Foot => "ft",
            Unit::PerMeter => "1/m",
            Unit::PerMillimeter => "1/mm",
            Unit::PerInch => "1/in",
            Unit::PerFoot => "1/ft",
            Unit::Newton => "N",
            Unit::Kilonewton => "kN",
            Unit::PoundForce => "lbf",
            Unit::Kip => "kip",
            Unit::Watt => "W",
            Unit::Kilowatt => "kW",
            Unit::Horsepower => "hp",
            Unit::MeterPerSecond => "m/s",
            Unit::FootPerMinute => "ft/min",
            Unit::FootPerSecond => "ft/s",
            Unit::RadianPerSecond => "rad/s",
            Unit::Rpm => "rpm",
            Unit::Radian => "rad",
            Unit::Degree => "deg",
            Unit::Pascal => "Pa",
            Unit::Kilopascal => "kPa",
            Unit::Megapascal => "MPa",
            Unit::Psi => "psi",
            Unit::Kpsi => "kpsi",
        }
    }

    /// Parse a unit symbol (exact match, as produced by [`Unit::symbol`])
    pub fn from_symbol(symbol: &str) -> GearResult<Self> {
        let trimmed = symbol.trim();
        Unit::ALL
            .iter()
            .copied()
            .find(|u| u.symbol() == trimmed)
            .ok_or_else(|| GearError::invalid_input("unit", symbol, "Unknown unit symbol"))
    }

    /// Reciprocal unit of a length unit (e.g. `in` -> `1/in`)
    pub fn reciprocal_length(&self) -> Option<Unit> {
        match self {
            Unit::Meter => Some(Unit::PerMeter),
            Unit::Millimeter => Some(Unit::PerMillimeter),
            Unit::Inch => Some(Unit::PerInch),
            Unit::Foot => Some(Unit::PerFoot),
            _ => None,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// ============================================================================
// Quantity
// ============================================================================

/// A magnitude tagged with its unit.
///
/// The unit only changes through [`Quantity::to`] or [`Quantity::convert_to`],
/// both of which rescale the magnitude so the physical value is preserved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    magnitude: f64,
    unit: Unit,
}

impl Quantity {
    /// Create a quantity from a numeric value and unit
    pub fn new(magnitude: f64, unit: Unit) -> Self {
        Quantity { magnitude, unit }
    }

    /// Angle in degrees
    pub fn degrees(value: f64) -> Self {
        Quantity::new(value, Unit::Degree)
    }

    /// Dimensionless ratio
    pub fn ratio(value: f64) -> Self {
        Quantity::new(value, Unit::Ratio)
    }

    /// Numeric value in the current unit
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Current unit
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Dimension of the current unit
    pub fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    /// Convert to another unit of the same dimension.
    pub fn to(&self, target: Unit) -> GearResult<Quantity> {
        if self.unit == target {
            return Ok(*self);
        }
        if self.unit.dimension() != target.dimension() {
            return Err(GearError::unit_mismatch(
                self.unit.dimension().name(),
                self.unit.symbol(),
                target.symbol(),
            ));
        }
        let si = self.magnitude * self.unit.si_factor();
        Ok(Quantity::new(si / target.si_factor(), target))
    }

    /// Convert in place. On failure the quantity is left unchanged.
    pub fn convert_to(&mut self, target: Unit) -> GearResult<()> {
        *self = self.to(target)?;
        Ok(())
    }

    /// Magnitude expressed in `target`
    pub fn value_in(&self, target: Unit) -> GearResult<f64> {
        self.to(target).map(|q| q.magnitude)
    }

    /// Check that this quantity measures `expected`, naming the input on failure.
    pub fn ensure_dimension(&self, name: &str, expected: Dimension) -> GearResult<()> {
        if self.dimension() == expected {
            Ok(())
        } else {
            Err(GearError::unit_mismatch(name, self.unit.symbol(), expected.name()))
        }
    }

    /// Like [`Quantity::value_in`], but reports the input name on mismatch
    pub(crate) fn named_value_in(&self, name: &str, target: Unit) -> GearResult<f64> {
        self.ensure_dimension(name, target.dimension())?;
        self.value_in(target)
    }
}

impl Mul<f64> for Quantity {
    type Output = Quantity;
    fn mul(self, rhs: f64) -> Self::Output {
        Quantity::new(self.magnitude * rhs, self.unit)
    }
}

impl Div<f64> for Quantity {
    type Output = Quantity;
    fn div(self, rhs: f64) -> Self::Output {
        Quantity::new(self.magnitude / rhs, self.unit)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*} {}", p, self.magnitude, self.unit),
            None => write!(f, "{} {}", self.magnitude, self.unit),
        }
    }
}

/// Check that an optional output unit has the required dimension, falling back to `default`.
pub(crate) fn resolve_output_unit(
    name: &str,
    requested: Option<Unit>,
    expected: Dimension,
    default: Unit,
) -> GearResult<Unit> {
    match requested {
        Some(unit) if unit.dimension() == expected => Ok(unit),
        Some(unit) => Err(GearError::unit_mismatch(name, unit.symbol(), expected.name())),
        None => Ok(default),
    }
}
