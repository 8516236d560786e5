//! # Calculation Settings
//!
//! Defaults applied when a stage input leaves the pressure angle or the
//! output unit system out (see
//! [`calculate_with`](crate::calculations::stage::calculate_with)). Settings
//! serialize to JSON so they can be stored beside a design or handed to
//! another tool.
//!
//! ## Example
//!
//! ```rust
//! use gear_core::settings::{CalcSettings, UnitSystem};
//! use gear_core::units::Unit;
//!
//! let settings = CalcSettings::default();
//! assert_eq!(settings.unit_system, UnitSystem::SI);
//! assert_eq!(settings.unit_system.force_unit(), Unit::Newton);
//!
//! let json = settings.to_json().unwrap();
//! let restored = CalcSettings::from_json(&json).unwrap();
//! assert_eq!(settings, restored);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{GearError, GearResult};
use crate::units::{Quantity, Unit};

/// Pressure angle assumed when none is given (degrees)
pub const DEFAULT_PRESSURE_ANGLE_DEG: f64 = 20.0;

/// Output unit system for derived quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum UnitSystem {
    /// N, m/s, MPa, mm
    #[default]
    SI,
    /// lbf, ft/min, psi, in
    #[serde(rename = "ENG")]
    English,
}

impl UnitSystem {
    /// All unit systems for selection lists
    pub const ALL: [UnitSystem; 2] = [UnitSystem::SI, UnitSystem::English];

    pub fn force_unit(&self) -> Unit {
        match self {
            UnitSystem::SI => Unit::Newton,
            UnitSystem::English => Unit::PoundForce,
        }
    }

    pub fn velocity_unit(&self) -> Unit {
        match self {
            UnitSystem::SI => Unit::MeterPerSecond,
            UnitSystem::English => Unit::FootPerMinute,
        }
    }

    pub fn stress_unit(&self) -> Unit {
        match self {
            UnitSystem::SI => Unit::Megapascal,
            UnitSystem::English => Unit::Psi,
        }
    }

    pub fn length_unit(&self) -> Unit {
        match self {
            UnitSystem::SI => Unit::Millimeter,
            UnitSystem::English => Unit::Inch,
        }
    }

    pub fn speed_unit(&self) -> Unit {
        Unit::Rpm
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitSystem::SI => write!(f, "SI"),
            UnitSystem::English => write!(f, "ENG"),
        }
    }
}

/// Calculation defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcSettings {
    /// Pressure angle used when a calculation omits one (degrees)
    pub default_pressure_angle_deg: f64,

    /// Unit system for reported results
    pub unit_system: UnitSystem,
}

impl Default for CalcSettings {
    fn default() -> Self {
        CalcSettings {
            default_pressure_angle_deg: DEFAULT_PRESSURE_ANGLE_DEG,
            unit_system: UnitSystem::SI,
        }
    }
}

impl CalcSettings {
    /// Default pressure angle as an angle quantity
    pub fn default_pressure_angle(&self) -> Quantity {
        Quantity::degrees(self.default_pressure_angle_deg)
    }

    /// Parse settings from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> GearResult<Self> {
        let settings: CalcSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize settings to pretty JSON
    pub fn to_json(&self) -> GearResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> GearResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| GearError::file_error("read", path.display().to_string(), e.to_string()))?;
        let settings = Self::from_json(&json)?;
        info!("Loaded calculation settings from {}", path.display());
        Ok(settings)
    }

    /// Validate setting values.
    pub fn validate(&self) -> GearResult<()> {
        let angle = self.default_pressure_angle_deg;
        if !(angle > 0.0 && angle < 90.0) {
            return Err(GearError::invalid_input(
                "default_pressure_angle_deg",
                angle.to_string(),
                "Pressure angle must be between 0 and 90 degrees",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = CalcSettings::default();
        assert_eq!(settings.default_pressure_angle_deg, 20.0);
        assert_eq!(settings.default_pressure_angle(), Quantity::degrees(20.0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = CalcSettings::from_json(r#"{"unit_system": "ENG"}"#).unwrap();
        assert_eq!(settings.unit_system, UnitSystem::English);
        assert_eq!(settings.default_pressure_angle_deg, 20.0);
        assert_eq!(settings.unit_system.stress_unit(), Unit::Psi);
    }

    #[test]
    fn test_invalid_angle_rejected() {
        let err = CalcSettings::from_json(r#"{"default_pressure_angle_deg": 95.0}"#).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_bad_json() {
        let err = CalcSettings::from_json("{not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_missing_file() {
        let err = CalcSettings::load("/nonexistent/gear_settings.json").unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
