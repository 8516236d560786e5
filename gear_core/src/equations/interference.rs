//! # Interference
//!
//! Smallest pinion tooth count that meshes with a gear of ratio `m` without
//! involute interference (Shigley Eq. 13-11):
//!
//! ```text
//! N_P = 2k / ((1 + 2m) sin²φ) · ( m + sqrt(m² + (1 + 2m) sin²φ) )
//! ```
//!
//! with `k = 1.0` for full-depth teeth and `k = 0.8` for stub teeth. The
//! result is a real lower bound; round it up to get a usable tooth count.
//!
//! ## Example
//!
//! ```rust
//! use gear_core::equations::interference::{min_pinion_teeth, ToothSystem};
//!
//! let system = ToothSystem::from_str_flexible("Full Depth").unwrap();
//! let n = min_pinion_teeth(None, None, system).unwrap();
//! assert!((n - 12.32).abs() < 0.01);
//! assert_eq!(n.ceil() as u32, 13);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{GearError, GearResult};
use crate::settings::DEFAULT_PRESSURE_ANGLE_DEG;
use crate::units::{Quantity, Unit};

/// Tooth system, selects the addendum coefficient k.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToothSystem {
    /// Full-depth teeth, k = 1.0
    #[default]
    FullDepth,
    /// Stub teeth, k = 0.8
    Stub,
}

impl ToothSystem {
    pub const ALL: [ToothSystem; 2] = [ToothSystem::FullDepth, ToothSystem::Stub];

    /// Addendum coefficient k
    pub fn k(&self) -> f64 {
        match self {
            ToothSystem::FullDepth => 1.0,
            ToothSystem::Stub => 0.8,
        }
    }

    /// Parse from common spellings, ignoring case, spaces, `_` and `-`
    pub fn from_str_flexible(s: &str) -> GearResult<Self> {
        match s.to_uppercase().replace([' ', '_', '-'], "").as_str() {
            "FULL" | "FULLDEPTH" | "FD" | "FULLDEPTHTEETH" | "STANDARD" => Ok(ToothSystem::FullDepth),
            "STUB" | "STUBTEETH" | "STUBTOOTH" | "STUBTOOTHED" => Ok(ToothSystem::Stub),
            _ => Err(GearError::invalid_gear_type(s)),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ToothSystem::FullDepth => "Full Depth",
            ToothSystem::Stub => "Stub",
        }
    }
}

impl std::fmt::Display for ToothSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Smallest interference-free pinion tooth count, unrounded.
///
/// # Arguments
/// * `pressure_angle` - Angle quantity, 20° when `None`
/// * `gear_ratio` - m = N_G / N_P, 1.0 when `None` (values below 1 are not rejected)
/// * `tooth_system` - Full depth or stub
pub fn min_pinion_teeth(
    pressure_angle: Option<&Quantity>,
    gear_ratio: Option<f64>,
    tooth_system: ToothSystem,
) -> GearResult<f64> {
    let phi = match pressure_angle {
        Some(angle) => angle.named_value_in("pressure_angle", Unit::Radian)?,
        None => DEFAULT_PRESSURE_ANGLE_DEG.to_radians(),
    };
    if !(phi > 0.0 && phi < std::f64::consts::FRAC_PI_2) {
        return Err(GearError::invalid_input(
            "pressure_angle",
            format!("{} deg", phi.to_degrees()),
            "Pressure angle must be between 0 and 90 degrees",
        ));
    }

    let m = gear_ratio.unwrap_or(1.0);
    if !m.is_finite() {
        return Err(GearError::invalid_input("gear_ratio", m.to_string(), "Gear ratio must be finite"));
    }

    let k = tooth_system.k();
    let sin2 = phi.sin().powi(2);
    let spread = (1.0 + 2.0 * m) * sin2;
    if spread <= 0.0 {
        return Err(GearError::invalid_input(
            "gear_ratio",
            m.to_string(),
            "Gear ratio too small for the interference equation",
        ));
    }

    Ok(2.0 * k / spread * (m + (m * m + spread).sqrt()))
}

/// [`min_pinion_teeth`] rounded up to a whole tooth
pub fn min_pinion_teeth_count(
    pressure_angle: Option<&Quantity>,
    gear_ratio: Option<f64>,
    tooth_system: ToothSystem,
) -> GearResult<u32> {
    min_pinion_teeth(pressure_angle, gear_ratio, tooth_system).map(|n| n.ceil() as u32)
}
