//! # Dynamic Factor
//!
//! Velocity factor Kv from Barth's expressions as given in Shigley Eq. 14-6
//! (SI form, V in m/s). The tooth profile picks the expression:
//!
//! | Profile          | Kv                         |
//! |------------------|----------------------------|
//! | Cast iron, cast  | (3.05 + V) / 3.05          |
//! | Cut or milled    | (6.1 + V) / 6.1            |
//! | Hobbed or shaped | (3.56 + √V) / 3.56         |
//! | Shaved or ground | √((5.56 + √V) / 5.56)      |

use serde::{Deserialize, Serialize};

use crate::errors::{GearError, GearResult};
use crate::units::{Quantity, Unit};

/// Tooth manufacturing profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToothProfile {
    /// Cast iron, cast profile
    Cast,
    /// Cut or milled profile
    Milled,
    /// Hobbed or shaped profile
    Hobbed,
    /// Shaved or ground profile
    Shaved,
}

impl ToothProfile {
    pub const ALL: [ToothProfile; 4] = [
        ToothProfile::Cast,
        ToothProfile::Milled,
        ToothProfile::Hobbed,
        ToothProfile::Shaved,
    ];

    /// Parse from common spellings, ignoring case, spaces and `_ - / .`
    pub fn from_str_flexible(s: &str) -> GearResult<Self> {
        match s.to_uppercase().replace([' ', '_', '-', '/', '.'], "").as_str() {
            "CAST" | "CASTIRON" | "CASTPROFILE" => Ok(ToothProfile::Cast),
            "MILLED" | "CUT" | "MILLEDCUT" | "CUTMILLED" | "MILLEDPROFILE" | "CUTPROFILE" => Ok(ToothProfile::Milled),
            "HOBBED" | "SHAPED" | "HOBBEDSHAPED" | "SHAPEDHOBBED" | "HOBBEDORSHAPED" | "HOBBEDPROFILE" => {
                Ok(ToothProfile::Hobbed)
            }
            "SHAVED" | "GROUND" | "SHAVEDGROUND" | "GROUNDSHAVED" | "SHAVEDORGROUND" | "SHAVEDPROFILE" => {
                Ok(ToothProfile::Shaved)
            }
            _ => Err(GearError::invalid_profile(s)),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ToothProfile::Cast => "Cast",
            ToothProfile::Milled => "Milled/Cut",
            ToothProfile::Hobbed => "Shaped/Hobbed",
            ToothProfile::Shaved => "Shaved/Ground",
        }
    }

    /// Kv at pitch-line velocity `v` in m/s
    fn kv(&self, v: f64) -> f64 {
        match self {
            ToothProfile::Cast => (3.05 + v) / 3.05,
            ToothProfile::Milled => (6.1 + v) / 6.1,
            ToothProfile::Hobbed => (3.56 + v.sqrt()) / 3.56,
            ToothProfile::Shaved => ((5.56 + v.sqrt()) / 5.56).sqrt(),
        }
    }
}

impl std::fmt::Display for ToothProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Dynamic factor Kv (≥ 1) for a profile at the given pitch-line velocity.
pub fn dynamic_factor(profile: ToothProfile, pitchline: &Quantity) -> GearResult<f64> {
    let v = pitchline.named_value_in("pitchline", Unit::MeterPerSecond)?;
    if !(v >= 0.0) || !v.is_finite() {
        return Err(GearError::invalid_input(
            "pitchline",
            pitchline.to_string(),
            "Pitch-line velocity must be a non-negative speed",
        ));
    }
    Ok(profile.kv(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(mps: f64) -> Quantity {
        Quantity::new(mps, Unit::MeterPerSecond)
    }

    #[test]
    fn test_each_profile() {
        let speed = v(3.19);
        let cases = [
            (ToothProfile::Cast, 2.0459),
            (ToothProfile::Milled, 1.5230),
            (ToothProfile::Hobbed, 1.5017),
            (ToothProfile::Shaved, 1.1494),
        ];
        for (profile, expected) in cases {
            let kv = dynamic_factor(profile, &speed).unwrap();
            assert!((kv - expected).abs() < 1e-3, "{}: {}", profile, kv);
        }
    }

    #[test]
    fn test_standstill_is_unity() {
        for profile in ToothProfile::ALL {
            assert_eq!(dynamic_factor(profile, &v(0.0)).unwrap(), 1.0);
        }
    }

    #[test]
    fn test_never_below_one() {
        for profile in ToothProfile::ALL {
            for speed in [0.1, 1.0, 5.0, 20.0, 50.0] {
                assert!(dynamic_factor(profile, &v(speed)).unwrap() >= 1.0);
            }
        }
    }

    #[test]
    fn test_english_velocity_converted() {
        let fpm = Quantity::new(628.3, Unit::FootPerMinute);
        let kv = dynamic_factor(ToothProfile::Milled, &fpm).unwrap();
        let expected = (6.1 + 628.3 * 0.00508) / 6.1;
        assert!((kv - expected).abs() < 1e-12);
    }

    #[test]
    fn test_aliases() {
        assert_eq!(ToothProfile::from_str_flexible("cast iron").unwrap(), ToothProfile::Cast);
        assert_eq!(ToothProfile::from_str_flexible("Cut").unwrap(), ToothProfile::Milled);
        assert_eq!(ToothProfile::from_str_flexible("Shaped/Hobbed").unwrap(), ToothProfile::Hobbed);
        assert_eq!(ToothProfile::from_str_flexible("GROUND").unwrap(), ToothProfile::Shaved);
        assert_eq!(
            ToothProfile::from_str_flexible("forged").unwrap_err().error_code(),
            "INVALID_PROFILE"
        );
    }

    #[test]
    fn test_bad_velocity() {
        assert_eq!(
            dynamic_factor(ToothProfile::Cast, &v(-1.0)).unwrap_err().error_code(),
            "INVALID_INPUT"
        );
        let rpm = Quantity::new(1200.0, Unit::Rpm);
        assert_eq!(
            dynamic_factor(ToothProfile::Cast, &rpm).unwrap_err().error_code(),
            "UNIT_MISMATCH"
        );
    }
}
