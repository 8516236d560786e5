//! # Gear Loads
//!
//! Pitch-line velocity, transmitted (tangential) load and the radial and
//! resultant components of the tooth force.
//!
//! ## Example
//!
//! ```rust
//! use gear_core::equations::loads::{pitch_line_velocity, transmitted_load};
//! use gear_core::units::{Quantity, Unit};
//!
//! let v = pitch_line_velocity(
//!     &Quantity::new(2.0, Unit::Inch),
//!     &Quantity::new(1200.0, Unit::Rpm),
//!     Some(Unit::FootPerMinute),
//! )
//! .unwrap();
//! assert!((v.magnitude() - 628.3).abs() < 0.1);
//!
//! let wt = transmitted_load(&Quantity::new(35.0, Unit::Horsepower), &v, Some(Unit::PoundForce)).unwrap();
//! assert!((wt.magnitude() - 1838.3).abs() < 0.5);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{GearError, GearResult};
use crate::settings::DEFAULT_PRESSURE_ANGLE_DEG;
use crate::units::{resolve_output_unit, Dimension, Quantity, Unit};

/// ft·lbf/min per horsepower
pub const FT_LBF_PER_MIN_PER_HP: f64 = 33_000.0;

/// Tooth force resolved along and across the line of action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadVector {
    /// Tangential (transmitted) load W_t
    pub tangential: Quantity,
    /// Radial load W_r = W_t tan φ
    pub radial: Quantity,
    /// Resultant W = W_t / cos φ
    pub magnitude: Quantity,
    /// Pressure angle φ used
    pub pressure_angle: Quantity,
}

/// Pitch-line velocity V = π d n / 12 (ft/min, d in inches, n in rpm).
///
/// # Arguments
/// * `diameter` - Pitch diameter (any length unit)
/// * `gear_speed` - Rotational speed (any angular velocity unit)
/// * `output_unit` - Velocity unit of the result, m/s when `None`
pub fn pitch_line_velocity(diameter: &Quantity, gear_speed: &Quantity, output_unit: Option<Unit>) -> GearResult<Quantity> {
    let d_in = diameter.named_value_in("diameter", Unit::Inch)?;
    let n_rpm = gear_speed.named_value_in("gear_speed", Unit::Rpm)?;
    let output = resolve_output_unit("pitch_line_velocity", output_unit, Dimension::Velocity, Unit::MeterPerSecond)?;

    let v_fpm = PI * d_in * n_rpm / 12.0;
    Quantity::new(v_fpm, Unit::FootPerMinute).to(output)
}

/// Transmitted load W_t = 33000 H / V (lbf, H in hp, V in ft/min).
///
/// # Arguments
/// * `power` - Transmitted power (any power unit)
/// * `pitchline` - Pitch-line velocity (any velocity unit)
/// * `output_unit` - Force unit of the result, N when `None`
pub fn transmitted_load(power: &Quantity, pitchline: &Quantity, output_unit: Option<Unit>) -> GearResult<Quantity> {
    let h_hp = power.named_value_in("power", Unit::Horsepower)?;
    let v_fpm = pitchline.named_value_in("pitchline", Unit::FootPerMinute)?;
    let output = resolve_output_unit("transmitted_load", output_unit, Dimension::Force, Unit::Newton)?;

    if v_fpm == 0.0 {
        return Err(GearError::invalid_input(
            "pitchline",
            pitchline.to_string(),
            "Pitch-line velocity must be non-zero",
        ));
    }

    let load_lbf = FT_LBF_PER_MIN_PER_HP * h_hp / v_fpm;
    Quantity::new(load_lbf, Unit::PoundForce).to(output)
}

/// Radial and resultant components of a tangential tooth load.
///
/// # Arguments
/// * `w_t` - Tangential load; required
/// * `pressure_angle` - Angle quantity, 20° when `None`
/// * `output_unit` - Force unit for all components, the unit of `w_t` when `None`
pub fn load_components(
    w_t: Option<&Quantity>,
    pressure_angle: Option<&Quantity>,
    output_unit: Option<Unit>,
) -> GearResult<LoadVector> {
    let w_t = w_t.ok_or_else(|| GearError::missing_input("W_t"))?;
    w_t.ensure_dimension("W_t", Dimension::Force)?;

    let pressure_angle = pressure_angle
        .copied()
        .unwrap_or_else(|| Quantity::degrees(DEFAULT_PRESSURE_ANGLE_DEG));
    let phi = pressure_angle.named_value_in("pressure_angle", Unit::Radian)?;

    let output = resolve_output_unit("load_components", output_unit, Dimension::Force, w_t.unit())?;
    let tangential = w_t.to(output)?;

    Ok(LoadVector {
        tangential,
        radial: tangential * phi.tan(),
        magnitude: tangential / phi.cos(),
        pressure_angle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_line_velocity() {
        let d = Quantity::new(2.0, Unit::Inch);
        let n = Quantity::new(1200.0, Unit::Rpm);

        let fpm = pitch_line_velocity(&d, &n, Some(Unit::FootPerMinute)).unwrap();
        assert!((fpm.magnitude() - 628.318).abs() < 0.01);

        let mps = pitch_line_velocity(&d, &n, None).unwrap();
        assert_eq!(mps.unit(), Unit::MeterPerSecond);
        assert!((mps.magnitude() - 3.19).abs() < 0.01);
    }

    #[test]
    fn test_pitch_line_metric_inputs() {
        // 50.8 mm = 2 in, 125.66 rad/s = 1200 rpm
        let d = Quantity::new(50.8, Unit::Millimeter);
        let n = Quantity::new(1200.0 * 2.0 * PI / 60.0, Unit::RadianPerSecond);
        let v = pitch_line_velocity(&d, &n, Some(Unit::FootPerMinute)).unwrap();
        assert!((v.magnitude() - 628.318).abs() < 0.01);
    }

    #[test]
    fn test_pitch_line_unit_errors() {
        let d = Quantity::new(2.0, Unit::Inch);
        let n = Quantity::new(1200.0, Unit::Rpm);
        assert_eq!(
            pitch_line_velocity(&n, &n, None).unwrap_err().error_code(),
            "UNIT_MISMATCH"
        );
        assert_eq!(
            pitch_line_velocity(&d, &d, None).unwrap_err().error_code(),
            "UNIT_MISMATCH"
        );
        assert_eq!(
            pitch_line_velocity(&d, &n, Some(Unit::Newton)).unwrap_err().error_code(),
            "UNIT_MISMATCH"
        );
    }

    #[test]
    fn test_transmitted_load() {
        let power = Quantity::new(35.0, Unit::Horsepower);
        let v = Quantity::new(628.3, Unit::FootPerMinute);

        let lbf = transmitted_load(&power, &v, Some(Unit::PoundForce)).unwrap();
        assert!((lbf.magnitude() - 1838.29).abs() < 0.1);

        let newtons = transmitted_load(&power, &v, None).unwrap();
        assert_eq!(newtons.unit(), Unit::Newton);
        assert!((newtons.magnitude() - 8177.0).abs() < 2.0);
    }

    #[test]
    fn test_transmitted_load_si_inputs() {
        // 1 kW at 1 m/s is 1 kN regardless of the textbook units in between
        let power = Quantity::new(1.0, Unit::Kilowatt);
        let v = Quantity::new(1.0, Unit::MeterPerSecond);
        let load = transmitted_load(&power, &v, Some(Unit::Kilonewton)).unwrap();
        assert!((load.magnitude() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_transmitted_load_errors() {
        let power = Quantity::new(35.0, Unit::Horsepower);
        let v = Quantity::new(628.3, Unit::FootPerMinute);
        assert_eq!(
            transmitted_load(&v, &v, None).unwrap_err().error_code(),
            "UNIT_MISMATCH"
        );
        assert_eq!(
            transmitted_load(&power, &v, Some(Unit::Psi)).unwrap_err().error_code(),
            "UNIT_MISMATCH"
        );
        let stopped = Quantity::new(0.0, Unit::FootPerMinute);
        assert_eq!(
            transmitted_load(&power, &stopped, None).unwrap_err().error_code(),
            "INVALID_INPUT"
        );
    }

    #[test]
    fn test_load_components_default_angle() {
        let w_t = Quantity::new(100.0, Unit::Newton);
        let loads = load_components(Some(&w_t), None, None).unwrap();
        assert!((loads.radial.magnitude() - 36.40).abs() < 0.01);
        assert!((loads.magnitude.magnitude() - 106.42).abs() < 0.01);
        assert_eq!(loads.radial.unit(), Unit::Newton);
        assert_eq!(loads.pressure_angle, Quantity::degrees(20.0));
    }

    #[test]
    fn test_load_components_output_unit() {
        let w_t = Quantity::new(100.0, Unit::Newton);
        let angle = Quantity::new(20.0_f64.to_radians(), Unit::Radian);
        let loads = load_components(Some(&w_t), Some(&angle), Some(Unit::PoundForce)).unwrap();
        assert_eq!(loads.magnitude.unit(), Unit::PoundForce);
        assert!((loads.tangential.magnitude() - 22.4809).abs() < 1e-3);
        assert!((loads.radial.magnitude() - 36.397 / 4.448_221_615_260_5).abs() < 1e-3);
    }

    #[test]
    fn test_load_components_errors() {
        assert_eq!(load_components(None, None, None).unwrap_err().error_code(), "MISSING_INPUT");

        let w_t = Quantity::new(100.0, Unit::Newton);
        let not_an_angle = Quantity::new(20.0, Unit::Ratio);
        assert_eq!(
            load_components(Some(&w_t), Some(&not_an_angle), None).unwrap_err().error_code(),
            "UNIT_MISMATCH"
        );

        let not_a_force = Quantity::new(100.0, Unit::Inch);
        assert_eq!(
            load_components(Some(&not_a_force), None, None).unwrap_err().error_code(),
            "UNIT_MISMATCH"
        );
    }
}
