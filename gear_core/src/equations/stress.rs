//! # Bending Stress
//!
//! Lewis bending stress with the velocity factor applied (Shigley Eq. 14-8):
//!
//! ```text
//! σ = Kv · Wt / (F · m · Y)
//! ```
//!
//! Evaluated with Wt in newtons and F, m in millimetres, giving MPa.
//!
//! ## Example
//!
//! ```rust
//! use gear_core::equations::stress::bending_stress;
//! use gear_core::units::{Quantity, Unit};
//!
//! let sigma = bending_stress(
//!     1.5,
//!     &Quantity::new(1000.0, Unit::Newton),
//!     &Quantity::new(4.0, Unit::Millimeter),
//!     &Quantity::new(40.0, Unit::Millimeter),
//!     0.322,
//!     None,
//! )
//! .unwrap();
//! assert!((sigma.magnitude() - 29.115).abs() < 1e-3);
//! ```

use crate::errors::{GearError, GearResult};
use crate::units::{resolve_output_unit, Dimension, Quantity, Unit};

/// Tooth bending stress.
///
/// # Arguments
/// * `kv` - Dynamic factor (dimensionless, > 0)
/// * `f_tan` - Tangential load (any force unit)
/// * `module` - Module (any length unit); for English gears use 1/P
/// * `face_width` - Face width (any length unit)
/// * `lewis_y` - Lewis form factor (dimensionless, > 0)
/// * `output_unit` - Stress unit of the result, MPa when `None`
pub fn bending_stress(
    kv: f64,
    f_tan: &Quantity,
    module: &Quantity,
    face_width: &Quantity,
    lewis_y: f64,
    output_unit: Option<Unit>,
) -> GearResult<Quantity> {
    let w_n = f_tan.named_value_in("F_tan", Unit::Newton)?;
    let m_mm = module.named_value_in("module", Unit::Millimeter)?;
    let b_mm = face_width.named_value_in("face_width", Unit::Millimeter)?;
    let output = resolve_output_unit("bending_stress", output_unit, Dimension::Stress, Unit::Megapascal)?;

    ensure_positive("kv", kv)?;
    ensure_positive("module", m_mm)?;
    ensure_positive("face_width", b_mm)?;
    ensure_positive("lewis_y", lewis_y)?;

    let sigma_mpa = kv * w_n / (b_mm * m_mm * lewis_y);
    Quantity::new(sigma_mpa, Unit::Megapascal).to(output)
}

fn ensure_positive(field: &str, value: f64) -> GearResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GearError::invalid_input(field, value.to_string(), "Must be a positive, finite value"))
    }
}
