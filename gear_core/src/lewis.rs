//! # Lewis Form Factor
//!
//! Tabulated Lewis form factor `Y` for full-depth involute teeth, keyed by
//! tooth count (rows) and pressure angle (columns for 14.5° and 20°).
//!
//! The bundled table is embedded at compile time and parsed once, on first
//! use, into a process-wide read-only [`LewisTable`]. Custom tables with the
//! same layout can be loaded with [`LewisTable::load_from_csv`].
//!
//! ## Lookup policy
//!
//! - Tooth count present in the table: exact value, `interpolated = false`
//! - Between two rows: linear interpolation on tooth count, `interpolated = true`
//! - Below the first row or above the last: [`GearError::NotFound`]
//!
//! ## CSV layout
//!
//! ```text
//! # comments and blank lines are ignored
//! teeth_num,factor_14_5deg,factor_20deg
//! 12,0.210,0.245
//! ```
//!
//! ## Example
//!
//! ```rust
//! use gear_core::lewis::{lewis_form_factor, PressureAngle};
//!
//! let y = lewis_form_factor(16, PressureAngle::Deg20).unwrap();
//! assert_eq!(y.factor, 0.296);
//! assert!(!y.interpolated);
//! ```

use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{GearError, GearResult};
use crate::units::{Dimension, Quantity, Unit};

const BUNDLED_CSV: &str = include_str!("../assets/lewis_form_factor.csv");

static BUNDLED_TABLE: Lazy<GearResult<LewisTable>> =
    Lazy::new(|| LewisTable::from_csv_str(BUNDLED_CSV, "assets/lewis_form_factor.csv"));

const TABLE_NAME: &str = "Lewis form factor table";

/// Tabulated pressure angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PressureAngle {
    /// 14.5° full depth
    #[serde(rename = "14.5deg")]
    Deg14_5,
    /// 20° full depth
    #[default]
    #[serde(rename = "20deg")]
    Deg20,
}

impl PressureAngle {
    pub const ALL: [PressureAngle; 2] = [PressureAngle::Deg14_5, PressureAngle::Deg20];

    /// Angle in degrees
    pub fn degrees(&self) -> f64 {
        match self {
            PressureAngle::Deg14_5 => 14.5,
            PressureAngle::Deg20 => 20.0,
        }
    }

    /// Angle as a quantity
    pub fn to_quantity(&self) -> Quantity {
        Quantity::degrees(self.degrees())
    }

    /// Match an angle in degrees against the tabulated columns
    pub fn from_degrees(degrees: f64) -> GearResult<Self> {
        PressureAngle::ALL
            .iter()
            .copied()
            .find(|a| (a.degrees() - degrees).abs() < 1e-6)
            .ok_or_else(|| {
                GearError::invalid_input(
                    "pressure_angle",
                    format!("{} deg", degrees),
                    "Lewis form factor is tabulated for 14.5 and 20 degrees only",
                )
            })
    }

    /// Match an angle quantity (any angular unit) against the tabulated columns
    pub fn from_quantity(angle: &Quantity) -> GearResult<Self> {
        angle.ensure_dimension("pressure_angle", Dimension::Angle)?;
        Self::from_degrees(angle.value_in(Unit::Degree)?)
    }
}

impl std::fmt::Display for PressureAngle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Result of a form factor lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LewisFormFactorEntry {
    pub teeth_num: u32,
    pub pressure_angle: PressureAngle,
    /// Lewis form factor Y (dimensionless)
    pub factor: f64,
    /// True when the value was interpolated between table rows
    pub interpolated: bool,
}

/// One table row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LewisRow {
    pub teeth_num: u32,
    pub factor_14_5deg: f64,
    pub factor_20deg: f64,
}

impl LewisRow {
    fn factor(&self, angle: PressureAngle) -> f64 {
        match angle {
            PressureAngle::Deg14_5 => self.factor_14_5deg,
            PressureAngle::Deg20 => self.factor_20deg,
        }
    }
}

/// Lewis form factor table, rows sorted by tooth count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LewisTable {
    rows: Vec<LewisRow>,
}

impl LewisTable {
    /// The table shipped with the crate, parsed once per process.
    pub fn bundled() -> GearResult<&'static LewisTable> {
        (*BUNDLED_TABLE).as_ref().map_err(Clone::clone)
    }

    /// Load a table from a CSV file
    pub fn load_from_csv(path: impl AsRef<Path>) -> GearResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            GearError::file_error("open", path.display().to_string(), format!("Failed to open CSV: {}", e))
        })?;
        let table = Self::from_csv_str(&text, &path.display().to_string())?;
        info!("Loaded {} Lewis form factor rows from {}", table.rows.len(), path.display());
        Ok(table)
    }

    /// Parse a table from CSV text. `source` names the origin in error messages.
    pub fn from_csv_str(text: &str, source: &str) -> GearResult<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

        let (_, header_line) = lines
            .next()
            .ok_or_else(|| GearError::file_error("read", source, "CSV file is empty"))?;

        let headers: Vec<&str> = header_line.split(',').map(str::trim).collect();
        let col_index = |name: &str| -> GearResult<usize> {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or_else(|| GearError::file_error("parse", source, format!("Missing '{}' column", name)))
        };
        let teeth_idx = col_index("teeth_num")?;
        let deg14_idx = col_index("factor_14_5deg")?;
        let deg20_idx = col_index("factor_20deg")?;

        let mut rows = Vec::new();
        for (line_num, line) in lines {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            let parse_factor = |idx: usize| -> GearResult<f64> {
                let raw = csv_field(&fields, idx, line_num, source)?;
                raw.parse::<f64>().map_err(|_| {
                    GearError::file_error("parse", source, format!("Line {}: bad factor '{}'", line_num, raw))
                })
            };

            let raw_teeth = csv_field(&fields, teeth_idx, line_num, source)?;
            let teeth_num = raw_teeth.parse::<u32>().map_err(|_| {
                GearError::file_error("parse", source, format!("Line {}: bad tooth count '{}'", line_num, raw_teeth))
            })?;

            rows.push(LewisRow {
                teeth_num,
                factor_14_5deg: parse_factor(deg14_idx)?,
                factor_20deg: parse_factor(deg20_idx)?,
            });
        }

        rows.sort_by_key(|r| r.teeth_num);
        if let Some(pair) = rows.windows(2).find(|w| w[0].teeth_num == w[1].teeth_num) {
            return Err(GearError::file_error(
                "parse",
                source,
                format!("Duplicate row for {} teeth", pair[0].teeth_num),
            ));
        }

        debug!(rows = rows.len(), source, "parsed Lewis form factor table");
        Ok(LewisTable { rows })
    }

    pub fn rows(&self) -> &[LewisRow] {
        &self.rows
    }

    /// Smallest and largest tabulated tooth counts
    pub fn teeth_range(&self) -> Option<(u32, u32)> {
        Some((self.rows.first()?.teeth_num, self.rows.last()?.teeth_num))
    }

    /// Exact-match lookup only
    pub fn exact(&self, teeth_num: u32, angle: PressureAngle) -> Option<f64> {
        self.rows
            .binary_search_by_key(&teeth_num, |r| r.teeth_num)
            .ok()
            .map(|i| self.rows[i].factor(angle))
    }

    /// Exact lookup with linear interpolation between bracketing rows.
    pub fn lookup(&self, teeth_num: u32, angle: PressureAngle) -> GearResult<LewisFormFactorEntry> {
        let idx = self.rows.partition_point(|r| r.teeth_num < teeth_num);

        if let Some(row) = self.rows.get(idx).filter(|r| r.teeth_num == teeth_num) {
            return Ok(LewisFormFactorEntry {
                teeth_num,
                pressure_angle: angle,
                factor: row.factor(angle),
                interpolated: false,
            });
        }

        if idx == 0 || idx == self.rows.len() {
            return Err(GearError::not_found(
                TABLE_NAME,
                format!("{} teeth at {}", teeth_num, angle),
            ));
        }

        let lo = &self.rows[idx - 1];
        let hi = &self.rows[idx];
        let t = f64::from(teeth_num - lo.teeth_num) / f64::from(hi.teeth_num - lo.teeth_num);
        let factor = lo.factor(angle) + t * (hi.factor(angle) - lo.factor(angle));

        Ok(LewisFormFactorEntry {
            teeth_num,
            pressure_angle: angle,
            factor,
            interpolated: true,
        })
    }
}

fn csv_field<'a>(fields: &[&'a str], idx: usize, line_num: usize, source: &str) -> GearResult<&'a str> {
    fields
        .get(idx)
        .copied()
        .ok_or_else(|| GearError::file_error("parse", source, format!("Line {}: too few columns", line_num)))
}

/// Look up the Lewis form factor in the bundled table.
pub fn lewis_form_factor(teeth_num: u32, angle: PressureAngle) -> GearResult<LewisFormFactorEntry> {
    LewisTable::bundled()?.lookup(teeth_num, angle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_table_loads() {
        let table = LewisTable::bundled().unwrap();
        assert_eq!(table.teeth_range(), Some((12, 400)));
        assert_eq!(table.rows().len(), 25);
    }

    #[test]
    fn test_exact_lookup() {
        let y = lewis_form_factor(16, PressureAngle::Deg20).unwrap();
        assert_eq!(y.factor, 0.296);
        assert!(!y.interpolated);

        let y = lewis_form_factor(16, PressureAngle::Deg14_5).unwrap();
        assert_eq!(y.factor, 0.242);
    }

    #[test]
    fn test_interpolated_lookup() {
        // Between 22 (0.331) and 24 (0.337)
        let y = lewis_form_factor(23, PressureAngle::Deg20).unwrap();
        assert!((y.factor - 0.334).abs() < 1e-12);
        assert!(y.interpolated);

        // Between 50 (0.409) and 60 (0.422)
        let y = lewis_form_factor(55, PressureAngle::Deg20).unwrap();
        assert!((y.factor - 0.4155).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_range_not_found() {
        assert_eq!(lewis_form_factor(11, PressureAngle::Deg20).unwrap_err().error_code(), "NOT_FOUND");
        assert_eq!(lewis_form_factor(401, PressureAngle::Deg20).unwrap_err().error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_large_gear_rows() {
        let y = lewis_form_factor(400, PressureAngle::Deg20).unwrap();
        assert_eq!(y.factor, 0.480);
        assert!(!y.interpolated);

        // Between 300 (0.472) and 400 (0.480)
        let y = lewis_form_factor(350, PressureAngle::Deg20).unwrap();
        assert!((y.factor - 0.476).abs() < 1e-12);
        assert!(y.interpolated);
    }

    #[test]
    fn test_exact_only() {
        let table = LewisTable::bundled().unwrap();
        assert_eq!(table.exact(30, PressureAngle::Deg20), Some(0.359));
        assert_eq!(table.exact(31, PressureAngle::Deg20), None);
    }

    #[test]
    fn test_pressure_angle_from_quantity() {
        let angle = PressureAngle::from_quantity(&Quantity::degrees(14.5)).unwrap();
        assert_eq!(angle, PressureAngle::Deg14_5);

        let radians = Quantity::new(20.0_f64.to_radians(), Unit::Radian);
        assert_eq!(PressureAngle::from_quantity(&radians).unwrap(), PressureAngle::Deg20);

        assert_eq!(
            PressureAngle::from_quantity(&Quantity::degrees(25.0)).unwrap_err().error_code(),
            "INVALID_INPUT"
        );
        assert_eq!(
            PressureAngle::from_quantity(&Quantity::new(20.0, Unit::Newton)).unwrap_err().error_code(),
            "UNIT_MISMATCH"
        );
    }

    #[test]
    fn test_custom_csv_unsorted_with_comments() {
        let csv = "# custom\nfactor_20deg,teeth_num,factor_14_5deg\n\n0.40,40,0.30\n0.30,20,0.25\n";
        let table = LewisTable::from_csv_str(csv, "inline").unwrap();
        assert_eq!(table.teeth_range(), Some((20, 40)));
        let y = table.lookup(30, PressureAngle::Deg20).unwrap();
        assert!((y.factor - 0.35).abs() < 1e-12);
    }

    #[test]
    fn test_malformed_csv() {
        let missing_column = "teeth_num,factor_20deg\n12,0.245\n";
        let err = LewisTable::from_csv_str(missing_column, "inline").unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");

        let bad_value = "teeth_num,factor_14_5deg,factor_20deg\n12,0.210,abc\n";
        assert!(LewisTable::from_csv_str(bad_value, "inline").is_err());

        let duplicate = "teeth_num,factor_14_5deg,factor_20deg\n12,0.210,0.245\n12,0.210,0.245\n";
        assert!(LewisTable::from_csv_str(duplicate, "inline").is_err());

        assert!(LewisTable::from_csv_str("", "inline").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = LewisTable::load_from_csv("/nonexistent/lewis.csv").unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
