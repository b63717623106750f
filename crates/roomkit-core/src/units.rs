//! Length unit utilities
//!
//! Room dimensions are stored in centimeters. These helpers convert to and
//! from the unit the user works in, including fractional inch input.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const CM_PER_INCH: f64 = 2.54;
const CM_PER_FOOT: f64 = 30.48;

/// Length unit used for displaying and entering room dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Centimeters (storage unit)
    #[default]
    Centimeters,
    /// Meters
    Meters,
    /// Inches
    Inches,
    /// Feet
    Feet,
}

impl LengthUnit {
    /// Number of centimeters in one of this unit
    pub fn cm_per_unit(self) -> f64 {
        match self {
            Self::Centimeters => 1.0,
            Self::Meters => 100.0,
            Self::Inches => CM_PER_INCH,
            Self::Feet => CM_PER_FOOT,
        }
    }

    /// Convert a value in this unit to centimeters
    pub fn to_cm(self, value: f64) -> f64 {
        value * self.cm_per_unit()
    }

    /// Convert a value in centimeters to this unit
    pub fn from_cm(self, value_cm: f64) -> f64 {
        value_cm / self.cm_per_unit()
    }

    /// Short label ("cm", "m", "in", "ft")
    pub fn label(self) -> &'static str {
        match self {
            Self::Centimeters => "cm",
            Self::Meters => "m",
            Self::Inches => "in",
            Self::Feet => "ft",
        }
    }

    fn is_imperial(self) -> bool {
        matches!(self, Self::Inches | Self::Feet)
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cm" | "centimeters" | "centimetres" => Ok(Self::Centimeters),
            "m" | "meters" | "metres" => Ok(Self::Meters),
            "in" | "inch" | "inches" => Ok(Self::Inches),
            "ft" | "foot" | "feet" => Ok(Self::Feet),
            _ => Err(format!("Unknown length unit: {}", s)),
        }
    }
}

/// Format a length for display
///
/// * `value_cm` - Value in centimeters
/// * `unit` - Target unit
pub fn format_length(value_cm: f64, unit: LengthUnit) -> String {
    format!("{:.2} {}", unit.from_cm(value_cm), unit.label())
}

/// Parse a length string into centimeters
///
/// Imperial units accept mixed fractions such as `"10 1/2"`. Blank input
/// is an error.
///
/// * `input` - String to parse
/// * `unit` - Assumed unit of the input
pub fn parse_length(input: &str, unit: LengthUnit) -> Result<f64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty length".to_string());
    }

    if !unit.is_imperial() || !input.contains('/') {
        let value = input.parse::<f64>().map_err(|e| e.to_string())?;
        return Ok(unit.to_cm(value));
    }

    let mut total = 0.0;
    for part in input.split_whitespace() {
        if part.contains('/') {
            let frac_parts: Vec<&str> = part.split('/').collect();
            if frac_parts.len() != 2 {
                return Err("Invalid fraction format".to_string());
            }
            let num = frac_parts[0]
                .parse::<f64>()
                .map_err(|_| "Invalid numerator")?;
            let den = frac_parts[1]
                .parse::<f64>()
                .map_err(|_| "Invalid denominator")?;
            if den == 0.0 {
                return Err("Division by zero".to_string());
            }
            total += num / den;
        } else {
            total += part.parse::<f64>().map_err(|_| "Invalid number part")?;
        }
    }
    Ok(unit.to_cm(total))
}
