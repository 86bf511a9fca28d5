use serde::{Deserialize, Serialize};
use std::fmt;

/// Estimated price in the currency the model was trained on.
///
/// Negative values are possible when the regressor extrapolates and are
/// kept as they are.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    pub fn new(value: f64) -> Self {
        Price(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Renders the amount with thousands separators and two decimals,
    /// e.g. `₹345,678.90`.
    pub fn format_with(&self, symbol: &str) -> String {
        format!("{}{}", symbol, group_thousands(self.0))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&group_thousands(self.0))
    }
}

fn group_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some(parts) => parts,
        // inf / NaN
        None => return fixed,
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{}{}.{}", sign, grouped, fraction)
}
