//! Byte size formatting and parsing
//!
//! Units are binary (1 KB = 1024 B) and case-insensitive on input.
//!
//! ```rust
//! use utilkit::string::bytes;
//!
//! assert_eq!(bytes::format(1536.0, None).unwrap(), "1.5KB");
//! assert_eq!(bytes::parse("1.5kb").unwrap(), 1536);
//! ```

use crate::error::{Result, UtilError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static PARSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(([-+])?(\d+(?:\.\d+)?)) *(b|kb|mb|gb|tb|pb)$")
        .expect("Invalid regex pattern")
});

static LEADING_INT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([-+]?\d+)").expect("Invalid regex pattern"));

// Drops ".000" entirely and trailing zeros after significant decimals
static TRAILING_ZEROS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\.0*|(\.[^0]+)0+)$").expect("Invalid regex pattern"));

const MAX_ROUNDED_PLACES: i32 = 15;

/// Byte size units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BytesUnit {
    B,
    Kb,
    Mb,
    Gb,
    Tb,
    Pb,
}

impl BytesUnit {
    /// Number of bytes in one unit
    pub fn multiplier(&self) -> f64 {
        match self {
            BytesUnit::B => 1.0,
            BytesUnit::Kb => 1024.0,
            BytesUnit::Mb => 1024f64.powi(2),
            BytesUnit::Gb => 1024f64.powi(3),
            BytesUnit::Tb => 1024f64.powi(4),
            BytesUnit::Pb => 1024f64.powi(5),
        }
    }

    /// Convert unit to its display suffix
    pub fn as_str(&self) -> &'static str {
        match self {
            BytesUnit::B => "B",
            BytesUnit::Kb => "KB",
            BytesUnit::Mb => "MB",
            BytesUnit::Gb => "GB",
            BytesUnit::Tb => "TB",
            BytesUnit::Pb => "PB",
        }
    }

    /// Largest unit that keeps `magnitude` at or above 1
    pub fn for_magnitude(magnitude: f64) -> Self {
        [
            BytesUnit::Pb,
            BytesUnit::Tb,
            BytesUnit::Gb,
            BytesUnit::Mb,
            BytesUnit::Kb,
        ]
        .into_iter()
        .find(|unit| magnitude >= unit.multiplier())
        .unwrap_or(BytesUnit::B)
    }
}

impl fmt::Display for BytesUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BytesUnit {
    type Err = UtilError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "b" => Ok(BytesUnit::B),
            "kb" => Ok(BytesUnit::Kb),
            "mb" => Ok(BytesUnit::Mb),
            "gb" => Ok(BytesUnit::Gb),
            "tb" => Ok(BytesUnit::Tb),
            "pb" => Ok(BytesUnit::Pb),
            _ => Err(UtilError::invalid_argument(format!("Unknown bytes unit: {s}"))),
        }
    }
}

/// Options for byte size formatting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BytesFormatOptions {
    /// Maximum number of decimals
    pub decimal_places: usize,
    /// Keep trailing zeros up to `decimal_places`
    pub fixed_decimals: bool,
    /// Separator between groups of three integer digits
    pub thousands_separator: Option<String>,
    /// Force a unit instead of picking the largest fitting one
    pub unit: Option<BytesUnit>,
    /// Separator between the number and the unit
    pub unit_separator: Option<String>,
}

impl Default for BytesFormatOptions {
    fn default() -> Self {
        BytesFormatOptions {
            decimal_places: 2,
            fixed_decimals: false,
            thousands_separator: None,
            unit: None,
            unit_separator: None,
        }
    }
}

impl BytesFormatOptions {
    /// Create new BytesFormatOptions with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_decimal_places(mut self, decimal_places: usize) -> Self {
        self.decimal_places = decimal_places;
        self
    }

    pub fn with_fixed_decimals(mut self, fixed_decimals: bool) -> Self {
        self.fixed_decimals = fixed_decimals;
        self
    }

    pub fn with_thousands_separator<S: Into<String>>(mut self, separator: S) -> Self {
        self.thousands_separator = Some(separator.into());
        self
    }

    pub fn with_unit(mut self, unit: BytesUnit) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn with_unit_separator<S: Into<String>>(mut self, separator: S) -> Self {
        self.unit_separator = Some(separator.into());
        self
    }
}

/// Input accepted by [`parse`]: a byte count or a size expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BytesInput<'a> {
    /// Already a byte count, returned as is
    Bytes(i64),
    /// Expression like `"1.5 MB"` or `"1024"`
    Text(&'a str),
}

impl fmt::Display for BytesInput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BytesInput::Bytes(n) => write!(f, "{n}"),
            BytesInput::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for BytesInput<'_> {
    fn from(value: i64) -> Self {
        BytesInput::Bytes(value)
    }
}

impl From<i32> for BytesInput<'_> {
    fn from(value: i32) -> Self {
        BytesInput::Bytes(i64::from(value))
    }
}

impl From<u32> for BytesInput<'_> {
    fn from(value: u32) -> Self {
        BytesInput::Bytes(i64::from(value))
    }
}

impl<'a> From<&'a str> for BytesInput<'a> {
    fn from(value: &'a str) -> Self {
        BytesInput::Text(value)
    }
}

impl<'a> From<&'a String> for BytesInput<'a> {
    fn from(value: &'a String) -> Self {
        BytesInput::Text(value)
    }
}

/// Format a byte count as a human readable string
///
/// # Errors
///
/// Returns [`UtilError::InvalidBytes`] for `NaN` and infinite values.
///
/// # Example
///
/// ```rust
/// use utilkit::string::bytes::{self, BytesFormatOptions, BytesUnit};
///
/// assert_eq!(bytes::format(1024.0, None).unwrap(), "1KB");
///
/// let options = BytesFormatOptions::new()
///     .with_unit(BytesUnit::Kb)
///     .with_thousands_separator(",")
///     .with_unit_separator(" ");
/// assert_eq!(bytes::format(1_048_576_000.0, Some(options)).unwrap(), "1,024,000 KB");
/// ```
pub fn format(value: f64, options: Option<BytesFormatOptions>) -> Result<String> {
    if !value.is_finite() {
        return Err(UtilError::InvalidBytes(value.to_string()));
    }

    let opts = options.unwrap_or_default();
    let unit = opts
        .unit
        .unwrap_or_else(|| BytesUnit::for_magnitude(value.abs()));

    let scaled = round_half_up(value / unit.multiplier(), opts.decimal_places);
    let mut text = format!("{scaled:.precision$}", precision = opts.decimal_places);

    if !opts.fixed_decimals {
        text = TRAILING_ZEROS_RE.replace(&text, "$1").into_owned();
    }

    if let Some(separator) = opts.thousands_separator.as_deref().filter(|s| !s.is_empty()) {
        text = group_thousands(&text, separator);
    }

    Ok(format!(
        "{text}{}{unit}",
        opts.unit_separator.as_deref().unwrap_or("")
    ))
}

/// Parse a size expression into a byte count
///
/// Strings without a unit fall back to their leading integer, so
/// `"1024"` and `"10b"` both work. Fractional results are floored.
///
/// # Errors
///
/// Returns [`UtilError::InvalidBytes`] naming the input when no number can
/// be read.
///
/// # Example
///
/// ```rust
/// use utilkit::string::bytes;
///
/// assert_eq!(bytes::parse("1KB").unwrap(), 1024);
/// assert_eq!(bytes::parse("2 mb").unwrap(), 2_097_152);
/// assert_eq!(bytes::parse(512).unwrap(), 512);
/// assert!(bytes::parse("incorrect").is_err());
/// ```
pub fn parse<'a>(value: impl Into<BytesInput<'a>>) -> Result<i64> {
    let input = value.into();
    let text = match input {
        BytesInput::Bytes(n) => return Ok(n),
        BytesInput::Text(text) => text,
    };

    let invalid = || UtilError::InvalidBytes(input.to_string());

    if let Some(captures) = PARSE_RE.captures(text) {
        let amount: f64 = captures[1].parse().map_err(|_| invalid())?;
        let unit: BytesUnit = captures[4].parse()?;
        // Saturating float-to-int conversion is intended for absurd sizes
        #[allow(clippy::cast_possible_truncation)]
        return Ok((amount * unit.multiplier()).floor() as i64);
    }

    LEADING_INT_RE
        .captures(text)
        .and_then(|captures| captures[1].parse::<i64>().ok())
        .ok_or_else(invalid)
}

/// Round exact ties away from zero, so `1.125` keeps `1.13` at two places
///
/// Float formatting alone would round ties to even.
fn round_half_up(value: f64, decimal_places: usize) -> f64 {
    // Beyond f64 precision the scaling itself would lose digits
    let exp = match i32::try_from(decimal_places) {
        Ok(exp) if exp <= MAX_ROUNDED_PLACES => exp,
        _ => return value,
    };

    let factor = 10f64.powi(exp);
    let rounded = (value * factor).round() / factor;
    if rounded.is_finite() {
        rounded
    } else {
        value
    }
}

fn group_thousands(text: &str, separator: &str) -> String {
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text, None),
    };
    let (sign, digits) = match integer.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", integer),
    };

    let mut grouped = String::with_capacity(text.len() + digits.len() / 3 * separator.len());
    grouped.push_str(sign);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(digit);
    }

    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}
