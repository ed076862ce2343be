//! Duration formatting and parsing
//!
//! Expressions are a number followed by an optional unit, e.g. `"500"`,
//! `"1.5s"`, `"10 minutes"`, `"-2h"`, `"1y"`. A year is 365.25 days.

use crate::error::{Result, UtilError};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;

const SECOND: f64 = 1_000.0;
const MINUTE: f64 = SECOND * 60.0;
const HOUR: f64 = MINUTE * 60.0;
const DAY: f64 = HOUR * 24.0;
const WEEK: f64 = DAY * 7.0;
const YEAR: f64 = DAY * 365.25;

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(-?(?:\d+)?\.?\d+) *",
        r"(milliseconds?|msecs?|ms|seconds?|secs?|s|minutes?|mins?|m",
        r"|hours?|hrs?|h|days?|d|weeks?|wks?|w|years?|yrs?|y)?$",
    ))
    .expect("Invalid regex pattern")
});

/// Input accepted by [`parse`]: milliseconds or a duration expression
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MsInput<'a> {
    /// Already milliseconds, returned as is
    Millis(f64),
    /// Expression like `"1.5s"`
    Expr(&'a str),
}

impl fmt::Display for MsInput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MsInput::Millis(n) => write!(f, "{n}"),
            MsInput::Expr(s) => f.write_str(s),
        }
    }
}

impl From<f64> for MsInput<'_> {
    fn from(value: f64) -> Self {
        MsInput::Millis(value)
    }
}

impl From<u32> for MsInput<'_> {
    fn from(value: u32) -> Self {
        MsInput::Millis(f64::from(value))
    }
}

impl From<i32> for MsInput<'_> {
    fn from(value: i32) -> Self {
        MsInput::Millis(f64::from(value))
    }
}

impl From<u64> for MsInput<'_> {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: u64) -> Self {
        MsInput::Millis(value as f64)
    }
}

impl From<Duration> for MsInput<'_> {
    fn from(value: Duration) -> Self {
        MsInput::Millis(value.as_secs_f64() * SECOND)
    }
}

impl<'a> From<&'a str> for MsInput<'a> {
    fn from(value: &'a str) -> Self {
        MsInput::Expr(value)
    }
}

impl<'a> From<&'a String> for MsInput<'a> {
    fn from(value: &'a String) -> Self {
        MsInput::Expr(value)
    }
}

/// Formats milliseconds to pretty string output
///
/// Below one second the raw milliseconds are printed. Above that the value
/// is rounded to the largest whole unit: `"2m"` or, with `long`,
/// `"2 minutes"`.
///
/// # Example
///
/// ```rust
/// use utilkit::string::ms;
///
/// assert_eq!(ms::format(1500.0, false), "2s");
/// assert_eq!(ms::format(60_000.0, true), "1 minute");
/// assert_eq!(ms::format(250.0, true), "250 ms");
/// ```
pub fn format(millis: f64, long: bool) -> String {
    let abs = millis.abs();
    if abs < SECOND {
        return if long {
            format!("{millis} ms")
        } else {
            format!("{millis}ms")
        };
    }

    let sign = if millis < 0.0 { "-" } else { "" };
    let (amount, unit) = if abs < MINUTE {
        (abs / SECOND, "second")
    } else if abs < HOUR {
        (abs / MINUTE, "minute")
    } else if abs < DAY {
        (abs / HOUR, "hour")
    } else if abs < YEAR {
        (abs / DAY, "day")
    } else {
        (abs / YEAR, "year")
    };

    // Round half up to a whole unit
    #[allow(clippy::cast_possible_truncation)]
    let rounded = (amount + 0.5).floor() as i64;

    if long {
        let plural = if rounded == 1 { "" } else { "s" };
        format!("{sign}{rounded} {unit}{plural}")
    } else {
        format!("{sign}{rounded}{}", &unit[..1])
    }
}

/// Parse a duration expression to milliseconds
///
/// Numeric input is returned as is. Expressions without a unit are
/// milliseconds. A zero amount (`"0"`, `"0s"`) parses to `0.0` rather
/// than being rejected as it is by the JavaScript `@lukeed/ms` parser.
///
/// # Errors
///
/// Returns [`UtilError::InvalidDuration`] naming the expression when it
/// cannot be parsed.
///
/// # Example
///
/// ```rust
/// use utilkit::string::ms;
///
/// assert_eq!(ms::parse("1.5s").unwrap(), 1500.0);
/// assert_eq!(ms::parse("2 hours").unwrap(), 7_200_000.0);
/// assert_eq!(ms::parse(250.0).unwrap(), 250.0);
/// assert!(ms::parse("soon").is_err());
/// ```
pub fn parse<'a>(duration: impl Into<MsInput<'a>>) -> Result<f64> {
    let expr = match duration.into() {
        MsInput::Millis(millis) => return Ok(millis),
        MsInput::Expr(expr) => expr,
    };

    let invalid = || UtilError::InvalidDuration(expr.to_string());
    let captures = DURATION_RE.captures(expr).ok_or_else(invalid)?;
    let amount: f64 = captures[1].parse().map_err(|_| invalid())?;

    let unit = captures
        .get(2)
        .map(|unit| unit.as_str().to_ascii_lowercase());

    Ok(amount * unit.as_deref().map_or(1.0, unit_millis))
}

/// Parse a duration into a [`Duration`]
///
/// # Errors
///
/// Returns [`UtilError::InvalidDuration`] for unparseable expressions and
/// for negative or non-finite results.
///
/// # Example
///
/// ```rust
/// use utilkit::string::ms;
/// use std::time::Duration;
///
/// assert_eq!(ms::to_duration("2m").unwrap(), Duration::from_secs(120));
/// assert!(ms::to_duration("-1s").is_err());
/// ```
pub fn to_duration<'a>(duration: impl Into<MsInput<'a>>) -> Result<Duration> {
    let input = duration.into();
    let millis = parse(input)?;

    Duration::try_from_secs_f64(millis / SECOND)
        .map_err(|_| UtilError::InvalidDuration(input.to_string()))
}

fn unit_millis(unit: &str) -> f64 {
    if unit.starts_with("ms") || unit.starts_with("mil") {
        1.0
    } else if unit.starts_with('s') {
        SECOND
    } else if unit.starts_with('m') {
        MINUTE
    } else if unit.starts_with('h') {
        HOUR
    } else if unit.starts_with('d') {
        DAY
    } else if unit.starts_with('w') {
        WEEK
    } else {
        YEAR
    }
}
