//! Byte size formatting and parsing
//!
//! Run: cargo test --test bytes_format

use utilkit::string::bytes::{self, BytesFormatOptions, BytesUnit};
use utilkit::UtilError;

// ── Invalid input ───────────────────────────────────────────────────────

#[test]
fn test_throws_when_incorrect_bytes_value() {
    let err = bytes::parse("incorrect").unwrap_err();
    assert_eq!(err.to_string(), "Received invalid bytes value: incorrect");

    let err = bytes::format(f64::NAN, None).unwrap_err();
    assert_eq!(err.to_string(), "Received invalid bytes value: NaN");
    assert!(matches!(err, UtilError::InvalidBytes(_)));
}

// ── Formatting ──────────────────────────────────────────────────────────

#[test]
fn test_format_units() {
    let cases = [
        (0.0, "0B"),
        (512.0, "512B"),
        (1024.0, "1KB"),
        (1536.0, "1.5KB"),
        (1_048_576.0, "1MB"),
        (1_073_741_824.0, "1GB"),
        (1_099_511_627_776.0, "1TB"),
        (1_125_899_906_842_624.0, "1PB"),
        (-1536.0, "-1.5KB"),
    ];

    for (value, expected) in cases {
        assert_eq!(bytes::format(value, None).unwrap(), expected, "{value}");
    }
}

#[test]
fn test_format_options() {
    let options = BytesFormatOptions::new()
        .with_unit(BytesUnit::Mb)
        .with_decimal_places(1)
        .with_fixed_decimals(true)
        .with_unit_separator(" ");
    assert_eq!(bytes::format(2_621_440.0, Some(options)).unwrap(), "2.5 MB");

    let options = BytesFormatOptions::new()
        .with_unit(BytesUnit::B)
        .with_thousands_separator(",");
    assert_eq!(bytes::format(1_234_567.0, Some(options)).unwrap(), "1,234,567B");
}

// ── Parsing ─────────────────────────────────────────────────────────────

#[test]
fn test_parse_expressions() {
    assert_eq!(bytes::parse("1kb").unwrap(), 1024);
    assert_eq!(bytes::parse("1 KB").unwrap(), 1024);
    assert_eq!(bytes::parse("1.5MB").unwrap(), 1_572_864);
    assert_eq!(bytes::parse("-2gb").unwrap(), -2_147_483_648);
    assert_eq!(bytes::parse("1024").unwrap(), 1024);
    assert_eq!(bytes::parse("10b").unwrap(), 10);
    assert_eq!(bytes::parse(4096).unwrap(), 4096);
}

#[test]
fn test_format_then_parse_is_identity() {
    for value in [1_i64, 1023, 2048, 3_145_728, 5_368_709_120] {
        #[allow(clippy::cast_precision_loss)]
        let text = bytes::format(value as f64, None).unwrap();
        assert_eq!(bytes::parse(&text).unwrap(), value, "{text}");
    }
}
