//! This file contains the decimal text parser: ASCII digit runs are
//! accumulated into fragments and folded into an exact base-10 value,
//! with bookkeeping for the trailing zeros of the final fragment.

use crate::bigfloat::BigDecFloat;
use crate::error::{Error, Result};
use crate::radix::{Decimal, Fragment, Radix};

/// Parse a run of ASCII decimal digits into an exact value, returning the
/// value and the number of trailing zero digits folded into its place.
/// The trailing-zero count lets callers tell an exact integer from a
/// value padded with zeros. An empty run parses as zero.
pub fn parse_digits(text: &[u8]) -> Result<(BigDecFloat, u32)> {
    let mut result = BigDecFloat::zero();
    let mut fragment: Fragment = 0;
    let mut fragment_length: u32 = 0;
    // Digit places consumed since the last digit landed in `fragment`,
    // and since `result` last absorbed a fragment.
    let mut fragment_shift: i32 = 0;
    let mut result_shift: i32 = 0;

    for &byte in text {
        if !byte.is_ascii_digit() {
            return Err(Error::MalformedNumber);
        }
        result_shift += 1;
        if byte == b'0' {
            if fragment_length > 0 {
                fragment_shift += 1;
            }
            continue;
        }

        fragment_shift += 1;
        if fragment_length + fragment_shift as u32
            > Decimal::DIGITS_PER_FRAGMENT
        {
            // The pending fragment is full: fold it into the total.
            let mut pending = BigDecFloat::from_fragment(fragment)?;
            result.inplace_shift(result_shift)?;
            pending.inplace_shift(fragment_shift)?;
            result.inplace_add(&pending)?;
            result_shift = 0;
            fragment_shift = 1;
            fragment = 0;
            fragment_length = 0;
        }
        fragment = fragment * Decimal::fragment_power(fragment_shift as u32)
            + (byte - b'0') as Fragment;
        fragment_length += fragment_shift as u32;
        fragment_shift = 0;
    }

    result.inplace_shift(result_shift)?;
    if fragment_length > 0 {
        let mut pending = BigDecFloat::from_fragment(fragment)?;
        pending.inplace_shift(fragment_shift)?;
        result.inplace_add(&pending)?;
    }
    Ok((result, fragment_shift as u32))
}

/// Parse a decimal numeral with an optional decimal point into an exact
/// value, returning the value and the trailing-zero count of its digit
/// text. Exponent notation is recognized but not implemented.
pub fn parse_decimal(text: &[u8]) -> Result<(BigDecFloat, u32)> {
    let mut has_dot = false;
    let mut has_exponent = false;
    let mut dot_index = 0usize;

    let mut index = 0usize;
    while index < text.len() {
        let byte = text[index];
        if byte == b'.' {
            if has_dot || has_exponent {
                return Err(Error::MalformedNumber);
            }
            has_dot = true;
            dot_index = index;
        } else if byte == b'e' || byte == b'E' {
            if has_exponent || index + 1 == text.len() {
                return Err(Error::MalformedNumber);
            }
            let next = text[index + 1];
            if next == b'-' || next == b'+' {
                index += 1;
                if index + 1 == text.len() {
                    return Err(Error::MalformedNumber);
                }
            }
            has_exponent = true;
        } else if !byte.is_ascii_digit() {
            return Err(Error::MalformedNumber);
        }
        index += 1;
    }
    if has_exponent {
        return Err(Error::NotYetImplemented);
    }

    let integral = if has_dot { &text[..dot_index] } else { text };
    let (mut result, mut trailing_zeros) = parse_digits(integral)?;

    if has_dot {
        let fractional = &text[dot_index + 1..];
        let (mut fractional_part, fractional_trailing) =
            parse_digits(fractional)?;
        if fractional_part.is_zero() {
            trailing_zeros += fractional_trailing;
        } else {
            fractional_part.inplace_shift(-(fractional.len() as i32))?;
            result.inplace_add(&fractional_part)?;
            trailing_zeros = fractional_trailing;
        }
    }
    Ok((result, trailing_zeros))
}

#[cfg(test)]
fn dec_at(value: u64, place: i32) -> BigDecFloat {
    let mut result = BigDecFloat::from_u64(value).unwrap();
    result.inplace_shift(place).unwrap();
    result
}

#[test]
fn test_parse_digits() {
    let (value, trailing) = parse_digits(b"93456000").unwrap();
    assert_eq!(value.to_u64(), Some(93_456_000));
    assert_eq!(value.low_place(), 3);
    assert_eq!(trailing, 3);

    let (value, trailing) = parse_digits(b"7").unwrap();
    assert_eq!(value.to_u64(), Some(7));
    assert_eq!(trailing, 0);

    let (value, trailing) = parse_digits(b"007").unwrap();
    assert_eq!(value.to_u64(), Some(7));
    assert_eq!(trailing, 0);

    let (value, trailing) = parse_digits(b"").unwrap();
    assert!(value.is_zero());
    assert_eq!(trailing, 0);

    let (value, trailing) = parse_digits(b"000").unwrap();
    assert!(value.is_zero());
    assert_eq!(trailing, 0);
}

#[test]
fn test_parse_digits_flush() {
    // Longer than one 8-digit fragment.
    let (value, trailing) = parse_digits(b"12345678901234567").unwrap();
    assert_eq!(value.to_u64(), Some(12_345_678_901_234_567));
    assert_eq!(trailing, 0);

    let (value, trailing) = parse_digits(b"10000000000000001").unwrap();
    assert_eq!(value.to_u64(), Some(10_000_000_000_000_001));
    assert_eq!(trailing, 0);

    let (value, trailing) = parse_digits(b"90000000001000000").unwrap();
    assert_eq!(value.to_u64(), Some(90_000_000_001_000_000));
    assert_eq!(trailing, 6);

    let (value, _) = parse_digits(b"340282346638528859811704183484516925440")
        .unwrap();
    assert_eq!(value.num_digits(), 38);
    assert_eq!(value.low_place(), 1);
}

#[test]
fn test_parse_digits_rejects_non_digits() {
    assert_eq!(parse_digits(b"12a4").unwrap_err(), Error::MalformedNumber);
    assert_eq!(parse_digits(b" 1").unwrap_err(), Error::MalformedNumber);
    assert_eq!(parse_digits(b"1.5").unwrap_err(), Error::MalformedNumber);
}

#[test]
fn test_parse_decimal_integral() {
    let (value, trailing) = parse_decimal(b"93456000").unwrap();
    assert_eq!(value, dec_at(93_456_000, 0));
    assert_eq!(trailing, 3);
}

#[test]
fn test_parse_decimal_fractional() {
    let (value, trailing) = parse_decimal(b"1.5").unwrap();
    assert_eq!(value, dec_at(15, -1));
    assert_eq!(trailing, 0);

    let (value, trailing) = parse_decimal(b"1.50").unwrap();
    assert_eq!(value, dec_at(15, -1));
    assert_eq!(trailing, 1);

    let (value, trailing) = parse_decimal(b"0.125").unwrap();
    assert_eq!(value, dec_at(125, -3));
    assert_eq!(trailing, 0);

    // Zeros count toward the trailing total only after a nonzero digit
    // seeds the pending fragment, so an all-zero run reports none.
    let (value, trailing) = parse_decimal(b"25.000").unwrap();
    assert_eq!(value, dec_at(25, 0));
    assert_eq!(trailing, 0);

    let (value, trailing) = parse_decimal(b"0.000").unwrap();
    assert!(value.is_zero());
    assert_eq!(trailing, 0);

    let (value, trailing) = parse_decimal(b"2.500").unwrap();
    assert_eq!(value, dec_at(25, -1));
    assert_eq!(trailing, 2);

    let (value, _) =
        parse_decimal(b"22223.511111111111111111111111111111").unwrap();
    assert_eq!(value.low_place(), -30);
    assert_eq!(value.num_digits(), 35);
    assert_eq!(value.digit_at_place(4), 2);
    assert_eq!(value.digit_at_place(-1), 5);
    assert_eq!(value.digit_at_place(-2), 1);
    assert_eq!(value.digit_at_place(-30), 1);
}

#[test]
fn test_parse_decimal_malformed() {
    assert_eq!(parse_decimal(b"1.2.3").unwrap_err(), Error::MalformedNumber);
    assert_eq!(parse_decimal(b"12a").unwrap_err(), Error::MalformedNumber);
    assert_eq!(parse_decimal(b"1e").unwrap_err(), Error::MalformedNumber);
    assert_eq!(parse_decimal(b"1e+").unwrap_err(), Error::MalformedNumber);
    assert_eq!(parse_decimal(b"1e5e5").unwrap_err(), Error::MalformedNumber);
    assert_eq!(
        parse_decimal(b"1e5.5").unwrap_err(),
        Error::MalformedNumber
    );
    assert_eq!(parse_decimal(b"-1").unwrap_err(), Error::MalformedNumber);
}

#[test]
fn test_parse_decimal_exponent_unimplemented() {
    assert_eq!(
        parse_decimal(b"1e5").unwrap_err(),
        Error::NotYetImplemented
    );
    assert_eq!(
        parse_decimal(b"1.5E-10").unwrap_err(),
        Error::NotYetImplemented
    );
}
