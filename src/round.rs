//! This file contains the exponentiation helper and the rounding
//! authority that converts an exact binary value into one representable
//! under a target float layout. Both conversion directions funnel every
//! rounding decision through `round_to_spec`.

use crate::bigfloat::{zeroed_fragments, BigBinFloat, BigFloat};
use crate::error::{Error, Result};
use crate::floatspec::FloatSpec;
use crate::radix::{Binary, Fragment, FragmentWithCarry, Radix};

/// Raise `base` to a non-negative integer power by square-and-multiply.
/// An exponent of zero yields one; a zero base yields zero.
pub fn positive_pow<R: Radix>(
    base: &BigFloat<R>,
    exponent: u32,
) -> Result<BigFloat<R>> {
    if base.is_zero() {
        return Ok(BigFloat::zero());
    }
    if exponent == 0 {
        return BigFloat::from_fragment(1);
    }

    let mut squared = base.try_clone()?;
    let mut remaining = exponent;
    let mut result: Option<BigFloat<R>> = None;
    for bit in 0..u32::BITS {
        if bit > 0 {
            let copy = squared.try_clone()?;
            squared.inplace_mul(&copy)?;
        }
        let mask = 1u32 << bit;
        if exponent & mask != 0 {
            match result.as_mut() {
                None => result = Some(squared.try_clone()?),
                Some(accumulated) => accumulated.inplace_mul(&squared)?,
            }
            remaining ^= mask;
            if remaining == 0 {
                break;
            }
        }
    }
    result.ok_or(Error::InternalError)
}

/// Round an exact binary value to the nearest value representable under
/// `float_spec`, ties to even.
///
/// The retained precision is `mantissa_bits + 1` leading bits, anchored
/// to the subnormal floor once the coded exponent underflows a
/// denormal-supporting layout. With a normalized input an exact tie can
/// only sit at the value's lowest bit, so a rounding position strictly
/// above it decides by the bit at that position alone.
pub fn round_to_spec(
    value: BigBinFloat,
    float_spec: &FloatSpec,
) -> Result<BigBinFloat> {
    if value.is_zero() {
        return Ok(value);
    }

    let mantissa_bits = float_spec.mantissa_bits() as i32;
    let high_bit = value.low_place() + value.num_digits() as i32 - 1;
    let coded_exponent = high_bit + float_spec.exponent_of_one() as i32;

    let mut last_bit = high_bit - mantissa_bits;
    if float_spec.supports_denormals() && coded_exponent <= 0 {
        last_bit = 1 - float_spec.exponent_of_one() as i32 - mantissa_bits;
        if high_bit < last_bit - 1 {
            // Entirely below the smallest denormal bit.
            return Ok(BigBinFloat::zero());
        }
    }

    let rounding_bit = last_bit - 1;
    let rounding_relative = rounding_bit - value.low_place();
    if rounding_relative < 0 {
        // Nothing to round.
        return Ok(value);
    }
    let round_up = if rounding_relative == 0 {
        // Exact tie: round to even on the retained LSB.
        value.fragment(0) & 2 != 0
    } else {
        value.digit_at_place(rounding_bit) != 0
    };

    let dpf = Binary::DIGITS_PER_FRAGMENT;
    let needs_carry_fragment = value.num_digits() % dpf == 0;
    let num_fragments = value.num_fragments();
    let mut fragments = zeroed_fragments(
        num_fragments + usize::from(needs_carry_fragment),
    )?;

    let kept_relative = (rounding_relative + 1) as u32;
    let kept_fragment = (kept_relative / dpf) as usize;
    let kept_offset = kept_relative % dpf;

    for index in kept_fragment..num_fragments {
        fragments[index] = value.fragment(index);
    }
    fragments[kept_fragment] -=
        fragments[kept_fragment] % Binary::fragment_power(kept_offset);

    if round_up {
        let mut carry = (1 as FragmentWithCarry) << kept_offset;
        let mut index = kept_fragment;
        while carry != 0 {
            let sum = fragments[index] as FragmentWithCarry + carry;
            fragments[index] = (sum % Binary::FRAGMENT_MODULO) as Fragment;
            carry = sum / Binary::FRAGMENT_MODULO;
            index += 1;
        }
    }

    BigBinFloat::from_fragments(value.low_place(), fragments)
}

#[cfg(test)]
fn bin(value: u64) -> BigBinFloat {
    BigBinFloat::from_u64(value).unwrap()
}

#[cfg(test)]
fn bin_at(value: u64, place: i32) -> BigBinFloat {
    let mut result = bin(value);
    result.inplace_shift(place).unwrap();
    result
}

#[test]
fn test_positive_pow() {
    use crate::bigfloat::BigDecFloat;

    let two = BigDecFloat::from_fragment(2).unwrap();
    assert_eq!(positive_pow(&two, 0).unwrap().to_u64(), Some(1));
    assert_eq!(positive_pow(&two, 1).unwrap().to_u64(), Some(2));
    assert_eq!(positive_pow(&two, 40).unwrap().to_u64(), Some(1 << 40));

    let five = BigDecFloat::from_fragment(5).unwrap();
    assert_eq!(positive_pow(&five, 7).unwrap().to_u64(), Some(78_125));

    let ten = BigDecFloat::from_fragment(10).unwrap();
    assert_eq!(
        positive_pow(&ten, 17).unwrap().to_u64(),
        Some(100_000_000_000_000_000)
    );

    let zero = BigDecFloat::zero();
    assert!(positive_pow(&zero, 9).unwrap().is_zero());

    let two = BigBinFloat::from_fragment(2).unwrap();
    assert_eq!(positive_pow(&two, 63).unwrap().to_u64(), Some(1 << 63));
}

#[test]
fn test_round_unchanged_below_precision() {
    let value = bin(12_345);
    let rounded = round_to_spec(value, &FloatSpec::SINGLE).unwrap();
    assert_eq!(rounded, bin(12_345));

    let value = bin_at(0xb33333, -24);
    let rounded = round_to_spec(value, &FloatSpec::SINGLE).unwrap();
    assert_eq!(rounded, bin_at(0xb33333, -24));
}

#[test]
fn test_round_down_on_zero_rounding_bit() {
    // 2^25 + 1: the bit at the rounding position is clear, so the value
    // truncates even though a nonzero bit sits further below.
    let rounded = round_to_spec(bin(33_554_433), &FloatSpec::SINGLE).unwrap();
    assert_eq!(rounded, bin(33_554_432));

    // 16777218.25 is a quarter-ulp above a representable value.
    let rounded =
        round_to_spec(bin_at(67_108_873, -2), &FloatSpec::SINGLE).unwrap();
    assert_eq!(rounded, bin(16_777_218));
}

#[test]
fn test_round_half_to_even() {
    // 2^24 + 1 is an exact tie and the retained LSB is even.
    let rounded = round_to_spec(bin(16_777_217), &FloatSpec::SINGLE).unwrap();
    assert_eq!(rounded, bin(16_777_216));

    // 2^24 + 3 is an exact tie and the retained LSB is odd.
    let rounded = round_to_spec(bin(16_777_219), &FloatSpec::SINGLE).unwrap();
    assert_eq!(rounded, bin(16_777_220));

    // The same ties for double precision: 2^53 + 1 and 2^53 + 3.
    let rounded =
        round_to_spec(bin((1 << 53) + 1), &FloatSpec::DOUBLE).unwrap();
    assert_eq!(rounded, bin(1 << 53));
    let rounded =
        round_to_spec(bin((1 << 53) + 3), &FloatSpec::DOUBLE).unwrap();
    assert_eq!(rounded, bin((1 << 53) + 4));
}

#[test]
fn test_round_up_with_sticky_below_tie() {
    // 2^25 - 1: the rounding bit is set and lower bits are nonzero.
    let rounded = round_to_spec(bin(0x1ff_ffff), &FloatSpec::SINGLE).unwrap();
    assert_eq!(rounded, bin(0x200_0000));
}

#[test]
fn test_round_mantissa_overflow_carry() {
    // 2^32 - 1 rounds up and the carry ripples into a new fragment.
    let rounded = round_to_spec(bin(0xffff_ffff), &FloatSpec::SINGLE).unwrap();
    assert_eq!(rounded, bin(1 << 32));
}

#[test]
fn test_round_denormals() {
    // Half the smallest denormal: a tie against zero, retained LSB even.
    let rounded = round_to_spec(bin_at(1, -150), &FloatSpec::SINGLE).unwrap();
    assert!(rounded.is_zero());

    // Below the tie position.
    let rounded = round_to_spec(bin_at(1, -152), &FloatSpec::SINGLE).unwrap();
    assert!(rounded.is_zero());

    // Three quarters of the smallest denormal rounds up to it.
    let rounded = round_to_spec(bin_at(3, -151), &FloatSpec::SINGLE).unwrap();
    assert_eq!(rounded, bin_at(1, -149));

    // A subnormal with too many bits loses precision at the floor.
    // 2^-130 + 2^-150 keeps the 2^-130 bit only, since the floor cuts at
    // 2^-149 and the dropped bit is below the rounding position.
    let mut value = bin_at(1, -130);
    value.inplace_add(&bin_at(1, -150)).unwrap();
    let rounded = round_to_spec(value, &FloatSpec::SINGLE).unwrap();
    assert_eq!(rounded, bin_at(1, -130));
}

#[test]
fn test_round_idempotent() {
    use crate::utils::Lfsr;
    let mut lfsr = Lfsr::new();
    for _ in 0..200 {
        let value = bin_at(lfsr.get64(), (lfsr.get() % 64) as i32 - 32);
        let once =
            round_to_spec(value.try_clone().unwrap(), &FloatSpec::SINGLE)
                .unwrap();
        let twice = round_to_spec(
            once.try_clone().unwrap(),
            &FloatSpec::SINGLE,
        )
        .unwrap();
        assert_eq!(once, twice);
    }
}
