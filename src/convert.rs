//! This file contains the correctly-rounded conversion engine between
//! binary and decimal values: exact binary-to-decimal expansion, the
//! shortest round-tripping decimal reconstruction, and decimal-to-binary
//! conversion under a target float layout.

use crate::bigfloat::{zeroed_fragments, BigBinFloat, BigDecFloat};
use crate::error::{Error, Result};
use crate::floatspec::FloatSpec;
use crate::radix::{Binary, Decimal, Fragment, Radix};
use crate::round::{positive_pow, round_to_spec};

const BITS_PER_SLICE: u32 = 16;

/// Convert an exact binary value to the exact equivalent decimal value.
///
/// The binary digits are consumed in 16-bit slices, least-significant
/// first, each scaled by a decimal representation of its power of two.
/// Fractional powers use 2^-n = 5^n·10^-n, so a binary fraction is never
/// approximated by decimal division.
pub fn bin_to_dec(bin: &BigBinFloat) -> Result<BigDecFloat> {
    if bin.is_zero() {
        return Ok(BigDecFloat::zero());
    }

    let low_place = bin.low_place();
    let mut multiplier = if low_place < 0 {
        let five = BigDecFloat::from_fragment(5)?;
        let mut raised = positive_pow(&five, (-low_place) as u32)?;
        raised.inplace_shift(low_place)?;
        raised
    } else {
        let two = BigDecFloat::from_fragment(2)?;
        positive_pow(&two, low_place as u32)?
    };
    let slice_raise = BigDecFloat::from_fragment(1 << BITS_PER_SLICE)?;

    let slices_per_fragment = Binary::DIGITS_PER_FRAGMENT / BITS_PER_SLICE;
    let slice_mask: Fragment = (1 << BITS_PER_SLICE) - 1;
    let num_slices =
        (bin.num_digits() + BITS_PER_SLICE - 1) / BITS_PER_SLICE;

    let mut result = BigDecFloat::zero();
    for slice_index in 0..num_slices {
        let fragment =
            bin.fragment((slice_index / slices_per_fragment) as usize);
        let sub_index = slice_index % slices_per_fragment;
        let slice = (fragment >> (sub_index * BITS_PER_SLICE)) & slice_mask;
        if slice != 0 {
            let mut addend = BigDecFloat::from_fragment(slice)?;
            addend.inplace_mul(&multiplier)?;
            result.inplace_add(&addend)?;
        }
        if slice_index != num_slices - 1 {
            multiplier.inplace_mul(&slice_raise)?;
        }
    }
    Ok(result)
}

/// Convert a binary value representable under `float_spec` to the
/// shortest decimal value that rounds back to exactly the same binary
/// value. An input carrying more digits than the layout allows at its
/// exponent is first re-rounded.
///
/// The value sits strictly between exact decimal expansions of the
/// half-steps toward both binary neighbors. Walking down from the top
/// decimal place, the first place where the correctly-rounded prefix of
/// the exact expansion fits the interval yields the shortest decimal. A
/// prefix landing exactly on a half-step bound is a tie against a
/// neighbor and is kept only when it reparses back to the value, that
/// is when the retained LSB is even.
pub fn bin_to_dec_with_spec(
    bin: BigBinFloat,
    float_spec: &FloatSpec,
) -> Result<BigDecFloat> {
    if bin.is_zero() {
        return Ok(BigDecFloat::zero());
    }

    let high_bit = bin.low_place() + bin.num_digits() as i32 - 1;
    let coded_exponent = high_bit + float_spec.exponent_of_one() as i32;
    let mut lowest_bit = high_bit - float_spec.mantissa_bits() as i32;
    if coded_exponent <= 0 && float_spec.supports_denormals() {
        lowest_bit = 1
            - float_spec.mantissa_bits() as i32
            - float_spec.exponent_of_one() as i32;
    }
    if bin.low_place() < lowest_bit {
        let rounded = round_to_spec(bin, float_spec)?;
        return bin_to_dec_with_spec(rounded, float_spec);
    }

    // The retained LSB sits at the lowest allowed bit; round-half-to-even
    // keeps a half-step tie on this value only when that bit is clear.
    let keeps_ties = bin.low_place() > lowest_bit;

    // Half-steps to the binary neighbors. The step down shrinks at a
    // power-of-two boundary, except where denormal spacing keeps it flat
    // or the no-lower-neighbor minimum keeps the bound positive.
    let mut lower_is_tie = true;
    let mut step_above = BigBinFloat::from_fragment(1)?;
    step_above.inplace_shift(lowest_bit)?;
    let mut step_below = BigBinFloat::from_fragment(1)?;
    if bin.num_digits() == 1 {
        if coded_exponent > 1 {
            step_below.inplace_shift(lowest_bit - 1)?;
        } else if coded_exponent == 1 {
            if float_spec.supports_denormals() {
                step_below.inplace_shift(lowest_bit)?;
            } else {
                step_below.inplace_shift(lowest_bit - 1)?;
            }
        } else if float_spec.supports_denormals() {
            step_below.inplace_shift(lowest_bit)?;
        } else {
            step_below = bin.try_clone()?;
            lower_is_tie = false;
        }
    } else {
        step_below.inplace_shift(lowest_bit)?;
    }
    step_above.inplace_shift(-1)?;
    step_below.inplace_shift(-1)?;

    let exact = bin_to_dec(&bin)?;
    let mut upper = bin.try_clone()?;
    upper.inplace_add(&step_above)?;
    let mut lower = bin;
    lower.inplace_sub(&step_below)?;

    let upper_dec = bin_to_dec(&upper)?;
    let lower_dec = bin_to_dec(&lower)?;

    let fits = |candidate: &BigDecFloat| {
        if *candidate > lower_dec && *candidate < upper_dec {
            return true;
        }
        (*candidate == upper_dec
            || (lower_is_tie && *candidate == lower_dec))
            && keeps_ties
    };

    // The prefix at the exact value's own low place is the exact value,
    // which always fits, so the walk terminates.
    let floor = exact.low_place();
    let mut place = upper_dec.low_place() + upper_dec.num_digits() as i32 - 1;
    while place >= floor {
        let mut candidate = truncated_at_place(&exact, place)?;
        if exact.digit_at_place(place - 1) >= 5 {
            candidate.inplace_add(&place_unit(place)?)?;
        }
        if fits(&candidate) {
            return Ok(candidate);
        }
        // The nearest prefix overshot a bound; try its one-step neighbor
        // toward the interval before descending a place.
        if candidate >= upper_dec {
            candidate.inplace_sub(&place_unit(place)?)?;
        } else {
            candidate.inplace_add(&place_unit(place)?)?;
        }
        if fits(&candidate) {
            return Ok(candidate);
        }
        place -= 1;
    }
    debug_assert!(false, "no prefix of the exact expansion fits the interval");
    Err(Error::InternalError)
}

/// The value's digits at `place` and above, as an exact value.
fn truncated_at_place(
    value: &BigDecFloat,
    place: i32,
) -> Result<BigDecFloat> {
    if value.is_zero() || place <= value.low_place() {
        return value.try_clone();
    }
    let extent = value.low_place() + value.num_digits() as i32;
    if place >= extent {
        return Ok(BigDecFloat::zero());
    }

    let count = (extent - place) as u32;
    let dpf = Decimal::DIGITS_PER_FRAGMENT;
    let mut fragments =
        zeroed_fragments(((count + dpf - 1) / dpf) as usize)?;
    for offset in 0..count {
        let digit = value.digit_at_place(place + offset as i32);
        fragments[(offset / dpf) as usize] +=
            digit * Decimal::fragment_power(offset % dpf);
    }
    BigDecFloat::from_fragments(place, fragments)
}

fn place_unit(place: i32) -> Result<BigDecFloat> {
    let mut unit = BigDecFloat::from_fragment(1)?;
    unit.inplace_shift(place)?;
    Ok(unit)
}

/// Convert a non-negative-place decimal to the exact equivalent binary
/// value by accumulating its fragments in binary.
pub fn dec_to_bin_integer(dec: &BigDecFloat) -> Result<BigBinFloat> {
    if dec.is_zero() {
        return Ok(BigBinFloat::zero());
    }
    debug_assert!(dec.low_place() >= 0);

    let dec_modulo =
        BigBinFloat::from_fragment(Decimal::FRAGMENT_MODULO as Fragment)?;
    let mut result = BigBinFloat::zero();
    let mut raise = BigBinFloat::zero();
    for index in 0..dec.num_fragments() {
        let fragment = dec.fragment(index);
        if index == 0 {
            result = BigBinFloat::from_fragment(fragment)?;
            continue;
        }
        if index == 1 {
            raise = dec_modulo.try_clone()?;
        } else {
            raise.inplace_mul(&dec_modulo)?;
        }
        if fragment != 0 {
            let mut term = BigBinFloat::from_fragment(fragment)?;
            term.inplace_mul(&raise)?;
            result.inplace_add(&term)?;
        }
    }

    // Normalization keeps trailing decimal zeros in the place, so scale
    // them back in.
    if dec.low_place() > 0 {
        let ten = BigBinFloat::from_fragment(10)?;
        let scale = positive_pow(&ten, dec.low_place() as u32)?;
        result.inplace_mul(&scale)?;
    }
    Ok(result)
}

/// Convert a decimal value to the nearest binary value representable
/// under `float_spec`. The trailing-zero count reported by the digit
/// parser is accepted for interface parity; the place representation
/// already captures it.
pub fn dec_to_bin(
    dec: BigDecFloat,
    float_spec: &FloatSpec,
    _trailing_zeros: u32,
) -> Result<BigBinFloat> {
    if dec.is_zero() {
        return Ok(BigBinFloat::zero());
    }

    let low_place = dec.low_place();
    if low_place >= 0 {
        let bin = dec_to_bin_integer(&dec)?;
        return round_to_spec(bin, float_spec);
    }

    // A dyadic fraction always ends in the decimal digit 5. Test for
    // exactness by scaling with the matching power of two and checking
    // that every fractional digit cancels.
    if dec.fragment(0) % 10 == 5 {
        let two = BigDecFloat::from_fragment(2)?;
        let raise = positive_pow(&two, (-low_place) as u32)?;
        let mut raised = dec.try_clone()?;
        raised.inplace_mul(&raise)?;
        if raised.low_place() >= 0 {
            let mut bin = dec_to_bin_integer(&raised)?;
            bin.inplace_shift(low_place)?;
            return round_to_spec(bin, float_spec);
        }
    }

    dec_to_bin_nonexact(&dec, float_spec)
}

/// Binary long division of a non-dyadic decimal fraction: resolve
/// mantissa+3 leading bits by repeatedly comparing a decimal
/// representation of a descending power of two against the remainder,
/// then force a sticky low bit for the nonzero tail.
fn dec_to_bin_nonexact(
    dec: &BigDecFloat,
    float_spec: &FloatSpec,
) -> Result<BigBinFloat> {
    debug_assert!(!dec.is_zero());

    // Fixed-point log2(10) estimate of the top bit place, then an exact
    // refinement upward.
    let top_dec_exclusive = dec.low_place() + dec.num_digits() as i32;
    let top_bin_exclusive =
        ((top_dec_exclusive as i64 * 108_853 + 32_767) >> 15) as i32;
    let mut bit_place = top_bin_exclusive - 1;

    let mut bit_value = if bit_place >= 0 {
        let two = BigDecFloat::from_fragment(2)?;
        positive_pow(&two, bit_place as u32)?
    } else {
        let five = BigDecFloat::from_fragment(5)?;
        let mut raised = positive_pow(&five, (-bit_place) as u32)?;
        raised.inplace_shift(bit_place)?;
        raised
    };
    let two = BigDecFloat::from_fragment(2)?;
    let five = BigDecFloat::from_fragment(5)?;
    loop {
        let mut doubled = bit_value.try_clone()?;
        doubled.inplace_mul(&two)?;
        if doubled <= *dec {
            bit_value = doubled;
            bit_place += 1;
        } else {
            break;
        }
    }

    let target_bits = float_spec.mantissa_bits() as u32 + 3;
    let dpf = Binary::DIGITS_PER_FRAGMENT;
    let mut fragments =
        zeroed_fragments(((target_bits + dpf - 1) / dpf) as usize)?;

    let mut remainder = dec.try_clone()?;
    let mut high_bit_place = 0i32;
    let mut have_high_bit = false;
    let mut bits_resolved = 0u32;
    while bits_resolved < target_bits - 1 {
        if bit_value <= remainder {
            remainder.inplace_sub(&bit_value)?;
            if !have_high_bit {
                have_high_bit = true;
                high_bit_place = bit_place;
            }
            let relative =
                (target_bits as i32 - 1 - (high_bit_place - bit_place)) as u32;
            fragments[(relative / dpf) as usize] |= 1 << (relative % dpf);
        }
        // Halve: multiply by 5, then drop one decimal place.
        bit_value.inplace_mul(&five)?;
        bit_value.inplace_shift(-1)?;
        bit_place -= 1;
        if have_high_bit {
            bits_resolved += 1;
        }
    }

    // The remainder of a non-dyadic fraction is never zero.
    bits_resolved += 1;
    fragments[0] |= 1;

    let low_place = high_bit_place - bits_resolved as i32 + 1;
    let bin = BigBinFloat::from_fragments(low_place, fragments)?;
    debug_assert_eq!(bin.num_digits(), bits_resolved);
    round_to_spec(bin, float_spec)
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

#[cfg(test)]
fn dec_at(value: u64, place: i32) -> BigDecFloat {
    let mut result = BigDecFloat::from_u64(value).unwrap();
    result.inplace_shift(place).unwrap();
    result
}

#[cfg(test)]
fn bin_from_f32(value: f32) -> BigBinFloat {
    let bits = value.to_bits();
    let mantissa = bits & 0x7f_ffff;
    let exponent = (bits >> 23) & 0xff;
    assert!(exponent != 0xff, "not a finite value");
    let (mantissa, place) = if exponent == 0 {
        (mantissa as u64, -149)
    } else {
        ((mantissa | 0x80_0000) as u64, exponent as i32 - 127 - 23)
    };
    bin_at(mantissa, place)
}

#[cfg(test)]
fn bin_from_f64(value: f64) -> BigBinFloat {
    let bits = value.to_bits();
    let mantissa = bits & 0xf_ffff_ffff_ffff;
    let exponent = ((bits >> 52) & 0x7ff) as u32;
    assert!(exponent != 0x7ff, "not a finite value");
    let (mantissa, place) = if exponent == 0 {
        (mantissa, -1074)
    } else {
        (mantissa | (1 << 52), exponent as i32 - 1023 - 52)
    };
    bin_at(mantissa, place)
}

#[test]
fn test_bin_to_dec_exact() {
    assert!(bin_to_dec(&BigBinFloat::zero()).unwrap().is_zero());
    assert_eq!(bin_to_dec(&bin(1)).unwrap(), dec_at(1, 0));
    assert_eq!(bin_to_dec(&bin(93_456_000)).unwrap(), dec_at(93_456_000, 0));
    // 0.5 and 0.0625.
    assert_eq!(bin_to_dec(&bin_at(1, -1)).unwrap(), dec_at(5, -1));
    assert_eq!(bin_to_dec(&bin_at(1, -4)).unwrap(), dec_at(625, -4));
    // Values wider than one fragment exercise the slice indexing.
    assert_eq!(
        bin_to_dec(&bin(1 << 40)).unwrap(),
        dec_at(1_099_511_627_776, 0)
    );
    assert_eq!(
        bin_to_dec(&bin((1 << 53) + 1)).unwrap(),
        dec_at(9_007_199_254_740_993, 0)
    );
}

#[test]
fn test_bin_to_dec_matches_parse() {
    use crate::parse::parse_decimal;
    // The exact decimal expansion of the f32 nearest 0.1.
    let expansion = b"0.100000001490116119384765625";
    let (expected, _) = parse_decimal(expansion).unwrap();
    assert_eq!(bin_to_dec(&bin_from_f32(0.1)).unwrap(), expected);
}

#[test]
fn test_bin_to_dec_random() {
    use crate::utils::Lfsr;
    let mut lfsr = Lfsr::new();
    for _ in 0..100 {
        let value = lfsr.get64();
        assert_eq!(bin_to_dec(&bin(value)).unwrap(), dec_at(value, 0));
    }
}

#[test]
fn test_shortest_decimal() {
    let spec = FloatSpec::SINGLE;
    assert_eq!(
        bin_to_dec_with_spec(bin_from_f32(0.1), &spec).unwrap(),
        dec_at(1, -1)
    );
    assert_eq!(
        bin_to_dec_with_spec(bin_from_f32(0.7), &spec).unwrap(),
        dec_at(7, -1)
    );
    assert_eq!(
        bin_to_dec_with_spec(bin_from_f32(4.0), &spec).unwrap(),
        dec_at(4, 0)
    );
    assert_eq!(
        bin_to_dec_with_spec(bin_from_f32(1.0), &spec).unwrap(),
        dec_at(1, 0)
    );
    assert_eq!(
        bin_to_dec_with_spec(bin_from_f32(22223.512), &spec).unwrap(),
        dec_at(22_223_512, -3)
    );
    // The smallest denormal is 1.40129846...e-45 and prints as the
    // single correctly-rounded digit.
    assert_eq!(
        bin_to_dec_with_spec(bin_at(1, -149), &spec).unwrap(),
        dec_at(1, -45)
    );
    assert!(bin_to_dec_with_spec(BigBinFloat::zero(), &spec)
        .unwrap()
        .is_zero());

    assert_eq!(
        bin_to_dec_with_spec(bin_from_f64(0.1), &FloatSpec::DOUBLE).unwrap(),
        dec_at(1, -1)
    );
}

#[test]
fn test_shortest_decimal_re_rounds_wide_input() {
    // 2^25 + 1 carries more bits than single precision holds, so the
    // conversion first rounds it to 2^25.
    let spec = FloatSpec::SINGLE;
    let shortest = bin_to_dec_with_spec(bin(33_554_433), &spec).unwrap();
    let back = dec_to_bin(shortest, &spec, 0).unwrap();
    assert_eq!(back, bin(33_554_432));
}

#[test]
fn test_shortest_decimal_round_trips_odd_mantissa() {
    // 16777218 sits two ulps past 2^24 with an odd retained LSB. Its
    // upper half-step bound is the terminating decimal 16777219, which
    // reparses to 16777220 under round-half-to-even, so the emitted
    // decimal must stay off that bound.
    let spec = FloatSpec::SINGLE;
    let shortest = bin_to_dec_with_spec(bin(16_777_218), &spec).unwrap();
    assert_eq!(shortest, dec_at(16_777_218, 0));
    let back = dec_to_bin(shortest, &spec, 0).unwrap();
    assert_eq!(back, bin(16_777_218));
}

#[test]
fn test_shortest_decimal_on_half_step_bounds() {
    let spec = FloatSpec::SINGLE;

    // 33554450 is the upper half-step bound of 33554448, whose retained
    // LSB is even: the tie reparses back, so the seven-digit bound is
    // the shortest decimal.
    let shortest = bin_to_dec_with_spec(bin(33_554_448), &spec).unwrap();
    assert_eq!(shortest, dec_at(3_355_445, 1));
    assert_eq!(dec_to_bin(shortest, &spec, 0).unwrap(), bin(33_554_448));

    // 33554470 bounds 33554468, whose retained LSB is odd: the tie
    // reparses away, no seven-digit decimal fits the interval, and the
    // walk descends to the exact eight-digit value.
    let shortest = bin_to_dec_with_spec(bin(33_554_468), &spec).unwrap();
    assert_eq!(shortest, dec_at(33_554_468, 0));
    assert_eq!(dec_to_bin(shortest, &spec, 0).unwrap(), bin(33_554_468));
}

#[test]
fn test_dec_to_bin_integer_exact() {
    assert_eq!(dec_to_bin_integer(&dec_at(1, 0)).unwrap(), bin(1));
    assert_eq!(
        dec_to_bin_integer(&dec_at(93_456_000, 0)).unwrap(),
        bin(93_456_000)
    );
    assert_eq!(
        dec_to_bin_integer(&dec_at(10_000_000_200_000_001, 0)).unwrap(),
        bin(10_000_000_200_000_001)
    );

    use crate::utils::Lfsr;
    let mut lfsr = Lfsr::new();
    for _ in 0..100 {
        let value = lfsr.get64() >> 11;
        let exact = dec_to_bin_integer(&dec_at(value, 0)).unwrap();
        assert_eq!(exact, bin(value));
    }
}

#[test]
fn test_dec_to_bin_zero() {
    let no_denormals = FloatSpec::new(8, 23, 127, false, false);
    for spec in [FloatSpec::SINGLE, FloatSpec::DOUBLE, no_denormals] {
        let result = dec_to_bin(BigDecFloat::zero(), &spec, 0).unwrap();
        assert!(result.is_zero());
    }
}

#[test]
fn test_dec_to_bin_exact_fractions() {
    let spec = FloatSpec::SINGLE;
    assert_eq!(
        dec_to_bin(dec_at(5, -1), &spec, 0).unwrap(),
        bin_at(1, -1)
    );
    assert_eq!(
        dec_to_bin(dec_at(375, -3), &spec, 0).unwrap(),
        bin_at(3, -3)
    );
    // 0.15 ends in 5 but is not dyadic.
    assert_eq!(
        dec_to_bin(dec_at(15, -2), &spec, 0).unwrap(),
        bin_from_f32(0.15)
    );
}

#[cfg(feature = "std")]
#[test]
fn test_dec_to_bin_matches_native_f32() {
    use crate::parse::parse_decimal;
    let literals: &[&str] = &[
        "0.7",
        "0.1",
        "0.2",
        "0.3",
        "2.5",
        "0.375",
        "0.15",
        "3.14159265358979",
        "33554433",
        "16777217",
        "16777219",
        "16777218.25",
        "22223.512",
        "22223.511111111111111111111111111111",
        "93456000",
        "340282346638528859811704183484516925440",
        "0.000000000000000000000000000000000000011754944",
        "0.000000000000000000000000000000000000000000001",
    ];
    for literal in literals {
        let (dec, trailing) = parse_decimal(literal.as_bytes()).unwrap();
        let ours = dec_to_bin(dec, &FloatSpec::SINGLE, trailing).unwrap();
        let native: f32 = literal.parse().unwrap();
        assert_eq!(ours, bin_from_f32(native), "literal {}", literal);
    }
}

#[cfg(feature = "std")]
#[test]
fn test_dec_to_bin_matches_native_f64() {
    use crate::parse::parse_decimal;
    let literals: &[&str] = &[
        "0.1",
        "0.7",
        "1.5",
        "3.141592653589793",
        "2.718281828459045",
        "9007199254740993",
        "9007199254740995",
        "0.001",
        "123456789.123456789",
        "0.000001000000000000000000000000000000000001",
    ];
    for literal in literals {
        let (dec, trailing) = parse_decimal(literal.as_bytes()).unwrap();
        let ours = dec_to_bin(dec, &FloatSpec::DOUBLE, trailing).unwrap();
        let native: f64 = literal.parse().unwrap();
        assert_eq!(ours, bin_from_f64(native), "literal {}", literal);
    }
}

#[test]
fn test_dec_to_bin_ties() {
    // 2^24 + 1 and 2^24 + 3 are exact integer ties for single precision.
    let spec = FloatSpec::SINGLE;
    assert_eq!(
        dec_to_bin(dec_at(16_777_217, 0), &spec, 0).unwrap(),
        bin(16_777_216)
    );
    assert_eq!(
        dec_to_bin(dec_at(16_777_219, 0), &spec, 0).unwrap(),
        bin(16_777_220)
    );
}

#[test]
fn test_round_trip_f32() {
    use crate::utils::Lfsr;
    let spec = FloatSpec::SINGLE;
    let mut lfsr = Lfsr::new();
    let mut tested = 0;
    while tested < 150 {
        let bits = lfsr.get();
        if (bits >> 23) & 0xff == 0xff {
            continue;
        }
        tested += 1;
        let value = bin_from_f32(f32::from_bits(bits));
        let shortest =
            bin_to_dec_with_spec(value.try_clone().unwrap(), &spec).unwrap();
        let back = dec_to_bin(shortest, &spec, 0).unwrap();
        assert_eq!(back, value, "bits {:#x}", bits);
    }
}

#[test]
fn test_round_trip_f64() {
    use crate::utils::Lfsr;
    let spec = FloatSpec::DOUBLE;
    let mut lfsr = Lfsr::new();
    let mut tested = 0;
    while tested < 100 {
        let bits = lfsr.get64();
        if (bits >> 52) & 0x7ff == 0x7ff {
            continue;
        }
        tested += 1;
        let value = bin_from_f64(f64::from_bits(bits));
        let shortest =
            bin_to_dec_with_spec(value.try_clone().unwrap(), &spec).unwrap();
        let back = dec_to_bin(shortest, &spec, 0).unwrap();
        assert_eq!(back, value, "bits {:#x}", bits);
    }
}

#[test]
fn test_fractional_halves_near_the_precision_edge() {
    // Past 2^24 single precision holds only even integers. 16777216.5 is
    // below the midpoint of its bracket and rounds down; 16777217.5 is
    // above the midpoint of its bracket and rounds up.
    let spec = FloatSpec::SINGLE;
    assert_eq!(
        dec_to_bin(dec_at(167_772_165, -1), &spec, 0).unwrap(),
        bin(16_777_216)
    );
    assert_eq!(
        dec_to_bin(dec_at(167_772_175, -1), &spec, 0).unwrap(),
        bin(16_777_218)
    );
}
