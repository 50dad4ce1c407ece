//! This file defines the limb ("fragment") representation and the
//! per-radix packing properties for base-2 and base-10 values.

use crate::utils::lowest_set_bit;

/// A fixed-capacity chunk holding several digits of a value in some base.
pub type Fragment = u32;

/// A wider type that holds a fragment plus carry headroom.
pub type FragmentWithCarry = u64;

/// The packing properties of one radix: how many digits fit in a fragment,
/// the modulo of a full fragment, and the digit bounds of a value.
pub trait Radix {
    /// The numeric base of each digit.
    const BASE: Fragment;
    /// Number of digits packed into one fragment.
    const DIGITS_PER_FRAGMENT: u32;
    /// BASE raised to DIGITS_PER_FRAGMENT.
    const FRAGMENT_MODULO: FragmentWithCarry;
    /// Upper bound on the significant digits of any value.
    const MAX_DIGITS: u32 = 0x10000;
    /// Upper bound on the place of the least-significant digit.
    const MAX_LOW_PLACE: i32 = 0x10000;
    /// Lower bound on the place of the least-significant digit.
    const MIN_LOW_PLACE: i32 = -0x10000;

    /// Returns BASE raised to `power`, for `power` below
    /// DIGITS_PER_FRAGMENT.
    fn fragment_power(power: u32) -> Fragment;

    /// Returns the number of trailing zero digits of a nonzero fragment.
    fn trailing_zero_digits(fragment: Fragment) -> u32;
}

/// Base-2 digit packing: 32 binary digits per 32-bit fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binary;

impl Radix for Binary {
    const BASE: Fragment = 2;
    const DIGITS_PER_FRAGMENT: u32 = 32;
    const FRAGMENT_MODULO: FragmentWithCarry = 1 << 32;

    fn fragment_power(power: u32) -> Fragment {
        debug_assert!(power < Self::DIGITS_PER_FRAGMENT);
        1 << power
    }

    fn trailing_zero_digits(fragment: Fragment) -> u32 {
        lowest_set_bit(fragment)
    }
}

/// Base-10 digit packing: 8 decimal digits per 32-bit fragment. Nine
/// digits would fit, but 8 keeps a full spare decimal digit of headroom
/// and lets the div/modulo ops strength-reduce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decimal;

const DECIMAL_POWERS: [Fragment; 8] =
    [1, 10, 100, 1_000, 10_000, 100_000, 1_000_000, 10_000_000];

impl Radix for Decimal {
    const BASE: Fragment = 10;
    const DIGITS_PER_FRAGMENT: u32 = 8;
    const FRAGMENT_MODULO: FragmentWithCarry = 100_000_000;

    fn fragment_power(power: u32) -> Fragment {
        debug_assert!(power < Self::DIGITS_PER_FRAGMENT);
        DECIMAL_POWERS[power as usize]
    }

    fn trailing_zero_digits(fragment: Fragment) -> u32 {
        debug_assert!(fragment != 0);
        debug_assert!((fragment as FragmentWithCarry) < Self::FRAGMENT_MODULO);

        let mut fragment = fragment;
        let mut zeros = 0;
        let mut max_zeros = Self::DIGITS_PER_FRAGMENT - 1;

        while max_zeros > 0 {
            // Odd numbers have no trailing zeroes.
            if fragment & 1 != 0 {
                break;
            }

            let half = (max_zeros + 1) / 2;
            let modulo = Self::fragment_power(half);
            let lower_half = fragment % modulo;
            if lower_half == 0 {
                zeros += half;
                max_zeros -= half;
                fragment /= modulo;
            } else {
                // The lower half was not all zeroes, so it can hold at
                // most one fewer trailing zero than the digits cleaved.
                max_zeros = half - 1;
                fragment = lower_half;
            }
        }

        zeros
    }
}

#[test]
fn test_decimal_trailing_zeros() {
    assert_eq!(Decimal::trailing_zero_digits(1), 0);
    assert_eq!(Decimal::trailing_zero_digits(5), 0);
    assert_eq!(Decimal::trailing_zero_digits(10), 1);
    assert_eq!(Decimal::trailing_zero_digits(100), 2);
    assert_eq!(Decimal::trailing_zero_digits(12_300), 2);
    assert_eq!(Decimal::trailing_zero_digits(93_456_000), 3);
    assert_eq!(Decimal::trailing_zero_digits(10_000_000), 7);
    assert_eq!(Decimal::trailing_zero_digits(99_999_999), 0);
    assert_eq!(Decimal::trailing_zero_digits(40_000_000), 7);
}

#[test]
fn test_binary_trailing_zeros() {
    assert_eq!(Binary::trailing_zero_digits(1), 0);
    assert_eq!(Binary::trailing_zero_digits(0x8000_0000), 31);
    assert_eq!(Binary::trailing_zero_digits(0b1011_0100), 2);
}

#[test]
fn test_fragment_powers() {
    for power in 0..Decimal::DIGITS_PER_FRAGMENT {
        assert_eq!(
            Decimal::fragment_power(power) as u64,
            10u64.pow(power)
        );
    }
    for power in 0..Binary::DIGITS_PER_FRAGMENT {
        assert_eq!(Binary::fragment_power(power) as u64, 1u64 << power);
    }
}
