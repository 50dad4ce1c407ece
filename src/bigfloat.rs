//! This file contains the implementation of the arbitrary-precision
//! unsigned float: a growable sequence of digit fragments plus a signed
//! place for the least-significant digit, so leading and trailing zero
//! digits cost an integer offset instead of storage.

use core::cmp::Ordering;
use core::fmt::{Display, Formatter};
use core::marker::PhantomData;

use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::radix::{Binary, Decimal, Fragment, FragmentWithCarry, Radix};

/// Allocates a zero-filled fragment buffer, reporting allocation failure.
pub(crate) fn zeroed_fragments(len: usize) -> Result<Vec<Fragment>> {
    let mut fragments = Vec::new();
    fragments
        .try_reserve_exact(len)
        .map_err(|_| Error::OutOfMemory)?;
    fragments.resize(len, 0);
    Ok(fragments)
}

/// Appends one fragment, reporting allocation failure.
pub(crate) fn push_fragment(
    fragments: &mut Vec<Fragment>,
    value: Fragment,
) -> Result<()> {
    fragments.try_reserve(1).map_err(|_| Error::OutOfMemory)?;
    fragments.push(value);
    Ok(())
}

/// An arbitrary-precision unsigned magnitude in the radix `R`.
///
/// The value is (Σ fragments\[i\]·MODULO^i)·BASE^low_place. A nonzero
/// value is kept normalized: no zero high fragment, and the digit at
/// `low_place` is nonzero. Zero is represented with no fragments,
/// `num_digits == 0` and `low_place == 0`.
#[derive(Debug)]
pub struct BigFloat<R: Radix> {
    low_place: i32,
    num_digits: u32,
    fragments: Vec<Fragment>,
    phantom: PhantomData<R>,
}

/// A base-10 magnitude.
pub type BigDecFloat = BigFloat<Decimal>;
/// A base-2 magnitude.
pub type BigBinFloat = BigFloat<Binary>;

impl<R: Radix> BigFloat<R> {
    /// Create the value zero.
    pub fn zero() -> Self {
        Self {
            low_place: 0,
            num_digits: 0,
            fragments: Vec::new(),
            phantom: PhantomData,
        }
    }

    /// Create a value from the digits of a single fragment. Trailing zero
    /// digits are stripped into the low place.
    pub fn from_fragment(fragment: Fragment) -> Result<Self> {
        debug_assert!((fragment as FragmentWithCarry) < R::FRAGMENT_MODULO);
        if fragment == 0 {
            return Ok(Self::zero());
        }

        let trailing = R::trailing_zero_digits(fragment);
        let fragment = fragment / R::fragment_power(trailing);

        let mut num_digits = 1;
        while num_digits < R::DIGITS_PER_FRAGMENT
            && fragment >= R::fragment_power(num_digits)
        {
            num_digits += 1;
        }

        let mut fragments = Vec::new();
        fragments
            .try_reserve_exact(1)
            .map_err(|_| Error::OutOfMemory)?;
        fragments.push(fragment);
        Ok(Self {
            low_place: trailing as i32,
            num_digits,
            fragments,
            phantom: PhantomData,
        })
    }

    /// Create a value from a `u64`, splitting it into fragments.
    pub fn from_u64(value: u64) -> Result<Self> {
        let mut fragments = Vec::new();
        let mut value = value;
        while value > 0 {
            push_fragment(
                &mut fragments,
                (value % R::FRAGMENT_MODULO) as Fragment,
            )?;
            value /= R::FRAGMENT_MODULO;
        }
        Self::from_fragments(0, fragments)
    }

    /// Assemble a value from a raw least-significant-first fragment
    /// buffer whose lowest digit sits at `low_place`, normalizing and
    /// checking the place and digit bounds.
    pub(crate) fn from_fragments(
        low_place: i32,
        mut fragments: Vec<Fragment>,
    ) -> Result<Self> {
        let (removed, num_digits) = Self::normalize_fragments(&mut fragments);
        if num_digits == 0 {
            return Ok(Self::zero());
        }
        Self::checked_parts(low_place + removed as i32, num_digits, fragments)
    }

    fn checked_parts(
        low_place: i32,
        num_digits: u32,
        fragments: Vec<Fragment>,
    ) -> Result<Self> {
        if num_digits > R::MAX_DIGITS
            || low_place < R::MIN_LOW_PLACE
            || low_place > R::MAX_LOW_PLACE
        {
            return Err(Error::IntegerOverflow);
        }
        Ok(Self {
            low_place,
            num_digits,
            fragments,
            phantom: PhantomData,
        })
    }

    pub fn is_zero(&self) -> bool {
        self.num_digits == 0
    }

    /// The place of the least-significant digit.
    pub fn low_place(&self) -> i32 {
        self.low_place
    }

    /// The number of significant digits, from the low place to the
    /// highest nonzero digit.
    pub fn num_digits(&self) -> u32 {
        self.num_digits
    }

    pub fn num_fragments(&self) -> usize {
        self.fragments.len()
    }

    /// The fragment at `index`, least-significant first.
    pub fn fragment(&self, index: usize) -> Fragment {
        self.fragments[index]
    }

    /// The digit at the absolute place `place`, or zero outside the
    /// represented range.
    pub fn digit_at_place(&self, place: i32) -> Fragment {
        let relative = place - self.low_place;
        if relative < 0 || relative as u32 >= self.num_digits {
            return 0;
        }
        let relative = relative as u32;
        let fragment =
            self.fragments[(relative / R::DIGITS_PER_FRAGMENT) as usize];
        (fragment / R::fragment_power(relative % R::DIGITS_PER_FRAGMENT))
            % R::BASE
    }

    /// Deep copy, reporting allocation failure.
    pub fn try_clone(&self) -> Result<Self> {
        let mut fragments = Vec::new();
        fragments
            .try_reserve_exact(self.fragments.len())
            .map_err(|_| Error::OutOfMemory)?;
        fragments.extend_from_slice(&self.fragments);
        Ok(Self {
            low_place: self.low_place,
            num_digits: self.num_digits,
            fragments,
            phantom: PhantomData,
        })
    }

    /// The exact value as a `u64`, if it is an integer in range.
    pub fn to_u64(&self) -> Option<u64> {
        if self.is_zero() {
            return Some(0);
        }
        if self.low_place < 0 {
            return None;
        }
        let mut value: u64 = 0;
        for &fragment in self.fragments.iter().rev() {
            value = value
                .checked_mul(R::FRAGMENT_MODULO)?
                .checked_add(fragment as u64)?;
        }
        for _ in 0..self.low_place {
            value = value.checked_mul(R::BASE as u64)?;
        }
        Some(value)
    }

    /// Move the value by `offset` digit places. No-op on zero.
    pub fn inplace_shift(&mut self, offset: i32) -> Result<()> {
        if self.is_zero() {
            return Ok(());
        }
        let range = R::MAX_LOW_PLACE - R::MIN_LOW_PLACE;
        if offset < -range || offset > range {
            return Err(Error::IntegerOverflow);
        }
        let new_low_place = self.low_place + offset;
        if new_low_place < R::MIN_LOW_PLACE || new_low_place > R::MAX_LOW_PLACE
        {
            return Err(Error::IntegerOverflow);
        }
        self.low_place = new_low_place;
        Ok(())
    }

    /// Exact addition.
    pub fn inplace_add(&mut self, other: &Self) -> Result<()> {
        if other.is_zero() {
            return Ok(());
        }
        if self.is_zero() {
            *self = other.try_clone()?;
            return Ok(());
        }
        // The lower-place operand anchors the fragment grid.
        let sum = if self.low_place <= other.low_place {
            Self::add_sorted(self, other)?
        } else {
            Self::add_sorted(other, self)?
        };
        *self = sum;
        Ok(())
    }

    fn add_sorted(lower: &Self, higher: &Self) -> Result<Self> {
        debug_assert!(lower.low_place <= higher.low_place);
        let dpf = R::DIGITS_PER_FRAGMENT;

        let high_exclusive = (lower.low_place + lower.num_digits as i32)
            .max(higher.low_place + higher.num_digits as i32);
        // One extra digit of headroom for the final carry.
        let max_digits = (high_exclusive - lower.low_place) as u32 + 1;
        if max_digits > R::MAX_DIGITS {
            return Err(Error::IntegerOverflow);
        }
        let max_fragments = ((max_digits + dpf - 1) / dpf) as usize;
        let mut added = zeroed_fragments(max_fragments)?;

        // The higher operand's fragments get split and raised into the
        // lower operand's fragment grid.
        let high_distance = (higher.low_place - lower.low_place) as u32;
        let upshift_digits = high_distance % dpf;
        let (split_modulo, upshift) = if upshift_digits == 0 {
            (1, 1)
        } else {
            (
                R::fragment_power(dpf - upshift_digits),
                R::fragment_power(upshift_digits),
            )
        };

        let mut carry = false;
        let mut sliced_upper: Fragment = 0;
        let mut higher_index = 0usize;
        let mut higher_place = -(high_distance as i32);

        for (index, slot) in added.iter_mut().enumerate() {
            let mut sum: FragmentWithCarry = if carry { 1 } else { 0 };
            carry = false;

            if index < lower.fragments.len() {
                sum += lower.fragments[index] as FragmentWithCarry;
            }
            if higher_place + dpf as i32 > 0 {
                if upshift_digits == 0 {
                    if higher_index < higher.fragments.len() {
                        sum += higher.fragments[higher_index]
                            as FragmentWithCarry;
                    }
                } else {
                    sum += sliced_upper as FragmentWithCarry;
                    if higher_index < higher.fragments.len() {
                        let fragment = higher.fragments[higher_index];
                        sum += (fragment % split_modulo) as FragmentWithCarry
                            * upshift as FragmentWithCarry;
                        sliced_upper = fragment / split_modulo;
                    } else {
                        sliced_upper = 0;
                    }
                }
                higher_index += 1;
            }

            if sum >= R::FRAGMENT_MODULO {
                carry = true;
                sum -= R::FRAGMENT_MODULO;
            }
            *slot = sum as Fragment;
            higher_place += dpf as i32;
        }
        debug_assert!(!carry, "carry out of the headroom digit");

        Self::from_fragments(lower.low_place, added)
    }

    /// Exact subtraction. The other value must not exceed this one.
    pub fn inplace_sub(&mut self, other: &Self) -> Result<()> {
        if other.is_zero() {
            return Ok(());
        }
        if *self == *other {
            *self = Self::zero();
            return Ok(());
        }
        debug_assert!(*other < *self);

        let dpf = R::DIGITS_PER_FRAGMENT;
        let other_low_relative = other.low_place - self.low_place;

        // Fragments the result grid extends below this value's grid, and
        // the digit misalignment of the other value against that grid.
        let mut fragments_below = 0u32;
        let misalignment;
        if other_low_relative < 0 {
            let below_digits = (-other_low_relative) as u32;
            fragments_below = (below_digits + dpf - 1) / dpf;
            let partial = below_digits % dpf;
            misalignment = if partial == 0 { 0 } else { dpf - partial };
        } else {
            misalignment = other_low_relative as u32 % dpf;
        }

        let result_fragments =
            fragments_below as usize + self.fragments.len();
        let mut subtracted = zeroed_fragments(result_fragments)?;

        // Lay the other value out on the result grid.
        if misalignment != 0 {
            let split_modulo = R::fragment_power(dpf - misalignment);
            let raise = R::fragment_power(misalignment);
            let mut next_low: Fragment = 0;
            for (index, slot) in subtracted.iter_mut().enumerate() {
                let place_in_grid =
                    (index as i32 - fragments_below as i32) * dpf as i32;
                let place_in_other = place_in_grid - other_low_relative;
                let mut fill = next_low;
                next_low = 0;
                if place_in_other + dpf as i32 >= 0 {
                    let other_index =
                        ((place_in_other + dpf as i32) / dpf as i32) as usize;
                    if other_index < other.fragments.len() {
                        let fragment = other.fragments[other_index];
                        fill += (fragment % split_modulo) * raise;
                        next_low = fragment / split_modulo;
                    }
                }
                *slot = fill;
            }
        } else {
            let offset =
                other_low_relative / dpf as i32 + fragments_below as i32;
            for (index, &fragment) in other.fragments.iter().enumerate() {
                subtracted[(index as i32 + offset) as usize] = fragment;
            }
        }

        // Complement subtraction: this + invert(other) + 1, dropping the
        // top carry.
        let modulo_mask = (R::FRAGMENT_MODULO - 1) as Fragment;
        for slot in subtracted.iter_mut() {
            *slot = modulo_mask - *slot;
        }

        let mut carry = true;
        for slot in subtracted.iter_mut().take(fragments_below as usize) {
            if !carry {
                break;
            }
            if *slot == modulo_mask {
                *slot = 0;
            } else {
                *slot += 1;
                carry = false;
            }
        }
        for (this_index, &fragment) in self.fragments.iter().enumerate() {
            let result_index = this_index + fragments_below as usize;
            let mut sum = subtracted[result_index] as FragmentWithCarry
                + fragment as FragmentWithCarry;
            if carry {
                sum += 1;
            }
            carry = sum >= R::FRAGMENT_MODULO;
            if carry {
                sum -= R::FRAGMENT_MODULO;
            }
            subtracted[result_index] = sum as Fragment;
        }

        let low_place = self.low_place - (fragments_below * dpf) as i32;
        *self = Self::from_fragments(low_place, subtracted)?;
        Ok(())
    }

    /// Exact multiplication.
    pub fn inplace_mul(&mut self, other: &Self) -> Result<()> {
        if self.is_zero() {
            return Ok(());
        }
        if other.is_zero() {
            *self = Self::zero();
            return Ok(());
        }

        // Values 1 and 2 reduce to a shift, or a self-add and a shift.
        // The conversion engine leans on these paths heavily.
        if self.num_digits == 1 {
            let fragment = self.fragments[0];
            if fragment == 1 || fragment == 2 {
                let place = self.low_place;
                let mut product = other.try_clone()?;
                if fragment == 2 {
                    let copy = product.try_clone()?;
                    product.inplace_add(&copy)?;
                }
                product.inplace_shift(place)?;
                *self = product;
                return Ok(());
            }
        }
        if other.num_digits == 1 {
            let fragment = other.fragments[0];
            if fragment == 1 || fragment == 2 {
                if fragment == 2 {
                    let copy = self.try_clone()?;
                    self.inplace_add(&copy)?;
                }
                self.inplace_shift(other.low_place)?;
                return Ok(());
            }
        }

        let dpf = R::DIGITS_PER_FRAGMENT;
        let max_digits = self.num_digits + other.num_digits + 1;
        if max_digits > R::MAX_DIGITS {
            return Err(Error::IntegerOverflow);
        }
        let max_fragments = ((max_digits + dpf - 1) / dpf) as usize;
        let mut product = zeroed_fragments(max_fragments)?;

        // Schoolbook multiply with a running carry per row.
        for (other_index, &other_fragment) in
            other.fragments.iter().enumerate()
        {
            let mut carry: FragmentWithCarry = 0;
            for (this_index, &this_fragment) in
                self.fragments.iter().enumerate()
            {
                let result_index = other_index + this_index;
                if result_index >= product.len() {
                    break;
                }
                let sum = product[result_index] as FragmentWithCarry
                    + this_fragment as FragmentWithCarry
                        * other_fragment as FragmentWithCarry
                    + carry;
                carry = sum / R::FRAGMENT_MODULO;
                product[result_index] = (sum % R::FRAGMENT_MODULO) as Fragment;
            }
            let mut result_index = other_index + self.fragments.len();
            while carry != 0 && result_index < product.len() {
                let sum = product[result_index] as FragmentWithCarry + carry;
                carry = sum / R::FRAGMENT_MODULO;
                product[result_index] = (sum % R::FRAGMENT_MODULO) as Fragment;
                result_index += 1;
            }
            debug_assert!(carry == 0, "carry out of the product digits");
        }

        let low_place = self.low_place + other.low_place;
        *self = Self::from_fragments(low_place, product)?;
        Ok(())
    }

    /// Strips zero low fragments, divides trailing zero digits out of the
    /// lowest nonzero fragment (redistributing the remainders across
    /// fragments), strips zero high fragments, and recomputes the digit
    /// count. Returns the number of low digits removed and the final
    /// significant digit count.
    fn normalize_fragments(fragments: &mut Vec<Fragment>) -> (u32, u32) {
        let dpf = R::DIGITS_PER_FRAGMENT;

        let mut dropped_fragments = 0usize;
        while dropped_fragments < fragments.len()
            && fragments[dropped_fragments] == 0
        {
            dropped_fragments += 1;
        }
        if dropped_fragments == fragments.len() {
            fragments.clear();
            return (0, 0);
        }

        let dropped_digits =
            R::trailing_zero_digits(fragments[dropped_fragments]);
        if dropped_digits != 0 {
            let split_modulo = R::fragment_power(dropped_digits);
            let raise = R::fragment_power(dpf - dropped_digits);
            fragments[dropped_fragments] /= split_modulo;
            for index in dropped_fragments + 1..fragments.len() {
                let fragment = fragments[index];
                fragments[index - 1] += (fragment % split_modulo) * raise;
                fragments[index] = fragment / split_modulo;
            }
        }

        let mut keep = fragments.len();
        while fragments[keep - 1] == 0 {
            keep -= 1;
        }
        keep -= dropped_fragments;
        if dropped_fragments > 0 {
            for index in 0..keep {
                fragments[index] = fragments[dropped_fragments + index];
            }
        }
        fragments.truncate(keep);

        let top = fragments[keep - 1];
        let mut top_digits = 1u32;
        while top_digits < dpf && top >= R::fragment_power(top_digits) {
            top_digits += 1;
        }

        let removed = dropped_fragments as u32 * dpf + dropped_digits;
        (removed, (keep as u32 - 1) * dpf + top_digits)
    }
}

// Manual comparisons: the phantom radix parameter carries no bounds.
impl<R: Radix> PartialEq for BigFloat<R> {
    fn eq(&self, other: &Self) -> bool {
        self.low_place == other.low_place
            && self.num_digits == other.num_digits
            && self.fragments == other.fragments
    }
}

impl<R: Radix> Eq for BigFloat<R> {}

impl<R: Radix> PartialOrd for BigFloat<R> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<R: Radix> Ord for BigFloat<R> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }

        // A larger extent wins outright; with equal extents, walk the
        // aligned digits most-significant first.
        let self_extent = self.low_place + self.num_digits as i32;
        let other_extent = other.low_place + other.num_digits as i32;
        if self_extent != other_extent {
            return self_extent.cmp(&other_extent);
        }

        let floor = self.low_place.min(other.low_place);
        let mut place = self_extent - 1;
        while place >= floor {
            let self_digit = self.digit_at_place(place);
            let other_digit = other.digit_at_place(place);
            if self_digit != other_digit {
                return self_digit.cmp(&other_digit);
            }
            place -= 1;
        }
        Ordering::Equal
    }
}

impl<R: Radix> Display for BigFloat<R> {
    /// Prints the significant digits most-significant first, with an
    /// `e<place>` suffix when the low place is nonzero.
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        for relative in (0..self.num_digits).rev() {
            let digit = self.digit_at_place(self.low_place + relative as i32);
            f.write_fmt(format_args!("{}", digit))?;
        }
        if self.low_place != 0 {
            f.write_fmt(format_args!("e{}", self.low_place))?;
        }
        Ok(())
    }
}

/// A signed base-2 magnitude: a thin sign wrapper that delegates all
/// invariants to the unsigned value.
#[derive(Debug, PartialEq, Eq)]
pub struct BigSignedBinFloat {
    magnitude: BigBinFloat,
    negative: bool,
}

impl BigSignedBinFloat {
    pub fn new(magnitude: BigBinFloat, negative: bool) -> Self {
        Self {
            magnitude,
            negative,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn magnitude(&self) -> &BigBinFloat {
        &self.magnitude
    }

    pub fn try_clone(&self) -> Result<Self> {
        Ok(Self {
            magnitude: self.magnitude.try_clone()?,
            negative: self.negative,
        })
    }
}

#[cfg(test)]
fn dec(value: u64) -> BigDecFloat {
    BigDecFloat::from_u64(value).unwrap()
}

#[cfg(test)]
fn bin(value: u64) -> BigBinFloat {
    BigBinFloat::from_u64(value).unwrap()
}

#[cfg(test)]
fn assert_normalized<R: Radix>(value: &BigFloat<R>) {
    if value.is_zero() {
        assert_eq!(value.low_place(), 0);
        assert_eq!(value.num_fragments(), 0);
        return;
    }
    assert_ne!(value.fragment(value.num_fragments() - 1), 0);
    assert_ne!(value.digit_at_place(value.low_place()), 0);
    let top = value.low_place() + value.num_digits() as i32 - 1;
    assert_ne!(value.digit_at_place(top), 0);
}

#[test]
fn test_from_fragment() {
    let value = BigDecFloat::from_fragment(93_456_000).unwrap();
    assert_eq!(value.low_place(), 3);
    assert_eq!(value.num_digits(), 5);
    assert_eq!(value.fragment(0), 93_456);
    assert_eq!(value.to_u64(), Some(93_456_000));
    assert_normalized(&value);

    let value = BigBinFloat::from_fragment(0b1011_0100).unwrap();
    assert_eq!(value.low_place(), 2);
    assert_eq!(value.num_digits(), 6);
    assert_eq!(value.to_u64(), Some(0b1011_0100));

    let zero = BigDecFloat::from_fragment(0).unwrap();
    assert!(zero.is_zero());
    assert_normalized(&zero);
}

#[test]
fn test_from_u64_round_trip() {
    for value in [
        0u64,
        1,
        7,
        99_999_999,
        100_000_000,
        123_456_781_234_567_890,
        u64::MAX,
    ] {
        assert_eq!(dec(value).to_u64(), Some(value));
        assert_eq!(bin(value).to_u64(), Some(value));
        assert_normalized(&dec(value));
        assert_normalized(&bin(value));
    }
}

#[test]
fn test_digit_at_place() {
    let mut value = dec(120_034);
    value.inplace_shift(-2).unwrap();
    // 1200.34
    assert_eq!(value.digit_at_place(3), 1);
    assert_eq!(value.digit_at_place(2), 2);
    assert_eq!(value.digit_at_place(1), 0);
    assert_eq!(value.digit_at_place(0), 0);
    assert_eq!(value.digit_at_place(-1), 3);
    assert_eq!(value.digit_at_place(-2), 4);
    assert_eq!(value.digit_at_place(4), 0);
    assert_eq!(value.digit_at_place(-3), 0);
}

#[test]
fn test_shift_bounds() {
    let mut value = dec(1);
    assert_eq!(value.inplace_shift(0x10001), Err(Error::IntegerOverflow));
    value.inplace_shift(0x10000).unwrap();
    assert_eq!(value.inplace_shift(1), Err(Error::IntegerOverflow));
    value.inplace_shift(-0x20000).unwrap();
    assert_eq!(value.low_place(), -0x10000);

    let mut zero = BigDecFloat::zero();
    zero.inplace_shift(0x7fff_ffff).unwrap();
    assert!(zero.is_zero());
}

#[test]
fn test_add_carry() {
    let mut value = dec(99_999_999);
    value.inplace_add(&dec(1)).unwrap();
    assert_eq!(value.to_u64(), Some(100_000_000));
    assert_eq!(value.low_place(), 8);
    assert_eq!(value.num_digits(), 1);
    assert_normalized(&value);

    let mut value = bin(u32::MAX as u64);
    value.inplace_add(&bin(1)).unwrap();
    assert_eq!(value.to_u64(), Some(1 << 32));
    assert_normalized(&value);
}

#[test]
fn test_add_misaligned() {
    // 12345678 + 0.005
    let mut value = dec(12_345_678);
    let mut small = dec(5);
    small.inplace_shift(-3).unwrap();
    value.inplace_add(&small).unwrap();
    assert_eq!(value.low_place(), -3);
    assert_eq!(value.num_digits(), 11);
    let mut expected = dec(12_345_678_005);
    expected.inplace_shift(-3).unwrap();
    assert_eq!(value, expected);
    assert_normalized(&value);
}

#[test]
fn test_add_random() {
    use crate::utils::Lfsr;
    let mut lfsr = Lfsr::new();
    for _ in 0..200 {
        let a = lfsr.get64() >> 2;
        let b = lfsr.get64() >> 2;
        let mut sum = dec(a);
        sum.inplace_add(&dec(b)).unwrap();
        assert_eq!(sum.to_u64(), Some(a + b));
        assert_normalized(&sum);

        let mut sum = bin(a);
        sum.inplace_add(&bin(b)).unwrap();
        assert_eq!(sum.to_u64(), Some(a + b));
        assert_normalized(&sum);
    }
}

#[test]
fn test_sub_borrow() {
    let mut value = dec(100_000_000);
    value.inplace_sub(&dec(1)).unwrap();
    assert_eq!(value.to_u64(), Some(99_999_999));
    assert_normalized(&value);
}

#[test]
fn test_sub_misaligned() {
    // 1 - 0.0001
    let mut value = dec(1);
    let mut small = dec(1);
    small.inplace_shift(-4).unwrap();
    value.inplace_sub(&small).unwrap();
    let mut expected = dec(9_999);
    expected.inplace_shift(-4).unwrap();
    assert_eq!(value, expected);
    assert_normalized(&value);
}

#[test]
fn test_sub_to_zero() {
    let mut value = dec(12_345);
    let copy = value.try_clone().unwrap();
    value.inplace_sub(&copy).unwrap();
    assert!(value.is_zero());
    assert_normalized(&value);
}

#[test]
fn test_sub_random() {
    use crate::utils::Lfsr;
    let mut lfsr = Lfsr::new();
    for _ in 0..200 {
        let a = lfsr.get64();
        let b = lfsr.get64();
        let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
        let mut difference = dec(hi);
        difference.inplace_sub(&dec(lo)).unwrap();
        assert_eq!(difference.to_u64(), Some(hi - lo));

        let mut difference = bin(hi);
        difference.inplace_sub(&bin(lo)).unwrap();
        assert_eq!(difference.to_u64(), Some(hi - lo));
    }
}

#[test]
fn test_mul_special_paths() {
    let mut value = dec(12_345);
    value.inplace_mul(&dec(1)).unwrap();
    assert_eq!(value.to_u64(), Some(12_345));

    let mut value = dec(12_345);
    value.inplace_mul(&dec(2)).unwrap();
    assert_eq!(value.to_u64(), Some(24_690));

    let mut value = dec(2);
    value.inplace_mul(&dec(12_345)).unwrap();
    assert_eq!(value.to_u64(), Some(24_690));

    // 10 multiplies via the shift path with a place adjustment.
    let mut value = dec(12_345);
    value.inplace_mul(&dec(10)).unwrap();
    assert_eq!(value.to_u64(), Some(123_450));

    let mut value = dec(12_345);
    value.inplace_mul(&BigDecFloat::zero()).unwrap();
    assert!(value.is_zero());

    let mut value = BigDecFloat::zero();
    value.inplace_mul(&dec(12_345)).unwrap();
    assert!(value.is_zero());
}

#[test]
fn test_mul_random() {
    use crate::utils::Lfsr;
    let mut lfsr = Lfsr::new();
    for _ in 0..200 {
        let a = lfsr.get() as u64;
        let b = lfsr.get() as u64;
        let mut product = dec(a);
        product.inplace_mul(&dec(b)).unwrap();
        assert_eq!(product.to_u64(), Some(a * b));
        assert_normalized(&product);

        let mut product = bin(a);
        product.inplace_mul(&bin(b)).unwrap();
        assert_eq!(product.to_u64(), Some(a * b));
        assert_normalized(&product);
    }
}

#[test]
fn test_mul_places() {
    // 0.25 * 0.5 in binary: (1 << -2) * (1 << -1) == 1 << -3.
    let mut quarter = bin(1);
    quarter.inplace_shift(-2).unwrap();
    let mut half = bin(1);
    half.inplace_shift(-1).unwrap();
    quarter.inplace_mul(&half).unwrap();
    let mut expected = bin(1);
    expected.inplace_shift(-3).unwrap();
    assert_eq!(quarter, expected);
}

#[test]
fn test_mul_multi_fragment() {
    // (10^8 + 1)^2 = 10^16 + 2*10^8 + 1 crosses three fragments.
    let mut value = dec(100_000_001);
    let copy = value.try_clone().unwrap();
    value.inplace_mul(&copy).unwrap();
    assert_eq!(value.to_u64(), Some(10_000_000_200_000_001));
    assert_normalized(&value);
}

#[test]
fn test_arithmetic_identities() {
    use crate::utils::Lfsr;
    let mut lfsr = Lfsr::new();
    for _ in 0..100 {
        let a = (lfsr.get64() >> 1) | 1;
        let b = (lfsr.get64() >> 1) | 1;

        // a + b - b == a
        let mut value = dec(a);
        value.inplace_add(&dec(b)).unwrap();
        value.inplace_sub(&dec(b)).unwrap();
        assert_eq!(value, dec(a));

        // a * 1 == a
        let mut value = dec(a);
        value.inplace_mul(&dec(1)).unwrap();
        assert_eq!(value, dec(a));

        // a + a == a * 2
        let mut left = dec(a);
        let copy = left.try_clone().unwrap();
        left.inplace_add(&copy).unwrap();
        let mut right = dec(a);
        right.inplace_mul(&dec(2)).unwrap();
        assert_eq!(left, right);
    }
}

#[test]
fn test_ordering() {
    use crate::utils::Lfsr;

    assert!(BigDecFloat::zero() < dec(1));
    assert!(dec(1) > BigDecFloat::zero());
    assert_eq!(BigDecFloat::zero().cmp(&BigDecFloat::zero()), Ordering::Equal);

    // Zero against a sub-one value whose extent is also zero.
    let mut half = dec(5);
    half.inplace_shift(-1).unwrap();
    assert!(BigDecFloat::zero() < half);
    assert!(half > BigDecFloat::zero());

    let mut lfsr = Lfsr::new();
    for _ in 0..300 {
        let a = lfsr.get() as u128;
        let b = lfsr.get() as u128;
        let shift_a = (lfsr.get() % 11) as i32 - 5;
        let shift_b = (lfsr.get() % 11) as i32 - 5;

        let mut value_a = dec(a as u64);
        value_a.inplace_shift(shift_a).unwrap();
        let mut value_b = dec(b as u64);
        value_b.inplace_shift(shift_b).unwrap();

        // Compare against exact u128 arithmetic on a common scale.
        let common = shift_a.min(shift_b);
        let scaled_a = a * 10u128.pow((shift_a - common) as u32);
        let scaled_b = b * 10u128.pow((shift_b - common) as u32);
        assert_eq!(value_a.cmp(&value_b), scaled_a.cmp(&scaled_b));
    }
}

#[test]
fn test_equality_requires_identical_parts() {
    let mut a = dec(1_500);
    a.inplace_shift(-3).unwrap();
    let mut b = dec(15);
    b.inplace_shift(-1).unwrap();
    // Both are 1.5 and normalize to the same representation.
    assert_eq!(a, b);
    assert_eq!(a.cmp(&b), Ordering::Equal);
    assert_ne!(a, dec(15));
    assert_ne!(a, BigDecFloat::zero());
}

#[test]
fn test_try_clone_independent() {
    let mut value = dec(777);
    let clone = value.try_clone().unwrap();
    value.inplace_add(&dec(1)).unwrap();
    assert_eq!(clone.to_u64(), Some(777));
    assert_eq!(value.to_u64(), Some(778));
}

#[cfg(feature = "std")]
#[test]
fn test_display() {
    use std::format;
    assert_eq!(format!("{}", BigDecFloat::zero()), "0");
    assert_eq!(format!("{}", dec(123_456_789)), "123456789");
    assert_eq!(format!("{}", dec(93_456_000)), "93456e3");
    let mut value = dec(15);
    value.inplace_shift(-1).unwrap();
    assert_eq!(format!("{}", value), "15e-1");
    assert_eq!(format!("{}", bin(6)), "11e1");
}

#[test]
fn test_signed_wrapper() {
    let value = BigSignedBinFloat::new(bin(42), true);
    assert!(value.is_negative());
    assert_eq!(value.magnitude().to_u64(), Some(42));
    let clone = value.try_clone().unwrap();
    assert_eq!(clone, value);
}
