//! This file contains the description of a fixed-width binary
//! floating-point layout. The description only drives rounding decisions;
//! it never packs bits.

/// The layout of a binary floating-point format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatSpec {
    exponent_bits: u16,
    mantissa_bits: u16,
    exponent_of_one: i16,
    supports_denormals: bool,
    supports_nans: bool,
}

impl FloatSpec {
    /// IEEE 754 single precision.
    pub const SINGLE: FloatSpec = FloatSpec::new(8, 23, 127, true, true);
    /// IEEE 754 double precision.
    pub const DOUBLE: FloatSpec = FloatSpec::new(11, 52, 1023, true, true);

    pub const fn new(
        exponent_bits: u16,
        mantissa_bits: u16,
        exponent_of_one: i16,
        supports_denormals: bool,
        supports_nans: bool,
    ) -> FloatSpec {
        FloatSpec {
            exponent_bits,
            mantissa_bits,
            exponent_of_one,
            supports_denormals,
            supports_nans,
        }
    }

    pub fn exponent_bits(&self) -> u16 {
        self.exponent_bits
    }

    /// Number of stored mantissa bits, excluding the implicit leading bit.
    pub fn mantissa_bits(&self) -> u16 {
        self.mantissa_bits
    }

    /// The bias added to a value's highest bit place to obtain the coded
    /// exponent.
    pub fn exponent_of_one(&self) -> i16 {
        self.exponent_of_one
    }

    pub fn supports_denormals(&self) -> bool {
        self.supports_denormals
    }

    pub fn supports_nans(&self) -> bool {
        self.supports_nans
    }
}

#[test]
fn test_format_constants() {
    assert_eq!(FloatSpec::SINGLE.exponent_bits(), 8);
    assert_eq!(FloatSpec::SINGLE.mantissa_bits(), 23);
    assert_eq!(FloatSpec::SINGLE.exponent_of_one(), 127);
    assert!(FloatSpec::SINGLE.supports_denormals());
    assert!(FloatSpec::SINGLE.supports_nans());
    assert_eq!(FloatSpec::DOUBLE.mantissa_bits(), 52);
    assert_eq!(FloatSpec::DOUBLE.exponent_of_one(), 1023);
}
