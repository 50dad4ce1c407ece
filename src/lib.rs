//! Exact, correctly-rounded conversion between decimal text and binary
//! floating-point formats, built on an arbitrary-precision fixed-radix
//! float.
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod bigfloat;
mod convert;
mod error;
mod floatspec;
mod parse;
mod radix;
mod round;
mod utils;

pub use self::bigfloat::{BigBinFloat, BigDecFloat, BigFloat, BigSignedBinFloat};
pub use self::convert::{
    bin_to_dec, bin_to_dec_with_spec, dec_to_bin, dec_to_bin_integer,
};
pub use self::error::{Error, Result};
pub use self::floatspec::FloatSpec;
pub use self::parse::{parse_decimal, parse_digits};
pub use self::radix::{Binary, Decimal, Fragment, FragmentWithCarry, Radix};
pub use self::round::{positive_pow, round_to_spec};
