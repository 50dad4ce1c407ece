//! This file contains the error type shared by all of the arithmetic,
//! conversion and parsing routines.

/// The failure modes of the numeric core. Every fallible operation in the
/// crate reports one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The limb buffer could not be grown.
    OutOfMemory,
    /// A place or digit-count bound was exceeded. The bounds are generous,
    /// so this signals pathological input.
    IntegerOverflow,
    /// The input text violates the decimal numeral grammar.
    MalformedNumber,
    /// A recognized but unsupported input shape, such as scientific
    /// notation.
    NotYetImplemented,
    /// An internal invariant was violated. Not reachable from valid input.
    InternalError,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::OutOfMemory => f.write_str("out of memory"),
            Error::IntegerOverflow => {
                f.write_str("place or digit count out of range")
            }
            Error::MalformedNumber => f.write_str("malformed decimal number"),
            Error::NotYetImplemented => {
                f.write_str("number shape not yet implemented")
            }
            Error::InternalError => f.write_str("internal invariant violated"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// The result type used across the crate.
pub type Result<T> = core::result::Result<T, Error>;
