//! Failure types for validation and slicing.
//!
//! Validation failures carry exactly one [`ErrorKind`]; the taxonomy is
//! exhaustive, no other validation outcome exists. Bound failures on slicing
//! operations are a separate [`RangeError`], independent of the codec
//! taxonomy, and [`LengthError`] reports content that would exceed the
//! maximum representable size.

/// The ways a code unit sequence can fail validation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// A multi-unit sequence is cut short by the end of the buffer.
	#[error("incomplete code unit sequence")]
	IncompleteSequence,

	/// A unit that is well-formed on its own appears where the sequence
	/// structure does not allow it (e.g. a UTF-8 continuation byte in lead
	/// position, or a lone UTF-16 surrogate).
	#[error("unexpected code unit")]
	UnexpectedCodeUnit,

	/// A unit that can never appear in well-formed content (0xF8..=0xFF in
	/// UTF-8).
	#[error("invalid code unit")]
	InvalidCodeUnit,

	/// A multi-byte sequence encoding a value representable in fewer bytes.
	#[error("code point with overlong encoding")]
	OverlongEncoding,

	/// A well-formed sequence encoding a surrogate or a value above U+10FFFF.
	#[error("invalid code point")]
	InvalidCodePoint,
}

/// Validation failure raised while constructing a string or view from raw
/// code units.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at code unit offset {offset}")]
pub struct ParseError {
	pub kind: ErrorKind,
	/// Offset, in code units, of the code point that failed validation.
	pub offset: usize,
}

/// A cursor pair handed to a slicing operation was inverted, or did not come
/// from the string or view being sliced.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cursor out of range")]
pub struct RangeError;

/// Requested content would exceed the maximum representable size.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("content exceeds the maximum representable size")]
pub struct LengthError;

/// Any failure this crate can produce.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
	#[error(transparent)]
	Parse(#[from] ParseError),

	#[error(transparent)]
	Range(#[from] RangeError),

	#[error(transparent)]
	Length(#[from] LengthError),
}

pub type Result<T> = std::result::Result<T, Error>;
