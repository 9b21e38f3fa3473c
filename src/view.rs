//! Borrowed, validated windows over caller-owned code units.

use crate::cursor::{CodePoints, Cursor};
use crate::encoding::{self, Encoding, Utf8};
use crate::error::{ParseError, RangeError};
use crate::CodePoint;

use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};

/// An immutable window over externally owned, already-validated code units.
///
/// Construction validates eagerly and counts code points in the same pass, so
/// every later query is O(1) and nothing downstream re-validates. The view
/// does not own its units; keeping the source buffer alive is the caller's
/// business, which the borrow checker enforces here.
pub struct UniView<'a, E: Encoding> {
	units: &'a [E::CodeUnit],
	length: usize,
}

impl<'a, E: Encoding> UniView<'a, E> {
	/// Validates `units` and wraps them, or reports the first invalid
	/// position.
	pub fn new(units: &'a [E::CodeUnit]) -> Result<Self, ParseError> {
		let length = encoding::validate_string::<E>(units)?;
		Ok(Self { units, length })
	}

	/// Wraps units that are already known to be valid, with their code point
	/// count.
	pub(crate) fn from_validated(units: &'a [E::CodeUnit], length: usize) -> Self {
		debug_assert_eq!(encoding::count_code_points::<E>(units), length);
		Self { units, length }
	}

	pub fn as_units(&self) -> &'a [E::CodeUnit] {
		self.units
	}

	/// Size of the window in code units.
	pub fn size(&self) -> usize {
		self.units.len()
	}

	/// Number of code points in the window.
	pub fn length(&self) -> usize {
		self.length
	}

	pub fn is_empty(&self) -> bool {
		self.units.is_empty()
	}

	pub fn code_points(&self) -> CodePoints<'a, E> {
		CodePoints::new(self.units)
	}

	/// Cursor at the first code point.
	pub fn begin(&self) -> Cursor<'a, E> {
		Cursor::new(self.units, 0)
	}

	/// Cursor one past the last code point.
	pub fn end(&self) -> Cursor<'a, E> {
		Cursor::new(self.units, self.units.len())
	}

	/// The first code point, unless the view is empty.
	pub fn front(&self) -> Option<CodePoint> {
		self.code_points().next()
	}

	/// The last code point, unless the view is empty.
	pub fn back(&self) -> Option<CodePoint> {
		self.code_points().next_back()
	}

	/// The sub-window between two cursors of this view.
	///
	/// No re-validation: a sub-window of a validated window is valid. Fails if
	/// either cursor was not minted from this window or the pair is inverted.
	pub fn substring(
		&self,
		begin: Cursor<'a, E>,
		end: Cursor<'a, E>,
	) -> Result<Self, RangeError> {
		let (begin, end) = self.bounds(begin, end)?;
		let dropped = encoding::count_code_points::<E>(&self.units[..begin])
			+ encoding::count_code_points::<E>(&self.units[end..]);

		Ok(Self { units: &self.units[begin..end], length: self.length - dropped })
	}

	/// Narrows the window to start at `new_begin`.
	pub fn remove_prefix(&self, new_begin: Cursor<'a, E>) -> Result<Self, RangeError> {
		self.substring(new_begin, self.end())
	}

	/// Narrows the window to end at `new_end`.
	pub fn remove_suffix(&self, new_end: Cursor<'a, E>) -> Result<Self, RangeError> {
		self.substring(self.begin(), new_end)
	}

	/// Resolves a cursor pair against this window.
	fn bounds(
		&self,
		begin: Cursor<'a, E>,
		end: Cursor<'a, E>,
	) -> Result<(usize, usize), RangeError> {
		let begin = begin.offset_in(self.units).ok_or(RangeError)?;
		let end = end.offset_in(self.units).ok_or(RangeError)?;

		if begin <= end {
			Ok((begin, end))
		} else {
			Err(RangeError)
		}
	}
}

impl<'a> UniView<'a, Utf8> {
	/// Views a `str` without re-validation; `str` is valid UTF-8 by
	/// construction.
	pub fn from_str(source: &'a str) -> Self {
		Self { units: source.as_bytes(), length: source.chars().count() }
	}

	pub fn as_str(&self) -> &'a str {
		// SAFETY: the window invariant guarantees well-formed UTF-8, which is
		// exactly `str`'s invariant.
		unsafe { std::str::from_utf8_unchecked(self.units) }
	}
}

impl<E: Encoding> Clone for UniView<'_, E> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<E: Encoding> Copy for UniView<'_, E> {}

impl<E: Encoding> Default for UniView<'_, E> {
	fn default() -> Self {
		Self { units: &[], length: 0 }
	}
}

impl<E: Encoding> PartialEq for UniView<'_, E> {
	fn eq(&self, other: &Self) -> bool {
		self.units == other.units
	}
}

impl<E: Encoding> Eq for UniView<'_, E> {}

impl<E: Encoding> Hash for UniView<'_, E> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.units.hash(state);
	}
}

impl<E: Encoding> Display for UniView<'_, E> {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		use std::fmt::Write;

		for cp in self.code_points() {
			f.write_char(cp.to_char().unwrap_or(char::REPLACEMENT_CHARACTER))?;
		}

		Ok(())
	}
}

impl<E: Encoding> Debug for UniView<'_, E> {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		f.write_str("\"")?;

		for cp in self.code_points() {
			let chr = cp.to_char().unwrap_or(char::REPLACEMENT_CHARACTER);
			write!(f, "{}", chr.escape_debug())?;
		}

		f.write_str("\"")
	}
}
