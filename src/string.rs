//! The owning string: inline for short content, shared heap block otherwise.

use crate::cursor::{CodePoints, Cursor};
use crate::encoding::{self, CodeUnit, Encoding, Utf8};
use crate::error::{LengthError, ParseError, RangeError};
use crate::view::UniView;
use crate::CodePoint;

use once_cell::sync::OnceCell;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Inline buffer size of the small representation, in code units.
///
/// With the `null-terminators` feature one slot is reserved for the trailing
/// zero unit, so the inline content capacity is one unit less.
pub const INLINE_CAPACITY: usize = 15;

cfg_if! {
	if #[cfg(feature = "null-terminators")] {
		const TERMINATOR_UNITS: usize = 1;
	} else {
		const TERMINATOR_UNITS: usize = 0;
	}
}

/// Largest content size kept inline.
const SMALL_MAX: usize = INLINE_CAPACITY - TERMINATOR_UNITS;

const_assert!(INLINE_CAPACITY <= u8::MAX as usize);
const_assert!(SMALL_MAX > 0);

/// An owning, validated Unicode string.
///
/// Content up to the inline capacity lives directly in the handle; anything
/// longer lives in a shared, reference-counted heap block that clones and
/// substrings alias instead of copying. Block content never changes once
/// allocated: narrowing either adjusts the visible window over the shared
/// block or materializes fresh storage, so distinct handles can always be
/// used from different threads.
///
/// `size` counts code units, `length` counts code points.
pub struct UniString<E: Encoding> {
	repr: Repr<E>,
}

enum Repr<E: Encoding> {
	Small {
		len: u8,
		buf: [E::CodeUnit; INLINE_CAPACITY],
	},
	Large {
		block: Arc<[E::CodeUnit]>,
		/// Visible window bounds, in unit offsets into the block.
		start: usize,
		end: usize,
		/// Code point count of the window, computed at most once.
		length: OnceCell<usize>,
	},
}

impl<E: Encoding> UniString<E> {
	/// The empty string. Always inline.
	pub fn new() -> Self {
		Self { repr: Repr::Small { len: 0, buf: [E::CodeUnit::ZERO; INLINE_CAPACITY] } }
	}

	/// Validates `units` and copies them into a new string.
	pub fn from_units(units: &[E::CodeUnit]) -> Result<Self, ParseError> {
		let length = encoding::validate_string::<E>(units)?;
		Ok(Self::from_validated_units(units, length))
	}

	/// Copies a same-encoding view; its content is already validated.
	pub fn from_view(view: UniView<'_, E>) -> Self {
		Self::from_validated_units(view.as_units(), view.length())
	}

	/// Re-encodes a view of a foreign encoding.
	///
	/// Content validity cannot fail, since the source was validated in its own
	/// encoding. Fails only if the transcoded size would exceed
	/// [`max_size`](Self::max_size). Two passes: size everything first, then
	/// allocate once and encode.
	pub fn transcode_from<F: Encoding>(view: UniView<'_, F>) -> Result<Self, LengthError> {
		let mut size = 0usize;

		for cp in view.code_points() {
			size = size
				.checked_add(E::encoded_size(cp))
				.filter(|&size| size <= Self::max_size())
				.ok_or(LengthError)?;
		}

		if size <= SMALL_MAX {
			let mut buf = [E::CodeUnit::ZERO; INLINE_CAPACITY];
			let mut pos = 0;

			for cp in view.code_points() {
				pos += E::encode(cp, &mut buf[pos..]);
			}

			debug_assert_eq!(pos, size);
			Ok(Self { repr: Repr::Small { len: size as u8, buf } })
		} else {
			let mut units = vec![E::CodeUnit::ZERO; size + TERMINATOR_UNITS];
			let mut pos = 0;

			for cp in view.code_points() {
				pos += E::encode(cp, &mut units[pos..]);
			}

			debug_assert_eq!(pos, size);

			let length = OnceCell::new();
			let _ = length.set(view.length());

			Ok(Self { repr: Repr::Large { block: units.into(), start: 0, end: size, length } })
		}
	}

	pub(crate) fn from_validated_units(units: &[E::CodeUnit], length: usize) -> Self {
		if units.len() <= SMALL_MAX {
			let mut buf = [E::CodeUnit::ZERO; INLINE_CAPACITY];
			buf[..units.len()].copy_from_slice(units);

			Self { repr: Repr::Small { len: units.len() as u8, buf } }
		} else {
			let mut vec = Vec::with_capacity(units.len() + TERMINATOR_UNITS);
			vec.extend_from_slice(units);
			#[cfg(feature = "null-terminators")]
			vec.push(E::CodeUnit::ZERO);

			let cell = OnceCell::new();
			let _ = cell.set(length);

			Self { repr: Repr::Large { block: vec.into(), start: 0, end: units.len(), length: cell } }
		}
	}

	/// The visible content as raw code units.
	pub fn as_units(&self) -> &[E::CodeUnit] {
		match &self.repr {
			Repr::Small { len, buf } => &buf[..*len as usize],
			Repr::Large { block, start, end, .. } => &block[*start..*end],
		}
	}

	/// A borrowed view of the whole string.
	pub fn as_view(&self) -> UniView<'_, E> {
		UniView::from_validated(self.as_units(), self.length())
	}

	/// Size of the content in code units.
	pub fn size(&self) -> usize {
		match &self.repr {
			Repr::Small { len, .. } => *len as usize,
			Repr::Large { start, end, .. } => end - start,
		}
	}

	/// Number of code points.
	///
	/// Inline content is scanned on each call; a heap block's window is
	/// scanned at most once per handle and cached.
	pub fn length(&self) -> usize {
		match &self.repr {
			Repr::Small { len, buf } => encoding::count_code_points::<E>(&buf[..*len as usize]),
			Repr::Large { block, start, end, length } => {
				*length.get_or_init(|| encoding::count_code_points::<E>(&block[*start..*end]))
			}
		}
	}

	pub fn is_empty(&self) -> bool {
		self.size() == 0
	}

	/// Whether the content is stored inline rather than in a heap block.
	pub fn is_inline(&self) -> bool {
		matches!(self.repr, Repr::Small { .. })
	}

	/// Largest representable content size, in code units.
	pub fn max_size() -> usize {
		usize::MAX / std::mem::size_of::<E::CodeUnit>()
	}

	pub fn code_points(&self) -> CodePoints<'_, E> {
		CodePoints::new(self.as_units())
	}

	/// Cursor at the first code point.
	pub fn begin(&self) -> Cursor<'_, E> {
		Cursor::new(self.as_units(), 0)
	}

	/// Cursor one past the last code point.
	pub fn end(&self) -> Cursor<'_, E> {
		let units = self.as_units();
		Cursor::new(units, units.len())
	}

	/// The first code point, unless the string is empty.
	pub fn front(&self) -> Option<CodePoint> {
		self.code_points().next()
	}

	/// The last code point, unless the string is empty.
	pub fn back(&self) -> Option<CodePoint> {
		self.code_points().next_back()
	}

	/// An independent string holding the content between two cursors.
	///
	/// When the result still exceeds the inline capacity and its end lines up
	/// with the block terminator (always, without the `null-terminators`
	/// feature), the result aliases the heap block instead of copying.
	/// Results at or below the inline capacity are demoted to inline storage.
	pub fn substring(
		&self,
		begin: Cursor<'_, E>,
		end: Cursor<'_, E>,
	) -> Result<Self, RangeError> {
		let (begin, end) = self.bounds(begin, end)?;
		Ok(self.narrowed(begin, end, false))
	}

	/// Like [`substring`](Self::substring), but always materializes fresh
	/// storage. Use it to shed the reference to a larger parent block.
	pub fn substring_copy(
		&self,
		begin: Cursor<'_, E>,
		end: Cursor<'_, E>,
	) -> Result<Self, RangeError> {
		let (begin, end) = self.bounds(begin, end)?;
		Ok(self.narrowed(begin, end, true))
	}

	/// A non-owning view of the content between two cursors.
	pub fn substring_view(
		&self,
		begin: Cursor<'_, E>,
		end: Cursor<'_, E>,
	) -> Result<UniView<'_, E>, RangeError> {
		let (begin, end) = self.bounds(begin, end)?;
		let window = &self.as_units()[begin..end];

		Ok(UniView::from_validated(window, encoding::count_code_points::<E>(window)))
	}

	/// The string narrowed to start at `new_begin`.
	pub fn remove_prefix(&self, new_begin: Cursor<'_, E>) -> Result<Self, RangeError> {
		self.substring(new_begin, self.end())
	}

	/// The string narrowed to end at `new_end`.
	pub fn remove_suffix(&self, new_end: Cursor<'_, E>) -> Result<Self, RangeError> {
		self.substring(self.begin(), new_end)
	}

	/// The visible content plus its trailing zero unit.
	#[cfg(feature = "null-terminators")]
	pub fn terminated_units(&self) -> &[E::CodeUnit] {
		match &self.repr {
			Repr::Small { len, buf } => &buf[..*len as usize + 1],
			Repr::Large { block, start, end, .. } => {
				debug_assert_eq!(*end + 1, block.len());
				&block[*start..*end + 1]
			}
		}
	}

	fn bounds(
		&self,
		begin: Cursor<'_, E>,
		end: Cursor<'_, E>,
	) -> Result<(usize, usize), RangeError> {
		let window = self.as_units();
		let begin = begin.offset_in(window).ok_or(RangeError)?;
		let end = end.offset_in(window).ok_or(RangeError)?;

		if begin <= end {
			Ok((begin, end))
		} else {
			Err(RangeError)
		}
	}

	/// Builds the result of a slicing operation from window-relative bounds.
	fn narrowed(&self, begin: usize, end: usize, force_copy: bool) -> Self {
		let size = end - begin;

		if size == 0 {
			return Self::new();
		}

		if size <= SMALL_MAX {
			let mut buf = [E::CodeUnit::ZERO; INLINE_CAPACITY];
			buf[..size].copy_from_slice(&self.as_units()[begin..end]);

			return Self { repr: Repr::Small { len: size as u8, buf } };
		}

		if !force_copy {
			if let Repr::Large { block, start, end: cur_end, length } = &self.repr {
				let end_coincides = start + end == *cur_end;

				if end_coincides || cfg!(not(feature = "null-terminators")) {
					// The full window carries its cached count; any narrower
					// window starts uncounted.
					let length = if begin == 0 && end_coincides {
						length.clone()
					} else {
						OnceCell::new()
					};

					return Self {
						repr: Repr::Large {
							block: Arc::clone(block),
							start: start + begin,
							end: start + end,
							length,
						},
					};
				}
			}
		}

		let mut vec = Vec::with_capacity(size + TERMINATOR_UNITS);
		vec.extend_from_slice(&self.as_units()[begin..end]);
		#[cfg(feature = "null-terminators")]
		vec.push(E::CodeUnit::ZERO);

		Self { repr: Repr::Large { block: vec.into(), start: 0, end: size, length: OnceCell::new() } }
	}
}

impl UniString<Utf8> {
	pub fn as_str(&self) -> &str {
		// SAFETY: the content invariant guarantees well-formed UTF-8, which
		// is exactly `str`'s invariant.
		unsafe { std::str::from_utf8_unchecked(self.as_units()) }
	}
}

impl From<&str> for UniString<Utf8> {
	fn from(source: &str) -> Self {
		// `str` is valid UTF-8 by construction.
		Self::from_validated_units(source.as_bytes(), source.chars().count())
	}
}

impl<E: Encoding> From<UniView<'_, E>> for UniString<E> {
	fn from(view: UniView<'_, E>) -> Self {
		Self::from_view(view)
	}
}

impl<'a, E: Encoding> From<&'a UniString<E>> for UniView<'a, E> {
	fn from(string: &'a UniString<E>) -> Self {
		string.as_view()
	}
}

impl<E: Encoding> Default for UniString<E> {
	fn default() -> Self {
		Self::new()
	}
}

impl<E: Encoding> Clone for UniString<E> {
	/// Inline content is bit-copied; a heap block gains a reference instead
	/// of being copied.
	fn clone(&self) -> Self {
		match &self.repr {
			Repr::Small { len, buf } => Self { repr: Repr::Small { len: *len, buf: *buf } },
			Repr::Large { block, start, end, length } => Self {
				repr: Repr::Large {
					block: Arc::clone(block),
					start: *start,
					end: *end,
					length: length.clone(),
				},
			},
		}
	}
}

impl<E: Encoding> PartialEq for UniString<E> {
	fn eq(&self, other: &Self) -> bool {
		self.as_units() == other.as_units()
	}
}

impl<E: Encoding> Eq for UniString<E> {}

impl<E: Encoding> PartialEq<UniView<'_, E>> for UniString<E> {
	fn eq(&self, other: &UniView<'_, E>) -> bool {
		self.as_units() == other.as_units()
	}
}

impl<E: Encoding> PartialEq<UniString<E>> for UniView<'_, E> {
	fn eq(&self, other: &UniString<E>) -> bool {
		self.as_units() == other.as_units()
	}
}

impl<E: Encoding> Hash for UniString<E> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.as_units().hash(state);
	}
}

impl<E: Encoding> Display for UniString<E> {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		use std::fmt::Write;

		for cp in self.code_points() {
			f.write_char(cp.to_char().unwrap_or(char::REPLACEMENT_CHARACTER))?;
		}

		Ok(())
	}
}

impl<E: Encoding> Debug for UniString<E> {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		f.write_str("\"")?;

		for cp in self.code_points() {
			let chr = cp.to_char().unwrap_or(char::REPLACEMENT_CHARACTER);
			write!(f, "{}", chr.escape_debug())?;
		}

		f.write_str("\"")
	}
}
