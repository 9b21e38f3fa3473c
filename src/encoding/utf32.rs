use super::{ByteOrder, Encoding};
use crate::error::ErrorKind;
use crate::CodePoint;

use std::marker::PhantomData;

/// UTF-32 in byte order `O`: one 32-bit unit per code point.
pub struct Utf32<O: ByteOrder>(PhantomData<O>);

pub type Utf32Be = Utf32<super::BigEndian>;
pub type Utf32Le = Utf32<super::LittleEndian>;

impl<O: ByteOrder> Encoding for Utf32<O> {
	type CodeUnit = u32;

	fn encoded_size(_: CodePoint) -> usize {
		1
	}

	fn encode(cp: CodePoint, out: &mut [u32]) -> usize {
		out[0] = O::swap32(cp.value());
		1
	}

	fn decode(units: &[u32], pos: usize) -> CodePoint {
		CodePoint::new(O::swap32(units[pos]))
	}

	fn validate(units: &[u32], pos: usize) -> Result<(), ErrorKind> {
		if CodePoint::new(O::swap32(units[pos])).is_scalar_value() {
			Ok(())
		} else {
			Err(ErrorKind::InvalidCodePoint)
		}
	}

	fn next_code_point(_: &[u32], pos: usize) -> usize {
		pos + 1
	}

	fn prev_code_point(_: &[u32], pos: usize) -> usize {
		pos - 1
	}
}
