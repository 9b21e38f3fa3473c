use super::Encoding;
use crate::error::ErrorKind;
use crate::CodePoint;

/// UTF-8: one to four 8-bit units per code point.
pub enum Utf8 {}

impl Encoding for Utf8 {
	type CodeUnit = u8;

	fn encoded_size(cp: CodePoint) -> usize {
		match cp.value() {
			0x000000..=0x00007F => 1,
			0x000080..=0x0007FF => 2,
			0x000800..=0x00FFFF => 3,
			_ => 4,
		}
	}

	fn encode(cp: CodePoint, out: &mut [u8]) -> usize {
		let v = cp.value();

		match v {
			0x000000..=0x00007F => {
				out[0] = v as u8; // 0xxxxxxx
				1
			}
			0x000080..=0x0007FF => {
				out[0] = (v >> 6) as u8 | 0xC0; // 110xxxxx
				out[1] = (v & 0x3F) as u8 | 0x80; // 10xxxxxx
				2
			}
			0x000800..=0x00FFFF => {
				out[0] = (v >> 12) as u8 | 0xE0; // 1110xxxx
				out[1] = (v >> 6 & 0x3F) as u8 | 0x80; // 10xxxxxx
				out[2] = (v & 0x3F) as u8 | 0x80; // 10xxxxxx
				3
			}
			_ => {
				out[0] = (v >> 18) as u8 | 0xF0; // 11110xxx
				out[1] = (v >> 12 & 0x3F) as u8 | 0x80; // 10xxxxxx
				out[2] = (v >> 6 & 0x3F) as u8 | 0x80; // 10xxxxxx
				out[3] = (v & 0x3F) as u8 | 0x80; // 10xxxxxx
				4
			}
		}
	}

	fn decode(units: &[u8], pos: usize) -> CodePoint {
		let lead = units[pos];

		if lead <= 0x7F {
			return CodePoint::from(lead);
		}

		match lead.leading_ones() {
			2 => CodePoint::new(
				(lead as u32 & 0x1F) << 6 | (units[pos + 1] as u32 & 0x3F),
			),
			3 => CodePoint::new(
				(lead as u32 & 0x0F) << 12
					| (units[pos + 1] as u32 & 0x3F) << 6
					| (units[pos + 2] as u32 & 0x3F),
			),
			_ => CodePoint::new(
				(lead as u32 & 0x07) << 18
					| (units[pos + 1] as u32 & 0x3F) << 12
					| (units[pos + 2] as u32 & 0x3F) << 6
					| (units[pos + 3] as u32 & 0x3F),
			),
		}
	}

	fn validate(units: &[u8], pos: usize) -> Result<(), ErrorKind> {
		let lead = units[pos];

		if lead <= 0x7F {
			return Ok(());
		}

		let length = match lead.leading_ones() {
			// A continuation byte where a lead byte is expected.
			1 => return Err(ErrorKind::UnexpectedCodeUnit),
			n @ 2..=4 => n as usize,
			// 0xF8..=0xFF never appears in well-formed content.
			_ => return Err(ErrorKind::InvalidCodeUnit),
		};

		if pos + length > units.len() {
			return Err(ErrorKind::IncompleteSequence);
		}

		let tail = &units[pos + 1..pos + length];

		if !tail.iter().all(|&unit| unit & 0xC0 == 0x80) {
			return if tail.iter().all(|&unit| unit.leading_ones() <= 4) {
				Err(ErrorKind::UnexpectedCodeUnit)
			} else {
				Err(ErrorKind::InvalidCodeUnit)
			};
		}

		match length {
			2 => {
				// Value fits in 7 bits.
				if lead & 0x1E == 0 {
					return Err(ErrorKind::OverlongEncoding);
				}
			}
			3 => {
				// Value fits in 11 bits.
				if lead & 0x0F == 0 && units[pos + 1] & 0x20 == 0 {
					return Err(ErrorKind::OverlongEncoding);
				}

				// 0xED 0xA0..0xBF .. encodes 0xD800..=0xDFFF.
				if lead & 0x0F == 0x0D && units[pos + 1] & 0x20 != 0 {
					return Err(ErrorKind::InvalidCodePoint);
				}
			}
			_ => {
				// Value fits in 16 bits.
				if lead & 0x07 == 0 && units[pos + 1] & 0x30 == 0 {
					return Err(ErrorKind::OverlongEncoding);
				}

				// Value above 0x10FFFF.
				if lead & 0x04 != 0 && (lead & 0x03 != 0 || units[pos + 1] & 0x30 != 0) {
					return Err(ErrorKind::InvalidCodePoint);
				}
			}
		}

		Ok(())
	}

	fn next_code_point(units: &[u8], pos: usize) -> usize {
		match units[pos].leading_ones() {
			0 => pos + 1,
			n => pos + n as usize,
		}
	}

	fn prev_code_point(units: &[u8], pos: usize) -> usize {
		let mut pos = pos - 1;

		while units[pos] & 0xC0 == 0x80 {
			pos -= 1;
		}

		pos
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_util::{random_code_point, random_units};
	use assert_matches::assert_matches;

	#[test]
	fn round_trip() {
		let boundaries = [
			0x00, 0x7F, 0x80, 0x7FF, 0x800, 0xD7FF, 0xE000, 0xFFFF, 0x10000, 0x10FFFF,
		];
		let mut rng = rand::thread_rng();

		for cp in boundaries.into_iter().map(CodePoint::new).chain(
			std::iter::repeat_with(|| random_code_point(&mut rng)).take(1000),
		) {
			let mut buf = [0u8; 4];
			let size = Utf8::encode(cp, &mut buf);

			assert_eq!(size, Utf8::encoded_size(cp));
			assert_eq!(Utf8::validate(&buf[..size], 0), Ok(()));
			assert_eq!(Utf8::decode(&buf, 0), cp);
			assert_eq!(Utf8::next_code_point(&buf, 0), size);
			assert_eq!(Utf8::prev_code_point(&buf, size), 0);
		}
	}

	#[test]
	fn encoded_lengths() {
		assert_eq!(Utf8::encoded_size(CodePoint::from('a')), 1);
		assert_eq!(Utf8::encoded_size(CodePoint::from('é')), 2);
		assert_eq!(Utf8::encoded_size(CodePoint::from('€')), 3);
		assert_eq!(Utf8::encoded_size(CodePoint::from('\u{1F389}')), 4);
	}

	#[test]
	fn incomplete_sequence() {
		// Truncated 3-byte lead.
		assert_matches!(Utf8::validate(&[0xE2, 0x82], 0), Err(ErrorKind::IncompleteSequence));
		// Truncated 2- and 4-byte leads.
		assert_matches!(Utf8::validate(&[0xC3], 0), Err(ErrorKind::IncompleteSequence));
		assert_matches!(
			Utf8::validate(&[0xF0, 0x9F, 0x8E], 0),
			Err(ErrorKind::IncompleteSequence)
		);
	}

	#[test]
	fn unexpected_code_unit() {
		// A continuation byte where a lead byte is expected.
		assert_matches!(Utf8::validate(&[0x80], 0), Err(ErrorKind::UnexpectedCodeUnit));
		assert_matches!(Utf8::validate(&[0xBF, 0x41], 0), Err(ErrorKind::UnexpectedCodeUnit));
		// A valid lead byte where a continuation byte is expected.
		assert_matches!(
			Utf8::validate(&[0xE2, 0x41, 0x82], 0),
			Err(ErrorKind::UnexpectedCodeUnit)
		);
		assert_matches!(
			Utf8::validate(&[0xF0, 0xC3, 0xA9, 0x80], 0),
			Err(ErrorKind::UnexpectedCodeUnit)
		);
	}

	#[test]
	fn invalid_code_unit() {
		// 0xF8..=0xFF is invalid anywhere, lead or continuation position.
		for unit in 0xF8..=0xFFu8 {
			assert_matches!(Utf8::validate(&[unit, 0x80, 0x80, 0x80, 0x80], 0),
				Err(ErrorKind::InvalidCodeUnit));
			assert_matches!(Utf8::validate(&[0xE2, unit, 0x82], 0),
				Err(ErrorKind::InvalidCodeUnit));
		}
	}

	#[test]
	fn overlong_encoding() {
		assert_matches!(Utf8::validate(&[0xC0, 0x80], 0), Err(ErrorKind::OverlongEncoding));
		assert_matches!(Utf8::validate(&[0xC1, 0xBF], 0), Err(ErrorKind::OverlongEncoding));
		// 3-byte form of U+0041.
		assert_matches!(
			Utf8::validate(&[0xE0, 0x81, 0x81], 0),
			Err(ErrorKind::OverlongEncoding)
		);
		// 4-byte form of U+20AC.
		assert_matches!(
			Utf8::validate(&[0xF0, 0x82, 0x82, 0xAC], 0),
			Err(ErrorKind::OverlongEncoding)
		);
	}

	#[test]
	fn invalid_code_point() {
		// 3-byte encoded surrogates.
		assert_matches!(
			Utf8::validate(&[0xED, 0xA0, 0x80], 0),
			Err(ErrorKind::InvalidCodePoint)
		);
		assert_matches!(
			Utf8::validate(&[0xED, 0xBF, 0xBF], 0),
			Err(ErrorKind::InvalidCodePoint)
		);
		// U+D7FF itself is fine.
		assert_matches!(Utf8::validate(&[0xED, 0x9F, 0xBF], 0), Ok(()));
		// Values above U+10FFFF.
		assert_matches!(
			Utf8::validate(&[0xF4, 0x90, 0x80, 0x80], 0),
			Err(ErrorKind::InvalidCodePoint)
		);
		assert_matches!(
			Utf8::validate(&[0xF5, 0x80, 0x80, 0x80], 0),
			Err(ErrorKind::InvalidCodePoint)
		);
		// U+10FFFF itself is fine.
		assert_matches!(Utf8::validate(&[0xF4, 0x8F, 0xBF, 0xBF], 0), Ok(()));
	}

	#[test]
	fn cursor_arithmetic() {
		let mut rng = rand::thread_rng();
		let units = random_units::<Utf8>(50, &mut rng);

		let mut boundaries = vec![0];
		let mut pos = 0;

		while pos < units.len() {
			pos = Utf8::next_code_point(&units, pos);
			boundaries.push(pos);
		}

		assert_eq!(*boundaries.last().unwrap(), units.len());

		for pair in boundaries.windows(2) {
			assert_eq!(Utf8::prev_code_point(&units, pair[1]), pair[0]);
		}
	}
}
