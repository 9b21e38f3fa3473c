//! Random test data: uniform scalar values with surrogates filtered out,
//! encoded through the codec under test.

use crate::encoding::{CodeUnit, Encoding};
use crate::CodePoint;

use rand::Rng;

/// A uniformly random Unicode scalar value.
pub(crate) fn random_code_point(rng: &mut impl Rng) -> CodePoint {
	loop {
		let cp = CodePoint::new(rng.gen_range(0..=CodePoint::MAX.value()));

		if !cp.is_surrogate() {
			return cp;
		}
	}
}

/// A buffer of `length` random code points, encoded in `E`.
pub(crate) fn random_units<E: Encoding>(
	length: usize,
	rng: &mut impl Rng,
) -> Vec<E::CodeUnit> {
	let mut units = Vec::with_capacity(length);

	for _ in 0..length {
		let cp = random_code_point(rng);
		let mut buf = [E::CodeUnit::ZERO; 4];
		let size = E::encode(cp, &mut buf);

		units.extend_from_slice(&buf[..size]);
	}

	units
}
