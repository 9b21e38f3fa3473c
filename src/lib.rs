//! Validated Unicode strings, generic over their encoding.
//!
//! The crate is built around three types: [`UniString`], an owning string with
//! a small-string inline form and a shared heap form; [`UniView`], a borrowed,
//! eagerly-validated window over caller-owned code units; and [`CodePoints`],
//! a double-ended iterator decoding one code point at a time. All three are
//! generic over an [`Encoding`]: UTF-8, UTF-16, or UTF-32, the latter two in
//! both byte orders.
//!
//! Code units only enter the library through validation ([`UniString::from_units`],
//! [`UniView::new`]); everything downstream (decoding, iteration, slicing,
//! transcoding) trusts that boundary and never re-validates.

#![warn(unsafe_op_in_unsafe_fn)]

#[macro_use]
extern crate cfg_if;

#[macro_use]
extern crate thiserror;

#[macro_use]
extern crate static_assertions;

mod code_point;
mod cursor;
pub mod encoding;
pub mod error;
mod string;
mod view;

#[cfg(test)]
mod test_util;

pub use code_point::CodePoint;
pub use cursor::{CodePoints, Cursor};
pub use encoding::{Encoding, Utf16Be, Utf16Le, Utf32Be, Utf32Le, Utf8};
pub use error::{Error, ErrorKind, LengthError, ParseError, RangeError, Result};
pub use string::{UniString, INLINE_CAPACITY};
pub use view::UniView;

pub type Utf8String = UniString<Utf8>;
pub type Utf16BeString = UniString<Utf16Be>;
pub type Utf16LeString = UniString<Utf16Le>;
pub type Utf32BeString = UniString<Utf32Be>;
pub type Utf32LeString = UniString<Utf32Le>;

pub type Utf8View<'a> = UniView<'a, Utf8>;
pub type Utf16BeView<'a> = UniView<'a, Utf16Be>;
pub type Utf16LeView<'a> = UniView<'a, Utf16Le>;
pub type Utf32BeView<'a> = UniView<'a, Utf32Be>;
pub type Utf32LeView<'a> = UniView<'a, Utf32Le>;
