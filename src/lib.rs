// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A `scanf` style formatted input reader with the following goals:
//!
//! * Behave like the classic reader where it overlaps with it: same
//!   tokenization, same one-byte pushback, same counting of assigned
//!   conversions, same "end of input before anything was assigned"
//!   signal (`ScanStatus::AtEnd`, `-1` via `code()`).
//!
//! * No untyped pointers: values go into a list of typed
//!   [`Slot`](slot/enum.Slot.html)s, and a slot that doesn't fit its
//!   conversion is an error instead of a bad write.
//!
//! * No global input: the caller hands in a
//!   [`CharSource`](source/struct.CharSource.html), built from anything
//!   implementing `Read`.
//!
//! Supported conversions are `%d`/`%i`, `%x`, `%f`, `%c`, `%s` and
//! three non-standard ones:
//!
//! * `%b` reads a binary integer, with optional `0b` prefix.
//!
//! * `%Nq` reads the rest of the line, rotating letters by N (a Caesar
//!   cipher); `%!Nq` also swaps their case.
//!
//! * `%z` reads the rest of the line, trims it, and appends " lol";
//!   `%!z` appends " lol!" and `%!hz` " haha!".
//!
//! ```
//! use anyscanf::scan::{scan_str, ScanStatus};
//! use anyscanf::slot::Slot;
//!
//! let (mut n, mut word) = (0, String::new());
//! let status = scan_str("42 apples", "%d %s",
//!                       &mut [Slot::Int(&mut n), Slot::string(&mut word)])
//!     .unwrap();
//! assert_eq!(status, ScanStatus::Assigned(2));
//! assert_eq!((n, word.as_str()), (42, "apples"));
//! ```

pub mod context;
pub mod error;
pub mod number;
pub mod parse;
pub mod pos;
pub mod scan;
pub mod scanners;
pub mod settings;
pub mod slot;
pub mod source;
pub mod specifier;
