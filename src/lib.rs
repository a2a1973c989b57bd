//! Spanview - non-owning, bounds-aware views over contiguous memory
//!
//! # Overview
//!
//! A [`View`] names a run of elements that somebody else owns: an array, a
//! `Vec`, an arena slice, a memory-mapped buffer. It is two words wide (one,
//! when the length is part of the type), copies for free and never
//! allocates. What it adds over a bare pointer is that every access is
//! checked against the run it was built from.
//!
//! # Quick Start
//!
//! ```
//! use spanview::{View, ViewMut, Fixed, as_bytes};
//!
//! let mut samples = [4u16, 8, 15, 16, 23, 42];
//!
//! // Narrow a writable view and modify through it.
//! let v = ViewMut::new(&mut samples);
//! let (head, mut tail) = v.split_at(3);
//! tail[0] += head[2];
//!
//! // Read-only views copy freely; fixed extents live in the type.
//! let r: View<u16, Fixed<6>> = View::from(&samples);
//! let middle: View<u16, Fixed<2>> = r.subspan_fixed::<2, 2>();
//! assert_eq!(middle.as_slice(), &[15, 31]);
//!
//! // And any view can be looked at as raw bytes.
//! assert_eq!(as_bytes(middle).len(), 4);
//! ```
//!
//! # Cursors
//!
//! Besides the usual Rust iterators, views hand out random-access
//! [`Cursor`]s that remember which view they came from. A cursor can move
//! anywhere, but dereferencing it outside its view panics:
//!
//! ```should_panic
//! use spanview::View;
//!
//! let data = [1, 2, 3];
//! let v = View::new(&data);
//! let past_the_end = v.end();
//! let _x = *past_the_end;
//! ```
//!
//! # Failure model
//!
//! Extent mismatches visible to the type system are compile errors. A broken
//! precondition at run time (out-of-range index or subview, cursor outside
//! its view, null address with a count) is logged through `tracing` and
//! panics. Release builds abort on panic. The only recoverable error is
//! [`ExtentError`], returned when converting to a fixed extent with `TryFrom`.

pub use spanview_core::{
    CONSISTENCY_CHECKS, Contiguous, ContiguousMut, Cursor, CursorMut, Dynamic, Extent,
    ExtentError, Fixed, FixedExtent, Position, Scaled, View, ViewMut, as_bytes,
    as_mutable_bytes,
};

// Byte scalar and its sealed helper traits.
pub use spanview_core::{Byte, FromByte, ShiftAmount};
