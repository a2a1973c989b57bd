//! Non-owning, bounds-aware views over contiguous memory.
//!
//! A [`View`] is an address plus a length, with the length either stored
//! ([`Dynamic`]) or carried in the type ([`Fixed<N>`]). Views narrow into
//! subviews, hand out checked [`Cursor`]s, and reinterpret their elements as
//! [`Byte`]s, all without allocating or owning anything.
//!
//! Misuse falls into two bins. Extent mismatches that the types can see are
//! compile errors. Everything else (an index past the end, a subview that
//! does not fit, a cursor dereferenced outside its view) is a violated
//! precondition: it is logged and the thread panics. See [`CONSISTENCY_CHECKS`]
//! for the one class of check that debug and release builds treat differently.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod bytes;
mod contract;
mod cursor;
mod error;
mod extent;
mod raw;
mod storage;
mod view;
mod view_mut;

pub use bytes::{as_bytes, as_mutable_bytes};
pub use contract::CONSISTENCY_CHECKS;
pub use cursor::{Cursor, CursorMut, Position};
pub use error::ExtentError;
pub use extent::{Dynamic, Extent, Fixed, FixedExtent, Scaled};
pub use spanview_byte::{Byte, FromByte, ShiftAmount};
pub use storage::{Contiguous, ContiguousMut};
pub use view::View;
pub use view_mut::ViewMut;
