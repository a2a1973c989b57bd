//! Views of an element run as raw bytes.
//!
//! Both functions keep the address, multiply the length by the element size
//! and keep the extent static when it was static:
//!
//! ```
//! use spanview_core::{as_bytes, Byte, Fixed, Scaled, View};
//!
//! let words = [0x0102_0304u32, 0];
//! let bytes: View<Byte, Scaled<Fixed<2>, u32>> = as_bytes(View::from_array(&words));
//! assert_eq!(bytes.len(), 8);
//! assert_eq!(bytes.as_ptr(), words.as_ptr().cast());
//! ```
//!
//! A read-only view has no mutable bytes:
//!
//! ```compile_fail
//! use spanview_core::{as_mutable_bytes, View};
//! let words = [1u32, 2];
//! let _ = as_mutable_bytes(View::new(&words));
//! ```

use zerocopy::{FromBytes, Immutable, IntoBytes};

use crate::Byte;
use crate::extent::Extent;
use crate::view::View;
use crate::view_mut::ViewMut;

/// The bytes of `view`'s elements, read-only.
#[inline]
pub fn as_bytes<T, E>(view: View<'_, T, E>) -> View<'_, Byte, E::Bytes<T>>
where
    T: IntoBytes + Immutable,
    E: Extent,
{
    View::from_raw(view.raw().bytes())
}

/// The bytes of `view`'s elements, writable. `T` must accept any bit pattern,
/// since the caller can write one.
#[doc(alias = "as_writeable_bytes")]
#[inline]
pub fn as_mutable_bytes<T, E>(view: ViewMut<'_, T, E>) -> ViewMut<'_, Byte, E::Bytes<T>>
where
    T: IntoBytes + FromBytes,
    E: Extent,
{
    ViewMut::from_raw(view.into_raw().bytes())
}
