//! Type-level view lengths.
//!
//! A view's extent is either [`Dynamic`] (the length is a run-time field) or
//! fixed at the type level, in which case no length is stored at all:
//!
//! | Extent           | Stored length | Length                     |
//! |------------------|---------------|----------------------------|
//! | `Dynamic`        | `usize`       | whatever was stored        |
//! | `Fixed<N>`       | `()`          | `N`                        |
//! | `Scaled<E, U>`   | `()`          | `E`'s length × `size_of::<U>()` |
//!
//! `Scaled` only appears as the result of reinterpreting a fixed view as bytes;
//! it keeps the byte view's length static without const-generic arithmetic.

use core::fmt::Debug;
use core::marker::PhantomData;
use core::mem::size_of;

use crate::contract::{Violation, require};

mod private {
    pub trait Sealed {}
}

/// The length policy of a view. Sealed.
pub trait Extent: private::Sealed {
    /// `Some(n)` when every view with this extent has exactly `n` elements.
    const FIXED: Option<usize>;

    /// What the view stores for its length.
    #[doc(hidden)]
    type Len: Copy + Eq + Debug + Send + Sync;

    /// The extent of the same region viewed as bytes, for elements of type `U`.
    type Bytes<U>: Extent;

    /// Encodes a length that has already been checked against [`Self::FIXED`].
    #[doc(hidden)]
    fn store(len: usize) -> Self::Len;

    #[doc(hidden)]
    fn load(len: Self::Len) -> usize;
}

/// Extents whose length is known at compile time.
pub trait FixedExtent: Extent {
    const LEN: usize;
}

/// The length is only known at run time.
pub enum Dynamic {}

/// The length is always `N`.
pub enum Fixed<const N: usize> {}

/// `E`'s length in units of `U`, measured in bytes.
pub struct Scaled<E, U>(PhantomData<fn() -> (E, U)>);

impl private::Sealed for Dynamic {}

impl Extent for Dynamic {
    const FIXED: Option<usize> = None;
    type Len = usize;
    type Bytes<U> = Dynamic;

    #[inline(always)]
    fn store(len: usize) -> usize {
        len
    }

    #[inline(always)]
    fn load(len: usize) -> usize {
        len
    }
}

impl<const N: usize> private::Sealed for Fixed<N> {}

impl<const N: usize> Extent for Fixed<N> {
    const FIXED: Option<usize> = Some(N);
    type Len = ();
    type Bytes<U> = Scaled<Fixed<N>, U>;

    #[inline(always)]
    fn store(_len: usize) {}

    #[inline(always)]
    fn load(_len: ()) -> usize {
        N
    }
}

impl<const N: usize> FixedExtent for Fixed<N> {
    const LEN: usize = N;
}

impl<E: FixedExtent, U> private::Sealed for Scaled<E, U> {}

impl<E: FixedExtent, U> Extent for Scaled<E, U> {
    const FIXED: Option<usize> = Some(<Self as FixedExtent>::LEN);
    type Len = ();
    type Bytes<V> = Scaled<Self, V>;

    #[inline(always)]
    fn store(_len: usize) {}

    #[inline(always)]
    fn load(_len: ()) -> usize {
        <Self as FixedExtent>::LEN
    }
}

impl<E: FixedExtent, U> FixedExtent for Scaled<E, U> {
    const LEN: usize = E::LEN * size_of::<U>();
}

// --- Compile-time predicates, used inside `const { assert!(..) }` blocks ---

/// Whether a view with extent `E` can have exactly `len` elements.
pub(crate) const fn admits<E: Extent>(len: usize) -> bool {
    match E::FIXED {
        Some(n) => n == len,
        None => true,
    }
}

/// Whether a view with extent `E` can have at least `len` elements.
pub(crate) const fn may_hold<E: Extent>(len: usize) -> bool {
    match E::FIXED {
        Some(n) => len <= n,
        None => true,
    }
}

/// Whether a view with extent `E` could be re-typed to extent `F`.
pub(crate) const fn compatible<E: Extent, F: Extent>() -> bool {
    match (E::FIXED, F::FIXED) {
        (Some(e), Some(f)) => e == f,
        _ => true,
    }
}

/// Run-time counterpart of [`admits`].
#[inline(always)]
#[track_caller]
pub(crate) fn check_len<E: Extent>(len: usize) {
    if let Some(expected) = E::FIXED {
        require(len == expected, || Violation::ExtentMismatch {
            expected,
            found: len,
        });
    }
}
