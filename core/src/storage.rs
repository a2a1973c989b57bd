//! Containers a view can be built from.
//!
//! A container qualifies when it hands out its elements as one contiguous run.
//! Arrays are not listed here: they convert through `From<&[T; N]>`, which
//! keeps their length in the type.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

/// Storage that exposes its elements as one contiguous slice.
pub trait Contiguous {
    type Element;

    fn as_elements(&self) -> &[Self::Element];
}

/// [`Contiguous`] storage that also allows writes.
pub trait ContiguousMut: Contiguous {
    fn as_elements_mut(&mut self) -> &mut [Self::Element];
}

impl<T> Contiguous for [T] {
    type Element = T;

    #[inline(always)]
    fn as_elements(&self) -> &[T] {
        self
    }
}

impl<T> ContiguousMut for [T] {
    #[inline(always)]
    fn as_elements_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T> Contiguous for Vec<T> {
    type Element = T;

    #[inline(always)]
    fn as_elements(&self) -> &[T] {
        self
    }
}

impl<T> ContiguousMut for Vec<T> {
    #[inline(always)]
    fn as_elements_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T> Contiguous for Box<[T]> {
    type Element = T;

    #[inline(always)]
    fn as_elements(&self) -> &[T] {
        self
    }
}

impl<T> ContiguousMut for Box<[T]> {
    #[inline(always)]
    fn as_elements_mut(&mut self) -> &mut [T] {
        self
    }
}

/// Read-only: writing arbitrary bytes could break UTF-8.
impl Contiguous for str {
    type Element = u8;

    #[inline(always)]
    fn as_elements(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Contiguous for String {
    type Element = u8;

    #[inline(always)]
    fn as_elements(&self) -> &[u8] {
        self.as_bytes()
    }
}

#[cfg(feature = "smallvec")]
impl<A: smallvec::Array> Contiguous for smallvec::SmallVec<A> {
    type Element = A::Item;

    #[inline(always)]
    fn as_elements(&self) -> &[A::Item] {
        self
    }
}

#[cfg(feature = "smallvec")]
impl<A: smallvec::Array> ContiguousMut for smallvec::SmallVec<A> {
    #[inline(always)]
    fn as_elements_mut(&mut self) -> &mut [A::Item] {
        self
    }
}
