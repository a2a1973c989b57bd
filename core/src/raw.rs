//! The address/length pair shared by [`View`](crate::View) and
//! [`ViewMut`](crate::ViewMut).
//!
//! `RawView` owns the invariants (null implies empty, fixed extents match) and
//! the subview arithmetic. It never dereferences; the wrappers decide what a
//! pointer may be turned into.

use core::mem::{align_of, size_of};
use core::ptr;

use crate::contract::{Violation, require, require_subview};
use crate::extent::{self, Dynamic, Extent, Fixed, check_len};

pub(crate) struct RawView<T, E: Extent> {
    ptr: *mut T,
    len: E::Len,
}

impl<T, E: Extent> Clone for RawView<T, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, E: Extent> Copy for RawView<T, E> {}

impl<T, E: Extent> RawView<T, E> {
    #[inline]
    pub(crate) fn empty() -> Self {
        const {
            assert!(
                extent::admits::<E>(0),
                "a view with a non-zero fixed extent cannot be empty"
            )
        };
        RawView {
            ptr: ptr::null_mut(),
            len: E::store(0),
        }
    }

    /// Checks the null/count and extent invariants.
    #[inline]
    #[track_caller]
    pub(crate) fn new(ptr: *mut T, len: usize) -> Self {
        require(!ptr.is_null() || len == 0, || Violation::NullWithCount {
            count: len,
        });
        check_len::<E>(len);
        RawView {
            ptr,
            len: E::store(len),
        }
    }

    /// Computes the count from a `[first, last)` address range.
    #[inline]
    #[track_caller]
    pub(crate) fn from_range(first: *mut T, last: *mut T) -> Self {
        let len = match size_of::<T>() {
            // Zero-sized elements have no addresses to count between.
            0 => {
                require(first == last, || Violation::BadRange);
                0
            }
            size => {
                let bytes = last.addr().checked_sub(first.addr());
                let bytes = match bytes {
                    Some(bytes) if bytes % size == 0 => bytes,
                    _ => crate::contract::violated(Violation::BadRange),
                };
                bytes / size
            }
        };
        Self::new(first, len)
    }

    #[inline(always)]
    pub(crate) fn ptr(self) -> *mut T {
        self.ptr
    }

    #[inline(always)]
    pub(crate) fn len(self) -> usize {
        E::load(self.len)
    }

    /// A slice over the run; `ptr` is dangling when the view is null.
    ///
    /// # Safety
    ///
    /// The run must be valid for reads for `'a`.
    #[inline(always)]
    pub(crate) unsafe fn as_slice<'a>(self) -> &'a [T] {
        if self.ptr.is_null() {
            &[]
        } else {
            // SAFETY: non-null, and the caller vouches for the run.
            unsafe { core::slice::from_raw_parts(self.ptr, self.len()) }
        }
    }

    /// # Safety
    ///
    /// The run must be valid for writes for `'a` and not aliased.
    #[inline(always)]
    pub(crate) unsafe fn as_mut_slice<'a>(self) -> &'a mut [T] {
        if self.ptr.is_null() {
            &mut []
        } else {
            // SAFETY: non-null, and the caller vouches for the run.
            unsafe { core::slice::from_raw_parts_mut(self.ptr, self.len()) }
        }
    }

    /// The element at `index`, bounds-checked.
    #[inline(always)]
    #[track_caller]
    pub(crate) fn element(self, index: usize) -> *mut T {
        crate::contract::require_index(index, self.len());
        self.ptr.wrapping_add(index)
    }

    /// Skips the checks; `offset..offset + len` must lie inside `self`.
    #[inline(always)]
    fn narrow<F: Extent>(self, offset: usize, len: usize) -> RawView<T, F> {
        RawView {
            ptr: self.ptr.wrapping_add(offset),
            len: F::store(len),
        }
    }

    // --- Subviews ---

    #[inline]
    #[track_caller]
    pub(crate) fn first(self, count: usize) -> RawView<T, Dynamic> {
        require_subview(0, count, self.len());
        self.narrow(0, count)
    }

    #[inline]
    #[track_caller]
    pub(crate) fn last(self, count: usize) -> RawView<T, Dynamic> {
        let len = self.len();
        require_subview(0, count, len);
        self.narrow(len - count, count)
    }

    #[inline]
    #[track_caller]
    pub(crate) fn subspan(self, offset: usize, count: usize) -> RawView<T, Dynamic> {
        require_subview(offset, count, self.len());
        self.narrow(offset, count)
    }

    #[inline]
    #[track_caller]
    pub(crate) fn subspan_from(self, offset: usize) -> RawView<T, Dynamic> {
        let len = self.len();
        require_subview(offset, 0, len);
        self.narrow(offset, len - offset)
    }

    #[inline]
    #[track_caller]
    pub(crate) fn first_fixed<const N: usize>(self) -> RawView<T, Fixed<N>> {
        const {
            assert!(
                extent::may_hold::<E>(N),
                "first_fixed: count exceeds the fixed extent"
            )
        };
        require_subview(0, N, self.len());
        self.narrow(0, N)
    }

    #[inline]
    #[track_caller]
    pub(crate) fn last_fixed<const N: usize>(self) -> RawView<T, Fixed<N>> {
        const {
            assert!(
                extent::may_hold::<E>(N),
                "last_fixed: count exceeds the fixed extent"
            )
        };
        let len = self.len();
        require_subview(0, N, len);
        self.narrow(len - N, N)
    }

    #[inline]
    #[track_caller]
    pub(crate) fn subspan_fixed<const OFFSET: usize, const COUNT: usize>(
        self,
    ) -> RawView<T, Fixed<COUNT>> {
        const {
            assert!(
                extent::may_hold::<E>(OFFSET) && extent::may_hold::<E>(OFFSET + COUNT),
                "subspan_fixed: range exceeds the fixed extent"
            )
        };
        require_subview(OFFSET, COUNT, self.len());
        self.narrow(OFFSET, COUNT)
    }

    #[inline]
    #[track_caller]
    pub(crate) fn subspan_from_fixed<const OFFSET: usize>(self) -> RawView<T, Dynamic> {
        const {
            assert!(
                extent::may_hold::<E>(OFFSET),
                "subspan_from_fixed: offset exceeds the fixed extent"
            )
        };
        self.subspan_from(OFFSET)
    }

    #[inline]
    #[track_caller]
    pub(crate) fn split_at(self, mid: usize) -> (RawView<T, Dynamic>, RawView<T, Dynamic>) {
        let len = self.len();
        require_subview(mid, 0, len);
        (self.narrow(0, mid), self.narrow(mid, len - mid))
    }

    // --- Re-typing ---

    #[inline]
    #[track_caller]
    pub(crate) fn into_extent<F: Extent>(self) -> RawView<T, F> {
        const {
            assert!(
                extent::compatible::<E, F>(),
                "fixed extents of source and target differ"
            )
        };
        let len = self.len();
        check_len::<F>(len);
        self.narrow(0, len)
    }

    /// Same bytes, element type `U`. Layout compatibility is the caller's
    /// trait bounds' business; size and alignment are checked here.
    #[inline]
    pub(crate) fn cast<U>(self) -> RawView<U, E> {
        const {
            assert!(
                size_of::<T>() == size_of::<U>() && align_of::<U>() <= align_of::<T>(),
                "cast requires equal size and no stricter alignment"
            )
        };
        RawView {
            ptr: self.ptr.cast::<U>(),
            len: self.len,
        }
    }

    /// The same region as `E::Bytes<T>` elements of type `B`.
    #[inline]
    pub(crate) fn bytes<B>(self) -> RawView<B, E::Bytes<T>> {
        const { assert!(size_of::<B>() == 1 && align_of::<B>() == 1) };
        RawView {
            ptr: self.ptr.cast::<B>(),
            len: <E::Bytes<T>>::store(self.len() * size_of::<T>()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(a: &mut [i32]) -> RawView<i32, Dynamic> {
        RawView::new(a.as_mut_ptr(), a.len())
    }

    #[test]
    fn empty_is_null() {
        let r = RawView::<i32, Fixed<0>>::empty();
        assert!(r.ptr().is_null());
        assert_eq!(r.len(), 0);
    }

    #[test]
    fn range_counts_elements() {
        let mut a = [1, 2, 3];
        let p = a.as_mut_ptr();
        let r = RawView::<i32, Dynamic>::from_range(p, p.wrapping_add(3));
        assert_eq!(r.len(), 3);
        assert_eq!(r.ptr(), p);
    }

    #[test]
    fn range_of_nulls_is_empty() {
        let r = RawView::<u64, Dynamic>::from_range(ptr::null_mut(), ptr::null_mut());
        assert_eq!(r.len(), 0);
    }

    #[test]
    #[should_panic(expected = "address range is reversed or misaligned")]
    fn reversed_range() {
        let mut a = [1, 2, 3];
        let p = a.as_mut_ptr();
        RawView::<i32, Dynamic>::from_range(p.wrapping_add(2), p);
    }

    #[test]
    #[should_panic(expected = "address range is reversed or misaligned")]
    fn misaligned_range() {
        let mut a = [1, 2, 3];
        let p = a.as_mut_ptr();
        let last = p.cast::<u8>().wrapping_add(5).cast::<i32>();
        RawView::<i32, Dynamic>::from_range(p, last);
    }

    #[test]
    #[should_panic(expected = "null address with non-zero count 1")]
    fn null_with_count() {
        RawView::<i32, Dynamic>::new(ptr::null_mut(), 1);
    }

    #[test]
    fn split_at_covers_the_run() {
        let mut a = [1, 2, 3, 4];
        let (l, r) = raw(&mut a).split_at(1);
        assert_eq!((l.len(), r.len()), (1, 3));
        assert_eq!(r.ptr(), l.ptr().wrapping_add(1));
    }

    #[test]
    #[should_panic(expected = "subview [5, 5+0) out of range for view of length 4")]
    fn split_at_past_end() {
        let mut a = [1, 2, 3, 4];
        raw(&mut a).split_at(5);
    }

    #[test]
    fn bytes_scales_length() {
        let mut a = [1u32, 2];
        let r = RawView::<u32, Fixed<2>>::new(a.as_mut_ptr(), 2).bytes::<u8>();
        assert_eq!(r.len(), 8);
    }
}
