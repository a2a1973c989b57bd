//! The mutable view.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::mem::size_of;
use core::ops::{Index, IndexMut};

use zerocopy::{FromBytes, IntoBytes};

use crate::cursor::{Cursor, CursorMut, end_position};
use crate::error::ExtentError;
use crate::extent::{self, Dynamic, Extent, Fixed};
use crate::raw::RawView;
use crate::storage::ContiguousMut;
use crate::view::View;

/// A non-owning view that can write to its elements.
///
/// `ViewMut` has the same layout and subview algebra as [`View`], but it is
/// move-only: copying it would hand out two writers to the same memory. Use
/// [`reborrow`](Self::reborrow) for a shorter-lived copy and
/// [`as_view`](Self::as_view) or `into()` for a read-only one.
///
/// ```
/// use spanview_core::ViewMut;
///
/// let mut storage = [1, 2, 3, 4];
/// let mut v = ViewMut::new(&mut storage);
/// v.reborrow().last(2).as_mut_slice().fill(0);
/// v[0] = 7;
/// assert_eq!(storage, [7, 2, 0, 0]);
/// ```
///
/// ```compile_fail
/// use spanview_core::ViewMut;
/// let mut storage = [1, 2];
/// let v = ViewMut::new(&mut storage);
/// let w = v;
/// let _ = v.len();
/// ```
pub struct ViewMut<'a, T, E: Extent = Dynamic> {
    raw: RawView<T, E>,
    _marker: PhantomData<(&'a mut T, fn() -> E)>,
}

static_assertions::assert_eq_size!(ViewMut<'static, u64>, View<'static, u64>);
static_assertions::assert_impl_all!(ViewMut<'static, u8>: Send, Sync);
static_assertions::assert_not_impl_any!(ViewMut<'static, u8>: Clone, Copy);

// Same rules as `&'a mut [T]`.
unsafe impl<T: Send, E: Extent> Send for ViewMut<'_, T, E> {}
unsafe impl<T: Sync, E: Extent> Sync for ViewMut<'_, T, E> {}

impl<'a, T> ViewMut<'a, T> {
    #[inline]
    pub fn new(slice: &'a mut [T]) -> Self {
        ViewMut::from_raw(RawView::new(slice.as_mut_ptr(), slice.len()))
    }

    /// A dynamic-extent view of any writable contiguous container.
    #[inline]
    pub fn from_container<C>(container: &'a mut C) -> Self
    where
        C: ContiguousMut<Element = T> + ?Sized,
    {
        ViewMut::new(container.as_elements_mut())
    }
}

impl<'a, T, const N: usize> ViewMut<'a, T, Fixed<N>> {
    #[inline]
    pub fn from_array(array: &'a mut [T; N]) -> Self {
        ViewMut::from_raw(RawView::new(array.as_mut_ptr(), N))
    }
}

impl<'a, T, E: Extent> ViewMut<'a, T, E> {
    #[inline(always)]
    pub(crate) fn from_raw(raw: RawView<T, E>) -> Self {
        ViewMut {
            raw,
            _marker: PhantomData,
        }
    }

    #[inline(always)]
    pub(crate) fn into_raw(self) -> RawView<T, E> {
        self.raw
    }

    /// An empty view with a null address. Only compiles for extents that
    /// admit zero elements.
    #[inline]
    pub fn empty() -> Self {
        ViewMut::from_raw(RawView::empty())
    }

    #[inline]
    pub fn null() -> Self {
        Self::empty()
    }

    /// # Safety
    ///
    /// Unless `count` is zero, `ptr` must be aligned and valid for reads and
    /// writes of `count` elements for `'a`, with no other access meanwhile.
    ///
    /// # Panics
    ///
    /// Panics if `ptr` is null and `count` is not, or if `E` is fixed and
    /// `count` differs from it.
    #[inline]
    #[track_caller]
    pub unsafe fn from_raw_parts(ptr: *mut T, count: usize) -> Self {
        ViewMut::from_raw(RawView::new(ptr, count))
    }

    /// # Safety
    ///
    /// As for [`from_raw_parts`](Self::from_raw_parts), over `[first, last)`.
    ///
    /// # Panics
    ///
    /// Panics if the range is reversed, not a whole number of elements, or
    /// disagrees with a fixed `E`.
    #[inline]
    #[track_caller]
    pub unsafe fn from_raw_range(first: *mut T, last: *mut T) -> Self {
        ViewMut::from_raw(RawView::from_range(first, last))
    }

    /// A shorter-lived view of the same elements. `self` is unusable while
    /// the result lives.
    #[inline(always)]
    pub fn reborrow(&mut self) -> ViewMut<'_, T, E> {
        ViewMut::from_raw(self.raw)
    }

    #[inline(always)]
    pub fn as_view(&self) -> View<'_, T, E> {
        View::from_raw(self.raw)
    }

    // --- Observers ---

    #[doc(alias = "size")]
    #[doc(alias = "length")]
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    #[doc(alias = "length_bytes")]
    #[inline(always)]
    pub fn size_bytes(&self) -> usize {
        self.len() * size_of::<T>()
    }

    #[doc(alias = "empty")]
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[doc(alias = "data")]
    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.raw.ptr()
    }

    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.raw.ptr()
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the constructors established a readable run; `&self` keeps
        // writers out.
        unsafe { self.raw.as_slice() }
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: the run is writable and `&mut self` is exclusive.
        unsafe { self.raw.as_mut_slice() }
    }

    /// The whole run for the full lifetime `'a`.
    #[inline(always)]
    pub fn into_mut_slice(self) -> &'a mut [T] {
        // SAFETY: `self` is consumed, so the slice is the only writer.
        unsafe { self.raw.as_mut_slice() }
    }

    #[inline]
    #[track_caller]
    pub fn at(&self, index: usize) -> &T {
        // SAFETY: `element` checked the bounds.
        unsafe { &*self.raw.element(index) }
    }

    #[inline]
    #[track_caller]
    pub fn at_mut(&mut self, index: usize) -> &mut T {
        // SAFETY: `element` checked the bounds; `&mut self` is exclusive.
        unsafe { &mut *self.raw.element(index) }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// # Safety
    ///
    /// `index` must be less than `self.len()`.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        // SAFETY: the caller checked the bounds.
        unsafe { &*self.raw.ptr().add(index) }
    }

    /// # Safety
    ///
    /// `index` must be less than `self.len()`.
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        // SAFETY: the caller checked the bounds.
        unsafe { &mut *self.raw.ptr().add(index) }
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    // --- Cursors ---

    #[doc(alias = "cbegin")]
    #[inline]
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_ptr(), self.len(), 0)
    }

    #[doc(alias = "cend")]
    #[inline]
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_ptr(), self.len(), end_position(self.len()))
    }

    #[inline]
    pub fn begin_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(self.raw.ptr(), self.len(), 0)
    }

    #[inline]
    pub fn end_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(self.raw.ptr(), self.len(), end_position(self.len()))
    }

    // --- Subviews ---

    #[inline]
    #[track_caller]
    pub fn first(self, count: usize) -> ViewMut<'a, T> {
        ViewMut::from_raw(self.raw.first(count))
    }

    #[inline]
    #[track_caller]
    pub fn last(self, count: usize) -> ViewMut<'a, T> {
        ViewMut::from_raw(self.raw.last(count))
    }

    #[inline]
    #[track_caller]
    pub fn subspan(self, offset: usize, count: usize) -> ViewMut<'a, T> {
        ViewMut::from_raw(self.raw.subspan(offset, count))
    }

    #[inline]
    #[track_caller]
    pub fn subspan_from(self, offset: usize) -> ViewMut<'a, T> {
        ViewMut::from_raw(self.raw.subspan_from(offset))
    }

    #[inline]
    #[track_caller]
    pub fn first_fixed<const N: usize>(self) -> ViewMut<'a, T, Fixed<N>> {
        ViewMut::from_raw(self.raw.first_fixed::<N>())
    }

    #[inline]
    #[track_caller]
    pub fn last_fixed<const N: usize>(self) -> ViewMut<'a, T, Fixed<N>> {
        ViewMut::from_raw(self.raw.last_fixed::<N>())
    }

    #[inline]
    #[track_caller]
    pub fn subspan_fixed<const OFFSET: usize, const COUNT: usize>(
        self,
    ) -> ViewMut<'a, T, Fixed<COUNT>> {
        ViewMut::from_raw(self.raw.subspan_fixed::<OFFSET, COUNT>())
    }

    #[inline]
    #[track_caller]
    pub fn subspan_from_fixed<const OFFSET: usize>(self) -> ViewMut<'a, T> {
        ViewMut::from_raw(self.raw.subspan_from_fixed::<OFFSET>())
    }

    /// Two disjoint views, `[0, mid)` and `[mid, len)`.
    #[inline]
    #[track_caller]
    pub fn split_at(self, mid: usize) -> (ViewMut<'a, T>, ViewMut<'a, T>) {
        let (l, r) = self.raw.split_at(mid);
        (ViewMut::from_raw(l), ViewMut::from_raw(r))
    }

    // --- Conversions ---

    #[inline]
    pub fn into_dynamic(self) -> ViewMut<'a, T> {
        ViewMut::from_raw(self.raw.into_extent())
    }

    #[inline]
    #[track_caller]
    pub fn into_extent<F: Extent>(self) -> ViewMut<'a, T, F> {
        ViewMut::from_raw(self.raw.into_extent())
    }

    /// Views the same memory as `U`. Both directions must accept any bit
    /// pattern, since writes through either type are visible through the other.
    #[inline]
    pub fn cast<U>(self) -> ViewMut<'a, U, E>
    where
        T: IntoBytes + FromBytes,
        U: IntoBytes + FromBytes,
    {
        ViewMut::from_raw(self.raw.cast())
    }
}

impl<T, E: Extent> Default for ViewMut<'_, T, E> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T, E: Extent> Index<usize> for ViewMut<'_, T, E> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        self.at(index)
    }
}

impl<T, E: Extent> IndexMut<usize> for ViewMut<'_, T, E> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.at_mut(index)
    }
}

impl<T, E: Extent> AsRef<[T]> for ViewMut<'_, T, E> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, E: Extent> AsMut<[T]> for ViewMut<'_, T, E> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<'a, T, E: Extent> IntoIterator for ViewMut<'a, T, E> {
    type Item = &'a mut T;
    type IntoIter = core::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_mut_slice().iter_mut()
    }
}

impl<'s, T, E: Extent> IntoIterator for &'s ViewMut<'_, T, E> {
    type Item = &'s T;
    type IntoIter = core::slice::Iter<'s, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'s, T, E: Extent> IntoIterator for &'s mut ViewMut<'_, T, E> {
    type Item = &'s mut T;
    type IntoIter = core::slice::IterMut<'s, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

// --- Conversions from storage ---

impl<'a, T> From<&'a mut [T]> for ViewMut<'a, T> {
    fn from(slice: &'a mut [T]) -> Self {
        ViewMut::new(slice)
    }
}

impl<'a, T> From<&'a mut alloc::vec::Vec<T>> for ViewMut<'a, T> {
    fn from(vec: &'a mut alloc::vec::Vec<T>) -> Self {
        ViewMut::new(vec)
    }
}

impl<'a, T, E: Extent, const N: usize> From<&'a mut [T; N]> for ViewMut<'a, T, E> {
    fn from(array: &'a mut [T; N]) -> Self {
        const {
            assert!(
                extent::admits::<E>(N),
                "array length differs from the fixed extent"
            )
        };
        ViewMut::from_raw(RawView::new(array.as_mut_ptr(), N))
    }
}

impl<'a, T, const N: usize> TryFrom<&'a mut [T]> for ViewMut<'a, T, Fixed<N>> {
    type Error = ExtentError;

    fn try_from(slice: &'a mut [T]) -> Result<Self, ExtentError> {
        ViewMut::new(slice).try_into()
    }
}

impl<'a, T, E: Extent> From<ViewMut<'a, T, E>> for View<'a, T, E> {
    fn from(view: ViewMut<'a, T, E>) -> Self {
        View::from_raw(view.raw)
    }
}

impl<'a, T, const N: usize> From<ViewMut<'a, T, Fixed<N>>> for ViewMut<'a, T> {
    fn from(view: ViewMut<'a, T, Fixed<N>>) -> Self {
        view.into_dynamic()
    }
}

impl<'a, T, const N: usize> TryFrom<ViewMut<'a, T>> for ViewMut<'a, T, Fixed<N>> {
    type Error = ExtentError;

    fn try_from(view: ViewMut<'a, T>) -> Result<Self, ExtentError> {
        if view.len() != N {
            tracing::debug!(expected = N, found = view.len(), "fixed-extent conversion rejected");
            return Err(ExtentError {
                expected: N,
                found: view.len(),
            });
        }
        Ok(view.into_extent())
    }
}

// --- Comparison ---

impl<T: PartialEq, E: Extent> PartialEq for ViewMut<'_, T, E> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, E: Extent> Eq for ViewMut<'_, T, E> {}

impl<T: PartialOrd, E: Extent> PartialOrd for ViewMut<'_, T, E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord, E: Extent> Ord for ViewMut<'_, T, E> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash, E: Extent> Hash for ViewMut<'_, T, E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

impl<T: fmt::Debug, E: Extent> fmt::Debug for ViewMut<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn writes_reach_storage() {
        let mut a = [1, 2, 3];
        let mut v = ViewMut::from_array(&mut a);
        v[1] = 20;
        *v.at_mut(2) = 30;
        if let Some(x) = v.get_mut(0) {
            *x = 10;
        }
        assert_eq!(v.get_mut(3), None);
        assert_eq!(a, [10, 20, 30]);
    }

    #[test]
    fn raw_parts_and_range() {
        let mut a = [1, 2, 3];
        let p = a.as_mut_ptr();

        let mut v = unsafe { ViewMut::<i32>::from_raw_parts(p, 3) };
        v[0] = 10;
        assert_eq!(v.len(), 3);

        let mut f = unsafe { ViewMut::<i32, Fixed<2>>::from_raw_range(p.wrapping_add(1), p.wrapping_add(3)) };
        f[1] = 30;
        assert_eq!(f.as_ptr(), p.wrapping_add(1).cast_const());

        let n = unsafe { ViewMut::<i32, Fixed<0>>::from_raw_parts(core::ptr::null_mut(), 0) };
        assert!(n.as_ptr().is_null());
        assert_eq!(a, [10, 2, 30]);
    }

    #[test]
    #[should_panic(expected = "null address with non-zero count 2")]
    fn raw_parts_null_with_count() {
        let _ = unsafe { ViewMut::<i32>::from_raw_parts(core::ptr::null_mut(), 2) };
    }

    #[test]
    #[should_panic(expected = "extent mismatch: fixed extent 4, count 3")]
    fn raw_parts_wrong_fixed_count() {
        let mut a = [1, 2, 3];
        let _ = unsafe { ViewMut::<i32, Fixed<4>>::from_raw_parts(a.as_mut_ptr(), 3) };
    }

    #[test]
    #[should_panic(expected = "extent mismatch: fixed extent 1, count 3")]
    fn raw_range_wrong_fixed_count() {
        let mut a = [1, 2, 3];
        let p = a.as_mut_ptr();
        let _ = unsafe { ViewMut::<i32, Fixed<1>>::from_raw_range(p, p.wrapping_add(3)) };
    }

    #[test]
    #[should_panic(expected = "address range is reversed or misaligned")]
    fn raw_range_reversed() {
        let mut a = [1, 2, 3];
        let p = a.as_mut_ptr();
        let _ = unsafe { ViewMut::<i32>::from_raw_range(p.wrapping_add(1), p) };
    }

    #[test]
    fn container_without_annotation() {
        let mut v = vec![1, 2, 3];
        let mut view = ViewMut::from_container(&mut v);
        view[2] = 4;
        assert_eq!(view.len(), 3);
        assert_eq!(v, [1, 2, 4]);
    }

    #[test]
    fn null_is_empty() {
        let mut v: ViewMut<i32> = ViewMut::null();
        assert!(v.is_empty());
        assert!(v.as_mut_ptr().is_null());
        assert_eq!(v.as_mut_slice(), &mut [] as &mut [i32]);
        assert_eq!(v.begin(), v.end());
    }

    #[test]
    fn reborrow_then_reuse() {
        let mut a = [1, 2, 3, 4];
        let mut v = ViewMut::new(&mut a);
        v.reborrow().first_fixed::<2>().as_mut_slice().fill(0);
        v.reborrow().subspan(2, 2)[0] = 9;
        assert_eq!(v.as_slice(), &[0, 0, 9, 4]);
    }

    #[test]
    fn split_gives_disjoint_writers() {
        let mut a = [1, 2, 3, 4];
        let (mut l, mut r) = ViewMut::new(&mut a).split_at(2);
        core::mem::swap(&mut l[0], &mut r[1]);
        assert_eq!(a, [4, 2, 3, 1]);
    }

    #[test]
    fn iteration() {
        let mut v = vec![1, 2, 3];
        let mut view = ViewMut::from(&mut v);
        for x in &mut view {
            *x += 1;
        }
        assert_eq!(view.iter().rev().copied().collect::<alloc::vec::Vec<_>>(), [4, 3, 2]);
        for x in view {
            *x *= 2;
        }
        assert_eq!(v, [4, 6, 8]);
    }

    #[test]
    fn cursor_walk() {
        let mut a = [1, 2, 3];
        let mut v = ViewMut::new(&mut a);
        let mut c = v.end_mut();
        while c != c.parent_begin() {
            c.dec();
            *c = -*c;
        }
        assert_eq!(a, [-1, -2, -3]);
    }

    #[test]
    fn read_only_conversion() {
        let mut a = [1, 2];
        let v = ViewMut::from_array(&mut a);
        assert_eq!(v.as_view().len(), 2);
        let r: View<i32, Fixed<2>> = v.into();
        assert_eq!(r.as_slice(), &[1, 2]);
    }

    #[test]
    fn fixed_conversions() {
        let mut a = [1, 2, 3];
        let err = ViewMut::<i32, Fixed<2>>::try_from(&mut a[..]).unwrap_err();
        assert_eq!(err, ExtentError { expected: 2, found: 3 });

        let f = ViewMut::<i32, Fixed<3>>::try_from(&mut a[..]).unwrap();
        let d: ViewMut<i32> = f.into();
        assert_eq!(d.len(), 3);
    }

    #[test]
    fn cast_then_write() {
        let mut a = [0u32; 2];
        let mut s = ViewMut::new(&mut a).cast::<i32>();
        s[0] = -1;
        assert_eq!(a, [u32::MAX, 0]);
    }

    #[test]
    #[should_panic(expected = "subview [1, 1+4) out of range for view of length 4")]
    fn subspan_out_of_range() {
        let mut a = [1, 2, 3, 4];
        let _ = ViewMut::new(&mut a).subspan(1, 4);
    }
}
