//! The read-only view.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::mem::size_of;
use core::ops::Index;

use zerocopy::{FromBytes, Immutable, IntoBytes};

use crate::cursor::{Cursor, end_position};
use crate::error::ExtentError;
use crate::extent::{self, Dynamic, Extent, Fixed};
use crate::raw::RawView;
use crate::storage::Contiguous;

/// A non-owning, read-only view of a contiguous run of `T`.
///
/// A `View` is an address and a length. It is `Copy`, two words wide for a
/// [`Dynamic`] extent and one word wide for a [`Fixed`] one, and never owns,
/// allocates or frees what it points at. The address is null only when the
/// view is empty.
///
/// ```
/// use spanview_core::{View, Fixed};
///
/// let storage = [1, 2, 3, 4];
/// let v = View::new(&storage);
///
/// assert_eq!(v.first(2).as_slice(), &[1, 2]);
/// assert_eq!(v.last(2).as_slice(), &[3, 4]);
/// assert_eq!(v.subspan(1, 2).as_slice(), &[2, 3]);
///
/// let f: View<i32, Fixed<2>> = v.first_fixed::<2>();
/// assert_eq!(f[1], 2);
/// ```
///
/// Fixed extents are checked at compile time wherever both sides are known:
///
/// ```compile_fail
/// use spanview_core::{View, Fixed};
/// let storage = [1, 2, 3];
/// let v: View<i32, Fixed<4>> = View::from(&storage);
/// ```
///
/// ```compile_fail
/// use spanview_core::{View, Fixed};
/// let v = View::<i32, Fixed<3>>::empty();
/// ```
///
/// ```compile_fail
/// use spanview_core::View;
/// let storage = [1, 2, 3];
/// let v = View::from_array(&storage);
/// let _ = v.first_fixed::<4>();
/// ```
pub struct View<'a, T, E: Extent = Dynamic> {
    raw: RawView<T, E>,
    _marker: PhantomData<(&'a T, fn() -> E)>,
}

static_assertions::assert_eq_size!(View<'static, u64>, [usize; 2]);
static_assertions::assert_eq_size!(View<'static, u64, Fixed<4>>, usize);
static_assertions::assert_impl_all!(View<'static, u8>: Copy, Send, Sync);
static_assertions::assert_not_impl_any!(View<'static, core::cell::Cell<u8>>: Send, Sync);

impl<T, E: Extent> Clone for View<'_, T, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, E: Extent> Copy for View<'_, T, E> {}

// Same rules as `&'a [T]`.
unsafe impl<T: Sync, E: Extent> Send for View<'_, T, E> {}
unsafe impl<T: Sync, E: Extent> Sync for View<'_, T, E> {}

// --- Construction ---

impl<'a, T> View<'a, T> {
    /// A dynamic-extent view of `slice`.
    #[inline]
    pub fn new(slice: &'a [T]) -> Self {
        View::from_raw(RawView::new(slice.as_ptr().cast_mut(), slice.len()))
    }

    /// A dynamic-extent view of any contiguous container.
    ///
    /// For a fixed extent, follow with `try_into()` or
    /// [`into_extent`](Self::into_extent).
    #[inline]
    pub fn from_container<C>(container: &'a C) -> Self
    where
        C: Contiguous<Element = T> + ?Sized,
    {
        View::new(container.as_elements())
    }
}

impl<'a, T, const N: usize> View<'a, T, Fixed<N>> {
    /// A fixed-extent view of `array`.
    #[inline]
    pub fn from_array(array: &'a [T; N]) -> Self {
        View::from_raw(RawView::new(array.as_ptr().cast_mut(), N))
    }
}

impl<'a, T, E: Extent> View<'a, T, E> {
    #[inline(always)]
    pub(crate) fn from_raw(raw: RawView<T, E>) -> Self {
        View {
            raw,
            _marker: PhantomData,
        }
    }

    #[inline(always)]
    pub(crate) fn raw(self) -> RawView<T, E> {
        self.raw
    }

    /// An empty view with a null address.
    ///
    /// Only compiles when `E` is [`Dynamic`] or `Fixed<0>`.
    #[inline]
    pub fn empty() -> Self {
        View::from_raw(RawView::empty())
    }

    /// The "no storage" view. Same as [`empty`](Self::empty).
    #[inline]
    pub fn null() -> Self {
        Self::empty()
    }

    /// A view of `count` elements starting at `ptr`.
    ///
    /// # Safety
    ///
    /// Unless `count` is zero, `ptr` must be aligned and valid for reads of
    /// `count` elements for `'a`, and nothing may write to them meanwhile.
    ///
    /// # Panics
    ///
    /// Panics if `ptr` is null and `count` is not, or if `E` is fixed and
    /// `count` differs from it.
    #[inline]
    #[track_caller]
    pub unsafe fn from_raw_parts(ptr: *const T, count: usize) -> Self {
        View::from_raw(RawView::new(ptr.cast_mut(), count))
    }

    /// A view of the elements in `[first, last)`.
    ///
    /// # Safety
    ///
    /// As for [`from_raw_parts`](Self::from_raw_parts), with the count being
    /// the number of elements between the two addresses.
    ///
    /// # Panics
    ///
    /// Panics if `last` precedes `first`, if the distance is not a whole
    /// number of elements, or if it disagrees with a fixed `E`.
    #[inline]
    #[track_caller]
    pub unsafe fn from_raw_range(first: *const T, last: *const T) -> Self {
        View::from_raw(RawView::from_range(first.cast_mut(), last.cast_mut()))
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

    /// The first element's address; null only for views built empty.
    #[doc(alias = "data")]
    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.raw.ptr()
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &'a [T] {
        // SAFETY: the constructors established a readable run for 'a.
        unsafe { self.raw.as_slice() }
    }

    /// The element at `index`. This is the call-operator form of indexing.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    #[track_caller]
    pub fn at(&self, index: usize) -> &'a T {
        // SAFETY: `element` checked the bounds.
        unsafe { &*self.raw.element(index) }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&'a T> {
        self.as_slice().get(index)
    }

    /// # Safety
    ///
    /// `index` must be less than `self.len()`.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> &'a T {
        // SAFETY: the caller checked the bounds.
        unsafe { &*self.raw.ptr().add(index) }
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'a, T> {
        self.as_slice().iter()
    }

    // --- Cursors ---

    #[doc(alias = "cbegin")]
    #[inline]
    pub fn begin(&self) -> Cursor<'a, T> {
        Cursor::new(self.as_ptr(), self.len(), 0)
    }

    #[doc(alias = "cend")]
    #[inline]
    pub fn end(&self) -> Cursor<'a, T> {
        Cursor::new(self.as_ptr(), self.len(), end_position(self.len()))
    }

    // --- Subviews ---

    /// The first `count` elements.
    ///
    /// # Panics
    ///
    /// Panics if `count > self.len()`.
    #[inline]
    #[track_caller]
    pub fn first(self, count: usize) -> View<'a, T> {
        View::from_raw(self.raw.first(count))
    }

    /// The last `count` elements.
    ///
    /// # Panics
    ///
    /// Panics if `count > self.len()`.
    #[inline]
    #[track_caller]
    pub fn last(self, count: usize) -> View<'a, T> {
        View::from_raw(self.raw.last(count))
    }

    /// `count` elements starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset + count > self.len()`.
    #[inline]
    #[track_caller]
    pub fn subspan(self, offset: usize, count: usize) -> View<'a, T> {
        View::from_raw(self.raw.subspan(offset, count))
    }

    /// Everything from `offset` on.
    ///
    /// # Panics
    ///
    /// Panics if `offset > self.len()`.
    #[inline]
    #[track_caller]
    pub fn subspan_from(self, offset: usize) -> View<'a, T> {
        View::from_raw(self.raw.subspan_from(offset))
    }

    /// The first `N` elements. A compile error if `E` is fixed and shorter.
    #[inline]
    #[track_caller]
    pub fn first_fixed<const N: usize>(self) -> View<'a, T, Fixed<N>> {
        View::from_raw(self.raw.first_fixed::<N>())
    }

    /// The last `N` elements. A compile error if `E` is fixed and shorter.
    #[inline]
    #[track_caller]
    pub fn last_fixed<const N: usize>(self) -> View<'a, T, Fixed<N>> {
        View::from_raw(self.raw.last_fixed::<N>())
    }

    #[inline]
    #[track_caller]
    pub fn subspan_fixed<const OFFSET: usize, const COUNT: usize>(
        self,
    ) -> View<'a, T, Fixed<COUNT>> {
        View::from_raw(self.raw.subspan_fixed::<OFFSET, COUNT>())
    }

    /// Everything from `OFFSET` on. The remainder's length is not a type-level
    /// constant, so the result is dynamic.
    #[inline]
    #[track_caller]
    pub fn subspan_from_fixed<const OFFSET: usize>(self) -> View<'a, T> {
        View::from_raw(self.raw.subspan_from_fixed::<OFFSET>())
    }

    #[inline]
    #[track_caller]
    pub fn split_at(self, mid: usize) -> (View<'a, T>, View<'a, T>) {
        let (l, r) = self.raw.split_at(mid);
        (View::from_raw(l), View::from_raw(r))
    }

    // --- Conversions ---

    #[inline]
    pub fn into_dynamic(self) -> View<'a, T> {
        View::from_raw(self.raw.into_extent())
    }

    /// Re-types the view to extent `F`.
    ///
    /// A compile error when both extents are fixed and differ; a panic when
    /// only `F` is fixed and the length disagrees.
    #[inline]
    #[track_caller]
    pub fn into_extent<F: Extent>(self) -> View<'a, T, F> {
        View::from_raw(self.raw.into_extent())
    }

    /// Views the same memory as `U`, which must have `T`'s size and no
    /// stricter alignment.
    ///
    /// ```
    /// use spanview_core::View;
    ///
    /// let a = [1i32, -1];
    /// let u = View::new(&a).cast::<u32>();
    /// assert_eq!(u.as_slice(), &[1, u32::MAX]);
    /// ```
    #[inline]
    pub fn cast<U>(self) -> View<'a, U, E>
    where
        T: IntoBytes + Immutable,
        U: FromBytes + Immutable,
    {
        View::from_raw(self.raw.cast())
    }
}

impl<T, E: Extent> Default for View<'_, T, E> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T, E: Extent> Index<usize> for View<'_, T, E> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        self.at(index)
    }
}

impl<T, E: Extent> AsRef<[T]> for View<'_, T, E> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<'a, T, E: Extent> IntoIterator for View<'a, T, E> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, E: Extent> IntoIterator for &View<'a, T, E> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// --- Conversions from storage ---

impl<'a, T> From<&'a [T]> for View<'a, T> {
    fn from(slice: &'a [T]) -> Self {
        View::new(slice)
    }
}

impl<'a, T> From<&'a alloc::vec::Vec<T>> for View<'a, T> {
    fn from(vec: &'a alloc::vec::Vec<T>) -> Self {
        View::new(vec)
    }
}

impl<'a> From<&'a str> for View<'a, u8> {
    fn from(s: &'a str) -> Self {
        View::new(s.as_bytes())
    }
}

/// Any extent, checked at compile time against `N`.
impl<'a, T, E: Extent, const N: usize> From<&'a [T; N]> for View<'a, T, E> {
    fn from(array: &'a [T; N]) -> Self {
        const {
            assert!(
                extent::admits::<E>(N),
                "array length differs from the fixed extent"
            )
        };
        View::from_raw(RawView::new(array.as_ptr().cast_mut(), N))
    }
}

impl<'a, T, const N: usize> TryFrom<&'a [T]> for View<'a, T, Fixed<N>> {
    type Error = ExtentError;

    fn try_from(slice: &'a [T]) -> Result<Self, ExtentError> {
        View::new(slice).try_into()
    }
}

impl<'a, T, const N: usize> From<View<'a, T, Fixed<N>>> for View<'a, T> {
    fn from(view: View<'a, T, Fixed<N>>) -> Self {
        view.into_dynamic()
    }
}

impl<'a, T, const N: usize> TryFrom<View<'a, T>> for View<'a, T, Fixed<N>> {
    type Error = ExtentError;

    fn try_from(view: View<'a, T>) -> Result<Self, ExtentError> {
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

impl<T: PartialEq, E: Extent> PartialEq for View<'_, T, E> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, E: Extent> Eq for View<'_, T, E> {}

impl<T: PartialOrd, E: Extent> PartialOrd for View<'_, T, E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord, E: Extent> Ord for View<'_, T, E> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash, E: Extent> Hash for View<'_, T, E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

impl<T: fmt::Debug, E: Extent> fmt::Debug for View<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
