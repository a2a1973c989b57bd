//! Random-access cursors into a view.
//!
//! A cursor is a position inside a specific parent view. Moving it never
//! touches memory, so it may wander past either end; only dereferencing
//! requires it to sit on an element, and that is always checked.
//!
//! [`Cursor`] reads and is `Copy`. [`CursorMut`] writes and is move-only, the
//! same split as `&[T]` and `&mut [T]`. The two compare with each other and
//! subtract from each other freely:
//!
//! ```
//! use spanview_core::ViewMut;
//!
//! let mut storage = [1, 2, 3];
//! let mut v = ViewMut::new(&mut storage);
//! let mut c = v.begin_mut();
//! while c != c.parent_end() {
//!     *c *= 10;
//!     c += 1;
//! }
//! assert_eq!(storage, [10, 20, 30]);
//! ```
//!
//! Cursors of different views must not be compared or subtracted. When
//! [`CONSISTENCY_CHECKS`](crate::CONSISTENCY_CHECKS) is on, doing so panics.

use core::cmp::Ordering;
use core::fmt;
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Deref, DerefMut, Index, IndexMut, Sub, SubAssign};
use core::ptr;

use crate::contract::{self, Violation};

/// Position plus the identity of the parent view.
#[doc(hidden)]
pub struct RawCursor<T> {
    base: *mut T,
    len: usize,
    pos: isize,
}

impl<T> Clone for RawCursor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RawCursor<T> {}

impl<T> RawCursor<T> {
    const DETACHED: Self = RawCursor {
        base: ptr::null_mut(),
        len: 0,
        pos: 0,
    };

    #[inline(always)]
    fn same_parent(self, other: RawCursor<T>) -> bool {
        self.base == other.base && self.len == other.len
    }

    #[inline(always)]
    #[track_caller]
    fn check_parent(self, other: RawCursor<T>) {
        contract::expect(
            || self.same_parent(other),
            || Violation::IncompatibleCursors,
        );
    }

    #[inline(always)]
    #[track_caller]
    fn element(self, offset: isize) -> *mut T {
        let pos = self.pos.wrapping_add(offset);
        let inside = usize::try_from(pos).is_ok_and(|p| p < self.len);
        contract::require(inside, || Violation::CursorOutOfRange { pos, len: self.len });
        self.base.wrapping_offset(pos)
    }

    #[inline(always)]
    #[track_caller]
    fn offset_from(self, origin: RawCursor<T>) -> isize {
        self.check_parent(origin);
        self.pos.wrapping_sub(origin.pos)
    }

    #[inline(always)]
    #[track_caller]
    fn partial_cmp(self, other: RawCursor<T>) -> Option<Ordering> {
        self.check_parent(other);
        Some(self.pos.cmp(&other.pos))
    }
}

/// The position one past the last of `len` elements.
#[inline(always)]
#[track_caller]
pub(crate) fn end_position(len: usize) -> isize {
    match isize::try_from(len) {
        Ok(pos) => pos,
        Err(_) => contract::violated(Violation::TooLongForCursor { len }),
    }
}

mod private {
    pub trait Sealed {}
}

/// A cursor of either kind. Sealed; it exists so the comparison and distance
/// operators work across [`Cursor`] and [`CursorMut`].
pub trait Position<T>: private::Sealed {
    #[doc(hidden)]
    fn raw(&self) -> RawCursor<T>;
}

// ===================
// Cursor
// ===================

/// A read-only cursor.
pub struct Cursor<'a, T> {
    raw: RawCursor<T>,
    _marker: PhantomData<&'a T>,
}

static_assertions::assert_impl_all!(Cursor<'static, u8>: Copy, Send, Sync);

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

unsafe impl<T: Sync> Send for Cursor<'_, T> {}
unsafe impl<T: Sync> Sync for Cursor<'_, T> {}

impl<T> private::Sealed for Cursor<'_, T> {}

impl<T> Position<T> for Cursor<'_, T> {
    #[inline(always)]
    fn raw(&self) -> RawCursor<T> {
        self.raw
    }
}

impl<'a, T> Cursor<'a, T> {
    #[inline(always)]
    pub(crate) fn new(base: *const T, len: usize, pos: isize) -> Self {
        Cursor {
            raw: RawCursor {
                base: base.cast_mut(),
                len,
                pos,
            },
            _marker: PhantomData,
        }
    }

    /// The element under the cursor.
    ///
    /// # Panics
    ///
    /// Panics unless the cursor is inside its view.
    #[inline]
    #[track_caller]
    pub fn get(&self) -> &'a T {
        // SAFETY: `element` checked the position against the parent.
        unsafe { &*self.raw.element(0) }
    }

    /// The element `n` places away, `self[n]` in operator form.
    #[inline]
    #[track_caller]
    pub fn at(&self, n: isize) -> &'a T {
        // SAFETY: as for `get`.
        unsafe { &*self.raw.element(n) }
    }

    /// The address under the cursor, which may be out of range or null.
    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.raw.base.wrapping_offset(self.raw.pos)
    }

    /// Advances by one and returns the advanced cursor.
    #[inline(always)]
    pub fn inc(&mut self) -> &mut Self {
        self.raw.pos = self.raw.pos.wrapping_add(1);
        self
    }

    /// Steps back by one and returns the moved cursor.
    #[inline(always)]
    pub fn dec(&mut self) -> &mut Self {
        self.raw.pos = self.raw.pos.wrapping_sub(1);
        self
    }

    /// Advances by one and returns the cursor as it was.
    #[inline(always)]
    pub fn post_inc(&mut self) -> Self {
        let before = *self;
        self.raw.pos = self.raw.pos.wrapping_add(1);
        before
    }

    /// Steps back by one and returns the cursor as it was.
    #[inline(always)]
    pub fn post_dec(&mut self) -> Self {
        let before = *self;
        self.raw.pos = self.raw.pos.wrapping_sub(1);
        before
    }

    /// `self - origin`, in elements.
    #[inline]
    #[track_caller]
    pub fn offset_from(&self, origin: &impl Position<T>) -> isize {
        self.raw.offset_from(origin.raw())
    }
}

impl<T> Default for Cursor<'_, T> {
    /// A cursor attached to no view; equal to every other default cursor.
    fn default() -> Self {
        Cursor {
            raw: RawCursor::DETACHED,
            _marker: PhantomData,
        }
    }
}

impl<T> Deref for Cursor<'_, T> {
    type Target = T;

    #[track_caller]
    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T> Index<isize> for Cursor<'_, T> {
    type Output = T;

    #[track_caller]
    fn index(&self, n: isize) -> &T {
        self.at(n)
    }
}

impl<T> AddAssign<isize> for Cursor<'_, T> {
    fn add_assign(&mut self, n: isize) {
        self.raw.pos = self.raw.pos.wrapping_add(n);
    }
}

impl<T> SubAssign<isize> for Cursor<'_, T> {
    fn sub_assign(&mut self, n: isize) {
        self.raw.pos = self.raw.pos.wrapping_sub(n);
    }
}

impl<'a, T> Add<isize> for Cursor<'a, T> {
    type Output = Cursor<'a, T>;

    fn add(mut self, n: isize) -> Self {
        self += n;
        self
    }
}

impl<'a, T> Add<Cursor<'a, T>> for isize {
    type Output = Cursor<'a, T>;

    fn add(self, cursor: Cursor<'a, T>) -> Cursor<'a, T> {
        cursor + self
    }
}

impl<'a, T> Sub<isize> for Cursor<'a, T> {
    type Output = Cursor<'a, T>;

    fn sub(mut self, n: isize) -> Self {
        self -= n;
        self
    }
}

impl<T> Sub<Cursor<'_, T>> for Cursor<'_, T> {
    type Output = isize;

    #[track_caller]
    fn sub(self, origin: Cursor<'_, T>) -> isize {
        self.offset_from(&origin)
    }
}

impl<T> Sub<&CursorMut<'_, T>> for Cursor<'_, T> {
    type Output = isize;

    #[track_caller]
    fn sub(self, origin: &CursorMut<'_, T>) -> isize {
        self.offset_from(origin)
    }
}

impl<T, P: Position<T>> PartialEq<P> for Cursor<'_, T> {
    #[track_caller]
    fn eq(&self, other: &P) -> bool {
        self.raw.partial_cmp(other.raw()) == Some(Ordering::Equal)
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T, P: Position<T>> PartialOrd<P> for Cursor<'_, T> {
    #[track_caller]
    fn partial_cmp(&self, other: &P) -> Option<Ordering> {
        self.raw.partial_cmp(other.raw())
    }
}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("pos", &self.raw.pos)
            .field("len", &self.raw.len)
            .finish()
    }
}

// ===================
// CursorMut
// ===================

/// A cursor that can write through. Not `Clone`: two of them over the same
/// element would alias.
pub struct CursorMut<'a, T> {
    raw: RawCursor<T>,
    _marker: PhantomData<&'a mut T>,
}

static_assertions::assert_impl_all!(CursorMut<'static, u8>: Send, Sync);
static_assertions::assert_not_impl_any!(CursorMut<'static, u8>: Clone);

unsafe impl<T: Send> Send for CursorMut<'_, T> {}
unsafe impl<T: Sync> Sync for CursorMut<'_, T> {}

impl<T> private::Sealed for CursorMut<'_, T> {}

impl<T> Position<T> for CursorMut<'_, T> {
    #[inline(always)]
    fn raw(&self) -> RawCursor<T> {
        self.raw
    }
}

impl<'a, T> CursorMut<'a, T> {
    #[inline(always)]
    pub(crate) fn new(base: *mut T, len: usize, pos: isize) -> Self {
        CursorMut {
            raw: RawCursor { base, len, pos },
            _marker: PhantomData,
        }
    }

    #[inline]
    #[track_caller]
    pub fn get(&self) -> &T {
        // SAFETY: `element` checked the position; `&self` keeps writers out.
        unsafe { &*self.raw.element(0) }
    }

    #[inline]
    #[track_caller]
    pub fn get_mut(&mut self) -> &mut T {
        // SAFETY: `element` checked the position; `&mut self` is exclusive.
        unsafe { &mut *self.raw.element(0) }
    }

    #[inline]
    #[track_caller]
    pub fn at(&self, n: isize) -> &T {
        // SAFETY: as for `get`.
        unsafe { &*self.raw.element(n) }
    }

    #[inline]
    #[track_caller]
    pub fn at_mut(&mut self, n: isize) -> &mut T {
        // SAFETY: as for `get_mut`.
        unsafe { &mut *self.raw.element(n) }
    }

    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.raw.base.wrapping_offset(self.raw.pos)
    }

    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.raw.base.wrapping_offset(self.raw.pos)
    }

    #[inline(always)]
    pub fn inc(&mut self) -> &mut Self {
        self.raw.pos = self.raw.pos.wrapping_add(1);
        self
    }

    #[inline(always)]
    pub fn dec(&mut self) -> &mut Self {
        self.raw.pos = self.raw.pos.wrapping_sub(1);
        self
    }

    /// A read-only cursor at the same position, borrowing this one.
    #[inline(always)]
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.raw.base, self.raw.len, self.raw.pos)
    }

    /// A read-only cursor at the start of the parent view.
    #[inline(always)]
    pub fn parent_begin(&self) -> Cursor<'_, T> {
        Cursor::new(self.raw.base, self.raw.len, 0)
    }

    /// A read-only cursor one past the end of the parent view.
    #[inline(always)]
    pub fn parent_end(&self) -> Cursor<'_, T> {
        Cursor::new(self.raw.base, self.raw.len, end_position(self.raw.len))
    }

    #[inline]
    #[track_caller]
    pub fn offset_from(&self, origin: &impl Position<T>) -> isize {
        self.raw.offset_from(origin.raw())
    }
}

impl<T> Default for CursorMut<'_, T> {
    fn default() -> Self {
        CursorMut {
            raw: RawCursor::DETACHED,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> From<CursorMut<'a, T>> for Cursor<'a, T> {
    fn from(cursor: CursorMut<'a, T>) -> Self {
        Cursor {
            raw: cursor.raw,
            _marker: PhantomData,
        }
    }
}

impl<T> Deref for CursorMut<'_, T> {
    type Target = T;

    #[track_caller]
    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T> DerefMut for CursorMut<'_, T> {
    #[track_caller]
    fn deref_mut(&mut self) -> &mut T {
        self.get_mut()
    }
}

impl<T> Index<isize> for CursorMut<'_, T> {
    type Output = T;

    #[track_caller]
    fn index(&self, n: isize) -> &T {
        self.at(n)
    }
}

impl<T> IndexMut<isize> for CursorMut<'_, T> {
    #[track_caller]
    fn index_mut(&mut self, n: isize) -> &mut T {
        self.at_mut(n)
    }
}

impl<T> AddAssign<isize> for CursorMut<'_, T> {
    fn add_assign(&mut self, n: isize) {
        self.raw.pos = self.raw.pos.wrapping_add(n);
    }
}

impl<T> SubAssign<isize> for CursorMut<'_, T> {
    fn sub_assign(&mut self, n: isize) {
        self.raw.pos = self.raw.pos.wrapping_sub(n);
    }
}

impl<'a, T> Add<isize> for CursorMut<'a, T> {
    type Output = CursorMut<'a, T>;

    fn add(mut self, n: isize) -> Self {
        self += n;
        self
    }
}

impl<'a, T> Add<CursorMut<'a, T>> for isize {
    type Output = CursorMut<'a, T>;

    fn add(self, cursor: CursorMut<'a, T>) -> CursorMut<'a, T> {
        cursor + self
    }
}

impl<'a, T> Sub<isize> for CursorMut<'a, T> {
    type Output = CursorMut<'a, T>;

    fn sub(mut self, n: isize) -> Self {
        self -= n;
        self
    }
}

impl<T> Sub<Cursor<'_, T>> for &CursorMut<'_, T> {
    type Output = isize;

    #[track_caller]
    fn sub(self, origin: Cursor<'_, T>) -> isize {
        self.offset_from(&origin)
    }
}

impl<T> Sub<&CursorMut<'_, T>> for &CursorMut<'_, T> {
    type Output = isize;

    #[track_caller]
    fn sub(self, origin: &CursorMut<'_, T>) -> isize {
        self.offset_from(origin)
    }
}

impl<T, P: Position<T>> PartialEq<P> for CursorMut<'_, T> {
    #[track_caller]
    fn eq(&self, other: &P) -> bool {
        self.raw.partial_cmp(other.raw()) == Some(Ordering::Equal)
    }
}

impl<T> Eq for CursorMut<'_, T> {}

impl<T, P: Position<T>> PartialOrd<P> for CursorMut<'_, T> {
    #[track_caller]
    fn partial_cmp(&self, other: &P) -> Option<Ordering> {
        self.raw.partial_cmp(other.raw())
    }
}

impl<T> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("pos", &self.raw.pos)
            .field("len", &self.raw.len)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{View, ViewMut};

    // ===================
    // Defaults
    // ===================

    #[test]
    fn default_cursors_are_equal() {
        let a: Cursor<'_, i32> = Cursor::default();
        let b: Cursor<'_, i32> = Cursor::default();
        let m: CursorMut<'_, i32> = CursorMut::default();
        assert!(a == b);
        assert!(a == m);
        assert!(m == a);
        assert!(a <= m && a >= m);
        assert_eq!(a.offset_from(&m), 0);
    }

    #[test]
    fn null_view_begin_is_end() {
        let v: View<i32> = View::null();
        assert_eq!(v.begin(), v.end());
        assert_eq!(v.end() - v.begin(), 0);
    }

    // ===================
    // Movement
    // ===================

    #[test]
    fn increments() {
        let a = [1, 2];
        let v = View::new(&a);
        let mut c = v.begin();
        assert_eq!(*c, 1);

        let old = c.post_inc();
        assert_eq!(*old, 1);
        assert_eq!(*c, 2);

        c.inc();
        assert_eq!(c, v.end());

        c.dec();
        assert_eq!(*c, 2);
        let old = c.post_dec();
        assert_eq!(*old, 2);
        assert_eq!(c, v.begin());
    }

    #[test]
    fn arithmetic() {
        let a = [1, 2, 3];
        let v = View::new(&a);
        let b = v.begin();

        assert_eq!(*(b + 2), 3);
        assert_eq!(*(2 + b), 3);
        assert_eq!(*(v.end() - 1), 3);
        assert_eq!(v.end() - b, 3);
        assert_eq!(b - v.end(), -3);

        let mut c = b;
        c += 3;
        assert_eq!(c, v.end());
        c -= 3;
        assert_eq!(c, b);
    }

    #[test]
    fn subscript() {
        let a = [1, 2, 3];
        let v = View::new(&a);
        let mid = v.begin() + 1;
        assert_eq!(mid[-1], 1);
        assert_eq!(mid[0], 2);
        assert_eq!(*mid.at(1), 3);
    }

    #[test]
    fn moving_past_the_end_is_allowed() {
        let a = [1, 2];
        let v = View::new(&a);
        let far = v.begin() + 10;
        assert!(far > v.end());
        let back = far - 10;
        assert_eq!(*back, 1);
    }

    // ===================
    // Checked dereference
    // ===================

    #[test]
    #[should_panic(expected = "cursor at position 2 dereferenced outside view of length 2")]
    fn deref_end() {
        let a = [1, 2];
        let v = View::new(&a);
        let _x = *v.end();
    }

    #[test]
    #[should_panic(expected = "cursor at position -1 dereferenced outside view of length 2")]
    fn deref_before_begin() {
        let a = [1, 2];
        let v = View::new(&a);
        let _x = v.begin()[-1];
    }

    #[test]
    #[should_panic(expected = "cursor at position 0 dereferenced outside view of length 0")]
    fn deref_default() {
        let c: Cursor<'_, i32> = Cursor::default();
        let _x = *c;
    }

    // ===================
    // Mixed variants
    // ===================

    #[test]
    fn mut_and_const_compare() {
        let mut a = [1, 2, 3];
        let mut v = ViewMut::new(&mut a);
        let mut m = v.begin_mut();
        let end = m.parent_end();
        assert!(m < end);
        assert!(m != end);
        assert_eq!(end - &m, 3);
        drop(end);

        m += 3;
        assert!(m == m.parent_end());
        assert_eq!(&m - m.parent_begin(), 3);

        let c: Cursor<'_, i32> = m.into();
        assert_eq!(*(c - 1), 3);
        assert_eq!(c.offset_from(&(c - 3)), 3);
    }

    #[test]
    fn writes_through() {
        let mut a = [1, 2, 3];
        {
            let mut v = ViewMut::new(&mut a);
            let mut m = v.begin_mut() + 1;
            *m = 20;
            m[1] = 30;
            *m.at_mut(-1) = 10;
            assert_eq!(*m.as_cursor(), 20);
        }
        assert_eq!(a, [10, 20, 30]);
    }

    #[test]
    fn as_ptr_tracks_position() {
        let a = [1, 2, 3];
        let v = View::new(&a);
        assert_eq!((v.begin() + 2).as_ptr(), &a[2] as *const i32);
        assert_eq!(v.end().as_ptr(), a.as_ptr().wrapping_add(3));
    }

    #[test]
    #[cfg_attr(
        not(any(debug_assertions, feature = "checked")),
        ignore = "consistency checks are compiled out"
    )]
    #[should_panic(expected = "cursors belong to different views")]
    fn incompatible_cursors() {
        let a = [1, 2];
        let b = [1, 2];
        let _ = View::new(&a).begin() == View::new(&b).begin();
    }

    #[test]
    #[cfg_attr(
        not(any(debug_assertions, feature = "checked")),
        ignore = "consistency checks are compiled out"
    )]
    #[should_panic(expected = "cursors belong to different views")]
    fn mut_cursor_against_other_views_end() {
        let mut a = [1, 2];
        let b = [1, 2];
        let mut v = ViewMut::new(&mut a);
        let m = v.begin_mut();
        let _ = m < View::new(&b).end();
    }

    #[test]
    #[cfg_attr(
        not(any(debug_assertions, feature = "checked")),
        ignore = "consistency checks are compiled out"
    )]
    #[should_panic(expected = "cursors belong to different views")]
    fn subviews_are_different_parents() {
        let a = [1, 2, 3];
        let v = View::new(&a);
        let _ = v.begin().offset_from(&v.first(2).begin());
    }

    // ===================
    // Zero-sized elements
    // ===================

    fn units<'a>(len: usize) -> View<'a, ()> {
        // SAFETY: zero-sized reads are valid through any aligned non-null pointer.
        unsafe { View::from_raw_parts(core::ptr::NonNull::dangling().as_ptr(), len) }
    }

    #[test]
    fn longest_cursor_range() {
        let v = units(isize::MAX as usize);
        assert!(v.begin() < v.end());
        assert_eq!(v.end() - v.begin(), isize::MAX);
        assert_eq!(*(v.end() - 1), ());
    }

    #[test]
    #[should_panic(expected = "too long for cursor positions")]
    fn end_past_isize_max() {
        let v = units(usize::MAX);
        let _ = v.end();
    }

    #[test]
    fn movement_wraps_without_panicking() {
        let a = [1];
        let v = View::new(&a);
        let mut c = v.begin() + isize::MAX;
        c += 1;
        c -= 1;
        assert_eq!(c - v.begin(), isize::MAX);
        c.inc();
        c.dec();
        assert_eq!(*(c - isize::MAX), 1);
    }
}
