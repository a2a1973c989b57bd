//! Precondition checks.
//!
//! A violated precondition is a bug in the caller, never a recoverable
//! condition. Every check funnels into [`violated`], which logs the breach and
//! panics; release builds set `panic = "abort"`, so the process halts there.
//!
//! Checks that guard memory safety (indices, subview bounds, cursor
//! dereference, raw constructors) are always compiled in. Checks that only
//! guard consistency (cursor compatibility) run when [`CONSISTENCY_CHECKS`] is
//! on: with `debug_assertions`, or with the `checked` feature in any profile.

use thiserror::Error;

/// Whether consistency-only preconditions are checked in this build.
pub const CONSISTENCY_CHECKS: bool = cfg!(any(debug_assertions, feature = "checked"));

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Violation {
    #[error("null address with non-zero count {count}")]
    NullWithCount { count: usize },

    #[error("extent mismatch: fixed extent {expected}, count {found}")]
    ExtentMismatch { expected: usize, found: usize },

    #[error("address range is reversed or misaligned")]
    BadRange,

    #[error("index {index} out of range for view of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("subview [{offset}, {offset}+{count}) out of range for view of length {len}")]
    SubviewOutOfRange {
        offset: usize,
        count: usize,
        len: usize,
    },

    #[error("cursor at position {pos} dereferenced outside view of length {len}")]
    CursorOutOfRange { pos: isize, len: usize },

    #[error("view of length {len} is too long for cursor positions")]
    TooLongForCursor { len: usize },

    #[error("cursors belong to different views")]
    IncompatibleCursors,
}

#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn violated(violation: Violation) -> ! {
    tracing::error!(%violation, "precondition violated");
    panic!("precondition violated: {violation}")
}

/// Checks a memory-safety precondition.
#[inline(always)]
#[track_caller]
pub(crate) fn require(ok: bool, violation: impl FnOnce() -> Violation) {
    if !ok {
        violated(violation());
    }
}

/// Checks a consistency precondition; elided unless [`CONSISTENCY_CHECKS`].
#[inline(always)]
#[track_caller]
pub(crate) fn expect(ok: impl FnOnce() -> bool, violation: impl FnOnce() -> Violation) {
    if CONSISTENCY_CHECKS && !ok() {
        violated(violation());
    }
}

/// Checks `offset + count <= len` without overflowing.
#[inline(always)]
#[track_caller]
pub(crate) fn require_subview(offset: usize, count: usize, len: usize) {
    let fits = offset <= len && count <= len - offset;
    require(fits, || Violation::SubviewOutOfRange { offset, count, len });
}

#[inline(always)]
#[track_caller]
pub(crate) fn require_index(index: usize, len: usize) {
    require(index < len, || Violation::IndexOutOfRange { index, len });
}
