use thiserror::Error;

/// A fixed-extent view could not be formed from a run of the wrong length.
///
/// This is the only recoverable failure in the crate; it comes from the
/// `TryFrom` conversions into fixed-extent views. Everything else that can go
/// wrong is a contract violation and panics.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("extent mismatch: expected {expected} elements, found {found}")]
pub struct ExtentError {
    pub expected: usize,
    pub found: usize,
}
