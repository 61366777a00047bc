//! Circular rotation-index arithmetic.
//!
//! The display advances through its playlist one item per tick and wraps
//! at the end. Kept as plain functions so the cyclic law is trivially
//! testable without timers.

/// Advance an index circularly over a list of `len` items.
///
/// Returns 0 for an empty list; the caller never renders in that case.
pub fn advance(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (index + 1) % len
}

/// Clamp an index back into bounds after the playlist changed length.
pub fn clamp(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        index.min(len - 1)
    }
}
