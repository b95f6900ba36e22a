//! Integer range helpers shared by the accessors and transforms.
//!
//! All three range functions treat `max` as exclusive, so the valid range
//! is `[min, max)`.

/// Truncate `x` to stay in the range `[min, max)`.
///
/// # Example
/// ```
/// use cldib_core::scalar::clamp;
///
/// assert_eq!(clamp(5, 0, 4), 3);
/// assert_eq!(clamp(-2, 0, 4), 0);
/// ```
#[inline]
pub fn clamp(x: i32, min: i32, max: i32) -> i32 {
    if x >= max {
        max - 1
    } else if x < min {
        min
    } else {
        x
    }
}

/// Reflect `x` back into `[min, max)` at whichever boundary it exceeds.
///
/// A value past the upper wall lands at `2 * (max - 1) - x`, a value below
/// the lower wall at `2 * min - x`. Only a single reflection is performed.
#[inline]
pub fn reflect(x: i32, min: i32, max: i32) -> i32 {
    if x >= max {
        2 * (max - 1) - x
    } else if x < min {
        2 * min - x
    } else {
        x
    }
}

/// Wrap `x` around the half-open range `[min, max)`.
///
/// Like [`reflect`], this assumes `x` is at most one range-width outside.
#[inline]
pub fn wrap(x: i32, min: i32, max: i32) -> i32 {
    if x >= max {
        x + min - max
    } else if x < min {
        x + max - min
    } else {
        x
    }
}

/// Round `n` up to the next multiple of four.
#[inline]
pub fn align4(n: usize) -> usize {
    (n + 3) & !3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_max_is_exclusive() {
        assert_eq!(clamp(5, 0, 4), 3);
        assert_eq!(clamp(4, 0, 4), 3);
        assert_eq!(clamp(3, 0, 4), 3);
    }

    #[test]
    fn test_clamp_below_min() {
        assert_eq!(clamp(-7, 0, 4), 0);
        assert_eq!(clamp(-7, -2, 4), -2);
    }

    #[test]
    fn test_reflect() {
        // 2 * (4 - 1) - 5 = 1
        assert_eq!(reflect(5, 0, 4), 1);
        assert_eq!(reflect(4, 0, 4), 2);
        assert_eq!(reflect(-1, 0, 4), 1);
        assert_eq!(reflect(2, 0, 4), 2);
    }

    #[test]
    fn test_wrap() {
        // 5 + 0 - 4 = 1
        assert_eq!(wrap(5, 0, 4), 1);
        assert_eq!(wrap(-1, 0, 4), 3);
        assert_eq!(wrap(0, 0, 4), 0);
        assert_eq!(wrap(12, 10, 20), 12);
    }

    #[test]
    fn test_align4() {
        assert_eq!(align4(0), 0);
        assert_eq!(align4(1), 4);
        assert_eq!(align4(4), 4);
        assert_eq!(align4(13), 16);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: clamp always lands inside the half-open range.
        #[test]
        fn prop_clamp_in_range(x in -1000i32..1000, min in -100i32..100, span in 1i32..100) {
            let max = min + span;
            let y = clamp(x, min, max);
            prop_assert!(y >= min && y < max);
        }

        /// Property: values one range-width out of bounds wrap back inside.
        #[test]
        fn prop_wrap_in_range(min in -100i32..100, span in 1i32..100, offset in 0i32..100) {
            let max = min + span;
            let offset = offset % span;
            prop_assert_eq!(wrap(max + offset, min, max), min + offset);
            prop_assert_eq!(wrap(min - 1 - offset, min, max), max - 1 - offset);
        }

        /// Property: align4 yields the smallest multiple of four not below n.
        #[test]
        fn prop_align4(n in 0usize..100_000) {
            let a = align4(n);
            prop_assert_eq!(a % 4, 0);
            prop_assert!(a >= n && a < n + 4);
        }
    }
}
