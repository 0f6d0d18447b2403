//! Least-common-multiple reduction over per-walker periods.

use wasteland_core::errors::WastelandError;

use crate::walk_error;

/// Greatest common divisor (Euclid).
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Least common multiple of two values, `None` on `u64` overflow.
///
/// `lcm(0, x)` is `0`.
pub fn lcm(a: u64, b: u64) -> Option<u64> {
    if a == 0 || b == 0 {
        return Some(0);
    }
    (a / gcd(a, b)).checked_mul(b)
}

/// Folds [`lcm`] over `values`.
///
/// An empty input has no meaningful LCM and fails with `empty-periods`
/// rather than defaulting to `1`.
pub fn lcm_all<I>(values: I) -> Result<u64, WastelandError>
where
    I: IntoIterator<Item = u64>,
{
    let mut values = values.into_iter();
    let first = values
        .next()
        .ok_or_else(|| walk_error("empty-periods", "cannot synchronise an empty set of periods"))?;
    values.try_fold(first, |acc, value| {
        lcm(acc, value).ok_or_else(|| {
            walk_error("lcm-overflow", "synchronisation step does not fit in u64")
                .with_context("accumulated", acc)
                .with_context("value", value)
        })
    })
}
