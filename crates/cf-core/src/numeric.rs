/// Floating point type used for every amount and factor.
pub type Real = f64;

/// Round half away from zero to two decimal places.
pub fn round2(v: Real) -> Real {
    (v * 100.0).round() / 100.0
}

/// Clamp into `[lo, hi]`; NaN clamps to `lo`.
pub fn clamp(v: Real, lo: Real, hi: Real) -> Real {
    v.max(lo).min(hi)
}

/// `numerator / denominator`, or `None` when the denominator cannot be used as an
/// allocation base (missing, zero, negative or non-finite).
pub fn checked_ratio(numerator: Real, denominator: Real) -> Option<Real> {
    if !denominator.is_finite() || denominator <= 0.0 || !numerator.is_finite() {
        return None;
    }
    Some(numerator / denominator)
}
