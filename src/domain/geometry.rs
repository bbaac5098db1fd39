use std::f64::consts::PI;

/// Circumference of a circle with the given radius.
pub fn circumference(radius: f64) -> f64 {
    2.0 * PI * radius
}

#[cfg(feature = "legacy-api")]
#[deprecated(since = "0.1.0", note = "renamed to `circumference`")]
pub fn circum(radius: f64) -> f64 {
    circumference(radius)
}
