use std::f64::consts::TAU;

/// Arcseconds to radians.
pub(crate) const ARCSEC_TO_RAD: f64 = 4.848_136_811_095_359_935_899_141e-6;

/// Milliarcseconds to radians.
pub(crate) const MILLIARCSEC_TO_RAD: f64 = ARCSEC_TO_RAD / 1e3;

/// Microarcseconds to radians.
pub(crate) const MICROARCSEC_TO_RAD: f64 = ARCSEC_TO_RAD / 1e6;

/// Arcseconds in a full turn.
pub(crate) const TURN_ARCSEC: f64 = 1_296_000.0;

pub(crate) const SECONDS_PER_DAY: f64 = 86_400.0;

/// Reference epoch J2000.0 as a Julian date.
pub(crate) const J2000: f64 = 2_451_545.0;

pub(crate) const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Julian date of MJD zero.
pub(crate) const MJD_ZERO: f64 = 2_400_000.5;

/// Julian centuries since J2000.0 of the two-part date `(d1, d2)`.
pub(crate) fn julian_centuries(d1: f64, d2: f64) -> f64 {
    ((d1 - J2000) + d2) / DAYS_PER_JULIAN_CENTURY
}

/// Puts an angle in radians into [0, 2π).
pub(crate) fn normalize_positive(radians: f64) -> f64 {
    let w = radians % TAU;
    if w < 0. {
        w + TAU
    } else {
        w
    }
}

/// Evaluates `c[0] + c[1]·t + c[2]·t² + …` by Horner's rule.
pub(crate) fn polynomial(coefficients: &[f64], t: f64) -> f64 {
    coefficients.iter().rev().fold(0., |acc, c| acc * t + c)
}

/// Applies `shift` to whichever half of a two-part Julian date is the smaller in magnitude, so
/// that the larger half keeps its precision.
pub(crate) fn shift_two_part(d1: f64, d2: f64, shift: f64) -> (f64, f64) {
    if d1.abs() > d2.abs() {
        (d1, d2 + shift)
    } else {
        (d1 + shift, d2)
    }
}
