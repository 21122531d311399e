//! Fundamental astronomy needed to go from the GCRS to the ITRS.
//!
//! [`AstronomyPrimitives`] is the seam for the models used; [`Iau2006B`] is the implementation
//! that ships with the crate. It follows the IERS Conventions (2010) CIO-based paradigm:
//!
//! ```text
//! [ITRS] = W(xp, yp, s') · R3(ERA) · Q(X, Y, s) · [GCRS]
//! ```
//!
//! where `Q` is built from the CIP coordinates, `R3(ERA)` is Earth's rotation about the CIP, and
//! `W` is polar motion.

use crate::frames::{Cirs, Gcrs, Itrs, Tirs};
use crate::math::{rotate_x, rotate_y, rotate_z, Rotation};
use crate::nutation::{nutation, precession_angles};
use crate::orientation::PolarMotion;
use crate::time::{JulianDate, Tt, Ut1};
use crate::util::{
    julian_centuries, normalize_positive, polynomial, ARCSEC_TO_RAD, J2000, MICROARCSEC_TO_RAD,
    TURN_ARCSEC,
};
use crate::Matrix3;
use std::f64::consts::TAU;
use uom::si::angle::radian;
use uom::si::f64::Angle;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position of the Celestial Intermediate Pole in the GCRS, plus the CIO locator.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CipCoordinates {
    /// CIP X coordinate.
    pub x: Angle,
    /// CIP Y coordinate.
    pub y: Angle,
    /// CIO locator s.
    pub s: Angle,
}

/// The models that make up the celestial-to-terrestrial rotation.
pub trait AstronomyPrimitives {
    /// CIP X, Y and CIO locator s at the given TT epoch.
    fn cip_xys(&self, tt: JulianDate<Tt>) -> CipCoordinates;

    /// The GCRS-to-CIRS matrix `Q` for the given CIP coordinates and CIO locator.
    fn celestial_to_intermediate(&self, cip: CipCoordinates) -> Rotation<Gcrs, Cirs>;

    /// Earth rotation angle at the given UT1 epoch, in [0, 2π).
    fn earth_rotation_angle(&self, ut1: JulianDate<Ut1>) -> Angle;

    /// TIO locator s' at the given TT epoch.
    fn tio_locator(&self, tt: JulianDate<Tt>) -> Angle;

    /// The TIRS-to-ITRS polar motion matrix `W`.
    fn polar_motion_matrix(&self, polar_motion: PolarMotion, sp: Angle) -> Rotation<Tirs, Itrs>;

    /// Composes `rpom · R3(era) · rc2i`.
    ///
    /// `rpom` is usually [`AstronomyPrimitives::polar_motion_matrix`], giving the GCRS-to-ITRS
    /// matrix, but the identity gives GCRS-to-TIRS.
    fn compose_cio_based<To>(
        &self,
        rc2i: Rotation<Gcrs, Cirs>,
        era: Angle,
        rpom: Rotation<Tirs, To>,
    ) -> Rotation<Gcrs, To> {
        rc2i * earth_rotation(era) * rpom
    }
}

impl<T> AstronomyPrimitives for &T
where
    T: AstronomyPrimitives + ?Sized,
{
    fn cip_xys(&self, tt: JulianDate<Tt>) -> CipCoordinates {
        (**self).cip_xys(tt)
    }

    fn celestial_to_intermediate(&self, cip: CipCoordinates) -> Rotation<Gcrs, Cirs> {
        (**self).celestial_to_intermediate(cip)
    }

    fn earth_rotation_angle(&self, ut1: JulianDate<Ut1>) -> Angle {
        (**self).earth_rotation_angle(ut1)
    }

    fn tio_locator(&self, tt: JulianDate<Tt>) -> Angle {
        (**self).tio_locator(tt)
    }

    fn polar_motion_matrix(&self, polar_motion: PolarMotion, sp: Angle) -> Rotation<Tirs, Itrs> {
        (**self).polar_motion_matrix(polar_motion, sp)
    }

    fn compose_cio_based<To>(
        &self,
        rc2i: Rotation<Gcrs, Cirs>,
        era: Angle,
        rpom: Rotation<Tirs, To>,
    ) -> Rotation<Gcrs, To> {
        (**self).compose_cio_based(rc2i, era, rpom)
    }
}

/// The rotation of the CIRS into the TIRS by the Earth rotation angle.
#[must_use]
pub fn earth_rotation(era: Angle) -> Rotation<Cirs, Tirs> {
    let matrix = rotate_z(era.get::<radian>(), Matrix3::identity());
    // SAFETY: the TIRS is defined as the CIRS rotated by the ERA about the CIP.
    unsafe { Rotation::from_matrix(matrix) }
}

/// IAU 2006 precession, IAU 2000B nutation, and the IAU 2000 Earth rotation angle.
///
/// The CIP coordinates agree with the full IAU 2006/2000A model to about 1 mas between 1995 and
/// 2050, which is a few centimetres at the Earth's surface.
///
/// <div class="warning">
///
/// The celestial pole offsets (dX, dY) published by the IERS are corrections to the IAU
/// 2006/2000A model, and are typically a few tenths of a mas. That is below the error of this
/// model, so with [`Iau2006B`] they do not make the pole more accurate. If you need the pole to
/// better than 1 mas, implement [`AstronomyPrimitives`] with the 2000A series and pass it to
/// [`GcrsToItrs::new`](crate::GcrsToItrs::new).
///
/// </div>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Iau2006B;

/// One term of the CIO locator series: multipliers of l, l', F, D, Ω, then sine and cosine
/// amplitudes in µas.
type CioTerm = ([i8; 5], f64, f64);

/// Polynomial part of `s + XY/2`, in µas.
const CIO_POLYNOMIAL: [f64; 6] = [94.00, 3808.65, -122.68, -72574.11, 27.98, 15.62];

#[rustfmt::skip]
const CIO_T0: [CioTerm; 12] = [
    ([0, 0, 0, 0, 1], -2640.73, 0.39),
    ([0, 0, 0, 0, 2], -63.53, 0.02),
    ([0, 0, 2, -2, 3], -11.75, -0.01),
    ([0, 0, 2, -2, 1], -11.21, -0.01),
    ([0, 0, 2, -2, 2], 4.57, 0.0),
    ([0, 0, 2, 0, 3], -2.02, 0.0),
    ([0, 0, 2, 0, 1], -1.98, 0.0),
    ([0, 0, 0, 0, 3], 1.72, 0.0),
    ([0, 1, 0, 0, 1], 1.41, 0.01),
    ([0, 1, 0, 0, -1], 1.26, 0.01),
    ([1, 0, 0, 0, -1], 0.63, 0.0),
    ([1, 0, 0, 0, 1], 0.63, 0.0),
];

#[rustfmt::skip]
const CIO_T1: [CioTerm; 3] = [
    ([0, 0, 0, 0, 2], -0.07, 3.57),
    ([0, 0, 0, 0, 1], 1.73, -0.03),
    ([0, 0, 2, -2, 3], 0.0, 0.48),
];

#[rustfmt::skip]
const CIO_T2: [CioTerm; 12] = [
    ([0, 0, 0, 0, 1], 743.52, -0.17),
    ([0, 0, 2, -2, 2], 56.91, 0.06),
    ([0, 0, 2, 0, 2], 9.84, -0.01),
    ([0, 0, 0, 0, 2], -8.85, 0.01),
    ([0, 1, 0, 0, 0], -6.38, -0.05),
    ([1, 0, 0, 0, 0], -3.07, 0.0),
    ([0, 1, 2, -2, 2], 2.23, 0.0),
    ([0, 0, 2, 0, 1], 1.67, 0.0),
    ([1, 0, 2, 0, 2], 1.30, 0.0),
    ([0, 1, -2, 2, -2], 0.93, 0.0),
    ([1, 0, 0, -2, 0], 0.68, 0.0),
    ([0, 0, 2, -2, 1], -0.55, 0.0),
];

#[rustfmt::skip]
const CIO_T3: [CioTerm; 4] = [
    ([0, 0, 0, 0, 1], 0.30, -23.42),
    ([0, 0, 2, -2, 2], -0.03, -1.46),
    ([0, 0, 2, 0, 2], -0.01, -0.25),
    ([0, 0, 0, 0, 2], 0.0, 0.23),
];

#[rustfmt::skip]
const CIO_T4: [CioTerm; 1] = [
    ([0, 0, 0, 0, 1], -0.26, -0.01),
];

/// Delaunay arguments l, l', F, D, Ω (IERS 2003), in radians.
fn delaunay_arguments(t: f64) -> [f64; 5] {
    const L: [f64; 5] = [485_868.249_036, 1_717_915_923.217_8, 31.879_2, 0.051_635, -0.000_244_70];
    const LP: [f64; 5] = [1_287_104.793_048, 129_596_581.048_1, -0.553_2, 0.000_136, -0.000_011_49];
    const F: [f64; 5] = [335_779.526_232, 1_739_527_262.847_8, -12.751_2, -0.001_037, 0.000_004_17];
    const D: [f64; 5] = [1_072_260.703_692, 1_602_961_601.209_0, -6.370_6, 0.006_593, -0.000_031_69];
    const OM: [f64; 5] = [450_160.398_036, -6_962_890.543_1, 7.472_2, 0.007_702, -0.000_059_39];
    [L, LP, F, D, OM].map(|c| (polynomial(&c, t) % TURN_ARCSEC) * ARCSEC_TO_RAD)
}

/// CIO locator s (IAU 2006), in radians, given the CIP coordinates.
fn cio_locator(d1: f64, d2: f64, x: f64, y: f64) -> f64 {
    let t = julian_centuries(d1, d2);
    let arguments = delaunay_arguments(t);
    let series: [&[CioTerm]; 5] = [&CIO_T0, &CIO_T1, &CIO_T2, &CIO_T3, &CIO_T4];

    let mut w = CIO_POLYNOMIAL;
    for (wk, terms) in w.iter_mut().zip(series) {
        // smallest terms first
        for (multipliers, sin, cos) in terms.iter().rev() {
            let a: f64 = multipliers
                .iter()
                .zip(&arguments)
                .map(|(&n, arg)| f64::from(n) * arg)
                .sum();
            *wk += sin * a.sin() + cos * a.cos();
        }
    }
    polynomial(&w, t) * MICROARCSEC_TO_RAD - x * y / 2.
}

impl AstronomyPrimitives for Iau2006B {
    fn cip_xys(&self, tt: JulianDate<Tt>) -> CipCoordinates {
        let (d1, d2) = tt.parts();
        let angles = precession_angles(d1, d2);
        let (dpsi, deps) = nutation(d1, d2);

        // Fukushima-Williams angles to the NPB matrix; the CIP is its bottom row
        let mut r = Matrix3::identity();
        r = rotate_z(angles.gamma, r);
        r = rotate_x(angles.phi, r);
        r = rotate_z(-(angles.psi + dpsi), r);
        r = rotate_x(-(angles.epsilon + deps), r);
        let (x, y) = (r[(2, 0)], r[(2, 1)]);

        CipCoordinates {
            x: Angle::new::<radian>(x),
            y: Angle::new::<radian>(y),
            s: Angle::new::<radian>(cio_locator(d1, d2, x, y)),
        }
    }

    fn celestial_to_intermediate(&self, cip: CipCoordinates) -> Rotation<Gcrs, Cirs> {
        let x = cip.x.get::<radian>();
        let y = cip.y.get::<radian>();
        let s = cip.s.get::<radian>();

        // spherical angles E and d of the CIP
        let r2 = x * x + y * y;
        let e = if r2 > 0. { y.atan2(x) } else { 0. };
        let d = (r2 / (1. - r2)).sqrt().atan();

        let mut r = Matrix3::identity();
        r = rotate_z(e, r);
        r = rotate_y(d, r);
        r = rotate_z(-(e + s), r);
        // SAFETY: Q(X, Y, s) is the GCRS-to-CIRS matrix by definition.
        unsafe { Rotation::from_matrix(r) }
    }

    fn earth_rotation_angle(&self, ut1: JulianDate<Ut1>) -> Angle {
        let (part1, part2) = ut1.parts();
        let (d1, d2) = if part1 < part2 {
            (part1, part2)
        } else {
            (part2, part1)
        };
        let t = d1 + (d2 - J2000);
        // fractional part of the day, keeping the precision of both parts
        let f = d1 % 1. + d2 % 1.;
        let era = TAU * (f + 0.779_057_273_264_0 + 0.002_737_811_911_354_48 * t);
        Angle::new::<radian>(normalize_positive(era))
    }

    fn tio_locator(&self, tt: JulianDate<Tt>) -> Angle {
        let (d1, d2) = tt.parts();
        Angle::new::<radian>(-47e-6 * julian_centuries(d1, d2) * ARCSEC_TO_RAD)
    }

    fn polar_motion_matrix(&self, polar_motion: PolarMotion, sp: Angle) -> Rotation<Tirs, Itrs> {
        let mut r = Matrix3::identity();
        r = rotate_z(sp.get::<radian>(), r);
        r = rotate_y(-polar_motion.xp.get::<radian>(), r);
        r = rotate_x(-polar_motion.yp.get::<radian>(), r);
        // SAFETY: W(xp, yp, s') takes the TIRS into the ITRS by definition.
        unsafe { Rotation::from_matrix(r) }
    }
}
