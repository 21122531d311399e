//! IAU 2000B nutation and IAU 2006 precession angles.
//!
//! The nutation series is the 77 luni-solar terms of IAU 2000B plus a fixed offset standing in for
//! the planetary terms, good to about 1 mas between 1995 and 2050. Its amplitudes are rescaled to
//! be consistent with the IAU 2006 precession.

use crate::util::{julian_centuries, polynomial, ARCSEC_TO_RAD, TURN_ARCSEC};
use std::f64::consts::TAU;

/// Units of the series amplitudes (0.1 µas) to radians.
const AMPLITUDE_TO_RAD: f64 = ARCSEC_TO_RAD / 1e7;

/// Fixed offsets in ψ and ε replacing the planetary terms, in arcseconds.
const PLANETARY_DPSI: f64 = -0.135e-3;
const PLANETARY_DEPS: f64 = 0.388e-3;

/// One luni-solar nutation term.
struct NutationTerm {
    /// Multipliers of l, l', F, D, Ω.
    multipliers: [i8; 5],
    /// Longitude sine amplitude, its rate per century, and cosine amplitude.
    longitude: [f64; 3],
    /// Obliquity cosine amplitude, its rate per century, and sine amplitude.
    obliquity: [f64; 3],
}

impl NutationTerm {
    const fn new(multipliers: [i8; 5], longitude: [f64; 3], obliquity: [f64; 3]) -> Self {
        Self {
            multipliers,
            longitude,
            obliquity,
        }
    }
}

#[rustfmt::skip]
const LUNI_SOLAR: [NutationTerm; 77] = [
    NutationTerm::new([0, 0, 0, 0, 1], [-172064161.0, -174666.0, 33386.0], [92052331.0, 9086.0, 15377.0]),
    NutationTerm::new([0, 0, 2, -2, 2], [-13170906.0, -1675.0, -13696.0], [5730336.0, -3015.0, -4587.0]),
    NutationTerm::new([0, 0, 2, 0, 2], [-2276413.0, -234.0, 2796.0], [978459.0, -485.0, 1374.0]),
    NutationTerm::new([0, 0, 0, 0, 2], [2074554.0, 207.0, -698.0], [-897492.0, 470.0, -291.0]),
    NutationTerm::new([0, 1, 0, 0, 0], [1475877.0, -3633.0, 11817.0], [73871.0, -184.0, -1924.0]),
    NutationTerm::new([0, 1, 2, -2, 2], [-516821.0, 1226.0, -524.0], [224386.0, -677.0, -174.0]),
    NutationTerm::new([1, 0, 0, 0, 0], [711159.0, 73.0, -872.0], [-6750.0, 0.0, 358.0]),
    NutationTerm::new([0, 0, 2, 0, 1], [-387298.0, -367.0, 380.0], [200728.0, 18.0, 318.0]),
    NutationTerm::new([1, 0, 2, 0, 2], [-301461.0, -36.0, 816.0], [129025.0, -63.0, 367.0]),
    NutationTerm::new([0, -1, 2, -2, 2], [215829.0, -494.0, 111.0], [-95929.0, 299.0, 132.0]),
    NutationTerm::new([0, 0, 2, -2, 1], [128227.0, 137.0, 181.0], [-68982.0, -9.0, 39.0]),
    NutationTerm::new([-1, 0, 2, 0, 2], [123457.0, 11.0, 19.0], [-53311.0, 32.0, -4.0]),
    NutationTerm::new([-1, 0, 0, 2, 0], [156994.0, 10.0, -168.0], [-1235.0, 0.0, 82.0]),
    NutationTerm::new([1, 0, 0, 0, 1], [63110.0, 63.0, 27.0], [-33228.0, 0.0, -9.0]),
    NutationTerm::new([-1, 0, 0, 0, 1], [-57976.0, -63.0, -189.0], [31429.0, 0.0, -75.0]),
    NutationTerm::new([-1, 0, 2, 2, 2], [-59641.0, -11.0, 149.0], [25543.0, -11.0, 66.0]),
    NutationTerm::new([1, 0, 2, 0, 1], [-51613.0, -42.0, 129.0], [26366.0, 0.0, 78.0]),
    NutationTerm::new([-2, 0, 2, 0, 1], [45893.0, 50.0, 31.0], [-24236.0, -10.0, 20.0]),
    NutationTerm::new([0, 0, 0, 2, 0], [63384.0, 11.0, -150.0], [-1220.0, 0.0, 29.0]),
    NutationTerm::new([0, 0, 2, 2, 2], [-38571.0, -1.0, 158.0], [16452.0, -11.0, 68.0]),
    NutationTerm::new([0, -2, 2, -2, 2], [32481.0, 0.0, 0.0], [-13870.0, 0.0, 0.0]),
    NutationTerm::new([-2, 0, 0, 2, 0], [-47722.0, 0.0, -18.0], [477.0, 0.0, -25.0]),
    NutationTerm::new([2, 0, 2, 0, 2], [-31046.0, -1.0, 131.0], [13238.0, -11.0, 59.0]),
    NutationTerm::new([1, 0, 2, -2, 2], [28593.0, 0.0, -1.0], [-12338.0, 10.0, -3.0]),
    NutationTerm::new([-1, 0, 2, 0, 1], [20441.0, 21.0, 10.0], [-10758.0, 0.0, -3.0]),
    NutationTerm::new([2, 0, 0, 0, 0], [29243.0, 0.0, -74.0], [-609.0, 0.0, 13.0]),
    NutationTerm::new([0, 0, 2, 0, 0], [25887.0, 0.0, -66.0], [-550.0, 0.0, 11.0]),
    NutationTerm::new([0, 1, 0, 0, 1], [-14053.0, -25.0, 79.0], [8551.0, -2.0, -45.0]),
    NutationTerm::new([-1, 0, 0, 2, 1], [15164.0, 10.0, 11.0], [-8001.0, 0.0, -1.0]),
    NutationTerm::new([0, 2, 2, -2, 2], [-15794.0, 72.0, -16.0], [6850.0, -42.0, -5.0]),
    NutationTerm::new([0, 0, -2, 2, 0], [21783.0, 0.0, 13.0], [-167.0, 0.0, 13.0]),
    NutationTerm::new([1, 0, 0, -2, 1], [-12873.0, -10.0, -37.0], [6953.0, 0.0, -14.0]),
    NutationTerm::new([0, -1, 0, 0, 1], [-12654.0, 11.0, 63.0], [6415.0, 0.0, 26.0]),
    NutationTerm::new([-1, 0, 2, 2, 1], [-10204.0, 0.0, 25.0], [5222.0, 0.0, 15.0]),
    NutationTerm::new([0, 2, 0, 0, 0], [16707.0, -85.0, -10.0], [168.0, -1.0, 10.0]),
    NutationTerm::new([1, 0, 2, 2, 2], [-7691.0, 0.0, 44.0], [3268.0, 0.0, 19.0]),
    NutationTerm::new([-2, 0, 2, 0, 0], [-11024.0, 0.0, -14.0], [104.0, 0.0, 2.0]),
    NutationTerm::new([0, 1, 2, 0, 2], [7566.0, -21.0, -11.0], [-3250.0, 0.0, -5.0]),
    NutationTerm::new([0, 0, 2, 2, 1], [-6637.0, -11.0, 25.0], [3353.0, 0.0, 14.0]),
    NutationTerm::new([0, -1, 2, 0, 2], [-7141.0, 21.0, 8.0], [3070.0, 0.0, 4.0]),
    NutationTerm::new([0, 0, 0, 2, 1], [-6302.0, -11.0, 2.0], [3272.0, 0.0, 4.0]),
    NutationTerm::new([1, 0, 2, -2, 1], [5800.0, 10.0, 2.0], [-3045.0, 0.0, -1.0]),
    NutationTerm::new([2, 0, 2, -2, 2], [6443.0, 0.0, -7.0], [-2768.0, 0.0, -4.0]),
    NutationTerm::new([-2, 0, 0, 2, 1], [-5774.0, -11.0, -15.0], [3041.0, 0.0, -5.0]),
    NutationTerm::new([2, 0, 2, 0, 1], [-5350.0, 0.0, 21.0], [2695.0, 0.0, 12.0]),
    NutationTerm::new([0, -1, 2, -2, 1], [-4752.0, -11.0, -3.0], [2719.0, 0.0, -3.0]),
    NutationTerm::new([0, 0, 0, -2, 1], [-4940.0, -11.0, -21.0], [2720.0, 0.0, -9.0]),
    NutationTerm::new([-1, -1, 0, 2, 0], [7350.0, 0.0, -8.0], [-51.0, 0.0, 4.0]),
    NutationTerm::new([2, 0, 0, -2, 1], [4065.0, 0.0, 6.0], [-2206.0, 0.0, 1.0]),
    NutationTerm::new([1, 0, 0, 2, 0], [6579.0, 0.0, -24.0], [-199.0, 0.0, 2.0]),
    NutationTerm::new([0, 1, 2, -2, 1], [3579.0, 0.0, 5.0], [-1900.0, 0.0, 1.0]),
    NutationTerm::new([1, -1, 0, 0, 0], [4725.0, 0.0, -6.0], [-41.0, 0.0, 3.0]),
    NutationTerm::new([-2, 0, 2, 0, 2], [-3075.0, 0.0, -2.0], [1313.0, 0.0, -1.0]),
    NutationTerm::new([3, 0, 2, 0, 2], [-2904.0, 0.0, 15.0], [1233.0, 0.0, 7.0]),
    NutationTerm::new([0, -1, 0, 2, 0], [4348.0, 0.0, -10.0], [-81.0, 0.0, 2.0]),
    NutationTerm::new([1, -1, 2, 0, 2], [-2878.0, 0.0, 8.0], [1232.0, 0.0, 4.0]),
    NutationTerm::new([0, 0, 0, 1, 0], [-4230.0, 0.0, 5.0], [-20.0, 0.0, -2.0]),
    NutationTerm::new([-1, -1, 2, 2, 2], [-2819.0, 0.0, 7.0], [1207.0, 0.0, 3.0]),
    NutationTerm::new([-1, 0, 2, 0, 0], [-4056.0, 0.0, 5.0], [40.0, 0.0, -2.0]),
    NutationTerm::new([0, -1, 2, 2, 2], [-2647.0, 0.0, 11.0], [1129.0, 0.0, 5.0]),
    NutationTerm::new([-2, 0, 0, 0, 1], [-2294.0, 0.0, -10.0], [1266.0, 0.0, -4.0]),
    NutationTerm::new([1, 1, 2, 0, 2], [2481.0, 0.0, -7.0], [-1062.0, 0.0, -3.0]),
    NutationTerm::new([2, 0, 0, 0, 1], [2179.0, 0.0, -2.0], [-1129.0, 0.0, -2.0]),
    NutationTerm::new([-1, 1, 0, 1, 0], [3276.0, 0.0, 1.0], [-9.0, 0.0, 0.0]),
    NutationTerm::new([1, 1, 0, 0, 0], [-3389.0, 0.0, 5.0], [35.0, 0.0, -2.0]),
    NutationTerm::new([1, 0, 2, 0, 0], [3339.0, 0.0, -13.0], [-107.0, 0.0, 1.0]),
    NutationTerm::new([-1, 0, 2, -2, 1], [-1987.0, 0.0, -6.0], [1073.0, 0.0, -2.0]),
    NutationTerm::new([1, 0, 0, 0, 2], [-1981.0, 0.0, 0.0], [854.0, 0.0, 0.0]),
    NutationTerm::new([-1, 0, 0, 1, 0], [4026.0, 0.0, -353.0], [-553.0, 0.0, -139.0]),
    NutationTerm::new([0, 0, 2, 1, 2], [1660.0, 0.0, -5.0], [-710.0, 0.0, -2.0]),
    NutationTerm::new([-1, 0, 2, 4, 2], [-1521.0, 0.0, 9.0], [647.0, 0.0, 4.0]),
    NutationTerm::new([-1, 1, 0, 1, 1], [1314.0, 0.0, 0.0], [-700.0, 0.0, 0.0]),
    NutationTerm::new([0, -2, 2, -2, 1], [-1283.0, 0.0, 0.0], [672.0, 0.0, 0.0]),
    NutationTerm::new([1, 0, 2, 2, 1], [-1331.0, 0.0, 8.0], [663.0, 0.0, 4.0]),
    NutationTerm::new([-2, 0, 2, 2, 2], [1383.0, 0.0, -2.0], [-594.0, 0.0, -2.0]),
    NutationTerm::new([-1, 0, 0, 0, 2], [1405.0, 0.0, 4.0], [-610.0, 0.0, 2.0]),
    NutationTerm::new([1, 1, 2, -2, 2], [1290.0, 0.0, 0.0], [-556.0, 0.0, 0.0]),
];

/// Nutation in longitude and obliquity `(Δψ, Δε)`, in radians, at TT `(d1, d2)`.
pub(crate) fn nutation(d1: f64, d2: f64) -> (f64, f64) {
    let t = julian_centuries(d1, d2);

    // Delaunay arguments; the linear terms are sufficient at this precision
    let arguments = [
        485_868.249_036 + 1_717_915_923.217_8 * t,
        1_287_104.793_05 + 129_596_581.048_1 * t,
        335_779.526_232 + 1_739_527_262.847_8 * t,
        1_072_260.703_69 + 1_602_961_601.209_0 * t,
        450_160.398_036 - 6_962_890.543_1 * t,
    ]
    .map(|arcsec| (arcsec % TURN_ARCSEC) * ARCSEC_TO_RAD);

    // smallest terms first
    let (mut dpsi, mut deps) = (0., 0.);
    for term in LUNI_SOLAR.iter().rev() {
        let argument = term
            .multipliers
            .iter()
            .zip(&arguments)
            .map(|(&n, a)| f64::from(n) * a)
            .sum::<f64>()
            % TAU;
        let (s, c) = argument.sin_cos();
        let [ps, pst, pc] = term.longitude;
        let [ec, ect, es] = term.obliquity;
        dpsi += (ps + pst * t) * s + pc * c;
        deps += (ec + ect * t) * c + es * s;
    }
    let dpsi = dpsi * AMPLITUDE_TO_RAD + PLANETARY_DPSI * ARCSEC_TO_RAD;
    let deps = deps * AMPLITUDE_TO_RAD + PLANETARY_DEPS * ARCSEC_TO_RAD;

    // rescale for consistency with IAU 2006 precession
    let fj2 = -2.7774e-6 * t;
    (dpsi + dpsi * (0.4697e-6 + fj2), deps + deps * fj2)
}

/// Mean obliquity of the ecliptic (IAU 2006), in radians.
pub(crate) fn mean_obliquity(d1: f64, d2: f64) -> f64 {
    const OBLIQUITY: [f64; 6] = [
        84_381.406,
        -46.836_769,
        -0.000_183_1,
        0.002_003_40,
        -0.000_000_576,
        -0.000_000_043_4,
    ];
    polynomial(&OBLIQUITY, julian_centuries(d1, d2)) * ARCSEC_TO_RAD
}

/// Fukushima-Williams precession angles (IAU 2006).
#[derive(Debug, Clone, Copy)]
pub(crate) struct PrecessionAngles {
    /// F-W angle γ̄.
    pub(crate) gamma: f64,
    /// F-W angle φ̄.
    pub(crate) phi: f64,
    /// F-W angle ψ̄.
    pub(crate) psi: f64,
    /// Mean obliquity of date.
    pub(crate) epsilon: f64,
}

pub(crate) fn precession_angles(d1: f64, d2: f64) -> PrecessionAngles {
    const GAMMA: [f64; 6] = [
        -0.052_928,
        10.556_378,
        0.493_204_4,
        -0.000_312_38,
        -0.000_002_788,
        0.000_000_026_0,
    ];
    const PHI: [f64; 6] = [
        84_381.412_819,
        -46.811_016,
        0.051_126_8,
        0.000_532_89,
        -0.000_000_440,
        -0.000_000_017_6,
    ];
    const PSI: [f64; 6] = [
        -0.041_775,
        5_038.481_484,
        1.558_417_5,
        -0.000_185_22,
        -0.000_026_452,
        -0.000_000_014_8,
    ];
    let t = julian_centuries(d1, d2);
    PrecessionAngles {
        gamma: polynomial(&GAMMA, t) * ARCSEC_TO_RAD,
        phi: polynomial(&PHI, t) * ARCSEC_TO_RAD,
        psi: polynomial(&PSI, t) * ARCSEC_TO_RAD,
        epsilon: mean_obliquity(d1, d2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::MJD_ZERO;
    use approx::assert_abs_diff_eq;

    #[test]
    fn iau2000b_nutation_at_2006() {
        let t = julian_centuries(MJD_ZERO, 53_736.0);
        // published IAU 2000B values, before the IAU 2006 rescaling
        let (dpsi_2000, deps_2000) = (-0.963_255_229_114_836_3e-5, 0.406_319_710_662_115_9e-4);
        let fj2 = -2.7774e-6 * t;
        let (dpsi, deps) = nutation(MJD_ZERO, 53_736.0);
        assert_abs_diff_eq!(
            dpsi,
            dpsi_2000 + dpsi_2000 * (0.4697e-6 + fj2),
            epsilon = 1e-13
        );
        assert_abs_diff_eq!(deps, deps_2000 + deps_2000 * fj2, epsilon = 1e-13);
    }

    #[test]
    fn obliquity_at_j2000() {
        assert_abs_diff_eq!(
            mean_obliquity(2_451_545.0, 0.),
            84_381.406 * ARCSEC_TO_RAD,
            epsilon = 1e-15
        );
    }

    #[test]
    fn precession_angles_at_j2000_are_the_constant_terms() {
        let angles = precession_angles(2_451_545.0, 0.);
        assert_abs_diff_eq!(angles.gamma, -0.052_928 * ARCSEC_TO_RAD, epsilon = 1e-18);
        assert_abs_diff_eq!(angles.phi, 84_381.412_819 * ARCSEC_TO_RAD, epsilon = 1e-15);
        assert_abs_diff_eq!(angles.psi, -0.041_775 * ARCSEC_TO_RAD, epsilon = 1e-18);
    }
}
