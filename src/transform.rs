//! The GCRS to ITRS conversion pipeline.
//!
//! A conversion runs in a fixed order:
//!
//! 1. the Earth orientation parameters are resolved from the caller's
//!    [`OrientationParameters`], consulting the [`EopProvider`] at most once;
//! 2. UT1 is derived from TT and ΔT;
//! 3. [`EarthRotation::compose`] builds the GCRS→ITRS and GCRS→TIRS rotations and Earth's angular
//!    velocity;
//! 4. every state vector is rotated, with velocities corrected for Earth's rotation.
//!
//! Nothing is cached between calls, and the same inputs always give bit-identical outputs.

use crate::astronomy::{AstronomyPrimitives, Iau2006B};
use crate::eop::EopProvider;
use crate::error::{DateAdvisory, TransformError};
use crate::frames::{Gcrs, Itrs, Tirs};
use crate::math::Rotation;
use crate::orientation::{EarthOrientation, OrientationParameters};
use crate::time::{Advised, JulianDate, Tt, Ut1};
use crate::util::SECONDS_PER_DAY;
use crate::vectors::{StateVector, Vector};
use tracing::debug;
use uom::si::angle::radian;
use uom::si::time::second;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mean angular velocity of the Earth (IERS), in rad/s.
pub const MEAN_EARTH_ROTATION_RATE: f64 = 7.292_115e-5;

/// The rotations and angular velocity that take GCRS states into the ITRS at one epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EarthRotation {
    pub gcrs_to_itrs: Rotation<Gcrs, Itrs>,
    pub gcrs_to_tirs: Rotation<Gcrs, Tirs>,
    pub polar_motion: Rotation<Tirs, Itrs>,
    /// `(0, 0, ω)`, with ω the rotation rate adjusted for the length of day.
    pub angular_velocity: Vector<Tirs>,
}

impl EarthRotation {
    /// Composes the celestial-to-terrestrial rotations for the given epoch and parameters.
    pub fn compose<A>(
        astronomy: &A,
        tt: JulianDate<Tt>,
        ut1: JulianDate<Ut1>,
        orientation: &EarthOrientation,
    ) -> Self
    where
        A: AstronomyPrimitives,
    {
        let mut cip = astronomy.cip_xys(tt);
        cip.x += orientation.pole_offsets.dx;
        cip.y += orientation.pole_offsets.dy;
        let rc2i = astronomy.celestial_to_intermediate(cip);

        let era = astronomy.earth_rotation_angle(ut1);
        let sp = astronomy.tio_locator(tt);
        let rpom = astronomy.polar_motion_matrix(orientation.polar_motion, sp);

        let gcrs_to_itrs = astronomy.compose_cio_based(rc2i, era, rpom);
        // SAFETY: without polar motion, the terrestrial frame reached is the TIRS.
        let no_polar_motion = unsafe { Rotation::<Tirs, Tirs>::identity() };
        let gcrs_to_tirs = astronomy.compose_cio_based(rc2i, era, no_polar_motion);

        let omega = MEAN_EARTH_ROTATION_RATE
            * (1. - orientation.lod.get::<second>() / SECONDS_PER_DAY);

        debug!(
            era = era.get::<radian>(),
            sp = sp.get::<radian>(),
            omega,
            "Composed GCRS to ITRS rotation"
        );
        Self {
            gcrs_to_itrs,
            gcrs_to_tirs,
            polar_motion: rpom,
            angular_velocity: Vector::new(0., 0., omega),
        }
    }

    /// Rotates a GCRS position into the ITRS.
    #[must_use]
    pub fn position(&self, position: Vector<Gcrs>) -> Vector<Itrs> {
        self.gcrs_to_itrs.transform(position)
    }

    /// Rotates a GCRS position and velocity into the ITRS.
    ///
    /// The velocity is corrected for Earth's rotation in the TIRS, where the rotation axis is Z:
    /// `v' = W · (T·v − Ω × T·p)`. Terms from the motion of the CIP and from polar motion are
    /// neglected.
    #[must_use]
    pub fn position_velocity(
        &self,
        position: Vector<Gcrs>,
        velocity: Vector<Gcrs>,
    ) -> (Vector<Itrs>, Vector<Itrs>) {
        let position_tirs = self.gcrs_to_tirs.transform(position);
        let velocity_tirs = self.gcrs_to_tirs.transform(velocity);
        let rotational = self.angular_velocity.cross(&position_tirs);
        (
            self.position(position),
            self.polar_motion.transform(velocity_tirs - rotational),
        )
    }

    /// Transforms one state vector.
    #[must_use]
    pub fn apply(&self, state: StateVector<Gcrs>) -> StateVector<Itrs> {
        match state {
            StateVector::Position(position) => StateVector::Position(self.position(position)),
            StateVector::PositionVelocity { position, velocity } => {
                let (position, velocity) = self.position_velocity(position, velocity);
                StateVector::PositionVelocity { position, velocity }
            }
        }
    }
}

/// The outcome of a conversion.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transformed {
    /// The converted states, in input order and with the same kind (position or
    /// position+velocity) as the input.
    pub vectors: Vec<StateVector<Itrs>>,
    /// The rotation applied to positions.
    pub rotation: Rotation<Gcrs, Itrs>,
    /// The Earth orientation parameters that were used.
    pub orientation: EarthOrientation,
    /// Set if UTC was only known on a best-effort basis for the epoch.
    pub advisory: Option<DateAdvisory>,
}

impl Transformed {
    /// Flattens the converted states column by column: one 3- or 6-component column per state.
    #[must_use]
    pub fn to_column_major(&self) -> Vec<f64> {
        self.vectors
            .iter()
            .flat_map(StateVector::to_components)
            .collect()
    }
}

/// Converts GCRS state vectors into the ITRS.
///
/// ```rust
/// # use earthframe::{GcrsToItrs, StateVector, Vector, eop::FixedEop, orientation::OrientationParameters, time::JulianDate};
/// # use uom::si::{f64::Time, time::second};
/// let converter = GcrsToItrs::with_default_astronomy(FixedEop::default());
/// let params = OrientationParameters::default().with_delta_t(Time::new::<second>(64.184));
/// let out = converter
///     .transform(
///         &[StateVector::Position(Vector::new(6_378_137., 0., 0.))],
///         JulianDate::new(2_451_545.0, 0.),
///         &params,
///     )
///     .expect("J2000.0 is a good date");
/// assert_eq!(out.vectors.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct GcrsToItrs<E, A = Iau2006B> {
    eop: E,
    astronomy: A,
}

impl<E> GcrsToItrs<E, Iau2006B>
where
    E: EopProvider,
{
    /// Uses the [`Iau2006B`] models.
    pub fn with_default_astronomy(eop: E) -> Self {
        Self::new(eop, Iau2006B)
    }
}

impl<E, A> GcrsToItrs<E, A>
where
    E: EopProvider,
    A: AstronomyPrimitives,
{
    pub fn new(eop: E, astronomy: A) -> Self {
        Self { eop, astronomy }
    }

    pub fn eop(&self) -> &E {
        &self.eop
    }

    pub fn astronomy(&self) -> &A {
        &self.astronomy
    }

    /// Looks up every Earth orientation parameter for a TT epoch from the provider.
    fn fetch(&self, tt: JulianDate<Tt>) -> Result<Advised<EarthOrientation>, TransformError> {
        let tai = self.eop.tt_to_tai(tt)?;
        let (utc, advisory) = self.eop.tai_to_utc(tai)?.into_parts();
        let orientation = self.eop.get_eop(utc)?;
        debug!(utc = utc.jd(), "Fetched Earth orientation from provider");
        Ok(Advised::with_advisory(orientation, advisory))
    }

    /// Resolves the parameters and builds the rotations for an epoch, without transforming
    /// anything.
    pub fn earth_rotation(
        &self,
        tt: JulianDate<Tt>,
        params: &OrientationParameters,
    ) -> Result<(EarthRotation, Advised<EarthOrientation>), TransformError> {
        let resolved = params.resolve(|| self.fetch(tt))?;
        let ut1 = self.eop.tt_to_ut1(tt, resolved.value.delta_t);
        let rotation = EarthRotation::compose(&self.astronomy, tt, ut1, &resolved.value);
        Ok((rotation, resolved))
    }

    /// Converts a batch of states sharing one epoch.
    ///
    /// All states in a batch must be of the same kind, either all positions or all
    /// position+velocity. Shapes are checked before anything else happens.
    pub fn transform(
        &self,
        states: &[StateVector<Gcrs>],
        tt: JulianDate<Tt>,
        params: &OrientationParameters,
    ) -> Result<Transformed, TransformError> {
        if let Some(first) = states.first() {
            if let Some(mixed) = states.iter().find(|s| s.dimension() != first.dimension()) {
                return Err(TransformError::InvalidDimension {
                    what: "state vector batch",
                    found: mixed.dimension(),
                });
            }
        }

        let (rotation, resolved) = self.earth_rotation(tt, params)?;
        let vectors = states.iter().map(|&state| rotation.apply(state)).collect();
        debug!(count = states.len(), "Transformed state vectors");

        Ok(Transformed {
            vectors,
            rotation: rotation.gcrs_to_itrs,
            orientation: resolved.value,
            advisory: resolved.advisory,
        })
    }

    /// Like [`GcrsToItrs::transform`], for states given as 3- or 6-component slices.
    pub fn transform_components(
        &self,
        states: &[&[f64]],
        tt: JulianDate<Tt>,
        params: &OrientationParameters,
    ) -> Result<Transformed, TransformError> {
        let states = states
            .iter()
            .map(|components| StateVector::from_components(components))
            .collect::<Result<Vec<_>, _>>()?;
        self.transform(&states, tt, params)
    }

    /// Like [`GcrsToItrs::transform`], for a `rows × N` matrix stored column by column, with one
    /// state per column. `rows` must be 3 or 6.
    pub fn transform_column_major(
        &self,
        data: &[f64],
        rows: usize,
        tt: JulianDate<Tt>,
        params: &OrientationParameters,
    ) -> Result<Transformed, TransformError> {
        if rows != 3 && rows != 6 {
            return Err(TransformError::InvalidDimension {
                what: "state vector",
                found: rows,
            });
        }
        if data.len() % rows != 0 {
            return Err(TransformError::InvalidDimension {
                what: "column-major batch",
                found: data.len(),
            });
        }
        let states = data
            .chunks_exact(rows)
            .map(StateVector::from_components)
            .collect::<Result<Vec<_>, _>>()?;
        self.transform(&states, tt, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astronomy::CipCoordinates;
    use crate::eop::{EopError, FixedEop};
    use crate::frames::Cirs;
    use crate::math::ORTHOGONALITY_TOLERANCE;
    use crate::orientation::{PolarMotion, PoleOffsets};
    use crate::time::{Tai, Utc};
    use approx::assert_abs_diff_eq;
    use quickcheck::{quickcheck, Arbitrary, Gen};
    use rstest::rstest;
    use std::cell::Cell;
    use uom::si::f64::{Angle, Time};

    const J2000_TT: (f64, f64) = (2_451_545.0, 0.0);

    fn j2000() -> JulianDate<Tt> {
        JulianDate::new(J2000_TT.0, J2000_TT.1)
    }

    fn rad(v: f64) -> Angle {
        Angle::new::<radian>(v)
    }

    fn s(v: f64) -> Time {
        Time::new::<second>(v)
    }

    fn j2000_params() -> OrientationParameters {
        OrientationParameters::default()
            .with_delta_t(s(64.184))
            .with_polar_motion(PolarMotion::default())
            .with_pole_offsets(PoleOffsets::default())
            .with_lod(s(0.))
    }

    /// Counts every call made to it and returns fixed parameters.
    #[derive(Default)]
    struct CountingEop {
        calls: Cell<usize>,
        values: EarthOrientation,
    }

    impl EopProvider for CountingEop {
        fn tt_to_tai(&self, tt: JulianDate<Tt>) -> Result<JulianDate<Tai>, TransformError> {
            self.calls.set(self.calls.get() + 1);
            crate::time::tt_to_tai(tt)
        }

        fn tai_to_utc(
            &self,
            tai: JulianDate<Tai>,
        ) -> Result<Advised<JulianDate<Utc>>, TransformError> {
            self.calls.set(self.calls.get() + 1);
            crate::time::tai_to_utc(tai)
        }

        fn get_eop(&self, _utc: JulianDate<Utc>) -> Result<EarthOrientation, EopError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.values)
        }
    }

    /// Counts every call made to it and otherwise behaves like [`Iau2006B`].
    #[derive(Default)]
    struct CountingAstronomy {
        calls: Cell<usize>,
    }

    impl CountingAstronomy {
        fn tick(&self) {
            self.calls.set(self.calls.get() + 1);
        }
    }

    impl AstronomyPrimitives for CountingAstronomy {
        fn cip_xys(&self, tt: JulianDate<Tt>) -> CipCoordinates {
            self.tick();
            Iau2006B.cip_xys(tt)
        }

        fn celestial_to_intermediate(&self, cip: CipCoordinates) -> Rotation<Gcrs, Cirs> {
            self.tick();
            Iau2006B.celestial_to_intermediate(cip)
        }

        fn earth_rotation_angle(&self, ut1: JulianDate<Ut1>) -> Angle {
            self.tick();
            Iau2006B.earth_rotation_angle(ut1)
        }

        fn tio_locator(&self, tt: JulianDate<Tt>) -> Angle {
            self.tick();
            Iau2006B.tio_locator(tt)
        }

        fn polar_motion_matrix(
            &self,
            polar_motion: PolarMotion,
            sp: Angle,
        ) -> Rotation<Tirs, Itrs> {
            self.tick();
            Iau2006B.polar_motion_matrix(polar_motion, sp)
        }
    }

    #[test]
    fn j2000_rotation_matches_reference() {
        let converter = GcrsToItrs::with_default_astronomy(FixedEop::default());
        let (rotation, _) = converter.earth_rotation(j2000(), &j2000_params()).unwrap();
        let expected = [
            [
                0.176_955_108_406_151_97,
                -0.984_218_923_354_641_5,
                -2.279_468_097_707_760_3e-5,
            ],
            [
                0.984_218_923_249_748_5,
                0.176_955_107_658_301_05,
                3.147_610_106_739_659e-5,
            ],
            [
                -2.694_573_907_761_956e-5,
                -2.800_481_324_366_500_5e-5,
                0.999_999_999_244_828_7,
            ],
        ];
        let m = rotation.gcrs_to_itrs.to_row_major();
        for (row, expected_row) in m.iter().zip(expected) {
            for (value, expected_value) in row.iter().zip(expected_row) {
                assert_abs_diff_eq!(*value, expected_value, epsilon = 1e-12);
            }
        }
        assert_eq!(
            rotation.angular_velocity,
            Vector::new(0., 0., MEAN_EARTH_ROTATION_RATE)
        );
    }

    #[test]
    fn j2000_position_within_a_metre_and_deterministic() {
        let converter = GcrsToItrs::with_default_astronomy(FixedEop::default());
        let input = [StateVector::Position(Vector::new(6_378_137., 0., 0.))];

        let first = converter
            .transform(&input, j2000(), &j2000_params())
            .unwrap();
        let StateVector::Position(p) = first.vectors[0] else {
            panic!("position in, position out");
        };
        assert_abs_diff_eq!(
            p,
            Vector::new(1_128_643.924_264_289, 6_277_483.130_479_380_5, -171.863_615_403_311_2),
            epsilon = 1.
        );
        assert_eq!(first.advisory, None);

        let rerun = converter
            .transform(&input, j2000(), &j2000_params())
            .unwrap();
        assert_eq!(first, rerun);
        assert_eq!(first.to_column_major(), rerun.to_column_major());
    }

    #[test]
    fn j2000_state_with_velocity() {
        let converter = GcrsToItrs::with_default_astronomy(FixedEop::default());
        let out = converter
            .transform_components(&[&[7e6, 0., 0., 0., 7500., 0.]], j2000(), &j2000_params())
            .unwrap();
        let StateVector::PositionVelocity { position, velocity } = out.vectors[0] else {
            panic!("position+velocity in, position+velocity out");
        };
        assert_abs_diff_eq!(
            position,
            Vector::new(1_238_685.758_843_063_8, 6_889_532.462_748_239, -188.620_173_543_336_93),
            epsilon = 1e-3
        );
        assert_abs_diff_eq!(
            velocity,
            Vector::new(-6_879.249_295_013_877, 1_236.836_917_413_798_8, -0.210_036_099_327_487_54),
            epsilon = 1e-6
        );
    }

    #[test]
    fn position_only_batch_is_plain_rotation() {
        let converter = GcrsToItrs::with_default_astronomy(FixedEop::default());
        let positions = [
            Vector::<Gcrs>::new(7e6, -2e5, 1e6),
            Vector::new(-4e7, 1e3, 0.),
            Vector::new(0., 0., 6.4e6),
        ];
        let states: Vec<_> = positions.iter().copied().map(StateVector::Position).collect();
        let out = converter
            .transform(&states, j2000(), &j2000_params())
            .unwrap();
        for (position, state) in positions.iter().zip(&out.vectors) {
            assert_eq!(
                *state,
                StateVector::Position(out.rotation.transform(*position))
            );
        }
    }

    #[test]
    fn tirs_rotation_ignores_polar_motion() {
        let converter = GcrsToItrs::with_default_astronomy(FixedEop::default());
        let with_polar_motion = j2000_params().with_polar_motion(PolarMotion::new(
            rad(1e-6),
            rad(-2e-6),
        ));
        let (without, _) = converter.earth_rotation(j2000(), &j2000_params()).unwrap();
        let (with, _) = converter
            .earth_rotation(j2000(), &with_polar_motion)
            .unwrap();
        assert_eq!(without.gcrs_to_tirs, with.gcrs_to_tirs);
        assert_ne!(without.gcrs_to_itrs, with.gcrs_to_itrs);
    }

    #[test]
    fn no_rotation_velocity_term_when_day_is_doubled() {
        let converter = GcrsToItrs::with_default_astronomy(FixedEop::default());
        let params = j2000_params()
            .with_lod(s(SECONDS_PER_DAY))
            .with_polar_motion(PolarMotion::new(rad(3e-7), rad(4e-7)));
        let (rotation, _) = converter.earth_rotation(j2000(), &params).unwrap();
        assert_eq!(rotation.angular_velocity, Vector::new(0., 0., 0.));

        let position = Vector::<Gcrs>::new(7e6, 1e5, -3e5);
        let velocity = Vector::<Gcrs>::new(-10., 7500., 20.);
        let (_, v) = rotation.position_velocity(position, velocity);
        let expected = rotation
            .polar_motion
            .transform(rotation.gcrs_to_tirs.transform(velocity));
        assert_abs_diff_eq!(v, expected, epsilon = 1e-12);
    }

    #[test]
    fn explicit_parameters_match_manually_overridden_provider_values() {
        let provider_values = EarthOrientation {
            delta_t: s(69.2),
            polar_motion: PolarMotion::new(rad(1e-6), rad(1.5e-6)),
            pole_offsets: PoleOffsets::new(rad(1e-9), rad(-1e-9)),
            lod: s(1e-3),
        };
        let explicit_xp_yp = PolarMotion::new(rad(-4e-7), rad(2e-7));
        let tt = JulianDate::new(2_451_545.0, 6_000.25);

        let converter = GcrsToItrs::with_default_astronomy(FixedEop(provider_values));
        let params = OrientationParameters::default().with_polar_motion(explicit_xp_yp);
        let via_override = converter
            .transform(&[StateVector::Position(Vector::new(7e6, 0., 0.))], tt, &params)
            .unwrap();

        let mut manual = provider_values;
        manual.polar_motion = explicit_xp_yp;
        let all_explicit = OrientationParameters {
            delta_t: Some(manual.delta_t),
            polar_motion: Some(manual.polar_motion),
            pole_offsets: Some(manual.pole_offsets),
            lod: Some(manual.lod),
        };
        let via_manual = converter
            .transform(&[StateVector::Position(Vector::new(7e6, 0., 0.))], tt, &all_explicit)
            .unwrap();

        assert_eq!(via_override.orientation, manual);
        assert_eq!(via_override.vectors, via_manual.vectors);
        assert_eq!(via_override.rotation, via_manual.rotation);
    }

    #[test]
    fn provider_is_called_once_only_when_something_is_missing() {
        let eop = CountingEop::default();
        let converter = GcrsToItrs::with_default_astronomy(&eop);

        converter
            .transform(&[], j2000(), &j2000_params())
            .unwrap();
        assert_eq!(eop.calls.get(), 0);

        let missing_lod = OrientationParameters {
            lod: None,
            ..j2000_params()
        };
        converter.transform(&[], j2000(), &missing_lod).unwrap();
        // tt_to_tai, tai_to_utc and get_eop, once each
        assert_eq!(eop.calls.get(), 3);
    }

    #[test]
    fn non_finite_provider_values_are_rejected() {
        let bad = EarthOrientation {
            lod: s(f64::INFINITY),
            ..EarthOrientation::default()
        };
        let converter = GcrsToItrs::with_default_astronomy(FixedEop(bad));
        assert_eq!(
            converter.transform(&[], j2000(), &OrientationParameters::default()),
            Err(TransformError::ExternalProvider(EopError::NonFinite {
                field: "lod"
            }))
        );
    }

    #[test]
    fn non_finite_epoch_fails_time_conversion() {
        let converter = GcrsToItrs::with_default_astronomy(FixedEop::default());
        assert!(matches!(
            converter.transform(
                &[],
                JulianDate::new(f64::NAN, 0.),
                &OrientationParameters::default()
            ),
            Err(TransformError::TimeConversion { .. })
        ));
    }

    #[test]
    fn date_without_utc_is_fatal() {
        let eop = CountingEop::default();
        let astronomy = CountingAstronomy::default();
        let converter = GcrsToItrs::new(&eop, &astronomy);
        let result = converter.transform(
            &[StateVector::Position(Vector::new(7e6, 0., 0.))],
            JulianDate::new(-1e7, 0.),
            &OrientationParameters::default().with_delta_t(s(64.184)),
        );
        assert!(
            matches!(result, Err(TransformError::UnacceptableDate { .. })),
            "{result:?}"
        );
        // tt_to_tai and tai_to_utc only
        assert_eq!(eop.calls.get(), 2);
        assert_eq!(astronomy.calls.get(), 0);
    }

    #[test]
    fn non_finite_explicit_parameter_is_rejected_up_front() {
        let eop = CountingEop::default();
        let astronomy = CountingAstronomy::default();
        let converter = GcrsToItrs::new(&eop, &astronomy);
        let params = j2000_params().with_pole_offsets(PoleOffsets::new(rad(f64::NAN), rad(0.)));
        assert_eq!(
            converter.transform(
                &[StateVector::Position(Vector::new(7e6, 0., 0.))],
                j2000(),
                &params
            ),
            Err(TransformError::NonFiniteParameter { field: "dx" })
        );
        assert_eq!(eop.calls.get(), 0);
        assert_eq!(astronomy.calls.get(), 0);
    }

    #[test]
    fn geocentre_gets_no_rotational_velocity() {
        let converter = GcrsToItrs::with_default_astronomy(FixedEop(EarthOrientation {
            delta_t: s(64.184),
            polar_motion: PolarMotion::new(rad(2e-7), rad(1.5e-6)),
            ..EarthOrientation::default()
        }));
        let orientation = converter.eop().0;
        let ut1 = converter.eop().tt_to_ut1(j2000(), orientation.delta_t);
        let rotation = EarthRotation::compose(converter.astronomy(), j2000(), ut1, &orientation);
        let (resolved, _) = converter
            .earth_rotation(j2000(), &OrientationParameters::default())
            .unwrap();
        assert_eq!(rotation, resolved);

        let velocity = Vector::<Gcrs>::new(-10., 7500., 20.);
        let (position, v) = rotation.position_velocity(Vector::zero(), velocity);
        assert_eq!(position, Vector::zero());
        let expected = rotation
            .polar_motion
            .transform(rotation.gcrs_to_tirs.transform(velocity));
        assert_abs_diff_eq!(v, expected, epsilon = 1e-12);
    }

    #[test]
    fn dubious_date_is_advised_not_fatal() {
        let converter = GcrsToItrs::with_default_astronomy(FixedEop::default());
        // 2100-01-01, long after the last known leap second
        let out = converter
            .transform(
                &[StateVector::Position(Vector::new(7e6, 0., 0.))],
                JulianDate::new(2_488_070.0, 0.),
                &OrientationParameters::default(),
            )
            .unwrap();
        assert!(matches!(
            out.advisory,
            Some(DateAdvisory::BeyondLeapSecondTable { .. })
        ));
        assert_eq!(out.vectors.len(), 1);
    }

    #[rstest]
    #[case(&[&[1., 2.][..]], "state vector", 2)]
    #[case(&[&[1., 2., 3.][..], &[1., 2., 3., 4.][..]], "state vector", 4)]
    #[case(&[&[1., 2., 3., 4., 5.][..]], "state vector", 5)]
    #[case(&[&[1., 2., 3.][..], &[1., 2., 3., 4., 5., 6.][..]], "state vector batch", 6)]
    fn malformed_components_fail_before_any_collaborator_call(
        #[case] states: &[&[f64]],
        #[case] what: &'static str,
        #[case] found: usize,
    ) {
        let eop = CountingEop::default();
        let astronomy = CountingAstronomy::default();
        let converter = GcrsToItrs::new(&eop, &astronomy);
        assert_eq!(
            converter.transform_components(states, j2000(), &OrientationParameters::default()),
            Err(TransformError::InvalidDimension { what, found })
        );
        assert_eq!(eop.calls.get(), 0);
        assert_eq!(astronomy.calls.get(), 0);
    }

    #[rstest]
    #[case(&[1., 2., 3., 4.], 4, "state vector", 4)]
    #[case(&[1., 2., 3., 4.], 3, "column-major batch", 4)]
    #[case(&[1., 2., 3., 4., 5., 6., 7.], 6, "column-major batch", 7)]
    fn malformed_column_major_fails_before_any_collaborator_call(
        #[case] data: &[f64],
        #[case] rows: usize,
        #[case] what: &'static str,
        #[case] found: usize,
    ) {
        let eop = CountingEop::default();
        let astronomy = CountingAstronomy::default();
        let converter = GcrsToItrs::new(&eop, &astronomy);
        assert_eq!(
            converter.transform_column_major(data, rows, j2000(), &OrientationParameters::default()),
            Err(TransformError::InvalidDimension { what, found })
        );
        assert_eq!(eop.calls.get(), 0);
        assert_eq!(astronomy.calls.get(), 0);
    }

    #[test]
    fn column_major_round_trip_layout() {
        let converter = GcrsToItrs::with_default_astronomy(FixedEop::default());
        let data = [7e6, 0., 0., 0., 7500., 0., 0., 7e6, 0., -7500., 0., 0.];
        let out = converter
            .transform_column_major(&data, 6, j2000(), &j2000_params())
            .unwrap();
        assert_eq!(out.vectors.len(), 2);

        let by_components = converter
            .transform_components(&[&data[..6], &data[6..]], j2000(), &j2000_params())
            .unwrap();
        assert_eq!(out, by_components);
        assert_eq!(out.to_column_major().len(), data.len());
        assert_eq!(out.to_column_major()[..6], out.vectors[0].to_components()[..]);
    }

    #[test]
    fn transformed_serializes() {
        let converter = GcrsToItrs::with_default_astronomy(FixedEop::default());
        let out = converter
            .transform(&[StateVector::Position(Vector::new(1., 0., 0.))], j2000(), &j2000_params())
            .unwrap();
        let yaml = serde_yaml::to_string(&out).unwrap();
        let back: Transformed = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, out);
    }

    /// An arbitrary epoch within a century of J2000 with plausible orientation parameters.
    #[derive(Debug, Clone)]
    struct Scenario {
        tt: (f64, f64),
        orientation: EarthOrientation,
    }

    impl Arbitrary for Scenario {
        fn arbitrary(g: &mut Gen) -> Self {
            // quickcheck will give us awkward f64 values -- we ignore those
            let mut normal = || loop {
                match f64::arbitrary(g) {
                    0. => break 0.,
                    f if f.is_normal() => break f,
                    _ => {}
                }
            };
            let days = normal().rem_euclid(73_050.) - 36_525.;
            let arcsec = 4.848_136_811_095_36e-6;
            let orientation = EarthOrientation {
                delta_t: s(normal().rem_euclid(120.) - 20.),
                polar_motion: PolarMotion::new(
                    rad((normal().rem_euclid(2.) - 1.) * arcsec),
                    rad((normal().rem_euclid(2.) - 1.) * arcsec),
                ),
                pole_offsets: PoleOffsets::new(
                    rad((normal().rem_euclid(2e-3) - 1e-3) * arcsec),
                    rad((normal().rem_euclid(2e-3) - 1e-3) * arcsec),
                ),
                lod: s(normal().rem_euclid(0.01) - 0.005),
            };
            Self {
                tt: (J2000_TT.0, days),
                orientation,
            }
        }
    }

    quickcheck! {
        fn composed_rotations_are_proper_rotations(scenario: Scenario) -> bool {
            let tt = JulianDate::new(scenario.tt.0, scenario.tt.1);
            let ut1 = crate::time::tt_to_ut1(tt, scenario.orientation.delta_t);
            let rotation = EarthRotation::compose(&Iau2006B, tt, ut1, &scenario.orientation);
            // orthogonal with determinant +1, ie no reflection
            let proper = |orthogonal: bool, determinant: f64| {
                orthogonal && (determinant - 1.).abs() < ORTHOGONALITY_TOLERANCE
            };
            proper(
                rotation.gcrs_to_itrs.is_orthogonal(ORTHOGONALITY_TOLERANCE),
                rotation.gcrs_to_itrs.determinant(),
            ) && proper(
                rotation.gcrs_to_tirs.is_orthogonal(ORTHOGONALITY_TOLERANCE),
                rotation.gcrs_to_tirs.determinant(),
            ) && proper(
                rotation.polar_motion.is_orthogonal(ORTHOGONALITY_TOLERANCE),
                rotation.polar_motion.determinant(),
            )
        }

        fn position_norm_is_preserved(scenario: Scenario) -> bool {
            let tt = JulianDate::new(scenario.tt.0, scenario.tt.1);
            let ut1 = crate::time::tt_to_ut1(tt, scenario.orientation.delta_t);
            let rotation = EarthRotation::compose(&Iau2006B, tt, ut1, &scenario.orientation);
            let p = Vector::<Gcrs>::new(4.2e7, -1.3e6, 2.5e5);
            (rotation.position(p).magnitude() - p.magnitude()).abs() < 1e-4
        }
    }
}
