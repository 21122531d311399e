//! Earth orientation parameters, and the caller's overrides for them.

use crate::eop::EopError;
use crate::error::TransformError;
use crate::time::Advised;
use uom::si::angle::radian;
use uom::si::f64::{Angle, Time};
use uom::si::time::second;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Coordinates of the Celestial Intermediate Pole relative to the ITRS pole.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolarMotion {
    pub xp: Angle,
    pub yp: Angle,
}

/// Observed corrections (dX, dY) to the CIP position in the GCRS.
///
/// IERS values are relative to the IAU 2006/2000A precession-nutation model. They are added to
/// whatever [`AstronomyPrimitives::cip_xys`](crate::astronomy::AstronomyPrimitives::cip_xys)
/// returns, so they are only as meaningful as that model is close to 2000A.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PoleOffsets {
    pub dx: Angle,
    pub dy: Angle,
}

fn angle_pair(values: &[f64], what: &'static str) -> Result<(Angle, Angle), TransformError> {
    match *values {
        [a, b] => Ok((Angle::new::<radian>(a), Angle::new::<radian>(b))),
        _ => Err(TransformError::InvalidDimension {
            what,
            found: values.len(),
        }),
    }
}

impl PolarMotion {
    #[must_use]
    pub fn new(xp: Angle, yp: Angle) -> Self {
        Self { xp, yp }
    }

    /// Builds polar motion from `[xp, yp]` in radians.
    pub fn try_from_slice(values: &[f64]) -> Result<Self, TransformError> {
        let (xp, yp) = angle_pair(values, "polar motion")?;
        Ok(Self { xp, yp })
    }
}

impl PoleOffsets {
    #[must_use]
    pub fn new(dx: Angle, dy: Angle) -> Self {
        Self { dx, dy }
    }

    /// Builds pole offsets from `[dX, dY]` in radians.
    pub fn try_from_slice(values: &[f64]) -> Result<Self, TransformError> {
        let (dx, dy) = angle_pair(values, "pole offsets")?;
        Ok(Self { dx, dy })
    }
}

/// A complete set of Earth orientation parameters for one epoch.
///
/// The default is all zeros.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EarthOrientation {
    /// TT − UT1.
    pub delta_t: Time,
    pub polar_motion: PolarMotion,
    pub pole_offsets: PoleOffsets,
    /// Excess length of day over 86400 s.
    pub lod: Time,
}

/// Name of the first field that is set and not finite.
fn first_non_finite(fields: [(&'static str, Option<f64>); 6]) -> Option<&'static str> {
    fields
        .into_iter()
        .find(|(_, value)| value.is_some_and(|v| !v.is_finite()))
        .map(|(field, _)| field)
}

impl EarthOrientation {
    /// Checks that every value is finite.
    pub fn validate(&self) -> Result<(), EopError> {
        match first_non_finite([
            ("delta_t", Some(self.delta_t.get::<second>())),
            ("xp", Some(self.polar_motion.xp.get::<radian>())),
            ("yp", Some(self.polar_motion.yp.get::<radian>())),
            ("dx", Some(self.pole_offsets.dx.get::<radian>())),
            ("dy", Some(self.pole_offsets.dy.get::<radian>())),
            ("lod", Some(self.lod.get::<second>())),
        ]) {
            Some(field) => Err(EopError::NonFinite { field }),
            None => Ok(()),
        }
    }
}

/// Caller-supplied Earth orientation parameters.
///
/// Each field is optional. Those left as `None` are taken from the
/// [`EopProvider`](crate::eop::EopProvider); those that are set always win over what the provider
/// says. When all four are set the provider is not consulted at all.
///
/// All fields default to `None`, and any of them may be left out when deserializing:
///
/// ```rust
/// # use earthframe::orientation::OrientationParameters;
/// # use uom::si::{f64::Time, time::second};
/// let params = OrientationParameters::default().with_delta_t(Time::new::<second>(64.184));
/// assert!(params.polar_motion.is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OrientationParameters {
    /// TT − UT1.
    pub delta_t: Option<Time>,
    pub polar_motion: Option<PolarMotion>,
    pub pole_offsets: Option<PoleOffsets>,
    /// Excess length of day over 86400 s.
    pub lod: Option<Time>,
}

impl OrientationParameters {
    #[must_use]
    pub fn with_delta_t(mut self, delta_t: Time) -> Self {
        self.delta_t = Some(delta_t);
        self
    }

    #[must_use]
    pub fn with_polar_motion(mut self, polar_motion: PolarMotion) -> Self {
        self.polar_motion = Some(polar_motion);
        self
    }

    #[must_use]
    pub fn with_pole_offsets(mut self, pole_offsets: PoleOffsets) -> Self {
        self.pole_offsets = Some(pole_offsets);
        self
    }

    #[must_use]
    pub fn with_lod(mut self, lod: Time) -> Self {
        self.lod = Some(lod);
        self
    }

    /// Checks that every field that is set is finite.
    pub fn validate(&self) -> Result<(), TransformError> {
        match first_non_finite([
            ("delta_t", self.delta_t.map(|t| t.get::<second>())),
            ("xp", self.polar_motion.map(|p| p.xp.get::<radian>())),
            ("yp", self.polar_motion.map(|p| p.yp.get::<radian>())),
            ("dx", self.pole_offsets.map(|p| p.dx.get::<radian>())),
            ("dy", self.pole_offsets.map(|p| p.dy.get::<radian>())),
            ("lod", self.lod.map(|t| t.get::<second>())),
        ]) {
            Some(field) => Err(TransformError::NonFiniteParameter { field }),
            None => Ok(()),
        }
    }

    /// Returns the parameters if every field is set.
    #[must_use]
    pub fn complete(&self) -> Option<EarthOrientation> {
        Some(EarthOrientation {
            delta_t: self.delta_t?,
            polar_motion: self.polar_motion?,
            pole_offsets: self.pole_offsets?,
            lod: self.lod?,
        })
    }

    /// Overrides the fields of `base` with those set here.
    #[must_use]
    pub fn apply_to(&self, base: EarthOrientation) -> EarthOrientation {
        EarthOrientation {
            delta_t: self.delta_t.unwrap_or(base.delta_t),
            polar_motion: self.polar_motion.unwrap_or(base.polar_motion),
            pole_offsets: self.pole_offsets.unwrap_or(base.pole_offsets),
            lod: self.lod.unwrap_or(base.lod),
        }
    }

    /// Produces the full parameter set.
    ///
    /// The fields set here are checked first, before `fetch` is considered. `fetch` is called at
    /// most once, and only if some field is missing. Its advisory, if any, is passed through.
    /// Provider values are checked after the overrides are applied, so a non-finite provider
    /// value that is overridden does no harm.
    pub fn resolve<F>(&self, fetch: F) -> Result<Advised<EarthOrientation>, TransformError>
    where
        F: FnOnce() -> Result<Advised<EarthOrientation>, TransformError>,
    {
        self.validate()?;
        if let Some(complete) = self.complete() {
            return Ok(Advised::clean(complete));
        }
        let merged = fetch()?.map(|base| self.apply_to(base));
        merged.value.validate()?;
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;

    fn provider_values() -> EarthOrientation {
        EarthOrientation {
            delta_t: Time::new::<second>(69.),
            polar_motion: PolarMotion::try_from_slice(&[1e-6, 2e-6]).unwrap(),
            pole_offsets: PoleOffsets::try_from_slice(&[3e-10, 4e-10]).unwrap(),
            lod: Time::new::<second>(1e-3),
        }
    }

    #[rstest]
    #[case(&[])]
    #[case(&[1e-6])]
    #[case(&[1e-6, 2e-6, 3e-6])]
    fn angle_pairs_need_two_values(#[case] values: &[f64]) {
        assert_eq!(
            PolarMotion::try_from_slice(values),
            Err(TransformError::InvalidDimension {
                what: "polar motion",
                found: values.len()
            })
        );
        assert_eq!(
            PoleOffsets::try_from_slice(values),
            Err(TransformError::InvalidDimension {
                what: "pole offsets",
                found: values.len()
            })
        );
    }

    #[test]
    fn complete_parameters_skip_the_provider() {
        let params = OrientationParameters::default()
            .with_delta_t(Time::new::<second>(64.184))
            .with_polar_motion(PolarMotion::default())
            .with_pole_offsets(PoleOffsets::default())
            .with_lod(Time::new::<second>(0.));
        let calls = Cell::new(0);
        let resolved = params
            .resolve(|| {
                calls.set(calls.get() + 1);
                Ok(Advised::clean(provider_values()))
            })
            .unwrap();
        assert_eq!(calls.get(), 0);
        assert_eq!(resolved.value.delta_t, Time::new::<second>(64.184));
        assert_eq!(resolved.advisory, None);
    }

    #[test]
    fn explicit_fields_win_over_provider() {
        let xp_yp = PolarMotion::try_from_slice(&[5e-7, -5e-7]).unwrap();
        let params = OrientationParameters::default().with_polar_motion(xp_yp);
        let calls = Cell::new(0);
        let resolved = params
            .resolve(|| {
                calls.set(calls.get() + 1);
                Ok(Advised::clean(provider_values()))
            })
            .unwrap()
            .value;
        assert_eq!(calls.get(), 1);

        let mut expected = provider_values();
        expected.polar_motion = xp_yp;
        assert_eq!(resolved, expected);
    }

    #[test]
    fn provider_failure_propagates() {
        let params = OrientationParameters::default();
        assert_eq!(
            params.resolve(|| Err(EopError::Empty.into())),
            Err(TransformError::ExternalProvider(EopError::Empty))
        );
    }

    #[test]
    fn non_finite_explicit_value_fails_without_fetching() {
        let params = OrientationParameters::default().with_polar_motion(PolarMotion::new(
            Angle::new::<radian>(0.),
            Angle::new::<radian>(f64::NAN),
        ));
        let calls = Cell::new(0);
        assert_eq!(
            params.resolve(|| {
                calls.set(calls.get() + 1);
                Ok(Advised::clean(provider_values()))
            }),
            Err(TransformError::NonFiniteParameter { field: "yp" })
        );
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn overridden_provider_values_are_not_checked() {
        let mut broken = provider_values();
        broken.lod = Time::new::<second>(f64::INFINITY);
        let params = OrientationParameters::default().with_lod(Time::new::<second>(2e-3));
        let resolved = params.resolve(|| Ok(Advised::clean(broken))).unwrap();
        assert_eq!(resolved.value.lod, Time::new::<second>(2e-3));

        let params = OrientationParameters::default().with_delta_t(Time::new::<second>(69.));
        assert_eq!(
            params.resolve(|| Ok(Advised::clean(broken))),
            Err(TransformError::ExternalProvider(EopError::NonFinite {
                field: "lod"
            }))
        );
    }

    #[test]
    fn validate_names_the_offending_field() {
        let mut eop = provider_values();
        assert_eq!(eop.validate(), Ok(()));
        eop.lod = Time::new::<second>(f64::NAN);
        assert_eq!(eop.validate(), Err(EopError::NonFinite { field: "lod" }));
    }

    #[test]
    fn deserialize_partial_parameters() {
        let params: OrientationParameters = serde_yaml::from_str(
            "
            delta_t: 64.184
            polar_motion:
              xp: 1.0e-7
              yp: -2.0e-7
            ",
        )
        .unwrap();
        assert_eq!(params.delta_t, Some(Time::new::<second>(64.184)));
        assert_eq!(
            params.polar_motion,
            Some(PolarMotion::new(
                Angle::new::<radian>(1.0e-7),
                Angle::new::<radian>(-2.0e-7)
            ))
        );
        assert_eq!(params.pole_offsets, None);
        assert_eq!(params.lod, None);
    }
}
