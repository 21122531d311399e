//! Sources of Earth orientation parameters.
//!
//! [`EopProvider`] is the seam between the conversion pipeline and wherever EOP data comes from.
//! It also owns the time-scale conversions the pipeline needs to find the UTC epoch at which to
//! look parameters up; these default to the implementations in [`crate::time`].
//!
//! Two providers are included: [`FixedEop`], which returns the same values for every epoch, and
//! [`EopTable`], which interpolates daily records in the units IERS bulletins use.

use crate::error::TransformError;
use crate::orientation::{EarthOrientation, PolarMotion, PoleOffsets};
use crate::time::{self, Advised, JulianDate, Tai, Tt, Ut1, Utc, TT_MINUS_TAI_SECONDS};
use crate::util::{ARCSEC_TO_RAD, MILLIARCSEC_TO_RAD};
use thiserror::Error;
use tracing::debug;
use uom::si::angle::radian;
use uom::si::f64::{Angle, Time};
use uom::si::time::second;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Failures of an [`EopProvider`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EopError {
    #[error("no Earth orientation records")]
    Empty,

    /// Records must be in strictly increasing MJD order.
    #[error("Earth orientation record {index} is not after the one before it")]
    Unsorted { index: usize },

    #[error("Earth orientation value `{field}` is not finite")]
    NonFinite { field: &'static str },

    #[error("MJD {mjd} is outside the Earth orientation data span [{first}, {last}]")]
    OutOfRange { mjd: f64, first: f64, last: f64 },

    /// TAI−UTC could not be determined for a record.
    #[error("UTC is undefined at MJD {mjd}")]
    UndefinedUtc { mjd: f64 },
}

/// Provides Earth orientation parameters, and the time-scale conversions needed to look them up.
///
/// Only [`EopProvider::get_eop`] must be implemented.
pub trait EopProvider {
    /// Converts TT to TAI.
    fn tt_to_tai(&self, tt: JulianDate<Tt>) -> Result<JulianDate<Tai>, TransformError> {
        time::tt_to_tai(tt)
    }

    /// Converts TAI to UTC, flagging dates UTC can only describe on a best-effort basis.
    fn tai_to_utc(&self, tai: JulianDate<Tai>) -> Result<Advised<JulianDate<Utc>>, TransformError> {
        time::tai_to_utc(tai)
    }

    /// Converts TT to UT1 given ΔT = TT − UT1.
    fn tt_to_ut1(&self, tt: JulianDate<Tt>, delta_t: Time) -> JulianDate<Ut1> {
        time::tt_to_ut1(tt, delta_t)
    }

    /// Returns every Earth orientation parameter at the given UTC epoch, in one go.
    fn get_eop(&self, utc: JulianDate<Utc>) -> Result<EarthOrientation, EopError>;
}

impl<T> EopProvider for &T
where
    T: EopProvider + ?Sized,
{
    fn tt_to_tai(&self, tt: JulianDate<Tt>) -> Result<JulianDate<Tai>, TransformError> {
        (**self).tt_to_tai(tt)
    }

    fn tai_to_utc(&self, tai: JulianDate<Tai>) -> Result<Advised<JulianDate<Utc>>, TransformError> {
        (**self).tai_to_utc(tai)
    }

    fn tt_to_ut1(&self, tt: JulianDate<Tt>, delta_t: Time) -> JulianDate<Ut1> {
        (**self).tt_to_ut1(tt, delta_t)
    }

    fn get_eop(&self, utc: JulianDate<Utc>) -> Result<EarthOrientation, EopError> {
        (**self).get_eop(utc)
    }
}

/// Returns the same parameters at every epoch.
///
/// The default is all zeros, which is a reasonable choice when no EOP data is at hand and errors
/// of a few hundred metres (mostly from the missing UT1−UTC) are acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FixedEop(pub EarthOrientation);

impl EopProvider for FixedEop {
    fn get_eop(&self, _utc: JulianDate<Utc>) -> Result<EarthOrientation, EopError> {
        Ok(self.0)
    }
}

/// One day of Earth orientation data, in the units of IERS bulletins.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EopRecord {
    /// Modified Julian Date (UTC).
    pub mjd: f64,
    /// Polar motion x, in arcseconds.
    pub x_pole: f64,
    /// Polar motion y, in arcseconds.
    pub y_pole: f64,
    /// UT1 − UTC, in seconds.
    pub ut1_minus_utc: f64,
    /// Excess length of day, in seconds.
    #[cfg_attr(feature = "serde", serde(default))]
    pub lod: f64,
    /// Celestial pole offset dX, in milliarcseconds.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dx: f64,
    /// Celestial pole offset dY, in milliarcseconds.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dy: f64,
}

impl EopRecord {
    fn check_finite(&self) -> Result<(), EopError> {
        let fields = [
            ("mjd", self.mjd),
            ("x_pole", self.x_pole),
            ("y_pole", self.y_pole),
            ("ut1_minus_utc", self.ut1_minus_utc),
            ("lod", self.lod),
            ("dx", self.dx),
            ("dy", self.dy),
        ];
        match fields.iter().find(|(_, value)| !value.is_finite()) {
            Some(&(field, _)) => Err(EopError::NonFinite { field }),
            None => Ok(()),
        }
    }
}

/// Linearly interpolates daily [`EopRecord`]s.
///
/// UT1−UTC jumps by a second at every leap second, so it is interpolated as UT1−TAI instead,
/// which is continuous. ΔT is then `32.184 s − (UT1 − TAI)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct EopTable {
    records: Vec<EopRecord>,
    /// UT1 − TAI at each record, in seconds.
    #[cfg_attr(feature = "serde", serde(skip))]
    ut1_minus_tai: Vec<f64>,
}

impl EopTable {
    /// Builds a table from records in strictly increasing MJD order.
    pub fn new(records: Vec<EopRecord>) -> Result<Self, EopError> {
        if records.is_empty() {
            return Err(EopError::Empty);
        }
        for record in &records {
            record.check_finite()?;
        }
        if let Some(index) = records
            .windows(2)
            .position(|pair| pair[1].mjd <= pair[0].mjd)
        {
            return Err(EopError::Unsorted { index: index + 1 });
        }

        let ut1_minus_tai = records
            .iter()
            .map(|record| {
                let tai_minus_utc = tai_minus_utc_at(record.mjd)?;
                Ok(record.ut1_minus_utc - tai_minus_utc)
            })
            .collect::<Result<Vec<_>, EopError>>()?;

        debug!(
            records = records.len(),
            first = records[0].mjd,
            last = records[records.len() - 1].mjd,
            "Loaded Earth orientation table"
        );
        Ok(Self {
            records,
            ut1_minus_tai,
        })
    }

    #[must_use]
    pub fn records(&self) -> &[EopRecord] {
        &self.records
    }

    /// MJD span covered by the table.
    #[must_use]
    pub fn span(&self) -> (f64, f64) {
        let first = self.records.first().map_or(f64::NAN, |r| r.mjd);
        let last = self.records.last().map_or(f64::NAN, |r| r.mjd);
        (first, last)
    }

    /// Index `i` and weight `w` such that the value at `mjd` is `(1 − w)·v[i] + w·v[i + 1]`.
    fn bracket(&self, mjd: f64) -> Result<(usize, f64), EopError> {
        let (first, last) = self.span();
        if !(first..=last).contains(&mjd) {
            return Err(EopError::OutOfRange { mjd, first, last });
        }
        if self.records.len() == 1 {
            return Ok((0, 0.));
        }
        // first index whose record is after mjd, clamped so that i + 1 is valid
        let after = self.records.partition_point(|r| r.mjd <= mjd);
        let i = after.saturating_sub(1).min(self.records.len() - 2);
        let (m0, m1) = (self.records[i].mjd, self.records[i + 1].mjd);
        Ok((i, (mjd - m0) / (m1 - m0)))
    }
}

fn tai_minus_utc_at(mjd: f64) -> Result<f64, EopError> {
    let undefined = |_| EopError::UndefinedUtc { mjd };
    let date = time::jd_to_calendar(JulianDate::<Utc>::from_mjd(mjd)).map_err(undefined)?;
    let dat = time::delta_at(date.year, date.month, date.day, date.fraction).map_err(undefined)?;
    Ok(dat.value.get::<second>())
}

fn lerp(a: f64, b: f64, w: f64) -> f64 {
    a + (b - a) * w
}

impl EopProvider for EopTable {
    fn get_eop(&self, utc: JulianDate<Utc>) -> Result<EarthOrientation, EopError> {
        let mjd = utc.mjd();
        let (i, w) = self.bracket(mjd)?;
        let j = (i + 1).min(self.records.len() - 1);
        let (a, b) = (&self.records[i], &self.records[j]);
        let at = |f: fn(&EopRecord) -> f64| lerp(f(a), f(b), w);

        let ut1_minus_tai = lerp(self.ut1_minus_tai[i], self.ut1_minus_tai[j], w);
        let arcsec = |v: f64| Angle::new::<radian>(v * ARCSEC_TO_RAD);
        let mas = |v: f64| Angle::new::<radian>(v * MILLIARCSEC_TO_RAD);

        debug!(mjd, index = i, weight = w, "Interpolated Earth orientation");
        Ok(EarthOrientation {
            delta_t: Time::new::<second>(TT_MINUS_TAI_SECONDS - ut1_minus_tai),
            polar_motion: PolarMotion::new(arcsec(at(|r| r.x_pole)), arcsec(at(|r| r.y_pole))),
            pole_offsets: PoleOffsets::new(mas(at(|r| r.dx)), mas(at(|r| r.dy))),
            lod: Time::new::<second>(at(|r| r.lod)),
        })
    }
}
