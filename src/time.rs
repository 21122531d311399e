//! Time scales and the conversions between them.
//!
//! Epochs are [`JulianDate`]s: two-part Julian dates tagged with their [`TimeScale`]. The date is
//! `part1 + part2`, and how it is split is up to the caller. A common choice is to put the
//! integral day (or `2400000.5`) in `part1` and the rest in `part2`. Conversions only ever shift
//! one of the two parts, so the caller's split and its precision survive.
//!
//! UTC is handled with the full leap-second history, including the 1960–1972 era when UTC ran at
//! a different rate from TAI. Dates UTC cannot describe well produce a [`DateAdvisory`] rather
//! than an error; dates it cannot describe at all produce
//! [`TransformError::UnacceptableDate`].

use crate::error::{DateAdvisory, TransformError};
use crate::util::{shift_two_part, MJD_ZERO, SECONDS_PER_DAY};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use tracing::warn;
use uom::si::f64::Time;
use uom::si::time::second;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Marks a time scale that a [`JulianDate`] can be expressed in.
pub trait TimeScale {
    /// Conventional abbreviation of the scale (eg, "TT").
    const NAME: &'static str;
}

macro_rules! time_scale {
    ($(#[$attr:meta])* $name:ident named $label:literal) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub struct $name;

        impl TimeScale for $name {
            const NAME: &'static str = $label;
        }
    };
}

time_scale!(
    /// Terrestrial Time.
    Tt named "TT"
);
time_scale!(
    /// International Atomic Time.
    Tai named "TAI"
);
time_scale!(
    /// Coordinated Universal Time.
    Utc named "UTC"
);
time_scale!(
    /// Universal Time, the scale that tracks Earth's actual rotation.
    Ut1 named "UT1"
);

/// TT − TAI, exactly.
pub const TT_MINUS_TAI_SECONDS: f64 = 32.184;

/// Last year covered by the leap-second table.
const LEAP_SECOND_TABLE_YEAR: i32 = 2023;

/// Years past [`LEAP_SECOND_TABLE_YEAR`] for which the table is still trusted.
const LEAP_SECOND_TABLE_HORIZON: i32 = 5;

/// Earliest year the proleptic Gregorian calendar conversions accept.
const EARLIEST_CALENDAR_YEAR: i32 = -4799;

/// Bounds of the Julian dates that can be turned back into a calendar date.
const EARLIEST_JD: f64 = -68_569.5;
const LATEST_JD: f64 = 1e9;

/// Dates (year, month) at which TAI−UTC changed, and the new value in seconds.
///
/// Before 1972 the value is also a function of the date; see [`UTC_DRIFT`].
const LEAP_STEPS: [(i32, u32, f64); 42] = [
    (1960, 1, 1.417_818_0),
    (1961, 1, 1.422_818_0),
    (1961, 8, 1.372_818_0),
    (1962, 1, 1.845_858_0),
    (1963, 11, 1.945_858_0),
    (1964, 1, 3.240_130_0),
    (1964, 4, 3.340_130_0),
    (1964, 9, 3.440_130_0),
    (1965, 1, 3.540_130_0),
    (1965, 3, 3.640_130_0),
    (1965, 7, 3.740_130_0),
    (1965, 9, 3.840_130_0),
    (1966, 1, 4.313_170_0),
    (1968, 2, 4.213_170_0),
    (1972, 1, 10.0),
    (1972, 7, 11.0),
    (1973, 1, 12.0),
    (1974, 1, 13.0),
    (1975, 1, 14.0),
    (1976, 1, 15.0),
    (1977, 1, 16.0),
    (1978, 1, 17.0),
    (1979, 1, 18.0),
    (1980, 1, 19.0),
    (1981, 7, 20.0),
    (1982, 7, 21.0),
    (1983, 7, 22.0),
    (1985, 7, 23.0),
    (1988, 1, 24.0),
    (1990, 1, 25.0),
    (1991, 1, 26.0),
    (1992, 7, 27.0),
    (1993, 7, 28.0),
    (1994, 7, 29.0),
    (1996, 1, 30.0),
    (1997, 7, 31.0),
    (1999, 1, 32.0),
    (2006, 1, 33.0),
    (2009, 1, 34.0),
    (2012, 7, 35.0),
    (2015, 7, 36.0),
    (2017, 1, 37.0),
];

/// Reference MJD and rate (s/day) of the pre-1972 entries of [`LEAP_STEPS`], by index.
const UTC_DRIFT: [(f64, f64); 14] = [
    (37_300.0, 0.001_296_0),
    (37_300.0, 0.001_296_0),
    (37_300.0, 0.001_296_0),
    (37_665.0, 0.001_123_2),
    (37_665.0, 0.001_123_2),
    (38_761.0, 0.001_296_0),
    (38_761.0, 0.001_296_0),
    (38_761.0, 0.001_296_0),
    (38_761.0, 0.001_296_0),
    (38_761.0, 0.001_296_0),
    (38_761.0, 0.001_296_0),
    (38_761.0, 0.001_296_0),
    (39_126.0, 0.002_592_0),
    (39_126.0, 0.002_592_0),
];

const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A two-part Julian date in time scale `S`.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = ""))]
pub struct JulianDate<S> {
    part1: f64,
    part2: f64,
    #[cfg_attr(feature = "serde", serde(skip))]
    scale: PhantomData<S>,
}

// manual impls of Clone and Copy to avoid requiring S: Copy + Clone
impl<S> Clone for JulianDate<S> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<S> Copy for JulianDate<S> {}

impl<S> PartialEq<Self> for JulianDate<S> {
    fn eq(&self, other: &Self) -> bool {
        self.part1 == other.part1 && self.part2 == other.part2
    }
}

impl<S> JulianDate<S> {
    /// Constructs the date `part1 + part2`.
    #[must_use]
    pub fn new(part1: f64, part2: f64) -> Self {
        Self {
            part1,
            part2,
            scale: PhantomData,
        }
    }

    /// Constructs a date from a single Julian date value.
    #[must_use]
    pub fn from_jd(jd: f64) -> Self {
        Self::new(jd, 0.)
    }

    /// Constructs a date from a Modified Julian Date, keeping `2400000.5` in the first part.
    #[must_use]
    pub fn from_mjd(mjd: f64) -> Self {
        Self::new(MJD_ZERO, mjd)
    }

    #[must_use]
    pub fn parts(&self) -> (f64, f64) {
        (self.part1, self.part2)
    }

    /// The date as a single value. This loses precision compared to [`JulianDate::parts`].
    #[must_use]
    pub fn jd(&self) -> f64 {
        self.part1 + self.part2
    }

    /// The Modified Julian Date.
    #[must_use]
    pub fn mjd(&self) -> f64 {
        (self.part1 - MJD_ZERO) + self.part2
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.part1.is_finite() && self.part2.is_finite()
    }
}

impl<S> Display for JulianDate<S>
where
    S: TimeScale,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "JD {} + {} {}", self.part1, self.part2, S::NAME)
    }
}

/// A value that may come with a non-fatal [`DateAdvisory`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Advised<T> {
    pub value: T,
    pub advisory: Option<DateAdvisory>,
}

impl<T> Advised<T> {
    /// A value with no advisory attached.
    #[must_use]
    pub fn clean(value: T) -> Self {
        Self {
            value,
            advisory: None,
        }
    }

    #[must_use]
    pub fn with_advisory(value: T, advisory: Option<DateAdvisory>) -> Self {
        Self { value, advisory }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Advised<U> {
        Advised {
            value: f(self.value),
            advisory: self.advisory,
        }
    }

    #[must_use]
    pub fn into_parts(self) -> (T, Option<DateAdvisory>) {
        (self.value, self.advisory)
    }
}

/// A Gregorian calendar date with the fraction of the day elapsed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// In [0, 1).
    pub fraction: f64,
}

fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// MJD at 0h of the given Gregorian date.
fn calendar_to_mjd(year: i32, month: u32, day: u32) -> Result<f64, TransformError> {
    let invalid = TransformError::InvalidCalendarDate { year, month, day };
    if year < EARLIEST_CALENDAR_YEAR || !(1..=12).contains(&month) {
        return Err(invalid);
    }
    let month_index = (month - 1) as usize;
    let days_in_month = DAYS_IN_MONTH[month_index] + u32::from(month == 2 && is_leap_year(year));
    if day < 1 || day > days_in_month {
        return Err(invalid);
    }

    let (year, month, day) = (i64::from(year), i64::from(month), i64::from(day));
    // integer divisions truncate towards zero, which the formula relies on
    let my = (month - 14) / 12;
    let iypmy = year + my;
    let mjd = (1461 * (iypmy + 4800)) / 4 + (367 * (month - 2 - 12 * my)) / 12
        - (3 * ((iypmy + 4900) / 100)) / 4
        + day
        - 2_432_076;
    Ok(mjd as f64)
}

/// Converts a Gregorian calendar date to the Julian date at 0h of that day.
///
/// The result is split as `(2400000.5, MJD)`. The proleptic Gregorian calendar is used for all
/// dates, with astronomical year numbering, back to 4800 BC.
pub fn calendar_to_jd<S>(year: i32, month: u32, day: u32) -> Result<JulianDate<S>, TransformError> {
    Ok(JulianDate::from_mjd(calendar_to_mjd(year, month, day)?))
}

fn jd_parts_to_calendar(dj1: f64, dj2: f64) -> Result<CalendarDate, TransformError> {
    let dj = dj1 + dj2;
    if !(EARLIEST_JD..=LATEST_JD).contains(&dj) {
        return Err(TransformError::UnacceptableDate { jd: dj });
    }

    let (d1, d2) = if dj1 >= dj2 { (dj1, dj2) } else { (dj2, dj1) };
    // calendar days start at midnight, Julian days at noon
    let d2 = d2 - 0.5;

    let f1 = d1 % 1.;
    let f2 = d2 % 1.;
    let mut f = (f1 + f2) % 1.;
    if f < 0. {
        f += 1.;
    }
    let d = (d1 - f1).round() + (d2 - f2).round() + (f1 + f2 - f).round();
    let jd = d.round() as i64 + 1;

    let mut l = jd + 68_569;
    let n = (4 * l) / 146_097;
    l -= (146_097 * n + 3) / 4;
    let i = (4000 * (l + 1)) / 1_461_001;
    l -= (1461 * i) / 4 - 31;
    let k = (80 * l) / 2447;
    let day = l - (2447 * k) / 80;
    l = k / 11;
    let month = k + 2 - 12 * l;
    let year = 100 * (n - 49) + i + l;

    Ok(CalendarDate {
        year: year as i32,
        month: month as u32,
        day: day as u32,
        fraction: f,
    })
}

/// Converts a Julian date to a Gregorian calendar date and fraction of day.
///
/// Dates before 4713 BC January 1 or absurdly far in the future give
/// [`TransformError::UnacceptableDate`].
pub fn jd_to_calendar<S>(date: JulianDate<S>) -> Result<CalendarDate, TransformError> {
    jd_parts_to_calendar(date.part1, date.part2)
}

/// TAI−UTC in seconds for the given UTC calendar date and fraction of day.
///
/// The fraction only matters before 1972, when TAI−UTC drifted continuously. Years before 1960
/// give zero with [`DateAdvisory::PredatesUtc`]; years far enough past the leap-second table
/// carry [`DateAdvisory::BeyondLeapSecondTable`] since leap seconds cannot be predicted.
pub fn delta_at(
    year: i32,
    month: u32,
    day: u32,
    fraction: f64,
) -> Result<Advised<Time>, TransformError> {
    Ok(delta_at_seconds(year, month, day, fraction)?.map(Time::new::<second>))
}

fn delta_at_seconds(
    year: i32,
    month: u32,
    day: u32,
    fraction: f64,
) -> Result<Advised<f64>, TransformError> {
    let mjd = calendar_to_mjd(year, month, day)?;
    if !(0.0..=1.0).contains(&fraction) {
        return Err(TransformError::InvalidCalendarDate { year, month, day });
    }

    let (first_year, _, _) = LEAP_STEPS[0];
    if year < first_year {
        return Ok(Advised::with_advisory(
            0.,
            Some(DateAdvisory::PredatesUtc { year }),
        ));
    }
    let advisory = (year > LEAP_SECOND_TABLE_YEAR + LEAP_SECOND_TABLE_HORIZON)
        .then_some(DateAdvisory::BeyondLeapSecondTable { year });

    let months = 12 * i64::from(year) + i64::from(month);
    let step = LEAP_STEPS
        .iter()
        .rposition(|&(y, m, _)| months >= 12 * i64::from(y) + i64::from(m))
        .unwrap_or(0);

    let (_, _, mut delta) = LEAP_STEPS[step];
    if let Some(&(reference_mjd, rate)) = UTC_DRIFT.get(step) {
        delta += (mjd + fraction - reference_mjd) * rate;
    }
    Ok(Advised::with_advisory(delta, advisory))
}

fn log_advisory(advisory: Option<DateAdvisory>) {
    if let Some(advisory) = advisory {
        warn!(%advisory, "dubious date for UTC");
    }
}

/// Converts TT to TAI by removing the fixed 32.184 s offset.
///
/// Fails with [`TransformError::TimeConversion`] if the date is not finite.
pub fn tt_to_tai(tt: JulianDate<Tt>) -> Result<JulianDate<Tai>, TransformError> {
    if !tt.is_finite() {
        return Err(TransformError::TimeConversion {
            reason: "TT epoch is not finite",
        });
    }
    let (part1, part2) = shift_two_part(tt.part1, tt.part2, -TT_MINUS_TAI_SECONDS / SECONDS_PER_DAY);
    Ok(JulianDate::new(part1, part2))
}

/// Converts UTC to TAI.
///
/// Days containing a leap second are treated as 86401 s long (86399 s for a negative one), and
/// pre-1972 days account for the rate offset of UTC at the time. The part of larger magnitude is
/// kept as is.
pub fn utc_to_tai(utc: JulianDate<Utc>) -> Result<Advised<JulianDate<Tai>>, TransformError> {
    let ((part1, part2), advisory) = utc_parts_to_tai(utc.part1, utc.part2)?;
    log_advisory(advisory);
    Ok(Advised::with_advisory(JulianDate::new(part1, part2), advisory))
}

fn utc_parts_to_tai(
    utc1: f64,
    utc2: f64,
) -> Result<((f64, f64), Option<DateAdvisory>), TransformError> {
    let big1 = utc1.abs() >= utc2.abs();
    let (u1, u2) = if big1 { (utc1, utc2) } else { (utc2, utc1) };

    let today = jd_parts_to_calendar(u1, u2)?;
    let at_midnight = delta_at_seconds(today.year, today.month, today.day, 0.)?;
    let at_noon = delta_at_seconds(today.year, today.month, today.day, 0.5)?;
    let tomorrow = jd_parts_to_calendar(u1 + 1.5, u2 - today.fraction)?;
    let at_next_midnight = delta_at_seconds(tomorrow.year, tomorrow.month, tomorrow.day, 0.)?;

    let dat0 = at_midnight.value;
    // pre-1972 rate offset, and any leap second at the end of the day
    let dlod = 2. * (at_noon.value - dat0);
    let dleap = at_next_midnight.value - (dat0 + dlod);

    let mut fd = today.fraction;
    fd *= (SECONDS_PER_DAY + dleap) / SECONDS_PER_DAY;
    fd *= (SECONDS_PER_DAY + dlod) / SECONDS_PER_DAY;

    let midnight = calendar_to_mjd(today.year, today.month, today.day)?;
    let mut a2 = MJD_ZERO - u1;
    a2 += midnight;
    a2 += fd + dat0 / SECONDS_PER_DAY;

    let advisory = at_next_midnight.advisory.or(at_midnight.advisory);
    let tai = if big1 { (u1, a2) } else { (a2, u1) };
    Ok((tai, advisory))
}

/// Converts TAI to UTC.
///
/// This inverts [`utc_to_tai`] iteratively, so leap-second days get the same treatment. A date
/// UTC can only describe on a best-effort basis yields an advisory (also logged at `warn` level);
/// one it cannot describe at all fails with [`TransformError::UnacceptableDate`].
pub fn tai_to_utc(tai: JulianDate<Tai>) -> Result<Advised<JulianDate<Utc>>, TransformError> {
    let big1 = tai.part1.abs() >= tai.part2.abs();
    let (a1, a2) = if big1 {
        (tai.part1, tai.part2)
    } else {
        (tai.part2, tai.part1)
    };

    let u1 = a1;
    let mut u2 = a2;
    let mut advisory = None;
    for _ in 0..2 {
        let ((g1, g2), guess_advisory) = utc_parts_to_tai(u1, u2)?;
        u2 += a1 - g1;
        u2 += a2 - g2;
        advisory = guess_advisory;
    }

    log_advisory(advisory);
    let utc = if big1 {
        JulianDate::new(u1, u2)
    } else {
        JulianDate::new(u2, u1)
    };
    Ok(Advised::with_advisory(utc, advisory))
}

/// Converts TT to UT1 given ΔT = TT − UT1.
pub fn tt_to_ut1(tt: JulianDate<Tt>, delta_t: Time) -> JulianDate<Ut1> {
    let (part1, part2) = shift_two_part(
        tt.part1,
        tt.part2,
        -delta_t.get::<second>() / SECONDS_PER_DAY,
    );
    JulianDate::new(part1, part2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    #[test]
    fn tt_to_tai_shifts_smaller_part() {
        let tai = tt_to_tai(JulianDate::new(2_453_750.5, 0.892_482_639)).unwrap();
        assert_eq!(tai.parts().0, 2_453_750.5);
        assert_abs_diff_eq!(tai.parts().1, 0.892_110_139, epsilon = 1e-12);

        // swapped split: the shift lands on the other part
        let tai = tt_to_tai(JulianDate::new(0.892_482_639, 2_453_750.5)).unwrap();
        assert_eq!(tai.parts().1, 2_453_750.5);
        assert_abs_diff_eq!(tai.parts().0, 0.892_110_139, epsilon = 1e-12);
    }

    #[rstest]
    #[case(f64::NAN, 0.)]
    #[case(2_451_545.0, f64::INFINITY)]
    fn tt_to_tai_rejects_non_finite(#[case] part1: f64, #[case] part2: f64) {
        assert!(matches!(
            tt_to_tai(JulianDate::new(part1, part2)),
            Err(TransformError::TimeConversion { .. })
        ));
    }

    #[test]
    fn tai_to_utc_around_2006() {
        let utc = tai_to_utc(JulianDate::new(2_453_750.5, 0.892_482_639)).unwrap();
        assert_eq!(utc.advisory, None);
        assert_eq!(utc.value.parts().0, 2_453_750.5);
        assert_abs_diff_eq!(utc.value.parts().1, 0.892_100_694_555_555_6, epsilon = 1e-12);
    }

    #[test]
    fn utc_to_tai_around_2006() {
        let tai = utc_to_tai(JulianDate::new(2_453_750.5, 0.892_100_694)).unwrap();
        assert_eq!(tai.advisory, None);
        assert_eq!(tai.value.parts().0, 2_453_750.5);
        assert_abs_diff_eq!(tai.value.parts().1, 0.892_482_638_444_444_4, epsilon = 1e-12);
    }

    #[test]
    fn tai_to_utc_inverts_utc_to_tai_across_leap_second() {
        // 2016-12-31 had a leap second at its end
        for fraction in [0.1, 0.5, 0.999] {
            let utc = JulianDate::<Utc>::new(MJD_ZERO, 57_753.0 + fraction);
            let tai = utc_to_tai(utc).unwrap().value;
            let back = tai_to_utc(tai).unwrap().value;
            assert_abs_diff_eq!(back.jd(), utc.jd(), epsilon = 1e-9);
        }
    }

    #[test]
    fn tt_to_ut1_applies_delta_t() {
        let ut1 = tt_to_ut1(
            JulianDate::new(2_453_750.5, 0.892_855_139),
            Time::new::<second>(64.8499),
        );
        assert_eq!(ut1.parts().0, 2_453_750.5);
        assert_abs_diff_eq!(ut1.parts().1, 0.892_104_561_453_703_7, epsilon = 1e-12);
    }

    #[rstest]
    #[case(2003, 6, 1, 0., 32.)]
    #[case(2008, 1, 17, 0., 33.)]
    #[case(2017, 9, 1, 0., 37.)]
    #[case(1972, 1, 1, 0., 10.)]
    // 1.4178180 + (36934 - 37300) * 0.001296
    #[case(1960, 1, 1, 0., 0.943_482)]
    fn delta_at_known_values(
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
        #[case] fraction: f64,
        #[case] expected: f64,
    ) {
        let dat = delta_at(year, month, day, fraction).unwrap();
        assert_eq!(dat.advisory, None);
        assert_abs_diff_eq!(dat.value.get::<second>(), expected, epsilon = 1e-9);
    }

    #[test]
    fn delta_at_advisories() {
        let early = delta_at(1959, 12, 31, 0.).unwrap();
        assert_eq!(early.value.get::<second>(), 0.);
        assert_eq!(early.advisory, Some(DateAdvisory::PredatesUtc { year: 1959 }));

        let late = delta_at(2100, 1, 1, 0.).unwrap();
        assert_eq!(late.value.get::<second>(), 37.);
        assert_eq!(
            late.advisory,
            Some(DateAdvisory::BeyondLeapSecondTable { year: 2100 })
        );
    }

    #[rstest]
    #[case(2023, 2, 29, 0.)]
    #[case(2023, 13, 1, 0.)]
    #[case(2023, 0, 1, 0.)]
    #[case(2023, 4, 31, 0.)]
    #[case(-5000, 1, 1, 0.)]
    #[case(2023, 1, 1, 1.5)]
    fn delta_at_rejects_impossible_dates(
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
        #[case] fraction: f64,
    ) {
        assert!(matches!(
            delta_at(year, month, day, fraction),
            Err(TransformError::InvalidCalendarDate { .. })
        ));
    }

    #[rstest]
    #[case(2003, 6, 1, 52_791.0)]
    #[case(2000, 1, 1, 51_544.0)]
    #[case(2024, 2, 29, 60_369.0)]
    #[case(1858, 11, 17, 0.0)]
    fn calendar_to_jd_known_values(
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
        #[case] mjd: f64,
    ) {
        let jd = calendar_to_jd::<Utc>(year, month, day).unwrap();
        assert_eq!(jd.parts(), (MJD_ZERO, mjd));
    }

    #[test]
    fn jd_to_calendar_known_value() {
        let date = jd_to_calendar(JulianDate::<Utc>::new(MJD_ZERO, 50_123.9999)).unwrap();
        assert_eq!((date.year, date.month, date.day), (1996, 2, 10));
        assert_abs_diff_eq!(date.fraction, 0.9999, epsilon = 1e-7);
    }

    #[test]
    fn jd_to_calendar_rejects_out_of_range() {
        assert_eq!(
            jd_to_calendar(JulianDate::<Utc>::from_jd(-70_000.)),
            Err(TransformError::UnacceptableDate { jd: -70_000. })
        );
    }

    #[test]
    fn unacceptable_dates_fail_utc_conversion() {
        assert!(matches!(
            tai_to_utc(JulianDate::from_jd(-1e7)),
            Err(TransformError::UnacceptableDate { .. })
        ));
    }

    #[test]
    fn far_future_utc_is_advised() {
        let utc = tai_to_utc(JulianDate::new(MJD_ZERO, 88_069.5)).unwrap();
        assert!(matches!(
            utc.advisory,
            Some(DateAdvisory::BeyondLeapSecondTable { year: 2099 | 2100 })
        ));
    }

    #[test]
    fn julian_date_display() {
        insta::assert_snapshot!(JulianDate::<Tt>::new(2_451_545.0, 0.25), @"JD 2451545 + 0.25 TT");
    }
}
