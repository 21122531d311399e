use crate::eop::EopError;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Everything that can make a conversion fail.
///
/// Failures are all-or-nothing: no partial batch is ever returned alongside an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// A state vector, batch or angle pair had the wrong number of components.
    #[error("invalid {what} dimension: got {found} components")]
    InvalidDimension { what: &'static str, found: usize },

    /// TT could not be converted to TAI.
    #[error("TT to TAI conversion failed: {reason}")]
    TimeConversion { reason: &'static str },

    /// The date lies outside the range over which UTC can be defined.
    #[error("Julian date {jd} is outside the range where UTC can be determined")]
    UnacceptableDate { jd: f64 },

    /// A calendar date (or day fraction) that does not exist.
    #[error("invalid calendar date {year:04}-{month:02}-{day:02}")]
    InvalidCalendarDate { year: i32, month: u32, day: u32 },

    /// A caller-supplied Earth orientation parameter was NaN or infinite.
    #[error("orientation parameter {field} is not finite")]
    NonFiniteParameter { field: &'static str },

    /// The Earth orientation provider failed or returned unusable data.
    #[error("Earth orientation provider failed: {0}")]
    ExternalProvider(#[from] EopError),
}

/// A non-fatal warning raised while converting a date to UTC.
///
/// The conversion proceeds on a best-effort basis; the advisory is carried alongside the result
/// (see [`Advised`](crate::time::Advised)) and logged at `warn` level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DateAdvisory {
    /// UTC did not exist yet; TAI−UTC is taken to be zero.
    #[error("year {year} predates UTC, TAI-UTC taken as 0")]
    PredatesUtc { year: i32 },

    /// The leap-second table may be out of date for this year.
    #[error("year {year} is past the leap-second table horizon, TAI-UTC may be stale")]
    BeyondLeapSecondTable { year: i32 },
}

impl DateAdvisory {
    /// The calendar year that triggered the advisory.
    #[must_use]
    pub fn year(&self) -> i32 {
        match *self {
            Self::PredatesUtc { year } | Self::BeyondLeapSecondTable { year } => year,
        }
    }
}
