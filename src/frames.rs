#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::{math::Rotation, Vector};

/// Marks a reference frame that vectors and rotations can be expressed in.
///
/// Frames are zero-sized types used only to tag [`Vector`] and [`Rotation`] with the frame they
/// belong to, so that a GCRS vector cannot (easily) be mistaken for an ITRS one.
///
/// While you _can_ implement this trait directly, prefer using [`frame!`](crate::frame).
pub trait Frame {
    /// Short conventional name of the frame (eg, "GCRS").
    const NAME: &'static str;
}

/// Defines a new reference frame marker type.
///
/// ```rust
/// # use earthframe::frame;
/// frame!(pub struct Teme named "TEME");
/// ```
///
/// Doc comments and attributes can be included directly in the invocation:
///
/// ```rust
/// earthframe::frame! {
///     /// True equator, mean equinox.
///     #[derive(Hash)]
///     pub(crate) struct Teme named "TEME"
/// }
/// ```
#[macro_export]
macro_rules! frame {
    ($(#[$attr:meta])* $vis:vis struct $name:ident named $label:literal) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        $vis struct $name;

        impl $crate::Frame for $name {
            const NAME: &'static str = $label;
        }
    };
}

frame! {
    /// The [Geocentric Celestial Reference System][gcrs].
    ///
    /// Quasi-inertial and Earth-centred, with axes aligned to the ICRS. This is the input frame
    /// of [`GcrsToItrs`](crate::GcrsToItrs).
    ///
    /// [gcrs]: https://en.wikipedia.org/wiki/Geocentric_Celestial_Reference_System
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct Gcrs named "GCRS"
}

frame! {
    /// The Celestial Intermediate Reference System.
    ///
    /// Its pole is the Celestial Intermediate Pole (CIP) and its origin of right ascension is
    /// the Celestial Intermediate Origin (CIO).
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct Cirs named "CIRS"
}

frame! {
    /// The Terrestrial Intermediate Reference System.
    ///
    /// The CIRS rotated by the Earth rotation angle. Earth's rotation axis is its Z axis, which
    /// is why the velocity correction for Earth's rotation is applied here.
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct Tirs named "TIRS"
}

frame! {
    /// The [International Terrestrial Reference System][itrs].
    ///
    /// Earth-centred, Earth-fixed. The TIRS corrected for polar motion.
    ///
    /// - Positive Z is towards the IERS Reference Pole.
    /// - Positive X is towards the IERS Reference Meridian on the equator.
    /// - Positive Y completes the right-handed system (90°E on the equator).
    ///
    /// [itrs]: https://en.wikipedia.org/wiki/International_Terrestrial_Reference_System_and_Frame
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[allow(clippy::upper_case_acronyms)]
    pub struct Itrs named "ITRS"
}
