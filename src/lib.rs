//! This library converts satellite state vectors from the Geocentric Celestial Reference System
//! (GCRS) into the International Terrestrial Reference System (ITRS) using the IERS 2010
//! CIO-based procedure.
//!
//! Positions and velocities are [`Vector`]s tagged with the [`Frame`] they are expressed in, so a
//! GCRS vector cannot (easily) be handed to code that expects an ITRS one. Rotations between
//! frames are [`Rotation`](math::Rotation)s, which likewise carry their source and target frames
//! in their type. The [`frame!`] macro defines more frames if you need them.
//!
//! The conversion itself is done by [`GcrsToItrs`]. It needs two collaborators:
//!
//! - an [`EopProvider`](eop::EopProvider), which turns TT into UTC and looks up the Earth
//!   orientation parameters (ΔT, polar motion, CIP offsets and length of day) for that UTC;
//! - an [`AstronomyPrimitives`](astronomy::AstronomyPrimitives) implementation, which supplies
//!   the precession-nutation, Earth rotation and polar motion models. The default is
//!   [`Iau2006B`](astronomy::Iau2006B) (IAU 2006 precession with IAU 2000B nutation).
//!
//! Any parameter the caller already knows can be passed explicitly through
//! [`OrientationParameters`](orientation::OrientationParameters). Those always take precedence,
//! and the provider is not consulted at all if nothing is missing.
//!
//! # Examples
//!
//! Convert the position and velocity of a satellite at J2000.0 with an Earth orientation table:
//!
//! ```
//! use earthframe::{
//!     eop::{EopRecord, EopTable},
//!     orientation::OrientationParameters,
//!     time::JulianDate,
//!     GcrsToItrs, StateVector, Vector,
//! };
//!
//! let table = EopTable::new(vec![
//!     EopRecord {
//!         mjd: 51_544.,
//!         x_pole: 0.043_282,
//!         y_pole: 0.377_909,
//!         ut1_minus_utc: 0.355_037_4,
//!         lod: 0.000_976_0,
//!         dx: 0.,
//!         dy: 0.,
//!     },
//!     EopRecord {
//!         mjd: 51_545.,
//!         x_pole: 0.043_190,
//!         y_pole: 0.378_362,
//!         ut1_minus_utc: 0.354_440_6,
//!         lod: 0.000_861_2,
//!         dx: 0.,
//!         dy: 0.,
//!     },
//! ])
//! .expect("records are sorted and finite");
//!
//! let converter = GcrsToItrs::with_default_astronomy(table);
//! let state = StateVector::PositionVelocity {
//!     position: Vector::new(7_000_000., 0., 0.),  // metres
//!     velocity: Vector::new(0., 7_500., 0.),      // metres per second
//! };
//! let converted = converter
//!     .transform(
//!         &[state],
//!         JulianDate::new(2_451_545.0, 0.),
//!         &OrientationParameters::default(),
//!     )
//!     .expect("J2000.0 is covered by the table");
//!
//! // rotations preserve length
//! let position = converted.vectors[0].position();
//! assert!((position.magnitude() - 7_000_000.).abs() < 1e-3);
//! assert!(converted.advisory.is_none());
//! ```
//!
//! If you already know every parameter, no provider lookup happens:
//!
//! ```
//! use earthframe::{
//!     eop::FixedEop,
//!     orientation::{OrientationParameters, PolarMotion, PoleOffsets},
//!     time::JulianDate,
//!     GcrsToItrs, StateVector, Vector,
//! };
//! use uom::si::f64::Time;
//! use uom::si::time::second;
//!
//! let params = OrientationParameters::default()
//!     .with_delta_t(Time::new::<second>(64.184))
//!     .with_polar_motion(PolarMotion::default())
//!     .with_pole_offsets(PoleOffsets::default())
//!     .with_lod(Time::new::<second>(0.));
//!
//! let converted = GcrsToItrs::with_default_astronomy(FixedEop::default())
//!     .transform_column_major(
//!         &[6_378_137., 0., 0.],
//!         3,
//!         JulianDate::new(2_451_545.0, 0.),
//!         &params,
//!     )
//!     .expect("one 3-component column");
//! println!("{}", converted.rotation);
//! ```

#[macro_use]
pub mod frames;

pub mod astronomy;
pub mod eop;
pub mod error;
pub mod math;
pub mod orientation;
pub mod time;
pub mod transform;

mod nutation;
mod util;
mod vectors;

pub(crate) type Vector3 = nalgebra::Vector3<f64>;
pub(crate) type Matrix3 = nalgebra::Matrix3<f64>;

pub use error::{DateAdvisory, TransformError};
pub use frames::Frame;
pub use time::{Advised, JulianDate};
pub use transform::{EarthRotation, GcrsToItrs, Transformed, MEAN_EARTH_ROTATION_RATE};
pub use vectors::{StateVector, Vector};
