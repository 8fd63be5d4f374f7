// Copyright (c) 2024-2026 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! ellipsoid-geodesics
//!
//! [![License](https://img.shields.io/badge/License-MIT-blue)](https://opensource.org/license/mit/)
//!
//! A library for solving the *direct* geodesic problem on an ellipsoid of
//! revolution: given the start point of a
//! [geodesic segment](https://en.wikipedia.org/wiki/Geodesics_on_an_ellipsoid),
//! its azimuth there and its length, find the end point and the azimuth of
//! the geodesic at the end point.
//!
//! The length may be given as a distance along the geodesic in metres or as
//! the arc length of the corresponding
//! [great circle arc](https://en.wikipedia.org/wiki/Great_circle)
//! on the auxiliary sphere in degrees; the solution always reports both
//! forms. On request it also reports:
//!
//! - the reduced length `m12` of the geodesic;
//! - the geodesic scales `M12` and `M21`;
//! - the area `S12` between the geodesic and the equator.
//!
//! ## Design
//!
//! The solver implements the method given by Charles Karney in
//! [Algorithms for geodesics](https://arxiv.org/pdf/1109.4448.pdf) and in his
//! [GeographicLib](https://geographiclib.sourceforge.io/) library: the
//! geodesic is mapped onto a great circle of an auxiliary sphere using
//! Clairaut's constant and the quantities on the ellipsoid are recovered
//! from truncated sixth order series evaluated by Clenshaw summation.
//! A distance is converted to an arc with Karney's reverted series, so no
//! iteration is required; a single Newton correction is applied for
//! ellipsoids with a flattening beyond the scope of the series.
//!
//! The `Ellipsoid` struct holds an ellipsoid of revolution with the series
//! coefficients that depend only on its shape. Construction validates the
//! axis and eccentricity, everything thereafter is infallible. The static
//! `WGS84_ELLIPSOID` holds the WGS-84 `Ellipsoid`.
//!
//! The [geodesic](crate::geodesic) module solves single problems; the
//! [batch](crate::batch) module solves many at once with NumPy-style
//! broadcasting of the input columns.
//!
//! The library depends upon the following crates:
//!
//! - [angle-sc](https://crates.io/crates/angle-sc) - to define `Angle`,
//!   `Degrees` and `Radians` and perform trigonometric calculations;
//! - [unit-sphere](https://crates.io/crates/unit-sphere) - to define
//!   `LatLong`;
//! - [icao_units](https://crates.io/crates/icao-units) - to define `Metres`;
//! - [libm](https://crates.io/crates/libm) - for bit-reproducible
//!   floating-point functions.
//!
//! # Examples
//! ```
//! use ellipsoid_geodesics::geodesic::{solve_direct, GeodesicLength, Outputs};
//! use ellipsoid_geodesics::{Degrees, LatLong, Metres, WGS84_ELLIPSOID};
//! use angle_sc::is_within_tolerance;
//!
//! // 1000 km due North from the equator
//! let start = LatLong::new(Degrees(0.0), Degrees(25.0));
//! let result = solve_direct(
//!     &start,
//!     Degrees(0.0),
//!     GeodesicLength::Distance(Metres(1_000_000.0)),
//!     Outputs::NONE,
//!     &WGS84_ELLIPSOID,
//! );
//!
//! // the geodesic stays on the meridian
//! assert_eq!(25.0, result.lon2.0);
//! assert_eq!(0.0, result.azi2.0);
//! assert!(result.lat2.0 > 8.9 && result.lat2.0 < 9.1);
//! ```

pub mod angles;
pub mod batch;
pub mod ellipsoid;
pub mod geodesic;

pub use angle_sc::{Angle, Degrees, Radians};
pub use batch::{solve_direct_batch, BatchInput, LengthMode};
pub use geodesic::{solve_direct, DirectSolution, GeodesicLength, Outputs};
pub use icao_units::si::Metres;
pub use unit_sphere::LatLong;

use once_cell::sync::Lazy;
use thiserror::Error;

/// The errors of this library.
///
/// Solving a geodesic is infallible; errors arise from constructing an
/// invalid `Ellipsoid` or from batch columns that cannot be broadcast.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    /// The Semimajor axis must be positive and finite and the square of
    /// the Eccentricity must be finite and less than one.
    #[error("invalid ellipsoid: a = {a} m, e^2 = {e_2}")]
    InvalidEllipsoid {
        /// The Semimajor axis in metres.
        a: f64,
        /// The square of the Eccentricity.
        e_2: f64,
    },

    /// Each batch column must hold one value or one value per geodesic.
    #[error("incompatible batch column lengths: {lengths:?}")]
    IncompatibleShapes {
        /// The column lengths: lat1, lon1, azi1, length.
        lengths: [usize; 4],
    },
}

/// The parameters of an `Ellipsoid`.
#[derive(Clone, Debug, PartialEq)]
pub struct Ellipsoid {
    /// The Semimajor axis of the ellipsoid.
    a: Metres,
    /// The flattening of the ellipsoid, a ratio.
    f: f64,

    /// The Semiminor axis of the ellipsoid.
    b: Metres,
    /// One minus the flattening ratio.
    one_minus_f: f64,
    /// The square of the Eccentricity of the ellipsoid.
    e_2: f64,
    /// The square of the second Eccentricity of the ellipsoid.
    ep_2: f64,
    /// The third flattening of the ellipsoid.
    n: f64,

    /// The A3 series `coefficients` of the ellipsoid.
    a3: [f64; 6],
    /// The C3x series `coefficients` of the ellipsoid.
    c3x: [f64; 15],
    /// The C4x series `coefficients` of the ellipsoid.
    c4x: [f64; 21],
    /// Half the authalic surface area term of the ellipsoid.
    authalic_c2: f64,
}

impl Ellipsoid {
    /// Construct an `Ellipsoid` from valid parameters.
    fn build(a: Metres, f: f64) -> Self {
        let b = ellipsoid::calculate_minor_axis(a, f);
        let e_2 = ellipsoid::calculate_sq_eccentricity(f);
        let n = ellipsoid::calculate_3rd_flattening(f);
        Self {
            a,
            f,
            b,
            one_minus_f: 1.0 - f,
            e_2,
            ep_2: ellipsoid::calculate_sq_2nd_eccentricity(f),
            n,
            a3: ellipsoid::coefficients::a3_coefficients(n),
            c3x: ellipsoid::coefficients::c3x_coefficients(n),
            c4x: ellipsoid::coefficients::c4x_coefficients(n),
            authalic_c2: ellipsoid::calculate_authalic_c2(a, b, e_2),
        }
    }

    /// Constructor.
    ///
    /// A negative flattening describes a prolate ellipsoid.
    /// * `a` - the Semimajor axis of the `Ellipsoid`.
    /// * `f` - the flattening of the `Ellipsoid`, a ratio.
    ///
    /// # Errors
    /// `Error::InvalidEllipsoid` if `a` is not positive and finite or `f`
    /// is not finite and less than one.
    pub fn new(a: Metres, f: f64) -> Result<Self, Error> {
        let e_2 = ellipsoid::calculate_sq_eccentricity(f);
        // f in (1, 2) also gives e_2 < 1 but a negative Semiminor axis
        if a.0.is_finite() && a.0 > 0.0 && f.is_finite() && f < 1.0 && e_2.is_finite() {
            Ok(Self::build(a, f))
        } else {
            Err(Error::InvalidEllipsoid { a: a.0, e_2 })
        }
    }

    /// Construct an `Ellipsoid` from its Semimajor axis and the square of
    /// its Eccentricity.
    ///
    /// A negative `e_2` describes a prolate ellipsoid.
    /// * `a` - the Semimajor axis of the `Ellipsoid`.
    /// * `e_2` - the square of the Eccentricity of the `Ellipsoid`.
    ///
    /// # Errors
    /// `Error::InvalidEllipsoid` if `a` is not positive and finite or `e_2`
    /// is not finite and less than one.
    pub fn from_axis_and_sq_eccentricity(a: Metres, e_2: f64) -> Result<Self, Error> {
        if a.0.is_finite() && a.0 > 0.0 && e_2.is_finite() && e_2 < 1.0 {
            let f = 1.0 - libm::sqrt(1.0 - e_2);
            Ok(Self::build(a, f))
        } else {
            Err(Error::InvalidEllipsoid { a: a.0, e_2 })
        }
    }

    /// Construct an `Ellipsoid` with the WGS-84 parameters.
    #[must_use]
    pub fn wgs84() -> Self {
        Self::build(ellipsoid::wgs84::A, ellipsoid::wgs84::F)
    }

    /// The Semimajor axis of the ellipsoid.
    #[must_use]
    pub const fn a(&self) -> Metres {
        self.a
    }

    /// The flattening of the ellipsoid, a ratio.
    #[must_use]
    pub const fn f(&self) -> f64 {
        self.f
    }

    /// The Semiminor axis of the ellipsoid.
    #[must_use]
    pub const fn b(&self) -> Metres {
        self.b
    }

    /// One minus the flattening ratio.
    #[must_use]
    pub const fn one_minus_f(&self) -> f64 {
        self.one_minus_f
    }

    /// The square of the Eccentricity of the ellipsoid.
    #[must_use]
    pub const fn e_2(&self) -> f64 {
        self.e_2
    }

    /// The square of the second Eccentricity of the ellipsoid.
    #[must_use]
    pub const fn ep_2(&self) -> f64 {
        self.ep_2
    }

    /// The third flattening of the ellipsoid.
    #[must_use]
    pub const fn n(&self) -> f64 {
        self.n
    }

    /// The A3 series `coefficients` of the ellipsoid.
    #[must_use]
    pub const fn a3(&self) -> &[f64; 6] {
        &self.a3
    }

    /// The C3x series `coefficients` of the ellipsoid.
    #[must_use]
    pub const fn c3x(&self) -> &[f64; 15] {
        &self.c3x
    }

    /// The C4x series `coefficients` of the ellipsoid.
    #[must_use]
    pub const fn c4x(&self) -> &[f64; 21] {
        &self.c4x
    }

    /// Half the authalic surface area term of the ellipsoid, the
    /// coefficient of the spherical excess in the geodesic area formula.
    #[must_use]
    pub const fn authalic_c2(&self) -> f64 {
        self.authalic_c2
    }
}

/// A static instance of the WGS-84 `Ellipsoid`.
pub static WGS84_ELLIPSOID: Lazy<Ellipsoid> = Lazy::new(Ellipsoid::wgs84);

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_ellipsoid_wgs84() {
        let wgs84_ellipsoid = Ellipsoid::wgs84();

        assert_eq!(ellipsoid::wgs84::A, wgs84_ellipsoid.a());
        assert_eq!(ellipsoid::wgs84::F, wgs84_ellipsoid.f());
        assert_eq!(Metres(6_356_752.314_245_179), wgs84_ellipsoid.b());
        assert_eq!(1.0 - ellipsoid::wgs84::F, wgs84_ellipsoid.one_minus_f());
        assert_eq!(0.0066943799901413165, wgs84_ellipsoid.e_2());
        assert_eq!(0.006739496742276434, wgs84_ellipsoid.ep_2());
        assert_eq!(0.0016792203863837047, wgs84_ellipsoid.n());

        assert_eq!(&wgs84_ellipsoid, &*WGS84_ELLIPSOID);
        assert_eq!(
            Ok(wgs84_ellipsoid),
            Ellipsoid::new(ellipsoid::wgs84::A, ellipsoid::wgs84::F)
        );
    }

    #[test]
    fn test_ellipsoid_from_axis_and_sq_eccentricity() {
        let e_2 = ellipsoid::calculate_sq_eccentricity(ellipsoid::wgs84::F);
        let result = Ellipsoid::from_axis_and_sq_eccentricity(ellipsoid::wgs84::A, e_2).unwrap();

        assert!(is_within_tolerance(
            ellipsoid::wgs84::F,
            result.f(),
            f64::EPSILON
        ));

        // a negative square of the Eccentricity describes a prolate ellipsoid
        let prolate =
            Ellipsoid::from_axis_and_sq_eccentricity(Metres(6_400_000.0), -0.01).unwrap();
        assert!(prolate.f() < 0.0);
        assert!(prolate.b().0 > prolate.a().0);
    }

    #[test]
    fn test_ellipsoid_invalid_parameters() {
        assert_eq!(
            Err(Error::InvalidEllipsoid { a: 0.0, e_2: 0.0 }),
            Ellipsoid::new(Metres(0.0), 0.0)
        );
        assert!(Ellipsoid::new(Metres(-6_378_137.0), 0.0).is_err());
        assert!(Ellipsoid::new(Metres(f64::NAN), 0.0).is_err());
        assert!(Ellipsoid::new(Metres(f64::INFINITY), 0.0).is_err());
        assert!(Ellipsoid::new(Metres(6_378_137.0), 1.0).is_err());
        assert!(Ellipsoid::new(Metres(6_378_137.0), f64::NAN).is_err());
        assert!(Ellipsoid::new(Metres(6_378_137.0), f64::INFINITY).is_err());

        // f between one and two gives e_2 < 1 but a negative Semiminor axis
        assert_eq!(
            Err(Error::InvalidEllipsoid {
                a: 6_378_137.0,
                e_2: 0.75
            }),
            Ellipsoid::new(Metres(6_378_137.0), 1.5)
        );
        assert!(Ellipsoid::from_axis_and_sq_eccentricity(Metres(6_378_137.0), 1.0).is_err());
        assert!(Ellipsoid::from_axis_and_sq_eccentricity(Metres(6_378_137.0), f64::NAN).is_err());

        // a sphere is a valid ellipsoid
        let sphere = Ellipsoid::new(Metres(6_371_000.0), 0.0).unwrap();
        assert_eq!(sphere.a(), sphere.b());
        assert_eq!(0.0, sphere.e_2());
    }

    #[test]
    fn test_error_display() {
        let error = Error::InvalidEllipsoid { a: -1.0, e_2: 0.5 };
        assert_eq!("invalid ellipsoid: a = -1 m, e^2 = 0.5", error.to_string());

        let error = Error::IncompatibleShapes {
            lengths: [3, 2, 3, 1],
        };
        assert_eq!(
            "incompatible batch column lengths: [3, 2, 3, 1]",
            error.to_string()
        );
    }
}
