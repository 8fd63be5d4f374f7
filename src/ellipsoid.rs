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

//! The ellipsoid module contains functions for the derived quantities of an
//! ellipsoid of revolution given its Semimajor axis and flattening ratio.

#![allow(clippy::suboptimal_flops)]

pub mod coefficients;
pub mod wgs84;

use crate::Metres;
use angle_sc::trig;

/// Calculate the Semiminor axis of an ellipsoid.
/// * `a` - the Semimajor axis of an ellipsoid.
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use ellipsoid_geodesics::Metres;
/// use ellipsoid_geodesics::ellipsoid::{calculate_minor_axis, wgs84};
///
/// // The WGS 84 Semiminor axis measured in metres.
/// let b : Metres = Metres(6_356_752.314_245_179);
/// assert_eq!(b, calculate_minor_axis(wgs84::A, wgs84::F));
/// ```
#[must_use]
pub fn calculate_minor_axis(a: Metres, f: f64) -> Metres {
    Metres(a.0 * (1.0 - f))
}

/// Calculate the square of the Eccentricity of an ellipsoid.
///
/// Negative for a prolate ellipsoid, i.e. negative flattening.
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use ellipsoid_geodesics::ellipsoid::{calculate_sq_eccentricity, wgs84};
///
/// // The WGS 84 sq_eccentricity.
/// assert_eq!(0.0066943799901413165, calculate_sq_eccentricity(wgs84::F));
/// ```
#[must_use]
pub fn calculate_sq_eccentricity(f: f64) -> f64 {
    f * (2.0 - f)
}

/// Calculate the square of the second Eccentricity of an ellipsoid.
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use ellipsoid_geodesics::ellipsoid::{calculate_sq_2nd_eccentricity, wgs84};
///
/// // The WGS 84 sq 2nd eccentricity.
/// assert_eq!(0.006739496742276434, calculate_sq_2nd_eccentricity(wgs84::F));
/// ```
#[must_use]
pub fn calculate_sq_2nd_eccentricity(f: f64) -> f64 {
    let one_minus_f = 1.0 - f;
    calculate_sq_eccentricity(f) / (one_minus_f * one_minus_f)
}

/// Calculate the third flattening of an ellipsoid.
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use ellipsoid_geodesics::ellipsoid::{calculate_3rd_flattening, wgs84};
///
/// // The WGS 84 3rd flattening.
/// assert_eq!(0.0016792203863837047, calculate_3rd_flattening(wgs84::F));
/// ```
#[must_use]
pub fn calculate_3rd_flattening(f: f64) -> f64 {
    f / (2.0 - f)
}

/// The shape of an ellipsoid of revolution classified by the sign of the
/// square of its Eccentricity: positive, zero or negative.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EccentricityKind {
    /// Positive `e^2`, flattened at the poles.
    Oblate,
    /// Zero `e^2`, a sphere.
    Spherical,
    /// Negative `e^2`, elongated at the poles.
    Prolate,
}

impl EccentricityKind {
    /// Classify the square of the Eccentricity of an ellipsoid.
    #[must_use]
    pub fn classify(sq_eccentricity: f64) -> Self {
        if sq_eccentricity > 0.0 {
            Self::Oblate
        } else if sq_eccentricity < 0.0 {
            Self::Prolate
        } else {
            Self::Spherical
        }
    }
}

/// Calculate half the authalic surface area term `c2`, the coefficient of
/// the spherical excess in the geodesic area formula:
/// `c2 = (a^2 + b^2 * q) / 2` where `q` depends on the shape of the
/// ellipsoid.
/// * `a` - the Semimajor axis of the ellipsoid.
/// * `b` - the Semiminor axis of the ellipsoid.
/// * `e_2` - the square of the Eccentricity of the ellipsoid.
#[must_use]
pub fn calculate_authalic_c2(a: Metres, b: Metres, e_2: f64) -> f64 {
    let q = match EccentricityKind::classify(e_2) {
        EccentricityKind::Oblate => {
            let e = libm::sqrt(e_2);
            libm::atanh(e) / e
        }
        EccentricityKind::Spherical => 1.0,
        EccentricityKind::Prolate => {
            let e = libm::sqrt(-e_2);
            libm::atan(e) / e
        }
    };
    (a.0 * a.0 + b.0 * b.0 * q) / 2.0
}

/// Function to calculate `epsilon`, the variable used in series expansions,
/// derived from Clairaut's constant.
///
/// Note: `epsilon` is positive and small.
/// CFF Karney, [Algorithms for geodesics](https://arxiv.org/pdf/1109.4448.pdf)
/// Eqs 9 & 16.
/// * `clairaut` - Clairaut's constant.
/// * `ep_2` - the square of the second Eccentricity of the ellipsoid.
#[must_use]
pub fn calculate_epsilon(clairaut: trig::UnitNegRange, ep_2: f64) -> f64 {
    // Clairaut's constant is sin alpha0; sq_cos_alpha0 is 1 - clairaut^2
    let sq_cos_alpha0 = (1.0 - clairaut.0) * (1.0 + clairaut.0);
    epsilon_from_k2(ep_2 * sq_cos_alpha0)
}

/// Function to calculate `epsilon` from `k2`, the square of CFF Karney Eq. 9.
/// * `k2` - `ep_2 * cos^2(alpha0)`.
#[must_use]
pub fn epsilon_from_k2(k2: f64) -> f64 {
    let sqrt_k2_1 = libm::sqrt(1.0 + k2) + 1.0;
    k2 / (sqrt_k2_1 * sqrt_k2_1) // Karney equation 16
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_calculate_epsilon() {
        let wgs84_ep2 = calculate_sq_2nd_eccentricity(wgs84::F);
        assert_eq!(
            0.0016792203863837047,
            calculate_epsilon(trig::UnitNegRange(0.0), wgs84_ep2)
        );
        assert_eq!(
            0.0015745990877544997,
            calculate_epsilon(trig::UnitNegRange(0.25), wgs84_ep2)
        );
        assert_eq!(
            0.0012604720416530619,
            calculate_epsilon(trig::UnitNegRange(0.5), wgs84_ep2)
        );
        assert_eq!(
            0.0007360477262034019,
            calculate_epsilon(trig::UnitNegRange(0.75), wgs84_ep2)
        );
        assert_eq!(0.0, calculate_epsilon(trig::UnitNegRange(1.0), wgs84_ep2));

        // the two epsilon forms agree on the equator
        assert_eq!(
            epsilon_from_k2(wgs84_ep2),
            calculate_epsilon(trig::UnitNegRange(0.0), wgs84_ep2)
        );
    }

    #[test]
    fn test_eccentricity_kind() {
        assert_eq!(
            EccentricityKind::Oblate,
            EccentricityKind::classify(calculate_sq_eccentricity(wgs84::F))
        );
        assert_eq!(EccentricityKind::Spherical, EccentricityKind::classify(0.0));
        assert_eq!(
            EccentricityKind::Prolate,
            EccentricityKind::classify(calculate_sq_eccentricity(-0.01))
        );
    }

    #[test]
    fn test_calculate_authalic_c2() {
        let a = wgs84::A;
        let b = calculate_minor_axis(a, wgs84::F);
        let e_2 = calculate_sq_eccentricity(wgs84::F);

        let c2 = calculate_authalic_c2(a, b, e_2);
        // between the squares of the two semiaxes
        assert!(b.0 * b.0 < c2);
        assert!(c2 < a.0 * a.0);
        // the WGS 84 authalic radius is approximately 6371007.2 m
        assert!(is_within_tolerance(6_371_007.180_918_474, libm::sqrt(c2), 1.0e-3));

        // a sphere: c2 is the square of its radius
        assert_eq!(a.0 * a.0, calculate_authalic_c2(a, a, 0.0));

        // a prolate ellipsoid swaps the bounds
        let f = -0.01;
        let b_prolate = calculate_minor_axis(a, f);
        let e_2_prolate = calculate_sq_eccentricity(f);
        let c2_prolate = calculate_authalic_c2(a, b_prolate, e_2_prolate);
        assert!(a.0 * a.0 < c2_prolate);
        assert!(c2_prolate < b_prolate.0 * b_prolate.0);
    }
}
