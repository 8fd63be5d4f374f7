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

//! The geodesic module solves the direct geodesic problem on the surface of
//! an ellipsoid: given a start point, an initial azimuth and a length, find
//! the end point, the forward azimuth there and, on request, the reduced
//! length, the geodesic scales and the area under the geodesic.
//!
//! It uses the method given by CFF Karney in
//! [Algorithms for geodesics](https://arxiv.org/pdf/1109.4448.pdf): the
//! geodesic is mapped onto a great circle of an auxiliary sphere through
//! Clairaut's constant, the great circle arc is found from the length, and
//! the end point quantities are recovered from truncated series evaluated
//! at both ends of the arc.

#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::suboptimal_flops)]

use crate::angles::{atan2d, canonicalize_polar_start, normalize, renormalize, round, sincosd};
use crate::ellipsoid::coefficients::{
    a1_minus_1, a2_minus_1, c1_coefficients, c1p_coefficients, c2_coefficients, c3_coefficients,
    c4_coefficients, cosine_series, evaluate_polynomial, sine_series,
};
use crate::ellipsoid::epsilon_from_k2;
use crate::{Ellipsoid, Metres};
use angle_sc::Degrees;
use unit_sphere::{great_circle, LatLong};

/// The underflow guard, the square root of the minimum positive double.
const TINY: f64 = 1.491_668_146_240_041_3e-154;

/// The flattening magnitude above which the distance solver corrects the
/// reverted series estimate with a Newton step.
const NEWTON_FLATTENING_THRESHOLD: f64 = 0.01;

/// The optional quantities of a `DirectSolution`.
///
/// The end point, azimuth, distance and arc length are always calculated;
/// the quantities selected here cost extra series evaluations.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Outputs {
    /// Calculate the reduced length `m12`.
    pub reduced_length: bool,
    /// Calculate the geodesic scales `M12` and `M21`.
    pub geodesic_scales: bool,
    /// Calculate the area `S12` between the geodesic and the equator.
    pub area: bool,
}

impl Outputs {
    /// The end point quantities only.
    pub const NONE: Self = Self {
        reduced_length: false,
        geodesic_scales: false,
        area: false,
    };

    /// Every optional quantity.
    pub const ALL: Self = Self {
        reduced_length: true,
        geodesic_scales: true,
        area: true,
    };
}

/// The length of a geodesic, measured on the ellipsoid or on the
/// auxiliary sphere.
///
/// Negative lengths are valid: the geodesic is traversed backwards,
/// i.e. along the opposite azimuth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GeodesicLength {
    /// The distance along the geodesic in `Metres`.
    Distance(Metres),
    /// The great circle arc length on the auxiliary sphere in `Degrees`.
    Arc(Degrees),
}

/// The solution of a direct geodesic problem.
///
/// The distance `s12` and the arc length `a12` are both present whichever
/// of them posed the problem; the optional quantities are present when
/// requested through `Outputs`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectSolution {
    /// The geodetic latitude of the end point.
    pub lat2: Degrees,
    /// The longitude of the end point, normalized to `(-180, 180]`.
    pub lon2: Degrees,
    /// The azimuth of the geodesic at the end point.
    pub azi2: Degrees,
    /// The distance along the geodesic.
    pub s12: Metres,
    /// The great circle arc length on the auxiliary sphere.
    pub a12: Degrees,
    /// The reduced length `m12`.
    pub m12: Option<Metres>,
    /// The geodesic scale `M12`, dimensionless.
    pub m12_scale: Option<f64>,
    /// The geodesic scale `M21`, dimensionless.
    pub m21_scale: Option<f64>,
    /// The area `S12` between the geodesic and the equator in square metres.
    pub area: Option<f64>,
}

/// The start point of a geodesic projected onto the auxiliary sphere,
/// together with the series terms that depend only on the start point.
struct AuxSphereStart {
    /// The sine and cosine of the start azimuth.
    salp1: f64,
    calp1: f64,
    /// `sqrt(1 + ep_2 * sbet1^2)`.
    dn1: f64,
    /// Clairaut's constant, the sine of the azimuth at the equator crossing.
    salp0: f64,
    calp0: f64,
    /// The sine and cosine of the arc from the Northbound equator crossing.
    ssig1: f64,
    csig1: f64,
    /// The sine and cosine of the spherical longitude from the crossing.
    somg1: f64,
    comg1: f64,
    /// The sine and cosine of the distance variable `tau1 = sig1 + B11`.
    stau1: f64,
    ctau1: f64,
    /// `ep_2 * calp0^2`, the square of CFF Karney Eq. 9.
    k2: f64,
    /// The series expansion parameter, CFF Karney Eq. 16.
    eps: f64,
    /// The distance scale factor minus one.
    a1m1: f64,
    /// The distance series coefficients.
    c1: [f64; 7],
    /// The distance series at the start point.
    b11: f64,
}

impl AuxSphereStart {
    /// Project the start point and azimuth onto the auxiliary sphere.
    /// * `lat1` - the geodetic latitude of the start point in degrees.
    /// * `azi1` - the start azimuth in degrees.
    fn new(lat1: f64, azi1: f64, ellipsoid: &Ellipsoid) -> Self {
        let (salp1, calp1) = sincosd(round(azi1));

        let (sin_lat1, cos_lat1) = sincosd(round(lat1));
        let (sbet1, cbet1) = renormalize(ellipsoid.one_minus_f() * sin_lat1, cos_lat1);
        let cbet1 = cbet1.max(TINY);
        let dn1 = libm::sqrt(1.0 + ellipsoid.ep_2() * sbet1 * sbet1);

        // Clairaut's constant
        let salp0 = salp1 * cbet1;
        let calp0 = libm::hypot(calp1, salp1 * sbet1);

        // The arc and spherical longitude of the start point from the
        // Northbound equator crossing; sig1 = 0 for an equatorial geodesic.
        let ssig1 = sbet1;
        let somg1 = salp0 * sbet1;
        let csig1 = if sbet1 == 0.0 && calp1 == 0.0 {
            1.0
        } else {
            cbet1 * calp1
        };
        let comg1 = csig1;
        let (ssig1, csig1) = renormalize(ssig1, csig1);

        let k2 = calp0 * calp0 * ellipsoid.ep_2();
        let eps = epsilon_from_k2(k2);
        let a1m1 = a1_minus_1(eps);
        let c1 = c1_coefficients(eps);
        let b11 = sine_series(&c1, ssig1, csig1);

        // tau1 = sig1 + B11
        let (sin_b11, cos_b11) = (libm::sin(b11), libm::cos(b11));
        let stau1 = ssig1 * cos_b11 + csig1 * sin_b11;
        let ctau1 = csig1 * cos_b11 - ssig1 * sin_b11;

        Self {
            salp1,
            calp1,
            dn1,
            salp0,
            calp0,
            ssig1,
            csig1,
            somg1,
            comg1,
            stau1,
            ctau1,
            k2,
            eps,
            a1m1,
            c1,
            b11,
        }
    }
}

/// The great circle arc on the auxiliary sphere corresponding to the length
/// of the geodesic, with the end point arc variables and both length forms.
struct ArcState {
    /// The arc from the start point in radians.
    sig12: f64,
    /// The sine and cosine of the arc from the equator crossing to the
    /// end point.
    ssig2: f64,
    csig2: f64,
    /// `sqrt(1 + k2 * ssig2^2)`.
    dn2: f64,
    /// The distance series at the end point.
    b12: f64,
    /// The distance along the geodesic.
    s12: Metres,
    /// The arc in degrees.
    a12: Degrees,
}

impl ArcState {
    /// Solve for the arc on the auxiliary sphere given the geodesic length.
    fn new(start: &AuxSphereStart, length: GeodesicLength, ellipsoid: &Ellipsoid) -> Self {
        match length {
            GeodesicLength::Arc(a12) => {
                let sig12 = a12.0.to_radians();
                let (ssig12, csig12) = sincosd(round(a12.0));
                Self::from_sigma12(start, sig12, ssig12, csig12, length, ellipsoid)
            }
            GeodesicLength::Distance(s12) => {
                if libm::fabs(s12.0) < great_circle::MIN_VALUE {
                    // start and end points coincide
                    return Self::from_sigma12(start, 0.0, 0.0, 1.0, length, ellipsoid);
                }

                let b = ellipsoid.b().0;
                let tau12 = s12.0 / (b * (1.0 + start.a1m1));
                let (s, c) = (libm::sin(tau12), libm::cos(tau12));

                // First estimate from the reverted series at tau2 = tau1 + tau12,
                // CFF Karney Eqs. 20 & 21.
                let c1p = c1p_coefficients(start.eps);
                let b12 = -sine_series(
                    &c1p,
                    start.stau1 * c + start.ctau1 * s,
                    start.ctau1 * c - start.stau1 * s,
                );
                let mut sig12 = tau12 - (b12 - start.b11);
                let mut ssig12 = libm::sin(sig12);
                let mut csig12 = libm::cos(sig12);

                // The reverted series is accurate to round off for small
                // flattening, otherwise correct it with a Newton step.
                if libm::fabs(ellipsoid.f()) > NEWTON_FLATTENING_THRESHOLD {
                    let ssig2 = start.ssig1 * csig12 + start.csig1 * ssig12;
                    let csig2 = start.csig1 * csig12 - start.ssig1 * ssig12;
                    let b12 = sine_series(&start.c1, ssig2, csig2);
                    let serr = (1.0 + start.a1m1) * (sig12 + (b12 - start.b11)) - s12.0 / b;
                    sig12 -= serr / libm::sqrt(1.0 + start.k2 * ssig2 * ssig2);
                    ssig12 = libm::sin(sig12);
                    csig12 = libm::cos(sig12);
                }

                Self::from_sigma12(start, sig12, ssig12, csig12, length, ellipsoid)
            }
        }
    }

    /// Construct the end point arc variables from the solved arc and
    /// complete the distance/arc correspondence.
    fn from_sigma12(
        start: &AuxSphereStart,
        sig12: f64,
        ssig12: f64,
        csig12: f64,
        length: GeodesicLength,
        ellipsoid: &Ellipsoid,
    ) -> Self {
        // sig2 = sig1 + sig12
        let ssig2 = start.ssig1 * csig12 + start.csig1 * ssig12;
        let csig2 = start.csig1 * csig12 - start.ssig1 * ssig12;
        let dn2 = libm::sqrt(1.0 + start.k2 * ssig2 * ssig2);
        let b12 = sine_series(&start.c1, ssig2, csig2);

        let (s12, a12) = match length {
            GeodesicLength::Distance(s12) => (s12, Degrees(sig12.to_degrees())),
            GeodesicLength::Arc(a12) => (
                Metres(ellipsoid.b().0 * (1.0 + start.a1m1) * (sig12 + (b12 - start.b11))),
                a12,
            ),
        };

        Self {
            sig12,
            ssig2,
            csig2,
            dn2,
            b12,
            s12,
            a12,
        }
    }
}

/// Calculate the reduced length `m12` and the geodesic scales `M12` and
/// `M21` from the arc variables at the two ends of the geodesic.
/// CFF Karney Eqs. 38 & 40 and
/// [Geodesics on an arbitrary ellipsoid of revolution](https://arxiv.org/pdf/2208.00492.pdf)
/// Eq. 39.
fn reduced_length_and_scales(
    start: &AuxSphereStart,
    arc: &ArcState,
    csig2: f64,
    ellipsoid: &Ellipsoid,
) -> (Metres, f64, f64) {
    let a2m1 = a2_minus_1(start.eps);
    let c2 = c2_coefficients(start.eps);
    let b21 = sine_series(&c2, start.ssig1, start.csig1);
    let b22 = sine_series(&c2, arc.ssig2, csig2);

    let ab1 = (1.0 + start.a1m1) * (arc.b12 - start.b11);
    let ab2 = (1.0 + a2m1) * (b22 - b21);
    let j12 = (start.a1m1 - a2m1) * arc.sig12 + (ab1 - ab2);

    let m12 = ellipsoid.b().0
        * ((arc.dn2 * (start.csig1 * arc.ssig2) - start.dn1 * (start.ssig1 * csig2))
            - start.csig1 * csig2 * j12);

    let csig12 = csig2 * start.csig1 + arc.ssig2 * start.ssig1;
    let t = start.k2 * (arc.ssig2 - start.ssig1) * (arc.ssig2 + start.ssig1)
        / (start.dn1 + arc.dn2);
    let m12_scale = csig12 + (t * arc.ssig2 - csig2 * j12) * start.ssig1 / start.dn1;
    let m21_scale = csig12 - (t * start.ssig1 - start.csig1 * j12) * arc.ssig2 / arc.dn2;

    (Metres(m12), m12_scale, m21_scale)
}

/// Calculate the area `S12` of the quadrilateral bounded by the geodesic,
/// the equator and the meridians through its end points.
/// CFF Karney Eqs. 59-65.
fn calculate_area(
    start: &AuxSphereStart,
    arc: &ArcState,
    csig2: f64,
    ellipsoid: &Ellipsoid,
) -> f64 {
    let c4 = c4_coefficients(ellipsoid.c4x(), start.eps);
    let b41 = cosine_series(&c4, start.ssig1, start.csig1);
    let b42 = cosine_series(&c4, arc.ssig2, csig2);

    // CFF Karney Eq. 65
    let a = ellipsoid.a().0;
    let a4 = a * a * start.calp0 * start.salp0 * ellipsoid.e_2();

    let salp2 = start.salp0;
    let calp2 = start.calp0 * csig2;

    let ssig12 = arc.ssig2 * start.csig1 - csig2 * start.ssig1;
    let csig12 = csig2 * start.csig1 + arc.ssig2 * start.ssig1;

    // The spherical excess term alp12 = alp2 - alp1.
    let (salp12, calp12) = if start.calp0 == 0.0 || start.salp0 == 0.0 {
        // a meridional or equatorial geodesic
        (
            salp2 * start.calp1 - calp2 * start.salp1,
            calp2 * start.calp1 + salp2 * start.salp1,
        )
    } else {
        // Karney's form avoiding cancellation for a short geodesic
        let t = if csig12 <= 0.0 {
            start.csig1 * (1.0 - csig12) + ssig12 * start.ssig1
        } else {
            ssig12 * (start.csig1 * ssig12 / (1.0 + csig12) + start.ssig1)
        };
        (
            start.calp0 * start.salp0 * t,
            start.salp0 * start.salp0 + start.calp0 * start.calp0 * start.csig1 * csig2,
        )
    };

    ellipsoid.authalic_c2() * libm::atan2(salp12, calp12) + a4 * (b42 - b41)
}

/// Solve the direct geodesic problem: find the end point of the geodesic
/// departing point `a` at azimuth `azi1` with the given length.
///
/// A start point at a pole has no intrinsic longitude; its longitude and
/// azimuth are canonicalized so that the geodesic departs along the
/// meridian `lon1 + azi1` (North pole) or `lon1 - azi1` (South pole).
/// * `a` - the start position in geodetic coordinates.
/// * `azi1` - the azimuth at the start position.
/// * `length` - the length of the geodesic, a distance or an arc.
/// * `outputs` - the optional quantities to calculate.
/// * `ellipsoid` - the `Ellipsoid`.
/// # Examples
/// ```
/// use ellipsoid_geodesics::geodesic::{solve_direct, GeodesicLength, Outputs};
/// use ellipsoid_geodesics::{Ellipsoid, Metres};
/// use angle_sc::{is_within_tolerance, Degrees};
/// use unit_sphere::LatLong;
///
/// let wgs84 = Ellipsoid::wgs84();
/// let equator = LatLong::new(Degrees(0.0), Degrees(0.0));
/// let result = solve_direct(
///     &equator,
///     Degrees(90.0),
///     GeodesicLength::Distance(Metres(1_000_000.0)),
///     Outputs::NONE,
///     &wgs84,
/// );
/// assert_eq!(0.0, result.lat2.0);
/// assert!(is_within_tolerance(8.983152841195214, result.lon2.0, 1.0e-9));
/// ```
#[must_use]
pub fn solve_direct(
    a: &LatLong,
    azi1: Degrees,
    length: GeodesicLength,
    outputs: Outputs,
    ellipsoid: &Ellipsoid,
) -> DirectSolution {
    let lat1 = a.lat().0;
    let (lon1, azi1) = canonicalize_polar_start(lat1, a.lon().0, azi1.0);

    let start = AuxSphereStart::new(lat1, azi1, ellipsoid);
    let arc = ArcState::new(&start, length, ellipsoid);

    // The end point parametric latitude.
    let sbet2 = start.calp0 * arc.ssig2;
    let mut cbet2 = libm::hypot(start.salp0, start.calp0 * arc.csig2);
    let mut csig2 = arc.csig2;
    if cbet2 == 0.0 {
        // salp0 = 0 and csig2 = 0: break the degeneracy at the pole
        cbet2 = TINY;
        csig2 = TINY;
    }
    let lat2 = atan2d(sbet2, ellipsoid.one_minus_f() * cbet2);
    let azi2 = atan2d(start.salp0, start.calp0 * csig2);

    // The spherical longitude difference, omg2 - omg1.
    let somg2 = start.salp0 * arc.ssig2;
    let comg2 = csig2;
    let omg12 = libm::atan2(
        somg2 * start.comg1 - comg2 * start.somg1,
        comg2 * start.comg1 + somg2 * start.somg1,
    );

    // The longitude difference on the ellipsoid, CFF Karney Eqs. 23 & 26.
    let a3f = evaluate_polynomial(ellipsoid.a3(), start.eps);
    let a3c = ellipsoid.f() * start.salp0 * a3f;
    let c3 = c3_coefficients(ellipsoid.c3x(), start.eps);
    let b31 = sine_series(&c3, start.ssig1, start.csig1);
    let b32 = sine_series(&c3, arc.ssig2, csig2);
    let lam12 = omg12 - a3c * (arc.sig12 + (b32 - b31));
    let lon2 = normalize(normalize(lon1) + normalize(lam12.to_degrees()));

    let (m12, m12_scale, m21_scale) = if outputs.reduced_length || outputs.geodesic_scales {
        let (m12, m12_scale, m21_scale) =
            reduced_length_and_scales(&start, &arc, csig2, ellipsoid);
        (
            outputs.reduced_length.then_some(m12),
            outputs.geodesic_scales.then_some(m12_scale),
            outputs.geodesic_scales.then_some(m21_scale),
        )
    } else {
        (None, None, None)
    };

    let area = outputs
        .area
        .then(|| calculate_area(&start, &arc, csig2, ellipsoid));

    DirectSolution {
        lat2: Degrees(lat2),
        lon2: Degrees(lon2),
        azi2: Degrees(azi2),
        s12: arc.s12,
        a12: arc.a12,
        m12,
        m12_scale,
        m21_scale,
        area,
    }
}
