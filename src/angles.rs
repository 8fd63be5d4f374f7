// Copyright (c) 2026 Ken Barker

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

//! The angles module canonicalizes angles in the degree domain before they
//! reach the trigonometric kernels.
//!
//! The geodesic formulas branch on *exact* zeros of sines and cosines at the
//! cardinal directions, so the functions here guarantee that multiples of 90°
//! survive normalization, rounding and `sincosd` without picking up the tiny
//! residuals that `libm::sin`/`libm::cos` of a rounded radian argument would
//! introduce.

#![allow(clippy::float_cmp)]

/// Normalize an angle in degrees into the range `(-180, 180]`.
/// * `degrees` - the angle.
#[must_use]
pub fn normalize(degrees: f64) -> f64 {
    let x = libm::remainder(degrees, 360.0);
    if x <= -180.0 {
        x + 360.0
    } else {
        x
    }
}

/// Snap an angle lying within a few ulps of a cardinal direction onto the
/// exact multiple of 90°, so that `sincosd` yields exact zeros for it.
///
/// Values further than `180.0 * f64::EPSILON` degrees from a cardinal
/// direction are returned unchanged.
/// * `degrees` - the angle.
#[must_use]
pub fn round(degrees: f64) -> f64 {
    let cardinal = 90.0 * libm::round(degrees / 90.0);
    if libm::fabs(degrees - cardinal) < 180.0 * f64::EPSILON {
        cardinal
    } else {
        degrees
    }
}

/// Calculate the sine and cosine of an angle in degrees.
///
/// The angle is reduced to `[-45°, 45°]` by exact quadrant arithmetic before
/// the radian conversion, so multiples of 90° produce exact `0.0` and `±1.0`
/// components. Negative zeros are replaced by positive zeros.
/// * `degrees` - the angle.
#[must_use]
pub fn sincosd(degrees: f64) -> (f64, f64) {
    let r = libm::remainder(degrees, 360.0);
    let q = libm::round(r / 90.0);
    let r = (r - 90.0 * q).to_radians();

    let sin_r = libm::sin(r);
    let cos_r = libm::cos(r);

    #[allow(clippy::cast_possible_truncation)]
    let (s, c) = match (q as i32).rem_euclid(4) {
        0 => (sin_r, cos_r),
        1 => (cos_r, -sin_r),
        2 => (-sin_r, -cos_r),
        _ => (-cos_r, sin_r),
    };
    (s + 0.0, c + 0.0)
}

/// Calculate the angle in degrees of the vector `(x, y)`, quadrant exact.
///
/// The result lies in `(-180, 180]` and is exactly `±90` and `180` on the
/// corresponding axes.
/// * `y`, `x` - the vector components.
#[must_use]
pub fn atan2d(y: f64, x: f64) -> f64 {
    let mut x = x;
    let mut y = y;
    let mut q = 0;
    if libm::fabs(y) > libm::fabs(x) {
        core::mem::swap(&mut x, &mut y);
        q = 2;
    }
    if x < 0.0 {
        x = -x;
        q += 1;
    }

    let angle = libm::atan2(y, x).to_degrees();
    match q {
        1 => (if y >= 0.0 { 180.0 } else { -180.0 }) - angle,
        2 => 90.0 - angle,
        3 => -90.0 + angle,
        _ => angle,
    }
}

/// Rescale a sine/cosine pair to unit length after its components have been
/// rounded independently.
/// * `sin_x`, `cos_x` - the pair.
#[must_use]
pub(crate) fn renormalize(sin_x: f64, cos_x: f64) -> (f64, f64) {
    let h = libm::hypot(sin_x, cos_x);
    (sin_x / h, cos_x / h)
}

/// The classification of a start point by latitude.
///
/// A pole has no intrinsic longitude, so polar start points have their
/// longitude and azimuth rewritten before projection onto the auxiliary
/// sphere; see `canonicalize_polar_start`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StartPoint {
    NorthPole,
    SouthPole,
    Ordinary,
}

impl StartPoint {
    /// Classify a start latitude in degrees.
    pub(crate) fn classify(lat: f64) -> Self {
        if lat == 90.0 {
            Self::NorthPole
        } else if lat == -90.0 {
            Self::SouthPole
        } else {
            Self::Ordinary
        }
    }
}

/// Rewrite the longitude and azimuth of a polar start point.
///
/// At the North pole the longitude is redefined relative to the outgoing
/// azimuth and the azimuth is fixed due South; at the South pole the mirror
/// convention applies with the azimuth fixed due North. Ordinary start
/// points are returned unchanged.
/// * `lat` - the start latitude.
/// * `lon`, `azi` - the start longitude and azimuth.
///
/// returns the possibly rewritten `(lon, azi)` pair.
#[must_use]
pub(crate) fn canonicalize_polar_start(lat: f64, lon: f64, azi: f64) -> (f64, f64) {
    match StartPoint::classify(lat) {
        StartPoint::NorthPole => (lon + azi, -180.0),
        StartPoint::SouthPole => (lon - azi, 0.0),
        StartPoint::Ordinary => (lon, azi),
    }
}
