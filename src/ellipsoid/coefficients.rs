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

//! Sixth order series coefficients for geodesic integrals on an ellipsoid
//! and the Clenshaw evaluators that sum them.
//!
//! The expansions are those given by CFF Karney in
//! [Algorithms for geodesics](https://arxiv.org/pdf/1109.4448.pdf): the
//! distance scale `A1` and Fourier coefficients `C1`/`C1'` (Eqs. 17, 18, 21),
//! the reduced length scale `A2` and coefficients `C2` (Eq. 42 and
//! [Geodesics on an arbitrary ellipsoid of revolution](https://arxiv.org/pdf/2208.00492.pdf)
//! Eq. A1), the longitude series `A3`/`C3` (Eqs. 23-26) and the area series
//! `C4` from the `GeographicLib` sixth order expansion.
//!
//! The `A3`, `C3x` and `C4x` families depend only on the third flattening of
//! the ellipsoid, so they are evaluated once per ellipsoid and cached; the
//! remaining families are functions of the per-geodesic expansion parameter
//! epsilon.

/// The scale factor `A1` minus one, CFF Karney Eq. 17.
/// * `eps` - the expansion parameter derived from Clairaut's constant.
#[must_use]
pub fn a1_minus_1(eps: f64) -> f64 {
    let eps2 = eps * eps;
    let t = eps2 * (eps2 * (eps2 + 4.0) + 64.0) / 256.0;
    (t + eps) / (1.0 - eps)
}

/// The scale factor `A2` minus one, CFF Karney (2022) Eq. A1.
/// * `eps` - the expansion parameter derived from Clairaut's constant.
#[must_use]
pub fn a2_minus_1(eps: f64) -> f64 {
    let eps2 = eps * eps;
    let t = eps2 * ((-11. * eps2 - 28.) * eps2 - 192.) / 256.;
    (t - eps) / (1. + eps)
}

/// The polynomial coefficients of `A3` in the expansion parameter,
/// CFF Karney Eq. 24, constant term first.
/// * `n` - the third flattening of the ellipsoid.
#[must_use]
pub fn a3_coefficients(n: f64) -> [f64; 6] {
    [
        1.,
        (n - 1.) / 2.,
        (n * (3. * n - 1.) - 2.) / 8.,
        ((-n - 3.) * n - 1.) / 16.,
        (-2. * n - 3.) / 64.,
        -3. / 128.,
    ]
}

/// The coefficients `C1[l]` in the Fourier expansion of `B1`,
/// CFF Karney Eq. 18. `C1[0]` is unused.
/// * `eps` - the expansion parameter derived from Clairaut's constant.
#[must_use]
pub fn c1_coefficients(eps: f64) -> [f64; 7] {
    let eps2 = eps * eps;
    let eps4 = (eps2 * eps) * eps; // Note: not the same as eps2 * eps2!
    let eps6 = (eps4 * eps) * eps;

    [
        0.,
        eps * ((6. - eps2) * eps2 - 16.) / 32.,
        eps2 * ((64. - 9. * eps2) * eps2 - 128.) / 2048.,
        eps * eps2 * (9. * eps2 - 16.) / 768.,
        eps4 * (3. * eps2 - 5.) / 512.,
        eps * eps4 * (-7. / 1280.),
        eps6 * (-7. / 2048.),
    ]
}

/// The coefficients `C1'[l]` of the reverted distance series,
/// CFF Karney Eq. 21. `C1'[0]` is unused.
/// * `eps` - the expansion parameter derived from Clairaut's constant.
#[must_use]
pub fn c1p_coefficients(eps: f64) -> [f64; 6] {
    let eps2 = eps * eps;
    let eps4 = (eps2 * eps) * eps; // Note: not the same as eps2 * eps2!

    [
        0.,
        eps * (eps2 * (205. * eps2 - 432.) + 768.) / 1536.,
        eps2 * (30. - 37. * eps2) / 96.,
        eps * eps2 * (116. - 225. * eps2) / 384.,
        eps4 * 539. / 1536.,
        (eps * eps4) * 3467. / 7680.,
    ]
}

/// The coefficients `C2[l]` in the Fourier expansion of `B2`,
/// CFF Karney Eq. 42. `C2[0]` is unused.
/// * `eps` - the expansion parameter derived from Clairaut's constant.
#[must_use]
pub fn c2_coefficients(eps: f64) -> [f64; 7] {
    let eps2 = eps * eps;
    let eps4 = (eps2 * eps) * eps; // Note: not the same as eps2 * eps2!
    let eps6 = (eps4 * eps) * eps;

    [
        0.,
        eps * (eps2 * (eps2 + 2.) + 16.) / 32.,
        eps2 * (eps2 * (35. * eps2 + 64.) + 384.) / 2048.,
        eps * eps2 * (15. * eps2 + 80.) / 768.,
        eps4 * (7. * eps2 + 35.) / 512.,
        eps * eps4 * 63. / 1280.,
        eps6 * 77. / 2048.,
    ]
}

/// The ellipsoid-constant polynomial coefficients `C3x[l]` of the longitude
/// series, CFF Karney Eq. 25.
/// * `n` - the third flattening of the ellipsoid.
#[must_use]
pub fn c3x_coefficients(n: f64) -> [f64; 15] {
    [
        (1. - n) / 4.,
        (1. - n * n) / 8.,
        (n * ((-5. * n - 1.) * n + 3.) + 3.) / 64.,
        (n * ((2. - 2. * n) * n + 2.) + 5.) / 128.,
        (n * (3. * n + 11.) + 12.) / 512.,
        ((n - 3.) * n + 2.) / 32.,
        (n * (n * (2. * n - 3.) - 2.) + 3.) / 64.,
        (n * ((-6. * n - 9.) * n + 2.) + 6.) / 256.,
        ((1. - 2. * n) * n + 5.) / 256.,
        (n * ((5. - n) * n - 9.) + 5.) / 192.,
        (n * (n * (10. * n - 6.) - 10.) + 9.) / 384.,
        ((-77. * n - 8.) * n + 42.) / 3072.,
        (n * ((20. - 7. * n) * n - 28.) + 14.) / 1024.,
        ((-7. * n - 40.) * n + 28.) / 2048.,
        (n * (75. * n - 90.) + 42.) / 5120.,
    ]
}

/// The coefficients `C3[l]` in the Fourier expansion of the longitude
/// integral, CFF Karney Eq. 26. `C3[0]` is unused.
/// * `coeffs` - the ellipsoid-constant coefficients from `c3x_coefficients`.
/// * `eps` - the expansion parameter derived from Clairaut's constant.
#[must_use]
pub fn c3_coefficients(coeffs: &[f64], eps: f64) -> [f64; 6] {
    let c1 = eps * evaluate_polynomial(&coeffs[0..5], eps);
    let eps_2 = eps * eps;
    let c2 = eps_2 * evaluate_polynomial(&coeffs[5..9], eps);
    let eps_3 = eps * eps_2;
    let c3 = eps_3 * evaluate_polynomial(&coeffs[9..12], eps);
    let eps_4 = eps * eps_3;
    let c4 = eps_4 * evaluate_polynomial(&coeffs[12..14], eps);
    let eps_5: f64 = eps * eps_4;
    let c5 = eps_5 * evaluate_polynomial(&coeffs[14..15], eps);
    [0.0, c1, c2, c3, c4, c5]
}

/// The ellipsoid-constant polynomial coefficients `C4x[l]` of the area
/// series, from the `GeographicLib` sixth order expansion.
///
/// The array holds the six blocks of `C4[0]` to `C4[5]`, each a polynomial
/// in the expansion parameter with its constant term first.
/// * `n` - the third flattening of the ellipsoid.
#[must_use]
pub fn c4x_coefficients(n: f64) -> [f64; 21] {
    [
        // C4[0]
        (n * (n * (n * (n * (100. * n + 208.) + 572.) + 3432.) - 12012.) + 30030.) / 45045.,
        (n * (n * (n * (64. * n + 624.) - 4576.) + 6864.) - 3003.) / 15015.,
        (n * (n * (-10656. * n + 14144.) - 4576.) - 858.) / 45045.,
        (n * (-224. * n - 4784.) + 1573.) / 45045.,
        (1088. * n + 156.) / 45045.,
        97. / 15015.,
        // C4[1]
        (n * (n * (n * (-64. * n - 624.) + 4576.) - 6864.) + 3003.) / 135135.,
        (n * (n * (5952. * n - 11648.) + 9152.) - 2574.) / 135135.,
        (n * (5792. * n + 1040.) - 1287.) / 135135.,
        (-2944. * n + 468.) / 135135.,
        1. / 9009.,
        // C4[2]
        (n * (n * (-1440. * n + 4160.) - 4576.) + 1716.) / 225225.,
        (n * (-8448. * n + 4992.) - 1144.) / 225225.,
        (1856. * n - 936.) / 225225.,
        8. / 10725.,
        // C4[3]
        (n * (3584. * n - 3328.) + 1144.) / 315315.,
        (1024. * n - 208.) / 105105.,
        -136. / 63063.,
        // C4[4]
        (-2560. * n + 832.) / 405405.,
        -128. / 135135.,
        // C4[5]
        128. / 99099.,
    ]
}

/// The coefficients `C4[l]` in the Fourier expansion of the area integral.
/// * `coeffs` - the ellipsoid-constant coefficients from `c4x_coefficients`.
/// * `eps` - the expansion parameter derived from Clairaut's constant.
#[must_use]
pub fn c4_coefficients(coeffs: &[f64], eps: f64) -> [f64; 6] {
    let c0 = evaluate_polynomial(&coeffs[0..6], eps);
    let c1 = eps * evaluate_polynomial(&coeffs[6..11], eps);
    let eps_2 = eps * eps;
    let c2 = eps_2 * evaluate_polynomial(&coeffs[11..15], eps);
    let eps_3 = eps * eps_2;
    let c3 = eps_3 * evaluate_polynomial(&coeffs[15..18], eps);
    let eps_4 = eps * eps_3;
    let c4 = eps_4 * evaluate_polynomial(&coeffs[18..20], eps);
    let eps_5: f64 = eps * eps_4;
    let c5 = eps_5 * coeffs[20];
    [c0, c1, c2, c3, c4, c5]
}

/// Evaluate a first degree polynomial in x using
/// [Estrin's scheme](https://en.wikipedia.org/wiki/Estrin%27s_scheme).
/// * `coeffs` - the polynomial coefficients.
/// * `x` - the variable.
#[must_use]
fn evaluate_2_coeffs(coeffs: &[f64], x: f64) -> f64 {
    x.mul_add(coeffs[1], coeffs[0])
}

/// Evaluate a polynomial in x, constant coefficient first, using
/// [Horner's method](https://en.wikipedia.org/wiki/Horner%27s_method).
/// * `coeffs` - the polynomial coefficients.
/// * `x` - the variable.
#[must_use]
pub fn evaluate_polynomial(coeffs: &[f64], x: f64) -> f64 {
    let mut result: f64 = 0.;

    match coeffs.len() {
        // Use Estrin's scheme for 2 coefficients, since same result as Horner's method
        2 => result = evaluate_2_coeffs(coeffs, x),
        _ => {
            if let Some((last, elements)) = coeffs.split_last() {
                result = *last;
                for element in elements.iter().rev() {
                    result = result.mul_add(x, *element);
                }
            }
        }
    }

    result
}

/// Evaluate the sine series
///   `y = sum(coeffs[k] * sin(2*k*x), k, 1, n)`
/// by [Clenshaw summation](https://en.wikipedia.org/wiki/Clenshaw_algorithm),
/// given the sine and cosine of `x`. `coeffs[0]` is unused.
///
/// The result is exactly zero whenever `sin(2x)` is exactly zero, so angles
/// canonicalized onto the cardinal directions keep their exact values
/// through the series.
/// * `coeffs` - the series coefficients.
/// * `sin_x`, `cos_x` - the sine and cosine of the series argument.
#[must_use]
pub fn sine_series(coeffs: &[f64], sin_x: f64, cos_x: f64) -> f64 {
    let sin_2x = 2.0 * sin_x * cos_x;
    if sin_2x == 0.0 {
        0.0
    } else {
        // the Clenshaw ak(theta) parameter, beta(k) = -1
        let ar = 2.0 * (cos_x - sin_x) * (cos_x + sin_x);

        let mut index = coeffs.len() - 1;
        let last_index_is_odd = 0 != (index & 1);
        let mut k1 = if last_index_is_odd {
            0.0
        } else {
            coeffs[index]
        };
        if !last_index_is_odd {
            index -= 1;
        }
        let mut k0 = ar.mul_add(k1, coeffs[index]);
        index -= 1;

        // Unroll loop x 2, so accumulators return to their original role.
        while 0 < index {
            k1 = coeffs[index] + ar.mul_add(k0, -k1);
            index -= 1;
            k0 = coeffs[index] + ar.mul_add(k1, -k0);
            index -= 1;
        }
        sin_2x * k0
    }
}

/// Evaluate the cosine series
///   `y = sum(coeffs[k] * cos((2*k + 1)*x), k, 0, n - 1)`
/// by Clenshaw summation, given the sine and cosine of `x`.
///
/// This is the odd-harmonic form used by the area integral; unlike
/// `sine_series` the `coeffs[0]` term contributes.
/// * `coeffs` - the series coefficients.
/// * `sin_x`, `cos_x` - the sine and cosine of the series argument.
#[must_use]
pub fn cosine_series(coeffs: &[f64], sin_x: f64, cos_x: f64) -> f64 {
    let ar = 2.0 * (cos_x - sin_x) * (cos_x + sin_x);

    let mut k0 = 0.0;
    let mut k1 = 0.0;
    let mut index = coeffs.len();
    if 0 != (index & 1) {
        index -= 1;
        k0 = coeffs[index];
    }

    // Unroll loop x 2, so accumulators return to their original role.
    while 0 < index {
        index -= 1;
        k1 = coeffs[index] + ar.mul_add(k0, -k1);
        index -= 1;
        k0 = coeffs[index] + ar.mul_add(k1, -k0);
    }
    cos_x * (k0 - k1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ellipsoid::{calculate_3rd_flattening, calculate_sq_2nd_eccentricity, wgs84};
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_a1_and_a2_scales() {
        assert_eq!(0.0, a1_minus_1(0.0));
        assert_eq!(0.0, a2_minus_1(0.0));

        // WGS 84 latitude 45.0
        let eps45 = calculate_sq_2nd_eccentricity(wgs84::F) / 2.0;
        assert!(is_within_tolerance(
            0.0033839903702120875,
            a1_minus_1(eps45),
            f64::EPSILON
        ));
        assert!(is_within_tolerance(
            -0.0033669191180908161,
            a2_minus_1(eps45),
            f64::EPSILON
        ));
    }

    #[test]
    fn test_a3_coefficients() {
        let n = calculate_3rd_flattening(wgs84::F);
        let a3 = a3_coefficients(n);

        assert_eq!(1.0, a3[0]);
        assert_eq!((n - 1.) / 2., a3[1]);
        assert_eq!(-3. / 128., a3[5]);
        // every non-constant coefficient is negative for an oblate ellipsoid
        for coeff in &a3[1..] {
            assert!(*coeff < 0.0);
        }
    }

    #[test]
    fn test_c1_coefficients() {
        let eps45 = calculate_sq_2nd_eccentricity(wgs84::F) / 2.0;
        let c1 = c1_coefficients(eps45);

        assert_eq!(0.0, c1[0]);
        assert!(is_within_tolerance(
            -eps45 / 2.0,
            c1[1],
            eps45 * eps45
        ));
        // terms decay by roughly a factor of eps each
        for k in 2..7 {
            assert!(libm::fabs(c1[k]) < libm::fabs(c1[k - 1]) * eps45);
        }
    }

    #[test]
    fn test_c1p_coefficients() {
        let eps45 = calculate_sq_2nd_eccentricity(wgs84::F) / 2.0;
        let c1p = c1p_coefficients(eps45);

        assert_eq!(0.0, c1p[0]);
        assert!(is_within_tolerance(
            eps45 / 2.0,
            c1p[1],
            eps45 * eps45
        ));
        for k in 2..6 {
            assert!(libm::fabs(c1p[k]) < libm::fabs(c1p[k - 1]) * 2.0 * eps45);
        }
    }

    #[test]
    fn test_c2_coefficients() {
        let eps45 = calculate_sq_2nd_eccentricity(wgs84::F) / 2.0;
        let c2 = c2_coefficients(eps45);

        assert_eq!(0.0, c2[0]);
        assert!(is_within_tolerance(
            eps45 / 2.0,
            c2[1],
            eps45 * eps45
        ));
        for k in 2..7 {
            assert!(libm::fabs(c2[k]) < libm::fabs(c2[k - 1]) * eps45);
        }
    }

    #[test]
    fn test_c3x_and_c3_coefficients() {
        let n = calculate_3rd_flattening(wgs84::F);
        let c3x = c3x_coefficients(n);

        assert!(is_within_tolerance(
            (1. - n) / 4.,
            c3x[0],
            f64::EPSILON
        ));
        for coeff in &c3x {
            assert!(*coeff > 0.0);
        }

        let eps45 = calculate_sq_2nd_eccentricity(wgs84::F) / 2.0;
        let c3 = c3_coefficients(&c3x, eps45);
        assert_eq!(0.0, c3[0]);
        assert!(is_within_tolerance(
            eps45 * c3x[0],
            c3[1],
            eps45 * eps45
        ));
        for k in 2..6 {
            assert!(libm::fabs(c3[k]) < libm::fabs(c3[k - 1]) * eps45);
        }
    }

    #[test]
    fn test_c4_coefficients_sphere() {
        // On a sphere the area series collapses to its 2/3 leading term.
        let c4x = c4x_coefficients(0.0);
        let c4 = c4_coefficients(&c4x, 0.0);

        assert_eq!(2.0 / 3.0, c4[0]);
        assert_eq!(0.0, c4[1]);
        assert_eq!(0.0, c4[2]);
        assert_eq!(0.0, c4[3]);
        assert_eq!(0.0, c4[4]);
        assert_eq!(0.0, c4[5]);
    }

    #[test]
    fn test_c4_coefficients_wgs84() {
        let n = calculate_3rd_flattening(wgs84::F);
        let eps45 = calculate_sq_2nd_eccentricity(wgs84::F) / 2.0;
        let c4x = c4x_coefficients(n);
        let c4 = c4_coefficients(&c4x, eps45);

        // leading term is close to but below the spherical 2/3
        assert!(c4[0] < 2.0 / 3.0);
        assert!(is_within_tolerance(2.0 / 3.0, c4[0], 2.0e-3));
        // terms decay by roughly a factor of eps each
        for k in 1..6 {
            assert!(libm::fabs(c4[k]) < libm::fabs(c4[k - 1]) * 2.0 * eps45);
        }
    }

    #[test]
    fn test_evaluate_polynomial() {
        let coeffs = [1.0, -0.5, 0.25];
        assert_eq!(1.0, evaluate_polynomial(&coeffs, 0.0));
        assert_eq!(0.76, evaluate_polynomial(&coeffs, 0.4));
        assert_eq!(0.75, evaluate_polynomial(&coeffs, 1.0));

        // two coefficients take the fused multiply-add path
        assert_eq!(0.8, evaluate_polynomial(&coeffs[0..2], 0.4));

        let empty: &[f64] = &[];
        assert_eq!(0.0, evaluate_polynomial(empty, 0.5));
    }

    #[test]
    fn test_sine_series() {
        let eps45 = calculate_sq_2nd_eccentricity(wgs84::F) / 2.0;
        let c1 = c1_coefficients(eps45);

        // compare Clenshaw summation against the direct sum
        let x = 0.1 * core::f64::consts::PI;
        let (sin_x, cos_x) = (libm::sin(x), libm::cos(x));
        let mut direct = 0.0;
        for (k, coeff) in c1.iter().enumerate().skip(1) {
            direct += coeff * libm::sin(2.0 * (k as f64) * x);
        }
        assert!(is_within_tolerance(
            direct,
            sine_series(&c1, sin_x, cos_x),
            f64::EPSILON
        ));

        // exact zeros at multiples of a quarter turn
        assert_eq!(0.0, sine_series(&c1, 0.0, 1.0));
        assert_eq!(0.0, sine_series(&c1, 1.0, 0.0));
        assert_eq!(0.0, sine_series(&c1, 0.0, -1.0));
    }

    #[test]
    fn test_sine_series_antisymmetry() {
        let eps45 = calculate_sq_2nd_eccentricity(wgs84::F) / 2.0;
        let c2 = c2_coefficients(eps45);

        let x = 0.7;
        let pos = sine_series(&c2, libm::sin(x), libm::cos(x));
        let neg = sine_series(&c2, libm::sin(-x), libm::cos(-x));
        assert_eq!(pos, -neg);
    }

    #[test]
    fn test_cosine_series() {
        let n = calculate_3rd_flattening(wgs84::F);
        let eps45 = calculate_sq_2nd_eccentricity(wgs84::F) / 2.0;
        let c4x = c4x_coefficients(n);
        let c4 = c4_coefficients(&c4x, eps45);

        // compare Clenshaw summation against the direct sum
        let x = 0.3;
        let (sin_x, cos_x) = (libm::sin(x), libm::cos(x));
        let mut direct = 0.0;
        for (k, coeff) in c4.iter().enumerate() {
            direct += coeff * libm::cos((2.0 * (k as f64) + 1.0) * x);
        }
        let pos = cosine_series(&c4, sin_x, cos_x);
        assert!(is_within_tolerance(direct, pos, f64::EPSILON));

        // at x = 0 the series is the plain sum of its coefficients
        let sum: f64 = c4.iter().sum();
        assert!(is_within_tolerance(
            sum,
            cosine_series(&c4, 0.0, 1.0),
            f64::EPSILON
        ));

        // at x = 90 degrees every odd harmonic vanishes
        assert_eq!(0.0, cosine_series(&c4, 1.0, 0.0));

        // symmetry in x
        let neg = cosine_series(&c4, libm::sin(-x), libm::cos(-x));
        assert_eq!(pos, neg);

        // alternating signs under x -> pi - x
        let supplement = cosine_series(&c4, sin_x, -cos_x);
        assert!(is_within_tolerance(pos, -supplement, 1.0e-15));
    }
}
