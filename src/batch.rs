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

//! The batch module solves many direct geodesic problems in one call with
//! NumPy-style broadcasting over the input columns.
//!
//! Each column holds either one value, broadcast to every geodesic, or one
//! value per geodesic. The column lengths are validated before any
//! per-geodesic work and every element is solved independently with the
//! scalar [`solve_direct`] function, so the results are element-for-element
//! identical to scalar calls.

use crate::geodesic::{solve_direct, DirectSolution, GeodesicLength, Outputs};
use crate::{Ellipsoid, Error, Metres};
use angle_sc::Degrees;
use log::trace;
use unit_sphere::LatLong;

/// The interpretation of the length column of a [`BatchInput`],
/// one mode for the whole batch.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LengthMode {
    /// Lengths are distances along the geodesics in metres.
    Distance,
    /// Lengths are great circle arcs on the auxiliary sphere in degrees.
    Arc,
}

/// The input columns of a batch of direct geodesic problems.
///
/// Each column must hold either a single value or one value per geodesic.
#[derive(Clone, Copy, Debug)]
pub struct BatchInput<'a> {
    /// The start latitudes in degrees.
    pub lat1: &'a [f64],
    /// The start longitudes in degrees.
    pub lon1: &'a [f64],
    /// The start azimuths in degrees.
    pub azi1: &'a [f64],
    /// The geodesic lengths, interpreted according to the `LengthMode`.
    pub length: &'a [f64],
}

impl BatchInput<'_> {
    /// The lengths of the four columns, in declaration order.
    #[must_use]
    fn column_lengths(&self) -> [usize; 4] {
        [
            self.lat1.len(),
            self.lon1.len(),
            self.azi1.len(),
            self.length.len(),
        ]
    }
}

/// The common broadcast length of the columns: every column length must be
/// one or equal to the longest column.
fn broadcast_length(lengths: [usize; 4]) -> Result<usize, Error> {
    let n = lengths.into_iter().max().unwrap_or_default();
    if lengths.into_iter().all(|len| len == n || len == 1) {
        Ok(n)
    } else {
        Err(Error::IncompatibleShapes { lengths })
    }
}

/// The element of a column for geodesic `i`, a single valued column is
/// broadcast.
fn column(values: &[f64], i: usize) -> f64 {
    values[if values.len() == 1 { 0 } else { i }]
}

/// Solve a batch of direct geodesic problems.
///
/// The columns are validated before any geodesic is solved: each must hold
/// one value or one value per geodesic, otherwise
/// `Error::IncompatibleShapes` is returned.
/// * `input` - the input columns.
/// * `mode` - the interpretation of the length column.
/// * `outputs` - the optional quantities to calculate for every geodesic.
/// * `ellipsoid` - the `Ellipsoid`.
///
/// returns the `DirectSolution`s in column order.
///
/// # Errors
/// `Error::IncompatibleShapes` if the column lengths cannot be broadcast.
/// # Examples
/// ```
/// use ellipsoid_geodesics::batch::{solve_direct_batch, BatchInput, LengthMode};
/// use ellipsoid_geodesics::geodesic::Outputs;
/// use ellipsoid_geodesics::Ellipsoid;
///
/// let wgs84 = Ellipsoid::wgs84();
/// let input = BatchInput {
///     lat1: &[0.0],
///     lon1: &[0.0],
///     azi1: &[45.0, 90.0, 135.0],
///     length: &[100_000.0],
/// };
/// let results = solve_direct_batch(&input, LengthMode::Distance, Outputs::NONE, &wgs84)
///     .unwrap();
/// assert_eq!(3, results.len());
/// ```
pub fn solve_direct_batch(
    input: &BatchInput,
    mode: LengthMode,
    outputs: Outputs,
    ellipsoid: &Ellipsoid,
) -> Result<Vec<DirectSolution>, Error> {
    let lengths = input.column_lengths();
    let n = broadcast_length(lengths)?;
    trace!("solve_direct_batch: {n} geodesics, mode {mode:?}");

    let mut results = Vec::with_capacity(n);
    for i in 0..n {
        let a = LatLong::new(
            Degrees(column(input.lat1, i)),
            Degrees(column(input.lon1, i)),
        );
        let azi1 = Degrees(column(input.azi1, i));
        let length = match mode {
            LengthMode::Distance => GeodesicLength::Distance(Metres(column(input.length, i))),
            LengthMode::Arc => GeodesicLength::Arc(Degrees(column(input.length, i))),
        };
        results.push(solve_direct(&a, azi1, length, outputs, ellipsoid));
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Ellipsoid;

    #[test]
    fn test_broadcast_length() {
        assert_eq!(Ok(3), broadcast_length([3, 1, 3, 1]));
        assert_eq!(Ok(1), broadcast_length([1, 1, 1, 1]));
        assert_eq!(Ok(0), broadcast_length([0, 0, 0, 0]));

        let result = broadcast_length([3, 2, 3, 1]);
        assert_eq!(
            Err(Error::IncompatibleShapes {
                lengths: [3, 2, 3, 1]
            }),
            result
        );

        // an empty column is not broadcast
        assert!(broadcast_length([3, 0, 3, 1]).is_err());
    }

    #[test]
    fn test_solve_direct_batch_matches_scalar() {
        let wgs84_ellipsoid = Ellipsoid::wgs84();

        let lat1 = [10.0, -20.0, 35.5];
        let lon1 = [0.0, 45.0, -120.0];
        let azi1 = [30.0, 150.0, -60.0];
        let s12 = [1.0e6, 5.0e6, 1.0e7];

        let input = BatchInput {
            lat1: &lat1,
            lon1: &lon1,
            azi1: &azi1,
            length: &s12,
        };
        let results =
            solve_direct_batch(&input, LengthMode::Distance, Outputs::ALL, &wgs84_ellipsoid)
                .unwrap();
        assert_eq!(3, results.len());

        for i in 0..3 {
            let scalar = solve_direct(
                &LatLong::new(Degrees(lat1[i]), Degrees(lon1[i])),
                Degrees(azi1[i]),
                GeodesicLength::Distance(Metres(s12[i])),
                Outputs::ALL,
                &wgs84_ellipsoid,
            );
            assert_eq!(scalar, results[i]);
        }
    }

    #[test]
    fn test_solve_direct_batch_broadcast() {
        let wgs84_ellipsoid = Ellipsoid::wgs84();

        let input = BatchInput {
            lat1: &[51.5],
            lon1: &[0.0],
            azi1: &[0.0, 90.0, 180.0, -90.0],
            length: &[250_000.0],
        };
        let results =
            solve_direct_batch(&input, LengthMode::Distance, Outputs::NONE, &wgs84_ellipsoid)
                .unwrap();
        assert_eq!(4, results.len());

        // the scalar columns are broadcast to every geodesic
        let east = solve_direct(
            &LatLong::new(Degrees(51.5), Degrees(0.0)),
            Degrees(90.0),
            GeodesicLength::Distance(Metres(250_000.0)),
            Outputs::NONE,
            &wgs84_ellipsoid,
        );
        assert_eq!(east, results[1]);
    }

    #[test]
    fn test_solve_direct_batch_arc_mode() {
        let wgs84_ellipsoid = Ellipsoid::wgs84();

        let input = BatchInput {
            lat1: &[0.0],
            lon1: &[0.0],
            azi1: &[90.0],
            length: &[90.0],
        };
        let results =
            solve_direct_batch(&input, LengthMode::Arc, Outputs::NONE, &wgs84_ellipsoid).unwrap();
        assert_eq!(1, results.len());
        assert_eq!(90.0, results[0].a12.0);

        let scalar = solve_direct(
            &LatLong::new(Degrees(0.0), Degrees(0.0)),
            Degrees(90.0),
            GeodesicLength::Arc(Degrees(90.0)),
            Outputs::NONE,
            &wgs84_ellipsoid,
        );
        assert_eq!(scalar, results[0]);
    }

    #[test]
    fn test_solve_direct_batch_incompatible_shapes() {
        let wgs84_ellipsoid = Ellipsoid::wgs84();

        let input = BatchInput {
            lat1: &[0.0, 10.0],
            lon1: &[0.0],
            azi1: &[90.0, 90.0, 90.0],
            length: &[1.0e6],
        };
        let result =
            solve_direct_batch(&input, LengthMode::Distance, Outputs::NONE, &wgs84_ellipsoid);
        assert_eq!(
            Err(Error::IncompatibleShapes {
                lengths: [2, 1, 3, 1]
            }),
            result
        );
    }

    #[test]
    fn test_solve_direct_batch_empty() {
        let wgs84_ellipsoid = Ellipsoid::wgs84();

        let input = BatchInput {
            lat1: &[],
            lon1: &[],
            azi1: &[],
            length: &[],
        };
        let results =
            solve_direct_batch(&input, LengthMode::Distance, Outputs::NONE, &wgs84_ellipsoid)
                .unwrap();
        assert!(results.is_empty());
    }
}
