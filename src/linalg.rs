//! Numerical comparison of reciprocal condition numbers.
//!
//! The belief covariance must remain positive semi-definite, but the recursion can degrade it
//! numerically. The diagonal gives a fast estimate of the reciprocal condition number of a
//! symmetric matrix, enough to catch negative or NaN variances without factorising.

use nalgebra as na;
use na::{allocator::Allocator, DefaultAllocator, Dim, MatrixMN, RealField};

use crate::error::{EstimateError, Result};

/// Estimate the reciprocal condition number of a symmetric matrix for inversion.
///
/// The condition number is defined from a matrix norm. Choose the max diagonal element as the
/// norm of the original matrix and assume the norm of its inverse is the min diagonal element,
/// so rcond = min/max.
///
/// Defined to be 0 for a semi-definite or empty matrix, <0 for a negative matrix and <0 with
/// any NaN diagonal element.
pub fn rcond_symmetric<N: RealField, R: Dim, C: Dim>(sm: &MatrixMN<N, R, C>) -> N
where
    DefaultAllocator: Allocator<N, R, C>,
{
    let n = sm.nrows();
    if n == 0 {
        return N::zero();
    }

    let mut mind = sm[(0, 0)];
    let mut maxd = mind;
    for i in 0..n {
        let d = sm[(i, i)];
        if d != d {
            // NaN
            mind = N::one().neg();
            break;
        }
        if d < mind {
            mind = d;
        }
        if d > maxd {
            maxd = d;
        }
    }

    rcond_min_max(mind, maxd)
}

fn rcond_min_max<N: RealField>(mind: N, maxd: N) -> N {
    if mind < N::zero() {
        // matrix is negative, mind < 0 but does not represent a rcond
        mind
    } else {
        let rcond = mind / maxd;
        if rcond != rcond {
            // NaN, singular due to (mind == maxd) == (zero or infinity)
            N::zero()
        } else {
            rcond
        }
    }
}

/// Checks a reciprocal condition number is >= 0.
///
/// IEC 559 NaN values are never true.
pub fn check_non_negative<N: RealField>(rcond: N, error: EstimateError) -> Result<()> {
    if rcond >= N::zero() {
        Ok(())
    } else {
        Err(error)
    }
}
