//! Error taxonomy of the estimation library.
//!
//! All variants are programmer or configuration errors, never transient conditions.
//! None should be retried automatically; the caller decides whether to abort the run or
//! reset the filter with corrected parameters.

use core::fmt;

/// Errors raised by estimator construction, update and sampling operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EstimateError {
    /// Degenerate parameterisation, e.g. a zero total variance in the scalar update
    /// or a prior covariance that is not positive semi-definite.
    InvalidParameter(&'static str),
    /// A covariance that cannot be factorised: a singular innovation covariance in the
    /// vector update, or a noise covariance no multivariate draw can be made from.
    SingularCovariance(&'static str),
    /// Incompatible matrix or vector shapes, detected at construction where possible,
    /// otherwise at the first offending call.
    DimensionMismatch(&'static str),
}

impl fmt::Display for EstimateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimateError::InvalidParameter(what) => write!(f, "invalid parameter: {}", what),
            EstimateError::SingularCovariance(what) => write!(f, "singular covariance: {}", what),
            EstimateError::DimensionMismatch(what) => write!(f, "dimension mismatch: {}", what),
        }
    }
}

impl std::error::Error for EstimateError {}

pub type Result<T> = core::result::Result<T, EstimateError>;
