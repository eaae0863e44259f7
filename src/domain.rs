//! Physical description of the global grid
use crate::{
    error::DomainError,
    types::{RealScalar, MAX_RANK},
};
use itertools::izip;

/// Axis-aligned box covered by the global grid, with per-axis periodicity
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalDomain<T: RealScalar> {
    low_corner: Vec<T>,
    high_corner: Vec<T>,
    periodic: Vec<bool>,
}

impl<T: RealScalar> GlobalDomain<T> {
    /// Create a domain, checking that every axis has a positive extent
    pub fn new(
        low_corner: &[T],
        high_corner: &[T],
        periodic: &[bool],
    ) -> Result<Self, DomainError> {
        let ndims = low_corner.len();
        if ndims == 0 || ndims > MAX_RANK {
            return Err(DomainError::UnsupportedRank {
                max: MAX_RANK,
                found: ndims,
            });
        }
        if high_corner.len() != ndims {
            return Err(DomainError::LengthMismatch {
                what: "high corner",
                expected: ndims,
                found: high_corner.len(),
            });
        }
        if periodic.len() != ndims {
            return Err(DomainError::LengthMismatch {
                what: "periodicity",
                expected: ndims,
                found: periodic.len(),
            });
        }
        for (axis, (lo, hi)) in izip!(low_corner, high_corner).enumerate() {
            // Written so that NaN coordinates are rejected as well.
            if !(hi > lo) || !lo.is_finite() || !hi.is_finite() {
                return Err(DomainError::NonPositiveExtent {
                    axis,
                    low: lo.to_f64().unwrap_or(f64::NAN),
                    high: hi.to_f64().unwrap_or(f64::NAN),
                });
            }
        }
        Ok(Self {
            low_corner: low_corner.to_vec(),
            high_corner: high_corner.to_vec(),
            periodic: periodic.to_vec(),
        })
    }

    /// Number of axes
    pub fn num_dims(&self) -> usize {
        self.low_corner.len()
    }

    /// Low corner coordinate along an axis
    pub fn low_corner(&self, dim: usize) -> T {
        self.low_corner[dim]
    }

    /// High corner coordinate along an axis
    pub fn high_corner(&self, dim: usize) -> T {
        self.high_corner[dim]
    }

    /// Physical length of an axis
    pub fn extent(&self, dim: usize) -> T {
        self.high_corner[dim] - self.low_corner[dim]
    }

    /// Is an axis periodic?
    pub fn is_periodic(&self, dim: usize) -> bool {
        self.periodic[dim]
    }

    /// Periodicity of all axes
    pub fn periodicity(&self) -> &[bool] {
        &self.periodic
    }
}
