//! SPH smoothing kernels
//!
//! Poly6 for density and the color field, spiky gradient for pressure
//! and the viscosity Laplacian. All are evaluated on the displacement
//! `r = p - q` with support radius `h`; callers apply the `|r|^2 <= h^2`
//! cutoff before calling.

use crate::config::PRESSURE_KERNEL_EPSILON;
use crate::math::{PI, Real, Vector, pow6, pow9, sqr, zero_vector};

/// Poly6 density kernel.
#[inline]
pub fn density_kernel(r: Vector, h: Real) -> Real {
    KernelCoefficients::new(h).density(r)
}

/// Gradient of the poly6 kernel, used for the color-field gradient.
#[inline]
pub fn density_kernel_gradient(r: Vector, h: Real) -> Vector {
    KernelCoefficients::new(h).density_gradient(r)
}

/// Laplacian of the poly6 kernel, used for the color-field Laplacian.
#[inline]
pub fn density_kernel_laplacian(r: Vector, h: Real) -> Real {
    KernelCoefficients::new(h).density_laplacian(r)
}

/// Spiky kernel gradient. Zero for `|r|` below the singularity guard.
#[inline]
pub fn pressure_kernel_gradient(r: Vector, h: Real) -> Vector {
    KernelCoefficients::new(h).pressure_gradient(r)
}

/// Laplacian of the viscosity kernel.
#[inline]
pub fn viscosity_kernel_laplacian(r: Vector, h: Real) -> Real {
    KernelCoefficients::new(h).viscosity_laplacian(r)
}

/// Normalization factors for a fixed smoothing radius.
///
/// Computing `h^6`/`h^9` once per simulation keeps them out of the
/// per-pair loops.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KernelCoefficients {
    h: Real,
    h_sq: Real,
    poly6: Real,
    poly6_gradient: Real,
    poly6_laplacian: Real,
    spiky_gradient: Real,
    viscosity_laplacian: Real,
}

impl KernelCoefficients {
    pub fn new(h: Real) -> Self {
        let h6 = pow6(h);
        let h9 = pow9(h);
        Self {
            h,
            h_sq: sqr(h),
            poly6: 315.0 / (64.0 * PI * h9),
            poly6_gradient: -945.0 / (32.0 * PI * h9),
            poly6_laplacian: 945.0 / (32.0 * PI * h9),
            spiky_gradient: -45.0 / (PI * h6),
            viscosity_laplacian: 45.0 / (PI * h6),
        }
    }

    #[inline(always)]
    pub fn radius(&self) -> Real {
        self.h
    }

    #[inline(always)]
    pub fn radius_sq(&self) -> Real {
        self.h_sq
    }

    #[inline(always)]
    pub fn density(&self, r: Vector) -> Real {
        let diff = self.h_sq - r.length_squared();
        if diff < 0.0 {
            return 0.0;
        }
        self.poly6 * diff * diff * diff
    }

    #[inline(always)]
    pub fn density_gradient(&self, r: Vector) -> Vector {
        let diff = self.h_sq - r.length_squared();
        self.poly6_gradient * diff * diff * r
    }

    #[inline(always)]
    pub fn density_laplacian(&self, r: Vector) -> Real {
        let r_sq = r.length_squared();
        self.poly6_laplacian * (self.h_sq - r_sq) * (7.0 * r_sq - 3.0 * self.h_sq)
    }

    #[inline(always)]
    pub fn pressure_gradient(&self, r: Vector) -> Vector {
        if r.length_squared() < sqr(PRESSURE_KERNEL_EPSILON) {
            return zero_vector();
        }
        let length = r.length();
        self.spiky_gradient * sqr(self.h - length) * (r / length)
    }

    #[inline(always)]
    pub fn viscosity_laplacian(&self, r: Vector) -> Real {
        self.viscosity_laplacian * (self.h - r.length())
    }
}
