//! State-vector algebra over whole particle systems
//!
//! Integrators combine the derivatives of a system at different time
//! steps (velocity as the first derivative of position, acceleration
//! as the second). Wrapping the full particle list in a [`System`]
//! with addition, subtraction, scaling, division, and element-wise
//! exponentiation lets every integrator be written as a handful of
//! whole-system expressions instead of per-particle loops.

use crate::particle::Particle;
use glam::Vec3;
use thiserror::Error;

/// Errors raised by state-vector construction and arithmetic
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    /// A state vector must hold at least one particle
    #[error("state vector requires at least one particle")]
    InvalidSize,
    /// Binary operation on state vectors of different lengths
    #[error("state vector length mismatch: {left} vs {right}")]
    SizeMismatch { left: usize, right: usize },
    /// Scalar division of a state vector by zero
    #[error("division of state vector by zero")]
    DivisionByZero,
}

/// The state of a whole particle system as one algebraic value
///
/// Index `i` refers to the same physical particle in every operand of
/// a binary operation. All operations are pure: they read their
/// operands and allocate a fresh result of the same length. `inv_mass`
/// is a static particle property rather than an integrated quantity,
/// so every operation propagates it from the left-hand operand
/// unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct System {
    particles: Vec<Particle>,
}

impl System {
    /// Create a system of `n` zero-initialized particles, a
    /// placeholder for later operations
    pub fn zeroed(n: usize) -> Result<Self, StateError> {
        if n == 0 {
            return Err(StateError::InvalidSize);
        }
        Ok(Self {
            particles: vec![Particle::default(); n],
        })
    }

    /// Create a system by copying particle records from `particles`,
    /// typically the live simulation buffer
    pub fn from_slice(particles: &[Particle]) -> Result<Self, StateError> {
        if particles.is_empty() {
            return Err(StateError::InvalidSize);
        }
        Ok(Self {
            particles: particles.to_vec(),
        })
    }

    // Callers guarantee `particles` came from an existing system, so
    // the non-empty invariant already holds.
    pub(crate) fn from_vec(particles: Vec<Particle>) -> Self {
        debug_assert!(!particles.is_empty());
        Self { particles }
    }

    /// Number of particles in the system
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Borrow the particle records, e.g. as input to a force evaluator
    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutably borrow the particle records so external routines can
    /// write `force` (or `pos`/`vel`) in place. The borrow is tied to
    /// the system's lifetime and cannot be retained past it.
    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Copy every record into `target`, which must hold at least
    /// `self.len()` records; any extra room in `target` is left
    /// untouched. Used to commit an integration result back into the
    /// live simulation buffer.
    pub fn copy_into(&self, target: &mut [Particle]) -> Result<(), StateError> {
        if target.len() < self.len() {
            return Err(StateError::SizeMismatch {
                left: self.len(),
                right: target.len(),
            });
        }
        target[..self.len()].copy_from_slice(&self.particles);
        Ok(())
    }

    /// Component-wise sum of `pos`, `vel`, and `force`. Position is
    /// summed too, for algebraic convenience, even though integrators
    /// rarely need it.
    pub fn add(&self, other: &Self) -> Result<Self, StateError> {
        self.combine(other, |a, b| a + b)
    }

    /// Component-wise difference of `pos`, `vel`, and `force`
    pub fn sub(&self, other: &Self) -> Result<Self, StateError> {
        self.combine(other, |a, b| a - b)
    }

    /// Multiply every `pos`/`vel`/`force` component by `k`
    pub fn scale(&self, k: f32) -> Self {
        self.map(|c| c * k)
    }

    /// Divide every `pos`/`vel`/`force` component by `k`. A zero
    /// divisor is rejected as [`StateError::DivisionByZero`] before
    /// any component is computed; IEEE infinities never enter the
    /// result through this path.
    pub fn div(&self, k: f32) -> Result<Self, StateError> {
        if k == 0.0 {
            return Err(StateError::DivisionByZero);
        }
        Ok(self.map(|c| c / k))
    }

    /// Raise every `pos`/`vel`/`force` component to the power `k`,
    /// independently per component. A generalized algebraic primitive
    /// rather than a physical operation: negative bases with
    /// fractional exponents follow `f32::powf` and yield NaN
    /// components, which is accepted, not special-cased.
    pub fn powf(&self, k: f32) -> Self {
        self.map(|c| Vec3::new(c.x.powf(k), c.y.powf(k), c.z.powf(k)))
    }

    fn combine(&self, other: &Self, op: impl Fn(Vec3, Vec3) -> Vec3) -> Result<Self, StateError> {
        if self.len() != other.len() {
            return Err(StateError::SizeMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        let particles = self
            .particles
            .iter()
            .zip(other.particles.iter())
            .map(|(a, b)| Particle {
                pos: op(a.pos, b.pos),
                vel: op(a.vel, b.vel),
                force: op(a.force, b.force),
                inv_mass: a.inv_mass,
            })
            .collect();
        Ok(Self::from_vec(particles))
    }

    fn map(&self, op: impl Fn(Vec3) -> Vec3) -> Self {
        let particles = self
            .particles
            .iter()
            .map(|p| Particle {
                pos: op(p.pos),
                vel: op(p.vel),
                force: op(p.force),
                inv_mass: p.inv_mass,
            })
            .collect();
        Self::from_vec(particles)
    }
}
