//! Fixed-step ODE integrators written over the state-vector algebra
//!
//! Each step combines whole-system states with `add`/`scale` instead
//! of looping over particles, so the same handful of expressions
//! serves every integration order.

use crate::engine::ForceModel;
use crate::particle::Particle;
use crate::state::{StateError, System};
use glam::Vec3;

/// Available integration schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Integrator {
    Euler,
    Midpoint,
    RungeKutta4,
}

impl Integrator {
    /// Advance `state` by one step of size `dt`
    pub fn step(self, state: &System, model: &ForceModel, dt: f32) -> Result<System, StateError> {
        match self {
            Integrator::Euler => euler_step(state, model, dt),
            Integrator::Midpoint => midpoint_step(state, model, dt),
            Integrator::RungeKutta4 => rk4_step(state, model, dt),
        }
    }
}

/// The time derivative of a system state: positions change at `vel`,
/// velocities at `force * inv_mass`. Pinned particles (zero inverse
/// mass) therefore never accelerate. The `force` slot of the result
/// is zeroed; force has no derivative of its own.
pub fn derivative(state: &System) -> System {
    let particles: Vec<Particle> = state
        .as_slice()
        .iter()
        .map(|p| Particle {
            pos: p.vel,
            vel: p.force * p.inv_mass,
            force: Vec3::ZERO,
            inv_mass: p.inv_mass,
        })
        .collect();
    System::from_vec(particles)
}

/// Evaluate forces at `state` and return its time derivative
fn eval_derivative(state: &System, model: &ForceModel) -> System {
    let mut s = state.clone();
    model.evaluate(s.as_mut_slice());
    derivative(&s)
}

/// Explicit Euler: `s + d(s) * dt`
pub fn euler_step(state: &System, model: &ForceModel, dt: f32) -> Result<System, StateError> {
    let d = eval_derivative(state, model);
    state.add(&d.scale(dt))
}

/// Midpoint method: an Euler half-step to the midpoint, then a full
/// step using the derivative evaluated there
pub fn midpoint_step(state: &System, model: &ForceModel, dt: f32) -> Result<System, StateError> {
    let d0 = eval_derivative(state, model);
    let mid = state.add(&d0.scale(0.5 * dt))?;
    let d_mid = eval_derivative(&mid, model);
    state.add(&d_mid.scale(dt))
}

/// Classic fourth-order Runge-Kutta:
/// `s + (k1 + 2*k2 + 2*k3 + k4) * dt/6`
pub fn rk4_step(state: &System, model: &ForceModel, dt: f32) -> Result<System, StateError> {
    let k1 = eval_derivative(state, model);
    let k2 = eval_derivative(&state.add(&k1.scale(0.5 * dt))?, model);
    let k3 = eval_derivative(&state.add(&k2.scale(0.5 * dt))?, model);
    let k4 = eval_derivative(&state.add(&k3.scale(dt))?, model);

    let sum = k1.add(&k2.scale(2.0))?.add(&k3.scale(2.0))?.add(&k4)?;
    state.add(&sum.scale(dt / 6.0))
}
