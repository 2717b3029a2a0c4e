//! Time-stepping driver that owns the live particle buffer
//!
//! Each step lifts the authoritative buffer into a [`System`],
//! advances it with the configured integrator, and commits the result
//! back with the length-checked copy-out.

use crate::engine::{Force, ForceModel};
use crate::integrator::Integrator;
use crate::particle::Particle;
use crate::state::{StateError, System};

/// A running simulation: the live particle buffer plus everything
/// needed to advance it in time
#[derive(Debug)]
pub struct Simulation {
    particles: Vec<Particle>,
    model: ForceModel,
    integrator: Integrator,
    dt: f32,
    time: f32,
}

impl Simulation {
    /// Build a simulation, validating the scene up front: at least
    /// one particle, a positive finite `dt`, and spring endpoints
    /// that are distinct, in-range particle indices
    pub fn new(
        particles: Vec<Particle>,
        model: ForceModel,
        integrator: Integrator,
        dt: f32,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        if particles.is_empty() {
            return Err("simulation requires at least one particle".into());
        }
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(format!("time step must be positive and finite, got {}", dt).into());
        }
        for force in &model.forces {
            if let Force::Spring { a, b, .. } = force {
                if *a >= particles.len() || *b >= particles.len() {
                    return Err(format!(
                        "spring references particle {} but only {} particles exist",
                        (*a).max(*b),
                        particles.len()
                    )
                    .into());
                }
                if a == b {
                    return Err(format!("spring connects particle {} to itself", a).into());
                }
            }
        }

        Ok(Self {
            particles,
            model,
            integrator,
            dt,
            time: 0.0,
        })
    }

    /// Advance the live buffer by one time step
    pub fn step(&mut self) -> Result<(), StateError> {
        let state = System::from_slice(&self.particles)?;
        let next = self.integrator.step(&state, &self.model, self.dt)?;
        next.copy_into(&mut self.particles)?;
        self.time += self.dt;
        Ok(())
    }

    /// Advance the live buffer by `steps` time steps
    pub fn run(&mut self, steps: usize) -> Result<(), StateError> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }

    /// The authoritative particle buffer
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Simulation time advanced so far
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}
