pub mod engine;
pub mod integrator;
pub mod particle;
pub mod runtime;
pub mod state;

pub use engine::{Force, ForceModel};
pub use integrator::{derivative, euler_step, midpoint_step, rk4_step, Integrator};
pub use particle::Particle;
pub use runtime::Simulation;
pub use state::{StateError, System};

// Test helpers module (public for integration tests)
// Always compiled - integration tests are separate crates and need access
pub mod tests;
