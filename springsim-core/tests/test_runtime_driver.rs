//! Unit tests for the simulation driver and its scene validation

use glam::Vec3;
use springsim_core::tests::test_helpers::approx_eq_vec3;
use springsim_core::{Force, ForceModel, Integrator, Particle, Simulation};

fn pendulum() -> (Vec<Particle>, ForceModel) {
    let particles = vec![
        Particle::pinned(Vec3::ZERO),
        Particle::new(Vec3::new(1.0, 0.0, 0.0), 1.0),
    ];
    let model = ForceModel::new()
        .with(Force::Spring {
            a: 0,
            b: 1,
            k: 50.0,
            rest: 1.0,
        })
        .with(Force::Gravity {
            g: Vec3::new(0.0, -9.8, 0.0),
        });
    (particles, model)
}

#[test]
fn test_new_rejects_empty_particle_set() {
    let result = Simulation::new(Vec::new(), ForceModel::new(), Integrator::Euler, 0.01);
    assert!(result.is_err());
    assert!(result
        .err()
        .unwrap()
        .to_string()
        .contains("at least one particle"));
}

#[test]
fn test_new_rejects_bad_time_steps() {
    for dt in [0.0_f32, -0.01, f32::NAN, f32::INFINITY] {
        let particles = vec![Particle::new(Vec3::ZERO, 1.0)];
        assert!(
            Simulation::new(particles, ForceModel::new(), Integrator::Euler, dt).is_err(),
            "dt = {} should be rejected",
            dt
        );
    }
}

#[test]
fn test_new_rejects_out_of_range_spring_index() {
    let particles = vec![
        Particle::new(Vec3::ZERO, 1.0),
        Particle::new(Vec3::new(1.0, 0.0, 0.0), 1.0),
    ];
    let model = ForceModel::new().with(Force::Spring {
        a: 0,
        b: 2, // only particles 0 and 1 exist
        k: 1.0,
        rest: 1.0,
    });

    let result = Simulation::new(particles, model, Integrator::Euler, 0.01);
    assert!(result.is_err());
    assert!(result.err().unwrap().to_string().contains("spring"));
}

#[test]
fn test_new_rejects_self_referential_spring() {
    let particles = vec![Particle::new(Vec3::ZERO, 1.0)];
    let model = ForceModel::new().with(Force::Spring {
        a: 0,
        b: 0,
        k: 1.0,
        rest: 1.0,
    });

    assert!(Simulation::new(particles, model, Integrator::Euler, 0.01).is_err());
}

#[test]
fn test_step_commits_result_into_live_buffer() {
    let particles = vec![Particle::new(Vec3::ZERO, 1.0)];
    let model = ForceModel::new().with(Force::Gravity {
        g: Vec3::new(0.0, -10.0, 0.0),
    });
    let mut sim = Simulation::new(particles, model, Integrator::Euler, 0.1).unwrap();

    sim.step().unwrap();

    assert!(approx_eq_vec3(
        sim.particles()[0].vel,
        Vec3::new(0.0, -1.0, 0.0),
        1e-5
    ));
    assert!((sim.time() - 0.1).abs() < 1e-6);
}

#[test]
fn test_run_advances_free_particle_linearly() {
    let particles = vec![Particle {
        pos: Vec3::ZERO,
        vel: Vec3::new(1.0, 2.0, 3.0),
        force: Vec3::ZERO,
        inv_mass: 1.0,
    }];
    let mut sim = Simulation::new(particles, ForceModel::new(), Integrator::RungeKutta4, 0.1).unwrap();

    sim.run(10).unwrap();

    assert!(approx_eq_vec3(sim.particles()[0].pos, Vec3::new(1.0, 2.0, 3.0), 1e-5));
    assert!((sim.time() - 1.0).abs() < 1e-5);
}

#[test]
fn test_all_integrators_keep_pinned_particles_fixed() {
    for integrator in [Integrator::Euler, Integrator::Midpoint, Integrator::RungeKutta4] {
        let (particles, model) = pendulum();
        let mut sim = Simulation::new(particles, model, integrator, 0.01).unwrap();

        sim.run(50).unwrap();

        // Zero inverse mass nulls every derivative, so the anchor is
        // bit-for-bit unmoved
        assert_eq!(sim.particles()[0].pos, Vec3::ZERO);
        assert_eq!(sim.particles()[0].vel, Vec3::ZERO);
        // The bob has moved under gravity
        assert!(sim.particles()[1].pos != Vec3::new(1.0, 0.0, 0.0));
    }
}

#[test]
fn test_step_preserves_particle_count() {
    let (particles, model) = pendulum();
    let n = particles.len();
    let mut sim = Simulation::new(particles, model, Integrator::Midpoint, 0.01).unwrap();

    sim.run(5).unwrap();

    assert_eq!(sim.particles().len(), n);
}
