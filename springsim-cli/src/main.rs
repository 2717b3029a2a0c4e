use clap::{Parser, Subcommand, ValueEnum};
use glam::Vec3;
use log::info;
use springsim_core::{Force, ForceModel, Integrator, Particle, Simulation};

#[derive(Parser)]
#[command(name = "springsim")]
#[command(about = "Mass-spring particle simulation driver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a built-in scene and print the final particle states
    Run {
        /// Scene to simulate
        #[arg(value_enum)]
        scene: Scene,
        /// Time step in seconds
        #[arg(long, default_value_t = 0.01)]
        dt: f32,
        /// Number of steps to advance
        #[arg(long, default_value_t = 100)]
        steps: usize,
        /// Integration scheme
        #[arg(long, value_enum, default_value = "rk4")]
        integrator: Scheme,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Scene {
    /// A bob hanging from a pinned anchor by a single spring
    Pendulum,
    /// A chain of spring-linked particles hanging under gravity
    Chain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Scheme {
    Euler,
    Midpoint,
    #[value(name = "rk4")]
    RungeKutta4,
}

impl From<Scheme> for Integrator {
    fn from(scheme: Scheme) -> Self {
        match scheme {
            Scheme::Euler => Integrator::Euler,
            Scheme::Midpoint => Integrator::Midpoint,
            Scheme::RungeKutta4 => Integrator::RungeKutta4,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            scene,
            dt,
            steps,
            integrator,
        } => match run_scene(scene, dt, steps, integrator.into()) {
            Ok(()) => {}
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    }
}

fn run_scene(
    scene: Scene,
    dt: f32,
    steps: usize,
    integrator: Integrator,
) -> Result<(), Box<dyn std::error::Error>> {
    let (particles, model) = match scene {
        Scene::Pendulum => pendulum(),
        Scene::Chain => chain(),
    };
    info!(
        "running {:?}: {} particles, dt = {}, {} steps",
        scene,
        particles.len(),
        dt,
        steps
    );

    let mut sim = Simulation::new(particles, model, integrator, dt)?;
    sim.run(steps)?;

    info!("finished at t = {:.4}", sim.time());
    for (i, p) in sim.particles().iter().enumerate() {
        println!(
            "particle {}: pos = ({:.4}, {:.4}, {:.4}) vel = ({:.4}, {:.4}, {:.4})",
            i, p.pos.x, p.pos.y, p.pos.z, p.vel.x, p.vel.y, p.vel.z
        );
    }

    Ok(())
}

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

fn chain() -> (Vec<Particle>, ForceModel) {
    const LINKS: usize = 8;

    let mut particles = vec![Particle::pinned(Vec3::ZERO)];
    let mut model = ForceModel::new()
        .with(Force::Gravity {
            g: Vec3::new(0.0, -9.8, 0.0),
        })
        .with(Force::Drag { kd: 0.1 });

    for i in 1..=LINKS {
        particles.push(Particle::new(Vec3::new(0.5 * i as f32, 0.0, 0.0), 0.2));
        model = model.with(Force::Spring {
            a: i - 1,
            b: i,
            k: 80.0,
            rest: 0.5,
        });
    }

    (particles, model)
}
