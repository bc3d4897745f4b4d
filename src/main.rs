use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use kiss3d::light::Light;
use kiss3d::window::Window;
use log::info;

use solar_system::config::ViewerConfig;
use solar_system::file::read_file;
use solar_system::gui::Simulation;
use solar_system::model::{Orrery, Registry};

#[derive(Debug, Parser)]
#[command(about = "Interactive 3D view of the solar system")]
struct Args {
    /// Body table to load instead of the built-in planets
    #[arg(long)]
    bodies: Option<PathBuf>,
    /// Start with the animation paused
    #[arg(long)]
    paused: bool,
    /// Advance by wall-clock time instead of a fixed amount per frame
    #[arg(long)]
    realtime: bool,
    /// Seed for starting angles and the starfield
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Number of background stars
    #[arg(long, default_value_t = 10_000)]
    stars: usize,
    /// Start every planet at angle 0
    #[arg(long)]
    no_random_angles: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let registry = match &args.bodies {
        Some(path) => read_file(path)
            .with_context(|| format!("couldn't load bodies from {}", path.display()))?,
        None => Registry::default_planets(),
    };
    info!("Loaded {} bodies", registry.len());

    let mut config = ViewerConfig {
        seed: args.seed,
        star_count: args.stars,
        random_initial_angles: !args.no_random_angles,
        ..ViewerConfig::default()
    };
    if args.realtime {
        config = config.with_real_time();
    }

    let mut window = Window::new("Solar System");
    window.set_light(Light::StickToCamera);
    window.set_framerate_limit(Some(60));

    let orrery = Orrery::new(registry, &config);
    let simulation = Simulation::new(orrery, config, args.paused, &mut window);
    window.render_loop(simulation);
    Ok(())
}
