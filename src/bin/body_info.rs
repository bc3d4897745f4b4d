use std::f32::consts::TAU;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use solar_system::config::ViewerConfig;
use solar_system::file::read_file;
use solar_system::model::{Orrery, Registry};

/// Prints what the viewer knows about a body.
#[derive(Debug, Parser)]
struct Args {
    name: String,
    /// Body table to search instead of the built-in planets
    #[arg(long)]
    bodies: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let registry = match &args.bodies {
        Some(path) => read_file(path)
            .with_context(|| format!("couldn't load bodies from {}", path.display()))?,
        None => Registry::default_planets(),
    };

    let config = ViewerConfig::default();
    let orrery = Orrery::new(registry, &config);

    let body = match orrery.registry().find_by_name(&args.name) {
        Some(body) => body,
        None => bail!("no body named {:?}", args.name),
    };
    let info = &body.info;
    // The speed the viewer will actually use, after clamping
    let speed = orrery
        .get_state(body.id)
        .map_or(0.0, |state| state.angular_speed);

    println!("{} ({:?})", info.name, body.id);
    println!("- Radius: {}", info.radius);
    println!("- Orbit radius: {}", info.orbit_radius);
    println!("- Speed multiplier: {}", speed);
    match &info.texture {
        Some(path) => println!("- Texture: {}", path.display()),
        None => println!("- Texture: none"),
    }
    println!("- Size: {}", info.details.size);
    println!("- Distance from Sun: {}", info.details.distance);
    println!("- Description: {}", info.details.description);

    // One lap at 60 frames per second, fixed stepping
    if speed > 0.0 {
        let ticks = TAU / (config.base_rate * speed);
        println!("- Orbital period: {:.0} frames ({:.1} s)", ticks, ticks / 60.0);
    } else {
        println!("- Orbital period: never (not moving)");
    }
    Ok(())
}
