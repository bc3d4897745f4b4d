use std::path::Path;

use approx::assert_relative_eq;
use solar_system::config::ViewerConfig;
use solar_system::file::{parse_registry, read_file};
use solar_system::model::orrery::MAX_ANGULAR_SPEED;
use solar_system::model::Orrery;

#[test]
fn test_sample_table_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("bodies.txt");
    let registry = read_file(&path).unwrap();
    assert_eq!(registry.len(), 8);

    let earth = registry.find_by_name("Earth").unwrap();
    assert_relative_eq!(earth.info.orbit_radius, 46.0);
    assert_eq!(earth.info.details.distance, "149.6M km");
    assert!(registry.find_by_name("Neptune").unwrap().info.texture.is_none());

    // Mercury laps Earth four times over
    let config = ViewerConfig {
        random_initial_angles: false,
        ..ViewerConfig::default()
    };
    let mut orrery = Orrery::new(registry, &config);
    orrery.advance(100.0);
    let ids: Vec<_> = orrery.registry().ids().collect();
    let mercury = orrery.get_state(ids[0]).unwrap().angle;
    let earth = orrery.get_state(ids[2]).unwrap().angle;
    assert_relative_eq!(mercury, 4.0 * earth, epsilon = 1e-5);
}

#[test]
fn test_table_speeds_are_clamped() {
    let registry = parse_registry(
        "name radius orbit_radius speed color texture\n\
         Fast 1.0 20 50 ffffff -\n\
         Backwards 1.0 30 -3 ffffff -\n",
    )
    .unwrap();
    let orrery = Orrery::new(registry, &ViewerConfig::default());

    let speeds: Vec<f32> = orrery
        .bodies()
        .map(|b| orrery.get_state(b.id).unwrap().angular_speed)
        .collect();
    assert_eq!(speeds, vec![MAX_ANGULAR_SPEED, 0.0]);
}
