// Planet table for the default registry. Sizes and distances are the real
// values, shown in labels; `radius` and `orbit_radius` are scene units and are
// purely illustrative.

pub struct PlanetEntry {
    pub name: &'static str,
    pub radius: f32,
    pub orbit_radius: f32,
    pub color: u32,
    pub size: &'static str,
    pub distance: &'static str,
    pub description: &'static str,
}

pub const SUN_TEXTURE: &str = "textures/sun.jpg";
pub const TEXTURE_DIR: &str = "textures";

pub const PLANETS: [PlanetEntry; 8] = [
    PlanetEntry {
        name: "Mercury",
        radius: 1.2,
        orbit_radius: 30.0,
        color: 0xb0b0b0,
        size: "4,879 km",
        distance: "57.9M km",
        description: "Smallest planet, closest to the Sun.",
    },
    PlanetEntry {
        name: "Venus",
        radius: 1.8,
        orbit_radius: 38.0,
        color: 0xe6c200,
        size: "12,104 km",
        distance: "108.2M km",
        description: "Hottest planet, thick toxic atmosphere.",
    },
    PlanetEntry {
        name: "Earth",
        radius: 1.8,
        orbit_radius: 46.0,
        color: 0x00aaff,
        size: "12,742 km",
        distance: "149.6M km",
        description: "Our home planet, only known life.",
    },
    PlanetEntry {
        name: "Mars",
        radius: 1.5,
        orbit_radius: 54.0,
        color: 0xff4d4d,
        size: "6,779 km",
        distance: "227.9M km",
        description: "The Red Planet, possible past water.",
    },
    PlanetEntry {
        name: "Jupiter",
        radius: 3.6,
        orbit_radius: 66.0,
        color: 0xffb347,
        size: "139,820 km",
        distance: "778.5M km",
        description: "Largest planet, gas giant.",
    },
    PlanetEntry {
        name: "Saturn",
        radius: 3.0,
        orbit_radius: 78.0,
        color: 0xe5e4e2,
        size: "116,460 km",
        distance: "1.43B km",
        description: "Famous for its rings.",
    },
    PlanetEntry {
        name: "Uranus",
        radius: 2.4,
        orbit_radius: 90.0,
        color: 0x7fffd4,
        size: "50,724 km",
        distance: "2.87B km",
        description: "Ice giant, rotates on its side.",
    },
    PlanetEntry {
        name: "Neptune",
        radius: 2.4,
        orbit_radius: 102.0,
        color: 0x4169e1,
        size: "49,244 km",
        distance: "4.5B km",
        description: "Farthest planet, strong winds.",
    },
];

pub fn find_planet(name: &str) -> Option<&'static PlanetEntry> {
    PLANETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}
