use std::collections::HashMap;
use std::path::PathBuf;

use nalgebra::Point3;

use crate::consts::{PlanetEntry, PLANETS, TEXTURE_DIR};

/// Stable handle for a body. Handed out by the registry on insertion and
/// never reused, so hover/focus references stay valid regardless of the
/// order in which bodies are listed.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BodyID(pub usize);

// Human-readable facts, shown in labels and the info panel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodyDetails {
    pub size: String,
    pub distance: String,
    pub description: String,
}

// All the static info about a body
#[derive(Debug, Clone)]
pub struct BodyInfo {
    pub name: String,
    pub radius: f32,
    pub orbit_radius: f32,
    pub angular_speed: f32,
    pub color: Point3<f32>,
    pub texture: Option<PathBuf>,
    pub details: BodyDetails,
}

#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyID,
    pub info: BodyInfo,
}

/// Ordered collection of bodies. Iteration follows insertion order; lookups
/// go through `BodyID`.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    bodies: HashMap<BodyID, Body>,
    order: Vec<BodyID>,
    next_body_id: usize,
}

impl BodyInfo {
    /// Info for one of the eight built-in planets.
    pub fn from_planet(planet: &PlanetEntry) -> Self {
        BodyInfo {
            name: planet.name.to_owned(),
            radius: planet.radius,
            orbit_radius: planet.orbit_radius,
            angular_speed: 1.0,
            color: color_from_hex(planet.color),
            texture: Some(default_texture_path(planet.name)),
            details: BodyDetails {
                size: planet.size.to_owned(),
                distance: planet.distance.to_owned(),
                description: planet.description.to_owned(),
            },
        }
    }
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            bodies: HashMap::new(),
            order: vec![],
            next_body_id: 0,
        }
    }

    /// The eight planets, Mercury through Neptune.
    pub fn default_planets() -> Self {
        let mut registry = Registry::new();
        for planet in PLANETS.iter() {
            registry.add_body(BodyInfo::from_planet(planet));
        }
        registry
    }

    pub fn add_body(&mut self, info: BodyInfo) -> BodyID {
        let id = BodyID(self.next_body_id);
        self.next_body_id += 1;

        self.bodies.insert(id, Body { id, info });
        self.order.push(id);
        id
    }

    pub fn get_body(&self, id: BodyID) -> Option<&Body> {
        self.bodies.get(&id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Body> {
        self.bodies()
            .find(|b| b.info.name.eq_ignore_ascii_case(name))
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> + '_ {
        self.order.iter().map(move |id| &self.bodies[id])
    }

    pub fn ids(&self) -> impl Iterator<Item = BodyID> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

pub fn color_from_hex(rgb: u32) -> Point3<f32> {
    let r = (rgb >> 16) & 0xff;
    let g = (rgb >> 8) & 0xff;
    let b = rgb & 0xff;

    Point3::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

pub fn default_texture_path(name: &str) -> PathBuf {
    PathBuf::from(TEXTURE_DIR).join(format!("{}.jpg", name.to_lowercase()))
}
