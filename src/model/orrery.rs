use std::collections::HashMap;
use std::f32::consts::TAU;

use nalgebra::Point3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::registry::{Body, BodyID, Registry};
use crate::config::ViewerConfig;

pub const MAX_ANGULAR_SPEED: f32 = 10.0;
// Speeding up a stopped body starts it at this speed
pub const RESTART_ANGULAR_SPEED: f32 = 0.125;

/// Per-body mutable state. `angle` is never wrapped; it just keeps growing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    pub angle: f32,
    pub angular_speed: f32,
    pub spin: f32,
}

/// The bodies plus where they currently are. Every body orbits the origin on a
/// circle in the xz-plane.
#[derive(Debug, Clone)]
pub struct Orrery {
    registry: Registry,
    states: HashMap<BodyID, OrbitState>,
    sun_spin: f32,
    // -- rates, per step --
    base_rate: f32,
    spin_rate: f32,
    sun_spin_rate: f32,
}

pub fn orbit_position(orbit_radius: f32, angle: f32) -> Point3<f32> {
    Point3::new(
        orbit_radius * angle.cos(),
        0.0,
        orbit_radius * angle.sin(),
    )
}

impl Orrery {
    pub fn new(registry: Registry, config: &ViewerConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);

        let mut states = HashMap::new();
        for body in registry.bodies() {
            let angle = if config.random_initial_angles {
                rng.gen_range(0.0..TAU)
            } else {
                0.0
            };
            let state = OrbitState {
                angle,
                angular_speed: nalgebra::clamp(body.info.angular_speed, 0.0, MAX_ANGULAR_SPEED),
                spin: 0.0,
            };
            states.insert(body.id, state);
        }

        Orrery {
            registry,
            states,
            sun_spin: 0.0,
            base_rate: config.base_rate,
            spin_rate: config.spin_rate,
            sun_spin_rate: config.sun_spin_rate,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> + '_ {
        self.registry.bodies()
    }

    pub fn get_body(&self, id: BodyID) -> Option<&Body> {
        self.registry.get_body(id)
    }

    pub fn get_state(&self, id: BodyID) -> Option<&OrbitState> {
        self.states.get(&id)
    }

    pub fn sun_spin(&self) -> f32 {
        self.sun_spin
    }

    pub fn position(&self, id: BodyID) -> Option<Point3<f32>> {
        let body = self.registry.get_body(id)?;
        let state = self.states.get(&id)?;
        Some(orbit_position(body.info.orbit_radius, state.angle))
    }

    /// Bodies paired with their current positions, in registry order.
    pub fn positions(&self) -> impl Iterator<Item = (&Body, Point3<f32>)> + '_ {
        self.registry.bodies().map(move |body| {
            let angle = self.states[&body.id].angle;
            (body, orbit_position(body.info.orbit_radius, angle))
        })
    }

    /// Advances every body by `steps` animation ticks. A tick moves a body
    /// `base_rate * angular_speed` radians along its orbit and spins it by a
    /// fixed amount. Fractional steps are fine.
    pub fn advance(&mut self, steps: f32) {
        for state in self.states.values_mut() {
            state.angle += self.base_rate * state.angular_speed * steps;
            state.spin += self.spin_rate * steps;
        }
        self.sun_spin += self.sun_spin_rate * steps;
    }

    pub fn set_speed(&mut self, id: BodyID, speed: f32) {
        if let Some(state) = self.states.get_mut(&id) {
            state.angular_speed = nalgebra::clamp(speed, 0.0, MAX_ANGULAR_SPEED);
        }
    }

    /// Multiplies the speed of one body, or of every body if `id` is `None`.
    /// A stopped body can't be multiplied back up, so speeding it up restarts
    /// it at `RESTART_ANGULAR_SPEED` instead.
    pub fn scale_speed(&mut self, id: Option<BodyID>, factor: f32) {
        let ids: Vec<_> = match id {
            Some(id) => vec![id],
            None => self.registry.ids().collect(),
        };
        for id in ids {
            if let Some(speed) = self.states.get(&id).map(|s| s.angular_speed) {
                let new_speed = if speed <= 0.0 && factor > 1.0 {
                    RESTART_ANGULAR_SPEED
                } else {
                    speed * factor
                };
                self.set_speed(id, new_speed);
            }
        }
    }
}
