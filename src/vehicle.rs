// src/vehicle.rs
//
// Ego and neighbor kinematic state, as refreshed once per tick from telemetry.

use std::fmt;

use crate::geometry::{FrenetCoordinates, GlobalCoordinates};

/// Ego vehicle state at the start of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VehicleDynamics {
    /// Current speed (m/s)
    pub velocity: f64,

    /// Current position (global frame)
    pub global: GlobalCoordinates,

    /// Current position (Frenet frame)
    pub frenet: FrenetCoordinates,

    /// Current heading (radians)
    pub yaw: f64,
}

impl fmt::Display for VehicleDynamics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VehicleDynamics{{{}, {}, velocity: {:.3}, yaw: {:.3}}}",
            self.global, self.frenet, self.velocity, self.yaw
        )
    }
}

/// One perceived neighbor vehicle ("sensor fusion" object).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ObjectFusion {
    pub id: i32,
    pub global: GlobalCoordinates,
    pub velocity_xy: (f64, f64),
    pub frenet: FrenetCoordinates,

    /// Longitudinal speed magnitude (m/s), derived from `velocity_xy`.
    pub velocity: f64,
}

impl ObjectFusion {
    pub fn new(id: i32, global: GlobalCoordinates, velocity_xy: (f64, f64), frenet: FrenetCoordinates) -> Self {
        let velocity = (velocity_xy.0 * velocity_xy.0 + velocity_xy.1 * velocity_xy.1).sqrt();
        Self { id, global, velocity_xy, frenet, velocity }
    }
}

/// The full set of perceived neighbors for one tick.
#[derive(Debug, Clone, Default)]
pub struct SensorFusion {
    pub objs: Vec<ObjectFusion>,
}

impl SensorFusion {
    pub fn new(objs: Vec<ObjectFusion>) -> Self {
        Self { objs }
    }
}
